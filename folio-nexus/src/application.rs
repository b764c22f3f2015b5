//! Terminal application runtime.
//!
//! Owns the terminal, a tokio runtime and the redraw channel. Components ask
//! for a redraw through [`AppContext::refresh`]; input is polled from
//! crossterm and handed to the root component.

use crate::component::traits::{Action, AnyComponent, Component, Event};
use crate::error::TerminalSnafu;
use crate::task::TaskHandle;
use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event as CrosstermEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use snafu::ResultExt;
use std::io::{self, stdout};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

type SharedRoot = Arc<Mutex<dyn AnyComponent>>;

/// Handle to application-wide services, cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    root: Arc<Mutex<Option<SharedRoot>>>,
    re_render_tx: mpsc::UnboundedSender<()>,
}

impl AppContext {
    fn new(re_render_tx: mpsc::UnboundedSender<()>) -> Self {
        Self {
            root: Arc::new(Mutex::new(None)),
            re_render_tx,
        }
    }

    /// A context not attached to a running application. Redraw requests are
    /// dropped; useful for rendering into a test backend.
    pub fn detached() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self::new(tx)
    }

    /// Run `f` on the runtime and return a handle that can abort it.
    pub fn spawn_task<F, Fut>(&self, f: F) -> TaskHandle
    where
        F: FnOnce(AppContext) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let cx = self.clone();
        let handle = tokio::spawn(async move {
            f(cx).await;
        });
        TaskHandle::new(handle.abort_handle())
    }

    pub fn set_root<C: Component>(&self, root: C) -> crate::Result<()> {
        let mut guard = self.root.lock().map_err(|_| crate::Error::LockPoisoned)?;
        *guard = Some(Arc::new(Mutex::new(root)));
        self.refresh();
        Ok(())
    }

    /// Request a redraw.
    pub fn refresh(&self) {
        let _ = self.re_render_tx.send(());
    }

    fn root(&self) -> anyhow::Result<Option<SharedRoot>> {
        let guard = self
            .root
            .lock()
            .map_err(|_| anyhow::anyhow!("root slot poisoned"))?;
        Ok(guard.clone())
    }
}

/// Per-call context handed to component methods.
pub struct Context<V: ?Sized> {
    pub app: AppContext,
    pub area: Rect,
    _view: PhantomData<fn(&V)>,
}

impl<V: ?Sized> Context<V> {
    pub fn new(app: AppContext, area: Rect) -> Self {
        Self {
            app,
            area,
            _view: PhantomData,
        }
    }

    /// Same context, typed for a child component.
    pub fn cast<U: ?Sized>(&self) -> Context<U> {
        Context::new(self.app.clone(), self.area)
    }

    /// Same context restricted to `area`.
    pub fn with_area<U: ?Sized>(&self, area: Rect) -> Context<U> {
        Context::new(self.app.clone(), area)
    }
}

pub type EventContext<V> = Context<V>;

/// Entry point: sets up the terminal and runs the root component.
pub struct Application {
    poll_interval: Duration,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
        }
    }

    /// Build the runtime, let `setup` install the root, then run until quit.
    pub fn run<F>(self, setup: F) -> anyhow::Result<()>
    where
        F: FnOnce(&AppContext) -> anyhow::Result<()>,
    {
        let rt = Runtime::new().map_err(|e| anyhow::anyhow!("Failed to start tokio: {}", e))?;

        let (re_render_tx, re_render_rx) = mpsc::unbounded_channel();
        let app_context = AppContext::new(re_render_tx);

        {
            let _guard = rt.enter();
            setup(&app_context)?;
        }

        let root: SharedRoot = match app_context.root()? {
            Some(root) => root,
            None => {
                tracing::warn!("no root component set, showing placeholder");
                Arc::new(Mutex::new(EmptyView))
            }
        };

        rt.block_on(async move { self.run_loop(app_context, root, re_render_rx).await })
    }

    async fn run_loop(
        &self,
        app: AppContext,
        root: SharedRoot,
        re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<()> {
        enable_raw_mode().context(TerminalSnafu)?;
        let mut restore = RestoreGuard::new(restore_terminal);
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
            .context(TerminalSnafu)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context(TerminalSnafu)?;

        {
            let size = terminal.size().context(TerminalSnafu)?;
            let area = Rect::new(0, 0, size.width, size.height);
            let mut guard = root
                .lock()
                .map_err(|_| anyhow::anyhow!("Root mutex poisoned during mount"))?;
            let mut cx = Context::<dyn AnyComponent>::new(app.clone(), area);
            guard.on_mount_any(&mut cx);
            guard.on_enter_any(&mut cx);
        }
        tracing::info!("terminal ready");

        let result = self.run_app_loop(app, &mut terminal, root, re_render_rx).await;

        drop(terminal);
        restore.restore().context(TerminalSnafu)?;

        if let Err(e) = &result {
            tracing::error!(error = %e, "application loop failed");
        }
        result
    }

    async fn run_app_loop(
        &self,
        app: AppContext,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        root: SharedRoot,
        mut re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<()> {
        app.refresh();
        let poll_interval = self.poll_interval;

        loop {
            tokio::select! {
                Some(()) = re_render_rx.recv() => {
                    // Coalesce a burst of redraw requests into one frame.
                    while re_render_rx.try_recv().is_ok() {}

                    let mut guard = root
                        .lock()
                        .map_err(|_| anyhow::anyhow!("Root mutex poisoned during render"))?;
                    terminal.draw(|frame| {
                        let mut cx = Context::<dyn AnyComponent>::new(app.clone(), frame.area());
                        guard.render_any(frame, &mut cx);
                    })?;
                }
                event_ready = async { event::poll(poll_interval) } => {
                    if !matches!(event_ready, Ok(true)) {
                        continue;
                    }
                    let internal_event = match event::read()? {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                        CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
                        _ => None,
                    };
                    let Some(event) = internal_event else {
                        continue;
                    };

                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    let mut cx = Context::<dyn AnyComponent>::new(app.clone(), area);

                    let mut guard = root
                        .lock()
                        .map_err(|_| anyhow::anyhow!("Root mutex poisoned during event"))?;
                    let action = guard.handle_event_any(event, &mut cx);
                    app.refresh();

                    if action == Some(Action::Quit) {
                        guard.on_exit_any(&mut cx);
                        guard.on_shutdown_any(&mut cx);
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Undo terminal setup: raw mode off, main screen back, cursor shown. Every
/// step runs even if an earlier one fails; the first error is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(
        stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen,
        cursor::Show
    );
    raw.and(screen)
}

/// Runs a restore step exactly once: explicitly through
/// [`RestoreGuard::restore`], or on drop when setup bails out early.
struct RestoreGuard<F: FnMut() -> io::Result<()>> {
    restore: Option<F>,
}

impl<F: FnMut() -> io::Result<()>> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore: Some(restore) }
    }

    fn restore(&mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!(error = %e, "failed to restore terminal");
        }
    }
}

struct EmptyView;

impl Component for EmptyView {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let paragraph = ratatui::widgets::Paragraph::new("No component set")
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, cx.area);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut crate::EventContext<Self>) -> Option<Action> {
        match event {
            Event::Key(key) if key.code == crossterm::event::KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
