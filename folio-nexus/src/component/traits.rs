use crate::application::{Context, EventContext};
use std::any::Any;

/// Input delivered to components.
#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
    /// Bracketed paste.
    Paste(String),
}

/// What a component asks its parent to do after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Handled; nothing for the parent to do.
    Noop,
}

/// A piece of UI with a lifecycle.
///
/// `on_mount` runs once, `on_enter`/`on_exit` run every time the component
/// becomes or stops being the visible page.
pub trait Component: Send + Sync + 'static {
    fn on_mount(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    fn on_enter(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    fn on_exit(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    fn on_shutdown(&mut self, cx: &mut Context<Self>) {
        let _ = cx;
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>);

    fn handle_event(&mut self, event: Event, cx: &mut EventContext<Self>) -> Option<Action> {
        let _ = event;
        let _ = cx;
        None
    }
}

/// Object-safe mirror of [`Component`] used for the root.
pub trait AnyComponent: Any + Send + Sync + 'static {
    fn on_mount_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_enter_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_exit_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn on_shutdown_any(&mut self, cx: &mut Context<dyn AnyComponent>);
    fn render_any(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<dyn AnyComponent>);
    fn handle_event_any(&mut self, event: Event, cx: &mut EventContext<dyn AnyComponent>) -> Option<Action>;
}

impl<T: Component> AnyComponent for T {
    fn on_mount_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_mount(&mut cx.cast::<Self>());
    }

    fn on_enter_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_enter(&mut cx.cast::<Self>());
    }

    fn on_exit_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_exit(&mut cx.cast::<Self>());
    }

    fn on_shutdown_any(&mut self, cx: &mut Context<dyn AnyComponent>) {
        self.on_shutdown(&mut cx.cast::<Self>());
    }

    fn render_any(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<dyn AnyComponent>) {
        self.render(frame, &mut cx.cast::<Self>());
    }

    fn handle_event_any(&mut self, event: Event, cx: &mut EventContext<dyn AnyComponent>) -> Option<Action> {
        self.handle_event(event, &mut cx.cast::<Self>())
    }
}
