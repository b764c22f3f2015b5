//! Background tasks owned by a page.
//!
//! Pages that animate (the video clock, card transitions) start a ticker when
//! they are entered and must stop it when they are left. `TaskTracker` keeps
//! the abort handles and cancels them together.

use std::future::Future;
use tokio::task::AbortHandle;

/// Abort handle of one spawned task.
#[derive(Debug)]
pub struct TaskHandle {
    abort_handle: AbortHandle,
}

impl TaskHandle {
    pub fn new(abort_handle: AbortHandle) -> Self {
        Self { abort_handle }
    }

    /// Cancel at the next await point.
    pub fn abort(&self) {
        self.abort_handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort_handle.is_finished()
    }
}

/// Set of tasks cancelled together, also on drop.
#[derive(Debug, Default)]
pub struct TaskTracker {
    handles: Vec<TaskHandle>,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self { handles: Vec::new() }
    }

    pub fn track(&mut self, handle: TaskHandle) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Spawn `fut` on the current runtime and track it.
    pub fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut);
        self.track(TaskHandle::new(handle.abort_handle()));
    }

    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn active_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn has_active_tasks(&self) -> bool {
        self.handles.iter().any(|h| !h.is_finished())
    }
}

impl Drop for TaskTracker {
    fn drop(&mut self) {
        self.abort_all();
    }
}
