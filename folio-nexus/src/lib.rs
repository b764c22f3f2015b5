//! Runtime pieces for the Folio terminal portfolio: the application loop,
//! component lifecycle, shared state, background tasks, the in-page router
//! with its session history, and a small persistent key value store.

pub mod application;
pub mod component;
pub mod error;
pub mod history;
pub mod router;
pub mod state;
pub mod store;
pub mod task;

pub use error::{Error, Result};

pub use application::{AppContext, Application, Context, EventContext};
pub use component::{Action, AnyComponent, Component, Event};
pub use history::{History, SessionHistory};
pub use router::{Activate, LinkBar, NavEvent, NavLink, NavLinks, Resolution, Router};
pub use state::Entity;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use task::{TaskHandle, TaskTracker};
