//! Resource change notification adaptors.
//!
//! - [`ResourceHandler`]: receives add/update/delete notifications for a resource
//! - [`ResourceHandlerFuncs`]: implements [`ResourceHandler`] from optional closures
//! - [`ResourceEventDispatcher`]: feeds a `kube` watch stream into a handler

pub mod dispatch;
pub mod error;
pub mod handler;

pub use dispatch::ResourceEventDispatcher;
pub use error::WatchError;
pub use handler::ResourceHandler;
pub use handler::ResourceHandlerFuncs;
