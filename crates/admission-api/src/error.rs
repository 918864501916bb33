use core::error::Error;

/// Errors that end a watch driven by a [`ResourceEventDispatcher`](crate::ResourceEventDispatcher).
#[derive(Debug, derive_more::Display)]
pub enum WatchError {
    #[display("Watch stream failed: {message}")]
    StreamFailed { message: String },
}

impl Error for WatchError {}
