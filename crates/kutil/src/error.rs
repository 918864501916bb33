//! Error types for the create-or-patch helpers.

use core::error::Error;

use error_stack::Report;

use crate::verb::Verb;

/// Result type for create-or-patch operations.
pub type KutilResult<T> = Result<T, Report<KutilError>>;

/// Errors that can occur while creating or patching an object.
///
/// The underlying [`kube::Error`] or [`serde_json::Error`] stays attached to
/// the report and can be recovered with [`Report::downcast_ref`].
#[derive(Debug, derive_more::Display)]
pub enum KutilError {
    #[display("Failed to get {kind} {key}")]
    Fetch { kind: String, key: String },
    #[display("Failed to create {kind} {key}")]
    Create { kind: String, key: String },
    #[display("Failed to serialize {kind} {key}")]
    Serialize { kind: String, key: String },
    #[display("Failed to patch {kind} {key}")]
    Patch { kind: String, key: String },
    #[display("Failed to connect to Kubernetes API: {message}")]
    ConnectionFailed { message: String },
}

impl Error for KutilError {}

impl KutilError {
    /// The outcome implied by the step that failed.
    pub fn verb(&self) -> Verb {
        match self {
            KutilError::Create { .. } => Verb::Created,
            KutilError::Patch { .. } => Verb::Patched,
            KutilError::Fetch { .. }
            | KutilError::Serialize { .. }
            | KutilError::ConnectionFailed { .. } => Verb::Unchanged,
        }
    }
}

/// Returns true if the API server answered with `404 Not Found`.
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

/// The API error behind a failed call, if the failure came from the API client.
pub fn kube_error(report: &Report<KutilError>) -> Option<&kube::Error> {
    report.downcast_ref::<kube::Error>()
}

pub(crate) fn object_key(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{ns}/{name}"),
        None => name.to_string(),
    }
}
