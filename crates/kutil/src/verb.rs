use serde::Deserialize;
use serde::Serialize;

/// Which branch of a create-or-patch call was taken.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// The object already matched the desired state
    #[default]
    #[display("")]
    #[serde(rename = "")]
    Unchanged,
    /// The object did not exist and was created
    #[display("created")]
    Created,
    /// The object existed and a patch was sent
    #[display("patched")]
    Patched,
}

impl Verb {
    /// Whether the call sent a mutating request to the API server.
    pub fn is_changed(self) -> bool {
        self != Verb::Unchanged
    }
}
