use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque handle to an externally owned sub-flow (wallet creation, setting up).
///
/// The startup flow never looks inside; it only keeps the handle so the UI
/// boundary can attach to the running sub-flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubflowRef(String);

impl SubflowRef {
    pub fn new() -> Self {
        SubflowRef(Uuid::new_v4().to_string())
    }
}

impl Default for SubflowRef {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SubflowRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
