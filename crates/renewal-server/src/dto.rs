use serde::{Deserialize, Serialize};

// === HTTP DTOs ===

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub ready: bool,
}
