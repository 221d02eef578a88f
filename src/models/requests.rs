use serde::{Deserialize, Serialize};

/// Query string for `/execute` and `/invoke`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteQuery {
    pub q: String,
}
