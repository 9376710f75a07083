use serde::{Deserialize, Serialize};

/// Value of the `status` field in every successful response envelope.
pub const SUCCESS: &str = "SUCCESS";

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Machine-readable error body shared by all handlers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
