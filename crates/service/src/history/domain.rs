use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity type written for comment mutations.
pub const COMMENT_ENTITY: &str = "Comment";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Edit,
    Delete,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Create => "create",
            HistoryAction::Edit => "edit",
            HistoryAction::Delete => "delete",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One audit row as produced by the services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub actor_id: Option<i32>,
    pub ip: Option<String>,
    pub action: HistoryAction,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub entity_name: Option<String>,
}

impl HistoryEntry {
    pub fn comment(action: HistoryAction, actor_id: i32, ip: Option<String>, comment_id: i32) -> Self {
        Self {
            actor_id: Some(actor_id),
            ip,
            action,
            entity_type: COMMENT_ENTITY.to_string(),
            entity_id: Some(comment_id),
            entity_name: None,
        }
    }
}
