use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::history::domain::HistoryEntry;
use crate::history::recorder::HistoryRecorder;

pub struct SeaOrmHistoryRecorder {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl HistoryRecorder for SeaOrmHistoryRecorder {
    async fn record(&self, entry: HistoryEntry) -> Result<(), ServiceError> {
        let new = models::history::NewHistory {
            user_id: entry.actor_id,
            ip: entry.ip,
            action: entry.action.as_str().to_string(),
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            entity_name: entry.entity_name,
        };
        models::history::append(&self.db, new).await?;
        Ok(())
    }
}
