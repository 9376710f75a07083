use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::access::domain::{Caller, Permission};
use crate::access::errors::AccessError;
use crate::access::repository::CallerRepository;

pub struct SeaOrmCallerRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CallerRepository for SeaOrmCallerRepository {
    async fn find_caller(&self, user_id: i32) -> Result<Option<Caller>, AccessError> {
        let Some(user) = models::user::find(&self.db, user_id)
            .await
            .map_err(|e| AccessError::Repository(e.to_string()))?
        else {
            return Ok(None);
        };
        let names = models::user_permission::names_for_user(&self.db, user_id)
            .await
            .map_err(|e| AccessError::Repository(e.to_string()))?;
        let mut perms = Vec::with_capacity(names.len());
        for name in names {
            match name.parse::<Permission>() {
                Ok(p) => perms.push(p),
                // grants for other modules are irrelevant here
                Err(_) => warn!(user_id, permission = %name, "skipping unknown permission"),
            }
        }
        let name = format!("{} {}", user.first_name, user.last_name);
        Ok(Some(Caller::new(user.id, name).with_permissions(perms)))
    }
}
