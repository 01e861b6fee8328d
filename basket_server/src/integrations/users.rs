use basket_engine::db_types::{Role, UserAuth};
use catalog_client::UsersApi;
use log::debug;

use crate::auth::{AuthError, AuthResolver};

/// [`AuthResolver`] implementation backed by the users service.
#[derive(Clone)]
pub struct RemoteAuth {
    users: UsersApi,
}

impl RemoteAuth {
    pub fn new(users: UsersApi) -> Self {
        Self { users }
    }
}

impl AuthResolver for RemoteAuth {
    async fn resolve(&self, auth_token: &str) -> Result<UserAuth, AuthError> {
        let record = self.users.profile(auth_token).await.map_err(|e| match e.status() {
            Some(401) | Some(403) => AuthError::InvalidToken(e.to_string()),
            _ => AuthError::Unreachable(e.to_string()),
        })?;
        let role = record.role.parse::<Role>().map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        debug!("🔑️ Resolved token to user {} with role {role}", record.id);
        Ok(UserAuth { id: record.id, role })
    }
}
