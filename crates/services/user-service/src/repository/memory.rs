//! In-memory user repository.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::User;

use super::UserRepository;

/// Process-local implementation of UserRepository.
///
/// One readers-writer lock guards the whole map: `save` and `delete` take it
/// exclusively, lookups share it. Each store owns its own map, so separate
/// instances never see each other's data.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        match users.entry(user.id.clone()) {
            Entry::Occupied(mut entry) => {
                // created_at is immutable, same as the relational upsert
                let stored = entry.get_mut();
                stored.name.clone_from(&user.name);
                stored.email.clone_from(&user.email);
                stored.updated_at = user.updated_at;
            }
            Entry::Vacant(entry) => {
                entry.insert(user.clone());
            }
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        // Match the relational ordering; id keeps equal timestamps stable
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(users)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}
