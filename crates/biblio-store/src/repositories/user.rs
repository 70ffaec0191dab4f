//! User repository.

use std::sync::Arc;

use biblio_core::types::id::UserId;
use biblio_core::types::pagination::{PageRequest, PageResponse};
use biblio_entity::user::User;

use crate::memory::MemoryStore;

/// Read access to user rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: Arc<MemoryStore>,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: UserId) -> Option<User> {
        self.store.read(|t| t.users.get(&id).cloned()).await
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.store
            .read(|t| t.users.values().find(|u| u.username == username).cloned())
            .await
    }

    /// List users with pagination, newest registration first.
    pub async fn find_all(&self, page: &PageRequest) -> PageResponse<User> {
        self.store
            .read(|t| {
                let mut users: Vec<User> = t.users.values().cloned().collect();
                users.sort_by(|a, b| {
                    b.created_at
                        .cmp(&a.created_at)
                        .then_with(|| a.username.cmp(&b.username))
                });
                let total = users.len() as u64;
                let items = users
                    .into_iter()
                    .skip(page.offset() as usize)
                    .take(page.limit() as usize)
                    .collect();
                PageResponse::new(items, page.page, page.page_size, total)
            })
            .await
    }

    /// Count registered users.
    pub async fn count(&self) -> u64 {
        self.store.read(|t| t.users.len() as u64).await
    }
}
