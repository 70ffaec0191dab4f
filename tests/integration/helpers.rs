//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use biblio::config::AppConfig;
use biblio::entity::book::{Book, CreateBook};
use biblio::entity::user::{CreateUser, User};
use biblio::traits::{Clock, ManualClock};
use biblio::{Library, RequestContext};

/// Fixed instant all tests start from.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// A wired circulation core over a manually controlled clock.
pub struct TestApp {
    /// The wired services.
    pub library: Library,
    /// The controllable time source.
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a test application with default policy.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::starting_at(start_time()));
        let library = Library::with_clock(config, Arc::clone(&clock) as Arc<dyn Clock>);
        Self { library, clock }
    }

    /// Request context with a known source address and no authenticated
    /// actor.
    pub fn ctx(&self) -> RequestContext {
        RequestContext::new(None, Some("203.0.113.7".to_string()))
    }

    /// Register a user with unique email/phone derived from the username.
    pub async fn seed_user(&self, username: &str) -> User {
        self.library
            .membership
            .create_user(
                &self.ctx(),
                CreateUser {
                    username: username.to_string(),
                    email: format!("{username}@example.org"),
                    phone: format!("+1-555-{username}"),
                    role: None,
                },
            )
            .await
            .expect("seed user")
    }

    /// Add a book with a single copy.
    pub async fn seed_book(&self, title: &str, isbn: &str) -> Book {
        self.library
            .catalog
            .add_book(
                &self.ctx(),
                CreateBook {
                    title: title.to_string(),
                    author: "Test Author".to_string(),
                    isbn: isbn.to_string(),
                },
            )
            .await
            .expect("seed book")
    }

    /// Add a book and resize it to the requested number of copies.
    pub async fn seed_book_with_copies(&self, title: &str, isbn: &str, copies: u32) -> Book {
        let book = self.seed_book(title, isbn).await;
        self.library
            .catalog
            .resize_copies(&self.ctx(), book.id, copies)
            .await
            .expect("resize seeded book")
    }
}
