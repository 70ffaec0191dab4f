//! Book repository.

use std::sync::Arc;

use biblio_core::types::id::BookId;
use biblio_core::types::pagination::{PageRequest, PageResponse};
use biblio_entity::book::Book;

use crate::memory::MemoryStore;

/// Read access to book rows.
#[derive(Debug, Clone)]
pub struct BookRepository {
    store: Arc<MemoryStore>,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Find a book by primary key.
    pub async fn find_by_id(&self, id: BookId) -> Option<Book> {
        self.store.read(|t| t.books.get(&id).cloned()).await
    }

    /// Find a book by its isbn.
    pub async fn find_by_isbn(&self, isbn: &str) -> Option<Book> {
        self.store
            .read(|t| t.books.values().find(|b| b.isbn == isbn).cloned())
            .await
    }

    /// List books with pagination, ordered by title.
    pub async fn find_all(&self, page: &PageRequest) -> PageResponse<Book> {
        self.store
            .read(|t| {
                let mut books: Vec<Book> = t.books.values().cloned().collect();
                books.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.isbn.cmp(&b.isbn)));
                let total = books.len() as u64;
                let items = books
                    .into_iter()
                    .skip(page.offset() as usize)
                    .take(page.limit() as usize)
                    .collect();
                PageResponse::new(items, page.page, page.page_size, total)
            })
            .await
    }

    /// Count books in the catalog.
    pub async fn count(&self) -> u64 {
        self.store.read(|t| t.books.len() as u64).await
    }
}
