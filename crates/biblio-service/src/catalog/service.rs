//! Catalog service — owns book records and their copy-count invariants.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use biblio_core::error::AppError;
use biblio_core::result::AppResult;
use biblio_core::traits::Clock;
use biblio_core::types::id::BookId;
use biblio_core::types::pagination::{PageRequest, PageResponse};
use biblio_entity::audit::{AuditAction, AuditEntityType};
use biblio_entity::book::{Book, CreateBook};
use biblio_store::MemoryStore;
use biblio_store::repositories::BookRepository;

use crate::audit::record::record;
use crate::context::RequestContext;

/// Handles catalog mutations and lookups.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Transactional store.
    store: Arc<MemoryStore>,
    /// Book repository (read side).
    book_repo: Arc<BookRepository>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(store: Arc<MemoryStore>, book_repo: Arc<BookRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            book_repo,
            clock,
        }
    }

    /// Add a book to the catalog with a single copy.
    ///
    /// Fails with a validation error when title/author/isbn are empty and
    /// with a conflict when the isbn is already present.
    pub async fn add_book(&self, ctx: &RequestContext, req: CreateBook) -> AppResult<Book> {
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let title = req.title.trim().to_string();
        let author = req.author.trim().to_string();
        let isbn = req.isbn.trim().to_string();
        if title.is_empty() || author.is_empty() || isbn.is_empty() {
            return Err(AppError::validation(
                "Title, author, and isbn must not be blank",
            ));
        }

        let now = self.clock.now();
        let book = self
            .store
            .transaction(|tx| {
                if tx.isbn_exists(&isbn) {
                    return Err(AppError::conflict(format!(
                        "A book with isbn '{isbn}' already exists"
                    )));
                }

                let book = Book {
                    id: BookId::new(),
                    title: title.clone(),
                    author: author.clone(),
                    isbn: isbn.clone(),
                    total_copies: 1,
                    available_copies: 1,
                };
                tx.put_book(book.clone());

                record(
                    tx,
                    now,
                    AuditAction::BookCreated,
                    AuditEntityType::Book,
                    book.id.into_uuid(),
                    ctx.actor_id,
                    Some(json!({
                        "title": book.title,
                        "author": book.author,
                        "isbn": book.isbn,
                    })),
                    ctx.source_address.clone(),
                );

                Ok(book)
            })
            .await?;

        info!(book_id = %book.id, isbn = %book.isbn, "Book added to catalog");
        Ok(book)
    }

    /// Change a book's total holding, shifting availability by the delta.
    ///
    /// The new total may not drop below the copies currently on loan. Runs
    /// as one transaction, so it cannot interleave with an in-flight
    /// reservation on the same book.
    pub async fn resize_copies(
        &self,
        ctx: &RequestContext,
        book_id: BookId,
        new_total: u32,
    ) -> AppResult<Book> {
        let now = self.clock.now();
        let book = self
            .store
            .transaction(|tx| {
                let mut book = tx
                    .book(book_id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Book {book_id} not found")))?;

                let on_loan = book.copies_on_loan();
                if new_total < on_loan {
                    return Err(AppError::validation(format!(
                        "Cannot resize '{}' to {new_total} copies: {on_loan} currently on loan",
                        book.title
                    ))
                    .with_details(json!({
                        "requested_total": new_total,
                        "copies_on_loan": on_loan,
                    })));
                }

                let previous_total = book.total_copies;
                // available + (new - old) == new - on_loan
                book.available_copies = new_total - on_loan;
                book.total_copies = new_total;
                tx.put_book(book.clone());

                record(
                    tx,
                    now,
                    AuditAction::BookUpdated,
                    AuditEntityType::Book,
                    book.id.into_uuid(),
                    ctx.actor_id,
                    Some(json!({
                        "previous_total": previous_total,
                        "total_copies": book.total_copies,
                        "available_copies": book.available_copies,
                    })),
                    ctx.source_address.clone(),
                );

                Ok(book)
            })
            .await?;

        info!(
            book_id = %book.id,
            total_copies = book.total_copies,
            available_copies = book.available_copies,
            "Book copies resized"
        );
        Ok(book)
    }

    /// Fetch a book by id.
    pub async fn get_book(&self, book_id: BookId) -> AppResult<Book> {
        self.book_repo
            .find_by_id(book_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Book {book_id} not found")))
    }

    /// List the catalog with pagination.
    pub async fn list_books(&self, page: &PageRequest) -> PageResponse<Book> {
        self.book_repo.find_all(page).await
    }
}
