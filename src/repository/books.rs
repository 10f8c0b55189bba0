//! Books domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, BookSummary},
};

impl Repository {
    /// List book summaries matching the filter, in insertion order
    pub async fn books_list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let books = self.books.read().await;
        books
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::summary)
            .collect()
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: &str) -> Option<Book> {
        let books = self.books.read().await;
        books.iter().find(|book| book.id == id).cloned()
    }

    /// Number of stored books
    pub async fn books_count(&self) -> usize {
        self.books.read().await.len()
    }

    /// Append a book.
    ///
    /// Returns `Ok(false)` without touching the collection when the id is
    /// already taken. The append and the presence check share one write lock.
    pub async fn books_insert(&self, book: Book) -> AppResult<bool> {
        let mut books = self.books.write().await;
        if books.iter().any(|existing| existing.id == book.id) {
            return Ok(false);
        }

        let id = book.id.clone();
        books.push(book);

        if !books.iter().any(|existing| existing.id == id) {
            return Err(AppError::Internal("Buku gagal ditambahkan".to_string()));
        }
        Ok(true)
    }

    /// Run `update` against the book with `id` under the write lock.
    ///
    /// `None` when no book matches. An error from `update` is passed through
    /// and `update` is responsible for leaving the record untouched in that case.
    pub async fn books_update<F>(&self, id: &str, update: F) -> Option<AppResult<()>>
    where
        F: FnOnce(&mut Book) -> AppResult<()>,
    {
        let mut books = self.books.write().await;
        let book = books.iter_mut().find(|book| book.id == id)?;
        Some(update(book))
    }

    /// Delete book, returning whether a record was removed
    pub async fn books_delete(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }
}
