//! Book management service

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BOOK_ID_ALPHABET, BOOK_ID_LEN},
        Book, BookFilter, BookPayload, BookSummary,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and append a new book, returning its generated id
    pub async fn add(&self, payload: BookPayload) -> AppResult<String> {
        payload
            .validate()
            .map_err(|violation| AppError::Validation(format!("Gagal menambahkan buku. {}", violation)))?;

        let now = Utc::now();
        loop {
            let id = generate_book_id();
            let book = Book::new(id.clone(), payload.clone(), now);
            if self.repository.books_insert(book).await? {
                tracing::info!(book_id = %id, "Book added");
                return Ok(id);
            }
            tracing::warn!(book_id = %id, "Generated book id already taken, retrying");
        }
    }

    /// List book summaries matching the filter
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.repository.books_list(filter).await
    }

    /// Number of books currently held
    pub async fn count(&self) -> usize {
        self.repository.books_count().await
    }

    /// Get book by ID
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books_get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))
    }

    /// Replace every field of a book except its id and insertion time.
    ///
    /// The lookup wins over validation, and a rejected payload never reaches
    /// the stored record.
    pub async fn edit(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let now = Utc::now();
        self.repository
            .books_update(id, move |book| {
                payload.validate().map_err(|violation| {
                    AppError::Validation(format!("Gagal memperbarui buku. {}", violation))
                })?;
                book.apply(payload, now);
                Ok(())
            })
            .await
            .ok_or_else(|| AppError::NotFound("Gagal memperbarui buku. Id tidak ditemukan".to_string()))??;

        tracing::info!(book_id = %id, "Book updated");
        Ok(())
    }

    /// Delete a book
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books_delete(id).await {
            return Err(AppError::NotFound(
                "Buku gagal dihapus. Id tidak ditemukan".to_string(),
            ));
        }

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

/// Random identifier drawn from the URL-safe alphabet
fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LEN)
        .map(|_| BOOK_ID_ALPHABET[rng.gen_range(0..BOOK_ID_ALPHABET.len())] as char)
        .collect()
}
