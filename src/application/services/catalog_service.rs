//! Catalog search and maintenance service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::domain::entities::{Book, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;

/// Service for browsing and maintaining the book catalog.
pub struct CatalogService<B: BookRepository> {
    book_repository: Arc<B>,
}

impl<B: BookRepository> CatalogService<B> {
    /// Creates a new catalog service.
    pub fn new(book_repository: Arc<B>) -> Self {
        Self { book_repository }
    }

    /// Free-text search over title, author and ISBN, case-insensitive.
    ///
    /// An empty (or whitespace-only) query returns no results rather than
    /// the full catalog: "no filter typed" is not "show everything".
    pub async fn search(&self, query: &str) -> Result<Vec<Book>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.book_repository.search(query).await
    }

    /// Fetches a single book for the detail view.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    pub async fn get(&self, id: i64) -> Result<Book, AppError> {
        self.book_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "book_id": id })))
    }

    /// Adds a book to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the input fails field
    /// validation (empty title/author, malformed ISBN or image URL).
    pub async fn add(&self, new_book: NewBook) -> Result<Book, AppError> {
        new_book.validate().map_err(|e| {
            AppError::validation("Invalid book data", json!({ "errors": e.to_string() }))
        })?;

        let book = self.book_repository.create(new_book).await?;
        info!(book_id = book.id, title = %book.title, "book added to catalog");
        Ok(book)
    }

    /// Removes a book from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on an unknown id.
    pub async fn remove(&self, id: i64) -> Result<(), AppError> {
        if !self.book_repository.delete(id).await? {
            return Err(AppError::not_found(
                "Book not found",
                json!({ "book_id": id }),
            ));
        }
        info!(book_id = id, "book removed from catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBookRepository;

    fn test_book(id: i64, title: &str, isbn: &str) -> Book {
        Book::new(
            id,
            title.to_string(),
            "Author".to_string(),
            isbn.to_string(),
            "Publisher".to_string(),
            2001,
            "https://covers.example.com/x.jpg".to_string(),
            true,
        )
    }

    #[tokio::test]
    async fn test_search_empty_query_skips_repository() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_search().times(0);

        let service = CatalogService::new(Arc::new(mock_repo));

        assert!(service.search("").await.unwrap().is_empty());
        assert!(service.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_trims_and_forwards_query() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo
            .expect_search()
            .withf(|q| q == "172719")
            .times(1)
            .returning(|_| Ok(vec![test_book(1, "Dune", "9780441172719")]));

        let service = CatalogService::new(Arc::new(mock_repo));
        let books = service.search("  172719 ").await.unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "9780441172719");
    }

    #[tokio::test]
    async fn test_get_unknown_book() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(mock_repo));
        let result = service.get(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_book() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_create().times(0);

        let service = CatalogService::new(Arc::new(mock_repo));
        let result = service
            .add(NewBook {
                title: String::new(),
                author: "Author".to_string(),
                isbn: "9780441172719".to_string(),
                publisher: "Publisher".to_string(),
                pub_year: 2001,
                image_url: "https://covers.example.com/x.jpg".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_unknown_book() {
        let mut mock_repo = MockBookRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = CatalogService::new(Arc::new(mock_repo));
        let result = service.remove(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
