//! Book entity representing a catalog record.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for ISBN validation: digits, 'X' check digit, optional dashes.
static ISBN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9X-]{10,13}$").unwrap());

/// A catalog book with its availability flag.
///
/// `is_available` is owned exclusively by the reservation lifecycle: it is
/// flipped through [`crate::domain::repositories::BookRepository::try_reserve`]
/// and [`crate::domain::repositories::BookRepository::release`], never by a
/// plain field write.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    pub pub_year: i32,
    pub image_url: String,
    pub is_available: bool,
}

impl Book {
    /// Creates a new Book instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        title: String,
        author: String,
        isbn: String,
        publisher: String,
        pub_year: i32,
        image_url: String,
        is_available: bool,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            publisher,
            pub_year,
            image_url,
            is_available,
        }
    }
}

/// Input data for adding a book to the catalog.
#[derive(Debug, Clone, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(regex(path = "*ISBN_REGEX", message = "Invalid ISBN format"))]
    pub isbn: String,
    #[validate(length(min = 1, max = 255))]
    pub publisher: String,
    #[validate(range(min = 1450, max = 2100))]
    pub pub_year: i32,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new_book() -> NewBook {
        NewBook {
            title: "The Master and Margarita".to_string(),
            author: "Mikhail Bulgakov".to_string(),
            isbn: "9780141180144".to_string(),
            publisher: "Penguin".to_string(),
            pub_year: 1997,
            image_url: "https://covers.example.com/master.jpg".to_string(),
        }
    }

    #[test]
    fn test_book_creation() {
        let book = Book::new(
            1,
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "9780441172719".to_string(),
            "Ace".to_string(),
            1990,
            "https://covers.example.com/dune.jpg".to_string(),
            true,
        );

        assert_eq!(book.id, 1);
        assert_eq!(book.title, "Dune");
        assert!(book.is_available);
    }

    #[test]
    fn test_new_book_valid() {
        assert!(valid_new_book().validate().is_ok());
    }

    #[test]
    fn test_new_book_rejects_bad_isbn() {
        let mut book = valid_new_book();
        book.isbn = "not-an-isbn".to_string();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_new_book_accepts_dashed_isbn() {
        let mut book = valid_new_book();
        book.isbn = "0-14-118014-X".to_string();
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_new_book_rejects_bad_image_url() {
        let mut book = valid_new_book();
        book.image_url = "covers/master.jpg".to_string();
        assert!(book.validate().is_err());
    }
}
