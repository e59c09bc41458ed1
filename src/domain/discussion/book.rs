//! Book reference value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Reference to the book a debate is tied to.
///
/// The catalog itself is an external collaborator; only the fields needed
/// for display and identity are carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    isbn: String,
    title: String,
    cover_url: Option<String>,
}

impl BookRef {
    /// Creates a book reference.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if isbn or title is empty
    /// - `InvalidFormat` if isbn is not 10 or 13 characters
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        cover_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let isbn = isbn.into();
        let title = title.into();

        if isbn.trim().is_empty() {
            return Err(ValidationError::empty_field("isbn"));
        }
        if !matches!(isbn.len(), 10 | 13) {
            return Err(ValidationError::invalid_format(
                "isbn",
                "must be 10 or 13 characters",
            ));
        }
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("book_title"));
        }

        Ok(Self {
            isbn,
            title,
            cover_url,
        })
    }

    /// Returns the ISBN.
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Returns the book title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the cover image URL, if the catalog provided one.
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_ref_accepts_isbn13() {
        let book = BookRef::new("9788932917245", "The Vegetarian", None).unwrap();
        assert_eq!(book.isbn(), "9788932917245");
        assert_eq!(book.title(), "The Vegetarian");
    }

    #[test]
    fn book_ref_accepts_isbn10() {
        assert!(BookRef::new("8932917245", "The Vegetarian", None).is_ok());
    }

    #[test]
    fn book_ref_rejects_empty_isbn() {
        let result = BookRef::new("", "Title", None);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn book_ref_rejects_wrong_length_isbn() {
        let result = BookRef::new("12345", "Title", None);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn book_ref_rejects_empty_title() {
        let result = BookRef::new("9788932917245", "  ", None);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }
}
