//! Static bibliographic catalogue: authors and books.

use serde::{Deserialize, Serialize};

use super::ids::{AuthorId, BookId, LibraryId};

/// Physical or digital format of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookFormat {
    #[default]
    HardCover,
    PaperBack,
    AudioBook,
    Ebook,
    Newspaper,
    Magazine,
    Journal,
}

/// An author of one or more books in a library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub library: LibraryId,
    pub name: String,
    pub active: bool,
}

/// Bibliographic record; physical copies are tracked as
/// [`crate::domain::BookItem`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub library: LibraryId,
    pub title: String,
    pub subject: String,
    pub publisher: String,
    pub pages: u32,
    pub format: BookFormat,
    /// ISO 639-1 language code, "en" unless supplied.
    pub language: String,
    pub description: Option<String>,
    /// Restrict-on-delete: the author cannot be removed while referenced.
    pub author: AuthorId,
    pub active: bool,
}

/// Default language stamped on books created without one.
pub const DEFAULT_BOOK_LANGUAGE: &str = "en";
