//! Driving port for catalogue administration.

use async_trait::async_trait;

use crate::domain::book_item::BookItem;
use crate::domain::catalogue::{Author, Book, BookFormat};
use crate::domain::context::ActorId;
use crate::domain::error::Error;
use crate::domain::ids::{AuthorId, BookId, BookItemId};

/// Request to register an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAuthorRequest {
    pub actor: ActorId,
    pub name: String,
}

/// Request to register a book.
///
/// `format` and `language` fall back to the catalogue defaults
/// (hard cover, "en") when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookRequest {
    pub actor: ActorId,
    pub title: String,
    pub subject: String,
    pub publisher: String,
    pub pages: u32,
    pub format: Option<BookFormat>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub author: AuthorId,
}

/// Request to register a circulating copy of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookItemRequest {
    pub actor: ActorId,
    pub book: BookId,
}

/// Driving port covering catalogue creation and reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    /// Register an author in the acting library.
    async fn create_author(&self, request: CreateAuthorRequest) -> Result<Author, Error>;

    /// Register a book in the acting library.
    async fn create_book(&self, request: CreateBookRequest) -> Result<Book, Error>;

    /// Register a circulating copy; created Available with a generated
    /// barcode.
    async fn create_book_item(&self, request: CreateBookItemRequest) -> Result<BookItem, Error>;

    /// Fetch an author by id.
    async fn get_author(&self, actor: ActorId, id: AuthorId) -> Result<Author, Error>;

    /// Fetch a book by id.
    async fn get_book(&self, actor: ActorId, id: BookId) -> Result<Book, Error>;

    /// Fetch a book item by id.
    async fn get_book_item(&self, actor: ActorId, id: BookItemId) -> Result<BookItem, Error>;

    /// Delete an author; fails with [`Error::RecordInUse`] while books
    /// reference it.
    async fn delete_author(&self, actor: ActorId, id: AuthorId) -> Result<(), Error>;

    /// Delete a book; fails with [`Error::RecordInUse`] while circulating
    /// copies reference it.
    async fn delete_book(&self, actor: ActorId, id: BookId) -> Result<(), Error>;
}
