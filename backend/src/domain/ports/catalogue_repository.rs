//! Port for catalogue persistence: authors, books, and book items.

use async_trait::async_trait;

use crate::domain::book_item::BookItem;
use crate::domain::catalogue::{Author, Book};
use crate::domain::context::LibraryScope;
use crate::domain::ids::{AuthorId, BookId, BookItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
        /// A referenced record does not exist in the scope.
        MissingReference { entity: String, id: String } =>
            "referenced {entity} {id} does not exist",
        /// Restrict-on-delete: the record is still referenced.
        ReferencedRecord { entity: String, id: String } =>
            "{entity} {id} is referenced by other records",
    }
}

/// Port for catalogue reads and writes, always filtered to one library.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Persist a new author.
    async fn create_author(
        &self,
        scope: &LibraryScope,
        author: &Author,
    ) -> Result<(), CatalogueRepositoryError>;

    /// Find an author by id.
    async fn find_author(
        &self,
        scope: &LibraryScope,
        id: AuthorId,
    ) -> Result<Option<Author>, CatalogueRepositoryError>;

    /// Delete an author; fails while any book references it.
    async fn delete_author(
        &self,
        scope: &LibraryScope,
        id: AuthorId,
    ) -> Result<(), CatalogueRepositoryError>;

    /// Persist a new book; its author must exist in the scope.
    async fn create_book(
        &self,
        scope: &LibraryScope,
        book: &Book,
    ) -> Result<(), CatalogueRepositoryError>;

    /// Find a book by id.
    async fn find_book(
        &self,
        scope: &LibraryScope,
        id: BookId,
    ) -> Result<Option<Book>, CatalogueRepositoryError>;

    /// Delete a book; fails while any book item references it.
    async fn delete_book(
        &self,
        scope: &LibraryScope,
        id: BookId,
    ) -> Result<(), CatalogueRepositoryError>;

    /// Persist a new book item; its book must exist in the scope.
    async fn create_book_item(
        &self,
        scope: &LibraryScope,
        item: &BookItem,
    ) -> Result<(), CatalogueRepositoryError>;

    /// Find a book item by id.
    async fn find_book_item(
        &self,
        scope: &LibraryScope,
        id: BookItemId,
    ) -> Result<Option<BookItem>, CatalogueRepositoryError>;
}
