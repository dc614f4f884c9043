//! Catalogue administration service.
//!
//! Creates and reads authors, books, and book items, stamping every new
//! record with a generated guid and the acting user's resolved library.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::book_item::{BookItem, BookItemStatus};
use crate::domain::catalogue::{Author, Book, DEFAULT_BOOK_LANGUAGE};
use crate::domain::context::{ActorId, LibraryScope};
use crate::domain::error::Error;
use crate::domain::ids::{AuthorId, BookId, BookItemId};
use crate::domain::ports::{
    CatalogueCommand, CatalogueRepository, CatalogueRepositoryError, CreateAuthorRequest,
    CreateBookItemRequest, CreateBookRequest, LibraryRepository,
};

fn map_repository_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
        CatalogueRepositoryError::MissingReference { entity, id } => Error::not_found(entity, id),
        CatalogueRepositoryError::ReferencedRecord { .. } => Error::RecordInUse,
    }
}

/// Service implementing the [`CatalogueCommand`] driving port.
#[derive(Clone)]
pub struct CatalogueService<L, C> {
    library_repo: Arc<L>,
    catalogue_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<L, C> CatalogueService<L, C> {
    /// Create the service with its repositories and wall clock.
    pub fn new(library_repo: Arc<L>, catalogue_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            library_repo,
            catalogue_repo,
            clock,
        }
    }
}

impl<L, C> CatalogueService<L, C>
where
    L: LibraryRepository,
{
    async fn scope_for(&self, actor: &ActorId) -> Result<LibraryScope, Error> {
        LibraryScope::resolve(self.library_repo.as_ref(), actor).await
    }
}

#[async_trait]
impl<L, C> CatalogueCommand for CatalogueService<L, C>
where
    L: LibraryRepository,
    C: CatalogueRepository,
{
    async fn create_author(&self, request: CreateAuthorRequest) -> Result<Author, Error> {
        let scope = self.scope_for(&request.actor).await?;
        let author = Author {
            id: AuthorId::random(),
            library: scope.library(),
            name: request.name,
            active: true,
        };
        self.catalogue_repo
            .create_author(&scope, &author)
            .await
            .map_err(map_repository_error)?;
        Ok(author)
    }

    async fn create_book(&self, request: CreateBookRequest) -> Result<Book, Error> {
        let scope = self.scope_for(&request.actor).await?;
        let book = Book {
            id: BookId::random(),
            library: scope.library(),
            title: request.title,
            subject: request.subject,
            publisher: request.publisher,
            pages: request.pages,
            format: request.format.unwrap_or_default(),
            language: request
                .language
                .unwrap_or_else(|| DEFAULT_BOOK_LANGUAGE.to_owned()),
            description: request.description,
            author: request.author,
            active: true,
        };
        self.catalogue_repo
            .create_book(&scope, &book)
            .await
            .map_err(map_repository_error)?;
        Ok(book)
    }

    async fn create_book_item(&self, request: CreateBookItemRequest) -> Result<BookItem, Error> {
        let scope = self.scope_for(&request.actor).await?;
        let item = BookItem {
            id: BookItemId::random(),
            library: scope.library(),
            book: request.book,
            barcode: BookItem::generate_barcode(self.clock.utc()),
            status: BookItemStatus::Available,
            borrowed_by: None,
            reserved_by: None,
            revision: 0,
            active: true,
        };
        self.catalogue_repo
            .create_book_item(&scope, &item)
            .await
            .map_err(map_repository_error)?;
        info!(item = %item.id, barcode = %item.barcode, "book item registered");
        Ok(item)
    }

    async fn get_author(&self, actor: ActorId, id: AuthorId) -> Result<Author, Error> {
        let scope = self.scope_for(&actor).await?;
        self.catalogue_repo
            .find_author(&scope, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("author", id))
    }

    async fn get_book(&self, actor: ActorId, id: BookId) -> Result<Book, Error> {
        let scope = self.scope_for(&actor).await?;
        self.catalogue_repo
            .find_book(&scope, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("book", id))
    }

    async fn get_book_item(&self, actor: ActorId, id: BookItemId) -> Result<BookItem, Error> {
        let scope = self.scope_for(&actor).await?;
        self.catalogue_repo
            .find_book_item(&scope, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("book item", id))
    }

    async fn delete_author(&self, actor: ActorId, id: AuthorId) -> Result<(), Error> {
        let scope = self.scope_for(&actor).await?;
        self.catalogue_repo
            .delete_author(&scope, id)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_book(&self, actor: ActorId, id: BookId) -> Result<(), Error> {
        let scope = self.scope_for(&actor).await?;
        self.catalogue_repo
            .delete_book(&scope, id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
