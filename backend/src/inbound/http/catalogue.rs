//! Catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/v1/authors          Register an author
//! GET    /api/v1/authors/{id}     Fetch an author
//! DELETE /api/v1/authors/{id}     Delete an unreferenced author
//! POST   /api/v1/books            Register a book
//! GET    /api/v1/books/{id}       Fetch a book
//! DELETE /api/v1/books/{id}       Delete a book with no copies
//! POST   /api/v1/book-items       Register a circulating copy
//! GET    /api/v1/book-items/{id}  Fetch a circulating copy
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateAuthorRequest, CreateBookItemRequest, CreateBookRequest};
use crate::domain::{Author, Book, BookFormat};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::actor_id;
use crate::inbound::http::circulation::BookItemBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for registering an author.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorBody {
    pub name: String,
}

/// Author payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::AuthorId,
    pub name: String,
}

impl From<Author> for AuthorBody {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

/// Request body for registering a book.
///
/// `format` and `language` fall back to the catalogue defaults
/// (hard cover, "en") when unset.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookBody {
    pub title: String,
    pub subject: String,
    pub publisher: String,
    pub pages: u32,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "PaperBack")]
    pub format: Option<BookFormat>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = uuid::Uuid)]
    pub author_id: crate::domain::AuthorId,
}

/// Book payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::BookId,
    pub title: String,
    pub subject: String,
    pub publisher: String,
    pub pages: u32,
    #[schema(value_type = String, example = "HardCover")]
    pub format: BookFormat,
    pub language: String,
    pub description: Option<String>,
    #[schema(value_type = uuid::Uuid)]
    pub author_id: crate::domain::AuthorId,
}

impl From<Book> for BookBody {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            subject: book.subject,
            publisher: book.publisher,
            pages: book.pages,
            format: book.format,
            language: book.language,
            description: book.description,
            author_id: book.author,
        }
    }
}

/// Request body for registering a circulating copy of a book.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookItemBody {
    #[schema(value_type = uuid::Uuid)]
    pub book_id: crate::domain::BookId,
}

/// Register an author in the acting library.
#[utoipa::path(
    post,
    path = "/api/v1/authors",
    request_body = CreateAuthorBody,
    responses(
        (status = 201, description = "Author registered", body = AuthorBody),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "createAuthor"
)]
#[post("/authors")]
pub async fn create_author(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<CreateAuthorBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let author = state
        .catalogue
        .create_author(CreateAuthorRequest {
            actor,
            name: payload.into_inner().name,
        })
        .await?;
    Ok(HttpResponse::Created().json(AuthorBody::from(author)))
}

/// Fetch an author by guid.
#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    responses(
        (status = 200, description = "Author found", body = AuthorBody),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Author guid")),
    tags = ["catalogue"],
    operation_id = "getAuthor"
)]
#[get("/authors/{id}")]
pub async fn get_author(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let author = state
        .catalogue
        .get_author(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(AuthorBody::from(author)))
}

/// Delete an author no book references.
#[utoipa::path(
    delete,
    path = "/api/v1/authors/{id}",
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = ErrorSchema),
        (status = 409, description = "Author is still referenced", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Author guid")),
    tags = ["catalogue"],
    operation_id = "deleteAuthor"
)]
#[delete("/authors/{id}")]
pub async fn delete_author(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    state
        .catalogue
        .delete_author(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register a book in the acting library.
#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = CreateBookBody,
    responses(
        (status = 201, description = "Book registered", body = BookBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<CreateBookBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let body = payload.into_inner();
    let book = state
        .catalogue
        .create_book(CreateBookRequest {
            actor,
            title: body.title,
            subject: body.subject,
            publisher: body.publisher,
            pages: body.pages,
            format: body.format,
            language: body.language,
            description: body.description,
            author: body.author_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(BookBody::from(book)))
}

/// Fetch a book by guid.
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    responses(
        (status = 200, description = "Book found", body = BookBody),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book guid")),
    tags = ["catalogue"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let book = state
        .catalogue
        .get_book(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(BookBody::from(book)))
}

/// Delete a book no circulating copy references.
#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorSchema),
        (status = 409, description = "Book is still referenced", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book guid")),
    tags = ["catalogue"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    state
        .catalogue
        .delete_book(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register a circulating copy of a book.
#[utoipa::path(
    post,
    path = "/api/v1/book-items",
    request_body = CreateBookItemBody,
    responses(
        (status = 201, description = "Book item registered", body = BookItemBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "createBookItem"
)]
#[post("/book-items")]
pub async fn create_book_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<CreateBookItemBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let item = state
        .catalogue
        .create_book_item(CreateBookItemRequest {
            actor,
            book: payload.into_inner().book_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(BookItemBody::from(item)))
}

/// Fetch a circulating copy by guid.
#[utoipa::path(
    get,
    path = "/api/v1/book-items/{id}",
    responses(
        (status = 200, description = "Book item found", body = BookItemBody),
        (status = 404, description = "Book item not found", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Book item guid")),
    tags = ["catalogue"],
    operation_id = "getBookItem"
)]
#[get("/book-items/{id}")]
pub async fn get_book_item(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let item = state
        .catalogue
        .get_book_item(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(BookItemBody::from(item)))
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
