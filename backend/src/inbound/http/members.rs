//! Member HTTP handlers.
//!
//! ```text
//! POST   /api/v1/members       Register a member
//! GET    /api/v1/members/{id}  Fetch a member
//! DELETE /api/v1/members/{id}  Remove a member with no history
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Member;
use crate::domain::ports::RegisterMemberRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::actor_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for registering a member.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberBody {
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Member payload returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    #[schema(value_type = uuid::Uuid)]
    pub id: crate::domain::MemberId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    #[schema(format = "date-time", value_type = String)]
    pub registered_on: DateTime<Utc>,
}

impl From<Member> for MemberBody {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            phone_number: member.phone_number,
            email: member.email,
            registered_on: member.registered_on,
        }
    }
}

/// Register a member with the acting library.
#[utoipa::path(
    post,
    path = "/api/v1/members",
    request_body = RegisterMemberBody,
    responses(
        (status = 201, description = "Member registered", body = MemberBody),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "registerMember"
)]
#[post("/members")]
pub async fn register_member(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<RegisterMemberBody>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let body = payload.into_inner();
    let member = state
        .members
        .register_member(RegisterMemberRequest {
            actor,
            name: body.name,
            phone_number: body.phone_number,
            email: body.email,
        })
        .await?;
    Ok(HttpResponse::Created().json(MemberBody::from(member)))
}

/// Fetch a member by guid.
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}",
    responses(
        (status = 200, description = "Member found", body = MemberBody),
        (status = 404, description = "Member not found", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Member guid")),
    tags = ["members"],
    operation_id = "getMember"
)]
#[get("/members/{id}")]
pub async fn get_member(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    let member = state
        .members
        .get_member(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(MemberBody::from(member)))
}

/// Remove a member no circulation record references.
#[utoipa::path(
    delete,
    path = "/api/v1/members/{id}",
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Member is still referenced", body = ErrorSchema)
    ),
    params(("id" = uuid::Uuid, Path, description = "Member guid")),
    tags = ["members"],
    operation_id = "removeMember"
)]
#[delete("/members/{id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = actor_id(&request)?;
    state
        .members
        .remove_member(actor, path.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
