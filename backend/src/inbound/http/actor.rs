//! Acting-user extraction for HTTP requests.
//!
//! Authentication is out of scope; callers identify themselves with an
//! `X-Actor-Id` header carrying their user UUID, and the engines resolve
//! it to a library on every action.

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::domain::{ActorId, Error};

/// Header naming the acting user.
pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";

/// Extract and parse the acting user from the request headers.
pub fn actor_id(request: &HttpRequest) -> Result<ActorId, Error> {
    let value = request
        .headers()
        .get(ACTOR_ID_HEADER)
        .ok_or_else(|| Error::invalid_request("X-Actor-Id header is required"))?;
    let text = value
        .to_str()
        .map_err(|_| Error::invalid_request("X-Actor-Id header must be valid UTF-8"))?;
    let id = Uuid::parse_str(text)
        .map_err(|_| Error::invalid_request("X-Actor-Id header must be a valid UUID"))?;
    Ok(ActorId::new(id))
}
