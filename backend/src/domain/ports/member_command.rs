//! Driving port for member administration.

use async_trait::async_trait;

use crate::domain::context::ActorId;
use crate::domain::error::Error;
use crate::domain::ids::MemberId;
use crate::domain::member::Member;

/// Request to register a member with the acting library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMemberRequest {
    pub actor: ActorId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

/// Driving port covering member registration and reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberCommand: Send + Sync {
    /// Register a member; `registered_on` is stamped from the wall clock.
    async fn register_member(&self, request: RegisterMemberRequest) -> Result<Member, Error>;

    /// Fetch a member by id.
    async fn get_member(&self, actor: ActorId, id: MemberId) -> Result<Member, Error>;

    /// Remove a member; fails with [`Error::RecordInUse`] while
    /// circulation records reference them.
    async fn remove_member(&self, actor: ActorId, id: MemberId) -> Result<(), Error>;
}
