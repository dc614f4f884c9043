//! Member administration service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::context::{ActorId, LibraryScope};
use crate::domain::error::Error;
use crate::domain::ids::MemberId;
use crate::domain::member::Member;
use crate::domain::ports::{
    LibraryRepository, MemberCommand, MemberRepository, MemberRepositoryError,
    RegisterMemberRequest,
};

fn map_repository_error(error: MemberRepositoryError) -> Error {
    match error {
        MemberRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
        MemberRepositoryError::ReferencedRecord { .. } => Error::RecordInUse,
    }
}

/// Service implementing the [`MemberCommand`] driving port.
#[derive(Clone)]
pub struct MemberService<L, M> {
    library_repo: Arc<L>,
    member_repo: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<L, M> MemberService<L, M> {
    /// Create the service with its repositories and wall clock.
    pub fn new(library_repo: Arc<L>, member_repo: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            library_repo,
            member_repo,
            clock,
        }
    }
}

#[async_trait]
impl<L, M> MemberCommand for MemberService<L, M>
where
    L: LibraryRepository,
    M: MemberRepository,
{
    async fn register_member(&self, request: RegisterMemberRequest) -> Result<Member, Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &request.actor).await?;
        let member = Member {
            id: MemberId::random(),
            library: scope.library(),
            name: request.name,
            phone_number: request.phone_number,
            email: request.email,
            registered_on: self.clock.utc(),
            removed_on: None,
            active: true,
        };
        self.member_repo
            .create_member(&scope, &member)
            .await
            .map_err(map_repository_error)?;
        Ok(member)
    }

    async fn get_member(&self, actor: ActorId, id: MemberId) -> Result<Member, Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &actor).await?;
        self.member_repo
            .find_member(&scope, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("member", id))
    }

    async fn remove_member(&self, actor: ActorId, id: MemberId) -> Result<(), Error> {
        let scope = LibraryScope::resolve(self.library_repo.as_ref(), &actor).await?;
        self.member_repo
            .delete_member(&scope, id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "member_service_tests.rs"]
mod tests;
