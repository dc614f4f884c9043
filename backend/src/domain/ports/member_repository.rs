//! Port for member persistence.

use async_trait::async_trait;

use crate::domain::context::LibraryScope;
use crate::domain::ids::MemberId;
use crate::domain::member::Member;

use super::define_port_error;

define_port_error! {
    /// Errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "member repository query failed: {message}",
        /// Restrict-on-delete: the member is still referenced.
        ReferencedRecord { id: String } =>
            "member {id} is referenced by circulation records",
    }
}

/// Port for member reads and writes, always filtered to one library.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a new member.
    async fn create_member(
        &self,
        scope: &LibraryScope,
        member: &Member,
    ) -> Result<(), MemberRepositoryError>;

    /// Find a member by id.
    async fn find_member(
        &self,
        scope: &LibraryScope,
        id: MemberId,
    ) -> Result<Option<Member>, MemberRepositoryError>;

    /// Delete a member; fails while circulation records reference them.
    async fn delete_member(
        &self,
        scope: &LibraryScope,
        id: MemberId,
    ) -> Result<(), MemberRepositoryError>;
}
