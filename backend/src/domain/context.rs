//! Acting-user context and library scoping.
//!
//! The original system resolved "the current library" from ambient session
//! state on every create. Here the context is explicit: each action takes
//! an [`ActorId`] and resolves it to a [`LibraryScope`] up front, and every
//! driven-port method takes the scope so reads and writes are filtered to
//! the acting library. Cross-library leakage is a correctness violation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::Error;
use super::ids::LibraryId;
use super::ports::{LibraryRepository, LibraryRepositoryError};

/// The authenticated user performing an action.
///
/// Authentication itself is out of scope; callers supply an already
/// resolved identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Wrap an existing user UUID.
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random actor id (tests and fixtures).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The tenant boundary every owned record belongs to.
///
/// A scope is only ever obtained by resolving an actor against the
/// library directory, so holding one proves the resolution ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LibraryScope(LibraryId);

impl LibraryScope {
    /// Scope for the given library.
    pub const fn new(library: LibraryId) -> Self {
        Self(library)
    }

    /// The library this scope is bound to.
    pub const fn library(&self) -> LibraryId {
        self.0
    }

    /// Resolve the acting user to their assigned library.
    ///
    /// Exactly one active library must list the actor as its managing
    /// user: zero matches fail with [`Error::NoLibraryAssigned`], more
    /// than one with [`Error::AmbiguousLibraryAssignment`].
    pub async fn resolve<R>(repo: &R, actor: &ActorId) -> Result<Self, Error>
    where
        R: LibraryRepository + ?Sized,
    {
        let mut libraries = repo
            .find_active_for_user(actor)
            .await
            .map_err(map_directory_error)?;
        match libraries.len() {
            0 => Err(Error::NoLibraryAssigned),
            1 => {
                let library = libraries.remove(0);
                Ok(Self::new(library.id))
            }
            _ => Err(Error::AmbiguousLibraryAssignment),
        }
    }
}

fn map_directory_error(error: LibraryRepositoryError) -> Error {
    match error {
        LibraryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("library repository unavailable: {message}"))
        }
        LibraryRepositoryError::Query { message } => {
            Error::internal(format!("library repository error: {message}"))
        }
        LibraryRepositoryError::DuplicateActiveSettings { kind } => Error::internal(format!(
            "unexpected duplicate active {kind} settings during library resolution"
        )),
    }
}

impl fmt::Display for LibraryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
