//! In-memory transactional store.
//!
//! Implements every driven port over one `RwLock`-guarded table set so a
//! multi-record commit happens under a single write lock. The adapter
//! carries the constraints the engines rely on: library-scope filtering
//! on every read, the `BookItem` revision check, one active settings row
//! per library, and restrict-on-delete reference counting. It stands in
//! for a real persistence engine and doubles as the integration-test
//! fixture.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BorrowCommit, CatalogueRepository, CatalogueRepositoryError, CirculationRepository,
    CirculationRepositoryError, LibraryRepository, LibraryRepositoryError, MemberRepository,
    MemberRepositoryError, ReserveCommit, ReturnCommit,
};
use crate::domain::{
    ActorId, Author, AuthorId, Book, BookId, BookItem, BookItemId, BorrowingSettings,
    BorrowingSettingsId, Fine, FineSettings, FineSettingsId, IssueId, IssuedBookItem, Library,
    LibraryId, LibraryScope, Member, MemberId, Reservation, ReservationId, ReservationStatus,
};

#[derive(Default)]
struct Tables {
    libraries: HashMap<LibraryId, Library>,
    borrowing_settings: HashMap<BorrowingSettingsId, BorrowingSettings>,
    fine_settings: HashMap<FineSettingsId, FineSettings>,
    authors: HashMap<AuthorId, Author>,
    books: HashMap<BookId, Book>,
    book_items: HashMap<BookItemId, BookItem>,
    members: HashMap<MemberId, Member>,
    issues: HashMap<IssueId, IssuedBookItem>,
    reservations: HashMap<ReservationId, Reservation>,
    fines: Vec<Fine>,
}

impl Tables {
    /// Revision check for item writes: the incoming record must advance
    /// the stored revision by exactly one.
    fn store_book_item(&mut self, item: BookItem) -> Result<(), CirculationRepositoryError> {
        let stored = self
            .book_items
            .get(&item.id)
            .ok_or_else(|| CirculationRepositoryError::query(format!(
                "book item {} does not exist",
                item.id
            )))?;
        if stored.revision + 1 != item.revision {
            return Err(CirculationRepositoryError::stale_revision(
                item.id.to_string(),
            ));
        }
        self.book_items.insert(item.id, item);
        Ok(())
    }
}

const POISONED_LOCK: &str = "store lock poisoned";

/// Shared in-memory store backing all four repository ports.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, &'static str> {
        self.tables.read().map_err(|_: PoisonError<_>| POISONED_LOCK)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, &'static str> {
        self.tables
            .write()
            .map_err(|_: PoisonError<_>| POISONED_LOCK)
    }

    /// Whether the store can still serve requests. A poisoned lock makes
    /// every repository call fail, so readiness probes check this.
    pub fn is_responsive(&self) -> bool {
        self.read().is_ok()
    }
}

fn in_scope(record_library: LibraryId, scope: &LibraryScope) -> bool {
    record_library == scope.library()
}

#[async_trait]
impl LibraryRepository for MemoryStore {
    async fn create_library(&self, library: &Library) -> Result<(), LibraryRepositoryError> {
        let mut tables = self.write().map_err(LibraryRepositoryError::connection)?;
        tables.libraries.insert(library.id, library.clone());
        Ok(())
    }

    async fn find_active_for_user(
        &self,
        actor: &ActorId,
    ) -> Result<Vec<Library>, LibraryRepositoryError> {
        let tables = self.read().map_err(LibraryRepositoryError::connection)?;
        Ok(tables
            .libraries
            .values()
            .filter(|library| library.active && library.assigned_user == *actor)
            .cloned()
            .collect())
    }

    async fn create_borrowing_settings(
        &self,
        scope: &LibraryScope,
        settings: &BorrowingSettings,
    ) -> Result<(), LibraryRepositoryError> {
        let mut tables = self.write().map_err(LibraryRepositoryError::connection)?;
        let duplicate = tables
            .borrowing_settings
            .values()
            .any(|row| row.active && in_scope(row.library, scope));
        if duplicate {
            return Err(LibraryRepositoryError::duplicate_active_settings(
                "borrowing",
            ));
        }
        tables
            .borrowing_settings
            .insert(settings.id, settings.clone());
        Ok(())
    }

    async fn create_fine_settings(
        &self,
        scope: &LibraryScope,
        settings: &FineSettings,
    ) -> Result<(), LibraryRepositoryError> {
        let mut tables = self.write().map_err(LibraryRepositoryError::connection)?;
        let duplicate = tables
            .fine_settings
            .values()
            .any(|row| row.active && in_scope(row.library, scope));
        if duplicate {
            return Err(LibraryRepositoryError::duplicate_active_settings("fine"));
        }
        tables.fine_settings.insert(settings.id, settings.clone());
        Ok(())
    }

    async fn active_borrowing_settings(
        &self,
        scope: &LibraryScope,
    ) -> Result<Option<BorrowingSettings>, LibraryRepositoryError> {
        let tables = self.read().map_err(LibraryRepositoryError::connection)?;
        Ok(tables
            .borrowing_settings
            .values()
            .find(|row| row.active && in_scope(row.library, scope))
            .cloned())
    }

    async fn active_fine_settings(
        &self,
        scope: &LibraryScope,
    ) -> Result<Option<FineSettings>, LibraryRepositoryError> {
        let tables = self.read().map_err(LibraryRepositoryError::connection)?;
        Ok(tables
            .fine_settings
            .values()
            .find(|row| row.active && in_scope(row.library, scope))
            .cloned())
    }
}

#[async_trait]
impl CatalogueRepository for MemoryStore {
    async fn create_author(
        &self,
        scope: &LibraryScope,
        author: &Author,
    ) -> Result<(), CatalogueRepositoryError> {
        debug_assert!(in_scope(author.library, scope));
        let mut tables = self.write().map_err(CatalogueRepositoryError::connection)?;
        tables.authors.insert(author.id, author.clone());
        Ok(())
    }

    async fn find_author(
        &self,
        scope: &LibraryScope,
        id: AuthorId,
    ) -> Result<Option<Author>, CatalogueRepositoryError> {
        let tables = self.read().map_err(CatalogueRepositoryError::connection)?;
        Ok(tables
            .authors
            .get(&id)
            .filter(|author| in_scope(author.library, scope))
            .cloned())
    }

    async fn delete_author(
        &self,
        scope: &LibraryScope,
        id: AuthorId,
    ) -> Result<(), CatalogueRepositoryError> {
        let mut tables = self.write().map_err(CatalogueRepositoryError::connection)?;
        let exists = tables
            .authors
            .get(&id)
            .is_some_and(|author| in_scope(author.library, scope));
        if !exists {
            return Err(CatalogueRepositoryError::missing_reference(
                "author",
                id.to_string(),
            ));
        }
        let referenced = tables.books.values().any(|book| book.author == id);
        if referenced {
            return Err(CatalogueRepositoryError::referenced_record(
                "author",
                id.to_string(),
            ));
        }
        tables.authors.remove(&id);
        Ok(())
    }

    async fn create_book(
        &self,
        scope: &LibraryScope,
        book: &Book,
    ) -> Result<(), CatalogueRepositoryError> {
        let mut tables = self.write().map_err(CatalogueRepositoryError::connection)?;
        let author_known = tables
            .authors
            .get(&book.author)
            .is_some_and(|author| in_scope(author.library, scope));
        if !author_known {
            return Err(CatalogueRepositoryError::missing_reference(
                "author",
                book.author.to_string(),
            ));
        }
        tables.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn find_book(
        &self,
        scope: &LibraryScope,
        id: BookId,
    ) -> Result<Option<Book>, CatalogueRepositoryError> {
        let tables = self.read().map_err(CatalogueRepositoryError::connection)?;
        Ok(tables
            .books
            .get(&id)
            .filter(|book| in_scope(book.library, scope))
            .cloned())
    }

    async fn delete_book(
        &self,
        scope: &LibraryScope,
        id: BookId,
    ) -> Result<(), CatalogueRepositoryError> {
        let mut tables = self.write().map_err(CatalogueRepositoryError::connection)?;
        let exists = tables
            .books
            .get(&id)
            .is_some_and(|book| in_scope(book.library, scope));
        if !exists {
            return Err(CatalogueRepositoryError::missing_reference(
                "book",
                id.to_string(),
            ));
        }
        let referenced = tables.book_items.values().any(|item| item.book == id);
        if referenced {
            return Err(CatalogueRepositoryError::referenced_record(
                "book",
                id.to_string(),
            ));
        }
        tables.books.remove(&id);
        Ok(())
    }

    async fn create_book_item(
        &self,
        scope: &LibraryScope,
        item: &BookItem,
    ) -> Result<(), CatalogueRepositoryError> {
        let mut tables = self.write().map_err(CatalogueRepositoryError::connection)?;
        let book_known = tables
            .books
            .get(&item.book)
            .is_some_and(|book| in_scope(book.library, scope));
        if !book_known {
            return Err(CatalogueRepositoryError::missing_reference(
                "book",
                item.book.to_string(),
            ));
        }
        tables.book_items.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_book_item(
        &self,
        scope: &LibraryScope,
        id: BookItemId,
    ) -> Result<Option<BookItem>, CatalogueRepositoryError> {
        let tables = self.read().map_err(CatalogueRepositoryError::connection)?;
        Ok(tables
            .book_items
            .get(&id)
            .filter(|item| in_scope(item.library, scope))
            .cloned())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn create_member(
        &self,
        scope: &LibraryScope,
        member: &Member,
    ) -> Result<(), MemberRepositoryError> {
        debug_assert!(in_scope(member.library, scope));
        let mut tables = self.write().map_err(MemberRepositoryError::connection)?;
        tables.members.insert(member.id, member.clone());
        Ok(())
    }

    async fn find_member(
        &self,
        scope: &LibraryScope,
        id: MemberId,
    ) -> Result<Option<Member>, MemberRepositoryError> {
        let tables = self.read().map_err(MemberRepositoryError::connection)?;
        Ok(tables
            .members
            .get(&id)
            .filter(|member| in_scope(member.library, scope))
            .cloned())
    }

    async fn delete_member(
        &self,
        scope: &LibraryScope,
        id: MemberId,
    ) -> Result<(), MemberRepositoryError> {
        let mut tables = self.write().map_err(MemberRepositoryError::connection)?;
        let exists = tables
            .members
            .get(&id)
            .is_some_and(|member| in_scope(member.library, scope));
        if !exists {
            return Ok(());
        }
        let referenced = tables.issues.values().any(|issue| issue.member == id)
            || tables
                .reservations
                .values()
                .any(|reservation| reservation.member == id)
            || tables.fines.iter().any(|fine| fine.member == id);
        if referenced {
            return Err(MemberRepositoryError::referenced_record(id.to_string()));
        }
        tables.members.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CirculationRepository for MemoryStore {
    async fn find_book_item(
        &self,
        scope: &LibraryScope,
        id: BookItemId,
    ) -> Result<Option<BookItem>, CirculationRepositoryError> {
        let tables = self
            .read()
            .map_err(CirculationRepositoryError::connection)?;
        Ok(tables
            .book_items
            .get(&id)
            .filter(|item| in_scope(item.library, scope))
            .cloned())
    }

    async fn find_open_issue(
        &self,
        scope: &LibraryScope,
        member: MemberId,
        item: BookItemId,
    ) -> Result<Option<IssuedBookItem>, CirculationRepositoryError> {
        let tables = self
            .read()
            .map_err(CirculationRepositoryError::connection)?;
        Ok(tables
            .issues
            .values()
            .find(|issue| {
                in_scope(issue.library, scope)
                    && issue.member == member
                    && issue.book_item == item
                    && issue.is_open()
            })
            .cloned())
    }

    async fn find_waiting_reservation(
        &self,
        scope: &LibraryScope,
        member: MemberId,
        item: BookItemId,
    ) -> Result<Option<Reservation>, CirculationRepositoryError> {
        let tables = self
            .read()
            .map_err(CirculationRepositoryError::connection)?;
        Ok(tables
            .reservations
            .values()
            .find(|reservation| {
                in_scope(reservation.library, scope)
                    && reservation.member == member
                    && reservation.book_item == item
                    && reservation.status == ReservationStatus::Waiting
            })
            .cloned())
    }

    async fn find_reservation(
        &self,
        scope: &LibraryScope,
        id: ReservationId,
    ) -> Result<Option<Reservation>, CirculationRepositoryError> {
        let tables = self
            .read()
            .map_err(CirculationRepositoryError::connection)?;
        Ok(tables
            .reservations
            .get(&id)
            .filter(|reservation| in_scope(reservation.library, scope))
            .cloned())
    }

    async fn fines_for_item(
        &self,
        scope: &LibraryScope,
        item: BookItemId,
    ) -> Result<Vec<Fine>, CirculationRepositoryError> {
        let tables = self
            .read()
            .map_err(CirculationRepositoryError::connection)?;
        let mut fines: Vec<Fine> = tables
            .fines
            .iter()
            .filter(|fine| in_scope(fine.library, scope) && fine.book_item == item)
            .cloned()
            .collect();
        fines.sort_by(|a, b| b.returned_date.cmp(&a.returned_date));
        Ok(fines)
    }

    async fn commit_borrow(
        &self,
        scope: &LibraryScope,
        commit: BorrowCommit,
    ) -> Result<(), CirculationRepositoryError> {
        debug_assert!(in_scope(commit.item.library, scope));
        let mut tables = self
            .write()
            .map_err(CirculationRepositoryError::connection)?;
        tables.store_book_item(commit.item)?;
        tables.issues.insert(commit.issue.id, commit.issue);
        if let Some(reservation) = commit.completed_reservation {
            tables.reservations.insert(reservation.id, reservation);
        }
        Ok(())
    }

    async fn commit_return(
        &self,
        scope: &LibraryScope,
        commit: ReturnCommit,
    ) -> Result<(), CirculationRepositoryError> {
        debug_assert!(in_scope(commit.item.library, scope));
        let mut tables = self
            .write()
            .map_err(CirculationRepositoryError::connection)?;
        tables.store_book_item(commit.item)?;
        tables.issues.insert(commit.issue.id, commit.issue);
        if let Some(fine) = commit.fine {
            tables.fines.push(fine);
        }
        Ok(())
    }

    async fn commit_reserve(
        &self,
        scope: &LibraryScope,
        commit: ReserveCommit,
    ) -> Result<(), CirculationRepositoryError> {
        debug_assert!(in_scope(commit.item.library, scope));
        let mut tables = self
            .write()
            .map_err(CirculationRepositoryError::connection)?;
        tables.store_book_item(commit.item)?;
        tables
            .reservations
            .insert(commit.reservation.id, commit.reservation);
        Ok(())
    }

    async fn update_book_item(
        &self,
        scope: &LibraryScope,
        item: BookItem,
    ) -> Result<(), CirculationRepositoryError> {
        debug_assert!(in_scope(item.library, scope));
        let mut tables = self
            .write()
            .map_err(CirculationRepositoryError::connection)?;
        tables.store_book_item(item)
    }

    async fn update_reservation(
        &self,
        scope: &LibraryScope,
        reservation: Reservation,
    ) -> Result<(), CirculationRepositoryError> {
        debug_assert!(in_scope(reservation.library, scope));
        let mut tables = self
            .write()
            .map_err(CirculationRepositoryError::connection)?;
        tables
            .reservations
            .insert(reservation.id, reservation);
        Ok(())
    }
}
