//! Caller-owned transactional unit of work.
//!
//! A [`UnitOfWork`] holds the session connection that repositories read
//! through, plus the queue of staged mutations that become durable when the
//! owner commits. The composition root creates one unit of work per logical
//! transaction and hands the shared handle to every repository that should
//! observe the same commit/rollback boundary.
//!
//! The session is single-writer: the connection sits behind an async mutex,
//! so overlapping calls on one unit of work serialise rather than interleave
//! on the wire. Callers still own the discipline of not sharing one unit of
//! work across unrelated logical transactions.

use std::sync::{Mutex as StdMutex, MutexGuard as StdMutexGuard, PoisonError};

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::domain::ports::ProductRepositoryError;
use crate::domain::Product;

use super::diesel_helpers::map_diesel_error;
use super::models::{NewProductRow, ProductChangeset};
use super::pool::{DbPool, PoolError, SessionConnection};
use super::schema::products;

/// A mutation staged against the session, pending commit.
#[derive(Debug, Clone, PartialEq)]
enum StagedMutation {
    Insert(Product),
    Update(Product),
}

/// Shared transactional boundary for one logical transaction.
///
/// Reads performed by repositories go through the held session immediately;
/// staged inserts and updates only touch the store inside [`Self::commit`],
/// which executes them in staging order within a single database
/// transaction.
pub struct UnitOfWork {
    session: Mutex<Option<SessionConnection>>,
    staged: StdMutex<Vec<StagedMutation>>,
}

impl UnitOfWork {
    /// Begin a unit of work on a session checked out from `pool`.
    ///
    /// # Errors
    ///
    /// Returns the pool's checkout error when no session is available.
    pub async fn begin(pool: &DbPool) -> Result<Self, PoolError> {
        let session = pool.checkout_session().await?;
        Ok(Self {
            session: Mutex::new(Some(session)),
            staged: StdMutex::new(Vec::new()),
        })
    }

    #[cfg(test)]
    fn detached() -> Self {
        Self {
            session: Mutex::new(None),
            staged: StdMutex::new(Vec::new()),
        }
    }

    fn staged_queue(&self) -> StdMutexGuard<'_, Vec<StagedMutation>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stage an insert; nothing is written until [`Self::commit`].
    pub fn stage_insert(&self, product: Product) {
        self.staged_queue().push(StagedMutation::Insert(product));
    }

    /// Stage a full-entity update; nothing is written until [`Self::commit`].
    pub fn stage_update(&self, product: Product) {
        self.staged_queue().push(StagedMutation::Update(product));
    }

    /// Number of mutations currently staged.
    pub fn pending_mutations(&self) -> usize {
        self.staged_queue().len()
    }

    /// Discard every staged mutation without touching the store.
    pub fn rollback(&self) {
        self.staged_queue().clear();
    }

    /// Execute the staged mutations inside one database transaction.
    ///
    /// Mutations run in staging order. The queue is cleared only when the
    /// transaction commits; on failure the staged work is retained so the
    /// owner can decide whether to retry or roll back.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the session has been released, or a
    /// query error when the transaction fails.
    pub async fn commit(&self) -> Result<(), ProductRepositoryError> {
        let staged = self.staged_queue().clone();
        if staged.is_empty() {
            return Ok(());
        }
        let staged_len = staged.len();

        let mut session = self.lease().await?;
        let conn: &mut AsyncPgConnection = &mut session;

        conn.transaction(|conn| {
            async move {
                for mutation in &staged {
                    match mutation {
                        StagedMutation::Insert(product) => {
                            diesel::insert_into(products::table)
                                .values(NewProductRow::from(product))
                                .execute(conn)
                                .await?;
                        }
                        StagedMutation::Update(product) => {
                            diesel::update(products::table.find(*product.id().as_uuid()))
                                .set(ProductChangeset::from(product))
                                .execute(conn)
                                .await?;
                        }
                    }
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

        drop(session);
        let mut queue = self.staged_queue();
        let committed = staged_len.min(queue.len());
        queue.drain(..committed);
        Ok(())
    }

    /// Release the held session back to the pool.
    ///
    /// Safe to call when the session is already released: the call is a
    /// no-op. Dropping the unit of work releases the session as well.
    pub async fn dispose(&self) {
        drop(self.session.lock().await.take());
    }

    /// Borrow the live session connection for a read or commit.
    pub(crate) async fn lease(
        &self,
    ) -> Result<MappedMutexGuard<'_, SessionConnection>, ProductRepositoryError> {
        let guard = self.session.lock().await;
        MutexGuard::try_map(guard, Option::as_mut)
            .map_err(|_| ProductRepositoryError::connection("session has been released"))
    }
}
