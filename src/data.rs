use crate::data::student::{NewStudent, Student};
use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
pub mod memory;
pub mod mysql;
pub mod student;

/// Everything the handlers need from the database. Each method is exactly one statement,
/// and driver errors are returned untouched so callers can attach their own context.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// Trivial round trip used to gate startup.
    async fn ping(&self) -> Result<(), sqlx::Error>;
    async fn get_all(&self) -> Result<Vec<Student>, sqlx::Error>;
    /// `id` is passed through untyped, so a non-numeric id is the database's problem.
    async fn get_from_db_by_id(&self, id: &str) -> Result<Option<Student>, sqlx::Error>;
    /// Returns the id the database assigned.
    async fn insert_into_database(&self, to_be_added: NewStudent) -> Result<u64, sqlx::Error>;
    /// Returns the number of affected rows.
    async fn update_in_database(&self, id: &str, replacement: NewStudent)
    -> Result<u64, sqlx::Error>;
    /// Returns the number of affected rows.
    async fn remove_from_database(&self, id: &str) -> Result<u64, sqlx::Error>;
    async fn close(&self);
}
