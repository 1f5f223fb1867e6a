use crate::data::{
    StudentStore,
    student::{FieldValue, NewStudent, Student},
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

/// Table-in-a-map used by the handler tests.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    rows: Mutex<BTreeMap<u64, Student>>,
    next_id: AtomicU64,
}

impl InMemoryStudentStore {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn into_row(id: u64, student: NewStudent) -> Student {
        // mysql coerces a number bound to a text column, so do the same
        let text = |value: FieldValue| match value {
            FieldValue::Text(text) => text,
            FieldValue::Number(number) => number.to_string(),
        };

        Student {
            id,
            name: text(student.name),
            roll_no: student.roll_no,
            fees: student.fees,
            grade: text(student.grade),
            medium: text(student.medium),
        }
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Student>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn get_from_db_by_id(&self, id: &str) -> Result<Option<Student>, sqlx::Error> {
        let Ok(id) = id.parse::<u64>() else {
            return Ok(None);
        };
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert_into_database(&self, to_be_added: NewStudent) -> Result<u64, sqlx::Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows
            .lock()
            .unwrap()
            .insert(id, Self::into_row(id, to_be_added));
        Ok(id)
    }

    async fn update_in_database(
        &self,
        id: &str,
        replacement: NewStudent,
    ) -> Result<u64, sqlx::Error> {
        let Ok(id) = id.parse::<u64>() else {
            return Ok(0);
        };
        let mut rows = self.rows.lock().unwrap();
        Ok(match rows.get_mut(&id) {
            Some(row) => {
                *row = Self::into_row(id, replacement);
                1
            }
            None => 0,
        })
    }

    async fn remove_from_database(&self, id: &str) -> Result<u64, sqlx::Error> {
        let Ok(id) = id.parse::<u64>() else {
            return Ok(0);
        };
        Ok(u64::from(self.rows.lock().unwrap().remove(&id).is_some()))
    }

    async fn close(&self) {}
}

/// Behaves like a database that has gone away.
#[derive(Debug, Default)]
pub struct UnreachableStudentStore;

impl UnreachableStudentStore {
    fn error() -> sqlx::Error {
        sqlx::Error::Protocol("Access denied for user 'admin'@'10.1.2.3' (using password: YES)".into())
    }
}

#[async_trait]
impl StudentStore for UnreachableStudentStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(Self::error())
    }

    async fn get_all(&self) -> Result<Vec<Student>, sqlx::Error> {
        Err(Self::error())
    }

    async fn get_from_db_by_id(&self, _id: &str) -> Result<Option<Student>, sqlx::Error> {
        Err(Self::error())
    }

    async fn insert_into_database(&self, _to_be_added: NewStudent) -> Result<u64, sqlx::Error> {
        Err(Self::error())
    }

    async fn update_in_database(
        &self,
        _id: &str,
        _replacement: NewStudent,
    ) -> Result<u64, sqlx::Error> {
        Err(Self::error())
    }

    async fn remove_from_database(&self, _id: &str) -> Result<u64, sqlx::Error> {
        Err(Self::error())
    }

    async fn close(&self) {}
}
