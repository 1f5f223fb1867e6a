use crate::{
    config::DbConfig,
    data::{
        StudentStore,
        student::{FieldValue, NewStudent, Student},
    },
};
use async_trait::async_trait;
use sqlx::{
    MySql, MySqlPool,
    mysql::{MySqlArguments, MySqlPoolOptions},
    query::Query,
};

const SELECT_ALL: &str = "SELECT id, name, roll_no, fees, grade, medium FROM students";
const SELECT_BY_ID: &str =
    "SELECT id, name, roll_no, fees, grade, medium FROM students WHERE id = ?";
const INSERT: &str =
    "INSERT INTO students (name, roll_no, fees, grade, medium) VALUES (?, ?, ?, ?, ?)";
const UPDATE: &str =
    "UPDATE students SET name = ?, roll_no = ?, fees = ?, grade = ?, medium = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM students WHERE id = ?";

#[derive(Debug, Clone)]
pub struct MySqlStudentStore {
    pool: MySqlPool,
}

impl MySqlStudentStore {
    /// No connection is opened here; the first query (normally the startup ping) does that.
    pub fn connect_lazy(options: MySqlPoolOptions, config: &DbConfig) -> Self {
        Self {
            pool: options.connect_lazy_with(config.connect_options()),
        }
    }
}

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

fn bind_field(query: MySqlQuery<'_>, value: FieldValue) -> MySqlQuery<'_> {
    match value {
        FieldValue::Text(text) => query.bind(text),
        FieldValue::Number(number) => {
            if let Some(int) = number.as_i64() {
                query.bind(int)
            } else if let Some(unsigned) = number.as_u64() {
                query.bind(unsigned)
            } else {
                query.bind(number.as_f64())
            }
        }
    }
}

fn bind_student(query: MySqlQuery<'_>, student: NewStudent) -> MySqlQuery<'_> {
    let NewStudent {
        name,
        roll_no,
        fees,
        grade,
        medium,
    } = student;

    [name, roll_no, fees, grade, medium]
        .into_iter()
        .fold(query, bind_field)
}

#[async_trait]
impl StudentStore for MySqlStudentStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_from_db_by_id(&self, id: &str) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_into_database(&self, to_be_added: NewStudent) -> Result<u64, sqlx::Error> {
        Ok(bind_student(sqlx::query(INSERT), to_be_added)
            .execute(&self.pool)
            .await?
            .last_insert_id())
    }

    async fn update_in_database(
        &self,
        id: &str,
        replacement: NewStudent,
    ) -> Result<u64, sqlx::Error> {
        Ok(bind_student(sqlx::query(UPDATE), replacement)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected())
    }

    async fn remove_from_database(&self, id: &str) -> Result<u64, sqlx::Error> {
        Ok(sqlx::query(DELETE)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
