use crate::{
    data::student::{Student, StudentForm},
    error::{
        InvalidBodySnafu, InvalidIdSnafu, MakeQuerySnafu, MissingIdSnafu, NoRecordFoundSnafu,
        StudentError, StudentResult,
    },
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use snafu::{OptionExt, ResultExt, ensure};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getall", get(get_all_students))
        .route("/get/{id}", get(get_student_by_id))
        .route("/create", post(post_create_student))
        .route("/update/{id}", put(put_update_student))
        .route("/delete/{id}", delete(delete_student))
        // trailing slashes are trimmed before routing, so `/get/` lands here too
        .route("/get", get(reject_missing_id))
        .route("/update", put(reject_missing_id))
        .route("/delete", delete(reject_missing_id))
}

#[derive(Debug, Serialize)]
pub struct Message {
    success: bool,
    message: &'static str,
}

impl Message {
    const fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AllStudents {
    success: bool,
    message: &'static str,
    data: Vec<Student>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    success: bool,
    student_details: Student,
}

#[derive(Debug, Serialize)]
pub struct Created {
    success: bool,
    message: &'static str,
    id: u64,
}

/// An id segment that axum cannot decode is answered like a missing one.
fn require_id(path: Result<Path<String>, PathRejection>) -> StudentResult<String> {
    let Path(id) = path.context(InvalidIdSnafu)?;
    let id = id.trim();
    ensure!(!id.is_empty(), MissingIdSnafu);
    Ok(id.to_owned())
}

pub async fn reject_missing_id() -> StudentError {
    StudentError::MissingId
}

/// An empty table is still a successful listing.
pub async fn get_all_students(State(state): State<AppState>) -> StudentResult<Json<AllStudents>> {
    let data = state.get_all().await.context(MakeQuerySnafu {
        operation: "Get All Student",
    })?;

    Ok(Json(AllStudents {
        success: true,
        message: "All Students Records",
        data,
    }))
}

pub async fn get_student_by_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> StudentResult<Json<StudentDetails>> {
    let id = require_id(path)?;

    let student = state
        .get_from_db_by_id(&id)
        .await
        .context(MakeQuerySnafu {
            operation: "Get Student by id",
        })?
        .context(NoRecordFoundSnafu { id })?;

    Ok(Json(StudentDetails {
        success: true,
        student_details: student,
    }))
}

pub async fn post_create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentForm>, JsonRejection>,
) -> StudentResult<(StatusCode, Json<Created>)> {
    let Json(form) = payload.context(InvalidBodySnafu)?;
    let to_be_added = form.into_new_student()?;

    let id = state
        .insert_into_database(to_be_added)
        .await
        .context(MakeQuerySnafu {
            operation: "Create Student",
        })?;
    info!(id, "student created");

    Ok((
        StatusCode::CREATED,
        Json(Created {
            success: true,
            message: "Student created successfully",
            id,
        }),
    ))
}

/// Full replacement. A missing row is not an error: the statement simply matches nothing.
pub async fn put_update_student(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<StudentForm>, JsonRejection>,
) -> StudentResult<Json<Message>> {
    let id = require_id(path)?;
    let Json(form) = payload.context(InvalidBodySnafu)?;
    let replacement = form.into_new_student()?;

    let rows_affected = state
        .update_in_database(&id, replacement)
        .await
        .context(MakeQuerySnafu {
            operation: "Update Student",
        })?;
    debug!(%id, rows_affected, "student updated");

    Ok(Json(Message::ok("Student Details Updated")))
}

pub async fn delete_student(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> StudentResult<Json<Message>> {
    let id = require_id(path)?;

    let rows_affected = state
        .remove_from_database(&id)
        .await
        .context(MakeQuerySnafu {
            operation: "Delete Student",
        })?;
    debug!(%id, rows_affected, "student deleted");

    Ok(Json(Message::ok("Student Deleted Successfully")))
}
