use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use std::{io, num::ParseIntError};

pub type StudentResult<T> = Result<T, StudentError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StudentError {
    #[snafu(display("Error connecting to the database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error in {} API", operation))]
    MakeQuery {
        source: sqlx::Error,
        operation: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` from {:?}", name, original))]
    ParseEnvVar {
        source: ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener { source: io::Error, address: String },
    #[snafu(display("Error serving app"))]
    Serve { source: io::Error },
    #[snafu(display("Please provide a valid student id"))]
    MissingId,
    #[snafu(display("Please provide a valid student id"))]
    InvalidId { source: PathRejection },
    #[snafu(display("Please provide all fields"))]
    MissingField { field: &'static str },
    #[snafu(display("Invalid request body"))]
    InvalidBody { source: JsonRejection },
    #[snafu(display("No record found"))]
    NoRecordFound { id: String },
}

#[derive(Debug, Serialize)]
struct Failure {
    success: bool,
    message: String,
}

impl IntoResponse for StudentError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::MakeQuery { .. } => ISE,
            Self::ParseEnvVar { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
            Self::MissingId | Self::InvalidId { .. } => NF,
            Self::MissingField { field } => {
                debug!(%field, "field missing from body");
                BI
            }
            Self::InvalidBody { .. } => BI,
            Self::NoRecordFound { id } => {
                debug!(%id, "no student with id");
                NF
            }
        };

        // display strings never carry the source, so driver detail stays in the logs
        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            debug!(?self, "Rejected request");
        }

        let body = Failure {
            success: false,
            message: self.to_string(),
        };
        (status_code, Json(body)).into_response()
    }
}
