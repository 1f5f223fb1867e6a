use crate::error::{MissingFieldSnafu, StudentResult};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;
use sqlx::{FromRow, Row, mysql::MySqlRow};

/// A scalar as it arrives in JSON. No type checking happens here; whatever the client sends
/// is bound as-is and the column type decides whether it is acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Zero is a value, an empty string is not.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub roll_no: FieldValue,
    pub fees: FieldValue,
    pub grade: String,
    pub medium: String,
}

impl<'r> FromRow<'r, MySqlRow> for Student {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        let id = match row.try_get::<u64, _>("id") {
            Ok(id) => id,
            Err(_) => u64::try_from(row.try_get::<i64, _>("id")?)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        };

        Ok(Self {
            id,
            name: row.try_get("name")?,
            roll_no: decode_scalar(row, "roll_no")?,
            fees: decode_scalar(row, "fees")?,
            grade: row.try_get("grade")?,
            medium: row.try_get("medium")?,
        })
    }
}

/// `roll_no` and `fees` may be signed or unsigned integer, floating, decimal or text columns
/// depending on the schema.
fn decode_scalar(row: &MySqlRow, column: &str) -> Result<FieldValue, sqlx::Error> {
    if let Ok(int) = row.try_get::<i64, _>(column) {
        return Ok(FieldValue::Number(int.into()));
    }
    if let Ok(unsigned) = row.try_get::<u64, _>(column) {
        return Ok(FieldValue::Number(unsigned.into()));
    }
    if let Ok(float) = row.try_get::<f64, _>(column) {
        return Ok(number_from_f64(float));
    }
    if let Ok(text) = row.try_get::<String, _>(column) {
        return Ok(FieldValue::Text(text));
    }

    // DECIMAL has no checked decoder without an extra numeric crate, but it arrives as ascii
    // digits in both protocols
    let decimal = row.try_get_unchecked::<String, _>(column)?;
    Ok(number_from_decimal_text(&decimal).unwrap_or(FieldValue::Text(decimal)))
}

/// Whole floats come back as integers so that a stored `500` reads as `500`, not `500.0`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn number_from_f64(float: f64) -> FieldValue {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if float.is_finite() && float.fract() == 0.0 && float.abs() <= MAX_EXACT {
        return FieldValue::Number((float as i64).into());
    }
    serde_json::Number::from_f64(float)
        .map_or_else(|| FieldValue::Text(float.to_string()), FieldValue::Number)
}

fn number_from_decimal_text(text: &str) -> Option<FieldValue> {
    let text = text.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Some(FieldValue::Number(int.into()));
    }
    let float = text.parse::<f64>().ok()?;
    float.is_finite().then(|| number_from_f64(float))
}

/// Request body for create and update. Every member is optional here so that absence can be
/// reported as a missing field rather than a deserialisation failure.
#[derive(Debug, Default, Deserialize)]
pub struct StudentForm {
    pub name: Option<FieldValue>,
    pub roll_no: Option<FieldValue>,
    pub fees: Option<FieldValue>,
    pub grade: Option<FieldValue>,
    pub medium: Option<FieldValue>,
}

impl StudentForm {
    pub fn into_new_student(self) -> StudentResult<NewStudent> {
        let Self {
            name,
            roll_no,
            fees,
            grade,
            medium,
        } = self;

        Ok(NewStudent {
            name: required(name, "name")?,
            roll_no: required(roll_no, "roll_no")?,
            fees: required(fees, "fees")?,
            grade: required(grade, "grade")?,
            medium: required(medium, "medium")?,
        })
    }
}

fn required(value: Option<FieldValue>, field: &'static str) -> StudentResult<FieldValue> {
    value
        .filter(|value| !value.is_blank())
        .context(MissingFieldSnafu { field })
}

/// All five columns, present and non-blank. Used for both inserts and full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: FieldValue,
    pub roll_no: FieldValue,
    pub fees: FieldValue,
    pub grade: FieldValue,
    pub medium: FieldValue,
}
