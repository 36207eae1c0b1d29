use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputNotFound,

    CsvMissingHeader,
    CsvMissingColumns,
    CsvInvalidRecord,

    ConfigNotFound,
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InputNotFound => "input.not_found",

            ErrorCode::CsvMissingHeader => "csv.missing_header",
            ErrorCode::CsvMissingColumns => "csv.missing_columns",
            ErrorCode::CsvInvalidRecord => "csv.invalid_record",

            ErrorCode::ConfigNotFound => "config.not_found",
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingColumnsDetails {
    pub path: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRecordDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn input_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::InputNotFound,
            format!("Hittar inte {}", path),
            to_details(NotFoundDetails { path }),
        )
        .with_hint("Pass the CSV location with --csv or set csvPath in offerpages.json")
    }

    pub fn csv_missing_header(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::CsvMissingHeader,
            format!("CSV saknar header-rad: {}", path),
            to_details(NotFoundDetails { path }),
        )
    }

    pub fn csv_missing_columns(path: impl Into<String>, missing: Vec<String>) -> Self {
        let message = format!("Saknade kolumner: {}", missing.join(", "));
        Self::new(
            ErrorCode::CsvMissingColumns,
            message,
            to_details(MissingColumnsDetails {
                path: path.into(),
                missing,
            }),
        )
        .with_hint("Add the missing columns to the CSV header row (values may be empty)")
    }

    pub fn csv_invalid_record(
        path: impl Into<String>,
        line: Option<u64>,
        error: impl Into<String>,
    ) -> Self {
        let line_suffix = line.map(|l| format!(" at line {}", l)).unwrap_or_default();
        Self::new(
            ErrorCode::CsvInvalidRecord,
            format!("Malformed CSV record{}", line_suffix),
            to_details(InvalidRecordDetails {
                path: path.into(),
                line,
                error: error.into(),
            }),
        )
    }

    pub fn config_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Config file not found: {}", path),
            to_details(NotFoundDetails { path }),
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            to_details(ConfigInvalidJsonDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid configuration value: {}", problem),
            to_details(ConfigInvalidValueDetails {
                key: key.into(),
                value,
                problem,
            }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let field = field.into();
        let problem = problem.into();
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            format!("Invalid {}: {}", field, problem),
            to_details(InvalidArgumentDetails {
                field,
                problem,
                value,
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalJsonErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_names() {
        let err = Error::csv_missing_columns(
            "data/offers.csv",
            vec!["persona".to_string(), "status".to_string()],
        );
        assert_eq!(err.code, ErrorCode::CsvMissingColumns);
        assert_eq!(err.message, "Saknade kolumner: persona, status");
        assert_eq!(err.details["missing"][1], "status");
        assert_eq!(err.hints.len(), 1);
    }

    #[test]
    fn invalid_record_includes_line_when_known() {
        let err = Error::csv_invalid_record("x.csv", Some(7), "bad quote");
        assert_eq!(err.message, "Malformed CSV record at line 7");
        assert_eq!(err.details["line"], 7);

        let err = Error::csv_invalid_record("x.csv", None, "bad quote");
        assert_eq!(err.message, "Malformed CSV record");
        assert!(err.details.get("line").is_none());
    }

    #[test]
    fn codes_render_as_dotted_strings() {
        assert_eq!(ErrorCode::InputNotFound.as_str(), "input.not_found");
        assert_eq!(ErrorCode::CsvMissingColumns.as_str(), "csv.missing_columns");
    }
}
