//! CLI response formatting and output.
//!
//! Provides the JSON envelope, text rendering, and exit code mapping.

use offerpages::error::Hint;
use offerpages::{Error, ErrorCode, Result};
use serde::Serialize;

use crate::commands::TextOutput;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

/// A successful command result in both output shapes.
#[derive(Debug)]
pub struct Rendered {
    pub json: serde_json::Value,
    pub text: String,
}

pub fn map_cmd_result<T: Serialize + TextOutput>(result: Result<(T, i32)>) -> (Result<Rendered>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(&data) {
            Ok(json) => (
                Ok(Rendered {
                    json,
                    text: data.to_text(),
                }),
                exit_code,
            ),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::CsvMissingHeader
        | ErrorCode::CsvMissingColumns
        | ErrorCode::CsvInvalidRecord
        | ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InputNotFound | ErrorCode::ConfigNotFound => 4,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

/// Human-readable error report: message, details, hints.
pub fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("ERROR: {}", err.message)];

    if let Some(details) = err.details.as_object() {
        for (key, value) in details {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", "),
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            lines.push(format!("  {}: {}", key, value));
        }
    }

    for hint in &err.hints {
        lines.push(format!("  hint: {}", hint.message));
    }

    lines.join("\n")
}

fn write_stdout(payload: &str) -> Result<()> {
    use std::io::{self, Write};

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_json_result(result: Result<Rendered>) -> Result<()> {
    let payload = match result {
        Ok(rendered) => CliResponse::success(rendered.json).to_json()?,
        Err(err) => CliResponse::<()>::from_error(&err).to_json()?,
    };
    write_stdout(&payload)
}

pub fn print_text_result(result: Result<Rendered>) -> Result<()> {
    match result {
        Ok(rendered) => write_stdout(&rendered.text),
        Err(err) => {
            eprintln!("{}", error_text(&err));
            Ok(())
        }
    }
}
