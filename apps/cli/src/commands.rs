//! Command implementations. Each command produces an [`Outcome`]; printing
//! and exit codes are left to `main`.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use shapeguard_validator::prelude::*;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::{Command, Target, UnknownArg};
use crate::settings::Settings;

/// What a command prints, and whether it succeeded.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Exit status 0.
    Accepted(Value),
    /// Exit status 1; the value is an `{"errors": [...]}` document.
    Rejected(Value),
}

impl Outcome {
    pub fn value(&self) -> &Value {
        match self {
            Self::Accepted(value) | Self::Rejected(value) => value,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Accepted(_) => ExitCode::SUCCESS,
            Self::Rejected(_) => ExitCode::FAILURE,
        }
    }

    fn from_validation(result: Result<Value, ValidationErrors>) -> Self {
        match result {
            Ok(value) => Self::Accepted(value),
            Err(errors) => {
                tracing::info!(errors = errors.len(), "value rejected");
                Self::Rejected(json!({ "errors": errors }))
            }
        }
    }
}

pub fn run(command: Command, settings: &Settings) -> Result<Outcome> {
    match command {
        Command::Check { schema } => check(&schema),
        Command::Validate { target, unknown } => {
            let (schema, input) = load(&target)?;
            let options = options(unknown, settings);
            Ok(Outcome::from_validation(schema.validate_with(&input, &options)))
        }
        Command::Create { target, unknown } => {
            let (schema, input) = load(&target)?;
            let options = options(unknown, settings);
            let coerced = schema.coerce(&input);
            Ok(Outcome::from_validation(schema.validate_with(&coerced, &options)))
        }
        Command::Coerce { target } => {
            let (schema, input) = load(&target)?;
            Ok(Outcome::Accepted(schema.coerce(&input)))
        }
        Command::Mask { target } => {
            let (schema, input) = load(&target)?;
            Ok(Outcome::Accepted(schema.mask(&input)))
        }
    }
}

/// Prints the normalized schema document, or the reason it cannot be used.
fn check(path: &Path) -> Result<Outcome> {
    let document = read_file(path)?;
    match Schema::from_json_str(&document) {
        Ok(schema) => Ok(Outcome::Accepted(schema.to_json_value()?)),
        Err(error) => {
            tracing::info!(schema = %path.display(), %error, "schema rejected");
            Ok(Outcome::Rejected(json!({
                "errors": [{
                    "path": error.path().map(ToString::to_string),
                    "message": error.to_string(),
                }]
            })))
        }
    }
}

fn options(flag: Option<UnknownArg>, settings: &Settings) -> ValidateOptions {
    match flag.map(UnknownFields::from).or(settings.unknown_fields) {
        Some(policy) => ValidateOptions::new().with_unknown_fields(policy),
        None => ValidateOptions::new(),
    }
}

fn load(target: &Target) -> Result<(Schema, Value)> {
    let document = read_file(&target.schema)?;
    let schema = Schema::from_json_str(&document)
        .with_context(|| format!("invalid schema {}", target.schema.display()))?;
    tracing::debug!(schema = %target.schema.display(), "schema loaded");

    let input = match target.input.as_deref() {
        Some(path) if path != Path::new("-") => read_file(path)?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };
    let input = serde_json::from_str(&input).context("input is not valid JSON")?;
    Ok((schema, input))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_check_reports_schema_errors() {
        let schema = file(
            r#"{"type": "object", "fields": {"source": {"type": "enum", "values": []}}}"#,
        );
        let outcome = check(schema.path()).unwrap();
        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert_eq!(outcome.value()["errors"][0]["path"], json!("source"));
    }

    #[test]
    fn test_flag_overrides_settings() {
        let settings = Settings {
            unknown_fields: Some(UnknownFields::Reject),
            ..Settings::default()
        };
        assert_eq!(
            options(Some(UnknownArg::Strip), &settings),
            ValidateOptions::strip_unknown()
        );
        assert_eq!(options(None, &settings), ValidateOptions::strict());
        assert_eq!(options(None, &Settings::default()), ValidateOptions::new());
    }

    #[test]
    fn test_rejection_document() {
        let schema = object([("name", string())]);
        let outcome = Outcome::from_validation(schema.validate(&json!({})));
        assert_eq!(outcome.value()["errors"][0]["kind"], json!("missing_required"));
    }
}
