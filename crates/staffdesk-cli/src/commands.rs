//! Subcommand implementations
//!
//! Each command writes its human-facing output to `out` and returns whether
//! the run passed; `main` turns that into the process exit code.

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use staffdesk_schema::{export, MockGenerator, SchemaRegistry, ValidationError};
use staffdesk_store::{seed, Snapshot};
use std::io::{Read, Write};
use std::path::Path;

/// Read a JSON or YAML document from `source`, or stdin when `source` is `-`
///
/// # Errors
/// Returns error if the source is unreadable or neither JSON nor YAML
pub fn read_document<T: DeserializeOwned>(source: &str) -> anyhow::Result<T> {
    let raw = if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        raw
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };
    parse_document(&raw).with_context(|| format!("failed to parse {source}"))
}

/// Parse JSON, falling back to YAML
///
/// # Errors
/// Returns the YAML error if both parsers reject the text
pub fn parse_document<T: DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(raw)
            .with_context(|| format!("not JSON ({json_err}) and not YAML")),
    }
}

/// `schemas`: every registered schema name, one per line
///
/// # Errors
/// Returns error on write failure
pub fn schemas(registry: &SchemaRegistry, out: &mut dyn Write) -> anyhow::Result<bool> {
    for name in registry.names() {
        writeln!(out, "{name}")?;
    }
    Ok(true)
}

/// `validate`: check one candidate
///
/// # Errors
/// Returns error if the schema is unknown or on write failure
pub fn validate(
    registry: &SchemaRegistry,
    schema: &str,
    candidate: &Value,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    match registry.check(schema, candidate) {
        Ok(normalized) => {
            if json {
                let body = serde_json::json!({
                    "schema": schema,
                    "valid": true,
                    "value": normalized
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            } else {
                writeln!(out, "{schema}: valid")?;
            }
            Ok(true)
        }
        Err(ValidationError::Invalid(report)) => {
            tracing::info!(schema, issues = report.len(), "candidate rejected");
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "{schema}: {} issue(s)", report.len())?;
                for issue in &report.issues {
                    writeln!(out, "  {issue} [{}]", issue.rule.name())?;
                }
            }
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// `export`: draft-07 JSON Schema of one registered schema
///
/// # Errors
/// Returns error if the schema is unknown or on write failure
pub fn export(
    registry: &SchemaRegistry,
    schema: &str,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let document = export::json_schema(registry, schema)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    Ok(true)
}

/// `mock`: `count` generated candidates, one JSON document per line
///
/// # Errors
/// Returns error if the schema is unknown or cannot be generated
pub fn mock(
    registry: &SchemaRegistry,
    schema: &str,
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let mut generator = seed.map_or_else(MockGenerator::new, MockGenerator::seeded);
    for _ in 0..count {
        let value = generator
            .generate(registry, schema)
            .with_context(|| format!("cannot generate '{schema}'"))?;
        writeln!(out, "{}", serde_json::to_string(&value)?)?;
    }
    Ok(true)
}

/// `snapshot`: the seed dataset as JSON
///
/// # Errors
/// Returns error on write failure
pub fn snapshot(out: &mut dyn Write) -> anyhow::Result<bool> {
    let snapshot = seed::initial_snapshot();
    writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    Ok(true)
}

/// `audit`: consistency findings of the seed, or of a snapshot file
///
/// # Errors
/// Returns error if the file cannot be read or is not a snapshot
pub fn audit(file: Option<&Path>, out: &mut dyn Write) -> anyhow::Result<bool> {
    let snapshot: Snapshot = match file {
        Some(path) => {
            let Some(source) = path.to_str() else {
                bail!("snapshot path is not valid UTF-8: {}", path.display());
            };
            read_document(source)?
        }
        None => seed::initial_snapshot(),
    };
    let report = snapshot.audit();
    writeln!(out, "{report}")?;
    Ok(report.is_clean())
}
