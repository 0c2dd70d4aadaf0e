//! # assure-cli: Command-Line Interface for Assure
//!
//! Runs the same pure functions as the HTTP service against a customer
//! dataset on disk (or the built-in sample book).
//!
//! ## Subcommands
//!
//! - `assure customers query`: Filter, sort, and paginate customers.
//! - `assure customers summary`: Dashboard aggregation.
//! - `assure sample`: Export the sample dataset.
//! - `assure risk`: Derive a risk profile from sub-scores.
//!
//! ```bash
//! assure sample --output book.json
//! assure customers query --data book.json --type Corporate --sort-by totalPremium
//! assure risk --credit 40 --claims 55 --fraud 30 --compliance 45
//! ```
//!
//! Argument parsing lives in the subcommand modules; filtering and scoring
//! are delegated to `assure-core`.

pub mod customers;
pub mod risk;
pub mod sample;

use std::path::Path;

use anyhow::{Context, Result};
use assure_core::Customer;
use serde::Serialize;

/// Load customers from a JSON array file, or the sample book when no file
/// is given.
pub fn load_customers(data: Option<&Path>) -> Result<Vec<Customer>> {
    let Some(path) = data else {
        tracing::debug!("no --data given; using the sample dataset");
        return Ok(assure_core::sample::customers());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let customers: Vec<Customer> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse dataset: {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = customers.len(), "loaded dataset");
    Ok(customers)
}

/// Pretty-print a value as JSON to stdout, or to `output` when given.
pub fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_path_returns_sample() {
        let customers = load_customers(None).unwrap();
        assert_eq!(customers, assure_core::sample::customers());
    }

    #[test]
    fn load_missing_file_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_customers(Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn load_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, r#"{"customers": []}"#).unwrap();
        assert!(load_customers(Some(path.as_path())).is_err());
    }

    #[test]
    fn emit_then_load_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        let two = assure_core::sample::two_customers();
        emit_json(&two, Some(path.as_path())).unwrap();
        assert_eq!(load_customers(Some(path.as_path())).unwrap(), two);
    }
}
