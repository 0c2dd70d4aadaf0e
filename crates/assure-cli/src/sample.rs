//! # Sample CLI: export the built-in demo dataset.
//!
//! The written file is a JSON array of customers and can be fed back to
//! `assure customers query --data`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::emit_json;

/// Sample subcommand arguments.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the sample subcommand.
pub fn run_sample(args: &SampleArgs) -> Result<u8> {
    let customers = assure_core::sample::customers();
    emit_json(&customers, args.output.as_deref())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_full_sample_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        let code = run_sample(&SampleArgs {
            output: Some(path.clone()),
        })
        .unwrap();
        assert_eq!(code, 0);
        let loaded = crate::load_customers(Some(path.as_path())).unwrap();
        assert_eq!(loaded.len(), assure_core::sample::customers().len());
    }

    #[test]
    fn unwritable_output_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("sample.json");
        assert!(run_sample(&SampleArgs { output: Some(path) }).is_err());
    }
}
