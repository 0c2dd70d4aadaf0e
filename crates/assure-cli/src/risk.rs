//! # Risk CLI: derive a risk profile from sub-scores.

use anyhow::{Context, Result};
use assure_core::RiskProfile;
use clap::Args;

use crate::emit_json;

/// Sub-scores, each 0 to 100.
#[derive(Args, Debug)]
pub struct RiskArgs {
    #[arg(long)]
    pub credit: f64,

    #[arg(long)]
    pub claims: f64,

    #[arg(long)]
    pub fraud: f64,

    #[arg(long)]
    pub compliance: f64,
}

/// Execute the risk subcommand.
pub fn run_risk(args: &RiskArgs) -> Result<u8> {
    let profile = profile_for(args)?;
    tracing::info!(
        overall = profile.overall_score,
        category = %profile.category,
        "risk profile derived"
    );
    emit_json(&profile, None)?;
    Ok(0)
}

/// Score the arguments.
pub fn profile_for(args: &RiskArgs) -> Result<RiskProfile> {
    RiskProfile::from_scores(args.credit, args.claims, args.fraud, args.compliance)
        .context("cannot derive risk profile")
}
