//! Compare command
//!
//! Usage: ctxdrift compare --baseline <DIR> --current <DIR> [--json] [--fail-on-diff]

use clap::Args;
use ctxdrift_core::diff::CompareStatus;
use ctxdrift_engine::{EngineConfig, EngineQuery, EngineQueryResult};
use std::path::PathBuf;

use super::{dir_dataset, run_query};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Baseline context directory
    #[arg(long)]
    pub baseline: PathBuf,

    /// Current context directory
    #[arg(long)]
    pub current: PathBuf,

    /// Print the structured result as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,

    /// Engine configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Exit with status 1 when drift is found or the compare failed
    #[arg(long)]
    pub fail_on_diff: bool,
}

/// Execute compare command, returning the process exit code
pub fn execute(args: CompareArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let query = EngineQuery::SnapshotCompare {
        baseline: dir_dataset(&args.baseline),
        current: dir_dataset(&args.current),
    };
    let outcome = match run_query(query, &config)? {
        EngineQueryResult::SnapshotCompare(outcome) => outcome,
        other => return Err(format!("unexpected query result: {other:?}").into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        print!("{}", outcome.human_summary);
    }

    let failed = outcome.result.status != CompareStatus::Pass;
    Ok(if args.fail_on_diff && failed { 1 } else { 0 })
}
