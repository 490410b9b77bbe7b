//! Bundle command
//!
//! Usage: ctxdrift bundle --dir <DIR> --folder <PATH> [--component <NAME>]

use clap::Args;
use ctxdrift_engine::{EngineConfig, EngineQuery, EngineQueryResult};
use std::path::PathBuf;

use super::{dir_dataset, run_query};

#[derive(Debug, Args)]
pub struct BundleArgs {
    /// Context directory holding the index
    #[arg(long)]
    pub dir: PathBuf,

    /// Folder path as listed in the index ("." for the root)
    #[arg(long)]
    pub folder: String,

    /// Only print the bundle rooted at this component
    #[arg(long)]
    pub component: Option<String>,
}

pub fn execute(args: BundleArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let query = EngineQuery::BundleRead {
        dataset: dir_dataset(&args.dir),
        folder: args.folder,
        root_component: args.component,
    };
    match run_query(query, &EngineConfig::default())? {
        EngineQueryResult::BundleRead(bundles) => {
            println!("{}", serde_json::to_string_pretty(&bundles)?);
            Ok(0)
        }
        other => Err(format!("unexpected query result: {other:?}").into()),
    }
}
