//! Index command
//!
//! Usage: ctxdrift index --dir <DIR> [--prefix <PREFIX>]

use clap::Args;
use ctxdrift_engine::{EngineConfig, EngineQuery, EngineQueryResult};
use std::path::PathBuf;

use super::{dir_dataset, run_query};

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Context directory holding the index
    #[arg(long)]
    pub dir: PathBuf,

    /// Only list folders whose path starts with this string
    #[arg(long)]
    pub prefix: Option<String>,
}

pub fn execute(args: IndexArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let query = EngineQuery::IndexRead {
        dataset: dir_dataset(&args.dir),
        folder_prefix: args.prefix,
    };
    match run_query(query, &EngineConfig::default())? {
        EngineQueryResult::IndexRead(index) => {
            println!("{}", serde_json::to_string_pretty(&index)?);
            Ok(0)
        }
        other => Err(format!("unexpected query result: {other:?}").into()),
    }
}
