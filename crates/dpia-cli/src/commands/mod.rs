use dpia_config::DpiaConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod articles;
pub mod catalog;
pub mod matrix;
pub mod schema;
pub mod summarize;

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, config: &DpiaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Catalog(args) => catalog::handle(args, config, flags),
        Commands::Summarize(args) => summarize::handle(args, config, flags),
        Commands::Articles(args) => articles::handle(args, config, flags),
        Commands::Matrix(args) => matrix::handle(args, config, flags),
        Commands::Schema(args) => schema::handle(args, flags),
    }
}
