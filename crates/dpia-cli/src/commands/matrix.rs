use dpia_config::DpiaConfig;
use dpia_engine::scorer::score_matrix;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MatrixArgs;
use crate::output::output;

/// Handle `dpia matrix`.
pub fn handle(args: &MatrixArgs, config: &DpiaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let score = score_matrix(args.likelihood, args.impact)?;
    output(&score, flags.format, config.export.pretty)
}
