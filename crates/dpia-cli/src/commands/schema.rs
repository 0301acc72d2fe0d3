use anyhow::bail;
use dpia_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `dpia schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match args.name.as_deref() {
        None => output(&registry.list(), flags.format, true),
        Some(name) => match registry.get(name) {
            Some(schema) => output(schema, flags.format, true),
            None => bail!(
                "unknown schema '{name}', expected one of: {}",
                registry.list().join(", ")
            ),
        },
    }
}
