use yield_config::YieldConfig;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `yld config`: TOML for table output, JSON otherwise.
pub fn handle(config: &YieldConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(config, flags.format),
    }
}
