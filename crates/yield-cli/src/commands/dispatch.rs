use yield_config::YieldConfig;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &YieldConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Commands::Config = command {
        return commands::config::handle(config, flags);
    }

    let store = bootstrap::open_store(flags, config)?;
    match command {
        Commands::Campaign { action } => commands::campaign::handle(&action, &store, flags),
        Commands::Propose(args) => commands::propose::handle(&args, &store, config, flags),
        Commands::Apply(args) => commands::apply::handle(&args, &store, flags),
        Commands::History(args) => commands::history::handle(&args, &store, config, flags),
        Commands::Schema(_) | Commands::Config => {
            unreachable!("schema/config are handled before the store is opened")
        }
    }
}
