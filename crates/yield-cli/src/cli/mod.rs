use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `yld` binary.
#[derive(Debug, Parser)]
#[command(name = "yld", version, about = "Campaign budget reallocation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Campaign data directory (overrides `store.data_dir`)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            data_dir: self.data_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::subcommands::CampaignCommands;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["yld", "--format", "table", "--verbose", "campaign", "list"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Campaign {
                action: CampaignCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["yld", "config", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["yld", "--format", "xml", "config"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn propose_collects_repeated_locks() {
        let cli = Cli::try_parse_from([
            "yld",
            "propose",
            "cmp-1",
            "--goal",
            "increase",
            "--target-kpi",
            "10",
            "--kpi-type",
            "cpa",
            "--ceiling",
            "5.2",
            "--lock",
            "a",
            "--lock",
            "b",
        ])
        .expect("cli should parse");

        let Commands::Propose(args) = cli.command else {
            panic!("expected propose");
        };
        assert_eq!(args.campaign_id, "cmp-1");
        assert_eq!(args.goal.as_deref(), Some("increase"));
        assert_eq!(args.ceiling, Some(5.2));
        assert_eq!(args.locked, vec!["a".to_string(), "b".to_string()]);
        assert!(args.out.is_none());
    }

    #[test]
    fn propose_goal_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from([
            "yld",
            "propose",
            "cmp-1",
            "--target-kpi",
            "10",
            "--kpi-type",
            "cpa",
        ])
        .expect("cli should parse");
        let Commands::Propose(args) = cli.command else {
            panic!("expected propose");
        };
        assert!(args.goal.is_none());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["yld", "--data-dir", "/tmp/campaigns", "campaign", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.data_dir, Some(PathBuf::from("/tmp/campaigns")));
    }
}
