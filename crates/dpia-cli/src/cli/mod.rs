use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `dpia` binary.
#[derive(Debug, Parser)]
#[command(name = "dpia", version, about = "DPIA risk aggregation and mitigation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["dpia", "--format", "raw", "--verbose", "schema"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Schema(ref args) if args.name.is_none()));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["dpia", "catalog", "q.json", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        let Commands::Catalog(args) = cli.command else {
            panic!("expected catalog command");
        };
        assert_eq!(args.path.as_deref(), Some(Path::new("q.json")));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["dpia", "--format", "table", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn summarize_parses_options() {
        let cli = Cli::try_parse_from([
            "dpia",
            "summarize",
            "answers.json",
            "--catalog",
            "catalog.json",
            "--articles",
            "articles.json",
            "--propose",
        ])
        .expect("cli should parse");

        let Commands::Summarize(args) = cli.command else {
            panic!("expected summarize command");
        };
        assert_eq!(args.answers, Path::new("answers.json"));
        assert_eq!(args.catalog.as_deref(), Some(Path::new("catalog.json")));
        assert_eq!(args.articles.as_deref(), Some(Path::new("articles.json")));
        assert!(args.propose);
        assert!(!args.summary_only);
    }

    #[test]
    fn articles_accepts_optional_number_and_path() {
        let cli = Cli::try_parse_from(["dpia", "articles"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Articles(ref args) if args.number.is_none() && args.path.is_none()
        ));

        let cli = Cli::try_parse_from(["dpia", "articles", "Art. 32", "--path", "refs.json"])
            .expect("cli should parse");
        let Commands::Articles(args) = cli.command else {
            panic!("expected articles command");
        };
        assert_eq!(args.number.as_deref(), Some("Art. 32"));
        assert_eq!(args.path.as_deref(), Some(Path::new("refs.json")));
    }

    #[test]
    fn matrix_requires_both_ratings() {
        assert!(Cli::try_parse_from(["dpia", "matrix", "-l", "4"]).is_err());
        let cli = Cli::try_parse_from(["dpia", "matrix", "-l", "4", "-i", "5"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Matrix(ref args) if args.likelihood == 4 && args.impact == 5
        ));
    }
}
