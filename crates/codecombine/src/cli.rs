//! Command-line surface.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::combine::{CombineOptions, Combiner};
use crate::domain::model::{EntryOrder, ExtensionSet};
use crate::infra::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "codecombine",
    author,
    version,
    about = "Combine the .html, .css and .js files of a directory into one text file",
    long_about = None
)]
pub struct Cli {
    /// Directory to scan instead of the current one
    #[arg(long, short = 'C', value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output file, relative to the scanned directory
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suffix to include; repeat to replace the configured set
    #[arg(long = "extension", short = 'e', value_name = "SUFFIX")]
    pub extensions: Vec<String>,

    /// Order in which matched files are written
    #[arg(long, value_enum)]
    pub order: Option<EntryOrder>,

    /// Increase log verbosity (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Merge configuration with the flags given on the command line.
    pub fn resolve_options(&self, config: &Config, root: PathBuf) -> Result<CombineOptions> {
        let mut options = CombineOptions::from_config(root, config)
            .context("invalid combine configuration")?;
        if let Some(output) = &self.output {
            options.output = output.clone();
        }
        if !self.extensions.is_empty() {
            options.extensions = ExtensionSet::new(self.extensions.iter().cloned())
                .context("invalid --extension value")?;
        }
        if let Some(order) = self.order {
            options.order = order;
        }
        Ok(options)
    }
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "codecombine", &mut io::stdout());
        return Ok(());
    }

    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("unable to determine working directory")?,
    };
    let config = Config::load(&root)?;
    let options = cli.resolve_options(&config, root)?;
    tracing::debug!(?options, "resolved combine options");

    Combiner::new()
        .combine(&options)
        .with_context(|| format!("failed to combine files in {}", options.root.display()))?;

    println!("Combined code saved to {}", options.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_defaults() -> Result<()> {
        let cli = Cli::try_parse_from(["codecombine"])?;
        let options = cli.resolve_options(&Config::default(), PathBuf::from("site"))?;

        assert_eq!(options.root, PathBuf::from("site"));
        assert_eq!(options.output, PathBuf::from("combined_code.txt"));
        assert_eq!(options.extensions, ExtensionSet::default());
        assert_eq!(options.order, EntryOrder::Listing);
        assert!(cli.command.is_none());
        Ok(())
    }

    #[test]
    fn flags_override_configuration() -> Result<()> {
        let cli = Cli::try_parse_from([
            "codecombine",
            "--output",
            "all.txt",
            "-e",
            ".ts",
            "-e",
            ".tsx",
            "--order",
            "name",
            "-vv",
        ])?;
        let options = cli.resolve_options(&Config::default(), PathBuf::from("."))?;

        assert_eq!(options.output, PathBuf::from("all.txt"));
        assert_eq!(options.extensions.suffixes(), [".ts", ".tsx"]);
        assert_eq!(options.order, EntryOrder::Name);
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    #[test]
    fn empty_extension_flag_is_rejected() -> Result<()> {
        let cli = Cli::try_parse_from(["codecombine", "--extension", ""])?;
        assert!(cli.resolve_options(&Config::default(), PathBuf::from(".")).is_err());
        Ok(())
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
