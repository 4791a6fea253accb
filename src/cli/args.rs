//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

const AFTER_HELP: &str = "\
Environment:
  USER     remote username          RURL     public URL prefix
  HOST     remote host              LPATH    directory to watch
  PORT     SSH port (22)            ARCHIVE  keep uploads here instead of deleting
  RPATH    remote directory         FILTER   file name regex

Credentials are taken from the SSH agent at SSH_AUTH_SOCK.";

#[derive(Parser, Debug)]
#[command(
    name = "shotput",
    version,
    about = "Upload new screenshots over SSH and copy their URL",
    styles = clap_cargo_style(),
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Settings file (default: <config dir>/shotput/settings.toml)
    #[arg(short, long, global = true, env = "SHOTPUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Watch the local directory and upload new matching files (default)
    Watch,

    /// Upload one file now, skipping the filter
    Upload {
        /// File to upload
        file: PathBuf,
    },

    /// Display active settings
    Config,

    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Where to write it (default: <config dir>/shotput/settings.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_no_subcommand() {
        let cli = Cli::try_parse_from(["shotput"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_upload_with_global_config() {
        let cli =
            Cli::try_parse_from(["shotput", "upload", "shot.png", "--config", "/etc/s.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/s.toml")));
        assert_eq!(
            cli.command,
            Some(Commands::Upload {
                file: PathBuf::from("shot.png")
            })
        );
    }
}
