//! Command-line argument parsing for the headless driver
//!
//! Supports:
//! - Replaying a YAML script of input steps (file or stdin)
//! - JSON output of session outcomes
//! - Printing the effective keymap
//! - Writing the effective config back out

use clap::Parser;
use std::path::PathBuf;

/// Drive the quickjot capture engine from a script
#[derive(Parser, Debug)]
#[command(
    name = "quickjot",
    version,
    about = "Headless driver for the quickjot capture engine"
)]
pub struct CliArgs {
    /// YAML script of input steps ("-" or omitted reads stdin)
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print outcomes as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Print the effective keymap and exit
    #[arg(long)]
    pub print_keymap: bool,

    /// Use this config file instead of the one in the config dir
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the effective config (defaults filled in) and exit
    #[arg(long)]
    pub write_config: bool,
}

/// Where script steps come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Stdin,
    File(PathBuf),
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    PrintKeymap,
    /// Save to this path, or the config dir when `None`
    WriteConfig(Option<PathBuf>),
    Replay { source: ScriptSource, json: bool },
}

impl CliArgs {
    pub fn run_mode(&self) -> RunMode {
        if self.print_keymap {
            return RunMode::PrintKeymap;
        }
        if self.write_config {
            return RunMode::WriteConfig(self.config.clone());
        }
        let source = match &self.script {
            Some(path) if path.as_os_str() != "-" => ScriptSource::File(path.clone()),
            _ => ScriptSource::Stdin,
        };
        RunMode::Replay {
            source,
            json: self.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("quickjot").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_args_reads_stdin() {
        assert_eq!(
            parse(&[]).run_mode(),
            RunMode::Replay {
                source: ScriptSource::Stdin,
                json: false
            }
        );
    }

    #[test]
    fn test_dash_reads_stdin() {
        assert_eq!(
            parse(&["--script", "-", "--json"]).run_mode(),
            RunMode::Replay {
                source: ScriptSource::Stdin,
                json: true
            }
        );
    }

    #[test]
    fn test_script_file() {
        assert_eq!(
            parse(&["-s", "steps.yaml"]).run_mode(),
            RunMode::Replay {
                source: ScriptSource::File(PathBuf::from("steps.yaml")),
                json: false
            }
        );
    }

    #[test]
    fn test_print_keymap_wins() {
        assert_eq!(
            parse(&["--print-keymap", "--script", "x.yaml"]).run_mode(),
            RunMode::PrintKeymap
        );
    }

    #[test]
    fn test_write_config_targets_config_flag() {
        assert_eq!(
            parse(&["--write-config", "--config", "q.yaml"]).run_mode(),
            RunMode::WriteConfig(Some(PathBuf::from("q.yaml")))
        );
        assert_eq!(
            parse(&["--write-config"]).run_mode(),
            RunMode::WriteConfig(None)
        );
    }
}
