//! Command-line argument definitions
//!
//! ```text
//! shapeguard [--config <path>] [-v...] <command> --schema <schema.json> [INPUT]
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use shapeguard_validator::schema::UnknownFields;
use std::path::PathBuf;

/// Check, validate, coerce and mask JSON values against declarative schemas
#[derive(Parser, Debug)]
#[command(name = "shapeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./shapeguard.toml if present)
    #[arg(long, global = true, env = "SHAPEGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a schema document and verify its defaults and coercion rules
    Check {
        /// Schema document
        #[arg(long)]
        schema: PathBuf,
    },

    /// Validate a value and print the accepted value
    Validate {
        #[command(flatten)]
        target: Target,

        /// Policy for undeclared object fields, applied to every object
        #[arg(long, value_enum)]
        unknown: Option<UnknownArg>,
    },

    /// Apply coercion rules and print the result without validating
    Coerce {
        #[command(flatten)]
        target: Target,
    },

    /// Drop undeclared fields and print the result without validating
    Mask {
        #[command(flatten)]
        target: Target,
    },

    /// Coerce, then validate, and print the accepted value
    Create {
        #[command(flatten)]
        target: Target,

        /// Policy for undeclared object fields, applied to every object
        #[arg(long, value_enum)]
        unknown: Option<UnknownArg>,
    },
}

/// Schema and input shared by the value commands.
#[derive(Args, Debug)]
pub struct Target {
    /// Schema document
    #[arg(long)]
    pub schema: PathBuf,

    /// JSON input file; `-` or absent reads stdin
    pub input: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownArg {
    Passthrough,
    Strip,
    Reject,
}

impl From<UnknownArg> for UnknownFields {
    fn from(arg: UnknownArg) -> Self {
        match arg {
            UnknownArg::Passthrough => Self::Passthrough,
            UnknownArg::Strip => Self::Strip,
            UnknownArg::Reject => Self::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate_with_policy() {
        let cli = Cli::parse_from([
            "shapeguard",
            "-vv",
            "validate",
            "--schema",
            "port.json",
            "--unknown",
            "strip",
            "input.json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Validate { target, unknown } => {
                assert_eq!(target.schema, PathBuf::from("port.json"));
                assert_eq!(target.input, Some(PathBuf::from("input.json")));
                assert_eq!(unknown, Some(UnknownArg::Strip));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_input_defaults_to_stdin() {
        let cli = Cli::parse_from(["shapeguard", "mask", "--schema", "s.json"]);
        match cli.command {
            Command::Mask { target } => assert!(target.input.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
