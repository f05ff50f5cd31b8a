//! Command line configuration.
//!
//! Arguments are parsed once into a [`Config`] that is handed to the driver,
//! nothing is kept in process-wide state.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::error::AppError;

pub const SHORT_USAGE: &str = "Usage:\tnes-header-decoder [flags] [file]\n";

pub const HELP: &str = "\
Usage:

\tnes-header-decoder [flags] [file]

The flags are:

\t-h\t\t\tShow this help message.
\t-v\t\t\tShow version.
\t-d\t\t\tShow debug messages.
\t--log-file <PATH>\tAlso write log messages to PATH.

The file is:

\tAn NES file to decode.

Examples:

\tnes-header-decoder ./zelda.nes
\tnes-header-decoder -v
\tnes-header-decoder -d -v
\tnes-header-decoder -d -v -h
\tnes-header-decoder -d -v -h ./zelda.nes
";

#[derive(Parser, Debug)]
#[command(
    name = "nes-header-decoder",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    #[arg(short = 'h')]
    help: bool,

    #[arg(short = 'v')]
    version: bool,

    #[arg(short = 'd')]
    debug: bool,

    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Every non-flag argument, the last one is decoded.
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `-h` was the only argument: print the help and stop.
    pub help_only: bool,
    pub show_help: bool,
    pub show_version: bool,
    pub debug: bool,
    pub log_file: Option<PathBuf>,
    pub file: Option<PathBuf>,
    /// Arguments as received, program name included. Logged in debug mode.
    pub args: Vec<String>,
}

impl Config {
    /// Builds the configuration from raw process arguments, program name first.
    ///
    /// # Errors
    ///
    /// [`AppError::NoArguments`] when nothing follows the program name,
    /// [`AppError::Usage`] when the arguments cannot be parsed.
    pub fn from_args<I, T>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() < 2 {
            return Err(AppError::NoArguments);
        }

        let mut cli = Cli::try_parse_from(&args)?;

        Ok(Self {
            help_only: cli.help && args.len() == 2,
            show_help: cli.help,
            show_version: cli.version,
            debug: cli.debug,
            log_file: cli.log_file,
            file: cli.files.pop(),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        })
    }
}
