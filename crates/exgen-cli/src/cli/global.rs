//! Flags accepted both before and after a subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more: -v lists every created path, -vv adds plan details, -vvv traces.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only. Prompts still run unless --yes is given.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable coloured output. Any non-empty NO_COLOR value other than
    /// `0`/`false`/`no`/`off` also disables it.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read configuration from FILE instead of the platform config directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed; `json` emits one summary object on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,

    /// Mirror logs, uncoloured, into FILE.
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    Human,
    Plain,
    Json,
}

impl OutputFormat {
    /// Collapse `Auto` given whether stdout is a terminal.
    pub fn resolve(self, stdout_is_tty: bool) -> Self {
        match self {
            Self::Auto if stdout_is_tty => Self::Human,
            Self::Auto => Self::Plain,
            other => other,
        }
    }

    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}
