//! Log output to stderr.

use anyhow::Context as _;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, clap::Args)]
pub struct LoggingArgs {
    /// Additional logging to stderr, down to every integration step.
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Remove timestamps from logs so that they are deterministic.
    #[arg(long = "simplify-log-format", hide = true, global = true)]
    pub simplify_log_format: bool,
}

/// Install a [`log`] global logger based on user-provided `options`.
pub fn install(options: &LoggingArgs) -> Result<(), anyhow::Error> {
    use log::LevelFilter::{Error, Info, Off, Trace};

    let &LoggingArgs {
        verbose,
        simplify_log_format,
    } = options;

    simplelog::WriteLogger::init(
        if verbose { Trace } else { Info },
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_time_level(if simplify_log_format { Off } else { Error })
            .build(),
        std::io::stderr(),
    )
    .context("failed to install logger")
}
