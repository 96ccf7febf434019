//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Report WebExtension APIs supported in Chrome but not Firefox.
///
/// Reads the WebExtension section of MDN's browser-compat-data and prints
/// every feature Chrome supports that Firefox does not. Endpoints and limits
/// can be overridden through WEBEXT_COMPAT_* environment variables.
#[derive(Parser, Debug)]
#[command(name = "webext-compat")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Default tracing filter for the requested verbosity.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
