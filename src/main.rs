// Copyright (c) 2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Command line entry point for grs80-geodetic.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod prompt;

use cli::{Commands, EllipsoidName};
use prompt::Prompter;

/// Geodetic calculations on the GRS80 ellipsoid
#[derive(Parser)]
#[command(name = "grs80-geodetic")]
#[command(author, version)]
#[command(
    long_about = "Geodetic calculations on the GRS80 ellipsoid: DMS angles, normal gravity, \
                  Cartesian coordinates, UTM scale error and shapefile headers.\n\n\
                  Without a sub-command, runs the interactive menu."
)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Reference ellipsoid for Cartesian and UTM calculations
    #[arg(long, value_enum, default_value_t, global = true)]
    ellipsoid: EllipsoidName,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let ellipsoid = cli.ellipsoid.ellipsoid();
    debug!(ellipsoid = ?cli.ellipsoid, "selected ellipsoid");

    let stdout = io::stdout();
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let mut prompter = Prompter::new(io::stdin().lock(), stdout.lock());
            prompt::run_menu(&mut prompter, ellipsoid)
        }
        command => cli::run(command, ellipsoid, &mut stdout.lock()),
    }
}

/// Log to standard error, so that results on standard output are not mixed
/// with log messages.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
