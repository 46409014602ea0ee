//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use atzip::compression::file_ops::run;
use atzip::tools::cli::atopts_init;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli sets the real maximum.
    // Logs go to stderr so -v and -w output on stdout stays clean.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Logger already initialized, continuing without it.");
    }

    let options = atopts_init();

    //----- Figure how what we need to do and go do it
    if let Err(e) = run(&options) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Done.\n");
}
