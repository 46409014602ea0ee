use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use log::{info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// 0 is quiet, 5 (or more) is trace.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress, Decompress, Huffman-only Encode, Huffman-only Decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Encode,
    Decode,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "atzip",
    version,
    about = "Compresses binary and plain text files using the Burrows-Wheeler transform, \
             move-to-front coding, and Huffman coding."
)]
#[clap(group(
    ArgGroup::new("mode")
        .required(true)
        .args(&["compress", "decompress", "encode", "decode"])
))]
pub struct Args {
    /// Compress a file into an atzip archive
    #[clap(short = 'c')]
    compress: bool,

    /// Decompress an archive back into the original input
    #[clap(short = 'd')]
    decompress: bool,

    /// Huffman-encode a file into a '0'/'1' bit string (printed, and stored in an archive)
    #[clap(short = 'v')]
    encode: bool,

    /// Decode an archive written by -v back into bytes
    #[clap(short = 'w')]
    decode: bool,

    /// Input file path
    #[clap(short = 'i', long = "input")]
    input: PathBuf,

    /// Output file path
    #[clap(short = 'o', long = "output")]
    output: PathBuf,

    /// The file is binary: skip the BWT and move-to-front stages
    #[clap(short = 'b', long = "binary")]
    binary: bool,

    /// Sets verbosity. 0 is silent, 5 is chatty
    #[clap(long = "verbosity", default_value_t = 2)]
    verbosity: u8,
}

/// All user settable options that control program behavior
#[derive(Debug, Clone)]
pub struct AtOpts {
    /// Compress/Decompress/Encode/Decode
    pub op_mode: Mode,
    /// File to read
    pub input: PathBuf,
    /// File to write
    pub output: PathBuf,
    /// Run the BWT and MTF stages (false when the binary flag is given)
    pub use_transform: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl From<Args> for AtOpts {
    fn from(args: Args) -> Self {
        let op_mode = if args.decompress {
            Mode::Decompress
        } else if args.encode {
            Mode::Encode
        } else if args.decode {
            Mode::Decode
        } else {
            Mode::Compress
        };
        Self {
            op_mode,
            input: args.input,
            output: args.output,
            use_transform: !args.binary,
            verbose: Verbosity::from_level(args.verbosity),
        }
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn atopts_init() -> AtOpts {
    let opts = AtOpts::from(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("---- atzip initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Reading {}, writing {}", opts.input.display(), opts.output.display());
    if !opts.use_transform {
        info!("Binary input: skipping the BWT and move-to-front stages")
    };
    opts
}
