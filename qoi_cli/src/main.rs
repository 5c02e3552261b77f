//! qoi - encode images to the Quite OK Image format and back.

mod filemanager;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lib_qoi::image::decoder::read_header;
use lib_qoi::DecodeOptions;
use log::{error, LevelFilter};

use crate::filemanager::{decode_file, encode_file, read_qoi, ImageHandlingError};

#[derive(Parser, Debug)]
#[command(name = "qoi")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    qoi encode photo.png sprite.bmp          Writes output/photo.qoi and output/sprite.qoi
    qoi encode photo.png -o out              Writes out/photo.qoi
    qoi decode output/photo.qoi -o back.png  Decodes to PNG
    qoi info output/photo.qoi                Prints the header")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode PNG, JPEG, BMP or WebP files to QOI
    Encode {
        /// Images to encode
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving the .qoi files
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,
    },
    /// Decode a QOI file to any format the extension of OUTPUT names
    Decode {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Warn when the end marker is missing or corrupt
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Print the header of a QOI file
    Info {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

fn run(command: Command) -> Result<(), ImageHandlingError> {
    match command {
        Command::Encode { inputs, output } => {
            let mut failed = None;
            // Keep going after a bad file, report the last failure at the end.
            for input in &inputs {
                match encode_file(input, &output) {
                    Ok(target) => println!("{} -> {}", input.display(), target.display()),
                    Err(e) => {
                        error!("{}: {}", input.display(), e);
                        failed = Some(e);
                    }
                }
            }
            failed.map_or(Ok(()), Err)
        }
        Command::Decode {
            input,
            output,
            strict,
        } => {
            let options = DecodeOptions {
                strict,
                ..DecodeOptions::default()
            };
            decode_file(&input, &output, &options)?;
            println!("{} -> {}", input.display(), output.display());
            Ok(())
        }
        Command::Info { input } => {
            let header = read_header(&read_qoi(&input)?)?;
            println!("width:      {}", header.width);
            println!("height:     {}", header.height);
            println!("channels:   {}", header.channels);
            println!("colorspace: {}", header.colorspace);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    lib_qoi::init_logging(level, env!("CARGO_CRATE_NAME"));

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
