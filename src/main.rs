use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use qrforge::{generate, ECLevel, GenerateOptions, Mode, QRError, Version};

const MAX_DATA_LEN: usize = 2953;

#[derive(Parser)]
#[command(name = "qrforge", version, about = "Generate a QR code and save it as a PNG image")]
struct Cli {
    /// Text to encode
    data: String,

    /// Output PNG file path
    #[arg(default_value = "qrcode.png")]
    output: PathBuf,

    /// QR version, from 1 to 40
    #[arg(long = "qr-version", default_value = "4")]
    qr_version: Version,

    /// Error correction level: L, M, Q or H
    #[arg(short, long, default_value = "L")]
    ec_level: ECLevel,

    /// Encoding mode: numeric, alphanumeric, byte or kanji. Detected from the data if omitted
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Pixels per module
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Also print the symbol to the terminal
    #[arg(short, long)]
    print: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    validate(&cli.data, &cli.output)?;

    let opts = GenerateOptions { version: cli.qr_version, ec_level: cli.ec_level, mode: cli.mode };
    let matrix = generate(&cli.data, &opts)?;
    if cli.print {
        print!("{}", matrix.to_str());
    }

    debug!(path = %cli.output.display(), scale = cli.scale, "Saving image");
    matrix.to_image(cli.scale).save(&cli.output)?;
    println!("QR code saved to {}", cli.output.display());
    Ok(())
}

fn validate(data: &str, output: &Path) -> Result<(), QRError> {
    if data.trim().is_empty() {
        return Err(QRError::InvalidInput("data to encode cannot be empty"));
    }
    if data.chars().count() > MAX_DATA_LEN {
        return Err(QRError::InvalidInput("data exceeds maximum length of 2953 characters"));
    }
    match output.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        _ => Err(QRError::InvalidInput("output file path must have a .png extension")),
    }
}
