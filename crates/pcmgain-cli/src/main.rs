use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pcmgain_engine::{pcm, GainConfig};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pcmgain", version, about = "Apply clamped gain to 16-bit PCM")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a 16-bit integer PCM WAV file
    Wav {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        gain: GainArgs,
    },
    /// Process headerless s16le PCM (stdin/stdout by default)
    Raw {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        gain: GainArgs,
    },
}

#[derive(Args, Debug)]
struct GainArgs {
    /// Linear gain factor
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    gain: f32,
    /// Gain in decibels
    #[arg(long, conflicts_with = "gain", allow_negative_numbers = true)]
    db: Option<f32>,
}

impl From<&GainArgs> for GainConfig {
    fn from(a: &GainArgs) -> Self {
        GainConfig { gain: a.gain, gain_db: a.db }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Wav { input, output, gain } => {
            let cfg = GainConfig::from(&gain);
            let mut fx = cfg.effect();
            let report = pcm::process_wav(&input, &output, &mut fx).with_context(|| {
                format!("Failed to process {} -> {}", input.display(), output.display())
            })?;
            log::info!(
                "gain {:.4}: {} samples, {} at limit -> {}",
                cfg.linear(),
                report.samples,
                report.at_limit,
                output.display()
            );
        }
        Command::Raw { input, output, gain } => {
            let cfg = GainConfig::from(&gain);
            let mut fx = cfg.effect();

            let reader: Box<dyn Read> = match &input {
                Some(p) => Box::new(BufReader::new(
                    File::open(p).with_context(|| format!("Failed to open {}", p.display()))?,
                )),
                None => Box::new(io::stdin().lock()),
            };
            let writer: Box<dyn Write> = match &output {
                Some(p) => Box::new(BufWriter::new(
                    File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };

            let report =
                pcm::process_raw(reader, writer, &mut fx).context("Failed to process raw PCM")?;
            log::info!(
                "gain {:.4}: {} samples, {} at limit",
                cfg.linear(),
                report.samples,
                report.at_limit
            );
        }
    }
    Ok(())
}
