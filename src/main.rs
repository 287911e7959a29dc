use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use musync::config::{Settings, WriteMode};
use musync::logging::{LogFormat, init_logging};
use musync::metadata::Processor;
use musync::metadata::types::FileReport;

#[derive(Parser)]
#[command(name = "musync")]
#[command(version)]
#[command(about = "Sync MP3 tags, lyrics and cover art with their sidecar files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// What to do with the .lrc sidecar
    #[arg(long, global = true, value_enum)]
    lrc: Option<WriteMode>,

    /// What to do with the embedded lyrics frames
    #[arg(long, global = true, value_enum)]
    embed: Option<WriteMode>,

    /// Keep leading credit lines ("作词 : ...") in lyrics
    #[arg(long, global = true)]
    keep_credits: bool,

    /// Strip embedded lyrics from files that have none anywhere
    #[arg(long, global = true)]
    remove_lyrics: bool,

    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Level filter, e.g. "debug" or "musync=trace" (RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every .mp3 under the given roots (default: the music root)
    Process {
        roots: Vec<PathBuf>,
    },
    /// Process a single .mp3
    File {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings_from(&cli)?;

    init_logging(&settings.log).context("failed to set up logging")?;

    let processor = Processor::from_settings(&settings);

    match cli.command {
        Commands::Process { roots } => {
            let roots = if roots.is_empty() {
                vec![settings.music_root.clone()]
            } else {
                roots
            };
            let report = processor.process_roots(&roots)?;
            println!(
                "Processed {} file(s): {} with failed steps ({} step failure(s))",
                report.file_count(),
                report.failed_files(),
                report.step_failures()
            );
        }
        Commands::File { path } => {
            if !path.is_file() {
                bail!("{} is not a file", path.display());
            }
            let report = processor.process_file(&path);
            print_file_report(&path, &report);
        }
    }

    Ok(())
}

/// File settings, then environment, then flags.
fn settings_from(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    if let Some(mode) = cli.lrc {
        settings.lyrics.lrc = mode;
    }
    if let Some(mode) = cli.embed {
        settings.lyrics.embed = mode;
    }
    settings.lyrics.keep_credits |= cli.keep_credits;
    settings.lyrics.remove_embedded_when_missing |= cli.remove_lyrics;

    if let Some(format) = cli.log_format {
        settings.log = settings.log.with_format(format);
    }
    if let Some(level) = &cli.log_level {
        settings.log = settings.log.with_level(level.as_str());
    }

    Ok(settings)
}

fn print_file_report(path: &Path, report: &FileReport) {
    println!("{}", path.display());
    for (step, result) in report.steps() {
        match result {
            Ok(outcome) => println!("  {step}: {outcome:?}"),
            Err(e) => println!("  {step}: FAILED ({e})"),
        }
    }
}
