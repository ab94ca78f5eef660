use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use subtitle_convert::{
    ConversionStatus, ConverterOptions, Language, SubtitleConvert, SubtitleFormat,
};

/// Формат субтитров для командной строки
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Srt,
    Vtt,
    Ass,
}

impl From<CliFormat> for SubtitleFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Srt => SubtitleFormat::Srt,
            CliFormat::Vtt => SubtitleFormat::Vtt,
            CliFormat::Ass => SubtitleFormat::Ass,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    En,
    Zh,
    Ja,
}

impl From<CliLanguage> for Language {
    fn from(language: CliLanguage) -> Self {
        match language {
            CliLanguage::En => Language::English,
            CliLanguage::Zh => Language::Chinese,
            CliLanguage::Ja => Language::Japanese,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Off => LevelFilter::Off,
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the detected format of each file
    Detect {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },

    /// Check that each file can be converted
    Validate {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert files to another subtitle format
    Convert {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Target format
        #[arg(short, long, value_enum)]
        to: CliFormat,

        /// Directory for converted files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Keep existing files when a file is copied unchanged
        #[arg(long)]
        no_overwrite: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "subtitle-convert", version, about = "Convert subtitles between SRT, WebVTT and ASS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Language of user-facing messages (defaults to the system locale)
    #[arg(long, value_enum, global = true)]
    lang: Option<CliLanguage>,

    /// Set logging level
    #[arg(long, value_enum, global = true, default_value = "warn")]
    log_level: CliLogLevel,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Не удалось сериализовать результат")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut options = ConverterOptions {
        log_level: cli.log_level.into(),
        ..ConverterOptions::default()
    };
    if let Some(lang) = cli.lang {
        options.language = lang.into();
    }

    match cli.command {
        Commands::Detect { files } => {
            let converter = SubtitleConvert::new(options);
            let mut results = Vec::with_capacity(files.len());
            for path in files {
                let format = converter.detect(&path).await;
                results.push((path, format));
            }

            if cli.json {
                print_json(&results)?;
            } else {
                for (path, format) in &results {
                    println!("{}: {}", path.display(), format.display_name());
                }
            }

            let all_known = results.iter().all(|(_, format)| format.is_known());
            Ok(if all_known { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }

        Commands::Validate { files } => {
            let converter = SubtitleConvert::new(options);
            let mut results = Vec::with_capacity(files.len());
            for path in files {
                let report = converter.validate(&path).await;
                results.push((path, report));
            }

            if cli.json {
                print_json(&results)?;
            } else {
                for (path, report) in &results {
                    let mark = if report.is_valid { "OK" } else { "FAIL" };
                    println!("[{}] {}: {}", mark, path.display(), report.message);
                }
            }

            let all_valid = results.iter().all(|(_, report)| report.is_valid);
            Ok(if all_valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }

        Commands::Convert {
            files,
            to,
            output_dir,
            no_overwrite,
        } => {
            options.output_format = to.into();
            options.overwrite = !no_overwrite;

            let converter = SubtitleConvert::new(options);
            let mut batch = converter.batch();
            batch.add_files(files);
            let summary = batch.run(&output_dir, to.into()).await;

            if cli.json {
                print_json(&serde_json::json!({
                    "summary": summary,
                    "items": batch.items(),
                }))?;
            } else {
                for item in batch.items() {
                    let status = converter.engine().localizer().text(item.status().message_key());
                    println!("[{}] {}: {}", status, item.path().display(), item.message());
                }
                println!("{}", converter.progress().get_status());
            }

            let failed = batch
                .items()
                .iter()
                .any(|item| item.status() == ConversionStatus::Failed);
            Ok(if failed || summary.cancelled { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
    }
}
