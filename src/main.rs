//! Keyword ranker: rank PDF documents by keyword relevance

mod analysis;
mod cli;
mod config;
mod error;
mod input;
mod output;

use analysis::analyzer::KeywordAnalyzer;
use analysis::document::Document;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, PresetAction};
use config::{split_keywords, Config, KeywordConfig};
use error::{KeywordRankerError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use input::file_detector::SUPPORTED_EXTENSIONS;
use input::manager::InputManager;
use log::{error, info, warn};
use output::formatter::ReportGenerator;
use output::report::{BatchReport, DocumentOutcome};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            files,
            preset,
            keywords,
            priority,
            factor,
            output,
            save,
            detailed,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(KeywordRankerError::InvalidInput)?;

            for file in &files {
                cli::validate_file_extension(file, SUPPORTED_EXTENSIONS)
                    .map_err(|e| KeywordRankerError::InvalidInput(format!("{}: {}", file.display(), e)))?;
            }

            let keyword_config = resolve_keyword_config(
                &config,
                preset.as_deref(),
                keywords.as_deref(),
                priority.as_deref(),
                factor,
            )?;

            info!(
                "Analyzing {} document(s) against {} keyword(s), factor {}",
                files.len(),
                keyword_config.keywords.len(),
                keyword_config.factor
            );

            let outcomes = extract_and_analyze(&files, &keyword_config).await;
            let report = BatchReport::new(outcomes, &keyword_config);

            let generator = ReportGenerator::new(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
            );
            let rendered = generator.generate(&report, &output_format)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            if report.has_failures() {
                warn!(
                    "{} of {} document(s) could not be analyzed",
                    report.failures().len(),
                    report.metadata.documents
                );
            }
        }

        Commands::Presets { action } => match action {
            PresetAction::List => {
                println!("Available keyword presets:\n");
                for preset in config.list_presets() {
                    let keywords = split_keywords(&preset.keywords);
                    let priority = split_keywords(&preset.priority);
                    println!(
                        "  {} ({} keywords, {} priority)",
                        preset.name,
                        keywords.len(),
                        priority.len()
                    );
                    println!("    {}", preset.description);
                }
            }
            PresetAction::Show { name } => {
                let preset = config.get_preset_by_name(&name).ok_or_else(|| {
                    KeywordRankerError::InvalidInput(format!("Unknown preset: {}", name))
                })?;
                println!("{}", preset.name);
                println!("  {}", preset.description);
                println!("  Keywords: {}", preset.keywords);
                println!("  Priority: {}", preset.priority);
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current configuration\n");
                println!("Config file: {}", Config::config_path().display());
                println!("Default weight factor: {}", config.analysis.default_factor);
                println!("Default output format: {:?}", config.output.format);
                println!("Presets: {}", config.presets.len());
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

/// Build the per-run keyword configuration from CLI flags and presets.
/// Explicit `--keywords` wins over a preset; the priority list falls back
/// to the preset's when a preset is selected.
fn resolve_keyword_config(
    config: &Config,
    preset: Option<&str>,
    keywords: Option<&str>,
    priority: Option<&str>,
    factor: Option<f64>,
) -> Result<KeywordConfig> {
    let factor = factor.unwrap_or(config.analysis.default_factor);

    let preset = match preset {
        Some(name) => Some(config.get_preset_by_name(name).ok_or_else(|| {
            KeywordRankerError::InvalidInput(format!(
                "Unknown preset: {}. Available: {}",
                name,
                preset_names(config)
            ))
        })?),
        None => None,
    };

    let keyword_list = match (keywords, preset) {
        (Some(raw), _) => split_keywords(raw),
        (None, Some(preset)) => split_keywords(&preset.keywords),
        (None, None) => {
            return Err(KeywordRankerError::InvalidInput(format!(
                "Provide --keywords or --preset. Available presets: {}",
                preset_names(config)
            )));
        }
    };

    let priority_list = match (priority, preset) {
        (Some(raw), _) => split_keywords(raw),
        (None, Some(preset)) => split_keywords(&preset.priority),
        (None, None) => Vec::new(),
    };

    KeywordConfig::new(keyword_list, priority_list, factor)
}

fn preset_names(config: &Config) -> String {
    config
        .list_presets()
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extract and analyze each file independently: a document that fails
/// extraction becomes a labeled failure entry and never aborts the batch.
async fn extract_and_analyze(files: &[PathBuf], keyword_config: &KeywordConfig) -> Vec<DocumentOutcome> {
    let analyzer = KeywordAnalyzer::new(keyword_config.clone());
    let mut input_manager = InputManager::new();
    let mut outcomes = Vec::with_capacity(files.len());

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for file in files {
        let label = file_label(file);
        progress.set_message(label.clone());

        let outcome = match input_manager.extract_text(file).await {
            Ok(text) => {
                let document = Document::new(text, label);
                DocumentOutcome::Analyzed(analyzer.analyze(&document))
            }
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                DocumentOutcome::Failed {
                    file: label,
                    error: e.to_string(),
                }
            }
        };

        outcomes.push(outcome);
        progress.inc(1);
    }

    progress.finish_and_clear();
    outcomes
}

/// Document identity is the file name, used only as a label.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
