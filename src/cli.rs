//! CLI interface for the keyword ranker

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keyword-ranker")]
#[command(about = "Rank PDF documents by keyword relevance")]
#[command(
    long_about = "Extract text from PDF, TXT, or Markdown documents and score each one against a configurable keyword list, ranking the batch by relevance to a role profile"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze and rank one or more documents
    Analyze {
        /// Paths to document files (PDF, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Keyword preset to use (see `presets list`)
        #[arg(short, long)]
        preset: Option<String>,

        /// Comma-separated keywords (overrides the preset's keywords)
        #[arg(short, long)]
        keywords: Option<String>,

        /// Comma-separated priority keywords that receive extra weight
        #[arg(long)]
        priority: Option<String>,

        /// Weight factor applied to priority keyword counts
        #[arg(short, long)]
        factor: Option<f64>,

        /// Output format: console, json, markdown, html
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show the per-keyword breakdown for every document
        #[arg(short, long)]
        detailed: bool,
    },

    /// Keyword preset commands
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum PresetAction {
    /// List available presets
    List,

    /// Show a preset's keywords and priority list
    Show {
        /// Preset name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
