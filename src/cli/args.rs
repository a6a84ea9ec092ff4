//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::language::Language;

/// CareerScout - voice-enabled CSE career path assessment
#[derive(Parser, Debug)]
#[command(name = "career-scout")]
#[command(version = "1.0.0")]
#[command(about = "Voice-enabled CSE career path assessment using Azure Cognitive Services")]
#[command(long_about = None)]
pub struct Cli {
    /// Assessment language
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<LanguageArg>,

    /// Start listening automatically after each spoken question
    #[arg(long, conflicts_with = "no_auto_mic")]
    pub auto_mic: bool,

    /// Wait for a typed answer after each spoken question
    #[arg(long)]
    pub no_auto_mic: bool,

    /// Answer by typing only (no microphone, no prompt audio)
    #[arg(short = 't', long)]
    pub text_only: bool,

    /// Directory for cached prompt audio
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage the prompt audio cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Cache action subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Pre-generate spoken prompts for the question bank
    Warm {
        /// Language to warm (defaults to the configured language)
        #[arg(short = 'l', long, value_name = "LANG", conflicts_with = "all")]
        language: Option<LanguageArg>,
        /// Warm every supported language
        #[arg(long)]
        all: bool,
    },
}

/// Language argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    En,
    Hi,
    Ta,
    Te,
    Ml,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Hi => Language::Hi,
            LanguageArg::Ta => Language::Ta,
            LanguageArg::Te => Language::Te,
            LanguageArg::Ml => Language::Ml,
        }
    }
}

impl From<Language> for LanguageArg {
    fn from(language: Language) -> Self {
        match language {
            Language::En => LanguageArg::En,
            Language::Hi => LanguageArg::Hi,
            Language::Ta => LanguageArg::Ta,
            Language::Te => LanguageArg::Te,
            Language::Ml => LanguageArg::Ml,
        }
    }
}

/// Parsed assessment options
#[derive(Debug, Clone)]
pub struct AssessmentOptions {
    pub language: Language,
    pub auto_mic: bool,
    pub voice: bool,
    pub cache_dir: Option<PathBuf>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "language",
    "auto_mic",
    "voice",
    "cache_dir",
    "azure.speech_key",
    "azure.speech_region",
    "azure.translator_key",
    "azure.translator_region",
    "azure.translator_endpoint",
    "azure.openai_endpoint",
    "azure.openai_api_key",
    "azure.openai_deployment",
    "capture.silence_threshold_db",
    "capture.quiet_period_ms",
    "capture.grace_period_ms",
    "capture.max_duration_ms",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
