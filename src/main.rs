//! CareerScout CLI entry point

use std::process::ExitCode;

use clap::Parser;

use career_scout::cli::{
    app::{load_merged_config, run_assessment, run_cache_warm, EXIT_ERROR},
    args::{AssessmentOptions, CacheAction, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use career_scout::domain::config::AppConfig;
use career_scout::domain::language::{Language, ALL_LANGUAGES};
use career_scout::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Build CLI config from args
    let cli_config = AppConfig {
        language: cli.language.map(|l| Language::from(l).to_string()),
        auto_mic: if cli.auto_mic {
            Some(true)
        } else if cli.no_auto_mic {
            Some(false)
        } else {
            None
        },
        voice: if cli.text_only { Some(false) } else { None },
        cache_dir: cli.cache_dir.clone(),
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = AssessmentOptions {
        language: config.language_or_default(),
        auto_mic: config.auto_mic_or_default(),
        voice: config.voice_or_default(),
        cache_dir: config.cache_dir.as_ref().map(Into::into),
    };

    // Route to appropriate handler
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Cache { action }) => {
            let CacheAction::Warm { language, all } = action;
            let languages: Vec<Language> = if all {
                ALL_LANGUAGES.to_vec()
            } else {
                vec![language.map(Into::into).unwrap_or(options.language)]
            };
            run_cache_warm(languages, options, &config).await
        }
        None => run_assessment(options, &config).await,
    }
}
