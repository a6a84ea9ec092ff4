//! Main app runners for the assessment and cache warming

use std::env;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::ports::config::ConfigStore;
use crate::application::ports::{
    AudioPlayer, QuestionSource, RecognitionError, SpeechRecognizer, SpeechSynthesizer,
    VoiceRecorder,
};
use crate::application::{AnalyzeAnswersUseCase, AskCallbacks, AskError, AskQuestionUseCase};
use crate::domain::assessment::recommendation::result_cache_key;
use crate::domain::assessment::{english_questions, Answer, AssessmentSession, AssessmentState, Question, Recommendation};
use crate::domain::config::{AppConfig, AzureConfig};
use crate::domain::language::Language;
use crate::infrastructure::{
    AzureOpenAiAdvisor, AzureSpeechRecognizer, AzureSpeechSynthesizer, AzureTranslator,
    CpalVoiceRecorder, RodioPlayer, TranslatedQuestionCatalog, TtsCache, XdgConfigStore,
};

use super::args::AssessmentOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Build a config overlay from the AZURE_* environment variables
fn env_config() -> AppConfig {
    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }

    AppConfig {
        azure: Some(AzureConfig {
            speech_key: var("AZURE_SPEECH_KEY"),
            speech_region: var("AZURE_SPEECH_REGION"),
            translator_key: var("AZURE_TRANSLATOR_KEY"),
            translator_region: var("AZURE_TRANSLATOR_REGION"),
            translator_endpoint: var("AZURE_TRANSLATOR_ENDPOINT"),
            openai_endpoint: var("AZURE_OPENAI_ENDPOINT"),
            openai_api_key: var("AZURE_OPENAI_API_KEY"),
            openai_deployment: var("AZURE_OPENAI_DEPLOYMENT_NAME"),
        }),
        ..Default::default()
    }
}

fn build_translator(azure: &AzureConfig) -> AzureTranslator {
    let translator = AzureTranslator::new(
        azure.translator_key.clone().unwrap_or_default(),
        azure.translator_region.clone().unwrap_or_default(),
    );
    match &azure.translator_endpoint {
        Some(endpoint) => translator.with_endpoint(endpoint.clone()),
        None => translator,
    }
}

fn build_advisor(azure: &AzureConfig) -> AzureOpenAiAdvisor {
    AzureOpenAiAdvisor::new(
        azure.openai_endpoint.clone(),
        azure.openai_api_key.clone(),
        azure.openai_deployment.clone(),
    )
}

fn build_synthesizer(azure: &AzureConfig, cache: Option<TtsCache>) -> AzureSpeechSynthesizer {
    let synthesizer = AzureSpeechSynthesizer::new(
        azure.speech_key.clone().unwrap_or_default(),
        azure.speech_region.clone().unwrap_or_default(),
    );
    match cache {
        Some(cache) => synthesizer.with_cache(cache),
        None => synthesizer,
    }
}

/// Fetch the localized question bank, falling back to English
async fn fetch_questions(
    azure: &AzureConfig,
    language: Language,
    presenter: &Presenter,
) -> Vec<Question> {
    if language != Language::En && azure.translator_key.is_none() {
        presenter.warn("Translator not configured; questions will be in English");
    }

    let catalog = TranslatedQuestionCatalog::new(build_translator(azure));
    match catalog.questions(language).await {
        Ok(bank) => bank,
        Err(_) => english_questions(),
    }
}

/// Read a 1-based option choice from stdin, returning the 0-based index
async fn read_choice(presenter: &Presenter, option_count: usize) -> Result<usize, String> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        presenter.answer_prompt(option_count);
        let line = lines
            .next_line()
            .await
            .map_err(|e| format!("Failed to read input: {}", e))?
            .ok_or_else(|| "Input closed".to_string())?;

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=option_count).contains(&choice) => return Ok(choice - 1),
            _ => presenter.warn(&format!("Enter a number from 1 to {}", option_count)),
        }
    }
}

/// Record a typed answer for the current question
async fn typed_answer(
    session: &mut AssessmentSession,
    question: &Question,
    presenter: &Presenter,
) -> Result<(), String> {
    if matches!(
        session.state(),
        AssessmentState::Idle | AssessmentState::AwaitingNextQuestion
    ) {
        session.start_question().map_err(|e| e.to_string())?;
    }

    let index = read_choice(presenter, question.options.len()).await?;
    let answer = Answer::chosen(question, index).ok_or("Choice out of range")?;
    session.select_option(answer).map_err(|e| e.to_string())
}

/// Status callbacks shared by every voice round
fn voice_callbacks() -> AskCallbacks {
    AskCallbacks {
        on_prompt: None,
        on_listening: Some(Box::new(|| {
            eprintln!("🎤 Listening... speak now");
        })),
        on_processing: Some(Box::new(|| {
            eprintln!("… Processing your response");
        })),
        on_transcript: None,
    }
}

/// Run one voice round. Returns true when the answer was recorded by
/// voice; false means the caller should fall back to typed input.
async fn voice_round<S, P, R, Z>(
    ask: &AskQuestionUseCase<S, P, R, Z>,
    session: &mut AssessmentSession,
    question: &Question,
    language: Language,
    presenter: &Presenter,
) -> bool
where
    S: SpeechSynthesizer,
    P: AudioPlayer,
    R: VoiceRecorder,
    Z: SpeechRecognizer,
{
    let callbacks = voice_callbacks();

    if session.auto_mic() {
        match ask.execute(session, question, language, &callbacks).await {
            Ok(outcome) => {
                presenter.transcript(&outcome.transcript);
                true
            }
            Err(AskError::Recognition(RecognitionError::NoSpeech)) => {
                presenter.warn("Speech not recognized. Type your answer instead.");
                false
            }
            Err(e) => {
                presenter.warn(&format!("Voice input unavailable: {}", e));
                false
            }
        }
    } else {
        // Speak the prompt, then wait for a typed answer
        if let Err(e) = ask.speak_prompt(session, question, language, &callbacks).await {
            presenter.warn(&format!("Prompt playback unavailable: {}", e));
        }
        false
    }
}

/// Speak the final result summary; failures are non-fatal
async fn speak_summary<S, P>(
    synthesizer: &S,
    player: &P,
    recommendation: &Recommendation,
    language: Language,
    presenter: &Presenter,
) where
    S: SpeechSynthesizer,
    P: AudioPlayer,
{
    let text = format!(
        "{} {}",
        language.result_summary_prefix(),
        recommendation.primary.stream
    );
    let cache_key = result_cache_key(&recommendation.primary.stream);

    match synthesizer.synthesize(&text, language, Some(&cache_key)).await {
        Ok(audio) => {
            if let Err(e) = player.play(&audio).await {
                presenter.warn(&format!("Could not play summary: {}", e));
            }
        }
        Err(e) => presenter.warn(&format!("Could not speak summary: {}", e)),
    }
}

/// Run the full assessment
pub async fn run_assessment(options: AssessmentOptions, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();
    match run_assessment_inner(options, config, &mut presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.stop_spinner();
            presenter.error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run_assessment_inner(
    options: AssessmentOptions,
    config: &AppConfig,
    presenter: &mut Presenter,
) -> Result<(), String> {
    let azure = config.azure_or_default();
    let language = options.language;

    let questions = fetch_questions(&azure, language, presenter).await;
    let mut session = AssessmentSession::new(questions.len(), options.auto_mic);

    // Voice rounds need the speech stack; the summary speaker reuses the
    // same cache directory
    let cache_dir = options
        .cache_dir
        .clone()
        .unwrap_or_else(TtsCache::default_dir);

    let ask = options.voice.then(|| {
        AskQuestionUseCase::new(
            build_synthesizer(&azure, Some(TtsCache::new(cache_dir.clone()))),
            RodioPlayer::new(),
            CpalVoiceRecorder::new(config.vad_config()),
            AzureSpeechRecognizer::new(
                azure.speech_key.clone().unwrap_or_default(),
                azure.speech_region.clone().unwrap_or_default(),
            ),
        )
    });

    loop {
        let index = session.current_question();
        let question = &questions[index];

        presenter.question_progress(index, questions.len());
        presenter.bot_message(&question.text);
        presenter.options_list(question);

        let answered_by_voice = match &ask {
            Some(ask) => voice_round(ask, &mut session, question, language, presenter).await,
            None => false,
        };
        if !answered_by_voice {
            typed_answer(&mut session, question, presenter).await?;
        }

        presenter.user_message(&session.answers()[index].answer);

        match session.advance().map_err(|e| e.to_string())? {
            Some(_) => continue,
            None => break,
        }
    }

    // All questions answered; analyze
    presenter.start_spinner("Analyzing your responses...");
    let analyze = AnalyzeAnswersUseCase::new(build_advisor(&azure));
    let recommendation = match analyze.execute(session.answers(), language).await {
        Ok(rec) => {
            presenter.spinner_success("Analysis complete");
            rec
        }
        Err(e) => {
            presenter.spinner_fail("Analysis failed");
            return Err(e.to_string());
        }
    };

    presenter.recommendation(&recommendation);

    if options.voice {
        let synthesizer = build_synthesizer(&azure, Some(TtsCache::new(cache_dir)));
        speak_summary(&synthesizer, &RodioPlayer::new(), &recommendation, language, presenter)
            .await;
    }

    Ok(())
}

/// Pre-generate spoken prompts for the question bank
pub async fn run_cache_warm(
    languages: Vec<Language>,
    options: AssessmentOptions,
    config: &AppConfig,
) -> ExitCode {
    let presenter = Presenter::new();
    let azure = config.azure_or_default();
    let cache_dir = options.cache_dir.unwrap_or_else(TtsCache::default_dir);

    let mut failures = 0usize;

    for language in languages {
        presenter.info(&format!("Warming prompt cache for {}", language.label()));
        let questions = fetch_questions(&azure, language, &presenter).await;
        let synthesizer = build_synthesizer(&azure, Some(TtsCache::new(cache_dir.clone())));

        for question in &questions {
            let prompt = question.prompt_text(language.option_word());
            match synthesizer
                .synthesize(&prompt, language, Some(&question.prompt_cache_key()))
                .await
            {
                Ok(_) => presenter.success(&format!("question {}", question.id)),
                Err(e) => {
                    failures += 1;
                    presenter.error(&format!("question {}: {}", question.id, e));
                }
            }
        }
    }

    if failures == 0 {
        presenter.success("Cache warm complete");
        ExitCode::from(EXIT_SUCCESS)
    } else {
        presenter.error(&format!("Cache warm finished with {} failures", failures));
        ExitCode::from(EXIT_ERROR)
    }
}
