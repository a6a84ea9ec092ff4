//! Voice question round use case

use thiserror::Error;

use crate::domain::assessment::matcher::best_match;
use crate::domain::assessment::{Answer, AssessmentSession, AssessmentState, InvalidStateTransition, Question};
use crate::domain::capture::StopReason;
use crate::domain::language::Language;

use super::ports::{
    AudioPlayer, CaptureError, PlaybackError, RecognitionError, SpeechRecognizer,
    SpeechSynthesizer, SynthesisError, VoiceRecorder,
};

/// Errors from the voice question round
#[derive(Debug, Error)]
pub enum AskError {
    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Recognition failed: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Outcome of a completed voice round
#[derive(Debug, Clone)]
pub struct AskOutcome {
    /// What the recognizer heard
    pub transcript: String,
    /// Index of the matched option
    pub option_index: usize,
    /// Why the capture ended
    pub stop_reason: StopReason,
    /// The recorded answer
    pub answer: Answer,
}

/// Callbacks for status updates during a round
#[derive(Default)]
pub struct AskCallbacks {
    /// Called with the prompt text before playback starts
    pub on_prompt: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when listening starts
    pub on_listening: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the capture ends and recognition starts
    pub on_processing: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called with the transcript once recognized
    pub on_transcript: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

/// One spoken question round: speak the prompt, listen until the
/// voice-activity monitor ends the capture, recognize the transcript,
/// and match it onto an option.
pub struct AskQuestionUseCase<S, P, R, Z>
where
    S: SpeechSynthesizer,
    P: AudioPlayer,
    R: VoiceRecorder,
    Z: SpeechRecognizer,
{
    synthesizer: S,
    player: P,
    recorder: R,
    recognizer: Z,
}

impl<S, P, R, Z> AskQuestionUseCase<S, P, R, Z>
where
    S: SpeechSynthesizer,
    P: AudioPlayer,
    R: VoiceRecorder,
    Z: SpeechRecognizer,
{
    /// Create a new use case instance
    pub fn new(synthesizer: S, player: P, recorder: R, recognizer: Z) -> Self {
        Self {
            synthesizer,
            player,
            recorder,
            recognizer,
        }
    }

    /// Speak the question prompt. Moves the session to LISTENING when
    /// auto-mic is on, otherwise leaves it awaiting a manual action.
    pub async fn speak_prompt(
        &self,
        session: &mut AssessmentSession,
        question: &Question,
        language: Language,
        callbacks: &AskCallbacks,
    ) -> Result<AssessmentState, AskError> {
        session.start_question()?;

        let prompt = question.prompt_text(language.option_word());
        if let Some(ref cb) = callbacks.on_prompt {
            cb(&prompt);
        }

        let audio = self
            .synthesizer
            .synthesize(&prompt, language, Some(&question.prompt_cache_key()))
            .await?;
        self.player.play(&audio).await?;

        Ok(session.playback_ended()?)
    }

    /// Record one spoken answer and match it onto an option. Requires
    /// the session to be LISTENING.
    pub async fn capture_answer(
        &self,
        session: &mut AssessmentSession,
        question: &Question,
        language: Language,
        callbacks: &AskCallbacks,
    ) -> Result<AskOutcome, AskError> {
        if let Some(ref cb) = callbacks.on_listening {
            cb();
        }

        self.recorder.start().await?;
        let stop_reason = self.recorder.auto_stopped().await;
        session.silence_detected()?;

        if let Some(ref cb) = callbacks.on_processing {
            cb();
        }

        let audio = self
            .recorder
            .stop()
            .await?
            .ok_or_else(|| CaptureError::CaptureFailed("capture ended with no audio".into()))?;

        let transcript = self.recognizer.recognize(&audio, language).await?;

        if let Some(ref cb) = callbacks.on_transcript {
            cb(&transcript);
        }

        let option_index = best_match(&transcript, &question.options);
        let answer = Answer::chosen(question, option_index).ok_or_else(|| {
            AskError::Recognition(RecognitionError::ParseError(
                "matched option out of range".into(),
            ))
        })?;
        session.select_option(answer.clone())?;

        Ok(AskOutcome {
            transcript,
            option_index,
            stop_reason,
            answer,
        })
    }

    /// Run a full auto-mic round: prompt, listen, recognize, match.
    pub async fn execute(
        &self,
        session: &mut AssessmentSession,
        question: &Question,
        language: Language,
        callbacks: &AskCallbacks,
    ) -> Result<AskOutcome, AskError> {
        let state = self
            .speak_prompt(session, question, language, callbacks)
            .await?;
        if state != AssessmentState::Listening {
            session.begin_listening()?;
        }
        self.capture_answer(session, question, language, callbacks)
            .await
    }
}
