//! Assessment session state machine

use std::fmt;
use thiserror::Error;

use super::answer::Answer;

/// Assessment states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssessmentState {
    #[default]
    Idle,
    PlayingPrompt,
    Listening,
    Processing,
    AwaitingNextQuestion,
}

impl AssessmentState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PlayingPrompt => "playing-prompt",
            Self::Listening => "listening",
            Self::Processing => "processing",
            Self::AwaitingNextQuestion => "awaiting-next-question",
        }
    }
}

impl fmt::Display for AssessmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: AssessmentState,
    pub action: String,
}

/// Assessment session entity.
///
/// Owns the question cursor, the recorded answers, and the auto-mic
/// preference (fixed at session start), and guards the event-driven
/// state transitions:
///
///   IDLE | AWAITING_NEXT_QUESTION -> PLAYING_PROMPT  (start_question)
///   PLAYING_PROMPT -> LISTENING                      (playback_ended, auto-mic)
///   PLAYING_PROMPT | PROCESSING -> LISTENING          (begin_listening)
///   LISTENING -> PROCESSING                           (silence_detected)
///   PLAYING_PROMPT | LISTENING | PROCESSING
///       -> AWAITING_NEXT_QUESTION                     (select_option)
///   AWAITING_NEXT_QUESTION -> PLAYING_PROMPT | IDLE   (advance)
#[derive(Debug)]
pub struct AssessmentSession {
    state: AssessmentState,
    current_question: usize,
    total_questions: usize,
    answers: Vec<Answer>,
    auto_mic: bool,
}

impl AssessmentSession {
    /// Create an idle session over a fixed number of questions
    pub fn new(total_questions: usize, auto_mic: bool) -> Self {
        Self {
            state: AssessmentState::Idle,
            current_question: 0,
            total_questions,
            answers: Vec::with_capacity(total_questions),
            auto_mic,
        }
    }

    /// Get the current state
    pub fn state(&self) -> AssessmentState {
        self.state
    }

    /// Zero-based index of the question currently being asked
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Total number of questions in the assessment
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// Answers recorded so far, in question order
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Whether listening starts automatically after prompt playback
    pub fn auto_mic(&self) -> bool {
        self.auto_mic
    }

    /// Whether every question has been answered
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.total_questions
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }

    /// Begin presenting the current question
    pub fn start_question(&mut self) -> Result<(), InvalidStateTransition> {
        match self.state {
            AssessmentState::Idle | AssessmentState::AwaitingNextQuestion => {
                self.state = AssessmentState::PlayingPrompt;
                Ok(())
            }
            _ => Err(self.invalid("start question")),
        }
    }

    /// Prompt playback finished. With auto-mic the session moves to
    /// LISTENING; otherwise it stays in PLAYING_PROMPT awaiting a manual
    /// action.
    pub fn playback_ended(&mut self) -> Result<AssessmentState, InvalidStateTransition> {
        if self.state != AssessmentState::PlayingPrompt {
            return Err(self.invalid("end playback"));
        }
        if self.auto_mic {
            self.state = AssessmentState::Listening;
        }
        Ok(self.state)
    }

    /// Manually start listening (mic tap, or retry after a failed
    /// recognition)
    pub fn begin_listening(&mut self) -> Result<(), InvalidStateTransition> {
        match self.state {
            AssessmentState::PlayingPrompt | AssessmentState::Processing => {
                self.state = AssessmentState::Listening;
                Ok(())
            }
            _ => Err(self.invalid("begin listening")),
        }
    }

    /// The voice-activity monitor ended the capture
    pub fn silence_detected(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != AssessmentState::Listening {
            return Err(self.invalid("process silence"));
        }
        self.state = AssessmentState::Processing;
        Ok(())
    }

    /// Record the chosen option for the current question. Valid from any
    /// active question state, so a manual selection can interrupt prompt
    /// playback or an in-flight recognition.
    pub fn select_option(&mut self, answer: Answer) -> Result<(), InvalidStateTransition> {
        match self.state {
            AssessmentState::PlayingPrompt
            | AssessmentState::Listening
            | AssessmentState::Processing => {
                if self.current_question < self.answers.len() {
                    self.answers[self.current_question] = answer;
                } else {
                    self.answers.push(answer);
                }
                self.state = AssessmentState::AwaitingNextQuestion;
                Ok(())
            }
            _ => Err(self.invalid("select option")),
        }
    }

    /// Move to the next question, or back to IDLE when the assessment is
    /// complete. Returns the next question index while questions remain.
    pub fn advance(&mut self) -> Result<Option<usize>, InvalidStateTransition> {
        if self.state != AssessmentState::AwaitingNextQuestion {
            return Err(self.invalid("advance"));
        }
        if self.current_question + 1 < self.total_questions {
            self.current_question += 1;
            self.state = AssessmentState::PlayingPrompt;
            Ok(Some(self.current_question))
        } else {
            self.state = AssessmentState::Idle;
            Ok(None)
        }
    }

    /// Reset for a retake: clears answers and returns to the first
    /// question
    pub fn reset(&mut self) {
        self.state = AssessmentState::Idle;
        self.current_question = 0;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(index: usize) -> Answer {
        Answer {
            question_id: index as u32 + 1,
            question: format!("question {}", index + 1),
            answer: format!("option {}", index),
            answer_index: index,
        }
    }

    #[test]
    fn new_session_is_idle() {
        let session = AssessmentSession::new(10, true);
        assert_eq!(session.state(), AssessmentState::Idle);
        assert_eq!(session.current_question(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.is_complete());
    }

    #[test]
    fn auto_mic_moves_to_listening_after_playback() {
        let mut session = AssessmentSession::new(2, true);
        session.start_question().unwrap();
        assert_eq!(session.state(), AssessmentState::PlayingPrompt);
        let state = session.playback_ended().unwrap();
        assert_eq!(state, AssessmentState::Listening);
    }

    #[test]
    fn manual_mic_stays_in_prompt_after_playback() {
        let mut session = AssessmentSession::new(2, false);
        session.start_question().unwrap();
        let state = session.playback_ended().unwrap();
        assert_eq!(state, AssessmentState::PlayingPrompt);
    }

    #[test]
    fn full_voice_round() {
        let mut session = AssessmentSession::new(2, true);
        session.start_question().unwrap();
        session.playback_ended().unwrap();
        session.silence_detected().unwrap();
        assert_eq!(session.state(), AssessmentState::Processing);
        session.select_option(answer(0)).unwrap();
        assert_eq!(session.state(), AssessmentState::AwaitingNextQuestion);
        assert_eq!(session.advance().unwrap(), Some(1));
        assert_eq!(session.state(), AssessmentState::PlayingPrompt);
    }

    #[test]
    fn selection_can_interrupt_playback() {
        let mut session = AssessmentSession::new(2, true);
        session.start_question().unwrap();
        session.select_option(answer(0)).unwrap();
        assert_eq!(session.state(), AssessmentState::AwaitingNextQuestion);
    }

    #[test]
    fn retry_listening_after_failed_recognition() {
        let mut session = AssessmentSession::new(1, true);
        session.start_question().unwrap();
        session.playback_ended().unwrap();
        session.silence_detected().unwrap();
        // Recognition failed; go back to listening
        session.begin_listening().unwrap();
        assert_eq!(session.state(), AssessmentState::Listening);
    }

    #[test]
    fn advance_past_last_question_returns_to_idle() {
        let mut session = AssessmentSession::new(1, true);
        session.start_question().unwrap();
        session.select_option(answer(0)).unwrap();
        assert_eq!(session.advance().unwrap(), None);
        assert_eq!(session.state(), AssessmentState::Idle);
        assert!(session.is_complete());
    }

    #[test]
    fn re_answering_replaces_previous_answer() {
        let mut session = AssessmentSession::new(1, true);
        session.start_question().unwrap();
        session.select_option(answer(0)).unwrap();
        // Ask the same question again (retake-style) and pick differently
        session.start_question().unwrap();
        session.select_option(answer(3)).unwrap();
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.answers()[0].answer_index, 3);
    }

    #[test]
    fn silence_from_idle_fails() {
        let mut session = AssessmentSession::new(1, true);
        let err = session.silence_detected().unwrap_err();
        assert_eq!(err.current_state, AssessmentState::Idle);
        assert!(err.to_string().contains("process silence"));
    }

    #[test]
    fn start_question_while_listening_fails() {
        let mut session = AssessmentSession::new(1, true);
        session.start_question().unwrap();
        session.playback_ended().unwrap();
        let err = session.start_question().unwrap_err();
        assert_eq!(err.current_state, AssessmentState::Listening);
    }

    #[test]
    fn advance_before_answer_fails() {
        let mut session = AssessmentSession::new(1, true);
        session.start_question().unwrap();
        assert!(session.advance().is_err());
    }

    #[test]
    fn reset_clears_answers_and_cursor() {
        let mut session = AssessmentSession::new(2, true);
        session.start_question().unwrap();
        session.select_option(answer(0)).unwrap();
        session.advance().unwrap();
        session.reset();
        assert_eq!(session.state(), AssessmentState::Idle);
        assert_eq!(session.current_question(), 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn state_display() {
        assert_eq!(AssessmentState::Idle.to_string(), "idle");
        assert_eq!(AssessmentState::Listening.to_string(), "listening");
        assert_eq!(
            AssessmentState::AwaitingNextQuestion.to_string(),
            "awaiting-next-question"
        );
    }
}
