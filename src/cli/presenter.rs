//! CLI presenter for chat-style output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::assessment::{Question, Recommendation, StreamMatch};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Question progress header
    pub fn question_progress(&self, current: usize, total: usize) {
        println!();
        println!(
            "{}",
            format!("Question {} of {}", current + 1, total).bold()
        );
    }

    /// Chat line spoken by the assistant
    pub fn bot_message(&self, text: &str) {
        println!("{} {}", "●".cyan(), text);
    }

    /// Chat line echoing the user's answer
    pub fn user_message(&self, text: &str) {
        println!("{} {}", "○".green(), text);
    }

    /// Numbered option list
    pub fn options_list(&self, question: &Question) {
        for (index, option) in question.options.iter().enumerate() {
            println!("  {} {}", format!("{}.", index + 1).cyan(), option);
        }
    }

    /// Recognized transcript line
    pub fn transcript(&self, text: &str) {
        eprintln!("{} heard: {}", "✓".green(), text.italic());
    }

    /// Prompt for a typed answer without a trailing newline
    pub fn answer_prompt(&self, option_count: usize) {
        eprint!("Your answer [1-{}]: ", option_count);
        let _ = io::stderr().flush();
    }

    /// Render one ranked result card
    fn result_card(&self, badge: &str, result: &StreamMatch) {
        println!();
        println!(
            "  {}  {} {}",
            badge,
            result.stream.bold(),
            format!("({}% match)", result.match_percentage).cyan()
        );
        for reason in &result.reasons {
            println!("      - {}", reason);
        }
    }

    /// Render the full ranked recommendation
    pub fn recommendation(&self, recommendation: &Recommendation) {
        println!();
        println!("{}", "Your Career Path Recommendations".bold().underline());
        self.result_card(&"🏆 Best Match".yellow().to_string(), &recommendation.primary);
        self.result_card(
            &"🥈 Second Choice".normal().to_string(),
            &recommendation.secondary,
        );
        self.result_card(
            &"🥉 Third Choice".normal().to_string(),
            &recommendation.tertiary,
        );
        println!();
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::rule_based_recommendation;

    // Rendering is write-only; these exercise the formatting paths for
    // panics rather than asserting on terminal bytes

    #[test]
    fn renders_question_and_options() {
        let presenter = Presenter::new();
        let question = crate::domain::assessment::english_questions()
            .into_iter()
            .next()
            .unwrap();
        presenter.question_progress(0, 10);
        presenter.bot_message(&question.text);
        presenter.options_list(&question);
    }

    #[test]
    fn renders_recommendation() {
        let presenter = Presenter::new();
        let rec = rule_based_recommendation(&[]);
        presenter.recommendation(&rec);
    }
}
