//! CareerScout - voice-enabled CSE career path assessment CLI
//!
//! This crate asks a fixed set of career-assessment questions aloud,
//! records spoken answers with voice-activity auto-stop, transcribes
//! them through Azure Speech, matches each transcript onto one of the
//! question's options, and produces a ranked stream recommendation.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Questions, answers, option matching, recommendation
//!   scoring, PCM/WAV encoding, and the voice-activity state machine
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, Azure
//!   Speech / Translator / OpenAI, config storage)
//! - **CLI**: Command-line interface, argument parsing, and output

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
