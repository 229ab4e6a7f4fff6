//! # Gestalt Env
//!
//! Deterministic stimulus generation and question-sequencing environments
//! for sentence-gestalt cognitive simulations. A sentence environment
//! expands each generated sentence into an ordered sequence of
//! (word, role-query, expected-filler, question-type) trials — including
//! passive-voice reordering and interleaved review questions — and renders
//! the current trial into one-hot activation buffers that a training loop
//! applies to its network layers, one `step()` per time tick.
//!
//! ## Quick Start
//!
//! ```rust
//! use gestalt_env::{EnvConfig, ScriptedSource, SentenceEnv, VocabTables, Vocabulary};
//!
//! let corpus = "\
//! busdriver ate steak
//! Agent = BusDriver
//! Action = Ate
//! Patient = Steak
//! ";
//! let vocab = Vocabulary::new(VocabTables {
//!     words: ["start", "was", "by", "busdriver", "ate", "steak"]
//!         .map(String::from)
//!         .to_vec(),
//!     roles: ["Agent", "Action", "Patient"].map(String::from).to_vec(),
//!     fillers: ["None", "BusDriver", "Ate", "Steak"].map(String::from).to_vec(),
//!     ..VocabTables::default()
//! });
//! let config = EnvConfig {
//!     passive_prob: 0.0,
//!     ..EnvConfig::default()
//! };
//! let source = ScriptedSource::parse(corpus).unwrap();
//! let mut env = SentenceEnv::new(config, vocab, Box::new(source));
//!
//! env.step().unwrap();
//! assert_eq!(env.trace(), "start Action=None curq");
//! env.step().unwrap();
//! assert_eq!(env.trace(), "busdriver Agent=BusDriver curq");
//! assert_eq!(env.word_buffer().sum(), 1.0);
//! ```
//!
//! ## Core Modules
//!
//! - [`config`] - Environment configuration via TOML
//! - [`vocab`] - Vocabulary tables and one-hot index maps
//! - [`source`] - Sentence sources, including the pinned test-corpus mode
//! - [`env`] - The sentence and probe environments
//! - [`logging`] - JSON line-delimited logging

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod slots;
pub mod source;
pub mod trial;
pub mod vocab;

pub use config::{ConfigError, EnvConfig};
pub use env::{ProbeEnv, SentenceEnv};
pub use error::{EnvError, EnvResult, LookupPolicy};
pub use slots::SlotFrame;
pub use source::{GeneratedSentence, ScriptedSource, SentenceSource};
pub use trial::{Channel, QuestionType, Trial};
pub use vocab::{VocabTables, Vocabulary};
