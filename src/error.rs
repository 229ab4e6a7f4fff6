//! Error types for the stimulus environments
//!
//! Vocabulary-lookup misses are recoverable and governed by [`LookupPolicy`];
//! structural problems (too-short sentences, empty or unparseable corpora)
//! are always fatal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trial::Channel;

/// Result type alias for environment operations
pub type EnvResult<T> = Result<T, EnvError>;

/// Error type for sentence and probe environments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// A word, role, or filler is absent from its vocabulary table.
    /// The affected one-hot channel renders all-zero.
    UnknownToken {
        channel: Channel,
        token: String,
        sentence: String,
    },

    /// A sequence builder needed a slot value the grammar never assigned
    MissingSlot { role: String, sentence: String },

    /// The sentence source produced fewer than three content tokens
    ShortSentence { tokens: Vec<String> },

    /// A scripted source was constructed with no sentences
    EmptyCorpus,

    /// A pinned-corpus text block could not be parsed
    CorpusParse { line: usize, message: String },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::UnknownToken {
                channel,
                token,
                sentence,
            } => write!(
                f,
                "unknown {} '{}' in sentence: {}",
                channel, token, sentence
            ),
            EnvError::MissingSlot { role, sentence } => {
                write!(f, "no filler assigned for role '{}' in sentence: {}", role, sentence)
            }
            EnvError::ShortSentence { tokens } => write!(
                f,
                "sentence has {} content tokens, need at least 3: {}",
                tokens.len(),
                tokens.join(" ")
            ),
            EnvError::EmptyCorpus => write!(f, "scripted source has no sentences"),
            EnvError::CorpusParse { line, message } => {
                write!(f, "corpus parse error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for EnvError {}

/// Strictness level for vocabulary-lookup misses.
///
/// Long unattended training runs want `LogAndContinue` (a miss degrades to
/// an all-zero channel and is collected for inspection); test grammars want
/// `FailFast` so mistakes surface on the first bad tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Collect the miss, render the channel all-zero, keep stepping
    LogAndContinue,
    /// Return the miss as an error from `step()`
    FailFast,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        LookupPolicy::LogAndContinue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_display_names_channel_and_sentence() {
        let err = EnvError::UnknownToken {
            channel: Channel::Filler,
            token: "Koolaid".to_string(),
            sentence: "schoolgirl stirred koolaid".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("filler"));
        assert!(text.contains("Koolaid"));
        assert!(text.contains("schoolgirl stirred koolaid"));
    }

    #[test]
    fn lookup_policy_parses_from_snake_case() {
        let policy: LookupPolicy = serde_json::from_str("\"fail_fast\"").unwrap();
        assert_eq!(policy, LookupPolicy::FailFast);
        assert_eq!(LookupPolicy::default(), LookupPolicy::LogAndContinue);
    }
}
