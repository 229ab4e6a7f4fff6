//! Trial tuples — the atomic unit of environment output.
//!
//! Each tick presents one word on the input and poses one role query; the
//! tuple carries the expected filler and whether the query probes the word
//! just shown (`curq`) or an earlier one (`revq`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which one-hot channel a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Word,
    Role,
    Filler,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Word => write!(f, "word"),
            Channel::Role => write!(f, "role"),
            Channel::Filler => write!(f, "filler"),
        }
    }
}

/// Whether the current query probes the word just presented or an earlier one.
///
/// The training loop clamps the filler layer as a hard target on `Current`
/// questions and lets it free-run for comparison on `Review` questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// "curq" — question about the role filled by the word just presented
    #[serde(rename = "curq")]
    Current,
    /// "revq" — review question about a role filled earlier in the sentence
    #[serde(rename = "revq")]
    Review,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Current => "curq",
            QuestionType::Review => "revq",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tick of environment output: input word, queried role, expected filler,
/// and the question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub word: String,
    pub role: String,
    pub filler: String,
    pub question: QuestionType,
}

impl Trial {
    pub fn new(word: &str, role: &str, filler: &str, question: QuestionType) -> Self {
        Self {
            word: word.to_string(),
            role: role.to_string(),
            filler: filler.to_string(),
            question,
        }
    }

    /// Human-readable `word role=filler status` line for logging
    pub fn trace(&self) -> String {
        format!("{} {}={} {}", self.word, self.role, self.filler, self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_strings_match_wire_names() {
        assert_eq!(QuestionType::Current.as_str(), "curq");
        assert_eq!(QuestionType::Review.as_str(), "revq");
    }

    #[test]
    fn trace_formats_word_role_filler_status() {
        let t = Trial::new("stirred", "Action", "Stirred", QuestionType::Current);
        assert_eq!(t.trace(), "stirred Action=Stirred curq");
    }

    #[test]
    fn trial_round_trips_through_json() {
        let t = Trial::new("start", "Action", "None", QuestionType::Current);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"curq\""));
        let back: Trial = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
