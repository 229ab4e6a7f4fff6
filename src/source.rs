//! Sentence sources — the boundary to the grammar engine.
//!
//! `SentenceSource` is what the environment consumes: one call, one
//! sentence's content tokens plus its role→filler slot map. The stochastic
//! grammar expander lives behind this trait as an external collaborator;
//! `ScriptedSource` implements the fully pinned test-corpus mode, where
//! every slot value (including `Case` and `FinalQ`) is fixed per sentence
//! and overrides random generation transparently.

use std::collections::HashMap;

use crate::error::{EnvError, EnvResult};

/// One generated sentence: ordered content tokens and the grammar's
/// role→filler assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSentence {
    pub tokens: Vec<String>,
    pub slots: HashMap<String, String>,
}

/// Producer of sentences for a [`SentenceEnv`](crate::SentenceEnv).
pub trait SentenceSource {
    /// Produce the next sentence.
    fn generate(&mut self) -> EnvResult<GeneratedSentence>;

    /// Reset for a fresh run. Sources with no positional state ignore this.
    fn reset(&mut self, _run: u32) {}
}

/// Fixed, ordered sentence list, cycled endlessly.
///
/// Used for scripted test corpora: each sentence pins every slot value, so
/// voice and final-question choices are deterministic through the ordinary
/// `Case`/`FinalQ` checks.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    sentences: Vec<GeneratedSentence>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(sentences: Vec<GeneratedSentence>) -> EnvResult<Self> {
        if sentences.is_empty() {
            return Err(EnvError::EmptyCorpus);
        }
        Ok(Self {
            sentences,
            cursor: 0,
        })
    }

    /// Parse a pinned corpus from its plain-text block format.
    ///
    /// Blocks are separated by blank lines. The first line of a block is the
    /// whitespace-separated token list; each following line is a
    /// `Role = Filler` slot assignment. `#` starts a comment line.
    ///
    /// ```text
    /// # forced-passive test sentence
    /// schoolgirl stirred koolaid spoon
    /// Agent = Schoolgirl
    /// Action = Stirred
    /// Patient = Koolaid
    /// Mod = Instrument
    /// Instrument = Spoon
    /// Case = Passive
    /// ```
    pub fn parse(text: &str) -> EnvResult<Self> {
        let mut sentences = Vec::new();
        let mut current: Option<GeneratedSentence> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                if let Some(sent) = current.take() {
                    sentences.push(sent);
                }
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let sent = current.as_mut().ok_or(EnvError::CorpusParse {
                    line: idx + 1,
                    message: "slot assignment before any token line".to_string(),
                })?;
                let key = key.trim();
                let value = value.trim();
                if key.is_empty() || value.is_empty() {
                    return Err(EnvError::CorpusParse {
                        line: idx + 1,
                        message: format!("malformed slot assignment '{}'", line),
                    });
                }
                sent.slots.insert(key.to_string(), value.to_string());
            } else {
                if current.is_some() {
                    return Err(EnvError::CorpusParse {
                        line: idx + 1,
                        message: "second token line in block, missing blank separator".to_string(),
                    });
                }
                current = Some(GeneratedSentence {
                    tokens: line.split_whitespace().map(str::to_string).collect(),
                    slots: HashMap::new(),
                });
            }
        }
        if let Some(sent) = current.take() {
            sentences.push(sent);
        }
        Self::new(sentences)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl SentenceSource for ScriptedSource {
    fn generate(&mut self) -> EnvResult<GeneratedSentence> {
        let sent = self.sentences[self.cursor % self.sentences.len()].clone();
        self.cursor += 1;
        Ok(sent)
    }

    fn reset(&mut self, _run: u32) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "\
# pinned corpus
schoolgirl stirred koolaid spoon
Agent = Schoolgirl
Action = Stirred
Patient = Koolaid
Mod = Instrument
Instrument = Spoon
FinalQ = Patient

busdriver ate steak
Agent = BusDriver
Action = Ate
Patient = Steak
Case = Passive
";

    #[test]
    fn parse_splits_blocks_and_slots() {
        let source = ScriptedSource::parse(CORPUS).unwrap();
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn generate_cycles_in_order() {
        let mut source = ScriptedSource::parse(CORPUS).unwrap();
        let first = source.generate().unwrap();
        assert_eq!(first.tokens[0], "schoolgirl");
        assert_eq!(first.slots.get("FinalQ").map(String::as_str), Some("Patient"));
        let second = source.generate().unwrap();
        assert_eq!(second.tokens.len(), 3);
        assert_eq!(second.slots.get("Case").map(String::as_str), Some("Passive"));
        // wraps around
        let third = source.generate().unwrap();
        assert_eq!(third, first);
    }

    #[test]
    fn reset_rewinds_the_cursor() {
        let mut source = ScriptedSource::parse(CORPUS).unwrap();
        let first = source.generate().unwrap();
        source.generate().unwrap();
        source.reset(0);
        assert_eq!(source.generate().unwrap(), first);
    }

    #[test]
    fn parse_rejects_slot_before_tokens() {
        let err = ScriptedSource::parse("Agent = Schoolgirl\n").unwrap_err();
        assert!(matches!(err, EnvError::CorpusParse { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_empty_corpus() {
        let err = ScriptedSource::parse("# nothing here\n").unwrap_err();
        assert_eq!(err, EnvError::EmptyCorpus);
    }
}
