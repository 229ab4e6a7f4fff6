//! JSON line-delimited logging for environment runs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::env::SentenceEnv;
use crate::error::EnvError;
use crate::trial::Channel;

fn log_dir() -> io::Result<()> {
    fs::create_dir_all("logs")
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Serialize)]
pub struct TrialLogEntry {
    pub trial: usize,
    pub sequence: usize,
    pub tick: usize,
    pub trace: String,
    pub question: String,
    pub timestamp_ms: u128,
}

impl TrialLogEntry {
    pub fn from_env(env: &SentenceEnv) -> Self {
        Self {
            trial: env.trial(),
            sequence: env.sequence(),
            tick: env.tick(),
            trace: env.trace(),
            question: env.question_type().to_string(),
            timestamp_ms: timestamp_ms(),
        }
    }
}

/// Append the current tick to `logs/trials.jsonl`.
pub fn log_trial(env: &SentenceEnv) -> io::Result<()> {
    log_dir()?;
    append_json_line("logs/trials.jsonl", &TrialLogEntry::from_env(env))
}

#[derive(Debug, Serialize)]
pub struct SentenceLogEntry {
    pub sequence: usize,
    pub sentence: String,
    pub passive: bool,
    pub ambiguous_nouns: usize,
    pub ambiguous_verbs: usize,
    pub timestamp_ms: u128,
}

impl SentenceLogEntry {
    pub fn from_env(env: &SentenceEnv) -> Self {
        Self {
            sequence: env.sequence(),
            sentence: env.sentence(),
            passive: env.is_passive(),
            ambiguous_nouns: env.ambiguous_nouns(),
            ambiguous_verbs: env.ambiguous_verbs(),
            timestamp_ms: timestamp_ms(),
        }
    }
}

/// Append the current sentence to `logs/sentences.jsonl`.
pub fn log_sentence(env: &SentenceEnv) -> io::Result<()> {
    log_dir()?;
    append_json_line("logs/sentences.jsonl", &SentenceLogEntry::from_env(env))
}

#[derive(Debug, Serialize)]
pub struct LookupMissLogEntry {
    pub channel: Channel,
    pub token: String,
    pub sentence: String,
    pub timestamp_ms: u128,
}

/// Append a vocabulary-lookup miss to `logs/lookup_misses.jsonl`.
/// Non-miss errors are passed through unlogged.
pub fn log_lookup_miss(err: &EnvError) -> io::Result<()> {
    if let EnvError::UnknownToken {
        channel,
        token,
        sentence,
    } = err
    {
        log_dir()?;
        let entry = LookupMissLogEntry {
            channel: *channel,
            token: token.clone(),
            sentence: sentence.clone(),
            timestamp_ms: timestamp_ms(),
        };
        append_json_line("logs/lookup_misses.jsonl", &entry)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_miss_entry_serializes_channel_name() {
        let entry = LookupMissLogEntry {
            channel: Channel::Role,
            token: "Instrument".to_string(),
            sentence: "schoolgirl stirred koolaid".to_string(),
            timestamp_ms: 0,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"channel\":\"role\""));
        assert!(json.contains("Instrument"));
    }
}
