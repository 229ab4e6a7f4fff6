//! Deterministic word-playback environment.
//!
//! Plays a fixed word list one word per trial, rendering a one-hot input
//! buffer. Used to probe learned representations outside sentence context:
//! no randomness, no grammar, no roles or fillers. The first tick renders a
//! neutral all-zero buffer, matching the start-tick convention of the
//! sentence environment, and the external loop is responsible for stopping
//! once the list is exhausted.

use ndarray::Array1;

use crate::vocab::Vocabulary;

pub struct ProbeEnv {
    words: Vec<String>,
    vocab: Vocabulary,
    /// Trials taken; 0 before the first `step()`
    trial: usize,
    word_buf: Array1<f32>,
}

impl ProbeEnv {
    /// `words` is the playback order; `vocab` defines the one-hot index
    /// space (normally the same word list the sentence environment uses).
    pub fn new(words: Vec<String>, vocab: Vocabulary) -> Self {
        let word_buf = Array1::zeros(vocab.n_words());
        Self {
            words,
            vocab,
            trial: 0,
            word_buf,
        }
    }

    pub fn init(&mut self, _run: u32) {
        self.trial = 0;
        self.word_buf.fill(0.0);
    }

    /// Advance one trial and render the current word. The buffer is
    /// all-zero on the neutral first tick and once the list runs out.
    pub fn step(&mut self) {
        self.trial += 1;
        self.word_buf.fill(0.0);
        if let Some(word) = self.current_word() {
            if let Some(i) = self.vocab.word_index(word) {
                self.word_buf[i] = 1.0;
            }
        }
    }

    /// Word being probed this trial; None on the neutral first tick and
    /// past the end of the list.
    pub fn current_word(&self) -> Option<&str> {
        if self.trial <= 1 {
            return None;
        }
        self.words.get(self.trial - 2).map(|s| s.as_str())
    }

    pub fn word_buffer(&self) -> &Array1<f32> {
        &self.word_buf
    }

    pub fn trial(&self) -> usize {
        self.trial
    }

    /// Steps needed to play the whole list, neutral tick included
    pub fn total_trials(&self) -> usize {
        self.words.len() + 1
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
