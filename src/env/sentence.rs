//! Grammar-driven sentence environment.
//!
//! Each `step()` presents one word on the input and poses one role query.
//! When the current sentence's trial sequence is exhausted, a new sentence
//! is drawn from the source, rendered in active or passive voice, and
//! unrolled into a fresh sequence of [`Trial`] tuples with interleaved
//! review questions. Generation is unbounded; the training loop owns the
//! stopping condition.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EnvConfig;
use crate::error::{EnvError, EnvResult, LookupPolicy};
use crate::slots::SlotFrame;
use crate::source::SentenceSource;
use crate::trial::{Channel, QuestionType, Trial};
use crate::vocab::Vocabulary;

/// The three core roles; mid-sentence and fallback review questions draw
/// uniformly from these.
const CORE_ROLES: [&str; 3] = ["Agent", "Action", "Patient"];

/// Sentence generation and question-sequencing environment.
///
/// Owns its counters, one-hot buffers, and an injected seeded random source,
/// so each execution mode (train/test/validate) gets an independent,
/// reproducible instance.
pub struct SentenceEnv {
    config: EnvConfig,
    vocab: Vocabulary,
    source: Box<dyn SentenceSource>,
    rng: StdRng,

    /// Content tokens in generated (active) order
    tokens: Vec<String>,
    /// Tokens in surface order, with "was"/"by" markers for passive sentences
    surface: Vec<String>,
    frame: SlotFrame,
    passive: bool,
    tuples: Vec<Trial>,
    /// None = no sentence in progress
    tuple_idx: Option<usize>,

    seq: usize,
    tick: usize,
    trial: usize,

    word_buf: Array1<f32>,
    role_buf: Array1<f32>,
    filler_buf: Array1<f32>,
    question: QuestionType,

    ambig_nouns: usize,
    ambig_verbs: usize,
    lookup_errors: Vec<EnvError>,
}

impl SentenceEnv {
    pub fn new(config: EnvConfig, vocab: Vocabulary, source: Box<dyn SentenceSource>) -> Self {
        let word_buf = Array1::zeros(vocab.n_words());
        let role_buf = Array1::zeros(vocab.n_roles());
        let filler_buf = Array1::zeros(vocab.n_fillers());
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            vocab,
            source,
            rng,
            tokens: Vec::new(),
            surface: Vec::new(),
            frame: SlotFrame::default(),
            passive: false,
            tuples: Vec::new(),
            tuple_idx: None,
            seq: 0,
            tick: 0,
            trial: 0,
            word_buf,
            role_buf,
            filler_buf,
            question: QuestionType::Current,
            ambig_nouns: 0,
            ambig_verbs: 0,
            lookup_errors: Vec::new(),
        }
    }

    /// Reset all counters and buffers and reseed for the given run. Two
    /// instances initialized with the same run produce identical streams.
    pub fn init(&mut self, run: u32) {
        self.rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(run as u64));
        self.source.reset(run);
        self.tokens.clear();
        self.surface.clear();
        self.frame = SlotFrame::default();
        self.passive = false;
        self.tuples.clear();
        self.tuple_idx = None;
        self.seq = 0;
        self.tick = 0;
        self.trial = 0;
        self.word_buf.fill(0.0);
        self.role_buf.fill(0.0);
        self.filler_buf.fill(0.0);
        self.question = QuestionType::Current;
        self.ambig_nouns = 0;
        self.ambig_verbs = 0;
        self.lookup_errors.clear();
    }

    /// Advance one tick: move to the next queued trial (generating a new
    /// sentence when the current one is exhausted) and render it into the
    /// one-hot buffers.
    pub fn step(&mut self) -> EnvResult<()> {
        let idx = match self.tuple_idx {
            None => {
                self.next_sentence()?;
                0
            }
            Some(i) => {
                let next = i + 1;
                if next >= self.tuples.len() {
                    self.next_sentence()?;
                    self.seq += 1;
                    0
                } else {
                    next
                }
            }
        };
        self.tuple_idx = Some(idx);
        self.render(idx)?;
        self.trial += 1;
        if idx == 0 {
            self.tick = 0;
        } else {
            self.tick += 1;
        }
        Ok(())
    }

    fn next_sentence(&mut self) -> EnvResult<()> {
        let sent = self.source.generate()?;
        if sent.tokens.len() < 3 {
            return Err(EnvError::ShortSentence {
                tokens: sent.tokens,
            });
        }
        self.frame = SlotFrame::from_map(&sent.slots);
        self.tokens = sent.tokens;
        self.count_ambiguity();

        self.passive = match &self.frame.case {
            Some(case) => case == "Passive",
            None => self.rng.gen::<f64>() < self.config.passive_prob,
        };

        self.surface = if self.passive {
            let mut surf = vec![
                self.tokens[2].clone(),
                "was".to_string(),
                self.tokens[1].clone(),
                "by".to_string(),
                self.tokens[0].clone(),
            ];
            surf.extend(self.tokens[3..].iter().cloned());
            surf
        } else {
            self.tokens.clone()
        };

        self.tuples.clear();
        if self.passive {
            self.build_passive()
        } else {
            self.build_active()
        }
    }

    /// Translate each token, then count membership in the ambiguity tables.
    fn count_ambiguity(&mut self) {
        self.ambig_nouns = 0;
        self.ambig_verbs = 0;
        for token in &self.tokens {
            let word = self.vocab.translate(token);
            if self.vocab.is_ambiguous_noun(word) {
                self.ambig_nouns += 1;
            }
            if self.vocab.is_ambiguous_verb(word) {
                self.ambig_verbs += 1;
            }
        }
    }

    /// Active surface order: Agent, Action, Patient, then modifier tokens.
    ///
    /// The two fixed review questions at positions 1 and 2 are deliberate
    /// probes, not random: the network needs them to learn to retain
    /// early-sentence information.
    fn build_active(&mut self) -> EnvResult<()> {
        self.push_marker("start", "Action", "None", QuestionType::Current);
        for pos in 0..3 {
            self.push_token(pos, CORE_ROLES[pos], QuestionType::Current)?;
            match pos {
                1 => self.push_token(0, "Agent", QuestionType::Review)?,
                2 => self.push_token(1, "Action", QuestionType::Review)?,
                _ => {}
            }
        }
        let slen = self.tokens.len();
        if slen == 3 {
            return Ok(());
        }
        for pos in 3..slen - 1 {
            let role = CORE_ROLES[self.rng.gen_range(0..3)];
            self.push_token(pos, role, QuestionType::Review)?;
        }
        let last = slen - 1;
        let mod_role = self.frame.modifier.clone().unwrap_or_default();
        self.push_token(last, &mod_role, QuestionType::Current)?;
        match self.frame.final_q.clone() {
            Some(pinned) => self.push_token(last, &pinned, QuestionType::Review)?,
            None => {
                let role = CORE_ROLES[self.rng.gen_range(0..3)];
                self.push_token(last, role, QuestionType::Review)?;
            }
        }
        Ok(())
    }

    /// Passive surface order: Patient, "was", Action, "by", Agent, then the
    /// same trailing modifier logic as the active form.
    fn build_passive(&mut self) -> EnvResult<()> {
        self.push_marker("start", "Action", "None", QuestionType::Current);
        self.push_token(2, "Patient", QuestionType::Current)?;
        let patient = self.filler("Patient")?;
        self.push_marker("was", "Patient", &patient, QuestionType::Review);
        self.push_token(1, "Action", QuestionType::Current)?;
        let action = self.filler("Action")?;
        self.push_marker("by", "Action", &action, QuestionType::Review);
        self.push_token(0, "Agent", QuestionType::Current)?;

        let slen = self.tokens.len();
        if slen == 3 {
            return Ok(());
        }
        for pos in 3..slen - 1 {
            let role = CORE_ROLES[self.rng.gen_range(0..3)];
            self.push_token(pos, role, QuestionType::Review)?;
        }
        let last = slen - 1;
        let mod_role = self.frame.modifier.clone().unwrap_or_default();
        self.push_token(last, &mod_role, QuestionType::Current)?;
        // NOTE: the final question here always draws a random core role and
        // ignores a pinned FinalQ, unlike the active form. Suspect, but kept
        // as-is for compatibility with existing trained weights.
        let role = CORE_ROLES[self.rng.gen_range(0..3)];
        self.push_token(last, role, QuestionType::Review)?;
        Ok(())
    }

    /// Queue a trial presenting the token at `pos`, querying `role`.
    fn push_token(&mut self, pos: usize, role: &str, question: QuestionType) -> EnvResult<()> {
        let word = self.vocab.translate(&self.tokens[pos]).to_string();
        let filler = self.filler(role)?;
        self.tuples.push(Trial {
            word,
            role: role.to_string(),
            filler,
            question,
        });
        Ok(())
    }

    /// Queue a synthetic trial whose word is a syntactic marker rather than
    /// a sentence token.
    fn push_marker(&mut self, word: &str, role: &str, filler: &str, question: QuestionType) {
        self.tuples.push(Trial::new(word, role, filler, question));
    }

    fn filler(&mut self, role: &str) -> EnvResult<String> {
        if let Some(value) = self.frame.filler_for(role) {
            return Ok(value.to_string());
        }
        let err = EnvError::MissingSlot {
            role: role.to_string(),
            sentence: self.tokens.join(" "),
        };
        self.report(err)?;
        Ok(String::new())
    }

    /// Zero the buffers and set the single active index per channel.
    fn render(&mut self, idx: usize) -> EnvResult<()> {
        self.word_buf.fill(0.0);
        self.role_buf.fill(0.0);
        self.filler_buf.fill(0.0);
        let trial = self.tuples[idx].clone();
        self.question = trial.question;
        match self.vocab.word_index(&trial.word) {
            Some(i) => self.word_buf[i] = 1.0,
            None => self.miss(Channel::Word, &trial.word)?,
        }
        match self.vocab.role_index(&trial.role) {
            Some(i) => self.role_buf[i] = 1.0,
            None => self.miss(Channel::Role, &trial.role)?,
        }
        match self.vocab.filler_index(&trial.filler) {
            Some(i) => self.filler_buf[i] = 1.0,
            None => self.miss(Channel::Filler, &trial.filler)?,
        }
        Ok(())
    }

    fn miss(&mut self, channel: Channel, token: &str) -> EnvResult<()> {
        let err = EnvError::UnknownToken {
            channel,
            token: token.to_string(),
            sentence: self.surface.join(" "),
        };
        self.report(err)
    }

    fn report(&mut self, err: EnvError) -> EnvResult<()> {
        match self.config.lookup {
            LookupPolicy::FailFast => Err(err),
            LookupPolicy::LogAndContinue => {
                self.lookup_errors.push(err);
                Ok(())
            }
        }
    }

    /// One-hot input word buffer for the current tick
    pub fn word_buffer(&self) -> &Array1<f32> {
        &self.word_buf
    }

    /// One-hot role-query buffer for the current tick
    pub fn role_buffer(&self) -> &Array1<f32> {
        &self.role_buf
    }

    /// One-hot expected-filler buffer for the current tick
    pub fn filler_buffer(&self) -> &Array1<f32> {
        &self.filler_buf
    }

    /// Whether the filler layer is a clampable target (`curq`) or a
    /// free-running comparison signal (`revq`) this tick
    pub fn question_type(&self) -> QuestionType {
        self.question
    }

    /// The trial rendered by the last `step()`, if any
    pub fn current_trial(&self) -> Option<&Trial> {
        self.tuple_idx.map(|i| &self.tuples[i])
    }

    /// Human-readable `word role=filler status` line for the current tick
    pub fn trace(&self) -> String {
        self.current_trial().map(Trial::trace).unwrap_or_default()
    }

    /// Current sentence in surface order, space-joined
    pub fn sentence(&self) -> String {
        self.surface.join(" ")
    }

    /// Content tokens of the current sentence in generated (active) order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Slot frame of the current sentence
    pub fn frame(&self) -> &SlotFrame {
        &self.frame
    }

    pub fn is_passive(&self) -> bool {
        self.passive
    }

    /// Number of trials queued for the current sentence
    pub fn trials_in_sentence(&self) -> usize {
        self.tuples.len()
    }

    /// Completed-sentence ordinal; 0 during the first sentence
    pub fn sequence(&self) -> usize {
        self.seq
    }

    /// Tick within the current sentence; 0 at each sentence start
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// Global step count, advanced every `step()`, reset only by `init()`
    pub fn trial(&self) -> usize {
        self.trial
    }

    /// Ambiguous nouns in the current sentence
    pub fn ambiguous_nouns(&self) -> usize {
        self.ambig_nouns
    }

    /// Ambiguous verbs in the current sentence (0 or 1)
    pub fn ambiguous_verbs(&self) -> usize {
        self.ambig_verbs
    }

    /// Lookup misses collected so far under `LogAndContinue`
    pub fn lookup_errors(&self) -> &[EnvError] {
        &self.lookup_errors
    }

    /// Drain the collected lookup misses
    pub fn take_lookup_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.lookup_errors)
    }
}
