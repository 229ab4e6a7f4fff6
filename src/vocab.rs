//! Vocabulary tables and derived index maps.
//!
//! The three ordered lists (words, roles, fillers) define the one-hot index
//! spaces for the input, role-query, and filler buffers. Translation and
//! ambiguity tables are applied to surface words before they enter a trial
//! tuple or an ambiguity count.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Raw vocabulary tables as written in a TOML or JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabTables {
    /// Every distinct word that can appear on the input
    pub words: Vec<String>,
    /// Every queryable semantic role name
    pub roles: Vec<String>,
    /// Every concept that can be asked for as an answer
    pub fillers: Vec<String>,
    /// Lowercase surface word → ambiguous surface form
    pub word_translation: HashMap<String, String>,
    /// Words flagged as semantically ambiguous verbs
    pub ambiguous_verbs: Vec<String>,
    /// Words flagged as semantically ambiguous nouns
    pub ambiguous_nouns: Vec<String>,
}

/// Immutable vocabulary with name→index maps built once at construction.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tables: VocabTables,
    word_map: HashMap<String, usize>,
    role_map: HashMap<String, usize>,
    filler_map: HashMap<String, usize>,
    ambig_verb_map: HashMap<String, usize>,
    ambig_noun_map: HashMap<String, usize>,
}

fn index_map(list: &[String]) -> HashMap<String, usize> {
    list.iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

impl Vocabulary {
    pub fn new(tables: VocabTables) -> Self {
        let word_map = index_map(&tables.words);
        let role_map = index_map(&tables.roles);
        let filler_map = index_map(&tables.fillers);
        let ambig_verb_map = index_map(&tables.ambiguous_verbs);
        let ambig_noun_map = index_map(&tables.ambiguous_nouns);
        Self {
            tables,
            word_map,
            role_map,
            filler_map,
            ambig_verb_map,
            ambig_noun_map,
        }
    }

    /// Load vocabulary tables from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let tables: VocabTables =
            toml::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Ok(Self::new(tables))
    }

    pub fn tables(&self) -> &VocabTables {
        &self.tables
    }

    pub fn n_words(&self) -> usize {
        self.tables.words.len()
    }

    pub fn n_roles(&self) -> usize {
        self.tables.roles.len()
    }

    pub fn n_fillers(&self) -> usize {
        self.tables.fillers.len()
    }

    pub fn word_index(&self, word: &str) -> Option<usize> {
        self.word_map.get(word).copied()
    }

    pub fn role_index(&self, role: &str) -> Option<usize> {
        self.role_map.get(role).copied()
    }

    pub fn filler_index(&self, filler: &str) -> Option<usize> {
        self.filler_map.get(filler).copied()
    }

    /// Apply the ambiguous-word translation to a surface word. Words without
    /// a translation entry pass through unchanged.
    pub fn translate<'a>(&'a self, word: &'a str) -> &'a str {
        match self.tables.word_translation.get(word) {
            Some(trans) => trans.as_str(),
            None => word,
        }
    }

    pub fn is_ambiguous_verb(&self, word: &str) -> bool {
        self.ambig_verb_map.contains_key(word)
    }

    pub fn is_ambiguous_noun(&self, word: &str) -> bool {
        self.ambig_noun_map.contains_key(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> VocabTables {
        VocabTables {
            words: vec!["start".into(), "busdriver".into(), "ate".into()],
            roles: vec!["Agent".into(), "Action".into(), "Patient".into()],
            fillers: vec!["None".into(), "BusDriver".into(), "Ate".into()],
            word_translation: HashMap::from([("busdriver".to_string(), "adult".to_string())]),
            ambiguous_verbs: vec!["threw".into()],
            ambiguous_nouns: vec!["bat".into(), "pitcher".into()],
        }
    }

    #[test]
    fn index_maps_follow_list_order() {
        let vocab = Vocabulary::new(tables());
        assert_eq!(vocab.word_index("start"), Some(0));
        assert_eq!(vocab.word_index("ate"), Some(2));
        assert_eq!(vocab.role_index("Patient"), Some(2));
        assert_eq!(vocab.filler_index("BusDriver"), Some(1));
        assert_eq!(vocab.word_index("missing"), None);
    }

    #[test]
    fn translation_passes_unknown_words_through() {
        let vocab = Vocabulary::new(tables());
        assert_eq!(vocab.translate("busdriver"), "adult");
        assert_eq!(vocab.translate("ate"), "ate");
    }

    #[test]
    fn ambiguity_tables_are_membership_tests() {
        let vocab = Vocabulary::new(tables());
        assert!(vocab.is_ambiguous_verb("threw"));
        assert!(!vocab.is_ambiguous_verb("ate"));
        assert!(vocab.is_ambiguous_noun("pitcher"));
        assert!(!vocab.is_ambiguous_noun("busdriver"));
    }

    #[test]
    fn vocab_tables_parse_from_toml() {
        let toml_str = r#"
            words = ["start", "ate"]
            roles = ["Agent"]
            fillers = ["None"]
            ambiguous_nouns = ["bat"]

            [word_translation]
            busdriver = "adult"
        "#;
        let parsed: VocabTables = toml::from_str(toml_str).unwrap();
        let vocab = Vocabulary::new(parsed);
        assert_eq!(vocab.n_words(), 2);
        assert_eq!(vocab.translate("busdriver"), "adult");
        assert!(vocab.is_ambiguous_noun("bat"));
        assert!(vocab.tables().ambiguous_verbs.is_empty());
    }
}
