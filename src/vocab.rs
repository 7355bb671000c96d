//! Vocabulary pool
//!
//! Read-only word data the levels are built from. Each brick references one item by id;
//! the Target Selector derives prompts from the item's synonyms and antonyms.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a vocabulary item
pub type VocabId = u32;

/// One vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    pub id: VocabId,
    pub word: String,
    pub meaning: String,
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

impl VocabItem {
    pub fn new(id: VocabId, word: &str, meaning: &str, synonyms: &[&str], antonyms: &[&str]) -> Self {
        Self {
            id,
            word: word.to_string(),
            meaning: meaning.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            antonyms: antonyms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("vocabulary pool is empty")]
    Empty,
    #[error("duplicate vocabulary id {0}")]
    DuplicateId(VocabId),
    #[error("vocabulary item {0} has an empty word")]
    EmptyWord(VocabId),
    #[error("vocabulary item {id} (`{word}`) has no synonyms")]
    NoSynonyms { id: VocabId, word: String },
    #[error("vocabulary JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validated, ordered collection of vocabulary items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabPool {
    items: Vec<VocabItem>,
}

impl VocabPool {
    /// Build a pool, rejecting items the game cannot prompt for
    pub fn new(items: Vec<VocabItem>) -> Result<Self, VocabError> {
        if items.is_empty() {
            return Err(VocabError::Empty);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(VocabError::DuplicateId(item.id));
            }
            if item.word.trim().is_empty() {
                return Err(VocabError::EmptyWord(item.id));
            }
            if item.synonyms.iter().all(|s| s.trim().is_empty()) {
                return Err(VocabError::NoSynonyms {
                    id: item.id,
                    word: item.word.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Load a pool from a JSON array of items
    pub fn from_json(json: &str) -> Result<Self, VocabError> {
        let items: Vec<VocabItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: VocabId) -> Option<&VocabItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The pool shipped with the game
    pub fn builtin() -> Self {
        Self {
            items: builtin_items(),
        }
    }
}

fn builtin_items() -> Vec<VocabItem> {
    vec![
        VocabItem::new(1, "Resilient", "Able to recover quickly", &["tough", "hardy", "buoyant"], &["fragile", "weak"]),
        VocabItem::new(2, "Candid", "Truthful and straightforward", &["frank", "honest", "blunt"], &["guarded", "evasive"]),
        VocabItem::new(3, "Diligent", "Showing care in one's work", &["industrious", "careful", "hardworking"], &["lazy", "careless"]),
        VocabItem::new(4, "Ephemeral", "Lasting a very short time", &["fleeting", "transient", "brief"], &["permanent", "enduring"]),
        VocabItem::new(5, "Benevolent", "Well meaning and kindly", &["kind", "generous", "charitable"], &["malicious", "cruel"]),
        VocabItem::new(6, "Meticulous", "Very careful and precise", &["thorough", "precise", "scrupulous"], &["sloppy", "negligent"]),
        VocabItem::new(7, "Obscure", "Not discovered or known about", &["unclear", "vague", "hidden"], &["famous", "clear"]),
        VocabItem::new(8, "Pragmatic", "Dealing with things sensibly", &["practical", "realistic", "sensible"], &["idealistic", "impractical"]),
        VocabItem::new(9, "Tenacious", "Holding firmly to something", &["persistent", "determined", "stubborn"], &["irresolute", "yielding"]),
        VocabItem::new(10, "Lucid", "Expressed clearly", &["clear", "coherent", "articulate"], &["confusing", "muddled"]),
        VocabItem::new(11, "Frugal", "Sparing with money or food", &["thrifty", "economical", "prudent"], &["wasteful", "extravagant"]),
        VocabItem::new(12, "Vivid", "Producing powerful feelings or images", &["bright", "intense", "graphic"], &["dull", "faded"]),
        VocabItem::new(13, "Ambiguous", "Open to more than one interpretation", &["unclear", "equivocal", "vague"], &["definite", "explicit"]),
        VocabItem::new(14, "Zealous", "Full of energy for a cause", &["passionate", "fervent", "eager"], &["apathetic", "indifferent"]),
        VocabItem::new(15, "Humble", "Having a modest opinion of oneself", &["modest", "unassuming", "meek"], &["arrogant", "proud"]),
        VocabItem::new(16, "Scarce", "Insufficient for the demand", &["rare", "sparse", "limited"], &["plentiful", "abundant"]),
        VocabItem::new(17, "Serene", "Calm, peaceful and untroubled", &["calm", "tranquil", "placid"], &["agitated", "turbulent"]),
        VocabItem::new(18, "Verbose", "Using more words than needed", &["wordy", "long-winded", "rambling"], &["concise", "terse"]),
        VocabItem::new(19, "Novel", "New or unusual in an interesting way", &["original", "fresh", "innovative"], &["familiar", "ordinary"]),
        VocabItem::new(20, "Lethargic", "Sluggish and apathetic", &["sluggish", "listless", "drowsy"], &["energetic", "lively"]),
        VocabItem::new(21, "Eloquent", "Fluent or persuasive in speaking", &["articulate", "expressive", "fluent"], &["inarticulate"]),
        VocabItem::new(22, "Gregarious", "Fond of company", &["sociable", "outgoing", "convivial"], &["reclusive", "introverted"]),
        VocabItem::new(23, "Ubiquitous", "Present everywhere", &["omnipresent", "pervasive", "universal"], &["rare"]),
        VocabItem::new(24, "Quintessential", "Representing the most perfect example", &["typical", "classic", "archetypal"], &[]),
    ]
}
