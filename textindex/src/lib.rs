//! In-memory full-text index over the page metadata a static site generator
//! emits for client-side search.
//!
//! Build a [`TextIndex`] once from the generator's records, then answer ranked
//! queries against it from any number of threads.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub mod config;
pub mod error;
pub mod index;
pub mod snippet;
pub mod store;
pub mod tokenizer;

pub use config::{IndexConfig, TokenizerConfig};
pub use error::{Error, Result};
pub use index::{SearchHit, TextIndex};

pub type TermId = u32;
pub type DocId = u32;

/// One entry of the generator's search store, exactly as it is emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub teaser: Option<String>,
}

/// A validated, indexed document. `id` is its position in the input sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub excerpt: String,
    pub url: String,
    pub teaser: Option<String>,
    pub tags: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl Document {
    /// Title, excerpt, tags and categories joined into the text that gets indexed.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.excerpt.len() + 1);
        text.push_str(&self.title);
        text.push('\n');
        text.push_str(&self.excerpt);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        for category in &self.categories {
            text.push(' ');
            text.push_str(category);
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: u32, // occurrences in the document's searchable text
}

#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub dictionary: HashMap<String, TermId>,
    pub df: Vec<u32>,
    pub postings: Vec<Vec<Posting>>, // indexed by term id, sorted by doc_id
    pub num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Smoothed inverse document frequency, `ln(1 + N/df)`.
    pub fn idf(&self, term_id: TermId) -> f64 {
        let df_t = self.df.get(term_id as usize).copied().unwrap_or(0).max(1);
        (1.0 + self.num_docs as f64 / df_t as f64).ln()
    }

    pub fn num_terms(&self) -> usize { self.dictionary.len() }
}
