use crate::config::TokenizerConfig;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::Range;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{Alphabetic}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Splits text into index terms according to a [`TokenizerConfig`].
///
/// The same tokenizer must be used for documents and for queries, which is why
/// [`TextIndex`](crate::TextIndex) keeps its own and exposes no other path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &TokenizerConfig { &self.config }

    /// Tokenize text into (term, position). Position counts raw tokens, so it
    /// keeps advancing over dropped stop words.
    pub fn tokenize(&self, text: &str) -> Vec<(String, usize)> {
        let normalized: Cow<'_, str> = if self.config.unicode_normalization {
            Cow::Owned(text.nfkc().collect::<String>())
        } else {
            Cow::Borrowed(text)
        };
        let lowered = normalized.to_lowercase();
        let mut tokens = Vec::new();
        for (pos, mat) in RE.find_iter(&lowered).enumerate() {
            let token = mat.as_str();
            if self.config.stopwords && is_stopword(token) { continue; }
            let term = if self.config.stemming {
                STEMMER.stem(token).into_owned()
            } else {
                token.to_string()
            };
            if term.is_empty() { continue; }
            tokens.push((term, pos));
        }
        tokens
    }
}

/// Byte ranges of the raw words in `text`, before any normalization. Feeding
/// a range back through [`Tokenizer::tokenize`] yields the terms it indexes as.
pub fn word_spans(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    RE.find_iter(text).map(|m| m.range())
}

/// Tokenize with the default config: lowercase, split on runs of non-alphanumerics.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    Tokenizer::default().tokenize(text)
}
