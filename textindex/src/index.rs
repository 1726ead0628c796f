use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::snippet::snippet_with;
use crate::store::parse_store;
use crate::tokenizer::Tokenizer;
use crate::{DocId, Document, DocumentRecord, InvertedIndex, Posting, TermId};
use std::collections::HashMap;

/// A ranked match returned by [`TextIndex::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub document: &'a Document,
    pub score: f64,
    tokenizer: &'a Tokenizer,
}

impl<'a> SearchHit<'a> {
    pub fn id(&self) -> DocId { self.document.id }
    pub fn title(&self) -> &'a str { &self.document.title }
    pub fn url(&self) -> &'a str { &self.document.url }
    pub fn teaser(&self) -> Option<&'a str> { self.document.teaser.as_deref() }

    /// Excerpt window around the first query match, matches wrapped in `<em>`.
    /// Words match the way the index matched them, stemming included.
    pub fn snippet(&self, query: &str, width: usize) -> Option<String> {
        snippet_with(self.tokenizer, &self.document.excerpt, query, width)
    }
}

/// Immutable TF-IDF index over a fixed document collection.
///
/// There is no way to obtain a partially built index: [`TextIndex::build`]
/// either validates and indexes every record or returns an error.
#[derive(Debug)]
pub struct TextIndex {
    config: IndexConfig,
    tokenizer: Tokenizer,
    docs: Vec<Document>,
    url_map: HashMap<String, DocId>,
    index: InvertedIndex,
}

impl TextIndex {
    pub fn new<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = DocumentRecord>,
    {
        Self::build(records, IndexConfig::default())
    }

    /// Parse a generated search store (`var store = [...]` or plain JSON) and index it.
    pub fn from_store(source: &str, config: IndexConfig) -> Result<Self> {
        Self::build(parse_store(source)?, config)
    }

    pub fn build<I>(records: I, config: IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = DocumentRecord>,
    {
        let tokenizer = Tokenizer::new(config.tokenizer);
        let mut docs: Vec<Document> = Vec::new();
        let mut url_map: HashMap<String, DocId> = HashMap::new();
        let mut index = InvertedIndex::new();

        for (position, record) in records.into_iter().enumerate() {
            let doc_id = position as DocId;
            let doc = validate(record, doc_id, position)?;
            if url_map.contains_key(&doc.url) {
                tracing::warn!(position, url = %doc.url, "duplicate document url");
                return Err(Error::DuplicateDocument { position, url: doc.url });
            }
            url_map.insert(doc.url.clone(), doc_id);
            ingest_doc(&tokenizer, &doc, &mut index);
            docs.push(doc);
        }
        index.num_docs = docs.len() as u32;

        tracing::info!(num_docs = index.num_docs, num_terms = index.num_terms(), "built text index");
        Ok(Self { config, tokenizer, docs, url_map, index })
    }

    /// Rank documents against `query`. `limit` of `None` returns every match.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchHit<'_>>> {
        let q_tokens = self.tokenizer.tokenize(query);
        if q_tokens.is_empty() {
            return Err(Error::EmptyQuery);
        }

        // Each distinct term counts once; term id order keeps float summation deterministic.
        let mut terms: Vec<TermId> = q_tokens
            .iter()
            .filter_map(|(term, _pos)| self.index.term_id(term))
            .collect();
        terms.sort_unstable();
        terms.dedup();

        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for tid in terms.iter().copied() {
            let idf = self.index.idf(tid);
            for p in self.index.postings(tid) {
                *scores.entry(p.doc_id).or_insert(0.0) += p.tf as f64 * idf;
            }
        }

        let mut scored: Vec<(DocId, f64)> = scores.into_iter().collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let total_hits = scored.len();
        if let Some(k) = limit {
            scored.truncate(k);
        }
        tracing::debug!(query, tokens = q_tokens.len(), matched_terms = terms.len(), total_hits, "search");

        Ok(scored
            .into_iter()
            .map(|(doc_id, score)| SearchHit { document: &self.docs[doc_id as usize], score, tokenizer: &self.tokenizer })
            .collect())
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn document(&self, id: DocId) -> Option<&Document> { self.docs.get(id as usize) }

    pub fn document_by_url(&self, url: &str) -> Option<&Document> {
        self.url_map.get(url).and_then(|&id| self.document(id))
    }

    pub fn documents(&self) -> &[Document] { &self.docs }

    pub fn num_terms(&self) -> usize { self.index.num_terms() }

    pub fn config(&self) -> &IndexConfig { &self.config }

    pub fn inverted_index(&self) -> &InvertedIndex { &self.index }
}

fn validate(record: DocumentRecord, id: DocId, position: usize) -> Result<Document> {
    let title = required(record.title, position, "title")?;
    let url = required(record.url, position, "url")?;
    Ok(Document {
        id,
        title,
        excerpt: record.excerpt,
        url,
        teaser: record.teaser,
        tags: record.tags.into_iter().collect(),
        categories: record.categories.into_iter().collect(),
    })
}

fn required(value: Option<String>, position: usize, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            tracing::warn!(position, field, "document missing mandatory field");
            Err(Error::InvalidDocument { position, field })
        }
    }
}

fn ingest_doc(tokenizer: &Tokenizer, doc: &Document, index: &mut InvertedIndex) {
    let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
    for (term, _pos) in tokenizer.tokenize(&doc.searchable_text()) {
        let next_term_id = index.dictionary.len() as TermId;
        let tid = *index.dictionary.entry(term).or_insert(next_term_id);
        if tid as usize == index.postings.len() {
            index.postings.push(Vec::new());
            index.df.push(0);
        }
        *tf_counts.entry(tid).or_insert(0) += 1;
    }

    // Documents arrive in id order, so every postings list stays sorted by doc_id.
    for (tid, tf) in tf_counts {
        index.df[tid as usize] += 1;
        index.postings[tid as usize].push(Posting { doc_id: doc.id, tf });
    }
}
