use std::sync::Arc;
use std::thread;
use textindex::{DocumentRecord, Error, IndexConfig, TextIndex, TokenizerConfig};

fn record(title: &str, excerpt: &str, url: &str) -> DocumentRecord {
    DocumentRecord {
        title: Some(title.to_string()),
        excerpt: excerpt.to_string(),
        url: Some(url.to_string()),
        ..Default::default()
    }
}

fn tiny_index() -> TextIndex {
    TextIndex::new(vec![
        record("Sketch Shading", "rendering 3D models", "/sketch-shading/"),
        record("Combining Strings In T Sql", "solve a problem", "/combining-strings/"),
    ])
    .unwrap()
}

fn urls(hits: &[textindex::SearchHit<'_>]) -> Vec<String> {
    hits.iter().map(|h| h.url().to_string()).collect()
}

#[test]
fn finds_documents_by_title_word() {
    let idx = tiny_index();
    assert_eq!(urls(&idx.search("sketch", None).unwrap()), vec!["/sketch-shading/"]);
    assert_eq!(urls(&idx.search("SQL", None).unwrap()), vec!["/combining-strings/"]);
    assert_eq!(idx.document(1).map(|d| d.title.as_str()), Some("Combining Strings In T Sql"));
    assert!(idx.document(2).is_none());
}

#[test]
fn unmatched_query_is_empty_not_error() {
    let idx = tiny_index();
    assert!(idx.search("nonexistentterm", None).unwrap().is_empty());
}

#[test]
fn empty_query_is_an_error() {
    let idx = tiny_index();
    assert!(matches!(idx.search("", None), Err(Error::EmptyQuery)));
    assert!(matches!(idx.search("  -- ?! ", Some(5)), Err(Error::EmptyQuery)));
}

#[test]
fn stopword_only_query_is_empty_when_filtering() {
    let config = IndexConfig { tokenizer: TokenizerConfig { stopwords: true, ..Default::default() } };
    let idx = TextIndex::build(vec![record("The Columns", "", "/c/")], config).unwrap();
    assert!(idx.config().tokenizer.stopwords);
    assert!(matches!(idx.search("the", None), Err(Error::EmptyQuery)));
    assert_eq!(idx.search("columns", None).unwrap().len(), 1);
}

#[test]
fn limit_caps_results() {
    let idx = TextIndex::new(vec![
        record("data one", "", "/1/"),
        record("data two", "", "/2/"),
        record("data three", "", "/3/"),
    ])
    .unwrap();
    assert_eq!(idx.search("data", None).unwrap().len(), 3);
    assert_eq!(urls(&idx.search("data", Some(2)).unwrap()), vec!["/1/", "/2/"]);
    assert!(idx.search("data", Some(0)).unwrap().is_empty());
}

#[test]
fn empty_collection_builds_and_matches_nothing() {
    let idx = TextIndex::new(Vec::new()).unwrap();
    assert!(idx.is_empty());
    assert_eq!(idx.num_terms(), 0);
    assert!(idx.search("anything", None).unwrap().is_empty());
}

#[test]
fn duplicate_url_is_rejected() {
    let err = TextIndex::new(vec![record("A", "", "/x/"), record("B", "", "/x/")]).unwrap_err();
    match err {
        Error::DuplicateDocument { position, url } => {
            assert_eq!(position, 1);
            assert_eq!(url, "/x/");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_url_or_title_is_rejected() {
    let no_url = DocumentRecord { title: Some("A".into()), ..Default::default() };
    assert!(matches!(
        TextIndex::new(vec![record("ok", "", "/ok/"), no_url]),
        Err(Error::InvalidDocument { position: 1, field: "url" })
    ));
    let no_title = DocumentRecord { url: Some("/a/".into()), ..Default::default() };
    assert!(matches!(
        TextIndex::new(vec![no_title]),
        Err(Error::InvalidDocument { position: 0, field: "title" })
    ));
}

#[test]
fn higher_term_frequency_ranks_first() {
    let idx = TextIndex::new(vec![
        record("columns", "", "/once/"),
        record("columns", "all the columns, every columns", "/thrice/"),
    ])
    .unwrap();
    let hits = idx.search("columns", None).unwrap();
    assert_eq!(urls(&hits), vec!["/thrice/", "/once/"]);
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn tags_and_categories_are_searchable() {
    let mut r = record("Untitled", "", "/t/");
    r.tags = vec!["tsql".into()];
    r.categories = vec!["Databases".into()];
    let idx = TextIndex::new(vec![r]).unwrap();
    assert_eq!(idx.search("tsql", None).unwrap().len(), 1);
    assert_eq!(idx.search("databases", None).unwrap().len(), 1);
}

#[test]
fn repeated_searches_are_identical() {
    let idx = tiny_index();
    let a: Vec<(u32, f64)> = idx.search("sketch sql models", None).unwrap().iter().map(|h| (h.id(), h.score)).collect();
    let b: Vec<(u32, f64)> = idx.search("sketch sql models", None).unwrap().iter().map(|h| (h.id(), h.score)).collect();
    assert_eq!(a, b);
}

#[test]
fn concurrent_readers_share_one_index() {
    let idx = Arc::new(tiny_index());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let idx = Arc::clone(&idx);
            thread::spawn(move || urls(&idx.search("shading", Some(10)).unwrap()))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), vec!["/sketch-shading/"]);
    }
}

#[test]
fn hits_serialize_for_display() {
    let idx = tiny_index();
    let hits = idx.search("sketch", None).unwrap();
    let json = serde_json::to_value(hits[0].document).unwrap();
    assert_eq!(json["title"], "Sketch Shading");
    assert_eq!(json["url"], "/sketch-shading/");
    assert!(json["teaser"].is_null());
}

#[test]
fn snippet_centers_on_word_joined_by_underscore() {
    let excerpt = format!("{}snake_case rules", "pad ".repeat(10));
    let idx = TextIndex::new(vec![record("Naming", &excerpt, "/naming/")]).unwrap();
    let hits = idx.search("snake", None).unwrap();
    assert_eq!(hits.len(), 1);
    let snippet = hits[0].snippet("snake", 20).unwrap();
    assert!(snippet.contains("<em>snake</em>_case"), "{snippet}");
}

#[test]
fn snippet_follows_index_stemming() {
    let config = IndexConfig { tokenizer: TokenizerConfig { stemming: true, ..Default::default() } };
    let idx = TextIndex::build(vec![record("Notes", "Running the numbers", "/n/")], config).unwrap();
    let hits = idx.search("runs", None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].snippet("runs", 100).unwrap(), "<em>Running</em> the numbers");
}

#[test]
fn whitespace_only_url_counts_as_missing() {
    assert!(matches!(
        TextIndex::new(vec![record("Title", "", "   ")]),
        Err(Error::InvalidDocument { position: 0, field: "url" })
    ));
}
