use crate::tokenizer::{word_spans, Tokenizer};
use std::collections::HashSet;
use std::ops::Range;

/// Cut up to `width` characters out of `text` around the first query match and
/// wrap every matched word in `<em>`. Falls back to the leading window when
/// nothing matches. Uses the default tokenizer; see [`snippet_with`].
pub fn snippet(text: &str, query: &str, width: usize) -> Option<String> {
    snippet_with(&Tokenizer::default(), text, query, width)
}

/// Like [`snippet`], but a word matches when `tokenizer` turns it into one of
/// the query's terms, so stemmed or normalized matches light up too.
pub fn snippet_with(tokenizer: &Tokenizer, text: &str, query: &str, width: usize) -> Option<String> {
    if text.trim().is_empty() || width == 0 { return None; }
    let matches = match_spans(tokenizer, text, query);

    let total = text.chars().count();
    let start = match matches.first() {
        Some(m) if total > width => {
            let idx = text[..m.start].chars().count();
            idx.saturating_sub(width / 3).min(total - width)
        }
        _ => 0,
    };
    let lo = char_to_byte(text, 0, start);
    let hi = char_to_byte(text, lo, width);
    let window = &text[lo..hi];
    let lo = lo + (window.len() - window.trim_start().len());
    let hi = (hi - (window.len() - window.trim_end().len())).max(lo);

    Some(highlight_terms(text, lo..hi, &matches))
}

/// Words of `text` whose terms appear among the query's terms, as byte ranges.
fn match_spans(tokenizer: &Tokenizer, text: &str, query: &str) -> Vec<Range<usize>> {
    let terms: HashSet<String> = tokenizer.tokenize(query).into_iter().map(|(w, _)| w).collect();
    if terms.is_empty() { return Vec::new(); }
    word_spans(text)
        .filter(|r| tokenizer.tokenize(&text[r.clone()]).iter().any(|(w, _)| terms.contains(w)))
        .collect()
}

fn char_to_byte(text: &str, from: usize, chars: usize) -> usize {
    text[from..].char_indices().nth(chars).map(|(b, _)| from + b).unwrap_or(text.len())
}

// Only words lying wholly inside the window are marked; a word cut at the edge is not a match.
fn highlight_terms(text: &str, window: Range<usize>, matches: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(window.len() + matches.len() * 9);
    let mut cursor = window.start;
    for m in matches.iter().filter(|m| m.start >= window.start && m.end <= window.end) {
        out.push_str(&text[cursor..m.start]);
        out.push_str("<em>");
        out.push_str(&text[m.clone()]);
        out.push_str("</em>");
        cursor = m.end;
    }
    out.push_str(&text[cursor..window.end]);
    out
}
