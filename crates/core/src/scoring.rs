use crate::fuzzy::{fuzzy_match, DEFAULT_MAX_EDIT_DISTANCE};
use crate::index::{CorpusIndex, DocumentTerms};
use crate::models::Document;
use crate::normalize::tokenize;
use crate::query::Query;
use std::collections::HashMap;

pub const TFIDF_WEIGHT: f64 = 10.0;
pub const TFIDF_FUZZY_WEIGHT: f64 = 5.0;
pub const KEYWORD_EXACT_BOOST: f64 = 10.0;
pub const KEYWORD_PARTIAL_BOOST: f64 = 4.0;
pub const KEYWORD_FUZZY_BOOST: f64 = 2.0;
pub const BIGRAM_BOOST: f64 = 8.0;
pub const TITLE_EXACT_BOOST: f64 = 6.0;
pub const TITLE_FUZZY_BOOST: f64 = 3.0;
pub const CONTENT_HIT_BOOST: f64 = 1.0;
pub const CONTENT_EXTRA_HIT_BOOST: f64 = 0.5;
pub const CONTENT_FULL_HITS: usize = 3;
pub const CATEGORY_BOOST: f64 = 3.0;

/// Tokens shorter than this never take the fuzzy paths.
const MIN_FUZZY_TOKEN_LENGTH: usize = 4;

pub fn score_note(query: &Query, document: &Document, index: &CorpusIndex) -> f64 {
    match index.document_terms(&document.id) {
        Some(terms) => score_with_terms(query, document, terms, &index.idf),
        None => score_with_terms(query, document, &DocumentTerms::default(), &index.idf),
    }
}

pub(crate) fn score_with_terms(
    query: &Query,
    document: &Document,
    terms: &DocumentTerms,
    idf: &HashMap<String, f64>,
) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    let keywords: Vec<String> = document
        .keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    tfidf_score(query, terms, idf)
        + keyword_boost(query, &keywords)
        + bigram_boost(query, &keywords)
        + title_boost(query, &document.title)
        + content_boost(query, &document.content)
        + category_boost(query, &document.category)
}

fn tfidf_score(query: &Query, terms: &DocumentTerms, idf: &HashMap<String, f64>) -> f64 {
    let idf_of = |term: &str| idf.get(term).copied().unwrap_or(0.0);
    let mut score = 0.0;

    for token in &query.expanded {
        if let Some(frequency) = terms.term_frequency(token) {
            score += frequency * idf_of(token) * TFIDF_WEIGHT;
            continue;
        }

        if token.chars().count() < MIN_FUZZY_TOKEN_LENGTH {
            continue;
        }

        if let Some((term, frequency)) = terms
            .terms()
            .find(|(term, _)| fuzzy_match(token, term, DEFAULT_MAX_EDIT_DISTANCE))
        {
            score += frequency * idf_of(term) * TFIDF_FUZZY_WEIGHT;
        }
    }

    score
}

fn keyword_boost(query: &Query, keywords: &[String]) -> f64 {
    let mut score = 0.0;

    for keyword in keywords {
        if query.rewritten.contains(keyword.as_str()) {
            score += KEYWORD_EXACT_BOOST;
        } else if query
            .expanded
            .iter()
            .any(|token| token.contains(keyword.as_str()) || keyword.contains(token.as_str()))
        {
            score += KEYWORD_PARTIAL_BOOST;
        } else if query.expanded.iter().any(|token| {
            token.chars().count() >= MIN_FUZZY_TOKEN_LENGTH
                && fuzzy_match(token, keyword, DEFAULT_MAX_EDIT_DISTANCE)
        }) {
            score += KEYWORD_FUZZY_BOOST;
        }
    }

    score
}

fn bigram_boost(query: &Query, keywords: &[String]) -> f64 {
    query
        .bigrams
        .iter()
        .filter(|bigram| keywords.iter().any(|keyword| keyword.contains(bigram.as_str())))
        .count() as f64
        * BIGRAM_BOOST
}

fn title_boost(query: &Query, title: &str) -> f64 {
    let title_tokens = tokenize(title);
    let mut score = 0.0;

    for token in &query.expanded {
        if title_tokens.iter().any(|title_token| title_token == token) {
            score += TITLE_EXACT_BOOST;
        } else if title_tokens
            .iter()
            .any(|title_token| fuzzy_match(token, title_token, DEFAULT_MAX_EDIT_DISTANCE))
        {
            score += TITLE_FUZZY_BOOST;
        }
    }

    score
}

fn content_boost(query: &Query, content: &str) -> f64 {
    let content = content.to_lowercase();
    let hits = query
        .expanded
        .iter()
        .filter(|token| content.contains(token.as_str()))
        .count();

    let full = hits.min(CONTENT_FULL_HITS) as f64 * CONTENT_HIT_BOOST;
    let extra = hits.saturating_sub(CONTENT_FULL_HITS) as f64 * CONTENT_EXTRA_HIT_BOOST;
    full + extra
}

fn category_boost(query: &Query, category: &str) -> f64 {
    let category = category.trim().to_lowercase();
    if !category.is_empty() && query.rewritten.contains(category.as_str()) {
        CATEGORY_BOOST
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_corpus_index;
    use chrono::Utc;

    fn document(
        id: &str,
        title: &str,
        keywords: &[&str],
        content: &str,
        category: &str,
    ) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            content: content.to_string(),
            updated_at: Utc::now(),
            related_document_ids: Vec::new(),
        }
    }

    fn corpus() -> Vec<Document> {
        vec![
            document(
                "fuel-policy",
                "Fuel Policy",
                &["full to full", "refueling charge"],
                "Vehicles leave with a full tank and must come back full.",
                "fuel",
            ),
            document(
                "deposit-rules",
                "Deposit Rules",
                &["security deposit", "credit card"],
                "A hold is placed on the customer's card at pickup.",
                "payments",
            ),
        ]
    }

    #[test]
    fn scoring_is_pure() {
        let docs = corpus();
        let index = build_corpus_index(&docs);
        let query = Query::parse("fuel policy");

        let first = score_note(&query, &docs[0], &index);
        let second = score_note(&query, &docs[0], &index);
        assert_eq!(first, second);
        assert!(first > 0.0);
    }

    #[test]
    fn exact_title_match_scores() {
        let docs = corpus();
        let index = build_corpus_index(&docs);
        let query = Query::parse("rules");
        assert!(score_note(&query, &docs[1], &index) > 0.0);
    }

    #[test]
    fn exact_keyword_match_scores() {
        let docs = corpus();
        let index = build_corpus_index(&docs);
        let query = Query::parse("what is the refueling charge");
        let score = score_note(&query, &docs[0], &index);
        assert!(score >= KEYWORD_EXACT_BOOST + BIGRAM_BOOST);
    }

    #[test]
    fn unrelated_query_scores_zero() {
        let docs = corpus();
        let index = build_corpus_index(&docs);
        let query = Query::parse("qqqqzzzzxxxx wwwwyyyyjjjj");
        for doc in &docs {
            assert_eq!(score_note(&query, doc, &index), 0.0);
        }
    }

    #[test]
    fn empty_query_scores_zero() {
        let docs = corpus();
        let index = build_corpus_index(&docs);
        assert_eq!(score_note(&Query::parse(""), &docs[0], &index), 0.0);
    }

    #[test]
    fn fuzzy_fallback_takes_half_weight_once() {
        let docs = vec![document("a", "", &[], "", "zebra")];
        let index = build_corpus_index(&docs);

        let exact = tfidf_score(&Query::parse("zebra"), &index.docs[0], &index.idf);
        let fuzzy = tfidf_score(&Query::parse("zebar"), &index.docs[0], &index.idf);
        assert!(exact > 0.0);
        assert!((fuzzy * 2.0 - exact).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_fallback_uses_first_term_in_document_order() {
        let docs = vec![document("a", "", &[], "alpine alpina", "")];
        let index = build_corpus_index(&docs);
        let terms = &index.docs[0];

        let score = tfidf_score(&Query::parse("alpin"), terms, &index.idf);
        let expected = terms.term_frequency("alpine").unwrap_or_default()
            * index.idf("alpine")
            * TFIDF_FUZZY_WEIGHT;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn content_hits_diminish_after_three() {
        let query = Query::parse("alpha bravo charlie delta echo");
        let boost = content_boost(&query, "Alpha bravo charlie delta echo");
        assert!((boost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn category_boost_requires_category_in_query() {
        let query = Query::parse("fuel question");
        assert_eq!(category_boost(&query, "Fuel"), CATEGORY_BOOST);
        assert_eq!(category_boost(&query, "payments"), 0.0);
        assert_eq!(category_boost(&query, ""), 0.0);
    }

    #[test]
    fn keyword_tiers_do_not_stack() {
        let keywords = vec!["deposit".to_string()];
        assert_eq!(keyword_boost(&Query::parse("deposit"), &keywords), KEYWORD_EXACT_BOOST);
        assert_eq!(keyword_boost(&Query::parse("deposits"), &keywords), KEYWORD_EXACT_BOOST);
        assert_eq!(keyword_boost(&Query::parse("depo"), &keywords), KEYWORD_PARTIAL_BOOST);
        assert_eq!(keyword_boost(&Query::parse("deposti"), &keywords), KEYWORD_FUZZY_BOOST);
        assert_eq!(keyword_boost(&Query::parse("weather"), &keywords), 0.0);
    }

    #[test]
    fn partial_keyword_match_takes_partial_weight() {
        let keywords = vec!["preauthorization".to_string()];
        assert_eq!(
            keyword_boost(&Query::parse("preauth"), &keywords),
            KEYWORD_PARTIAL_BOOST
        );
    }

    #[test]
    fn misspelled_title_token_takes_fuzzy_weight() {
        assert_eq!(title_boost(&Query::parse("polcy"), "Fuel Policy"), TITLE_FUZZY_BOOST);
        assert_eq!(title_boost(&Query::parse("policy"), "Fuel Policy"), TITLE_EXACT_BOOST);
    }

    #[test]
    fn bigram_inside_keyword_takes_bigram_weight() {
        let keywords = vec!["credit card".to_string()];
        assert_eq!(bigram_boost(&Query::parse("credit card"), &keywords), BIGRAM_BOOST);
        assert_eq!(bigram_boost(&Query::parse("card credit"), &keywords), 0.0);
    }
}
