use crate::models::Document;
use crate::normalize::tokenize;
use std::collections::HashMap;

const TITLE_REPEAT: usize = 3;
const KEYWORD_REPEAT: usize = 4;
const CONTENT_REPEAT: usize = 1;
const CATEGORY_REPEAT: usize = 2;

/// Term frequencies for one document, in first-occurrence order of its weighted text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTerms {
    pub document_id: String,
    terms: Vec<(String, f64)>,
    positions: HashMap<String, usize>,
}

impl DocumentTerms {
    fn from_tokens(document_id: &str, tokens: &[String]) -> Self {
        let mut terms: Vec<(String, f64)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for token in tokens {
            match positions.get(token).copied() {
                Some(position) => terms[position].1 += 1.0,
                None => {
                    positions.insert(token.clone(), terms.len());
                    terms.push((token.clone(), 1.0));
                }
            }
        }

        let total = tokens.len() as f64;
        if total > 0.0 {
            for (_, frequency) in &mut terms {
                *frequency /= total;
            }
        }

        Self {
            document_id: document_id.to_string(),
            terms,
            positions,
        }
    }

    pub fn term_frequency(&self, term: &str) -> Option<f64> {
        self.positions
            .get(term)
            .map(|&position| self.terms[position].1)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.terms
            .iter()
            .map(|(term, frequency)| (term.as_str(), *frequency))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusIndex {
    pub docs: Vec<DocumentTerms>,
    pub idf: HashMap<String, f64>,
}

impl CorpusIndex {
    pub fn document_terms(&self, document_id: &str) -> Option<&DocumentTerms> {
        self.docs
            .iter()
            .find(|terms| terms.document_id == document_id)
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }
}

pub fn weighted_text(document: &Document) -> String {
    let keywords = document.keywords.join(" ");
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat(document.title.as_str()).take(TITLE_REPEAT));
    parts.extend(std::iter::repeat(keywords.as_str()).take(KEYWORD_REPEAT));
    parts.extend(std::iter::repeat(document.content.as_str()).take(CONTENT_REPEAT));
    parts.extend(std::iter::repeat(document.category.as_str()).take(CATEGORY_REPEAT));
    parts.join(" ")
}

pub fn smoothed_idf(document_count: usize, document_frequency: usize) -> f64 {
    ((document_count as f64 + 1.0) / (1.0 + document_frequency as f64)).ln() + 1.0
}

pub fn build_corpus_index(documents: &[Document]) -> CorpusIndex {
    let docs: Vec<DocumentTerms> = documents
        .iter()
        .map(|document| {
            let tokens = tokenize(&weighted_text(document));
            DocumentTerms::from_tokens(&document.id, &tokens)
        })
        .collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for terms in &docs {
        for (term, _) in terms.terms() {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    let idf = document_frequency
        .into_iter()
        .map(|(term, frequency)| (term.to_string(), smoothed_idf(docs.len(), frequency)))
        .collect();

    CorpusIndex { docs, idf }
}
