use crate::confidence::{confidence_for_scores, result_confidence};
use crate::context::build_contextual_query;
use crate::followups::generate_followups_with_limit;
use crate::index::build_corpus_index;
use crate::models::{
    Confidence, ConversationTurn, Document, RetrievalOptions, RetrievalResponse, ScoredDocument,
    Suggestion,
};
use crate::query::Query;
use crate::scoring::score_with_terms;
use crate::suggest::get_auto_suggestions;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 3;

pub fn retrieve_notes(query: &str, documents: &[Document], top_n: usize) -> Vec<ScoredDocument> {
    let parsed = Query::parse(query);
    if parsed.is_empty() || documents.is_empty() || top_n == 0 {
        debug!(
            tokens = parsed.expanded.len(),
            documents = documents.len(),
            top_n,
            "nothing to rank"
        );
        return Vec::new();
    }

    let index = build_corpus_index(documents);

    let mut scored: Vec<(&Document, f64)> = documents
        .iter()
        .zip(index.docs.iter())
        .map(|(document, terms)| {
            let score = score_with_terms(&parsed, document, terms, &index.idf);
            (document, score)
        })
        .filter(|(_, score)| *score > 0.0)
        .collect();

    // `sort_by` is stable, so ties keep input order.
    scored.sort_by(|left, right| right.1.total_cmp(&left.1));
    let matched = scored.len();
    scored.truncate(top_n);

    let scores: Vec<f64> = scored.iter().map(|(_, score)| *score).collect();
    let overall = confidence_for_scores(&scores);

    debug!(
        tokens = parsed.tokens.len(),
        expanded = parsed.expanded.len(),
        candidates = documents.len(),
        matched,
        returned = scored.len(),
        confidence = overall.as_str(),
        "ranked knowledge base"
    );

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (document, score))| ScoredDocument {
            document: document.clone(),
            score,
            confidence: result_confidence(rank, score, overall),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Retriever {
    options: RetrievalOptions,
}

impl Retriever {
    pub fn new(options: RetrievalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RetrievalOptions {
        &self.options
    }

    pub fn retrieve(&self, query: &str, documents: &[Document]) -> Vec<ScoredDocument> {
        retrieve_notes(query, documents, self.options.top_n)
    }

    pub fn suggest(
        &self,
        prefix: &str,
        documents: &[Document],
        recent_searches: &[String],
    ) -> Vec<Suggestion> {
        get_auto_suggestions(prefix, documents, recent_searches, self.options.suggestion_limit)
    }

    pub fn answer(
        &self,
        message: &str,
        history: &[ConversationTurn],
        documents: &[Document],
    ) -> RetrievalResponse {
        let contextual_query =
            build_contextual_query(message, history, self.options.max_context_turns);
        if contextual_query != message {
            debug!(history = history.len(), "folded conversation context into query");
        }

        let results = self.retrieve(&contextual_query, documents);
        let confidence = results
            .first()
            .map(|top| top.confidence)
            .unwrap_or(Confidence::Low);

        let matched: Vec<Document> = results.iter().map(|result| result.document.clone()).collect();
        let followups = generate_followups_with_limit(
            message,
            &matched,
            documents,
            self.options.followup_limit,
        );

        RetrievalResponse {
            query: message.to_string(),
            contextual_query,
            confidence,
            results,
            followups,
        }
    }
}
