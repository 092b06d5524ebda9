pub mod confidence;
pub mod context;
pub mod error;
pub mod followups;
pub mod fuzzy;
pub mod index;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod query;
pub mod scoring;
pub mod suggest;
pub mod synonyms;

pub use confidence::{get_confidence, HIGH_CONFIDENCE_SCORE, MEDIUM_CONFIDENCE_SCORE};
pub use context::{build_contextual_query, DEFAULT_CONTEXT_TURNS};
pub use error::{KnowledgeBaseError, Result};
pub use followups::{generate_followups, DEFAULT_FOLLOWUP_LIMIT};
pub use fuzzy::{fuzzy_match, levenshtein, DEFAULT_MAX_EDIT_DISTANCE};
pub use index::{build_corpus_index, CorpusIndex, DocumentTerms};
pub use ingest::{
    corpus_fingerprint, discover_document_files, load_documents_file, load_knowledge_base,
    KnowledgeBaseReport, SkippedFile,
};
pub use models::{
    Confidence, ConversationTurn, Document, RetrievalOptions, RetrievalResponse, Role,
    ScoredDocument, Suggestion, SuggestionKind,
};
pub use normalize::{rewrite_query, tokenize};
pub use orchestrator::{retrieve_notes, Retriever, DEFAULT_TOP_N};
pub use query::Query;
pub use scoring::score_note;
pub use suggest::{get_auto_suggestions, DEFAULT_SUGGESTION_LIMIT};
pub use synonyms::expand_with_synonyms;
