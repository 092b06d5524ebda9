use crate::models::{Document, Suggestion, SuggestionKind};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;
const MIN_PREFIX_CHARS: usize = 2;

pub const INTENT_QUERIES: [&str; 20] = [
    "What is the fuel policy?",
    "How much is the security deposit?",
    "When is the deposit hold released?",
    "What does the collision damage waiver cover?",
    "Is theft protection included?",
    "What is the grace period for late returns?",
    "How do I extend a rental?",
    "What is the cancellation policy?",
    "How are no shows handled?",
    "Is there a young driver surcharge?",
    "How do I add an additional driver?",
    "Which driving licences are accepted?",
    "Do we need an international driving permit?",
    "How do I record damage at pickup?",
    "What happens after an accident?",
    "Who do I call for roadside assistance?",
    "Are child seats available?",
    "Is mileage unlimited?",
    "How are tolls charged?",
    "Can the car be returned to another branch?",
];

pub fn get_auto_suggestions(
    prefix: &str,
    documents: &[Document],
    recent_searches: &[String],
    limit: usize,
) -> Vec<Suggestion> {
    let needle = prefix.trim().to_lowercase();
    if needle.chars().count() < MIN_PREFIX_CHARS {
        return Vec::new();
    }
    let matches = |text: &str| text.to_lowercase().contains(&needle);

    let notes = documents
        .iter()
        .filter(|document| matches(&document.title))
        .map(|document| Suggestion {
            kind: SuggestionKind::Note,
            text: document.title.clone(),
            id: Some(document.id.clone()),
        });

    let recent = recent_searches
        .iter()
        .filter(|search| matches(search))
        .map(|search| Suggestion {
            kind: SuggestionKind::Recent,
            text: search.clone(),
            id: None,
        });

    let intents = INTENT_QUERIES
        .iter()
        .filter(|intent| matches(intent))
        .map(|intent| Suggestion {
            kind: SuggestionKind::Intent,
            text: (*intent).to_string(),
            id: None,
        });

    notes.chain(recent).chain(intents).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn document(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            category: String::new(),
            keywords: Vec::new(),
            content: String::new(),
            updated_at: Utc::now(),
            related_document_ids: Vec::new(),
        }
    }

    #[test]
    fn short_prefix_returns_nothing() {
        let docs = vec![document("fuel-policy", "Fuel Policy")];
        assert!(get_auto_suggestions("", &docs, &[], DEFAULT_SUGGESTION_LIMIT).is_empty());
        assert!(get_auto_suggestions("f", &docs, &[], DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn notes_then_recent_then_intents() {
        let docs = vec![
            document("fuel-policy", "Fuel Policy"),
            document("deposit-rules", "Deposit Rules"),
        ];
        let recent = vec!["fuel for vans".to_string(), "deposit amount".to_string()];

        let suggestions = get_auto_suggestions("FUEL", &docs, &recent, DEFAULT_SUGGESTION_LIMIT);
        let kinds: Vec<SuggestionKind> = suggestions.iter().map(|item| item.kind).collect();

        assert_eq!(
            kinds,
            vec![SuggestionKind::Note, SuggestionKind::Recent, SuggestionKind::Intent]
        );
        assert_eq!(suggestions[0].id.as_deref(), Some("fuel-policy"));
        assert_eq!(suggestions[2].text, "What is the fuel policy?");
        assert!(suggestions[1].id.is_none());
    }

    #[test]
    fn output_is_truncated_to_limit() {
        let suggestions = get_auto_suggestions("ho", &[], &[], 3);
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().all(|item| item.kind == SuggestionKind::Intent));
    }
}
