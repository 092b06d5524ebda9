use crate::models::Document;
use std::collections::HashSet;

pub const DEFAULT_FOLLOWUP_LIMIT: usize = 3;

/// Characters of the question used to suppress suggestions that merely repeat it.
const QUERY_ECHO_PREFIX_CHARS: usize = 10;

const CATEGORY_FOLLOWUPS: [(&str, &[&str]); 8] = [
    (
        "fuel",
        &[
            "What is the refueling charge?",
            "Can the customer prepay for fuel?",
            "How is fuel level checked at return?",
        ],
    ),
    (
        "payments",
        &[
            "Which cards are accepted for the deposit?",
            "When is the deposit hold released?",
            "Can the customer pay with a debit card?",
        ],
    ),
    (
        "insurance",
        &[
            "What does the collision damage waiver cover?",
            "What is the excess without extra cover?",
            "Is theft protection included?",
        ],
    ),
    (
        "damage",
        &[
            "How do I record damage at pickup?",
            "What happens if the customer disputes a damage charge?",
            "Who handles windscreen chips?",
        ],
    ),
    (
        "returns",
        &[
            "What is the grace period for late returns?",
            "Can the car be returned after hours?",
            "How are one way returns charged?",
        ],
    ),
    (
        "bookings",
        &[
            "How do I extend a rental?",
            "What is the cancellation policy?",
            "How are no shows handled?",
        ],
    ),
    (
        "drivers",
        &[
            "Is there a young driver surcharge?",
            "How do I add an additional driver?",
            "Which licences are accepted?",
        ],
    ),
    (
        "vehicles",
        &[
            "How do I offer an upgrade?",
            "Can customers request a specific model?",
            "Are child seats available?",
        ],
    ),
];

fn category_followups(category: &str) -> &'static [&'static str] {
    let category = category.trim().to_lowercase();
    CATEGORY_FOLLOWUPS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, suggestions)| *suggestions)
        .unwrap_or(&[])
}

pub fn generate_followups(
    query: &str,
    matched: &[Document],
    all_documents: &[Document],
) -> Vec<String> {
    generate_followups_with_limit(query, matched, all_documents, DEFAULT_FOLLOWUP_LIMIT)
}

pub fn generate_followups_with_limit(
    query: &str,
    matched: &[Document],
    all_documents: &[Document],
    limit: usize,
) -> Vec<String> {
    let matched_ids: HashSet<&str> = matched.iter().map(|document| document.id.as_str()).collect();
    let mut candidates: Vec<String> = Vec::new();

    for document in matched {
        for related_id in &document.related_document_ids {
            if matched_ids.contains(related_id.as_str()) {
                continue;
            }
            if let Some(related) = all_documents.iter().find(|other| &other.id == related_id) {
                candidates.push(format!("What about {}?", related.title));
            }
        }
    }

    let echo: String = query
        .trim()
        .to_lowercase()
        .chars()
        .take(QUERY_ECHO_PREFIX_CHARS)
        .collect();

    for document in matched {
        for suggestion in category_followups(&document.category) {
            if !echo.is_empty() && suggestion.to_lowercase().contains(&echo) {
                continue;
            }
            candidates.push((*suggestion).to_string());
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .take(limit)
        .collect()
}
