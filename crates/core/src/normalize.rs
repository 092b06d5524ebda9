use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Counter-desk shorthand. The abbreviation is kept and the expansion appended after it.
pub const ABBREVIATIONS: [(&str, &str); 16] = [
    ("cdw", "collision damage waiver"),
    ("ldw", "loss damage waiver"),
    ("gps", "navigation device"),
    ("pai", "personal accident insurance"),
    ("sli", "supplemental liability insurance"),
    ("tp", "theft protection"),
    ("ota", "online travel agency"),
    ("dl", "driving license"),
    ("idp", "international driving permit"),
    ("ow", "one way"),
    ("ev", "electric vehicle"),
    ("fpo", "fuel purchase option"),
    ("res", "reservation"),
    ("vin", "vehicle identification number"),
    ("dmg", "damage"),
    ("ins", "insurance"),
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are",
        "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
        "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
        "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
        "his", "how", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more",
        "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
        "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

static ABBREVIATION_PATTERNS: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .filter_map(|(abbreviation, expansion)| {
            Regex::new(&format!(r"\b{}\b", regex::escape(abbreviation)))
                .ok()
                .map(|pattern| (pattern, format!("$0 {expansion}")))
        })
        .collect()
});

static TOKEN_DELIMITERS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[\s\p{P}]+").ok());

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

pub fn rewrite_query(raw: &str) -> String {
    let mut rewritten = raw.trim().to_lowercase();
    for (pattern, replacement) in ABBREVIATION_PATTERNS.iter() {
        if pattern.is_match(&rewritten) {
            rewritten = pattern
                .replace_all(&rewritten, replacement.as_str())
                .into_owned();
        }
    }
    rewritten
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let pieces: Vec<&str> = match TOKEN_DELIMITERS.as_ref() {
        Some(delimiters) => delimiters.split(&lowered).collect(),
        None => lowered
            .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .collect(),
    };

    pieces
        .into_iter()
        .filter(|token| token.chars().count() > 1)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_are_kept_and_expanded() {
        let rewritten = rewrite_query("  Is CDW mandatory? ");
        assert_eq!(rewritten, "is cdw collision damage waiver mandatory?");
    }

    #[test]
    fn abbreviations_only_expand_whole_words() {
        assert_eq!(rewrite_query("gpsx resort"), "gpsx resort");
        assert_eq!(
            rewrite_query("gps, gps"),
            "gps navigation device, gps navigation device"
        );
    }

    #[test]
    fn tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("What is the fuel-policy for a 4x4 in Spain?");
        assert_eq!(tokens, vec!["fuel", "policy", "4x4", "spain"]);
    }

    #[test]
    fn tokenize_empty_input_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ?! ").is_empty());
    }

    #[test]
    fn bigrams_pair_adjacent_tokens() {
        let tokens = tokenize("credit card deposit");
        assert_eq!(bigrams(&tokens), vec!["credit card", "card deposit"]);
        assert!(bigrams(&tokens[..1]).is_empty());
    }
}
