use crate::normalize::{bigrams, rewrite_query, tokenize};
use crate::synonyms::expand_with_synonyms;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub raw: String,
    pub rewritten: String,
    pub tokens: Vec<String>,
    pub expanded: Vec<String>,
    pub bigrams: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let rewritten = rewrite_query(raw);
        let tokens = tokenize(&rewritten);
        let expanded = expand_with_synonyms(&tokens);
        let bigrams = bigrams(&tokens);

        Self {
            raw: raw.to_string(),
            rewritten,
            tokens,
            expanded,
            bigrams,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Query;

    #[test]
    fn parse_derives_all_forms() {
        let query = Query::parse("CDW deposit hold?");
        assert_eq!(query.rewritten, "cdw collision damage waiver deposit hold?");
        assert_eq!(
            query.tokens,
            vec!["cdw", "collision", "damage", "waiver", "deposit", "hold"]
        );
        assert!(query.expanded.contains(&"preauth".to_string()));
        assert!(query.expanded.contains(&"insurance".to_string()));
        assert_eq!(query.bigrams[0], "cdw collision");
    }

    #[test]
    fn blank_query_is_empty() {
        assert!(Query::parse("   ").is_empty());
        assert!(Query::parse("the a of").is_empty());
    }
}
