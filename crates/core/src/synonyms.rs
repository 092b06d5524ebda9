use std::collections::HashSet;

pub const SYNONYM_CLUSTERS: [(&str, &[&str]); 18] = [
    (
        "deposit",
        &["hold", "preauth", "authorization", "block", "security deposit"],
    ),
    (
        "fuel",
        &["petrol", "gas", "gasoline", "diesel", "refuel", "refueling", "tank"],
    ),
    (
        "damage",
        &["scratch", "dent", "accident", "collision", "repair"],
    ),
    (
        "insurance",
        &["coverage", "waiver", "protection", "cdw", "ldw"],
    ),
    ("cancel", &["cancellation", "refund", "no show", "noshow"]),
    ("extend", &["extension", "prolong", "keep longer"]),
    ("late", &["delay", "delayed", "overdue", "grace"]),
    ("return", &["dropoff", "drop", "drop off", "checkin"]),
    ("pickup", &["collect", "collection", "pick up", "checkout"]),
    ("license", &["licence", "permit", "idp"]),
    ("young", &["underage", "age", "surcharge", "young driver"]),
    ("driver", &["additional", "second driver", "named driver"]),
    ("payment", &["card", "credit", "debit", "pay", "charge"]),
    ("toll", &["tolls", "motorway", "highway", "transponder"]),
    ("mileage", &["kilometers", "km", "miles", "unlimited"]),
    ("child", &["baby", "infant", "booster", "child seat"]),
    (
        "breakdown",
        &["roadside", "assistance", "tow", "flat", "battery"],
    ),
    ("upgrade", &["downgrade", "category", "class"]),
];

pub fn expand_with_synonyms(tokens: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut expanded = Vec::with_capacity(tokens.len());

    for token in tokens {
        if seen.insert(token.clone()) {
            expanded.push(token.clone());
        }
    }

    for token in tokens {
        for (key, synonyms) in SYNONYM_CLUSTERS.iter() {
            let matches_cluster =
                token == key || synonyms.iter().any(|synonym| token == synonym);
            if !matches_cluster {
                continue;
            }

            for term in std::iter::once(key).chain(synonyms.iter()) {
                if seen.insert((*term).to_string()) {
                    expanded.push((*term).to_string());
                }
            }
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn cluster_key_adds_synonyms() {
        let expanded = expand_with_synonyms(&tokens(&["deposit"]));
        assert_eq!(expanded[0], "deposit");
        for synonym in ["hold", "preauth", "authorization", "block", "security deposit"] {
            assert!(expanded.iter().any(|term| term == synonym), "missing {synonym}");
        }
    }

    #[test]
    fn synonym_adds_key_and_siblings() {
        let expanded = expand_with_synonyms(&tokens(&["petrol"]));
        assert!(expanded.contains(&"fuel".to_string()));
        assert!(expanded.contains(&"diesel".to_string()));
        assert_eq!(expanded[0], "petrol");
    }

    #[test]
    fn output_is_deduplicated() {
        let expanded = expand_with_synonyms(&tokens(&["deposit", "hold", "deposit"]));
        let unique: HashSet<&String> = expanded.iter().collect();
        assert_eq!(unique.len(), expanded.len());
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let input = tokens(&["counter", "opening"]);
        assert_eq!(expand_with_synonyms(&input), input);
    }
}
