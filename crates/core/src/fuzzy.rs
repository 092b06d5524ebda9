pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Words shorter than this only ever match exactly.
const MIN_FUZZY_LENGTH: usize = 3;

/// Length gap above which the gap itself is returned instead of the real distance.
const LENGTH_GAP_SHORT_CIRCUIT: usize = 3;

/// Edit distance over chars. Strings whose lengths differ by more than three
/// report the length difference, which underestimates the true distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let left: Vec<char> = a.chars().collect();
    let right: Vec<char> = b.chars().collect();

    let gap = left.len().abs_diff(right.len());
    if gap > LENGTH_GAP_SHORT_CIRCUIT {
        return gap;
    }
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    let mut previous: Vec<usize> = (0..=right.len()).collect();
    let mut current = vec![0usize; right.len() + 1];

    for (i, left_char) in left.iter().enumerate() {
        current[0] = i + 1;
        for (j, right_char) in right.iter().enumerate() {
            let substitution = previous[j] + usize::from(left_char != right_char);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[right.len()]
}

pub fn fuzzy_match(a: &str, b: &str, max_distance: usize) -> bool {
    if a == b {
        return true;
    }
    if a.chars().count() < MIN_FUZZY_LENGTH || b.chars().count() < MIN_FUZZY_LENGTH {
        return false;
    }
    levenshtein(a, b) <= max_distance
}
