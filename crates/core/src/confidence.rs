use crate::models::{Confidence, ScoredDocument};

pub const HIGH_CONFIDENCE_SCORE: f64 = 25.0;
pub const MEDIUM_CONFIDENCE_SCORE: f64 = 12.0;
const HIGH_CONFIDENCE_MIN_RESULTS: usize = 2;

pub fn confidence_for_scores(scores: &[f64]) -> Confidence {
    let Some(&top) = scores.first() else {
        return Confidence::Low;
    };

    if top >= HIGH_CONFIDENCE_SCORE && scores.len() >= HIGH_CONFIDENCE_MIN_RESULTS {
        Confidence::High
    } else if top >= MEDIUM_CONFIDENCE_SCORE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

pub fn get_confidence(ranked: &[ScoredDocument]) -> Confidence {
    let scores: Vec<f64> = ranked.iter().map(|result| result.score).collect();
    confidence_for_scores(&scores)
}

/// Confidence for the result at `rank`: the top result carries the set's band.
pub fn result_confidence(rank: usize, score: f64, overall: Confidence) -> Confidence {
    if rank == 0 {
        overall
    } else if score >= MEDIUM_CONFIDENCE_SCORE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
