//! Vector scoring helpers.

/// Compute cosine similarity between two vectors.
///
/// Returns a value in `[-1.0, 1.0]`:
/// - `1.0` = identical direction
/// - `0.0` = orthogonal (no shared terms)
///
/// Returns `0.0` for empty vectors, vectors of different lengths, or when
/// either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Scores closer than this are treated as equal.
///
/// Symmetric rows can differ in the last bit depending on summation order.
pub const TIE_EPSILON: f64 = 1e-12;

/// Index and value of the highest score.
///
/// Ties (within [`TIE_EPSILON`]) resolve to the earliest index, so catalog
/// order decides between equally similar entries. `NaN` scores never win.
pub fn best_match(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if s <= top + TIE_EPSILON || s.is_nan() => {}
            None if s.is_nan() => {}
            _ => best = Some((i, s)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_length_independent() {
        let a = vec![1.0, 1.0];
        let b = vec![5.0, 5.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
    }

    #[test]
    fn test_cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_best_match_first_of_ties() {
        assert_eq!(best_match(&[0.2, 0.7, 0.7, 0.1]), Some((1, 0.7)));
    }

    #[test]
    fn test_best_match_near_tie_keeps_first() {
        let a = 0.449_f64;
        assert_eq!(best_match(&[a, a + 1e-15]), Some((0, a)));
        assert_eq!(best_match(&[a, a + 1e-6]), Some((1, a + 1e-6)));
    }

    #[test]
    fn test_best_match_all_zero_picks_first() {
        assert_eq!(best_match(&[0.0, 0.0, 0.0]), Some((0, 0.0)));
    }

    #[test]
    fn test_best_match_empty() {
        assert_eq!(best_match(&[]), None);
    }

    #[test]
    fn test_best_match_skips_nan() {
        assert_eq!(best_match(&[f64::NAN, 0.4, 0.3]), Some((1, 0.4)));
    }
}
