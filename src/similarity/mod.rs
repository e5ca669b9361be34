//! Similarity between preference models
//!
//! Similarities are computed over weight vectors that already lie on the
//! simplex; no renormalization happens here. Each measure declares which
//! direction means "closer".

/// Closeness of two models' weight vectors
pub trait Similarity: Send + Sync {
    /// Similarity (or distance) between two weight vectors
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64;

    /// Whether smaller values mean closer models
    fn is_less_meaning_closer(&self) -> bool;
}

/// Euclidean distance (smaller is closer)
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Similarity for Euclidean {
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn is_less_meaning_closer(&self) -> bool {
        true
    }
}

/// Cosine similarity (larger is closer)
///
/// A zero vector has similarity 0 with everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cosine;

impl Similarity for Cosine {
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
        if na == 0.0 || nb == 0.0 {
            return 0.0;
        }
        dot / (na * nb)
    }

    fn is_less_meaning_closer(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean() {
        let d = Euclidean.similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert_relative_eq!(d, 2.0_f64.sqrt());
        assert_eq!(Euclidean.similarity(&[0.3, 0.7], &[0.3, 0.7]), 0.0);
        assert!(Euclidean.is_less_meaning_closer());
    }

    #[test]
    fn test_cosine() {
        assert_relative_eq!(Cosine.similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_relative_eq!(Cosine.similarity(&[0.5, 0.5], &[0.5, 0.5]), 1.0);
        assert_relative_eq!(
            Cosine.similarity(&[1.0, 0.0], &[0.5, 0.5]),
            0.5_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(Cosine.similarity(&[0.0, 0.0], &[0.5, 0.5]), 0.0);
        assert!(!Cosine.is_less_meaning_closer());
    }

    #[test]
    fn test_symmetry() {
        let a = [0.2, 0.3, 0.5];
        let b = [0.6, 0.1, 0.3];
        assert_eq!(Euclidean.similarity(&a, &b), Euclidean.similarity(&b, &a));
        assert_eq!(Cosine.similarity(&a, &b), Cosine.similarity(&b, &a));
    }
}
