//! Selection operators
//!
//! Populations are ranked best first, so selection works on positions: a
//! lower position is a better member.

use rand::{Rng, RngCore};

use crate::operators::traits::SelectionOperator;

/// Tournament selection operator
///
/// Draws `tournament_size` positions uniformly and independently (with
/// replacement) and returns the best one, i.e. the lowest position. For a
/// population of size `m` and a binary tournament, position `i` is chosen with
/// probability `(2(m - i) - 1) / m^2`.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    /// Tournament size (number of draws)
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self { tournament_size }
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary() -> Self {
        Self::new(2)
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::binary()
    }
}

impl SelectionOperator for TournamentSelection {
    fn select(&self, population_size: usize, rng: &mut dyn RngCore) -> usize {
        assert!(population_size > 0, "Population cannot be empty");

        (0..self.tournament_size)
            .map(|_| rng.gen_range(0..population_size))
            .min()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frequencies(selection: &TournamentSelection, size: usize, trials: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = vec![0usize; size];
        for _ in 0..trials {
            counts[selection.select(size, &mut rng)] += 1;
        }
        counts.iter().map(|&c| c as f64 / trials as f64).collect()
    }

    #[test]
    fn test_tournament_selection_selects_valid_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let selection = TournamentSelection::new(3);
        for _ in 0..100 {
            assert!(selection.select(10, &mut rng) < 10);
        }
    }

    #[test]
    fn test_tournament_size_one_is_uniform() {
        let freq = frequencies(&TournamentSelection::new(1), 4, 20_000);
        for f in freq {
            assert_relative_eq!(f, 0.25, epsilon = 0.02);
        }
    }

    #[test]
    fn test_binary_tournament_distribution() {
        let m = 4;
        let freq = frequencies(&TournamentSelection::binary(), m, 40_000);
        for (i, f) in freq.iter().enumerate() {
            let expected = (2.0 * (m - i) as f64 - 1.0) / (m * m) as f64;
            assert_relative_eq!(*f, expected, epsilon = 0.02);
        }
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let mut rng = StdRng::seed_from_u64(5);
        let selection = TournamentSelection::new(20);
        assert_eq!(selection.select(1, &mut rng), 0);
        assert!(selection.select(3, &mut rng) < 3);
    }

    #[test]
    #[should_panic(expected = "Tournament size must be at least 1")]
    fn test_tournament_size_zero() {
        TournamentSelection::new(0);
    }

    #[test]
    #[should_panic(expected = "Population cannot be empty")]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(42);
        TournamentSelection::binary().select(0, &mut rng);
    }
}
