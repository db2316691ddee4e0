//! Probability vectors over a shared, sorted support.

use log::{debug, warn};

use crate::counts::CountMap;

/// Two probability vectors indexed by the same symbols.
///
/// Index `i` of `p1` and `p2` always refers to the same symbol, a symbol absent
/// from one source carries probability 0 there. The fields are private so that
/// the only way to obtain a pair is through one of the aligning constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    p1: Vec<f64>,
    p2: Vec<f64>,
    n1: u64,
    n2: u64,
}

impl AlignedPair {
    /// Aligns two count maps over the lexicographically sorted union of their tokens.
    /// # Example
    /// ```
    /// use jsd_alpha::{AlignedPair, CountMap};
    /// let m1: CountMap = vec![("a", 3), ("b", 1)].into_iter().collect();
    /// let m2: CountMap = vec![("b", 2), ("c", 2)].into_iter().collect();
    /// let pair = AlignedPair::from_maps(&m1, &m2);
    /// assert_eq!(pair.p1(), &[0.75, 0.25, 0.0]);
    /// assert_eq!(pair.p2(), &[0.0, 0.5, 0.5]);
    /// ```
    pub fn from_maps(map1: &CountMap, map2: &CountMap) -> Self {
        let mut vocabulary: Vec<&str> = map1.tokens().chain(map2.tokens()).collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        let counts1: Vec<u64> = vocabulary
            .iter()
            .map(|w| map1.get(w).unwrap_or(0))
            .collect();
        let counts2: Vec<u64> = vocabulary
            .iter()
            .map(|w| map2.get(w).unwrap_or(0))
            .collect();
        debug!("aligned support of {} symbols", vocabulary.len());
        Self::from_counts(&counts1, &counts2)
    }

    /// Normalizes two count vectors that are already indexed by the same symbols.
    ///
    /// A source with zero tokens yields an all-zero vector.
    pub(crate) fn from_counts(counts1: &[u64], counts2: &[u64]) -> Self {
        debug_assert_eq!(
            counts1.len(),
            counts2.len(),
            "count vectors must share one support"
        );
        let n1: u64 = counts1.iter().sum();
        let n2: u64 = counts2.iter().sum();
        Self {
            p1: normalize(counts1, n1),
            p2: normalize(counts2, n2),
            n1,
            n2,
        }
    }

    pub fn p1(&self) -> &[f64] {
        &self.p1
    }

    pub fn p2(&self) -> &[f64] {
        &self.p2
    }

    /// Token totals (N1, N2) of the two sources.
    pub fn totals(&self) -> (u64, u64) {
        (self.n1, self.n2)
    }

    /// Size of the shared support.
    pub fn len(&self) -> usize {
        self.p1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p1.is_empty()
    }

    /// Weight pi1 of the first distribution.
    ///
    /// With `by_tokens` the weight is N1 / (N1 + N2), otherwise both sources weigh 0.5.
    pub fn weight(&self, by_tokens: bool) -> f64 {
        if !by_tokens {
            return 0.5;
        }
        if self.n1 == 0 && self.n2 == 0 {
            warn!("no tokens in either source, falling back to equal weights");
            return 0.5;
        }
        // each total fits in u64 but their sum may not
        let n1 = self.n1 as f64;
        n1 / (n1 + self.n2 as f64)
    }

    /// Weighted mixture pi1 * p1 + (1 - pi1) * p2.
    pub fn mixture(&self, pi1: f64) -> Vec<f64> {
        let pi2 = 1.0 - pi1;
        self.p1
            .iter()
            .zip(&self.p2)
            .map(|(&a, &b)| pi1 * a + pi2 * b)
            .collect()
    }
}

fn normalize(counts: &[u64], total: u64) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    let total = total as f64;
    counts.iter().map(|&c| c as f64 / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, u64)]) -> CountMap {
        pairs.iter().map(|&(w, c)| (w, c)).collect()
    }

    #[test]
    fn test_same_support_sums_to_one() {
        let m1 = map(&[("the", 5), ("cat", 2), ("sat", 1)]);
        let m2 = map(&[("the", 3), ("dog", 4), ("ran", 1), ("sat", 2)]);
        let pair = AlignedPair::from_maps(&m1, &m2);
        assert_eq!(pair.len(), 5);
        assert_eq!(pair.p2().len(), 5);
        assert!((pair.p1().iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((pair.p2().iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(pair.totals(), (8, 10));
    }

    #[test]
    fn test_sorted_order() {
        // union sorted: a, b, c, d
        let m1 = map(&[("d", 1), ("b", 1)]);
        let m2 = map(&[("c", 1), ("a", 3)]);
        let pair = AlignedPair::from_maps(&m1, &m2);
        assert_eq!(pair.p1(), &[0.0, 0.5, 0.0, 0.5]);
        assert_eq!(pair.p2(), &[0.75, 0.0, 0.25, 0.0]);
    }

    #[test]
    fn test_empty_source_is_all_zero() {
        let pair = AlignedPair::from_maps(&CountMap::new(), &map(&[("a", 1), ("b", 3)]));
        assert_eq!(pair.p1(), &[0.0, 0.0]);
        assert_eq!(pair.p2(), &[0.25, 0.75]);

        let both_empty = AlignedPair::from_maps(&CountMap::new(), &CountMap::new());
        assert!(both_empty.is_empty());
    }

    #[test]
    fn test_weights() {
        let pair = AlignedPair::from_maps(&map(&[("a", 1)]), &map(&[("a", 3)]));
        assert_eq!(pair.weight(false), 0.5);
        assert!((pair.weight(true) - 0.25).abs() < 1e-12);

        let empty = AlignedPair::from_counts(&[], &[]);
        assert_eq!(empty.weight(true), 0.5);

        let huge = AlignedPair::from_counts(&[u64::MAX, 0], &[0, u64::MAX]);
        assert_eq!(huge.weight(true), 0.5);
    }

    #[test]
    fn test_mixture() {
        let pair = AlignedPair::from_counts(&[3, 1], &[1, 3]);
        assert_eq!(pair.mixture(0.5), vec![0.5, 0.5]);
        let m = pair.mixture(1.0);
        assert_eq!(m, pair.p1().to_vec());
    }
}
