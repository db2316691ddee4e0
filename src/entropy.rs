//! Generalized entropy of order alpha.

/// Order-alpha (Tsallis / Havrda-Charvat) entropy of a probability vector.
///
/// Only strictly positive entries contribute:
/// - `alpha == 0`: number of positive entries minus one,
/// - `alpha == 1`: Shannon entropy `-sum p ln p` in nats,
/// - otherwise: `(sum p^alpha - 1) / (1 - alpha)`.
///
/// A vector without positive entries (empty document) has entropy 0 for every alpha.
/// # Example
/// ```
/// use jsd_alpha::h_alpha;
/// let p = [0.5, 0.5, 0.0];
/// assert!((h_alpha(&p, 1.0) - std::f64::consts::LN_2).abs() < 1e-12);
/// assert_eq!(h_alpha(&p, 0.0), 1.0);
/// assert!((h_alpha(&p, 2.0) - 0.5).abs() < 1e-12);
/// ```
pub fn h_alpha(p: &[f64], alpha: f64) -> f64 {
    if !p.iter().any(|&x| x > 0.0) {
        return 0.0;
    }
    let positive = p.iter().copied().filter(|&x| x > 0.0);
    if alpha == 0.0 {
        positive.count() as f64 - 1.0
    } else if alpha == 1.0 {
        -positive.map(|x| x * x.ln()).sum::<f64>()
    } else {
        (positive.map(|x| x.powf(alpha)).sum::<f64>() - 1.0) / (1.0 - alpha)
    }
}

/// `x ln x` with the limit value 0 at `x = 0`.
#[inline]
pub(crate) fn xlnx(x: f64) -> f64 {
    if x > 0.0 { x * x.ln() } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shannon(p: &[f64]) -> f64 {
        let mut h = 0.0;
        for &x in p {
            if x > 0.0 {
                h -= x * x.ln();
            }
        }
        h
    }

    #[test]
    fn test_alpha_one_is_shannon() {
        let dists: [&[f64]; 4] = [
            &[1.0],
            &[0.75, 0.25],
            &[0.1, 0.2, 0.3, 0.4],
            &[0.0, 0.5, 0.0, 0.25, 0.25],
        ];
        for p in dists {
            assert!((h_alpha(p, 1.0) - shannon(p)).abs() < 1e-12);
        }
        assert!((h_alpha(&[0.75, 0.25], 1.0) - 0.562_335_144_618_963).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_zero_counts_support() {
        assert_eq!(h_alpha(&[0.2, 0.0, 0.8], 0.0), 1.0);
        assert_eq!(h_alpha(&[0.25; 4], 0.0), 3.0);
        assert_eq!(h_alpha(&[1.0], 0.0), 0.0);
    }

    #[test]
    fn test_tsallis() {
        // alpha = 2: 1 - sum p^2
        let p = [0.5, 0.25, 0.25];
        assert!((h_alpha(&p, 2.0) - (1.0 - 0.375)).abs() < 1e-12);
        // alpha close to 1 approaches Shannon
        assert!((h_alpha(&p, 1.0 + 1e-7) - shannon(&p)).abs() < 1e-5);
    }

    #[test]
    fn test_empty_document_has_zero_entropy() {
        let zeros = [0.0; 3];
        assert_eq!(h_alpha(&zeros, 1.0), 0.0);
        assert_eq!(h_alpha(&zeros, 2.0), 0.0);
        assert_eq!(h_alpha(&zeros, 0.5), 0.0);
        assert_eq!(h_alpha(&zeros, 0.0), 0.0);
        assert_eq!(h_alpha(&[], 1.0), 0.0);
    }

    #[test]
    fn test_xlnx() {
        assert_eq!(xlnx(0.0), 0.0);
        assert_eq!(xlnx(1.0), 0.0);
        assert!((xlnx(0.5) + 0.5 * std::f64::consts::LN_2).abs() < 1e-15);
    }
}
