//! Generalized Jensen-Shannon divergence of order alpha.
//!
//! For weights `pi1` and `pi2 = 1 - pi1` the divergence is
//! `D = H(pi1 p1 + pi2 p2) - pi1 H(p1) - pi2 H(p2)` with `H` the order-alpha
//! entropy from [`crate::entropy`]. The normalized variant divides by the value
//! `D` would take if the two supports were disjoint.
//!
//! See Gerlach, Font-Clos, Altmann, Phys. Rev. X 6 (2016) 021009.

use std::fmt;

use serde::Serialize;

use crate::entropy::{h_alpha, xlnx};
use crate::support::AlignedPair;

/// Order of the entropy: one value, or an ordered list evaluated element-wise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Alpha {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Alpha {
    /// The alpha values in evaluation order.
    pub fn values(&self) -> &[f64] {
        match self {
            Alpha::Scalar(a) => std::slice::from_ref(a),
            Alpha::Sequence(v) => v,
        }
    }

    /// Wraps one result per alpha value into the shape of `self`.
    pub(crate) fn reshape(&self, values: Vec<f64>) -> Jsd {
        debug_assert_eq!(values.len(), self.values().len());
        match self {
            Alpha::Scalar(_) => Jsd::Scalar(values.into_iter().next().unwrap_or(f64::NAN)),
            Alpha::Sequence(_) => Jsd::Sequence(values),
        }
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Alpha::Scalar(1.0)
    }
}

impl From<f64> for Alpha {
    fn from(alpha: f64) -> Self {
        Alpha::Scalar(alpha)
    }
}

impl From<Vec<f64>> for Alpha {
    fn from(alphas: Vec<f64>) -> Self {
        Alpha::Sequence(alphas)
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alpha::Scalar(a) => write!(f, "{a}"),
            Alpha::Sequence(v) => write_list(f, v),
        }
    }
}

/// Divergence result, shaped like the [`Alpha`] it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Jsd {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Jsd {
    /// Values in alpha order.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Jsd::Scalar(d) => std::slice::from_ref(d),
            Jsd::Sequence(v) => v,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Jsd::Scalar(d) => Some(*d),
            Jsd::Sequence(_) => None,
        }
    }
}

impl fmt::Display for Jsd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jsd::Scalar(d) => write!(f, "{d}"),
            Jsd::Sequence(v) => write_list(f, v),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str("]")
}

/// Settings shared by the single computation and the null model.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JsdOptions {
    pub alpha: Alpha,
    /// Weight the sources by their token totals instead of 0.5 each
    pub weights: bool,
    /// Divide by the maximum divergence for the given alpha and weights
    pub normalized: bool,
}

/// Maximum divergence of two distributions with entropies `h1`, `h2` and
/// weights `pi1`, `pi2`, reached when their supports are disjoint.
pub fn d_alpha_max(h1: f64, h2: f64, pi1: f64, pi2: f64, alpha: f64) -> f64 {
    if alpha == 1.0 {
        -xlnx(pi1) - xlnx(pi2)
    } else {
        let a1 = pi1.powf(alpha);
        let a2 = pi2.powf(alpha);
        (a1 - pi1) * h1 + (a2 - pi2) * h2 + (a1 + a2 - 1.0) / (1.0 - alpha)
    }
}

/// Order-alpha divergence of an aligned pair with weight `pi1` on the first source.
///
/// If the maximum divergence is 0 (one weight is 0 at alpha = 1) the normalized
/// value is reported as 0.
/// # Example
/// ```
/// use jsd_alpha::{AlignedPair, CountMap, d_alpha};
/// let m1: CountMap = vec![("a", 3), ("b", 1)].into_iter().collect();
/// let m2: CountMap = vec![("a", 1), ("b", 3)].into_iter().collect();
/// let pair = AlignedPair::from_maps(&m1, &m2);
/// let d = d_alpha(&pair, 1.0, 0.5, false);
/// assert!((d - 0.130812035941137).abs() < 1e-12);
/// ```
pub fn d_alpha(pair: &AlignedPair, alpha: f64, pi1: f64, normalized: bool) -> f64 {
    let pi2 = 1.0 - pi1;
    let h1 = h_alpha(pair.p1(), alpha);
    let h2 = h_alpha(pair.p2(), alpha);
    let h12 = h_alpha(&pair.mixture(pi1), alpha);
    let d = h12 - pi1 * h1 - pi2 * h2;
    if !normalized {
        return d;
    }
    let d_max = d_alpha_max(h1, h2, pi1, pi2, alpha);
    if d_max == 0.0 { 0.0 } else { d / d_max }
}

/// Divergence for every alpha in `options`, sharing one pair and one weight.
pub fn jsd_alpha(pair: &AlignedPair, options: &JsdOptions) -> Jsd {
    let pi1 = pair.weight(options.weights);
    let values = options
        .alpha
        .values()
        .iter()
        .map(|&alpha| d_alpha(pair, alpha, pi1, options.normalized))
        .collect();
    options.alpha.reshape(values)
}
