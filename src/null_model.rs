//! Shuffling null model.
//!
//! All tokens of both sources are pooled, shuffled, and split back into groups
//! of the original sizes N1 and N2. The divergence between the two groups is
//! what finite sampling alone produces when both sources share one generating
//! distribution. Repeating this `n_rep` times gives a mean and percentiles.

use std::collections::HashMap;

use log::{debug, info};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::counts::CountMap;
use crate::divergence::{Jsd, JsdOptions, jsd_alpha};
use crate::error::{JsdError, Result};
use crate::support::AlignedPair;

/// Percentiles reported when none are requested: a 95% interval.
pub const DEFAULT_PERCENTILES: [f64; 2] = [2.5, 97.5];

#[derive(Debug, Clone, PartialEq)]
pub struct NullModelOptions {
    /// Number of random realizations, 0 disables the null model
    pub n_rep: usize,
    /// Percentiles in [0, 100]
    pub percentiles: Vec<f64>,
    /// Seed for the shuffles, drawn at random when `None`
    pub seed: Option<u64>,
    /// Run repetitions on the rayon thread pool
    pub parallel: bool,
}

impl Default for NullModelOptions {
    fn default() -> Self {
        Self {
            n_rep: 0,
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileValue {
    pub q: f64,
    pub value: Jsd,
}

/// Mean and percentiles of the divergence over all realizations,
/// each shaped like the requested alpha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullModelResult {
    pub n_rep: usize,
    /// Seed that reproduces this result
    pub seed: u64,
    pub mean: Jsd,
    pub percentiles: Vec<PercentileValue>,
}

/// Runs the null model for two count maps.
///
/// Returns `Ok(None)` when `null.n_rep` is 0, without looking at the percentiles.
/// Repetition `i` shuffles with its own ChaCha stream `i` under the common seed,
/// so the result depends only on the seed and not on whether repetitions run
/// in parallel.
pub fn sample(
    map1: &CountMap,
    map2: &CountMap,
    options: &JsdOptions,
    null: &NullModelOptions,
) -> Result<Option<NullModelResult>> {
    if null.n_rep == 0 {
        return Ok(None);
    }
    if let Some(&q) = null
        .percentiles
        .iter()
        .find(|q| !(0.0..=100.0).contains(*q))
    {
        return Err(JsdError::InvalidPercentile(q));
    }

    let pool = TokenPool::new(map1, map2);
    let seed = null.seed.unwrap_or_else(rand::random);
    info!(
        "null model: {} realizations over {} tokens (seed {seed}, parallel {})",
        null.n_rep,
        pool.tokens.len(),
        null.parallel
    );

    let realizations: Vec<Vec<f64>> = if null.parallel {
        (0..null.n_rep)
            .into_par_iter()
            .map_init(
                || Vec::with_capacity(pool.tokens.len()),
                |buf, rep| pool.realization(buf, seed, rep, options),
            )
            .collect()
    } else {
        let mut buf = Vec::with_capacity(pool.tokens.len());
        (0..null.n_rep)
            .map(|rep| pool.realization(&mut buf, seed, rep, options))
            .collect()
    };

    let columns = transpose(&realizations, options.alpha.values().len());
    let means = columns
        .iter()
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect();
    let percentiles = null
        .percentiles
        .iter()
        .map(|&q| PercentileValue {
            q,
            value: options
                .alpha
                .reshape(columns.iter().map(|c| percentile(c, q)).collect()),
        })
        .collect();

    Ok(Some(NullModelResult {
        n_rep: null.n_rep,
        seed,
        mean: options.alpha.reshape(means),
        percentiles,
    }))
}

/// Percentile `q` (in [0, 100]) of sorted values, interpolating linearly
/// between the two closest ranks. Returns NaN for an empty slice.
/// # Example
/// ```
/// use jsd_alpha::percentile;
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&values, 50.0), 2.5);
/// assert_eq!(percentile(&values, 100.0), 4.0);
/// ```
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = q.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Pooled tokens of both sources, as indices into their sorted joint vocabulary.
struct TokenPool {
    tokens: Vec<usize>,
    vocabulary_len: usize,
    n1: usize,
}

impl TokenPool {
    fn new(map1: &CountMap, map2: &CountMap) -> Self {
        let mut vocabulary: Vec<&str> = map1.tokens().chain(map2.tokens()).collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, &w)| (w, i))
            .collect();

        let mut tokens = Vec::new();
        // sorted order keeps the pool identical between runs
        for map in [map1, map2] {
            let mut entries: Vec<(&str, u64)> = map.iter().collect();
            entries.sort_unstable();
            for (w, c) in entries {
                let i = index[w];
                tokens.extend(std::iter::repeat_n(i, c as usize));
            }
        }
        debug!(
            "token pool of {} tokens over {} symbols",
            tokens.len(),
            vocabulary.len()
        );
        Self {
            tokens,
            vocabulary_len: vocabulary.len(),
            n1: map1.total() as usize,
        }
    }

    fn realization(
        &self,
        buf: &mut Vec<usize>,
        seed: u64,
        rep: usize,
        options: &JsdOptions,
    ) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(rep as u64);
        buf.clear();
        buf.extend_from_slice(&self.tokens);
        buf.shuffle(&mut rng);

        let (counts1, counts2) = self.partition(buf);
        let pair = AlignedPair::from_counts(&counts1, &counts2);
        match jsd_alpha(&pair, options) {
            Jsd::Scalar(d) => vec![d],
            Jsd::Sequence(v) => v,
        }
    }

    /// Tallies the first N1 tokens and the remaining N2 tokens.
    fn partition(&self, shuffled: &[usize]) -> (Vec<u64>, Vec<u64>) {
        let (group1, group2) = shuffled.split_at(self.n1);
        (
            tally(group1, self.vocabulary_len),
            tally(group2, self.vocabulary_len),
        )
    }
}

fn tally(group: &[usize], vocabulary_len: usize) -> Vec<u64> {
    let mut counts = vec![0u64; vocabulary_len];
    for &i in group {
        counts[i] += 1;
    }
    counts
}

/// One sorted column per alpha value.
fn transpose(realizations: &[Vec<f64>], width: usize) -> Vec<Vec<f64>> {
    (0..width)
        .map(|k| {
            let mut column: Vec<f64> = realizations.iter().map(|r| r[k]).collect();
            column.sort_by(f64::total_cmp);
            column
        })
        .collect()
}
