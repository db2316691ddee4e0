#![forbid(unsafe_code)]
//! # jsd_alpha
//!
//! Generalized (order-alpha) Jensen-Shannon divergence between two word-count
//! files, following Gerlach, Font-Clos, Altmann, Phys. Rev. X 6 (2016) 021009.
//!
//! The pipeline is: read two count files ([`read_counts`]), align them over the
//! sorted union of their tokens ([`AlignedPair`]), and compute the divergence of
//! one or several orders alpha ([`jsd_alpha`]). A shuffling null model
//! ([`null_model::sample`]) estimates the divergence expected from finite
//! sampling alone.
//!
//! ## Example
//! ```
//! use jsd_alpha::{Alpha, AlignedPair, CountMap, JsdOptions, jsd_alpha};
//! let m1: CountMap = vec![("a", 3), ("b", 1)].into_iter().collect();
//! let m2: CountMap = vec![("a", 1), ("b", 3)].into_iter().collect();
//! let options = JsdOptions {
//!     alpha: Alpha::Scalar(1.0),
//!     weights: false,
//!     normalized: true,
//! };
//! let d = jsd_alpha(&AlignedPair::from_maps(&m1, &m2), &options);
//! assert!((d.as_scalar().unwrap() - 0.1887).abs() < 1e-4);
//! ```

use std::path::Path;

pub mod counts;
pub mod divergence;
pub mod entropy;
pub mod error;
pub mod export;
pub mod null_model;
pub mod support;

pub use counts::{CountMap, parse_counts, read_counts};
pub use divergence::{Alpha, Jsd, JsdOptions, d_alpha, d_alpha_max, jsd_alpha};
pub use entropy::h_alpha;
pub use error::{JsdError, Result};
pub use export::{ExportFormat, Report, save_report};
pub use null_model::{NullModelOptions, NullModelResult, PercentileValue, percentile};
pub use support::AlignedPair;

/// Divergence between two count maps already in memory.
pub fn jsdalpha_counts(map1: &CountMap, map2: &CountMap, options: &JsdOptions) -> Jsd {
    jsd_alpha(&AlignedPair::from_maps(map1, map2), options)
}

/// Divergence of order `options.alpha` between two count files.
pub fn jsdalpha<P: AsRef<Path>, Q: AsRef<Path>>(
    f1: P,
    f2: Q,
    options: &JsdOptions,
) -> Result<Jsd> {
    let map1 = read_counts(f1)?;
    let map2 = read_counts(f2)?;
    Ok(jsdalpha_counts(&map1, &map2, options))
}

/// Null-model mean and percentiles for two count files.
///
/// Returns `Ok(None)` when `null.n_rep` is 0.
pub fn jsdalpha_null<P: AsRef<Path>, Q: AsRef<Path>>(
    f1: P,
    f2: Q,
    options: &JsdOptions,
    null: &NullModelOptions,
) -> Result<Option<NullModelResult>> {
    let map1 = read_counts(f1)?;
    let map2 = read_counts(f2)?;
    null_model::sample(&map1, &map2, options, null)
}

/// Reads both files once and computes the divergence together with the
/// null model, if requested.
pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(
    f1: P,
    f2: Q,
    options: &JsdOptions,
    null: &NullModelOptions,
) -> Result<Report> {
    let map1 = read_counts(f1.as_ref())?;
    let map2 = read_counts(f2.as_ref())?;
    let jsd = jsdalpha_counts(&map1, &map2, options);
    let null_model = null_model::sample(&map1, &map2, options, null)?;
    Ok(Report {
        file1: f1.as_ref().to_path_buf(),
        file2: f2.as_ref().to_path_buf(),
        options: options.clone(),
        jsd,
        null_model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_counts(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_jsdalpha_files() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = write_counts(dir.path(), "f1.txt", "a 3\nb 1\n");
        let f2 = write_counts(dir.path(), "f2.txt", "a 1\nb 3\n");
        let options = JsdOptions::default();
        let d = jsdalpha(&f1, &f2, &options).unwrap().as_scalar().unwrap();
        assert!((d - 0.130812035941137).abs() < 1e-12);
    }

    #[test]
    fn test_jsdalpha_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = write_counts(dir.path(), "f1.txt", "a 3\n");
        let err = jsdalpha(&f1, dir.path().join("nope.txt"), &JsdOptions::default()).unwrap_err();
        assert!(matches!(err, JsdError::Io { .. }));
    }

    #[test]
    fn test_jsdalpha_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = write_counts(dir.path(), "f1.txt", "a 3\n");
        let f2 = write_counts(dir.path(), "f2.txt", "a 1\nb three\n");
        let err = jsdalpha(&f1, &f2, &JsdOptions::default()).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn test_compare_builds_report() {
        let dir = tempfile::tempdir().unwrap();
        let f1 = write_counts(dir.path(), "f1.txt", "a 3\nb 1\n");
        let f2 = write_counts(dir.path(), "f2.txt", "\n");
        let null = NullModelOptions {
            n_rep: 5,
            seed: Some(11),
            ..Default::default()
        };
        let report = compare(&f1, &f2, &JsdOptions::default(), &null).unwrap();
        assert_eq!(report.file1, f1);
        assert!(report.null_model.is_some());
        let expected = jsdalpha_null(&f1, &f2, &JsdOptions::default(), &null).unwrap();
        assert_eq!(report.null_model, expected);
    }
}
