//! Rendering and exporting comparison reports.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use csv::WriterBuilder;
use log::info;
use serde::Serialize;

use crate::divergence::{Jsd, JsdOptions};
use crate::error::{JsdError, Result};
use crate::null_model::NullModelResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// Result of comparing two count files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub options: JsdOptions,
    pub jsd: Jsd,
    pub null_model: Option<NullModelResult>,
}

impl Report {
    /// Human readable summary, as printed by the command line tool.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "For alpha = {}, normalized = {}, weighted = {}:\n\nJSD = {}\n",
            self.options.alpha, self.options.normalized, self.options.weights, self.jsd
        );
        if let Some(null) = &self.null_model {
            let qs: Vec<String> = null.percentiles.iter().map(|p| p.q.to_string()).collect();
            let values: Vec<String> = null
                .percentiles
                .iter()
                .map(|p| p.value.to_string())
                .collect();
            out.push_str(&format!(
                "\nRandom null model with {} realizations yields:\n\
                 JSD null average: {}\n\
                 JSD null percentiles [{}]: [{}]\n\
                 JSD null seed: {}\n",
                null.n_rep,
                null.mean,
                qs.join(", "),
                values.join(", "),
                null.seed
            ));
        }
        out
    }

    /// Table with one row per alpha value: alpha, jsd, then the null-model mean
    /// and one column per percentile if the null model was run.
    fn rows(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let mut header = vec!["alpha".to_string(), "jsd".to_string()];
        if let Some(null) = &self.null_model {
            header.push("null_mean".to_string());
            header.extend(null.percentiles.iter().map(|p| format!("null_p{}", p.q)));
        }

        let rows = self
            .options
            .alpha
            .values()
            .iter()
            .enumerate()
            .map(|(i, alpha)| {
                let mut row = vec![alpha.to_string(), self.jsd.as_slice()[i].to_string()];
                if let Some(null) = &self.null_model {
                    row.push(null.mean.as_slice()[i].to_string());
                    row.extend(
                        null.percentiles
                            .iter()
                            .map(|p| p.value.as_slice()[i].to_string()),
                    );
                }
                row
            })
            .collect();
        (header, rows)
    }
}

/// Writes the report into `dir` as `<stem1>_vs_<stem2>_<timestamp>_jsd.<ext>`.
/// Returns the path of the created file.
pub fn save_report(report: &Report, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    let local: DateTime<Local> = Local::now();
    let filename = format!(
        "{}_vs_{}_{}_jsd.{}",
        file_stem(&report.file1),
        file_stem(&report.file2),
        local.format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = dir.join(filename);

    match format {
        ExportFormat::Txt => {
            let mut file = File::create(&path).map_err(|e| JsdError::io(&path, e))?;
            file.write_all(report.to_text().as_bytes())
                .map_err(|e| JsdError::io(&path, e))?;
        }
        ExportFormat::Json => {
            let file = File::create(&path).map_err(|e| JsdError::io(&path, e))?;
            serde_json::to_writer_pretty(file, report)?;
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
            let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(&path)?;
            let (header, rows) = report.rows();
            writer.write_record(&header)?;
            for row in rows {
                writer.write_record(&row)?;
            }
            writer.flush().map_err(|e| JsdError::io(&path, e))?;
        }
    }
    info!("report written to {}", path.display());
    Ok(path)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "counts".to_string())
}
