//! Configuration file loading and command line overrides.
//!
//! ```toml
//! [pipeline]
//! date_formats = ["%d/%m/%Y", "%Y-%m-%d"]
//! outlier_percentile = 95.0
//! dedupe = true
//!
//! [mapping]
//! valor = "VALOR PAGO"
//! data = "DATA PAGAMENTO"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use gastos_map::MappingEngine;
use gastos_model::{ColumnMapping, PipelineOptions};
use serde::Deserialize;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub pipeline: PipelineOptions,
    /// Canonical field (English or Portuguese name) to source column.
    pub mapping: BTreeMap<String, String>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    pub fn column_mapping(&self) -> Result<ColumnMapping> {
        MappingEngine::build(&self.mapping).context("invalid [mapping] table")
    }
}

/// Pipeline settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct PipelineOverrides {
    pub date_formats: Vec<String>,
    pub percentile: Option<f64>,
    pub dedupe: bool,
}

/// Apply command line settings on top of file settings and validate the result.
pub fn apply_overrides(
    mut options: PipelineOptions,
    overrides: &PipelineOverrides,
) -> Result<PipelineOptions> {
    if !overrides.date_formats.is_empty() {
        options.date_formats.clone_from(&overrides.date_formats);
    }
    if let Some(percentile) = overrides.percentile {
        options.outlier_percentile = percentile;
    }
    if overrides.dedupe {
        options.dedupe = true;
    }
    options.validate()?;
    Ok(options)
}

/// Parse `field=COLUMN` arguments.
pub fn parse_map_args(values: &[String]) -> Result<Vec<(String, String)>> {
    values
        .iter()
        .map(|value| {
            let Some((field, column)) = value.split_once('=') else {
                bail!("invalid --map '{value}', expected FIELD=COLUMN");
            };
            Ok((field.trim().to_string(), column.trim().to_string()))
        })
        .collect()
}

/// Explicit mapping from `--map` arguments, falling back to the config file
/// for fields they leave out.
pub fn explicit_mapping(config: &AppConfig, map_args: &[String]) -> Result<ColumnMapping> {
    let cli = MappingEngine::build(parse_map_args(map_args)?).context("invalid --map")?;
    let merged = cli.merged_with(&config.column_mapping()?);
    let pairs: Vec<(&str, &str)> = merged
        .entries()
        .filter_map(|(field, column)| column.map(|column| (field.as_str(), column)))
        .collect();
    MappingEngine::build(pairs).context("--map and [mapping] disagree")
}
