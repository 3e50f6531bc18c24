// ABOUTME: Line-oriented `key value` parameter file loader for the core's tunable constants
// ABOUTME: Case-insensitive keys; `#`-prefixed and blank lines ignored

use std::fs;
use std::path::Path;

use crate::engine::error::ConfigError;

/// The parameter keys relevant to the core kernel, plus `no_of_iterations`.
/// Rainfall, visualization, and simulator-selection keys are out of scope and
/// not represented here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamFile {
    pub read_path: String,
    pub read_fname: String,
    pub dem_read_extension: String,
    pub no_of_iterations: u64,
    pub hflow_threshold: f64,
    pub water_depth_erosion_threshold: f64,
    pub slope_on_edge_cell: f64,
    pub courant_number: f64,
    pub froude_num_limit: f64,
    pub mannings_n: f64,
}

impl ParamFile {
    /// Parse a line-oriented parameter file: `key value` pairs separated by
    /// whitespace, one per line. Keys are case-insensitive. Lines that are blank
    /// or start with `#` (after trimming) are ignored. Missing required keys are
    /// reported individually as `ConfigError::MissingKey`.
    pub fn load(path: &Path) -> Result<ParamFile, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        let mut read_path = None;
        let mut read_fname = None;
        let mut dem_read_extension = None;
        let mut no_of_iterations = None;
        let mut hflow_threshold = None;
        let mut water_depth_erosion_threshold = None;
        let mut slope_on_edge_cell = None;
        let mut courant_number = None;
        let mut froude_num_limit = None;
        let mut mannings_n = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut parts = trimmed.splitn(2, char::is_whitespace);
            let key = match parts.next() {
                Some(k) => k.to_lowercase(),
                None => continue,
            };
            let value = parts.next().unwrap_or("").trim();
            if value.is_empty() {
                continue;
            }

            macro_rules! parse_f64 {
                ($slot:ident) => {
                    $slot = Some(value.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                        key: key.clone(),
                        value: value.to_string(),
                    })?)
                };
            }

            match key.as_str() {
                "read_path" => read_path = Some(value.to_string()),
                "read_fname" => read_fname = Some(value.to_string()),
                "dem_read_extension" => dem_read_extension = Some(value.to_string()),
                "no_of_iterations" => {
                    no_of_iterations =
                        Some(value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.clone(),
                            value: value.to_string(),
                        })?)
                }
                "hflow_threshold" => parse_f64!(hflow_threshold),
                "water_depth_erosion_threshold" => parse_f64!(water_depth_erosion_threshold),
                "slope_on_edge_cell" => parse_f64!(slope_on_edge_cell),
                "courant_number" => parse_f64!(courant_number),
                "froude_num_limit" => parse_f64!(froude_num_limit),
                "mannings_n" => parse_f64!(mannings_n),
                _ => {} // rainfall/visualization/simulator-selection keys: out of scope
            }
        }

        Ok(ParamFile {
            read_path: read_path.ok_or(ConfigError::MissingKey { key: "read_path" })?,
            read_fname: read_fname.ok_or(ConfigError::MissingKey { key: "read_fname" })?,
            dem_read_extension: dem_read_extension.ok_or(ConfigError::MissingKey {
                key: "dem_read_extension",
            })?,
            no_of_iterations: no_of_iterations.ok_or(ConfigError::MissingKey {
                key: "no_of_iterations",
            })?,
            hflow_threshold: hflow_threshold.ok_or(ConfigError::MissingKey {
                key: "hflow_threshold",
            })?,
            water_depth_erosion_threshold: water_depth_erosion_threshold.ok_or(
                ConfigError::MissingKey {
                    key: "water_depth_erosion_threshold",
                },
            )?,
            slope_on_edge_cell: slope_on_edge_cell.ok_or(ConfigError::MissingKey {
                key: "slope_on_edge_cell",
            })?,
            courant_number: courant_number.ok_or(ConfigError::MissingKey {
                key: "courant_number",
            })?,
            froude_num_limit: froude_num_limit.ok_or(ConfigError::MissingKey {
                key: "froude_num_limit",
            })?,
            mannings_n: mannings_n.ok_or(ConfigError::MissingKey { key: "mannings_n" })?,
        })
    }
}
