// ABOUTME: ASCII Esri-grid DEM loader - header key/value pairs then row-major elevation body
// ABOUTME: Header keys are case-insensitive

use std::fs;
use std::path::Path;

use crate::engine::error::DemError;

/// A loaded digital elevation model: header metadata plus the row-major elevation body.
#[derive(Debug, Clone, PartialEq)]
pub struct Dem {
    pub ncols: usize,
    pub nrows: usize,
    pub xllcorner: f64,
    pub yllcorner: f64,
    pub cellsize: f64,
    pub nodata_value: f64,
    /// Row-major, `nrows` rows of `ncols` values each.
    pub elevations: Vec<Vec<f64>>,
}

impl Dem {
    /// Parse an Esri-grid-style ASCII DEM: six header lines (`ncols`, `nrows`,
    /// `xllcorner`, `yllcorner`, `cellsize`, `nodata_value`, any order, keys
    /// case-insensitive) followed by `nrows * ncols` whitespace-separated doubles.
    pub fn load(path: &Path) -> Result<Dem, DemError> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DemError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DemError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        let mut lines = text.lines();
        let mut ncols: Option<usize> = None;
        let mut nrows: Option<usize> = None;
        let mut xllcorner: Option<f64> = None;
        let mut yllcorner: Option<f64> = None;
        let mut cellsize: Option<f64> = None;
        let mut nodata_value: Option<f64> = None;

        let mut body_start_line: Option<&str> = None;
        for line in lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut parts = trimmed.split_whitespace();
            let key = match parts.next() {
                Some(k) => k.to_lowercase(),
                None => continue,
            };
            let value = parts.next();

            match (key.as_str(), value) {
                ("ncols", Some(v)) => ncols = v.parse().ok(),
                ("nrows", Some(v)) => nrows = v.parse().ok(),
                ("xllcorner", Some(v)) => xllcorner = v.parse().ok(),
                ("yllcorner", Some(v)) => yllcorner = v.parse().ok(),
                ("cellsize", Some(v)) => cellsize = v.parse().ok(),
                ("nodata_value", Some(v)) => nodata_value = v.parse().ok(),
                _ => {
                    // First line that isn't a recognized header key starts the body.
                    body_start_line = Some(line);
                    break;
                }
            }

            if ncols.is_some()
                && nrows.is_some()
                && xllcorner.is_some()
                && yllcorner.is_some()
                && cellsize.is_some()
                && nodata_value.is_some()
            {
                break;
            }
        }

        let malformed = |line: &str| DemError::MalformedHeader {
            line: line.to_string(),
        };
        let ncols = ncols.ok_or_else(|| malformed("ncols"))?;
        let nrows = nrows.ok_or_else(|| malformed("nrows"))?;
        let xllcorner = xllcorner.ok_or_else(|| malformed("xllcorner"))?;
        let yllcorner = yllcorner.ok_or_else(|| malformed("yllcorner"))?;
        let cellsize = cellsize.ok_or_else(|| malformed("cellsize"))?;
        let nodata_value = nodata_value.ok_or_else(|| malformed("nodata_value"))?;

        let expected = nrows * ncols;
        let mut values: Vec<f64> = Vec::with_capacity(expected);

        if let Some(first_body_line) = body_start_line {
            for tok in first_body_line.split_whitespace() {
                let v: f64 = tok.parse().map_err(|_| DemError::DimensionMismatch {
                    expected,
                    found: values.len(),
                })?;
                values.push(v);
            }
        }
        for line in lines {
            for tok in line.split_whitespace() {
                let v: f64 = tok.parse().map_err(|_| DemError::DimensionMismatch {
                    expected,
                    found: values.len(),
                })?;
                values.push(v);
            }
        }

        if values.len() != expected {
            return Err(DemError::DimensionMismatch {
                expected,
                found: values.len(),
            });
        }

        let elevations = values
            .chunks(ncols)
            .map(|row| row.to_vec())
            .collect::<Vec<_>>();

        Ok(Dem {
            ncols,
            nrows,
            xllcorner,
            yllcorner,
            cellsize,
            nodata_value,
            elevations,
        })
    }
}
