// ABOUTME: Hand-rolled error types for configuration, DEM loading, and domain validation
// ABOUTME: No anyhow/thiserror dependency - plain enums with manual Display, matching the rest of the engine

use std::fmt;
use std::path::PathBuf;

/// Errors from loading or validating the line-oriented parameter file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFound { path: PathBuf },
    Unreadable { path: PathBuf, reason: String },
    MissingKey { key: &'static str },
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound { path } => {
                write!(f, "parameter file not found: {}", path.display())
            }
            ConfigError::Unreadable { path, reason } => {
                write!(f, "could not read parameter file {}: {}", path.display(), reason)
            }
            ConfigError::MissingKey { key } => {
                write!(f, "parameter file is missing required key `{key}`")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "parameter `{key}` has invalid value `{value}`")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from loading or parsing the Esri-grid-style DEM file.
#[derive(Debug, Clone, PartialEq)]
pub enum DemError {
    NotFound { path: PathBuf },
    Unreadable { path: PathBuf, reason: String },
    MalformedHeader { line: String },
    DimensionMismatch { expected: usize, found: usize },
}

impl fmt::Display for DemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemError::NotFound { path } => write!(f, "DEM file not found: {}", path.display()),
            DemError::Unreadable { path, reason } => {
                write!(f, "could not read DEM file {}: {}", path.display(), reason)
            }
            DemError::MalformedHeader { line } => {
                write!(f, "malformed DEM header line: `{line}`")
            }
            DemError::DimensionMismatch { expected, found } => write!(
                f,
                "DEM body has {found} values but header declares {expected} (imax*jmax)"
            ),
        }
    }
}

impl std::error::Error for DemError {}

pub type DemResult<T> = Result<T, DemError>;

/// Errors from validating the initialized grid against domain invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Every cell on at least one DEM border is nodata: no catchment outlet exists.
    ClosedDomain,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::ClosedDomain => {
                write!(f, "closed domain: every border cell is nodata, no catchment outlet")
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
