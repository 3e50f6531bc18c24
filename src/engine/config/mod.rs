// ABOUTME: YAML-serialized run configuration and manifest for reproducible simulation runs
// ABOUTME: Distinct from the line-oriented parameter file (engine::io::params), which keeps
// ABOUTME: its own `.par`-style format and is parsed by hand, not through serde

use serde::{Deserialize, Serialize};

/// A reproducible run's configuration: DEM/parameter-file locations, stability
/// coefficients, and output cadence. Serialized as YAML for version control and
/// sharing between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub metadata: RunMetadata,
    pub dem_path: String,
    pub param_path: String,
    pub stability: StabilityDefaults,
    pub output: OutputSettings,
}

/// Provenance and tracking fields for a configuration, independent of the run's
/// numerical content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub name: String,
    pub author: Option<String>,
    pub created: String,
    pub description: Option<String>,
}

/// The numerical coefficients configured once before the first step, minus
/// `time_factor` and `step` which are runtime-mutated state, not configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityDefaults {
    pub courant_number: f64,
    pub maxdepth: f64,
    pub water_depth_erosion_threshold: f64,
    pub edgeslope: f64,
    pub hflow_threshold: f64,
    pub mannings: f64,
    pub froude_limit: f64,
}

/// How often and where the configured `StepWriter` emits output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub out_dir: String,
    pub interval: u64,
}

impl Default for StabilityDefaults {
    fn default() -> Self {
        Self {
            courant_number: 0.7,
            maxdepth: 10.0,
            water_depth_erosion_threshold: 1.0,
            edgeslope: 0.001,
            hflow_threshold: 0.00001,
            mannings: 0.04,
            froude_limit: 0.8,
        }
    }
}

impl RunConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

/// A record written alongside run output: the resolved configuration plus what
/// actually happened, for after-the-fact reproducibility checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub config: RunConfig,
    pub started: String,
    pub finished: Option<String>,
    pub steps_completed: u64,
    pub final_total_water: f64,
}

impl RunManifest {
    pub fn started_now(config: RunConfig) -> Self {
        Self {
            config,
            started: chrono::Utc::now().to_rfc3339(),
            finished: None,
            steps_completed: 0,
            final_total_water: 0.0,
        }
    }

    pub fn complete(&mut self, steps_completed: u64, final_total_water: f64) {
        self.finished = Some(chrono::Utc::now().to_rfc3339());
        self.steps_completed = steps_completed;
        self.final_total_water = final_total_water;
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}
