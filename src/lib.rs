// ABOUTME: Library interface for the sheetflow shallow-water flow routing engine
// ABOUTME: Exposes the grid/kernel/executor public API while keeping internal organization

pub mod engine;

pub use engine::config::{OutputSettings, RunConfig, RunManifest, RunMetadata, StabilityDefaults};
pub use engine::diagnostics::StepInvariants;
pub use engine::error::{ConfigError, DemError, DomainError};
pub use engine::io::{AsciiGridWriter, Dem, NullWriter, ParamFile, StepWriter};
pub use engine::physics::{
    CellSnapshot, CellType, CellUpdate, Executor, Grid, MultiWorkerExecutor, NeighborCell,
    Neighborhood, SimParams, StabilityState,
};
