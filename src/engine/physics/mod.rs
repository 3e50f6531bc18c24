// ABOUTME: Physics simulation: the cellular-automaton shallow-water flow routing model
// ABOUTME: Cell classification, grid storage, the stencil kernel, and its executors

pub mod boundary;
pub mod cell;
pub mod executor;
pub mod grid;
pub mod kernel;
pub mod stability;

pub use cell::{CellSnapshot, CellType, CellUpdate};
pub use executor::{Executor, MultiWorkerExecutor};
pub use grid::{Grid, NeighborCell, Neighborhood};
pub use stability::{SimParams, StabilityState, GRAVITY};
