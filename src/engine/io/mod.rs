// ABOUTME: External interfaces the core consumes - DEM/parameter file parsing and step output
// ABOUTME: Kept thin - parsing and writers are external collaborators, not the core

pub mod dem;
pub mod params;
pub mod writer;

pub use dem::Dem;
pub use params::ParamFile;
pub use writer::{AsciiGridWriter, NullWriter, StepWriter};
