// ABOUTME: Core engine foundation - fundamental data structures shared by the physics layer
// ABOUTME: Provides the flat-memory grid storage building block for all per-cell buffers

pub mod physics_grid;

pub use physics_grid::PhysicsGrid;
