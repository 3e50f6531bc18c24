// ABOUTME: Post-step invariant checks over the whole grid, report-rather-than-panic style
// ABOUTME: Used by integration tests, not the hot path

use crate::engine::physics::cell::CellType;
use crate::engine::physics::grid::Grid;
use crate::engine::physics::stability::StabilityState;

/// Named constants for the invariant checks below, mirroring the
/// `safety_parameters`-style named-constant convention used elsewhere in the
/// engine's diagnostics rather than inlining magic numbers into assertions.
pub mod safety_parameters {
    /// Tolerance for floating point invariant comparisons.
    pub const EPSILON: f64 = 1e-9;
}

/// A single invariant's check result: which invariant, whether it held, and
/// where it first failed (if it didn't).
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    pub invariant: &'static str,
    pub i: usize,
    pub j: usize,
    pub detail: String,
}

/// The result of checking all six per-step invariants over a grid. Built as a
/// report so integration tests can assert on it directly, rather than the
/// check panicking inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInvariants {
    pub violations: Vec<InvariantViolation>,
}

impl StepInvariants {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check invariants 1-3 and 6 against a grid's current state and the
    /// stability controller that produced it. Invariants 4-5 (flux gating,
    /// Froude cap) are checked per-flux-computation in
    /// `engine::physics::kernel`'s own unit tests, since they require the
    /// previous-step neighbor context this report doesn't retain.
    pub fn check(
        grid: &Grid,
        stability: &StabilityState,
        dx: f64,
        water_depth_erosion_threshold: f64,
    ) -> StepInvariants {
        let mut violations = Vec::new();

        for i in 0..grid.imax() {
            for j in 0..grid.jmax() {
                let depth = grid.water_depth(i, j);
                let celltype = grid.celltype(i, j);

                // Invariant 1: water_depth >= 0.
                if depth < 0.0 {
                    violations.push(InvariantViolation {
                        invariant: "water_depth_non_negative",
                        i,
                        j,
                        detail: format!("depth {depth} < 0"),
                    });
                }

                // Invariant 2: boundary cells are clamped at the erosion threshold,
                // never above it.
                if celltype.is_boundary() && depth > water_depth_erosion_threshold + safety_parameters::EPSILON {
                    violations.push(InvariantViolation {
                        invariant: "boundary_clamp",
                        i,
                        j,
                        detail: format!("boundary depth {depth} exceeds threshold {water_depth_erosion_threshold}"),
                    });
                }

                // Invariant 3: NODATA cells have depth exactly 0.
                if celltype == CellType::NoData && depth != 0.0 {
                    violations.push(InvariantViolation {
                        invariant: "nodata_depth_zero",
                        i,
                        j,
                        detail: format!("nodata depth {depth} != 0"),
                    });
                }
            }
        }

        // Invariant 6: local_time_factor bound holds globally, not per-cell -
        // recorded once at (0, 0) if violated.
        let bound = stability.cfl_bound(dx);
        if stability.local_time_factor(dx) > bound + safety_parameters::EPSILON {
            violations.push(InvariantViolation {
                invariant: "cfl_bound",
                i: 0,
                j: 0,
                detail: format!(
                    "local_time_factor {} exceeds CFL bound {}",
                    stability.local_time_factor(dx),
                    bound
                ),
            });
        }

        StepInvariants { violations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_grid_has_no_violations() {
        let grid = Grid::from_elevations(&vec![vec![1.0; 4]; 4], -9999.0).unwrap();
        let stability = StabilityState::new(0.7, 10.0);
        let report = StepInvariants::check(&grid, &stability, 1.0, 1.0);
        assert!(report.is_clean());
    }

    #[test]
    fn negative_depth_is_flagged() {
        let mut grid = Grid::from_elevations(&vec![vec![1.0; 3]; 3], -9999.0).unwrap();
        grid.set_initial_depth(1, 1, -0.5);
        let stability = StabilityState::new(0.7, 10.0);
        let report = StepInvariants::check(&grid, &stability, 1.0, 1.0);
        assert!(!report.is_clean());
        assert_eq!(report.violations[0].invariant, "water_depth_non_negative");
    }

    #[test]
    fn nodata_cell_with_nonzero_depth_is_flagged() {
        let mut elevations = vec![vec![1.0; 3]; 3];
        elevations[1][1] = -9999.0;
        let mut grid = Grid::from_elevations(&elevations, -9999.0).unwrap();
        grid.set_initial_depth(1, 1, 0.2);
        let stability = StabilityState::new(0.7, 10.0);
        let report = StepInvariants::check(&grid, &stability, 1.0, 1.0);
        assert!(report.violations.iter().any(|v| v.invariant == "nodata_depth_zero"));
    }

    #[test]
    fn boundary_depth_above_threshold_is_flagged() {
        let mut grid = Grid::from_elevations(&vec![vec![1.0; 3]; 3], -9999.0).unwrap();
        grid.set_initial_depth(0, 0, 5.0); // corner cell, above threshold
        let stability = StabilityState::new(0.7, 10.0);
        let report = StepInvariants::check(&grid, &stability, 1.0, 1.0);
        assert!(report.violations.iter().any(|v| v.invariant == "boundary_clamp"));
    }
}
