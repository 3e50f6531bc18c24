// ABOUTME: Row-major imax x jmax lattice with double-buffered hydraulic state
// ABOUTME: Owns the flat per-field PhysicsGrid buffers and builds read-only neighbor contexts

use crate::engine::core::PhysicsGrid;
use crate::engine::error::DomainError;
use crate::engine::physics::cell::{CellSnapshot, CellType, CellUpdate};

/// A read-only snapshot of one neighbor's previous-step state, as consumed by the
/// momentum and mass update phases. For a missing neighbor (off the grid on the
/// relevant side) this is the boundary-substituted value, never a real read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborCell {
    pub elevation: f64,
    pub water_depth: f64,
    pub qx: f64,
    pub qy: f64,
}

/// Read-only context exposing a cell's previous-step N/S/E/W neighbors. The kernel
/// never names coordinates directly - it only calls these four accessors.
pub struct Neighborhood<'a> {
    grid: &'a Grid,
    i: usize,
    j: usize,
}

impl<'a> Neighborhood<'a> {
    fn snapshot_at(&self, i: usize, j: usize) -> NeighborCell {
        NeighborCell {
            elevation: *self.grid.elevation.get(j, i),
            water_depth: *self.grid.depth.get(j, i),
            qx: *self.grid.qx.get(j, i),
            qy: *self.grid.qy.get(j, i),
        }
    }

    /// North neighbor: (i-1, j). `None` if this cell is on the north border.
    pub fn north(&self) -> Option<NeighborCell> {
        (self.i > 0).then(|| self.snapshot_at(self.i - 1, self.j))
    }

    /// South neighbor: (i+1, j). `None` if this cell is on the south border.
    pub fn south(&self) -> Option<NeighborCell> {
        (self.i + 1 < self.grid.imax).then(|| self.snapshot_at(self.i + 1, self.j))
    }

    /// East neighbor: (i, j+1). `None` if this cell is on the east border.
    pub fn east(&self) -> Option<NeighborCell> {
        (self.j + 1 < self.grid.jmax).then(|| self.snapshot_at(self.i, self.j + 1))
    }

    /// West neighbor: (i, j-1). `None` if this cell is on the west border.
    pub fn west(&self) -> Option<NeighborCell> {
        (self.j > 0).then(|| self.snapshot_at(self.i, self.j - 1))
    }
}

/// The row-major `imax x jmax` catchment grid. `elevation` and `celltype` are set
/// once at construction and never mutated; `depth`/`qx`/`qy` are double-buffered
/// (`*_current` read during a step, `*_next` written, then swapped).
#[derive(Debug, Clone)]
pub struct Grid {
    imax: usize,
    jmax: usize,
    celltype: PhysicsGrid<CellType>,
    elevation: PhysicsGrid<f64>,
    depth: PhysicsGrid<f64>,
    qx: PhysicsGrid<f64>,
    qy: PhysicsGrid<f64>,
    depth_next: PhysicsGrid<f64>,
    qx_next: PhysicsGrid<f64>,
    qy_next: PhysicsGrid<f64>,
}

impl Grid {
    /// Build a grid from raw row-major elevation data (`elevations[i][j]`), assigning
    /// each cell's `celltype` from its position, with `NoData` overriding position for
    /// cells whose elevation equals `no_data_value`. Runs the open-edge check
    /// before returning.
    pub fn from_elevations(
        elevations: &[Vec<f64>],
        no_data_value: f64,
    ) -> Result<Grid, DomainError> {
        let imax = elevations.len();
        let jmax = if imax > 0 { elevations[0].len() } else { 0 };

        let mut elevation = PhysicsGrid::new(jmax, imax, 0.0);
        let mut celltype = PhysicsGrid::new(jmax, imax, CellType::NoData);

        for i in 0..imax {
            for j in 0..jmax {
                let elev = elevations[i][j];
                elevation.set(j, i, elev);
                let ty = if elev == no_data_value {
                    CellType::NoData
                } else {
                    CellType::from_position(i, j, imax, jmax)
                };
                celltype.set(j, i, ty);
            }
        }

        let grid = Grid {
            imax,
            jmax,
            depth: PhysicsGrid::new(jmax, imax, 0.0),
            qx: PhysicsGrid::new(jmax, imax, 0.0),
            qy: PhysicsGrid::new(jmax, imax, 0.0),
            depth_next: PhysicsGrid::new(jmax, imax, 0.0),
            qx_next: PhysicsGrid::new(jmax, imax, 0.0),
            qy_next: PhysicsGrid::new(jmax, imax, 0.0),
            elevation,
            celltype,
        };

        grid.check_edges_open()?;
        Ok(grid)
    }

    /// At least one cell on each of the four DEM borders must be non-nodata, or
    /// there is no catchment outlet.
    fn check_edges_open(&self) -> Result<(), DomainError> {
        if self.imax == 0 || self.jmax == 0 {
            return Err(DomainError::ClosedDomain);
        }

        let north_open = (0..self.jmax).any(|j| *self.celltype.get(j, 0) != CellType::NoData);
        let south_open =
            (0..self.jmax).any(|j| *self.celltype.get(j, self.imax - 1) != CellType::NoData);
        let west_open = (0..self.imax).any(|i| *self.celltype.get(0, i) != CellType::NoData);
        let east_open =
            (0..self.imax).any(|i| *self.celltype.get(self.jmax - 1, i) != CellType::NoData);

        if north_open && south_open && west_open && east_open {
            Ok(())
        } else {
            Err(DomainError::ClosedDomain)
        }
    }

    pub fn imax(&self) -> usize {
        self.imax
    }

    pub fn jmax(&self) -> usize {
        self.jmax
    }

    pub fn celltype(&self, i: usize, j: usize) -> CellType {
        *self.celltype.get(j, i)
    }

    pub fn elevation(&self, i: usize, j: usize) -> f64 {
        *self.elevation.get(j, i)
    }

    pub fn water_depth(&self, i: usize, j: usize) -> f64 {
        *self.depth.get(j, i)
    }

    pub fn qx(&self, i: usize, j: usize) -> f64 {
        *self.qx.get(j, i)
    }

    pub fn qy(&self, i: usize, j: usize) -> f64 {
        *self.qy.get(j, i)
    }

    /// Previous-step snapshot of cell (i, j), as the kernel sees `prev_self`.
    pub fn snapshot(&self, i: usize, j: usize) -> CellSnapshot {
        CellSnapshot {
            celltype: self.celltype(i, j),
            elevation: self.elevation(i, j),
            water_depth: self.water_depth(i, j),
            qx: self.qx(i, j),
            qy: self.qy(i, j),
        }
    }

    /// Read-only neighbor context for cell (i, j), built from the previous-step buffers.
    pub fn neighborhood(&self, i: usize, j: usize) -> Neighborhood<'_> {
        Neighborhood { grid: self, i, j }
    }

    /// Write a cell's computed next-step state into the `next` buffers. Never
    /// visible to any other cell's update within the same step - only after
    /// `commit` swaps buffers.
    pub fn write_next(&mut self, i: usize, j: usize, update: CellUpdate) {
        self.depth_next.set(j, i, update.water_depth);
        self.qx_next.set(j, i, update.qx);
        self.qy_next.set(j, i, update.qy);
    }

    /// Swap `next` into `current`, committing the step. Must run after every cell
    /// has been updated and before the next step's fan-out begins.
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.depth, &mut self.depth_next);
        std::mem::swap(&mut self.qx, &mut self.qx_next);
        std::mem::swap(&mut self.qy, &mut self.qy_next);
    }

    pub fn max_water_depth(&self) -> f64 {
        self.depth.max()
    }

    pub fn total_water(&self) -> f64 {
        self.depth.sum()
    }

    /// Seed every non-nodata cell's initial water depth (used by tests and demo DEMs).
    pub fn set_initial_depth(&mut self, i: usize, j: usize, depth: f64) {
        self.depth.set(j, i, depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(imax: usize, jmax: usize, elev: f64) -> Vec<Vec<f64>> {
        vec![vec![elev; jmax]; imax]
    }

    #[test]
    fn single_cell_grid_builds_and_is_a_corner() {
        let grid = Grid::from_elevations(&flat(1, 1, 0.0), -9999.0).unwrap();
        assert_eq!(grid.imax(), 1);
        assert_eq!(grid.jmax(), 1);
        assert_eq!(grid.celltype(0, 0), CellType::CornerNw);
    }

    #[test]
    fn closed_domain_is_rejected() {
        let elevations = flat(4, 4, -9999.0);
        let result = Grid::from_elevations(&elevations, -9999.0);
        assert_eq!(result.unwrap_err(), DomainError::ClosedDomain);
    }

    #[test]
    fn open_domain_with_all_real_elevations_is_accepted() {
        let grid = Grid::from_elevations(&flat(4, 4, 1.0), -9999.0).unwrap();
        assert_eq!(grid.celltype(2, 2), CellType::Interior);
    }

    #[test]
    fn nodata_overrides_position_classification() {
        let mut elevations = flat(3, 3, 1.0);
        elevations[1][1] = -9999.0; // interior cell, but nodata
        let grid = Grid::from_elevations(&elevations, -9999.0).unwrap();
        assert_eq!(grid.celltype(1, 1), CellType::NoData);
    }

    #[test]
    fn commit_swaps_buffers_and_next_is_invisible_until_then() {
        let mut grid = Grid::from_elevations(&flat(2, 2, 0.0), -9999.0).unwrap();
        grid.write_next(
            0,
            0,
            CellUpdate {
                water_depth: 5.0,
                qx: 1.0,
                qy: 2.0,
            },
        );
        assert_eq!(grid.water_depth(0, 0), 0.0);
        grid.commit();
        assert_eq!(grid.water_depth(0, 0), 5.0);
        assert_eq!(grid.qx(0, 0), 1.0);
        assert_eq!(grid.qy(0, 0), 2.0);
    }

    #[test]
    fn neighborhood_returns_none_off_grid() {
        let grid = Grid::from_elevations(&flat(3, 3, 0.0), -9999.0).unwrap();
        let corner = grid.neighborhood(0, 0);
        assert!(corner.north().is_none());
        assert!(corner.west().is_none());
        assert!(corner.south().is_some());
        assert!(corner.east().is_some());
    }
}
