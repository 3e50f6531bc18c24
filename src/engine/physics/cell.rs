// ABOUTME: Cell type tag and per-cell snapshot types for the stencil update kernel
// ABOUTME: Tagged sum over position-in-grid, not a class hierarchy - see DESIGN.md "Cell polymorphism"

/// A cell's fixed role in the grid, assigned once at initialization and never mutated.
///
/// Position-derived (interior vs. one of the eight boundary variants) unless the DEM
/// carries a nodata sentinel at that cell, in which case `NoData` takes priority over
/// whatever position the cell occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Interior,
    EdgeN,
    EdgeS,
    EdgeE,
    EdgeW,
    CornerNw,
    CornerNe,
    CornerSw,
    CornerSe,
    NoData,
}

impl CellType {
    /// Classify a cell from its grid position, ignoring nodata. Callers apply the
    /// nodata override separately (`NoData` is an elevation property, not a position one).
    ///
    /// A single row (`imax == 1`) or single column (`jmax == 1`) collapses the
    /// degenerate axis out of consideration entirely rather than manufacturing
    /// corners along it, so a 1xN strip reads as `EDGE_W, Interior.., EDGE_E`
    /// instead of a row of corners. A 1x1 grid has no non-degenerate axis left
    /// and so is the one case where every side is genuinely missing at once.
    pub fn from_position(i: usize, j: usize, imax: usize, jmax: usize) -> CellType {
        debug_assert!(imax >= 1 && jmax >= 1);

        if imax == 1 && jmax == 1 {
            return CellType::CornerNw;
        }
        if imax == 1 {
            return match j {
                0 => CellType::EdgeW,
                _ if j == jmax - 1 => CellType::EdgeE,
                _ => CellType::Interior,
            };
        }
        if jmax == 1 {
            return match i {
                0 => CellType::EdgeN,
                _ if i == imax - 1 => CellType::EdgeS,
                _ => CellType::Interior,
            };
        }

        let north = i == 0;
        let south = i == imax - 1;
        let west = j == 0;
        let east = j == jmax - 1;

        match (north, south, west, east) {
            (true, _, true, _) => CellType::CornerNw,
            (true, _, _, true) => CellType::CornerNe,
            (_, true, true, _) => CellType::CornerSw,
            (_, true, _, true) => CellType::CornerSe,
            (true, _, _, _) => CellType::EdgeN,
            (_, true, _, _) => CellType::EdgeS,
            (_, _, true, _) => CellType::EdgeW,
            (_, _, _, true) => CellType::EdgeE,
            _ => CellType::Interior,
        }
    }

    /// True for any of the eight edge/corner variants (everything but `Interior`/`NoData`).
    pub fn is_boundary(self) -> bool {
        !matches!(self, CellType::Interior | CellType::NoData)
    }

    /// Whether this cell's x-flux (west-face) phase has no west neighbor to read.
    pub fn x_upstream_missing(self) -> bool {
        matches!(
            self,
            CellType::EdgeW | CellType::CornerNw | CellType::CornerSw
        )
    }

    /// Whether this cell's x-flux phase is on the downstream (east) boundary, where the
    /// neighbor is still read for `hflow` but the slope uses `edgeslope`.
    pub fn x_downstream_edge(self) -> bool {
        matches!(
            self,
            CellType::EdgeE | CellType::CornerNe | CellType::CornerSe
        )
    }

    /// Whether this cell's y-flux (north-face) phase has no north neighbor to read.
    pub fn y_upstream_missing(self) -> bool {
        matches!(
            self,
            CellType::EdgeN | CellType::CornerNw | CellType::CornerNe
        )
    }

    /// Whether this cell's y-flux phase is on the downstream (south) boundary.
    pub fn y_downstream_edge(self) -> bool {
        matches!(
            self,
            CellType::EdgeS | CellType::CornerSw | CellType::CornerSe
        )
    }

    /// Whether the east term of the mass update should be taken as 0 (no east neighbor).
    pub fn east_term_missing(self) -> bool {
        matches!(self, CellType::EdgeE | CellType::CornerNe | CellType::CornerSe)
    }

    /// Whether the south term of the mass update should be taken as 0 (no south neighbor).
    pub fn south_term_missing(self) -> bool {
        matches!(self, CellType::EdgeS | CellType::CornerSw | CellType::CornerSe)
    }
}

/// Read-only snapshot of a cell's previous-step hydraulic state, as seen by the
/// stencil kernel. Never mutated in place - the kernel only ever produces a fresh
/// `CellUpdate` from snapshots like this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSnapshot {
    pub celltype: CellType,
    pub elevation: f64,
    pub water_depth: f64,
    pub qx: f64,
    pub qy: f64,
}

/// The fields the kernel actually produces for the next step. Elevation and celltype
/// are not part of this: they are constant for a cell's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellUpdate {
    pub water_depth: f64,
    pub qx: f64,
    pub qy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_grid_is_a_corner() {
        // 1x1 grid: every boundary condition is true at once. Implementation
        // picks CORNER_NW per the match arm order (north&west checked first).
        assert_eq!(CellType::from_position(0, 0, 1, 1), CellType::CornerNw);
    }

    #[test]
    fn corners_take_priority_over_edges() {
        let imax = 5;
        let jmax = 7;
        assert_eq!(CellType::from_position(0, 0, imax, jmax), CellType::CornerNw);
        assert_eq!(CellType::from_position(0, jmax - 1, imax, jmax), CellType::CornerNe);
        assert_eq!(CellType::from_position(imax - 1, 0, imax, jmax), CellType::CornerSw);
        assert_eq!(
            CellType::from_position(imax - 1, jmax - 1, imax, jmax),
            CellType::CornerSe
        );
    }

    #[test]
    fn transverse_edges_classified_correctly() {
        let imax = 5;
        let jmax = 7;
        assert_eq!(CellType::from_position(0, 3, imax, jmax), CellType::EdgeN);
        assert_eq!(CellType::from_position(imax - 1, 3, imax, jmax), CellType::EdgeS);
        assert_eq!(CellType::from_position(2, 0, imax, jmax), CellType::EdgeW);
        assert_eq!(CellType::from_position(2, jmax - 1, imax, jmax), CellType::EdgeE);
    }

    #[test]
    fn interior_cell_is_interior() {
        assert_eq!(CellType::from_position(2, 3, 5, 7), CellType::Interior);
    }

    #[test]
    fn boundary_flags_agree_with_position() {
        assert!(!CellType::Interior.is_boundary());
        assert!(!CellType::NoData.is_boundary());
        assert!(CellType::EdgeW.is_boundary());
        assert!(CellType::CornerSe.is_boundary());
    }
}
