// ABOUTME: Per-cell-type substitution rules for the three spatial operators (flux, depth, outflow)
// ABOUTME: Replaces missing neighbor data with edge slopes or zero flux

use crate::engine::physics::cell::CellType;
use crate::engine::physics::grid::NeighborCell;
use crate::engine::physics::stability::SimParams;

/// What the upstream-neighbor substitution resolves to for one axis of the flux update.
pub struct UpstreamSource {
    pub nb_elevation: f64,
    pub nb_water_depth: f64,
    pub tempslope: f64,
}

/// Resolve the upstream neighbor read and slope source for one flux axis.
///
/// `missing` is true for the axis-facing upstream edge (e.g. EDGE_W for x): there is
/// no neighbor, substitute `no_data_value`/0 and use `edgeslope` directly.
/// `downstream_edge` is true for the axis-facing downstream edge (e.g. EDGE_E for x):
/// the neighbor is still read (needed for `hflow`), but the slope is `edgeslope`.
/// Otherwise (interior or transverse edge) the real neighbor and computed slope are used.
///
/// A degenerate axis (a single-row grid has no N/S neighbor at all, a
/// single-column grid has no E/W neighbor at all) can hand back `neighbor:
/// None` even on a cell whose `celltype` doesn't tag that axis as missing -
/// `Neighborhood` is the authority on whether a neighbor actually exists, so
/// a `None` here is always treated the same as `missing`, regardless of what
/// `missing`/`downstream_edge` say.
pub fn resolve_upstream(
    missing: bool,
    downstream_edge: bool,
    neighbor: Option<NeighborCell>,
    self_elevation: f64,
    self_water_depth: f64,
    axis_spacing: f64,
    params: &SimParams,
) -> UpstreamSource {
    let nb = match neighbor {
        Some(nb) if !missing => nb,
        _ => {
            return UpstreamSource {
                nb_elevation: params.no_data_value,
                nb_water_depth: 0.0,
                tempslope: params.edgeslope,
            };
        }
    };

    let tempslope = if downstream_edge {
        params.edgeslope
    } else {
        ((nb.elevation + nb.water_depth) - (self_elevation + self_water_depth)) / axis_spacing
    };

    UpstreamSource {
        nb_elevation: nb.elevation,
        nb_water_depth: nb.water_depth,
        tempslope,
    }
}

/// The downstream-term substitution for the mass update: 0 on the relevant
/// downstream edge/corner, otherwise the neighbor's previous flux.
pub fn downstream_flux_term(missing: bool, neighbor_flux: Option<f64>) -> f64 {
    if missing {
        0.0
    } else {
        neighbor_flux.unwrap_or(0.0)
    }
}

/// Whether the outflow clamp applies to this cell type.
pub fn clamps_outflow(celltype: CellType) -> bool {
    celltype.is_boundary()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimParams {
        SimParams {
            dx: 1.0,
            dy: 1.0,
            no_data_value: -9999.0,
            water_depth_erosion_threshold: 1.0,
            edgeslope: 0.001,
            hflow_threshold: 1e-5,
            mannings: 0.04,
            froude_limit: 0.8,
        }
    }

    #[test]
    fn missing_upstream_uses_edgeslope_and_no_data() {
        let p = params();
        let resolved = resolve_upstream(true, false, None, 0.0, 0.5, 1.0, &p);
        assert_eq!(resolved.nb_elevation, p.no_data_value);
        assert_eq!(resolved.nb_water_depth, 0.0);
        assert_eq!(resolved.tempslope, p.edgeslope);
    }

    #[test]
    fn downstream_edge_reads_neighbor_but_uses_edgeslope() {
        let p = params();
        let neighbor = NeighborCell {
            elevation: 0.0,
            water_depth: 0.3,
            qx: 0.0,
            qy: 0.0,
        };
        let resolved = resolve_upstream(false, true, Some(neighbor), 0.0, 0.5, 1.0, &p);
        assert_eq!(resolved.nb_water_depth, 0.3);
        assert_eq!(resolved.tempslope, p.edgeslope);
    }

    #[test]
    fn interior_computes_slope_from_surface_elevations() {
        let p = params();
        let neighbor = NeighborCell {
            elevation: 1.0,
            water_depth: 0.0,
            qx: 0.0,
            qy: 0.0,
        };
        let resolved = resolve_upstream(false, false, Some(neighbor), 0.0, 0.0, 1.0, &p);
        assert_eq!(resolved.tempslope, 1.0);
    }

    #[test]
    fn degenerate_axis_with_no_real_neighbor_falls_back_to_edgeslope() {
        // A 1-row grid's interior/EdgeW/EdgeE cells have no N/S neighbor at
        // all, so `missing`/`downstream_edge` are both false even though
        // `Neighborhood` hands back `None`. Must not panic, must behave like
        // `missing`.
        let p = params();
        let resolved = resolve_upstream(false, false, None, 0.0, 0.5, 1.0, &p);
        assert_eq!(resolved.nb_elevation, p.no_data_value);
        assert_eq!(resolved.nb_water_depth, 0.0);
        assert_eq!(resolved.tempslope, p.edgeslope);
    }

    #[test]
    fn downstream_term_is_zero_when_missing() {
        assert_eq!(downstream_flux_term(true, Some(3.0)), 0.0);
        assert_eq!(downstream_flux_term(false, Some(3.0)), 3.0);
    }

    #[test]
    fn outflow_clamp_applies_only_to_boundary_cells() {
        assert!(!clamps_outflow(CellType::Interior));
        assert!(!clamps_outflow(CellType::NoData));
        assert!(clamps_outflow(CellType::EdgeN));
        assert!(clamps_outflow(CellType::CornerSe));
    }
}
