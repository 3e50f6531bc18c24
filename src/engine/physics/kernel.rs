// ABOUTME: The per-cell stencil update: a pure function of a cell's previous state
// ABOUTME: and its four cardinal neighbors' previous states

use crate::engine::physics::boundary::{clamps_outflow, downstream_flux_term, resolve_upstream};
use crate::engine::physics::cell::{CellSnapshot, CellType, CellUpdate};
use crate::engine::physics::grid::Neighborhood;
use crate::engine::physics::stability::{SimParams, GRAVITY};

/// West-edge injection: a fixed increment applied to every EDGE_W cell each step.
/// Stands in for a full spatially-variable rainfall input.
const WEST_EDGE_INJECTION: f64 = 0.01;

/// Unconditional numerical floor added to every non-nodata cell's depth each step.
/// Not physically motivated - keeps cells from drying to exactly zero.
const DEPTH_FLOOR: f64 = 0.005;

/// Run the five-phase stencil update (seed, water input, x-flux, y-flux, depth
/// update) plus the outflow clamp, for one cell, given its previous-step snapshot
/// and a read-only view of its previous-step neighbors.
///
/// Phases run in this fixed order and are never reordered; an executor may
/// parallelize across cells but must not reorder the phases within one cell's call.
pub fn update(
    self_prev: CellSnapshot,
    neighborhood: &Neighborhood,
    params: &SimParams,
    local_time_factor: f64,
) -> CellUpdate {
    // Phase 1: seed.
    let mut water_depth = self_prev.water_depth;

    // Phase 2: water input (west-edge injection).
    if self_prev.celltype == CellType::EdgeW {
        water_depth += WEST_EDGE_INJECTION;
    }

    // Phases 3-4: x/y momentum update. NoData cells never route flux: no flow
    // ever leaves or enters a NoData cell's own flux state.
    let (qx, qy) = if self_prev.celltype == CellType::NoData {
        (0.0, 0.0)
    } else {
        let qx = update_x_flux(self_prev, neighborhood, params, local_time_factor);
        let qy = update_y_flux(self_prev, neighborhood, params, local_time_factor);
        (qx, qy)
    };

    // Phase 5: depth (mass) update.
    if self_prev.celltype != CellType::NoData {
        let east_qx_prev = downstream_flux_term(
            self_prev.celltype.east_term_missing(),
            neighborhood.east().map(|n| n.qx),
        );
        let south_qy_prev = downstream_flux_term(
            self_prev.celltype.south_term_missing(),
            neighborhood.south().map(|n| n.qy),
        );

        water_depth += local_time_factor
            * ((east_qx_prev - self_prev.qx) / params.dx
                + (south_qy_prev - self_prev.qy) / params.dy);
        water_depth += DEPTH_FLOOR;
    }

    // Phase 6: outflow clamp.
    if clamps_outflow(self_prev.celltype) && self_prev.water_depth > params.water_depth_erosion_threshold {
        water_depth = params.water_depth_erosion_threshold;
    }
    if self_prev.celltype == CellType::NoData {
        water_depth = 0.0;
    }

    CellUpdate { water_depth, qx, qy }
}

fn update_x_flux(
    self_prev: CellSnapshot,
    neighborhood: &Neighborhood,
    params: &SimParams,
    local_time_factor: f64,
) -> f64 {
    let ct = self_prev.celltype;
    let upstream = resolve_upstream(
        ct.x_upstream_missing(),
        ct.x_downstream_edge(),
        neighborhood.west(),
        self_prev.elevation,
        self_prev.water_depth,
        params.dx,
        params,
    );
    update_flux(
        self_prev.qx,
        self_prev.elevation,
        self_prev.water_depth,
        upstream.nb_elevation,
        upstream.nb_water_depth,
        upstream.tempslope,
        params.dx,
        local_time_factor,
        params,
    )
}

fn update_y_flux(
    self_prev: CellSnapshot,
    neighborhood: &Neighborhood,
    params: &SimParams,
    local_time_factor: f64,
) -> f64 {
    let ct = self_prev.celltype;
    let upstream = resolve_upstream(
        ct.y_upstream_missing(),
        ct.y_downstream_edge(),
        neighborhood.north(),
        self_prev.elevation,
        self_prev.water_depth,
        params.dy,
        params,
    );
    update_flux(
        self_prev.qy,
        self_prev.elevation,
        self_prev.water_depth,
        upstream.nb_elevation,
        upstream.nb_water_depth,
        upstream.tempslope,
        params.dy,
        local_time_factor,
        params,
    )
}

/// One axis of the inertial momentum update, shared between x (west neighbor)
/// and y (north neighbor) since the algebra is identical.
#[allow(clippy::too_many_arguments)]
fn update_flux(
    q_old: f64,
    self_elevation: f64,
    self_water_depth: f64,
    nb_elevation: f64,
    nb_water_depth: f64,
    tempslope: f64,
    axis_spacing: f64,
    local_time_factor: f64,
    params: &SimParams,
) -> f64 {
    // Gate: both sides dry, no flux.
    if self_water_depth == 0.0 && nb_water_depth == 0.0 {
        return 0.0;
    }

    // Effective flow depth.
    let hflow =
        (self_elevation + self_water_depth).max(nb_elevation + nb_water_depth) - self_elevation.max(nb_elevation);

    if hflow <= params.hflow_threshold {
        return 0.0;
    }

    // Inertial momentum update.
    let mannings_sq = params.mannings * params.mannings;
    let mut q_new = (q_old - GRAVITY * hflow * local_time_factor * tempslope)
        / (1.0 + GRAVITY * hflow * local_time_factor * mannings_sq * q_old.abs() / hflow.powf(10.0 / 3.0));

    // Froude limiter.
    let froude = (q_new / hflow).abs() / (GRAVITY * hflow).sqrt();
    if froude > params.froude_limit {
        q_new = (hflow * (GRAVITY * hflow).sqrt() * params.froude_limit).copysign(q_new);
    }

    // Discharge limiter: bounds a single-step dewatering to 1/5 of the donor
    // column, triggered at 1/4 of the donor column. The 4:5 ratio is deliberate.
    let criterion = (q_new * local_time_factor / axis_spacing).abs();
    if q_new > 0.0 && criterion > self_water_depth / 4.0 {
        q_new = (self_water_depth * axis_spacing / 5.0) / local_time_factor;
    } else if q_new < 0.0 && criterion > nb_water_depth / 4.0 {
        q_new = -(nb_water_depth * axis_spacing / 5.0) / local_time_factor;
    }

    q_new
}
