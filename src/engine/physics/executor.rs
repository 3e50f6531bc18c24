// ABOUTME: Domain-decomposed executor: bulk-synchronous fan-out over cells with a step barrier
// ABOUTME: Single-process Executor plus a MultiWorkerExecutor demonstrating row-strip locality

use rayon::prelude::*;

use crate::engine::io::writer::StepWriter;
use crate::engine::physics::cell::CellUpdate;
use crate::engine::physics::grid::Grid;
use crate::engine::physics::kernel;
use crate::engine::physics::stability::{SimParams, StabilityState};

/// Drives the stencil kernel over every cell of an owned [`Grid`] for a fixed
/// number of steps. Every cell is updated exactly once per step from read-only
/// previous-step snapshots, writes are invisible until `commit`, and cells are
/// parallelized freely within a step since no cell reads another cell's
/// in-progress write (`rayon`'s `par_iter` over row-major indices is a valid
/// bulk-synchronous scheduler here).
pub struct Executor {
    grid: Grid,
    params: SimParams,
    stability: StabilityState,
}

impl Executor {
    pub fn new(grid: Grid, params: SimParams, stability: StabilityState) -> Self {
        Self {
            grid,
            params,
            stability,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stability(&self) -> &StabilityState {
        &self.stability
    }

    /// Advance the simulation `steps` times, invoking `writer` at every step boundary.
    pub fn run(&mut self, steps: u64, writer: &mut dyn StepWriter) {
        for _ in 0..steps {
            self.step();
            writer.on_step(self.stability.step, &self.grid);
        }
    }

    /// Advance the simulation exactly one step.
    pub fn step(&mut self) {
        // Global time step set: serialized before fan-out, read-only during it.
        self.stability.raise_time_factor(self.params.dx);
        let local_time_factor = self.stability.local_time_factor(self.params.dx);

        let imax = self.grid.imax();
        let jmax = self.grid.jmax();

        let updates: Vec<CellUpdate> = (0..imax * jmax)
            .into_par_iter()
            .map(|idx| {
                let i = idx / jmax;
                let j = idx % jmax;
                let snapshot = self.grid.snapshot(i, j);
                let neighborhood = self.grid.neighborhood(i, j);
                kernel::update(snapshot, &neighborhood, &self.params, local_time_factor)
            })
            .collect();

        for (idx, update) in updates.into_iter().enumerate() {
            let i = idx / jmax;
            let j = idx % jmax;
            self.grid.write_next(i, j, update);
        }

        self.grid.commit();
        self.stability.step += 1;
    }
}

/// Demonstrates the domain-decomposed executor's locality property by
/// partitioning the grid into contiguous row strips ("workers") dispatched
/// independently, each writing only its own disjoint range of rows from
/// read-only previous-step state. This does not implement a real
/// halo-exchange: there is a single shared `Grid` and no per-worker owned
/// memory or channel-based row copy, so it is not a stand-in for the MPI
/// row decomposition the original source used, only a proof that the kernel
/// produces identical results no matter how the row range is split, which is
/// what a correct halo-exchange implementation would also have to guarantee.
pub struct MultiWorkerExecutor {
    grid: Grid,
    params: SimParams,
    stability: StabilityState,
    worker_count: usize,
}

impl MultiWorkerExecutor {
    pub fn new(grid: Grid, params: SimParams, stability: StabilityState, worker_count: usize) -> Self {
        Self {
            grid,
            params,
            stability,
            worker_count: worker_count.max(1),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Row ranges owned by each worker, covering every row exactly once.
    fn worker_row_ranges(&self) -> Vec<(usize, usize)> {
        let imax = self.grid.imax();
        let workers = self.worker_count.min(imax.max(1));
        let base = imax / workers;
        let remainder = imax % workers;

        let mut ranges = Vec::with_capacity(workers);
        let mut start = 0;
        for w in 0..workers {
            let len = base + if w < remainder { 1 } else { 0 };
            ranges.push((start, start + len));
            start += len;
        }
        ranges
    }

    /// Run `steps` steps. Each step: every worker computes updates for its own
    /// rows purely from previous-step state. The global commit happens once,
    /// since this shares one `Grid` rather than truly partitioned per-worker
    /// memory - there is no halo buffer to copy, only a read against the same
    /// previous-step snapshot a real halo exchange would have reconstructed.
    pub fn run(&mut self, steps: u64, writer: &mut dyn StepWriter) {
        for _ in 0..steps {
            self.step();
            writer.on_step(self.stability.step, &self.grid);
        }
    }

    pub fn step(&mut self) {
        self.stability.raise_time_factor(self.params.dx);
        let local_time_factor = self.stability.local_time_factor(self.params.dx);
        let ranges = self.worker_row_ranges();

        let jmax = self.grid.jmax();
        let updates: Vec<Vec<CellUpdate>> = ranges
            .par_iter()
            .map(|&(lo, hi)| {
                let mut worker_updates = Vec::with_capacity((hi - lo) * jmax);
                for i in lo..hi {
                    for j in 0..jmax {
                        let snapshot = self.grid.snapshot(i, j);
                        // The halo read is just `self.grid.neighborhood`: in a real
                        // distributed executor this would instead read the one-row
                        // halo buffer copied in from the adjacent worker after the
                        // previous step's exchange.
                        let neighborhood = self.grid.neighborhood(i, j);
                        worker_updates.push(kernel::update(
                            snapshot,
                            &neighborhood,
                            &self.params,
                            local_time_factor,
                        ));
                    }
                }
                worker_updates
            })
            .collect();

        for (&(lo, _hi), worker_updates) in ranges.iter().zip(updates.iter()) {
            for (offset, update) in worker_updates.iter().enumerate() {
                let i = lo + offset / jmax;
                let j = offset % jmax;
                self.grid.write_next(i, j, *update);
            }
        }

        self.grid.commit();
        self.stability.step += 1;
    }
}
