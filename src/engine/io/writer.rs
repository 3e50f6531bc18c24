// ABOUTME: The core's output-callback interface - an invocation at every step boundary
// ABOUTME: External writers (image/volumetric formats) are out of scope; these are demonstrations

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use crate::engine::physics::grid::Grid;

/// A callable invoked at step boundaries with read access to every cell's
/// `elevation` and `water_depth`. The core calls this; it never writes files
/// itself.
pub trait StepWriter {
    fn on_step(&mut self, step: u64, grid: &Grid);
}

/// Discards every step. Used where no output is wanted (tests, benchmarking).
pub struct NullWriter;

impl StepWriter for NullWriter {
    fn on_step(&mut self, _step: u64, _grid: &Grid) {}
}

/// Writes an Esri-grid-style ASCII raster of `water_depth` every `interval`
/// steps. A minimal demonstration of the writer interface, not a general
/// output-format implementation.
pub struct AsciiGridWriter {
    out_dir: PathBuf,
    interval: u64,
    nodata_value: f64,
}

impl AsciiGridWriter {
    pub fn new(out_dir: impl Into<PathBuf>, interval: u64, nodata_value: f64) -> Self {
        Self {
            out_dir: out_dir.into(),
            interval: interval.max(1),
            nodata_value,
        }
    }

    fn write_raster(&self, step: u64, grid: &Grid) -> std::io::Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("depth_{step:08}.asc"));
        let mut file = fs::File::create(path)?;

        writeln!(file, "ncols {}", grid.jmax())?;
        writeln!(file, "nrows {}", grid.imax())?;
        writeln!(file, "xllcorner 0.0")?;
        writeln!(file, "yllcorner 0.0")?;
        writeln!(file, "cellsize 1.0")?;
        writeln!(file, "NODATA_value {}", self.nodata_value)?;

        for i in 0..grid.imax() {
            let row: Vec<String> = (0..grid.jmax())
                .map(|j| {
                    if grid.celltype(i, j) == crate::engine::physics::cell::CellType::NoData {
                        self.nodata_value.to_string()
                    } else {
                        grid.water_depth(i, j).to_string()
                    }
                })
                .collect();
            writeln!(file, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

impl StepWriter for AsciiGridWriter {
    fn on_step(&mut self, step: u64, grid: &Grid) {
        if step % self.interval != 0 {
            return;
        }
        if let Err(e) = self.write_raster(step, grid) {
            eprintln!("warning: failed to write step {step} raster: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_writer_does_nothing() {
        let grid = Grid::from_elevations(&[vec![0.0, 0.0]], -9999.0).unwrap();
        let mut writer = NullWriter;
        writer.on_step(0, &grid); // should not panic
    }

    #[test]
    fn ascii_writer_writes_file_at_configured_interval() {
        let grid = Grid::from_elevations(&[vec![1.0, 2.0]], -9999.0).unwrap();
        let mut dir = std::env::temp_dir();
        dir.push(format!("ascii_writer_test_{}", std::process::id()));
        let mut writer = AsciiGridWriter::new(&dir, 2, -9999.0);

        writer.on_step(0, &grid);
        writer.on_step(1, &grid);
        writer.on_step(2, &grid);

        assert!(dir.join("depth_00000000.asc").exists());
        assert!(!dir.join("depth_00000001.asc").exists());
        assert!(dir.join("depth_00000002.asc").exists());

        fs::remove_dir_all(&dir).ok();
    }
}
