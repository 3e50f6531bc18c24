// ABOUTME: CLI entry point - loads a parameter file and DEM, runs the executor, writes output
// ABOUTME: Exit codes: 0 success, 2 ConfigError, 3 DemError, 4 ClosedDomainError

mod engine;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use engine::config::{OutputSettings, RunConfig, RunManifest, RunMetadata, StabilityDefaults};
use engine::io::writer::{AsciiGridWriter, NullWriter, StepWriter};
use engine::io::{Dem, ParamFile};
use engine::physics::{Executor, Grid, SimParams, StabilityState};

#[derive(Parser, Debug)]
#[command(name = "sheetflow", about = "Shallow-water flow routing over a DEM catchment")]
struct Args {
    /// Path to the line-oriented parameter file.
    #[arg(short, long)]
    params: PathBuf,

    /// Directory to write step rasters into. If omitted, no output is written.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let param_file = match ParamFile::load(&args.params) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let dem_path = PathBuf::from(&param_file.read_path)
        .join(format!("{}{}", param_file.read_fname, param_file.dem_read_extension));
    let dem = match Dem::load(&dem_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(3);
        }
    };

    let grid = match Grid::from_elevations(&dem.elevations, dem.nodata_value) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(4);
        }
    };

    let sim_params = SimParams {
        dx: dem.cellsize,
        dy: dem.cellsize,
        no_data_value: dem.nodata_value,
        water_depth_erosion_threshold: param_file.water_depth_erosion_threshold,
        edgeslope: param_file.slope_on_edge_cell,
        hflow_threshold: param_file.hflow_threshold,
        mannings: param_file.mannings_n,
        froude_limit: param_file.froude_num_limit,
    };
    let stability = StabilityState::new(param_file.courant_number, 10.0);

    let mut executor = Executor::new(grid, sim_params, stability);

    let mut writer: Box<dyn StepWriter> = match &args.out_dir {
        Some(dir) => Box::new(AsciiGridWriter::new(dir, 1, dem.nodata_value)),
        None => Box::new(NullWriter),
    };

    let run_config = RunConfig {
        metadata: RunMetadata {
            name: param_file.read_fname.clone(),
            author: None,
            created: chrono::Utc::now().to_rfc3339(),
            description: None,
        },
        dem_path: dem_path.display().to_string(),
        param_path: args.params.display().to_string(),
        stability: StabilityDefaults {
            courant_number: param_file.courant_number,
            maxdepth: 10.0,
            water_depth_erosion_threshold: param_file.water_depth_erosion_threshold,
            edgeslope: param_file.slope_on_edge_cell,
            hflow_threshold: param_file.hflow_threshold,
            mannings: param_file.mannings_n,
            froude_limit: param_file.froude_num_limit,
        },
        output: OutputSettings {
            out_dir: args
                .out_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            interval: 1,
        },
    };
    let mut manifest = RunManifest::started_now(run_config);

    println!(
        "running {} steps over a {}x{} grid",
        param_file.no_of_iterations,
        executor.grid().imax(),
        executor.grid().jmax()
    );
    executor.run(param_file.no_of_iterations, writer.as_mut());
    println!(
        "done: {} steps, total water {:.6}, max depth {:.6}",
        executor.stability().step,
        executor.grid().total_water(),
        executor.grid().max_water_depth()
    );

    manifest.complete(executor.stability().step, executor.grid().total_water());
    let manifest_path = match &args.out_dir {
        Some(dir) => dir.join("run_manifest.yaml"),
        None => PathBuf::from("run_manifest.yaml"),
    };
    if let Err(e) = manifest.save_to_file(&manifest_path.to_string_lossy()) {
        eprintln!("warning: failed to write run manifest to {}: {e}", manifest_path.display());
    }

    ExitCode::SUCCESS
}
