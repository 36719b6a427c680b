// src/main.rs

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::{error, info};

use rknsim::logging::init_tracing;
use rknsim::simulation::{
    initialize_ensemble, load_parameters, Integrator, PhaseSpaceCsv, ProgressLog, RunController,
    StepObserver, TrajectoryCsv,
};

use cli::Args;

mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = run(&args.config, &args.output_dir) {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

fn run(config_path: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    // パラメータの読み込みと初期化
    let params = load_parameters(config_path)?;
    let mut state = initialize_ensemble(&params)?;

    // 出力先の設定
    let mut observers: Vec<Box<dyn StepObserver>> = vec![Box::new(ProgressLog::new(100))];
    if params.show_trajectories || params.show_phase_space {
        fs::create_dir_all(output_dir)?;
    }
    if params.show_trajectories {
        observers.push(Box::new(TrajectoryCsv::create(output_dir.join("trajectories.csv"))?));
    }
    if params.show_phase_space {
        observers.push(Box::new(PhaseSpaceCsv::create(output_dir.join("phase_space.csv"))?));
    }

    // メインループ
    let controller = RunController::new();
    controller.set_calculating(true);
    let summary = Integrator::new().run(&mut state, &controller, &mut observers)?;
    controller.set_calculating(false);

    info!(steps = summary.steps, "終了");
    Ok(())
}
