//! Reference run of the channel model: zonal spin-up from rest, one
//! deterministic eddy perturbation, then regular stepping to the
//! configured end day. Diagnostics go through the `log` facade; this
//! driver installs `env_logger` so the TZ/KE lines land on stderr.
//!
//!     cargo run --release --example channel_run [config.json]

use qg_core::model::Model;
use qg_types::config::ModelConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ModelConfig::from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => ModelConfig::default(),
    };

    let mut model = match Model::new(config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("failed to build model: {e}");
            std::process::exit(1);
        }
    };

    let start = std::time::Instant::now();
    if let Err(e) = model.run() {
        eprintln!("run aborted at day {:.2}: {e}", model.day);
        std::process::exit(1);
    }
    let elapsed = start.elapsed();

    let snap = model.snapshot();
    println!(
        "day {:.2}  dt {} s  zke {:.2}  eke {:.2}  zpe {:.2}  epe {:.2}",
        snap.day,
        model.dt,
        snap.energies.zonal_kinetic,
        snap.energies.eddy_kinetic,
        snap.energies.zonal_potential,
        snap.energies.eddy_potential,
    );
    println!("elapsed: {elapsed:.2?}");
}
