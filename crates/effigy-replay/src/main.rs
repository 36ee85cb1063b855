mod config;
mod host;
mod script;

use std::path::Path;

use config::ReplayConfig;
use effigy_catalog::ShapeCatalog;
use effigy_core::Grid;
use host::Replayer;
use tracing::{error, info};

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "effigy.toml".into());

    let config = match ReplayConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "Effigy replay v{} ({}x{} grid)",
        env!("CARGO_PKG_VERSION"),
        config.grid.width,
        config.grid.height
    );
    info!(
        "Invalid session transitions: {:?}",
        config.session.on_invalid_state
    );

    // Paths in the config are relative to the config file.
    let base = Path::new(&config_path).parent().unwrap_or(Path::new("."));

    let catalog = match &config.catalog.path {
        Some(path) => ShapeCatalog::load(base.join(path)),
        None => ShapeCatalog::builtin(),
    };
    let catalog = match catalog {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load shape catalog: {e}");
            std::process::exit(1);
        }
    };
    info!("Shapes: {}", catalog.names().join(", "));

    let script_path = base.join(&config.replay.script);
    let text = match std::fs::read_to_string(&script_path) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to read {}: {e}", script_path.display());
            std::process::exit(1);
        }
    };
    let script = match script::parse_script(&text) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to parse {}: {e}", script_path.display());
            std::process::exit(1);
        }
    };

    let grid = Grid::new(config.grid.width, config.grid.height);
    let mut replayer = Replayer::new(grid, catalog, config.session.on_invalid_state);

    match replayer.run(&script) {
        Ok(stats) => {
            info!(
                "Replayed {} command(s): {} placed, {} committed, {} cancelled, {} rejected, {} ignored",
                stats.commands,
                stats.placed,
                stats.committed,
                stats.cancelled,
                stats.rejected,
                stats.ignored
            );
            info!(
                "Final grid: {} item(s), {} occupied cell(s), revision {}, session {:?}",
                replayer.grid().len(),
                replayer.grid().occupied_cells(),
                replayer.grid().revision(),
                replayer.session().state()
            );
            replayer.log_layout();
        }
        Err(e) => {
            error!("Replay aborted at {e}");
            replayer.log_layout();
            std::process::exit(2);
        }
    }
}
