use anyhow::{Context, Result};
use tower_energy_sim::{config, domain::RoomType, telemetry, GameController};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    let controller = GameController::from_config(&cfg);

    if cfg.runner.demo_floors > 0 {
        let room_type: RoomType = cfg
            .runner
            .demo_room_type
            .parse()
            .with_context(|| format!("unknown demo_room_type '{}'", cfg.runner.demo_room_type))?;
        controller.seed_floors(cfg.runner.demo_floors, room_type)?;
    }

    info!(
        money = cfg.simulation.starting_money,
        start_time = %cfg.simulation.start_time,
        minutes_per_tick = cfg.simulation.minutes_per_tick,
        "starting tower simulation"
    );

    tokio::select! {
        ticks = controller.run(&cfg.runner) => info!(ticks, "tick limit reached"),
        _ = telemetry::shutdown_signal() => warn!("stopping tick loop"),
    }

    let snapshot = controller.snapshot();
    let json = serde_json::to_string(&snapshot)?;
    info!(
        snapshot = %json,
        net_energy_kw = snapshot.net_energy_kw(),
        "final state"
    );

    warn!("shutdown complete");
    Ok(())
}
