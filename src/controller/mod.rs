use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::{Config, RunnerConfig, SimulationConfig};
use crate::domain::{EquipmentId, EquipmentType, FloorId, RoomId, RoomType, ROOMS_PER_FLOOR};
use crate::error::CommandError;
use crate::simulation::{GameState, SimulationEngine, TickReport};

/// Shared handle to one running game.
///
/// Commands, ticks and snapshots all go through a single lock, so a command can never
/// observe or interleave with a half-finished tick.
#[derive(Clone)]
pub struct GameController {
    engine: Arc<Mutex<SimulationEngine>>,
}

impl GameController {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(SimulationEngine::new(config))),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.simulation.clone())
    }

    /// Owned copy of the whole game state
    pub fn snapshot(&self) -> GameState {
        self.engine.lock().snapshot()
    }

    /// Read part of the state without copying all of it
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(self.engine.lock().state())
    }

    pub fn add_floor(&self) -> FloorId {
        self.engine.lock().add_floor()
    }

    pub fn build_room(&self, floor_id: FloorId, room_type: RoomType) -> Result<RoomId, CommandError> {
        self.engine.lock().build_room(floor_id, room_type)
    }

    pub fn build_room_on_top_floor(&self, room_type: RoomType) -> Result<RoomId, CommandError> {
        self.engine.lock().build_room_on_top_floor(room_type)
    }

    pub fn install_equipment(
        &self,
        floor_id: FloorId,
        room_id: RoomId,
        equipment_type: EquipmentType,
    ) -> Result<EquipmentId, CommandError> {
        self.engine
            .lock()
            .install_equipment(floor_id, room_id, equipment_type)
    }

    pub fn tick(&self) -> TickReport {
        self.engine.lock().tick()
    }

    /// Add `floors` floors and fill every slot on them with `room_type`.
    /// Stops at the first rejected command.
    pub fn seed_floors(&self, floors: u32, room_type: RoomType) -> Result<(), CommandError> {
        let mut engine = self.engine.lock();
        for _ in 0..floors {
            let floor_id = engine.add_floor();
            for _ in 0..ROOMS_PER_FLOOR {
                engine.build_room(floor_id, room_type)?;
            }
        }
        info!(
            floors = engine.state().building.floor_count(),
            occupied = engine.state().building.occupied_room_count(),
            "tower seeded"
        );
        Ok(())
    }

    /// Drive the simulation from one recurring timer until `max_ticks` is reached.
    ///
    /// With no limit this never returns; race it against a shutdown signal.
    /// Returns the number of ticks run.
    pub async fn run(&self, runner: &RunnerConfig) -> u64 {
        let period = Duration::from_millis(runner.tick_millis.max(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately.
        interval.tick().await;

        info!(period_ms = period.as_millis() as u64, max_ticks = ?runner.max_ticks, "tick loop started");

        let mut ticks = 0u64;
        let mut was_solvent = self.with_state(|s| s.money >= 0.0);
        loop {
            if runner.max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
            interval.tick().await;

            let report = self.tick();
            ticks += 1;

            debug!(
                tick = report.tick,
                time = %report.time,
                production_kw = report.production_kw,
                consumption_kw = report.consumption_kw,
                net_profit = report.net_profit,
                "tick"
            );

            if ticks % runner.summary_every_ticks.max(1) == 0 {
                info!(
                    tick = report.tick,
                    time = %report.time,
                    temperature_c = report.temperature_c,
                    production_kw = report.production_kw,
                    consumption_kw = report.consumption_kw,
                    money = report.money,
                    "simulation summary"
                );
            }

            let solvent = report.money >= 0.0;
            if was_solvent && !solvent {
                warn!(tick = report.tick, money = report.money, "balance went negative");
            }
            was_solvent = solvent;
        }

        info!(ticks, "tick loop finished");
        ticks
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
