//! # Simulation Engine
//!
//! Owns the [`GameState`] and is the only thing that mutates it. Commands either apply
//! fully or return a [`CommandError`] with the state untouched; `tick` always succeeds.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

use super::environment::EnvironmentState;
use super::history::History;
use crate::config::SimulationConfig;
use crate::domain::{Building, EquipmentId, EquipmentType, FloorId, RoomId, RoomType};
use crate::error::CommandError;

/// Aggregate root of the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    /// May go negative; there is no bankruptcy rule
    pub money: f64,
    pub time: NaiveDateTime,
    pub total_energy_production_kw: f64,
    pub total_energy_consumption_kw: f64,
    pub global_temperature_c: f64,
    pub building: Building,
    pub history: History,
    pub ticks: u64,
}

impl GameState {
    /// Fresh game: starting money, one empty floor, no history
    pub fn new(config: &SimulationConfig) -> Self {
        let mut building = Building::new();
        building.add_floor();

        Self {
            money: config.starting_money,
            time: config.start_time,
            total_energy_production_kw: 0.0,
            total_energy_consumption_kw: 0.0,
            global_temperature_c: 22.0,
            building,
            history: History::with_capacity(config.history_capacity),
            ticks: 0,
        }
    }

    /// Production minus consumption from the last tick (kW)
    pub fn net_energy_kw(&self) -> f64 {
        self.total_energy_production_kw - self.total_energy_consumption_kw
    }
}

/// What one tick computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub time: NaiveDateTime,
    pub hour: u32,
    pub temperature_c: f64,
    pub solar_ratio: f64,
    pub production_kw: f64,
    pub consumption_kw: f64,
    pub income: f64,
    pub expense: f64,
    pub net_profit: f64,
    pub money: f64,
}

#[derive(Debug, Default)]
struct TickTotals {
    production_kw: f64,
    consumption_kw: f64,
    income: f64,
    expense: f64,
}

pub struct SimulationEngine {
    config: SimulationConfig,
    state: GameState,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        let state = GameState::new(&config);
        Self { config, state }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Add a floor on top. Free and always succeeds.
    pub fn add_floor(&mut self) -> FloorId {
        let id = self.state.building.add_floor();
        debug!(floor = %id, level = self.state.building.floor_count(), "floor added");
        id
    }

    /// Occupy the first empty slot on a floor. Construction is free.
    pub fn build_room(&mut self, floor_id: FloorId, room_type: RoomType) -> Result<RoomId, CommandError> {
        match self.state.building.build_room(floor_id, room_type) {
            Ok(room_id) => {
                debug!(floor = %floor_id, room = %room_id, %room_type, "room built");
                Ok(room_id)
            }
            Err(e) => Err(log_rejection("build_room", e)),
        }
    }

    /// Build on the highest floor, as the stock build menu does
    pub fn build_room_on_top_floor(&mut self, room_type: RoomType) -> Result<RoomId, CommandError> {
        let floor_id = self
            .state
            .building
            .top_floor()
            .map(|f| f.id)
            .ok_or(CommandError::NoFloors)?;
        self.build_room(floor_id, room_type)
    }

    /// Buy and install equipment in a room. The full catalog cost is charged up front.
    pub fn install_equipment(
        &mut self,
        floor_id: FloorId,
        room_id: RoomId,
        equipment_type: EquipmentType,
    ) -> Result<EquipmentId, CommandError> {
        let cost = equipment_type.spec().cost;
        if self.state.money < cost {
            return Err(log_rejection(
                "install_equipment",
                CommandError::InsufficientFunds {
                    required: cost,
                    available: self.state.money,
                },
            ));
        }

        let equipment_id = self
            .state
            .building
            .install_equipment(
                floor_id,
                room_id,
                equipment_type,
                self.config.max_equipment_per_room,
            )
            .map_err(|e| log_rejection("install_equipment", e))?;

        self.state.money -= cost;
        debug!(
            room = %room_id,
            equipment = %equipment_id,
            %equipment_type,
            cost,
            money = self.state.money,
            "equipment installed"
        );
        Ok(equipment_id)
    }

    /// Advance the clock by one step and settle energy, satisfaction and money.
    pub fn tick(&mut self) -> TickReport {
        let time = self.state.time + Duration::minutes(self.config.minutes_per_tick);
        let env = EnvironmentState::at(time);
        let comfort_penalty = (env.temperature_c - self.config.ideal_temperature_c).abs()
            * self.config.satisfaction_decay_per_degree;

        let mut totals = TickTotals::default();
        for room in self.state.building.rooms_mut() {
            if let Some(tenant) = room.tenant.as_mut() {
                totals.consumption_kw += tenant.energy_usage_kw;
                totals.income += tenant.rent;
                if room.room_type.is_temperature_sensitive() {
                    tenant.adjust_satisfaction(-comfort_penalty);
                }
            }

            for equipment in &room.equipment {
                totals.production_kw += equipment.production_kw(env.solar_ratio);
                totals.consumption_kw += equipment.energy_consumption_kw;
                totals.expense += equipment.maintenance_cost;
            }
        }

        // Energy balance has no cost of its own; only rent and upkeep move money.
        let net_profit = totals.income - totals.expense;
        let state = &mut self.state;
        state.money += net_profit;
        state.time = time;
        state.ticks += 1;
        state.total_energy_production_kw = totals.production_kw;
        state.total_energy_consumption_kw = totals.consumption_kw;
        state.global_temperature_c = env.temperature_c;
        state
            .history
            .record(time, totals.production_kw, totals.consumption_kw, state.money);

        TickReport {
            tick: state.ticks,
            time,
            hour: env.hour,
            temperature_c: env.temperature_c,
            solar_ratio: env.solar_ratio,
            production_kw: totals.production_kw,
            consumption_kw: totals.consumption_kw,
            income: totals.income,
            expense: totals.expense,
            net_profit,
            money: state.money,
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

fn log_rejection(command: &'static str, error: CommandError) -> CommandError {
    if error.is_caller_bug() {
        warn!(command, kind = error.kind(), %error, "command rejected: caller bug");
    } else {
        debug!(command, kind = error.kind(), %error, "command rejected");
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ROOMS_PER_FLOOR;

    fn first_floor(engine: &SimulationEngine) -> FloorId {
        engine.state().building.floors[0].id
    }

    #[test]
    fn test_new_game() {
        let engine = SimulationEngine::default();
        let state = engine.state();

        assert_eq!(state.money, 10000.0);
        assert_eq!(state.building.floor_count(), 1);
        assert_eq!(state.building.floors[0].level, 1);
        assert!(state.history.power_trend.is_empty());
        assert_eq!(state.global_temperature_c, 22.0);
    }

    #[test]
    fn test_residential_tick_at_hour_eight() {
        let mut engine = SimulationEngine::default();
        let floor = first_floor(&engine);
        engine.build_room(floor, RoomType::Residential).unwrap();
        assert_eq!(engine.state().money, 10000.0);

        let report = engine.tick();

        assert_eq!(report.hour, 8);
        assert_eq!(report.consumption_kw, 2.0);
        assert_eq!(report.production_kw, 0.0);
        assert_eq!(report.income, 10.0);
        assert_eq!(report.money, 10010.0);
        assert!((report.temperature_c - 26.25).abs() < 1e-9);

        let state = engine.state();
        assert_eq!(state.money, 10010.0);
        assert_eq!(state.total_energy_consumption_kw, 2.0);
        assert_eq!(state.time.to_string(), "2024-01-01 08:30:00");

        let tenant = state.building.floors[0].rooms[0].tenant.as_ref().unwrap();
        assert!((tenant.satisfaction - (80.0 - 0.225)).abs() < 1e-9);
    }

    #[test]
    fn test_server_satisfaction_never_changes() {
        let mut engine = SimulationEngine::default();
        let floor = first_floor(&engine);
        engine.build_room(floor, RoomType::Server).unwrap();

        for _ in 0..48 {
            engine.tick();
        }

        let tenant = engine.state().building.floors[0].rooms[0]
            .tenant
            .as_ref()
            .unwrap();
        assert_eq!(tenant.satisfaction, 90.0);
    }

    #[test]
    fn test_install_solar_panel_charges_cost() {
        let mut engine = SimulationEngine::default();
        let floor = first_floor(&engine);
        let room = engine.build_room(floor, RoomType::Office).unwrap();

        engine
            .install_equipment(floor, room, EquipmentType::SolarPanel)
            .unwrap();

        let state = engine.state();
        assert_eq!(state.money, 5000.0);
        assert_eq!(state.building.room(floor, room).unwrap().equipment.len(), 1);
    }

    #[test]
    fn test_insufficient_funds_leaves_state_untouched() {
        let mut engine = SimulationEngine::new(SimulationConfig {
            starting_money: 4999.0,
            ..Default::default()
        });
        let floor = first_floor(&engine);
        let room = engine.state().building.floors[0].rooms[0].id;
        let before = engine.snapshot();

        let result = engine.install_equipment(floor, room, EquipmentType::SolarPanel);

        assert_eq!(
            result,
            Err(CommandError::InsufficientFunds {
                required: 5000.0,
                available: 4999.0
            })
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_unknown_room_does_not_charge() {
        let mut engine = SimulationEngine::default();
        let floor = first_floor(&engine);

        let result = engine.install_equipment(floor, RoomId::new(), EquipmentType::Battery);

        assert!(matches!(result, Err(CommandError::RoomNotFound { .. })));
        assert_eq!(engine.state().money, 10000.0);
    }

    #[test]
    fn test_equipment_cap_from_config() {
        let mut engine = SimulationEngine::new(SimulationConfig {
            max_equipment_per_room: Some(1),
            ..Default::default()
        });
        let floor = first_floor(&engine);
        let room = engine.state().building.floors[0].rooms[0].id;

        engine
            .install_equipment(floor, room, EquipmentType::AirConditioner)
            .unwrap();
        let result = engine.install_equipment(floor, room, EquipmentType::AirConditioner);

        assert!(matches!(
            result,
            Err(CommandError::EquipmentLimitReached { limit: 1, .. })
        ));
        assert_eq!(engine.state().money, 8000.0);
    }

    #[test]
    fn test_maintenance_is_charged_and_money_can_go_negative() {
        let mut engine = SimulationEngine::new(SimulationConfig {
            starting_money: 8000.0,
            ..Default::default()
        });
        let floor = first_floor(&engine);
        let room = engine.state().building.floors[0].rooms[0].id;
        engine
            .install_equipment(floor, room, EquipmentType::Generator)
            .unwrap();
        assert_eq!(engine.state().money, 0.0);

        let report = engine.tick();

        assert_eq!(report.production_kw, 10.0);
        assert_eq!(report.expense, 5.0);
        assert_eq!(report.money, -5.0);
    }

    #[test]
    fn test_build_room_on_top_floor() {
        let mut engine = SimulationEngine::default();
        let top = engine.add_floor();

        let room = engine.build_room_on_top_floor(RoomType::Office).unwrap();

        let floor = engine.state().building.floor(top).unwrap();
        assert_eq!(floor.level, 2);
        assert_eq!(floor.rooms[0].id, room);
    }

    #[test]
    fn test_build_room_errors_are_reported() {
        let mut engine = SimulationEngine::default();
        let floor = first_floor(&engine);
        for _ in 0..ROOMS_PER_FLOOR {
            engine.build_room(floor, RoomType::Residential).unwrap();
        }

        assert_eq!(
            engine.build_room(floor, RoomType::Residential),
            Err(CommandError::FloorFull(floor))
        );
        assert_eq!(
            engine.build_room(floor, RoomType::Empty),
            Err(CommandError::InvalidRoomType(RoomType::Empty))
        );
    }

    #[test]
    fn test_history_keeps_latest_sixty() {
        let mut engine = SimulationEngine::default();
        let first = engine.tick();
        for _ in 0..60 {
            engine.tick();
        }

        let history = &engine.state().history;
        assert_eq!(history.power_trend.len(), 60);
        assert_eq!(history.money_trend.len(), 60);
        assert!(history.power_trend.iter().all(|s| s.time != first.time));
        assert_eq!(
            history.power_trend.latest().unwrap().time,
            engine.state().time
        );
    }

    #[test]
    fn test_net_energy() {
        let mut engine = SimulationEngine::default();
        let floor = first_floor(&engine);
        let room = engine.build_room(floor, RoomType::Residential).unwrap();
        engine
            .install_equipment(floor, room, EquipmentType::Generator)
            .unwrap();

        engine.tick();

        assert_eq!(engine.state().net_energy_kw(), 8.0);
    }
}
