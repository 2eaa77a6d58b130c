use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub simulation: SimulationConfig,
    #[validate(nested)]
    pub runner: RunnerConfig,
}

/// Rules of the simulated economy. The defaults are the stock game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SimulationConfig {
    pub starting_money: f64,
    pub start_time: NaiveDateTime,
    #[validate(range(min = 1, max = 1440))]
    pub minutes_per_tick: i64,
    #[validate(range(min = 1))]
    pub history_capacity: usize,
    pub ideal_temperature_c: f64,
    #[validate(range(min = 0.0))]
    pub satisfaction_decay_per_degree: f64,
    /// Cap on equipment per room, unbounded when unset
    pub max_equipment_per_room: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_money: 10000.0,
            start_time: default_start_time(),
            minutes_per_tick: 30,
            history_capacity: 60,
            ideal_temperature_c: 24.0,
            satisfaction_decay_per_degree: 0.1,
            max_equipment_per_room: None,
        }
    }
}

fn default_start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default()
}

/// Headless tick loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RunnerConfig {
    /// Wall-clock milliseconds between ticks
    #[validate(range(min = 1))]
    pub tick_millis: u64,
    /// Stop after this many ticks, run until shutdown when unset
    pub max_ticks: Option<u64>,
    /// Extra floors to add at startup, each filled with `demo_room_type` rooms
    pub demo_floors: u32,
    pub demo_room_type: String,
    /// Emit a summary line every N ticks
    #[validate(range(min = 1))]
    pub summary_every_ticks: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_millis: 1000,
            max_ticks: None,
            demo_floors: 0,
            demo_room_type: "residential".to_string(),
            summary_every_ticks: 10,
        }
    }
}

impl Config {
    /// Defaults, then `config/default.toml`, then `TOWER__*` environment variables
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("TOWER__").split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
