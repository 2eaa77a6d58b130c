//! # Tower Simulation
//!
//! The tick-driven economic and environmental model.
//!
//! ## Components
//!
//! - **Environment**: ambient temperature and solar ratio as pure functions of the hour
//! - **History**: fixed-capacity rolling series of power and money samples
//! - **Engine**: owns the game state, applies building commands and advances the clock
//!
//! ## Usage
//!
//! ```rust
//! use tower_energy_sim::domain::{EquipmentType, RoomType};
//! use tower_energy_sim::simulation::SimulationEngine;
//!
//! let mut engine = SimulationEngine::default();
//! let floor = engine.state().building.floors[0].id;
//!
//! let room = engine.build_room(floor, RoomType::Residential).unwrap();
//! engine.install_equipment(floor, room, EquipmentType::SolarPanel).unwrap();
//!
//! // Advance 30 simulated minutes
//! let report = engine.tick();
//! assert_eq!(report.income, 10.0);
//! ```

pub mod engine;
pub mod environment;
pub mod history;

pub use engine::{GameState, SimulationEngine, TickReport};
pub use environment::{solar_ratio, temperature, EnvironmentState};
pub use history::{History, HistoryBuffer, MoneySample, PowerSample, DEFAULT_HISTORY_CAPACITY};
