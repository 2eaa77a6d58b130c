//! Tower energy simulation core.
//!
//! A tower of floors and rooms, tenants paying rent, equipment producing and consuming
//! power, and a fixed tick that settles money, temperature and satisfaction.

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod simulation;
pub mod telemetry;

pub use controller::GameController;
pub use error::CommandError;
