use thiserror::Error;

use crate::domain::{FloorId, RoomId, RoomType};

/// Reasons a building command was rejected.
///
/// Every command is all-or-nothing: when one of these is returned the game state
/// is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Floor not found: {0}")]
    FloorNotFound(FloorId),

    #[error("Room not found: {room} on {floor}")]
    RoomNotFound { floor: FloorId, room: RoomId },

    #[error("No empty room slot left on {0}")]
    FloorFull(FloorId),

    #[error("Insufficient funds: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Room type {0} cannot be constructed or hold a tenant")]
    InvalidRoomType(RoomType),

    #[error("Equipment limit reached: room {room} already holds {limit} items")]
    EquipmentLimitReached { room: RoomId, limit: usize },

    #[error("Building has no floors")]
    NoFloors,
}

impl CommandError {
    /// Caller-contract violations, as opposed to ordinary gameplay rejections
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, CommandError::InvalidRoomType(_))
    }

    /// Short machine-readable tag for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::FloorNotFound(_) => "FloorNotFound",
            CommandError::RoomNotFound { .. } => "RoomNotFound",
            CommandError::FloorFull(_) => "FloorFull",
            CommandError::InsufficientFunds { .. } => "InsufficientFunds",
            CommandError::InvalidRoomType(_) => "InvalidRoomType",
            CommandError::EquipmentLimitReached { .. } => "EquipmentLimitReached",
            CommandError::NoFloors => "NoFloors",
        }
    }
}
