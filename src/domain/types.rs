use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifier Newtypes
// ============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the inner UUID
            pub fn inner(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0.simple())
            }
        }
    };
}

entity_id!(
    /// Identifies a floor within the building
    FloorId,
    "floor"
);
entity_id!(
    /// Identifies a room. Building into an empty slot issues a new id.
    RoomId,
    "room"
);
entity_id!(
    /// Identifies a tenant
    TenantId,
    "tenant"
);
entity_id!(
    /// Identifies one installed equipment instance
    EquipmentId,
    "equipment"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = RoomId::new();
        let b = RoomId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_prefix() {
        let id = FloorId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("floor_"));
        assert_eq!(shown.len(), "floor_".len() + 32);
    }

    #[test]
    fn test_id_serializes_as_plain_uuid() {
        let id = EquipmentId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.inner()));
    }
}
