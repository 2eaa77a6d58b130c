//! # Building Model
//!
//! Building → Floors → Rooms → (Tenant?, Equipment[]).
//!
//! Floors are numbered from 1 in creation order and never renumbered. Every floor has
//! exactly [`ROOMS_PER_FLOOR`] slots, created empty. A slot goes from `Empty` to an
//! occupied type once; there is no demolition path. Equipment only ever accumulates.

use serde::Serialize;

use super::catalog::{EquipmentSpec, EquipmentType, RoomType};
use super::types::{EquipmentId, FloorId, RoomId, TenantId};
use crate::error::CommandError;

/// Room slots on every floor
pub const ROOMS_PER_FLOOR: usize = 4;

/// Satisfaction bounds
pub const MIN_SATISFACTION: f64 = 0.0;
pub const MAX_SATISFACTION: f64 = 100.0;

/// Occupant of a room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    /// Comfort metric, always within 0-100
    pub satisfaction: f64,
    /// Rent paid every tick
    pub rent: f64,
    /// Constant draw (kW)
    pub energy_usage_kw: f64,
}

impl Tenant {
    /// Create a tenant from the default archetype for a room type.
    ///
    /// `RoomType::Empty` has no tenant; asking for one is a caller bug and is rejected.
    pub fn for_room_type(room_type: RoomType) -> Result<Self, CommandError> {
        let archetype = room_type.archetype()?;
        Ok(Self {
            id: TenantId::new(),
            name: archetype.name.to_string(),
            satisfaction: archetype.satisfaction,
            rent: archetype.rent,
            energy_usage_kw: archetype.energy_usage_kw,
        })
    }

    /// Shift satisfaction by `delta`, keeping it inside 0-100
    pub fn adjust_satisfaction(&mut self, delta: f64) {
        self.satisfaction = (self.satisfaction + delta).clamp(MIN_SATISFACTION, MAX_SATISFACTION);
    }
}

/// One installed piece of equipment. Attributes are copied from the catalog at install time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub equipment_type: EquipmentType,
    pub name: String,
    pub energy_production_kw: f64,
    pub energy_consumption_kw: f64,
    pub cost: f64,
    pub maintenance_cost: f64,
}

impl Equipment {
    pub fn from_spec(spec: &EquipmentSpec) -> Self {
        Self {
            id: EquipmentId::new(),
            equipment_type: spec.equipment_type,
            name: spec.name.to_string(),
            energy_production_kw: spec.energy_production_kw,
            energy_consumption_kw: spec.energy_consumption_kw,
            cost: spec.cost,
            maintenance_cost: spec.maintenance_cost,
        }
    }

    /// Actual production given the current solar ratio (0.0-1.0).
    /// Only solar panels scale with it.
    pub fn production_kw(&self, solar_ratio: f64) -> f64 {
        if self.equipment_type.is_time_varying() {
            self.energy_production_kw * solar_ratio
        } else {
            self.energy_production_kw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    /// Present iff `room_type` is not `Empty`
    pub tenant: Option<Tenant>,
    pub equipment: Vec<Equipment>,
    /// Slot index within the floor (0-3)
    pub position: usize,
}

impl Room {
    pub fn empty(position: usize) -> Self {
        Self {
            id: RoomId::new(),
            room_type: RoomType::Empty,
            tenant: None,
            equipment: Vec::new(),
            position,
        }
    }

    /// A freshly occupied room with the default tenant for `room_type`
    pub fn occupied(room_type: RoomType, position: usize) -> Result<Self, CommandError> {
        let tenant = Tenant::for_room_type(room_type)?;
        Ok(Self {
            id: RoomId::new(),
            room_type,
            tenant: Some(tenant),
            equipment: Vec::new(),
            position,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.room_type.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Floor {
    pub id: FloorId,
    /// 1-based level
    pub level: u32,
    pub rooms: [Room; ROOMS_PER_FLOOR],
}

impl Floor {
    pub fn new(level: u32) -> Self {
        Self {
            id: FloorId::new(),
            level,
            rooms: std::array::from_fn(Room::empty),
        }
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// First empty slot in position order
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.rooms.iter().position(Room::is_empty)
    }

    pub fn is_full(&self) -> bool {
        self.first_empty_slot().is_none()
    }
}

/// The whole tower
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Building {
    pub floors: Vec<Floor>,
}

impl Building {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a floor one level above the current top, with all slots empty
    pub fn add_floor(&mut self) -> FloorId {
        let floor = Floor::new(self.floors.len() as u32 + 1);
        let id = floor.id;
        self.floors.push(floor);
        id
    }

    /// Occupy the first empty slot on `floor_id` with a `room_type` room and its default tenant.
    ///
    /// Returns the id of the new room. Nothing changes on error.
    pub fn build_room(&mut self, floor_id: FloorId, room_type: RoomType) -> Result<RoomId, CommandError> {
        if room_type.is_empty() {
            return Err(CommandError::InvalidRoomType(room_type));
        }

        let floor = self
            .floors
            .iter_mut()
            .find(|f| f.id == floor_id)
            .ok_or(CommandError::FloorNotFound(floor_id))?;
        let slot = floor
            .first_empty_slot()
            .ok_or(CommandError::FloorFull(floor_id))?;

        let room = Room::occupied(room_type, floor.rooms[slot].position)?;
        let id = room.id;
        floor.rooms[slot] = room;
        Ok(id)
    }

    /// Append a new catalog instance of `equipment_type` to a room.
    ///
    /// `limit` caps the equipment list per room; `None` means unbounded.
    /// Funds are the caller's concern.
    pub fn install_equipment(
        &mut self,
        floor_id: FloorId,
        room_id: RoomId,
        equipment_type: EquipmentType,
        limit: Option<usize>,
    ) -> Result<EquipmentId, CommandError> {
        let room = self.room_mut(floor_id, room_id)?;

        if let Some(limit) = limit {
            if room.equipment.len() >= limit {
                return Err(CommandError::EquipmentLimitReached {
                    room: room_id,
                    limit,
                });
            }
        }

        let equipment = Equipment::from_spec(equipment_type.spec());
        let id = equipment.id;
        room.equipment.push(equipment);
        Ok(id)
    }

    fn room_mut(&mut self, floor_id: FloorId, room_id: RoomId) -> Result<&mut Room, CommandError> {
        let floor = self
            .floors
            .iter_mut()
            .find(|f| f.id == floor_id)
            .ok_or(CommandError::FloorNotFound(floor_id))?;
        floor
            .rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or(CommandError::RoomNotFound {
                floor: floor_id,
                room: room_id,
            })
    }

    pub fn floor(&self, floor_id: FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == floor_id)
    }

    pub fn floor_by_level(&self, level: u32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.level == level)
    }

    pub fn top_floor(&self) -> Option<&Floor> {
        self.floors.last()
    }

    pub fn room(&self, floor_id: FloorId, room_id: RoomId) -> Option<&Room> {
        self.floor(floor_id).and_then(|f| f.room(room_id))
    }

    /// All rooms, floors in order and rooms in position order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.floors.iter().flat_map(|f| f.rooms.iter())
    }

    /// Mutable traversal in the same order as [`Building::rooms`]
    pub(crate) fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.floors.iter_mut().flat_map(|f| f.rooms.iter_mut())
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn occupied_room_count(&self) -> usize {
        self.rooms().filter(|r| !r.is_empty()).count()
    }

    pub fn empty_room_count(&self) -> usize {
        self.rooms().filter(|r| r.is_empty()).count()
    }

    pub fn equipment_count(&self) -> usize {
        self.rooms().map(|r| r.equipment.len()).sum()
    }

    /// Mean satisfaction over all tenants, `None` when the tower has none
    pub fn average_satisfaction(&self) -> Option<f64> {
        let (sum, count) = self
            .rooms()
            .filter_map(|r| r.tenant.as_ref())
            .fold((0.0, 0usize), |(sum, n), t| (sum + t.satisfaction, n + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_floor() -> (Building, FloorId) {
        let mut building = Building::new();
        let id = building.add_floor();
        (building, id)
    }

    #[test]
    fn test_add_floor_levels_are_contiguous() {
        let mut building = Building::new();
        for _ in 0..3 {
            building.add_floor();
        }

        let levels: Vec<u32> = building.floors.iter().map(|f| f.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert_eq!(building.top_floor().unwrap().level, 3);
    }

    #[test]
    fn test_new_floor_has_four_empty_slots() {
        let floor = Floor::new(1);
        assert_eq!(floor.rooms.len(), ROOMS_PER_FLOOR);
        for (i, room) in floor.rooms.iter().enumerate() {
            assert_eq!(room.position, i);
            assert!(room.is_empty());
            assert!(room.tenant.is_none());
            assert!(room.equipment.is_empty());
        }
    }

    #[test]
    fn test_build_room_fills_first_empty_slot() {
        let (mut building, floor_id) = one_floor();

        let first = building.build_room(floor_id, RoomType::Office).unwrap();
        let second = building.build_room(floor_id, RoomType::Server).unwrap();

        let floor = building.floor(floor_id).unwrap();
        assert_eq!(floor.rooms[0].id, first);
        assert_eq!(floor.rooms[0].room_type, RoomType::Office);
        assert_eq!(floor.rooms[1].id, second);
        assert_eq!(floor.rooms[1].position, 1);

        let tenant = floor.rooms[1].tenant.as_ref().unwrap();
        assert_eq!(tenant.name, "Data Center");
        assert_eq!(tenant.rent, 50.0);
        assert!(floor.rooms[2].is_empty());
    }

    #[test]
    fn test_build_room_on_full_floor_is_rejected_without_change() {
        let (mut building, floor_id) = one_floor();
        for _ in 0..ROOMS_PER_FLOOR {
            building.build_room(floor_id, RoomType::Residential).unwrap();
        }
        let before = building.clone();

        let result = building.build_room(floor_id, RoomType::Office);

        assert_eq!(result, Err(CommandError::FloorFull(floor_id)));
        assert_eq!(building, before);
    }

    #[test]
    fn test_build_room_unknown_floor() {
        let (mut building, _) = one_floor();
        let missing = FloorId::new();
        let before = building.clone();

        assert_eq!(
            building.build_room(missing, RoomType::Office),
            Err(CommandError::FloorNotFound(missing))
        );
        assert_eq!(building, before);
    }

    #[test]
    fn test_build_empty_room_type_is_rejected() {
        let (mut building, floor_id) = one_floor();
        assert_eq!(
            building.build_room(floor_id, RoomType::Empty),
            Err(CommandError::InvalidRoomType(RoomType::Empty))
        );
        assert_eq!(building.occupied_room_count(), 0);
    }

    #[test]
    fn test_tenant_for_empty_room_fails() {
        assert!(Tenant::for_room_type(RoomType::Empty).is_err());
    }

    #[test]
    fn test_install_equipment_appends_copy_of_catalog() {
        let (mut building, floor_id) = one_floor();
        let room_id = building.build_room(floor_id, RoomType::Residential).unwrap();

        let a = building
            .install_equipment(floor_id, room_id, EquipmentType::Generator, None)
            .unwrap();
        let b = building
            .install_equipment(floor_id, room_id, EquipmentType::Generator, None)
            .unwrap();
        assert_ne!(a, b);

        let room = building.room(floor_id, room_id).unwrap();
        assert_eq!(room.equipment.len(), 2);
        assert_eq!(room.equipment[0].name, "Generator");
        assert_eq!(room.equipment[0].energy_production_kw, 10.0);
        assert_eq!(room.equipment[1].id, b);
    }

    #[test]
    fn test_install_equipment_into_empty_slot_is_allowed() {
        let (mut building, floor_id) = one_floor();
        let room_id = building.floors[0].rooms[3].id;

        building
            .install_equipment(floor_id, room_id, EquipmentType::Battery, None)
            .unwrap();
        assert_eq!(building.equipment_count(), 1);
    }

    #[test]
    fn test_install_equipment_respects_limit() {
        let (mut building, floor_id) = one_floor();
        let room_id = building.floors[0].rooms[0].id;

        building
            .install_equipment(floor_id, room_id, EquipmentType::Battery, Some(1))
            .unwrap();
        let result = building.install_equipment(floor_id, room_id, EquipmentType::Battery, Some(1));

        assert_eq!(
            result,
            Err(CommandError::EquipmentLimitReached {
                room: room_id,
                limit: 1
            })
        );
        assert_eq!(building.equipment_count(), 1);
    }

    #[test]
    fn test_install_equipment_unknown_room() {
        let (mut building, floor_id) = one_floor();
        let missing = RoomId::new();
        assert_eq!(
            building.install_equipment(floor_id, missing, EquipmentType::SolarPanel, None),
            Err(CommandError::RoomNotFound {
                floor: floor_id,
                room: missing
            })
        );
    }

    #[test]
    fn test_satisfaction_is_clamped() {
        let mut tenant = Tenant::for_room_type(RoomType::Residential).unwrap();
        tenant.adjust_satisfaction(-500.0);
        assert_eq!(tenant.satisfaction, 0.0);
        tenant.adjust_satisfaction(500.0);
        assert_eq!(tenant.satisfaction, 100.0);
    }

    #[test]
    fn test_solar_production_scales_only_for_panels() {
        let solar = Equipment::from_spec(EquipmentType::SolarPanel.spec());
        let generator = Equipment::from_spec(EquipmentType::Generator.spec());

        assert_eq!(solar.production_kw(0.5), 2.5);
        assert_eq!(solar.production_kw(0.0), 0.0);
        assert_eq!(generator.production_kw(0.0), 10.0);
    }

    #[test]
    fn test_aggregate_queries() {
        let (mut building, floor_id) = one_floor();
        assert_eq!(building.average_satisfaction(), None);

        building.build_room(floor_id, RoomType::Residential).unwrap();
        building.build_room(floor_id, RoomType::Office).unwrap();

        assert_eq!(building.occupied_room_count(), 2);
        assert_eq!(building.empty_room_count(), 2);
        assert_eq!(building.average_satisfaction(), Some(75.0));
    }
}
