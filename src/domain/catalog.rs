//! Static definitions for everything that can be installed or rented in the tower.
//!
//! Equipment and tenants copy their attributes from these tables at creation time and
//! never read them again, so changing a table only affects things created afterwards.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::CommandError;

/// Use of a room slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    Residential,
    Office,
    Server,
    Empty,
}

impl RoomType {
    /// Types a player can build into an empty slot
    pub fn constructible() -> impl Iterator<Item = RoomType> {
        RoomType::iter().filter(|t| *t != RoomType::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RoomType::Empty)
    }

    /// Whether the tenant's satisfaction reacts to ambient temperature.
    /// Data centers don't care.
    pub fn is_temperature_sensitive(&self) -> bool {
        matches!(self, RoomType::Residential | RoomType::Office)
    }

    /// Default tenant for this room type
    pub fn archetype(&self) -> Result<&'static TenantArchetype, CommandError> {
        match self {
            RoomType::Residential => Ok(&RESIDENT),
            RoomType::Office => Ok(&COMPANY),
            RoomType::Server => Ok(&DATA_CENTER),
            RoomType::Empty => Err(CommandError::InvalidRoomType(*self)),
        }
    }

    /// Build-menu entry for this room type. Construction itself is free; the listed
    /// price is informational.
    pub fn listing(&self) -> Result<RoomListing, CommandError> {
        let advertised_price = match self {
            RoomType::Residential => 5000.0,
            RoomType::Office => 10000.0,
            RoomType::Server => 20000.0,
            RoomType::Empty => return Err(CommandError::InvalidRoomType(*self)),
        };
        let archetype = self.archetype()?;
        Ok(RoomListing {
            room_type: *self,
            name: archetype.name,
            income_per_tick: archetype.rent,
            advertised_price,
        })
    }
}

/// Kind of installable equipment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentType {
    SolarPanel,
    AirConditioner,
    Battery,
    Generator,
}

impl EquipmentType {
    /// Catalog entry for this equipment type
    pub fn spec(&self) -> &'static EquipmentSpec {
        match self {
            EquipmentType::SolarPanel => &SOLAR_PANEL,
            EquipmentType::AirConditioner => &AIR_CONDITIONER,
            EquipmentType::Battery => &BATTERY,
            EquipmentType::Generator => &GENERATOR,
        }
    }

    /// Only solar output follows the time of day; everything else runs at nominal rate.
    pub fn is_time_varying(&self) -> bool {
        matches!(self, EquipmentType::SolarPanel)
    }
}

/// Catalog attributes of an equipment type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquipmentSpec {
    pub equipment_type: EquipmentType,
    pub name: &'static str,
    /// Nominal production (kW)
    pub energy_production_kw: f64,
    /// Nominal consumption (kW)
    pub energy_consumption_kw: f64,
    /// One-off install cost
    pub cost: f64,
    /// Upkeep charged every tick
    pub maintenance_cost: f64,
}

/// Default tenant attributes for an occupied room type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TenantArchetype {
    pub room_type: RoomType,
    pub name: &'static str,
    /// Starting satisfaction (0-100)
    pub satisfaction: f64,
    /// Rent paid every tick
    pub rent: f64,
    /// Constant draw (kW)
    pub energy_usage_kw: f64,
}

/// What the build menu shows for a room type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomListing {
    pub room_type: RoomType,
    pub name: &'static str,
    pub income_per_tick: f64,
    pub advertised_price: f64,
}

pub const SOLAR_PANEL: EquipmentSpec = EquipmentSpec {
    equipment_type: EquipmentType::SolarPanel,
    name: "Solar Panel",
    energy_production_kw: 5.0,
    energy_consumption_kw: 0.0,
    cost: 5000.0,
    maintenance_cost: 1.0,
};

pub const AIR_CONDITIONER: EquipmentSpec = EquipmentSpec {
    equipment_type: EquipmentType::AirConditioner,
    name: "Air Conditioner",
    energy_production_kw: 0.0,
    energy_consumption_kw: 3.0,
    cost: 2000.0,
    maintenance_cost: 0.5,
};

pub const BATTERY: EquipmentSpec = EquipmentSpec {
    equipment_type: EquipmentType::Battery,
    name: "Battery",
    energy_production_kw: 0.0,
    energy_consumption_kw: 0.0,
    cost: 3000.0,
    maintenance_cost: 0.3,
};

pub const GENERATOR: EquipmentSpec = EquipmentSpec {
    equipment_type: EquipmentType::Generator,
    name: "Generator",
    energy_production_kw: 10.0,
    energy_consumption_kw: 0.0,
    cost: 8000.0,
    maintenance_cost: 5.0,
};

pub const RESIDENT: TenantArchetype = TenantArchetype {
    room_type: RoomType::Residential,
    name: "Resident",
    satisfaction: 80.0,
    rent: 10.0,
    energy_usage_kw: 2.0,
};

pub const COMPANY: TenantArchetype = TenantArchetype {
    room_type: RoomType::Office,
    name: "Company",
    satisfaction: 70.0,
    rent: 20.0,
    energy_usage_kw: 5.0,
};

pub const DATA_CENTER: TenantArchetype = TenantArchetype {
    room_type: RoomType::Server,
    name: "Data Center",
    satisfaction: 90.0,
    rent: 50.0,
    energy_usage_kw: 20.0,
};
