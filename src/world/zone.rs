//! Floor zones - the static station layout
//!
//! Zones are rectangular stations in the normalized floor space. They are
//! created once from seed data and never change afterwards.

use serde::{Deserialize, Serialize};

use crate::core::types::{Rect, Vec2};

/// The closed set of stations on the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Welding,
    Paint,
    Assembly,
    Qa,
    Rework,
    Staging,
    ReceivingDock,
    ShippingDock,
    ChargingBay,
}

impl ZoneId {
    /// Display label used on the map and in log messages
    pub fn label(&self) -> &'static str {
        match self {
            ZoneId::Welding => "Welding",
            ZoneId::Paint => "Paint",
            ZoneId::Assembly => "Assembly",
            ZoneId::Qa => "QA",
            ZoneId::Rework => "Rework",
            ZoneId::Staging => "Staging",
            ZoneId::ReceivingDock => "Receiving Dock",
            ZoneId::ShippingDock => "Shipping Dock",
            ZoneId::ChargingBay => "Charging Bay",
        }
    }
}

/// Display color tag for zone rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneColor {
    Slate,
    Amber,
    Cyan,
    Violet,
    Rose,
    Emerald,
}

/// A named rectangular station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub rect: Rect,
    pub color: ZoneColor,
}

impl Zone {
    pub fn new(id: ZoneId, rect: Rect, color: ZoneColor) -> Self {
        Self { id, rect, color }
    }

    /// Arrival-in-zone test (axis-aligned bounding-box containment)
    pub fn contains(&self, pos: Vec2) -> bool {
        self.rect.contains(pos)
    }

    /// The coordinate workers walk to when targeting this zone
    pub fn entry_point(&self) -> Vec2 {
        self.rect.center()
    }
}
