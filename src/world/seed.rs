//! Declarative seed data for the floor
//!
//! The built-in layout mirrors the demo floor; alternative layouts can be
//! loaded from TOML. Unknown roles, zones, or stages in a seed file fail
//! deserialization - there is no fallback interpretation.

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::types::{Rect, Vec2};
use crate::world::order::{Priority, TaskKind, WorkOrder};
use crate::world::worker::{Role, Worker, WorkerStatus};
use crate::world::zone::{Zone, ZoneColor, ZoneId};

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerSeed {
    pub name: String,
    pub avatar: char,
    pub role: Role,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_efficiency")]
    pub efficiency: f32,
    #[serde(default)]
    pub offline: bool,
}

fn default_efficiency() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderSeed {
    pub kind: TaskKind,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    /// Ship deadline relative to the start of the session, in ticks
    pub deadline_ticks: u64,
}

fn default_priority() -> Priority {
    Priority::Normal
}

/// Everything needed to construct a [`World`](crate::world::World)
#[derive(Debug, Clone, Deserialize)]
pub struct WorldSeed {
    pub zones: Vec<Zone>,
    pub workers: Vec<WorkerSeed>,
    pub orders: Vec<OrderSeed>,
}

impl WorldSeed {
    /// Load a seed layout from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let seed: Self = toml::from_str(&text)?;
        Ok(seed)
    }

    /// The built-in demo floor: six production stations, two dock zones,
    /// a charging bay, a full crew, and a starter batch of orders.
    pub fn default_layout() -> Self {
        let zones = vec![
            Zone::new(
                ZoneId::ReceivingDock,
                Rect::new(2.0, 30.0, 12.0, 20.0),
                ZoneColor::Slate,
            ),
            Zone::new(
                ZoneId::Welding,
                Rect::new(20.0, 6.0, 16.0, 14.0),
                ZoneColor::Amber,
            ),
            Zone::new(
                ZoneId::Paint,
                Rect::new(44.0, 6.0, 16.0, 14.0),
                ZoneColor::Violet,
            ),
            Zone::new(
                ZoneId::Assembly,
                Rect::new(68.0, 6.0, 16.0, 14.0),
                ZoneColor::Cyan,
            ),
            Zone::new(
                ZoneId::Rework,
                Rect::new(20.0, 32.0, 16.0, 14.0),
                ZoneColor::Rose,
            ),
            Zone::new(
                ZoneId::Qa,
                Rect::new(44.0, 32.0, 16.0, 14.0),
                ZoneColor::Emerald,
            ),
            Zone::new(
                ZoneId::Staging,
                Rect::new(68.0, 32.0, 16.0, 14.0),
                ZoneColor::Slate,
            ),
            Zone::new(
                ZoneId::ShippingDock,
                Rect::new(86.0, 30.0, 12.0, 20.0),
                ZoneColor::Slate,
            ),
            Zone::new(
                ZoneId::ChargingBay,
                Rect::new(2.0, 62.0, 14.0, 12.0),
                ZoneColor::Emerald,
            ),
        ];

        let workers = vec![
            WorkerSeed {
                name: "Rosa Delgado".into(),
                avatar: 'R',
                role: Role::Picker,
                x: 10.0,
                y: 40.0,
                efficiency: 1.1,
                offline: false,
            },
            WorkerSeed {
                name: "Marcus Webb".into(),
                avatar: 'M',
                role: Role::Forklift,
                x: 90.0,
                y: 42.0,
                efficiency: 1.0,
                offline: false,
            },
            WorkerSeed {
                name: "Joel Tanaka".into(),
                avatar: 'J',
                role: Role::Welder,
                x: 28.0,
                y: 13.0,
                efficiency: 0.95,
                offline: false,
            },
            WorkerSeed {
                name: "Priya Sharma".into(),
                avatar: 'P',
                role: Role::Painter,
                x: 52.0,
                y: 13.0,
                efficiency: 1.05,
                offline: false,
            },
            WorkerSeed {
                name: "Omar Haddad".into(),
                avatar: 'O',
                role: Role::Assembler,
                x: 76.0,
                y: 13.0,
                efficiency: 0.9,
                offline: false,
            },
            WorkerSeed {
                name: "Ingrid Voss".into(),
                avatar: 'I',
                role: Role::QaSpecialist,
                x: 52.0,
                y: 39.0,
                efficiency: 1.0,
                offline: false,
            },
            WorkerSeed {
                name: "Dev Okafor".into(),
                avatar: 'D',
                role: Role::Forklift,
                x: 8.0,
                y: 34.0,
                efficiency: 1.0,
                offline: true,
            },
            WorkerSeed {
                name: "AMR-01".into(),
                avatar: '1',
                role: Role::Amr,
                x: 7.0,
                y: 68.0,
                efficiency: 1.15,
                offline: false,
            },
            WorkerSeed {
                name: "AMR-02".into(),
                avatar: '2',
                role: Role::Amr,
                x: 12.0,
                y: 68.0,
                efficiency: 1.15,
                offline: false,
            },
        ];

        let orders = vec![
            OrderSeed {
                kind: TaskKind::Manufacturing,
                x: 28.0,
                y: 13.0,
                priority: Priority::High,
                deadline_ticks: 2400,
            },
            OrderSeed {
                kind: TaskKind::Manufacturing,
                x: 28.0,
                y: 13.0,
                priority: Priority::Normal,
                deadline_ticks: 3200,
            },
            OrderSeed {
                kind: TaskKind::Receiving,
                x: 8.0,
                y: 40.0,
                priority: Priority::Normal,
                deadline_ticks: 900,
            },
            OrderSeed {
                kind: TaskKind::Picking,
                x: 36.0,
                y: 58.0,
                priority: Priority::Normal,
                deadline_ticks: 1200,
            },
            OrderSeed {
                kind: TaskKind::Shipping,
                x: 92.0,
                y: 40.0,
                priority: Priority::Low,
                deadline_ticks: 1600,
            },
        ];

        Self {
            zones,
            workers,
            orders,
        }
    }

    pub(crate) fn build_workers(&self) -> Vec<Worker> {
        self.workers
            .iter()
            .map(|seed| {
                let mut worker =
                    Worker::new(&seed.name, seed.avatar, seed.role, Vec2::new(seed.x, seed.y))
                        .with_efficiency(seed.efficiency);
                if seed.offline {
                    worker.status = WorkerStatus::Offline;
                }
                worker
            })
            .collect()
    }

    pub(crate) fn build_orders(&self) -> Vec<WorkOrder> {
        self.orders
            .iter()
            .map(|seed| {
                let target = Vec2::new(seed.x, seed.y);
                let order = match seed.kind {
                    TaskKind::Manufacturing => WorkOrder::manufacturing(target, 0, seed.deadline_ticks),
                    _ => WorkOrder::new(seed.kind, target, 0, seed.deadline_ticks),
                };
                order.with_priority(seed.priority)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FLOOR_BOUNDS;

    #[test]
    fn test_default_layout_zones_fit_the_floor() {
        for zone in WorldSeed::default_layout().zones {
            assert!(FLOOR_BOUNDS.contains(Vec2::new(zone.rect.x, zone.rect.y)));
            assert!(FLOOR_BOUNDS.contains(Vec2::new(
                zone.rect.x + zone.rect.width,
                zone.rect.y + zone.rect.height,
            )));
        }
    }

    #[test]
    fn test_seed_toml_rejects_unknown_role() {
        let toml = r#"
            zones = []
            orders = []

            [[workers]]
            name = "Ghost"
            avatar = "G"
            role = "drone_swarm"
            x = 10.0
            y = 10.0
        "#;
        assert!(toml::from_str::<WorldSeed>(toml).is_err());
    }

    #[test]
    fn test_seed_toml_parses_minimal_layout() {
        let toml = r#"
            orders = []
            workers = []

            [[zones]]
            id = "welding"
            color = "amber"
            rect = { x = 10.0, y = 10.0, width = 10.0, height = 8.0 }
        "#;
        let seed: WorldSeed = toml::from_str(toml).unwrap();
        assert_eq!(seed.zones[0].id, ZoneId::Welding);
    }
}
