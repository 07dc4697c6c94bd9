use crate::{Genome, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of a germ handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GermSnapshot {
    pub id: Uuid,
    pub position: Vector2,

    /// Direction of travel in radians, from the +x axis
    pub heading: f64,

    pub health: f64,
    pub genome: Genome,
    pub generation: u32,
}

/// Population statistics for the current epoch and the whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorldStats {
    /// Number of extinctions survived so far (starts at 0)
    pub epoch: u64,

    /// Ticks since the current epoch began
    pub elapsed_ticks: u64,

    /// Ticks since the world was created
    pub total_ticks: u64,

    /// Germs counted as active in this epoch
    pub active_count: usize,

    pub live_germs: usize,
    pub food: usize,
    pub poison: usize,

    /// Offspring born over the whole run
    pub births: u64,

    /// Germs starved or poisoned over the whole run
    pub deaths: u64,

    /// Deepest lineage among living germs
    pub max_generation: u32,
}
