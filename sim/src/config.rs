//! Fixed rules of the simulation.

use shared::Vector2;

// ============================================================================
// MOVEMENT
// ============================================================================

/// A germ never moves more than this many units per tick. Items within this
/// distance are eaten.
pub const MAX_SPEED: f64 = 5.0;

/// Largest steering force a single behaviour may apply per tick
pub const MAX_FORCE: f64 = 0.5;

/// Body radius, used only for drawing
pub const GERM_RADIUS: f64 = 4.0;

/// Velocity a germ is born with (straight up the canvas)
pub const INITIAL_VELOCITY: Vector2 = Vector2::new(0.0, -2.0);

/// Distance from a canvas edge at which germs start turning back
pub const BOUNDARY_MARGIN: f64 = 27.0;

// ============================================================================
// HEALTH
// ============================================================================

pub const INITIAL_HEALTH: f64 = 1.0;

/// Health lost every tick
pub const HEALTH_DECAY: f64 = 0.008;

/// Health gained per food item eaten
pub const FOOD_NUTRITION: f64 = 0.3;

/// Health gained per poison item eaten (negative)
pub const POISON_NUTRITION: f64 = -0.2;

// ============================================================================
// REPRODUCTION
// ============================================================================

/// Chance per tick that a healthy germ clones itself
pub const REPRODUCTION_CHANCE: f64 = 0.01;

/// Health a germ must exceed to reproduce
pub const REPRODUCTION_HEALTH: f64 = 0.65;

/// Per-gene chance of a perturbation when copying DNA
pub const MUTATION_RATE: f64 = 0.25;

// ============================================================================
// WORLD
// ============================================================================

/// Germs spawned at start and after every extinction
pub const INITIAL_POPULATION: usize = 10;

/// Food items scattered when a world is created
pub const INITIAL_FOOD: usize = 100;

/// Poison items scattered when a world is created
pub const INITIAL_POISON: usize = 50;

/// Chance per tick of one new food item
pub const FOOD_SPAWN_CHANCE: f64 = 0.2;

/// Chance per tick of one new poison item
pub const POISON_SPAWN_CHANCE: f64 = 0.05;
