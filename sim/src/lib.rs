pub mod config;
pub mod germ;
pub mod render;
pub mod world;

pub use germ::Germ;
pub use render::{health_color, NoopSink, RenderSink, Rgb};
pub use world::World;

use rand::Rng;
use shared::{Canvas, WorldStats};

/// How often a headless run reports progress
const PROGRESS_INTERVAL: u64 = 500;

/// Run a complete headless simulation and return the final statistics
pub fn run_simulation<R: Rng>(canvas: Canvas, ticks: u64, rng: &mut R) -> WorldStats {
    let mut world = World::new(canvas, rng);

    for tick in 0..ticks {
        world.tick(rng);

        if (tick + 1) % PROGRESS_INTERVAL == 0 {
            let stats = world.stats();
            tracing::info!(
                tick = tick + 1,
                epoch = stats.epoch,
                germs = stats.live_germs,
                food = stats.food,
                poison = stats.poison,
                max_generation = stats.max_generation,
                "simulation progress"
            );
        }
    }

    world.stats()
}
