use crate::config::{
    FOOD_SPAWN_CHANCE, INITIAL_FOOD, INITIAL_POISON, INITIAL_POPULATION, POISON_SPAWN_CHANCE,
};
use crate::render::{NoopSink, RenderSink};
use crate::Germ;
use rand::Rng;
use shared::{Canvas, GermSnapshot, Vector2, WorldStats};

/// The whole simulation: germs plus the food and poison they compete over.
///
/// Nothing here is shared or global; a host owns a `World`, calls [`World::tick`]
/// once per frame and forwards input through the public spawn and overlay methods.
#[derive(Debug, Clone)]
pub struct World {
    pub germs: Vec<Germ>,
    pub food: Vec<Vector2>,
    pub poison: Vec<Vector2>,
    canvas: Canvas,

    /// Germs created minus germs removed since the last extinction
    active_count: usize,

    epoch: u64,
    epoch_start: u64,
    tick: u64,
    show_dna: bool,
    births: u64,
    deaths: u64,
}

impl World {
    /// Create a world with the starting population and a scattering of food and poison
    pub fn new<R: Rng>(canvas: Canvas, rng: &mut R) -> Self {
        let mut world = Self::empty(canvas);
        world.spawn_initial_population(rng);

        for _ in 0..INITIAL_FOOD {
            world.food.push(canvas.random_point(rng));
        }
        for _ in 0..INITIAL_POISON {
            world.poison.push(canvas.random_point(rng));
        }

        world
    }

    /// Create a world with no germs, food or poison. The first tick repopulates it.
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            germs: Vec::new(),
            food: Vec::new(),
            poison: Vec::new(),
            canvas,
            active_count: 0,
            epoch: 0,
            epoch_start: 0,
            tick: 0,
            show_dna: false,
            births: 0,
            deaths: 0,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Swap in new canvas dimensions. Germs already outside are steered back in by
    /// their boundary behaviour.
    pub fn resize(&mut self, canvas: Canvas) {
        tracing::debug!(
            width = canvas.width(),
            height = canvas.height(),
            "canvas resized"
        );
        self.canvas = canvas;
    }

    /// Spawn [`INITIAL_POPULATION`] germs with random DNA at random positions
    pub fn spawn_initial_population<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..INITIAL_POPULATION {
            let position = self.canvas.random_point(rng);
            self.spawn_germ_at(position, rng);
        }
    }

    /// Add a germ with random DNA at `position`
    pub fn spawn_germ_at<R: Rng>(&mut self, position: Vector2, rng: &mut R) {
        self.germs.push(Germ::new_random(position, rng));
        self.active_count += 1;
    }

    pub fn show_dna(&self) -> bool {
        self.show_dna
    }

    pub fn set_dna_overlay(&mut self, show: bool) {
        if show != self.show_dna {
            tracing::info!(
                "DNA overlay {}",
                if show { "enabled" } else { "disabled" }
            );
        }
        self.show_dna = show;
    }

    pub fn toggle_dna_overlay(&mut self) {
        self.set_dna_overlay(!self.show_dna);
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Advance the simulation by one tick without drawing
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        self.tick_with(rng, &mut NoopSink);
    }

    /// Advance the simulation by one tick, drawing each germ as it moves
    pub fn tick_with<R: Rng, S: RenderSink + ?Sized>(&mut self, rng: &mut R, sink: &mut S) {
        // 1. Reseed after an extinction
        if self.germs.is_empty() {
            self.repopulate(rng);
        }

        // 2. Ambient food and poison
        if rng.gen::<f64>() < FOOD_SPAWN_CHANCE {
            self.food.push(self.canvas.random_point(rng));
        }
        if rng.gen::<f64>() < POISON_SPAWN_CHANCE {
            self.poison.push(self.canvas.random_point(rng));
        }

        // 3. Behave, move, breed and die. Walking backwards lets a dead germ be removed
        //    without skipping its neighbour; children join after the walk so they wait
        //    a tick before acting.
        let mut newborns = Vec::new();
        for i in (0..self.germs.len()).rev() {
            let germ = &mut self.germs[i];
            germ.apply_behaviors(&mut self.food, &mut self.poison, &self.canvas);
            germ.update();
            sink.draw_germ(&germ.snapshot(), self.show_dna);

            if let Some(child) = germ.reproduce(rng) {
                tracing::trace!(parent = %germ.id, child = %child.id, "germ reproduced");
                newborns.push(child);
                self.active_count += 1;
                self.births += 1;
            }

            if germ.is_dead() {
                let position = germ.position;
                tracing::trace!(id = %germ.id, age = germ.age, "germ died");
                self.germs.remove(i);
                self.active_count = self.active_count.saturating_sub(1);
                self.deaths += 1;
                self.food.push(position);
            }
        }
        self.germs.extend(newborns);

        for &item in &self.food {
            sink.draw_food(item);
        }
        for &item in &self.poison {
            sink.draw_poison(item);
        }

        self.tick += 1;
    }

    fn repopulate<R: Rng>(&mut self, rng: &mut R) {
        tracing::info!(
            epoch = self.epoch,
            lasted_ticks = self.tick - self.epoch_start,
            "population extinct, spawning a new one"
        );

        self.active_count = 0;
        self.spawn_initial_population(rng);
        self.epoch += 1;
        self.epoch_start = self.tick;
    }

    /// Read-only views of every live germ
    pub fn snapshots(&self) -> impl Iterator<Item = GermSnapshot> + '_ {
        self.germs.iter().map(Germ::snapshot)
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            epoch: self.epoch,
            elapsed_ticks: self.tick - self.epoch_start,
            total_ticks: self.tick,
            active_count: self.active_count,
            live_germs: self.germs.len(),
            food: self.food.len(),
            poison: self.poison.len(),
            births: self.births,
            deaths: self.deaths,
            max_generation: self.germs.iter().map(|g| g.generation).max().unwrap_or(0),
        }
    }
}
