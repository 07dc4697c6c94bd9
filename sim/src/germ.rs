use crate::config::{
    BOUNDARY_MARGIN, FOOD_NUTRITION, HEALTH_DECAY, INITIAL_HEALTH, INITIAL_VELOCITY, MAX_FORCE,
    MAX_SPEED, MUTATION_RATE, POISON_NUTRITION, REPRODUCTION_CHANCE, REPRODUCTION_HEALTH,
};
use rand::Rng;
use shared::{Canvas, Genome, GermSnapshot, Steering, Vector2};
use uuid::Uuid;

/// A single germ: a point mass steered by its genome toward (or away from) food and poison.
#[derive(Debug, Clone)]
pub struct Germ {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,

    /// 0 for spawned germs, parent + 1 for offspring
    pub generation: u32,

    pub position: Vector2,
    pub velocity: Vector2,

    /// Forces accumulated during the current tick, cleared by [`Germ::update`]
    pub acceleration: Vector2,

    pub health: f64,

    /// Ticks lived
    pub age: u64,

    pub genome: Genome,
}

impl Germ {
    /// Spawn a germ with freshly randomised DNA
    pub fn new_random<R: Rng>(position: Vector2, rng: &mut R) -> Self {
        let id = random_id(rng);
        let genome = Genome::random(rng);
        Self::born(id, None, 0, position, genome)
    }

    /// Spawn a child carrying a mutated copy of `parent`'s DNA
    pub fn new_offspring<R: Rng>(position: Vector2, parent: &Germ, rng: &mut R) -> Self {
        let id = random_id(rng);
        let genome = parent.genome.offspring(rng, MUTATION_RATE);
        Self::born(
            id,
            Some(parent.id),
            parent.generation + 1,
            position,
            genome,
        )
    }

    fn born(
        id: Uuid,
        parent_id: Option<Uuid>,
        generation: u32,
        position: Vector2,
        genome: Genome,
    ) -> Self {
        Self {
            id,
            parent_id,
            generation,
            position,
            velocity: INITIAL_VELOCITY,
            acceleration: Vector2::ZERO,
            health: INITIAL_HEALTH,
            age: 0,
            genome,
        }
    }

    /// Accumulate a force for this tick
    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force;
    }

    /// Steering force toward `target`: desired velocity minus current velocity,
    /// capped at [`MAX_FORCE`].
    pub fn seek(&self, target: Vector2) -> Vector2 {
        let desired = (target - self.position).with_magnitude(MAX_SPEED);
        (desired - self.velocity).limited(MAX_FORCE)
    }

    /// Eat every item within reach, then steer toward the closest remaining item this
    /// germ can perceive.
    ///
    /// Each eaten item is removed from `items` and adds `nutrition` to health. Among
    /// the survivors the closest one strictly inside `perception` wins; on equal
    /// distances the earliest in `items` is kept. Returns the zero vector when nothing
    /// is in sight.
    pub fn evaluate_attraction(
        &mut self,
        items: &mut Vec<Vector2>,
        nutrition: f64,
        perception: f64,
    ) -> Vector2 {
        let position = self.position;
        let health = &mut self.health;
        let mut record = f64::INFINITY;
        let mut closest = None;

        items.retain(|&item| {
            let distance = position.distance(item);
            if distance <= MAX_SPEED {
                *health += nutrition;
                return false;
            }
            if distance < record && distance < perception {
                record = distance;
                closest = Some(item);
            }
            true
        });

        match closest {
            Some(target) => self.seek(target),
            None => Vector2::ZERO,
        }
    }

    /// Per-tick decision making: keep off the edges, then weigh food against poison
    /// according to the genome.
    pub fn apply_behaviors(
        &mut self,
        food: &mut Vec<Vector2>,
        poison: &mut Vec<Vector2>,
        canvas: &Canvas,
    ) {
        self.stay_in_boundaries(canvas);

        let food_steer =
            self.evaluate_attraction(food, FOOD_NUTRITION, self.genome.food_perception);
        let poison_steer =
            self.evaluate_attraction(poison, POISON_NUTRITION, self.genome.poison_perception);

        self.apply_force(food_steer * self.genome.food_attraction);
        self.apply_force(poison_steer * self.genome.poison_attraction);
    }

    /// Turn back toward the interior when closer than [`BOUNDARY_MARGIN`] to an edge.
    ///
    /// Each axis is checked on its own, so in a corner both components of the desired
    /// velocity point inward.
    pub fn stay_in_boundaries(&mut self, canvas: &Canvas) {
        let mut desired = self.velocity;
        let mut near_edge = false;

        if self.position.x < BOUNDARY_MARGIN {
            desired.x = MAX_SPEED;
            near_edge = true;
        } else if self.position.x > canvas.width() - BOUNDARY_MARGIN {
            desired.x = -MAX_SPEED;
            near_edge = true;
        }

        if self.position.y < BOUNDARY_MARGIN {
            desired.y = MAX_SPEED;
            near_edge = true;
        } else if self.position.y > canvas.height() - BOUNDARY_MARGIN {
            desired.y = -MAX_SPEED;
            near_edge = true;
        }

        if near_edge {
            let steer = (desired.with_magnitude(MAX_SPEED) - self.velocity).limited(MAX_FORCE);
            self.apply_force(steer);
        }
    }

    /// Integrate one tick of motion and metabolism
    pub fn update(&mut self) {
        self.health -= HEALTH_DECAY;

        self.velocity = (self.velocity + self.acceleration).limited(MAX_SPEED);
        self.position += self.velocity;
        self.acceleration = Vector2::ZERO;

        self.age = self.age.saturating_add(1);
    }

    /// Possibly clone this germ in place.
    ///
    /// Always draws one roll from `rng`; a child is produced only when the roll passes
    /// and the germ is healthy enough.
    pub fn reproduce<R: Rng>(&self, rng: &mut R) -> Option<Germ> {
        if rng.gen::<f64>() < REPRODUCTION_CHANCE && self.health > REPRODUCTION_HEALTH {
            Some(Germ::new_offspring(self.position, self, rng))
        } else {
            None
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn snapshot(&self) -> GermSnapshot {
        GermSnapshot {
            id: self.id,
            position: self.position,
            heading: self.velocity.heading(),
            health: self.health,
            genome: self.genome,
            generation: self.generation,
        }
    }
}

/// Ids come from the simulation's own source so seeded runs are reproducible
fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}
