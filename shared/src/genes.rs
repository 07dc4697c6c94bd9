use rand::Rng;
use serde::{Deserialize, Serialize};

/// Attraction genes are drawn from `-ATTRACTION_LIMIT..ATTRACTION_LIMIT`.
pub const ATTRACTION_LIMIT: f64 = 2.0;

/// Perception genes are drawn from `0..PERCEPTION_WRAP` and reduced modulo it after mutation.
pub const PERCEPTION_WRAP: f64 = 107.0;

/// Largest perturbation a mutation adds to an attraction gene.
pub const ATTRACTION_STEP: f64 = 0.1;

/// Largest perturbation a mutation adds to a perception gene.
pub const PERCEPTION_STEP: f64 = 10.0;

/// The DNA of a germ: how strongly it steers toward food and poison, and how far it can
/// see each of them.
///
/// Attraction genes scale the steering force, so a negative value turns seeking into
/// fleeing. Perception genes are radii in canvas units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Genome {
    /// gene 0: steering multiplier toward the nearest visible food
    pub food_attraction: f64,

    /// gene 1: steering multiplier toward the nearest visible poison
    pub poison_attraction: f64,

    /// gene 2: radius within which food is noticed
    pub food_perception: f64,

    /// gene 3: radius within which poison is noticed
    pub poison_perception: f64,
}

impl Genome {
    /// Create a new random genome
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            food_attraction: rng.gen_range(-ATTRACTION_LIMIT..ATTRACTION_LIMIT),
            poison_attraction: rng.gen_range(-ATTRACTION_LIMIT..ATTRACTION_LIMIT),
            food_perception: rng.gen_range(0.0..PERCEPTION_WRAP),
            poison_perception: rng.gen_range(0.0..PERCEPTION_WRAP),
        }
    }

    /// Create a genome with specific values. No clamping is applied.
    pub fn new(
        food_attraction: f64,
        poison_attraction: f64,
        food_perception: f64,
        poison_perception: f64,
    ) -> Self {
        Self {
            food_attraction,
            poison_attraction,
            food_perception,
            poison_perception,
        }
    }

    /// The genes in index order.
    pub fn genes(&self) -> [f64; 4] {
        [
            self.food_attraction,
            self.poison_attraction,
            self.food_perception,
            self.poison_perception,
        ]
    }

    /// Perturb each gene independently with probability `mutation_rate`.
    ///
    /// Genes are visited in index order and each one draws its roll before its
    /// perturbation, so a seeded source always produces the same child.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R, mutation_rate: f64) {
        if rng.gen::<f64>() < mutation_rate {
            self.food_attraction += rng.gen_range(-ATTRACTION_STEP..ATTRACTION_STEP);
        }
        if rng.gen::<f64>() < mutation_rate {
            self.poison_attraction += rng.gen_range(-ATTRACTION_STEP..ATTRACTION_STEP);
        }
        if rng.gen::<f64>() < mutation_rate {
            self.food_perception = wrap_perception(
                self.food_perception + rng.gen_range(-PERCEPTION_STEP..PERCEPTION_STEP),
            );
        }
        if rng.gen::<f64>() < mutation_rate {
            self.poison_perception = wrap_perception(
                self.poison_perception + rng.gen_range(-PERCEPTION_STEP..PERCEPTION_STEP),
            );
        }
    }

    /// Copy this genome and mutate the copy
    pub fn offspring<R: Rng>(&self, rng: &mut R, mutation_rate: f64) -> Genome {
        let mut child = *self;
        child.mutate(rng, mutation_rate);
        child
    }
}

/// Reduce a perception radius modulo [`PERCEPTION_WRAP`].
///
/// The remainder keeps the sign of `value`: `-3.0` stays `-3.0` rather than becoming
/// `104.0`. A negative radius never matches any distance, so the germ is blind to that
/// item kind until a later mutation brings the gene back up.
pub fn wrap_perception(value: f64) -> f64 {
    value % PERCEPTION_WRAP
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_genome_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let genome = Genome::random(&mut rng);
            assert!((-2.0..2.0).contains(&genome.food_attraction));
            assert!((-2.0..2.0).contains(&genome.poison_attraction));
            assert!((0.0..107.0).contains(&genome.food_perception));
            assert!((0.0..107.0).contains(&genome.poison_perception));
        }
    }

    #[test]
    fn test_genes_order() {
        let genome = Genome::new(0.5, -1.0, 40.0, 60.0);
        assert_eq!(genome.genes(), [0.5, -1.0, 40.0, 60.0]);
    }

    #[test]
    fn test_zero_rate_copies_verbatim() {
        let parent = Genome::new(1.25, -0.75, 80.0, 12.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(parent.offspring(&mut rng, 0.0), parent);
        }
    }

    #[test]
    fn test_forced_mutation_takes_lowest_perturbation() {
        // A source of all-zero bits passes every roll and yields the bottom of every range
        let mut rng = StepRng::new(0, 0);
        let parent = Genome::new(1.0, -1.0, 50.0, 5.0);
        let child = parent.offspring(&mut rng, 0.25);

        assert!((child.food_attraction - 0.9).abs() < 1e-12);
        assert!((child.poison_attraction + 1.1).abs() < 1e-12);
        assert!((child.food_perception - 40.0).abs() < 1e-12);
        // 5 - 10 wraps with the sign kept
        assert!((child.poison_perception + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_perception_keeps_sign() {
        assert_eq!(wrap_perception(-3.0), -3.0);
        assert_eq!(wrap_perception(110.0), 3.0);
        assert_eq!(wrap_perception(42.0), 42.0);
    }

    #[test]
    fn test_serialization() {
        let genome = Genome::new(0.1, 0.2, 30.0, 40.0);
        let json = serde_json::to_string(&genome).unwrap();
        let decoded: Genome = serde_json::from_str(&json).unwrap();
        assert_eq!(genome, decoded);
    }

    proptest! {
        #[test]
        fn test_mutation_keeps_perception_in_open_band(
            seed in any::<u64>(),
            food in 0.0f64..107.0,
            poison in 0.0f64..107.0,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut genome = Genome::new(0.0, 0.0, food, poison);

            for _ in 0..50 {
                genome.mutate(&mut rng, 1.0);
                prop_assert!(genome.food_perception > -107.0 && genome.food_perception < 107.0);
                prop_assert!(genome.poison_perception > -107.0 && genome.poison_perception < 107.0);

                let normalised = genome.food_perception.rem_euclid(PERCEPTION_WRAP);
                prop_assert!((0.0..107.0).contains(&normalised));
            }
        }
    }
}
