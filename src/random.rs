//! Seedable random source shared by topology generation and parameter initialization.
//!
//! A single [`RandomNumbers`] instance owns one engine whose state evolves across calls,
//! so the same seed and the same sequence of calls reproduce the same network.
//! It is meant to be owned by one thread and passed by `&mut` to whatever needs it.
use derivative::Derivative;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Poisson, Uniform};

/// Seed value meaning "draw a seed from system entropy".
pub const UNSEEDED: u64 = 0;

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct RandomNumbers {
    seed: u64,
    #[derivative(Debug = "ignore")]
    rng: ChaCha8Rng,
}

impl RandomNumbers {
    /// Create a random source from the given seed.
    /// With [`UNSEEDED`], a non-zero seed is drawn from system entropy and recorded.
    pub fn new(seed: u64) -> Self {
        let seed = if seed == UNSEEDED {
            let drawn = rand::thread_rng().gen_range(1..=u64::MAX);
            log::info!("No seed provided, drew seed {} from entropy", drawn);
            drawn
        } else {
            seed
        };

        RandomNumbers {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed the engine was started from, for reproducing a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A sample from the uniform distribution on `[lower, upper)`.
    pub fn uniform_double(&mut self, lower: f64, upper: f64) -> f64 {
        match uniform_dist(lower, upper) {
            Some(dist) => dist.sample(&mut self.rng),
            None => lower,
        }
    }

    /// Fill `values` with independent samples from the uniform distribution on `[lower, upper)`.
    pub fn uniform_doubles(&mut self, values: &mut [f64], lower: f64, upper: f64) {
        match uniform_dist(lower, upper) {
            Some(dist) => values
                .iter_mut()
                .for_each(|v| *v = dist.sample(&mut self.rng)),
            None => values.fill(lower),
        }
    }

    /// A sample from the normal distribution with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        match normal_dist(mean, sd) {
            Some(dist) => dist.sample(&mut self.rng),
            None => mean,
        }
    }

    /// Fill `values` with independent samples from the normal distribution.
    pub fn normals(&mut self, values: &mut [f64], mean: f64, sd: f64) {
        match normal_dist(mean, sd) {
            Some(dist) => values
                .iter_mut()
                .for_each(|v| *v = dist.sample(&mut self.rng)),
            None => values.fill(mean),
        }
    }

    /// A sample from the Poisson distribution with the given mean.
    pub fn poisson(&mut self, mean: f64) -> usize {
        match poisson_dist(mean) {
            Some(dist) => dist.sample(&mut self.rng) as usize,
            None => 0,
        }
    }

    /// Fill `values` with independent samples from the Poisson distribution.
    pub fn poissons(&mut self, values: &mut [usize], mean: f64) {
        match poisson_dist(mean) {
            Some(dist) => values
                .iter_mut()
                .for_each(|v| *v = dist.sample(&mut self.rng) as usize),
            None => values.fill(0),
        }
    }

    /// Shuffle `values` in place into a uniformly random permutation.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

fn uniform_dist(lower: f64, upper: f64) -> Option<Uniform<f64>> {
    if lower < upper && (upper - lower).is_finite() {
        Some(Uniform::new(lower, upper))
    } else {
        log::warn!("Degenerate uniform range [{}, {}), using lower bound", lower, upper);
        None
    }
}

fn normal_dist(mean: f64, sd: f64) -> Option<Normal<f64>> {
    Normal::new(mean, sd)
        .map_err(|e| log::warn!("Invalid normal distribution ({}), using the mean", e))
        .ok()
}

fn poisson_dist(mean: f64) -> Option<Poisson<f64>> {
    // sampling never returns for an infinite mean
    if !(mean.is_finite() && mean > 0.0) {
        log::warn!("Invalid Poisson mean {}, using zero", mean);
        return None;
    }
    Poisson::new(mean)
        .map_err(|e| log::warn!("Invalid Poisson distribution ({}), using zero", e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 42;

    #[test]
    fn test_seed() {
        assert_eq!(RandomNumbers::new(SEED).seed(), SEED);
        assert_ne!(RandomNumbers::new(UNSEEDED).seed(), UNSEEDED);
    }

    #[test]
    fn test_reproducible() {
        let mut rng_1 = RandomNumbers::new(SEED);
        let mut rng_2 = RandomNumbers::new(SEED);

        let mut values_1 = vec![0.0; 20];
        let mut values_2 = vec![0.0; 20];
        rng_1.uniform_doubles(&mut values_1, -1.0, 1.0);
        rng_2.uniform_doubles(&mut values_2, -1.0, 1.0);
        assert_eq!(values_1, values_2);

        assert_eq!(rng_1.poisson(4.0), rng_2.poisson(4.0));
        assert_eq!(rng_1.normal(0.0, 1.0), rng_2.normal(0.0, 1.0));
    }

    #[test]
    fn test_batch_draws_advance_the_engine() {
        let mut rng = RandomNumbers::new(SEED);
        let mut first = vec![0.0; 10];
        let mut second = vec![0.0; 10];
        rng.uniform_doubles(&mut first, 0.0, 1.0);
        rng.uniform_doubles(&mut second, 0.0, 1.0);
        assert_ne!(first, second);
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = RandomNumbers::new(SEED);
        let mut values = vec![0.0; 1000];
        rng.uniform_doubles(&mut values, 1e-6, 10.0);
        assert!(values.iter().all(|v| (1e-6..10.0).contains(v)));
        assert!((0..100)
            .map(|_| rng.uniform_double(-2.0, -1.0))
            .all(|v| (-2.0..-1.0).contains(&v)));
    }

    #[test]
    fn test_sample_means() {
        let mut rng = RandomNumbers::new(SEED);

        let mut normals = vec![0.0; 10_000];
        rng.normals(&mut normals, 3.0, 2.0);
        let mean = normals.iter().sum::<f64>() / normals.len() as f64;
        assert!((mean - 3.0).abs() < 0.1);

        let mut counts = vec![0; 10_000];
        rng.poissons(&mut counts, 5.0);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        assert!((mean - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_degenerate_parameters() {
        let mut rng = RandomNumbers::new(SEED);
        assert_eq!(rng.uniform_double(1.0, 1.0), 1.0);
        assert_eq!(rng.uniform_double(-f64::MAX, f64::MAX), -f64::MAX);
        assert_eq!(rng.uniform_double(0.0, f64::INFINITY), 0.0);
        assert_eq!(rng.normal(2.5, 0.0), 2.5);
        assert_eq!(rng.normal(2.5, -1.0), 2.5);
        assert_eq!(rng.poisson(0.0), 0);
        assert_eq!(rng.poisson(f64::INFINITY), 0);
        assert_eq!(rng.poisson(f64::NAN), 0);

        let mut counts = vec![7; 5];
        rng.poissons(&mut counts, -3.0);
        assert_eq!(counts, vec![0; 5]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = RandomNumbers::new(SEED);
        let mut values: Vec<usize> = (0..50).collect();
        rng.shuffle(&mut values);
        assert_ne!(values, (0..50).collect::<Vec<usize>>());
        values.sort();
        assert_eq!(values, (0..50).collect::<Vec<usize>>());
    }
}
