//! Injectable randomness for reply selection

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks an index into a candidate pool
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local RNG, the production default
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Seeded RNG; the same seed replays the same sequence of picks
///
/// The seed is per process, not per request. Concurrent requests draw from
/// one shared sequence, so the reply a given request sees depends on how
/// requests interleave.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always returns the same index (wrapped to the pool size)
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub usize);

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0 % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_stay_in_range() {
        let sources: Vec<Box<dyn RandomSource>> = vec![
            Box::new(ThreadRandom),
            Box::new(SeededRandom::new(7)),
            Box::new(FixedRandom(13)),
        ];
        for source in &sources {
            for len in 1..8 {
                assert!(source.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SeededRandom::new(99);
        let b = SeededRandom::new(99);
        let seq_a: Vec<usize> = (0..20).map(|_| a.pick(5)).collect();
        let seq_b: Vec<usize> = (0..20).map(|_| b.pick(5)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_fixed_wraps() {
        assert_eq!(FixedRandom(4).pick(3), 1);
        assert_eq!(FixedRandom(0).pick(0), 0);
    }
}
