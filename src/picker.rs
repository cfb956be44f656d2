use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws per category are biased against returning the same item twice in a
/// row. Repetition avoidance is soft: after the retry budget is spent the
/// final draw is returned regardless.
const RETRY_BUDGET: usize = 10;

#[derive(Debug)]
pub struct ContentPicker {
    rng: StdRng,
    last_picked: HashMap<String, String>,
}

impl ContentPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            last_picked: HashMap::new(),
        }
    }

    /// Deterministic picker for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_picked: HashMap::new(),
        }
    }

    /// Pick a pseudo-random item from `pool`. With a category, the draw
    /// avoids the category's previous pick; without one it is a pure
    /// uniform draw with no record kept.
    pub fn pick(&mut self, pool: &[String], category: Option<&str>) -> String {
        if pool.is_empty() {
            return String::new();
        }
        if pool.len() == 1 {
            return pool[0].clone();
        }

        let last = category.and_then(|c| self.last_picked.get(c).cloned());
        let mut choice = pool[0].clone();
        for _ in 0..RETRY_BUDGET {
            choice = pool[self.rng.gen_range(0..pool.len())].clone();
            if last.as_deref() != Some(choice.as_str()) {
                break;
            }
        }

        if let Some(category) = category {
            self.last_picked
                .insert(category.to_string(), choice.clone());
        }
        choice
    }
}

impl Default for ContentPicker {
    fn default() -> Self {
        Self::new()
    }
}
