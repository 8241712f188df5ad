//! Categorical random colours.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Rgb;
use crate::error::Result;
use crate::grammar::DataFrame;

use super::{AesScale, ScaleCategory, ScaleValue};

/// Gives each distinct value of a column a pseudo-random colour.
///
/// The generator is seeded from the scale's seed and the row's value, so
/// equal values always get equal colours and runs are reproducible.
#[derive(Debug, Clone)]
pub struct ScaleRandomColour {
    column: String,
    seed: u64,
}

impl ScaleRandomColour {
    /// Random colour scale over `column` with seed 0.
    #[must_use]
    pub fn new(column: &str) -> Self {
        Self { column: column.to_string(), seed: 0 }
    }

    /// Set the seed mixed into every colour.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl AesScale for ScaleRandomColour {
    fn category(&self) -> ScaleCategory {
        ScaleCategory::Colour
    }

    fn name(&self) -> &'static str {
        "random_colour"
    }

    fn column(&self) -> Option<&str> {
        Some(&self.column)
    }

    fn is_categorical(&self) -> bool {
        true
    }

    fn apply(&self, data: &DataFrame, row: usize) -> Result<ScaleValue> {
        let value = data.value(&self.column, row)?;
        let mut rng = StdRng::seed_from_u64(self.seed ^ value.stable_hash());
        let colour = Rgb::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        Ok(ScaleValue::Colour(colour))
    }
}
