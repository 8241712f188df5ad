//! Marker size scale.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::grammar::DataFrame;

use super::{normalize, numeric_at, AesScale, AggregateCache, LinearScale, Scale, ScaleCategory, ScaleValue};

/// Default smallest marker size.
pub const DEFAULT_MIN_SIZE: f32 = 5.0;
/// Default largest marker size.
pub const DEFAULT_MAX_SIZE: f32 = 100.0;

type Transform = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Maps a numeric column onto a marker-size range.
///
/// The row's value is normalized against the column's extent and mapped
/// linearly onto `[low, high]`, then passed through the optional transform.
#[derive(Clone)]
pub struct ScaleSize {
    column: String,
    range: LinearScale,
    transform: Option<Transform>,
    extent: AggregateCache<(f32, f32)>,
}

impl ScaleSize {
    /// Size scale over `column` with the default `[5, 100]` range.
    #[must_use]
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            range: LinearScale::unit((DEFAULT_MIN_SIZE, DEFAULT_MAX_SIZE)),
            transform: None,
            extent: AggregateCache::new(),
        }
    }

    /// Set the output range.
    #[must_use]
    pub fn range(mut self, low: f32, high: f32) -> Self {
        self.range = LinearScale::unit((low, high));
        self
    }

    /// Apply `f` to every produced size.
    #[must_use]
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    /// Output range `(low, high)`.
    #[must_use]
    pub fn size_range(&self) -> (f32, f32) {
        self.range.range()
    }
}

impl fmt::Debug for ScaleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleSize")
            .field("column", &self.column)
            .field("range", &self.range.range())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl AesScale for ScaleSize {
    fn category(&self) -> ScaleCategory {
        ScaleCategory::Numeric
    }

    fn name(&self) -> &'static str {
        "size"
    }

    fn column(&self) -> Option<&str> {
        Some(&self.column)
    }

    fn apply(&self, data: &DataFrame, row: usize) -> Result<ScaleValue> {
        let extent = self.extent.get_or_compute(data, |d| d.min_max(&self.column))?;
        let value = numeric_at(data, &self.column, row)?;
        let size = self.range.scale(normalize(value, extent));
        let size = match &self.transform {
            Some(f) => f(size),
            None => size,
        };
        Ok(ScaleValue::Number(size))
    }
}
