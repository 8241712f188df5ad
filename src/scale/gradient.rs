//! Continuous colour gradients.

use crate::color::Rgb;
use crate::error::Result;
use crate::grammar::DataFrame;

use super::{normalize, numeric_at, AesScale, AggregateCache, ColorScale, Scale, ScaleCategory, ScaleValue};

/// Shared evaluation: normalize the row's value, then look it up in `stops`.
fn evaluate(
    column: &str,
    stops: &ColorScale,
    extent: &AggregateCache<(f32, f32)>,
    data: &DataFrame,
    row: usize,
) -> Result<ScaleValue> {
    let extent = extent.get_or_compute(data, |d| d.min_max(column))?;
    let value = numeric_at(data, column, row)?;
    Ok(ScaleValue::Colour(stops.scale(normalize(value, extent))))
}

/// Two-colour linear gradient over a numeric column.
///
/// Every channel of the result lies between the matching channels of
/// `colour1` and `colour2`, whichever way round they are.
#[derive(Debug, Clone)]
pub struct ScaleGradient {
    column: String,
    stops: ColorScale,
    extent: AggregateCache<(f32, f32)>,
}

impl ScaleGradient {
    /// Gradient from `colour1` at the column minimum to `colour2` at its maximum.
    #[must_use]
    pub fn new(column: &str, colour1: impl Into<Rgb>, colour2: impl Into<Rgb>) -> Self {
        Self {
            column: column.to_string(),
            stops: ColorScale::unit(vec![colour1.into(), colour2.into()]),
            extent: AggregateCache::new(),
        }
    }

    /// Colour at the column minimum.
    #[must_use]
    pub fn colour1(&self) -> Rgb {
        self.stops.stops()[0]
    }

    /// Colour at the column maximum.
    #[must_use]
    pub fn colour2(&self) -> Rgb {
        self.stops.stops()[1]
    }
}

impl AesScale for ScaleGradient {
    fn category(&self) -> ScaleCategory {
        ScaleCategory::Colour
    }

    fn name(&self) -> &'static str {
        "gradient"
    }

    fn column(&self) -> Option<&str> {
        Some(&self.column)
    }

    fn apply(&self, data: &DataFrame, row: usize) -> Result<ScaleValue> {
        evaluate(&self.column, &self.stops, &self.extent, data, row)
    }
}

/// Three-colour diverging gradient over a numeric column.
///
/// The lower half of the normalized range interpolates `colour1 → colour2`,
/// the upper half `colour2 → colour3`; both halves meet at `colour2`.
#[derive(Debug, Clone)]
pub struct ScaleGradient2 {
    column: String,
    stops: ColorScale,
    extent: AggregateCache<(f32, f32)>,
}

impl ScaleGradient2 {
    /// Diverging gradient with `colour2` at the midpoint.
    #[must_use]
    pub fn new(
        column: &str,
        colour1: impl Into<Rgb>,
        colour2: impl Into<Rgb>,
        colour3: impl Into<Rgb>,
    ) -> Self {
        Self {
            column: column.to_string(),
            stops: ColorScale::unit(vec![colour1.into(), colour2.into(), colour3.into()]),
            extent: AggregateCache::new(),
        }
    }

    /// Colour at the column minimum.
    #[must_use]
    pub fn colour1(&self) -> Rgb {
        self.stops.stops()[0]
    }

    /// Colour at the midpoint.
    #[must_use]
    pub fn colour2(&self) -> Rgb {
        self.stops.stops()[1]
    }

    /// Colour at the column maximum.
    #[must_use]
    pub fn colour3(&self) -> Rgb {
        self.stops.stops()[2]
    }
}

impl AesScale for ScaleGradient2 {
    fn category(&self) -> ScaleCategory {
        ScaleCategory::Colour
    }

    fn name(&self) -> &'static str {
        "gradient2"
    }

    fn column(&self) -> Option<&str> {
        Some(&self.column)
    }

    fn apply(&self, data: &DataFrame, row: usize) -> Result<ScaleValue> {
        evaluate(&self.column, &self.stops, &self.extent, data, row)
    }
}
