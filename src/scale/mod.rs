//! Scale functions for data-to-visual mappings.
//!
//! Two layers live here. [`LinearScale`] and [`ColorScale`] are plain
//! domain-to-range maps. On top of them, the aesthetic scales
//! ([`ScaleSize`], [`ScaleShape`], [`ScaleGradient`], [`ScaleGradient2`],
//! [`ScaleRandomColour`], [`ScaleConstant`]) turn a row of a
//! [`DataFrame`](crate::grammar::DataFrame) into a visual attribute.
//!
//! Every aesthetic scale carries a [`ScaleCategory`]; aesthetics validation
//! looks only at that tag, so new scales plug in without touching it.
//! Based on the Grammar of Graphics [Wilkinson 2005].

mod cache;
mod colour;
mod constant;
mod gradient;
mod shape;
mod size;

use std::fmt;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::grammar::DataFrame;

pub use cache::AggregateCache;
pub use colour::ScaleRandomColour;
pub use constant::ScaleConstant;
pub use gradient::{ScaleGradient, ScaleGradient2};
pub use shape::{PointShape, ScaleShape};
pub use size::ScaleSize;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear map from the unit interval onto an output range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Unit scale over `[0, 1]`, mapping to `range`.
    #[must_use]
    pub fn unit(range: (f32, f32)) -> Self {
        Self { range_min: range.0, range_max: range.1 }
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        self.range_min + value * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Piecewise-linear colour scale over evenly spaced stops on `[0, 1]`.
///
/// With two stops this is a plain gradient; with three the middle stop sits
/// exactly at the midpoint. No stops map everything to black.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgb>,
}

impl ColorScale {
    /// Colour scale over the unit interval.
    #[must_use]
    pub fn unit(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Colour stops, first to last.
    #[must_use]
    pub fn stops(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Scale<f32, Rgb> for ColorScale {
    fn scale(&self, value: f32) -> Rgb {
        let t = value.clamp(0.0, 1.0);

        match self.colors.as_slice() {
            [] => Rgb::BLACK,
            [only] => *only,
            colors => {
                let segment_count = colors.len() - 1;
                let segment = ((t * segment_count as f32).floor() as usize).min(segment_count - 1);
                let local_t = t * segment_count as f32 - segment as f32;
                colors[segment].lerp(colors[segment + 1], local_t)
            }
        }
    }

    fn domain(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn range(&self) -> (Rgb, Rgb) {
        (*self.colors.first().unwrap_or(&Rgb::BLACK), *self.colors.last().unwrap_or(&Rgb::BLACK))
    }
}

/// Normalize `value` into `[0, 1]` against a column extent.
///
/// Only an exactly degenerate extent (every value equal) normalizes to
/// `0.0`; any positive width, however small, is stretched to the unit range.
#[must_use]
pub fn normalize(value: f32, (min, max): (f32, f32)) -> f32 {
    let width = max - min;
    if width > 0.0 && width.is_finite() {
        ((value - min) / width).clamp(0.0, 1.0)
    } else if width > 0.0 {
        // Span overflows f32; halve both terms to stay finite.
        ((value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Which kind of visual attribute a scale produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleCategory {
    /// Numbers (marker size, opacity).
    Numeric,
    /// RGB colours.
    Colour,
    /// Discrete marker symbols.
    Marker,
    /// No implied channel; accepted by every slot.
    Any,
}

impl ScaleCategory {
    /// True when a scale of this category may drive a slot requiring `required`.
    #[must_use]
    pub fn satisfies(self, required: ScaleCategory) -> bool {
        self == ScaleCategory::Any || self == required
    }
}

impl fmt::Display for ScaleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScaleCategory::Numeric => "numeric",
            ScaleCategory::Colour => "colour",
            ScaleCategory::Marker => "marker",
            ScaleCategory::Any => "constant",
        })
    }
}

/// A visual attribute produced by an aesthetic scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleValue {
    /// A number (size, alpha).
    Number(f32),
    /// Free text, passed through to the renderer.
    Text(String),
    /// An RGB colour.
    Colour(Rgb),
    /// A marker symbol.
    Marker(PointShape),
}

impl ScaleValue {
    /// Category implied by the value's shape.
    #[must_use]
    pub fn category(&self) -> ScaleCategory {
        match self {
            ScaleValue::Number(_) => ScaleCategory::Numeric,
            ScaleValue::Colour(_) => ScaleCategory::Colour,
            ScaleValue::Marker(_) => ScaleCategory::Marker,
            ScaleValue::Text(_) => ScaleCategory::Any,
        }
    }

    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ScaleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as colour.
    #[must_use]
    pub fn as_colour(&self) -> Option<Rgb> {
        match self {
            ScaleValue::Colour(c) => Some(*c),
            _ => None,
        }
    }

    /// Get as marker.
    #[must_use]
    pub fn as_marker(&self) -> Option<PointShape> {
        match self {
            ScaleValue::Marker(m) => Some(*m),
            _ => None,
        }
    }
}

impl From<f32> for ScaleValue {
    fn from(v: f32) -> Self {
        ScaleValue::Number(v)
    }
}

impl From<&str> for ScaleValue {
    fn from(s: &str) -> Self {
        ScaleValue::Text(s.to_string())
    }
}

impl From<String> for ScaleValue {
    fn from(s: String) -> Self {
        ScaleValue::Text(s)
    }
}

impl From<Rgb> for ScaleValue {
    fn from(c: Rgb) -> Self {
        ScaleValue::Colour(c)
    }
}

impl From<PointShape> for ScaleValue {
    fn from(m: PointShape) -> Self {
        ScaleValue::Marker(m)
    }
}

/// A scale usable as an aesthetic value.
///
/// Implementations are pure functions of `(data, row)`, apart from caching
/// dataset-wide aggregates keyed by [`DatasetId`](crate::grammar::DatasetId).
pub trait AesScale: fmt::Debug + Send + Sync {
    /// Capability tag checked when the scale is bound to a slot.
    fn category(&self) -> ScaleCategory;

    /// Short identifying name, e.g. `"size"`.
    fn name(&self) -> &'static str;

    /// Column the scale reads, if any.
    fn column(&self) -> Option<&str> {
        None
    }

    /// True for scales that map discrete categories (legend candidates).
    fn is_categorical(&self) -> bool {
        false
    }

    /// Evaluate the scale for one row.
    ///
    /// # Errors
    ///
    /// Returns an error when the column is missing, non-numeric for a
    /// numeric scale, the row is out of range, or a palette is exhausted.
    fn apply(&self, data: &DataFrame, row: usize) -> Result<ScaleValue>;
}

/// Finite numeric value of `column` at `row`.
///
/// Text, missing values, NaN and infinities are all rejected.
pub(crate) fn numeric_at(data: &DataFrame, column: &str, row: usize) -> Result<f32> {
    let value = data.value(column, row)?;
    match value.as_f32() {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(Error::ScaleDomain(format!(
            "value '{value}' in column '{column}' at row {row} is not finite"
        ))),
        None => Err(Error::ScaleDomain(format!(
            "value '{value}' in column '{column}' is not numeric"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale_unit() {
        let scale = LinearScale::unit((5.0, 100.0));
        assert_relative_eq!(scale.scale(0.0), 5.0);
        assert_relative_eq!(scale.scale(0.5), 52.5);
        assert_relative_eq!(scale.scale(1.0), 100.0);
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(scale.range(), (5.0, 100.0));
    }

    #[test]
    fn test_color_scale_two_stops() {
        let scale = ColorScale::unit(vec![Rgb::BLACK, Rgb::WHITE]);
        let mid = scale.scale(0.5);
        assert_relative_eq!(mid.r, 0.5);
    }

    #[test]
    fn test_color_scale_three_stops_hits_midpoint() {
        let middle = Rgb::new(0.8, 0.7, 0.6);
        let scale = ColorScale::unit(vec![Rgb::BLACK, middle, Rgb::WHITE]);
        assert_eq!(scale.scale(0.5), middle);
        assert_eq!(scale.scale(0.0), Rgb::BLACK);
        assert_eq!(scale.scale(1.0), Rgb::WHITE);
    }

    #[test]
    fn test_color_scale_single_and_empty() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        assert_eq!(ColorScale::unit(vec![red]).scale(0.5), red);
        assert_eq!(ColorScale::unit(Vec::new()).scale(0.5), Rgb::BLACK);
    }

    #[test]
    fn test_color_scale_domain_range() {
        let scale = ColorScale::unit(vec![Rgb::BLACK, Rgb::WHITE]);
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(scale.range(), (Rgb::BLACK, Rgb::WHITE));
        assert_eq!(scale.stops().len(), 2);
    }

    #[test]
    fn test_normalize() {
        assert_relative_eq!(normalize(5.0, (0.0, 10.0)), 0.5);
        assert_relative_eq!(normalize(0.0, (0.0, 10.0)), 0.0);
        assert_relative_eq!(normalize(10.0, (0.0, 10.0)), 1.0);
    }

    #[test]
    fn test_normalize_degenerate_extent() {
        assert_relative_eq!(normalize(3.0, (3.0, 3.0)), 0.0);
    }

    #[test]
    fn test_normalize_tiny_extent() {
        assert_relative_eq!(normalize(0.0, (0.0, 1e-7)), 0.0);
        assert_relative_eq!(normalize(5e-8, (0.0, 1e-7)), 0.5);
        assert_relative_eq!(normalize(1e-7, (0.0, 1e-7)), 1.0);
    }

    #[test]
    fn test_normalize_huge_extent() {
        assert_relative_eq!(normalize(0.0, (-f32::MAX, f32::MAX)), 0.5);
        assert_relative_eq!(normalize(f32::MAX, (-f32::MAX, f32::MAX)), 1.0);
    }

    #[test]
    fn test_category_satisfies() {
        assert!(ScaleCategory::Numeric.satisfies(ScaleCategory::Numeric));
        assert!(!ScaleCategory::Marker.satisfies(ScaleCategory::Numeric));
        assert!(ScaleCategory::Any.satisfies(ScaleCategory::Colour));
    }

    #[test]
    fn test_scale_value_category() {
        assert_eq!(ScaleValue::from(1.0_f32).category(), ScaleCategory::Numeric);
        assert_eq!(ScaleValue::from(Rgb::GREY).category(), ScaleCategory::Colour);
        assert_eq!(ScaleValue::from(PointShape::Circle).category(), ScaleCategory::Marker);
        assert_eq!(ScaleValue::from("red").category(), ScaleCategory::Any);
    }

    #[test]
    fn test_numeric_at_rejects_text() {
        let df = DataFrame::new().with_str("name", &["setosa"]).unwrap();
        assert!(matches!(numeric_at(&df, "name", 0), Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_numeric_at_rejects_non_finite() {
        let df = DataFrame::new().with_f32("v", &[1.0, f32::NAN, f32::INFINITY]).unwrap();
        assert_relative_eq!(numeric_at(&df, "v", 0).unwrap(), 1.0);
        assert!(matches!(numeric_at(&df, "v", 1), Err(Error::ScaleDomain(_))));
        assert!(matches!(numeric_at(&df, "v", 2), Err(Error::ScaleDomain(_))));
    }
}
