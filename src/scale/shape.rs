//! Marker shape scale.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::grammar::{DataFrame, DataValue};

use super::{AesScale, AggregateCache, ScaleCategory, ScaleValue};

/// Marker symbols, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointShape {
    /// Circle (`o`).
    #[default]
    Circle,
    /// Plus (`+`).
    Plus,
    /// Square (`s`).
    Square,
    /// Star (`*`).
    Star,
    /// Upward triangle (`^`).
    TriangleUp,
    /// Left triangle (`<`).
    TriangleLeft,
    /// Right triangle (`>`).
    TriangleRight,
    /// Downward triangle (`v`).
    TriangleDown,
    /// Vertical line (`|`).
    VLine,
    /// X shape (`x`).
    X,
}

impl PointShape {
    /// The fixed marker palette used by [`ScaleShape`].
    pub const PALETTE: [PointShape; 10] = [
        PointShape::Circle,
        PointShape::Plus,
        PointShape::Square,
        PointShape::Star,
        PointShape::TriangleUp,
        PointShape::TriangleLeft,
        PointShape::TriangleRight,
        PointShape::TriangleDown,
        PointShape::VLine,
        PointShape::X,
    ];

    /// Single-character symbol for the marker.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            PointShape::Circle => 'o',
            PointShape::Plus => '+',
            PointShape::Square => 's',
            PointShape::Star => '*',
            PointShape::TriangleUp => '^',
            PointShape::TriangleLeft => '<',
            PointShape::TriangleRight => '>',
            PointShape::TriangleDown => 'v',
            PointShape::VLine => '|',
            PointShape::X => 'x',
        }
    }

    /// Marker for a symbol character.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::PALETTE.into_iter().find(|shape| shape.symbol() == symbol)
    }
}

impl fmt::Display for PointShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Assigns a marker to each distinct value of a column.
///
/// Distinct values are sorted; the n-th one gets the n-th palette symbol.
/// A row whose value sorts past the end of the palette fails with
/// [`Error::Overflow`], so a high-cardinality column fails on the first such
/// row rather than at construction.
#[derive(Debug, Clone)]
pub struct ScaleShape {
    column: String,
    levels: AggregateCache<Arc<Vec<DataValue>>>,
}

impl ScaleShape {
    /// Shape scale over `column`.
    #[must_use]
    pub fn new(column: &str) -> Self {
        Self { column: column.to_string(), levels: AggregateCache::new() }
    }

    /// Sorted distinct values of the column, over the frame `data` was
    /// split from when `data` is a trellis panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing.
    pub fn levels(&self, data: &DataFrame) -> Result<Arc<Vec<DataValue>>> {
        self.levels.get_or_compute(data, |d| d.distinct(&self.column).map(Arc::new))
    }
}

impl AesScale for ScaleShape {
    fn category(&self) -> ScaleCategory {
        ScaleCategory::Marker
    }

    fn name(&self) -> &'static str {
        "shape"
    }

    fn column(&self) -> Option<&str> {
        Some(&self.column)
    }

    fn is_categorical(&self) -> bool {
        true
    }

    fn apply(&self, data: &DataFrame, row: usize) -> Result<ScaleValue> {
        let levels = self.levels(data)?;
        let value = data.value(&self.column, row)?;
        let index = levels
            .binary_search_by(|level| level.total_cmp(value))
            .map_err(|_| Error::Configuration(format!("value '{value}' missing from levels of '{}'", self.column)))?;

        PointShape::PALETTE
            .get(index)
            .map(|&shape| ScaleValue::Marker(shape))
            .ok_or_else(|| Error::Overflow {
                column: self.column.clone(),
                palette_size: PointShape::PALETTE.len(),
            })
    }
}
