//! Layer kinds for Grammar of Graphics.
//!
//! A kind tells the renderer what to draw for a resolved layer. It never
//! changes how data and aesthetics are resolved.

use crate::color::Rgb;

/// Geometry or statistic drawn for a layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LayerKind {
    /// Plain data carrier; draws nothing by itself.
    #[default]
    Data,
    /// Points.
    Point,
    /// Least-squares polynomial fit drawn as a line.
    PolyFit {
        /// Polynomial degree.
        degree: usize,
        /// Line width.
        line_width: f32,
        /// Line colour.
        colour: Rgb,
    },
    /// Points without a legend.
    Scatter,
    /// Histogram bars.
    Histogram {
        /// Number of bins.
        bins: usize,
        /// Bar colour.
        colour: Rgb,
    },
    /// 1D kernel density estimate.
    Density,
    /// 2D kernel density contours.
    Density2D,
}

impl LayerKind {
    /// Create a point geometry.
    #[must_use]
    pub fn point() -> Self {
        LayerKind::Point
    }

    /// Create a polynomial fit of `degree` with a grey, 2px line.
    #[must_use]
    pub fn poly_fit(degree: usize) -> Self {
        LayerKind::PolyFit { degree, line_width: 2.0, colour: Rgb::GREY }
    }

    /// Create a scatter geometry.
    #[must_use]
    pub fn scatter() -> Self {
        LayerKind::Scatter
    }

    /// Create a grey histogram with `bins` bins.
    #[must_use]
    pub fn histogram(bins: usize) -> Self {
        LayerKind::Histogram { bins, colour: Rgb::GREY }
    }

    /// Create a density estimate.
    #[must_use]
    pub fn density() -> Self {
        LayerKind::Density
    }

    /// Create a 2D density estimate.
    #[must_use]
    pub fn density_2d() -> Self {
        LayerKind::Density2D
    }

    /// Short name, e.g. `"point"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Data => "data",
            LayerKind::Point => "point",
            LayerKind::PolyFit { .. } => "polyfit",
            LayerKind::Scatter => "scatter",
            LayerKind::Histogram { .. } => "histogram",
            LayerKind::Density => "density",
            LayerKind::Density2D => "density2d",
        }
    }

    /// True for kinds the renderer draws.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        !matches!(self, LayerKind::Data)
    }
}
