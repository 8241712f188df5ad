//! Plot builder and render plan.
//!
//! Combines layers and an optional trellis into a [`RenderPlan`] that a
//! [`Renderer`] draws.

use std::ops::{Add, AddAssign};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::aes::Aes;
use super::data::DataFrame;
use super::facet::{FacetGrid, TrellisGrid};
use super::layer::{sequence_layers, Layer};
use super::legend::Legend;

/// Drawing backend.
///
/// Receives a fully resolved plan. Scales are handed over unevaluated, the
/// renderer calls [`AesScale::apply`](crate::scale::AesScale::apply) per row.
pub trait Renderer {
    /// Draw `plan`.
    ///
    /// # Errors
    ///
    /// Implementations return any error raised while drawing, including
    /// scale evaluation errors.
    fn draw(&mut self, plan: &RenderPlan) -> Result<()>;
}

/// What to draw: resolved layers, optionally partitioned into panels.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    /// One panel holding every resolved layer.
    Flat {
        /// Resolved layers.
        layers: Vec<Layer>,
    },
    /// One panel per trellis cell.
    Faceted {
        /// Resolved layers before partitioning.
        layers: Vec<Layer>,
        /// Partitioned layers.
        grid: FacetGrid,
    },
}

impl RenderPlan {
    /// Number of panels to draw.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        match self {
            RenderPlan::Flat { .. } => 1,
            RenderPlan::Faceted { grid, .. } => grid.rows() * grid.cols(),
        }
    }

    /// Resolved layers, before any trellis partitioning.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        match self {
            RenderPlan::Flat { layers } | RenderPlan::Faceted { layers, .. } => layers,
        }
    }

    /// Grid of a faceted plan.
    #[must_use]
    pub fn grid(&self) -> Option<&FacetGrid> {
        match self {
            RenderPlan::Flat { .. } => None,
            RenderPlan::Faceted { grid, .. } => Some(grid),
        }
    }

    /// Legend keys, shared by every panel.
    ///
    /// Keys are evaluated over the unpartitioned layers. Panels map through
    /// the same dataset-wide aggregates, so each key matches what a panel
    /// draws for that category.
    ///
    /// # Errors
    ///
    /// Propagates scale evaluation errors, e.g. [`Error::Overflow`] when a
    /// shape scale sees more categories than its palette holds.
    ///
    /// [`Error::Overflow`]: crate::Error::Overflow
    pub fn legend(&self) -> Result<Legend> {
        Legend::from_layers(self.layers())
    }
}

/// Layered plot builder.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use trellis_viz::grammar::*;
/// use trellis_viz::scale::ScaleSize;
///
/// let data = DataFrame::new()
///     .with_f32("tip", &[1.0, 3.5, 2.0, 4.0])
///     .and_then(|df| df.with_f32("total_bill", &[10.0, 24.0, 16.0, 30.0]))
///     .and_then(|df| df.with_str("sex", &["Female", "Male", "Male", "Female"]))
///     .unwrap();
///
/// let mut plot = RPlot::new(Arc::new(data), "tip", "total_bill")
///     + TrellisGrid::from_spec(["sex", "."])
///     + Layer::point().aes(Aes::new().size(ScaleSize::new("tip")).unwrap());
///
/// let plan = plot.build().unwrap();
/// assert_eq!(plan.panel_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RPlot {
    layers: Vec<Layer>,
    trellis: Option<TrellisGrid>,
}

impl RPlot {
    /// Create a plot whose first layer holds `data` mapped to `x` and `y`.
    #[must_use]
    pub fn new(data: Arc<DataFrame>, x: &str, y: &str) -> Self {
        Self::with_aes(data, Aes::new().x(x).y(y))
    }

    /// Create a plot whose first layer holds `data` with mapping `aes`.
    #[must_use]
    pub fn with_aes(data: Arc<DataFrame>, aes: Aes) -> Self {
        Self { layers: vec![Layer::from_data(data).aes(aes)], trellis: None }
    }

    /// Append a layer.
    pub fn add_layer(&mut self, layer: Layer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Set the trellis, replacing any earlier one.
    pub fn add_trellis(&mut self, trellis: TrellisGrid) -> &mut Self {
        if self.trellis.is_some() {
            debug!("replacing existing trellis");
        }
        self.trellis = Some(trellis);
        self
    }

    /// Layers as added.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Current trellis, if any.
    #[must_use]
    pub fn trellis(&self) -> Option<&TrellisGrid> {
        self.trellis.as_ref()
    }

    /// Resolve layers into a render plan.
    ///
    /// Layers are sequenced first; the trellis, if set, then partitions the
    /// sequenced layers. Scales are not evaluated here; see
    /// [`RenderPlan::legend`].
    ///
    /// # Errors
    ///
    /// Propagates sequencing and trellis errors.
    pub fn build(&mut self) -> Result<RenderPlan> {
        let layers = sequence_layers(&self.layers)?;

        let plan = match self.trellis.as_mut() {
            Some(trellis) => {
                let grid = trellis.trellis(&layers)?;
                RenderPlan::Faceted { layers, grid }
            }
            None => RenderPlan::Flat { layers },
        };
        debug!(layers = self.layers.len(), panels = plan.panel_count(), "built plot");
        Ok(plan)
    }

    /// Build the plot and hand the plan to `renderer`.
    ///
    /// # Errors
    ///
    /// Propagates build errors and errors returned by the renderer.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> Result<RenderPlan> {
        let plan = self.build()?;
        renderer.draw(&plan)?;
        Ok(plan)
    }
}

impl Add<Layer> for RPlot {
    type Output = RPlot;

    fn add(mut self, layer: Layer) -> RPlot {
        self.add_layer(layer);
        self
    }
}

impl Add<TrellisGrid> for RPlot {
    type Output = RPlot;

    fn add(mut self, trellis: TrellisGrid) -> RPlot {
        self.add_trellis(trellis);
        self
    }
}

impl AddAssign<Layer> for RPlot {
    fn add_assign(&mut self, layer: Layer) {
        self.add_layer(layer);
    }
}

impl AddAssign<TrellisGrid> for RPlot {
    fn add_assign(&mut self, trellis: TrellisGrid) {
        self.add_trellis(trellis);
    }
}
