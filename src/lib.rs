//! # Trellis-Viz
//!
//! Layered Grammar of Graphics resolution engine with trellis conditioning.
//!
//! trellis-viz turns a plot description (datasets, layers, aesthetic mappings and
//! an optional trellis grid) into a fully resolved render plan. Drawing is left to
//! a [`grammar::Renderer`] supplied by the caller.
//!
//! ## Features
//!
//! - **Aesthetics**: Six fixed slots (x, y, size, colour, shape, alpha) validated by
//!   scale capability
//! - **Scales**: Constant, size, shape, two- and three-colour gradients, and seeded
//!   random colours, with per-dataset aggregate caching
//! - **Layer inheritance**: Later layers inherit data and aesthetics from earlier ones
//! - **Trellis**: Partition layers into a grid by up to two categorical columns
//! - **SIMD extents**: Column min/max through [trueno](https://crates.io/crates/trueno)
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_viz::prelude::*;
//!
//! let data = DataFrame::new()
//!     .with_f32("tip", &[1.0, 3.5, 2.0, 4.0])
//!     .and_then(|df| df.with_f32("total_bill", &[10.0, 24.0, 16.0, 30.0]))
//!     .and_then(|df| df.with_str("smoker", &["No", "Yes", "No", "Yes"]))
//!     .unwrap();
//!
//! let mut plot = RPlot::new(Arc::new(data), "tip", "total_bill")
//!     + TrellisGrid::from_spec([".", "smoker"])
//!     + Layer::point().aes(Aes::new().shape(ScaleShape::new("smoker")).unwrap());
//!
//! let plan = plot.build().unwrap();
//! assert_eq!(plan.panel_count(), 2);
//! assert_eq!(plan.legend().unwrap().len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel processing in trueno
//! - `serde`: Serialize/deserialize plain value types
//! - `telemetry`: Default `tracing` subscriber helper
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Becker, R. A., Cleveland, W. S., & Shyu, M. J. (1996). "The Visual Design and
//!   Control of Trellis Display." Journal of Computational and Graphical Statistics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Grammar of Graphics implementation.
pub mod grammar;

// ============================================================================
// Diagnostics
// ============================================================================

/// Opt-in tracing subscriber setup.
pub mod telemetry;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trellis-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trellis_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgb;
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{
        sequence_layers, Aes, AesValue, Aesthetic, DataFrame, DataValue, Facet, FacetGrid, Layer,
        LayerKind, Legend, RPlot, RenderPlan, Renderer, TrellisGrid,
    };
    pub use crate::scale::{
        AesScale, PointShape, ScaleCategory, ScaleConstant, ScaleGradient, ScaleGradient2,
        ScaleRandomColour, ScaleShape, ScaleSize, ScaleValue,
    };
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
