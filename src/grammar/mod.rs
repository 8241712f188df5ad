//! Grammar of Graphics implementation.
//!
//! Provides declarative, layered plot specification based on Wilkinson's
//! Grammar of Graphics [Wilkinson 2005], with trellis (small multiple)
//! conditioning.
//!
//! # Components
//!
//! - **Data**: Columnar frames shared between layers
//! - **Aesthetics**: Mappings from data to visual properties (x, y, size, colour, shape, alpha)
//! - **Layers**: Ordered layers that inherit data and aesthetics from earlier ones
//! - **Facets**: Trellis grids splitting layers by up to two categorical columns
//! - **Legend**: Keys for categorical scales
//! - **RPlot**: Builder combining the above into a render plan
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_viz::grammar::*;
//!
//! let data = DataFrame::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
//! let layers = sequence_layers(&[
//!     Layer::from_data(Arc::new(data)).aes(Aes::new().x("x").y("y")),
//!     Layer::point(),
//! ])
//! .unwrap();
//! assert!(layers[1].aes.is_set(Aesthetic::X));
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod data;
mod facet;
mod geom;
mod layer;
mod legend;
mod rplot;

pub use aes::{dictionary_union, make_aes, Aes, AesValue, Aesthetic};
pub use data::{ColumnKind, DataFrame, DataValue, DatasetId};
pub use facet::{Facet, FacetGrid, TrellisGrid};
pub use geom::LayerKind;
pub use layer::{merge_aes, sequence_layers, Layer};
pub use legend::{Legend, LegendEntry};
pub use rplot::{RPlot, RenderPlan, Renderer};
