//! Faceting for Grammar of Graphics.
//!
//! Creates small multiples by splitting each layer's data on up to two
//! categorical variables, one per grid axis.

use std::ops::Index;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};

use super::data::{DataFrame, DataValue};
use super::layer::Layer;

/// Facet variable for one grid axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    /// Do not split along this axis.
    #[default]
    None,
    /// Split by the distinct values of a column.
    By(String),
}

impl Facet {
    /// Spelling of [`Facet::None`] in string specifications.
    pub const NO_SPLIT: &'static str = ".";

    /// No faceting.
    #[must_use]
    pub fn none() -> Self {
        Facet::None
    }

    /// Facet by a column.
    #[must_use]
    pub fn by(column: &str) -> Self {
        Facet::By(column.to_string())
    }

    /// Parse a column name, treating `"."` as no split.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if spec == Self::NO_SPLIT {
            Facet::None
        } else {
            Facet::by(spec)
        }
    }

    /// Column to split on, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Facet::None => None,
            Facet::By(column) => Some(column),
        }
    }

    /// Sorted union of the facet column's distinct values over every layer.
    fn categories(&self, layers: &[Layer]) -> Result<Vec<DataValue>> {
        let Some(column) = self.column() else {
            return Ok(vec![DataValue::Null]);
        };

        let mut categories = Vec::new();
        for (index, layer) in layers.iter().enumerate() {
            let data = layer_data(layer, index)?;
            if !data.has_column(column) {
                return Err(Error::Configuration(format!(
                    "trellis column '{column}' not found in data of layer {index}"
                )));
            }
            categories.extend(data.distinct(column)?);
        }
        categories.sort_by(DataValue::total_cmp);
        categories.dedup_by(|a, b| a.same_as(b));
        Ok(categories)
    }

    /// True when row `row` of `data` belongs to `category` on this axis.
    fn matches(&self, data: &DataFrame, row: usize, category: &DataValue) -> Result<bool> {
        match self.column() {
            None => Ok(true),
            Some(column) => Ok(data.value(column, row)?.same_as(category)),
        }
    }
}

fn layer_data(layer: &Layer, index: usize) -> Result<&Arc<DataFrame>> {
    layer
        .data
        .as_ref()
        .ok_or_else(|| Error::Configuration(format!("layer {index} has no data to facet")))
}

/// Trellis specification: a row facet and a column facet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrellisGrid {
    row: Facet,
    col: Facet,
    shape: Option<(usize, usize)>,
}

impl TrellisGrid {
    /// Create a grid splitting rows by `row` and columns by `col`.
    #[must_use]
    pub fn new(row: Facet, col: Facet) -> Self {
        Self { row, col, shape: None }
    }

    /// Create from `[row, col]` column names, `"."` meaning no split.
    #[must_use]
    pub fn from_spec(spec: [&str; 2]) -> Self {
        Self::new(Facet::parse(spec[0]), Facet::parse(spec[1]))
    }

    /// Row facet.
    #[must_use]
    pub fn row_facet(&self) -> &Facet {
        &self.row
    }

    /// Column facet.
    #[must_use]
    pub fn col_facet(&self) -> &Facet {
        &self.col
    }

    /// Number of grid rows, known once the grid has been applied.
    #[must_use]
    pub fn rows(&self) -> Option<usize> {
        self.shape.map(|(rows, _)| rows)
    }

    /// Number of grid columns, known once the grid has been applied.
    #[must_use]
    pub fn cols(&self) -> Option<usize> {
        self.shape.map(|(_, cols)| cols)
    }

    /// Partition every layer's data into the grid.
    ///
    /// Categories on each axis are the sorted distinct values of the facet
    /// column across all layers, so every layer gets the same grid shape.
    /// Cell `[i][r][c]` is layer `i` restricted to the rows whose row-facet
    /// value is the r-th category and whose column-facet value is the c-th;
    /// its aesthetics are unchanged. Each row of a layer's data lands in
    /// exactly one cell, and every cell keeps the layer's frame as its
    /// [`DataFrame::origin`] so scales map all panels the same way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a layer has no data or its data
    /// lacks a facet column.
    pub fn trellis(&mut self, layers: &[Layer]) -> Result<FacetGrid> {
        let row_labels = self.row.categories(layers)?;
        let col_labels = self.col.categories(layers)?;
        self.shape = Some((row_labels.len(), col_labels.len()));

        let mut grid = Vec::with_capacity(layers.len());
        for (index, layer) in layers.iter().enumerate() {
            let data = layer_data(layer, index)?;
            let mut rows = Vec::with_capacity(row_labels.len());
            for row_label in &row_labels {
                let mut cells = Vec::with_capacity(col_labels.len());
                for col_label in &col_labels {
                    let subset = DataFrame::split_from(data, |frame, row| {
                        Ok(self.row.matches(frame, row, row_label)?
                            && self.col.matches(frame, row, col_label)?)
                    })?;
                    let mut cell = layer.clone();
                    cell.data = Some(Arc::new(subset));
                    cells.push(cell);
                }
                rows.push(cells);
            }
            grid.push(rows);
        }

        debug!(
            layers = layers.len(),
            rows = row_labels.len(),
            cols = col_labels.len(),
            "trellised layers"
        );

        Ok(FacetGrid { layers: grid, row_labels, col_labels })
    }
}

/// Layers partitioned into a grid: layer → row → column.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetGrid {
    layers: Vec<Vec<Vec<Layer>>>,
    row_labels: Vec<DataValue>,
    col_labels: Vec<DataValue>,
}

impl FacetGrid {
    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of grid rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of grid columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Category of each grid row (`Null` for an unsplit axis).
    #[must_use]
    pub fn row_labels(&self) -> &[DataValue] {
        &self.row_labels
    }

    /// Category of each grid column (`Null` for an unsplit axis).
    #[must_use]
    pub fn col_labels(&self) -> &[DataValue] {
        &self.col_labels
    }

    /// Layer `layer` in cell `(row, col)`.
    #[must_use]
    pub fn cell(&self, layer: usize, row: usize, col: usize) -> Option<&Layer> {
        self.layers.get(layer)?.get(row)?.get(col)
    }

    /// Grid of one layer.
    pub fn iter(&self) -> impl Iterator<Item = &Vec<Vec<Layer>>> {
        self.layers.iter()
    }

    /// Regroup as row → column → layers, one layer stack per panel.
    #[must_use]
    pub fn cells(&self) -> Vec<Vec<Vec<&Layer>>> {
        (0..self.rows())
            .map(|r| {
                (0..self.cols())
                    .map(|c| self.layers.iter().map(|grid| &grid[r][c]).collect())
                    .collect()
            })
            .collect()
    }
}

impl Index<usize> for FacetGrid {
    type Output = Vec<Vec<Layer>>;

    fn index(&self, layer: usize) -> &Self::Output {
        &self.layers[layer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::aes::{Aes, Aesthetic};
    use crate::grammar::layer::sequence_layers;

    fn tips() -> Arc<DataFrame> {
        let df = DataFrame::new()
            .with_f32("total_bill", &[16.99, 10.34, 21.01, 23.68, 24.59, 25.29, 8.77])
            .and_then(|df| df.with_f32("tip", &[1.01, 1.66, 3.5, 3.31, 3.61, 4.71, 2.0]))
            .and_then(|df| {
                df.with_str("sex", &["Female", "Male", "Male", "Male", "Female", "Male", "Male"])
            })
            .and_then(|df| df.with_str("smoker", &["No", "No", "Yes", "No", "Yes", "No", "No"]))
            .unwrap();
        Arc::new(df)
    }

    fn layers() -> Vec<Layer> {
        sequence_layers(&[
            Layer::from_data(tips()),
            Layer::point().aes(Aes::new().x("total_bill").y("tip")),
            Layer::poly_fit(2),
        ])
        .unwrap()
    }

    #[test]
    fn test_facet_parse() {
        assert_eq!(Facet::parse("."), Facet::None);
        assert_eq!(Facet::parse("sex"), Facet::by("sex"));
        assert_eq!(Facet::by("sex").column(), Some("sex"));
        assert_eq!(Facet::none().column(), None);
    }

    #[test]
    fn test_shape_unknown_before_application() {
        let grid = TrellisGrid::from_spec(["sex", "smoker"]);
        assert_eq!(grid.rows(), None);
        assert_eq!(grid.cols(), None);
    }

    #[test]
    fn test_grid_sizes() {
        let layers = layers();
        let mut both = TrellisGrid::from_spec(["sex", "smoker"]);
        let mut rows_only = TrellisGrid::from_spec(["sex", "."]);
        let mut cols_only = TrellisGrid::from_spec([".", "smoker"]);

        let g1 = both.trellis(&layers).unwrap();
        let g2 = rows_only.trellis(&layers).unwrap();
        let g3 = cols_only.trellis(&layers).unwrap();

        for (grid, rows, cols) in [(&g1, 2, 2), (&g2, 2, 1), (&g3, 1, 2)] {
            assert_eq!(grid.len(), 3);
            for i in 0..grid.len() {
                assert_eq!(grid[i].len(), rows);
                for r in 0..rows {
                    assert_eq!(grid[i][r].len(), cols);
                }
            }
        }

        assert_eq!((both.rows(), both.cols()), (Some(2), Some(2)));
        assert_eq!((rows_only.rows(), rows_only.cols()), (Some(2), Some(1)));
        assert_eq!((cols_only.rows(), cols_only.cols()), (Some(1), Some(2)));
    }

    #[test]
    fn test_cells_hold_exact_subsets() {
        let layers = layers();
        let grid = TrellisGrid::from_spec(["sex", "smoker"]).trellis(&layers).unwrap();

        assert_eq!(grid.row_labels(), &[DataValue::from("Female"), DataValue::from("Male")]);
        assert_eq!(grid.col_labels(), &[DataValue::from("No"), DataValue::from("Yes")]);

        let counts: Vec<usize> = (0..2)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| grid.cell(0, r, c).unwrap().data.as_ref().unwrap().nrow())
            .collect();
        assert_eq!(counts, vec![1, 1, 4, 1]);

        let female_yes = grid.cell(1, 0, 1).unwrap().data.as_ref().unwrap();
        assert_eq!(female_yes.get_f32("total_bill").unwrap(), vec![24.59]);
    }

    #[test]
    fn test_partition_covers_every_row_once() {
        let layers = layers();
        let grid = TrellisGrid::from_spec(["sex", "smoker"]).trellis(&layers).unwrap();
        for (i, layer) in layers.iter().enumerate() {
            let total: usize = grid[i]
                .iter()
                .flatten()
                .map(|cell| cell.data.as_ref().unwrap().nrow())
                .sum();
            assert_eq!(total, layer.data.as_ref().unwrap().nrow());
        }
    }

    #[test]
    fn test_sentinel_keeps_full_axis() {
        let layers = layers();
        let grid = TrellisGrid::from_spec([".", "."]).trellis(&layers).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.cell(0, 0, 0).unwrap().data.as_ref().unwrap().nrow(), 7);

        let grid = TrellisGrid::from_spec([".", "smoker"]).trellis(&layers).unwrap();
        let no = grid.cell(0, 0, 0).unwrap().data.as_ref().unwrap();
        assert_eq!(no.distinct("sex").unwrap().len(), 2);
    }

    #[test]
    fn test_aesthetics_copied_unchanged() {
        let layers = layers();
        let grid = TrellisGrid::from_spec(["sex", "."]).trellis(&layers).unwrap();
        for row in &grid[2] {
            for cell in row {
                assert_eq!(cell.aes, layers[2].aes);
                assert_eq!(cell.kind, layers[2].kind);
                assert!(cell.aes.is_set(Aesthetic::X));
            }
        }
    }

    #[test]
    fn test_cells_regroup_per_panel() {
        let layers = layers();
        let grid = TrellisGrid::from_spec(["sex", "smoker"]).trellis(&layers).unwrap();
        let panels = grid.cells();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].len(), 2);
        assert_eq!(panels[1][1].len(), 3);
        assert!(std::ptr::eq(panels[1][0][2], grid.cell(2, 1, 0).unwrap()));
    }

    #[test]
    fn test_cells_keep_layer_frame_as_origin() {
        let layers = layers();
        let grid = TrellisGrid::from_spec(["sex", "smoker"]).trellis(&layers).unwrap();
        let whole = layers[0].data.as_ref().unwrap();
        for cell in grid[0].iter().flatten() {
            assert_eq!(cell.data.as_ref().unwrap().origin().id(), whole.id());
        }
    }

    #[test]
    fn test_missing_column_is_configuration_error() {
        let layers = layers();
        let err = TrellisGrid::from_spec(["day", "."]).trellis(&layers).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_layer_without_data_is_configuration_error() {
        let err = TrellisGrid::from_spec(["sex", "."]).trellis(&[Layer::point()]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_categories_union_across_layers() {
        let extra = DataFrame::new()
            .with_f32("total_bill", &[5.0])
            .and_then(|df| df.with_f32("tip", &[1.0]))
            .and_then(|df| df.with_str("sex", &["Unknown"]))
            .and_then(|df| df.with_str("smoker", &["No"]))
            .unwrap();
        let mut layers = layers();
        layers.push(Layer::point().data(Arc::new(extra)));

        let grid = TrellisGrid::from_spec(["sex", "."]).trellis(&layers).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cell(0, 2, 0).unwrap().data.as_ref().unwrap().nrow(), 0);
        assert_eq!(grid.cell(3, 2, 0).unwrap().data.as_ref().unwrap().nrow(), 1);
    }
}
