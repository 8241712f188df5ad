//! Property-based tests for trellis partitioning and scale bounds.
//!
//! Run: cargo test --test property_test

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;

use trellis_viz::color::Rgb;
use trellis_viz::grammar::{sequence_layers, Aes, DataFrame, Layer, TrellisGrid};
use trellis_viz::scale::{AesScale, PointShape, ScaleGradient, ScaleGradient2, ScaleShape, ScaleSize};

const GROUPS: [&str; 4] = ["a", "b", "c", "d"];

fn frame(values: &[f32], rows: &[usize], cols: &[usize]) -> Arc<DataFrame> {
    let row_labels: Vec<&str> = rows.iter().map(|&i| GROUPS[i]).collect();
    let col_labels: Vec<&str> = cols.iter().map(|&i| GROUPS[i]).collect();
    let df = DataFrame::new()
        .with_f32("value", values)
        .and_then(|df| df.with_str("row", &row_labels))
        .and_then(|df| df.with_str("col", &col_labels))
        .unwrap();
    Arc::new(df)
}

fn dataset() -> impl Strategy<Value = (Vec<f32>, Vec<usize>, Vec<usize>)> {
    (1usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(-1000.0f32..1000.0, n),
            prop::collection::vec(0usize..GROUPS.len(), n),
            prop::collection::vec(0usize..GROUPS.len(), n),
        )
    })
}

fn colour() -> impl Strategy<Value = Rgb> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn between(a: f32, b: f32, x: f32) -> bool {
    a.min(b) - 1e-6 <= x && x <= a.max(b) + 1e-6
}

fn channels_between(a: Rgb, b: Rgb, c: Rgb) -> bool {
    between(a.r, b.r, c.r) && between(a.g, b.g, c.g) && between(a.b, b.b, c.b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_trellis_partitions_every_layer((values, rows, cols) in dataset(), spec in 0usize..4) {
        let data = frame(&values, &rows, &cols);
        let other = frame(&values[..values.len() / 2 + 1], &rows[..rows.len() / 2 + 1], &cols[..cols.len() / 2 + 1]);
        let layers = sequence_layers(&[
            Layer::from_data(data).aes(Aes::new().x("value").y("value")),
            Layer::point(),
            Layer::point().data(other),
        ]).unwrap();

        let axes = [["row", "col"], ["row", "."], [".", "col"], [".", "."]][spec];
        let mut trellis = TrellisGrid::from_spec(axes);
        let grid = trellis.trellis(&layers).unwrap();

        prop_assert_eq!(trellis.rows(), Some(grid.rows()));
        prop_assert_eq!(trellis.cols(), Some(grid.cols()));
        for (i, layer) in layers.iter().enumerate() {
            prop_assert_eq!(grid[i].len(), grid.rows());
            let mut total = 0;
            for row in &grid[i] {
                prop_assert_eq!(row.len(), grid.cols());
                for cell in row {
                    prop_assert_eq!(&cell.aes, &layer.aes);
                    total += cell.data.as_ref().unwrap().nrow();
                }
            }
            prop_assert_eq!(total, layer.data.as_ref().unwrap().nrow());
        }
    }

    #[test]
    fn prop_gradient_within_endpoints(values in prop::collection::vec(-1e4f32..1e4, 1..40), c1 in colour(), c2 in colour()) {
        let data = DataFrame::new().with_f32("v", &values).unwrap();
        let scale = ScaleGradient::new("v", c1, c2);
        for row in 0..data.nrow() {
            let c = scale.apply(&data, row).unwrap().as_colour().unwrap();
            prop_assert!(channels_between(c1, c2, c), "{:?} not within {:?}..{:?}", c, c1, c2);
        }
    }

    #[test]
    fn prop_gradient2_within_segment_endpoints(
        values in prop::collection::vec(-1e4f32..1e4, 1..40),
        c1 in colour(),
        c2 in colour(),
        c3 in colour(),
    ) {
        let data = DataFrame::new().with_f32("v", &values).unwrap();
        let scale = ScaleGradient2::new("v", c1, c2, c3);
        for row in 0..data.nrow() {
            let c = scale.apply(&data, row).unwrap().as_colour().unwrap();
            prop_assert!(channels_between(c1, c2, c) || channels_between(c2, c3, c));
        }
    }

    #[test]
    fn prop_size_within_range(values in prop::collection::vec(-1e4f32..1e4, 1..40), low in 0.0f32..50.0, span in 0.0f32..200.0) {
        let data = DataFrame::new().with_f32("v", &values).unwrap();
        let scale = ScaleSize::new("v").range(low, low + span);
        for row in 0..data.nrow() {
            let size = scale.apply(&data, row).unwrap().as_f32().unwrap();
            prop_assert!(low - 1e-3 <= size && size <= low + span + 1e-3);
        }
    }

    #[test]
    fn prop_shape_within_palette(labels in prop::collection::vec(0usize..10, 1..40)) {
        let names: Vec<String> = labels.iter().map(|i| format!("level{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let data = DataFrame::new().with_str("name", &refs).unwrap();
        let scale = ScaleShape::new("name");
        for row in 0..data.nrow() {
            let marker = scale.apply(&data, row).unwrap().as_marker().unwrap();
            prop_assert!(PointShape::PALETTE.contains(&marker));
        }
    }
}
