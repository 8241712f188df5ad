//! Legend keys for categorical scales.

use crate::error::Result;
use crate::scale::ScaleValue;

use super::aes::Aesthetic;
use super::data::DataValue;
use super::layer::Layer;

/// One legend key: a category and the visual value it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Aesthetic the scale is mapped to.
    pub aesthetic: Aesthetic,
    /// Data column the scale reads.
    pub column: String,
    /// Category shown in the legend.
    pub label: DataValue,
    /// Visual value for the category.
    pub value: ScaleValue,
}

/// Legend keys collected from resolved layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Collect keys for every categorical scale in `layers`.
    ///
    /// Each distinct value of a categorical scale's column yields one entry,
    /// evaluated at the first row holding that value. Entries repeated across
    /// layers are kept once, in order of first appearance. Layers without
    /// data contribute nothing.
    ///
    /// # Errors
    ///
    /// Propagates scale evaluation errors, e.g. [`Error::Overflow`] when a
    /// shape scale sees more categories than its palette holds.
    ///
    /// [`Error::Overflow`]: crate::Error::Overflow
    pub fn from_layers(layers: &[Layer]) -> Result<Self> {
        let mut legend = Legend::default();
        for layer in layers {
            let Some(data) = layer.data.as_deref() else { continue };
            for (aesthetic, value) in layer.aes.iter() {
                let Some(scale) = value.and_then(|v| v.as_scale()) else { continue };
                if !scale.is_categorical() {
                    continue;
                }
                let Some(column) = scale.column() else { continue };

                let values = data.column(column)?;
                for label in data.distinct(column)? {
                    if legend.contains(aesthetic, column, &label) {
                        continue;
                    }
                    let Some(row) = values.iter().position(|v| v.same_as(&label)) else {
                        continue;
                    };
                    let value = scale.apply(data, row)?;
                    legend.entries.push(LegendEntry {
                        aesthetic,
                        column: column.to_string(),
                        label,
                        value,
                    });
                }
            }
        }
        Ok(legend)
    }

    fn contains(&self, aesthetic: Aesthetic, column: &str, label: &DataValue) -> bool {
        self.entries
            .iter()
            .any(|e| e.aesthetic == aesthetic && e.column == column && e.label.same_as(label))
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Entries for one aesthetic.
    pub fn for_aesthetic(&self, aesthetic: Aesthetic) -> impl Iterator<Item = &LegendEntry> {
        self.entries.iter().filter(move |e| e.aesthetic == aesthetic)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no categorical scale is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::Error;
    use crate::grammar::aes::Aes;
    use crate::grammar::data::DataFrame;
    use crate::grammar::layer::sequence_layers;
    use crate::scale::{PointShape, ScaleRandomColour, ScaleShape, ScaleSize};

    fn iris() -> Arc<DataFrame> {
        let df = DataFrame::new()
            .with_f32("SepalLength", &[5.1, 7.0, 6.3, 4.9])
            .and_then(|df| df.with_f32("SepalWidth", &[3.5, 3.2, 3.3, 3.0]))
            .and_then(|df| {
                df.with_str("Name", &["setosa", "versicolor", "virginica", "setosa"])
            })
            .unwrap();
        Arc::new(df)
    }

    #[test]
    fn test_shape_legend_in_category_order() {
        let layers = sequence_layers(&[
            Layer::from_data(iris()),
            Layer::point().aes(Aes::new().x("SepalLength").shape(ScaleShape::new("Name")).unwrap()),
            Layer::point(),
        ])
        .unwrap();

        let legend = Legend::from_layers(&layers).unwrap();
        assert_eq!(legend.len(), 3);
        let labels: Vec<_> = legend.entries().iter().map(|e| e.label.to_string()).collect();
        assert_eq!(labels, vec!["setosa", "versicolor", "virginica"]);
        assert_eq!(legend.entries()[0].value, ScaleValue::Marker(PointShape::Circle));
        assert_eq!(legend.entries()[2].value, ScaleValue::Marker(PointShape::Square));
        assert!(legend.entries().iter().all(|e| e.column == "Name"));
    }

    #[test]
    fn test_continuous_scales_have_no_keys() {
        let layers = vec![Layer::from_data(iris())
            .aes(Aes::new().size(ScaleSize::new("SepalLength")).unwrap())];
        assert!(Legend::from_layers(&layers).unwrap().is_empty());
    }

    #[test]
    fn test_colour_keys_match_scale() {
        let scale = ScaleRandomColour::new("Name").seed(7);
        let data = iris();
        let layers =
            vec![Layer::from_data(Arc::clone(&data)).aes(Aes::new().colour(scale.clone()).unwrap())];
        let legend = Legend::from_layers(&layers).unwrap();

        let setosa = legend.for_aesthetic(Aesthetic::Colour).next().unwrap();
        assert_eq!(setosa.value, crate::scale::AesScale::apply(&scale, &data, 3).unwrap());
        assert_eq!(legend.for_aesthetic(Aesthetic::Shape).count(), 0);
    }

    #[test]
    fn test_overflow_propagates() {
        let names: Vec<String> = (0..11).map(|i| format!("n{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let data = DataFrame::new().with_str("Name", &refs).unwrap();
        let layers =
            vec![Layer::from_data(Arc::new(data)).aes(Aes::new().shape(ScaleShape::new("Name")).unwrap())];
        assert!(matches!(Legend::from_layers(&layers), Err(Error::Overflow { .. })));
    }
}
