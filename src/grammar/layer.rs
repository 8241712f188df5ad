//! Layers and layer sequencing.
//!
//! A plot is an ordered list of layers. Later layers inherit whatever they
//! leave unspecified, data and aesthetics alike, from the layers before them.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::aes::Aes;
use super::data::DataFrame;
use super::geom::LayerKind;

/// A layer in the plot.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    /// What the renderer draws for this layer.
    pub kind: LayerKind,
    /// Layer data; `None` inherits from an earlier layer.
    pub data: Option<Arc<DataFrame>>,
    /// Layer aesthetics; absent slots inherit from earlier layers.
    pub aes: Aes,
}

impl Layer {
    /// Create a layer of the given kind with no data and no aesthetics.
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self { kind, data: None, aes: Aes::new() }
    }

    /// Create a plain data layer.
    #[must_use]
    pub fn from_data(data: Arc<DataFrame>) -> Self {
        Self::new(LayerKind::Data).data(data)
    }

    /// Create a point layer.
    #[must_use]
    pub fn point() -> Self {
        Self::new(LayerKind::point())
    }

    /// Create a polynomial fit layer.
    #[must_use]
    pub fn poly_fit(degree: usize) -> Self {
        Self::new(LayerKind::poly_fit(degree))
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn data(mut self, data: Arc<DataFrame>) -> Self {
        self.data = Some(data);
        self
    }

    /// Set layer aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }

    /// True when `other` shares this layer's dataset (same allocation).
    #[must_use]
    pub fn shares_data_with(&self, other: &Layer) -> bool {
        match (&self.data, &other.data) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Layers are equal when they have the same kind and aesthetics and share
/// the same dataset.
impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.aes == other.aes && self.shares_data_with(other)
    }
}

/// Copy every aesthetic `target` leaves absent from `source`.
///
/// Slots `target` already fills are left untouched. Scales are shared, so a
/// copied slot compares equal to the source's.
pub fn merge_aes(source: &Layer, target: &mut Layer) {
    target.aes.fill_from(&source.aes);
}

/// Resolve data and aesthetic inheritance across `layers`.
///
/// Returns new layers in the same order. A layer without data takes the
/// nearest earlier layer's data; an absent aesthetic slot takes the nearest
/// earlier layer's value for that slot. Inputs are not modified.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if `layers` is empty or no layer
/// carries data.
pub fn sequence_layers(layers: &[Layer]) -> Result<Vec<Layer>> {
    if !layers.iter().any(|layer| layer.data.is_some()) {
        return Err(Error::Configuration(format!(
            "none of the {} layers carries data",
            layers.len()
        )));
    }

    let mut resolved: Vec<Layer> = Vec::with_capacity(layers.len());
    for (index, layer) in layers.iter().enumerate() {
        let mut next = layer.clone();
        if let Some(previous) = resolved.last() {
            if next.data.is_none() {
                next.data.clone_from(&previous.data);
            }
            merge_aes(previous, &mut next);
        }
        trace!(index, kind = next.kind.name(), has_data = next.data.is_some(), "resolved layer");
        resolved.push(next);
    }

    debug!(layers = resolved.len(), "sequenced layers");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::aes::{AesValue, Aesthetic};
    use crate::scale::{ScaleShape, ScaleSize};

    fn iris() -> Arc<DataFrame> {
        let df = DataFrame::new()
            .with_f32("SepalLength", &[5.1, 4.9, 7.0, 6.3])
            .and_then(|df| df.with_f32("SepalWidth", &[3.5, 3.0, 3.2, 3.3]))
            .and_then(|df| df.with_f32("PetalLength", &[1.4, 1.4, 4.7, 6.0]))
            .unwrap();
        Arc::new(df)
    }

    #[test]
    fn test_merge_aes() {
        let layer1 = Layer::default().aes(Aes::new().size(ScaleSize::new("test")).unwrap());
        let mut layer2 = Layer::default().aes(Aes::new().shape(ScaleShape::new("test")).unwrap());
        let shape_before = layer2.aes.get(Aesthetic::Shape).cloned();

        merge_aes(&layer1, &mut layer2);

        assert_eq!(layer2.aes.get(Aesthetic::Size), layer1.aes.get(Aesthetic::Size));
        assert_eq!(layer2.aes.get(Aesthetic::Shape).cloned(), shape_before);
        assert_eq!(layer2.aes.get(Aesthetic::Size).unwrap().as_scale().unwrap().name(), "size");
        for (aesthetic, value) in layer2.aes.iter() {
            if aesthetic != Aesthetic::Size && aesthetic != Aesthetic::Shape {
                assert!(value.is_none(), "{aesthetic} should stay absent");
            }
        }
    }

    #[test]
    fn test_sequence_layers() {
        let data = iris();
        let layer1 = Layer::from_data(Arc::clone(&data));
        let layer2 = Layer::point().aes(
            Aes::new()
                .x("SepalLength")
                .y("SepalWidth")
                .size(ScaleSize::new("PetalLength"))
                .unwrap(),
        );
        let layer3 = Layer::poly_fit(2);

        let result = sequence_layers(&[layer1.clone(), layer2.clone(), layer3]).unwrap();
        assert_eq!(result.len(), 3);

        let last = &result[2];
        assert_eq!(last.aes.get(Aesthetic::X), Some(&AesValue::from("SepalLength")));
        assert_eq!(last.aes.get(Aesthetic::Y), Some(&AesValue::from("SepalWidth")));
        assert_eq!(last.aes.get(Aesthetic::Size), layer2.aes.get(Aesthetic::Size));
        assert!(Arc::ptr_eq(last.data.as_ref().unwrap(), &data));
        assert!(matches!(last.kind, LayerKind::PolyFit { degree: 2, .. }));

        let single = sequence_layers(std::slice::from_ref(&layer1)).unwrap();
        assert_eq!(single, vec![layer1]);
    }

    #[test]
    fn test_sequence_layers_does_not_touch_inputs() {
        let layers = vec![Layer::from_data(iris()).aes(Aes::new().x("SepalLength")), Layer::point()];
        let resolved = sequence_layers(&layers).unwrap();
        assert!(resolved[1].aes.is_set(Aesthetic::X));
        assert!(!layers[1].aes.is_set(Aesthetic::X));
        assert!(layers[1].data.is_none());
    }

    #[test]
    fn test_later_data_replaces_current() {
        let first = iris();
        let second = Arc::new(DataFrame::from_xy(&[1.0], &[2.0]).unwrap());
        let layers = vec![
            Layer::from_data(Arc::clone(&first)),
            Layer::point().data(Arc::clone(&second)),
            Layer::point(),
        ];
        let resolved = sequence_layers(&layers).unwrap();
        assert!(Arc::ptr_eq(resolved[1].data.as_ref().unwrap(), &second));
        assert!(Arc::ptr_eq(resolved[2].data.as_ref().unwrap(), &second));
    }

    #[test]
    fn test_aesthetics_accumulate_transitively() {
        let layers = vec![
            Layer::from_data(iris()).aes(Aes::new().x("SepalLength")),
            Layer::point().aes(Aes::new().y("SepalWidth")),
            Layer::point().aes(Aes::new().x("PetalLength")),
            Layer::point(),
        ];
        let resolved = sequence_layers(&layers).unwrap();
        let last = &resolved[3];
        assert_eq!(last.aes.get(Aesthetic::X), Some(&AesValue::from("PetalLength")));
        assert_eq!(last.aes.get(Aesthetic::Y), Some(&AesValue::from("SepalWidth")));
        assert_eq!(resolved[1].aes.get(Aesthetic::X), Some(&AesValue::from("SepalLength")));
    }

    #[test]
    fn test_sequence_without_data_is_configuration_error() {
        let err = sequence_layers(&[Layer::point(), Layer::poly_fit(1)]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(matches!(sequence_layers(&[]), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_layer_equality_uses_data_identity() {
        let a = Layer::from_data(iris());
        let b = Layer::from_data(iris());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
