//! Aesthetic mappings for Grammar of Graphics.
//!
//! Maps data columns and scales to the six visual channels a layer can use.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::scale::{
    AesScale, PointShape, ScaleCategory, ScaleConstant, ScaleGradient, ScaleGradient2,
    ScaleRandomColour, ScaleShape, ScaleSize,
};

/// One of the six aesthetic slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aesthetic {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Marker size.
    Size,
    /// Colour.
    Colour,
    /// Marker shape.
    Shape,
    /// Transparency.
    Alpha,
}

impl Aesthetic {
    /// Every slot, in canonical order.
    pub const ALL: [Aesthetic; 6] = [
        Aesthetic::X,
        Aesthetic::Y,
        Aesthetic::Size,
        Aesthetic::Colour,
        Aesthetic::Shape,
        Aesthetic::Alpha,
    ];

    /// Key name of the slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Aesthetic::X => "x",
            Aesthetic::Y => "y",
            Aesthetic::Size => "size",
            Aesthetic::Colour => "colour",
            Aesthetic::Shape => "shape",
            Aesthetic::Alpha => "alpha",
        }
    }

    /// Scale category the slot requires; position slots take anything.
    #[must_use]
    pub const fn required_category(self) -> Option<ScaleCategory> {
        match self {
            Aesthetic::X | Aesthetic::Y => None,
            Aesthetic::Size | Aesthetic::Alpha => Some(ScaleCategory::Numeric),
            Aesthetic::Colour => Some(ScaleCategory::Colour),
            Aesthetic::Shape => Some(ScaleCategory::Marker),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aesthetic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" => Ok(Aesthetic::X),
            "y" => Ok(Aesthetic::Y),
            "size" => Ok(Aesthetic::Size),
            "colour" | "color" => Ok(Aesthetic::Colour),
            "shape" => Ok(Aesthetic::Shape),
            "alpha" => Ok(Aesthetic::Alpha),
            other => Err(Error::UnknownAesthetic(other.to_string())),
        }
    }
}

/// The value held by a filled aesthetic slot.
#[derive(Debug, Clone)]
pub enum AesValue {
    /// A column name.
    Column(String),
    /// A scale, shared between every layer the mapping is copied into.
    Scale(Arc<dyn AesScale>),
}

impl AesValue {
    /// Wrap a scale.
    #[must_use]
    pub fn scale<S: AesScale + 'static>(scale: S) -> Self {
        AesValue::Scale(Arc::new(scale))
    }

    /// Column name, if this is a column reference.
    #[must_use]
    pub fn as_column(&self) -> Option<&str> {
        match self {
            AesValue::Column(c) => Some(c),
            AesValue::Scale(_) => None,
        }
    }

    /// Scale, if this is a scale.
    #[must_use]
    pub fn as_scale(&self) -> Option<&Arc<dyn AesScale>> {
        match self {
            AesValue::Scale(s) => Some(s),
            AesValue::Column(_) => None,
        }
    }
}

/// Columns compare by name; scales by identity, so a value copied from one
/// mapping into another compares equal to its source.
impl PartialEq for AesValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AesValue::Column(a), AesValue::Column(b)) => a == b,
            (AesValue::Scale(a), AesValue::Scale(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for AesValue {
    fn from(s: &str) -> Self {
        AesValue::Column(s.to_string())
    }
}

impl From<String> for AesValue {
    fn from(s: String) -> Self {
        AesValue::Column(s)
    }
}

impl From<Arc<dyn AesScale>> for AesValue {
    fn from(scale: Arc<dyn AesScale>) -> Self {
        AesValue::Scale(scale)
    }
}

impl From<f32> for AesValue {
    fn from(v: f32) -> Self {
        AesValue::scale(ScaleConstant::new(v))
    }
}

impl From<Rgb> for AesValue {
    fn from(c: Rgb) -> Self {
        AesValue::scale(ScaleConstant::new(c))
    }
}

impl From<PointShape> for AesValue {
    fn from(m: PointShape) -> Self {
        AesValue::scale(ScaleConstant::new(m))
    }
}

macro_rules! scale_into_aes_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AesValue {
                fn from(scale: $ty) -> Self {
                    AesValue::scale(scale)
                }
            }
        )*
    };
}

scale_into_aes_value!(
    ScaleConstant,
    ScaleSize,
    ScaleShape,
    ScaleGradient,
    ScaleGradient2,
    ScaleRandomColour,
);

/// Aesthetic mapping specification.
///
/// Always holds exactly the six slots of [`Aesthetic::ALL`]; each is absent
/// or filled. Filled `size`, `colour`, `shape` and `alpha` slots are
/// guaranteed to hold a scale whose category fits the slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aes {
    slots: [Option<AesValue>; 6],
}

impl Aes {
    /// Create a mapping with every slot absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a slot, validating it.
    ///
    /// A plain column name given to `size`, `colour`, `shape` or `alpha` is
    /// taken as a constant value rather than a column reference; map those
    /// slots to columns through a scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAestheticKind`] when a scale's category does not
    /// fit the slot.
    pub fn set(mut self, aesthetic: Aesthetic, value: impl Into<AesValue>) -> Result<Self> {
        let value = validate(aesthetic, value.into())?;
        self.slots[aesthetic.index()] = Some(value);
        Ok(self)
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.slots[Aesthetic::X.index()] = Some(AesValue::from(column));
        self
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(mut self, column: &str) -> Self {
        self.slots[Aesthetic::Y.index()] = Some(AesValue::from(column));
        self
    }

    /// Map size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAestheticKind`] for a non-numeric scale.
    pub fn size(self, value: impl Into<AesValue>) -> Result<Self> {
        self.set(Aesthetic::Size, value)
    }

    /// Map colour.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAestheticKind`] for a non-colour scale.
    pub fn colour(self, value: impl Into<AesValue>) -> Result<Self> {
        self.set(Aesthetic::Colour, value)
    }

    /// Map shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAestheticKind`] for a non-marker scale.
    pub fn shape(self, value: impl Into<AesValue>) -> Result<Self> {
        self.set(Aesthetic::Shape, value)
    }

    /// Map alpha/opacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAestheticKind`] for a non-numeric scale.
    pub fn alpha(self, value: impl Into<AesValue>) -> Result<Self> {
        self.set(Aesthetic::Alpha, value)
    }

    /// Value in a slot.
    #[must_use]
    pub fn get(&self, aesthetic: Aesthetic) -> Option<&AesValue> {
        self.slots[aesthetic.index()].as_ref()
    }

    /// True when the slot is filled.
    #[must_use]
    pub fn is_set(&self, aesthetic: Aesthetic) -> bool {
        self.get(aesthetic).is_some()
    }

    /// Empty a slot.
    pub fn clear(&mut self, aesthetic: Aesthetic) {
        self.slots[aesthetic.index()] = None;
    }

    /// Key names of every slot, filled or not.
    #[must_use]
    pub fn keys(&self) -> [&'static str; 6] {
        Aesthetic::ALL.map(Aesthetic::name)
    }

    /// Every slot with its value, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Aesthetic, Option<&AesValue>)> {
        Aesthetic::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    /// Fill every absent slot from `source`, leaving filled slots alone.
    pub fn fill_from(&mut self, source: &Aes) {
        for (slot, inherited) in self.slots.iter_mut().zip(&source.slots) {
            if slot.is_none() {
                slot.clone_from(inherited);
            }
        }
    }

    /// Value form of [`Aes::fill_from`]: `self` wins, `source` fills gaps.
    #[must_use]
    pub fn merged_over(&self, source: &Aes) -> Aes {
        let mut merged = self.clone();
        merged.fill_from(source);
        merged
    }
}

fn validate(aesthetic: Aesthetic, value: AesValue) -> Result<AesValue> {
    let Some(expected) = aesthetic.required_category() else {
        return Ok(value);
    };

    match value {
        AesValue::Column(text) => Ok(AesValue::scale(ScaleConstant::new(text))),
        AesValue::Scale(scale) => {
            let found = scale.category();
            if found.satisfies(expected) {
                Ok(AesValue::Scale(scale))
            } else {
                Err(Error::InvalidAestheticKind { aesthetic, expected, found })
            }
        }
    }
}

/// Build a mapping from `(key, value)` overrides.
///
/// All six slots start absent; each override is validated as by
/// [`Aes::set`].
///
/// # Errors
///
/// Returns [`Error::UnknownAesthetic`] for a key outside the six slots and
/// [`Error::InvalidAestheticKind`] for a scale that does not fit its slot.
pub fn make_aes<I, K, V>(overrides: I) -> Result<Aes>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<AesValue>,
{
    overrides.into_iter().try_fold(Aes::new(), |aes, (key, value)| {
        let aesthetic: Aesthetic = key.as_ref().parse()?;
        aes.set(aesthetic, value)
    })
}

/// Union of two dictionaries; on a shared key the value from `b` wins.
#[must_use]
pub fn dictionary_union<K, V>(a: &IndexMap<K, V>, b: &IndexMap<K, V>) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    let mut union = a.clone();
    union.extend(b.iter().map(|(k, v)| (k.clone(), v.clone())));
    union
}
