//! Constant scale.

use crate::error::Result;
use crate::grammar::DataFrame;

use super::{AesScale, ScaleCategory, ScaleValue};

/// Returns the same value for every row.
///
/// Ignores both the dataset and the row index, so it is valid for an empty
/// frame and any index. Its category follows the value: numbers drive
/// size/alpha, colours drive colour, markers drive shape, and free text is
/// accepted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConstant {
    value: ScaleValue,
}

impl ScaleConstant {
    /// Create a constant scale.
    #[must_use]
    pub fn new(value: impl Into<ScaleValue>) -> Self {
        Self { value: value.into() }
    }

    /// The constant.
    #[must_use]
    pub fn value(&self) -> &ScaleValue {
        &self.value
    }
}

impl AesScale for ScaleConstant {
    fn category(&self) -> ScaleCategory {
        self.value.category()
    }

    fn name(&self) -> &'static str {
        "constant"
    }

    fn apply(&self, _data: &DataFrame, _row: usize) -> Result<ScaleValue> {
        Ok(self.value.clone())
    }
}
