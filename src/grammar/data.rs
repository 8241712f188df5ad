//! Data abstraction for Grammar of Graphics.
//!
//! Provides a simple columnar data structure for visualization. Frames are
//! immutable once shared: layers hold them behind `Arc`, and faceting builds
//! new frames instead of editing existing ones.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use indexmap::IndexMap;
use trueno::Vector;

use crate::error::{Error, Result};

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Natural ordering: nulls first, then numbers by value, then text
    /// lexicographically.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DataValue::Null, DataValue::Null) => Ordering::Equal,
            (DataValue::Null, _) => Ordering::Less,
            (_, DataValue::Null) => Ordering::Greater,
            (DataValue::Number(a), DataValue::Number(b)) => a.total_cmp(b),
            (DataValue::Number(_), DataValue::Text(_)) => Ordering::Less,
            (DataValue::Text(_), DataValue::Number(_)) => Ordering::Greater,
            (DataValue::Text(a), DataValue::Text(b)) => a.cmp(b),
        }
    }

    /// Equality under [`DataValue::total_cmp`] (NaN matches NaN).
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }

    /// Process-stable hash of the value, used to seed per-value generators.
    #[must_use]
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        match self {
            DataValue::Number(n) => {
                0u8.hash(&mut hasher);
                n.to_bits().hash(&mut hasher);
            }
            DataValue::Text(s) => {
                1u8.hash(&mut hasher);
                s.hash(&mut hasher);
            }
            DataValue::Null => 2u8.hash(&mut hasher),
        }
        hasher.finish()
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Null => f.write_str("NA"),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Numbers (and missing values) only.
    Numeric,
    /// At least one text value.
    Categorical,
}

/// Identity of a frame's contents, used to key cached aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(u64);

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

impl DatasetId {
    fn fresh() -> Self {
        Self(NEXT_DATASET_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// A simple columnar data frame.
#[derive(Debug, Clone)]
pub struct DataFrame {
    id: DatasetId,
    /// Column data keyed by column name, in insertion order.
    columns: IndexMap<String, Vec<DataValue>>,
    /// Number of rows.
    n_rows: usize,
    /// Frame this one was split from by faceting.
    origin: Option<Arc<DataFrame>>,
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFrame {
    /// Create a new empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: DatasetId::fresh(),
            columns: IndexMap::new(),
            n_rows: 0,
            origin: None,
        }
    }

    /// Create from x and y arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays differ in length.
    pub fn from_xy(x: &[f32], y: &[f32]) -> Result<Self> {
        let mut df = Self::new();
        df.add_column_f32("x", x)?;
        df.add_column_f32("y", y)?;
        Ok(df)
    }

    /// Add a column of values.
    ///
    /// The first column fixes the row count; later columns must match it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn add_column(&mut self, name: &str, values: Vec<DataValue>) -> Result<()> {
        let replacing_only_column = self.columns.len() == 1 && self.columns.contains_key(name);
        if !self.columns.is_empty() && !replacing_only_column && values.len() != self.n_rows {
            return Err(Error::DataLengthMismatch {
                column: name.to_string(),
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        self.n_rows = values.len();
        self.columns.insert(name.to_string(), values);
        self.id = DatasetId::fresh();
        self.origin = None;
        Ok(())
    }

    /// Add a numeric column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) -> Result<()> {
        self.add_column(name, data.iter().map(|&v| DataValue::Number(v)).collect())
    }

    /// Add a text column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) -> Result<()> {
        self.add_column(name, data.iter().map(|&s| DataValue::Text(s.to_string())).collect())
    }

    /// Builder form of [`DataFrame::add_column_f32`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn with_f32(mut self, name: &str, data: &[f32]) -> Result<Self> {
        self.add_column_f32(name, data)?;
        Ok(self)
    }

    /// Builder form of [`DataFrame::add_column_str`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] on a length mismatch.
    pub fn with_str(mut self, name: &str, data: &[&str]) -> Result<Self> {
        self.add_column_str(name, data)?;
        Ok(self)
    }

    /// Identity of the current contents.
    #[must_use]
    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// Get a column as f32 values.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.columns.get(name).map(|col| col.iter().filter_map(DataValue::as_f32).collect())
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get a column, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown column.
    pub fn column(&self, name: &str) -> Result<&[DataValue]> {
        self.get(name)
            .ok_or_else(|| Error::Configuration(format!("column '{name}' not found in data")))
    }

    /// Value of `name` at `row`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown column or an out-of-range row.
    pub fn value(&self, name: &str, row: usize) -> Result<&DataValue> {
        let column = self.column(name)?;
        column.get(row).ok_or(Error::RowOutOfBounds { row, nrow: self.n_rows })
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get column names in insertion order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Semantic type of a column.
    #[must_use]
    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.get(name).map(|col| {
            if col.iter().any(|v| matches!(v, DataValue::Text(_))) {
                ColumnKind::Categorical
            } else {
                ColumnKind::Numeric
            }
        })
    }

    /// Distinct values of a column, sorted by [`DataValue::total_cmp`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown column.
    pub fn distinct(&self, name: &str) -> Result<Vec<DataValue>> {
        let mut values = self.column(name)?.to_vec();
        values.sort_by(DataValue::total_cmp);
        values.dedup_by(|a, b| a.same_as(b));
        Ok(values)
    }

    /// Numeric extent `(min, max)` of a column, ignoring missing values,
    /// NaN and infinities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the column holds text or no finite
    /// numbers, and [`Error::Configuration`] for an unknown column.
    pub fn min_max(&self, name: &str) -> Result<(f32, f32)> {
        let column = self.column(name)?;
        if self.column_kind(name) == Some(ColumnKind::Categorical) {
            return Err(Error::ScaleDomain(format!("column '{name}' is not numeric")));
        }

        let values: Vec<f32> =
            column.iter().filter_map(DataValue::as_f32).filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return Err(Error::ScaleDomain(format!("column '{name}' has no finite values")));
        }

        let vec = Vector::from_vec(values);
        let min = vec.min().unwrap_or(f32::NAN);
        let max = vec.max().unwrap_or(f32::NAN);
        if min.is_nan() || max.is_nan() {
            return Err(Error::ScaleDomain(format!("column '{name}' has no finite extent")));
        }
        Ok((min, max))
    }

    /// Rows at the given indices, as a new frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] for an index past the end.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&row) = indices.iter().find(|&&i| i >= self.n_rows) {
            return Err(Error::RowOutOfBounds { row, nrow: self.n_rows });
        }

        let columns = self
            .columns
            .iter()
            .map(|(name, col)| (name.clone(), indices.iter().map(|&i| col[i].clone()).collect()))
            .collect();

        Ok(Self {
            id: DatasetId::fresh(),
            columns,
            n_rows: indices.len(),
            origin: None,
        })
    }

    /// Rows for which `predicate(frame, row)` holds, as a new frame.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> Result<Self>
    where
        F: FnMut(&Self, usize) -> Result<bool>,
    {
        let mut keep = Vec::new();
        for row in 0..self.n_rows {
            if predicate(self, row)? {
                keep.push(row);
            }
        }
        self.take_rows(&keep)
    }

    /// Rows of `parent` for which `predicate(frame, row)` holds, as a panel
    /// of `parent`.
    ///
    /// Unlike [`DataFrame::filter`], the panel remembers the frame it was
    /// split from, so dataset-wide aggregates (extents, category levels)
    /// are taken over the whole of `parent` and every panel shares one
    /// mapping. Splitting a panel again keeps the outermost frame.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `predicate`.
    pub fn split_from<F>(parent: &Arc<Self>, predicate: F) -> Result<Self>
    where
        F: FnMut(&Self, usize) -> Result<bool>,
    {
        let mut panel = parent.filter(predicate)?;
        panel.origin = Some(parent.origin.clone().unwrap_or_else(|| Arc::clone(parent)));
        Ok(panel)
    }

    /// Frame that dataset-wide aggregates are computed over: the frame a
    /// panel was split from, otherwise `self`.
    #[must_use]
    pub fn origin(&self) -> &DataFrame {
        self.origin.as_deref().unwrap_or(self)
    }
}
