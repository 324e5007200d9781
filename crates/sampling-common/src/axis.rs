//! Coordinate axes for gridded remote-sensing data.
//!
//! An [`Axis`] holds the coordinate of every cell center along one spatial
//! dimension. Orthorectified EMIT and ECOSTRESS scenes store latitude from
//! north to south, so both ascending and descending axes are supported.

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// Direction in which coordinate values change along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    Ascending,
    Descending,
}

/// Strictly monotonic cell-center coordinates along one dimension.
///
/// Deserialization goes through [`Axis::new`], so serialized axes are
/// validated and their order is recomputed from the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AxisRepr", into = "AxisRepr")]
pub struct Axis {
    name: String,
    values: Vec<f64>,
    order: AxisOrder,
}

/// Serialized form of an [`Axis`].
#[derive(Serialize, Deserialize)]
struct AxisRepr {
    name: String,
    values: Vec<f64>,
}

impl TryFrom<AxisRepr> for Axis {
    type Error = CommonError;

    fn try_from(repr: AxisRepr) -> CommonResult<Self> {
        Axis::new(repr.name, repr.values)
    }
}

impl From<Axis> for AxisRepr {
    fn from(axis: Axis) -> Self {
        Self {
            name: axis.name,
            values: axis.values,
        }
    }
}

impl Axis {
    /// Build an axis from explicit coordinate values.
    ///
    /// Values must be finite and strictly increasing or strictly decreasing.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> CommonResult<Self> {
        let name = name.into();

        if values.is_empty() {
            return Err(CommonError::invalid_axis(name, "axis has no coordinates"));
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(CommonError::invalid_axis(
                name,
                format!("non-finite coordinate {}", bad),
            ));
        }

        let order = if values.len() < 2 || values[1] > values[0] {
            AxisOrder::Ascending
        } else {
            AxisOrder::Descending
        };

        let monotonic = values.windows(2).all(|w| match order {
            AxisOrder::Ascending => w[1] > w[0],
            AxisOrder::Descending => w[1] < w[0],
        });
        if !monotonic {
            return Err(CommonError::invalid_axis(
                name,
                "coordinates must be strictly monotonic",
            ));
        }

        Ok(Self {
            name,
            values,
            order,
        })
    }

    /// Build a regularly spaced axis: `first + i * step` for `i in 0..len`.
    ///
    /// A negative step gives a descending axis (north-up latitude rows).
    pub fn regular(name: impl Into<String>, first: f64, step: f64, len: usize) -> CommonResult<Self> {
        let name = name.into();
        if step == 0.0 || !step.is_finite() {
            return Err(CommonError::invalid_axis(name, "step must be finite and non-zero"));
        }
        let values = (0..len).map(|i| first + i as f64 * step).collect();
        Self::new(name, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn order(&self) -> AxisOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coordinate at a cell index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Smallest and largest coordinate on the axis.
    pub fn extent(&self) -> (f64, f64) {
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        (first.min(last), first.max(last))
    }

    /// Index of the cell whose coordinate is nearest to `value`.
    ///
    /// Values beyond either end resolve to the edge cell. Equidistant ties
    /// resolve to the larger coordinate value. NaN resolves to index 0.
    pub fn nearest_index(&self, value: f64) -> usize {
        let n = self.values.len();
        if n == 1 || value.is_nan() {
            return 0;
        }

        match self.order {
            AxisOrder::Ascending => {
                let i = self.values.partition_point(|&c| c < value);
                if i == 0 {
                    return 0;
                }
                if i == n {
                    return n - 1;
                }
                let below = value - self.values[i - 1];
                let above = self.values[i] - value;
                if above <= below {
                    i
                } else {
                    i - 1
                }
            }
            AxisOrder::Descending => {
                let i = self.values.partition_point(|&c| c > value);
                if i == 0 {
                    return 0;
                }
                if i == n {
                    return n - 1;
                }
                let above = self.values[i - 1] - value;
                let below = value - self.values[i];
                if above <= below {
                    i - 1
                } else {
                    i
                }
            }
        }
    }
}
