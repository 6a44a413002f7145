//! Configurable float widths for coordinate and scalar columns.
//!
//! Precision reduction is an intentional, lossy step: callers needing exact values
//! select a wider type. Quantization is a projection, so re-encoding an already
//! quantized value at the same precision is a fixed point.

use crate::model::Point;
use half::f16;
use serde::{Deserialize, Serialize};

/// Storage width for a float column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FloatPrecision {
    Half,
    #[default]
    Single,
    Double,
}

impl FloatPrecision {
    /// Rounds a value to the nearest representable number at this width.
    pub fn quantize(&self, value: f64) -> f64 {
        match self {
            FloatPrecision::Half => f64::from(f16::from_f64(value)),
            FloatPrecision::Single => value as f32 as f64,
            FloatPrecision::Double => value,
        }
    }
}

/// Per-atom N×3 coordinate column at a fixed precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoordColumn {
    Half(Vec<[f16; 3]>),
    Single(Vec<[f32; 3]>),
    Double(Vec<[f64; 3]>),
}

impl CoordColumn {
    pub fn from_points(points: &[Point], precision: FloatPrecision) -> Self {
        match precision {
            FloatPrecision::Half => CoordColumn::Half(
                points
                    .iter()
                    .map(|p| [f16::from_f64(p.x), f16::from_f64(p.y), f16::from_f64(p.z)])
                    .collect(),
            ),
            FloatPrecision::Single => CoordColumn::Single(
                points
                    .iter()
                    .map(|p| [p.x as f32, p.y as f32, p.z as f32])
                    .collect(),
            ),
            FloatPrecision::Double => {
                CoordColumn::Double(points.iter().map(|p| [p.x, p.y, p.z]).collect())
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CoordColumn::Half(rows) => rows.len(),
            CoordColumn::Single(rows) => rows.len(),
            CoordColumn::Double(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn precision(&self) -> FloatPrecision {
        match self {
            CoordColumn::Half(_) => FloatPrecision::Half,
            CoordColumn::Single(_) => FloatPrecision::Single,
            CoordColumn::Double(_) => FloatPrecision::Double,
        }
    }

    /// Widens the stored row at `index` back to an f64 point.
    pub fn point(&self, index: usize) -> Option<Point> {
        match self {
            CoordColumn::Half(rows) => rows.get(index).map(|[x, y, z]| {
                Point::new(f64::from(*x), f64::from(*y), f64::from(*z))
            }),
            CoordColumn::Single(rows) => rows
                .get(index)
                .map(|[x, y, z]| Point::new(f64::from(*x), f64::from(*y), f64::from(*z))),
            CoordColumn::Double(rows) => {
                rows.get(index).map(|[x, y, z]| Point::new(*x, *y, *z))
            }
        }
    }
}

/// Per-atom or per-residue scalar column at a fixed precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarColumn {
    Half(Vec<f16>),
    Single(Vec<f32>),
    Double(Vec<f64>),
}

impl ScalarColumn {
    pub fn from_values(values: &[f64], precision: FloatPrecision) -> Self {
        match precision {
            FloatPrecision::Half => {
                ScalarColumn::Half(values.iter().map(|&v| f16::from_f64(v)).collect())
            }
            FloatPrecision::Single => {
                ScalarColumn::Single(values.iter().map(|&v| v as f32).collect())
            }
            FloatPrecision::Double => ScalarColumn::Double(values.to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScalarColumn::Half(values) => values.len(),
            ScalarColumn::Single(values) => values.len(),
            ScalarColumn::Double(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            ScalarColumn::Half(values) => values.iter().map(|&v| f64::from(v)).collect(),
            ScalarColumn::Single(values) => values.iter().map(|&v| f64::from(v)).collect(),
            ScalarColumn::Double(values) => values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_is_identity_at_double_precision() {
        let value = 1.234_567_890_123_456;
        assert_eq!(FloatPrecision::Double.quantize(value), value);
    }

    #[test]
    fn quantize_is_a_fixed_point_at_every_precision() {
        let value = 12.3456789;
        for precision in [
            FloatPrecision::Half,
            FloatPrecision::Single,
            FloatPrecision::Double,
        ] {
            let once = precision.quantize(value);
            assert_eq!(precision.quantize(once), once);
        }
    }

    #[test]
    fn coord_column_round_trips_points_at_configured_width() {
        let points = vec![Point::new(1.25, -2.5, 3.75)];
        let column = CoordColumn::from_points(&points, FloatPrecision::Half);

        // Values exactly representable in f16 survive unchanged.
        assert_eq!(column.point(0), Some(Point::new(1.25, -2.5, 3.75)));
        assert_eq!(column.precision(), FloatPrecision::Half);
        assert_eq!(column.point(1), None);
    }

    #[test]
    fn scalar_column_preserves_length_and_widens_back() {
        let values = [0.5, 1.0, 99.0];
        let column = ScalarColumn::from_values(&values, FloatPrecision::Single);

        assert_eq!(column.len(), 3);
        assert_eq!(column.to_f64_vec(), vec![0.5, 1.0, 99.0]);
    }
}
