//! Coordinate axes and the Cartesian sweep grid.
//!
//! A `Grid` is an ordered list of named axes. Its points are the full
//! Cartesian product of the axis values, addressed by index tuples in
//! row-major order (last axis varies fastest). Enumeration is lazy and
//! restartable: `points()` is a pure function of the axis list.

use serde::{Deserialize, Serialize};

use crate::error::{LutError, LutResult};

/// One named, ordered sequence of parameter values to sweep.
///
/// Values are not required to be sorted; their order defines the index
/// position along the axis dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    pub values: Vec<f64>,
}

impl Axis {
    /// Create a new axis.
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Number of coordinate values along this axis.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the axis has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The Cartesian product of an ordered list of axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    axes: Vec<Axis>,
}

impl Grid {
    /// Create a grid from an ordered axis list.
    ///
    /// Fails if any label is duplicated, any axis is empty, or no axes
    /// are given. Validation happens here so that no solver invocation is
    /// ever attempted against a malformed grid.
    pub fn new(axes: Vec<Axis>) -> LutResult<Self> {
        if axes.is_empty() {
            return Err(LutError::EmptyGrid);
        }

        for (i, axis) in axes.iter().enumerate() {
            if axis.is_empty() {
                return Err(LutError::EmptyAxis(axis.label.clone()));
            }
            if axes[..i].iter().any(|a| a.label == axis.label) {
                return Err(LutError::DuplicateAxisLabel(axis.label.clone()));
            }
        }

        Ok(Self { axes })
    }

    /// The axes in declaration order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Axis labels in declaration order.
    pub fn labels(&self) -> Vec<String> {
        self.axes.iter().map(|a| a.label.clone()).collect()
    }

    /// Coordinate sequences in declaration order.
    pub fn coords(&self) -> Vec<Vec<f64>> {
        self.axes.iter().map(|a| a.values.clone()).collect()
    }

    /// Axis lengths in declaration order.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::len).collect()
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.axes.iter().map(Axis::len).product()
    }

    /// Check if the grid has zero points (never true after `new`).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat row-major offset of an index tuple.
    pub fn flat_index(&self, index: &[usize]) -> LutResult<usize> {
        if index.len() != self.axes.len()
            || index.iter().zip(&self.axes).any(|(&i, a)| i >= a.len())
        {
            return Err(LutError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape(),
            });
        }

        let mut flat = 0;
        for (&i, axis) in index.iter().zip(&self.axes) {
            flat = flat * axis.len() + i;
        }
        Ok(flat)
    }

    /// Lazily enumerate all grid points in row-major order.
    ///
    /// Each call starts a fresh enumeration; no state is shared between
    /// iterators.
    pub fn points(&self) -> GridPoints<'_> {
        GridPoints {
            grid: self,
            next: Some(vec![0; self.axes.len()]),
        }
    }
}

/// One concrete combination of axis values with its index tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    /// Index along each axis, in axis declaration order.
    pub index: Vec<usize>,
    /// (axis label, value) pairs, in axis declaration order.
    pub values: Vec<(String, f64)>,
}

/// Row-major iterator over the points of a grid.
pub struct GridPoints<'a> {
    grid: &'a Grid,
    next: Option<Vec<usize>>,
}

impl Iterator for GridPoints<'_> {
    type Item = GridPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next.take()?;

        let values = index
            .iter()
            .zip(self.grid.axes())
            .map(|(&i, axis)| (axis.label.clone(), axis.values[i]))
            .collect();
        let point = GridPoint {
            index: index.clone(),
            values,
        };

        // Advance the last axis first, carrying into earlier axes.
        let mut advanced = index;
        for dim in (0..advanced.len()).rev() {
            advanced[dim] += 1;
            if advanced[dim] < self.grid.axes()[dim].len() {
                self.next = Some(advanced);
                break;
            }
            advanced[dim] = 0;
        }

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_three() -> Grid {
        Grid::new(vec![
            Axis::new("a", vec![1.0, 2.0]),
            Axis::new("b", vec![10.0, 20.0, 30.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_len() {
        let grid = two_by_three();
        assert_eq!(grid.shape(), vec![2, 3]);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.labels(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let result = Grid::new(vec![
            Axis::new("a", vec![1.0]),
            Axis::new("a", vec![2.0]),
        ]);
        assert!(matches!(result, Err(LutError::DuplicateAxisLabel(ref l)) if l == "a"));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let result = Grid::new(vec![Axis::new("a", vec![])]);
        assert!(matches!(result, Err(LutError::EmptyAxis(_))));
    }

    #[test]
    fn test_points_row_major() {
        let grid = two_by_three();
        let indices: Vec<Vec<usize>> = grid.points().map(|p| p.index).collect();
        assert_eq!(
            indices,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_points_carry_values() {
        let grid = two_by_three();
        let last = grid.points().last().unwrap();
        assert_eq!(last.index, vec![1, 2]);
        assert_eq!(
            last.values,
            vec![("a".to_string(), 2.0), ("b".to_string(), 30.0)]
        );
    }

    #[test]
    fn test_points_restartable() {
        let grid = two_by_three();
        let first: Vec<_> = grid.points().map(|p| p.index).collect();
        let second: Vec<_> = grid.points().map(|p| p.index).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), grid.len());
    }

    #[test]
    fn test_flat_index() {
        let grid = two_by_three();
        assert_eq!(grid.flat_index(&[0, 0]).unwrap(), 0);
        assert_eq!(grid.flat_index(&[0, 2]).unwrap(), 2);
        assert_eq!(grid.flat_index(&[1, 0]).unwrap(), 3);
        assert_eq!(grid.flat_index(&[1, 2]).unwrap(), 5);
        assert!(grid.flat_index(&[2, 0]).is_err());
        assert!(grid.flat_index(&[0]).is_err());
    }
}
