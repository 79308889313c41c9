//! Reshaping helpers for sparse voxel tensors.
//!
//! Sparse convolution libraries take a batch as one `(N, 4)` coordinate
//! array whose last column is the example index, plus an `(N, C)` feature
//! array. These helpers undo the batching and scatter signed-distance
//! samples into dense grids.

use ndarray::{Array2, Array3, Array4, ArrayView1, ArrayView2, Axis, s};
use thiserror::Error;

/// Fill value for voxels with no sample.
pub const DEFAULT_FILL: f32 = f32::INFINITY;

/// Shape and range errors for sparse inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SparseError {
    #[error("Expected coordinates with {expected} columns, got {actual}")]
    CoordinateColumns { expected: usize, actual: usize },

    #[error("Row count mismatch: {coords} coordinates but {values} values")]
    RowMismatch { coords: usize, values: usize },

    #[error("Negative example index {index} at row {row}")]
    NegativeExampleIndex { row: usize, index: i64 },

    #[error("Grid {dims:?} is too large")]
    GridTooLarge { dims: [usize; 3] },

    #[error("Coordinate {coord:?} at row {row} is outside grid {dims:?}")]
    OutOfBounds {
        row: usize,
        coord: [i64; 3],
        dims: [usize; 3],
    },
}

/// Coordinates `(M, 3)` and features `(M, C)` of one example.
pub type ExampleTensors = (Array2<i64>, Array2<f32>);

/// Split a batched `(coords, features)` pair into one pair per example.
///
/// Column 3 of `coords` is the example index; the result has `max + 1`
/// entries in index order, each holding the first three coordinate
/// columns and the matching feature rows. Indices with no rows give empty
/// arrays. An empty batch gives an empty vector.
pub fn split_coords_features(
    coords: ArrayView2<'_, i64>,
    features: ArrayView2<'_, f32>,
) -> Result<Vec<ExampleTensors>, SparseError> {
    if coords.ncols() != 4 {
        return Err(SparseError::CoordinateColumns {
            expected: 4,
            actual: coords.ncols(),
        });
    }
    if coords.nrows() != features.nrows() {
        return Err(SparseError::RowMismatch {
            coords: coords.nrows(),
            values: features.nrows(),
        });
    }

    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for (row, &index) in coords.column(3).iter().enumerate() {
        let slot =
            usize::try_from(index).map_err(|_| SparseError::NegativeExampleIndex { row, index })?;
        if slot >= buckets.len() {
            buckets.resize_with(slot + 1, Vec::new);
        }
        buckets[slot].push(row);
    }

    Ok(buckets
        .iter()
        .map(|rows| {
            let example_coords = coords.select(Axis(0), rows).slice(s![.., ..3]).to_owned();
            let example_features = features.select(Axis(0), rows);
            (example_coords, example_features)
        })
        .collect())
}

/// Scatter `-sdf` values into a `(1, d0, d1, d2)` grid filled with `fill`.
///
/// Note the sign: voxel `coords[i]` receives `-sdf[i]`.
pub fn sparse_to_dense(
    coords: ArrayView2<'_, i64>,
    sdf: ArrayView1<'_, f32>,
    dims: [usize; 3],
    fill: f32,
) -> Result<Array4<f32>, SparseError> {
    if coords.ncols() != 3 {
        return Err(SparseError::CoordinateColumns {
            expected: 3,
            actual: coords.ncols(),
        });
    }
    if coords.nrows() != sdf.len() {
        return Err(SparseError::RowMismatch {
            coords: coords.nrows(),
            values: sdf.len(),
        });
    }

    let too_large = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .is_none_or(|cells| isize::try_from(cells).is_err());
    if too_large {
        return Err(SparseError::GridTooLarge { dims });
    }

    let mut grid = Array3::from_elem((dims[0], dims[1], dims[2]), fill);
    for (row, (coord, &value)) in coords.outer_iter().zip(sdf.iter()).enumerate() {
        let raw = [coord[0], coord[1], coord[2]];
        let index = voxel_index(raw, dims).ok_or_else(|| SparseError::OutOfBounds {
            row,
            coord: raw,
            dims,
        })?;
        grid[index] = -value;
    }

    Ok(grid.insert_axis(Axis(0)))
}

fn voxel_index(coord: [i64; 3], dims: [usize; 3]) -> Option<[usize; 3]> {
    let mut index = [0usize; 3];
    for axis in 0..3 {
        let value = usize::try_from(coord[axis]).ok()?;
        if value >= dims[axis] {
            return None;
        }
        index[axis] = value;
    }
    Some(index)
}
