//! Half-scan overlap alignment.
//!
//! Two 180° scans of the same sample are mirror images of each other. The
//! [`OverlapPair`] holds the first image and the mirrored second image and
//! produces the difference between them for a candidate row offset; the
//! offset where the difference vanishes is the alignment.

use ndarray::{ArrayBase, Data, Ix2};

use crate::array::{flip_rows, roll_rows};
use crate::error::{Error, Result};
use crate::stats::remove_extrema;
use crate::Frame;

/// A prepared image pair for overlap alignment.
#[derive(Debug, Clone)]
pub struct OverlapPair {
    first: Frame,
    second: Frame,
}

impl OverlapPair {
    /// Prepare a pair from two raw images.
    ///
    /// Both images are transposed and clipped to their 1st..99th percentile
    /// range; the second is flipped along its rows after transposition.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInput`] if either image is empty.
    pub fn new<S1, S2>(first: &ArrayBase<S1, Ix2>, second: &ArrayBase<S2, Ix2>) -> Result<Self>
    where
        S1: Data<Elem = f32>,
        S2: Data<Elem = f32>,
    {
        let first = remove_extrema(first.t().to_owned())?;
        let second = remove_extrema(flip_rows(&second.t()))?;
        Ok(Self { first, second })
    }

    /// The prepared first image.
    #[must_use]
    pub fn first(&self) -> &Frame {
        &self.first
    }

    /// The prepared (flipped) second image.
    #[must_use]
    pub fn second(&self) -> &Frame {
        &self.second
    }

    /// Whether both prepared images have the same shape.
    #[must_use]
    pub fn shape_matches(&self) -> bool {
        self.first.shape() == self.second.shape()
    }

    /// Number of rows of the first image; the upper end of the position range.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.first.nrows()
    }

    /// Position at which the second image is not shifted at all.
    #[must_use]
    pub fn centre(&self) -> usize {
        self.rows() / 2
    }

    /// Row shift applied to the second image at `position`.
    ///
    /// Half the row count is computed with integer division.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn shift_for(&self, position: usize) -> isize {
        (self.second.nrows() / 2) as isize - position as isize
    }

    /// Difference `roll(second, shift_for(position)) - first`.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if the two prepared images differ in
    /// shape.
    pub fn difference(&self, position: usize) -> Result<Frame> {
        if !self.shape_matches() {
            return Err(Error::shape_mismatch(
                self.first.shape(),
                self.second.shape(),
            ));
        }
        let moved = roll_rows(&self.second, self.shift_for(position));
        Ok(moved - &self.first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_new_transposes_and_flips() {
        let first = arr2(&[[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let second = arr2(&[[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let pair = OverlapPair::new(&first, &second).unwrap();

        assert_eq!(pair.first().shape(), &[3, 2]);
        // Transposed: [[1,4],[2,5],[3,6]]; flipped: [[3,6],[2,5],[1,4]]
        let expected_second = arr2(&[[3.0_f32, 6.0], [2.0, 5.0], [1.0, 4.0]]);
        let clipped_center = pair.second()[[1, 0]];
        assert!((clipped_center - expected_second[[1, 0]]).abs() < f32::EPSILON);
    }

    #[test]
    fn test_centre_and_shift_truncate() {
        let img = Array2::<f32>::zeros((4, 7));
        let pair = OverlapPair::new(&img, &img).unwrap();
        // 7 rows after transpose.
        assert_eq!(pair.rows(), 7);
        assert_eq!(pair.centre(), 3);
        assert_eq!(pair.shift_for(3), 0);
        assert_eq!(pair.shift_for(0), 3);
        assert_eq!(pair.shift_for(7), -4);
    }

    #[test]
    fn test_mirrored_pair_aligns_at_centre() {
        let first = Array2::from_shape_fn((6, 8), |(r, c)| (r * 8 + c) as f32);
        // Mirroring the columns of the raw image becomes a row flip after transposition.
        let second = Array2::from_shape_fn((6, 8), |(r, c)| first[[r, 7 - c]]);
        let pair = OverlapPair::new(&first, &second).unwrap();

        let diff = pair.difference(pair.centre()).unwrap();
        assert!(diff.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn test_difference_shape_mismatch() {
        let first = Array2::<f32>::zeros((4, 4));
        let second = Array2::<f32>::zeros((4, 5));
        let pair = OverlapPair::new(&first, &second).unwrap();
        assert!(!pair.shape_matches());
        assert!(matches!(
            pair.difference(0),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
