//! Frame-level array transforms: circular shifts, flips, flat-field
//! correction and subsampling.

use ndarray::{s, Array2, ArrayBase, ArrayView2, Data, Ix2};

use crate::error::{Error, Result};
use crate::Frame;

/// Circularly shift `data` along axis 0 by `shift` rows.
///
/// Row `i` of the input lands on row `(i + shift) mod rows` of the output,
/// so negative shifts move rows upwards. Shifting by a multiple of the row
/// count returns the input unchanged.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn roll_rows<S, T>(data: &ArrayBase<S, Ix2>, shift: isize) -> Array2<T>
where
    S: Data<Elem = T>,
    T: Clone,
{
    let rows = data.nrows();
    let mut out = data.to_owned();
    if rows == 0 {
        return out;
    }

    let k = shift.rem_euclid(rows as isize) as usize;
    if k == 0 {
        return out;
    }
    out.slice_mut(s![k.., ..])
        .assign(&data.slice(s![..rows - k, ..]));
    out.slice_mut(s![..k, ..])
        .assign(&data.slice(s![rows - k.., ..]));
    out
}

/// Reverse the order of rows (up/down flip).
#[must_use]
pub fn flip_rows<S, T>(data: &ArrayBase<S, Ix2>) -> Array2<T>
where
    S: Data<Elem = T>,
    T: Clone,
{
    data.slice(s![..;-1, ..]).to_owned()
}

/// Divide a projection by its flat-field frame.
///
/// Zero-valued flat pixels produce infinities or NaN, as plain float
/// division does.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] when the two frames differ in shape.
pub fn flat_field(projection: ArrayView2<'_, f32>, flat: ArrayView2<'_, f32>) -> Result<Frame> {
    if projection.shape() != flat.shape() {
        return Err(Error::shape_mismatch(projection.shape(), flat.shape()));
    }
    Ok(&projection / &flat)
}

/// Keep every `step`-th sample along both axes (`[::step, ::step]`).
///
/// # Errors
/// Returns [`Error::InvalidStep`] for a zero step.
pub fn subsample2<S, T>(data: &ArrayBase<S, Ix2>, step: usize) -> Result<Array2<T>>
where
    S: Data<Elem = T>,
    T: Clone,
{
    let stride = checked_stride(step)?;
    Ok(data.slice(s![..;stride, ..;stride]).to_owned())
}

/// Keep every `step`-th item of `items`, starting with the first.
///
/// # Errors
/// Returns [`Error::InvalidStep`] for a zero step.
pub fn subsample_items<T: Clone>(items: &[T], step: usize) -> Result<Vec<T>> {
    if step == 0 {
        return Err(Error::InvalidStep(step));
    }
    Ok(items.iter().step_by(step).cloned().collect())
}

fn checked_stride(step: usize) -> Result<isize> {
    if step == 0 {
        return Err(Error::InvalidStep(step));
    }
    isize::try_from(step).map_err(|_| Error::InvalidStep(step))
}
