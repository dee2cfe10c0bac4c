use ndarray::{Array2, ArrayView2, ArrayViewD, Axis, Ix2, Zip};
use num_traits::Zero;

use crate::errors::{RastermatchError, Result};

/// Drops leading length-1 axes until the view is 2d.
fn squeeze<T>(view: ArrayViewD<'_, T>) -> Option<ArrayView2<'_, T>> {
    let mut view = view;
    while view.ndim() > 2 && view.shape()[0] == 1 {
        view = view.index_axis_move(Axis(0), 0);
    }
    view.into_dimensionality::<Ix2>().ok()
}

/// Zeroes `to_clean` wherever `reference` is zero.
///
/// Both inputs are squeezed to 2d first; they must then share a shape.
/// Returns a fresh array, positions where the reference is non-zero
/// keep the value of `to_clean`. The comparison is exact equality
/// against `T::zero()`, no tolerance.
pub fn clean<T>(reference: ArrayViewD<'_, T>, to_clean: ArrayViewD<'_, T>) -> Result<Array2<T>>
where
    T: Zero + PartialEq + Copy,
{
    let reference_shape: Box<[usize]> = reference.shape().into();
    let to_clean_shape: Box<[usize]> = to_clean.shape().into();
    let (Some(reference), Some(to_clean)) = (squeeze(reference), squeeze(to_clean)) else {
        return Err(RastermatchError::ShapeMismatch(
            reference_shape,
            to_clean_shape,
        ));
    };
    if reference.dim() != to_clean.dim() {
        return Err(RastermatchError::ShapeMismatch(
            reference_shape,
            to_clean_shape,
        ));
    }

    let mut cleaned = to_clean.to_owned();
    Zip::from(&mut cleaned).and(&reference).for_each(|out, r| {
        if *r == T::zero() {
            *out = T::zero();
        }
    });
    Ok(cleaned)
}
