//! Per-element passes that run on rayon when the `parallel` feature is on.
//!
//! Each closure writes only its own slot, so the serial and parallel paths
//! produce identical results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Overwrite `out[i]` with `f(i)` for every index.
pub(crate) fn fill_indexed<T, G>(out: &mut [T], f: G)
where
    T: Send,
    G: Fn(usize) -> T + Send + Sync,
{
    #[cfg(feature = "parallel")]
    out.par_iter_mut().enumerate().for_each(|(i, slot)| *slot = f(i));
    #[cfg(not(feature = "parallel"))]
    out.iter_mut().enumerate().for_each(|(i, slot)| *slot = f(i));
}

/// Call `f` on every `(a[i], b[i])` pair.
pub(crate) fn zip_for_each<A, B, G>(a: &mut [A], b: &[B], f: G)
where
    A: Send,
    B: Sync,
    G: Fn(&mut A, &B) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    a.par_iter_mut().zip(b.par_iter()).for_each(|(x, y)| f(x, y));
    #[cfg(not(feature = "parallel"))]
    a.iter_mut().zip(b.iter()).for_each(|(x, y)| f(x, y));
}
