//! Row-parallel execution.
//!
//! Every operation in this crate writes its output one row at a time from
//! read-only inputs. With the `parallel` feature the rows are distributed
//! over the rayon thread pool; without it they run in order on the calling
//! thread. Results are identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized row of `dst`.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(dst: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Calls `f(y, row)` for every `row_len`-sized row of `dst` (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(dst: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
