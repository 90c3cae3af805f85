//! Amortized capacity growth computation.

/// Computes the capacity to allocate for a requested minimum, over-allocating
/// so that repeated small appends reallocate O(log n) times instead of O(n).
///
/// The result is always at least `requested`. Arithmetic is overflow-checked
/// and saturates at `usize::MAX`; odd in-range results are rounded up to the
/// next even value.
pub(crate) fn grown_capacity(requested: usize) -> usize {
    let Some(grown) = requested.checked_add(usize::max(requested >> 1, 1)) else {
        return usize::MAX;
    };

    if grown == usize::MAX {
        return usize::MAX;
    }

    // The ceiling was peeled off above, so the even nudge cannot overflow.
    grown + (grown & 1)
}
