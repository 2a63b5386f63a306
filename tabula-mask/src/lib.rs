//! Row masks: which rows of one table slice an identifier selection keeps.
//!
//! A [`Mask`] covers the positions `[0, len)` of a slice. Position `i` is selected when the
//! identifier `offset + i` is. Masks are stored as their maximal runs of selected positions,
//! the form selection consumes; the position list is derived on demand.
#![deny(missing_docs)]
mod eq;

use std::sync::{Arc, OnceLock};

use itertools::Itertools;
use tabula_error::tabula_panic;

/// The outcome of asking a mask for one of its representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllOr<T> {
    /// Every position is selected.
    All,
    /// No position is selected.
    None,
    /// Some positions are selected, described by the payload.
    Some(T),
}

impl<T> AllOr<T> {
    /// Transform the payload of the `Some` variant.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AllOr<U> {
        match self {
            Self::All => AllOr::All,
            Self::None => AllOr::None,
            Self::Some(payload) => AllOr::Some(f(payload)),
        }
    }

    /// The payload, or the result of `all` / `none` for the constant variants.
    pub fn unwrap_or_else<F, G>(self, all: F, none: G) -> T
    where
        F: FnOnce() -> T,
        G: FnOnce() -> T,
    {
        match self {
            Self::All => all(),
            Self::None => none(),
            Self::Some(payload) => payload,
        }
    }
}

/// A set of selected positions within `[0, len)`.
///
/// Constant masks carry only their length. Mixed masks share their runs behind an [`Arc`], so
/// cloning a mask is cheap.
#[derive(Clone, Debug)]
pub enum Mask {
    /// Every position is selected.
    AllTrue(usize),
    /// No position is selected.
    AllFalse(usize),
    /// At least one position is selected and at least one is not.
    Runs(Arc<MaskRuns>),
}

/// The contents of a mixed [`Mask`].
#[derive(Debug)]
pub struct MaskRuns {
    len: usize,
    // Sorted, non-empty, and separated by at least one unselected position.
    runs: Vec<(usize, usize)>,
    true_count: usize,
    positions: OnceLock<Vec<usize>>,
}

impl MaskRuns {
    /// The number of positions covered, selected or not.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of selected positions.
    pub fn true_count(&self) -> usize {
        self.true_count
    }

    /// The maximal runs `[start, end)` of selected positions, in increasing order.
    pub fn runs(&self) -> &[(usize, usize)] {
        &self.runs
    }

    /// The selected positions, in increasing order.
    pub fn positions(&self) -> &[usize] {
        self.positions.get_or_init(|| {
            self.runs
                .iter()
                .flat_map(|&(start, end)| start..end)
                .collect()
        })
    }
}

impl Mask {
    /// A mask selecting all `len` positions.
    pub fn new_true(len: usize) -> Self {
        Self::AllTrue(len)
    }

    /// A mask selecting none of `len` positions.
    pub fn new_false(len: usize) -> Self {
        Self::AllFalse(len)
    }

    /// Build a mask from strictly increasing positions below `len`.
    ///
    /// Consecutive positions are coalesced into runs as they arrive.
    ///
    /// ## Panics
    ///
    /// Panics if the positions are not strictly increasing or reach `len`.
    pub fn from_positions<I: IntoIterator<Item = usize>>(len: usize, positions: I) -> Self {
        let mut runs = Vec::new();
        let mut current: Option<(usize, usize)> = None;
        for position in positions {
            if position >= len {
                tabula_panic!(OutOfBounds: position, 0, len);
            }
            current = match current {
                Some((start, end)) if end == position => Some((start, end + 1)),
                Some((_, end)) if end > position => tabula_panic!(
                    "mask positions must be strictly increasing, got {position} after {}",
                    end - 1
                ),
                Some(run) => {
                    runs.push(run);
                    Some((position, position + 1))
                }
                None => Some((position, position + 1)),
            };
        }
        runs.extend(current);
        Self::from_maximal_runs(len, runs)
    }

    /// Build a mask from sorted, non-overlapping runs `[start, end)` below `len`.
    ///
    /// Touching runs are merged, so the stored runs are maximal.
    ///
    /// ## Panics
    ///
    /// Panics if a run is empty, exceeds `len`, or does not start after the previous one ends.
    pub fn from_runs(len: usize, runs: Vec<(usize, usize)>) -> Self {
        for &(start, end) in &runs {
            assert!(
                start < end && end <= len,
                "mask run {start}..{end} is invalid for length {len}"
            );
        }
        for (previous, next) in runs.iter().tuple_windows() {
            assert!(
                previous.1 <= next.0,
                "mask runs must be sorted and disjoint, got {}..{} before {}..{}",
                previous.0,
                previous.1,
                next.0,
                next.1
            );
        }
        let merged = runs
            .into_iter()
            .coalesce(|previous, next| {
                if previous.1 == next.0 {
                    Ok((previous.0, next.1))
                } else {
                    Err((previous, next))
                }
            })
            .collect();
        Self::from_maximal_runs(len, merged)
    }

    fn from_maximal_runs(len: usize, runs: Vec<(usize, usize)>) -> Self {
        let true_count = runs.iter().map(|(start, end)| end - start).sum();
        if true_count == 0 {
            return Self::AllFalse(len);
        }
        if true_count == len {
            return Self::AllTrue(len);
        }
        Self::Runs(Arc::new(MaskRuns {
            len,
            runs,
            true_count,
            positions: OnceLock::new(),
        }))
    }

    /// The number of positions covered, selected or not.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Self::AllTrue(len) | Self::AllFalse(len) => *len,
            Self::Runs(runs) => runs.len,
        }
    }

    /// The number of selected positions.
    pub fn true_count(&self) -> usize {
        match self {
            Self::AllTrue(len) => *len,
            Self::AllFalse(_) => 0,
            Self::Runs(runs) => runs.true_count,
        }
    }

    /// Returns true if every position is selected.
    pub fn all_true(&self) -> bool {
        self.true_count() == self.len()
    }

    /// Returns true if no position is selected.
    pub fn all_false(&self) -> bool {
        self.true_count() == 0
    }

    /// The maximal runs of selected positions.
    pub fn runs(&self) -> AllOr<&[(usize, usize)]> {
        self.values().map(MaskRuns::runs)
    }

    /// The selected positions.
    pub fn positions(&self) -> AllOr<&[usize]> {
        self.values().map(MaskRuns::positions)
    }

    /// The contents of a mixed mask, classified against the constant cases.
    pub fn values(&self) -> AllOr<&MaskRuns> {
        match self {
            Self::AllTrue(_) => AllOr::All,
            Self::AllFalse(_) => AllOr::None,
            Self::Runs(runs) => AllOr::Some(runs),
        }
    }
}
