use std::iter::Peekable;
use std::ops::{BitAnd, BitOr, Range, RangeInclusive};

use roaring::RoaringTreemap;
use tabula_error::TabulaExpect;
use tabula_mask::Mask;

/// An ordered set of event identifiers, stored as a compressed bitmap over the 64-bit space.
///
/// Selections are supplied by index and query collaborators and consumed by
/// [`crate::select`], which only needs membership and the maximal runs intersecting one slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ids(RoaringTreemap);

impl Ids {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection of every identifier in `range`.
    pub fn from_range(range: Range<u64>) -> Self {
        let mut ids = Self::new();
        ids.insert_range(range);
        ids
    }

    /// Add `id`, returning true if it was not present.
    pub fn insert(&mut self, id: u64) -> bool {
        self.0.insert(id)
    }

    /// Add every identifier in `range`, returning the number of new identifiers.
    pub fn insert_range(&mut self, range: Range<u64>) -> u64 {
        self.0.insert_range(range)
    }

    /// Remove `id`, returning true if it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        self.0.remove(id)
    }

    /// Returns true if `id` is selected.
    pub fn contains(&self, id: u64) -> bool {
        self.0.contains(id)
    }

    /// The number of selected identifiers.
    pub fn len(&self) -> u64 {
        self.0.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the selected identifiers in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter()
    }

    /// Returns true if any identifier of `range` is selected.
    pub fn intersects(&self, range: &Range<u64>) -> bool {
        !self.0.is_disjoint(&range_treemap(range))
    }

    /// The maximal runs of consecutive selected identifiers, in increasing order.
    pub fn runs(&self) -> Runs<impl Iterator<Item = u64> + '_> {
        Runs {
            ids: self.0.iter().peekable(),
        }
    }

    /// The maximal runs of selected identifiers within `range`, in increasing order.
    ///
    /// Runs are cut at the range boundaries.
    pub fn runs_in(&self, range: &Range<u64>) -> impl Iterator<Item = Range<u64>> + use<> {
        let start = range.start;
        let runs = match self.row_mask(range).runs() {
            tabula_mask::AllOr::All => vec![range.clone()],
            tabula_mask::AllOr::None => vec![],
            tabula_mask::AllOr::Some(runs) => runs
                .iter()
                .map(|&(begin, end)| start + begin as u64..start + end as u64)
                .collect(),
        };
        runs.into_iter()
    }

    /// Project the selection onto `range`: position `i` of the mask is set when the identifier
    /// `range.start + i` is selected.
    ///
    /// ## Panics
    ///
    /// Panics if the range is longer than the address space of the platform.
    pub fn row_mask(&self, range: &Range<u64>) -> Mask {
        let len = usize::try_from(range.end.saturating_sub(range.start))
            .ok()
            .tabula_expect("id range is longer than the address space");
        let window = range_treemap(range);
        if self.0.is_disjoint(&window) {
            return Mask::new_false(len);
        }
        let hits = &self.0 & window;
        Mask::from_positions(
            len,
            hits.iter().map(|id| {
                usize::try_from(id - range.start)
                    .ok()
                    .tabula_expect("position is below the range length")
            }),
        )
    }

    /// The underlying bitmap.
    pub fn as_treemap(&self) -> &RoaringTreemap {
        &self.0
    }
}

fn range_treemap(range: &Range<u64>) -> RoaringTreemap {
    let mut treemap = RoaringTreemap::new();
    treemap.insert_range(range.clone());
    treemap
}

/// Maximal runs of consecutive identifiers, see [`Ids::runs`].
pub struct Runs<I: Iterator<Item = u64>> {
    ids: Peekable<I>,
}

impl<I: Iterator<Item = u64>> Iterator for Runs<I> {
    type Item = RangeInclusive<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.ids.next()?;
        let mut last = first;
        while let Some(id) = self.ids.next_if(|&id| Some(id) == last.checked_add(1)) {
            last = id;
        }
        Some(first..=last)
    }
}

impl From<RoaringTreemap> for Ids {
    fn from(value: RoaringTreemap) -> Self {
        Self(value)
    }
}

impl FromIterator<u64> for Ids {
    fn from_iter<T: IntoIterator<Item = u64>>(iter: T) -> Self {
        Self(RoaringTreemap::from_iter(iter))
    }
}

impl Extend<u64> for Ids {
    fn extend<T: IntoIterator<Item = u64>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl BitAnd for &Ids {
    type Output = Ids;

    fn bitand(self, rhs: Self) -> Self::Output {
        Ids((&self.0).bitand(&rhs.0))
    }
}

impl BitOr for &Ids {
    type Output = Ids;

    fn bitor(self, rhs: Self) -> Self::Output {
        Ids((&self.0).bitor(&rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use rstest::rstest;
    use tabula_mask::AllOr;

    use super::Ids;

    #[rstest]
    #[case(vec![1, 3, 5, 7], 1..8, vec![0, 2, 4, 6])]
    #[case(vec![1, 3, 5, 7], 3..6, vec![0, 2])]
    #[case(vec![1, 3, 5, 7], 3..5, vec![0])]
    #[case(vec![0, 9], 0..5, vec![0])]
    #[case(vec![u64::MAX - 3, u64::MAX - 1], u64::MAX - 4..u64::MAX, vec![1, 3])]
    fn row_mask_positions(
        #[case] ids: Vec<u64>,
        #[case] range: Range<u64>,
        #[case] expected: Vec<usize>,
    ) {
        let mask = Ids::from_iter(ids).row_mask(&range);
        assert_eq!(mask.positions(), AllOr::Some(expected.as_slice()));
    }

    #[test]
    fn row_mask_constant() {
        let ids = Ids::from_iter([1, 3, 4, 5, 6]);
        assert!(ids.row_mask(&(3..7)).all_true());
        assert!(ids.row_mask(&(7..10)).all_false());
        assert_eq!(ids.row_mask(&(4..4)).len(), 0);
    }

    #[test]
    fn runs_are_maximal() {
        let ids = Ids::from_iter([1, 2, 3, 7, 9, 10, u64::MAX - 1, u64::MAX]);
        assert_eq!(
            ids.runs().collect::<Vec<_>>(),
            vec![1..=3, 7..=7, 9..=10, u64::MAX - 1..=u64::MAX]
        );
    }

    #[test]
    fn runs_in_cut_at_boundaries() {
        let ids = Ids::from_range(0..100);
        assert_eq!(ids.runs_in(&(10..20)).collect::<Vec<_>>(), vec![10..20]);

        let ids = Ids::from_iter([100, 101, 103, 104, 200]);
        assert_eq!(
            ids.runs_in(&(100..105)).collect::<Vec<_>>(),
            vec![100..102, 103..105]
        );
        assert!(ids.runs_in(&(105..200)).next().is_none());
        assert!(ids.intersects(&(150..201)));
        assert!(!ids.intersects(&(150..200)));
    }

    #[test]
    fn set_operations() {
        let lhs = Ids::from_range(0..10);
        let rhs = Ids::from_range(5..15);
        assert_eq!((&lhs & &rhs).len(), 5);
        assert_eq!((&lhs | &rhs).len(), 15);
        assert!((&lhs & &rhs).contains(7));
    }
}
