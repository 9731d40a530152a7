use crate::arena::{Arena, Handle};
use crate::bimap::cursor::{Cursor, Iter, Position};
use crate::bimap::node::{LeftRole, Node, RightRole};
use crate::bimap::tree::{self, Treap, Tree};
use crate::bimap::{Error, Result};
use crate::compare::{Compare, Natural};
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::vec;

const DEFAULT_SEED: u64 = 0x2545_f491_4f6c_dd1d;

pub type LeftCursor<'a, L, R> = Cursor<'a, L, R, LeftRole>;
pub type RightCursor<'a, L, R> = Cursor<'a, L, R, RightRole>;
pub type LeftPosition = Position<LeftRole>;
pub type RightPosition = Position<RightRole>;

/// An ordered bidirectional map implemented by two treaps over shared nodes.
///
/// Every pair `(L, R)` lives in a single node that is linked into two treaps at once: one ordered
/// by the left values using `CL`, and one ordered by the right values using `CR`. Left values are
/// unique and right values are unique, so a pair can be looked up, bounded, or removed from
/// either side in expected `O(log N)` time. A cursor into one ordering can be flipped into a
/// cursor of the other ordering at the same pair in `O(1)`.
///
/// Node priorities come from a generator owned by the map. Maps built with the same seed and the
/// same operations have the same shape.
///
/// # Examples
///
/// ```
/// use treap_bimap::Bimap;
///
/// let mut map = Bimap::new();
/// map.insert(3, "c");
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// assert_eq!(map.at_left(&2), Ok(&"b"));
/// assert_eq!(map.at_right(&"c"), Ok(&3));
///
/// let lefts: Vec<_> = map.iter_left().map(|(left, _)| *left).collect();
/// assert_eq!(lefts, vec![1, 2, 3]);
///
/// assert!(map.erase_left(&2));
/// assert!(map.find_right(&"b").is_end());
/// assert_eq!(map.len(), 2);
/// ```
pub struct Bimap<L, R, CL = Natural, CR = Natural> {
    nodes: Arena<Node<L, R>>,
    left_tree: Treap<L, R, LeftRole, CL>,
    right_tree: Treap<L, R, RightRole, CR>,
    rng: SmallRng,
    len: usize,
}

impl<L, R> Bimap<L, R>
where
    L: Ord,
    R: Ord,
{
    /// Constructs a new, empty `Bimap<L, R>` ordering both sides by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let map: Bimap<u32, String> = Bimap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparators(Natural, Natural)
    }

    /// Constructs a new, empty `Bimap<L, R>` whose priority generator is seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_comparators_and_seed(Natural, Natural, seed)
    }
}

impl<L, R, CL, CR> Bimap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    /// Constructs a new, empty bimap with custom comparators for the left and the right side.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::with_comparators(|a: &u32, b: &u32| b.cmp(a), |a: &char, b: &char| a.cmp(b));
    /// map.insert(1, 'x');
    /// map.insert(2, 'y');
    /// assert_eq!(map.begin_left().get(), Some(&2));
    /// assert_eq!(map.begin_right().get(), Some(&'x'));
    /// ```
    pub fn with_comparators(left_cmp: CL, right_cmp: CR) -> Self {
        Self::with_comparators_and_seed(left_cmp, right_cmp, DEFAULT_SEED)
    }

    /// Constructs a new, empty bimap with custom comparators and a seeded priority generator.
    pub fn with_comparators_and_seed(left_cmp: CL, right_cmp: CR, seed: u64) -> Self {
        Self::from_parts(left_cmp, right_cmp, SmallRng::seed_from_u64(seed))
    }

    fn from_parts(left_cmp: CL, right_cmp: CR, rng: SmallRng) -> Self {
        Bimap {
            nodes: Arena::new(),
            left_tree: Treap::new(left_cmp),
            right_tree: Treap::new(right_cmp),
            rng,
            len: 0,
        }
    }

    fn roots(&self) -> [Tree; 2] {
        [self.left_tree.root(), self.right_tree.root()]
    }

    fn left_cursor(&self, position: Tree) -> LeftCursor<'_, L, R> {
        Cursor::new(&self.nodes, self.roots(), position)
    }

    fn right_cursor(&self, position: Tree) -> RightCursor<'_, L, R> {
        Cursor::new(&self.nodes, self.roots(), position)
    }

    /// Inserts the pair `(left, right)`. Returns the position of the new pair in the left
    /// ordering, or the end position if `left` or `right` is already present, in which case the
    /// map is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// let position = map.insert(1, 'a');
    /// assert_eq!(map.cursor_left_at(position).get(), Some(&1));
    ///
    /// assert!(map.insert(1, 'b').is_end());
    /// assert!(map.insert(2, 'a').is_end());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, left: L, right: R) -> LeftPosition {
        let left_taken = self.left_tree.find(&self.nodes, &left).is_some();
        if left_taken || self.right_tree.find(&self.nodes, &right).is_some() {
            trace!("rejected pair with a duplicate value");
            return Position::end();
        }
        Position::new(Some(self.link_new_node(left, right)))
    }

    /// Inserts the pair `(left, right)`, failing with `Error::DuplicateKey` if `left` or `right`
    /// is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::{Bimap, Error};
    ///
    /// let mut map = Bimap::new();
    /// assert!(map.try_insert(1, 'a').is_ok());
    /// assert_eq!(map.try_insert(1, 'b'), Err(Error::DuplicateKey));
    /// ```
    pub fn try_insert(&mut self, left: L, right: R) -> Result<LeftPosition> {
        let position = self.insert(left, right);
        if position.is_end() {
            Err(Error::DuplicateKey)
        } else {
            Ok(position)
        }
    }

    // Both values must be absent from their trees.
    fn link_new_node(&mut self, left: L, right: R) -> Handle {
        let priority = self.rng.next_u32();
        let handle = self.nodes.allocate(Node::new(left, right, priority));
        self.left_tree.insert(&mut self.nodes, handle);
        self.right_tree.insert(&mut self.nodes, handle);
        self.len += 1;
        trace!("inserted pair with priority {}, {} pairs", priority, self.len);
        handle
    }

    fn unlink_node(&mut self, handle: Handle) -> (L, R) {
        self.left_tree.erase(&mut self.nodes, handle);
        self.right_tree.erase(&mut self.nodes, handle);
        self.release_node(handle)
    }

    // The node must already be unlinked from both trees.
    fn release_node(&mut self, handle: Handle) -> (L, R) {
        self.len -= 1;
        trace!("removed pair, {} pairs", self.len);
        let Node {
            left_value,
            right_value,
            ..
        } = self.nodes.free(handle);
        (left_value, right_value)
    }

    /// Removes the pair at `position` in the left ordering and returns the position of its
    /// successor. Erasing the end position does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `position` refers to a pair that was already removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// let position = map.find_left(&1).position();
    /// let next = map.erase_left_at(position);
    /// assert_eq!(map.cursor_left_at(next).get(), Some(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn erase_left_at(&mut self, position: LeftPosition) -> LeftPosition {
        let handle = match position.handle {
            Some(handle) => handle,
            None => return position,
        };
        let next = tree::successor::<_, _, LeftRole>(&self.nodes, handle);
        self.unlink_node(handle);
        Position::new(next)
    }

    /// Removes the pair at `position` in the right ordering and returns the position of its
    /// successor. Erasing the end position does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `position` refers to a pair that was already removed.
    pub fn erase_right_at(&mut self, position: RightPosition) -> RightPosition {
        let handle = match position.handle {
            Some(handle) => handle,
            None => return position,
        };
        let next = tree::successor::<_, _, RightRole>(&self.nodes, handle);
        self.unlink_node(handle);
        Position::new(next)
    }

    /// Removes the pair with left value `key`. Returns `false` if there is no such pair.
    pub fn erase_left(&mut self, key: &L) -> bool {
        self.remove_left(key).is_some()
    }

    /// Removes the pair with right value `key`. Returns `false` if there is no such pair.
    pub fn erase_right(&mut self, key: &R) -> bool {
        self.remove_right(key).is_some()
    }

    /// Removes and returns the pair with left value `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.remove_left(&1), Some((1, 'a')));
    /// assert_eq!(map.remove_left(&1), None);
    /// ```
    pub fn remove_left(&mut self, key: &L) -> Option<(L, R)> {
        let handle = self.left_tree.erase_key(&mut self.nodes, key)?;
        self.right_tree.erase(&mut self.nodes, handle);
        Some(self.release_node(handle))
    }

    /// Removes and returns the pair with right value `key`.
    pub fn remove_right(&mut self, key: &R) -> Option<(L, R)> {
        let handle = self.right_tree.erase_key(&mut self.nodes, key)?;
        self.left_tree.erase(&mut self.nodes, handle);
        Some(self.release_node(handle))
    }

    /// Removes the pairs from `first` up to, but not including, `last` in the left ordering.
    /// Returns `last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// for i in 0..5 {
    ///     map.insert(i, i * 10);
    /// }
    /// let first = map.find_left(&1).position();
    /// let last = map.find_left(&4).position();
    /// map.erase_left_range(first, last);
    /// let lefts: Vec<_> = map.iter_left().map(|(left, _)| *left).collect();
    /// assert_eq!(lefts, vec![0, 4]);
    /// ```
    pub fn erase_left_range(&mut self, mut first: LeftPosition, last: LeftPosition) -> LeftPosition {
        while first != last && !first.is_end() {
            first = self.erase_left_at(first);
        }
        first
    }

    /// Removes the pairs from `first` up to, but not including, `last` in the right ordering.
    /// Returns `last`.
    pub fn erase_right_range(&mut self, mut first: RightPosition, last: RightPosition) -> RightPosition {
        while first != last && !first.is_end() {
            first = self.erase_right_at(first);
        }
        first
    }

    /// Returns a cursor at the pair with left value `key`, or the end cursor if there is none.
    pub fn find_left(&self, key: &L) -> LeftCursor<'_, L, R> {
        self.left_cursor(self.left_tree.find(&self.nodes, key))
    }

    /// Returns a cursor at the pair with right value `key`, or the end cursor if there is none.
    pub fn find_right(&self, key: &R) -> RightCursor<'_, L, R> {
        self.right_cursor(self.right_tree.find(&self.nodes, key))
    }

    pub fn contains_left(&self, key: &L) -> bool {
        self.left_tree.find(&self.nodes, key).is_some()
    }

    pub fn contains_right(&self, key: &R) -> bool {
        self.right_tree.find(&self.nodes, key).is_some()
    }

    /// Returns the right value paired with `key`, or `None` if `key` is absent.
    pub fn get_left(&self, key: &L) -> Option<&R> {
        self.find_left(key).flip().get()
    }

    /// Returns the left value paired with `key`, or `None` if `key` is absent.
    pub fn get_right(&self, key: &R) -> Option<&L> {
        self.find_right(key).flip().get()
    }

    /// Returns the right value paired with `key`.
    ///
    /// # Errors
    ///
    /// Fails with `Error::NotFound` if `key` is not a left value of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::{Bimap, Error};
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.at_left(&1), Ok(&'a'));
    /// assert_eq!(map.at_left(&2), Err(Error::NotFound));
    /// ```
    pub fn at_left(&self, key: &L) -> Result<&R> {
        self.get_left(key).ok_or(Error::NotFound)
    }

    /// Returns the left value paired with `key`.
    ///
    /// # Errors
    ///
    /// Fails with `Error::NotFound` if `key` is not a right value of the map.
    pub fn at_right(&self, key: &R) -> Result<&L> {
        self.get_right(key).ok_or(Error::NotFound)
    }

    /// Returns the right value paired with `key`, creating a pairing with `R::default()` if `key`
    /// is absent.
    ///
    /// If the default right value already belongs to another pair, that pair's left value is
    /// replaced by `key` instead of inserting a new pair. The previous left value of that pair is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(5, 0);
    /// assert_eq!(*map.at_left_or_default(7), 0);
    /// assert_eq!(map.len(), 1);
    /// assert!(map.find_left(&5).is_end());
    /// assert_eq!(map.at_left(&7), Ok(&0));
    ///
    /// assert_eq!(*map.at_left_or_default(7), 0);
    /// ```
    pub fn at_left_or_default(&mut self, key: L) -> &R
    where
        R: Default,
    {
        if let Some(handle) = self.left_tree.find(&self.nodes, &key) {
            return &self.nodes[handle].right_value;
        }
        let default_right = R::default();
        let handle = match self.right_tree.find(&self.nodes, &default_right) {
            Some(handle) => {
                debug!("reassigning the left value of the pair holding the default right value");
                self.left_tree.erase(&mut self.nodes, handle);
                self.nodes[handle].left_value = key;
                self.left_tree.insert(&mut self.nodes, handle);
                handle
            }
            None => self.link_new_node(key, default_right),
        };
        &self.nodes[handle].right_value
    }

    /// Returns the left value paired with `key`, creating a pairing with `L::default()` if `key`
    /// is absent.
    ///
    /// If the default left value already belongs to another pair, that pair's right value is
    /// replaced by `key` instead of inserting a new pair.
    pub fn at_right_or_default(&mut self, key: R) -> &L
    where
        L: Default,
    {
        if let Some(handle) = self.right_tree.find(&self.nodes, &key) {
            return &self.nodes[handle].left_value;
        }
        let default_left = L::default();
        let handle = match self.left_tree.find(&self.nodes, &default_left) {
            Some(handle) => {
                debug!("reassigning the right value of the pair holding the default left value");
                self.right_tree.erase(&mut self.nodes, handle);
                self.nodes[handle].right_value = key;
                self.right_tree.insert(&mut self.nodes, handle);
                handle
            }
            None => self.link_new_node(default_left, key),
        };
        &self.nodes[handle].left_value
    }

    /// Returns a cursor at the first pair whose left value is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(10, 'a');
    /// map.insert(20, 'b');
    /// assert_eq!(map.lower_bound_left(&15).get(), Some(&20));
    /// assert_eq!(map.lower_bound_left(&20).get(), Some(&20));
    /// assert_eq!(map.upper_bound_left(&20).get(), None);
    /// ```
    pub fn lower_bound_left(&self, key: &L) -> LeftCursor<'_, L, R> {
        self.left_cursor(self.left_tree.lower_bound(&self.nodes, key))
    }

    /// Returns a cursor at the first pair whose left value is greater than `key`.
    pub fn upper_bound_left(&self, key: &L) -> LeftCursor<'_, L, R> {
        self.left_cursor(self.left_tree.upper_bound(&self.nodes, key))
    }

    /// Returns a cursor at the first pair whose right value is not less than `key`.
    pub fn lower_bound_right(&self, key: &R) -> RightCursor<'_, L, R> {
        self.right_cursor(self.right_tree.lower_bound(&self.nodes, key))
    }

    /// Returns a cursor at the first pair whose right value is greater than `key`.
    pub fn upper_bound_right(&self, key: &R) -> RightCursor<'_, L, R> {
        self.right_cursor(self.right_tree.upper_bound(&self.nodes, key))
    }

    pub fn begin_left(&self) -> LeftCursor<'_, L, R> {
        self.left_cursor(self.left_tree.min(&self.nodes))
    }

    pub fn end_left(&self) -> LeftCursor<'_, L, R> {
        self.left_cursor(None)
    }

    pub fn begin_right(&self) -> RightCursor<'_, L, R> {
        self.right_cursor(self.right_tree.min(&self.nodes))
    }

    pub fn end_right(&self) -> RightCursor<'_, L, R> {
        self.right_cursor(None)
    }

    /// Reattaches a position of the left ordering to this map.
    pub fn cursor_left_at(&self, position: LeftPosition) -> LeftCursor<'_, L, R> {
        self.left_cursor(position.handle)
    }

    /// Reattaches a position of the right ordering to this map.
    pub fn cursor_right_at(&self, position: RightPosition) -> RightCursor<'_, L, R> {
        self.right_cursor(position.handle)
    }

    /// Returns an iterator over the pairs ordered by their left values.
    pub fn iter_left(&self) -> Iter<'_, L, R, LeftRole> {
        Iter::new(&self.nodes, self.left_tree.root(), self.len)
    }

    /// Returns an iterator over the pairs ordered by their right values.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 'b');
    /// map.insert(2, 'a');
    /// let pairs: Vec<_> = map.iter_right().collect();
    /// assert_eq!(pairs, vec![(&2, &'a'), (&1, &'b')]);
    /// ```
    pub fn iter_right(&self) -> Iter<'_, L, R, RightRole> {
        Iter::new(&self.nodes, self.right_tree.root(), self.len)
    }

    /// Returns the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len == 0, self.left_tree.is_empty());
        self.len == 0
    }

    /// Removes every pair from the map.
    pub fn clear(&mut self) {
        self.left_tree.clear();
        self.right_tree.clear();
        self.nodes.clear();
        self.len = 0;
    }

    /// Exchanges the contents of two maps, comparators included.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<L, R, CL, CR> Clone for Bimap<L, R, CL, CR>
where
    L: Clone,
    R: Clone,
    CL: Compare<L> + Clone,
    CR: Compare<R> + Clone,
{
    fn clone(&self) -> Self {
        let mut ret = Bimap::from_parts(
            self.left_tree.comparator().clone(),
            self.right_tree.comparator().clone(),
            self.rng.clone(),
        );
        for (left, right) in self.iter_left() {
            ret.insert(left.clone(), right.clone());
        }
        ret
    }
}

impl<L, R, CL, CR> PartialEq for Bimap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.iter_left().zip(other.iter_left()).all(|((l1, r1), (l2, r2))| {
                self.left_tree.equal(l1, l2) && self.right_tree.equal(r1, r2)
            })
    }
}

impl<L, R, CL, CR> Eq for Bimap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
}

impl<L, R, CL, CR> Default for Bimap<L, R, CL, CR>
where
    CL: Compare<L> + Default,
    CR: Compare<R> + Default,
{
    fn default() -> Self {
        Self::with_comparators(CL::default(), CR::default())
    }
}

impl<L, R, CL, CR> fmt::Debug for Bimap<L, R, CL, CR>
where
    L: fmt::Debug,
    R: fmt::Debug,
    CL: Compare<L>,
    CR: Compare<R>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

impl<L, R, CL, CR> Extend<(L, R)> for Bimap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (left, right) in iter {
            self.insert(left, right);
        }
    }
}

impl<L, R, CL, CR> FromIterator<(L, R)> for Bimap<L, R, CL, CR>
where
    CL: Compare<L> + Default,
    CR: Compare<R> + Default,
{
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut ret = Self::default();
        ret.extend(iter);
        ret
    }
}

impl<'a, L, R, CL, CR> IntoIterator for &'a Bimap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, L, R, LeftRole>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

/// An owning iterator over the pairs of a bimap ordered by their left values.
pub struct IntoIter<L, R> {
    pairs: vec::IntoIter<(L, R)>,
}

impl<L, R, CL, CR> IntoIterator for Bimap<L, R, CL, CR>
where
    CL: Compare<L>,
    CR: Compare<R>,
{
    type Item = (L, R);
    type IntoIter = IntoIter<L, R>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut handles = Vec::with_capacity(self.len);
        let mut curr = self.left_tree.min(&self.nodes);
        while let Some(handle) = curr {
            curr = tree::successor::<_, _, LeftRole>(&self.nodes, handle);
            handles.push(handle);
        }
        let nodes = &mut self.nodes;
        let pairs: Vec<(L, R)> = handles
            .into_iter()
            .map(|handle| {
                let node = nodes.free(handle);
                (node.left_value, node.right_value)
            })
            .collect();
        IntoIter {
            pairs: pairs.into_iter(),
        }
    }
}

impl<L, R> Iterator for IntoIter<L, R> {
    type Item = (L, R);

    fn next(&mut self) -> Option<Self::Item> {
        self.pairs.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl<L, R> DoubleEndedIterator for IntoIter<L, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pairs.next_back()
    }
}

impl<L, R> ExactSizeIterator for IntoIter<L, R> {}

#[cfg(test)]
mod tests {
    use super::Bimap;
    use crate::bimap::Error;
    use crate::compare::Compare;
    use std::cmp::Ordering;

    fn assert_consistent<L, R, CL, CR>(map: &Bimap<L, R, CL, CR>)
    where
        CL: Compare<L>,
        CR: Compare<R>,
    {
        assert_eq!(map.left_tree.assert_valid(&map.nodes), map.len());
        assert_eq!(map.right_tree.assert_valid(&map.nodes), map.len());
        assert_eq!(map.nodes.len(), map.len());
        assert_eq!(map.iter_left().count(), map.len());
        assert_eq!(map.iter_right().count(), map.len());
    }

    fn sample() -> Bimap<u32, &'static str> {
        let mut map = Bimap::new();
        map.insert(2, "b");
        map.insert(3, "c");
        map.insert(1, "a");
        map
    }

    #[test]
    fn test_len_empty() {
        let map: Bimap<u32, u32> = Bimap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(map.begin_left() == map.end_left());
        assert!(map.begin_right() == map.end_right());
    }

    #[test]
    fn test_insert() {
        let map = sample();
        assert_consistent(&map);
        let lefts: Vec<u32> = map.iter_left().map(|(left, _)| *left).collect();
        assert_eq!(lefts, vec![1, 2, 3]);
        assert_eq!(map.at_left(&2), Ok(&"b"));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut map = sample();
        assert!(map.insert(1, "z").is_end());
        assert!(map.insert(9, "a").is_end());
        assert_eq!(map.try_insert(9, "a"), Err(Error::DuplicateKey));
        assert_eq!(map.len(), 3);
        assert!(map.find_right(&"z").is_end());
        assert!(map.find_left(&9).is_end());
        assert_consistent(&map);
    }

    #[test]
    fn test_erase_left() {
        let mut map = sample();
        assert!(map.erase_left(&2));
        assert!(!map.erase_left(&2));
        assert!(map.find_right(&"b") == map.end_right());
        assert_eq!(map.len(), 2);
        assert_consistent(&map);
    }

    #[test]
    fn test_erase_right() {
        let mut map = sample();
        assert!(map.erase_right(&"c"));
        assert!(map.find_left(&3).is_end());
        assert_eq!(map.remove_right(&"a"), Some((1, "a")));
        assert_eq!(map.len(), 1);
        assert_consistent(&map);
    }

    #[test]
    fn test_erase_at_returns_successor() {
        let mut map = sample();
        let position = map.find_right(&"a").position();
        let next = map.erase_right_at(position);
        assert_eq!(map.cursor_right_at(next).get(), Some(&"b"));
        let last = map.find_left(&3).position();
        assert!(map.erase_left_at(last).is_end());
        assert_eq!(map.len(), 1);
        assert_consistent(&map);
    }

    #[test]
    fn test_erase_range() {
        let mut map: Bimap<u32, u32> = (0..10).map(|i| (i, 100 - i)).collect();
        let first = map.find_right(&93).position();
        let last = map.find_right(&97).position();
        let ret = map.erase_right_range(first, last);
        assert_eq!(ret, last);
        let rights: Vec<u32> = map.iter_right().map(|(_, right)| *right).collect();
        assert_eq!(rights, vec![91, 92, 97, 98, 99, 100]);

        let first = map.begin_left().position();
        let last = map.end_left().position();
        map.erase_left_range(first, last);
        assert!(map.is_empty());
        assert_consistent(&map);
    }

    #[test]
    fn test_flip() {
        let map = sample();
        for (left, right) in map.iter_left() {
            assert!(map.find_left(left).flip() == map.find_right(right));
            assert!(map.find_right(right).flip() == map.find_left(left));
            assert!(map.find_left(left).flip().flip() == map.find_left(left));
        }
        assert!(map.end_left().flip() == map.end_right());
        assert!(map.end_right().flip() == map.end_left());
    }

    #[test]
    fn test_cursor_round_trip() {
        let map: Bimap<u32, u32> = (0..20).map(|i| (i, i * 7 % 20)).collect();
        let mut cursor = map.find_left(&5);
        for _ in 0..10 {
            cursor.move_next();
        }
        assert_eq!(cursor.get(), Some(&15));
        for _ in 0..10 {
            cursor.move_prev();
        }
        assert!(cursor == map.find_left(&5));
    }

    #[test]
    fn test_cursor_wraps_through_end() {
        let map = sample();
        let mut cursor = map.end_left();
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&1));
        cursor.move_prev();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_at_missing() {
        let map = sample();
        assert_eq!(map.at_left(&4), Err(Error::NotFound));
        assert_eq!(map.at_right(&"d"), Err(Error::NotFound));
        assert_eq!(map.at_right(&"c"), Ok(&3));
    }

    #[test]
    fn test_at_left_or_default_present() {
        let mut map = Bimap::new();
        map.insert(1, 10);
        assert_eq!(*map.at_left_or_default(1), 10);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_at_left_or_default_inserts() {
        let mut map = Bimap::new();
        map.insert(1, 10);
        assert_eq!(*map.at_left_or_default(2), 0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.at_right(&0), Ok(&2));
        assert_consistent(&map);
    }

    #[test]
    fn test_at_left_or_default_reassigns() {
        let mut map = Bimap::new();
        map.insert(5, 0);
        assert_eq!(*map.at_left_or_default(7), 0);
        assert_eq!(map.len(), 1);
        assert!(map.find_left(&5).is_end());
        assert_eq!(map.find_left(&7).flip().get(), Some(&0));
        assert_consistent(&map);
    }

    #[test]
    fn test_at_right_or_default_reassigns() {
        let mut map = Bimap::new();
        map.insert(0, 'x');
        map.insert(1, 'y');
        assert_eq!(*map.at_right_or_default('z'), 0);
        assert_eq!(map.len(), 2);
        assert!(map.find_right(&'x').is_end());
        assert_eq!(map.at_left(&0), Ok(&'z'));
        assert_consistent(&map);
    }

    #[test]
    fn test_bounds() {
        let map: Bimap<u32, u32> = vec![(10, 3), (20, 2), (30, 1)].into_iter().collect();
        assert_eq!(map.lower_bound_left(&20).get(), Some(&20));
        assert_eq!(map.upper_bound_left(&20).get(), Some(&30));
        assert!(map.upper_bound_left(&30).is_end());
        assert_eq!(map.lower_bound_right(&0).get(), Some(&1));
        assert_eq!(map.upper_bound_right(&2).flip().get(), Some(&10));
        assert!(map.lower_bound_right(&4) == map.end_right());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        assert!(copy == original);
        copy.insert(4, "d");
        assert_eq!(original.len(), 3);
        assert!(original.find_left(&4).is_end());
        assert!(copy != original);
        assert_consistent(&copy);
    }

    #[test]
    fn test_eq_uses_comparators() {
        let natural = |a: &u32, b: &u32| a.cmp(b);
        let case_insensitive = |a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase());
        let mut a = Bimap::with_comparators(natural, case_insensitive);
        let mut b = Bimap::with_comparators(natural, case_insensitive);
        a.insert(1, String::from("Hello"));
        b.insert(1, String::from("hello"));
        assert!(a == b);
        b.insert(2, String::from("World"));
        assert!(a != b);
    }

    #[test]
    fn test_custom_comparator() {
        let reverse = |a: &u32, b: &u32| -> Ordering { b.cmp(a) };
        let mut map = Bimap::with_comparators(reverse, reverse);
        for i in 0..5 {
            map.insert(i, i);
        }
        let lefts: Vec<u32> = map.iter_left().map(|(left, _)| *left).collect();
        assert_eq!(lefts, vec![4, 3, 2, 1, 0]);
        assert_eq!(map.lower_bound_left(&10).get(), Some(&4));
        assert_consistent(&map);
    }

    #[test]
    fn test_swap_and_take() {
        let mut a = sample();
        let mut b = Bimap::new();
        b.insert(9, "z");
        a.swap(&mut b);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 3);
        let taken = std::mem::take(&mut b);
        assert!(b.is_empty());
        assert!(b.begin_left().is_end());
        assert_eq!(taken.at_left(&1), Ok(&"a"));
        assert_consistent(&taken);
    }

    #[test]
    fn test_clear() {
        let mut map = sample();
        map.clear();
        assert!(map.is_empty());
        map.insert(1, "a");
        assert_consistent(&map);
    }

    #[test]
    fn test_iter_rev() {
        let map = sample();
        let pairs: Vec<(&u32, &&str)> = map.iter_left().rev().collect();
        assert_eq!(pairs, vec![(&3, &"c"), (&2, &"b"), (&1, &"a")]);
        assert_eq!(map.iter_right().len(), 3);
    }

    #[test]
    fn test_into_iter() {
        let map = sample();
        let pairs: Vec<(u32, &str)> = map.into_iter().collect();
        assert_eq!(pairs, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_debug() {
        let map = sample();
        assert_eq!(format!("{:?}", map), r#"{1: "a", 2: "b", 3: "c"}"#);
    }

    #[test]
    fn test_seeded_maps_have_same_shape() {
        let mut a = Bimap::with_seed(3);
        let mut b = Bimap::with_seed(3);
        for i in 0..50 {
            a.insert(i, 50 - i);
            b.insert(i, 50 - i);
        }
        let root_of = |map: &Bimap<i32, i32>| map.left_tree.root().map(|handle| map.nodes[handle].left_value);
        assert_eq!(root_of(&a), root_of(&b));
    }
}
