use crate::arena::{Arena, Handle};
use crate::bimap::node::{Node, Role};
use crate::bimap::tree::{self, Tree};
use std::fmt;
use std::marker::PhantomData;
use std::ptr;

/// A detached position in one ordering of a bimap: either a pair or the end of the ordering.
///
/// Unlike a `Cursor`, a `Position` does not borrow the bimap, so it can be handed back to
/// mutating methods such as `Bimap::erase_left_at`. Removing a pair only invalidates the
/// positions of that pair. Using an invalidated position, or a position of another bimap, may
/// panic or refer to an unrelated pair.
pub struct Position<S> {
    pub(crate) handle: Tree,
    _marker: PhantomData<fn() -> S>,
}

impl<S> Position<S> {
    pub(crate) fn new(handle: Tree) -> Self {
        Position {
            handle,
            _marker: PhantomData,
        }
    }

    /// Returns the end position of an ordering.
    pub fn end() -> Self {
        Self::new(None)
    }

    /// Returns `true` if this is the end position.
    pub fn is_end(&self) -> bool {
        self.handle.is_none()
    }
}

impl<S> Clone for Position<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Position<S> {}

impl<S> PartialEq for Position<S> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<S> Eq for Position<S> {}

impl<S> fmt::Debug for Position<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle {
            Some(handle) => f.debug_tuple("Position").field(&handle).finish(),
            None => f.write_str("Position(End)"),
        }
    }
}

/// A cursor over one ordering of a bimap.
///
/// Besides pointing at a pair, a cursor can point at the end of the ordering, which sits both
/// after the maximum and before the minimum: moving forward from the end yields the minimum and
/// moving backward from it yields the maximum. `flip` turns a cursor into a cursor over the other
/// ordering that points at the same pair.
pub struct Cursor<'a, L, R, S> {
    arena: &'a Arena<Node<L, R>>,
    roots: [Tree; 2],
    position: Tree,
    _marker: PhantomData<fn() -> S>,
}

impl<'a, L, R, S> Cursor<'a, L, R, S>
where
    S: Role<L, R>,
{
    pub(crate) fn new(arena: &'a Arena<Node<L, R>>, roots: [Tree; 2], position: Tree) -> Self {
        Cursor {
            arena,
            roots,
            position,
            _marker: PhantomData,
        }
    }

    /// Returns the value of the pair in this cursor's ordering, or `None` at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.find_left(&1).get(), Some(&1));
    /// assert_eq!(map.find_left(&1).flip().get(), Some(&'a'));
    /// assert_eq!(map.find_left(&2).get(), None);
    /// ```
    pub fn get(&self) -> Option<&'a S::Key> {
        let arena = self.arena;
        self.position.map(|handle| S::key(&arena[handle]))
    }

    /// Returns both values of the pair, or `None` at the end.
    pub fn pair(&self) -> Option<(&'a L, &'a R)> {
        let arena = self.arena;
        self.position.map(|handle| {
            let node = &arena[handle];
            (&node.left_value, &node.right_value)
        })
    }

    pub fn is_end(&self) -> bool {
        self.position.is_none()
    }

    /// Detaches this cursor from the bimap it borrows.
    pub fn position(&self) -> Position<S> {
        Position::new(self.position)
    }

    /// Moves to the next pair in this ordering.
    pub fn move_next(&mut self) {
        self.position = match self.position {
            Some(handle) => tree::successor::<_, _, S>(self.arena, handle),
            None => tree::leftmost::<_, _, S>(self.arena, self.roots[S::INDEX]),
        };
    }

    /// Moves to the previous pair in this ordering.
    pub fn move_prev(&mut self) {
        self.position = tree::predecessor::<_, _, S>(self.arena, self.roots[S::INDEX], self.position);
    }

    /// Returns a cursor over the other ordering pointing at the same pair. The end of one ordering
    /// flips to the end of the other.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_bimap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 'a');
    /// assert!(map.find_left(&1).flip() == map.find_right(&'a'));
    /// assert!(map.end_left().flip() == map.end_right());
    /// ```
    pub fn flip(&self) -> Cursor<'a, L, R, S::Opposite> {
        Cursor::new(self.arena, self.roots, self.position)
    }
}

impl<'a, L, R, S> Clone for Cursor<'a, L, R, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, L, R, S> Copy for Cursor<'a, L, R, S> {}

impl<'a, L, R, S> PartialEq for Cursor<'a, L, R, S> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.arena, other.arena) && self.position == other.position
    }
}

impl<'a, L, R, S> Eq for Cursor<'a, L, R, S> {}

impl<'a, L, R, S> fmt::Debug for Cursor<'a, L, R, S>
where
    L: fmt::Debug,
    R: fmt::Debug,
    S: Role<L, R>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.pair()).finish()
    }
}

/// An iterator over the pairs of a bimap in the order of role `S`.
pub struct Iter<'a, L, R, S> {
    arena: &'a Arena<Node<L, R>>,
    front: Tree,
    back: Tree,
    len: usize,
    _marker: PhantomData<fn() -> S>,
}

impl<'a, L, R, S> Iter<'a, L, R, S>
where
    S: Role<L, R>,
{
    pub(crate) fn new(arena: &'a Arena<Node<L, R>>, root: Tree, len: usize) -> Self {
        Iter {
            arena,
            front: tree::leftmost::<_, _, S>(arena, root),
            back: tree::rightmost::<_, _, S>(arena, root),
            len,
            _marker: PhantomData,
        }
    }

    fn pair_at(&self, handle: Handle) -> (&'a L, &'a R) {
        let arena = self.arena;
        let node = &arena[handle];
        (&node.left_value, &node.right_value)
    }
}

impl<'a, L, R, S> Iterator for Iter<'a, L, R, S>
where
    S: Role<L, R>,
{
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = tree::successor::<_, _, S>(self.arena, handle);
        self.len -= 1;
        Some(self.pair_at(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, L, R, S> DoubleEndedIterator for Iter<'a, L, R, S>
where
    S: Role<L, R>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = tree::predecessor::<_, _, S>(self.arena, None, Some(handle));
        self.len -= 1;
        Some(self.pair_at(handle))
    }
}

impl<'a, L, R, S> ExactSizeIterator for Iter<'a, L, R, S> where S: Role<L, R> {}

impl<'a, L, R, S> Clone for Iter<'a, L, R, S> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            front: self.front,
            back: self.back,
            len: self.len,
            _marker: PhantomData,
        }
    }
}
