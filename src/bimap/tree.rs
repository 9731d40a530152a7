use crate::arena::{Arena, Handle};
use crate::bimap::node::{Link, Node, Role};
use crate::compare::Compare;
use std::cmp::Ordering;
use std::marker::PhantomData;

pub type Tree = Option<Handle>;

fn link<L, R, S: Role<L, R>>(arena: &Arena<Node<L, R>>, handle: Handle) -> Link {
    arena[handle].links[S::INDEX]
}

fn link_mut<L, R, S: Role<L, R>>(arena: &mut Arena<Node<L, R>>, handle: Handle) -> &mut Link {
    &mut arena[handle].links[S::INDEX]
}

fn adopt<L, R, S: Role<L, R>>(arena: &mut Arena<Node<L, R>>, tree: Tree, parent: Tree) {
    if let Some(node) = tree {
        link_mut::<_, _, S>(arena, node).parent = parent;
    }
}

pub fn leftmost<L, R, S: Role<L, R>>(arena: &Arena<Node<L, R>>, tree: Tree) -> Tree {
    let mut curr = tree?;
    while let Some(left) = link::<_, _, S>(arena, curr).left {
        curr = left;
    }
    Some(curr)
}

pub fn rightmost<L, R, S: Role<L, R>>(arena: &Arena<Node<L, R>>, tree: Tree) -> Tree {
    let mut curr = tree?;
    while let Some(right) = link::<_, _, S>(arena, curr).right {
        curr = right;
    }
    Some(curr)
}

/// Returns the in-order successor of `handle`, or `None` if `handle` holds the maximum key.
pub fn successor<L, R, S: Role<L, R>>(arena: &Arena<Node<L, R>>, handle: Handle) -> Tree {
    let node_link = link::<_, _, S>(arena, handle);
    if node_link.right.is_some() {
        return leftmost::<_, _, S>(arena, node_link.right);
    }
    let mut curr = handle;
    let mut parent = node_link.parent;
    while let Some(parent_node) = parent {
        let parent_link = link::<_, _, S>(arena, parent_node);
        if parent_link.right != Some(curr) {
            break;
        }
        curr = parent_node;
        parent = parent_link.parent;
    }
    parent
}

/// Returns the in-order predecessor of `position`. The predecessor of the end position is the
/// maximum of `root`, and the predecessor of the minimum is the end position.
pub fn predecessor<L, R, S: Role<L, R>>(arena: &Arena<Node<L, R>>, root: Tree, position: Tree) -> Tree {
    let handle = match position {
        Some(handle) => handle,
        None => return rightmost::<_, _, S>(arena, root),
    };
    let node_link = link::<_, _, S>(arena, handle);
    if node_link.left.is_some() {
        return rightmost::<_, _, S>(arena, node_link.left);
    }
    let mut curr = handle;
    let mut parent = node_link.parent;
    while let Some(parent_node) = parent {
        let parent_link = link::<_, _, S>(arena, parent_node);
        if parent_link.left != Some(curr) {
            break;
        }
        curr = parent_node;
        parent = parent_link.parent;
    }
    parent
}

/// A treap over the link triples of role `S`.
///
/// The treap only arranges nodes; it never allocates or frees them. Every node reachable from
/// `root` satisfies the binary search tree property with respect to `cmp` and the max-heap
/// property with respect to its priority.
pub struct Treap<L, R, S, C> {
    root: Tree,
    cmp: C,
    _marker: PhantomData<fn() -> (L, R, S)>,
}

impl<L, R, S, C> Treap<L, R, S, C>
where
    S: Role<L, R>,
    C: Compare<S::Key>,
{
    pub fn new(cmp: C) -> Self {
        Treap {
            root: None,
            cmp,
            _marker: PhantomData,
        }
    }

    pub fn root(&self) -> Tree {
        self.root
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Forgets every node. The caller is responsible for releasing them.
    pub fn clear(&mut self) {
        self.root = None;
    }

    pub fn less(&self, a: &S::Key, b: &S::Key) -> bool {
        self.cmp.compare(a, b) == Ordering::Less
    }

    pub fn greater(&self, a: &S::Key, b: &S::Key) -> bool {
        self.cmp.compare(a, b) == Ordering::Greater
    }

    pub fn equal(&self, a: &S::Key, b: &S::Key) -> bool {
        !self.less(a, b) && !self.greater(a, b)
    }

    fn node_less(&self, arena: &Arena<Node<L, R>>, a: Handle, b: Handle) -> bool {
        self.less(S::key(&arena[a]), S::key(&arena[b]))
    }

    /// Splits `tree` into the nodes whose keys are less than the key of `pivot` and the rest.
    pub fn split(&self, arena: &mut Arena<Node<L, R>>, pivot: Handle, tree: Tree) -> (Tree, Tree) {
        let node = match tree {
            Some(node) => node,
            None => return (None, None),
        };
        if self.node_less(arena, node, pivot) {
            let right = link::<_, _, S>(arena, node).right;
            let (less, rest) = self.split(arena, pivot, right);
            link_mut::<_, _, S>(arena, node).right = less;
            adopt::<_, _, S>(arena, less, Some(node));
            adopt::<_, _, S>(arena, rest, None);
            (Some(node), rest)
        } else {
            let left = link::<_, _, S>(arena, node).left;
            let (less, rest) = self.split(arena, pivot, left);
            link_mut::<_, _, S>(arena, node).left = rest;
            adopt::<_, _, S>(arena, rest, Some(node));
            adopt::<_, _, S>(arena, less, None);
            (less, Some(node))
        }
    }

    /// Merges two treaps where every key in `l_tree` is less than every key in `r_tree`.
    pub fn merge(&self, arena: &mut Arena<Node<L, R>>, l_tree: Tree, r_tree: Tree) -> Tree {
        match (l_tree, r_tree) {
            (Some(l_node), Some(r_node)) => {
                if arena[l_node].priority > arena[r_node].priority {
                    let right = link::<_, _, S>(arena, l_node).right;
                    let merged = self.merge(arena, right, Some(r_node));
                    link_mut::<_, _, S>(arena, l_node).right = merged;
                    adopt::<_, _, S>(arena, merged, Some(l_node));
                    Some(l_node)
                } else {
                    let left = link::<_, _, S>(arena, r_node).left;
                    let merged = self.merge(arena, Some(l_node), left);
                    link_mut::<_, _, S>(arena, r_node).left = merged;
                    adopt::<_, _, S>(arena, merged, Some(r_node));
                    Some(r_node)
                }
            }
            (new_tree, None) | (None, new_tree) => new_tree,
        }
    }

    /// Links a detached node into the treap. Its key must not already be present.
    pub fn insert(&mut self, arena: &mut Arena<Node<L, R>>, handle: Handle) {
        debug_assert_eq!(link::<_, _, S>(arena, handle), Link::default());
        let (less, rest) = self.split(arena, handle, self.root);
        let less = self.merge(arena, less, Some(handle));
        self.root = self.merge(arena, less, rest);
        adopt::<_, _, S>(arena, self.root, None);
    }

    pub fn find(&self, arena: &Arena<Node<L, R>>, key: &S::Key) -> Tree {
        let mut curr = self.root;
        while let Some(node) = curr {
            let node_link = link::<_, _, S>(arena, node);
            curr = match self.cmp.compare(key, S::key(&arena[node])) {
                Ordering::Less => node_link.left,
                Ordering::Greater => node_link.right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Unlinks `handle` from the treap, replacing it by the merge of its children. The node stays
    /// allocated with a cleared link triple.
    pub fn erase(&mut self, arena: &mut Arena<Node<L, R>>, handle: Handle) {
        let Link { parent, left, right } = link::<_, _, S>(arena, handle);
        let merged = self.merge(arena, left, right);
        adopt::<_, _, S>(arena, merged, parent);
        match parent {
            None => self.root = merged,
            Some(parent_node) => {
                let parent_link = link_mut::<_, _, S>(arena, parent_node);
                if parent_link.left == Some(handle) {
                    parent_link.left = merged;
                } else {
                    parent_link.right = merged;
                }
            }
        }
        *link_mut::<_, _, S>(arena, handle) = Link::default();
    }

    /// Unlinks the node with `key` and returns it, or returns `None` if no such node exists.
    pub fn erase_key(&mut self, arena: &mut Arena<Node<L, R>>, key: &S::Key) -> Tree {
        let handle = self.find(arena, key)?;
        self.erase(arena, handle);
        Some(handle)
    }

    fn bound<F>(&self, arena: &Arena<Node<L, R>>, key: &S::Key, go_right: F) -> Tree
    where
        F: Fn(Ordering) -> bool,
    {
        let mut best = None;
        let mut curr = self.root;
        while let Some(node) = curr {
            let node_link = link::<_, _, S>(arena, node);
            if go_right(self.cmp.compare(S::key(&arena[node]), key)) {
                curr = node_link.right;
            } else {
                best = Some(node);
                curr = node_link.left;
            }
        }
        best
    }

    /// Returns the first node whose key is not less than `key`.
    pub fn lower_bound(&self, arena: &Arena<Node<L, R>>, key: &S::Key) -> Tree {
        self.bound(arena, key, |ordering| ordering == Ordering::Less)
    }

    /// Returns the first node whose key is greater than `key`.
    pub fn upper_bound(&self, arena: &Arena<Node<L, R>>, key: &S::Key) -> Tree {
        self.bound(arena, key, |ordering| ordering != Ordering::Greater)
    }

    pub fn min(&self, arena: &Arena<Node<L, R>>) -> Tree {
        leftmost::<_, _, S>(arena, self.root)
    }

    /// Checks the parent links, the search tree order, and the heap order. Returns the number of
    /// nodes in the treap.
    #[cfg(test)]
    pub fn assert_valid(&self, arena: &Arena<Node<L, R>>) -> usize {
        fn check<L, R, S, C>(
            treap: &Treap<L, R, S, C>,
            arena: &Arena<Node<L, R>>,
            tree: Tree,
            parent: Tree,
        ) -> usize
        where
            S: Role<L, R>,
            C: Compare<S::Key>,
        {
            let node = match tree {
                Some(node) => node,
                None => return 0,
            };
            let node_link = link::<_, _, S>(arena, node);
            assert_eq!(node_link.parent, parent);
            for child in [node_link.left, node_link.right].iter().flatten() {
                assert!(arena[*child].priority <= arena[node].priority);
            }
            if let Some(left) = node_link.left {
                assert!(treap.node_less(arena, left, node));
            }
            if let Some(right) = node_link.right {
                assert!(treap.node_less(arena, node, right));
            }
            1 + check(treap, arena, node_link.left, Some(node)) + check(treap, arena, node_link.right, Some(node))
        }

        let len = check(self, arena, self.root, None);
        let mut count = 0;
        let mut curr = self.min(arena);
        while let Some(node) = curr {
            let next = successor::<_, _, S>(arena, node);
            if let Some(next_node) = next {
                assert!(self.node_less(arena, node, next_node));
            }
            count += 1;
            curr = next;
        }
        assert_eq!(count, len);
        len
    }
}
