use crate::arena::Handle;

/// The parent and child links of a node within one of the two trees.
///
/// A node without a parent is the root of its tree; the tree's sentinel sits above it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Link {
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

/// A struct representing a pair stored in a bimap.
///
/// The same node is linked into both trees: `links[LeftRole::INDEX]` positions it in the tree
/// ordered by left values, and `links[RightRole::INDEX]` in the tree ordered by right values.
pub struct Node<L, R> {
    pub left_value: L,
    pub right_value: R,
    pub priority: u32,
    pub links: [Link; 2],
}

impl<L, R> Node<L, R> {
    pub fn new(left_value: L, right_value: R, priority: u32) -> Self {
        Node {
            left_value,
            right_value,
            priority,
            links: [Link::default(); 2],
        }
    }
}

/// One of the two orderings of a bimap.
///
/// A role picks which value of a `Node` acts as the key and which link triple the tree walks.
pub trait Role<L, R> {
    /// Index of this role's link triple inside `Node::links`.
    const INDEX: usize;

    /// The value type ordered by this role.
    type Key;

    /// The role of the other tree.
    type Opposite: Role<L, R>;

    fn key(node: &Node<L, R>) -> &Self::Key;
}

/// The ordering by left values.
#[derive(Clone, Copy, Debug)]
pub enum LeftRole {}

/// The ordering by right values.
#[derive(Clone, Copy, Debug)]
pub enum RightRole {}

impl<L, R> Role<L, R> for LeftRole {
    const INDEX: usize = 0;
    type Key = L;
    type Opposite = RightRole;

    fn key(node: &Node<L, R>) -> &L {
        &node.left_value
    }
}

impl<L, R> Role<L, R> for RightRole {
    const INDEX: usize = 1;
    type Key = R;
    type Opposite = LeftRole;

    fn key(node: &Node<L, R>) -> &R {
        &node.right_value
    }
}
