//! Bidirectional map where both orderings are treaps sharing the same nodes.

mod cursor;
mod map;
mod node;
mod tree;

pub use self::cursor::{Cursor, Iter, Position};
pub use self::map::{Bimap, IntoIter, LeftCursor, LeftPosition, RightCursor, RightPosition};
pub use self::node::{LeftRole, RightRole, Role};

use std::result;
use thiserror::Error;

/// The failures reported by a `Bimap`.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The requested key is not present on the queried side.
    #[error("no such element")]
    NotFound,
    /// The left or the right value of an inserted pair is already present.
    #[error("left or right value already present")]
    DuplicateKey,
}

pub type Result<T> = result::Result<T, Error>;
