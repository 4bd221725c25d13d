//! "Merge non-empty fields" update semantics.
//!
//! An incoming field equal to its type's zero value (empty string, `0`)
//! means "not provided" and the stored value is kept. A caller therefore
//! cannot reset a field to empty or zero through an update; this is the
//! long-standing contract of every PUT endpoint and is kept as-is.

use rust_decimal::Decimal;

/// Types with a distinguished "blank" value that update payloads use to
/// mean "leave unchanged".
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Decimal {
    fn is_blank(&self) -> bool {
        self.is_zero()
    }
}

impl Blank for i32 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl Blank for i64 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

/// Overwrite `current` with `incoming` unless `incoming` is blank.
pub fn keep_or_replace<T: Blank>(current: &mut T, incoming: T) {
    if !incoming.is_blank() {
        *current = incoming;
    }
}

/// A stored record that can absorb a partial update payload.
pub trait MergeNonEmpty<Changes> {
    /// Apply every non-blank field of `changes` onto `self`.
    fn merge_non_empty(&mut self, changes: Changes);
}
