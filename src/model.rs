use crate::text;
use std::borrow::Cow;

/// Upper bound on how many items an inventory holds.
pub const MAX_ITEMS: usize = 1000;

/// On-disk width of the name field, terminator included.
pub const NAME_CAP: usize = 256;

/// On-disk width of the category field, terminator included.
pub const CATEGORY_CAP: usize = 128;

/// Sort orders understood by [`crate::store::Inventory::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Stock,
    Category,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Stock => write!(f, "stock"),
            SortKey::Category => write!(f, "category"),
        }
    }
}

/// A single inventory entry.
///
/// Name and category are raw bytes, not `String`: field truncation is
/// byte-oriented and may cut a multi-byte sequence, and inventory files
/// written elsewhere may carry arbitrary bytes. The text accessors return
/// lossy UTF-8 views for display; the `_bytes` accessors return the exact
/// stored bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: i32,
    name: Vec<u8>,
    category: Vec<u8>,
    stock: i32,
}

impl Item {
    /// Fields must already be bounded to their capacities.
    pub(crate) fn from_parts(id: i32, name: Vec<u8>, category: Vec<u8>, stock: i32) -> Self {
        debug_assert!(name.len() < NAME_CAP);
        debug_assert!(category.len() < CATEGORY_CAP);
        Self {
            id,
            name,
            category,
            stock,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn category(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.category)
    }

    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    pub fn category_bytes(&self) -> &[u8] {
        &self.category
    }

    /// True when `needle` occurs in the name or the category. Matching is
    /// byte-for-byte, so it is case sensitive.
    pub fn matches_term(&self, needle: &[u8]) -> bool {
        text::contains(&self.name, needle) || text::contains(&self.category, needle)
    }
}
