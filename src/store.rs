//! # The Inventory
//!
//! [`Inventory`] is a bounded, ordered collection of [`Item`]s plus the
//! counter used to assign ids.
//!
//! ## Ordering Contract
//!
//! Items keep their insertion positions: new items are appended, updates
//! happen in place, and deleting position `i` shifts every later item one
//! position down. Nothing reorders the collection except
//! [`Inventory::sort`], which the caller invokes explicitly.
//!
//! ## Ids
//!
//! Ids are assigned from `next_id` (starting at 1) and never reused while
//! the inventory lives. Two inventories loaded from different files can
//! hand out colliding ids; there is no cross-file guarantee.
//!
//! ## Rejections
//!
//! Mutations validate first and mutate second, so a rejected call leaves
//! the inventory exactly as it was. Rejections come back as
//! [`ShelfError`](crate::error::ShelfError) values, never panics:
//!
//! - `MissingField`: a name/category argument was absent (`None`); an
//!   empty string is fine
//! - `AtCapacity`: the inventory already holds [`MAX_ITEMS`] items
//! - `NegativeStock`: stock below zero
//! - `IndexOutOfBounds`: index past the end (indexes here are 0-based)

use crate::error::{Result, ShelfError};
use crate::model::{Item, SortKey, CATEGORY_CAP, MAX_ITEMS, NAME_CAP};
use crate::text;

#[derive(Debug)]
pub struct Inventory {
    items: Vec<Item>,
    next_id: i32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// An empty inventory, with ids starting from 1.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from previously persisted parts. The codec is responsible
    /// for having bounded the item fields.
    pub(crate) fn from_parts(items: Vec<Item>, next_id: i32) -> Self {
        Self { items, next_id }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// The id the next created item will receive.
    pub fn next_id(&self) -> i32 {
        self.next_id
    }

    /// Reset to the empty, freshly-initialized state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 1;
    }

    /// Append a new item and return its id.
    ///
    /// `None` for name or category models an absent input (a form field
    /// that was never filled in) and is rejected; `Some("")` is accepted.
    /// Text longer than its field capacity is truncated byte-wise.
    pub fn create(
        &mut self,
        name: Option<&str>,
        category: Option<&str>,
        stock: i32,
    ) -> Result<i32> {
        let name = name.ok_or(ShelfError::MissingField("name"))?;
        let category = category.ok_or(ShelfError::MissingField("category"))?;
        if self.items.len() >= MAX_ITEMS {
            return Err(ShelfError::AtCapacity);
        }
        if stock < 0 {
            return Err(ShelfError::NegativeStock);
        }

        let id = self.next_id;
        self.items.push(Item::from_parts(
            id,
            text::sanitize(name.as_bytes(), NAME_CAP),
            text::sanitize(category.as_bytes(), CATEGORY_CAP),
            stock,
        ));
        self.next_id += 1;
        Ok(id)
    }

    /// Overwrite name, category and stock at `index`. Id and position are
    /// untouched.
    pub fn update(
        &mut self,
        index: usize,
        name: Option<&str>,
        category: Option<&str>,
        stock: i32,
    ) -> Result<()> {
        if index >= self.items.len() {
            return Err(ShelfError::IndexOutOfBounds(index));
        }
        let name = name.ok_or(ShelfError::MissingField("name"))?;
        let category = category.ok_or(ShelfError::MissingField("category"))?;
        if stock < 0 {
            return Err(ShelfError::NegativeStock);
        }

        let id = self.items[index].id();
        self.items[index] = Item::from_parts(
            id,
            text::sanitize(name.as_bytes(), NAME_CAP),
            text::sanitize(category.as_bytes(), CATEGORY_CAP),
            stock,
        );
        Ok(())
    }

    /// Remove the item at `index`; later items shift one position down.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(ShelfError::IndexOutOfBounds(index));
        }
        self.items.remove(index);
        Ok(())
    }

    /// Position of the first item whose name matches `name` exactly.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name_bytes() == name.as_bytes())
    }

    /// Snapshot of every item whose name or category contains `term`,
    /// in inventory order. Matching is case sensitive; an empty term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<Item> {
        let needle = term.as_bytes();
        self.items
            .iter()
            .filter(|item| item.matches_term(needle))
            .cloned()
            .collect()
    }

    /// Snapshot of every item with `stock <= threshold`, in inventory
    /// order.
    pub fn low_stock(&self, threshold: i32) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.stock() <= threshold)
            .cloned()
            .collect()
    }

    /// Reorder in place: byte-lexicographic for text keys, ascending for
    /// stock. The sort is stable, so equal keys keep their relative order.
    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self
                .items
                .sort_by(|a, b| a.name_bytes().cmp(b.name_bytes())),
            SortKey::Stock => self.items.sort_by_key(|item| item.stock()),
            SortKey::Category => self
                .items
                .sort_by(|a, b| a.category_bytes().cmp(b.category_bytes())),
        }
    }
}
