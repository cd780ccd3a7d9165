//! # API Facade
//!
//! [`ShelfApi`] is the single entry point a front end talks to. It owns the
//! [`Inventory`] and the path of the data file, normalizes user-facing
//! input (1-based positions, optional text fields), and returns structured
//! [`CmdResult`] values.
//!
//! What the facade does NOT do:
//! - **Business logic**: that lives in [`crate::store`]
//! - **I/O formatting**: no stdout, stderr or terminal assumptions; the
//!   caller renders [`CmdMessage`]s however it likes
//!
//! Positions in this module are 1-based, as a user sees them in a listing.
//! The store underneath is 0-based.

use crate::codec;
use crate::error::{Result, ShelfError};
use crate::model::{Item, SortKey};
use crate::store::Inventory;
use crate::text;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// An item snapshot paired with its 1-based position in the inventory.
#[derive(Debug, Clone)]
pub struct ListedItem {
    pub position: usize,
    pub item: Item,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<ListedItem>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listed: Vec<ListedItem>) -> Self {
        self.listed = listed;
        self
    }
}

pub struct ShelfApi {
    inventory: Inventory,
    data_file: PathBuf,
}

impl ShelfApi {
    /// Open the inventory at `data_file`: loaded if the file exists,
    /// empty otherwise. A file that ends mid-item loads leniently, keeping
    /// the items before the cut.
    pub fn open(data_file: PathBuf) -> Result<Self> {
        let inventory = if data_file.exists() {
            codec::load(&data_file)?
        } else {
            Inventory::new()
        };
        Ok(Self {
            inventory,
            data_file,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Write the inventory back to its data file.
    pub fn save(&self) -> Result<()> {
        codec::save(&self.inventory, &self.data_file)
    }

    /// Re-read the data file, replacing the in-memory inventory. On any
    /// failure the current inventory is left untouched.
    pub fn reload(&mut self) -> Result<()> {
        self.inventory = codec::load(&self.data_file)?;
        Ok(())
    }

    pub fn add_item(
        &mut self,
        name: Option<&str>,
        category: Option<&str>,
        stock: i32,
    ) -> Result<CmdResult> {
        self.inventory.create(name, category, stock)?;
        let position = self.inventory.len();
        let item = self
            .inventory
            .get(position - 1)
            .cloned()
            .expect("item was just appended");

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Item added ({}): {}",
            position,
            item.name()
        )));
        result.listed.push(ListedItem { position, item });
        Ok(result)
    }

    pub fn update_item(
        &mut self,
        position: usize,
        name: Option<&str>,
        category: Option<&str>,
        stock: i32,
    ) -> Result<CmdResult> {
        let index = self.resolve_position(position)?;
        self.inventory.update(index, name, category, stock)?;
        let item = self
            .inventory
            .get(index)
            .cloned()
            .expect("position was validated");

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Item updated ({}): {}",
            position,
            item.name()
        )));
        result.listed.push(ListedItem { position, item });
        Ok(result)
    }

    /// Remove one or more items by position. The whole batch is validated
    /// first, then applied highest position first so earlier removals do
    /// not shift the remaining targets.
    pub fn remove_items(&mut self, positions: &[usize]) -> Result<CmdResult> {
        let mut indexes = positions
            .iter()
            .map(|&p| self.resolve_position(p))
            .collect::<Result<Vec<_>>>()?;
        indexes.sort_unstable();
        indexes.dedup();

        let mut result = CmdResult::default();
        for &index in indexes.iter().rev() {
            let name = self
                .inventory
                .get(index)
                .expect("position was validated")
                .name()
                .into_owned();
            self.inventory.delete(index)?;
            result.add_message(CmdMessage::success(format!(
                "Item removed ({}): {}",
                index + 1,
                name
            )));
        }
        Ok(result)
    }

    pub fn list_items(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default().with_listed(self.snapshot_all());

        let garbled = self
            .inventory
            .items()
            .iter()
            .filter(|item| {
                !text::is_valid_utf8(item.name_bytes())
                    || !text::is_valid_utf8(item.category_bytes())
            })
            .count();
        if garbled > 0 {
            result.add_message(CmdMessage::warning(format!(
                "{} item(s) contain invalid UTF-8 and are shown lossily",
                garbled
            )));
        }
        Ok(result)
    }

    /// Exact-name lookup. A miss is reported as a warning message, not an
    /// error.
    pub fn find_item(&self, name: &str) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        match self.inventory.find_by_name(name) {
            Some(index) => {
                result.listed.push(ListedItem {
                    position: index + 1,
                    item: self
                        .inventory
                        .get(index)
                        .cloned()
                        .expect("index came from find_by_name"),
                });
            }
            None => {
                result.add_message(CmdMessage::warning(format!("No item named '{}'", name)));
            }
        }
        Ok(result)
    }

    pub fn search_items(&self, term: &str) -> Result<CmdResult> {
        let needle = term.as_bytes();
        let listed: Vec<ListedItem> = self
            .inventory
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches_term(needle))
            .map(|(index, item)| ListedItem {
                position: index + 1,
                item: item.clone(),
            })
            .collect();

        let mut result = CmdResult::default().with_listed(listed);
        if result.listed.is_empty() {
            result.add_message(CmdMessage::info(format!("No matches for '{}'", term)));
        }
        Ok(result)
    }

    pub fn low_stock_items(&self, threshold: i32) -> Result<CmdResult> {
        let listed: Vec<ListedItem> = self
            .inventory
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.stock() <= threshold)
            .map(|(index, item)| ListedItem {
                position: index + 1,
                item: item.clone(),
            })
            .collect();

        let mut result = CmdResult::default().with_listed(listed);
        if result.listed.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "No items at or below {}",
                threshold
            )));
        }
        Ok(result)
    }

    pub fn sort_items(&mut self, key: SortKey) -> Result<CmdResult> {
        self.inventory.sort(key);
        let mut result = CmdResult::default().with_listed(self.snapshot_all());
        result.add_message(CmdMessage::success(format!("Sorted by {}", key)));
        Ok(result)
    }

    fn snapshot_all(&self) -> Vec<ListedItem> {
        self.inventory
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| ListedItem {
                position: index + 1,
                item: item.clone(),
            })
            .collect()
    }

    fn resolve_position(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.inventory.len() {
            return Err(ShelfError::Api(format!(
                "No item at position {} (positions start at 1)",
                position
            )));
        }
        Ok(position - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn api_in(dir: &tempfile::TempDir) -> ShelfApi {
        ShelfApi::open(dir.path().join("inventory.dat")).unwrap()
    }

    #[test]
    fn open_without_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let api = api_in(&dir);
        assert!(api.inventory().is_empty());
    }

    #[test]
    fn save_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        api.add_item(Some("Hammer"), Some("Tools"), 12).unwrap();
        api.save().unwrap();

        let reopened = api_in(&dir);
        assert_eq!(reopened.inventory().len(), 1);
        assert_eq!(reopened.inventory().get(0).unwrap().name(), "Hammer");
    }

    #[test]
    fn add_reports_position_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        let result = api.add_item(Some("Hammer"), Some("Tools"), 12).unwrap();

        assert_eq!(result.listed[0].position, 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("Hammer"));
    }

    #[test]
    fn remove_items_handles_multiple_positions() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        for name in ["A", "B", "C"] {
            api.add_item(Some(name), Some(""), 1).unwrap();
        }

        // Positions given low-to-high must still remove the right items.
        api.remove_items(&[1, 3]).unwrap();

        assert_eq!(api.inventory().len(), 1);
        assert_eq!(api.inventory().get(0).unwrap().name(), "B");
    }

    #[test]
    fn remove_items_rejects_whole_batch_on_bad_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        api.add_item(Some("A"), Some(""), 1).unwrap();

        assert!(api.remove_items(&[1, 9]).is_err());
        assert_eq!(api.inventory().len(), 1);
    }

    #[test]
    fn update_rejects_position_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        api.add_item(Some("A"), Some(""), 1).unwrap();

        assert!(matches!(
            api.update_item(0, Some("B"), Some(""), 1),
            Err(ShelfError::Api(_))
        ));
    }

    #[test]
    fn find_misses_with_warning_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let api = api_in(&dir);
        let result = api.find_item("Ghost").unwrap();
        assert!(result.listed.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn search_reports_store_positions() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        api.add_item(Some("Product A"), Some("Food"), 10).unwrap();
        api.add_item(Some("Widget"), Some("Hardware"), 3).unwrap();
        api.add_item(Some("Energy Bar"), Some("Protein"), 7).unwrap();

        let result = api.search_items("Pro").unwrap();
        let positions: Vec<usize> = result.listed.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn reload_failure_leaves_inventory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(&dir);
        api.add_item(Some("Hammer"), Some("Tools"), 12).unwrap();

        // A corrupt header must not clobber the in-memory state.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        fs::write(api.data_file(), bytes).unwrap();

        assert!(api.reload().is_err());
        assert_eq!(api.inventory().len(), 1);
    }

    #[test]
    fn list_warns_about_invalid_utf8_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");

        // Craft a file whose name field holds invalid UTF-8.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&2i32.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        let mut name = [0u8; 256];
        name[..3].copy_from_slice(&[0xFF, 0xFE, 0xFD]);
        bytes.extend_from_slice(&name);
        bytes.extend_from_slice(&[0u8; 128]);
        bytes.extend_from_slice(&1i32.to_le_bytes());
        fs::write(&path, bytes).unwrap();

        let api = ShelfApi::open(path).unwrap();
        let result = api.list_items().unwrap();
        assert_eq!(result.listed.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }
}
