//! # Inventory File Codec
//!
//! Reads and writes the whole inventory as one fixed-layout binary file.
//!
//! ## File Format
//!
//! All integers are 4-byte signed little-endian. Text fields are
//! fixed-width byte buffers: the text, a NUL, then zero padding.
//!
//! ```text
//! item_count : i32
//! next_id    : i32
//! item, repeated item_count times:
//!   id       : i32
//!   name     : [u8; 256]
//!   category : [u8; 128]
//!   stock    : i32
//! ```
//!
//! There is no magic number, version field or checksum; the layout is
//! positionally fixed. Fixed-width records make each item O(1) to decode
//! and let a cut-off file still yield every item before the cut.
//!
//! ## Truncated Files
//!
//! [`load`] treats a file that ends mid-item as a short inventory, not an
//! error: items fully read before the cut are kept and the load succeeds.
//! [`load_strict`] is the same reader with that case promoted to
//! [`ShelfError::Corrupt`], for callers that would rather hear about it.
//! On read-back, text fields are clamped to the first NUL within their
//! width (the final byte counts as one), so no unterminated text ever
//! reaches the inventory.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::error::{Result, ShelfError};
use crate::model::{Item, CATEGORY_CAP, MAX_ITEMS, NAME_CAP};
use crate::store::Inventory;

const ZEROS: [u8; NAME_CAP] = [0; NAME_CAP];

/// Write the whole inventory to `path`, replacing whatever was there.
pub fn save(inventory: &Inventory, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    write_i32(&mut out, inventory.len() as i32)?;
    write_i32(&mut out, inventory.next_id())?;

    for item in inventory.items() {
        write_i32(&mut out, item.id())?;
        write_field(&mut out, item.name_bytes(), NAME_CAP)?;
        write_field(&mut out, item.category_bytes(), CATEGORY_CAP)?;
        write_i32(&mut out, item.stock())?;
    }

    out.flush()?;
    Ok(())
}

/// Read an inventory from `path`.
///
/// Fails with `Io` when the file cannot be opened and with `Corrupt` when
/// the declared item count is out of range. A file that ends mid-item
/// yields the items read so far and still succeeds.
pub fn load(path: &Path) -> Result<Inventory> {
    read_file(path, false)
}

/// Like [`load`], but a file that ends mid-item is an error.
pub fn load_strict(path: &Path) -> Result<Inventory> {
    read_file(path, true)
}

fn read_file(path: &Path, strict: bool) -> Result<Inventory> {
    let mut input = BufReader::new(File::open(path)?);

    let count = read_i32(&mut input)?;
    let next_id = read_i32(&mut input)?;
    if count < 0 || count as usize > MAX_ITEMS {
        return Err(ShelfError::Corrupt(format!(
            "item count {} out of range",
            count
        )));
    }

    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match read_item(&mut input) {
            Ok(item) => items.push(item),
            Err(ShelfError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                if strict {
                    return Err(ShelfError::Corrupt(format!(
                        "file ends mid-item after {} of {} items",
                        items.len(),
                        count
                    )));
                }
                // Keep what was fully read.
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Inventory::from_parts(items, next_id))
}

fn read_item<R: Read>(input: &mut R) -> Result<Item> {
    let id = read_i32(input)?;
    let name = read_field(input, NAME_CAP)?;
    let category = read_field(input, CATEGORY_CAP)?;
    let stock = read_i32(input)?;
    Ok(Item::from_parts(id, name, category, stock))
}

fn read_i32<R: Read>(input: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a fixed-width text field, clamped to its first NUL. The last byte
/// is treated as a terminator whatever the file says, so at most
/// `width - 1` bytes of text come back.
fn read_field<R: Read>(input: &mut R, width: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; width];
    input.read_exact(&mut buf)?;

    let end = buf[..width - 1]
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(width - 1);
    buf.truncate(end);
    Ok(buf)
}

fn write_i32<W: Write>(out: &mut W, value: i32) -> Result<()> {
    out.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_field<W: Write>(out: &mut W, bytes: &[u8], width: usize) -> Result<()> {
    // Item fields are bounded on the way in, so the clamp is a no-op for
    // anything built through the store.
    let len = bytes.len().min(width - 1);
    out.write_all(&bytes[..len])?;
    out.write_all(&ZEROS[..width - len])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortKey;
    use std::fs;

    const ITEM_LEN: u64 = 4 + NAME_CAP as u64 + CATEGORY_CAP as u64 + 4;
    const HEADER_LEN: u64 = 8;

    fn sample_inventory() -> Inventory {
        let mut inv = Inventory::new();
        inv.create(Some("Hammer"), Some("Tools"), 12).unwrap();
        inv.create(Some("Müsli"), Some("Food"), 3).unwrap();
        inv.create(Some("Rope"), Some(""), 0).unwrap();
        inv
    }

    #[test]
    fn round_trip_preserves_items_and_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");
        let inv = sample_inventory();

        save(&inv, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.items(), inv.items());
        assert_eq!(loaded.next_id(), inv.next_id());
    }

    #[test]
    fn round_trip_of_empty_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");

        save(&Inventory::new(), &path).unwrap();
        let loaded = load(&path).unwrap();

        assert!(loaded.is_empty());
        assert_eq!(loaded.next_id(), 1);
    }

    #[test]
    fn round_trip_survives_sorting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");
        let mut inv = sample_inventory();
        inv.sort(SortKey::Name);

        save(&inv, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.items(), inv.items());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.dat")).unwrap_err();
        assert!(matches!(err, ShelfError::Io(_)));
    }

    #[test]
    fn load_rejects_negative_item_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dat");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-1i32).to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        fs::write(&path, bytes).unwrap();

        assert!(matches!(load(&path), Err(ShelfError::Corrupt(_))));
    }

    #[test]
    fn load_rejects_oversized_item_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dat");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(MAX_ITEMS as i32 + 1).to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        fs::write(&path, bytes).unwrap();

        assert!(matches!(load(&path), Err(ShelfError::Corrupt(_))));
    }

    #[test]
    fn truncated_file_keeps_fully_read_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");
        save(&sample_inventory(), &path).unwrap();

        // Cut the third item in half.
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(HEADER_LEN + 2 * ITEM_LEN + 100).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(0).unwrap().name(), "Hammer");
        assert_eq!(loaded.get(1).unwrap().name(), "Müsli");
        // The declared counter still round-trips.
        assert_eq!(loaded.next_id(), 4);
    }

    #[test]
    fn truncation_at_item_boundary_keeps_whole_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");
        save(&sample_inventory(), &path).unwrap();

        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(HEADER_LEN + ITEM_LEN).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().name(), "Hammer");
    }

    #[test]
    fn load_strict_rejects_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");
        save(&sample_inventory(), &path).unwrap();

        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(HEADER_LEN + 2 * ITEM_LEN + 100).unwrap();

        assert!(matches!(load_strict(&path), Err(ShelfError::Corrupt(_))));
        // The lenient reader still accepts the same file.
        assert_eq!(load(&path).unwrap().len(), 2);
    }

    #[test]
    fn unterminated_name_field_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.dat");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes()); // item_count
        bytes.extend_from_slice(&2i32.to_le_bytes()); // next_id
        bytes.extend_from_slice(&1i32.to_le_bytes()); // id
        bytes.extend_from_slice(&[0xAA; NAME_CAP]); // name without any NUL
        bytes.extend_from_slice(&[0u8; CATEGORY_CAP]);
        bytes.extend_from_slice(&7i32.to_le_bytes()); // stock
        fs::write(&path, bytes).unwrap();

        let loaded = load(&path).unwrap();
        let item = loaded.get(0).unwrap();
        assert_eq!(item.name_bytes().len(), NAME_CAP - 1);
        assert_eq!(item.stock(), 7);
    }

    #[test]
    fn trailing_bytes_beyond_declared_count_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.dat");
        save(&sample_inventory(), &path).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        bytes.extend_from_slice(b"junk after the last item");
        fs::write(&path, bytes).unwrap();

        assert_eq!(load(&path).unwrap().len(), 3);
    }
}
