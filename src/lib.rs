//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic inventory library**. The CLI binary is one
//! client of it; nothing from `api.rs` inward knows about terminals,
//! stdout or exit codes.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, renders tables, colors messages        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the inventory and codec                 │
//! │  - Normalizes inputs (1-based positions → indexes)          │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store.rs, codec.rs, text.rs, model.rs)               │
//! │  - Bounded, ordered, id-assigning item collection           │
//! │  - Fixed-layout binary persistence                          │
//! │  - Byte-bounded text sanitation                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Model
//!
//! The whole inventory is one binary file, rewritten on save and read
//! back whole on load. Loading is deliberately lenient: a file cut off
//! mid-item yields the items before the cut rather than failing (see
//! [`codec`] for the format and [`codec::load_strict`] for the strict
//! variant). The CLI loads at startup and saves after every mutating
//! command.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns plain
//! Rust values, and signals every rejection through
//! [`error::ShelfError`]: never a panic, never a print.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade a front end talks to
//! - [`store`]: The in-memory inventory and its operations
//! - [`codec`]: Binary save/load of the inventory file
//! - [`text`]: Byte-level text validation and bounding
//! - [`model`]: Core data types ([`model::Item`], [`model::SortKey`])
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod text;
