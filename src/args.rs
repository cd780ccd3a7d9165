use clap::{Parser, Subcommand, ValueEnum};
use shelf::model::SortKey;

/// Returns the version string, including git hash and commit date for
/// non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version = get_version())]
#[command(about = "Fast, file-backed inventory tracking from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new item
    #[command(alias = "a")]
    Add {
        /// Item name
        name: String,

        /// Category (defaults to none)
        #[arg(required = false)]
        category: Option<String>,

        /// Stock quantity
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        stock: i32,
    },

    /// List all items
    #[command(alias = "ls")]
    List,

    /// Update an item in place, keeping its id and position
    #[command(alias = "e")]
    Update {
        /// Position in the list (see `shelf list`)
        position: usize,

        /// New name
        name: String,

        /// New category (defaults to none)
        #[arg(required = false)]
        category: Option<String>,

        /// New stock quantity
        #[arg(short, long, allow_negative_numbers = true)]
        stock: i32,
    },

    /// Delete one or more items by position
    #[command(alias = "rm")]
    Delete {
        /// Positions of the items (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,
    },

    /// Find an item by its exact name
    Find {
        /// Name to look up
        name: String,
    },

    /// Search names and categories for a substring (case sensitive)
    #[command(alias = "s")]
    Search {
        /// Term to look for
        term: String,
    },

    /// Show items at or below a stock threshold
    Low {
        /// Threshold (defaults to the configured value)
        #[arg(allow_negative_numbers = true)]
        threshold: Option<i32>,
    },

    /// Sort the inventory and save the new order
    Sort {
        /// Field to sort by
        #[arg(value_enum)]
        by: SortField,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, low-stock)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the path of the inventory file
    Path,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Name,
    Stock,
    Category,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Name => SortKey::Name,
            SortField::Stock => SortKey::Stock,
            SortField::Category => SortKey::Category,
        }
    }
}
