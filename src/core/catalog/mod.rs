//! Translation catalog I/O.
//!
//! ## Module Structure
//!
//! - `reader`: Parse `.strings` catalogs into value and comment maps
//! - `format_variants`: Root keys of `.stringsdict` format-variant catalogs
//! - `writer`: Render and atomically persist `.strings` catalogs

use std::collections::{BTreeMap, BTreeSet};

pub mod format_variants;
pub mod reader;
pub mod writer;

pub use format_variants::{FORMAT_VARIANT_EXTENSION, load_format_variant_keys};
pub use reader::{parse_comments, parse_values, read_catalog};
pub use writer::{render_catalog, sanitize_comment, write_catalog};

/// Source file name → keys extracted from it.
pub type KeysByFile = BTreeMap<String, BTreeSet<String>>;
