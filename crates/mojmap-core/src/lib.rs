//! Parsing and searching of obfuscation mapping files.
//!
//! A mapping file associates readable class, method and field names with the short names
//! produced by an obfuscating build step:
//!
//! ```text
//! net.minecraft.world.entity.Entity -> bsr:
//!     int id -> b
//!     21:21:java.lang.String getName(int,java.lang.String) -> a
//! ```
//!
//! [`parse_mappings`] turns that text into an immutable [`MappingIndex`] and [`search`] runs
//! bounded, case-insensitive substring queries against it:
//!
//! ```
//! let index = mojmap_core::parse_mappings(
//!     "a.b.C -> x:\n    int fieldOne -> f\n    java.lang.String method(int) -> m\n",
//! )
//! .unwrap();
//!
//! let result = index.search("field", 10);
//! assert_eq!(result.num_results, 2);
//! assert!(!result.limit_reached);
//! assert_eq!(result.results[0].class_name, "a.b.C");
//! ```
//!
//! The [`version`] module describes the shape of the upstream version catalog, which callers use
//! to locate the mapping file for a given version and [`Side`]. Nothing in this crate performs
//! I/O.

#![forbid(unsafe_code)]

mod error;
mod line;
mod model;
mod parser;
mod search;
pub mod version;

pub use crate::error::{Error, MalformedReason, Result};
pub use crate::line::{classify_line, simplify_type, MappingLine};
pub use crate::model::{ClassEntry, FieldEntry, MappingIndex, MappingStats, MethodOverload};
pub use crate::parser::parse_mappings;
pub use crate::search::{search, ClassMatch, FieldMatch, MethodMatch, SearchResult};
pub use crate::version::{Side, VersionCatalog, VersionInfo, VersionPackage, VersionType};
