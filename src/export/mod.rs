//! Export layer: classification records and how they are read from disk.
//!
//! An export is a YAML (or JSON) mapping of record key -> attribute mapping,
//! where every attribute mapping carries a `name` field. The outer key only
//! identifies the record in error messages; the member name reported in the
//! normalized output is the value of `name`.

pub mod load;
pub mod record;

pub use load::parse_export_file;
pub use record::{Attributes, CanonicalKey, Record};
