//! sarmeta: Metadata handling utilities for SAR products
//!
//! This library collects the small, self-contained routines shared by SAR
//! metadata readers: slice-range validation and reversal for windowed raster
//! access, annotation timestamp parsing and delta computation, XML parsing
//! with namespace extraction, and commercial product-identifier formatting.

pub mod io;
pub mod naming;
pub mod slicing;
pub mod timing;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{MetaResult, MetadataError, Precision};

pub use io::xml::{from_xml_str, parse_xml_from_bytes, parse_xml_from_string, XmlElement};
pub use naming::get_commercial_id;
pub use slicing::{reverse_range, validate_range, RangeSpec};
pub use timing::{get_seconds, parse_timestring};
