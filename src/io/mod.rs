pub mod xml;

pub use xml::{from_xml_str, parse_xml_from_bytes, parse_xml_from_string, XmlElement};
