use crate::types::{MetaResult, MetadataError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// An owned XML element tree node.
///
/// Tag names keep the qualified form they have in the document
/// (`prefix:tag` for namespaced elements); prefixes are resolved through
/// the namespace map returned alongside the root. Namespace declarations
/// are not included among the attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(tag: String) -> Self {
        XmlElement {
            tag,
            attributes: HashMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// First direct child with the given tag
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Element text, trimmed; empty string when the element has none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Parse an XML document from a string into its root element and the
/// namespace prefix-to-URI mapping declared anywhere in the document.
///
/// The default (unprefixed) namespace is stored under the key
/// `"default"`. A document that declares no namespaces yields `None`
/// for the mapping.
pub fn parse_xml_from_string(
    xml_string: &str,
) -> MetaResult<(XmlElement, Option<HashMap<String, String>>)> {
    log::debug!("Parsing XML document ({} bytes)", xml_string.len());

    let mut reader = Reader::from_str(xml_string);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut namespaces: HashMap<String, String> = HashMap::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let element = element_from_start(e, &mut namespaces)?;
                stack.push(element);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e, &mut namespaces)?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    MetadataError::XmlParsing("unbalanced closing tag".to_string())
                })?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(ref e)) => {
                let content = e
                    .unescape()
                    .map_err(|err| MetadataError::XmlParsing(format!("bad text content: {}", err)))?;
                append_text(&mut stack, &content);
            }
            Ok(Event::CData(e)) => {
                let content = String::from_utf8_lossy(&e.into_inner()).to_string();
                append_text(&mut stack, &content);
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions
            Ok(_) => {}
            Err(err) => {
                return Err(MetadataError::XmlParsing(format!(
                    "malformed XML at position {}: {}",
                    reader.buffer_position(),
                    err
                )))
            }
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(MetadataError::XmlParsing(format!(
            "unclosed element '{}'",
            stack[stack.len() - 1].tag
        )));
    }
    let root = root
        .ok_or_else(|| MetadataError::XmlParsing("document has no root element".to_string()))?;
    let namespaces = if namespaces.is_empty() {
        None
    } else {
        Some(namespaces)
    };
    Ok((root, namespaces))
}

/// Byte-string variant of [`parse_xml_from_string`]; the input must be
/// valid UTF-8.
pub fn parse_xml_from_bytes(
    xml_bytes: &[u8],
) -> MetaResult<(XmlElement, Option<HashMap<String, String>>)> {
    let xml_string = std::str::from_utf8(xml_bytes)
        .map_err(|e| MetadataError::XmlParsing(format!("document is not valid UTF-8: {}", e)))?;
    parse_xml_from_string(xml_string)
}

/// Deserialize a metadata document straight into a serde-derived struct
pub fn from_xml_str<T: serde::de::DeserializeOwned>(xml_string: &str) -> MetaResult<T> {
    quick_xml::de::from_str(xml_string)
        .map_err(|e| MetadataError::XmlParsing(format!("failed to deserialize XML: {}", e)))
}

/// Build an element from a start tag, siphoning off xmlns declarations
/// into the namespace map.
fn element_from_start(
    e: &BytesStart<'_>,
    namespaces: &mut HashMap<String, String>,
) -> MetaResult<XmlElement> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut element = XmlElement::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            MetadataError::XmlParsing(format!(
                "bad attribute on element '{}': {}",
                element.tag, err
            ))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| {
                MetadataError::XmlParsing(format!(
                    "bad attribute value on element '{}': {}",
                    element.tag, err
                ))
            })?
            .to_string();

        if key == "xmlns" {
            namespaces.insert("default".to_string(), value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.insert(prefix.to_string(), value);
        } else {
            element.attributes.insert(key, value);
        }
    }
    Ok(element)
}

fn attach(
    element: XmlElement,
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
) -> MetaResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(MetadataError::XmlParsing(
            "multiple root elements".to_string(),
        ));
    }
    Ok(())
}

fn append_text(stack: &mut [XmlElement], content: &str) {
    if let Some(current) = stack.last_mut() {
        match current.text {
            Some(ref mut existing) => existing.push_str(content),
            None => current.text = Some(content.to_string()),
        }
    }
}
