//! A small immutable XML element tree and the lazy search helpers used to walk it.
//!
//! Tags and attribute names are spelled in Clark notation (`{namespace-uri}local`)
//! when they live in a namespace and as the bare local name otherwise.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::{GpxMapError, Result};

/// One parsed XML element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Text before the first child element, if any.
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Depth-first, document-order walk over this element and all of its descendants.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Lazy pre-order traversal. Clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// True when `element` carries `attribute` with exactly `value`.
///
/// An empty `value` matches nothing.
pub fn matches(element: &Element, attribute: &str, value: &str) -> bool {
    !value.is_empty() && element.attribute(attribute) == Some(value)
}

pub fn find_by_attribute<'a>(
    root: &'a Element,
    attribute: &'a str,
    value: &'a str,
) -> impl Iterator<Item = &'a Element> + Clone {
    root.iter()
        .filter(move |element| matches(element, attribute, value))
}

pub fn find_by_tag<'a>(root: &'a Element, tag: &'a str) -> impl Iterator<Item = &'a Element> + Clone {
    root.iter().filter(move |element| element.tag == tag)
}

pub fn find_first_by_tag<'a>(root: &'a Element, tag: &str) -> Option<&'a Element> {
    root.iter().find(|element| element.tag == tag)
}

/// Parse an XML document into its root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let namespace = namespace_uri(resolved)?;
        match event {
            Event::Start(e) => {
                let element = start_element(&reader, namespace, &e)?;
                open.push(element);
            }
            Event::Empty(e) => {
                let element = start_element(&reader, namespace, &e)?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                let element = open.pop().ok_or_else(|| {
                    GpxMapError::MalformedXml("closing tag without an opening tag".to_string())
                })?;
                close_element(&mut open, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e.xml10_content().map_err(quick_xml::Error::from)?;
                push_text(&mut open, &text)?;
            }
            Event::CData(e) => {
                let text = e.xml10_content().map_err(quick_xml::Error::from)?;
                push_text(&mut open, &text)?;
            }
            Event::GeneralRef(e) => {
                let resolved = match e
                    .resolve_char_ref()
                    .map_err(|e| GpxMapError::XmlParse(e.into()))?
                {
                    Some(ch) => ch,
                    None => {
                        let name = String::from_utf8_lossy(e.as_ref());
                        match &*name {
                            "amp" => '&',
                            "lt" => '<',
                            "gt" => '>',
                            "quot" => '"',
                            "apos" => '\'',
                            _ => {
                                return Err(GpxMapError::MalformedXml(format!(
                                    "undefined entity &{name};"
                                )));
                            }
                        }
                    }
                };
                push_text(&mut open, resolved.encode_utf8(&mut [0; 4]))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(GpxMapError::MalformedXml(format!(
            "unclosed element <{}>",
            unclosed.tag
        )));
    }
    root.ok_or_else(|| GpxMapError::MalformedXml("no root element".to_string()))
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(GpxMapError::MalformedXml(format!(
            "unbound prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn clark_name(namespace: Option<String>, local: &[u8]) -> String {
    let local = String::from_utf8_lossy(local);
    match namespace {
        Some(uri) => format!("{{{uri}}}{local}"),
        None => local.into_owned(),
    }
}

fn start_element(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element> {
    let mut element = Element::new(clark_name(namespace, start.local_name().as_ref()));

    for attr_result in start.attributes() {
        let attr = attr_result.map_err(|e| GpxMapError::XmlParse(e.into()))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (resolved, local) = reader.resolver().resolve_attribute(attr.key);
        let name = clark_name(namespace_uri(resolved)?, local.as_ref());
        let raw = String::from_utf8_lossy(&attr.value);
        if raw.contains('<') {
            return Err(GpxMapError::MalformedXml(format!(
                "'<' in the value of attribute '{name}'"
            )));
        }
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|e| GpxMapError::XmlParse(e.into()))?
            .into_owned();
        element.attributes.push((name, value));
    }

    Ok(element)
}

fn close_element(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(GpxMapError::MalformedXml(
                "more than one root element".to_string(),
            ));
        }
    }
    Ok(())
}

// Text after a child element is a tail and is dropped.
fn push_text(open: &mut [Element], text: &str) -> Result<()> {
    match open.last_mut() {
        Some(current) if current.children.is_empty() && !text.is_empty() => {
            current.text.get_or_insert_with(String::new).push_str(text);
        }
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => {
            return Err(GpxMapError::MalformedXml(
                "text outside the root element".to_string(),
            ));
        }
    }
    Ok(())
}
