//! A minimal owned element tree built on top of `quick-xml`'s event reader.
//!
//! Task-sequence documents are small, so the reader materializes the whole
//! tree and lets the conversion layer walk it with simple lookups.

use crate::error::InputError;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// An XML element with its attributes, child elements and concatenated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    /// Parses a complete document and returns its root element.
    pub fn parse(xml: &str) -> Result<XmlElement, InputError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                InputError::Malformed(format!(
                    "{} (at byte {})",
                    e,
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Start(start) => stack.push(Self::open(&start)?),
                Event::Empty(start) => {
                    let element = Self::open(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| {
                        InputError::Malformed("closing tag without an opening tag".to_string())
                    })?;
                    element.text = element.text.trim().to_string();
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = utf8(&text)?;
                        let decoded = unescape(raw)
                            .map_err(|e| InputError::Malformed(e.to_string()))?;
                        current.text.push_str(&decoded);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(utf8(&data)?);
                    }
                }
                Event::GeneralRef(reference) => {
                    if let Some(current) = stack.last_mut() {
                        let entity = format!("&{};", utf8(&reference)?);
                        let decoded = unescape(&entity)
                            .map_err(|e| InputError::Malformed(e.to_string()))?;
                        current.text.push_str(&decoded);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(InputError::Malformed(format!(
                "element <{}> is never closed",
                open.name
            )));
        }
        root.ok_or_else(|| InputError::Malformed("document has no root element".to_string()))
    }

    fn open(start: &BytesStart<'_>) -> Result<XmlElement, InputError> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| InputError::Malformed(e.to_string()))?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = unescape(utf8(&attr.value)?)
                .map_err(|e| InputError::Malformed(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(XmlElement {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<(), InputError> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(InputError::Malformed(
                    "document has more than one root element".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Reads a boolean attribute; anything but a case-insensitive `true` is false.
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Depth-first search for the first element named `name`, starting with `self`.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, InputError> {
    std::str::from_utf8(bytes).map_err(|e| InputError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let root = XmlElement::parse(
            r#"<sequence version="3.10"><group name="G"><step name="S" /></group></sequence>"#,
        )
        .unwrap();
        assert_eq!(root.name, "sequence");
        assert_eq!(root.attr("version"), Some("3.10"));
        let group = root.child("group").unwrap();
        assert_eq!(group.attr("name"), Some("G"));
        assert_eq!(group.children[0].attr("name"), Some("S"));
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() {
        let root = XmlElement::parse(
            r#"<v name="a &amp; b">x &lt; y &#65;<![CDATA[ & raw]]></v>"#,
        )
        .unwrap();
        assert_eq!(root.attr("name"), Some("a & b"));
        assert_eq!(root.text, "x < y A & raw");
    }

    #[test]
    fn rejects_unbalanced_documents() {
        assert!(XmlElement::parse("<sequence><group></sequence>").is_err());
        assert!(XmlElement::parse("").is_err());
        assert!(XmlElement::parse("not xml at all").is_err());
    }

    #[test]
    fn finds_nested_sequence() {
        let root = XmlElement::parse(
            "<Package><SequenceData><sequence><step name=\"S\"/></sequence></SequenceData></Package>",
        )
        .unwrap();
        let sequence = root.find("sequence").unwrap();
        assert_eq!(sequence.children.len(), 1);
    }
}
