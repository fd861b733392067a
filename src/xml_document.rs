//! Parsed XML documents and field extraction
//!
//! The remote API answers with small, fixed-shape XML documents. They are
//! read once with quick-xml into an owned element tree which the builders
//! then query by element name. Only element names and text content are
//! kept; attributes and namespaces are never consulted by the API mapping.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::TvdbError;

/// A single element with its text content and child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text content of this element and all of its descendants.
    ///
    /// Only the surrounding whitespace of the whole value is trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The direct child elements, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Iterates all descendants named `name` in document order.
    ///
    /// The element itself is not included.
    pub fn descendants<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
        .filter(move |element| element.name == name)
    }

    /// Returns the text of the first descendant named `name`.
    ///
    /// A missing field yields an empty string, so callers only ever need a
    /// single blank check regardless of whether the element was absent or empty.
    pub fn field(&self, name: &str) -> &str {
        self.descendants(name)
            .next()
            .map(Element::text)
            .unwrap_or_default()
    }
}

/// Pre-order traversal over an element subtree.
struct Descendants<'a> {
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

/// A parsed response document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// Synthetic container holding the document element as its only child
    root: Element,
}

impl XmlDocument {
    /// Parses response text into a document.
    ///
    /// Fails with [`TvdbError::MalformedDocument`] on invalid XML, unclosed
    /// elements, or when the text contains no element at all.
    pub fn parse(xml: &str) -> Result<Self, TvdbError> {
        // Text is kept raw here and trimmed once per element when it closes
        let mut reader = Reader::from_reader(xml.as_bytes());

        let mut buf = Vec::new();
        // Open elements; the bottom entry is the synthetic root
        let mut stack = vec![Element::default()];

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(Element {
                        name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
                        ..Element::default()
                    });
                }
                Ok(Event::Empty(e)) => {
                    let element = Element {
                        name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
                        ..Element::default()
                    };
                    push_child(&mut stack, element);
                }
                Ok(Event::End(_)) => {
                    // quick-xml already verified the end tag matches the open one
                    if stack.len() < 2 {
                        return Err(malformed("unexpected closing tag"));
                    }
                    if let Some(mut element) = stack.pop() {
                        append_text(&mut stack, &element.text);
                        element.text = element.text.trim().to_string();
                        push_child(&mut stack, element);
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| malformed(&format!("XML parse error: {}", e)))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e);
                    append_text(&mut stack, &text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(malformed(&format!("XML parse error: {}", e))),
                _ => {}
            }
            buf.clear();
        }

        if stack.len() != 1 {
            let open = stack.last().map(|e| e.name.clone()).unwrap_or_default();
            return Err(malformed(&format!("unclosed element <{}>", open)));
        }

        let root = stack.pop().unwrap_or_default();
        if root.children.is_empty() {
            return Err(malformed("document contains no elements"));
        }

        Ok(Self { root })
    }

    /// The document element.
    pub fn document_element(&self) -> Option<&Element> {
        self.root.children.first()
    }

    /// Iterates all elements named `name` anywhere in the document, in document order.
    pub fn descendants<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.root.descendants(name)
    }

    /// The first element named `name` anywhere in the document.
    pub fn first(&self, name: &str) -> Option<&Element> {
        self.descendants(name).next()
    }
}

fn push_child(stack: &mut [Element], element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

fn append_text(stack: &mut [Element], text: &str) {
    // Text outside the document element is ignored
    if stack.len() < 2 {
        return;
    }
    if let Some(current) = stack.last_mut() {
        current.text.push_str(text);
    }
}

fn malformed(reason: &str) -> TvdbError {
    TvdbError::MalformedDocument(reason.to_string())
}
