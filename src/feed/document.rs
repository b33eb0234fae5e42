use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors produced while turning raw feed text into a [`FeedDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The XML tokenizer rejected the input (bad syntax, mismatched tags, bad escapes).
    #[error("Invalid XML: {0}")]
    Xml(String),
    /// The input contained no element at all.
    #[error("Invalid XML: no root element")]
    NoRootElement,
    /// End of input was reached with an element still open.
    #[error("Invalid XML: unclosed element <{0}>")]
    UnclosedElement(String),
    /// A second top-level element followed the root.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,
    /// Character data appeared before or after the root element.
    #[error("Invalid XML: text outside the root element")]
    TextOutsideRoot,
    /// The document embeds a `<parsererror>` node, the way some XML front ends report failures.
    #[error("Invalid XML: document contains a parser error node")]
    ParserErrorNode,
}

/// The two feed schemas this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Rss,
    Atom,
}

/// A node in the parsed tree: either a nested element or a run of character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its qualified name, attributes and children in document order.
///
/// Names are matched exactly (case-sensitive, including any namespace prefix),
/// so `content:encoded` and `encoded` are different elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the first attribute called `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// All direct child elements called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Every descendant element called `name`, in document (pre-)order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_named(self, name, &mut found);
        found
    }

    /// Whether this element or any descendant is called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.name == name || self.elements().any(|element| element.contains(name))
    }

    /// Concatenated character data of all descendants, untrimmed.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        push_text(self, &mut text);
        text
    }

    /// Trimmed text of the first child called `name`, or an empty string.
    pub fn child_text(&self, name: &str) -> String {
        self.child(name)
            .map(|element| element.text_content().trim().to_string())
            .unwrap_or_default()
    }
}

fn collect_named<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in element.elements() {
        if child.name == name {
            found.push(child);
        }
        collect_named(child, name, found);
    }
}

fn push_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => push_text(child, out),
        }
    }
}

/// A parsed feed: the element tree plus its classification.
///
/// The classification is computed once in [`parse`] and never re-derived.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    root: Element,
    kind: FeedKind,
}

impl FeedDocument {
    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every element called `name` in the whole document, root included, in document order.
    pub fn elements_named(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        if self.root.name == name {
            found.push(&self.root);
        }
        collect_named(&self.root, name, &mut found);
        found
    }
}

/// Parses raw feed text into a [`FeedDocument`].
///
/// The document is classified as Atom when the root element, or one of its
/// direct children, is named `feed`; everything else is treated as RSS.
///
/// # Errors
///
/// Returns [`ParseError`] when the input is not well-formed XML, or when it
/// carries a `<parsererror>` element anywhere in the tree.
///
/// # Security
///
/// Entity resolution is left to `quick-xml` (see SEC-002 in `Cargo.toml`): only
/// the five predefined XML entities and character references are expanded,
/// anything else fails with [`ParseError::Xml`].
pub fn parse(raw: &str) -> Result<FeedDocument, ParseError> {
    let root = build_tree(raw.trim_start_matches('\u{feff}'))?;

    if root.contains("parsererror") {
        return Err(ParseError::ParserErrorNode);
    }

    let kind = if root.name == "feed" || root.child("feed").is_some() {
        FeedKind::Atom
    } else {
        FeedKind::Rss
    };

    Ok(FeedDocument { root, kind })
}

fn build_tree(raw: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::MultipleRoots);
                }
                stack.push(open_element(&e, &reader)?);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e, &reader)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::Xml("unexpected closing tag".to_string()))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(xml_error)?;
                append_text(&text, &mut stack)?;
            }
            Ok(Event::CData(e)) => {
                let text = reader.decoder().decode(&e).map_err(xml_error)?;
                append_text(&text, &mut stack)?;
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions and doctypes carry no feed data
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement(open.name));
    }

    root.ok_or(ParseError::NoRootElement)
}

fn open_element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element, ParseError> {
    let decoder = reader.decoder();
    let qname = e.name();
    let name = decoder.decode(qname.as_ref()).map_err(xml_error)?;

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = decoder.decode(attr.key.as_ref()).map_err(xml_error)?;
        let value = attr.decode_and_unescape_value(decoder).map_err(xml_error)?;
        attributes.push((key.into_owned(), value.into_owned()));
    }

    Ok(Element::new(name.into_owned(), attributes))
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => return Err(ParseError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(text: &str, stack: &mut [Element]) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            // Merge adjacent runs so text + CDATA + text reads as one node
            if let Some(Node::Text(previous)) = parent.children.last_mut() {
                previous.push_str(text);
            } else {
                parent.children.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::TextOutsideRoot),
    }
}

fn xml_error(err: impl std::fmt::Display) -> ParseError {
    ParseError::Xml(err.to_string())
}
