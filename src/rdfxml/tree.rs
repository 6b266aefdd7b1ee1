//! Pre-parsed XML tree fed to the striped parser.
//!
//! Element and attribute names are resolved against the in-scope namespace
//! declarations while the document is read, so the tree carries expanded
//! names next to the qualified names used in the source.
use crate::diagnostics::Error;
use quick_xml::{
	escape::{escape, resolve_xml_entity, unescape_with},
	events::{BytesStart, BytesText, Event},
	name::{PrefixDeclaration, QName, ResolveResult},
	NsReader,
};
use std::{
	collections::{BTreeSet, HashMap},
	fmt,
	io::Read,
};

/// Attribute with its expanded name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
	pub namespace: Option<String>,
	pub local: String,
	pub qname: String,
	pub value: String,
}

impl Attribute {
	/// Namespace URI followed by the local name.
	pub fn name(&self) -> String {
		expanded_name(self.namespace.as_deref(), &self.local)
	}
}

/// Element or character content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
	Element(Element),
	Text(String),
	CData(String),
}

impl Content {
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(e) => Some(e),
			_ => None,
		}
	}

	/// Character data, if this is a text or CDATA node.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(t) | Self::CData(t) => Some(t),
			Self::Element(_) => None,
		}
	}
}

/// XML element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
	/// Document order position, unique within a document.
	pub(crate) id: usize,
	pub namespace: Option<String>,
	pub local: String,
	pub qname: String,
	pub attributes: Vec<Attribute>,

	/// `xmlns` declarations carried by this element, as `(prefix, uri)`.
	/// The default namespace uses the empty prefix.
	pub namespace_decls: Vec<(String, String)>,
	pub children: Vec<Content>,
}

impl Element {
	pub fn id(&self) -> usize {
		self.id
	}

	/// Namespace URI followed by the local name.
	pub fn name(&self) -> String {
		expanded_name(self.namespace.as_deref(), &self.local)
	}

	/// Finds an attribute by expanded name.
	pub fn attribute(&self, name: &str) -> Option<&Attribute> {
		self.attributes.iter().find(|a| a.name() == name)
	}

	pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
		self.children.iter().filter_map(Content::as_element)
	}

	/// Concatenated character data of the direct children.
	pub fn text(&self) -> String {
		self.children.iter().filter_map(Content::as_text).collect()
	}

	/// Checks that some direct child is character data other than white spaces.
	pub fn has_significant_text(&self) -> bool {
		self.children
			.iter()
			.filter_map(Content::as_text)
			.any(|t| !t.trim().is_empty())
	}

	/// Serialized content of this element, without its own tags.
	///
	/// `in_scope` lists the namespace bindings in scope at this element, in
	/// declaration order. Each top-level child element redeclares the ones
	/// its subtree uses, so the result stands on its own.
	pub fn inner_xml(&self, in_scope: &[(String, String)]) -> String {
		let mut out = String::new();
		for child in &self.children {
			let inherited = match child {
				Content::Element(e) => e.inherited_namespaces(in_scope),
				_ => Vec::new(),
			};

			let display = DisplayContent {
				content: child,
				inherited: &inherited,
			};
			out.push_str(&display.to_string());
		}

		out
	}

	/// Bindings of `in_scope` used in this subtree and not declared on this
	/// element.
	fn inherited_namespaces(&self, in_scope: &[(String, String)]) -> Vec<(String, String)> {
		let mut prefixes = BTreeSet::new();
		self.used_prefixes(&mut prefixes);
		prefixes
			.into_iter()
			.filter(|p| *p != "xml" && !self.namespace_decls.iter().any(|(d, _)| d == *p))
			.filter_map(|p| in_scope.iter().rev().find(|(q, _)| q == p).cloned())
			.collect()
	}

	fn used_prefixes<'a>(&'a self, prefixes: &mut BTreeSet<&'a str>) {
		if self.namespace.is_some() {
			prefixes.insert(self.qname.split_once(':').map_or("", |(p, _)| p));
		}

		for a in &self.attributes {
			if let Some((p, _)) = a.qname.split_once(':') {
				prefixes.insert(p);
			}
		}

		for e in self.child_elements() {
			e.used_prefixes(prefixes)
		}
	}
}

fn expanded_name(namespace: Option<&str>, local: &str) -> String {
	match namespace {
		Some(ns) => format!("{ns}{local}"),
		None => local.to_string(),
	}
}

/// Serializes a content node as XML.
struct DisplayContent<'a> {
	content: &'a Content,

	/// Extra declarations written on the start tag.
	inherited: &'a [(String, String)],
}

impl<'a> fmt::Display for DisplayContent<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.content {
			Content::Text(t) | Content::CData(t) => write!(f, "{}", escape(t.as_str())),
			Content::Element(e) => {
				write!(f, "<{}", e.qname)?;

				for (prefix, uri) in e.namespace_decls.iter().chain(self.inherited) {
					if prefix.is_empty() {
						write!(f, " xmlns=\"{}\"", escape(uri.as_str()))?;
					} else {
						write!(f, " xmlns:{prefix}=\"{}\"", escape(uri.as_str()))?;
					}
				}

				for a in &e.attributes {
					write!(f, " {}=\"{}\"", a.qname, escape(a.value.as_str()))?;
				}

				write!(f, ">")?;
				for child in &e.children {
					let display = DisplayContent {
						content: child,
						inherited: &[],
					};
					display.fmt(f)?;
				}

				write!(f, "</{}>", e.qname)
			}
		}
	}
}

/// Parsed XML document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
	pub root: Element,

	/// Location the document was retrieved from, if known.
	pub base_uri: Option<String>,
}

impl Document {
	pub fn parse_str(input: &str) -> Result<Self, Error> {
		TreeBuilder::new(input).build()
	}

	pub fn parse_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
		let mut input = String::new();
		reader.read_to_string(&mut input)?;
		Self::parse_str(&input)
	}

	pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
		self.base_uri = Some(base_uri.into());
		self
	}
}

struct TreeBuilder<'i> {
	reader: NsReader<&'i [u8]>,
	entities: HashMap<String, String>,
	stack: Vec<Element>,
	count: usize,
}

impl<'i> TreeBuilder<'i> {
	fn new(input: &'i str) -> Self {
		let mut reader = NsReader::from_str(input);
		reader.config_mut().expand_empty_elements = true;
		Self {
			reader,
			entities: HashMap::new(),
			stack: Vec::new(),
			count: 0,
		}
	}

	fn build(mut self) -> Result<Document, Error> {
		loop {
			match self.reader.read_event()? {
				Event::Start(e) => {
					let element = self.start_element(&e)?;
					self.stack.push(element);
				}
				Event::End(_) => {
					let element = self
						.stack
						.pop()
						.ok_or_else(|| Error::Syntax("unbalanced end tag".to_string()))?;

					match self.stack.last_mut() {
						Some(parent) => parent.children.push(Content::Element(element)),
						None => {
							return Ok(Document {
								root: element,
								base_uri: None,
							})
						}
					}
				}
				Event::Text(t) => self.text(&t)?,
				Event::CData(c) => {
					if let Some(parent) = self.stack.last_mut() {
						parent.children.push(Content::CData(c.decode()?.into_owned()))
					}
				}
				Event::DocType(dt) => self.doctype(&dt)?,
				Event::Eof => break Err(Error::Syntax("no root element".to_string())),
				_ => (),
			}
		}
	}

	fn resolve_entity<'a>(entities: &'a HashMap<String, String>, e: &str) -> Option<&'a str> {
		resolve_xml_entity(e).or_else(|| entities.get(e).map(String::as_str))
	}

	fn text(&mut self, t: &BytesText) -> Result<(), Error> {
		let entities = &self.entities;
		let text = t.unescape_with(|e| Self::resolve_entity(entities, e))?;
		if let Some(parent) = self.stack.last_mut() {
			parent.children.push(Content::Text(text.into_owned()))
		}

		Ok(())
	}

	/// Collects the internal `<!ENTITY name "value">` declarations.
	fn doctype(&mut self, dt: &BytesText) -> Result<(), Error> {
		let decl = self.reader.decoder().decode(dt.as_ref())?.into_owned();
		for input in decl.split('<').skip(1) {
			let Some(input) = input.strip_prefix("!ENTITY") else {
				continue;
			};

			let input = input.trim_start();
			let input = input.strip_prefix('%').unwrap_or(input);
			let malformed = || Error::Syntax(format!("malformed entity declaration `<{input}`"));
			let (name, rest) = input
				.trim_start()
				.split_once(|c: char| c.is_ascii_whitespace())
				.ok_or_else(malformed)?;
			let rest = rest.trim_start();
			let (quote, rest) = match rest.chars().next() {
				Some(q @ ('"' | '\'')) => (q, &rest[1..]),
				_ => return Err(malformed()),
			};
			let (value, _) = rest.split_once(quote).ok_or_else(malformed)?;

			let entities = &self.entities;
			let value = unescape_with(value, |e| Self::resolve_entity(entities, e))
				.map_err(quick_xml::Error::from)?
				.into_owned();
			log::trace!("entity `{name}` = `{value}`");
			self.entities.insert(name.to_string(), value);
		}

		Ok(())
	}

	fn start_element(&mut self, e: &BytesStart) -> Result<Element, Error> {
		let decoder = self.reader.decoder();
		let (namespace, local) = self.reader.resolve_element(e.name());
		let namespace = self.namespace(namespace, e.name())?;
		let local = decoder.decode(local.as_ref())?.into_owned();
		let qname = decoder.decode(e.name().as_ref())?.into_owned();

		let mut attributes = Vec::new();
		let mut namespace_decls = Vec::new();
		for a in e.attributes() {
			let a = a.map_err(quick_xml::Error::from)?;
			let entities = &self.entities;
			let value = a
				.decode_and_unescape_value_with(decoder, |e| Self::resolve_entity(entities, e))?
				.into_owned();

			match a.key.as_namespace_binding() {
				Some(PrefixDeclaration::Default) => namespace_decls.push((String::new(), value)),
				Some(PrefixDeclaration::Named(prefix)) => {
					namespace_decls.push((decoder.decode(prefix)?.into_owned(), value))
				}
				None => {
					let (namespace, local) = self.reader.resolve_attribute(a.key);
					attributes.push(Attribute {
						namespace: self.namespace(namespace, a.key)?,
						local: decoder.decode(local.as_ref())?.into_owned(),
						qname: decoder.decode(a.key.as_ref())?.into_owned(),
						value,
					})
				}
			}
		}

		self.count += 1;
		Ok(Element {
			id: self.count,
			namespace,
			local,
			qname,
			attributes,
			namespace_decls,
			children: Vec::new(),
		})
	}

	fn namespace(&self, result: ResolveResult, name: QName) -> Result<Option<String>, Error> {
		match result {
			ResolveResult::Bound(ns) => Ok(Some(self.reader.decoder().decode(ns.as_ref())?.into_owned())),
			ResolveResult::Unbound => Ok(None),
			ResolveResult::Unknown(_) => {
				let prefix = name.prefix().map(|p| p.as_ref().to_vec()).unwrap_or_default();
				Err(Error::UnknownPrefix(String::from_utf8_lossy(&prefix).into_owned()))
			}
		}
	}
}
