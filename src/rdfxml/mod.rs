//! Striped RDF/XML front end.
//!
//! The document tree is walked depth first, alternating between node
//! elements and property elements. Each malformed construct is reported
//! through [`Diagnostics`] and skipped; the walk then resumes with the next
//! sibling.
use crate::{
	diagnostics::{Diagnostics, Error, Options},
	graph::{ContainerKind, EdgeId, Graph, GraphError, NodeId},
	uri,
	vocab::{self, FORBIDDEN_ATTRIBUTES, FORBIDDEN_NODE_ELEMENTS, FORBIDDEN_PROPERTY_ELEMENTS},
};
use std::{
	collections::{HashMap, HashSet},
	io::Read,
};

pub mod tree;

pub use tree::{Attribute, Content, Document, Element};

/// RDF/XML parser.
#[derive(Debug, Default)]
pub struct RdfXmlParser {
	diagnostics: Diagnostics,
}

impl RdfXmlParser {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: Options) -> Self {
		Self {
			diagnostics: Diagnostics::new(options),
		}
	}

	/// Abort on the first syntax error.
	pub fn stop_on_errors(mut self, stop: bool) -> Self {
		self.diagnostics.options_mut().stop_on_errors = stop;
		self
	}

	/// Abort on the first warning.
	pub fn stop_on_warnings(mut self, stop: bool) -> Self {
		self.diagnostics.options_mut().stop_on_warnings = stop;
		self
	}

	/// Base URI used when neither the document nor the graph provides one.
	pub fn with_base(mut self, base: impl Into<String>) -> Self {
		self.diagnostics.options_mut().default_base = Some(base.into());
		self
	}

	pub fn options(&self) -> &Options {
		self.diagnostics.options()
	}

	pub fn warnings(&self) -> &[String] {
		self.diagnostics.warnings()
	}

	pub fn errors(&self) -> &[String] {
		self.diagnostics.errors()
	}

	/// Parses a whole document into a fresh graph.
	pub fn parse_str(&mut self, input: &str) -> Result<Graph, Error> {
		let mut graph = Graph::new();
		self.parse_document(&Document::parse_str(input)?, &mut graph)?;
		Ok(graph)
	}

	/// Parses the document read from `reader` into `graph`.
	pub fn read<R: Read>(&mut self, reader: R, graph: &mut Graph) -> Result<(), Error> {
		self.parse_document(&Document::parse_reader(reader)?, graph)
	}

	/// Adds the content of a pre-parsed document to `graph`.
	///
	/// Diagnostics of any previous parse are discarded.
	pub fn parse_document(&mut self, document: &Document, graph: &mut Graph) -> Result<(), Error> {
		self.diagnostics.clear();

		if graph.base().is_none() {
			let seed = document
				.root
				.attributes
				.iter()
				.find(|a| a.namespace.as_deref() == Some(vocab::XML) && a.local == "base")
				.map(|a| a.value.clone())
				.or_else(|| document.base_uri.clone())
				.or_else(|| self.options().default_base.clone())
				.unwrap_or_else(|| vocab::UNKNOWN_BASE.to_string());
			graph.set_base(&seed);
		}

		let scope = Scope {
			base: graph.base().unwrap_or(vocab::UNKNOWN_BASE).to_string(),
			language: None,
			namespaces: Vec::new(),
		};

		log::debug!("parsing RDF/XML with base <{}>", scope.base);
		let (nodes, edges) = (graph.len(), graph.edge_count());

		let mut walker = Walker::new(graph, &mut self.diagnostics);
		walker.declare_namespaces(&document.root)?;
		walker.document(&document.root, &scope)?;

		log::debug!(
			"added {} nodes and {} edges ({} errors, {} warnings)",
			graph.len() - nodes,
			graph.edge_count() - edges,
			self.errors().len(),
			self.warnings().len()
		);
		Ok(())
	}
}

/// Inherited `xml:base`, `xml:lang` and namespace bindings.
#[derive(Clone, Debug)]
struct Scope {
	base: String,
	language: Option<String>,

	/// `(prefix, uri)` bindings, innermost last.
	namespaces: Vec<(String, String)>,
}

impl Scope {
	fn enter(&self, e: &Element) -> Self {
		let mut scope = self.clone();
		scope.namespaces.extend(e.namespace_decls.iter().cloned());
		for a in &e.attributes {
			if a.namespace.as_deref() == Some(vocab::XML) {
				match a.local.as_str() {
					"base" => {
						let base = uri::resolve(Some(&a.value), &self.base);
						scope.base = uri::strip_fragment(&base).to_string()
					}
					"lang" if a.value.is_empty() => scope.language = None,
					"lang" => scope.language = Some(a.value.clone()),
					_ => (),
				}
			}
		}

		scope
	}
}

/// RDF attributes of an element, and its property attributes.
#[derive(Default)]
struct Attrs<'e> {
	about: Option<&'e str>,
	id: Option<&'e str>,
	node_id: Option<&'e str>,
	resource: Option<&'e str>,
	parse_type: Option<&'e str>,
	datatype: Option<&'e str>,
	properties: Vec<(String, &'e str)>,
}

/// `rdf:parseType` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseType {
	Resource,
	Literal,
	Collection,
}

impl ParseType {
	fn new(value: &str) -> Option<Self> {
		match value {
			"Resource" => Some(Self::Resource),
			"Literal" => Some(Self::Literal),
			"Collection" => Some(Self::Collection),
			_ => None,
		}
	}
}

/// Turns a graph error into a syntax error on the current construct.
fn recover<T>(diagnostics: &mut Diagnostics, result: Result<T, GraphError>) -> Result<Option<T>, Error> {
	match result {
		Ok(t) => Ok(Some(t)),
		Err(e) => {
			diagnostics.error(e.to_string())?;
			Ok(None)
		}
	}
}

/// State of a single parse.
struct Walker<'a> {
	graph: &'a mut Graph,
	diagnostics: &'a mut Diagnostics,
	blank_count: usize,

	/// Last `rdf:li` ordinal used under each element.
	ordinals: HashMap<usize, usize>,

	/// Identifiers derived from `rdf:ID` so far.
	declared_ids: HashSet<String>,
}

impl<'a> Walker<'a> {
	fn new(graph: &'a mut Graph, diagnostics: &'a mut Diagnostics) -> Self {
		let blank_count = graph
			.nodes()
			.filter_map(|(_, n)| n.blank_label()?.parse::<usize>().ok())
			.max()
			.unwrap_or(0);

		Self {
			graph,
			diagnostics,
			blank_count,
			ordinals: HashMap::new(),
			declared_ids: HashSet::new(),
		}
	}

	fn error(&mut self, e: &Element, msg: impl std::fmt::Display) -> Result<(), Error> {
		self.diagnostics.error(format!("<{}>: {msg}", e.qname))
	}

	fn warning(&mut self, e: &Element, msg: impl std::fmt::Display) -> Result<(), Error> {
		self.diagnostics.warning(format!("<{}>: {msg}", e.qname))
	}

	/// Records every `xmlns` declaration of the tree in the namespace table.
	fn declare_namespaces(&mut self, e: &Element) -> Result<(), Error> {
		for (prefix, ns) in &e.namespace_decls {
			match self.graph.namespace(prefix) {
				Some(bound) if bound != ns => {
					let bound = bound.to_string();
					self.warning(
						e,
						format!("namespace redefinition of `{prefix}` to <{ns}>, keeping <{bound}>"),
					)?
				}
				Some(_) => (),
				None => {
					self.graph.set_namespace(prefix.as_str(), ns.as_str());
				}
			}
		}

		for child in e.child_elements() {
			self.declare_namespaces(child)?
		}

		Ok(())
	}

	fn document(&mut self, root: &Element, scope: &Scope) -> Result<(), Error> {
		if root.name() != vocab::RDF_RDF {
			self.node_element(root, scope)?;
			return Ok(());
		}

		let scope = scope.enter(root);
		for child in &root.children {
			match child {
				Content::Element(e) => {
					self.node_element(e, &scope)?;
				}
				text => self.unexpected_text(root, text)?,
			}
		}

		Ok(())
	}

	fn unexpected_text(&mut self, e: &Element, content: &Content) -> Result<(), Error> {
		match content.as_text() {
			Some(text) if !text.trim().is_empty() => {
				self.error(e, format!("unexpected text `{}`", text.trim()))
			}
			_ => Ok(()),
		}
	}

	/// Allocates a fresh blank node.
	fn new_blank(&mut self) -> Result<Option<NodeId>, Error> {
		let id = loop {
			self.blank_count += 1;
			let id = format!("{}{}", vocab::BLANK_PREFIX, self.blank_count);
			if self.graph.node_by_id(&id).is_none() {
				break id;
			}
		};

		log::trace!("new blank node `{id}`");
		recover(self.diagnostics, self.graph.add_node(&id))
	}

	/// Sorts the attributes of `e`.
	///
	/// Forbidden and meaningless attributes are reported and left out.
	fn attributes<'e>(&mut self, e: &'e Element) -> Result<Attrs<'e>, Error> {
		let mut attrs = Attrs::default();

		for a in &e.attributes {
			let name = match a.namespace.as_deref() {
				Some(vocab::XML) => continue,
				Some(_) => a.name(),
				None if vocab::UNQUALIFIED_RDF_ATTRIBUTES.contains(&a.local.as_str()) => {
					self.warning(
						e,
						format!("unqualified use of `{0}`, read as `rdf:{0}`", a.local),
					)?;
					format!("{}{}", vocab::RDF, a.local)
				}
				None => {
					self.warning(e, format!("attribute `{}` has no namespace, ignored", a.qname))?;
					continue;
				}
			};

			if FORBIDDEN_ATTRIBUTES.contains(&name.as_str()) {
				match name.as_str() {
					vocab::RDF_ABOUT_EACH | vocab::RDF_ABOUT_EACH_PREFIX | vocab::RDF_BAG_ID => {
						self.error(e, format!("`{}` is no longer supported", a.qname))?
					}
					_ => self.error(e, format!("`{}` cannot be used as an attribute", a.qname))?,
				}

				continue;
			}

			let value = a.value.as_str();
			match name.as_str() {
				vocab::RDF_ABOUT => attrs.about = Some(value),
				vocab::RDF_ID => attrs.id = Some(value),
				vocab::RDF_NODE_ID => attrs.node_id = Some(value),
				vocab::RDF_RESOURCE => attrs.resource = Some(value),
				vocab::RDF_PARSE_TYPE => attrs.parse_type = Some(value),
				vocab::RDF_DATATYPE => attrs.datatype = Some(value),
				_ => {
					if let Some(local) = name.strip_prefix(vocab::RDF) {
						if !is_known_rdf_name(local) {
							self.warning(e, format!("unknown RDF attribute `{}`", a.qname))?
						}
					}

					attrs.properties.push((name, value))
				}
			}
		}

		Ok(attrs)
	}

	/// Checks an `rdf:ID` value and derives the identifier it declares.
	fn declare_id(&mut self, e: &Element, value: &str, scope: &Scope) -> Result<Option<String>, Error> {
		if !vocab::is_nc_name(value) {
			self.error(e, format!("rdf:ID `{value}` is not a valid XML name"))?;
			return Ok(None);
		}

		let id = uri::qualify_id(value, &scope.base);
		if !self.declared_ids.insert(id.clone()) {
			self.error(e, format!("redefinition of rdf:ID `{value}`"))?;
			return Ok(None);
		}

		Ok(Some(id))
	}

	/// Identifier of a blank node named with `rdf:nodeID`.
	fn node_id(&mut self, e: &Element, value: &str) -> Result<Option<String>, Error> {
		if vocab::is_nc_name(value) {
			Ok(Some(format!("{}{value}", vocab::BLANK_PREFIX)))
		} else {
			self.error(e, format!("rdf:nodeID `{value}` is not a valid XML name"))?;
			Ok(None)
		}
	}

	fn connect(
		&mut self,
		parent: NodeId,
		predicate: &str,
		child: NodeId,
		scope: &Scope,
	) -> Result<Option<EdgeId>, Error> {
		let result = self
			.graph
			.connect(parent, predicate, child, scope.language.as_deref());
		recover(self.diagnostics, result)
	}

	/// Hangs property attributes off `node`.
	fn property_attributes(
		&mut self,
		node: NodeId,
		properties: &[(String, &str)],
		scope: &Scope,
	) -> Result<(), Error> {
		for &(ref predicate, value) in properties {
			let object = if predicate == vocab::RDF_TYPE {
				let id = uri::resolve(Some(value), &scope.base);
				self.graph.add_node(&id)
			} else {
				self.graph
					.add_literal_with(value, scope.language.as_deref(), None)
			};

			if let Some(object) = recover(self.diagnostics, object)? {
				self.connect(node, predicate, object, scope)?;
			}
		}

		Ok(())
	}

	/// Processes a node element, returning the node it designates.
	fn node_element(&mut self, e: &Element, scope: &Scope) -> Result<Option<NodeId>, Error> {
		let scope = scope.enter(e);
		let name = e.name();

		if FORBIDDEN_NODE_ELEMENTS.contains(&name.as_str()) {
			self.error(e, "cannot be used as a node element")?;
			return Ok(None);
		}

		if e.namespace.is_none() {
			self.error(e, "node element without namespace")?;
			return Ok(None);
		}

		if let Some(local) = name.strip_prefix(vocab::RDF) {
			if !is_known_rdf_name(local) {
				self.warning(e, "unknown RDF element")?
			}
		}

		let attrs = self.attributes(e)?;
		let given = [attrs.about, attrs.id, attrs.node_id]
			.iter()
			.filter(|a| a.is_some())
			.count();
		if given > 1 {
			self.error(e, "rdf:about, rdf:ID and rdf:nodeID are mutually exclusive")?;
			return Ok(None);
		}

		let id = if let Some(about) = attrs.about {
			Some(uri::resolve(Some(about), &scope.base))
		} else if let Some(value) = attrs.id {
			match self.declare_id(e, value, &scope)? {
				Some(id) => Some(id),
				None => return Ok(None),
			}
		} else if let Some(value) = attrs.node_id {
			match self.node_id(e, value)? {
				Some(id) => Some(id),
				None => return Ok(None),
			}
		} else {
			None
		};

		let node = match (id, ContainerKind::from_type_uri(&name)) {
			(Some(id), Some(kind)) => {
				recover(self.diagnostics, self.graph.ensure_container(&id, kind))?
			}
			(Some(id), None) => recover(self.diagnostics, self.graph.add_node(&id))?,
			(None, kind) => match self.new_blank()? {
				Some(node) => match kind {
					Some(kind) => {
						recover(self.diagnostics, self.graph.convert_to_container(node, kind))?
					}
					None => Some(node),
				},
				None => None,
			},
		};

		let Some(node) = node else {
			return Ok(None);
		};

		if let (Some(language), Some(n)) = (&scope.language, self.graph.node_mut(node)) {
			if n.language().is_none() {
				n.set_language(Some(language.clone()))
			}
		}

		if name != vocab::RDF_DESCRIPTION && ContainerKind::from_type_uri(&name).is_none() {
			if let Some(type_node) = recover(self.diagnostics, self.graph.add_node(&name))? {
				self.connect(node, vocab::RDF_TYPE, type_node, &scope)?;
			}
		}

		self.property_attributes(node, &attrs.properties, &scope)?;

		for child in &e.children {
			match child {
				Content::Element(p) => self.property_element(p, node, e.id(), &scope)?,
				text => self.unexpected_text(e, text)?,
			}
		}

		Ok(Some(node))
	}

	/// Next `rdf:_<n>` predicate under the element `key`.
	fn next_member(&mut self, key: usize) -> String {
		let n = self.ordinals.entry(key).or_insert(0);
		*n += 1;
		format!("{}_{n}", vocab::RDF)
	}

	/// Processes a property element of `parent`.
	///
	/// `parent_key` designates the element whose `rdf:li` children are
	/// numbered together.
	fn property_element(
		&mut self,
		e: &Element,
		parent: NodeId,
		parent_key: usize,
		scope: &Scope,
	) -> Result<(), Error> {
		let scope = scope.enter(e);
		let name = e.name();

		if FORBIDDEN_PROPERTY_ELEMENTS.contains(&name.as_str()) {
			self.error(e, "cannot be used as a property element")?;
			return Ok(());
		}

		if e.namespace.is_none() {
			self.error(e, "property element without namespace")?;
			return Ok(());
		}

		let attrs = self.attributes(e)?;
		if attrs.about.is_some() {
			self.error(e, "rdf:about is not allowed on a property element")?
		}

		let given = [attrs.resource, attrs.node_id, attrs.parse_type]
			.iter()
			.filter(|a| a.is_some())
			.count();
		if given > 1 {
			self.error(
				e,
				"rdf:resource, rdf:nodeID and rdf:parseType are mutually exclusive",
			)?;
			return Ok(());
		}

		let parse_type = match attrs.parse_type {
			Some(value) => match ParseType::new(value) {
				Some(t) => Some(t),
				None => {
					self.error(e, format!("unknown rdf:parseType `{value}`"))?;
					return Ok(());
				}
			},
			None => None,
		};

		let predicate = if name == vocab::RDF_LI {
			self.next_member(parent_key)
		} else {
			if let Some(local) = name.strip_prefix(vocab::RDF) {
				if !is_known_rdf_name(local) {
					self.warning(e, "unknown RDF property")?
				}
			}

			name
		};

		let edge = recover(
			self.diagnostics,
			self.graph.add_edge(&predicate, scope.language.as_deref()),
		)?;
		let Some(edge) = edge else {
			return Ok(());
		};

		if recover(self.diagnostics, self.graph.attach_parent(edge, parent))?.is_none() {
			return Ok(());
		}

		let child = match parse_type {
			Some(parse_type) => self.parse_type_child(e, parse_type, attrs.datatype, &scope)?,
			None => self.plain_child(e, &attrs, &scope)?,
		};

		let child = match child {
			Some(child) => Some(child),
			None => {
				let empty = self
					.graph
					.add_literal_with("", scope.language.as_deref(), None);
				recover(self.diagnostics, empty)?
			}
		};

		let Some(child) = child else {
			return Ok(());
		};

		recover(self.diagnostics, self.graph.attach_child(edge, child))?;

		if !attrs.properties.is_empty() {
			if self.graph.node(child).is_some_and(|n| n.is_literal()) {
				self.error(e, "property attributes on a literal valued property")?
			} else {
				self.property_attributes(child, &attrs.properties, &scope)?
			}
		}

		if let Some(value) = attrs.id {
			self.reify(e, value, parent, &predicate, child, &scope)?
		}

		Ok(())
	}

	/// Child of a property element without `rdf:parseType`.
	fn plain_child(&mut self, e: &Element, attrs: &Attrs, scope: &Scope) -> Result<Option<NodeId>, Error> {
		let mut nodes = e.child_elements();

		if let Some(resource) = attrs.resource {
			if nodes.next().is_some() || e.has_significant_text() {
				self.error(e, "a property element with rdf:resource must be empty")?
			}

			let id = uri::resolve(Some(resource), &scope.base);
			return recover(self.diagnostics, self.graph.add_node(&id));
		}

		if let Some(value) = attrs.node_id {
			if nodes.next().is_some() || e.has_significant_text() {
				self.error(e, "a property element with rdf:nodeID must be empty")?
			}

			return match self.node_id(e, value)? {
				Some(id) => recover(self.diagnostics, self.graph.add_node(&id)),
				None => Ok(None),
			};
		}

		if let Some(first) = nodes.next() {
			if e.has_significant_text() {
				self.error(e, "text next to a node element")?
			}

			if nodes.next().is_some() {
				self.error(e, "more than one node element in a property element")?
			}

			return self.node_element(first, scope);
		}

		let text = e.text();
		if text.is_empty() && attrs.datatype.is_none() {
			if attrs.properties.is_empty() {
				return Ok(None);
			}

			return self.new_blank();
		}

		let literal = match attrs.datatype {
			Some(datatype) => {
				let datatype = uri::resolve(Some(datatype), &scope.base);
				self.graph.add_literal_with(&text, None, Some(&datatype))
			}
			None => self
				.graph
				.add_literal_with(&text, scope.language.as_deref(), None),
		};

		recover(self.diagnostics, literal)
	}

	/// Child of a property element with an `rdf:parseType`.
	fn parse_type_child(
		&mut self,
		e: &Element,
		parse_type: ParseType,
		datatype: Option<&str>,
		scope: &Scope,
	) -> Result<Option<NodeId>, Error> {
		match parse_type {
			ParseType::Resource => {
				let Some(node) = self.new_blank()? else {
					return Ok(None);
				};

				for child in &e.children {
					match child {
						Content::Element(p) => self.property_element(p, node, e.id(), scope)?,
						text => self.unexpected_text(e, text)?,
					}
				}

				Ok(Some(node))
			}
			ParseType::Literal => {
				let datatype = match datatype {
					Some(datatype) => uri::resolve(Some(datatype), &scope.base),
					None => vocab::RDF_XML_LITERAL.to_string(),
				};

				let literal = self
					.graph
					.add_literal_with(&e.inner_xml(&scope.namespaces), None, Some(&datatype));
				recover(self.diagnostics, literal)
			}
			ParseType::Collection => {
				for child in &e.children {
					self.unexpected_text(e, child)?
				}

				let items: Vec<&Element> = e.child_elements().collect();
				self.collection(&items, scope)
			}
		}
	}

	/// Builds an RDF list of the given node elements, returning its head.
	fn collection(&mut self, items: &[&Element], scope: &Scope) -> Result<Option<NodeId>, Error> {
		let nil = recover(self.diagnostics, self.graph.add_node(vocab::RDF_NIL))?;
		let Some(nil) = nil else {
			return Ok(None);
		};

		let list = recover(self.diagnostics, self.graph.add_node(vocab::RDF_LIST))?;
		let Some(list) = list else {
			return Ok(None);
		};

		let mut head = None;
		let mut last: Option<NodeId> = None;
		for item in items {
			let Some(cell) = self.new_blank()? else {
				continue;
			};

			self.connect(cell, vocab::RDF_TYPE, list, scope)?;
			if let Some(value) = self.node_element(item, scope)? {
				self.connect(cell, vocab::RDF_FIRST, value, scope)?;
			}

			match last {
				Some(previous) => {
					self.connect(previous, vocab::RDF_REST, cell, scope)?;
				}
				None => head = Some(cell),
			}

			last = Some(cell);
		}

		match last {
			Some(last) => {
				self.connect(last, vocab::RDF_REST, nil, scope)?;
				Ok(head)
			}
			None => Ok(Some(nil)),
		}
	}

	/// Reifies the `(subject, predicate, object)` triple as the statement
	/// declared by an `rdf:ID` value.
	fn reify(
		&mut self,
		e: &Element,
		value: &str,
		subject: NodeId,
		predicate: &str,
		object: NodeId,
		scope: &Scope,
	) -> Result<(), Error> {
		let Some(id) = self.declare_id(e, value, scope)? else {
			return Ok(());
		};

		let Some(statement) = recover(self.diagnostics, self.graph.ensure_statement(&id))? else {
			return Ok(());
		};

		let Some(predicate) = recover(self.diagnostics, self.graph.add_node(predicate))? else {
			return Ok(());
		};

		log::trace!("reifying as `{id}`");
		let result = self.graph.set_statement(statement, subject, predicate, object);
		recover(self.diagnostics, result)?;
		Ok(())
	}
}

/// Checks a local name of the RDF namespace.
fn is_known_rdf_name(local: &str) -> bool {
	vocab::KNOWN_RDF_NAMES.contains(&local) || vocab::is_membership_name(local)
}
