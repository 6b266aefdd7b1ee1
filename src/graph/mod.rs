//! Arena-backed labeled graph.
//!
//! Nodes and edges are stored in two tables owned by the [`Graph`] and are
//! designated by [`NodeId`] and [`EdgeId`] handles. Linking an edge to a
//! node always updates both sides: the edge endpoint and the node's parent
//! or child edge list.
use crate::{uri, vocab};
use std::collections::{BTreeMap, HashMap};

mod edge;
mod error;
mod node;
mod ntriples;

pub use edge::Edge;
pub use error::GraphError;
pub use node::{literal_key, ContainerKind, Literal, Node, NodeKind, StatementEdges};
pub use ntriples::{DisplayIri, DisplayStringLiteral};

/// Node handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	pub fn index(&self) -> usize {
		self.0
	}
}

/// Edge handle. Doubles as the position of the edge in the flat edge table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
	pub fn index(&self) -> usize {
		self.0
	}
}

/// In-memory RDF graph.
///
/// Resource nodes and literals are indexed separately so that a literal and a
/// node may share the same string without colliding.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	namespaces: BTreeMap<String, String>,
	nodes: Vec<Option<Node>>,
	node_ids: HashMap<String, NodeId>,
	literal_ids: HashMap<String, NodeId>,
	edges: Vec<Edge>,
	edges_by_id: HashMap<String, Vec<EdgeId>>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of nodes plus number of literals.
	pub fn len(&self) -> usize {
		self.node_ids.len() + self.literal_ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn node_count(&self) -> usize {
		self.node_ids.len()
	}

	pub fn literal_count(&self) -> usize {
		self.literal_ids.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Prefix to namespace URI table, including the `xml:base` entry.
	pub fn namespaces(&self) -> &BTreeMap<String, String> {
		&self.namespaces
	}

	pub fn namespace(&self, prefix: &str) -> Option<&str> {
		self.namespaces.get(prefix).map(String::as_str)
	}

	/// Binds `prefix`, returning the previous binding.
	pub fn set_namespace(
		&mut self,
		prefix: impl Into<String>,
		uri: impl Into<String>,
	) -> Option<String> {
		self.namespaces.insert(prefix.into(), uri.into())
	}

	/// Current `xml:base`.
	pub fn base(&self) -> Option<&str> {
		self.namespace(vocab::XML_BASE)
	}

	/// Sets the `xml:base`, stripped of any fragment.
	pub fn set_base(&mut self, base: &str) {
		self.set_namespace(vocab::XML_BASE, uri::strip_fragment(base));
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0).and_then(Option::as_ref)
	}

	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(id.0).and_then(Option::as_mut)
	}

	fn get(&self, id: NodeId) -> Result<&Node, GraphError> {
		self.node(id).ok_or(GraphError::UnknownNode(id))
	}

	fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
		self.node_mut(id).ok_or(GraphError::UnknownNode(id))
	}

	/// Finds a (non literal) node by identifier.
	pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
		self.node_ids.get(id).copied()
	}

	/// Finds a literal by value, language and datatype.
	pub fn literal_by_key(
		&self,
		value: &str,
		language: Option<&str>,
		datatype: Option<&str>,
	) -> Option<NodeId> {
		self.literal_ids
			.get(&literal_key(value, language, datatype))
			.copied()
	}

	/// Iterates over live nodes and literals, in creation order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
	}

	/// Iterates over non literal nodes.
	pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
		self.iter().filter(|(_, n)| !n.is_literal())
	}

	pub fn literals(&self) -> impl Iterator<Item = (NodeId, &Node)> {
		self.iter().filter(|(_, n)| n.is_literal())
	}

	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.get(id.0)
	}

	/// Edge at the given position of the flat edge table.
	pub fn edge_at(&self, index: usize) -> Option<&Edge> {
		self.edges.get(index)
	}

	fn get_edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
		self.edge(id).ok_or(GraphError::UnknownEdge(id))
	}

	pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
	}

	/// Every edge labeled with `predicate`.
	pub fn edges_by_id(&self, predicate: &str) -> &[EdgeId] {
		self.edges_by_id
			.get(predicate)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// Gets or creates the resource node `id`.
	pub fn add_node(&mut self, id: &str) -> Result<NodeId, GraphError> {
		if id.is_empty() {
			return Err(GraphError::EmptyId);
		}

		match self.node_ids.get(id) {
			Some(n) => Ok(*n),
			None => Ok(self.push_node(Node::new(id))),
		}
	}

	/// Inserts a detached node.
	///
	/// Edges and intrinsic structure carried by `node` are dropped: only its
	/// identifier and language are kept.
	pub fn insert_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
		if node.id.is_empty() {
			return Err(GraphError::EmptyId);
		}

		match node.kind {
			NodeKind::Literal(literal) => {
				if self.literal_ids.contains_key(&node.id) {
					return Err(GraphError::DuplicateKey(node.id));
				}

				Ok(self.push_node(Node::literal(
					literal.value,
					node.language,
					literal.datatype,
				)))
			}
			_ => {
				if self.node_ids.contains_key(&node.id) {
					return Err(GraphError::DuplicateKey(node.id));
				}

				Ok(self.push_node(Node::with_kind(
					node.id,
					node.language,
					NodeKind::Resource,
				)))
			}
		}
	}

	fn push_node(&mut self, node: Node) -> NodeId {
		let id = NodeId(self.nodes.len());
		if node.is_literal() {
			self.literal_ids.insert(node.id.clone(), id);
		} else {
			self.node_ids.insert(node.id.clone(), id);
		}

		self.nodes.push(Some(node));
		id
	}

	/// Gets or creates a plain literal.
	pub fn add_literal(&mut self, value: &str) -> NodeId {
		match self.literal_by_key(value, None, None) {
			Some(l) => l,
			None => self.push_node(Node::literal(value.to_string(), None, None)),
		}
	}

	/// Gets or creates a literal with optional language and datatype.
	pub fn add_literal_with(
		&mut self,
		value: &str,
		language: Option<&str>,
		datatype: Option<&str>,
	) -> Result<NodeId, GraphError> {
		if let Some(datatype) = datatype {
			if !uri::is_well_formed(datatype) {
				return Err(GraphError::InvalidUri(datatype.to_string()));
			}
		}

		match self.literal_by_key(value, language, datatype) {
			Some(l) => Ok(l),
			None => Ok(self.push_node(Node::literal(
				value.to_string(),
				language.map(ToString::to_string),
				datatype.map(ToString::to_string),
			))),
		}
	}

	/// Creates a new detached edge labeled with `predicate`.
	///
	/// Edges are never deduplicated.
	pub fn add_edge(
		&mut self,
		predicate: &str,
		language: Option<&str>,
	) -> Result<EdgeId, GraphError> {
		if predicate.is_empty() {
			return Err(GraphError::EmptyId);
		}

		if !uri::is_well_formed(predicate) {
			return Err(GraphError::InvalidUri(predicate.to_string()));
		}

		let id = EdgeId(self.edges.len());
		self.edges.push(Edge::new(
			predicate.to_string(),
			language.map(ToString::to_string),
		));
		self.edges_by_id
			.entry(predicate.to_string())
			.or_default()
			.push(id);
		Ok(id)
	}

	/// Creates an edge from `parent` to `child`.
	pub fn connect(
		&mut self,
		parent: NodeId,
		predicate: &str,
		child: NodeId,
		language: Option<&str>,
	) -> Result<EdgeId, GraphError> {
		self.get(parent)?;
		self.get(child)?;
		let edge = self.add_edge(predicate, language)?;
		self.attach_parent(edge, parent)?;
		self.attach_child(edge, child)?;
		Ok(edge)
	}

	/// Sets the child of `edge`, detaching the previous one.
	pub fn attach_child(&mut self, edge: EdgeId, node: NodeId) -> Result<(), GraphError> {
		self.get_edge(edge)?;
		self.get(node)?;
		self.detach_child(edge)?;
		self.edges[edge.0].child = Some(node);
		self.get_mut(node)?.parent_edges.push(edge);
		Ok(())
	}

	/// Removes the child of `edge` from both sides of the link.
	pub fn detach_child(&mut self, edge: EdgeId) -> Result<Option<NodeId>, GraphError> {
		let child = self.get_edge(edge)?.child;
		if let Some(node) = child {
			self.edges[edge.0].child = None;
			if let Some(node) = self.node_mut(node) {
				node.parent_edges.retain(|e| *e != edge)
			}
		}

		Ok(child)
	}

	/// Sets the parent of `edge`, detaching the previous one.
	pub fn attach_parent(&mut self, edge: EdgeId, node: NodeId) -> Result<(), GraphError> {
		self.get_edge(edge)?;
		self.get(node)?;
		self.detach_parent(edge)?;
		self.edges[edge.0].parent = Some(node);
		self.get_mut(node)?.child_edges.push(edge);
		Ok(())
	}

	/// Removes the parent of `edge` from both sides of the link.
	pub fn detach_parent(&mut self, edge: EdgeId) -> Result<Option<NodeId>, GraphError> {
		let parent = self.get_edge(edge)?.parent;
		if let Some(node) = parent {
			self.edges[edge.0].parent = None;
			if let Some(node) = self.node_mut(node) {
				node.child_edges.retain(|e| *e != edge)
			}
		}

		Ok(parent)
	}

	/// Checks for an edge labeled `predicate` from `parent` to `child`.
	pub fn has_edge(&self, parent: NodeId, predicate: &str, child: NodeId) -> bool {
		self.node(parent).is_some_and(|p| {
			p.child_edges.iter().any(|e| {
				let edge = &self.edges[e.0];
				edge.id == predicate && edge.child == Some(child)
			})
		})
	}

	/// Finds a child edge of `node` labeled `predicate` pointing to the resource `target`.
	fn find_child_edge(&self, node: NodeId, predicate: &str, target: &str) -> Option<EdgeId> {
		let target = self.node_by_id(target)?;
		self.node(node)?
			.child_edges
			.iter()
			.copied()
			.find(|e| {
				let edge = &self.edges[e.0];
				edge.id == predicate && edge.child == Some(target)
			})
	}

	/// Gets or creates the `rdf:type` edge from `node` to `type_uri`.
	fn type_edge(&mut self, node: NodeId, type_uri: &str) -> Result<EdgeId, GraphError> {
		match self.find_child_edge(node, vocab::RDF_TYPE, type_uri) {
			Some(e) => Ok(e),
			None => {
				let language = self.get(node)?.language.clone();
				let type_node = self.add_node(type_uri)?;
				self.connect(node, vocab::RDF_TYPE, type_node, language.as_deref())
			}
		}
	}

	/// Replaces the kind of a live node, keeping its identifier, language and
	/// every parent and child edge.
	///
	/// The superseded node is dropped from the node table and the new one takes
	/// its slot, so handles held by callers designate the converted node.
	fn replace_kind(&mut self, id: NodeId, kind: NodeKind) -> Result<(), GraphError> {
		let old = self.nodes[id.0].take().ok_or(GraphError::UnknownNode(id))?;
		self.node_ids.remove(&old.id);

		let mut node = Node::with_kind(old.id, old.language, kind);
		node.child_edges = old.child_edges;
		node.parent_edges = old.parent_edges;
		self.node_ids.insert(node.id.clone(), id);
		self.nodes[id.0] = Some(node);
		Ok(())
	}

	/// Turns `node` into a container of the given kind.
	///
	/// All of its edges are preserved. A node that already is a container of
	/// this kind is returned unchanged.
	pub fn convert_to_container(
		&mut self,
		node: NodeId,
		kind: ContainerKind,
	) -> Result<NodeId, GraphError> {
		let current = self.get(node)?;
		match current.kind {
			NodeKind::Literal(_) => return Err(GraphError::LiteralConversion(current.id.clone())),
			NodeKind::Container { kind: k, .. } if k == kind => return Ok(node),
			_ => (),
		}

		log::trace!("converting `{}` into {kind}", current.id);
		let type_edge = self.type_edge(node, kind.type_uri())?;
		self.replace_kind(node, NodeKind::Container { kind, type_edge })?;
		Ok(node)
	}

	/// Gets, creates or converts the container `id`.
	pub fn ensure_container(&mut self, id: &str, kind: ContainerKind) -> Result<NodeId, GraphError> {
		let node = self.add_node(id)?;
		self.convert_to_container(node, kind)
	}

	/// Turns `node` into a reified statement.
	///
	/// The four intrinsic edges are registered right away. Only the
	/// `rdf:type` one is given a child: values are attached afterwards with
	/// [`Graph::set_statement`].
	pub fn convert_to_statement(&mut self, node: NodeId) -> Result<NodeId, GraphError> {
		let current = self.get(node)?;
		match current.kind {
			NodeKind::Literal(_) => return Err(GraphError::LiteralConversion(current.id.clone())),
			NodeKind::Statement(_) => return Ok(node),
			_ => (),
		}

		let language = current.language.clone();
		let type_edge = self.type_edge(node, vocab::RDF_STATEMENT)?;
		let mut intrinsic = |predicate: &str| -> Result<EdgeId, GraphError> {
			let edge = self.add_edge(predicate, language.as_deref())?;
			self.attach_parent(edge, node)?;
			Ok(edge)
		};

		let edges = StatementEdges {
			type_edge,
			subject: intrinsic(vocab::RDF_SUBJECT)?,
			predicate: intrinsic(vocab::RDF_PREDICATE)?,
			object: intrinsic(vocab::RDF_OBJECT)?,
		};

		self.replace_kind(node, NodeKind::Statement(edges))?;
		Ok(node)
	}

	/// Gets, creates or converts the statement `id`.
	pub fn ensure_statement(&mut self, id: &str) -> Result<NodeId, GraphError> {
		let node = self.add_node(id)?;
		self.convert_to_statement(node)
	}

	/// Attaches the subject, predicate and object of a statement node.
	pub fn set_statement(
		&mut self,
		statement: NodeId,
		subject: NodeId,
		predicate: NodeId,
		object: NodeId,
	) -> Result<(), GraphError> {
		let edges = match self.get(statement)?.kind {
			NodeKind::Statement(edges) => edges,
			_ => return Err(GraphError::UnknownNode(statement)),
		};

		self.attach_child(edges.subject, subject)?;
		self.attach_child(edges.predicate, predicate)?;
		self.attach_child(edges.object, object)
	}

	/// Copies `other` into this graph.
	///
	/// Nodes and literals are matched by identifier. Every child edge of
	/// `other` is copied, unless `skip_duplicate_edges` is set and an edge with
	/// the same predicate already links the same pair of nodes here. Namespace
	/// bindings already present here, `xml:base` included, take precedence.
	pub fn merge(&mut self, other: &Graph, skip_duplicate_edges: bool) -> Result<(), GraphError> {
		for (prefix, uri) in &other.namespaces {
			self.namespaces
				.entry(prefix.clone())
				.or_insert_with(|| uri.clone());
		}

		let mut map = HashMap::new();
		for (src, node) in other.iter() {
			let dst = match &node.kind {
				NodeKind::Literal(l) => {
					self.add_literal_with(&l.value, node.language(), l.datatype())?
				}
				NodeKind::Resource => self.add_node(&node.id)?,
				NodeKind::Container { kind, .. } => self.ensure_container(&node.id, *kind)?,
				NodeKind::Statement(_) => self.ensure_statement(&node.id)?,
			};

			let dst_node = self.get_mut(dst)?;
			if dst_node.language.is_none() && !dst_node.is_literal() {
				dst_node.language = node.language.clone()
			}

			map.insert(src, dst);
		}

		for (src, node) in other.iter() {
			let parent = map[&src];
			for &e in &node.child_edges {
				let edge = &other.edges[e.0];
				let Some(child) = edge.child.and_then(|c| map.get(&c).copied()) else {
					continue;
				};

				if let NodeKind::Statement(src_edges) = &node.kind {
					if src_edges.contains(e) {
						self.merge_statement_value(parent, src_edges, e, child)?;
						continue;
					}
				}

				if node.is_intrinsic(e) {
					continue;
				}

				if skip_duplicate_edges && self.has_edge(parent, &edge.id, child) {
					continue;
				}

				let copy = self.add_edge(&edge.id, edge.language())?;
				self.attach_parent(copy, parent)?;
				self.attach_child(copy, child)?;
			}
		}

		Ok(())
	}

	fn merge_statement_value(
		&mut self,
		statement: NodeId,
		src_edges: &StatementEdges,
		src_edge: EdgeId,
		child: NodeId,
	) -> Result<(), GraphError> {
		let Some(dst_edges) = self.get(statement)?.statement_edges().copied() else {
			return Ok(());
		};

		let dst_edge = if src_edge == src_edges.subject {
			dst_edges.subject
		} else if src_edge == src_edges.predicate {
			dst_edges.predicate
		} else if src_edge == src_edges.object {
			dst_edges.object
		} else {
			return Ok(());
		};

		if self.edges[dst_edge.0].child.is_none() {
			self.attach_child(dst_edge, child)?;
		}

		Ok(())
	}
}
