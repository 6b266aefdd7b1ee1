use super::EdgeId;
use crate::vocab;
use std::fmt;

/// Container flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
	Bag,
	Seq,
	Alt,
}

impl ContainerKind {
	/// URI of the type node every container of this kind points to.
	pub fn type_uri(&self) -> &'static str {
		match self {
			Self::Bag => vocab::RDF_BAG,
			Self::Seq => vocab::RDF_SEQ,
			Self::Alt => vocab::RDF_ALT,
		}
	}

	pub fn from_type_uri(uri: &str) -> Option<Self> {
		match uri {
			vocab::RDF_BAG => Some(Self::Bag),
			vocab::RDF_SEQ => Some(Self::Seq),
			vocab::RDF_ALT => Some(Self::Alt),
			_ => None,
		}
	}
}

impl fmt::Display for ContainerKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Bag => write!(f, "rdf:Bag"),
			Self::Seq => write!(f, "rdf:Seq"),
			Self::Alt => write!(f, "rdf:Alt"),
		}
	}
}

/// Literal payload. The language tag lives on the [`Node`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
	pub(crate) value: String,
	pub(crate) datatype: Option<String>,
}

impl Literal {
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn datatype(&self) -> Option<&str> {
		self.datatype.as_deref()
	}
}

/// Builds the composite key identifying a literal: `value[@lang][^^datatype]`.
pub fn literal_key(value: &str, language: Option<&str>, datatype: Option<&str>) -> String {
	let mut key = value.to_string();

	if let Some(language) = language {
		key.push('@');
		key.push_str(language);
	}

	if let Some(datatype) = datatype {
		key.push_str("^^");
		key.push_str(datatype);
	}

	key
}

/// Intrinsic edges of a reified statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatementEdges {
	/// `rdf:type` edge to `rdf:Statement`.
	pub type_edge: EdgeId,
	pub subject: EdgeId,
	pub predicate: EdgeId,
	pub object: EdgeId,
}

impl StatementEdges {
	pub fn contains(&self, edge: EdgeId) -> bool {
		self.type_edge == edge
			|| self.subject == edge
			|| self.predicate == edge
			|| self.object == edge
	}
}

/// Node flavour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// URI or blank node.
	Resource,

	/// Literal value.
	Literal(Literal),

	/// `rdf:Bag`, `rdf:Seq` or `rdf:Alt` with its intrinsic `rdf:type` edge.
	Container { kind: ContainerKind, type_edge: EdgeId },

	/// Reified triple.
	Statement(StatementEdges),
}

/// Graph node.
#[derive(Clone, Debug)]
pub struct Node {
	pub(crate) id: String,
	pub(crate) language: Option<String>,
	pub(crate) kind: NodeKind,
	pub(crate) child_edges: Vec<EdgeId>,
	pub(crate) parent_edges: Vec<EdgeId>,
}

impl Node {
	/// Creates a detached resource node.
	pub fn new(id: impl Into<String>) -> Self {
		Self::with_kind(id.into(), None, NodeKind::Resource)
	}

	pub(crate) fn with_kind(id: String, language: Option<String>, kind: NodeKind) -> Self {
		Self {
			id,
			language,
			kind,
			child_edges: Vec::new(),
			parent_edges: Vec::new(),
		}
	}

	pub(crate) fn literal(value: String, language: Option<String>, datatype: Option<String>) -> Self {
		let id = literal_key(&value, language.as_deref(), datatype.as_deref());
		Self::with_kind(id, language, NodeKind::Literal(Literal { value, datatype }))
	}

	/// Identifier. For literals this is the composite key.
	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn language(&self) -> Option<&str> {
		self.language.as_deref()
	}

	pub fn set_language(&mut self, language: Option<String>) {
		if !self.is_literal() {
			self.language = language
		}
	}

	pub fn kind(&self) -> &NodeKind {
		&self.kind
	}

	/// Outgoing edges.
	pub fn child_edges(&self) -> &[EdgeId] {
		&self.child_edges
	}

	/// Incoming edges.
	pub fn parent_edges(&self) -> &[EdgeId] {
		&self.parent_edges
	}

	pub fn as_literal(&self) -> Option<&Literal> {
		match &self.kind {
			NodeKind::Literal(l) => Some(l),
			_ => None,
		}
	}

	pub fn is_literal(&self) -> bool {
		matches!(self.kind, NodeKind::Literal(_))
	}

	pub fn container_kind(&self) -> Option<ContainerKind> {
		match self.kind {
			NodeKind::Container { kind, .. } => Some(kind),
			_ => None,
		}
	}

	pub fn statement_edges(&self) -> Option<&StatementEdges> {
		match &self.kind {
			NodeKind::Statement(edges) => Some(edges),
			_ => None,
		}
	}

	/// Checks that this node carries a synthesized blank identifier.
	pub fn is_blank(&self) -> bool {
		!self.is_literal() && self.id.starts_with(vocab::BLANK_PREFIX)
	}

	/// Blank node token, without the `blankID:` prefix.
	pub fn blank_label(&self) -> Option<&str> {
		if self.is_literal() {
			None
		} else {
			self.id.strip_prefix(vocab::BLANK_PREFIX)
		}
	}

	/// Checks that `edge` is one of the edges this node owns by construction.
	pub fn is_intrinsic(&self, edge: EdgeId) -> bool {
		match &self.kind {
			NodeKind::Container { type_edge, .. } => *type_edge == edge,
			NodeKind::Statement(edges) => edges.contains(edge),
			_ => false,
		}
	}
}
