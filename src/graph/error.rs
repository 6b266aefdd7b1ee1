use super::{EdgeId, NodeId};
use std::fmt;

/// Graph mutation error.
///
/// These are never accumulated: they are returned to the immediate caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// A required identifier is empty.
	EmptyId,

	/// A predicate or datatype is not a well-formed URI.
	InvalidUri(String),

	/// A node with the same identifier is already in the graph.
	DuplicateKey(String),

	/// The node handle does not designate a live node of this graph.
	UnknownNode(NodeId),

	/// The edge handle does not designate an edge of this graph.
	UnknownEdge(EdgeId),

	/// Literals cannot become containers or statements.
	LiteralConversion(String),
}

impl fmt::Display for GraphError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::EmptyId => write!(f, "empty identifier"),
			Self::InvalidUri(uri) => write!(f, "invalid URI `{uri}`"),
			Self::DuplicateKey(id) => write!(f, "duplicate node `{id}`"),
			Self::UnknownNode(id) => write!(f, "unknown node {}", id.index()),
			Self::UnknownEdge(id) => write!(f, "unknown edge {}", id.index()),
			Self::LiteralConversion(id) => {
				write!(f, "literal `{id}` cannot be converted")
			}
		}
	}
}

impl std::error::Error for GraphError {}
