use super::NodeId;

/// Directed, predicate-labeled edge.
///
/// Endpoints are handles into the owning [`Graph`](super::Graph). They are
/// only changed through the graph so that both sides of a link stay in sync.
#[derive(Clone, Debug)]
pub struct Edge {
	pub(crate) id: String,
	pub(crate) language: Option<String>,
	pub(crate) parent: Option<NodeId>,
	pub(crate) child: Option<NodeId>,
}

impl Edge {
	pub(crate) fn new(id: String, language: Option<String>) -> Self {
		Self {
			id,
			language,
			parent: None,
			child: None,
		}
	}

	/// Predicate URI.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Language inherited from the surrounding document.
	pub fn language(&self) -> Option<&str> {
		self.language.as_deref()
	}

	pub fn parent(&self) -> Option<NodeId> {
		self.parent
	}

	pub fn child(&self) -> Option<NodeId> {
		self.child
	}

	/// Checks that both endpoints are attached.
	pub fn is_attached(&self) -> bool {
		self.parent.is_some() && self.child.is_some()
	}
}
