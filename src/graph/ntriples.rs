use super::{EdgeId, Graph, Node, NodeId, NodeKind};
use std::fmt;

/// Wrapper to display string literals in their canonical N-Triples form.
///
/// Every non-ASCII code point is escaped.
pub struct DisplayStringLiteral<'a>(pub &'a str);

impl<'a> fmt::Display for DisplayStringLiteral<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for c in self.0.chars() {
			match c {
				'"' => write!(f, "\\\""),
				'\\' => write!(f, "\\\\"),
				'\n' => write!(f, "\\n"),
				'\r' => write!(f, "\\r"),
				'\t' => write!(f, "\\t"),
				c => write_char(f, c),
			}?
		}

		Ok(())
	}
}

/// Wrapper to display IRIs between angle brackets.
pub struct DisplayIri<'a>(pub &'a str);

impl<'a> fmt::Display for DisplayIri<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "<")?;
		for c in self.0.chars() {
			match c {
				'>' | '\\' | '"' | '\u{00}'..='\u{20}' => write!(f, "\\u{:04X}", c as u32),
				c => write_char(f, c),
			}?
		}

		write!(f, ">")
	}
}

fn write_char(f: &mut fmt::Formatter, c: char) -> fmt::Result {
	match c as u32 {
		0x20..=0x7e => write!(f, "{c}"),
		n @ 0..=0xffff => write!(f, "\\u{n:04X}"),
		n => write!(f, "\\U{n:08X}"),
	}
}

/// Canonical form of a single node.
struct DisplayNode<'a>(&'a Node);

impl<'a> fmt::Display for DisplayNode<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let node = self.0;
		match &node.kind {
			NodeKind::Literal(literal) => {
				write!(f, "\"{}\"", DisplayStringLiteral(&literal.value))?;

				if let Some(language) = &node.language {
					write!(f, "@{language}")?;
				}

				if let Some(datatype) = &literal.datatype {
					write!(f, "^^{}", DisplayIri(datatype))?;
				}

				Ok(())
			}
			_ => match node.blank_label() {
				Some(label) => write!(f, "_:{label}"),
				None => DisplayIri(&node.id).fmt(f),
			},
		}
	}
}

impl Graph {
	/// Canonical N-Triples form of a node.
	pub fn node_to_ntriple(&self, id: NodeId) -> Option<String> {
		self.node(id).map(|n| DisplayNode(n).to_string())
	}

	/// N-Triples row of an attached edge.
	pub fn edge_to_ntriple(&self, id: EdgeId) -> Option<String> {
		let edge = self.edge(id)?;
		let parent = self.node(edge.parent?)?;
		let child = self.node(edge.child?)?;
		Some(format!(
			"{} {} {} .",
			DisplayNode(parent),
			DisplayIri(&edge.id),
			DisplayNode(child)
		))
	}

	/// Serializes the whole graph, one row per attached child edge of every
	/// node, in node creation order.
	pub fn to_ntriples(&self) -> String {
		let mut out = String::new();
		for (_, node) in self.iter() {
			for e in &node.child_edges {
				if let Some(row) = self.edge_to_ntriple(*e) {
					out.push_str(&row);
					out.push('\n');
				}
			}
		}

		out
	}
}
