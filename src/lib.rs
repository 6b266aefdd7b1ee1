//! In-memory labeled RDF graph, populated from RDF/XML or N-Triples.
//!
//! ```
//! use rdf_graph_syntax::{NTriplesParser, RdfXmlParser};
//!
//! let graph = NTriplesParser::new()
//! 	.parse_str("<http://a/s> <http://a/p> \"hello\" .")
//! 	.unwrap();
//! assert_eq!(graph.to_ntriples(), "<http://a/s> <http://a/p> \"hello\" .\n");
//!
//! let mut parser = RdfXmlParser::new();
//! let graph = parser
//! 	.parse_str(
//! 		r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//! 		            xmlns:ex="http://example.org/">
//! 			<rdf:Description rdf:about="http://a/s"><ex:p>v</ex:p></rdf:Description>
//! 		</rdf:RDF>"#,
//! 	)
//! 	.unwrap();
//! assert!(parser.errors().is_empty());
//! assert_eq!(graph.edges_by_id("http://example.org/p").len(), 1);
//! ```
pub mod diagnostics;
pub mod graph;
pub mod ntriples;
pub mod parser;
pub mod rdfxml;
pub mod uri;
pub mod vocab;

pub use diagnostics::{Diagnostics, Error, Options};
pub use graph::{
	ContainerKind, Edge, EdgeId, Graph, GraphError, Literal, Node, NodeId, NodeKind,
	StatementEdges,
};
pub use ntriples::{NTriplesParser, RawTriple};
pub use parser::GraphParser;
pub use rdfxml::RdfXmlParser;
