use crate::{diagnostics::Error, graph::Graph, ntriples::NTriplesParser, rdfxml::RdfXmlParser};
use std::io::{BufReader, Read};

/// Front end populating a [`Graph`] from a serialized document.
pub trait GraphParser {
	/// Adds the content of `input` to `graph`.
	fn parse_into(&mut self, input: &mut dyn Read, graph: &mut Graph) -> Result<(), Error>;

	/// Warnings recorded by the last parse.
	fn warnings(&self) -> &[String];

	/// Syntax errors recorded by the last parse.
	fn errors(&self) -> &[String];

	/// Parses `input` into a fresh graph.
	fn parse(&mut self, input: &mut dyn Read) -> Result<Graph, Error> {
		let mut graph = Graph::new();
		self.parse_into(input, &mut graph)?;
		Ok(graph)
	}
}

impl GraphParser for NTriplesParser {
	fn parse_into(&mut self, input: &mut dyn Read, graph: &mut Graph) -> Result<(), Error> {
		self.read(BufReader::new(input), graph)
	}

	fn warnings(&self) -> &[String] {
		NTriplesParser::warnings(self)
	}

	fn errors(&self) -> &[String] {
		NTriplesParser::errors(self)
	}
}

impl GraphParser for RdfXmlParser {
	fn parse_into(&mut self, input: &mut dyn Read, graph: &mut Graph) -> Result<(), Error> {
		self.read(input, graph)
	}

	fn warnings(&self) -> &[String] {
		RdfXmlParser::warnings(self)
	}

	fn errors(&self) -> &[String] {
		RdfXmlParser::errors(self)
	}
}
