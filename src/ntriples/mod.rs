//! Line oriented N-Triples front end.
//!
//! Every line is lexed and parsed on its own. A line that fails to parse is
//! reported and skipped, without touching the graph.
use crate::{
	diagnostics::{Diagnostics, Error, Options},
	graph::{Graph, GraphError},
	vocab,
};
use iref::IriBuf;
use langtag::LangTagBuf;
use locspan::{Meta, Span};
use std::io::BufRead;

pub mod lexing;
pub mod parsing;

pub use lexing::{Lexer, LineLexer, Token, Tokens};
pub use parsing::Parse;

/// Subject.
#[derive(Clone, Debug)]
pub enum Subject {
	Iri(IriBuf),
	Blank(String),
}

/// Literal, with the span of each of its parts.
#[derive(Clone, Debug)]
pub enum Literal {
	String(Meta<String, Span>),
	LangString(Meta<String, Span>, Meta<LangTagBuf, Span>),
	TypedString(Meta<String, Span>, Meta<IriBuf, Span>),
}

impl Literal {
	pub fn value(&self) -> &str {
		match self {
			Self::String(Meta(s, _))
			| Self::LangString(Meta(s, _), _)
			| Self::TypedString(Meta(s, _), _) => s,
		}
	}
}

/// Object.
#[derive(Clone, Debug)]
pub enum Object {
	Iri(IriBuf),
	Blank(String),
	Literal(Literal),
}

/// Parsed triple line.
#[derive(Clone, Debug)]
pub struct Triple {
	pub subject: Meta<Subject, Span>,
	pub predicate: Meta<IriBuf, Span>,
	pub object: Meta<Object, Span>,
}

/// Triple components as written in the source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTriple {
	pub subject: String,
	pub predicate: String,
	pub object: String,
}

impl RawTriple {
	fn new(line: &str, triple: &Triple) -> Self {
		let slice = |span: Span| line.get(span.start()..span.end()).unwrap_or("").to_string();
		Self {
			subject: slice(triple.subject.1),
			predicate: slice(triple.predicate.1),
			object: slice(triple.object.1),
		}
	}
}

/// N-Triples parser.
#[derive(Debug, Default)]
pub struct NTriplesParser {
	diagnostics: Diagnostics,
	triples: Vec<RawTriple>,
}

impl NTriplesParser {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: Options) -> Self {
		Self {
			diagnostics: Diagnostics::new(options),
			triples: Vec::new(),
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

	pub fn options(&self) -> &Options {
		self.diagnostics.options()
	}

	/// Raw triples produced by the last parse, in input order.
	pub fn triples(&self) -> &[RawTriple] {
		&self.triples
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
		self.read(input.as_bytes(), &mut graph)?;
		Ok(graph)
	}

	/// Parses the lines of `reader` into `graph`.
	///
	/// Diagnostics and raw triples of any previous parse are discarded.
	pub fn read<R: BufRead>(&mut self, mut reader: R, graph: &mut Graph) -> Result<(), Error> {
		self.diagnostics.clear();
		self.triples.clear();
		log::debug!("parsing N-Triples");

		let mut buffer = Vec::new();
		let mut n = 0;
		loop {
			buffer.clear();
			if reader.read_until(b'\n', &mut buffer)? == 0 {
				break;
			}

			n += 1;
			let line = buffer.strip_suffix(b"\n").unwrap_or(&buffer);
			let line = line.strip_suffix(b"\r").unwrap_or(line);
			match std::str::from_utf8(line) {
				Ok(line) => self.parse_line(n, line, graph)?,
				Err(_) => self.diagnostics.error(format!("line {n}: invalid UTF-8"))?,
			}
		}

		log::debug!(
			"parsed {} triples ({} errors, {} warnings)",
			self.triples.len(),
			self.errors().len(),
			self.warnings().len()
		);
		Ok(())
	}

	fn parse_line(&mut self, n: usize, line: &str, graph: &mut Graph) -> Result<(), Error> {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			return Ok(());
		}

		let mut lexer = LineLexer::for_line(line);
		match Triple::parse(&mut lexer) {
			Ok(Meta(triple, _)) => match insert(&triple, graph) {
				Ok(()) => {
					self.triples.push(RawTriple::new(line, &triple));
					Ok(())
				}
				Err(e) => self.diagnostics.error(format!("line {n}: {e}")),
			},
			Err(e) => {
				let Meta(e, span) = *e;
				self.diagnostics
					.error(format!("line {n}, {}..{}: {e}", span.start(), span.end()))
			}
		}
	}
}

fn blank_id(label: &str) -> String {
	format!("{}{label}", vocab::BLANK_PREFIX)
}

/// Adds the subject, the edge and the object of `triple` to the graph.
fn insert(triple: &Triple, graph: &mut Graph) -> Result<(), GraphError> {
	let subject = match &triple.subject.0 {
		Subject::Iri(iri) => graph.add_node(&iri.to_string())?,
		Subject::Blank(label) => graph.add_node(&blank_id(label))?,
	};

	let edge = graph.add_edge(&triple.predicate.0.to_string(), None)?;

	let object = match &triple.object.0 {
		Object::Iri(iri) => graph.add_node(&iri.to_string())?,
		Object::Blank(label) => graph.add_node(&blank_id(label))?,
		Object::Literal(Literal::String(Meta(value, _))) => graph.add_literal(value),
		Object::Literal(Literal::LangString(Meta(value, _), Meta(tag, _))) => {
			graph.add_literal_with(value, Some(&tag.to_string()), None)?
		}
		Object::Literal(Literal::TypedString(Meta(value, _), Meta(datatype, _))) => {
			graph.add_literal_with(value, None, Some(&datatype.to_string()))?
		}
	};

	graph.attach_parent(edge, subject)?;
	graph.attach_child(edge, object)
}
