//! Parse diagnostics and fail-fast configuration shared by both front ends.
use crate::graph::GraphError;
use std::{fmt, io};

/// Parser configuration, shared by both front ends.
#[derive(Clone, Debug, Default)]
pub struct Options {
	/// Abort the parse on the first syntax error.
	pub stop_on_errors: bool,

	/// Abort the parse on the first warning.
	pub stop_on_warnings: bool,

	/// Base URI used when the document provides none.
	pub default_base: Option<String>,
}

/// Fatal parse outcome.
#[derive(Debug)]
pub enum Error {
	/// Syntax error met while `stop_on_errors` is set.
	Syntax(String),

	/// Warning met while `stop_on_warnings` is set.
	Warning(String),

	/// The input is not well-formed XML.
	Xml(quick_xml::Error),

	/// An XML name uses an undeclared namespace prefix.
	UnknownPrefix(String),

	/// The input could not be read.
	Io(io::Error),

	Graph(GraphError),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Syntax(msg) => write!(f, "syntax error: {msg}"),
			Self::Warning(msg) => write!(f, "syntax warning: {msg}"),
			Self::Xml(e) => write!(f, "malformed XML: {e}"),
			Self::UnknownPrefix(prefix) => write!(f, "unknown namespace prefix `{prefix}`"),
			Self::Io(e) => e.fmt(f),
			Self::Graph(e) => e.fmt(f),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Xml(e) => Some(e),
			Self::Io(e) => Some(e),
			Self::Graph(e) => Some(e),
			_ => None,
		}
	}
}

impl From<quick_xml::Error> for Error {
	fn from(e: quick_xml::Error) -> Self {
		Self::Xml(e)
	}
}

impl From<quick_xml::encoding::EncodingError> for Error {
	fn from(e: quick_xml::encoding::EncodingError) -> Self {
		Self::Xml(e.into())
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Self::Io(e)
	}
}

impl From<GraphError> for Error {
	fn from(e: GraphError) -> Self {
		Self::Graph(e)
	}
}

/// Ordered warning and error messages collected during a parse.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
	options: Options,
	warnings: Vec<String>,
	errors: Vec<String>,
}

impl Diagnostics {
	pub fn new(options: Options) -> Self {
		Self {
			options,
			warnings: Vec::new(),
			errors: Vec::new(),
		}
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	pub fn options_mut(&mut self) -> &mut Options {
		&mut self.options
	}

	pub fn warnings(&self) -> &[String] {
		&self.warnings
	}

	pub fn errors(&self) -> &[String] {
		&self.errors
	}

	pub fn clear(&mut self) {
		self.warnings.clear();
		self.errors.clear();
	}

	/// Records a syntax error, failing if `stop_on_errors` is set.
	pub fn error(&mut self, msg: impl Into<String>) -> Result<(), Error> {
		let msg = msg.into();
		log::error!("{msg}");
		self.errors.push(msg.clone());
		if self.options.stop_on_errors {
			Err(Error::Syntax(msg))
		} else {
			Ok(())
		}
	}

	/// Records a warning, failing if `stop_on_warnings` is set.
	pub fn warning(&mut self, msg: impl Into<String>) -> Result<(), Error> {
		let msg = msg.into();
		log::warn!("{msg}");
		self.warnings.push(msg.clone());
		if self.options.stop_on_warnings {
			Err(Error::Warning(msg))
		} else {
			Ok(())
		}
	}
}
