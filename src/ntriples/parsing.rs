use super::{
	lexing::{Token, Tokens},
	Literal, Object, Subject, Triple,
};
use iref::IriBuf;
use locspan::{Meta, Span};
use std::fmt;

#[derive(Debug)]
pub enum Error<E> {
	Lexer(E),
	Unexpected(Option<Token>),
}

pub type BoxedError<E> = Box<Meta<Error<E>, Span>>;

impl<E> Error<E> {
	fn from_lexer(Meta(e, span): Meta<E, Span>) -> BoxedError<E> {
		Box::new(Meta(Self::Lexer(e), span))
	}
}

impl<E: fmt::Display> fmt::Display for Error<E> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Unexpected(None) => write!(f, "unexpected end of line"),
			Self::Unexpected(Some(token)) => write!(f, "unexpected {token}"),
			Self::Lexer(e) => e.fmt(f),
		}
	}
}

impl<E: 'static + std::error::Error> std::error::Error for Error<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Lexer(e) => Some(e),
			_ => None,
		}
	}
}

fn unexpected<T, E>(Meta(token, span): Meta<Option<Token>, Span>) -> Result<T, BoxedError<E>> {
	Err(Box::new(Meta(Error::Unexpected(token), span)))
}

/// Smallest span covering `a` and `b`.
fn join(a: Span, b: Span) -> Span {
	Span::new(a.start(), b.end())
}

pub trait Parse: Sized {
	#[allow(clippy::type_complexity)]
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>>;
}

impl Parse for IriBuf {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(iri, span)),
			other => unexpected(other),
		}
	}
}

impl Parse for Subject {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(Self::Iri(iri), span)),
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(Self::Blank(label), span)),
			other => unexpected(other),
		}
	}
}

/// Parses the optional `@lang` or `^^<datatype>` suffix of a string literal.
#[allow(clippy::type_complexity)]
fn parse_literal<L: Tokens>(
	lexer: &mut L,
	string: String,
	string_span: Span,
) -> Result<Meta<Literal, Span>, BoxedError<L::Error>> {
	match lexer.peek().map_err(Error::from_lexer)? {
		Meta(Some(Token::LangTag(_)), _) => match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::LangTag(tag)), tag_span) => Ok(Meta(
				Literal::LangString(Meta(string, string_span), Meta(tag, tag_span)),
				join(string_span, tag_span),
			)),
			other => unexpected(other),
		},
		Meta(Some(Token::Carets), _) => {
			lexer.next().map_err(Error::from_lexer)?;
			match lexer.next().map_err(Error::from_lexer)? {
				Meta(Some(Token::Iri(iri)), iri_span) => Ok(Meta(
					Literal::TypedString(Meta(string, string_span), Meta(iri, iri_span)),
					join(string_span, iri_span),
				)),
				other => unexpected(other),
			}
		}
		_ => Ok(Meta(Literal::String(Meta(string, string_span)), string_span)),
	}
}

impl Parse for Literal {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::StringLiteral(string)), span) => parse_literal(lexer, string, span),
			other => unexpected(other),
		}
	}
}

impl Parse for Object {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		match lexer.next().map_err(Error::from_lexer)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(Self::Iri(iri), span)),
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(Self::Blank(label), span)),
			Meta(Some(Token::StringLiteral(string)), string_span) => {
				let Meta(lit, span) = parse_literal(lexer, string, string_span)?;
				Ok(Meta(Self::Literal(lit), span))
			}
			other => unexpected(other),
		}
	}
}

impl Parse for Triple {
	/// Parses `subject predicate object [.]` followed by the end of the line.
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, BoxedError<L::Error>> {
		let subject = Subject::parse(lexer)?;
		let predicate = IriBuf::parse(lexer)?;
		let object = Object::parse(lexer)?;
		let span = join(subject.1, object.1);

		if let Meta(Some(Token::Dot), _) = lexer.peek().map_err(Error::from_lexer)? {
			lexer.next().map_err(Error::from_lexer)?;
		}

		match lexer.next().map_err(Error::from_lexer)? {
			Meta(None, _) => Ok(Meta(
				Triple {
					subject,
					predicate,
					object,
				},
				span,
			)),
			other => unexpected(other),
		}
	}
}
