//! Vocabulary used by the RDF/XML syntax.

/// RDF syntax namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// XML namespace, bound to the `xml` prefix.
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Key of the base URI entry in a graph's namespace table.
pub const XML_BASE: &str = "xml:base";

/// Base URI used when nothing else provides one.
pub const UNKNOWN_BASE: &str = "http://unknown.org/";

/// Prefix of synthesized blank node identifiers.
pub const BLANK_PREFIX: &str = "blankID:";

pub const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
pub const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
pub const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
pub const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
pub const RDF_ABOUT_EACH_PREFIX: &str =
	"http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
pub const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
pub const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
pub const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
pub const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
pub const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
pub const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
pub const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
pub const RDF_BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";
pub const RDF_SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
pub const RDF_ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";
pub const RDF_LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub const RDF_STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
pub const RDF_SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
pub const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const RDF_OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
pub const RDF_XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

/// Names that may never be used as a node element.
pub const FORBIDDEN_NODE_ELEMENTS: [&str; 11] = [
	RDF_RDF,
	RDF_ID,
	RDF_ABOUT,
	RDF_BAG_ID,
	RDF_PARSE_TYPE,
	RDF_RESOURCE,
	RDF_NODE_ID,
	RDF_LI,
	RDF_ABOUT_EACH,
	RDF_ABOUT_EACH_PREFIX,
	RDF_DATATYPE,
];

/// Names that may never be used as a property element.
pub const FORBIDDEN_PROPERTY_ELEMENTS: [&str; 11] = [
	RDF_DESCRIPTION,
	RDF_RDF,
	RDF_ID,
	RDF_ABOUT,
	RDF_BAG_ID,
	RDF_PARSE_TYPE,
	RDF_RESOURCE,
	RDF_NODE_ID,
	RDF_ABOUT_EACH,
	RDF_ABOUT_EACH_PREFIX,
	RDF_DATATYPE,
];

/// Deprecated attributes, rejected wherever they appear.
pub const FORBIDDEN_ATTRIBUTES: [&str; 5] = [
	RDF_ABOUT_EACH,
	RDF_ABOUT_EACH_PREFIX,
	RDF_BAG_ID,
	RDF_LI,
	RDF_RDF,
];

/// Local names of the RDF namespace this parser knows about.
///
/// `_<n>` membership properties are checked separately.
pub const KNOWN_RDF_NAMES: [&str; 25] = [
	"RDF",
	"Description",
	"about",
	"ID",
	"nodeID",
	"resource",
	"parseType",
	"datatype",
	"li",
	"type",
	"value",
	"Bag",
	"Seq",
	"Alt",
	"List",
	"first",
	"rest",
	"nil",
	"Statement",
	"subject",
	"predicate",
	"object",
	"Property",
	"XMLLiteral",
	"bagID",
];

/// Attributes that lose their meaning when written without the `rdf:` prefix.
pub const UNQUALIFIED_RDF_ATTRIBUTES: [&str; 7] = [
	"about",
	"ID",
	"nodeID",
	"resource",
	"parseType",
	"datatype",
	"type",
];

/// Checks that `local` names a container membership property (`_1`, `_2`, ...).
pub fn is_membership_name(local: &str) -> bool {
	match local.strip_prefix('_') {
		Some(n) => {
			!n.is_empty()
				&& !n.starts_with('0')
				&& n.bytes().all(|b| b.is_ascii_digit())
		}
		None => false,
	}
}

/// Checks that `name` is a valid XML `NCName`.
pub fn is_nc_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if is_name_start_char(c) => chars.all(is_name_char),
		_ => false,
	}
}

fn is_name_start_char(c: char) -> bool {
	matches!(c, 'A'..='Z' | '_' | 'a'..='z' | '\u{c0}'..='\u{d6}' | '\u{d8}'..='\u{f6}' | '\u{f8}'..='\u{2ff}' | '\u{370}'..='\u{37d}' | '\u{37f}'..='\u{1fff}' | '\u{200c}'..='\u{200d}' | '\u{2070}'..='\u{218f}' | '\u{2c00}'..='\u{2fef}' | '\u{3001}'..='\u{d7ff}' | '\u{f900}'..='\u{fdcf}' | '\u{fdf0}'..='\u{fffd}' | '\u{10000}'..='\u{effff}')
}

fn is_name_char(c: char) -> bool {
	is_name_start_char(c)
		|| matches!(c, '-' | '.' | '0'..='9' | '\u{b7}' | '\u{300}'..='\u{36f}' | '\u{203f}'..='\u{2040}')
}
