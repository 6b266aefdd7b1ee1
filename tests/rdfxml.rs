use rdf_graph_syntax::{
	rdfxml::Document, vocab, ContainerKind, Error, Graph, GraphParser, NodeId, RdfXmlParser,
};
use std::path::Path;

const EX: &str = "http://example.org/ns#";
const FOAF: &str = "http://xmlns.com/foaf/0.1/";

fn rdf(body: &str) -> String {
	format!(
		"<rdf:RDF xmlns:rdf=\"{}\" xmlns:ex=\"{EX}\">{body}</rdf:RDF>",
		vocab::RDF
	)
}

fn parse_str(input: &str) -> (Graph, RdfXmlParser) {
	stderrlog::new().init().ok();
	let mut parser = RdfXmlParser::new();
	match parser.parse_str(input) {
		Ok(graph) => (graph, parser),
		Err(e) => {
			log::error!("parse error: {e}");
			panic!("parse error: {e:?}")
		}
	}
}

fn parse_file<P: AsRef<Path>>(path: P) -> (Graph, RdfXmlParser) {
	match std::fs::read_to_string(&path) {
		Ok(buffer) => parse_str(&buffer),
		Err(e) => {
			log::error!("unable to read file `{}`: {}", path.as_ref().display(), e);
			panic!("IO error: {e:?}")
		}
	}
}

/// Children of `node` through edges labeled `predicate`, in edge order.
fn children(graph: &Graph, node: NodeId, predicate: &str) -> Vec<NodeId> {
	graph
		.node(node)
		.unwrap()
		.child_edges()
		.iter()
		.map(|e| graph.edge(*e).unwrap())
		.filter(|e| e.id() == predicate)
		.filter_map(|e| e.child())
		.collect()
}

fn child(graph: &Graph, node: NodeId, predicate: &str) -> NodeId {
	match children(graph, node, predicate).as_slice() {
		[c] => *c,
		other => panic!("expected one `{predicate}` child, found {}", other.len()),
	}
}

fn id(graph: &Graph, node: NodeId) -> &str {
	graph.node(node).unwrap().id()
}

#[test]
fn description_with_literal_property() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\"><ex:p>v</ex:p></rdf:Description>",
	));
	assert!(parser.errors().is_empty());
	assert!(parser.warnings().is_empty());

	let s = graph.node_by_id("http://a/s").unwrap();
	assert_eq!(graph.node(s).unwrap().child_edges().len(), 1);
	let v = child(&graph, s, &format!("{EX}p"));
	assert_eq!(graph.node(v).unwrap().as_literal().unwrap().value(), "v")
}

#[test]
fn list_items_are_numbered() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\">\
			<rdf:li>one</rdf:li><ex:p>x</ex:p><rdf:li>two</rdf:li>\
		</rdf:Description>",
	));
	assert!(parser.errors().is_empty());

	let s = graph.node_by_id("http://a/s").unwrap();
	let one = child(&graph, s, &format!("{}_1", vocab::RDF));
	let two = child(&graph, s, &format!("{}_2", vocab::RDF));
	assert_eq!(id(&graph, one), "one");
	assert_eq!(id(&graph, two), "two");

	let order: Vec<&str> = graph
		.node(s)
		.unwrap()
		.child_edges()
		.iter()
		.map(|e| graph.edge(*e).unwrap().id())
		.collect();
	assert_eq!(
		order,
		[
			format!("{}_1", vocab::RDF),
			format!("{EX}p"),
			format!("{}_2", vocab::RDF)
		]
	)
}

#[test]
fn empty_collection_is_nil() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\">\
			<ex:list rdf:parseType=\"Collection\"/>\
		</rdf:Description>",
	));
	assert!(parser.errors().is_empty());

	let s = graph.node_by_id("http://a/s").unwrap();
	let list = child(&graph, s, &format!("{EX}list"));
	assert_eq!(id(&graph, list), vocab::RDF_NIL);
	assert!(graph.edges_by_id(vocab::RDF_FIRST).is_empty())
}

#[test]
fn collection_cells() {
	let (graph, _) = parse_file("tests/rdfxml/people.rdf");
	let bob = graph.node_by_id("blankID:bob").unwrap();
	let list_type = graph.node_by_id(vocab::RDF_LIST).unwrap();

	let mut cell = child(&graph, bob, &format!("{EX}path"));
	let mut items = Vec::new();
	while id(&graph, cell) != vocab::RDF_NIL {
		assert!(graph.node(cell).unwrap().is_blank());
		assert_eq!(child(&graph, cell, vocab::RDF_TYPE), list_type);
		items.push(id(&graph, child(&graph, cell, vocab::RDF_FIRST)).to_string());
		cell = child(&graph, cell, vocab::RDF_REST);
	}

	assert_eq!(
		items,
		[
			"http://example.org/people/#a",
			"http://example.org/people/#b"
		]
	);
	assert_eq!(graph.edges_by_id(vocab::RDF_FIRST).len(), 2);
	assert_eq!(graph.edges_by_id(vocab::RDF_REST).len(), 2)
}

#[test]
fn people() {
	let (graph, parser) = parse_file("tests/rdfxml/people.rdf");
	assert!(parser.errors().is_empty(), "{:?}", parser.errors());
	assert!(parser.warnings().is_empty(), "{:?}", parser.warnings());

	assert_eq!(graph.base(), Some("http://example.org/people/"));
	assert_eq!(graph.namespace("foaf"), Some(FOAF));
	assert_eq!(graph.namespace("ex"), Some(EX));

	let alice = graph.node_by_id("http://example.org/people/alice").unwrap();
	let person = child(&graph, alice, vocab::RDF_TYPE);
	assert_eq!(id(&graph, person), "http://xmlns.com/foaf/0.1/Person");

	let name = child(&graph, alice, &format!("{FOAF}name"));
	assert_eq!(id(&graph, name), "Alice");

	let age = child(&graph, alice, &format!("{FOAF}age"));
	let age = graph.node(age).unwrap().as_literal().unwrap();
	assert_eq!(age.value(), "42");
	assert_eq!(age.datatype(), Some("http://www.w3.org/2001/XMLSchema#integer"));

	let bob = graph.node_by_id("blankID:bob").unwrap();
	assert_eq!(child(&graph, alice, &format!("{FOAF}knows")), bob);

	let near = child(&graph, alice, &format!("{FOAF}based_near"));
	assert!(graph.node(near).unwrap().is_blank());
	let city = child(&graph, near, &format!("{EX}city"));
	assert_eq!(graph.node(city).unwrap().language(), Some("fr"));

	let seq = child(&graph, alice, &format!("{EX}friends"));
	assert_eq!(graph.node(seq).unwrap().container_kind(), Some(ContainerKind::Seq));
	assert_eq!(child(&graph, seq, &format!("{}_1", vocab::RDF)), bob);
	let carol = child(&graph, seq, &format!("{}_2", vocab::RDF));
	assert_eq!(id(&graph, carol), "http://example.org/people/#carol");

	let note = child(&graph, bob, &format!("{EX}note"));
	let note = graph.node(note).unwrap().as_literal().unwrap();
	assert_eq!(
		note.value(),
		format!("likes <ex:b xmlns:ex=\"{EX}\">bold</ex:b> text")
	);
	assert_eq!(note.datatype(), Some(vocab::RDF_XML_LITERAL));

	let nothing = child(&graph, bob, &format!("{EX}nothing"));
	assert_eq!(id(&graph, nothing), "");

	assert!(graph.edges().all(|(_, e)| e.is_attached()))
}

#[test]
fn xml_literal_redeclares_inherited_namespaces() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\" xmlns=\"http://example.org/html#\">\
			<ex:note rdf:parseType=\"Literal\">\
				<p ex:k=\"v\"><ex:b xmlns:ex=\"http://other.org/\">x</ex:b></p> and <span/>\
			</ex:note>\
		</rdf:Description>",
	));
	assert!(parser.errors().is_empty(), "{:?}", parser.errors());

	let s = graph.node_by_id("http://a/s").unwrap();
	let note = child(&graph, s, &format!("{EX}note"));
	assert_eq!(
		graph.node(note).unwrap().as_literal().unwrap().value(),
		format!(
			"<p xmlns=\"http://example.org/html#\" xmlns:ex=\"{EX}\" ex:k=\"v\">\
			 <ex:b xmlns:ex=\"http://other.org/\">x</ex:b></p> and \
			 <span xmlns=\"http://example.org/html#\"></span>"
		)
	)
}

#[test]
fn reification() {
	let (graph, parser) = parse_file("tests/rdfxml/reification.rdf");
	assert!(parser.errors().is_empty(), "{:?}", parser.errors());

	let s = graph.node_by_id("http://example.org/doc#s").unwrap();
	let st = graph.node_by_id("http://example.org/doc#triple1").unwrap();
	let edges = *graph.node(st).unwrap().statement_edges().unwrap();
	assert_eq!(graph.edge(edges.subject).unwrap().child(), Some(s));
	let predicate = graph.edge(edges.predicate).unwrap().child().unwrap();
	assert_eq!(id(&graph, predicate), format!("{EX}p"));
	let object = graph.edge(edges.object).unwrap().child().unwrap();
	assert_eq!(id(&graph, object), "v");

	let st2 = graph.node_by_id("http://example.org/doc#triple2").unwrap();
	let edges = *graph.node(st2).unwrap().statement_edges().unwrap();
	let object = graph.edge(edges.object).unwrap().child().unwrap();
	assert_eq!(id(&graph, object), "http://example.org/doc#o");
	assert_eq!(graph.edges_by_id(vocab::RDF_SUBJECT).len(), 2)
}

#[test]
fn redefined_id() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:ID=\"a\"/><rdf:Description rdf:ID=\"a\"><ex:p>x</ex:p></rdf:Description>",
	));
	assert_eq!(parser.errors().len(), 1);
	assert!(parser.errors()[0].contains("redefinition"));
	assert!(graph.node_by_id("http://unknown.org/#a").is_some());
	assert!(graph.edges_by_id(&format!("{EX}p")).is_empty())
}

#[test]
fn container_conversion_keeps_edges() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/c\"><ex:p>x</ex:p></rdf:Description>\
		 <rdf:Description rdf:about=\"http://a/owner\"><ex:has rdf:resource=\"http://a/c\"/></rdf:Description>\
		 <rdf:Bag rdf:about=\"http://a/c\"><rdf:li>y</rdf:li></rdf:Bag>",
	));
	assert!(parser.errors().is_empty());

	let c = graph.node_by_id("http://a/c").unwrap();
	let node = graph.node(c).unwrap();
	assert_eq!(node.container_kind(), Some(ContainerKind::Bag));
	assert_eq!(node.child_edges().len(), 3);
	assert_eq!(node.parent_edges().len(), 1);
	assert_eq!(id(&graph, child(&graph, c, &format!("{EX}p"))), "x");
	assert_eq!(id(&graph, child(&graph, c, &format!("{}_1", vocab::RDF))), "y")
}

#[test]
fn exclusive_identity_attributes() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\" rdf:nodeID=\"n\"><ex:p>v</ex:p></rdf:Description>",
	));
	assert_eq!(parser.errors().len(), 1);
	assert!(graph.node_by_id("http://a/s").is_none());
	assert!(graph.node_by_id("blankID:n").is_none())
}

#[test]
fn exclusive_property_attributes() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\">\
			<ex:p rdf:resource=\"http://a/o\" rdf:parseType=\"Resource\"/>\
			<ex:q rdf:parseType=\"Unknown\">z</ex:q>\
			<ex:r>ok</ex:r>\
		</rdf:Description>",
	));
	assert_eq!(parser.errors().len(), 2);
	assert!(parser.errors()[1].contains("Unknown"));
	let s = graph.node_by_id("http://a/s").unwrap();
	assert_eq!(graph.node(s).unwrap().child_edges().len(), 1);
	assert!(graph.node_by_id("http://a/o").is_none())
}

#[test]
fn forbidden_names() {
	let (_, parser) = parse_str(&rdf(
		"<rdf:li/>\
		 <rdf:Description rdf:about=\"http://a/s\" rdf:aboutEach=\"http://a/t\">\
			<rdf:Description/>\
		 </rdf:Description>",
	));
	assert_eq!(parser.errors().len(), 3, "{:?}", parser.errors())
}

#[test]
fn unqualified_attributes() {
	let input = rdf("<rdf:Description about=\"http://a/s\"><ex:p>v</ex:p></rdf:Description>");
	let (graph, parser) = parse_str(&input);
	assert_eq!(parser.warnings().len(), 1);
	assert!(parser.errors().is_empty());
	assert!(graph.node_by_id("http://a/s").is_some());

	let mut strict = RdfXmlParser::new().stop_on_warnings(true);
	assert!(matches!(strict.parse_str(&input), Err(Error::Warning(_))))
}

#[test]
fn stop_on_errors() {
	let mut parser = RdfXmlParser::new().stop_on_errors(true);
	let result = parser.parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\" rdf:ID=\"x\"/>",
	));
	assert!(matches!(result, Err(Error::Syntax(_))));
	assert_eq!(parser.errors().len(), 1)
}

#[test]
fn malformed_xml() {
	let mut parser = RdfXmlParser::new();
	assert!(matches!(
		parser.parse_str("<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">"),
		Err(_)
	));
	assert!(matches!(
		parser.parse_str("<foo:RDF/>"),
		Err(Error::UnknownPrefix(_))
	))
}

#[test]
fn base_seeding() {
	let input = rdf("<rdf:Description rdf:about=\"x\"/>");

	let (graph, _) = parse_str(&input);
	assert_eq!(graph.base(), Some(vocab::UNKNOWN_BASE));
	assert!(graph.node_by_id("http://unknown.org/x").is_some());

	let graph = RdfXmlParser::new()
		.with_base("http://default.org/dir/")
		.parse_str(&input)
		.unwrap();
	assert_eq!(graph.base(), Some("http://default.org/dir/"));
	assert!(graph.node_by_id("http://default.org/dir/x").is_some());

	let document = Document::parse_str(&input)
		.unwrap()
		.with_base_uri("http://doc.org/a/b#frag");
	let mut graph = Graph::new();
	RdfXmlParser::new()
		.with_base("http://default.org/")
		.parse_document(&document, &mut graph)
		.unwrap();
	assert_eq!(graph.base(), Some("http://doc.org/a/b"));
	assert!(graph.node_by_id("http://doc.org/a/x").is_some());

	let mut graph = Graph::new();
	graph.set_base("http://existing.org/");
	RdfXmlParser::new()
		.parse_document(&document, &mut graph)
		.unwrap();
	assert_eq!(graph.base(), Some("http://existing.org/"));
	assert!(graph.node_by_id("http://existing.org/x").is_some())
}

#[test]
fn nested_base_and_language() {
	let (graph, _) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\" xml:lang=\"en\">\
			<ex:p>hello</ex:p>\
			<ex:q xml:lang=\"\">plain</ex:q>\
			<ex:r xml:base=\"http://b.org/x/\" rdf:resource=\"y\"/>\
			<ex:t rdf:ID=\"st\" xml:base=\"http://c.org/\">v</ex:t>\
		</rdf:Description>",
	));
	assert!(graph.literal_by_key("hello", Some("en"), None).is_some());
	assert!(graph.literal_by_key("plain", None, None).is_some());
	assert!(graph.node_by_id("http://b.org/x/y").is_some());
	assert!(graph.node_by_id("http://c.org/#st").is_some())
}

#[test]
fn namespace_redefinition() {
	let (graph, parser) = parse_str(&rdf(
		"<rdf:Description rdf:about=\"http://a/s\" xmlns:ex=\"http://other.org/\">\
			<ex:p>v</ex:p>\
		</rdf:Description>",
	));
	assert_eq!(parser.warnings().len(), 1);
	assert_eq!(graph.namespace("ex"), Some(EX));
	assert_eq!(graph.edges_by_id("http://other.org/p").len(), 1)
}

#[test]
fn blank_nodes_do_not_collide() {
	let input = rdf("<rdf:Description><ex:p>v</ex:p></rdf:Description>");
	let mut graph = Graph::new();
	graph.add_node("blankID:7").unwrap();

	let mut parser = RdfXmlParser::new();
	parser.read(input.as_bytes(), &mut graph).unwrap();
	parser.read(input.as_bytes(), &mut graph).unwrap();
	assert!(graph.node_by_id("blankID:8").is_some());
	assert!(graph.node_by_id("blankID:9").is_some());
	assert_eq!(graph.edges_by_id(&format!("{EX}p")).len(), 2)
}

#[test]
fn node_element_root() {
	let (graph, parser) = parse_str(&format!(
		"<ex:Thing xmlns:rdf=\"{}\" xmlns:ex=\"{EX}\" rdf:about=\"http://a/t\"><ex:p>v</ex:p></ex:Thing>",
		vocab::RDF
	));
	assert!(parser.errors().is_empty());
	let t = graph.node_by_id("http://a/t").unwrap();
	assert_eq!(id(&graph, child(&graph, t, vocab::RDF_TYPE)), format!("{EX}Thing"))
}

#[test]
fn graph_parser_trait() {
	let input = rdf("<rdf:Description rdf:about=\"http://a/s\" ex:p=\"v\"/>");
	let mut parser: Box<dyn GraphParser> = Box::new(RdfXmlParser::new());
	let graph = parser.parse(&mut input.as_bytes()).unwrap();
	assert!(parser.errors().is_empty());
	assert_eq!(graph.to_ntriples(), "<http://a/s> <http://example.org/ns#p> \"v\" .\n")
}
