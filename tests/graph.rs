use rdf_graph_syntax::{vocab, ContainerKind, Graph, GraphError, Node, NodeKind};

const P: &str = "http://example.org/p";
const Q: &str = "http://example.org/q";

#[test]
fn add_node_is_idempotent() {
	let mut graph = Graph::new();
	let a = graph.add_node("http://example.org/a").unwrap();
	let b = graph.add_node("http://example.org/a").unwrap();
	assert_eq!(a, b);
	assert_eq!(graph.node_count(), 1);
	assert_eq!(graph.add_node(""), Err(GraphError::EmptyId))
}

#[test]
fn literals_are_keyed_by_value_language_and_datatype() {
	let mut graph = Graph::new();
	let plain = graph.add_literal("chat");
	let again = graph.add_literal_with("chat", None, None).unwrap();
	let en = graph.add_literal_with("chat", Some("en"), None).unwrap();
	let fr = graph.add_literal_with("chat", Some("fr"), None).unwrap();
	let en_again = graph.add_literal_with("chat", Some("en"), None).unwrap();

	assert_eq!(plain, again);
	assert_eq!(en, en_again);
	assert_ne!(plain, en);
	assert_ne!(en, fr);
	assert_eq!(graph.literal_count(), 3);
	assert_eq!(graph.node(en).unwrap().id(), "chat@en");
	assert_eq!(
		graph.add_literal_with("1", None, Some("not a uri")),
		Err(GraphError::InvalidUri("not a uri".to_string()))
	)
}

#[test]
fn literals_and_nodes_do_not_collide() {
	let mut graph = Graph::new();
	let node = graph.add_node("http://example.org/a").unwrap();
	let literal = graph.add_literal("http://example.org/a");
	assert_ne!(node, literal);
	assert_eq!(graph.len(), 2);
	assert_eq!(graph.node_by_id("http://example.org/a"), Some(node));
	assert_eq!(graph.literal_by_key("http://example.org/a", None, None), Some(literal))
}

#[test]
fn insert_duplicate_node() {
	let mut graph = Graph::new();
	graph.insert_node(Node::new("http://example.org/a")).unwrap();
	assert_eq!(
		graph.insert_node(Node::new("http://example.org/a")),
		Err(GraphError::DuplicateKey("http://example.org/a".to_string()))
	)
}

#[test]
fn edges_are_never_deduplicated() {
	let mut graph = Graph::new();
	let a = graph.add_node("http://example.org/a").unwrap();
	let b = graph.add_node("http://example.org/b").unwrap();
	let e1 = graph.connect(a, P, b, None).unwrap();
	let e2 = graph.connect(a, P, b, None).unwrap();
	assert_ne!(e1, e2);
	assert_eq!(graph.edges_by_id(P), &[e1, e2]);
	assert_eq!(graph.node(a).unwrap().child_edges().len(), 2);
	assert_eq!(graph.edge_at(e2.index()).unwrap().id(), P);
	assert!(graph.edges_by_id(Q).is_empty())
}

#[test]
fn invalid_predicates() {
	let mut graph = Graph::new();
	assert_eq!(graph.add_edge("", None), Err(GraphError::EmptyId));
	assert_eq!(
		graph.add_edge("p", None),
		Err(GraphError::InvalidUri("p".to_string()))
	);
	assert_eq!(graph.edge_count(), 0)
}

#[test]
fn attach_and_detach_are_symmetric() {
	let mut graph = Graph::new();
	let a = graph.add_node("http://example.org/a").unwrap();
	let b = graph.add_node("http://example.org/b").unwrap();
	let c = graph.add_node("http://example.org/c").unwrap();
	let edge = graph.add_edge(P, None).unwrap();

	graph.attach_parent(edge, a).unwrap();
	graph.attach_child(edge, b).unwrap();
	assert_eq!(graph.edge(edge).unwrap().child(), Some(b));
	assert!(graph.node(b).unwrap().parent_edges().contains(&edge));
	assert!(graph.node(a).unwrap().child_edges().contains(&edge));
	assert!(graph.edge(edge).unwrap().is_attached());

	graph.attach_child(edge, c).unwrap();
	assert!(!graph.node(b).unwrap().parent_edges().contains(&edge));
	assert!(graph.node(c).unwrap().parent_edges().contains(&edge));

	assert_eq!(graph.detach_child(edge).unwrap(), Some(c));
	assert_eq!(graph.edge(edge).unwrap().child(), None);
	assert!(!graph.node(c).unwrap().parent_edges().contains(&edge));

	assert_eq!(graph.detach_parent(edge).unwrap(), Some(a));
	assert!(graph.node(a).unwrap().child_edges().is_empty())
}

#[test]
fn container_conversion_preserves_edges() {
	let mut graph = Graph::new();
	let n = graph.add_node("http://example.org/n").unwrap();
	let x = graph.add_node("http://example.org/x").unwrap();
	let y = graph.add_literal("y");
	let owner = graph.add_node("http://example.org/owner").unwrap();
	let c1 = graph.connect(n, P, x, None).unwrap();
	let c2 = graph.connect(n, Q, y, None).unwrap();
	let p1 = graph.connect(owner, P, n, None).unwrap();

	let bag = graph.convert_to_container(n, ContainerKind::Bag).unwrap();
	assert_eq!(bag, n);

	let node = graph.node(bag).unwrap();
	assert_eq!(node.id(), "http://example.org/n");
	assert_eq!(node.container_kind(), Some(ContainerKind::Bag));
	assert_eq!(node.child_edges().len(), 3);
	assert!(node.child_edges().contains(&c1));
	assert!(node.child_edges().contains(&c2));
	assert_eq!(node.parent_edges(), &[p1]);

	let type_edge = match node.kind() {
		NodeKind::Container { type_edge, .. } => *type_edge,
		kind => panic!("unexpected kind {kind:?}"),
	};
	let bag_type = graph.node_by_id(vocab::RDF_BAG).unwrap();
	assert_eq!(graph.edge(type_edge).unwrap().child(), Some(bag_type));

	let by_id = graph.node_by_id("http://example.org/n").unwrap();
	assert!(graph.node(by_id).unwrap().container_kind().is_some());
	assert_eq!(
		graph.convert_to_container(y, ContainerKind::Seq),
		Err(GraphError::LiteralConversion("y".to_string()))
	)
}

#[test]
fn container_type_edge_is_reused() {
	let mut graph = Graph::new();
	let n = graph.add_node("http://example.org/n").unwrap();
	let seq = graph.add_node(vocab::RDF_SEQ).unwrap();
	let typed = graph.connect(n, vocab::RDF_TYPE, seq, None).unwrap();

	graph.ensure_container("http://example.org/n", ContainerKind::Seq).unwrap();
	assert_eq!(graph.edges_by_id(vocab::RDF_TYPE), &[typed]);
	assert!(graph.node(n).unwrap().is_intrinsic(typed))
}

#[test]
fn statements() {
	let mut graph = Graph::new();
	let s = graph.add_node("http://example.org/s").unwrap();
	let p = graph.add_node(P).unwrap();
	let o = graph.add_literal("o");
	let before = graph.edge_count();

	let st = graph.ensure_statement("http://example.org/st").unwrap();
	assert_eq!(graph.edge_count(), before + 4);

	let edges = *graph.node(st).unwrap().statement_edges().unwrap();
	assert_eq!(graph.edge(edges.subject).unwrap().child(), None);

	graph.set_statement(st, s, p, o).unwrap();
	assert_eq!(graph.edge(edges.subject).unwrap().child(), Some(s));
	assert_eq!(graph.edge(edges.predicate).unwrap().child(), Some(p));
	assert_eq!(graph.edge(edges.object).unwrap().child(), Some(o));
	assert_eq!(graph.edge(edges.object).unwrap().parent(), Some(st));
	assert!(graph.has_edge(st, vocab::RDF_TYPE, graph.node_by_id(vocab::RDF_STATEMENT).unwrap()))
}

#[test]
fn merge_copies_nodes_and_edges() {
	let mut src = Graph::new();
	src.set_namespace("ex", "http://example.org/");
	src.set_base("http://src.org/doc#top");
	let a = src.add_node("http://example.org/a").unwrap();
	let v = src.add_literal_with("v", Some("en"), None).unwrap();
	src.connect(a, P, v, None).unwrap();
	src.ensure_container("http://example.org/bag", ContainerKind::Bag)
		.unwrap();

	let mut dst = Graph::new();
	dst.set_base("http://dst.org/");
	let da = dst.add_node("http://example.org/a").unwrap();
	let dv = dst.add_literal_with("v", Some("en"), None).unwrap();
	dst.connect(da, P, dv, None).unwrap();

	dst.merge(&src, true).unwrap();
	assert_eq!(dst.edges_by_id(P).len(), 1);
	assert_eq!(dst.base(), Some("http://dst.org/"));
	assert_eq!(dst.namespace("ex"), Some("http://example.org/"));

	let bag = dst.node_by_id("http://example.org/bag").unwrap();
	assert_eq!(dst.node(bag).unwrap().container_kind(), Some(ContainerKind::Bag));
	assert_eq!(dst.edges_by_id(vocab::RDF_TYPE).len(), 1);

	dst.merge(&src, false).unwrap();
	assert_eq!(dst.edges_by_id(P).len(), 2);
	assert_eq!(dst.edges_by_id(vocab::RDF_TYPE).len(), 1)
}

#[test]
fn ntriples_serialization() {
	let mut graph = Graph::new();
	let s = graph.add_node("http://example.org/s").unwrap();
	let b = graph.add_node("blankID:b0").unwrap();
	let l = graph
		.add_literal_with("caf\u{e9} \"x\"\n\u{1F600}", Some("fr"), None)
		.unwrap();
	let t = graph
		.add_literal_with("1", None, Some("http://www.w3.org/2001/XMLSchema#integer"))
		.unwrap();

	let e1 = graph.connect(s, P, b, None).unwrap();
	graph.connect(b, P, l, None).unwrap();
	graph.connect(b, Q, t, None).unwrap();

	assert_eq!(graph.node_to_ntriple(b).unwrap(), "_:b0");
	assert_eq!(
		graph.edge_to_ntriple(e1).unwrap(),
		"<http://example.org/s> <http://example.org/p> _:b0 ."
	);
	assert_eq!(
		graph.to_ntriples(),
		"<http://example.org/s> <http://example.org/p> _:b0 .\n\
		 _:b0 <http://example.org/p> \"caf\\u00E9 \\\"x\\\"\\n\\U0001F600\"@fr .\n\
		 _:b0 <http://example.org/q> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n"
	)
}

#[test]
fn count_is_nodes_plus_literals() {
	let mut graph = Graph::new();
	assert!(graph.is_empty());
	graph.add_node("http://example.org/a").unwrap();
	graph.add_literal("a");
	graph.add_literal_with("a", Some("en"), None).unwrap();
	assert_eq!(graph.len(), 3);
	assert_eq!(graph.nodes().count(), 1);
	assert_eq!(graph.literals().count(), 2)
}
