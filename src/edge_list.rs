use std::collections::BTreeSet;

use log::debug;
use winnow::prelude::*;
use winnow::ascii::{space0, space1};
use winnow::combinator::{eof, opt, preceded};
use winnow::token::take_while;

use crate::graph::{self, Graph, NodeId, Weight};
use crate::layout::{self, Canvas};

/// What a single line of edge-list text declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeListLine {
    Edge {
        from: NodeId,
        to: NodeId,
        weight: Option<Weight>,
    },
    IsolatedNode(NodeId),
    Skip,
}

/// Builds a graph from edge-list text. Lines that do not describe an edge or
/// an isolated node are dropped.
pub fn parse_edge_list(input: &str, directed: bool) -> Graph {
    let lines: Vec<EdgeListLine> = input
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let parsed = classify_line(line);
            if parsed == EdgeListLine::Skip && !line.trim().is_empty() {
                debug!("skipping edge-list line {}: `{}`", index + 1, line.trim());
            }
            parsed
        })
        .collect();

    let mut node_ids: BTreeSet<NodeId> = BTreeSet::new();
    for line in &lines {
        match *line {
            EdgeListLine::Edge { from, to, .. } => {
                node_ids.insert(from);
                node_ids.insert(to);
            }
            EdgeListLine::IsolatedNode(id) => {
                node_ids.insert(id);
            }
            EdgeListLine::Skip => {}
        }
    }

    let mut graph = Graph::new(directed);
    for id in node_ids {
        let added = graph.add_node(Some(id));
        debug_assert!(added.is_ok(), "ids come out of a set");
    }
    for line in lines {
        if let EdgeListLine::Edge { from, to, weight } = line {
            let added = graph.add_edge(from, to, weight);
            debug_assert!(added.is_ok(), "both endpoints were added above");
        }
    }

    let canvas = Canvas::default();
    layout::place_on_circle(&mut graph, canvas, canvas.width.min(canvas.height) / 4.0);

    debug!(
        "parsed edge list: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

pub fn classify_line(line: &str) -> EdgeListLine {
    let mut input = line;
    edge_list_line(&mut input).unwrap_or(EdgeListLine::Skip)
}

/// One `from to[ weight]` line per edge, then one line per node without
/// incident edges.
pub fn serialize_edge_list(graph: &Graph) -> String {
    let mut lines: Vec<String> = graph
        .edges()
        .iter()
        .map(|e| match e.weight {
            Some(w) => format!("{} {} {w}", e.from, e.to),
            None => format!("{} {}", e.from, e.to),
        })
        .collect();

    for node in graph.nodes() {
        if !graph.edges().iter().any(|e| e.touches(node.id)) {
            lines.push(node.id.to_string());
        }
    }

    lines.join("\n")
}

fn edge_list_line(input: &mut &str) -> winnow::Result<EdgeListLine> {
    space0.parse_next(input)?;
    let from = node_id.parse_next(input)?;
    let to = opt(preceded(space1, node_id)).parse_next(input)?;

    let line = match to {
        None => EdgeListLine::IsolatedNode(from),
        Some(to) => {
            let weight = opt(preceded(space1, token)).parse_next(input)?;
            EdgeListLine::Edge {
                from,
                to,
                // A weight still being typed ("-", "1e") leaves the edge unweighted.
                weight: weight.and_then(graph::parse_weight),
            }
        }
    };

    space0.parse_next(input)?;
    eof.parse_next(input)?;
    Ok(line)
}

fn token<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| !c.is_whitespace()).parse_next(input)
}

fn node_id(input: &mut &str) -> winnow::Result<NodeId> {
    token
        .verify_map(|t: &str| {
            if t.bytes().all(|b| b.is_ascii_digit()) {
                t.parse::<NodeId>().ok()
            } else {
                None
            }
        })
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edges(graph: &Graph) -> Vec<(NodeId, NodeId, Option<Weight>)> {
        graph.edges().iter().map(|e| (e.from, e.to, e.weight)).collect()
    }

    fn node_ids(graph: &Graph) -> Vec<NodeId> {
        graph.nodes().iter().map(|n| n.id).collect()
    }

    #[test]
    fn classify_unweighted_edge() {
        assert_eq!(
            classify_line("0 1"),
            EdgeListLine::Edge {
                from: 0,
                to: 1,
                weight: None
            }
        );
    }

    #[test]
    fn classify_weighted_edge_with_extra_spacing() {
        assert_eq!(
            classify_line("  3\t4   -2  "),
            EdgeListLine::Edge {
                from: 3,
                to: 4,
                weight: Some(-2)
            }
        );
    }

    #[test]
    fn classify_zero_weight_is_not_unweighted() {
        assert_eq!(
            classify_line("1 2 0"),
            EdgeListLine::Edge {
                from: 1,
                to: 2,
                weight: Some(0)
            }
        );
    }

    #[test]
    fn classify_isolated_node() {
        assert_eq!(classify_line("5"), EdgeListLine::IsolatedNode(5));
        assert_eq!(classify_line("  12 "), EdgeListLine::IsolatedNode(12));
    }

    #[test]
    fn classify_unparseable_weight_keeps_edge() {
        assert_eq!(
            classify_line("0 1 -"),
            EdgeListLine::Edge {
                from: 0,
                to: 1,
                weight: None
            }
        );
    }

    #[test]
    fn classify_fractional_weight_keeps_integer_part() {
        assert_eq!(
            classify_line("0 1 2.5"),
            EdgeListLine::Edge {
                from: 0,
                to: 1,
                weight: Some(2)
            }
        );
    }

    #[test]
    fn classify_skips_malformed_lines() {
        assert_eq!(classify_line(""), EdgeListLine::Skip);
        assert_eq!(classify_line("   "), EdgeListLine::Skip);
        assert_eq!(classify_line("a b"), EdgeListLine::Skip);
        assert_eq!(classify_line("3 x"), EdgeListLine::Skip);
        assert_eq!(classify_line("-1 2"), EdgeListLine::Skip);
        assert_eq!(classify_line("+1 2"), EdgeListLine::Skip);
        assert_eq!(classify_line("1 2 3 4"), EdgeListLine::Skip);
        assert_eq!(classify_line("99999999999 1"), EdgeListLine::Skip);
    }

    #[test]
    fn parse_sorts_nodes_and_keeps_edge_order() {
        let graph = parse_edge_list("4 2\n0 4 7\n", false);
        assert_eq!(node_ids(&graph), vec![0, 2, 4]);
        assert_eq!(edges(&graph), vec![(4, 2, None), (0, 4, Some(7))]);
        assert!(!graph.is_directed());
    }

    #[test]
    fn parse_tolerates_bad_lines() {
        let graph = parse_edge_list("0 1\nhello\n1 2 x\n\n2 3 4 5\n", true);
        assert_eq!(node_ids(&graph), vec![0, 1, 2]);
        assert_eq!(edges(&graph), vec![(0, 1, None), (1, 2, None)]);
        assert!(graph.is_directed());
    }

    #[test]
    fn parse_repeated_ids_and_self_loops() {
        let graph = parse_edge_list("0 1\n1 0\n0\n0 0\n1", false);
        assert_eq!(node_ids(&graph), vec![0, 1]);
        assert_eq!(edges(&graph), vec![(0, 1, None), (1, 0, None), (0, 0, None)]);
    }

    #[test]
    fn parse_isolated_node_declaration() {
        let graph = parse_edge_list("0 1\n7", false);
        assert_eq!(node_ids(&graph), vec![0, 1, 7]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn parse_places_nodes_at_finite_positions() {
        let graph = parse_edge_list("0 1\n1 2", false);
        assert!(graph.nodes().iter().all(|n| n.x.is_finite() && n.y.is_finite()));
    }

    #[test]
    fn serialize_emits_weights_and_isolated_nodes() {
        let mut graph = Graph::undirected();
        for id in [0, 1, 2, 9] {
            graph.add_node(Some(id)).unwrap();
        }
        graph.add_edge(0, 1, Some(3)).unwrap();
        graph.add_edge(1, 2, None).unwrap();
        graph.add_edge(2, 0, Some(0)).unwrap();
        assert_eq!(serialize_edge_list(&graph), "0 1 3\n1 2\n2 0 0\n9");
    }

    #[test]
    fn serialize_empty_graph() {
        assert_eq!(serialize_edge_list(&Graph::undirected()), "");
    }

    #[test]
    fn round_trip_keeps_isolated_nodes() {
        let text = "0 2 5\n2 3\n1\n4";
        let graph = parse_edge_list(text, false);
        assert_eq!(serialize_edge_list(&graph), text);
    }
}
