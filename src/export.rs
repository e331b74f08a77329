use serde::Serialize;

use crate::graph::{Graph, Node, NodeId, Weight};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphDocument<'a> {
    nodes: &'a [Node],
    edges: Vec<EdgeDocument>,
    is_directed: bool,
}

#[derive(Serialize)]
struct EdgeDocument {
    from: NodeId,
    to: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<Weight>,
}

/// `{ "nodes": [...], "edges": [...], "isDirected": bool }`; unweighted edges
/// carry no `weight` key.
pub fn to_json(graph: &Graph) -> serde_json::Result<String> {
    let document = GraphDocument {
        nodes: graph.nodes(),
        edges: graph
            .edges()
            .iter()
            .map(|e| EdgeDocument {
                from: e.from,
                to: e.to,
                weight: e.weight,
            })
            .collect(),
        is_directed: graph.is_directed(),
    };
    serde_json::to_string_pretty(&document)
}

pub fn to_dot(graph: &Graph) -> String {
    let (header, connector) = if graph.is_directed() {
        ("digraph G {", "->")
    } else {
        ("graph G {", "--")
    };

    let mut lines = vec![header.to_string()];
    for node in graph.nodes() {
        lines.push(format!("    {} [pos=\"{},{}!\"];", node.id, node.x, node.y));
    }
    for edge in graph.edges() {
        let label = edge
            .weight
            .map(|w| format!(" [label=\"{w}\"]"))
            .unwrap_or_default();
        lines.push(format!("    {} {connector} {}{label};", edge.from, edge.to));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// One `id: n1, n2(w)` line per node. Undirected edges are listed at both
/// endpoints.
pub fn to_adjacency_list(graph: &Graph) -> String {
    let mut text = String::new();
    for node in graph.nodes() {
        let neighbors: Vec<String> = graph
            .edges()
            .iter()
            .filter(|e| e.from == node.id || (!graph.is_directed() && e.to == node.id))
            .map(|e| {
                let neighbor = if e.from == node.id { e.to } else { e.from };
                match e.weight {
                    Some(w) => format!("{neighbor}({w})"),
                    None => neighbor.to_string(),
                }
            })
            .collect();
        text.push_str(&format!("{}: {}\n", node.id, neighbors.join(", ")));
    }
    text
}
