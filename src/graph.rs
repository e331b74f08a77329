use std::fmt;

use serde::Serialize;

use crate::error::GraphError;

pub type NodeId = u32;
pub type Weight = i64;

/// Reads a weight token. A decimal fraction keeps its integer part, so `2.5`
/// is 2 and `-1.7` is -1.
pub(crate) fn parse_weight(token: &str) -> Option<Weight> {
    let (whole, fraction) = token.split_once('.').unwrap_or((token, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    whole.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// An edge refers to its endpoints by id; the graph owns the nodes.
///
/// Whether an edge is directed is a property of the graph it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Option<Weight>,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// The far endpoint as seen from `node`, ignoring direction.
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Nodes and edges in insertion order.
///
/// Parallel edges and self-loops are accepted as-is: interactive editing
/// produces them and the analysis functions define how they count.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    is_directed: bool,
    next_edge_id: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Graph {
    pub fn new(is_directed: bool) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            is_directed,
            next_edge_id: 0,
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.is_directed
    }

    pub fn set_directed(&mut self, is_directed: bool) {
        self.is_directed = is_directed;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node_ids_sorted(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.iter().map(|n| n.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Adds a node at the origin. Without an id, the node gets one more than
    /// the largest id present (0 for an empty graph).
    pub fn add_node(&mut self, id: Option<NodeId>) -> Result<Node, GraphError> {
        self.add_node_at(id, 0.0, 0.0)
    }

    pub fn add_node_at(&mut self, id: Option<NodeId>, x: f64, y: f64) -> Result<Node, GraphError> {
        let id = match id {
            Some(id) if self.contains_node(id) => return Err(GraphError::DuplicateId(id)),
            Some(id) => id,
            None => match self.nodes.iter().map(|n| n.id).max() {
                Some(max) => max.checked_add(1).ok_or(GraphError::IdsExhausted(max))?,
                None => 0,
            },
        };
        let node = Node { id, x, y };
        self.nodes.push(node);
        Ok(node)
    }

    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(GraphError::UnknownNode(id))?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    /// Removes the node and every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(GraphError::UnknownNode(id))?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| !e.touches(id));
        Ok(node)
    }

    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Option<Weight>,
    ) -> Result<Edge, GraphError> {
        for endpoint in [from, to] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }
        let edge = Edge {
            id: EdgeId(self.next_edge_id),
            from,
            to,
            weight,
        };
        self.next_edge_id += 1;
        self.edges.push(edge);
        Ok(edge)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(GraphError::UnknownEdge(id))?;
        Ok(self.edges.remove(index))
    }

    /// Edges joining `from` to `to`; either orientation matches when the
    /// graph is undirected.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = &Edge> {
        let is_directed = self.is_directed;
        self.edges.iter().filter(move |e| {
            (e.from == from && e.to == to) || (!is_directed && e.from == to && e.to == from)
        })
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_edge_id = 0;
    }
}
