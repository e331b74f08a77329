//! Structural properties of a [`Graph`] snapshot.
//!
//! Every function here rebuilds the adjacency it needs from the edge list and
//! leaves the graph untouched. Traversals keep their own stack or queue so
//! deep graphs cannot overflow the call stack.
//!
//! Conventions for the degenerate cases:
//! - the empty graph has 0 components, is connected, bipartite, Eulerian and
//!   acyclic, is not a tree, and has no diameter or radius;
//! - a self-loop adds 2 to its node's degree, is a cycle, breaks
//!   bipartiteness and never shortens a path;
//! - two parallel edges of an undirected graph form a cycle.

use std::collections::{HashMap, VecDeque};

use crate::error::GraphError;
use crate::graph::{Graph, NodeId};

/// Neighbour lists indexed by node position in `Graph::nodes`. Each entry is
/// `(neighbour position, edge position)`.
struct Adjacency {
    undirected: Vec<Vec<(usize, usize)>>,
    outgoing: Vec<Vec<(usize, usize)>>,
}

impl Adjacency {
    fn build(graph: &Graph) -> Self {
        let index: HashMap<NodeId, usize> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
        let n = graph.node_count();
        let mut undirected = vec![Vec::new(); n];
        let mut outgoing = vec![Vec::new(); n];

        for (k, edge) in graph.edges().iter().enumerate() {
            let (Some(&u), Some(&v)) = (index.get(&edge.from), index.get(&edge.to)) else {
                continue;
            };
            outgoing[u].push((v, k));
            undirected[u].push((v, k));
            if u != v {
                undirected[v].push((u, k));
            }
        }

        Self {
            undirected,
            outgoing,
        }
    }

    /// The neighbour lists matching how the graph reads its edges.
    fn as_interpreted(&self, graph: &Graph) -> &[Vec<(usize, usize)>] {
        if graph.is_directed() {
            &self.outgoing
        } else {
            &self.undirected
        }
    }
}

pub fn degree(graph: &Graph, id: NodeId) -> Result<usize, GraphError> {
    if !graph.contains_node(id) {
        return Err(GraphError::UnknownNode(id));
    }
    Ok(graph
        .edges()
        .iter()
        .map(|e| usize::from(e.from == id) + usize::from(e.to == id))
        .sum())
}

/// Edges ending at `id`. Equal to [`degree`] for undirected graphs.
pub fn in_degree(graph: &Graph, id: NodeId) -> Result<usize, GraphError> {
    if !graph.is_directed() {
        return degree(graph, id);
    }
    if !graph.contains_node(id) {
        return Err(GraphError::UnknownNode(id));
    }
    Ok(graph.edges().iter().filter(|e| e.to == id).count())
}

/// Edges starting at `id`. Equal to [`degree`] for undirected graphs.
pub fn out_degree(graph: &Graph, id: NodeId) -> Result<usize, GraphError> {
    if !graph.is_directed() {
        return degree(graph, id);
    }
    if !graph.contains_node(id) {
        return Err(GraphError::UnknownNode(id));
    }
    Ok(graph.edges().iter().filter(|e| e.from == id).count())
}

/// Degrees in node order.
fn degrees(graph: &Graph) -> Vec<usize> {
    let index: HashMap<NodeId, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id, i))
        .collect();
    let mut degrees = vec![0; graph.node_count()];
    for edge in graph.edges() {
        for endpoint in [edge.from, edge.to] {
            if let Some(&i) = index.get(&endpoint) {
                degrees[i] += 1;
            }
        }
    }
    degrees
}

pub fn max_degree(graph: &Graph) -> usize {
    degrees(graph).into_iter().max().unwrap_or(0)
}

pub fn average_degree(graph: &Graph) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }
    degrees(graph).iter().sum::<usize>() as f64 / graph.node_count() as f64
}

/// Edge count over the number of possible edges between distinct nodes.
pub fn density(graph: &Graph) -> f64 {
    let n = graph.node_count() as f64;
    if graph.node_count() <= 1 {
        return 0.0;
    }
    let possible = if graph.is_directed() {
        n * (n - 1.0)
    } else {
        n * (n - 1.0) / 2.0
    };
    graph.edge_count() as f64 / possible
}

/// Components with edge direction ignored.
pub fn component_count(graph: &Graph) -> usize {
    let adjacency = Adjacency::build(graph);
    let mut visited = vec![false; graph.node_count()];
    let mut count = 0;

    for start in 0..visited.len() {
        if visited[start] {
            continue;
        }
        count += 1;
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &(neighbor, _) in &adjacency.undirected[node] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    count
}

pub fn is_connected(graph: &Graph) -> bool {
    component_count(graph) <= 1
}

pub fn has_cycle(graph: &Graph) -> bool {
    let adjacency = Adjacency::build(graph);
    if graph.is_directed() {
        directed_cycle(&adjacency.outgoing)
    } else {
        undirected_cycle(&adjacency.undirected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// A gray neighbour is on the current path, so reaching it closes a cycle.
fn directed_cycle(outgoing: &[Vec<(usize, usize)>]) -> bool {
    let mut marks = vec![Mark::White; outgoing.len()];

    for start in 0..outgoing.len() {
        if marks[start] != Mark::White {
            continue;
        }
        marks[start] = Mark::Gray;
        let mut stack = vec![(start, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            match outgoing[node].get(cursor) {
                Some(&(neighbor, _)) => {
                    frame.1 += 1;
                    match marks[neighbor] {
                        Mark::Gray => return true,
                        Mark::White => {
                            marks[neighbor] = Mark::Gray;
                            stack.push((neighbor, 0));
                        }
                        Mark::Black => {}
                    }
                }
                None => {
                    marks[node] = Mark::Black;
                    stack.pop();
                }
            }
        }
    }

    false
}

/// Any visited neighbour reached over an edge other than the one we came in
/// on closes a cycle. Excluding the edge rather than the parent node is what
/// makes parallel edges count.
fn undirected_cycle(lists: &[Vec<(usize, usize)>]) -> bool {
    let mut visited = vec![false; lists.len()];

    for start in 0..lists.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(start, None, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, entered_by, cursor) = *frame;
            match lists[node].get(cursor) {
                Some(&(neighbor, edge)) => {
                    frame.2 += 1;
                    if entered_by == Some(edge) {
                        continue;
                    }
                    if visited[neighbor] {
                        return true;
                    }
                    visited[neighbor] = true;
                    stack.push((neighbor, Some(edge), 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    false
}

/// Connected, acyclic, and exactly one edge fewer than nodes.
pub fn is_tree(graph: &Graph) -> bool {
    graph.node_count().checked_sub(1) == Some(graph.edge_count())
        && is_connected(graph)
        && !has_cycle(graph)
}

/// Two-colouring of every component, edge direction ignored.
pub fn is_bipartite(graph: &Graph) -> bool {
    let adjacency = Adjacency::build(graph);
    let mut color: Vec<Option<bool>> = vec![None; graph.node_count()];

    for start in 0..color.len() {
        if color[start].is_some() {
            continue;
        }
        color[start] = Some(false);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let side = color[node] == Some(true);
            for &(neighbor, _) in &adjacency.undirected[node] {
                match color[neighbor] {
                    None => {
                        color[neighbor] = Some(!side);
                        queue.push_back(neighbor);
                    }
                    Some(other) if other == side => return false,
                    Some(_) => {}
                }
            }
        }
    }

    true
}

/// Hop counts between every ordered pair of nodes, in node order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    ids: Vec<NodeId>,
    distances: Vec<Vec<Option<usize>>>,
}

impl DistanceMatrix {
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn rows(&self) -> &[Vec<Option<usize>>] {
        &self.distances
    }

    /// `None` when `to` cannot be reached from `from` or either id is absent.
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<usize> {
        let i = self.ids.iter().position(|&id| id == from)?;
        let j = self.ids.iter().position(|&id| id == to)?;
        self.distances[i][j]
    }

    pub fn is_fully_reachable(&self) -> bool {
        self.distances.iter().flatten().all(Option::is_some)
    }

    /// Farthest reachable node from `id`.
    pub fn eccentricity(&self, id: NodeId) -> Result<usize, GraphError> {
        let i = self
            .ids
            .iter()
            .position(|&n| n == id)
            .ok_or(GraphError::UnknownNode(id))?;
        Ok(self.distances[i].iter().flatten().copied().max().unwrap_or(0))
    }

    fn eccentricities(&self) -> Option<Vec<usize>> {
        if self.ids.is_empty() || !self.is_fully_reachable() {
            return None;
        }
        Some(
            self.distances
                .iter()
                .map(|row| row.iter().flatten().copied().max().unwrap_or(0))
                .collect(),
        )
    }

    pub fn diameter(&self) -> Option<usize> {
        self.eccentricities()?.into_iter().max()
    }

    pub fn radius(&self) -> Option<usize> {
        self.eccentricities()?.into_iter().min()
    }
}

/// Floyd–Warshall over unit edge lengths; weights play no part. Edges are
/// followed only forwards when the graph is directed.
pub fn all_pairs_shortest_paths(graph: &Graph) -> DistanceMatrix {
    let adjacency = Adjacency::build(graph);
    let n = graph.node_count();
    let mut distances: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];

    for (u, row) in distances.iter_mut().enumerate() {
        row[u] = Some(0);
        for &(v, _) in &adjacency.as_interpreted(graph)[u] {
            if u != v {
                row[v] = Some(1);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(via) = distances[i][k] else {
                continue;
            };
            for j in 0..n {
                let Some(rest) = distances[k][j] else {
                    continue;
                };
                let candidate = via + rest;
                if distances[i][j].is_none_or(|d| candidate < d) {
                    distances[i][j] = Some(candidate);
                }
            }
        }
    }

    DistanceMatrix {
        ids: graph.nodes().iter().map(|n| n.id).collect(),
        distances,
    }
}

/// `None` for the empty graph or when some node cannot reach another.
pub fn diameter(graph: &Graph) -> Option<usize> {
    all_pairs_shortest_paths(graph).diameter()
}

pub fn radius(graph: &Graph) -> Option<usize> {
    all_pairs_shortest_paths(graph).radius()
}

pub fn eccentricity(graph: &Graph, id: NodeId) -> Result<usize, GraphError> {
    all_pairs_shortest_paths(graph).eccentricity(id)
}

/// Undirected: connected with every degree even. Directed: weakly connected
/// with in-degree equal to out-degree at every node.
pub fn is_eulerian(graph: &Graph) -> bool {
    if !is_connected(graph) {
        return false;
    }
    if graph.is_directed() {
        let adjacency = Adjacency::build(graph);
        let mut incoming = vec![0usize; graph.node_count()];
        for list in &adjacency.outgoing {
            for &(v, _) in list {
                incoming[v] += 1;
            }
        }
        adjacency
            .outgoing
            .iter()
            .zip(&incoming)
            .all(|(out, &inc)| out.len() == inc)
    } else {
        degrees(graph).iter().all(|d| d % 2 == 0)
    }
}

/// Dirac's condition: at least 3 nodes, each of degree at least n/2.
///
/// Sufficient but not necessary, so `false` only means the condition failed,
/// not that no Hamiltonian cycle exists.
pub fn is_hamiltonian(graph: &Graph) -> bool {
    let n = graph.node_count();
    n >= 3 && degrees(graph).iter().all(|&d| 2 * d >= n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(directed: bool, nodes: &[NodeId], edges: &[(NodeId, NodeId)]) -> Graph {
        let mut graph = Graph::new(directed);
        for &id in nodes {
            graph.add_node(Some(id)).unwrap();
        }
        for &(from, to) in edges {
            graph.add_edge(from, to, None).unwrap();
        }
        graph
    }

    #[test]
    fn degree_counts_self_loop_twice() {
        let graph = build(false, &[0, 1], &[(0, 1), (1, 1)]);
        assert_eq!(degree(&graph, 0), Ok(1));
        assert_eq!(degree(&graph, 1), Ok(3));
        assert_eq!(degree(&graph, 9), Err(GraphError::UnknownNode(9)));
    }

    #[test]
    fn in_and_out_degree() {
        let graph = build(true, &[0, 1, 2], &[(0, 1), (0, 2), (2, 0)]);
        assert_eq!(out_degree(&graph, 0), Ok(2));
        assert_eq!(in_degree(&graph, 0), Ok(1));
        assert_eq!(degree(&graph, 0), Ok(3));

        let undirected = build(false, &[0, 1], &[(0, 1)]);
        assert_eq!(in_degree(&undirected, 1), Ok(1));
        assert_eq!(out_degree(&undirected, 1), Ok(1));
    }

    #[test]
    fn degree_statistics() {
        let graph = build(false, &[0, 1, 2, 3], &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(max_degree(&graph), 3);
        assert_eq!(average_degree(&graph), 1.5);
        assert_eq!(density(&graph), 0.5);

        let directed = build(true, &[0, 1], &[(0, 1)]);
        assert_eq!(density(&directed), 0.5);
    }

    #[test]
    fn degree_statistics_on_tiny_graphs() {
        let empty = Graph::undirected();
        assert_eq!(max_degree(&empty), 0);
        assert_eq!(average_degree(&empty), 0.0);
        assert_eq!(density(&empty), 0.0);
        assert_eq!(density(&build(false, &[4], &[])), 0.0);
    }

    #[test]
    fn components_ignore_direction() {
        let graph = build(true, &[0, 1, 2, 3, 4], &[(1, 0), (2, 1), (4, 3)]);
        assert_eq!(component_count(&graph), 2);
        assert!(!is_connected(&graph));
    }

    #[test]
    fn empty_graph_conventions() {
        let graph = Graph::undirected();
        assert_eq!(component_count(&graph), 0);
        assert!(is_connected(&graph));
        assert!(!has_cycle(&graph));
        assert!(!is_tree(&graph));
        assert!(is_bipartite(&graph));
        assert!(is_eulerian(&graph));
        assert!(!is_hamiltonian(&graph));
        assert_eq!(diameter(&graph), None);
        assert_eq!(radius(&graph), None);
    }

    #[test]
    fn single_node() {
        let graph = build(false, &[3], &[]);
        assert!(is_connected(&graph));
        assert!(is_tree(&graph));
        assert_eq!(diameter(&graph), Some(0));
        assert_eq!(eccentricity(&graph, 3), Ok(0));
    }

    #[test]
    fn undirected_triangle_has_cycle() {
        let graph = build(false, &[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        assert!(has_cycle(&graph));
    }

    #[test]
    fn undirected_path_has_no_cycle() {
        let graph = build(false, &[0, 1, 2, 3], &[(0, 1), (2, 1), (3, 2)]);
        assert!(!has_cycle(&graph));
        assert!(is_tree(&graph));
    }

    #[test]
    fn undirected_parallel_edges_form_cycle() {
        let graph = build(false, &[0, 1], &[(0, 1), (1, 0)]);
        assert!(has_cycle(&graph));
        assert!(!is_tree(&graph));
    }

    #[test]
    fn self_loop_is_cycle() {
        assert!(has_cycle(&build(false, &[0], &[(0, 0)])));
        assert!(has_cycle(&build(true, &[0], &[(0, 0)])));
    }

    #[test]
    fn directed_cycle_needs_back_edge() {
        let dag = build(true, &[0, 1, 2], &[(0, 1), (0, 2), (1, 2)]);
        assert!(!has_cycle(&dag));

        let cyclic = build(true, &[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        assert!(has_cycle(&cyclic));

        let two_way = build(true, &[0, 1], &[(0, 1), (1, 0)]);
        assert!(has_cycle(&two_way));
    }

    #[test]
    fn directed_tree_shape() {
        let graph = build(true, &[0, 1, 2], &[(0, 1), (0, 2)]);
        assert!(is_tree(&graph));
    }

    #[test]
    fn bipartite_checks() {
        let square = build(false, &[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(is_bipartite(&square));

        let triangle = build(false, &[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        assert!(!is_bipartite(&triangle));

        let split = build(false, &[0, 1, 2, 3, 4], &[(0, 1), (2, 3), (3, 4), (4, 2)]);
        assert!(!is_bipartite(&split));

        assert!(!is_bipartite(&build(false, &[0], &[(0, 0)])));
    }

    #[test]
    fn shortest_paths_unit_length() {
        let mut graph = build(false, &[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3)]);
        graph.add_edge(0, 3, Some(100)).unwrap();
        let paths = all_pairs_shortest_paths(&graph);
        assert_eq!(paths.distance(0, 3), Some(1));
        assert_eq!(paths.distance(0, 2), Some(2));
        assert_eq!(paths.distance(1, 3), Some(2));
        assert_eq!(paths.diameter(), Some(2));
        assert_eq!(paths.radius(), Some(2));
    }

    #[test]
    fn shortest_paths_follow_direction() {
        let graph = build(true, &[0, 1, 2], &[(0, 1), (1, 2)]);
        let paths = all_pairs_shortest_paths(&graph);
        assert_eq!(paths.distance(0, 2), Some(2));
        assert_eq!(paths.distance(2, 0), None);
        assert!(!paths.is_fully_reachable());
        assert_eq!(diameter(&graph), None);
        assert_eq!(eccentricity(&graph, 0), Ok(2));
        assert_eq!(eccentricity(&graph, 2), Ok(0));
    }

    #[test]
    fn star_radius_and_diameter() {
        let graph = build(false, &[0, 1, 2, 3], &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(diameter(&graph), Some(2));
        assert_eq!(radius(&graph), Some(1));
        assert_eq!(eccentricity(&graph, 0), Ok(1));
        assert_eq!(eccentricity(&graph, 1), Ok(2));
    }

    #[test]
    fn disconnected_has_no_diameter_but_has_eccentricity() {
        let graph = build(false, &[0, 1, 2], &[(0, 1)]);
        assert_eq!(diameter(&graph), None);
        assert_eq!(radius(&graph), None);
        assert_eq!(eccentricity(&graph, 0), Ok(1));
        assert_eq!(eccentricity(&graph, 2), Ok(0));
        assert_eq!(eccentricity(&graph, 7), Err(GraphError::UnknownNode(7)));
    }

    #[test]
    fn eulerian_undirected() {
        let triangle = build(false, &[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        assert!(is_eulerian(&triangle));
        let path = build(false, &[0, 1, 2], &[(0, 1), (1, 2)]);
        assert!(!is_eulerian(&path));
        let split = build(false, &[0, 1, 2, 3], &[(0, 1), (1, 0), (2, 3), (3, 2)]);
        assert!(!is_eulerian(&split));
    }

    #[test]
    fn eulerian_directed_uses_in_and_out_degree() {
        let cycle = build(true, &[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        assert!(is_eulerian(&cycle));
        // Even total degree everywhere, but 0 has two outgoing and no incoming.
        let unbalanced = build(true, &[0, 1, 2], &[(0, 1), (1, 2), (0, 2)]);
        assert!(!is_eulerian(&unbalanced));
    }

    #[test]
    fn hamiltonian_dirac_condition() {
        let triangle = build(false, &[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        assert!(is_hamiltonian(&triangle));
        let path = build(false, &[0, 1, 2], &[(0, 1), (1, 2)]);
        assert!(!is_hamiltonian(&path));
        let pair = build(false, &[0, 1], &[(0, 1)]);
        assert!(!is_hamiltonian(&pair));
    }

    #[test]
    fn analysis_does_not_mutate() {
        let graph = build(false, &[0, 1, 2], &[(0, 1), (1, 2)]);
        let before = graph.clone();
        let _ = has_cycle(&graph);
        let _ = all_pairs_shortest_paths(&graph);
        let _ = is_bipartite(&graph);
        assert_eq!(graph, before);
    }
}
