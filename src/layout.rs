use std::collections::{HashMap, VecDeque};
use std::f64::consts::PI;

use crate::graph::{Graph, NodeId};

/// Drawing surface the positions are computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

const GRID_PADDING: f64 = 100.0;

pub fn circle(graph: &mut Graph, canvas: Canvas) {
    let radius = canvas.width.min(canvas.height) / 3.0;
    place_on_circle(graph, canvas, radius);
}

pub(crate) fn place_on_circle(graph: &mut Graph, canvas: Canvas, radius: f64) {
    let center_x = canvas.width / 2.0;
    let center_y = canvas.height / 2.0;
    let count = graph.node_count() as f64;
    let positions: Vec<(NodeId, f64, f64)> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let angle = 2.0 * PI * i as f64 / count;
            (
                node.id,
                center_x + radius * angle.cos(),
                center_y + radius * angle.sin(),
            )
        })
        .collect();
    apply(graph, positions);
}

pub fn grid(graph: &mut Graph, canvas: Canvas) {
    if graph.is_empty() {
        return;
    }
    let cols = (graph.node_count() as f64).sqrt().ceil() as usize;
    let cell_width = (canvas.width - 2.0 * GRID_PADDING) / cols as f64;
    let cell_height = (canvas.height - 2.0 * GRID_PADDING) / cols as f64;
    let positions: Vec<(NodeId, f64, f64)> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let row = (i / cols) as f64;
            let col = (i % cols) as f64;
            (
                node.id,
                GRID_PADDING + col * cell_width + cell_width / 2.0,
                GRID_PADDING + row * cell_height + cell_height / 2.0,
            )
        })
        .collect();
    apply(graph, positions);
}

/// Layered placement from the node with the fewest incoming edges.
///
/// Nodes the root cannot reach are left where they are.
pub fn tree(graph: &mut Graph, canvas: Canvas) {
    let Some(root) = pick_root(graph) else {
        return;
    };
    let levels = bfs_levels(graph, root);
    let max_level = levels.iter().map(|&(_, level)| level).max().unwrap_or(0);
    let level_height = canvas.height / (max_level + 2) as f64;

    let mut per_level: HashMap<usize, usize> = HashMap::new();
    for &(_, level) in &levels {
        *per_level.entry(level).or_default() += 1;
    }

    let mut seen_in_level: HashMap<usize, usize> = HashMap::new();
    let positions: Vec<(NodeId, f64, f64)> = levels
        .iter()
        .map(|&(id, level)| {
            let index = seen_in_level.entry(level).or_default();
            let level_width = canvas.width / (per_level[&level] + 1) as f64;
            let x = level_width * (*index + 1) as f64;
            *index += 1;
            (id, x, level_height * (level + 1) as f64)
        })
        .collect();
    apply(graph, positions);
}

fn pick_root(graph: &Graph) -> Option<NodeId> {
    let mut in_degree: HashMap<NodeId, usize> = graph.nodes().iter().map(|n| (n.id, 0)).collect();
    for edge in graph.edges() {
        *in_degree.entry(edge.to).or_default() += 1;
    }
    // min_by_key keeps the first minimum, so ties go to the earliest node.
    graph.nodes().iter().map(|n| n.id).min_by_key(|id| in_degree[id])
}

/// Nodes in discovery order with their distance from `root`.
fn bfs_levels(graph: &Graph, root: NodeId) -> Vec<(NodeId, usize)> {
    let is_directed = graph.is_directed();
    let mut levels = vec![(root, 0)];
    let mut visited: HashMap<NodeId, usize> = HashMap::from([(root, 0)]);
    let mut queue = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        let level = visited[&current];
        for edge in graph.edges() {
            let next = if edge.from == current {
                edge.to
            } else if !is_directed && edge.to == current {
                edge.from
            } else {
                continue;
            };
            if !visited.contains_key(&next) {
                visited.insert(next, level + 1);
                levels.push((next, level + 1));
                queue.push_back(next);
            }
        }
    }

    levels
}

fn apply(graph: &mut Graph, positions: Vec<(NodeId, f64, f64)>) {
    for (id, x, y) in positions {
        let placed = graph.set_position(id, x, y);
        debug_assert!(placed.is_ok(), "positions are computed for ids in the graph");
    }
}
