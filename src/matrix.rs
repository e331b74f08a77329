use std::collections::HashMap;

use log::{debug, warn};
use winnow::prelude::*;
use winnow::ascii::{space0, space1};
use winnow::combinator::{eof, separated, terminated};
use winnow::token::take_while;

use crate::error::GraphError;
use crate::graph::{self, Graph, NodeId, Weight};
use crate::layout::{self, Canvas};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Unweighted,
    Weighted(Weight),
}

impl Cell {
    fn weight(self) -> Option<Option<Weight>> {
        match self {
            Cell::Empty => None,
            Cell::Unweighted => Some(None),
            Cell::Weighted(w) => Some(Some(w)),
        }
    }
}

/// Builds a graph from an adjacency matrix whose rows and columns are node
/// ids `0..N`.
///
/// For undirected graphs each unordered pair yields at most one edge. When
/// the two mirrored cells disagree the cell above the diagonal wins.
pub fn parse_matrix(input: &str, directed: bool) -> Result<Graph, GraphError> {
    let rows = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| {
            let mut rest = line;
            matrix_row(&mut rest).map_err(|_| GraphError::MalformedMatrix {
                row: index + 1,
                reason: format!("expected `0`, `+` or a number in `{}`", line.trim()),
            })
        })
        .collect::<Result<Vec<Vec<Cell>>, GraphError>>()?;

    let size = rows.len();
    for (index, row) in rows.iter().enumerate() {
        if row.len() != size {
            return Err(GraphError::MalformedMatrix {
                row: index + 1,
                reason: format!("expected {size} columns, found {}", row.len()),
            });
        }
    }
    let size_id = NodeId::try_from(size).map_err(|_| GraphError::MalformedMatrix {
        row: size,
        reason: "too many rows".to_string(),
    })?;

    let mut graph = Graph::new(directed);
    for id in 0..size_id {
        graph.add_node(Some(id))?;
    }

    for (i, row) in rows.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            let Some(weight) = cell.weight() else {
                continue;
            };
            if !directed && j < i {
                let mirror = rows[j][i];
                if mirror != Cell::Empty {
                    if mirror != cell {
                        warn!("matrix cells ({j},{i}) and ({i},{j}) disagree; keeping ({j},{i})");
                    }
                    continue;
                }
            }
            let (from, to) = if !directed && j < i { (j, i) } else { (i, j) };
            graph.add_edge(from as NodeId, to as NodeId, weight)?;
        }
    }

    layout::circle(&mut graph, Canvas::default());
    debug!(
        "parsed {size}x{size} matrix: {} edges",
        graph.edge_count()
    );
    Ok(graph)
}

/// Emits an `N×N` grid over the nodes in ascending id order.
///
/// Nodes are numbered by rank, so a graph with sparse ids comes back with ids
/// `0..N`. A weight of zero reads back as no edge.
pub fn serialize_matrix(graph: &Graph) -> String {
    let ids = graph.node_ids_sorted();
    let index: HashMap<NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let mut cells = vec![vec![Cell::Empty; ids.len()]; ids.len()];

    for edge in graph.edges() {
        let (Some(&i), Some(&j)) = (index.get(&edge.from), index.get(&edge.to)) else {
            continue;
        };
        let cell = match edge.weight {
            Some(w) => Cell::Weighted(w),
            None => Cell::Unweighted,
        };
        cells[i][j] = cell;
        if !graph.is_directed() {
            cells[j][i] = cell;
        }
    }

    cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => "0".to_string(),
                    Cell::Unweighted => "+".to_string(),
                    Cell::Weighted(w) => w.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn matrix_row(input: &mut &str) -> winnow::Result<Vec<Cell>> {
    space0.parse_next(input)?;
    let cells: Vec<Cell> = separated(1.., cell, space1).parse_next(input)?;
    terminated(space0, eof).parse_next(input)?;
    Ok(cells)
}

fn cell(input: &mut &str) -> winnow::Result<Cell> {
    take_while(1.., |c: char| !c.is_whitespace())
        .verify_map(|t: &str| match t {
            "+" => Some(Cell::Unweighted),
            // Only a token without a nonzero digit means "no edge", so `0.5`
            // is an edge of weight 0.
            _ => match graph::parse_weight(t)? {
                0 if !t.bytes().any(|b| matches!(b, b'1'..=b'9')) => Some(Cell::Empty),
                w => Some(Cell::Weighted(w)),
            },
        })
        .parse_next(input)
}
