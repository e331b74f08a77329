pub mod analysis;
pub mod edge_list;
pub mod error;
pub mod export;
pub mod graph;
pub mod layout;
pub mod matrix;
pub mod report;

pub use error::GraphError;
pub use graph::{Edge, EdgeId, Graph, Node, NodeId, Weight};
pub use report::StatsReport;

/// The two textual encodings a graph can be typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    EdgeList,
    Matrix,
}

/// Edge-list text never fails to parse; matrix text fails on ragged rows or
/// bad tokens.
pub fn parse(input: &str, format: TextFormat, directed: bool) -> Result<Graph, GraphError> {
    match format {
        TextFormat::EdgeList => Ok(edge_list::parse_edge_list(input, directed)),
        TextFormat::Matrix => matrix::parse_matrix(input, directed),
    }
}

pub fn serialize(graph: &Graph, format: TextFormat) -> String {
    match format {
        TextFormat::EdgeList => edge_list::serialize_edge_list(graph),
        TextFormat::Matrix => matrix::serialize_matrix(graph),
    }
}

pub fn analyze(input: &str, format: TextFormat, directed: bool) -> Result<StatsReport, GraphError> {
    let graph = parse(input, format, directed)?;
    Ok(StatsReport::compute(&graph))
}
