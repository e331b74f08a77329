use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::analysis;
use crate::graph::Graph;

/// Everything the editor's stats panel shows for one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub average_degree: f64,
    pub max_degree: usize,
    pub component_count: usize,
    pub is_connected: bool,
    pub has_cycle: bool,
    pub is_tree: bool,
    pub is_bipartite: bool,
    pub diameter: Option<usize>,
    pub radius: Option<usize>,
    pub is_eulerian: bool,
    pub is_hamiltonian: bool,
}

impl StatsReport {
    pub fn compute(graph: &Graph) -> Self {
        let paths = analysis::all_pairs_shortest_paths(graph);
        let component_count = analysis::component_count(graph);
        let has_cycle = analysis::has_cycle(graph);
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density: analysis::density(graph),
            average_degree: analysis::average_degree(graph),
            max_degree: analysis::max_degree(graph),
            component_count,
            is_connected: component_count <= 1,
            has_cycle,
            is_tree: analysis::is_tree(graph),
            is_bipartite: analysis::is_bipartite(graph),
            diameter: paths.diameter(),
            radius: paths.radius(),
            is_eulerian: analysis::is_eulerian(graph),
            is_hamiltonian: analysis::is_hamiltonian(graph),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn yes_no(value: bool) -> String {
    String::from(if value { "yes" } else { "no" })
}

fn distance(value: Option<usize>) -> String {
    value.map_or_else(|| "∞".to_string(), |d| d.to_string())
}

fn rows(report: &StatsReport) -> Vec<(&'static str, String)> {
    vec![
        ("nodes", report.node_count.to_string()),
        ("edges", report.edge_count.to_string()),
        ("density", format!("{:.3}", report.density)),
        ("average degree", format!("{:.2}", report.average_degree)),
        ("max degree", report.max_degree.to_string()),
        ("components", report.component_count.to_string()),
        ("connected", yes_no(report.is_connected)),
        ("cycle", yes_no(report.has_cycle)),
        ("tree", yes_no(report.is_tree)),
        ("bipartite", yes_no(report.is_bipartite)),
        ("diameter", distance(report.diameter)),
        ("radius", distance(report.radius)),
        ("eulerian", yes_no(report.is_eulerian)),
        ("hamiltonian (dirac)", yes_no(report.is_hamiltonian)),
    ]
}

/// Two-column box table, one property per row.
pub fn render(report: &StatsReport) -> String {
    let rows = rows(report);
    let key_width = rows.iter().map(|(k, _)| display_width(k)).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| display_width(v)).max().unwrap_or(0);

    let rule = |left: char, mid: char, right: char| {
        format!(
            "{left}{}{mid}{}{right}",
            "─".repeat(key_width + 2),
            "─".repeat(value_width + 2)
        )
    };

    let mut lines = vec![rule('┌', '┬', '┐')];
    for (key, value) in &rows {
        lines.push(format!(
            "│ {key}{} │ {value}{} │",
            " ".repeat(key_width - display_width(key)),
            " ".repeat(value_width - display_width(value)),
        ));
    }
    lines.push(rule('└', '┴', '┘'));
    lines.join("\n")
}
