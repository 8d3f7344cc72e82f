//! Co-occurrence Graph Builder
//! Undirected weighted graph of tokens sharing a row in a multi-value column.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::data::{split_tokens, ColumnSel, Project};

/// Undirected edge with accumulated co-occurrence weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Graph output for the relationship panels.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoOccurrence {
    /// Distinct tokens in first-appearance order.
    pub nodes: Vec<String>,
    /// One edge per unordered token pair, lexicographically keyed.
    pub edges: Vec<Edge>,
}

impl CoOccurrence {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_weight(&self) -> u32 {
        self.edges.iter().map(|e| e.weight).max().unwrap_or(1)
    }

    /// Node degree by incident edge count.
    pub fn degree(&self, node: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.source == node || e.target == node)
            .count()
    }
}

/// Build the co-occurrence graph for a multi-value column.
///
/// Every distinct token becomes a node exactly once. Every unordered pair
/// of distinct tokens within one row increments that pair's weight; the
/// pair key is ordered lexicographically so a pair can never appear as two
/// directed edges. A token alone in its row contributes a node and no edge.
pub fn build_graph(rows: &[&Project], column: ColumnSel) -> CoOccurrence {
    let mut nodes: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut weights: BTreeMap<(String, String), u32> = BTreeMap::new();

    for row in rows {
        let tokens = split_tokens(column.value(row));

        for token in &tokens {
            if seen.insert(token.clone()) {
                nodes.push(token.clone());
            }
        }

        for i in 0..tokens.len() {
            for j in (i + 1)..tokens.len() {
                if tokens[i] == tokens[j] {
                    continue;
                }
                let key = if tokens[i] < tokens[j] {
                    (tokens[i].clone(), tokens[j].clone())
                } else {
                    (tokens[j].clone(), tokens[i].clone())
                };
                *weights.entry(key).or_insert(0) += 1;
            }
        }
    }

    let edges = weights
        .into_iter()
        .map(|((source, target), weight)| Edge {
            source,
            target,
            weight,
        })
        .collect();

    CoOccurrence { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Scale, Status};

    fn project(id: &str, teams: &str) -> Project {
        Project {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            grouping: String::new(),
            scale: Scale::Low,
            status: Status::Committed,
            primary_theme: String::new(),
            secondary_themes: String::new(),
            all_themes: String::new(),
            teams: teams.to_string(),
            external: String::new(),
            start_semester: String::new(),
            end_semester: String::new(),
        }
    }

    #[test]
    fn test_pairs_within_rows() {
        let a = project("1", "A, B");
        let b = project("2", "B, C");
        let rows = vec![&a, &b];
        let graph = build_graph(&rows, ColumnSel::Teams);

        assert_eq!(graph.nodes, vec!["A", "B", "C"]);
        assert_eq!(
            graph.edges,
            vec![
                Edge { source: "A".into(), target: "B".into(), weight: 1 },
                Edge { source: "B".into(), target: "C".into(), weight: 1 },
            ]
        );
    }

    #[test]
    fn test_weight_accumulates_across_rows() {
        let a = project("1", "A, B");
        let b = project("2", "B, A");
        let rows = vec![&a, &b];
        let graph = build_graph(&rows, ColumnSel::Teams);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].weight, 2);
    }

    #[test]
    fn test_lone_token_has_node_but_no_edge() {
        let a = project("1", "Archives");
        let rows = vec![&a];
        let graph = build_graph(&rows, ColumnSel::Teams);

        assert_eq!(graph.nodes, vec!["Archives"]);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.degree("Archives"), 0);
    }

    #[test]
    fn test_no_self_edges_and_repeats_accumulate() {
        // A row listing a token twice pairs each occurrence with B, but
        // never with itself.
        let a = project("1", "A, A, B");
        let rows = vec![&a];
        let graph = build_graph(&rows, ColumnSel::Teams);

        assert_eq!(graph.nodes, vec!["A", "B"]);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].weight, 2);
    }

    #[test]
    fn test_deterministic_output() {
        let a = project("1", "Z, M, A");
        let b = project("2", "M, Z");
        let rows = vec![&a, &b];
        let first = build_graph(&rows, ColumnSel::Teams);
        let second = build_graph(&rows, ColumnSel::Teams);

        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.edges, second.edges);
        // Pair keys are canonical regardless of within-row order.
        assert_eq!(first.edges.iter().filter(|e| e.weight == 2).count(), 1);
    }
}
