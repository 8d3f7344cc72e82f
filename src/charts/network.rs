//! Network Chart
//! Renders a co-occurrence graph with selectable node layouts.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::collections::HashMap;

use crate::analysis::CoOccurrence;

const NODE_COLOR: Color32 = Color32::from_rgb(214, 39, 40);
const EDGE_COLOR: Color32 = Color32::from_rgb(44, 160, 44);
const NODE_RADIUS: f32 = 7.0;

/// Node arrangement for the relationship panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkLayout {
    #[default]
    Circle,
    Grid,
    Concentric,
}

impl NetworkLayout {
    pub const ALL: [NetworkLayout; 3] =
        [NetworkLayout::Circle, NetworkLayout::Grid, NetworkLayout::Concentric];

    pub fn label(&self) -> &'static str {
        match self {
            NetworkLayout::Circle => "circle",
            NetworkLayout::Grid => "grid",
            NetworkLayout::Concentric => "concentric",
        }
    }
}

/// Draws co-occurrence graphs into an allocated painter region.
pub struct NetworkChart;

impl NetworkChart {
    /// Node positions for the chosen layout inside `rect`.
    pub fn layout_positions(
        graph: &CoOccurrence,
        layout: NetworkLayout,
        rect: Rect,
    ) -> HashMap<String, Pos2> {
        let n = graph.nodes.len();
        let mut positions = HashMap::with_capacity(n);
        if n == 0 {
            return positions;
        }

        let center = rect.center();
        match layout {
            NetworkLayout::Circle => {
                let radius = (rect.width().min(rect.height()) / 2.0 - 50.0).max(10.0);
                for (i, node) in graph.nodes.iter().enumerate() {
                    let angle = std::f32::consts::TAU * i as f32 / n as f32;
                    let pos = center + Vec2::new(angle.cos(), angle.sin()) * radius;
                    positions.insert(node.clone(), pos);
                }
            }
            NetworkLayout::Grid => {
                let cols = (n as f32).sqrt().ceil() as usize;
                let rows = n.div_ceil(cols);
                let cell_w = rect.width() / cols as f32;
                let cell_h = rect.height() / rows as f32;
                for (i, node) in graph.nodes.iter().enumerate() {
                    let col = i % cols;
                    let row = i / cols;
                    let pos = rect.min
                        + Vec2::new(
                            (col as f32 + 0.5) * cell_w,
                            (row as f32 + 0.5) * cell_h,
                        );
                    positions.insert(node.clone(), pos);
                }
            }
            NetworkLayout::Concentric => {
                // Highest-degree nodes occupy the inner rings.
                let mut ordered: Vec<&String> = graph.nodes.iter().collect();
                ordered.sort_by_key(|node| std::cmp::Reverse(graph.degree(node)));

                let max_radius = (rect.width().min(rect.height()) / 2.0 - 50.0).max(10.0);

                // Ring r holds 6r nodes (one in the middle); find how many
                // rings this graph needs so radii can be spread evenly.
                let mut rings = 1usize;
                while 1 + 3 * rings * (rings + 1) < n {
                    rings += 1;
                }

                let mut placed = 0usize;
                let mut ring = 0usize;
                while placed < ordered.len() {
                    let capacity = if ring == 0 { 1 } else { ring * 6 };
                    let radius = max_radius * ring as f32 / rings as f32;
                    let in_ring = capacity.min(ordered.len() - placed);
                    for k in 0..in_ring {
                        let angle = std::f32::consts::TAU * k as f32 / in_ring as f32;
                        let pos = center + Vec2::new(angle.cos(), angle.sin()) * radius;
                        positions.insert(ordered[placed + k].clone(), pos);
                    }
                    placed += in_ring;
                    ring += 1;
                }
            }
        }

        positions
    }

    /// Draw the graph: weighted edges first, then nodes with labels.
    pub fn draw(ui: &mut egui::Ui, graph: &CoOccurrence, layout: NetworkLayout, height: f32) {
        if graph.is_empty() {
            ui.label("No matching projects");
            return;
        }

        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
        let rect = response.rect;

        let positions = Self::layout_positions(graph, layout, rect);
        let max_weight = graph.max_weight() as f32;

        for edge in &graph.edges {
            let (Some(&a), Some(&b)) = (positions.get(&edge.source), positions.get(&edge.target))
            else {
                continue;
            };
            let stroke_width = 1.0 + 4.0 * edge.weight as f32 / max_weight;
            painter.line_segment([a, b], Stroke::new(stroke_width, EDGE_COLOR));
        }

        for node in &graph.nodes {
            let Some(&pos) = positions.get(node) else {
                continue;
            };
            painter.circle_filled(pos, NODE_RADIUS, NODE_COLOR);
            painter.text(
                pos + Vec2::new(0.0, NODE_RADIUS + 2.0),
                Align2::CENTER_TOP,
                node,
                FontId::proportional(11.0),
                ui.visuals().text_color(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Edge;

    fn graph(nodes: &[&str], edges: &[(&str, &str, u32)]) -> CoOccurrence {
        CoOccurrence {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            edges: edges
                .iter()
                .map(|(s, t, w)| Edge {
                    source: s.to_string(),
                    target: t.to_string(),
                    weight: *w,
                })
                .collect(),
        }
    }

    #[test]
    fn test_every_node_gets_a_position() {
        let g = graph(&["A", "B", "C"], &[("A", "B", 2)]);
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 300.0));
        for layout in NetworkLayout::ALL {
            let positions = NetworkChart::layout_positions(&g, layout, rect);
            assert_eq!(positions.len(), 3, "layout {layout:?}");
        }
    }

    #[test]
    fn test_concentric_puts_hub_in_center() {
        let g = graph(
            &["Hub", "A", "B", "C"],
            &[("Hub", "A", 1), ("Hub", "B", 1), ("Hub", "C", 1)],
        );
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 400.0));
        let positions = NetworkChart::layout_positions(&g, NetworkLayout::Concentric, rect);
        let center = rect.center();
        assert_eq!(positions["Hub"], center);
    }
}
