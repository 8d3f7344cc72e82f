//! Static Chart Exporter
//! Renders the current panels to PNG files with plotters.

use anyhow::{anyhow, Result};
use chrono::Datelike;
use plotters::prelude::*;
use std::path::Path;

use crate::analysis::{BarSeries, CoOccurrence, GanttTask};
use crate::charts::network::{NetworkChart, NetworkLayout};
use crate::charts::plotter::{progress_color, scale_color, BarMode, ChartPlotter, GanttColorMode};

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 900;

fn rgb(color: egui::Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

/// Writes panel snapshots as PNG images.
pub struct ChartExporter;

impl ChartExporter {
    /// Render a bar panel to `path`.
    pub fn export_bars(
        path: &Path,
        title: &str,
        series: &[BarSeries],
        mode: BarMode,
    ) -> Result<()> {
        let categories = ChartPlotter::categories(series);
        if categories.is_empty() {
            return Err(anyhow!("nothing to export for '{title}'"));
        }

        let n = categories.len();
        let y_max = match mode {
            BarMode::Stack => categories
                .iter()
                .map(|cat| {
                    series
                        .iter()
                        .flat_map(|s| s.bars.iter())
                        .filter(|(label, _)| label == cat)
                        .map(|(_, count)| *count)
                        .sum::<u32>()
                })
                .max()
                .unwrap_or(1),
            BarMode::Group => series
                .iter()
                .flat_map(|s| s.bars.iter().map(|(_, count)| *count))
                .max()
                .unwrap_or(1),
        };

        let root = BitMapBackend::new(path, (EXPORT_WIDTH, EXPORT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(120)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..(y_max as f64 * 1.1))
            .map_err(|e| anyhow!("{e}"))?;

        let cats = categories.clone();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&move |x| {
                let idx = x.round();
                if (x - idx).abs() > 0.25 || idx < 0.0 {
                    return String::new();
                }
                cats.get(idx as usize).cloned().unwrap_or_default()
            })
            .y_desc("# of projects")
            .draw()
            .map_err(|e| anyhow!("{e}"))?;

        let n_series = series.len().max(1);
        let group_width = 0.8 / n_series as f64;
        let mut stack_base = vec![0f64; n];

        for (si, s) in series.iter().enumerate() {
            let color = rgb(scale_color(s.scale));
            let mut rects = Vec::new();

            for (label, count) in &s.bars {
                let Some(idx) = categories.iter().position(|c| c == label) else {
                    continue;
                };
                let (x0, x1, y0) = match mode {
                    BarMode::Stack => (idx as f64 - 0.3, idx as f64 + 0.3, stack_base[idx]),
                    BarMode::Group => {
                        let left = idx as f64 - 0.4 + group_width * si as f64;
                        (left, left + group_width * 0.9, 0.0)
                    }
                };
                let y1 = y0 + *count as f64;
                if mode == BarMode::Stack {
                    stack_base[idx] = y1;
                }
                rects.push(Rectangle::new([(x0, y0), (x1, y1)], color.filled()));
            }

            chart
                .draw_series(rects)
                .map_err(|e| anyhow!("{e}"))?
                .label(s.scale.label())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(|e| anyhow!("{e}"))?;

        root.present().map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    /// Render the Gantt panel to `path`.
    pub fn export_gantt(
        path: &Path,
        title: &str,
        tasks: &[GanttTask],
        color_mode: GanttColorMode,
    ) -> Result<()> {
        if tasks.is_empty() {
            return Err(anyhow!("nothing to export for '{title}'"));
        }

        let n = tasks.len();
        let x_min = tasks.iter().map(|t| t.start.num_days_from_ce()).min().unwrap_or(0) - 15;
        let x_max = tasks.iter().map(|t| t.finish.num_days_from_ce()).max().unwrap_or(1) + 15;

        let height = (n as u32 * 28 + 200).max(EXPORT_HEIGHT / 2);
        let root = BitMapBackend::new(path, (EXPORT_WIDTH, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(320)
            .build_cartesian_2d(
                x_min as f64..x_max as f64,
                -0.5f64..(n as f64 - 0.5),
            )
            .map_err(|e| anyhow!("{e}"))?;

        let labels: Vec<String> = tasks.iter().map(|t| t.task.clone()).collect();
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&move |y| {
                let idx = y.round();
                if (y - idx).abs() > 0.25 || idx < 0.0 {
                    return String::new();
                }
                let i = idx as usize;
                if i < labels.len() {
                    labels[labels.len() - 1 - i].clone()
                } else {
                    String::new()
                }
            })
            .x_label_formatter(&|x| {
                chrono::NaiveDate::from_num_days_from_ce_opt(*x as i32)
                    .map(|d| format!("{}-{:02}", d.year(), d.month()))
                    .unwrap_or_default()
            })
            .draw()
            .map_err(|e| anyhow!("{e}"))?;

        let rects = tasks.iter().enumerate().map(|(i, t)| {
            let color = match color_mode {
                GanttColorMode::Progress => rgb(progress_color(t.progress)),
                GanttColorMode::Scale => rgb(scale_color(t.scale)),
            };
            let y = (n - 1 - i) as f64;
            Rectangle::new(
                [
                    (t.start.num_days_from_ce() as f64, y - 0.35),
                    (t.finish.num_days_from_ce() as f64 + 1.0, y + 0.35),
                ],
                color.filled(),
            )
        });
        chart.draw_series(rects).map_err(|e| anyhow!("{e}"))?;

        root.present().map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    /// Write a relationship graph as a JSON element list (one entry per
    /// node, then one per weighted edge) alongside the rendered image.
    pub fn export_network_elements(path: &Path, graph: &CoOccurrence) -> Result<()> {
        let mut elements: Vec<serde_json::Value> = graph
            .nodes
            .iter()
            .map(|node| serde_json::json!({ "data": { "id": node, "label": node } }))
            .collect();
        elements.extend(graph.edges.iter().map(|edge| {
            serde_json::json!({
                "data": {
                    "source": edge.source,
                    "target": edge.target,
                    "weight": edge.weight,
                }
            })
        }));

        std::fs::write(path, serde_json::to_string_pretty(&elements)?)?;
        Ok(())
    }

    /// Render a relationship panel to `path` using the given layout.
    pub fn export_network(
        path: &Path,
        title: &str,
        graph: &CoOccurrence,
        layout: NetworkLayout,
    ) -> Result<()> {
        if graph.is_empty() {
            return Err(anyhow!("nothing to export for '{title}'"));
        }

        let root = BitMapBackend::new(path, (EXPORT_HEIGHT, EXPORT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;
        root.titled(title, ("sans-serif", 28))
            .map_err(|e| anyhow!("{e}"))?;

        let rect = egui::Rect::from_min_size(
            egui::Pos2::new(0.0, 50.0),
            egui::Vec2::new(EXPORT_HEIGHT as f32, EXPORT_HEIGHT as f32 - 80.0),
        );
        let positions = NetworkChart::layout_positions(graph, layout, rect);
        let max_weight = graph.max_weight() as f64;
        let edge_color = RGBColor(44, 160, 44);
        let node_color = RGBColor(214, 39, 40);

        for edge in &graph.edges {
            let (Some(a), Some(b)) = (positions.get(&edge.source), positions.get(&edge.target))
            else {
                continue;
            };
            let width = 1.0 + 4.0 * edge.weight as f64 / max_weight;
            root.draw(&PathElement::new(
                vec![(a.x as i32, a.y as i32), (b.x as i32, b.y as i32)],
                edge_color.stroke_width(width as u32),
            ))
            .map_err(|e| anyhow!("{e}"))?;
        }

        for node in &graph.nodes {
            let Some(pos) = positions.get(node) else {
                continue;
            };
            root.draw(&Circle::new(
                (pos.x as i32, pos.y as i32),
                7,
                node_color.filled(),
            ))
            .map_err(|e| anyhow!("{e}"))?;
            root.draw(&Text::new(
                node.clone(),
                (pos.x as i32 - 4 * node.len() as i32 / 2, pos.y as i32 + 10),
                ("sans-serif", 16),
            ))
            .map_err(|e| anyhow!("{e}"))?;
        }

        root.present().map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }
}
