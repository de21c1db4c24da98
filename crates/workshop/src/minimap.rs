//! Text and SVG drawings of a [`GraphLayout`].
//!
//! The text grid puts one tree level per line. The SVG follows the layout's
//! own ordering: one row per node, in `(level, column)` order.

use std::fmt::Write;
use workshop_core::conversation::GraphLayout;
use workshop_core::preferences::MinimapPreferences;

const VISIBLE_MARK: char = '@';
const HIDDEN_MARK: char = 'o';
const EMPTY_MARK: char = '.';

const VISIBLE_FILL: &str = "#e6e6e6";
const HIDDEN_STROKE: &str = "#6b6b6b";
const EDGE_STROKE: &str = "#333333";
const VISIBLE_EDGE_STROKE: &str = "#ffb400";

/// One line per level, one character per column.
pub fn render_text(layout: &GraphLayout) -> String {
    if layout.is_empty() {
        return String::new();
    }

    let width = layout.max_column + 1;
    let mut grid = vec![vec![EMPTY_MARK; width]; layout.max_level() + 1];
    for node in &layout.graph_nodes {
        grid[node.level][node.column] = if node.is_visible {
            VISIBLE_MARK
        } else {
            HIDDEN_MARK
        };
    }

    let mut out = String::new();
    for row in grid {
        let line: String = row.into_iter().collect();
        out.push_str(line.trim_end_matches(EMPTY_MARK));
        out.push('\n');
    }
    out
}

pub fn render_svg(layout: &GraphLayout, style: &MinimapPreferences) -> String {
    let column_width = u64::from(style.column_width.max(1));
    let row_height = u64::from(style.row_height.max(1));
    let radius = style.node_radius;

    // Sizes come from the preferences file, so the math saturates.
    let cells = |count: usize, size: u64| {
        u64::try_from(count)
            .unwrap_or(u64::MAX)
            .saturating_mul(size)
    };
    let width = cells(layout.max_column.saturating_add(1), column_width);
    let height = cells(layout.graph_nodes.len().max(1), row_height);
    let center = |row: usize, column: usize| {
        (
            cells(column, column_width).saturating_add(column_width / 2),
            cells(row, row_height).saturating_add(row_height / 2),
        )
    };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    for edge in layout.edges() {
        let parent = &layout.graph_nodes[edge.parent];
        let child = &layout.graph_nodes[edge.child];
        let (x1, y1) = center(edge.parent, parent.column);
        let (x2, y2) = center(edge.child, child.column);
        let stroke = if edge.on_visible_path {
            VISIBLE_EDGE_STROKE
        } else {
            EDGE_STROKE
        };
        let _ = writeln!(
            svg,
            r#"  <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="1"/>"#
        );
    }

    for (row, node) in layout.graph_nodes.iter().enumerate() {
        let (cx, cy) = center(row, node.column);
        let fill = if node.is_visible { VISIBLE_FILL } else { "none" };
        let _ = writeln!(
            svg,
            r#"  <circle cx="{cx}" cy="{cy}" r="{radius}" fill="{fill}" stroke="{HIDDEN_STROKE}" data-message-id="{}"/>"#,
            escape_attr(&node.message_id)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
