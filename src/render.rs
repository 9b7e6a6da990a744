use crate::config::RenderConfig;
use crate::layout::{BlockLayout, Milestone, Task};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const DIAMOND_HALF_DIAGONAL: f64 = 0.707;

pub fn render_svg(layout: &BlockLayout, theme: &Theme, config: &RenderConfig) -> String {
    let bounds = ViewBounds::measure(layout, theme, config);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}\" height=\"{:.2}\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">",
        bounds.width(),
        bounds.height(),
        bounds.min_x,
        bounds.min_y,
        bounds.width(),
        bounds.height(),
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        bounds.min_x, bounds.min_y, config.background
    ));

    for task in &layout.tasks {
        svg.push_str(&task_svg(task, theme, config));
    }

    let timeline_x = -config.timeline_offset;
    svg.push_str(&format!(
        "<line x1=\"{timeline_x:.2}\" y1=\"0\" x2=\"{timeline_x:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\"/>",
        layout.span_days() as f64,
        theme.timeline_color
    ));

    for milestone in &layout.milestones {
        svg.push_str(&milestone_svg(milestone, layout, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn task_svg(task: &Task, theme: &Theme, config: &RenderConfig) -> String {
    let (fill, stroke) = theme.block_colors(task.level(), task.critical && task.is_leaf());
    let degenerate = task.width <= 0.0 || task.height <= 0.0;
    let width = visible(task.width, config);
    let height = visible(task.height, config);

    let mut group = String::from("<g>");
    group.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{}\"/>",
        task.left, task.top, config.block_stroke_width
    ));

    if task.is_leaf() {
        let font_size = theme.font_size;
        let text_width = task.name.chars().count() as f64 * font_size * config.label_char_width;
        let (x, y, rotate) = if degenerate {
            // Too small to hold text: label sits to the right of the block.
            (task.left + width + font_size / 2.0, task.top + font_size / 2.0, 0.0)
        } else if height > width {
            (
                task.left + width - (width - font_size) / 2.0,
                task.top + height / 2.0 + text_width / 2.0,
                -90.0,
            )
        } else {
            (
                task.left + width / 2.0 - text_width / 2.0,
                task.top + height - (height - font_size) / 2.0,
                0.0,
            )
        };
        group.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" transform=\"rotate({rotate} {x:.2} {y:.2})\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            theme.font_family,
            font_size,
            theme.text_color,
            escape_xml(&task.name)
        ));
    }

    group.push_str("</g>");
    group
}

fn milestone_svg(milestone: &Milestone, layout: &BlockLayout, theme: &Theme, config: &RenderConfig) -> String {
    let offset = config.timeline_offset;
    let y = (milestone.date - layout.project_start).num_days() as f64;
    let diamond = offset / 2.0;
    let corner_x = -offset;
    let corner_y = y - diamond * DIAMOND_HALF_DIAGONAL;

    let mut group = String::from("<g>");
    group.push_str(&format!(
        "<rect x=\"{corner_x:.2}\" y=\"{corner_y:.2}\" width=\"{diamond:.2}\" height=\"{diamond:.2}\" transform=\"rotate(45 {corner_x:.2} {corner_y:.2})\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        theme.milestone_fill, theme.milestone_stroke
    ));
    group.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"{}\"/>",
        -offset + diamond * DIAMOND_HALF_DIAGONAL,
        layout.max_width + offset,
        theme.milestone_stroke,
        config.milestone_dasharray
    ));
    let label = milestone_label(milestone);
    let label_x = -(label_width(&label, theme, config) + 3.0 * offset);
    group.push_str(&format!(
        "<text x=\"{label_x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(&label)
    ));
    group.push_str("</g>");
    group
}

fn milestone_label(milestone: &Milestone) -> String {
    format!("{} [{}]", milestone.name, milestone.date.format("%d-%m-%Y"))
}

fn label_width(label: &str, theme: &Theme, config: &RenderConfig) -> f64 {
    label.chars().count() as f64 * theme.font_size * config.label_char_width
}

fn visible(size: f64, config: &RenderConfig) -> f64 {
    if size <= 0.0 { config.min_visible_size } else { size }
}

struct ViewBounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl ViewBounds {
    fn measure(layout: &BlockLayout, theme: &Theme, config: &RenderConfig) -> Self {
        let offset = config.timeline_offset;
        let widest_label = layout
            .milestones
            .iter()
            .map(|m| label_width(&milestone_label(m), theme, config))
            .fold(0.0, f64::max);

        let mut min_x = -(offset + theme.font_size);
        if !layout.milestones.is_empty() {
            min_x = min_x.min(-(widest_label + 3.0 * offset) - theme.font_size);
        }
        let mut min_y = -theme.font_size;
        let mut max_x = layout.max_width + 2.0 * offset;
        let mut max_y = layout.span_days() as f64 + theme.font_size;
        for task in &layout.tasks {
            min_y = min_y.min(task.top - theme.font_size);
            max_x = max_x.max(task.left + visible(task.width, config) + offset);
            max_y = max_y.max(task.top + visible(task.height, config) + theme.font_size);
        }
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid default render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
