use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry constants of the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width given to the root block before any correction.
    pub total_width: f64,
    /// Whitespace between siblings and around nested blocks.
    pub offset: f64,
    /// Floor below which blocks are widened.
    pub min_block_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            total_width: 1000.0,
            offset: 5.0,
            min_block_width: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Size used in place of non-positive block widths and heights.
    pub min_visible_size: f64,
    /// Distance of the timeline to the left of the blocks.
    pub timeline_offset: f64,
    /// Glyph width as a fraction of the font size, for label placement.
    pub label_char_width: f64,
    pub block_stroke_width: f64,
    pub milestone_dasharray: String,
    /// Fallback raster size when the SVG has none.
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_visible_size: 2.0,
            timeline_offset: 20.0,
            label_char_width: 0.5,
            block_stroke_width: 2.0,
            milestone_dasharray: "8,4,2,4".to_string(),
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f64>,
    block_fill: Option<String>,
    block_fill_alt: Option<String>,
    block_stroke: Option<String>,
    critical_fill: Option<String>,
    critical_fill_alt: Option<String>,
    critical_stroke: Option<String>,
    text_color: Option<String>,
    timeline_color: Option<String>,
    milestone_fill: Option<String>,
    milestone_stroke: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    total_width: Option<f64>,
    offset: Option<f64>,
    min_block_width: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    min_visible_size: Option<f64>,
    timeline_offset: Option<f64>,
    label_char_width: Option<f64>,
    block_stroke_width: Option<f64>,
    milestone_dasharray: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme name, keeping default"),
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.block_fill {
            theme.block_fill = v;
        }
        if let Some(v) = vars.block_fill_alt {
            theme.block_fill_alt = v;
        }
        if let Some(v) = vars.block_stroke {
            theme.block_stroke = v;
        }
        if let Some(v) = vars.critical_fill {
            theme.critical_fill = v;
        }
        if let Some(v) = vars.critical_fill_alt {
            theme.critical_fill_alt = v;
        }
        if let Some(v) = vars.critical_stroke {
            theme.critical_stroke = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_color = v;
        }
        if let Some(v) = vars.timeline_color {
            theme.timeline_color = v;
        }
        if let Some(v) = vars.milestone_fill {
            theme.milestone_fill = v;
        }
        if let Some(v) = vars.milestone_stroke {
            theme.milestone_stroke = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.total_width {
            config.layout.total_width = v;
        }
        if let Some(v) = layout.offset {
            config.layout.offset = v;
        }
        if let Some(v) = layout.min_block_width {
            config.layout.min_block_width = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.min_visible_size {
            config.render.min_visible_size = v;
        }
        if let Some(v) = render.timeline_offset {
            config.render.timeline_offset = v;
        }
        if let Some(v) = render.label_char_width {
            config.render.label_char_width = v;
        }
        if let Some(v) = render.block_stroke_width {
            config.render.block_stroke_width = v;
        }
        if let Some(v) = render.milestone_dasharray {
            config.render.milestone_dasharray = v;
        }
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(config)
}
