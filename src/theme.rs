use serde::{Deserialize, Serialize};

/// Colours and fonts used by the SVG renderer. The layout engine never reads
/// this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f64,
    /// Fill for odd outline levels.
    pub block_fill: String,
    /// Fill for even outline levels.
    pub block_fill_alt: String,
    pub block_stroke: String,
    pub critical_fill: String,
    pub critical_fill_alt: String,
    pub critical_stroke: String,
    pub text_color: String,
    pub timeline_color: String,
    pub milestone_fill: String,
    pub milestone_stroke: String,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12.0,
            block_fill: "#ffffff".to_string(),
            block_fill_alt: "#cccccc".to_string(),
            block_stroke: "#000000".to_string(),
            critical_fill: "#ffaaaa".to_string(),
            critical_fill_alt: "#ffd5d5".to_string(),
            critical_stroke: "#ff0000".to_string(),
            text_color: "#000000".to_string(),
            timeline_color: "#000000".to_string(),
            milestone_fill: "red".to_string(),
            milestone_stroke: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            block_fill: "#F8FAFF".to_string(),
            block_fill_alt: "#EEF2F8".to_string(),
            block_stroke: "#7A8AA6".to_string(),
            critical_fill: "#FDE2E2".to_string(),
            critical_fill_alt: "#FBEAEA".to_string(),
            critical_stroke: "#DC2626".to_string(),
            text_color: "#1C2430".to_string(),
            timeline_color: "#7A8AA6".to_string(),
            milestone_fill: "#F59E0B".to_string(),
            milestone_stroke: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    /// Fill and stroke for a block. Critical colouring applies to leaves only.
    pub fn block_colors(&self, level: usize, critical_leaf: bool) -> (&str, &str) {
        let even = level % 2 == 0;
        let (odd_fill, even_fill, stroke) = if critical_leaf {
            (&self.critical_fill, &self.critical_fill_alt, &self.critical_stroke)
        } else {
            (&self.block_fill, &self.block_fill_alt, &self.block_stroke)
        };
        let fill = if even { even_fill } else { odd_fill };
        (fill.as_str(), stroke.as_str())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
