pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{OutlinePath, Project};
pub use layout::{BlockLayout, LayoutError, compute_layout};
pub use parser::{ParseError, ParseOptions, parse_project};
pub use render::render_svg;
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;
