use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with spans that have no parent besides the first row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RootPolicy {
    /// Extra roots are laid out as disconnected trees without a connector.
    #[default]
    Disconnected,
    /// Any second root fails validation.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub row_height: f32,
    pub bar_margin: f32,
    /// Horizontal distance below which a connector detours to the left.
    pub connector_threshold: f32,
    pub dogleg_offset_x: f32,
    pub dogleg_offset_y: f32,
    pub axis_height: f32,
    pub axis_ticks: usize,
    pub label_offset_x: f32,
    /// Average glyph advance as a fraction of the font size, used to clip labels.
    pub label_char_width: f32,
    pub legend_height: f32,
    pub legend_chip_padding: f32,
    pub legend_gap: f32,
    /// Subtracted from the container width before mapping the time axis.
    pub container_padding: f32,
    pub root_policy: RootPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 36.0,
            bar_margin: 10.0,
            connector_threshold: 10.0,
            dogleg_offset_x: 15.0,
            dogleg_offset_y: 6.0,
            axis_height: 20.0,
            axis_ticks: 20,
            label_offset_x: 5.0,
            label_char_width: 0.6,
            legend_height: 32.0,
            legend_chip_padding: 7.0,
            legend_gap: 8.0,
            container_padding: 50.0,
            root_policy: RootPolicy::default(),
        }
    }
}

impl LayoutConfig {
    pub fn bar_height(&self) -> f32 {
        (self.row_height - self.bar_margin).max(1.0)
    }

    /// Axis width for a container of the given client width.
    pub fn chart_width(&self, container_width: f32) -> f32 {
        container_width - self.container_padding
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Client width of the hosting container.
    pub width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { width: 1200.0 }
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
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    line_color: Option<String>,
    axis_color: Option<String>,
    background: Option<String>,
    error_border_color: Option<String>,
    legend_text_color: Option<String>,
    palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    row_height: Option<f32>,
    bar_margin: Option<f32>,
    connector_threshold: Option<f32>,
    dogleg_offset_x: Option<f32>,
    dogleg_offset_y: Option<f32>,
    axis_height: Option<f32>,
    axis_ticks: Option<usize>,
    label_offset_x: Option<f32>,
    label_char_width: Option<f32>,
    legend_height: Option<f32>,
    legend_chip_padding: Option<f32>,
    legend_gap: Option<f32>,
    container_padding: Option<f32>,
    root_policy: Option<RootPolicy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    #[serde(alias = "traceStack")]
    layout: Option<LayoutConfigFile>,
    width: Option<f32>,
}

/// Loads a JSON (or JSON5) config file over the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.error_border_color {
            config.theme.error_border_color = v;
        }
        if let Some(v) = vars.legend_text_color {
            config.theme.legend_text_color = v;
        }
        if let Some(v) = vars.palette {
            if v.is_empty() {
                tracing::warn!("empty palette in config, keeping theme palette");
            } else {
                config.theme.palette = v;
            }
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.row_height {
            target.row_height = v;
        }
        if let Some(v) = layout.bar_margin {
            target.bar_margin = v;
        }
        if let Some(v) = layout.connector_threshold {
            target.connector_threshold = v;
        }
        if let Some(v) = layout.dogleg_offset_x {
            target.dogleg_offset_x = v;
        }
        if let Some(v) = layout.dogleg_offset_y {
            target.dogleg_offset_y = v;
        }
        if let Some(v) = layout.axis_height {
            target.axis_height = v;
        }
        if let Some(v) = layout.axis_ticks {
            target.axis_ticks = v;
        }
        if let Some(v) = layout.label_offset_x {
            target.label_offset_x = v;
        }
        if let Some(v) = layout.label_char_width {
            target.label_char_width = v;
        }
        if let Some(v) = layout.legend_height {
            target.legend_height = v;
        }
        if let Some(v) = layout.legend_chip_padding {
            target.legend_chip_padding = v;
        }
        if let Some(v) = layout.legend_gap {
            target.legend_gap = v;
        }
        if let Some(v) = layout.container_padding {
            target.container_padding = v;
        }
        if let Some(v) = layout.root_policy {
            target.root_policy = v;
        }
    }

    if let Some(width) = parsed.width {
        config.render.width = width;
    }

    Ok(config)
}
