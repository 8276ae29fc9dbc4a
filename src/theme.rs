use serde::{Deserialize, Serialize};

const CLASSIC_PALETTE: [&str; 20] = [
    "#F2C2CE", "#A7D8F0", "#FADDA2", "#8691C5", "#E8DB62", "#BDC8E7", "#F2A7A8", "#F5E586",
    "#91C3ED", "#96B87F", "#EE8D87", "#BDDCAB", "#68B9C7", "#93DAD6", "#EEBE84", "#83B085",
    "#8CCCD2", "#C5DFE8", "#F2B75B", "#C8DC60",
];

const MODERN_PALETTE: [&str; 12] = [
    "#93C5FD", "#FCA5A5", "#86EFAC", "#FDE68A", "#C4B5FD", "#F9A8D4", "#67E8F9", "#FDBA74",
    "#A5B4FC", "#BEF264", "#5EEAD4", "#D8B4FE",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub line_color: String,
    pub axis_color: String,
    pub background: String,
    pub error_border_color: String,
    pub legend_text_color: String,
    /// Actor colors, assigned in first-seen order and reused cyclically.
    pub palette: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Helvetica, Arial, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#333333".to_string(),
            line_color: "#333333".to_string(),
            axis_color: "#666666".to_string(),
            background: "#FFFFFF".to_string(),
            error_border_color: "#D9363E".to_string(),
            legend_text_color: "#333333".to_string(),
            palette: CLASSIC_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            axis_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
            error_border_color: "#EF4444".to_string(),
            legend_text_color: "#1C2430".to_string(),
            palette: MODERN_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
