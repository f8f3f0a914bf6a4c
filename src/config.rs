use crate::layout::LayoutError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Screen direction in which generations grow away from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Down,
    Up,
    #[default]
    Right,
    Left,
}

impl Orientation {
    /// Depth runs along the y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }

    /// Depth grows toward negative screen coordinates.
    pub fn is_mirrored(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

/// Shape of the polyline joining a parent to each child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    Direct,
    #[default]
    Orthogonal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap between adjacent sibling subtrees along the breadth axis.
    pub sibling_spacing: f32,
    /// Gap between a parent's frame and its children's frames along the depth axis.
    pub level_spacing: f32,
    /// Blank border around the whole tree.
    pub content_margin: f32,
    pub orientation: Orientation,
    pub connector_style: ConnectorStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sibling_spacing: 10.0,
            level_spacing: 50.0,
            content_margin: 20.0,
            orientation: Orientation::default(),
            connector_style: ConnectorStyle::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_spacing(mut self, sibling_spacing: f32, level_spacing: f32) -> Self {
        self.sibling_spacing = sibling_spacing;
        self.level_spacing = level_spacing;
        self
    }

    pub fn with_margin(mut self, content_margin: f32) -> Self {
        self.content_margin = content_margin;
        self
    }

    pub fn with_connector_style(mut self, connector_style: ConnectorStyle) -> Self {
        self.connector_style = connector_style;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        for (field, value) in [
            ("sibling_spacing", self.sibling_spacing),
            ("level_spacing", self.level_spacing),
            ("content_margin", self.content_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidSpacing { field, value });
            }
        }
        Ok(())
    }
}

/// Where an appearing node starts its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppearFrom {
    /// Centred on the nearest ancestor's previous frame.
    #[default]
    Parent,
    /// At its own final frame.
    InPlace,
}

/// Where a disappearing node ends its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisappearTo {
    /// Centred on the nearest surviving ancestor's new frame.
    #[default]
    Parent,
    /// At its own previous frame.
    InPlace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionPolicy {
    pub appear: AppearFrom,
    pub disappear: DisappearTo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub font_family: String,
    pub font_size: f32,
    pub line_height: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    /// Labels wider than this wrap at word boundaries.
    pub max_width: f32,
    /// Skip font lookup and use the built-in glyph width table.
    pub fast_metrics: bool,
}

impl LabelConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (field, value) in [
            ("font_size", self.font_size),
            ("line_height", self.line_height),
            ("padding_x", self.padding_x),
            ("padding_y", self.padding_y),
            ("max_width", self.max_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidLabelSetting { field, value });
            }
        }
        Ok(())
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 14.0,
            line_height: 1.4,
            padding_x: 8.0,
            padding_y: 4.0,
            max_width: 200.0,
            fast_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub transitions: TransitionPolicy,
    pub label: LabelConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    sibling_spacing: Option<f32>,
    level_spacing: Option<f32>,
    content_margin: Option<f32>,
    orientation: Option<Orientation>,
    connector_style: Option<ConnectorStyle>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TransitionConfigFile {
    appear: Option<AppearFrom>,
    disappear: Option<DisappearTo>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LabelConfigFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    line_height: Option<f32>,
    padding_x: Option<f32>,
    padding_y: Option<f32>,
    max_width: Option<f32>,
    fast_metrics: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    transitions: Option<TransitionConfigFile>,
    label: Option<LabelConfigFile>,
}

/// Loads a JSON5 config file over the defaults. `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed = parse_config(&contents)?;
    apply_config_file(&mut config, parsed);
    config.layout.validate()?;
    config.label.validate()?;
    Ok(config)
}

/// Same as [`load_config`] for an in-memory document.
pub fn config_from_str(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    apply_config_file(&mut config, parse_config(contents)?);
    config.layout.validate()?;
    config.label.validate()?;
    Ok(config)
}

fn parse_config(contents: &str) -> anyhow::Result<ConfigFile> {
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(json5::from_str(contents)?)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.sibling_spacing {
            config.layout.sibling_spacing = v;
        }
        if let Some(v) = layout.level_spacing {
            config.layout.level_spacing = v;
        }
        if let Some(v) = layout.content_margin {
            config.layout.content_margin = v;
        }
        if let Some(v) = layout.orientation {
            config.layout.orientation = v;
        }
        if let Some(v) = layout.connector_style {
            config.layout.connector_style = v;
        }
    }

    if let Some(transitions) = parsed.transitions {
        if let Some(v) = transitions.appear {
            config.transitions.appear = v;
        }
        if let Some(v) = transitions.disappear {
            config.transitions.disappear = v;
        }
    }

    if let Some(label) = parsed.label {
        if let Some(v) = label.font_family {
            config.label.font_family = v;
        }
        if let Some(v) = label.font_size {
            config.label.font_size = v;
        }
        if let Some(v) = label.line_height {
            config.label.line_height = v;
        }
        if let Some(v) = label.padding_x {
            config.label.padding_x = v;
        }
        if let Some(v) = label.padding_y {
            config.label.padding_y = v;
        }
        if let Some(v) = label.max_width {
            config.label.max_width = v;
        }
        if let Some(v) = label.fast_metrics {
            config.label.fast_metrics = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config.layout.sibling_spacing, 10.0);
        assert_eq!(config.layout.level_spacing, 50.0);
        assert_eq!(config.layout.orientation, Orientation::Right);
        assert_eq!(config.transitions, TransitionPolicy::default());
    }

    #[test]
    fn json5_overlay_keeps_unset_fields() {
        let config = config_from_str(
            r#"{
                // comments are allowed
                layout: { siblingSpacing: 4, orientation: "down", connectorStyle: "direct" },
                transitions: { appear: "inPlace" },
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.layout.sibling_spacing, 4.0);
        assert_eq!(config.layout.level_spacing, 50.0);
        assert_eq!(config.layout.orientation, Orientation::Down);
        assert_eq!(config.layout.connector_style, ConnectorStyle::Direct);
        assert_eq!(config.transitions.appear, AppearFrom::InPlace);
        assert_eq!(config.transitions.disappear, DisappearTo::Parent);
    }

    #[test]
    fn negative_spacing_is_rejected() {
        let err = config_from_str(r#"{ layout: { levelSpacing: -3 } }"#).unwrap_err();
        assert!(err.to_string().contains("level_spacing"), "{err}");
    }

    #[test]
    fn negative_font_size_is_rejected() {
        let err =
            config_from_str(r#"{ label: { fontSize: -14, fastMetrics: true } }"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LayoutError>(),
            Some(&LayoutError::InvalidLabelSetting {
                field: "font_size",
                value: -14.0
            })
        );
    }

    #[test]
    fn label_settings_must_be_finite() {
        let label = LabelConfig {
            max_width: f32::INFINITY,
            ..LabelConfig::default()
        };
        assert!(matches!(
            label.validate(),
            Err(LayoutError::InvalidLabelSetting {
                field: "max_width",
                ..
            })
        ));
        assert_eq!(LabelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, r#"{{ "label": {{ "fontSize": 18, "fastMetrics": true }} }}"#)
            .expect("write config");
        let config = load_config(Some(file.path())).expect("valid config");
        assert_eq!(config.label.font_size, 18.0);
        assert!(config.label.fast_metrics);
        assert_eq!(config.label.font_family, "sans-serif");
    }
}
