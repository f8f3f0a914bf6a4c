use thiserror::Error;

/// Reasons a layout pass is rejected. No partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("content size {width}x{height} for node {identity} is negative or not finite")]
    InvalidContentSize {
        identity: String,
        width: f32,
        height: f32,
    },
    #[error("invalid {field}: {value} (must be finite and non-negative)")]
    InvalidSpacing { field: &'static str, value: f32 },
    #[error("invalid label {field}: {value} (must be finite and non-negative)")]
    InvalidLabelSetting { field: &'static str, value: f32 },
    #[error("node identity {identity} appears more than once in the visible tree")]
    DuplicateIdentity { identity: String },
}
