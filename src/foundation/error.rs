use std::fmt;

/// Convenience result type used across the engine.
pub type InterfacerResult<T> = Result<T, InterfacerError>;

/// Fatal error taxonomy. Component-scoped problems are [`Diagnostic`]s instead.
#[derive(thiserror::Error, Debug)]
pub enum InterfacerError {
    /// Invalid top-level description data (grid shape, display extent).
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset bytes that could not be decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InterfacerError {
    /// Build a [`InterfacerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`InterfacerError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`InterfacerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// A problem scoped to one component. The tree keeps building around it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Diagnostic {
    /// Component label: its `id`, or `#<index>` for anonymous components.
    pub component: String,
    /// What went wrong.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(component: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            component: component.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component '{}': {}", self.component, self.kind)
    }
}

/// Non-fatal construction and runtime failures.
#[derive(thiserror::Error, Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `grid_cell` outside `[0, rows*columns)`. The component is dropped.
    #[error("grid cell {index} is outside the {cells}-cell grid")]
    InvalidCellIndex { index: i64, cells: u64 },

    /// A style name missing from the style table. The reference is a no-op.
    #[error("unknown style reference '{name}'")]
    UnknownStyleReference { name: String },

    /// A `type` outside the closed component set. The component is dropped.
    #[error("unknown component type '{kind}'")]
    UnknownComponentType { kind: String },

    /// `delay <= 0` (or not a number). The animation shows frame 0 statically.
    #[error("animation delay must be > 0, got {delay}")]
    InvalidAnimationDelay { delay: f64 },

    /// An animation without frames. The component draws nothing.
    #[error("animation has no frames")]
    EmptyAnimationSequence,

    /// Sprite sides that are not positive whole numbers, or sprites that do not fit the sheet.
    /// Sheet size is zero when not yet known.
    #[error(
        "sprites of {sprite_width}x{sprite_height} do not fit a {sheet_width}x{sheet_height} sheet"
    )]
    InvalidSpritesheetGeometry {
        sprite_width: f64,
        sprite_height: f64,
        sheet_width: u32,
        sheet_height: u32,
    },

    /// A colour string that could not be resolved.
    #[error("invalid color '{value}' for '{property}'")]
    InvalidColor { property: String, value: String },

    /// A `width`/`height` value that is neither a unit count nor a percentage.
    #[error("invalid dimension '{value}' for '{property}'")]
    InvalidDimension { property: String, value: String },

    /// A type-specific attribute the component cannot work without.
    #[error("missing required attribute '{attr}'")]
    MissingAttribute { attr: String },

    /// The asset loader reported a failure. Retried on the next tick.
    #[error("asset '{key}' unavailable: {reason}")]
    AssetUnavailable { key: String, reason: String },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
