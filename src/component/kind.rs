use std::{fmt, str::FromStr};

use crate::foundation::error::DiagnosticKind;

/// The closed set of component types a description may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Text,
    Paragraph,
    Button,
    TextButton,
    Input,
    Image,
    Animation,
    SpritesheetAnimation,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 8] = [
        Self::Text,
        Self::Paragraph,
        Self::Button,
        Self::TextButton,
        Self::Input,
        Self::Image,
        Self::Animation,
        Self::SpritesheetAnimation,
    ];

    /// The `type` string used in descriptions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Paragraph => "paragraph",
            Self::Button => "button",
            Self::TextButton => "text-button",
            Self::Input => "input",
            Self::Image => "image",
            Self::Animation => "animation",
            Self::SpritesheetAnimation => "spritesheet-animation",
        }
    }

    pub fn is_focusable(self) -> bool {
        matches!(self, Self::Button | Self::TextButton | Self::Input)
    }

    pub fn is_animatable(self) -> bool {
        matches!(self, Self::Animation | Self::SpritesheetAnimation)
    }
}

impl FromStr for ComponentKind {
    type Err = DiagnosticKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DiagnosticKind::UnknownComponentType { kind: s.to_owned() })
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/kind.rs"]
mod tests;
