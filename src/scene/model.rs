use std::collections::BTreeMap;

use crate::foundation::{
    color::ColorValue,
    error::{InterfacerError, InterfacerResult},
};

/// Open property bag: visual properties and type-specific attributes alike.
pub type PropertyMap = BTreeMap<String, serde_json::Value>;

/// Already-parsed interface description.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct InterfaceDesc {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_background")]
    pub background: ColorValue,
    /// Asset key of an image stretched over the whole display. Drawn instead of the colour once
    /// loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub rows: i64,
    pub columns: i64,
    #[serde(default)]
    pub styles: Vec<NamedStyle>,
    #[serde(default)]
    pub components: Vec<ComponentDesc>,
}

fn default_background() -> ColorValue {
    ColorValue::from("black")
}

impl InterfaceDesc {
    pub fn from_json_str(s: &str) -> InterfacerResult<Self> {
        serde_json::from_str(s).map_err(|e| InterfacerError::serde(e.to_string()))
    }

    pub fn to_json_string_pretty(&self) -> InterfacerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| InterfacerError::serde(e.to_string()))
    }
}

/// Named style: immutable, never inherits from another style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamedStyle {
    pub name: String,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComponentDesc {
    #[serde(rename = "type")]
    pub kind: String,
    /// `None` or `"_"` marks an anonymous component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub grid_cell: i64,
    /// Style names, lowest priority first. Accepts a single name or a list.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub style: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<DimensionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<DimensionSpec>,
    /// Inline properties; these beat every referenced style.
    #[serde(flatten)]
    pub properties: PropertyMap,
}

impl ComponentDesc {
    pub fn new(kind: impl Into<String>, grid_cell: i64) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            grid_cell,
            style: Vec::new(),
            width: None,
            height: None,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_style(mut self, name: impl Into<String>) -> Self {
        self.style.push(name.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_size(mut self, width: DimensionSpec, height: DimensionSpec) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// The id used for lookups, or `None` for anonymous components.
    pub fn lookup_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty() && *id != "_")
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        One(String),
        Many(Vec<String>),
    }

    match <Repr as serde::Deserialize>::deserialize(deserializer)? {
        Repr::One(s) => Ok(vec![s]),
        Repr::Many(v) => Ok(v),
    }
}

/// `width`/`height` exactly as written; parsed once at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DimensionSpec {
    Units(f64),
    Text(String),
}

impl DimensionSpec {
    pub fn parse(&self) -> Option<Dimension> {
        match self {
            Self::Units(v) => Dimension::absolute(*v),
            Self::Text(s) => Dimension::parse(s),
        }
    }
}

impl std::fmt::Display for DimensionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Units(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A parsed component dimension, resolved against the owning cell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Dimension {
    /// Absolute pixel count.
    Absolute(f64),
    /// Ratio of the cell side (`"80%"` is `Percent(0.8)`).
    Percent(f64),
    /// Fill the cell, same as leaving the dimension out.
    Auto,
}

impl Dimension {
    fn absolute(v: f64) -> Option<Self> {
        (v.is_finite() && v >= 0.0).then_some(Self::Absolute(v))
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        if let Some(pct) = s.strip_suffix('%') {
            let v: f64 = pct.trim().parse().ok()?;
            return (v.is_finite() && v >= 0.0).then_some(Self::Percent(v / 100.0));
        }
        Self::absolute(s.parse().ok()?)
    }

    /// Pixel length inside a cell side of `cell_len`, never exceeding it.
    pub fn resolve(self, cell_len: u32) -> u32 {
        let px = match self {
            Self::Absolute(v) => v,
            Self::Percent(r) => f64::from(cell_len) * r,
            Self::Auto => return cell_len,
        };
        (px.floor() as u32).min(cell_len)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
