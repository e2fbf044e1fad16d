use std::collections::BTreeMap;

use crate::{
    foundation::color::ColorValue,
    scene::model::{NamedStyle, PropertyMap},
};

/// Read-only table of named styles, consulted only while building the tree.
#[derive(Clone, Debug, Default)]
pub struct StyleTable {
    styles: BTreeMap<String, PropertyMap>,
}

/// Output of one cascade merge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleResolution {
    pub style: ResolvedStyle,
    /// Referenced names missing from the table, in reference order.
    pub unknown: Vec<String>,
}

impl StyleTable {
    /// Later definitions of the same name replace earlier ones.
    pub fn new(styles: &[NamedStyle]) -> Self {
        let mut out = BTreeMap::new();
        for style in styles {
            if out
                .insert(style.name.clone(), style.properties.clone())
                .is_some()
            {
                tracing::warn!(style = %style.name, "duplicate style name, later definition wins");
            }
        }
        Self { styles: out }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyMap> {
        self.styles.get(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Layered merge: `refs` in order (later wins), then `inline` on top.
    pub fn resolve(&self, refs: &[String], inline: &PropertyMap) -> StyleResolution {
        let mut props = PropertyMap::new();
        let mut unknown = Vec::new();
        for name in refs {
            match self.styles.get(name) {
                Some(layer) => {
                    props.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                None => unknown.push(name.clone()),
            }
        }
        props.extend(inline.iter().map(|(k, v)| (k.clone(), v.clone())));
        StyleResolution {
            style: ResolvedStyle { props },
            unknown,
        }
    }
}

/// Flattened, effective property set owned by one component.
///
/// Keys nobody declared stay unset; typed getters return `None` for them and the back end
/// supplies its own default.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ResolvedStyle {
    props: PropertyMap,
}

impl ResolvedStyle {
    pub fn from_map(props: PropertyMap) -> Self {
        Self { props }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.props.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.props.get(key)?.as_str()
    }

    /// Numbers, or strings holding a number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.props.get(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-negative integers; fractional values are truncated.
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        let v = self.get_f64(key)?;
        (v.is_finite() && v >= 0.0).then(|| v.min(f64::from(u32::MAX)) as u32)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.props.get(key)?.as_bool()
    }

    pub fn get_color(&self, key: &str) -> Option<ColorValue> {
        self.get_str(key).map(ColorValue::from)
    }

    /// A list of strings; a lone string counts as a one-element list.
    pub fn get_strings(&self, key: &str) -> Option<Vec<String>> {
        match self.props.get(key)? {
            serde_json::Value::String(s) => Some(vec![s.clone()]),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolver.rs"]
mod tests;
