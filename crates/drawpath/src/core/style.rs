//! Ordered style property list
//!
//! Diagram cells describe themselves with a `key=value;flag;` micro-language.
//! [`StyleProperties`] keeps the pairs in their original order so the list
//! serializes back to the same string it was parsed from.

use std::fmt;

/// One entry of a style string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleProperty {
    key: String,
    /// `None` for a bare flag (`ellipse;`), `Some` for `key=value;`
    value: Option<String>,
}

impl StyleProperty {
    /// Create a `key=value` property
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create a bare flag property
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The property value; flags read as the empty string
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }
}

/// Insertion-ordered style property list with flag support
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProperties {
    properties: Vec<StyleProperty>,
}

impl StyleProperties {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style string such as `ellipse;fillColor=#FFD700;`
    ///
    /// Empty tokens are skipped and only the first `=` separates the key
    /// from the value.
    pub fn parse(style: &str) -> Self {
        let properties = style
            .split(';')
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((key, value)) => StyleProperty::new(key, value),
                None => StyleProperty::flag(token),
            })
            .collect();
        Self { properties }
    }

    /// Look up a property value; `Some("")` for flags, `None` when absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(StyleProperty::value)
    }

    /// Check whether a key is present, as a flag or with a value
    pub fn contains(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.key == key)
    }

    /// Set a property value, replacing an existing key in place or
    /// appending a new one at the end
    pub fn set(&mut self, key: &str, value: &str) {
        match self.properties.iter_mut().find(|p| p.key == key) {
            Some(existing) => existing.value = Some(value.to_string()),
            None => self.properties.push(StyleProperty::new(key, value)),
        }
    }

    /// Set a bare flag, replacing an existing key in place or appending
    pub fn set_flag(&mut self, key: &str) {
        match self.properties.iter_mut().find(|p| p.key == key) {
            Some(existing) => existing.value = None,
            None => self.properties.push(StyleProperty::flag(key)),
        }
    }

    /// Remove a property, returning it if it was present
    pub fn remove(&mut self, key: &str) -> Option<StyleProperty> {
        let position = self.properties.iter().position(|p| p.key == key)?;
        Some(self.properties.remove(position))
    }

    /// Iterate over the properties in order
    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.properties.iter()
    }

    /// Ordered `(key, value)` pairs, flags with an empty value
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.properties.iter().map(|p| (p.key(), p.value())).collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Display for StyleProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for property in &self.properties {
            match &property.value {
                Some(value) => write!(f, "{}={};", property.key, value)?,
                None => write!(f, "{};", property.key)?,
            }
        }
        Ok(())
    }
}
