//! Named presentation attributes and the [`RenderPolicy`] snapshot taken from
//! them.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

pub const DISPLAY_QUALIFIED_NAMES: &str = "DISPLAY_QUALIFIED_NAMES";
pub const DISPLAY_VARIABLE_TYPE_NAMES: &str = "DISPLAY_VARIABLE_TYPE_NAMES";
pub const SHOW_HEX_VALUES: &str = "SHOW_HEX_VALUES";
pub const SHOW_CHAR_VALUES: &str = "SHOW_CHAR_VALUES";
pub const SHOW_UNSIGNED_VALUES: &str = "SHOW_UNSIGNED_VALUES";
/// String attribute; see [`ShowDetails`].
pub const SHOW_DETAILS: &str = "SHOW_DETAILS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// When variable labels inline the detail string instead of the value text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowDetails {
    /// Every variable label shows its detail.
    InlineAll,
    /// Only values with an enabled detail formatter show their detail.
    InlineFormatters,
    /// Details are only shown on request.
    #[default]
    DetailPane,
}

impl ShowDetails {
    pub fn as_str(self) -> &'static str {
        match self {
            ShowDetails::InlineAll => "INLINE_ALL",
            ShowDetails::InlineFormatters => "INLINE_FORMATTERS",
            ShowDetails::DetailPane => "DETAIL_PANE",
        }
    }
}

impl FromStr for ShowDetails {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INLINE_ALL" => Ok(ShowDetails::InlineAll),
            "INLINE_FORMATTERS" => Ok(ShowDetails::InlineFormatters),
            "DETAIL_PANE" => Ok(ShowDetails::DetailPane),
            _ => Err(()),
        }
    }
}

/// Display flags consumed by the renderers.
///
/// Renderers take this by reference and never consult the attribute store
/// themselves, so a snapshot is taken per render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RenderPolicy {
    pub show_qualified_names: bool,
    pub show_variable_type_names: bool,
    pub show_hex_values: bool,
    pub show_char_values: bool,
    pub show_unsigned_values: bool,
    pub show_details: ShowDetails,
}

impl RenderPolicy {
    /// No annotation flag is set.
    pub fn is_plain(&self) -> bool {
        !(self.show_hex_values || self.show_char_values || self.show_unsigned_values)
    }
}

/// Instance-scoped attribute table.
///
/// Unknown names are kept but have no effect.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    values: HashMap<String, AttributeValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`. A `None` value is ignored.
    pub fn set_attribute(&mut self, name: &str, value: Option<AttributeValue>) {
        if let Some(value) = value {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Absent and non-boolean values read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(AttributeValue::Bool(true)))
    }

    pub fn show_details(&self) -> ShowDetails {
        match self.values.get(SHOW_DETAILS) {
            Some(AttributeValue::Text(text)) => text.parse().unwrap_or_default(),
            _ => ShowDetails::default(),
        }
    }

    pub fn policy(&self) -> RenderPolicy {
        RenderPolicy {
            show_qualified_names: self.flag(DISPLAY_QUALIFIED_NAMES),
            show_variable_type_names: self.flag(DISPLAY_VARIABLE_TYPE_NAMES),
            show_hex_values: self.flag(SHOW_HEX_VALUES),
            show_char_values: self.flag(SHOW_CHAR_VALUES),
            show_unsigned_values: self.flag(SHOW_UNSIGNED_VALUES),
            show_details: self.show_details(),
        }
    }

    /// Seeds the store from a deserialized policy.
    pub fn apply_policy(&mut self, policy: &RenderPolicy) {
        let flags = [
            (DISPLAY_QUALIFIED_NAMES, policy.show_qualified_names),
            (DISPLAY_VARIABLE_TYPE_NAMES, policy.show_variable_type_names),
            (SHOW_HEX_VALUES, policy.show_hex_values),
            (SHOW_CHAR_VALUES, policy.show_char_values),
            (SHOW_UNSIGNED_VALUES, policy.show_unsigned_values),
        ];
        for (name, value) in flags {
            self.set_attribute(name, Some(value.into()));
        }
        self.set_attribute(SHOW_DETAILS, Some(policy.show_details.as_str().into()));
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
