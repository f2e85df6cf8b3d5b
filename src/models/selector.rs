use std::fmt;

use serde::Serialize;

/// A LIFX selector scoping an operation to a set of lights.
///
/// Only the syntax is checked here; whether a selector matches any device is
/// decided by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Selector {
    All,
    Group(String),
    Label(String),
    Location(String),
    Id(String),
}

impl Selector {
    pub fn prefix(&self) -> &'static str {
        match self {
            Selector::All => "all",
            Selector::Group(_) => "group",
            Selector::Label(_) => "label",
            Selector::Location(_) => "location",
            Selector::Id(_) => "id",
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selector::All => None,
            Selector::Group(v) | Selector::Label(v) | Selector::Location(v) | Selector::Id(v) => {
                Some(v)
            }
        }
    }

    /// Form used inside a request path: the value is percent-encoded, the
    /// prefix and colon are kept literal.
    pub fn path_segment(&self) -> String {
        match self.value() {
            None => self.prefix().to_string(),
            Some(value) => format!("{}:{}", self.prefix(), urlencoding::encode(value)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            None => f.write_str(self.prefix()),
            Some(value) => write!(f, "{}:{}", self.prefix(), value),
        }
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}
