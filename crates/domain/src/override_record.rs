use crate::override_type::OverrideType;
use serde::Deserialize;

/// An administrator-configured answer for every name ending in one of
/// `values`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRecord {
    #[serde(rename = "type")]
    pub record_type: OverrideType,

    pub target: String,

    pub values: Vec<String>,

    #[serde(default)]
    pub ttl: u32,

    /// SRV priority
    #[serde(default)]
    pub priority: u16,

    /// SRV weight
    #[serde(default)]
    pub weight: u16,

    /// SRV port
    #[serde(default)]
    pub port: u16,

    /// MX preference
    #[serde(default)]
    pub preference: u16,
}

impl OverrideRecord {
    pub fn new(
        record_type: impl Into<OverrideType>,
        target: impl Into<String>,
        values: Vec<String>,
        ttl: u32,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            target: target.into(),
            values,
            ttl,
            priority: 0,
            weight: 0,
            port: 0,
            preference: 0,
        }
    }

    /// First configured value that `name` ends with.
    ///
    /// Comparison is byte-wise and case-sensitive; `name` is expected in its
    /// fully-qualified, dot-terminated form.
    pub fn matching_value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .map(String::as_str)
            .find(|value| name.ends_with(value))
    }
}
