use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of resource record an override entry answers.
///
/// Unknown type strings are kept as [`OverrideType::Unsupported`] instead of
/// failing the configuration load; such entries never produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum OverrideType {
    A,
    AAAA,
    CNAME,
    SRV,
    TXT,
    MX,
    NS,
    Unsupported(String),
}

impl OverrideType {
    pub const SUPPORTED: [OverrideType; 7] = [
        OverrideType::A,
        OverrideType::AAAA,
        OverrideType::CNAME,
        OverrideType::SRV,
        OverrideType::TXT,
        OverrideType::MX,
        OverrideType::NS,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OverrideType::A => "A",
            OverrideType::AAAA => "AAAA",
            OverrideType::CNAME => "CNAME",
            OverrideType::SRV => "SRV",
            OverrideType::TXT => "TXT",
            OverrideType::MX => "MX",
            OverrideType::NS => "NS",
            OverrideType::Unsupported(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, OverrideType::Unsupported(_))
    }
}

impl fmt::Display for OverrideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "A" => OverrideType::A,
            "AAAA" => OverrideType::AAAA,
            "CNAME" => OverrideType::CNAME,
            "SRV" => OverrideType::SRV,
            "TXT" => OverrideType::TXT,
            "MX" => OverrideType::MX,
            "NS" => OverrideType::NS,
            other => OverrideType::Unsupported(other.to_string()),
        };
        Ok(parsed)
    }
}

impl From<&str> for OverrideType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<String> for OverrideType {
    fn from(s: String) -> Self {
        OverrideType::from(s.as_str())
    }
}
