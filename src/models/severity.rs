use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Default visual signal for a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityPolicy {
    pub color: &'static str,
    pub cycles: u32,
}

const LOW: SeverityPolicy = SeverityPolicy {
    color: "green",
    cycles: 3,
};
const MEDIUM: SeverityPolicy = SeverityPolicy {
    color: "yellow",
    cycles: 5,
};
const HIGH: SeverityPolicy = SeverityPolicy {
    color: "orange",
    cycles: 7,
};
const CRITICAL: SeverityPolicy = SeverityPolicy {
    color: "red",
    cycles: 10,
};

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn policy(&self) -> SeverityPolicy {
        match self {
            Severity::Low => LOW,
            Severity::Medium => MEDIUM,
            Severity::High => HIGH,
            Severity::Critical => CRITICAL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AppError;

    /// Accepts names and the platform's numeric incident severities (1-4).
    /// Unknown values are rejected rather than mapped to a weaker signal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Ok(Severity::Low),
            "medium" | "moderate" | "2" => Ok(Severity::Medium),
            "high" | "3" => Ok(Severity::High),
            "critical" | "crit" | "4" => Ok(Severity::Critical),
            _ => Err(AppError::validation(format!(
                "Unknown severity '{}'. Expected low, medium, high or critical",
                s.trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(Severity::Low.policy(), SeverityPolicy { color: "green", cycles: 3 });
        assert_eq!(Severity::Medium.policy(), SeverityPolicy { color: "yellow", cycles: 5 });
        assert_eq!(Severity::High.policy(), SeverityPolicy { color: "orange", cycles: 7 });
        assert_eq!(Severity::Critical.policy(), SeverityPolicy { color: "red", cycles: 10 });
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!(" High ".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("moderate".parse::<Severity>().unwrap(), Severity::Medium);
        assert_eq!("crit".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("1".parse::<Severity>().unwrap(), Severity::Low);
        assert_eq!("4".parse::<Severity>().unwrap(), Severity::Critical);
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let err = "extreme".parse::<Severity>().unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("extreme"));
        assert!("".parse::<Severity>().is_err());
        assert!("5".parse::<Severity>().is_err());
    }

    #[test]
    fn test_every_severity_round_trips_through_name() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
    }
}
