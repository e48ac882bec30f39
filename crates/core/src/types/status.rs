//! Enumerated lead fields.

use serde::{Deserialize, Serialize};

/// What a prospective customer is interested in.
///
/// Wire values match the options of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interest {
    /// Appointment booking by the voice agent.
    #[serde(rename = "Termin-Lead")]
    TerminLead,
    /// First- and second-level support.
    #[serde(rename = "L1/L2")]
    L1L2,
    /// Reminder calls.
    #[serde(rename = "Reminder")]
    Reminder,
    /// Out-of-office call handling.
    #[serde(rename = "After-Hours")]
    AfterHours,
}

impl Interest {
    /// Every interest, in form order.
    pub const ALL: [Self; 4] = [
        Self::TerminLead,
        Self::L1L2,
        Self::Reminder,
        Self::AfterHours,
    ];

    /// The wire value of this interest.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TerminLead => "Termin-Lead",
            Self::L1L2 => "L1/L2",
            Self::Reminder => "Reminder",
            Self::AfterHours => "After-Hours",
        }
    }

    /// All accepted wire values.
    #[must_use]
    pub fn allowed_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|i| i.as_str()).collect()
    }
}

impl std::fmt::Display for Interest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Interest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| format!("invalid interest: {s}"))
    }
}

/// Sales pipeline status of a lead.
///
/// New leads are always stored as [`LeadStatus::New`]. The other values are
/// set outside this service (manual edits in the store); no transition rules
/// are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Won,
    Lost,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Contacted => write!(f, "contacted"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            _ => Err(format!("invalid lead status: {s}")),
        }
    }
}
