use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

pub const DEFAULT_CLOSING_DAY: u32 = 17;
pub const DEFAULT_DUE_DAY: u32 = 24;

/// billing cycle of the card
///
/// Purchases made before `closing_day` land on the invoice due on `due_day`
/// of the same month; purchases on or after it roll to the next month.
/// Both days are guaranteed to lie in `1..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCycleConfig", into = "RawCycleConfig")]
pub struct CycleConfig {
    closing_day: u32,
    due_day: u32,
}

/// persisted shape of the cycle configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCycleConfig {
    pub closing_day: u32,
    pub due_day: u32,
}

impl CycleConfig {
    /// create validated configuration
    pub fn new(closing_day: u32, due_day: u32) -> Result<Self> {
        validate_day("closing day", closing_day)?;
        validate_day("due day", due_day)?;
        Ok(Self {
            closing_day,
            due_day,
        })
    }

    pub fn closing_day(&self) -> u32 {
        self.closing_day
    }

    pub fn due_day(&self) -> u32 {
        self.due_day
    }

    /// copy with a different closing day
    pub fn with_closing_day(self, closing_day: u32) -> Result<Self> {
        Self::new(closing_day, self.due_day)
    }

    /// copy with a different due day
    pub fn with_due_day(self, due_day: u32) -> Result<Self> {
        Self::new(self.closing_day, due_day)
    }

    /// re-check the day ranges
    pub fn validate(&self) -> Result<()> {
        validate_day("closing day", self.closing_day)?;
        validate_day("due day", self.due_day)
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            closing_day: DEFAULT_CLOSING_DAY,
            due_day: DEFAULT_DUE_DAY,
        }
    }
}

impl TryFrom<RawCycleConfig> for CycleConfig {
    type Error = LedgerError;

    fn try_from(raw: RawCycleConfig) -> Result<Self> {
        CycleConfig::new(raw.closing_day, raw.due_day)
    }
}

impl From<CycleConfig> for RawCycleConfig {
    fn from(cfg: CycleConfig) -> Self {
        RawCycleConfig {
            closing_day: cfg.closing_day,
            due_day: cfg.due_day,
        }
    }
}

fn validate_day(name: &str, day: u32) -> Result<()> {
    if !(1..=31).contains(&day) {
        return Err(LedgerError::InvalidConfiguration {
            message: format!("{} must be between 1 and 31, got {}", name, day),
        });
    }
    Ok(())
}
