//! Activation heights of the extra-data forks.

use serde::{Deserialize, Serialize};

use super::{ExtraError, ExtraResult};

/// Heights at which the optional forks activate. An absent height means the
/// fork is not scheduled on this chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForkSchedule {
    pub london: Option<u64>,
    pub nikaragva: Option<u64>,
}

impl ForkSchedule {
    /// Nikaragva extends London's fields, so it may not activate first.
    pub fn validate(&self) -> ExtraResult<()> {
        if let (Some(london), Some(nikaragva)) = (self.london, self.nikaragva) {
            if nikaragva < london {
                return Err(ExtraError::InvalidSchedule { london, nikaragva });
            }
        }
        Ok(())
    }
}
