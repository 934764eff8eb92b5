//! Hub dispatch policies
//!
//! Both overflow behaviours and the re-registration behaviour are explicit
//! configuration rather than hard-coded per dispatch path.

use std::fmt;
use std::str::FromStr;

/// What a dispatch does when a session's outbound queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the payload for that session; the session stays registered
    Drop,
    /// Treat the session as dead: close its queue and remove it
    Evict,
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "evict" => Ok(Self::Evict),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drop => f.write_str("drop"),
            Self::Evict => f.write_str("evict"),
        }
    }
}

/// What `Register` does with a session already indexed under the same user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupersedePolicy {
    /// Overwrite the index entry only; the prior session stays a member
    Retain,
    /// Overwrite the index entry and evict the prior session
    Close,
}

/// Hub coordinator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    pub broadcast_overflow: OverflowPolicy,
    pub targeted_overflow: OverflowPolicy,
    pub supersede: SupersedePolicy,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            broadcast_overflow: OverflowPolicy::Evict,
            targeted_overflow: OverflowPolicy::Drop,
            supersede: SupersedePolicy::Retain,
        }
    }
}

impl HubConfig {
    pub fn with_broadcast_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.broadcast_overflow = policy;
        self
    }

    pub fn with_targeted_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.targeted_overflow = policy;
        self
    }

    pub fn with_supersede(mut self, policy: SupersedePolicy) -> Self {
        self.supersede = policy;
        self
    }
}
