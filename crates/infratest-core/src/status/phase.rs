//! Lifecycle phases reported by Kubernetes for volumes, claims and pods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistentVolumePhase {
    Pending,
    Available,
    Bound,
    Released,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistentVolumeClaimPhase {
    Pending,
    Bound,
    Lost,
}

/// Phases newer than this list deserialize as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

/// Error parsing a phase name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} phase '{value}'")]
pub struct ParsePhaseError {
    pub kind: &'static str,
    pub value: String,
}

impl PersistentVolumePhase {
    /// The volume cannot recover from this phase on its own.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, PersistentVolumePhase::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersistentVolumePhase::Pending => "Pending",
            PersistentVolumePhase::Available => "Available",
            PersistentVolumePhase::Bound => "Bound",
            PersistentVolumePhase::Released => "Released",
            PersistentVolumePhase::Failed => "Failed",
        }
    }
}

impl PersistentVolumeClaimPhase {
    /// The claim lost its volume; it will not bind again.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, PersistentVolumeClaimPhase::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersistentVolumeClaimPhase::Pending => "Pending",
            PersistentVolumeClaimPhase::Bound => "Bound",
            PersistentVolumeClaimPhase::Lost => "Lost",
        }
    }
}

impl PodPhase {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, PodPhase::Failed)
    }

    /// All containers have exited; the pod will never run again.
    pub fn is_terminated(&self) -> bool {
        matches!(self, PodPhase::Succeeded | PodPhase::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
        }
    }
}

impl From<String> for PodPhase {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(PodPhase::Unknown)
    }
}

macro_rules! phase_str_impls {
    ($ty:ty, $kind:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParsePhaseError;

            /// Case-insensitive, so CLI users can type `available`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok(<$ty>::$variant);
                    }
                )+
                Err(ParsePhaseError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

phase_str_impls!(
    PersistentVolumePhase,
    "persistent volume",
    [Pending, Available, Bound, Released, Failed]
);
phase_str_impls!(
    PersistentVolumeClaimPhase,
    "persistent volume claim",
    [Pending, Bound, Lost]
);
phase_str_impls!(PodPhase, "pod", [Pending, Running, Succeeded, Failed, Unknown]);
