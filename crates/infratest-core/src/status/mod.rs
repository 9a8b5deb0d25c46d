//! Status predicates over externally observed resource state.
//!
//! Nothing here fetches or caches state. Callers hand in whatever they just
//! read and get back a boolean or a retry [`Outcome`](crate::retry::Outcome).

mod error;
mod phase;
mod predicate;

pub use error::StatusError;
pub use phase::{ParsePhaseError, PersistentVolumeClaimPhase, PersistentVolumePhase, PodPhase};
pub use predicate::{
    deployment_outcome, is_deployment_available, is_persistent_volume_available,
    is_persistent_volume_claim_in_status, is_persistent_volume_in_status, is_pod_available,
    persistent_volume_claim_outcome, persistent_volume_outcome, pod_outcome,
};
