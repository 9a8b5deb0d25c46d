//! Status predicates and their translation into retry outcomes.
//!
//! The predicates answer "is it there yet?". The `*_outcome` functions add
//! the second question the engine needs: if not, can it still get there?

use crate::k8s::{Deployment, PersistentVolume, PersistentVolumeClaim, Pod};
use crate::retry::Outcome;

use super::error::StatusError;
use super::phase::{PersistentVolumeClaimPhase, PersistentVolumePhase, PodPhase};

const NO_PHASE: &str = "<none>";

pub fn is_persistent_volume_available(pv: Option<&PersistentVolume>) -> bool {
    is_persistent_volume_in_status(pv, Some(PersistentVolumePhase::Available))
}

/// False when either the volume or the wanted phase is missing.
pub fn is_persistent_volume_in_status(
    pv: Option<&PersistentVolume>,
    want: Option<PersistentVolumePhase>,
) -> bool {
    match (pv, want) {
        (Some(pv), Some(want)) => pv.status.phase == Some(want),
        _ => false,
    }
}

/// False when either the claim or the wanted phase is missing.
pub fn is_persistent_volume_claim_in_status(
    pvc: Option<&PersistentVolumeClaim>,
    want: Option<PersistentVolumeClaimPhase>,
) -> bool {
    match (pvc, want) {
        (Some(pvc), Some(want)) => pvc.status.phase == Some(want),
        _ => false,
    }
}

/// Running, with every container reporting ready.
pub fn is_pod_available(pod: Option<&Pod>) -> bool {
    let Some(pod) = pod else {
        return false;
    };
    pod.status.phase == Some(PodPhase::Running)
        && pod.status.container_statuses.iter().all(|c| c.ready)
}

/// The `Progressing` condition reports a completed rollout.
pub fn is_deployment_available(deployment: Option<&Deployment>) -> bool {
    deployment
        .and_then(Deployment::progressing_condition)
        .map(|c| c.status == "True" && c.reason == "NewReplicaSetAvailable")
        .unwrap_or(false)
}

pub fn persistent_volume_outcome(
    pv: &PersistentVolume,
    want: PersistentVolumePhase,
) -> Outcome<(), StatusError> {
    let have = pv.status.phase;
    if have == Some(want) {
        return Outcome::Success(());
    }
    let name = pv.metadata.name.clone();
    match have {
        Some(phase) if phase.is_terminal_failure() => Outcome::Fatal(StatusError::ResourceFailed {
            kind: "PersistentVolume",
            name,
            phase: phase.to_string(),
        }),
        _ if want == PersistentVolumePhase::Available => {
            Outcome::Retriable(StatusError::PersistentVolumeNotAvailable { name })
        }
        _ => Outcome::Retriable(StatusError::PersistentVolumeNotInStatus {
            name,
            want: want.to_string(),
            have: have.map(|p| p.to_string()).unwrap_or_else(|| NO_PHASE.to_string()),
        }),
    }
}

pub fn persistent_volume_claim_outcome(
    pvc: &PersistentVolumeClaim,
    want: PersistentVolumeClaimPhase,
) -> Outcome<(), StatusError> {
    let have = pvc.status.phase;
    if have == Some(want) {
        return Outcome::Success(());
    }
    let name = pvc.metadata.name.clone();
    match have {
        Some(phase) if phase.is_terminal_failure() => Outcome::Fatal(StatusError::ResourceFailed {
            kind: "PersistentVolumeClaim",
            name,
            phase: phase.to_string(),
        }),
        _ => Outcome::Retriable(StatusError::PersistentVolumeClaimNotInStatus {
            name,
            want: want.to_string(),
            have: have.map(|p| p.to_string()).unwrap_or_else(|| NO_PHASE.to_string()),
        }),
    }
}

/// A pod that has terminated will never become available.
pub fn pod_outcome(pod: &Pod) -> Outcome<(), StatusError> {
    if is_pod_available(Some(pod)) {
        return Outcome::Success(());
    }
    match pod.status.phase {
        Some(phase) if phase.is_terminated() => Outcome::Fatal(StatusError::ResourceFailed {
            kind: "Pod",
            name: pod.metadata.name.clone(),
            phase: phase.to_string(),
        }),
        _ => Outcome::Retriable(StatusError::pod_not_available(pod)),
    }
}

/// `ProgressDeadlineExceeded` means the controller gave up on the rollout.
pub fn deployment_outcome(deployment: &Deployment) -> Outcome<(), StatusError> {
    if is_deployment_available(Some(deployment)) {
        return Outcome::Success(());
    }
    let err = StatusError::deployment_not_available(deployment);
    match deployment.progressing_condition() {
        Some(c) if c.reason == "ProgressDeadlineExceeded" => Outcome::Fatal(err),
        _ => Outcome::Retriable(err),
    }
}
