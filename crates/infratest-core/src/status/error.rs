//! Errors describing why a resource is not (yet) in the desired state.

use crate::k8s::{Deployment, Pod};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("Persistent Volume {name} is not available")]
    PersistentVolumeNotAvailable { name: String },

    #[error("Persistent Volume {name} is not in status {want} (currently {have})")]
    PersistentVolumeNotInStatus {
        name: String,
        want: String,
        have: String,
    },

    #[error("Persistent Volume Claim {name} is not in status {want} (currently {have})")]
    PersistentVolumeClaimNotInStatus {
        name: String,
        want: String,
        have: String,
    },

    #[error("Pod {name} is not available, reason: {reason}, message: {message}")]
    PodNotAvailable {
        name: String,
        reason: String,
        message: String,
    },

    #[error("Deployment {name} is not available, missing 'Progressing' condition")]
    DeploymentMissingProgressing { name: String },

    #[error(
        "Deployment {name} is not available as 'Progressing' condition indicates that the Deployment is not complete, status: {status}, reason: {reason}, message: {message}"
    )]
    DeploymentNotComplete {
        name: String,
        status: String,
        reason: String,
        message: String,
    },

    /// The resource reached a phase it cannot leave by itself.
    #[error("{kind} {name} entered terminal phase {phase}")]
    ResourceFailed {
        kind: &'static str,
        name: String,
        phase: String,
    },
}

impl StatusError {
    pub fn pod_not_available(pod: &Pod) -> Self {
        StatusError::PodNotAvailable {
            name: pod.metadata.name.clone(),
            reason: pod.status.reason.clone(),
            message: pod.status.message.clone(),
        }
    }

    pub fn deployment_not_available(deployment: &Deployment) -> Self {
        let name = deployment.metadata.name.clone();
        match deployment.progressing_condition() {
            None => StatusError::DeploymentMissingProgressing { name },
            Some(c) => StatusError::DeploymentNotComplete {
                name,
                status: c.status.clone(),
                reason: c.reason.clone(),
                message: c.message.clone(),
            },
        }
    }
}
