//! Kubernetes collaborators: kubectl-backed getters and wait helpers.

mod client;
mod resources;
mod wait;

pub use client::{KubeClient, KubeError, Kubectl, KubectlOptions};
pub use resources::{
    ContainerStatus, Deployment, DeploymentCondition, DeploymentStatus, ObjectMeta,
    PersistentVolume, PersistentVolumeClaim, PersistentVolumeClaimStatus, PersistentVolumeStatus,
    Pod, PodStatus,
};
pub use wait::{
    get_deployment, get_persistent_volume, get_persistent_volume_claim, get_pod,
    wait_until_deployment_available, wait_until_persistent_volume_available,
    wait_until_persistent_volume_claim_in_status, wait_until_persistent_volume_in_status,
    wait_until_pod_available,
};
