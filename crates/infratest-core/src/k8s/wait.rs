//! Resource getters and wait-until-ready helpers built on the retry engine.

use serde::de::DeserializeOwned;

use super::client::{KubeClient, KubeError};
use super::resources::{Deployment, PersistentVolume, PersistentVolumeClaim, Pod};
use crate::retry::{do_with_retry, Outcome, RetryError, RetryLog, RetryPolicy};
use crate::status::{
    self, PersistentVolumeClaimPhase, PersistentVolumePhase, StatusError,
};

fn get_resource<T: DeserializeOwned>(
    client: &dyn KubeClient,
    kind: &str,
    name: &str,
    namespaced: bool,
) -> Result<T, KubeError> {
    let json = client.get_json(kind, name, namespaced)?;
    serde_json::from_str(&json).map_err(|source| KubeError::Parse {
        kind: kind.to_string(),
        source,
    })
}

pub fn get_persistent_volume(
    client: &dyn KubeClient,
    name: &str,
) -> Result<PersistentVolume, KubeError> {
    get_resource(client, "persistentvolume", name, false)
}

pub fn get_persistent_volume_claim(
    client: &dyn KubeClient,
    name: &str,
) -> Result<PersistentVolumeClaim, KubeError> {
    get_resource(client, "persistentvolumeclaim", name, true)
}

pub fn get_pod(client: &dyn KubeClient, name: &str) -> Result<Pod, KubeError> {
    get_resource(client, "pod", name, true)
}

pub fn get_deployment(client: &dyn KubeClient, name: &str) -> Result<Deployment, KubeError> {
    get_resource(client, "deployment", name, true)
}

/// One poll: fetch, then classify. Lookup failures are retriable (the
/// resource may not exist yet) unless kubectl itself can't be run.
fn poll<T>(
    fetched: Result<T, KubeError>,
    classify: impl FnOnce(&T) -> Outcome<(), StatusError>,
) -> Outcome<(), KubeError> {
    match fetched {
        Ok(resource) => classify(&resource).map_err(KubeError::from),
        Err(e) if e.is_command_missing() => Outcome::Fatal(e),
        Err(e) => Outcome::Retriable(e),
    }
}

fn wait_for<F>(
    description: &str,
    done_message: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
    action: F,
) -> Result<(), RetryError<KubeError>>
where
    F: FnMut() -> Outcome<(), KubeError>,
{
    match do_with_retry(description, policy, log, action) {
        Ok(()) => {
            tracing::info!("{}", done_message);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Timeout waiting for {}: {}", description, e);
            Err(e)
        }
    }
}

pub fn wait_until_persistent_volume_available(
    client: &dyn KubeClient,
    name: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<(), RetryError<KubeError>> {
    wait_until_persistent_volume_in_status(
        client,
        name,
        PersistentVolumePhase::Available,
        policy,
        log,
    )
}

pub fn wait_until_persistent_volume_in_status(
    client: &dyn KubeClient,
    name: &str,
    want: PersistentVolumePhase,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<(), RetryError<KubeError>> {
    let description = format!("Wait for Persistent Volume {} to be {}", name, want);
    let done = format!("Persistent Volume {} is now {}", name, want);
    wait_for(&description, &done, policy, log, || {
        poll(get_persistent_volume(client, name), |pv| {
            status::persistent_volume_outcome(pv, want)
        })
    })
}

pub fn wait_until_persistent_volume_claim_in_status(
    client: &dyn KubeClient,
    name: &str,
    want: PersistentVolumeClaimPhase,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<(), RetryError<KubeError>> {
    let description = format!("Wait for Persistent Volume Claim {} to be {}", name, want);
    let done = format!("Persistent Volume Claim {} is now {}", name, want);
    wait_for(&description, &done, policy, log, || {
        poll(get_persistent_volume_claim(client, name), |pvc| {
            status::persistent_volume_claim_outcome(pvc, want)
        })
    })
}

pub fn wait_until_pod_available(
    client: &dyn KubeClient,
    name: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<(), RetryError<KubeError>> {
    let description = format!("Wait for pod {} to be provisioned", name);
    let done = format!("Pod {} is now available", name);
    wait_for(&description, &done, policy, log, || {
        poll(get_pod(client, name), status::pod_outcome)
    })
}

pub fn wait_until_deployment_available(
    client: &dyn KubeClient,
    name: &str,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<(), RetryError<KubeError>> {
    let description = format!("Wait for deployment {} to be provisioned", name);
    let done = format!("Deployment {} is now available", name);
    wait_for(&description, &done, policy, log, || {
        poll(get_deployment(client, name), status::deployment_outcome)
    })
}
