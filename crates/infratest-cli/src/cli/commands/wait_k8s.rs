//! wait-pv, wait-pvc, wait-pod, wait-deployment commands.

use anyhow::Result;
use infratest_core::k8s::{self, Kubectl, KubectlOptions};
use infratest_core::retry::{RetryPolicy, TracingLog};
use infratest_core::status::{PersistentVolumeClaimPhase, PersistentVolumePhase};

pub fn run_wait_pv(
    opts: &KubectlOptions,
    name: &str,
    phase: PersistentVolumePhase,
    policy: &RetryPolicy,
) -> Result<()> {
    let kubectl = Kubectl::new(opts.clone());
    k8s::wait_until_persistent_volume_in_status(&kubectl, name, phase, policy, &TracingLog)?;
    println!("persistentvolume/{} is {}", name, phase);
    Ok(())
}

pub fn run_wait_pvc(
    opts: &KubectlOptions,
    name: &str,
    phase: PersistentVolumeClaimPhase,
    policy: &RetryPolicy,
) -> Result<()> {
    let kubectl = Kubectl::new(opts.clone());
    k8s::wait_until_persistent_volume_claim_in_status(&kubectl, name, phase, policy, &TracingLog)?;
    println!("persistentvolumeclaim/{} is {}", name, phase);
    Ok(())
}

pub fn run_wait_pod(opts: &KubectlOptions, name: &str, policy: &RetryPolicy) -> Result<()> {
    let kubectl = Kubectl::new(opts.clone());
    k8s::wait_until_pod_available(&kubectl, name, policy, &TracingLog)?;
    println!("pod/{} is available", name);
    Ok(())
}

pub fn run_wait_deployment(opts: &KubectlOptions, name: &str, policy: &RetryPolicy) -> Result<()> {
    let kubectl = Kubectl::new(opts.clone());
    k8s::wait_until_deployment_available(&kubectl, name, policy, &TracingLog)?;
    println!("deployment/{} is available", name);
    Ok(())
}
