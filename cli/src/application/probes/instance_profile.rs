//! IAM instance profile attached to the instance.

use anyhow::Result;

use crate::application::ports::MetadataClient;
use crate::domain::{HostSnapshot, ProbeVerdict};

/// # Errors
///
/// Returns an error if the metadata endpoint stops answering after the host
/// was detected as EC2.
pub async fn check(
    metadata: &impl MetadataClient,
    host: &HostSnapshot,
    role_name: &str,
) -> Result<ProbeVerdict> {
    if !host.is_ec2 {
        return Ok(ProbeVerdict::fail(
            "Unable to connect to EC2 instance metadata, failure is expected on-prem",
        ));
    }
    let path = format!("iam/security-credentials/{role_name}");
    if metadata.get(&path).await? {
        Ok(ProbeVerdict::pass())
    } else {
        Ok(ProbeVerdict::fail(format!(
            "Instance profile \"{role_name}\" not found"
        )))
    }
}
