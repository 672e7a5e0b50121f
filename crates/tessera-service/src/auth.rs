//! Caller authorization for project access

use async_trait::async_trait;
use tessera_core::{Error, Project, Result};

/// Decides whether a caller may read a project.
///
/// Hosts plug their own identity system in here; the façade consults it
/// after resolving the project and before fetching any graph data.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, caller: Option<&str>, project: &Project) -> Result<()>;
}

/// Projects with an owner are readable by that owner only; unowned projects by anyone
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerAuthorizer;

#[async_trait]
impl Authorizer for OwnerAuthorizer {
    async fn authorize(&self, caller: Option<&str>, project: &Project) -> Result<()> {
        match (&project.owner, caller) {
            (None, _) => Ok(()),
            (Some(owner), Some(caller)) if owner == caller => Ok(()),
            _ => {
                tracing::debug!("Caller {:?} denied access to project {}", caller, project.name);
                Err(Error::PermissionDenied(project.name.clone()))
            }
        }
    }
}

/// Grants every request
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Authorizer for AllowAll {
    async fn authorize(&self, _caller: Option<&str>, _project: &Project) -> Result<()> {
        Ok(())
    }
}
