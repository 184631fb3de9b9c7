//! Parent existence checks performed before a child row is created
//!
//! Checks run sequentially, organization first, and stop at the first missing
//! parent. The lookup is a trait so the rules can be exercised without a store.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::db::{DbPool, OrganizationRepository, ProjectRepository};
use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Organization,
    Project,
}

impl ParentKind {
    pub fn missing_message(&self) -> &'static str {
        match self {
            ParentKind::Organization => "Organization not found",
            ParentKind::Project => "Project not found",
        }
    }
}

/// Outcome of a pre-create check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentCheck {
    Ok,
    Missing(ParentKind),
}

impl ParentCheck {
    /// Turn a missing parent into the not-found error returned to the caller
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            ParentCheck::Ok => Ok(()),
            ParentCheck::Missing(kind) => Err(AppError::not_found(kind.missing_message())),
        }
    }
}

#[async_trait]
pub trait ParentLookup: Send + Sync {
    async fn organization_exists(&self, id: Uuid) -> Result<bool>;
    async fn project_exists(&self, id: Uuid) -> Result<bool>;
}

/// A project needs its organization
pub async fn check_project_parents<L>(lookup: &L, organization: Uuid) -> Result<ParentCheck>
where
    L: ParentLookup + ?Sized,
{
    if !lookup.organization_exists(organization).await? {
        return Ok(ParentCheck::Missing(ParentKind::Organization));
    }
    Ok(ParentCheck::Ok)
}

/// A todo needs both its organization and its project
pub async fn check_todo_parents<L>(
    lookup: &L,
    organization: Uuid,
    project: Uuid,
) -> Result<ParentCheck>
where
    L: ParentLookup + ?Sized,
{
    if !lookup.organization_exists(organization).await? {
        return Ok(ParentCheck::Missing(ParentKind::Organization));
    }
    if !lookup.project_exists(project).await? {
        return Ok(ParentCheck::Missing(ParentKind::Project));
    }
    Ok(ParentCheck::Ok)
}

/// Lookup backed by the repositories
pub struct DbParentLookup<'a> {
    pool: &'a DbPool,
}

impl<'a> DbParentLookup<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<'a> ParentLookup for DbParentLookup<'a> {
    async fn organization_exists(&self, id: Uuid) -> Result<bool> {
        Ok(OrganizationRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .is_some())
    }

    async fn project_exists(&self, id: Uuid) -> Result<bool> {
        Ok(ProjectRepository::new(self.pool)
            .get_by_id(id)
            .await?
            .is_some())
    }
}
