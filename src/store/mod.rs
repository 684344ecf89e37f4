//! Read-only data access for the inputs of navigation resolution.
//!
//! The tables belong to the dashboard backend (see `sql/schema.sql`). Every
//! query is scoped by organization. Callers treat a failed read as "not
//! loaded" and resolve with defaults, so errors are returned as-is rather than
//! mapped to HTTP responses here.

use crate::navigation::{OnboardingProgressSummary, Role, SidebarLayoutConfig, SimulatedUser};
use sqlx::{types::Json, PgPool, Row};
use std::collections::BTreeSet;
use tracing::{debug, info_span, instrument, Instrument};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct LayoutStore {
    pool: PgPool,
}

impl LayoutStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Saved sidebar layout for the organization, if one was ever saved.
    ///
    /// # Errors
    /// Returns an error if the query fails or the stored JSON does not decode.
    #[instrument(skip(self))]
    pub async fn layout_config(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<SidebarLayoutConfig>, sqlx::Error> {
        let row = sqlx::query(
            r"
            SELECT config
            FROM sidebar_layouts
            WHERE organization_id = $1
            ",
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .instrument(select_span("sidebar_layouts"))
        .await?;

        row.map(|row| {
            row.try_get::<Json<SidebarLayoutConfig>, _>("config")
                .map(|config| config.0)
        })
        .transpose()
    }

    /// Active, unexpired announcements the user has not read.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    #[instrument(skip(self))]
    pub async fn unread_announcement_count(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<u32, sqlx::Error> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*)::BIGINT AS unread
            FROM announcements a
            WHERE a.organization_id = $1
              AND a.is_active
              AND (a.expires_at IS NULL OR a.expires_at > now())
              AND NOT EXISTS (
                  SELECT 1
                  FROM announcement_reads r
                  WHERE r.announcement_id = a.id AND r.user_id = $2
              )
            ",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .instrument(select_span("announcements"))
        .await?;

        Ok(clamp_count(row.try_get("unread")?))
    }

    /// Checklist progress, or `None` when the organization has no active
    /// onboarding tasks.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    #[instrument(skip(self))]
    pub async fn onboarding_progress(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OnboardingProgressSummary>, sqlx::Error> {
        let row = sqlx::query(
            r"
            SELECT COUNT(t.id)::BIGINT AS total,
                   COUNT(c.task_id)::BIGINT AS completed
            FROM onboarding_tasks t
            LEFT JOIN onboarding_task_completions c
                   ON c.task_id = t.id AND c.user_id = $2
            WHERE t.organization_id = $1 AND t.is_active
            ",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .instrument(select_span("onboarding_tasks"))
        .await?;

        Ok(progress_from_counts(
            row.try_get("completed")?,
            row.try_get("total")?,
        ))
    }

    /// Active team member of the organization with their roles, used as the
    /// target of a "View As user" preview.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    #[instrument(skip(self))]
    pub async fn team_member(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SimulatedUser>, sqlx::Error> {
        let row = sqlx::query(
            r"
            SELECT p.display_name,
                   COALESCE(
                       array_agg(r.role) FILTER (WHERE r.role IS NOT NULL),
                       '{}'
                   ) AS roles
            FROM employee_profiles p
            LEFT JOIN user_roles r
                   ON r.user_id = p.user_id AND r.organization_id = p.organization_id
            WHERE p.organization_id = $1 AND p.user_id = $2 AND p.is_active
            GROUP BY p.display_name
            ",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .instrument(select_span("employee_profiles"))
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let roles: Vec<String> = row.try_get("roles")?;

        Ok(Some(SimulatedUser {
            user_id,
            display_name: row.try_get("display_name")?,
            roles: parse_roles(roles.as_slice()),
        }))
    }
}

fn select_span(table: &'static str) -> tracing::Span {
    info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.sql.table = table
    )
}

/// Parses stored role names, skipping names this build does not know.
pub(crate) fn parse_roles<S: AsRef<str>>(names: &[S]) -> BTreeSet<Role> {
    names
        .iter()
        .filter_map(|name| {
            let role = Role::parse(name.as_ref());
            if role.is_none() {
                debug!("Ignoring unknown role: {}", name.as_ref());
            }
            role
        })
        .collect()
}

fn clamp_count(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

fn progress_from_counts(completed: i64, total: i64) -> Option<OnboardingProgressSummary> {
    let total = clamp_count(total);
    if total == 0 {
        return None;
    }
    Some(OnboardingProgressSummary::from_counts(
        clamp_count(completed),
        total,
    ))
}
