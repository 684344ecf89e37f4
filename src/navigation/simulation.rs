//! Actual vs. simulated viewer state for the "View As" preview.
//!
//! A [`ViewerSession`] is built from the grants the auth service issued and
//! lives for one request. Simulation only changes what is computed as
//! visible; it never changes what the backend authorizes.

use super::roles::{Permission, PlatformRole, Role, RolePermissionMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;
use uuid::Uuid;

/// Ground-truth grants for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerGrants {
    pub actual_roles: BTreeSet<Role>,
    pub actual_permissions: BTreeSet<Permission>,
    pub platform_roles: BTreeSet<PlatformRole>,
    pub is_platform_user: bool,
}

/// Another team member whose roles are previewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SimulatedUser {
    pub user_id: Uuid,
    pub display_name: String,
    pub roles: BTreeSet<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewAs {
    #[default]
    Actual,
    Role(Role),
    User(SimulatedUser),
}

#[derive(Debug, Clone)]
pub struct ViewerSession {
    grants: ViewerGrants,
    view_as: ViewAs,
}

impl ViewerSession {
    #[must_use]
    pub fn new(grants: ViewerGrants) -> Self {
        Self {
            grants,
            view_as: ViewAs::Actual,
        }
    }

    #[must_use]
    pub fn grants(&self) -> &ViewerGrants {
        &self.grants
    }

    #[must_use]
    pub fn view_as(&self) -> &ViewAs {
        &self.view_as
    }

    /// Preview the default permission set of `role`. Replaces any user preview.
    pub fn set_view_as_role(&mut self, role: Role) {
        self.view_as = ViewAs::Role(role);
    }

    /// Preview the roles of another team member. Replaces any role preview.
    pub fn set_view_as_user(&mut self, user: SimulatedUser) {
        self.view_as = ViewAs::User(user);
    }

    /// Return to the signed-in user's own grants.
    pub fn clear_view_as(&mut self) {
        self.view_as = ViewAs::Actual;
    }

    #[must_use]
    pub fn is_viewing_as_role(&self) -> bool {
        matches!(self.view_as, ViewAs::Role(_))
    }

    #[must_use]
    pub fn is_viewing_as_user(&self) -> bool {
        matches!(self.view_as, ViewAs::User(_))
    }

    #[must_use]
    pub fn effective_roles(&self) -> BTreeSet<Role> {
        match &self.view_as {
            ViewAs::Actual => self.grants.actual_roles.clone(),
            ViewAs::Role(role) => BTreeSet::from([*role]),
            ViewAs::User(user) => user.roles.clone(),
        }
    }

    #[must_use]
    pub fn effective_permissions(&self, map: &RolePermissionMap) -> BTreeSet<Permission> {
        derive_effective_permissions(self, map)
    }

    /// Platform checks always use the actual platform roles, even while a
    /// preview is active. Only platform users pass.
    #[must_use]
    pub fn has_platform_role_or_higher(&self, required: PlatformRole) -> bool {
        self.grants.is_platform_user
            && self
                .grants
                .platform_roles
                .iter()
                .max()
                .is_some_and(|highest| highest.satisfies(required))
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.effective_roles().contains(&Role::SuperAdmin)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.effective_roles()
            .iter()
            .any(|role| role.is_admin_tier())
    }

    /// Leadership roles coach the team and see the manager section.
    #[must_use]
    pub fn is_coach(&self) -> bool {
        self.effective_roles()
            .iter()
            .any(|role| role.is_leadership())
    }

    /// Whether the signed-in user may start a preview at all.
    #[must_use]
    pub fn can_view_as(&self) -> bool {
        self.grants.actual_roles.contains(&Role::SuperAdmin)
            || self.grants.actual_permissions.contains(&Permission::ViewAs)
    }
}

/// Permission set used for visibility decisions.
///
/// A user preview recomputes from the default map for each of the simulated
/// user's roles; it does not read what that user is actually granted.
#[must_use]
pub fn derive_effective_permissions(
    session: &ViewerSession,
    map: &RolePermissionMap,
) -> BTreeSet<Permission> {
    match &session.view_as {
        ViewAs::User(user) => user
            .roles
            .iter()
            .flat_map(|role| map.permissions_for(*role))
            .collect(),
        ViewAs::Role(role) => map.permissions_for(*role),
        ViewAs::Actual => session.grants.actual_permissions.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stylist_grants() -> ViewerGrants {
        ViewerGrants {
            actual_roles: BTreeSet::from([Role::Stylist]),
            actual_permissions: BTreeSet::from([
                Permission::ViewCommandCenter,
                Permission::ViewClients,
            ]),
            ..ViewerGrants::default()
        }
    }

    #[test]
    fn actual_permissions_are_used_verbatim() {
        let session = ViewerSession::new(stylist_grants());
        let effective = session.effective_permissions(&RolePermissionMap::default());
        assert_eq!(effective, stylist_grants().actual_permissions);
    }

    #[test]
    fn role_preview_uses_the_default_map() {
        let map = RolePermissionMap::default();
        let mut session = ViewerSession::new(stylist_grants());
        session.set_view_as_role(Role::Manager);

        assert!(session.is_viewing_as_role());
        assert_eq!(session.effective_roles(), BTreeSet::from([Role::Manager]));
        assert_eq!(
            session.effective_permissions(&map),
            map.permissions_for(Role::Manager)
        );
    }

    #[test]
    fn role_preview_without_mapping_fails_closed() {
        let mut session = ViewerSession::new(stylist_grants());
        session.set_view_as_role(Role::Bookkeeper);
        assert!(session
            .effective_permissions(&RolePermissionMap::default())
            .is_empty());

        session.set_view_as_role(Role::Admin);
        assert!(session
            .effective_permissions(&RolePermissionMap::empty())
            .is_empty());
    }

    #[test]
    fn user_preview_unions_role_defaults() {
        let map = RolePermissionMap::default();
        let mut session = ViewerSession::new(stylist_grants());
        session.set_view_as_user(SimulatedUser {
            user_id: Uuid::nil(),
            display_name: "Robin".to_string(),
            roles: BTreeSet::from([Role::Receptionist, Role::StylistAssistant]),
        });

        let mut expected = map.permissions_for(Role::Receptionist);
        expected.extend(map.permissions_for(Role::StylistAssistant));

        assert!(session.is_viewing_as_user());
        assert_eq!(session.effective_permissions(&map), expected);
    }

    #[test]
    fn modes_are_mutually_exclusive() {
        let mut session = ViewerSession::new(stylist_grants());
        session.set_view_as_role(Role::Admin);
        session.set_view_as_user(SimulatedUser {
            user_id: Uuid::nil(),
            display_name: "Robin".to_string(),
            roles: BTreeSet::from([Role::Receptionist]),
        });
        assert!(session.is_viewing_as_user());
        assert!(!session.is_viewing_as_role());

        session.set_view_as_role(Role::Admin);
        assert!(session.is_viewing_as_role());
        assert!(!session.is_viewing_as_user());
    }

    #[test]
    fn clear_view_as_restores_ground_truth() {
        let map = RolePermissionMap::default();
        let mut session = ViewerSession::new(stylist_grants());
        let before = session.effective_permissions(&map);
        let roles_before = session.effective_roles();

        session.set_view_as_role(Role::SuperAdmin);
        assert_ne!(session.effective_permissions(&map), before);

        session.clear_view_as();
        assert_eq!(session.view_as(), &ViewAs::Actual);
        assert_eq!(session.effective_permissions(&map), before);
        assert_eq!(session.effective_roles(), roles_before);
    }

    #[test]
    fn platform_checks_use_actual_roles() {
        let owner = ViewerSession::new(ViewerGrants {
            platform_roles: BTreeSet::from([PlatformRole::PlatformOwner]),
            is_platform_user: true,
            ..ViewerGrants::default()
        });
        assert!(owner.has_platform_role_or_higher(PlatformRole::PlatformAdmin));

        let mut support = ViewerSession::new(ViewerGrants {
            platform_roles: BTreeSet::from([PlatformRole::PlatformSupport]),
            is_platform_user: true,
            ..ViewerGrants::default()
        });
        assert!(!support.has_platform_role_or_higher(PlatformRole::PlatformAdmin));

        support.set_view_as_role(Role::SuperAdmin);
        assert!(!support.has_platform_role_or_higher(PlatformRole::PlatformAdmin));

        let nobody = ViewerSession::new(ViewerGrants::default());
        assert!(!nobody.has_platform_role_or_higher(PlatformRole::PlatformDeveloper));

        let outsider = ViewerSession::new(ViewerGrants {
            platform_roles: BTreeSet::from([PlatformRole::PlatformOwner]),
            is_platform_user: false,
            ..ViewerGrants::default()
        });
        assert!(!outsider.has_platform_role_or_higher(PlatformRole::PlatformDeveloper));
    }

    #[test]
    fn coach_and_admin_follow_effective_roles() {
        let mut session = ViewerSession::new(stylist_grants());
        assert!(!session.is_coach());
        assert!(!session.is_admin());

        session.set_view_as_role(Role::Manager);
        assert!(session.is_coach());
        assert!(!session.is_admin());

        session.set_view_as_role(Role::SuperAdmin);
        assert!(session.is_admin());
        assert!(session.is_super_admin());
    }

    #[test]
    fn view_as_requires_permission_or_super_admin() {
        assert!(!ViewerSession::new(stylist_grants()).can_view_as());

        let admin = ViewerSession::new(ViewerGrants {
            actual_roles: BTreeSet::from([Role::Admin]),
            actual_permissions: BTreeSet::from([Permission::ViewAs]),
            ..ViewerGrants::default()
        });
        assert!(admin.can_view_as());

        let super_admin = ViewerSession::new(ViewerGrants {
            actual_roles: BTreeSet::from([Role::SuperAdmin]),
            ..ViewerGrants::default()
        });
        assert!(super_admin.can_view_as());
    }
}
