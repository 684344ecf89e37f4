//! Resolves the sidebar a viewer sees.
//!
//! Inputs are the static catalog, the organization's layout configuration,
//! the viewer session (with any "View As" preview) and a few counters. The
//! result is an ordered list of entries ready to render. Resolution is total:
//! absent inputs fall back to defaults and unresolvable references are
//! omitted.
//!
//! The output is a visibility projection. It never grants access to anything;
//! the pages behind these links re-check real permissions on their own.

use super::{
    catalog::{self, BuiltInSection, NavItem, ANNOUNCEMENTS_HREF, ASSISTANT_SCHEDULE_HREF,
        DASHBOARD_HREF, ONBOARDING_HREF},
    labels::{display_label, start_here_label, Locale},
    layout::{any_role_has_overrides, apply_order, management_group, SectionRef, SidebarLayoutConfig},
    roles::{Permission, Role, RolePermissionMap},
    simulation::ViewerSession,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};
use utoipa::ToSchema;

/// Progress through the onboarding checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OnboardingProgressSummary {
    pub completed_count: u32,
    pub total_count: u32,
    pub percentage: u8,
}

impl OnboardingProgressSummary {
    #[must_use]
    pub fn from_counts(completed_count: u32, total_count: u32) -> Self {
        let percentage = if total_count == 0 {
            100
        } else {
            let completed = u64::from(completed_count.min(total_count));
            let total = u64::from(total_count);
            u8::try_from((completed * 100 + total / 2) / total).unwrap_or(100)
        };
        Self {
            completed_count,
            total_count,
            percentage,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_count >= self.total_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResolvedItem {
    pub href: String,
    pub label: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    /// Management sub-group, for items of the manager section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEntry {
    /// Onboarding shortcut shown ahead of every section.
    StartHere {
        href: String,
        label: String,
        percentage: u8,
    },
    Section {
        id: String,
        label: String,
        custom: bool,
        items: Vec<ResolvedItem>,
    },
}

impl NavEntry {
    #[must_use]
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::Section { id, .. } => Some(id),
            Self::StartHere { .. } => None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ResolvedItem] {
        match self {
            Self::Section { items, .. } => items,
            Self::StartHere { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavigationModel {
    pub entries: Vec<NavEntry>,
}

impl NavigationModel {
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&NavEntry> {
        self.entries
            .iter()
            .find(|entry| entry.section_id() == Some(id))
    }

    #[must_use]
    pub fn section_ids(&self) -> Vec<&str> {
        self.entries.iter().filter_map(NavEntry::section_id).collect()
    }

    #[must_use]
    pub fn hrefs(&self, section: &str) -> Vec<&str> {
        self.section(section)
            .map(|entry| entry.items().iter().map(|item| item.href.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ResolveInput<'a> {
    pub session: &'a ViewerSession,
    pub role_permissions: &'a RolePermissionMap,
    /// `None` while the organization's layout is loading or was never saved.
    pub layout: Option<&'a SidebarLayoutConfig>,
    /// `None` while progress is loading; no shortcut is shown then.
    pub onboarding: Option<OnboardingProgressSummary>,
    pub unread_announcements: u32,
    pub locale: Locale,
}

/// Facts about the viewer computed once per resolution.
struct Viewer<'a> {
    session: &'a ViewerSession,
    roles: BTreeSet<Role>,
    permissions: BTreeSet<Permission>,
    is_super_admin: bool,
    is_admin: bool,
    is_coach: bool,
    is_leadership: bool,
}

impl Viewer<'_> {
    fn permits(&self, item: &NavItem) -> bool {
        if !item.platform_roles.is_empty() {
            return item
                .platform_roles
                .iter()
                .any(|required| self.session.has_platform_role_or_higher(*required));
        }
        match item.permission {
            Some(permission) => self.permissions.contains(&permission),
            None => item.roles.is_empty() || item.roles.iter().any(|role| self.roles.contains(role)),
        }
    }
}

#[must_use]
#[instrument(skip_all, fields(view_as_role = input.session.is_viewing_as_role(), view_as_user = input.session.is_viewing_as_user()))]
pub fn resolve(input: &ResolveInput<'_>) -> NavigationModel {
    let default_layout = SidebarLayoutConfig::default();
    let layout = input.layout.unwrap_or(&default_layout);

    let roles = input.session.effective_roles();
    let viewer = Viewer {
        session: input.session,
        permissions: input.session.effective_permissions(input.role_permissions),
        is_super_admin: roles.contains(&Role::SuperAdmin),
        is_admin: roles.iter().any(|role| role.is_admin_tier()),
        is_coach: input.session.is_coach(),
        is_leadership: roles.iter().any(|role| role.is_leadership()),
        roles,
    };

    let configured = any_role_has_overrides(layout, &viewer.roles);
    let hidden_sections = layout.hidden_sections_for(&viewer.roles);
    let onboarding_incomplete = input
        .onboarding
        .as_ref()
        .is_some_and(|progress| !progress.is_complete());

    let mut entries = Vec::new();

    if onboarding_incomplete && !viewer.is_super_admin {
        entries.push(NavEntry::StartHere {
            href: ONBOARDING_HREF.to_string(),
            label: start_here_label(input.locale).to_string(),
            percentage: input.onboarding.map_or(0, |progress| progress.percentage),
        });
    }

    for section in layout.resolved_section_order() {
        let id = section.id();
        if hidden_sections.contains(id) {
            continue;
        }
        // The platform area has its own layout.
        if section == SectionRef::BuiltIn(BuiltInSection::Platform) {
            continue;
        }

        let ordered = section_items(layout, &section);
        let permitted: Vec<&'static NavItem> = ordered
            .iter()
            .copied()
            .filter(|item| viewer.permits(item))
            .collect();

        let visible: Vec<&'static NavItem> = if configured {
            let hidden = layout.role_hidden_links(&viewer.roles, id);
            let shown: Vec<&'static NavItem> = ordered
                .iter()
                .copied()
                .filter(|item| !hidden.contains(item.href))
                .collect();
            debug!(
                section = id,
                permitted = permitted.len(),
                shown = shown.len(),
                "layout override decides section visibility"
            );
            shown
        } else {
            let hidden = layout.global_hidden_links(id);
            let kept: Vec<&'static NavItem> = permitted
                .into_iter()
                .filter(|item| !hidden.contains(item.href))
                .collect();
            apply_section_rules(&section, kept, &viewer, onboarding_incomplete)
        };

        // Leadership finds assistant scheduling in the manager section, with
        // or without an override.
        let visible: Vec<&'static NavItem> =
            if section == SectionRef::BuiltIn(BuiltInSection::GetHelp) && viewer.is_leadership {
                visible
                    .into_iter()
                    .filter(|item| item.href != ASSISTANT_SCHEDULE_HREF)
                    .collect()
            } else {
                visible
            };

        if visible.is_empty() {
            continue;
        }

        let items = visible
            .into_iter()
            .map(|item| ResolvedItem {
                href: item.href.to_string(),
                label: display_label(item, &viewer.roles, input.locale),
                icon: item.icon.to_string(),
                badge: badge_for(&section, item.href, input.unread_announcements),
                group: match section {
                    SectionRef::BuiltIn(BuiltInSection::Manager) => {
                        management_group(item.href).map(str::to_string)
                    }
                    _ => None,
                },
            })
            .collect();

        entries.push(NavEntry::Section {
            id: id.to_string(),
            label: layout.display_name(&section),
            custom: matches!(section, SectionRef::Custom(_)),
            items,
        });
    }

    debug!(entries = entries.len(), configured, "resolved navigation");

    NavigationModel { entries }
}

/// Items of `section` in configured order. Custom sections list catalog hrefs;
/// hrefs missing from the catalog and repeats are skipped.
fn section_items(layout: &SidebarLayoutConfig, section: &SectionRef) -> Vec<&'static NavItem> {
    let order = layout.link_order_for(section.id());
    match section {
        SectionRef::BuiltIn(built_in) => {
            let defaults: Vec<&'static NavItem> = built_in.items().iter().collect();
            apply_order(&defaults, order, |item| item.href)
        }
        SectionRef::Custom(_) => {
            let mut seen = BTreeSet::new();
            order
                .iter()
                .filter_map(|href| catalog::find(href))
                .filter(|item| seen.insert(item.href))
                .collect()
        }
    }
}

/// Built-in section rules that apply when no layout override is in effect.
fn apply_section_rules(
    section: &SectionRef,
    items: Vec<&'static NavItem>,
    viewer: &Viewer<'_>,
    onboarding_incomplete: bool,
) -> Vec<&'static NavItem> {
    let SectionRef::BuiltIn(built_in) = section else {
        return items;
    };

    match built_in {
        // Super admins never see onboarding; everyone else reaches it through
        // the START HERE shortcut until it is done.
        BuiltInSection::Housekeeping if viewer.is_super_admin || onboarding_incomplete => items
            .into_iter()
            .filter(|item| item.href != ONBOARDING_HREF)
            .collect(),
        BuiltInSection::Manager if !viewer.is_coach => Vec::new(),
        BuiltInSection::AdminOnly if !viewer.is_admin => Vec::new(),
        BuiltInSection::Platform => Vec::new(),
        _ => items,
    }
}

fn badge_for(section: &SectionRef, href: &str, unread_announcements: u32) -> Option<u32> {
    match (section, href) {
        (SectionRef::BuiltIn(BuiltInSection::Main), DASHBOARD_HREF)
        | (SectionRef::BuiltIn(BuiltInSection::Manager), ANNOUNCEMENTS_HREF) => {
            Some(unread_announcements)
        }
        _ => None,
    }
}
