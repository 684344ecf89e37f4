//! Organization sidebar layout: ordering, hidden sections and links, custom
//! sections.
//!
//! The configuration is persisted as JSON by the dashboard's layout editor and
//! read here as-is. Every field is optional so a missing or partially written
//! configuration is still valid input.

use super::{catalog::BuiltInSection, roles::Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use utoipa::ToSchema;

/// Section order used when an organization has not saved one.
pub const DEFAULT_SECTION_ORDER: [&str; 8] = [
    "main",
    "growth",
    "stats",
    "housekeeping",
    "manager",
    "adminOnly",
    "gethelp",
    "platform",
];

pub const SECTION_LABELS: [(&str, &str); 8] = [
    ("main", "Main"),
    ("growth", "Growth"),
    ("stats", "Stats & Leaderboard"),
    ("housekeeping", "Housekeeping"),
    ("manager", "Management"),
    ("adminOnly", "Super Admin"),
    ("gethelp", "Get Help"),
    ("platform", "Platform"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManagementSubGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub hrefs: &'static [&'static str],
}

/// Sub-grouping of the manager section.
pub const MANAGEMENT_SUB_GROUPS: [ManagementSubGroup; 3] = [
    ManagementSubGroup {
        id: "team",
        label: "Team",
        hrefs: &[
            "/dashboard/admin/announcements",
            "/dashboard/admin/team",
            "/dashboard/admin/assistant-requests",
        ],
    },
    ManagementSubGroup {
        id: "analytics",
        label: "Analytics",
        hrefs: &["/dashboard/admin/sales", "/dashboard/admin/client-health"],
    },
    ManagementSubGroup {
        id: "operations",
        label: "Operations",
        hrefs: &["/dashboard/admin/payroll"],
    },
];

#[must_use]
pub fn is_built_in_section(id: &str) -> bool {
    BuiltInSection::from_id(id).is_some()
}

#[must_use]
pub fn section_label(id: &str) -> Option<&'static str> {
    SECTION_LABELS
        .iter()
        .find(|(section, _)| *section == id)
        .map(|(_, label)| *label)
}

#[must_use]
pub fn management_group(href: &str) -> Option<&'static str> {
    MANAGEMENT_SUB_GROUPS
        .iter()
        .find(|group| group.hrefs.contains(&href))
        .map(|group| group.id)
}

/// A section as it appears in the resolved order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionRef {
    BuiltIn(BuiltInSection),
    Custom(String),
}

impl SectionRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::BuiltIn(section) => section.id(),
            Self::Custom(id) => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarLayoutConfig {
    pub section_order: Option<Vec<String>>,
    /// Section id to ordered hrefs. Reorders built-in sections and defines
    /// the membership of custom ones.
    pub link_order: BTreeMap<String, Vec<String>>,
    pub hidden_sections: Vec<String>,
    pub hidden_sections_by_role: BTreeMap<String, Vec<String>>,
    /// Section id to hidden hrefs.
    pub hidden_links: BTreeMap<String, Vec<String>>,
    /// Role name to section id to hidden hrefs.
    pub hidden_links_by_role: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// Custom section id to display name.
    pub custom_sections: BTreeMap<String, String>,
}

impl SidebarLayoutConfig {
    /// Sections in display order.
    ///
    /// Saved positions come first; built-in sections missing from the saved
    /// order follow in default order, then custom sections by id. Ids that
    /// are neither built in nor declared as custom sections are dropped.
    #[must_use]
    pub fn resolved_section_order(&self) -> Vec<SectionRef> {
        let saved = self
            .section_order
            .as_deref()
            .filter(|order| !order.is_empty())
            .unwrap_or(&[]);

        let candidates = saved
            .iter()
            .map(String::as_str)
            .chain(DEFAULT_SECTION_ORDER)
            .chain(self.custom_sections.keys().map(String::as_str));

        let mut seen = BTreeSet::new();
        let mut order = Vec::new();
        for id in candidates {
            if !seen.insert(id) {
                continue;
            }
            if let Some(section) = BuiltInSection::from_id(id) {
                order.push(SectionRef::BuiltIn(section));
            } else if self.custom_sections.contains_key(id) {
                order.push(SectionRef::Custom(id.to_string()));
            }
        }
        order
    }

    /// Global hidden sections plus those hidden for any of `roles`.
    #[must_use]
    pub fn hidden_sections_for(&self, roles: &BTreeSet<Role>) -> BTreeSet<&str> {
        roles
            .iter()
            .filter_map(|role| self.hidden_sections_by_role.get(role.as_str()))
            .flatten()
            .chain(&self.hidden_sections)
            .map(String::as_str)
            .collect()
    }

    /// Links hidden in `section` for any of `roles`.
    #[must_use]
    pub fn role_hidden_links(&self, roles: &BTreeSet<Role>, section: &str) -> BTreeSet<&str> {
        roles
            .iter()
            .filter_map(|role| self.hidden_links_by_role.get(role.as_str()))
            .filter_map(|sections| sections.get(section))
            .flatten()
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn global_hidden_links(&self, section: &str) -> BTreeSet<&str> {
        self.hidden_links
            .get(section)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn link_order_for(&self, section: &str) -> &[String] {
        self.link_order
            .get(section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn display_name(&self, section: &SectionRef) -> String {
        match section {
            SectionRef::BuiltIn(built_in) => section_label(built_in.id())
                .unwrap_or(built_in.id())
                .to_string(),
            SectionRef::Custom(id) => self
                .custom_sections
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.clone()),
        }
    }
}

/// True when any of `roles` has at least one hidden section or hidden link
/// recorded. Such viewers get the configured layout instead of the
/// permission-filtered one.
#[must_use]
pub fn any_role_has_overrides(config: &SidebarLayoutConfig, roles: &BTreeSet<Role>) -> bool {
    roles.iter().any(|role| {
        let sections = config
            .hidden_sections_by_role
            .get(role.as_str())
            .is_some_and(|hidden| !hidden.is_empty());
        let links = config
            .hidden_links_by_role
            .get(role.as_str())
            .is_some_and(|by_section| by_section.values().any(|hidden| !hidden.is_empty()));
        sections || links
    })
}

/// Sorts `items` by their position in `order`; unlisted items follow in their
/// original order. Only the first occurrence of a key in `order` counts.
#[must_use]
pub fn apply_order<T, F>(items: &[T], order: &[String], key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    for (position, entry) in order.iter().enumerate() {
        positions.entry(entry.as_str()).or_insert(position);
    }

    let mut ranked: Vec<(usize, usize, &T)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = positions.get(key(item)).copied().unwrap_or(usize::MAX);
            (position, index, item)
        })
        .collect();
    ranked.sort_unstable_by_key(|(position, index, _)| (*position, *index));

    ranked.into_iter().map(|(_, _, item)| item.clone()).collect()
}
