//! Static catalog of every sidebar entry the dashboard can show.

use super::roles::{Permission, PlatformRole, Role};
use serde::Serialize;

pub const DASHBOARD_HREF: &str = "/dashboard";
pub const ONBOARDING_HREF: &str = "/dashboard/onboarding";
pub const STATS_HREF: &str = "/dashboard/stats";
pub const ASSISTANT_SCHEDULE_HREF: &str = "/dashboard/assistant-schedule";
pub const ANNOUNCEMENTS_HREF: &str = "/dashboard/admin/announcements";

/// One catalog entry.
///
/// Gates are checked in this order: `platform_roles` decides alone when set;
/// otherwise `permission`, and only when that is absent, `roles`. An entry with
/// no gate is visible to every signed-in viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub label_key: Option<&'static str>,
    pub icon: &'static str,
    pub permission: Option<Permission>,
    pub roles: &'static [Role],
    pub platform_roles: &'static [PlatformRole],
}

impl NavItem {
    const fn new(href: &'static str, label: &'static str, icon: &'static str) -> Self {
        Self {
            href,
            label,
            label_key: None,
            icon,
            permission: None,
            roles: &[],
            platform_roles: &[],
        }
    }

    const fn key(mut self, label_key: &'static str) -> Self {
        self.label_key = Some(label_key);
        self
    }

    const fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    const fn roles(mut self, roles: &'static [Role]) -> Self {
        self.roles = roles;
        self
    }

    const fn platform(mut self, platform_roles: &'static [PlatformRole]) -> Self {
        self.platform_roles = platform_roles;
        self
    }

    #[must_use]
    pub fn is_ungated(&self) -> bool {
        self.permission.is_none() && self.roles.is_empty() && self.platform_roles.is_empty()
    }
}

/// Sections shipped with the dashboard. Organizations may add custom ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BuiltInSection {
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "growth")]
    Growth,
    #[serde(rename = "stats")]
    Stats,
    #[serde(rename = "housekeeping")]
    Housekeeping,
    #[serde(rename = "manager")]
    Manager,
    #[serde(rename = "adminOnly")]
    AdminOnly,
    #[serde(rename = "gethelp")]
    GetHelp,
    #[serde(rename = "platform")]
    Platform,
}

impl BuiltInSection {
    pub const ALL: [Self; 8] = [
        Self::Main,
        Self::Growth,
        Self::Stats,
        Self::Housekeeping,
        Self::Manager,
        Self::AdminOnly,
        Self::GetHelp,
        Self::Platform,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Growth => "growth",
            Self::Stats => "stats",
            Self::Housekeeping => "housekeeping",
            Self::Manager => "manager",
            Self::AdminOnly => "adminOnly",
            Self::GetHelp => "gethelp",
            Self::Platform => "platform",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }

    #[must_use]
    pub const fn items(self) -> &'static [NavItem] {
        match self {
            Self::Main => MAIN,
            Self::Growth => GROWTH,
            Self::Stats => STATS,
            Self::Housekeeping => HOUSEKEEPING,
            Self::Manager => MANAGER,
            Self::AdminOnly => ADMIN_ONLY,
            Self::GetHelp => GET_HELP,
            Self::Platform => PLATFORM,
        }
    }
}

const MAIN: &[NavItem] = &[
    NavItem::new(DASHBOARD_HREF, "Command Center", "layout-dashboard")
        .key("nav.command_center")
        .permission(Permission::ViewCommandCenter),
    NavItem::new("/dashboard/schedule", "Schedule", "calendar")
        .key("nav.schedule")
        .permission(Permission::ViewBookingCalendar),
    NavItem::new("/dashboard/queue", "Today's Queue", "list-ordered")
        .key("nav.queue")
        .permission(Permission::ViewQueue),
    NavItem::new("/dashboard/clients", "Client Directory", "contact")
        .key("nav.clients")
        .permission(Permission::ViewClients),
    NavItem::new("/dashboard/directory", "Team Directory", "users")
        .key("nav.team_directory")
        .permission(Permission::ViewTeamDirectory),
];

const GROWTH: &[NavItem] = &[
    NavItem::new("/dashboard/training", "Training", "graduation-cap")
        .key("nav.training")
        .permission(Permission::ViewTraining),
    NavItem::new("/dashboard/program", "Client Engine Program", "target")
        .permission(Permission::AccessClientEngine),
    NavItem::new("/dashboard/rewards", "Rewards", "gift")
        .key("nav.rewards")
        .permission(Permission::ViewRewards),
    NavItem::new("/dashboard/ring-the-bell", "Ring the Bell", "bell")
        .permission(Permission::RingTheBell),
];

const STATS: &[NavItem] = &[
    NavItem::new(STATS_HREF, "My Stats", "bar-chart").permission(Permission::ViewOwnStats),
    NavItem::new("/dashboard/leaderboard", "Leaderboard", "trophy")
        .key("nav.leaderboard")
        .permission(Permission::ViewLeaderboard),
    NavItem::new("/dashboard/my-clients", "My Clients", "heart-handshake")
        .roles(&[Role::Stylist, Role::BoothRenter]),
];

const HOUSEKEEPING: &[NavItem] = &[
    NavItem::new(ONBOARDING_HREF, "Onboarding", "rocket").key("nav.onboarding"),
    NavItem::new("/dashboard/handbooks", "Handbooks", "book-open")
        .key("nav.handbooks")
        .permission(Permission::ViewHandbooks),
    NavItem::new("/dashboard/changelog", "What's New", "sparkles").key("nav.changelog"),
];

const MANAGER: &[NavItem] = &[
    NavItem::new(ANNOUNCEMENTS_HREF, "Announcements", "megaphone")
        .key("nav.announcements")
        .permission(Permission::ManageAnnouncements),
    NavItem::new("/dashboard/admin/team", "Team Overview", "users-round")
        .permission(Permission::ViewTeamOverview),
    NavItem::new("/dashboard/admin/assistant-requests", "Assistant Requests", "hand-helping")
        .permission(Permission::ManageAssistantRequests),
    NavItem::new("/dashboard/admin/sales", "Sales Analytics", "line-chart")
        .key("nav.sales")
        .permission(Permission::ViewSalesAnalytics),
    NavItem::new("/dashboard/admin/client-health", "Client Health", "activity")
        .permission(Permission::ViewClientHealth),
    NavItem::new("/dashboard/admin/payroll", "Payroll", "wallet")
        .permission(Permission::ManagePayroll),
];

const ADMIN_ONLY: &[NavItem] = &[
    NavItem::new("/dashboard/admin/roles", "Roles & Permissions", "shield")
        .key("nav.roles")
        .permission(Permission::ManageRoles),
    NavItem::new("/dashboard/admin/rewards-catalog", "Rewards Catalog", "gem")
        .permission(Permission::ManageRewards),
    NavItem::new("/dashboard/admin/settings", "Settings", "settings")
        .key("nav.settings")
        .permission(Permission::ManageSettings),
];

const GET_HELP: &[NavItem] = &[
    NavItem::new("/dashboard/help", "Help Center", "life-buoy").key("nav.help"),
    NavItem::new(ASSISTANT_SCHEDULE_HREF, "Assistant Schedule", "calendar-clock")
        .permission(Permission::ViewAssistantSchedule),
    NavItem::new("/dashboard/schedule-meeting", "Schedule 1:1", "calendar-plus")
        .permission(Permission::ScheduleMeetings),
];

const PLATFORM: &[NavItem] = &[
    NavItem::new("/dashboard/platform/overview", "Platform Overview", "terminal").platform(&[
        PlatformRole::PlatformDeveloper,
    ]),
    NavItem::new("/dashboard/platform/accounts", "Accounts", "building")
        .platform(&[PlatformRole::PlatformSupport]),
    NavItem::new("/dashboard/platform/revenue", "Revenue", "dollar-sign")
        .platform(&[PlatformRole::PlatformOwner]),
];

/// Every catalog entry in declaration order.
pub fn all_items() -> impl Iterator<Item = &'static NavItem> {
    BuiltInSection::ALL
        .into_iter()
        .flat_map(|section| section.items().iter())
}

/// Default items of a built-in section id; empty for custom or unknown ids.
#[must_use]
pub fn items_for(section_id: &str) -> &'static [NavItem] {
    BuiltInSection::from_id(section_id)
        .map(BuiltInSection::items)
        .unwrap_or_default()
}

/// Looks up a catalog entry by its unique `href`.
#[must_use]
pub fn find(href: &str) -> Option<&'static NavItem> {
    all_items().find(|item| item.href == href)
}
