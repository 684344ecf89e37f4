//! Organization roles, platform roles, and the capabilities they carry.
//!
//! Role and permission names arrive from the auth service as strings. They are
//! parsed into closed enums here so every mapping below is checked
//! exhaustively; names this build does not know are dropped by the caller.

use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};
use utoipa::ToSchema;

/// Organization-scoped role held by a team member.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Stylist,
    StylistAssistant,
    AdminAssistant,
    OperationsAssistant,
    Receptionist,
    BoothRenter,
    Bookkeeper,
}

impl Role {
    pub const ALL: [Self; 10] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::Manager,
        Self::Stylist,
        Self::StylistAssistant,
        Self::AdminAssistant,
        Self::OperationsAssistant,
        Self::Receptionist,
        Self::BoothRenter,
        Self::Bookkeeper,
    ];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "super_admin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "stylist" => Some(Self::Stylist),
            "stylist_assistant" => Some(Self::StylistAssistant),
            "admin_assistant" => Some(Self::AdminAssistant),
            "operations_assistant" => Some(Self::OperationsAssistant),
            "receptionist" => Some(Self::Receptionist),
            "booth_renter" => Some(Self::BoothRenter),
            "bookkeeper" => Some(Self::Bookkeeper),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Stylist => "stylist",
            Self::StylistAssistant => "stylist_assistant",
            Self::AdminAssistant => "admin_assistant",
            Self::OperationsAssistant => "operations_assistant",
            Self::Receptionist => "receptionist",
            Self::BoothRenter => "booth_renter",
            Self::Bookkeeper => "bookkeeper",
        }
    }

    /// Admin tier: `super_admin` or `admin`.
    #[must_use]
    pub const fn is_admin_tier(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Roles that coach other team members and see the manager section.
    #[must_use]
    pub const fn is_leadership(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin | Self::Manager)
    }

    #[must_use]
    pub const fn is_assistant(self) -> bool {
        matches!(
            self,
            Self::StylistAssistant | Self::AdminAssistant | Self::OperationsAssistant
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-organization administrative role. Declaration order is rank order,
/// lowest first, so the derived `Ord` is the hierarchy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    PlatformDeveloper,
    PlatformSupport,
    PlatformAdmin,
    PlatformOwner,
}

impl PlatformRole {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "platform_owner" => Some(Self::PlatformOwner),
            "platform_admin" => Some(Self::PlatformAdmin),
            "platform_support" => Some(Self::PlatformSupport),
            "platform_developer" => Some(Self::PlatformDeveloper),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlatformOwner => "platform_owner",
            Self::PlatformAdmin => "platform_admin",
            Self::PlatformSupport => "platform_support",
            Self::PlatformDeveloper => "platform_developer",
        }
    }

    /// True when `self` is `required` or ranks above it.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for PlatformRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability a navigation entry can require.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewCommandCenter,
    ViewBookingCalendar,
    ViewClients,
    ViewQueue,
    ViewTeamDirectory,
    ViewTraining,
    AccessClientEngine,
    ViewRewards,
    RingTheBell,
    ViewOwnStats,
    ViewLeaderboard,
    ViewHandbooks,
    ViewAssistantSchedule,
    ScheduleMeetings,
    ManageAnnouncements,
    ViewTeamOverview,
    ViewSalesAnalytics,
    ManageAssistantRequests,
    ManagePayroll,
    ViewClientHealth,
    ManageRoles,
    ManageSettings,
    ManageRewards,
    ViewAs,
}

impl Permission {
    pub const ALL: [Self; 24] = [
        Self::ViewCommandCenter,
        Self::ViewBookingCalendar,
        Self::ViewClients,
        Self::ViewQueue,
        Self::ViewTeamDirectory,
        Self::ViewTraining,
        Self::AccessClientEngine,
        Self::ViewRewards,
        Self::RingTheBell,
        Self::ViewOwnStats,
        Self::ViewLeaderboard,
        Self::ViewHandbooks,
        Self::ViewAssistantSchedule,
        Self::ScheduleMeetings,
        Self::ManageAnnouncements,
        Self::ViewTeamOverview,
        Self::ViewSalesAnalytics,
        Self::ManageAssistantRequests,
        Self::ManagePayroll,
        Self::ViewClientHealth,
        Self::ManageRoles,
        Self::ManageSettings,
        Self::ManageRewards,
        Self::ViewAs,
    ];

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewCommandCenter => "view_command_center",
            Self::ViewBookingCalendar => "view_booking_calendar",
            Self::ViewClients => "view_clients",
            Self::ViewQueue => "view_queue",
            Self::ViewTeamDirectory => "view_team_directory",
            Self::ViewTraining => "view_training",
            Self::AccessClientEngine => "access_client_engine",
            Self::ViewRewards => "view_rewards",
            Self::RingTheBell => "ring_the_bell",
            Self::ViewOwnStats => "view_own_stats",
            Self::ViewLeaderboard => "view_leaderboard",
            Self::ViewHandbooks => "view_handbooks",
            Self::ViewAssistantSchedule => "view_assistant_schedule",
            Self::ScheduleMeetings => "schedule_meetings",
            Self::ManageAnnouncements => "manage_announcements",
            Self::ViewTeamOverview => "view_team_overview",
            Self::ViewSalesAnalytics => "view_sales_analytics",
            Self::ManageAssistantRequests => "manage_assistant_requests",
            Self::ManagePayroll => "manage_payroll",
            Self::ViewClientHealth => "view_client_health",
            Self::ManageRoles => "manage_roles",
            Self::ManageSettings => "manage_settings",
            Self::ManageRewards => "manage_rewards",
            Self::ViewAs => "view_as",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default capabilities seeded for each role. Mirrors the authorization seed
/// data of the backend; `bookkeeper` has no dashboard mapping.
#[must_use]
pub fn default_permissions(role: Role) -> &'static [Permission] {
    use Permission as P;

    const FRONT_OF_HOUSE: &[Permission] = &[
        P::ViewCommandCenter,
        P::ViewBookingCalendar,
        P::ViewClients,
        P::ViewQueue,
        P::ViewTeamDirectory,
        P::ViewHandbooks,
    ];

    const STYLIST: &[Permission] = &[
        P::ViewCommandCenter,
        P::ViewBookingCalendar,
        P::ViewClients,
        P::ViewQueue,
        P::ViewTeamDirectory,
        P::ViewTraining,
        P::AccessClientEngine,
        P::ViewRewards,
        P::RingTheBell,
        P::ViewOwnStats,
        P::ViewLeaderboard,
        P::ViewHandbooks,
        P::ViewAssistantSchedule,
        P::ScheduleMeetings,
    ];

    const MANAGER: &[Permission] = &[
        P::ViewCommandCenter,
        P::ViewBookingCalendar,
        P::ViewClients,
        P::ViewQueue,
        P::ViewTeamDirectory,
        P::ViewTraining,
        P::AccessClientEngine,
        P::ViewRewards,
        P::RingTheBell,
        P::ViewOwnStats,
        P::ViewLeaderboard,
        P::ViewHandbooks,
        P::ViewAssistantSchedule,
        P::ScheduleMeetings,
        P::ManageAnnouncements,
        P::ViewTeamOverview,
        P::ViewSalesAnalytics,
        P::ManageAssistantRequests,
        P::ViewClientHealth,
    ];

    const ADMIN: &[Permission] = &[
        P::ViewCommandCenter,
        P::ViewBookingCalendar,
        P::ViewClients,
        P::ViewQueue,
        P::ViewTeamDirectory,
        P::ViewTraining,
        P::AccessClientEngine,
        P::ViewRewards,
        P::RingTheBell,
        P::ViewOwnStats,
        P::ViewLeaderboard,
        P::ViewHandbooks,
        P::ViewAssistantSchedule,
        P::ScheduleMeetings,
        P::ManageAnnouncements,
        P::ViewTeamOverview,
        P::ViewSalesAnalytics,
        P::ManageAssistantRequests,
        P::ManagePayroll,
        P::ViewClientHealth,
        P::ManageSettings,
        P::ManageRewards,
        P::ViewAs,
    ];

    match role {
        Role::SuperAdmin => &Permission::ALL,
        Role::Admin => ADMIN,
        Role::Manager => MANAGER,
        Role::Stylist => STYLIST,
        Role::StylistAssistant => &[
            P::ViewCommandCenter,
            P::ViewBookingCalendar,
            P::ViewQueue,
            P::ViewTeamDirectory,
            P::ViewTraining,
            P::ViewRewards,
            P::ViewHandbooks,
            P::ViewAssistantSchedule,
            P::ScheduleMeetings,
        ],
        Role::AdminAssistant => &[
            P::ViewCommandCenter,
            P::ViewBookingCalendar,
            P::ViewClients,
            P::ViewQueue,
            P::ViewTeamDirectory,
            P::ViewHandbooks,
            P::ViewAssistantSchedule,
            P::ManageAnnouncements,
        ],
        Role::OperationsAssistant => &[
            P::ViewCommandCenter,
            P::ViewBookingCalendar,
            P::ViewQueue,
            P::ViewTeamDirectory,
            P::ViewHandbooks,
            P::ViewAssistantSchedule,
        ],
        Role::Receptionist => FRONT_OF_HOUSE,
        Role::BoothRenter => &[
            P::ViewCommandCenter,
            P::ViewBookingCalendar,
            P::ViewClients,
            P::ViewHandbooks,
        ],
        Role::Bookkeeper => &[],
    }
}

/// Role to permission table used when simulating a role or another user.
///
/// Lookups for a role without an entry return the empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMap {
    entries: HashMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionMap {
    /// A map with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builds a map from explicit entries, for seed data that differs from
    /// [`default_permissions`].
    #[must_use]
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(role, permissions)| (role, permissions.into_iter().collect()))
                .collect(),
        }
    }

    #[must_use]
    pub fn permissions_for(&self, role: Role) -> BTreeSet<Permission> {
        self.entries.get(&role).cloned().unwrap_or_default()
    }
}

impl Default for RolePermissionMap {
    fn default() -> Self {
        Self::from_entries(
            Role::ALL
                .into_iter()
                .map(|role| (role, default_permissions(role).iter().copied())),
        )
    }
}
