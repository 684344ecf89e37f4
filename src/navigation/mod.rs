//! Sidebar navigation visibility.
//!
//! Flow Overview:
//! 1) Grants from the auth service become a [`ViewerSession`], optionally
//!    previewing another role or team member ("View As").
//! 2) The session yields effective roles and permissions; platform checks
//!    always use the real platform roles.
//! 3) The [`resolver`] walks the organization's section order, resolves each
//!    section's items from the [`catalog`], filters them by permission or by
//!    the layout override, applies the built-in section rules and emits an
//!    ordered [`NavigationModel`].
//!
//! Everything here is pure and synchronous. Loading the inputs is the job of
//! `store` and `auth`.

pub mod catalog;
pub mod labels;
pub mod layout;
pub mod resolver;
pub mod roles;
pub mod simulation;

pub use self::labels::Locale;
pub use self::layout::SidebarLayoutConfig;
pub use self::resolver::{
    resolve, NavEntry, NavigationModel, OnboardingProgressSummary, ResolveInput, ResolvedItem,
};
pub use self::roles::{Permission, PlatformRole, Role, RolePermissionMap};
pub use self::simulation::{SimulatedUser, ViewAs, ViewerGrants, ViewerSession};
