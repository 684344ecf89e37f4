//! # Salonnav (dashboard sidebar visibility)
//!
//! `salonnav` decides which sidebar entries a signed-in salon team member
//! sees, in which order, under which labels and with which badges.
//!
//! ## Inputs
//!
//! - **Grants** come from the auth/session service: organization roles,
//!   permissions and platform roles of the caller.
//! - **Layout** is the organization's saved sidebar configuration (section
//!   order, link order, hidden sections and links, custom sections). When any
//!   of the viewer's roles has a role-scoped override, that override fully
//!   defines the visible links of each section.
//! - **Counts** (unread announcements, onboarding progress) decorate entries.
//!
//! ## View As
//!
//! Administrators can preview the sidebar as another role or as a specific
//! team member. Previews swap organization roles and permissions only;
//! platform gates keep using the real platform roles.
//!
//! ## Visibility is not authorization
//!
//! A hidden link is still a reachable route. Every route re-checks real
//! permissions server-side; nothing here grants access.

pub mod api;
pub mod auth;
pub mod cli;
pub mod navigation;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
