//! Display labels for resolved sidebar entries.

use super::{
    catalog::{NavItem, ASSISTANT_SCHEDULE_HREF, STATS_HREF},
    roles::Role,
};
use std::collections::BTreeSet;

pub const START_HERE_LABEL: &str = "START HERE";
const START_HERE_KEY: &str = "nav.start_here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Accepts tags like `es`, `es-MX` or `ES_mx`; anything else is English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "es" => Self::Es,
            _ => Self::En,
        }
    }
}

fn translate(locale: Locale, key: &str) -> Option<&'static str> {
    let label = match (locale, key) {
        (Locale::En, "nav.command_center") => "Command Center",
        (Locale::En, "nav.schedule") => "Schedule",
        (Locale::En, "nav.queue") => "Today's Queue",
        (Locale::En, "nav.clients") => "Client Directory",
        (Locale::En, "nav.team_directory") => "Team Directory",
        (Locale::En, "nav.training") => "Training",
        (Locale::En, "nav.rewards") => "Rewards",
        (Locale::En, "nav.leaderboard") => "Leaderboard",
        (Locale::En, "nav.onboarding") => "Onboarding",
        (Locale::En, "nav.handbooks") => "Handbooks",
        (Locale::En, "nav.changelog") => "What's New",
        (Locale::En, "nav.announcements") => "Announcements",
        (Locale::En, "nav.sales") => "Sales Analytics",
        (Locale::En, "nav.roles") => "Roles & Permissions",
        (Locale::En, "nav.settings") => "Settings",
        (Locale::En, "nav.help") => "Help Center",
        (Locale::Es, "nav.command_center") => "Centro de Mando",
        (Locale::Es, "nav.schedule") => "Agenda",
        (Locale::Es, "nav.queue") => "Cola de Hoy",
        (Locale::Es, "nav.clients") => "Directorio de Clientes",
        (Locale::Es, "nav.team_directory") => "Directorio del Equipo",
        (Locale::Es, "nav.training") => "Formación",
        (Locale::Es, "nav.rewards") => "Recompensas",
        (Locale::Es, "nav.leaderboard") => "Clasificación",
        (Locale::Es, "nav.onboarding") => "Incorporación",
        (Locale::Es, "nav.handbooks") => "Manuales",
        (Locale::Es, "nav.announcements") => "Anuncios",
        (Locale::Es, "nav.settings") => "Configuración",
        (Locale::Es, "nav.help") => "Centro de Ayuda",
        (Locale::Es, "nav.start_here") => "EMPIEZA AQUÍ",
        _ => return None,
    };
    Some(label)
}

/// Label of the onboarding shortcut pinned above the sections.
#[must_use]
pub fn start_here_label(locale: Locale) -> &'static str {
    translate(locale, START_HERE_KEY).unwrap_or(START_HERE_LABEL)
}

/// Label shown for `item` given the viewer's effective roles.
#[must_use]
pub fn display_label(item: &NavItem, effective_roles: &BTreeSet<Role>, locale: Locale) -> String {
    match item.href {
        STATS_HREF => {
            if effective_roles.iter().any(|role| role.is_leadership()) {
                "Team Stats".to_string()
            } else {
                "My Stats".to_string()
            }
        }
        ASSISTANT_SCHEDULE_HREF => {
            if effective_roles.contains(&Role::Stylist) {
                "Request An Assistant".to_string()
            } else if effective_roles.iter().any(|role| role.is_assistant()) {
                "Assisting Requests".to_string()
            } else {
                item.label.to_string()
            }
        }
        _ => item
            .label_key
            .and_then(|key| translate(locale, key))
            .unwrap_or(item.label)
            .to_string(),
    }
}
