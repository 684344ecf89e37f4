//! Request/response payloads of the navigation API.
//!
//! Shared between handlers and `OpenAPI` generation.

use crate::navigation::{
    catalog::{items_for, NavItem},
    layout::{ManagementSubGroup, DEFAULT_SECTION_ORDER, MANAGEMENT_SUB_GROUPS, SECTION_LABELS},
    NavigationModel, Permission, PlatformRole, Role, SimulatedUser, ViewAs,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NavigationRequest {
    #[serde(default)]
    pub view_as: Option<ViewAsRequest>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Preview target: `{"role": "stylist"}` or `{"user_id": "<uuid>"}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewAsRequest {
    Role(String),
    UserId(Uuid),
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SimulationResponse {
    Role { role: Role },
    User { user: SimulatedUser },
}

impl SimulationResponse {
    #[must_use]
    pub fn from_view_as(view_as: &ViewAs) -> Option<Self> {
        match view_as {
            ViewAs::Actual => None,
            ViewAs::Role(role) => Some(Self::Role { role: *role }),
            ViewAs::User(user) => Some(Self::User { user: user.clone() }),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    /// Present while previewing another role or team member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_as: Option<SimulationResponse>,
    pub navigation: NavigationModel,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionLabelResponse {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubGroupResponse {
    pub id: String,
    pub label: String,
    pub hrefs: Vec<String>,
}

impl From<&ManagementSubGroup> for SubGroupResponse {
    fn from(group: &ManagementSubGroup) -> Self {
        Self {
            id: group.id.to_string(),
            label: group.label.to_string(),
            hrefs: group.hrefs.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogItemResponse {
    pub section: String,
    pub href: String,
    pub label: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platform_roles: Vec<PlatformRole>,
}

impl CatalogItemResponse {
    fn new(section: &str, item: &NavItem) -> Self {
        Self {
            section: section.to_string(),
            href: item.href.to_string(),
            label: item.label.to_string(),
            icon: item.icon.to_string(),
            permission: item.permission,
            roles: item.roles.to_vec(),
            platform_roles: item.platform_roles.to_vec(),
        }
    }
}

/// Built-in defaults the layout editor starts from.
#[derive(Debug, Serialize, ToSchema)]
pub struct DefaultsResponse {
    pub section_order: Vec<String>,
    pub section_labels: Vec<SectionLabelResponse>,
    pub management_sub_groups: Vec<SubGroupResponse>,
    pub catalog: Vec<CatalogItemResponse>,
}

impl DefaultsResponse {
    #[must_use]
    pub fn built_in() -> Self {
        Self {
            section_order: DEFAULT_SECTION_ORDER.iter().map(ToString::to_string).collect(),
            section_labels: SECTION_LABELS
                .iter()
                .map(|(id, label)| SectionLabelResponse {
                    id: (*id).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
            management_sub_groups: MANAGEMENT_SUB_GROUPS.iter().map(Into::into).collect(),
            catalog: DEFAULT_SECTION_ORDER
                .iter()
                .flat_map(|section| {
                    items_for(section)
                        .iter()
                        .map(move |item| CatalogItemResponse::new(section, item))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_as_request_shapes() {
        let request: Result<NavigationRequest, _> =
            serde_json::from_str(r#"{"view_as":{"role":"stylist"},"locale":"es"}"#);
        assert!(matches!(
            request,
            Ok(NavigationRequest { view_as: Some(ViewAsRequest::Role(ref role)), locale: Some(_) }) if role == "stylist"
        ));

        let request: Result<NavigationRequest, _> = serde_json::from_str(
            r#"{"view_as":{"user_id":"00000000-0000-0000-0000-000000000001"}}"#,
        );
        assert!(matches!(
            request,
            Ok(NavigationRequest {
                view_as: Some(ViewAsRequest::UserId(_)),
                locale: None
            })
        ));

        let request: Result<NavigationRequest, _> = serde_json::from_str("{}");
        assert!(matches!(
            request,
            Ok(NavigationRequest {
                view_as: None,
                locale: None
            })
        ));
    }

    #[test]
    fn defaults_cover_every_section() {
        let defaults = DefaultsResponse::built_in();
        assert_eq!(defaults.section_order.len(), 8);
        assert_eq!(defaults.section_labels.len(), 8);
        assert_eq!(defaults.management_sub_groups.len(), 3);
        for id in &defaults.section_order {
            assert!(defaults.catalog.iter().any(|item| &item.section == id));
        }
    }

    #[test]
    fn simulation_summary() {
        assert!(SimulationResponse::from_view_as(&ViewAs::Actual).is_none());

        let json = serde_json::to_value(SimulationResponse::from_view_as(&ViewAs::Role(
            Role::Stylist,
        )));
        assert_eq!(
            json.ok(),
            Some(serde_json::json!({"mode": "role", "role": "stylist"}))
        );
    }
}
