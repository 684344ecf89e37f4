//! Sidebar resolution endpoints.
//!
//! `POST /v1/navigation` resolves the caller's sidebar. Grants always come
//! from the auth service; the layout, unread count and onboarding progress are
//! loaded concurrently and any of them may fail without failing the request.

use super::{
    bearer_token,
    types::{
        DefaultsResponse, NavigationRequest, NavigationResponse, SimulationResponse,
        ViewAsRequest,
    },
    valid_locale, ApiError,
};
use crate::{
    auth::AuthClient,
    navigation::{resolve, Locale, ResolveInput, Role, RolePermissionMap, ViewerSession},
    store::LayoutStore,
};
use axum::{
    body::Bytes,
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use std::{fmt::Display, sync::Arc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/v1/navigation",
    request_body = NavigationRequest,
    responses(
        (status = 200, description = "Resolved sidebar", body = NavigationResponse),
        (status = 400, description = "Malformed body, unknown role or invalid locale"),
        (status = 401, description = "Missing, invalid or expired session"),
        (status = 403, description = "View As not permitted"),
        (status = 404, description = "View As target is not a member of the organization"),
        (status = 502, description = "Auth service unavailable"),
        (status = 503, description = "View As target could not be loaded"),
    ),
    tag = "navigation"
)]
#[instrument(skip_all)]
pub async fn resolve_navigation(
    headers: HeaderMap,
    store: Extension<LayoutStore>,
    auth: Extension<Arc<AuthClient>>,
    role_permissions: Extension<Arc<RolePermissionMap>>,
    body: Bytes,
) -> Result<Json<NavigationResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::MissingToken)?;
    let grants = auth.grants(token).await?;

    let request = navigation_request(&headers, &body)?;
    let locale = match request.locale.as_deref() {
        Some(tag) if !valid_locale(tag) => {
            return Err(ApiError::BadRequest(format!("Invalid locale: {tag}")));
        }
        Some(tag) => Locale::from_tag(tag),
        None => Locale::default(),
    };

    let organization_id = grants.organization_id;
    let user_id = grants.user_id;

    let mut session = ViewerSession::new(grants.viewer_grants());

    if let Some(target) = request.view_as {
        if !session.can_view_as() {
            info!(%user_id, "View As denied");
            return Err(ApiError::Forbidden("View As not permitted"));
        }
        match target {
            ViewAsRequest::Role(name) => {
                let role = Role::parse(&name)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown role: {name}")))?;
                session.set_view_as_role(role);
            }
            ViewAsRequest::UserId(target_id) => {
                let member = store
                    .team_member(organization_id, target_id)
                    .await
                    .map_err(|err| ApiError::Unavailable(err.to_string()))?
                    .ok_or(ApiError::NotFound("Team member not found"))?;
                session.set_view_as_user(member);
            }
        }
    }

    let (layout, unread, onboarding) = tokio::join!(
        store.layout_config(organization_id),
        store.unread_announcement_count(organization_id, user_id),
        store.onboarding_progress(organization_id, user_id),
    );

    let layout = degrade("layout", organization_id, layout);
    let unread = degrade("unread announcements", organization_id, unread);
    let onboarding = degrade("onboarding progress", organization_id, onboarding);

    let navigation = resolve(&ResolveInput {
        session: &session,
        role_permissions: &role_permissions,
        layout: layout.as_ref(),
        onboarding,
        unread_announcements: unread,
        locale,
    });

    debug!(sections = ?navigation.section_ids(), "navigation resolved");

    Ok(Json(NavigationResponse {
        user_id,
        organization_id,
        view_as: SimulationResponse::from_view_as(session.view_as()),
        navigation,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/navigation/defaults",
    responses(
        (status = 200, description = "Built-in section order, labels, sub-groups and catalog", body = DefaultsResponse),
    ),
    tag = "navigation"
)]
pub async fn navigation_defaults() -> Json<DefaultsResponse> {
    Json(DefaultsResponse::built_in())
}

/// An empty body asks for the caller's own sidebar. Anything else must be a
/// JSON `NavigationRequest`.
fn navigation_request(headers: &HeaderMap, body: &[u8]) -> Result<NavigationRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NavigationRequest::default());
    }
    if !is_json(headers) {
        return Err(ApiError::BadRequest(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }
    Json::<NavigationRequest>::from_bytes(body)
        .map(|Json(request)| request)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("application/json")
                || mime.to_ascii_lowercase().ends_with("+json")
        })
}

/// A failed load counts as "not loaded": `T::default()` is the absent value.
fn degrade<T: Default, E: Display>(what: &str, organization_id: Uuid, result: Result<T, E>) -> T {
    result.unwrap_or_else(|err| {
        warn!(%organization_id, "Failed to load {}: {}", what, err);
        T::default()
    })
}
