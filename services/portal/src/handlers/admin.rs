use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sesmine_domain::activity::UserActivity;
use sesmine_domain::contact::ContactMessage;
use sesmine_domain::id::{RequestId, UserId};
use sesmine_domain::plan::Plan;
use sesmine_domain::request::{PendingRequest, RequestStatus};
use sesmine_domain::user::{Permission, Role, User};

use crate::error::PortalError;
use crate::handlers::context::RequireAdmin;
use crate::state::AppState;
use crate::usecase::account::{
    CreateUserInput, CreateUserUseCase, ListUsersUseCase, NewUser, SetUserActiveUseCase,
};
use crate::usecase::activity::ListActivitiesUseCase;
use crate::usecase::contact::ListContactsUseCase;
use crate::usecase::registration::{ApproveRequestUseCase, ListRequestsUseCase};

// ── Responses ────────────────────────────────────────────────────────────────

/// A user as shown to admins. The credential is never included.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub plan: Plan,
    pub is_active: bool,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub permissions: Vec<Permission>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            name: user.name,
            role: user.role,
            plan: user.plan,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login: user.last_login,
            company: user.company,
            job_title: user.job_title,
            phone: user.phone,
            permissions: user.permissions.into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
pub struct RequestResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub phone: String,
    pub plan: Plan,
    pub newsletter: bool,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub status: RequestStatus,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms_opt")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<PendingRequest> for RequestResponse {
    fn from(r: PendingRequest) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name,
            email: r.email,
            company: r.company,
            job_title: r.job_title,
            phone: r.phone,
            plan: r.plan,
            newsletter: r.newsletter,
            timestamp: r.timestamp,
            status: r.status,
            approved_at: r.approved_at,
        }
    }
}

#[derive(Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            timestamp: m.timestamp,
        }
    }
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub page: String,
    pub user: String,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
}

impl From<UserActivity> for ActivityResponse {
    fn from(a: UserActivity) -> Self {
        Self {
            page: a.page,
            user: a.user,
            timestamp: a.timestamp,
        }
    }
}

// ── GET /admin/requests ──────────────────────────────────────────────────────

pub async fn list_requests(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<RequestResponse>>, PortalError> {
    let usecase = ListRequestsUseCase {
        requests: state.request_repo(),
    };
    let requests = usecase.execute().await?;
    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}

// ── POST /admin/requests/{id}/approve ────────────────────────────────────────

#[derive(Serialize)]
pub struct ApproveResponse {
    pub user: UserResponse,
    pub request: RequestResponse,
    pub credential_delivered: bool,
    /// Present only when the approval email failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
    pub message: &'static str,
}

pub async fn approve_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApproveResponse>), PortalError> {
    let usecase = ApproveRequestUseCase {
        requests: state.request_repo(),
        notifier: state.notifier(),
    };
    let out = usecase.execute(&RequestId(id)).await?;
    tracing::info!(
        admin = %admin.session.username,
        user_id = %out.user.id,
        "request approved by admin"
    );
    let credential_delivered = out.credential_delivered();
    let message = if credential_delivered {
        "User approved successfully! Approval email sent."
    } else {
        "User approved successfully! Please manually send login credentials."
    };
    Ok((
        StatusCode::CREATED,
        Json(ApproveResponse {
            user: UserResponse::from(out.user),
            request: RequestResponse::from(out.request),
            credential_delivered,
            temporary_password: out.credential.map(|c| c.expose().to_owned()),
            message,
        }),
    ))
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<UserResponse>>, PortalError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── POST /admin/users ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub plan: Plan,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), PortalError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        rules: state.password_rules,
    };
    let user = usecase
        .execute(CreateUserInput {
            user: NewUser {
                name: body.name,
                email: body.email,
                role: body.role.unwrap_or(Role::User),
                plan: body.plan,
                company: body.company,
                job_title: body.job_title,
                phone: body.phone,
            },
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ── PATCH /admin/users/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub is_active: bool,
}

pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<StatusCode, PortalError> {
    let usecase = SetUserActiveUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&UserId(id), body.is_active).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/contacts ──────────────────────────────────────────────────────

pub async fn list_contacts(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<ContactMessageResponse>>, PortalError> {
    let usecase = ListContactsUseCase {
        contacts: state.contact_repo(),
    };
    let contacts = usecase.execute().await?;
    Ok(Json(
        contacts
            .into_iter()
            .map(ContactMessageResponse::from)
            .collect(),
    ))
}

// ── GET /admin/activities ────────────────────────────────────────────────────

pub async fn list_activities(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<ActivityResponse>>, PortalError> {
    let usecase = ListActivitiesUseCase {
        activities: state.activity_repo(),
    };
    let activities = usecase.execute().await?;
    Ok(Json(
        activities.into_iter().map(ActivityResponse::from).collect(),
    ))
}
