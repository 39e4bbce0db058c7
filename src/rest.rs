//! REST API layer using Axum.
//!
//! Exposes the identity store and hotel ledger over HTTP/JSON:
//! - Public: register/login/logout, room browsing, availability query,
//!   contact-message intake, health.
//! - Bearer-JWT protected: booking CRUD, room management (admin), message
//!   handling and dashboard stats (admin/staff).
//!
//! Input validation lives here, at the boundary; the core operations stay
//! total functions (missing ids degrade to no-ops inside the ledger and are
//! surfaced as 404 only for the HTTP caller).

use axum::{
    extract::{Path, Query, State},
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::auth::{create_token, validate_token};
use crate::error::HotelError;
use crate::hotel::HotelLedger;
use crate::identity::IdentityStore;
use crate::models::{
    AuthPayload, Booking, BookingPatch, ContactMessage, DashboardStats, MessagePatch, NewBooking,
    NewContactMessage, NewPrincipal, Principal, Role, Room, RoomPatch,
};

/// Shared app state for REST handlers (Arc-wrapped for concurrency)
pub struct AppState {
    pub identity: Arc<IdentityStore>,
    pub hotel: Arc<HotelLedger>,
    pub jwt_secret: Vec<u8>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub principal: Principal,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Generic REST response (JSON)
#[derive(Serialize)]
pub struct RestResponse {
    pub success: bool,
    pub message: String,
}

impl RestResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Map core errors onto HTTP statuses at the boundary.
fn status_for(err: &HotelError) -> StatusCode {
    match err {
        HotelError::AuthenticationFailure => StatusCode::UNAUTHORIZED,
        HotelError::RegistrationConflict(_) => StatusCode::CONFLICT,
        HotelError::NotFound { .. } => StatusCode::NOT_FOUND,
        HotelError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn internal(err: HotelError) -> StatusCode {
    warn!(error = %err, "request failed");
    status_for(&err)
}

fn require_role(claims: &AuthPayload, allowed: &[Role]) -> Result<(), StatusCode> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..];
    let claims = validate_token(token, &state.jwt_secret).map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Create the Axum router over the two stores.
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/bookings", get(list_bookings_handler).post(create_booking_handler))
        .route("/bookings/import", put(import_booking_handler))
        .route("/bookings/mine", get(my_bookings_handler))
        .route("/bookings/:id", patch(update_booking_handler))
        .route("/bookings/:id/cancel", post(cancel_booking_handler))
        .route("/rooms", post(add_room_handler))
        .route("/rooms/:id", patch(update_room_handler).delete(delete_room_handler))
        .route("/messages", get(list_messages_handler))
        .route("/messages/:id", patch(update_message_handler))
        .route("/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/health", get(health_handler))
        .route("/rooms", get(list_rooms_handler))
        .route("/rooms/available", get(available_rooms_handler))
        .route("/contact", post(contact_handler))
        .merge(protected)
        .with_state(state)
}

// --- Identity ---

async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPrincipal>,
) -> Result<Json<LoginResponse>, StatusCode> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let principal = state.identity.register(payload).map_err(internal)?;
    let token = create_token(&principal, &state.jwt_secret)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(LoginResponse { token, principal }))
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let principal = state
        .identity
        .login(&payload.email, &payload.password)
        .map_err(internal)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = create_token(&principal, &state.jwt_secret)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(LoginResponse { token, principal }))
}

async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RestResponse>, StatusCode> {
    state.identity.logout().map_err(internal)?;
    Ok(RestResponse::ok("Logged out"))
}

// --- Rooms ---

async fn list_rooms_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Room>> {
    Json(state.hotel.rooms())
}

async fn available_rooms_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Room>>, StatusCode> {
    if query.check_out <= query.check_in {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    Ok(Json(state.hotel.available_rooms(query.check_in, query.check_out)))
}

async fn add_room_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Json(payload): Json<Room>,
) -> Result<Json<Room>, StatusCode> {
    require_role(&claims, &[Role::Admin])?;
    if payload.price < 0.0 || payload.capacity == 0 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let room = state.hotel.add_room(payload).map_err(internal)?;
    Ok(Json(room))
}

async fn update_room_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Path(id): Path<String>,
    Json(patch): Json<RoomPatch>,
) -> Result<Json<Room>, StatusCode> {
    require_role(&claims, &[Role::Admin])?;
    if patch.price.is_some_and(|p| p < 0.0) || patch.capacity.is_some_and(|c| c == 0) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    state
        .hotel
        .update_room(&id, patch)
        .map_err(internal)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_room_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Path(id): Path<String>,
) -> Result<Json<RestResponse>, StatusCode> {
    require_role(&claims, &[Role::Admin])?;
    // No cascade and no existence requirement: missing ids are a no-op
    let removed = state.hotel.delete_room(&id).map_err(internal)?;
    Ok(RestResponse::ok(if removed {
        format!("Room {id} deleted")
    } else {
        format!("Room {id} not present")
    }))
}

// --- Bookings ---

async fn list_bookings_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
) -> Result<Json<Vec<Booking>>, StatusCode> {
    require_role(&claims, &[Role::Admin, Role::Staff])?;
    Ok(Json(state.hotel.bookings()))
}

async fn my_bookings_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
) -> Json<Vec<Booking>> {
    Json(state.hotel.bookings_for_customer(&claims.sub))
}

async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<AuthPayload>,
    Json(payload): Json<NewBooking>,
) -> Result<Json<Booking>, StatusCode> {
    if payload.check_out <= payload.check_in || payload.guests == 0 || payload.total_amount < 0.0 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let booking = state.hotel.create_booking(payload).map_err(internal)?;
    Ok(Json(booking))
}

/// Accepts a fully-formed booking record as-is: the caller already produced
/// id and timestamp (second insert variant kept from the original).
async fn import_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Json(payload): Json<Booking>,
) -> Result<Json<RestResponse>, StatusCode> {
    require_role(&claims, &[Role::Admin, Role::Staff])?;
    let id = payload.id.clone();
    state.hotel.add_booking(payload).map_err(internal)?;
    Ok(RestResponse::ok(format!("Booking {id} recorded")))
}

async fn update_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<AuthPayload>,
    Path(id): Path<String>,
    Json(patch): Json<BookingPatch>,
) -> Result<Json<Booking>, StatusCode> {
    state
        .hotel
        .update_booking(&id, patch)
        .map_err(internal)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn cancel_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(_claims): Extension<AuthPayload>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, StatusCode> {
    state
        .hotel
        .cancel_booking(&id)
        .map_err(internal)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- Contact messages ---

async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewContactMessage>,
) -> Result<Json<ContactMessage>, StatusCode> {
    if payload.customer_email.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let message = state.hotel.add_contact_message(payload).map_err(internal)?;
    Ok(Json(message))
}

async fn list_messages_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
) -> Result<Json<Vec<ContactMessage>>, StatusCode> {
    require_role(&claims, &[Role::Admin, Role::Staff])?;
    Ok(Json(state.hotel.messages()))
}

async fn update_message_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
    Path(id): Path<String>,
    Json(patch): Json<MessagePatch>,
) -> Result<Json<ContactMessage>, StatusCode> {
    require_role(&claims, &[Role::Admin, Role::Staff])?;
    state
        .hotel
        .update_contact_message(&id, patch)
        .map_err(internal)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- Dashboard ---

async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AuthPayload>,
) -> Result<Json<DashboardStats>, StatusCode> {
    require_role(&claims, &[Role::Admin, Role::Staff])?;
    Ok(Json(state.hotel.dashboard_stats()))
}

/// Health check handler
async fn health_handler() -> Json<RestResponse> {
    RestResponse::ok("hotelier REST API healthy")
}
