use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Principal roles. Serialized lowercase to match the snapshot format.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Customer,
}

/// An authenticated principal, as exposed to the rest of the system.
/// The password hash never appears here; see [`StoredPrincipal`].
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Directory entry: principal plus its bcrypt hash. Memory-resident only;
/// only the stripped [`Principal`] is persisted as the session record.
#[derive(Debug, Clone)]
pub struct StoredPrincipal {
    pub principal: Principal,
    pub password_hash: String,
}

/// Registration input. The id is assigned by the identity store.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPrincipal {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Assigned by the catalog on add; tolerated absent in intake payloads.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Nightly price.
    pub price: f64,
    pub capacity: u32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub description: String,
    /// Manually toggled attribute, independent of booking dates.
    pub is_available: bool,
    pub floor: i32,
    /// Free text, not required unique.
    pub room_number: String,
}

/// Partial update for a room. Merge semantics: only present fields change.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub price: Option<f64>,
    pub capacity: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
    pub floor: Option<i32>,
    pub room_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// A ledger entry. Never physically deleted; cancellation is a status change.
/// Room and customer are referenced by id with denormalized display fields
/// (no referential integrity against the room catalog).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub room_id: String,
    pub room_name: String,
    /// Half-open stay interval: [check_in, check_out).
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    /// Per-stay total (nights x nightly price, computed at intake).
    pub total_amount: f64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Booking intake; id and created_at are assigned by the ledger.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub room_id: String,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Partial update for a booking (status changes, payment updates, re-dating).
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingPatch {
    pub room_id: Option<String>,
    pub room_name: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub total_amount: Option<f64>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub special_requests: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStatus {
    Open,
    InProgress,
    Resolved,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Contact intake; id, created_at and the open status are assigned on insert.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub customer_name: String,
    pub customer_email: String,
    pub subject: String,
    pub message: String,
}

/// Staff-side message update: record a response and/or move the status.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MessagePatch {
    pub status: Option<MessageStatus>,
    pub response: Option<String>,
}

/// Aggregates for the admin/staff dashboards.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: usize,
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub occupancy_rate: f64,
    pub recent_bookings: Vec<Booking>,
}

/// JWT claims for the REST layer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthPayload {
    pub sub: String, // principal id
    pub email: String,
    pub role: Role,
    pub exp: usize,
}
