//! hotelier: hotel catalog & booking ledger service
//!
//! Two state containers form the whole backend: the identity store
//! (principals, login/logout/registration, persisted session) and the hotel
//! ledger (rooms, bookings, contact messages, availability query, dashboard
//! stats). Collections live in memory and write through to Sled as full JSON
//! snapshots on every mutation.

pub mod auth;
pub mod config;
pub mod error;
pub mod hotel;
pub mod identity;
pub mod models;
// REST API module: Axum HTTP handlers over the two stores
pub mod rest;
pub mod storage;
