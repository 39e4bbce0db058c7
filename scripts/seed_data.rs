//! Seed script for hotelier
//!
//! Populates the Sled snapshots with the demo inventory (three rooms, one
//! booking) plus a handful of extra sample bookings, then runs the
//! availability query and the dashboard aggregator as a smoke check.
//! Run: cargo run --bin seed_data

use chrono::{Duration, NaiveDate, Utc};
use hotelier::hotel::HotelLedger;
use hotelier::models::{BookingStatus, NewBooking, PaymentStatus};
use hotelier::storage::Storage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let data_dir =
        std::env::var("HOTELIER_DATA").unwrap_or_else(|_| "hotelier_data".to_string());

    // Opening the ledger seeds the demo rooms/booking when no snapshot exists
    let storage = Storage::open(&data_dir)?;
    let ledger = HotelLedger::open(storage)?;
    println!(
        "✅ Ledger ready: {} rooms, {} bookings",
        ledger.rooms().len(),
        ledger.bookings().len()
    );

    // A few sample stays across the inventory, starting next week
    let start = Utc::now().date_naive() + Duration::days(7);
    for (i, room) in ledger.rooms().into_iter().enumerate() {
        let check_in = start + Duration::days(i as i64 * 3);
        let check_out = check_in + Duration::days(2);
        let nights = (check_out - check_in).num_days() as f64;
        ledger.create_booking(NewBooking {
            customer_id: "3".to_string(),
            customer_name: "John Customer".to_string(),
            customer_email: "customer@hotel.com".to_string(),
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            check_in,
            check_out,
            guests: 2,
            total_amount: nights * room.price, // per-stay total
            status: BookingStatus::Confirmed,
            payment_status: if i % 2 == 0 {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            },
            special_requests: None,
        })?;
    }
    println!("✅ Added {} sample bookings", ledger.rooms().len());

    // Smoke-check the availability query on the seed booking's window
    let free = ledger.available_rooms(
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
        NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
    );
    println!("✅ Availability query for 2024-07-20..22: {} rooms free", free.len());

    let stats = ledger.dashboard_stats();
    println!(
        "✅ Dashboard: {} rooms, {} active bookings, revenue {:.2}, occupancy {:.1}%",
        stats.total_rooms, stats.total_bookings, stats.total_revenue, stats.occupancy_rate
    );

    Ok(())
}
