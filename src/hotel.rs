//! Hotel catalog & ledger: room inventory, the booking ledger, contact
//! messages, the availability query and the dashboard aggregator.
//!
//! Collections live in memory behind per-collection locks and write through
//! to their Sled snapshots on every mutation. Partial updates use merge
//! semantics and degrade to no-ops on missing ids; bookings are never
//! physically deleted (cancellation is a status change).

use std::sync::RwLock;

use chrono::{NaiveDate, TimeZone, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::HotelResult;
use crate::models::{
    Booking, BookingPatch, BookingStatus, ContactMessage, DashboardStats, MessagePatch,
    MessageStatus, NewBooking, NewContactMessage, PaymentStatus, Room, RoomPatch, RoomType,
};
use crate::storage::{Storage, KEY_BOOKINGS, KEY_MESSAGES, KEY_ROOMS};

pub struct HotelLedger {
    storage: Storage,
    rooms: RwLock<Vec<Room>>,
    bookings: RwLock<Vec<Booking>>,
    messages: RwLock<Vec<ContactMessage>>,
}

impl HotelLedger {
    /// Construct the ledger from persisted snapshots, falling back to the
    /// fixed demo seed when a collection has never been written.
    pub fn open(storage: Storage) -> HotelResult<Self> {
        let rooms = match storage.load_hotel_snapshot(KEY_ROOMS)? {
            Some(rooms) => rooms,
            None => seed_rooms(),
        };
        let bookings = match storage.load_hotel_snapshot(KEY_BOOKINGS)? {
            Some(bookings) => bookings,
            None => seed_bookings(),
        };
        let messages: Vec<ContactMessage> =
            storage.load_hotel_snapshot(KEY_MESSAGES)?.unwrap_or_default();

        debug!(
            rooms = rooms.len(),
            bookings = bookings.len(),
            messages = messages.len(),
            "hotel ledger hydrated"
        );
        Ok(Self {
            storage,
            rooms: RwLock::new(rooms),
            bookings: RwLock::new(bookings),
            messages: RwLock::new(messages),
        })
    }

    // --- Rooms ---

    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.read().expect("rooms lock poisoned").clone()
    }

    pub fn find_room(&self, id: &str) -> Option<Room> {
        let rooms = self.rooms.read().expect("rooms lock poisoned");
        rooms.iter().find(|r| r.id == id).cloned()
    }

    /// Add a room to the catalog, assigning a fresh id.
    pub fn add_room(&self, mut room: Room) -> HotelResult<Room> {
        room.id = Uuid::new_v4().to_string();
        let mut rooms = self.rooms.write().expect("rooms lock poisoned");
        rooms.push(room.clone());
        self.storage.save_hotel_snapshot(KEY_ROOMS, &*rooms)?;
        info!(room = %room.id, name = %room.name, "room added");
        Ok(room)
    }

    /// Merge the provided fields into the matching room; no-op on missing id.
    pub fn update_room(&self, id: &str, patch: RoomPatch) -> HotelResult<Option<Room>> {
        let mut rooms = self.rooms.write().expect("rooms lock poisoned");
        let Some(room) = rooms.iter_mut().find(|r| r.id == id) else {
            debug!(room = id, "update_room: id not found, no-op");
            return Ok(None);
        };
        if let Some(name) = patch.name {
            room.name = name;
        }
        if let Some(room_type) = patch.room_type {
            room.room_type = room_type;
        }
        if let Some(price) = patch.price {
            room.price = price;
        }
        if let Some(capacity) = patch.capacity {
            room.capacity = capacity;
        }
        if let Some(amenities) = patch.amenities {
            room.amenities = amenities;
        }
        if let Some(images) = patch.images {
            room.images = images;
        }
        if let Some(description) = patch.description {
            room.description = description;
        }
        if let Some(is_available) = patch.is_available {
            room.is_available = is_available;
        }
        if let Some(floor) = patch.floor {
            room.floor = floor;
        }
        if let Some(room_number) = patch.room_number {
            room.room_number = room_number;
        }
        let updated = room.clone();
        self.storage.save_hotel_snapshot(KEY_ROOMS, &*rooms)?;
        Ok(Some(updated))
    }

    /// Remove a room. No cascade: bookings referencing it stay in the ledger.
    pub fn delete_room(&self, id: &str) -> HotelResult<bool> {
        let mut rooms = self.rooms.write().expect("rooms lock poisoned");
        let before = rooms.len();
        rooms.retain(|r| r.id != id);
        let removed = rooms.len() != before;
        if removed {
            self.storage.save_hotel_snapshot(KEY_ROOMS, &*rooms)?;
            info!(room = id, "room deleted");
        }
        Ok(removed)
    }

    // --- Bookings ---

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().expect("bookings lock poisoned").clone()
    }

    pub fn bookings_for_customer(&self, customer_id: &str) -> Vec<Booking> {
        let bookings = self.bookings.read().expect("bookings lock poisoned");
        bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Insert a booking, assigning id and creation timestamp.
    pub fn create_booking(&self, new: NewBooking) -> HotelResult<Booking> {
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            customer_id: new.customer_id,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            room_id: new.room_id,
            room_name: new.room_name,
            check_in: new.check_in,
            check_out: new.check_out,
            guests: new.guests,
            total_amount: new.total_amount,
            status: new.status,
            payment_status: new.payment_status,
            special_requests: new.special_requests,
            created_at: Utc::now(),
        };
        self.add_booking(booking.clone())?;
        Ok(booking)
    }

    /// Insert a fully-formed booking record as-is (caller already produced
    /// id and timestamp). Kept alongside [`Self::create_booking`] because
    /// callers differ in which they need.
    pub fn add_booking(&self, booking: Booking) -> HotelResult<()> {
        let mut bookings = self.bookings.write().expect("bookings lock poisoned");
        info!(booking = %booking.id, room = %booking.room_id, "booking recorded");
        bookings.push(booking);
        self.storage.save_hotel_snapshot(KEY_BOOKINGS, &*bookings)?;
        Ok(())
    }

    /// Merge the provided fields into the matching entry; no-op on missing id.
    pub fn update_booking(&self, id: &str, patch: BookingPatch) -> HotelResult<Option<Booking>> {
        let mut bookings = self.bookings.write().expect("bookings lock poisoned");
        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            debug!(booking = id, "update_booking: id not found, no-op");
            return Ok(None);
        };
        if let Some(room_id) = patch.room_id {
            booking.room_id = room_id;
        }
        if let Some(room_name) = patch.room_name {
            booking.room_name = room_name;
        }
        if let Some(check_in) = patch.check_in {
            booking.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            booking.check_out = check_out;
        }
        if let Some(guests) = patch.guests {
            booking.guests = guests;
        }
        if let Some(total_amount) = patch.total_amount {
            booking.total_amount = total_amount;
        }
        if let Some(status) = patch.status {
            booking.status = status;
        }
        if let Some(payment_status) = patch.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(special_requests) = patch.special_requests {
            booking.special_requests = Some(special_requests);
        }
        let updated = booking.clone();
        self.storage.save_hotel_snapshot(KEY_BOOKINGS, &*bookings)?;
        Ok(Some(updated))
    }

    /// Cancellation is a status mutation, not removal: status -> cancelled,
    /// payment status -> refunded.
    pub fn cancel_booking(&self, id: &str) -> HotelResult<Option<Booking>> {
        self.update_booking(
            id,
            BookingPatch {
                status: Some(BookingStatus::Cancelled),
                payment_status: Some(PaymentStatus::Refunded),
                ..BookingPatch::default()
            },
        )
    }

    // --- Contact messages ---

    pub fn messages(&self) -> Vec<ContactMessage> {
        self.messages.read().expect("messages lock poisoned").clone()
    }

    /// Record an inbound contact message; starts out open.
    pub fn add_contact_message(&self, new: NewContactMessage) -> HotelResult<ContactMessage> {
        let message = ContactMessage {
            id: Uuid::new_v4().to_string(),
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            subject: new.subject,
            message: new.message,
            status: MessageStatus::Open,
            response: None,
            created_at: Utc::now(),
        };
        let mut messages = self.messages.write().expect("messages lock poisoned");
        messages.push(message.clone());
        self.storage.save_hotel_snapshot(KEY_MESSAGES, &*messages)?;
        info!(message = %message.id, "contact message recorded");
        Ok(message)
    }

    /// Record a staff response and/or move the status; no-op on missing id.
    pub fn update_contact_message(
        &self,
        id: &str,
        patch: MessagePatch,
    ) -> HotelResult<Option<ContactMessage>> {
        let mut messages = self.messages.write().expect("messages lock poisoned");
        let Some(message) = messages.iter_mut().find(|m| m.id == id) else {
            debug!(message = id, "update_contact_message: id not found, no-op");
            return Ok(None);
        };
        if let Some(status) = patch.status {
            message.status = status;
        }
        if let Some(response) = patch.response {
            message.response = Some(response);
        }
        let updated = message.clone();
        self.storage.save_hotel_snapshot(KEY_MESSAGES, &*messages)?;
        Ok(Some(updated))
    }

    // --- Queries ---

    /// Rooms bookable for the half-open interval [check_in, check_out).
    ///
    /// A room qualifies iff its manual availability flag is true and no
    /// non-cancelled booking on it overlaps the request. Touching intervals
    /// (requested check-in equal to an existing check-out) do not conflict.
    /// The flag itself is never derived from bookings.
    pub fn available_rooms(&self, check_in: NaiveDate, check_out: NaiveDate) -> Vec<Room> {
        let rooms = self.rooms.read().expect("rooms lock poisoned");
        let bookings = self.bookings.read().expect("bookings lock poisoned");

        rooms
            .iter()
            .filter(|room| {
                if !room.is_available {
                    return false;
                }
                let conflict = bookings.iter().any(|b| {
                    b.room_id == room.id
                        && b.status != BookingStatus::Cancelled
                        && check_in < b.check_out
                        && check_out > b.check_in
                });
                !conflict
            })
            .cloned()
            .collect()
    }

    /// Dashboard aggregates over the full catalog and ledger.
    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_at(Utc::now().date_naive())
    }

    /// Aggregation with an explicit "today" so occupancy is testable.
    ///
    /// Occupancy counts qualifying bookings, not distinct rooms (parity with
    /// the original dashboard: two overlapping stays on one room both count).
    pub fn dashboard_stats_at(&self, today: NaiveDate) -> DashboardStats {
        let rooms = self.rooms.read().expect("rooms lock poisoned");
        let bookings = self.bookings.read().expect("bookings lock poisoned");

        let total_rooms = rooms.len();
        let total_bookings = bookings
            .iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .count();
        // Only paymentStatus gates revenue; a cancelled-but-still-paid
        // booking counts until its payment status is separately updated.
        let total_revenue = bookings
            .iter()
            .filter(|b| b.payment_status == PaymentStatus::Paid)
            .map(|b| b.total_amount)
            .sum();

        let occupied = bookings
            .iter()
            .filter(|b| {
                b.status == BookingStatus::CheckedIn
                    || (b.status == BookingStatus::Confirmed
                        && b.check_in <= today
                        && today < b.check_out)
            })
            .count();
        let occupancy_rate = if total_rooms > 0 {
            occupied as f64 / total_rooms as f64 * 100.0
        } else {
            0.0
        };

        let mut recent = bookings.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(5);

        DashboardStats {
            total_rooms,
            total_bookings,
            total_revenue,
            occupancy_rate,
            recent_bookings: recent,
        }
    }
}

/// The three demo rooms seeded on first start.
fn seed_rooms() -> Vec<Room> {
    vec![
        Room {
            id: "1".to_string(),
            name: "Standard Room".to_string(),
            room_type: RoomType::Standard,
            price: 150.0,
            capacity: 2,
            amenities: ["WiFi", "TV", "AC", "Private Bathroom"]
                .map(String::from)
                .to_vec(),
            images: vec!["/assets/standard-room.jpg".to_string()],
            description: "Comfortable standard room with all essential amenities".to_string(),
            is_available: true,
            floor: 2,
            room_number: "201".to_string(),
        },
        Room {
            id: "2".to_string(),
            name: "Deluxe Room".to_string(),
            room_type: RoomType::Deluxe,
            price: 250.0,
            capacity: 3,
            amenities: ["WiFi", "Smart TV", "AC", "Mini Bar", "City View", "Room Service"]
                .map(String::from)
                .to_vec(),
            images: vec!["/assets/deluxe-room.jpg".to_string()],
            description: "Spacious deluxe room with premium amenities and city view".to_string(),
            is_available: true,
            floor: 5,
            room_number: "505".to_string(),
        },
        Room {
            id: "3".to_string(),
            name: "Executive Suite".to_string(),
            room_type: RoomType::Suite,
            price: 450.0,
            capacity: 4,
            amenities: [
                "WiFi",
                "Smart TV",
                "AC",
                "Mini Bar",
                "Ocean View",
                "Room Service",
                "Balcony",
                "Jacuzzi",
            ]
            .map(String::from)
            .to_vec(),
            images: vec!["/assets/suite-room.jpg".to_string()],
            description:
                "Luxurious suite with separate living area, premium amenities and stunning ocean view"
                    .to_string(),
            is_available: true,
            floor: 10,
            room_number: "1001".to_string(),
        },
    ]
}

/// One demo booking on the deluxe room.
fn seed_bookings() -> Vec<Booking> {
    vec![Booking {
        id: "1".to_string(),
        customer_id: "3".to_string(),
        customer_name: "John Customer".to_string(),
        customer_email: "customer@hotel.com".to_string(),
        room_id: "2".to_string(),
        room_name: "Deluxe Room".to_string(),
        check_in: NaiveDate::from_ymd_opt(2024, 7, 20).expect("valid seed date"),
        check_out: NaiveDate::from_ymd_opt(2024, 7, 22).expect("valid seed date"),
        guests: 2,
        total_amount: 500.0,
        status: BookingStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        special_requests: None,
        created_at: Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_ledger(tag: &str) -> (HotelLedger, std::path::PathBuf) {
        let temp_dir = std::env::temp_dir().join(format!("hotelier_test_ledger_{tag}"));
        let _ = fs::remove_dir_all(&temp_dir);
        let storage = Storage::open(temp_dir.to_str().unwrap()).expect("storage");
        (HotelLedger::open(storage).expect("ledger"), temp_dir)
    }

    fn booking_on(room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> NewBooking {
        NewBooking {
            customer_id: "3".to_string(),
            customer_name: "John Customer".to_string(),
            customer_email: "customer@hotel.com".to_string(),
            room_id: room_id.to_string(),
            room_name: "Room".to_string(),
            check_in,
            check_out,
            guests: 2,
            total_amount: 300.0,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            special_requests: None,
        }
    }

    #[test]
    fn test_seeded_collections_on_first_open() {
        let (ledger, dir) = open_ledger("seed");
        assert_eq!(ledger.rooms().len(), 3);
        assert_eq!(ledger.bookings().len(), 1);
        assert!(ledger.messages().is_empty());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_available_rooms_excludes_overlap_and_keeps_touching() {
        let (ledger, dir) = open_ledger("overlap");
        // Seed booking: room "2", [2024-07-20, 2024-07-22)

        // Strict overlap excludes room 2
        let rooms = ledger.available_rooms(date(2024, 7, 21), date(2024, 7, 23));
        assert!(!rooms.iter().any(|r| r.id == "2"));
        assert!(rooms.iter().any(|r| r.id == "1"));
        assert!(rooms.iter().any(|r| r.id == "3"));

        // Touching intervals do not conflict: request starts at the existing
        // check-out date
        let rooms = ledger.available_rooms(date(2024, 7, 22), date(2024, 7, 24));
        assert!(rooms.iter().any(|r| r.id == "2"));

        // Request ending exactly at the existing check-in is fine too
        let rooms = ledger.available_rooms(date(2024, 7, 18), date(2024, 7, 20));
        assert!(rooms.iter().any(|r| r.id == "2"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_availability_flag_is_manual_and_independent_of_dates() {
        let (ledger, dir) = open_ledger("flag");

        ledger
            .update_room(
                "1",
                RoomPatch {
                    is_available: Some(false),
                    ..RoomPatch::default()
                },
            )
            .unwrap();
        // Flagged-off room excluded regardless of dates
        let rooms = ledger.available_rooms(date(2030, 1, 1), date(2030, 1, 2));
        assert!(!rooms.iter().any(|r| r.id == "1"));

        // Booking the room never flips the flag back or off
        ledger
            .create_booking(booking_on("3", date(2030, 1, 1), date(2030, 1, 5)))
            .unwrap();
        assert!(ledger.find_room("3").unwrap().is_available);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cancelling_frees_the_blocked_interval() {
        let (ledger, dir) = open_ledger("cancel");

        let booking = ledger
            .create_booking(booking_on("1", date(2024, 8, 1), date(2024, 8, 3)))
            .unwrap();
        assert!(ledger
            .available_rooms(date(2024, 8, 2), date(2024, 8, 4))
            .iter()
            .all(|r| r.id != "1"));

        let cancelled = ledger.cancel_booking(&booking.id).unwrap().unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);

        // Interval available again on the next query
        assert!(ledger
            .available_rooms(date(2024, 8, 2), date(2024, 8, 4))
            .iter()
            .any(|r| r.id == "1"));
        // The entry is still in the ledger, not deleted
        assert!(ledger.bookings().iter().any(|b| b.id == booking.id));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_end_to_end_booking_scenario() {
        let (ledger, dir) = open_ledger("e2e");

        // Fresh single-room world
        for id in ["1", "2", "3"] {
            ledger.delete_room(id).unwrap();
        }
        let r1 = ledger
            .add_room(Room {
                id: String::new(),
                name: "R1".to_string(),
                room_type: RoomType::Standard,
                price: 100.0,
                capacity: 2,
                amenities: vec![],
                images: vec![],
                description: String::new(),
                is_available: true,
                floor: 1,
                room_number: "101".to_string(),
            })
            .unwrap();
        ledger
            .create_booking(booking_on(&r1.id, date(2024, 8, 1), date(2024, 8, 3)))
            .unwrap();

        // Overlap: 08-02 < 08-03 and 08-04 > 08-01 -> excluded
        assert!(ledger
            .available_rooms(date(2024, 8, 2), date(2024, 8, 4))
            .is_empty());
        // Touching boundary -> included
        let rooms = ledger.available_rooms(date(2024, 8, 3), date(2024, 8, 5));
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, r1.id);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_update_booking_merges_and_missing_id_is_noop() {
        let (ledger, dir) = open_ledger("merge");

        let updated = ledger
            .update_booking(
                "1",
                BookingPatch {
                    status: Some(BookingStatus::CheckedIn),
                    ..BookingPatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, BookingStatus::CheckedIn);
        // Untouched fields survive the merge
        assert_eq!(updated.total_amount, 500.0);
        assert_eq!(updated.payment_status, PaymentStatus::Paid);

        assert!(ledger
            .update_booking("no-such-id", BookingPatch::default())
            .unwrap()
            .is_none());
        assert_eq!(ledger.bookings().len(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_delete_room_does_not_cascade_to_bookings() {
        let (ledger, dir) = open_ledger("cascade");

        assert!(ledger.delete_room("2").unwrap());
        // Seed booking references room "2" and survives the delete
        assert!(ledger.bookings().iter().any(|b| b.room_id == "2"));
        // Deleting again is a no-op
        assert!(!ledger.delete_room("2").unwrap());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_dashboard_stats_semantics() {
        let (ledger, dir) = open_ledger("stats");

        // Seed: 3 rooms, 1 confirmed+paid booking of 500 for [07-20, 07-22)
        let stats = ledger.dashboard_stats_at(date(2024, 7, 20));
        assert_eq!(stats.total_rooms, 3);
        assert_eq!(stats.total_bookings, 1);
        assert_eq!(stats.total_revenue, 500.0);
        // Confirmed and in-window on the 20th: 1 of 3 rooms
        assert!((stats.occupancy_rate - 100.0 / 3.0).abs() < 1e-9);

        // Outside the window nothing is occupied; check-out day excluded
        assert_eq!(ledger.dashboard_stats_at(date(2024, 7, 22)).occupancy_rate, 0.0);

        // Cancelled-but-still-paid keeps counting toward revenue
        ledger
            .update_booking(
                "1",
                BookingPatch {
                    status: Some(BookingStatus::Cancelled),
                    ..BookingPatch::default()
                },
            )
            .unwrap();
        let stats = ledger.dashboard_stats_at(date(2024, 7, 20));
        assert_eq!(stats.total_bookings, 0);
        assert_eq!(stats.total_revenue, 500.0);

        // Until paymentStatus itself changes
        ledger
            .update_booking(
                "1",
                BookingPatch {
                    payment_status: Some(PaymentStatus::Refunded),
                    ..BookingPatch::default()
                },
            )
            .unwrap();
        assert_eq!(ledger.dashboard_stats_at(date(2024, 7, 20)).total_revenue, 0.0);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_dashboard_stats_zero_rooms_no_division_by_zero() {
        let (ledger, dir) = open_ledger("zero");
        for id in ["1", "2", "3"] {
            ledger.delete_room(id).unwrap();
        }
        let stats = ledger.dashboard_stats_at(date(2024, 7, 20));
        assert_eq!(stats.total_rooms, 0);
        assert_eq!(stats.occupancy_rate, 0.0);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_occupancy_counts_bookings_not_distinct_rooms() {
        let (ledger, dir) = open_ledger("doublecount");

        // Two overlapping checked-in stays on the same room both count
        for _ in 0..2 {
            let b = ledger
                .create_booking(booking_on("1", date(2024, 9, 1), date(2024, 9, 5)))
                .unwrap();
            ledger
                .update_booking(
                    &b.id,
                    BookingPatch {
                        status: Some(BookingStatus::CheckedIn),
                        ..BookingPatch::default()
                    },
                )
                .unwrap();
        }
        let stats = ledger.dashboard_stats_at(date(2024, 9, 2));
        assert!((stats.occupancy_rate - 200.0 / 3.0).abs() < 1e-9);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_recent_bookings_newest_first_capped_at_five() {
        let (ledger, dir) = open_ledger("recent");

        let base = Utc::now();
        for i in 0..6 {
            ledger
                .add_booking(Booking {
                    id: format!("b{i}"),
                    customer_id: "3".to_string(),
                    customer_name: "John Customer".to_string(),
                    customer_email: "customer@hotel.com".to_string(),
                    room_id: "1".to_string(),
                    room_name: "Standard Room".to_string(),
                    check_in: date(2024, 10, 1),
                    check_out: date(2024, 10, 2),
                    guests: 1,
                    total_amount: 150.0,
                    status: BookingStatus::Confirmed,
                    payment_status: PaymentStatus::Pending,
                    special_requests: None,
                    created_at: base + Duration::minutes(i),
                })
                .unwrap();
        }

        let stats = ledger.dashboard_stats_at(date(2024, 10, 1));
        assert_eq!(stats.recent_bookings.len(), 5);
        assert_eq!(stats.recent_bookings[0].id, "b5");
        assert_eq!(stats.recent_bookings[4].id, "b1");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_contact_messages_lifecycle() {
        let (ledger, dir) = open_ledger("contact");

        let msg = ledger
            .add_contact_message(NewContactMessage {
                customer_name: "Jane".to_string(),
                customer_email: "jane@example.com".to_string(),
                subject: "Late arrival".to_string(),
                message: "We land after midnight".to_string(),
            })
            .unwrap();
        assert_eq!(msg.status, MessageStatus::Open);
        assert!(msg.response.is_none());

        let updated = ledger
            .update_contact_message(
                &msg.id,
                MessagePatch {
                    status: Some(MessageStatus::Resolved),
                    response: Some("Front desk is staffed 24/7".to_string()),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, MessageStatus::Resolved);
        assert_eq!(updated.response.as_deref(), Some("Front desk is staffed 24/7"));

        assert!(ledger
            .update_contact_message("missing", MessagePatch::default())
            .unwrap()
            .is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_mutations_write_through_and_survive_restart() {
        let temp_dir = std::env::temp_dir().join("hotelier_test_ledger_restart");
        let _ = fs::remove_dir_all(&temp_dir);
        let path = temp_dir.to_str().unwrap().to_string();

        let booking_id;
        {
            let storage = Storage::open(&path).unwrap();
            let ledger = HotelLedger::open(storage).unwrap();
            booking_id = ledger
                .create_booking(booking_on("1", date(2024, 8, 1), date(2024, 8, 3)))
                .unwrap()
                .id;
            ledger.delete_room("3").unwrap();
        }

        let storage = Storage::open(&path).unwrap();
        let ledger = HotelLedger::open(storage).unwrap();
        assert_eq!(ledger.rooms().len(), 2);
        assert!(ledger.bookings().iter().any(|b| b.id == booking_id));

        let _ = fs::remove_dir_all(temp_dir);
    }
}
