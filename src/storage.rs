use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;

use crate::error::HotelResult;

/// Snapshot keys, mirroring the storage layout the front end used.
pub const KEY_CURRENT_USER: &str = "currentUser";
pub const KEY_ROOMS: &str = "hotelRooms";
pub const KEY_BOOKINGS: &str = "hotelBookings";
pub const KEY_MESSAGES: &str = "hotelMessages";

/// Sled-backed snapshot store.
///
/// Each collection owner writes its full collection as one JSON value under a
/// fixed key on every mutation (write-through, no diffing, no transactions).
/// Trees separate the two owners:
/// - identity: the persisted current-session record
/// - hotel: room, booking and contact-message collection snapshots
#[allow(dead_code)] // db kept for future ops like flush/close on Sled
#[derive(Clone)] // Clone for sharing across stores (Sled internals cheap to clone)
pub struct Storage {
    db: Db,
    identity_tree: sled::Tree,
    hotel_tree: sled::Tree,
}

impl Storage {
    /// Open or create the Sled database at the given path.
    pub fn open(path: &str) -> HotelResult<Self> {
        let db = sled::open(path)?;
        let identity_tree = db.open_tree("identity")?;
        let hotel_tree = db.open_tree("hotel")?;
        Ok(Self {
            db,
            identity_tree,
            hotel_tree,
        })
    }

    /// Write a full collection snapshot (JSON via Serde) under `key`.
    pub fn save_hotel_snapshot<T: Serialize>(&self, key: &str, value: &T) -> HotelResult<()> {
        save(&self.hotel_tree, key, value)
    }

    /// Read a collection snapshot back, or None if never written.
    pub fn load_hotel_snapshot<T: DeserializeOwned>(&self, key: &str) -> HotelResult<Option<T>> {
        load(&self.hotel_tree, key)
    }

    /// Persist the current-session principal (password already stripped).
    pub fn save_session<T: Serialize>(&self, value: &T) -> HotelResult<()> {
        save(&self.identity_tree, KEY_CURRENT_USER, value)
    }

    pub fn load_session<T: DeserializeOwned>(&self) -> HotelResult<Option<T>> {
        load(&self.identity_tree, KEY_CURRENT_USER)
    }

    /// Drop the persisted session record (logout).
    pub fn clear_session(&self) -> HotelResult<()> {
        self.identity_tree.remove(KEY_CURRENT_USER.as_bytes())?;
        Ok(())
    }
}

fn save<T: Serialize>(tree: &sled::Tree, key: &str, value: &T) -> HotelResult<()> {
    let json_bytes = serde_json::to_vec(value)?;
    tree.insert(key.as_bytes(), json_bytes)?;
    Ok(())
}

fn load<T: DeserializeOwned>(tree: &sled::Tree, key: &str) -> HotelResult<Option<T>> {
    match tree.get(key.as_bytes())? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, RoomType};
    use std::fs;

    fn demo_room(id: &str) -> Room {
        Room {
            id: id.to_string(),
            name: "Standard Room".to_string(),
            room_type: RoomType::Standard,
            price: 150.0,
            capacity: 2,
            amenities: vec!["WiFi".to_string(), "TV".to_string()],
            images: vec![],
            description: "Comfortable standard room".to_string(),
            is_available: true,
            floor: 2,
            room_number: "201".to_string(),
        }
    }

    #[test]
    fn test_snapshot_roundtrip_and_session_clear() {
        // Use temp dir for isolated test DB
        let temp_dir = std::env::temp_dir().join("hotelier_test_storage");
        let _ = fs::remove_dir_all(&temp_dir);

        let storage = Storage::open(temp_dir.to_str().unwrap()).expect("Failed to open storage");

        // Full-collection snapshot write-through
        let rooms = vec![demo_room("r1"), demo_room("r2")];
        storage
            .save_hotel_snapshot(KEY_ROOMS, &rooms)
            .expect("snapshot write failed");
        let loaded: Vec<Room> = storage
            .load_hotel_snapshot(KEY_ROOMS)
            .expect("snapshot read failed")
            .expect("snapshot missing");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "r1");

        // Missing snapshot reads back as None
        let bookings: Option<Vec<Room>> = storage.load_hotel_snapshot(KEY_BOOKINGS).unwrap();
        assert!(bookings.is_none());

        // Session save + clear
        storage.save_session(&"probe".to_string()).unwrap();
        let session: Option<String> = storage.load_session().unwrap();
        assert_eq!(session.as_deref(), Some("probe"));
        storage.clear_session().unwrap();
        let session: Option<String> = storage.load_session().unwrap();
        assert!(session.is_none());

        let _ = fs::remove_dir_all(temp_dir);
    }

    #[test]
    fn test_room_snapshot_uses_original_field_names() {
        // Snapshot shape stays compatible with the original storage layout
        let json = serde_json::to_value(demo_room("r1")).unwrap();
        assert!(json.get("isAvailable").is_some());
        assert!(json.get("roomNumber").is_some());
        assert_eq!(json.get("type").unwrap(), "standard");
    }
}
