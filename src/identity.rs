//! Identity store: principal directory, login/logout/registration, and the
//! persisted current-session record.
//!
//! The directory is memory-resident and seeded with three fixed demo accounts
//! (one per role). Only the current session survives a restart: successful
//! login/registration writes the password-stripped principal through to
//! storage, logout clears it.

use std::sync::RwLock;

use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::error::{HotelError, HotelResult};
use crate::models::{NewPrincipal, Principal, Role, StoredPrincipal};
use crate::storage::Storage;

pub struct IdentityStore {
    storage: Storage,
    directory: RwLock<Vec<StoredPrincipal>>,
    current: RwLock<Option<Principal>>,
}

impl IdentityStore {
    /// Construct the store: seed the demo directory and restore any persisted
    /// session.
    pub fn open(storage: Storage) -> HotelResult<Self> {
        let directory = seed_directory()?;
        let current: Option<Principal> = storage.load_session()?;
        if let Some(p) = &current {
            debug!(principal = %p.email, "restored persisted session");
        }
        Ok(Self {
            storage,
            directory: RwLock::new(directory),
            current: RwLock::new(current),
        })
    }

    /// Exact email match plus bcrypt verify. On success the stripped
    /// principal becomes the current session and is persisted. Bad
    /// credentials yield Ok(None), never an error.
    pub fn login(&self, email: &str, password: &str) -> HotelResult<Option<Principal>> {
        let found = {
            let directory = self.directory.read().expect("directory lock poisoned");
            directory
                .iter()
                .find(|entry| entry.principal.email == email)
                .cloned()
        };

        let Some(entry) = found else {
            info!(email, "login failed: unknown email");
            return Ok(None);
        };
        if !verify_password(password, &entry.password_hash)? {
            info!(email, "login failed: bad password");
            return Ok(None);
        }

        self.set_session(entry.principal.clone())?;
        info!(email, role = ?entry.principal.role, "login succeeded");
        Ok(Some(entry.principal))
    }

    /// Clear the in-memory session and its persisted record.
    pub fn logout(&self) -> HotelResult<()> {
        *self.current.write().expect("session lock poisoned") = None;
        self.storage.clear_session()?;
        info!("session cleared");
        Ok(())
    }

    /// Append a new principal and auto-log-in. Email uniqueness is enforced
    /// here only; a conflict leaves both the directory and the current
    /// session untouched.
    pub fn register(&self, new: NewPrincipal) -> HotelResult<Principal> {
        let mut directory = self.directory.write().expect("directory lock poisoned");
        if directory.iter().any(|entry| entry.principal.email == new.email) {
            return Err(HotelError::RegistrationConflict(new.email));
        }

        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            email: new.email,
            name: new.name,
            role: new.role,
            phone: new.phone,
            address: new.address,
        };
        directory.push(StoredPrincipal {
            principal: principal.clone(),
            password_hash: hash_password(&new.password)?,
        });
        drop(directory);

        self.set_session(principal.clone())?;
        info!(email = %principal.email, "registered new principal");
        Ok(principal)
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<Principal> {
        self.current.read().expect("session lock poisoned").clone()
    }

    /// Look up a directory entry by id (password stripped).
    pub fn find(&self, id: &str) -> Option<Principal> {
        let directory = self.directory.read().expect("directory lock poisoned");
        directory
            .iter()
            .find(|entry| entry.principal.id == id)
            .map(|entry| entry.principal.clone())
    }

    fn set_session(&self, principal: Principal) -> HotelResult<()> {
        self.storage.save_session(&principal)?;
        *self.current.write().expect("session lock poisoned") = Some(principal);
        Ok(())
    }
}

/// The three fixed demo accounts, one per role.
fn seed_directory() -> HotelResult<Vec<StoredPrincipal>> {
    let seeds = [
        ("1", "admin@hotel.com", "admin123", "Admin User", Role::Admin, Some("+1234567890"), None),
        ("2", "staff@hotel.com", "staff123", "Staff Member", Role::Staff, Some("+1234567891"), None),
        (
            "3",
            "customer@hotel.com",
            "customer123",
            "John Customer",
            Role::Customer,
            Some("+1234567892"),
            Some("123 Main St, City, State"),
        ),
    ];

    seeds
        .into_iter()
        .map(|(id, email, password, name, role, phone, address)| {
            Ok(StoredPrincipal {
                principal: Principal {
                    id: id.to_string(),
                    email: email.to_string(),
                    name: name.to_string(),
                    role,
                    phone: phone.map(str::to_string),
                    address: address.map(str::to_string),
                },
                password_hash: hash_password(password)?,
            })
        })
        .collect()
}
