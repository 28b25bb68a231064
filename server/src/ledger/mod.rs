//! Availability ledger
//!
//! Owns the persisted set of bookings and the capacity invariant: for every
//! slot, the sum of party sizes over its bookings never exceeds the slot
//! capacity. Bookings are immutable and append-only for the lifetime of the
//! booking window; there is no update or cancel path.
//!
//! # Admission critical section
//!
//! `admit` re-reads the taken count and appends the booking inside one redb
//! write transaction. Write transactions are serialized by redb, so two
//! concurrent admissions for the same slot cannot both observe the old count
//! and jointly overshoot capacity. External I/O (payment, email) is never
//! performed while the transaction is open.

mod storage;

pub use storage::{BookingStorage, StorageError, StorageResult};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::calendar::{SlotCalendar, slot_key};

/// How the customer pays. Card bookings are redirected to hosted checkout;
/// cash bookings are confirmed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// A confirmed or pending reservation against one slot. Immutable once
/// created; the slot stays occupied regardless of payment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_number: u64,
    pub day: String,
    pub time: String,
    pub people: u32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub payment: PaymentMethod,
    /// Unix millis
    pub created_at: i64,
}

/// A validated booking request, ready for admission.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub day: String,
    pub time: String,
    pub people: u32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub payment: PaymentMethod,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Unknown session: {day} {time}")]
    InvalidSlot { day: String, time: String },

    #[error("Not enough spots left for this session ({remaining} remaining)")]
    CapacityExceeded { remaining: u32 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// The availability ledger: persisted bookings plus the published calendar.
#[derive(Clone)]
pub struct BookingLedger {
    storage: BookingStorage,
    calendar: SlotCalendar,
}

impl BookingLedger {
    pub fn new(storage: BookingStorage, calendar: SlotCalendar) -> Self {
        Self { storage, calendar }
    }

    pub fn calendar(&self) -> &SlotCalendar {
        &self.calendar
    }

    /// Taken count per slot key, for every slot in the published calendar.
    ///
    /// Always recomputed from the store; slots without bookings report 0 so
    /// clients never need a missing-key default.
    pub fn availability(&self) -> LedgerResult<BTreeMap<String, u32>> {
        let mut taken: BTreeMap<String, u32> =
            self.calendar.slot_keys().map(|k| (k, 0)).collect();
        for booking in self.storage.all_bookings()? {
            *taken
                .entry(slot_key(&booking.day, &booking.time))
                .or_insert(0) += booking.people;
        }
        Ok(taken)
    }

    /// Admit a booking if the slot has room.
    ///
    /// Re-reads the taken count and appends inside a single write
    /// transaction. A rejection aborts the transaction and leaves the store
    /// unchanged, booking number counter included.
    pub fn admit(&self, new: NewBooking) -> LedgerResult<Booking> {
        if !self.calendar.contains(&new.day, &new.time) {
            return Err(LedgerError::InvalidSlot {
                day: new.day,
                time: new.time,
            });
        }

        let capacity = self.calendar.capacity();
        let key = slot_key(&new.day, &new.time);

        let txn = self.storage.begin_write()?;
        let taken = self.storage.taken_for_slot_txn(&txn, &key)?;
        if u64::from(taken) + u64::from(new.people) > u64::from(capacity) {
            txn.abort().map_err(StorageError::from)?;
            return Err(LedgerError::CapacityExceeded {
                remaining: capacity.saturating_sub(taken),
            });
        }

        let booking = Booking {
            booking_number: self.storage.next_booking_number(&txn)?,
            day: new.day,
            time: new.time,
            people: new.people,
            name: new.name,
            email: new.email,
            phone: new.phone,
            payment: new.payment,
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        self.storage.insert_booking(&txn, &booking)?;
        txn.commit().map_err(StorageError::from)?;

        Ok(booking)
    }

    /// Look up a booking by number.
    pub fn find(&self, booking_number: u64) -> LedgerResult<Option<Booking>> {
        Ok(self.storage.find_booking(booking_number)?)
    }
}
