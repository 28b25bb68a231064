//! redb-based storage layer for the booking ledger
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `bookings` | `(slot_key, booking_number)` | `Booking` (JSON) | Append-only booking records |
//! | `meta` | `&str` | `u64` | Booking number counter |
//!
//! Keying bookings by `(slot_key, booking_number)` makes the per-slot taken
//! count a single range scan. The counter lives in its own table and is only
//! ever incremented inside the same write transaction that appends the
//! booking, so numbers are unique for the lifetime of the store and never
//! reused.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns the booking is on disk, and an aborted transaction leaves the
//! file byte-for-byte unchanged.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::ledger::Booking;

/// Booking records: key = (slot_key, booking_number), value = JSON-serialized Booking
const BOOKINGS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("bookings");

/// Counters: key = counter name, value = current value
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const BOOKING_NUMBER_KEY: &str = "booking_number";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Booking store backed by redb
#[derive(Clone)]
pub struct BookingStorage {
    db: Arc<Database>,
}

impl BookingStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(BOOKINGS_TABLE)?;
            let mut meta = write_txn.open_table(META_TABLE)?;
            if meta.get(BOOKING_NUMBER_KEY)?.is_none() {
                meta.insert(BOOKING_NUMBER_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    ///
    /// redb serializes writers: this blocks until the previous write
    /// transaction commits or aborts. The ledger relies on that for its
    /// check-then-append critical section.
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Booking Number Counter ==========

    /// Increment and return the booking number (within transaction)
    pub fn next_booking_number(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut table = txn.open_table(META_TABLE)?;
        let current = table
            .get(BOOKING_NUMBER_KEY)?
            .map(|g| g.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(BOOKING_NUMBER_KEY, next)?;
        Ok(next)
    }

    /// Current booking number counter (read-only)
    pub fn current_booking_number(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(META_TABLE)?;
        Ok(table
            .get(BOOKING_NUMBER_KEY)?
            .map(|g| g.value())
            .unwrap_or(0))
    }

    // ========== Booking Operations ==========

    /// Append a booking (within transaction)
    pub fn insert_booking(&self, txn: &WriteTransaction, booking: &Booking) -> StorageResult<()> {
        let mut table = txn.open_table(BOOKINGS_TABLE)?;
        let slot_key = crate::calendar::slot_key(&booking.day, &booking.time);
        let value = serde_json::to_vec(booking)?;
        table.insert((slot_key.as_str(), booking.booking_number), value.as_slice())?;
        Ok(())
    }

    /// Sum of party sizes for a slot (within a write transaction)
    ///
    /// Used by the admission path so the count and the append observe the
    /// same store state.
    pub fn taken_for_slot_txn(
        &self,
        txn: &WriteTransaction,
        slot_key: &str,
    ) -> StorageResult<u32> {
        let table = txn.open_table(BOOKINGS_TABLE)?;
        let mut taken = 0u32;
        for result in table.range((slot_key, 0u64)..=(slot_key, u64::MAX))? {
            let (_key, value) = result?;
            let booking: Booking = serde_json::from_slice(value.value())?;
            taken += booking.people;
        }
        Ok(taken)
    }

    /// Sum of party sizes for a slot (read-only)
    pub fn taken_for_slot(&self, slot_key: &str) -> StorageResult<u32> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BOOKINGS_TABLE)?;
        let mut taken = 0u32;
        for result in table.range((slot_key, 0u64)..=(slot_key, u64::MAX))? {
            let (_key, value) = result?;
            let booking: Booking = serde_json::from_slice(value.value())?;
            taken += booking.people;
        }
        Ok(taken)
    }

    /// All bookings in the store, in key order
    pub fn all_bookings(&self) -> StorageResult<Vec<Booking>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BOOKINGS_TABLE)?;
        let mut bookings = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            bookings.push(serde_json::from_slice(value.value())?);
        }
        Ok(bookings)
    }

    /// Find a booking by number
    ///
    /// Full scan; the store holds one booking window's worth of records.
    pub fn find_booking(&self, booking_number: u64) -> StorageResult<Option<Booking>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BOOKINGS_TABLE)?;
        for result in table.iter()? {
            let (key, value) = result?;
            if key.value().1 == booking_number {
                return Ok(Some(serde_json::from_slice(value.value())?));
            }
        }
        Ok(None)
    }
}
