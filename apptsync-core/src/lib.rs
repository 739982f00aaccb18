//! Core types for apptsync.
//!
//! This crate holds everything between the terminal front end and the remote
//! appointment service:
//! - `Appointment` and the wire types for the remote service
//! - `DurableCache` for cold-start seeding across restarts
//! - `AppointmentStore`, the in-memory mirror the UI renders from
//! - `SyncLoop`, which polls the remote store on a fixed interval
//! - `ConversationSession`, the free-text command channel

pub mod appointment;
pub mod cache;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod error;
pub mod remote;
pub mod store;
pub mod sync_loop;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use appointment::{Appointment, AppointmentId};
pub use cache::{DirStore, DurableCache, KeyValueStore, KvCache, MemoryStore};
pub use config::ApptsyncConfig;
pub use conversation::{ConversationMessage, ConversationSession, Sender, SessionId};
pub use error::{ApptsyncError, ApptsyncResult, SyncError};
pub use remote::{Document, HttpRemote, RemoteSyncClient};
pub use store::{AppointmentStore, StoreSnapshot};
pub use sync_loop::{LoopState, SyncLoop};
