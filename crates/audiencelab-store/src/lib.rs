//! Audience persistence for AudienceLab.
//!
//! The whole audience collection lives under one key of a synchronous
//! [`BlobStore`] and every mutation is a full read-modify-write of that blob.
//! Fine for one local user; not safe under concurrent writers.

pub mod audiences;
pub mod blob;
pub mod error;

pub use audiences::{AudienceStore, STORAGE_KEY};
pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use error::StoreError;
