//! Storage contracts and built-in backends for the session's credential pair.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::CredentialPair};

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the single credential slot of a session.
///
/// Implementations replace the pair as one value; a load never observes a half-written pair.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the stored pair, if any.
	fn load(&self) -> StoreFuture<'_, Option<CredentialPair>>;

	/// Persists `pair`, replacing whatever was stored.
	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()>;

	/// Removes the stored pair. Clearing an empty store succeeds.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
