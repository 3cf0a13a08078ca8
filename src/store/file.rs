//! File-backed [`KeyValueStore`] for CLIs and desktop tools that persist a session token.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{KeyValueStore, StoreError},
};

/// Persists entries as a JSON object on disk.
///
/// Every [`get_item`](KeyValueStore::get_item) re-reads the file, so edits made by another
/// process (logout, token rotation) are visible on the next read. Writes replace the file
/// atomically through a sibling `.tmp` file.
#[derive(Debug)]
pub struct FileKeyValueStore {
	path: PathBuf,
	write_guard: Mutex<()>,
}
impl FileKeyValueStore {
	/// Opens a store at the provided path; the file itself is created on first write.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		Ok(Self { path, write_guard: Mutex::new(()) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
		let bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
			Err(e) =>
				return Err(StoreError::Backend {
					message: format!("Failed to read {}: {e}", path.display()),
				}),
		};

		if bytes.is_empty() {
			return Ok(BTreeMap::new());
		}

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist(&self, contents: &BTreeMap<String, String>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn update<F>(&self, mutate: F) -> Result<(), StoreError>
	where
		F: FnOnce(&mut BTreeMap<String, String>),
	{
		let _guard = self.write_guard.lock();
		let mut snapshot = Self::load_snapshot(&self.path)?;

		mutate(&mut snapshot);

		self.persist(&snapshot)
	}
}
impl KeyValueStore for FileKeyValueStore {
	fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(Self::load_snapshot(&self.path)?.remove(key))
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self.update(|entries| {
			entries.insert(key.to_owned(), value.to_owned());
		})
	}

	fn remove_item(&self, key: &str) -> Result<(), StoreError> {
		self.update(|entries| {
			entries.remove(key);
		})
	}
}
