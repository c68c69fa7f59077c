//! The set of all types bindings were generated for, kept across passes.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use log::debug;

/// An append-only set of fully qualified type names, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootRegistry {
	names: BTreeSet<String>,
}

impl RootRegistry {
	pub fn new() -> RootRegistry {
		RootRegistry::default()
	}

	/// Records a name, returning `false` if it was already present.
	pub fn record(&mut self, name: impl Into<String>) -> bool {
		self.names.insert(name.into())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	pub fn snapshot(&self) -> BTreeSet<String> {
		self.names.clone()
	}

	pub fn merge(previous: &RootRegistry, new: &RootRegistry) -> RootRegistry {
		RootRegistry {
			names: previous.names.union(&new.names).cloned().collect(),
		}
	}

	pub fn merge_from(&mut self, other: &RootRegistry) {
		self.names.extend(other.names.iter().cloned());
	}

	/// Forgets all names. This is the only way names ever get removed.
	pub fn reset(&mut self) {
		self.names.clear();
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item=&str> {
		self.names.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for RootRegistry {
	fn from_iter<T: IntoIterator<Item=S>>(iter: T) -> Self {
		RootRegistry {
			names: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// Where the registry is kept between passes.
pub trait RegistryStore {
	fn load(&self) -> Result<RootRegistry>;

	fn store(&self, registry: &RootRegistry) -> Result<()>;
}

/// Keeps the registry in a file, one name per line, sorted.
#[derive(Debug, Clone)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> FileStore {
		FileStore { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl RegistryStore for FileStore {
	/// Reads the registry, a missing file is an empty registry.
	fn load(&self) -> Result<RootRegistry> {
		let file = match File::open(&self.path) {
			Ok(file) => file,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!("no registry at {:?} yet", self.path);
				return Ok(RootRegistry::new());
			},
			Err(e) => return Err(e).with_context(|| anyhow!("failed to open registry {:?}", self.path)),
		};

		let mut registry = RootRegistry::new();
		for line in BufReader::new(file).lines() {
			let line = line.with_context(|| anyhow!("failed to read registry {:?}", self.path))?;
			let name = line.trim();
			if !name.is_empty() {
				registry.record(name);
			}
		}
		Ok(registry)
	}

	fn store(&self, registry: &RootRegistry) -> Result<()> {
		if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)
				.with_context(|| anyhow!("failed to create directory {parent:?} for the registry"))?;
		}

		let mut file = File::create(&self.path)
			.with_context(|| anyhow!("failed to create registry {:?}", self.path))?;
		for name in registry.iter() {
			writeln!(file, "{name}")
				.with_context(|| anyhow!("failed to write registry {:?}", self.path))?;
		}
		Ok(())
	}
}

/// Keeps the registry in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
	registry: RefCell<RootRegistry>,
}

impl MemoryStore {
	pub fn new() -> MemoryStore {
		MemoryStore::default()
	}

	pub fn with(registry: RootRegistry) -> MemoryStore {
		MemoryStore { registry: RefCell::new(registry) }
	}

	pub fn registry(&self) -> RootRegistry {
		self.registry.borrow().clone()
	}
}

impl RegistryStore for MemoryStore {
	fn load(&self) -> Result<RootRegistry> {
		Ok(self.registry())
	}

	fn store(&self, registry: &RootRegistry) -> Result<()> {
		*self.registry.borrow_mut() = registry.clone();
		Ok(())
	}
}
