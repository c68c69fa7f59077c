//! One run over a set of requested types: build, emit, write, and update the registry.

use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use log::{error, info};
use jtype::provider::MetadataProvider;
use crate::bind_keyword;
use crate::builder::{BindingForest, TreeBuilder};
use crate::config::Config;
use crate::emit::emit_tree;
use crate::registry::{RegistryStore, RootRegistry};

/// Where generated sources go.
pub trait Filer {
	/// Writes the source of a top level class, given by its fully qualified name.
	fn write_source(&mut self, class_name: &str, code: &str) -> Result<()>;
}

/// Writes sources to `<package path>/<Class>.java` below a directory.
#[derive(Debug, Clone)]
pub struct DirFiler {
	root: PathBuf,
}

impl DirFiler {
	pub fn new(root: impl Into<PathBuf>) -> DirFiler {
		DirFiler { root: root.into() }
	}

	pub fn path_of(&self, class_name: &str) -> PathBuf {
		let mut path = self.root.clone();
		let mut segments: Vec<&str> = class_name.split('.').collect();
		let simple_name = segments.pop().unwrap_or_default();
		for segment in segments {
			path.push(segment);
		}
		path.push(format!("{simple_name}.java"));
		path
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl Filer for DirFiler {
	fn write_source(&mut self, class_name: &str, code: &str) -> Result<()> {
		let path = self.path_of(class_name);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)
				.with_context(|| anyhow!("failed to create directory {parent:?}"))?;
		}
		std::fs::write(&path, code)
			.with_context(|| anyhow!("failed to write {class_name} to {path:?}"))
	}
}

/// Keeps sources in memory, in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiler {
	sources: IndexMap<String, String>,
}

impl MemoryFiler {
	pub fn new() -> MemoryFiler {
		MemoryFiler::default()
	}

	pub fn get(&self, class_name: &str) -> Option<&str> {
		self.sources.get(class_name).map(String::as_str)
	}

	pub fn class_names(&self) -> impl Iterator<Item=&str> {
		self.sources.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}

impl Filer for MemoryFiler {
	fn write_source(&mut self, class_name: &str, code: &str) -> Result<()> {
		self.sources.insert(class_name.to_owned(), code.to_owned());
		Ok(())
	}
}

/// What a pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
	/// The requested types that couldn't be built, with the reason.
	pub failed: Vec<(String, String)>,
	/// All classes written, including the bind keyword class.
	pub written: Vec<String>,
	/// The registry after the pass.
	pub registry: RootRegistry,
}

pub struct Pass<'a, P> {
	provider: &'a P,
	config: &'a Config,
}

impl<'a, P: MetadataProvider> Pass<'a, P> {
	pub fn new(provider: &'a P, config: &'a Config) -> Pass<'a, P> {
		Pass { provider, config }
	}

	/// Builds the bindings of the requested types and all types reachable from them, and writes them.
	///
	/// A requested type that can't be built is reported and skipped. Failing to write anything ends the pass, but
	/// everything written up to then stays.
	pub fn run<F: Filer, S: RegistryStore>(&self, types: &[String], filer: &mut F, store: &S) -> Result<PassReport> {
		let mut report = PassReport::default();

		let builder = TreeBuilder::new(self.provider, self.config);
		let mut forest = BindingForest::new();
		for class in types {
			if let Err(e) = builder.build(&mut forest, class) {
				error!("failed to generate bindings for {class}: {e:#}");
				report.failed.push((class.clone(), format!("{e:#}")));
			}
		}

		let mut recorded = RootRegistry::new();
		for (id, tree) in forest.iter() {
			for class in emit_tree(&forest, id).iter() {
				filer.write_source(class.full_name(), &class.to_code())
					.with_context(|| anyhow!("failed to write the bindings of {}", tree.class))?;
				report.written.push(class.full_name().to_owned());
			}
			recorded.record(tree.class.as_str());
		}

		let previous = store.load()
			.with_context(|| anyhow!("failed to load the registry"))?;
		let registry = RootRegistry::merge(&previous, &recorded);
		store.store(&registry)
			.with_context(|| anyhow!("failed to store the registry"))?;

		let bind_keyword = bind_keyword::generate(&registry, self.provider);
		filer.write_source(bind_keyword.full_name(), &bind_keyword.to_code())?;
		report.written.push(bind_keyword.full_name().to_owned());

		info!(
			"generated the bindings of {} types ({} failed), the registry has {} types",
			forest.len(), report.failed.len(), registry.len(),
		);
		report.registry = registry;
		Ok(report)
	}
}
