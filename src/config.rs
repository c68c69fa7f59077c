//! Directives from a `.properties` file.
//!
//! Recognized keys:
//! - `skipAttribute.<Owner>.<property>=true` doesn't bind that property of the type `Owner`.
//! - `fixRawType.<Owner>.<property>=<TypeArgument>` gives the raw type of that property the type argument.
//!
//! `Owner` is the binary name of the declaring type, like `com.app.Outer$Inner`. Without any configuration everything
//! is bound.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use jtype::tree::class::ClassName;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
	entries: IndexMap<String, String>,
}

impl Config {
	pub fn new() -> Config {
		Config::default()
	}

	/// Parses `.properties` text: `key=value` or `key: value` lines; lines starting with `#` or `!` are comments.
	///
	/// A later entry replaces an earlier one with the same key.
	pub fn parse(text: &str) -> Result<Config> {
		let mut config = Config::new();
		for (i, line) in text.lines().enumerate() {
			let line_number = i + 1;
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
				continue;
			}

			let (key, value) = parse_line(line)
				.with_context(|| anyhow!("in line {line_number}: {line:?}"))?;
			config.entries.insert(key.to_owned(), value.to_owned());
		}
		Ok(config)
	}

	pub fn read(path: impl AsRef<Path>) -> Result<Config> {
		let path = path.as_ref();
		let mut text = String::new();
		File::open(path)
			.and_then(|mut file| file.read_to_string(&mut text))
			.with_context(|| anyhow!("failed to read config file {path:?}"))?;
		Config::parse(&text)
			.with_context(|| anyhow!("failed to parse config file {path:?}"))
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Config {
		self.entries.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn skip_attribute(&self, owner: &ClassName, property: &str) -> bool {
		self.get(&format!("skipAttribute.{owner}.{property}"))
			.is_some_and(|value| value.eq_ignore_ascii_case("true"))
	}

	pub fn fix_raw_type(&self, owner: &ClassName, property: &str) -> Option<&str> {
		self.get(&format!("fixRawType.{owner}.{property}"))
			.filter(|value| !value.is_empty())
	}
}

fn parse_line(line: &str) -> Result<(&str, &str)> {
	let (key, value) = match line.find(['=', ':']) {
		Some(separator) => (&line[..separator], &line[separator + 1..]),
		// a key without any value
		None => (line, ""),
	};

	let key = key.trim_end();
	if key.is_empty() {
		bail!("empty key");
	}
	Ok((key, value.trim_start()))
}
