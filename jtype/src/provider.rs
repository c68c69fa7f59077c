use std::io::Read;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use crate::tree::class::{ClassName, TypeElement};

/// Supplies type metadata.
///
/// Implementations only need to be able to find a type by its binary name. The classification of symbols as type
/// variables has a default implementation looking at the type parameters of the context type.
pub trait MetadataProvider {
	/// Resolves a fully qualified binary class name, like `com.app.Outer$Inner`, to its declaration.
	fn type_element(&self, name: &str) -> Option<&TypeElement>;

	/// Checks if `symbol` is really a type variable declared by `context`.
	///
	/// Compilers sometimes report a type as a type variable even though it's a pre-generics class, so this needs to
	/// be checked before treating a symbol as a type variable.
	fn is_type_variable_of(&self, symbol: &str, context: &TypeElement) -> bool {
		context.is_type_parameter(symbol)
	}
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
	fn type_element(&self, name: &str) -> Option<&TypeElement> {
		(**self).type_element(name)
	}

	fn is_type_variable_of(&self, symbol: &str, context: &TypeElement) -> bool {
		(**self).is_type_variable_of(symbol, context)
	}
}

/// A [`MetadataProvider`] holding all types in memory, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassPool {
	classes: IndexMap<ClassName, TypeElement>,
}

#[derive(Deserialize)]
struct ClassPoolFile {
	classes: Vec<TypeElement>,
}

impl ClassPool {
	pub fn new() -> ClassPool {
		ClassPool::default()
	}

	/// Adds a type, failing if a type of that name was already added.
	pub fn add(&mut self, element: TypeElement) -> Result<()> {
		if self.classes.contains_key(&element.name) {
			bail!("type {} is already present in the class pool", element.name);
		}
		self.classes.insert(element.name.clone(), element);
		Ok(())
	}

	pub fn with(mut self, element: TypeElement) -> Result<ClassPool> {
		self.add(element)?;
		Ok(self)
	}

	/// Reads a json document of the form `{ "classes": [ ... ] }`.
	///
	/// ```
	/// use jtype::provider::{ClassPool, MetadataProvider};
	///
	/// let json = r#"{ "classes": [ {
	///     "name": "com.app.Foo",
	///     "fields": [ { "access": "public final", "name": "id", "type": "java.lang.String" } ],
	///     "methods": [ { "access": "public", "name": "getName", "return_type": "java.lang.String" } ]
	/// } ] }"#;
	/// let pool = ClassPool::read(json.as_bytes()).unwrap();
	///
	/// let foo = pool.type_element("com.app.Foo").unwrap();
	/// assert!(foo.fields[0].access.is_final);
	/// assert_eq!(foo.methods[0].name, "getName");
	/// ```
	pub fn read(reader: impl Read) -> Result<ClassPool> {
		let file: ClassPoolFile = serde_json::from_reader(reader)
			.with_context(|| anyhow!("failed to parse class pool json"))?;

		let mut pool = ClassPool::new();
		for element in file.classes {
			pool.add(element)?;
		}
		Ok(pool)
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}

	pub fn types(&self) -> impl Iterator<Item=&TypeElement> {
		self.classes.values()
	}
}

impl MetadataProvider for ClassPool {
	fn type_element(&self, name: &str) -> Option<&TypeElement> {
		self.classes.get(name)
	}
}
