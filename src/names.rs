//! Naming rules: property names from accessor names, setter names, and the names of the generated classes.

use jtype::tree::class::ClassName;

/// The prefixes stripped from accessor names, in the order they are tried.
pub const ACCESSOR_PREFIXES: [&str; 4] = ["get", "to", "has", "is"];

const JAVA_KEYWORDS: &[&str] = &[
	"abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
	"default", "do", "double", "else", "enum", "extends", "final", "finally", "float", "for", "goto", "if",
	"implements", "import", "instanceof", "int", "interface", "long", "native", "new", "package", "private",
	"protected", "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
	"throw", "throws", "transient", "try", "void", "volatile", "while",
	// literals
	"true", "false", "null",
];

pub fn is_java_keyword(name: &str) -> bool {
	JAVA_KEYWORDS.contains(&name)
}

pub fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

pub fn uncapitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Infers the property name of an accessor method.
///
/// A prefix from [`ACCESSOR_PREFIXES`] is stripped if the method name continues with an uppercase character after it,
/// and the rest is uncapitalized. If that doesn't apply, or if the result is a java keyword or `get`, the method name
/// is used as it is.
///
/// ```
/// use bindgen::names::property_name;
///
/// assert_eq!(property_name("getId"), "id");
/// assert_eq!(property_name("hasStuff"), "stuff");
/// assert_eq!(property_name("tobacco"), "tobacco");
/// assert_eq!(property_name("isNew"), "isNew");
/// ```
pub fn property_name(method_name: &str) -> String {
	let candidate = ACCESSOR_PREFIXES.iter()
		.filter_map(|prefix| method_name.strip_prefix(prefix))
		.find(|rest| rest.chars().next().is_some_and(char::is_uppercase))
		.map(uncapitalize);

	match candidate {
		Some(name) if !is_java_keyword(&name) && name != "get" => name,
		_ => method_name.to_owned(),
	}
}

/// The first prefix of [`ACCESSOR_PREFIXES`] that the method name starts with, without any casing rules.
pub fn accessor_prefix(method_name: &str) -> Option<&'static str> {
	ACCESSOR_PREFIXES.into_iter().find(|prefix| method_name.starts_with(prefix))
}

/// The name of the setter belonging to an accessor: the prefix is replaced by `set`.
///
/// Returns `None` if the accessor doesn't start with any prefix, such methods never have a setter.
pub fn setter_name(method_name: &str) -> Option<String> {
	let prefix = accessor_prefix(method_name)?;
	Some(format!("set{}", &method_name[prefix.len()..]))
}

/// The name of the inner class of the binding for a property, like `MyNameBinding` for `name`.
pub fn node_class_name(property_name: &str) -> String {
	format!("My{}Binding", capitalize(property_name))
}

/// Where the binding classes for a type go.
///
/// A type `a.b.Foo` gets `a.b.FooBinding` and `a.b.FooBindingPath`. A nested type `a.b.Outer$Inner` gets its bindings
/// in the package `a.b.outer`, or in `a.b.bindgen_outer` if the enclosing class name is already lowercase, since
/// the package would otherwise clash with the class. Types in `java.` packages get `bindgen.` in front of the package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingName {
	package: String,
	simple_name: String,
}

impl BindingName {
	pub fn of(class: &ClassName) -> BindingName {
		let mut segments: Vec<String> = Vec::new();
		if class.is_in_java_package() {
			segments.push("bindgen".to_owned());
		}
		if !class.package_name().is_empty() {
			segments.push(class.package_name().to_owned());
		}

		let mut classes: Vec<&str> = class.binary_simple_name().split('$').collect();
		let simple_name = classes.pop().unwrap_or_default().to_owned();
		for outer in classes {
			let package = uncapitalize(outer);
			if package == outer {
				segments.push(format!("bindgen_{outer}"));
			} else {
				segments.push(package);
			}
		}

		BindingName {
			package: segments.join("."),
			simple_name,
		}
	}

	pub fn package(&self) -> &str {
		&self.package
	}

	/// The fully qualified name of the root binding class, `a.b.FooBinding`.
	pub fn root_class(&self) -> String {
		self.qualify("Binding")
	}

	/// The fully qualified name of the abstract path class, `a.b.FooBindingPath`.
	pub fn path_class(&self) -> String {
		self.qualify("BindingPath")
	}

	pub fn path_simple_name(&self) -> String {
		format!("{}BindingPath", self.simple_name)
	}

	fn qualify(&self, suffix: &str) -> String {
		if self.package.is_empty() {
			format!("{}{suffix}", self.simple_name)
		} else {
			format!("{}.{}{suffix}", self.package, self.simple_name)
		}
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use jtype::tree::class::ClassName;
	use crate::names::{BindingName, capitalize, node_class_name, property_name, setter_name, uncapitalize};

	#[test]
	fn prefixes() {
		assert_eq!(property_name("getId"), "id");
		assert_eq!(property_name("isGood"), "good");
		assert_eq!(property_name("hasStuff"), "stuff");
		assert_eq!(property_name("toList"), "list");
		assert_eq!(property_name("getURL"), "uRL");
		assert_eq!(property_name("getX"), "x");

		assert_eq!(property_name("tobacco"), "tobacco");
		assert_eq!(property_name("isNew"), "isNew");
		assert_eq!(property_name("getClass"), "getClass");
		assert_eq!(property_name("get"), "get");
		assert_eq!(property_name("getGet"), "getGet");
		assert_eq!(property_name("name"), "name");
		assert_eq!(property_name("is"), "is");
	}

	#[test]
	fn setters() {
		assert_eq!(setter_name("getName"), Some("setName".to_owned()));
		assert_eq!(setter_name("isGood"), Some("setGood".to_owned()));
		assert_eq!(setter_name("isNew"), Some("setNew".to_owned()));
		assert_eq!(setter_name("tobacco"), Some("setbacco".to_owned()));
		assert_eq!(setter_name("name"), None);
	}

	#[test]
	fn casing() {
		assert_eq!(capitalize("name"), "Name");
		assert_eq!(capitalize(""), "");
		assert_eq!(uncapitalize("Name"), "name");
		assert_eq!(uncapitalize("nAME"), "nAME");
		assert_eq!(node_class_name("firstName"), "MyFirstNameBinding");
	}

	#[test]
	fn binding_names() {
		let top = BindingName::of(&ClassName::from("com.app.Foo"));
		assert_eq!(top.package(), "com.app");
		assert_eq!(top.root_class(), "com.app.FooBinding");
		assert_eq!(top.path_class(), "com.app.FooBindingPath");
		assert_eq!(top.path_simple_name(), "FooBindingPath");

		let default_package = BindingName::of(&ClassName::from("Foo"));
		assert_eq!(default_package.root_class(), "FooBinding");

		let inner = BindingName::of(&ClassName::from("org.bindgen.processor.inner.SomeClass$InnerClass"));
		assert_eq!(inner.path_class(), "org.bindgen.processor.inner.someClass.InnerClassBindingPath");

		let nasty = BindingName::of(&ClassName::from("org.bindgen.processor.inner.nastyClass$InnerClass"));
		assert_eq!(nasty.path_class(), "org.bindgen.processor.inner.bindgen_nastyClass.InnerClassBindingPath");

		let deep = BindingName::of(&ClassName::from("a.Outer$Middle$Inner"));
		assert_eq!(deep.root_class(), "a.outer.middle.InnerBinding");

		let java = BindingName::of(&ClassName::from("java.util.Date"));
		assert_eq!(java.root_class(), "bindgen.java.util.DateBinding");
	}
}
