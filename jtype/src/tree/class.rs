use std::borrow::{Borrow, Cow};
use serde::Deserialize;
use crate::macros::{access_flags, from_impl_for_string_and_str, partial_eq_impl_for_str};
use crate::tree::field::Field;
use crate::tree::method::Method;
use crate::tree::types::{DeclaredType, TypeArgument, TypeRef};

/// A class, interface or enum together with the members the binding generator looks at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeElement {
	pub name: ClassName,
	#[serde(default)]
	pub access: ClassAccess,
	#[serde(default)]
	pub type_parameters: Vec<TypeParameter>,
	#[serde(default)]
	pub super_class: Option<TypeRef>,

	#[serde(default)]
	pub fields: Vec<Field>,
	#[serde(default)]
	pub methods: Vec<Method>,
}

impl TypeElement {
	pub fn new(name: impl Into<ClassName>) -> TypeElement {
		TypeElement {
			name: name.into(),
			access: ClassAccess { is_public: true, ..ClassAccess::default() },
			type_parameters: Vec::new(),
			super_class: None,

			fields: Vec::new(),
			methods: Vec::new(),
		}
	}

	pub fn with_type_parameter(mut self, parameter: TypeParameter) -> TypeElement {
		self.type_parameters.push(parameter);
		self
	}

	pub fn with_super_class(mut self, super_class: TypeRef) -> TypeElement {
		self.super_class = Some(super_class);
		self
	}

	pub fn with_field(mut self, field: Field) -> TypeElement {
		self.fields.push(field);
		self
	}

	pub fn with_method(mut self, method: Method) -> TypeElement {
		self.methods.push(method);
		self
	}

	/// Checks if `symbol` names one of the type parameters declared by this type.
	pub fn is_type_parameter(&self, symbol: &str) -> bool {
		self.type_parameters.iter().any(|p| p.name == symbol)
	}

	pub fn type_parameter(&self, symbol: &str) -> Option<&TypeParameter> {
		self.type_parameters.iter().find(|p| p.name == symbol)
	}

	/// The type of `this` inside the class, so `Foo<T, U>` for a class `Foo` declaring `T` and `U`.
	pub fn declared_type(&self) -> DeclaredType {
		DeclaredType {
			class: self.name.clone(),
			arguments: self.type_parameters.iter()
				.map(|p| TypeArgument::Type(TypeRef::TypeVariable(p.name.clone())))
				.collect(),
		}
	}

	pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item=&'a Method> + 'a {
		self.methods.iter().filter(move |m| m.name == name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct TypeParameter {
	pub name: String,
	#[serde(default)]
	pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
	pub fn new(name: impl Into<String>) -> TypeParameter {
		TypeParameter { name: name.into(), bounds: Vec::new() }
	}

	pub fn bounded(name: impl Into<String>, bound: TypeRef) -> TypeParameter {
		TypeParameter { name: name.into(), bounds: vec![bound] }
	}

	/// The erasure of the type parameter: its first bound, or `java.lang.Object` if there's none.
	pub fn upper_bound(&self) -> TypeRef {
		self.bounds.first()
			.cloned()
			.unwrap_or_else(|| TypeRef::object(ClassName::JAVA_LANG_OBJECT))
	}

	/// Writes the parameter as it appears in a declaration, like `T extends java.lang.Number`.
	pub fn to_source(&self) -> String {
		if self.bounds.is_empty() {
			self.name.clone()
		} else {
			let bounds: Vec<String> = self.bounds.iter().map(TypeRef::to_source).collect();
			format!("{} extends {}", self.name, bounds.join(" & "))
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct ClassAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_interface: bool,
	pub is_abstract: bool,
	pub is_enum: bool,
}

access_flags!(ClassAccess {
	is_public:    "public"    = 0x0001,
	is_private:   "private"   = 0x0002,
	is_protected: "protected" = 0x0004,
	is_static:    "static"    = 0x0008,
	is_final:     "final"     = 0x0010,
	is_interface: "interface" = 0x0200,
	is_abstract:  "abstract"  = 0x0400,
	is_enum:      "enum"      = 0x4000,
});

/// A fully qualified class name in binary form, so packages are separated by `.` and nested classes by `$`.
///
/// ```
/// use jtype::tree::class::ClassName;
///
/// let name = ClassName::from("org.example.Outer$Inner");
/// assert_eq!(name.package_name(), "org.example");
/// assert_eq!(name.simple_name(), "Inner");
/// assert_eq!(name.to_source(), "org.example.Outer.Inner");
/// assert_eq!(name.enclosing_class(), Some(ClassName::from("org.example.Outer")));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize)]
#[serde(transparent)]
pub struct ClassName(Cow<'static, str>);

from_impl_for_string_and_str!(ClassName);
partial_eq_impl_for_str!(ClassName);

impl Borrow<str> for ClassName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl ClassName {
	pub const JAVA_LANG_OBJECT: ClassName = ClassName(Cow::Borrowed("java.lang.Object"));
	pub const JAVA_LANG_STRING: ClassName = ClassName(Cow::Borrowed("java.lang.String"));

	/// Returns `"org.example"` for `"org.example.Type"`, and `""` for a class in the default package.
	pub fn package_name(&self) -> &str {
		match self.0.rfind('.') {
			Some(last_dot) => &self.0[..last_dot],
			None => "",
		}
	}

	/// The part after the package, `"Outer$Inner"` for `"org.example.Outer$Inner"`.
	pub fn binary_simple_name(&self) -> &str {
		match self.0.rfind('.') {
			Some(last_dot) => &self.0[last_dot + 1..],
			None => &self.0,
		}
	}

	/// The simple name of the innermost class, `"Inner"` for `"org.example.Outer$Inner"`.
	pub fn simple_name(&self) -> &str {
		let binary = self.binary_simple_name();
		match binary.rfind('$') {
			Some(last_dollar) => &binary[last_dollar + 1..],
			None => binary,
		}
	}

	pub fn is_nested(&self) -> bool {
		self.binary_simple_name().contains('$')
	}

	pub fn enclosing_class(&self) -> Option<ClassName> {
		let last_dollar = self.0.rfind('$')?;
		if self.0[last_dollar..].contains('.') {
			return None;
		}
		Some(ClassName::from(self.0[..last_dollar].to_owned()))
	}

	/// The name as written in java source code, with `$` replaced by `.`.
	pub fn to_source(&self) -> String {
		self.0.replace('$', ".")
	}

	pub fn is_in_java_package(&self) -> bool {
		self.0.starts_with("java.")
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::tree::class::{ClassAccess, ClassName, TypeElement, TypeParameter};

	#[test]
	fn class_name_parts() {
		let a = ClassName::from("com.app.Type");
		assert_eq!(a.package_name(), "com.app");
		assert_eq!(a.simple_name(), "Type");
		assert!(!a.is_nested());
		assert_eq!(a.enclosing_class(), None);

		let b = ClassName::from("Type");
		assert_eq!(b.package_name(), "");
		assert_eq!(b.simple_name(), "Type");

		let c = ClassName::from("org.bindgen.processor.inner.SomeClass$InnerClass");
		assert_eq!(c.package_name(), "org.bindgen.processor.inner");
		assert_eq!(c.binary_simple_name(), "SomeClass$InnerClass");
		assert_eq!(c.simple_name(), "InnerClass");
		assert!(c.is_nested());
		assert_eq!(c.enclosing_class(), Some(ClassName::from("org.bindgen.processor.inner.SomeClass")));
	}

	#[test]
	fn class_access() -> anyhow::Result<()> {
		let access: ClassAccess = "public abstract".parse()?;
		assert!(access.is_public);
		assert!(access.is_abstract);
		assert!(!access.is_final);
		assert_eq!(u16::from(access), 0x0401);
		assert_eq!(format!("{access:?}"), "ClassAccess { public abstract }");

		assert!("public sealed".parse::<ClassAccess>().is_err());
		Ok(())
	}

	#[test]
	fn type_parameters() {
		let element = TypeElement::new("com.app.Box")
			.with_type_parameter(TypeParameter::new("T"));

		assert!(element.is_type_parameter("T"));
		assert!(!element.is_type_parameter("U"));
		assert_eq!(element.declared_type().to_string(), "com.app.Box<T>");
		assert_eq!(element.type_parameters[0].upper_bound().to_string(), "java.lang.Object");
	}
}
