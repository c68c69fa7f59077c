use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use anyhow::{anyhow, bail, Context, Error, Result};
use serde::Deserialize;
use crate::tree::class::ClassName;

/// A java primitive type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PrimitiveType {
	Boolean,
	Byte,
	Char,
	Short,
	Int,
	Long,
	Float,
	Double,
}

impl PrimitiveType {
	const ALL: [PrimitiveType; 8] = [
		PrimitiveType::Boolean,
		PrimitiveType::Byte,
		PrimitiveType::Char,
		PrimitiveType::Short,
		PrimitiveType::Int,
		PrimitiveType::Long,
		PrimitiveType::Float,
		PrimitiveType::Double,
	];

	pub fn keyword(self) -> &'static str {
		match self {
			PrimitiveType::Boolean => "boolean",
			PrimitiveType::Byte => "byte",
			PrimitiveType::Char => "char",
			PrimitiveType::Short => "short",
			PrimitiveType::Int => "int",
			PrimitiveType::Long => "long",
			PrimitiveType::Float => "float",
			PrimitiveType::Double => "double",
		}
	}

	pub fn from_keyword(keyword: &str) -> Option<PrimitiveType> {
		PrimitiveType::ALL.into_iter().find(|p| p.keyword() == keyword)
	}

	/// The wrapper class used when the primitive appears as a type argument.
	pub fn boxed(self) -> ClassName {
		ClassName::from(match self {
			PrimitiveType::Boolean => "java.lang.Boolean",
			PrimitiveType::Byte => "java.lang.Byte",
			PrimitiveType::Char => "java.lang.Character",
			PrimitiveType::Short => "java.lang.Short",
			PrimitiveType::Int => "java.lang.Integer",
			PrimitiveType::Long => "java.lang.Long",
			PrimitiveType::Float => "java.lang.Float",
			PrimitiveType::Double => "java.lang.Double",
		})
	}
}

/// A type as it appears in a field or method declaration.
///
/// The grammar accepted by [`TypeRef::parse`] (and produced by the [`Display`] implementation) is java source syntax
/// with binary class names:
/// ```text
///   Type:
///     Base ( "[]" )*
///   Base:
///     PrimitiveKeyword | Name ( "<" Argument ( "," Argument )* ">" )?
///   Argument:
///     "?" | "?" "extends" Type | "?" "super" Type | Type
/// ```
/// A `Name` without any `.` in it that doesn't take type arguments is read as a type variable. This is also how
/// compilers report types when generic information was erased, so a [`TypeRef::TypeVariable`] must always be checked
/// against the type parameters in scope.
///
/// ```
/// use jtype::tree::types::TypeRef;
///
/// let t = TypeRef::parse("java.util.Map<java.lang.String, ? extends java.util.List<T>>[]").unwrap();
/// assert_eq!(t.to_string(), "java.util.Map<java.lang.String, ? extends java.util.List<T>>[]");
/// assert!(matches!(t, TypeRef::Array(_)));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeRef {
	Primitive(PrimitiveType),
	Declared(DeclaredType),
	TypeVariable(String),
	Array(Box<TypeRef>),
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DeclaredType {
	pub class: ClassName,
	pub arguments: Vec<TypeArgument>,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TypeArgument {
	Type(TypeRef),
	/// A `?`, possibly with a bound.
	Wildcard(Option<WildcardBound>),
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum WildcardBound {
	Extends(TypeRef),
	Super(TypeRef),
}

impl TypeRef {
	pub fn parse(s: &str) -> Result<TypeRef> {
		let mut chars = s.chars().peekable();

		let t = read_type(&mut chars)
			.with_context(|| anyhow!("failed to read type {s:?}"))?;

		skip_whitespace(&mut chars);
		if chars.peek().is_some() {
			bail!("expected end of type {s:?}, got {:?} remaining", String::from_iter(chars));
		}

		Ok(t)
	}

	/// A non-generic declared type.
	pub fn object(class: ClassName) -> TypeRef {
		TypeRef::Declared(DeclaredType { class, arguments: Vec::new() })
	}

	pub fn generic(class: ClassName, arguments: Vec<TypeRef>) -> TypeRef {
		TypeRef::Declared(DeclaredType {
			class,
			arguments: arguments.into_iter().map(TypeArgument::Type).collect(),
		})
	}

	/// Replaces a primitive by its wrapper class, leaves everything else as it is.
	pub fn boxed(&self) -> TypeRef {
		match self {
			TypeRef::Primitive(p) => TypeRef::object(p.boxed()),
			other => other.clone(),
		}
	}

	pub fn as_declared(&self) -> Option<&DeclaredType> {
		match self {
			TypeRef::Declared(declared) => Some(declared),
			_ => None,
		}
	}

	pub fn is_array(&self) -> bool {
		matches!(self, TypeRef::Array(_))
	}

	/// Writes the type as java source code, so nested classes use `.` instead of `$`.
	pub fn to_source(&self) -> String {
		let mut s = String::new();
		write_type(self, &mut s, true);
		s
	}

	/// Replaces type variables by the types they are mapped to. Type variables without a mapping stay.
	///
	/// ```
	/// use std::collections::HashMap;
	/// use jtype::tree::types::TypeRef;
	///
	/// let substitution = HashMap::from([("T".to_owned(), TypeRef::parse("java.lang.String").unwrap())]);
	/// let t = TypeRef::parse("java.util.Map<T, ? extends U>").unwrap();
	/// assert_eq!(t.substitute(&substitution).to_string(), "java.util.Map<java.lang.String, ? extends U>");
	/// ```
	pub fn substitute(&self, substitution: &HashMap<String, TypeRef>) -> TypeRef {
		match self {
			TypeRef::Primitive(_) => self.clone(),
			TypeRef::Declared(declared) => TypeRef::Declared(DeclaredType {
				class: declared.class.clone(),
				arguments: declared.arguments.iter()
					.map(|argument| argument.substitute(substitution))
					.collect(),
			}),
			TypeRef::TypeVariable(name) => substitution.get(name)
				.cloned()
				.unwrap_or_else(|| self.clone()),
			TypeRef::Array(component) => TypeRef::Array(Box::new(component.substitute(substitution))),
		}
	}

	/// Writes the erasure of the type as java source code, which is what may appear in front of `.class`.
	///
	/// Type variables are erased to `java.lang.Object`, as their bounds aren't known here.
	pub fn erasure_source(&self) -> String {
		match self {
			TypeRef::Primitive(p) => p.keyword().to_owned(),
			TypeRef::Declared(declared) => declared.class.to_source(),
			TypeRef::TypeVariable(_) => ClassName::JAVA_LANG_OBJECT.to_source(),
			TypeRef::Array(component) => format!("{}[]", component.erasure_source()),
		}
	}
}

impl DeclaredType {
	pub fn is_raw(&self) -> bool {
		self.arguments.is_empty()
	}

	pub fn has_wildcards(&self) -> bool {
		self.arguments.iter().any(|a| matches!(a, TypeArgument::Wildcard(_)))
	}

	/// The type given as the n-th type argument, if that argument is not a wildcard.
	pub fn type_argument(&self, n: usize) -> Option<&TypeRef> {
		match self.arguments.get(n)? {
			TypeArgument::Type(t) => Some(t),
			TypeArgument::Wildcard(_) => None,
		}
	}
}

impl FromStr for TypeRef {
	type Err = Error;

	fn from_str(s: &str) -> Result<TypeRef> {
		TypeRef::parse(s)
	}
}

impl TryFrom<String> for TypeRef {
	type Error = Error;

	fn try_from(value: String) -> Result<TypeRef> {
		TypeRef::parse(&value)
	}
}

impl Display for TypeRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut s = String::new();
		write_type(self, &mut s, false);
		f.write_str(&s)
	}
}

impl Display for DeclaredType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut s = String::new();
		write_declared(self, &mut s, false);
		f.write_str(&s)
	}
}

impl TypeArgument {
	pub fn to_source(&self) -> String {
		let mut s = String::new();
		write_argument(self, &mut s, true);
		s
	}

	fn substitute(&self, substitution: &HashMap<String, TypeRef>) -> TypeArgument {
		match self {
			TypeArgument::Type(t) => TypeArgument::Type(t.substitute(substitution)),
			TypeArgument::Wildcard(None) => TypeArgument::Wildcard(None),
			TypeArgument::Wildcard(Some(WildcardBound::Extends(bound))) =>
				TypeArgument::Wildcard(Some(WildcardBound::Extends(bound.substitute(substitution)))),
			TypeArgument::Wildcard(Some(WildcardBound::Super(bound))) =>
				TypeArgument::Wildcard(Some(WildcardBound::Super(bound.substitute(substitution)))),
		}
	}
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
	while chars.next_if(|c| c.is_whitespace()).is_some() { }
}

fn is_name_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

fn read_name(chars: &mut Peekable<Chars>) -> Result<String> {
	skip_whitespace(chars);

	let mut name = String::new();
	while let Some(c) = chars.next_if(|&c| is_name_char(c)) {
		name.push(c);
	}

	if name.is_empty() {
		match chars.peek() {
			Some(c) => bail!("unexpected char {c:?} in type"),
			None => bail!("unexpected abrupt ending of type"),
		}
	}
	if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
		bail!("invalid name {name:?} in type");
	}
	Ok(name)
}

fn read_type(chars: &mut Peekable<Chars>) -> Result<TypeRef> {
	let name = read_name(chars)?;

	skip_whitespace(chars);
	let mut t = if chars.next_if_eq(&'<').is_some() {
		let mut arguments = Vec::new();
		loop {
			arguments.push(read_argument(chars)?);

			skip_whitespace(chars);
			match chars.next() {
				Some(',') => continue,
				Some('>') => break,
				Some(c) => bail!("unexpected char {c:?} in type arguments of {name:?}"),
				None => bail!("unexpected abrupt ending of type arguments of {name:?}"),
			}
		}
		TypeRef::Declared(DeclaredType { class: ClassName::from(name), arguments })
	} else if let Some(primitive) = PrimitiveType::from_keyword(&name) {
		TypeRef::Primitive(primitive)
	} else if name.contains('.') {
		TypeRef::object(ClassName::from(name))
	} else {
		TypeRef::TypeVariable(name)
	};

	loop {
		skip_whitespace(chars);
		if chars.next_if_eq(&'[').is_none() {
			break;
		}
		skip_whitespace(chars);
		if chars.next_if_eq(&']').is_none() {
			bail!("expected ']' after '[' in type");
		}
		t = TypeRef::Array(Box::new(t));
	}

	Ok(t)
}

fn read_argument(chars: &mut Peekable<Chars>) -> Result<TypeArgument> {
	skip_whitespace(chars);
	if chars.next_if_eq(&'?').is_none() {
		return read_type(chars).map(TypeArgument::Type);
	}

	skip_whitespace(chars);
	if chars.peek().is_some_and(|&c| c == ',' || c == '>') {
		return Ok(TypeArgument::Wildcard(None));
	}

	let keyword = read_name(chars)?;
	let bound = read_type(chars)?;
	match keyword.as_str() {
		"extends" => Ok(TypeArgument::Wildcard(Some(WildcardBound::Extends(bound)))),
		"super" => Ok(TypeArgument::Wildcard(Some(WildcardBound::Super(bound)))),
		x => bail!("expected `extends` or `super` after `?`, got {x:?}"),
	}
}

fn write_type(t: &TypeRef, s: &mut String, source: bool) {
	match t {
		TypeRef::Primitive(p) => s.push_str(p.keyword()),
		TypeRef::Declared(declared) => write_declared(declared, s, source),
		TypeRef::TypeVariable(name) => s.push_str(name),
		TypeRef::Array(component) => {
			write_type(component, s, source);
			s.push_str("[]");
		},
	}
}

fn write_declared(declared: &DeclaredType, s: &mut String, source: bool) {
	if source {
		s.push_str(&declared.class.to_source());
	} else {
		s.push_str(declared.class.as_str());
	}
	if !declared.arguments.is_empty() {
		s.push('<');
		for (i, argument) in declared.arguments.iter().enumerate() {
			if i != 0 {
				s.push_str(", ");
			}
			write_argument(argument, s, source);
		}
		s.push('>');
	}
}

fn write_argument(argument: &TypeArgument, s: &mut String, source: bool) {
	match argument {
		TypeArgument::Type(t) => write_type(t, s, source),
		TypeArgument::Wildcard(None) => s.push('?'),
		TypeArgument::Wildcard(Some(WildcardBound::Extends(bound))) => {
			s.push_str("? extends ");
			write_type(bound, s, source);
		},
		TypeArgument::Wildcard(Some(WildcardBound::Super(bound))) => {
			s.push_str("? super ");
			write_type(bound, s, source);
		},
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use crate::tree::class::ClassName;
	use crate::tree::types::{DeclaredType, PrimitiveType, TypeArgument, TypeRef, WildcardBound};

	#[test]
	fn parse_simple() -> Result<()> {
		assert_eq!(TypeRef::parse("int")?, TypeRef::Primitive(PrimitiveType::Int));
		assert_eq!(TypeRef::parse("java.lang.String")?, TypeRef::object(ClassName::JAVA_LANG_STRING));
		assert_eq!(TypeRef::parse("T")?, TypeRef::TypeVariable("T".to_owned()));
		assert_eq!(
			TypeRef::parse("double[][]")?,
			TypeRef::Array(Box::new(TypeRef::Array(Box::new(TypeRef::Primitive(PrimitiveType::Double))))),
		);
		Ok(())
	}

	#[test]
	fn parse_generic() -> Result<()> {
		assert_eq!(
			TypeRef::parse("java.util.List<java.lang.String>")?,
			TypeRef::generic(ClassName::from("java.util.List"), vec![TypeRef::object(ClassName::JAVA_LANG_STRING)]),
		);
		assert_eq!(
			TypeRef::parse("java.util.Map< K , ? super V >")?,
			TypeRef::Declared(DeclaredType {
				class: ClassName::from("java.util.Map"),
				arguments: vec![
					TypeArgument::Type(TypeRef::TypeVariable("K".to_owned())),
					TypeArgument::Wildcard(Some(WildcardBound::Super(TypeRef::TypeVariable("V".to_owned())))),
				],
			}),
		);
		assert_eq!(
			TypeRef::parse("java.util.Set<?>")?,
			TypeRef::Declared(DeclaredType {
				class: ClassName::from("java.util.Set"),
				arguments: vec![TypeArgument::Wildcard(None)],
			}),
		);
		Ok(())
	}

	#[test]
	fn parse_err() {
		assert!(TypeRef::parse("").is_err());
		assert!(TypeRef::parse("<").is_err());
		assert!(TypeRef::parse("java.util.List<").is_err());
		assert!(TypeRef::parse("java.util.List<>").is_err());
		assert!(TypeRef::parse("java.util.List<T").is_err());
		assert!(TypeRef::parse("java.util.List<? foo T>").is_err());
		assert!(TypeRef::parse("int[").is_err());
		assert!(TypeRef::parse("a..b").is_err());
		assert!(TypeRef::parse(".a").is_err());
		assert!(TypeRef::parse("int int").is_err());
	}

	#[test]
	fn write() -> Result<()> {
		let t = TypeRef::parse("com.app.Outer$Inner<java.lang.Integer[], ?>")?;
		assert_eq!(t.to_string(), "com.app.Outer$Inner<java.lang.Integer[], ?>");
		assert_eq!(t.to_source(), "com.app.Outer.Inner<java.lang.Integer[], ?>");
		assert_eq!(t.erasure_source(), "com.app.Outer.Inner");

		assert_eq!(TypeRef::parse("T[]")?.erasure_source(), "java.lang.Object[]");
		Ok(())
	}

	#[test]
	fn boxing() -> Result<()> {
		assert_eq!(TypeRef::parse("boolean")?.boxed(), TypeRef::parse("java.lang.Boolean")?);
		assert_eq!(TypeRef::parse("char")?.boxed(), TypeRef::parse("java.lang.Character")?);
		assert_eq!(TypeRef::parse("int[]")?.boxed(), TypeRef::parse("int[]")?);
		Ok(())
	}
}
