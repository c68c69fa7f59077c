use std::borrow::Cow;
use serde::Deserialize;
use crate::macros::{access_flags, from_impl_for_string_and_str, partial_eq_impl_for_str};
use crate::tree::class::ClassName;
use crate::tree::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Method {
	#[serde(default)]
	pub access: MethodAccess,
	pub name: MethodName,
	/// `None` for a `void` method.
	#[serde(default)]
	pub return_type: Option<TypeRef>,
	#[serde(default)]
	pub parameters: Vec<TypeRef>,
	/// The checked exceptions in the `throws` clause.
	#[serde(default)]
	pub exceptions: Vec<ClassName>,
}

impl Method {
	pub fn new(access: MethodAccess, name: impl Into<MethodName>, return_type: Option<TypeRef>) -> Method {
		Method {
			access,
			name: name.into(),
			return_type,
			parameters: Vec::new(),
			exceptions: Vec::new(),
		}
	}

	/// A public method taking no arguments and returning `return_type`.
	pub fn getter(name: impl Into<MethodName>, return_type: TypeRef) -> Method {
		Method::new(MethodAccess::PUBLIC, name, Some(return_type))
	}

	/// A public `void` method taking exactly one argument.
	pub fn setter(name: impl Into<MethodName>, parameter: TypeRef) -> Method {
		Method::new(MethodAccess::PUBLIC, name, None)
			.with_parameter(parameter)
	}

	pub fn with_parameter(mut self, parameter: TypeRef) -> Method {
		self.parameters.push(parameter);
		self
	}

	pub fn with_exception(mut self, exception: impl Into<ClassName>) -> Method {
		self.exceptions.push(exception.into());
		self
	}

	pub fn throws(&self) -> bool {
		!self.exceptions.is_empty()
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct MethodAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_synchronized: bool,
	pub is_bridge: bool,
	pub is_varargs: bool,
	pub is_native: bool,
	pub is_abstract: bool,
	pub is_strict: bool,
	pub is_synthetic: bool,
}

access_flags!(MethodAccess {
	is_public:       "public"       = 0x0001,
	is_private:      "private"      = 0x0002,
	is_protected:    "protected"    = 0x0004,
	is_static:       "static"       = 0x0008,
	is_final:        "final"        = 0x0010,
	is_synchronized: "synchronized" = 0x0020,
	is_bridge:       "bridge"       = 0x0040,
	is_varargs:      "varargs"      = 0x0080,
	is_native:       "native"       = 0x0100,
	is_abstract:     "abstract"     = 0x0400,
	is_strict:       "strict"       = 0x0800,
	is_synthetic:    "synthetic"    = 0x1000,
});

impl MethodAccess {
	pub const PUBLIC: MethodAccess = MethodAccess {
		is_public: true,
		is_private: false,
		is_protected: false,
		is_static: false,
		is_final: false,
		is_synchronized: false,
		is_bridge: false,
		is_varargs: false,
		is_native: false,
		is_abstract: false,
		is_strict: false,
		is_synthetic: false,
	};
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize)]
#[serde(transparent)]
pub struct MethodName(Cow<'static, str>);

from_impl_for_string_and_str!(MethodName);
partial_eq_impl_for_str!(MethodName);
