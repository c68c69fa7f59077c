use std::borrow::Cow;
use serde::Deserialize;
use crate::macros::{access_flags, from_impl_for_string_and_str, partial_eq_impl_for_str};
use crate::tree::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Field {
	#[serde(default)]
	pub access: FieldAccess,
	pub name: FieldName,
	/// The type as reported by the compiler, which might be a type variable even for a legacy raw type.
	#[serde(rename = "type")]
	pub ty: TypeRef,
}

impl Field {
	pub fn new(access: FieldAccess, name: impl Into<FieldName>, ty: TypeRef) -> Field {
		Field {
			access,
			name: name.into(),
			ty,
		}
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldAccess {
	pub is_public: bool,
	pub is_private: bool,
	pub is_protected: bool,
	pub is_static: bool,
	pub is_final: bool,
	pub is_volatile: bool,
	pub is_transient: bool,
	pub is_synthetic: bool,
	pub is_enum: bool,
}

access_flags!(FieldAccess {
	is_public:    "public"    = 0x0001,
	is_private:   "private"   = 0x0002,
	is_protected: "protected" = 0x0004,
	is_static:    "static"    = 0x0008,
	is_final:     "final"     = 0x0010,
	is_volatile:  "volatile"  = 0x0040,
	is_transient: "transient" = 0x0080,
	is_synthetic: "synthetic" = 0x1000,
	is_enum:      "enum"      = 0x4000,
});

impl FieldAccess {
	pub const PUBLIC: FieldAccess = FieldAccess {
		is_public: true,
		is_private: false,
		is_protected: false,
		is_static: false,
		is_final: false,
		is_volatile: false,
		is_transient: false,
		is_synthetic: false,
		is_enum: false,
	};
	pub const PUBLIC_FINAL: FieldAccess = FieldAccess { is_final: true, ..FieldAccess::PUBLIC };
	pub const PRIVATE: FieldAccess = FieldAccess { is_public: false, is_private: true, ..FieldAccess::PUBLIC };
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize)]
#[serde(transparent)]
pub struct FieldName(Cow<'static, str>);

from_impl_for_string_and_str!(FieldName);
partial_eq_impl_for_str!(FieldName);
