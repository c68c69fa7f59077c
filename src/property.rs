use std::fmt::{Display, Formatter};
use jtype::tree::field::{FieldAccess, FieldName};
use jtype::tree::method::{MethodAccess, MethodName};
use jtype::tree::types::TypeRef;

/// The access of the member a property comes from. Private members are never bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
	#[default]
	Public,
	Protected,
	Package,
}

impl Visibility {
	pub fn of_field(access: FieldAccess) -> Visibility {
		if access.is_public {
			Visibility::Public
		} else if access.is_protected {
			Visibility::Protected
		} else {
			Visibility::Package
		}
	}

	pub fn of_method(access: MethodAccess) -> Visibility {
		if access.is_public {
			Visibility::Public
		} else if access.is_protected {
			Visibility::Protected
		} else {
			Visibility::Package
		}
	}

	pub fn is_public(self) -> bool {
		self == Visibility::Public
	}
}

/// Where a property was discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySource {
	Field {
		name: FieldName,
	},
	Accessor {
		getter: MethodName,
		/// The paired setter, if there's a usable one.
		setter: Option<MethodName>,
	},
}

impl PropertySource {
	pub fn is_field(&self) -> bool {
		matches!(self, PropertySource::Field { .. })
	}

	/// The name of the member the value is read from: the field name, or the getter name.
	pub fn member_name(&self) -> &str {
		match self {
			PropertySource::Field { name } => name.as_str(),
			PropertySource::Accessor { getter, .. } => getter.as_str(),
		}
	}
}

impl Display for PropertySource {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PropertySource::Field { name } => write!(f, "field {name}"),
			PropertySource::Accessor { getter, .. } => write!(f, "method {getter}()"),
		}
	}
}

/// One bindable property of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
	/// Unique among the properties of a type once resolved.
	pub name: String,
	/// The type of the property, with primitives boxed. Might be a type variable of the declaring type.
	pub declared_type: TypeRef,
	pub read_only: bool,
	/// Given to the accessor and the inner class of the binding.
	pub visibility: Visibility,
	/// Only present for a `java.util.List` or `java.util.Set` with a knowable element type.
	pub container_element_type: Option<TypeRef>,
	/// The value needs an unchecked cast, as the property is typed with a type variable, or its raw type got a type
	/// argument from the configuration.
	pub needs_unchecked_cast: bool,
	pub source: PropertySource,
}

impl PropertyDescriptor {
	pub fn is_type_variable(&self) -> bool {
		matches!(self.declared_type, TypeRef::TypeVariable(_))
	}

	pub fn is_array(&self) -> bool {
		self.declared_type.is_array()
	}

	/// Whether reading the member gives a raw type that has to be cast to the declared type.
	pub fn needs_cast_on_read(&self) -> bool {
		self.needs_unchecked_cast && !self.is_type_variable()
	}
}
