//! Turning fields and methods into [`PropertyDescriptor`]s.
//!
//! Both extractors are pure functions of the member, the declaring type, the metadata and the configuration. A member
//! that can't be bound gives a [`NotBindable`] saying why.

pub mod field;
pub mod accessor;

use std::fmt::{Display, Formatter};
use log::warn;
use jtype::provider::MetadataProvider;
use jtype::tree::class::{ClassName, TypeElement};
use jtype::tree::field::Field;
use jtype::tree::method::Method;
use jtype::tree::types::{DeclaredType, TypeArgument, TypeRef};
use crate::config::Config;
use crate::property::PropertyDescriptor;

/// The kinds of `java.util` collections whose element type is exposed.
pub const CONTAINER_CLASSES: [&str; 2] = ["java.util.List", "java.util.Set"];

/// A member that might be a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'a> {
	Field(&'a Field),
	Accessor(&'a Method),
}

impl<'a> Member<'a> {
	/// All members of a type in the order they are offered for binding: methods first, then fields, each in
	/// declaration order.
	pub fn all_of(owner: &'a TypeElement) -> impl Iterator<Item=Member<'a>> + 'a {
		owner.methods.iter().map(Member::Accessor)
			.chain(owner.fields.iter().map(Member::Field))
	}

	pub fn name(&self) -> &'a str {
		match *self {
			Member::Field(field) => field.name.as_str(),
			Member::Accessor(method) => method.name.as_str(),
		}
	}
}

/// The reason a member is not bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotBindable {
	Static,
	Private,
	Void,
	HasParameters,
	Throws,
	/// Skipped by a `skipAttribute` directive.
	Skipped,
	/// The type is a binding itself.
	BindingType(ClassName),
	/// A symbol that's neither a type variable of the declaring type nor a known type.
	UnresolvableType(String),
}

impl Display for NotBindable {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			NotBindable::Static => write!(f, "is static"),
			NotBindable::Private => write!(f, "is private"),
			NotBindable::Void => write!(f, "returns void"),
			NotBindable::HasParameters => write!(f, "takes parameters"),
			NotBindable::Throws => write!(f, "declares checked exceptions"),
			NotBindable::Skipped => write!(f, "is skipped by configuration"),
			NotBindable::BindingType(class) => write!(f, "has the binding type {class}"),
			NotBindable::UnresolvableType(symbol) => write!(f, "has the unresolvable type {symbol}"),
		}
	}
}

/// What the extractors look at besides the member itself.
pub struct ExtractContext<'a, P> {
	pub provider: &'a P,
	pub config: &'a Config,
	/// The type declaring the member.
	pub owner: &'a TypeElement,
}

impl<'a, P: MetadataProvider> ExtractContext<'a, P> {
	pub fn new(provider: &'a P, config: &'a Config, owner: &'a TypeElement) -> ExtractContext<'a, P> {
		ExtractContext { provider, config, owner }
	}

	pub fn extract(&self, member: Member) -> Result<PropertyDescriptor, NotBindable> {
		match member {
			Member::Field(field) => field::extract_field(field, self),
			Member::Accessor(method) => accessor::extract_accessor(method, self),
		}
	}
}

pub(crate) struct ResolvedType {
	pub(crate) ty: TypeRef,
	pub(crate) needs_unchecked_cast: bool,
}

/// Resolves the type of a member into the type of the property.
///
/// Primitives get boxed. A type variable is only kept if it's declared by the owner, otherwise it's taken to be a
/// pre-generics class name. A raw type gets its type argument from a `fixRawType` directive.
pub(crate) fn resolve_type<P: MetadataProvider>(ty: &TypeRef, property: &str, context: &ExtractContext<P>)
		-> Result<ResolvedType, NotBindable> {
	let ty = match ty {
		TypeRef::TypeVariable(symbol) => {
			if context.provider.is_type_variable_of(symbol, context.owner) {
				return Ok(ResolvedType { ty: ty.clone(), needs_unchecked_cast: true });
			}
			match context.provider.type_element(symbol) {
				Some(element) => TypeRef::object(element.name.clone()),
				None => return Err(NotBindable::UnresolvableType(symbol.clone())),
			}
		},
		other => other.boxed(),
	};

	let declared = match ty {
		TypeRef::Declared(declared) => declared,
		other => return Ok(ResolvedType { ty: other, needs_unchecked_cast: false }),
	};

	if declared.class.as_str().ends_with("Binding") {
		return Err(NotBindable::BindingType(declared.class));
	}

	if declared.is_raw() {
		if let Some(argument) = context.config.fix_raw_type(&context.owner.name, property) {
			match TypeRef::parse(argument) {
				Ok(argument) => {
					let fixed = DeclaredType {
						class: declared.class,
						arguments: vec![TypeArgument::Type(argument)],
					};
					return Ok(ResolvedType { ty: TypeRef::Declared(fixed), needs_unchecked_cast: true });
				},
				Err(e) => warn!("ignoring fixRawType for {}.{property}: {e:#}", context.owner.name),
			}
		}
	}

	Ok(ResolvedType { ty: TypeRef::Declared(declared), needs_unchecked_cast: false })
}

pub fn is_container(ty: &TypeRef) -> bool {
	ty.as_declared()
		.is_some_and(|declared| CONTAINER_CLASSES.contains(&declared.class.as_str()))
}

/// The element type of a container, if it can be known.
///
/// That's not the case for a raw container, a wildcard, or a type variable of the owner.
pub fn container_element_type<P: MetadataProvider>(ty: &TypeRef, owner: &TypeElement, provider: &P) -> Option<TypeRef> {
	if !is_container(ty) {
		return None;
	}
	match ty.as_declared()?.type_argument(0)? {
		TypeRef::TypeVariable(symbol) if provider.is_type_variable_of(symbol, owner) => None,
		TypeRef::TypeVariable(symbol) => provider.type_element(symbol)
			.map(|element| TypeRef::object(element.name.clone())),
		element => Some(element.clone()),
	}
}
