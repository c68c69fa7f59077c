use jtype::provider::MetadataProvider;
use jtype::tree::field::Field;
use crate::extract::{container_element_type, ExtractContext, NotBindable, resolve_type};
use crate::property::{PropertyDescriptor, PropertySource, Visibility};

/// Extracts the property of an instance field. A `final` field gives a read only property.
///
/// The property is named like the field. Collisions with other names are dealt with later, by the
/// [`Resolver`](crate::resolve::Resolver).
pub fn extract_field<P: MetadataProvider>(field: &Field, context: &ExtractContext<P>) -> Result<PropertyDescriptor, NotBindable> {
	if field.access.is_static {
		return Err(NotBindable::Static);
	}
	if field.access.is_private {
		return Err(NotBindable::Private);
	}

	let name = field.name.as_str();
	if context.config.skip_attribute(&context.owner.name, name) {
		return Err(NotBindable::Skipped);
	}

	let resolved = resolve_type(&field.ty, name, context)?;

	Ok(PropertyDescriptor {
		name: name.to_owned(),
		container_element_type: container_element_type(&resolved.ty, context.owner, context.provider),
		declared_type: resolved.ty,
		read_only: field.access.is_final,
		visibility: Visibility::of_field(field.access),
		needs_unchecked_cast: resolved.needs_unchecked_cast,
		source: PropertySource::Field { name: field.name.clone() },
	})
}
