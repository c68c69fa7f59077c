//! Making property names unique.
//!
//! Properties are offered type by type, starting with the bound type and then going up the supertypes. Within a
//! type, accessors come before fields, and the outcome doesn't depend on the order the fields are declared in. The
//! rules are:
//! - The first accessor claiming a name gets it, any later accessor with that name is rejected.
//! - A field of the same name and type as an accessor property is the backing field of it, and dropped.
//! - Any other field with a taken name gets `Field` appended until the name is free. Fields whose names are free
//!   are claimed before any field is renamed, and the renaming goes by field name.
//! - A property of a supertype is shadowed by any property of the same name of a subtype.
//!
//! Two names only differing in the case of the first letter are the same name here, as both give the same inner
//! binding class. The names of the members of the binding classes are always taken: an accessor with such a name
//! gets `Method` appended. An accessor named like a method of `java.lang.Object` is rejected.

use std::collections::HashSet;
use log::debug;
use crate::names::capitalize;
use crate::property::PropertyDescriptor;

/// Names of the methods of the generated binding classes.
pub const BINDING_MEMBER_NAMES: [&str; 9] = [
	"get",
	"set",
	"getName",
	"getParentBinding",
	"getType",
	"getWithRoot",
	"setWithRoot",
	"getChildBindings",
	"getContainedType",
];

/// Names of the methods of `java.lang.Object` a property could be named like.
pub const OBJECT_METHOD_NAMES: [&str; 4] = [
	"getClass",
	"hashCode",
	"toString",
	"clone",
];

pub fn is_reserved(name: &str) -> bool {
	BINDING_MEMBER_NAMES.contains(&name) || OBJECT_METHOD_NAMES.contains(&name)
}

/// What happened to an offered property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	Claimed,
	/// The property was renamed to the given name.
	Renamed(String),
	/// The property is the backing field of an accessor property.
	Deduplicated,
	/// An accessor property with a name that's already taken.
	Rejected,
	/// A subtype already has a property of that name.
	Shadowed,
}

#[derive(Debug, Clone, Default)]
pub struct Resolver {
	properties: Vec<PropertyDescriptor>,
}

impl Resolver {
	pub fn new() -> Resolver {
		Resolver::default()
	}

	/// Offers the properties of one type. Subtypes must be offered before their supertypes.
	///
	/// Returns what happened to each property, in the order they were given.
	pub fn offer_type(&mut self, properties: Vec<PropertyDescriptor>) -> Vec<Resolution> {
		let inherited: HashSet<String> = self.properties.iter()
			.map(|property| property.name.clone())
			.collect();

		let mut resolutions = vec![None; properties.len()];
		let (mut fields, accessors): (Vec<_>, Vec<_>) = properties.into_iter()
			.enumerate()
			.partition(|(_, property)| property.source.is_field());

		for (i, property) in accessors {
			resolutions[i] = Some(if inherited.contains(&property.name) {
				debug!("{} of {} is shadowed by a subtype", property.name, property.source);
				Resolution::Shadowed
			} else {
				self.offer_accessor(property)
			});
		}

		fields.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

		let mut colliding = Vec::new();
		for (i, property) in fields {
			if inherited.contains(&property.name) {
				debug!("{} of {} is shadowed by a subtype", property.name, property.source);
				resolutions[i] = Some(Resolution::Shadowed);
			} else if self.is_backing_field(&property) {
				debug!("dropping {} as it's the backing field of property {:?}", property.source, property.name);
				resolutions[i] = Some(Resolution::Deduplicated);
			} else if self.is_taken(&property.name) {
				colliding.push((i, property));
			} else {
				self.properties.push(property);
				resolutions[i] = Some(Resolution::Claimed);
			}
		}

		for (i, property) in colliding {
			resolutions[i] = Some(self.rename(property, "Field"));
		}

		resolutions.into_iter()
			.map(|resolution| resolution.unwrap_or(Resolution::Rejected))
			.collect()
	}

	fn offer_accessor(&mut self, property: PropertyDescriptor) -> Resolution {
		if OBJECT_METHOD_NAMES.contains(&property.name.as_str()) {
			debug!("rejecting {} as {:?} is the name of a method of java.lang.Object", property.source, property.name);
			return Resolution::Rejected;
		}
		if BINDING_MEMBER_NAMES.contains(&property.name.as_str()) {
			return self.rename(property, "Method");
		}
		if self.is_taken(&property.name) {
			debug!("rejecting {} as the name {:?} is already taken", property.source, property.name);
			return Resolution::Rejected;
		}
		self.properties.push(property);
		Resolution::Claimed
	}

	fn is_backing_field(&self, field: &PropertyDescriptor) -> bool {
		self.properties.iter().any(|other| {
			other.name == field.name &&
				!other.source.is_field() &&
				other.declared_type == field.declared_type
		})
	}

	fn rename(&mut self, mut property: PropertyDescriptor, suffix: &str) -> Resolution {
		let original = property.name.clone();
		while self.is_taken(&property.name) {
			property.name.push_str(suffix);
		}
		debug!("renaming {} from {original:?} to {:?}", property.source, property.name);

		let renamed = property.name.clone();
		self.properties.push(property);
		Resolution::Renamed(renamed)
	}

	fn is_taken(&self, name: &str) -> bool {
		if is_reserved(name) {
			return true;
		}
		let class_name = capitalize(name);
		self.properties.iter().any(|property| property.name == name || capitalize(&property.name) == class_name)
	}

	/// The resolved properties, sorted by name.
	pub fn finish(mut self) -> Vec<PropertyDescriptor> {
		self.properties.sort_by(|a, b| a.name.cmp(&b.name));
		self.properties
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use jtype::tree::types::TypeRef;
	use crate::property::{PropertyDescriptor, PropertySource, Visibility};
	use crate::resolve::{Resolution, Resolver};

	fn field(name: &'static str, ty: &str) -> Result<PropertyDescriptor> {
		Ok(PropertyDescriptor {
			name: name.to_owned(),
			declared_type: TypeRef::parse(ty)?,
			read_only: false,
			visibility: Visibility::Public,
			container_element_type: None,
			needs_unchecked_cast: false,
			source: PropertySource::Field { name: name.into() },
		})
	}

	fn accessor(name: &str, getter: &'static str, ty: &str) -> Result<PropertyDescriptor> {
		Ok(PropertyDescriptor {
			name: name.to_owned(),
			declared_type: TypeRef::parse(ty)?,
			read_only: true,
			visibility: Visibility::Public,
			container_element_type: None,
			needs_unchecked_cast: false,
			source: PropertySource::Accessor { getter: getter.into(), setter: None },
		})
	}

	fn names(properties: &[PropertyDescriptor]) -> Vec<&str> {
		properties.iter().map(|p| p.name.as_str()).collect()
	}

	fn resolve(properties: Vec<PropertyDescriptor>) -> Vec<PropertyDescriptor> {
		let mut resolver = Resolver::new();
		resolver.offer_type(properties);
		resolver.finish()
	}

	#[test]
	fn accessors_first() -> Result<()> {
		let mut resolver = Resolver::new();
		let resolutions = resolver.offer_type(vec![
			field("name", "java.lang.String")?,
			accessor("name", "getName", "java.lang.String")?,
			field("good", "java.lang.String")?,
			accessor("good", "isGood", "java.lang.Boolean")?,
			accessor("good", "getGood", "java.lang.Boolean")?,
			field("getName", "java.lang.String")?,
			field("id", "java.lang.Long")?,
		]);
		assert_eq!(resolutions, vec![
			// backing field
			Resolution::Deduplicated,
			Resolution::Claimed,
			// same name, other type
			Resolution::Renamed("goodField".to_owned()),
			Resolution::Claimed,
			Resolution::Rejected,
			Resolution::Renamed("getNameField".to_owned()),
			Resolution::Claimed,
		]);

		let properties = resolver.finish();
		assert_eq!(names(&properties), vec!["getNameField", "good", "goodField", "id", "name"]);
		assert!(properties[1].source.member_name() == "isGood");
		Ok(())
	}

	#[test]
	fn repeated_suffix() -> Result<()> {
		let mut resolver = Resolver::new();
		let resolutions = resolver.offer_type(vec![
			accessor("value", "getValue", "java.lang.Integer")?,
			accessor("valueField", "getValueField", "java.lang.Integer")?,
			field("value", "java.lang.String")?,
		]);
		assert_eq!(resolutions[2], Resolution::Renamed("valueFieldField".to_owned()));
		Ok(())
	}

	#[test]
	fn reserved_names() -> Result<()> {
		let mut resolver = Resolver::new();
		let resolutions = resolver.offer_type(vec![
			accessor("getMethod", "getGetMethod", "java.lang.Object")?,
			accessor("get", "get", "java.lang.Object")?,
			accessor("getClass", "getClass", "java.lang.Class<?>")?,
			accessor("hashCode", "hashCode", "java.lang.Integer")?,
			field("set", "java.lang.String")?,
			field("toString", "java.lang.String")?,
		]);
		assert_eq!(resolutions, vec![
			Resolution::Claimed,
			Resolution::Renamed("getMethodMethod".to_owned()),
			Resolution::Rejected,
			Resolution::Rejected,
			Resolution::Renamed("setField".to_owned()),
			Resolution::Renamed("toStringField".to_owned()),
		]);
		assert_eq!(
			names(&resolver.finish()),
			vec!["getMethod", "getMethodMethod", "setField", "toStringField"],
		);
		Ok(())
	}

	#[test]
	fn same_binding_class_name() -> Result<()> {
		// `getURL` gives `uRL`, and both `uRL` and `URL` would get the inner class `MyURLBinding`
		let mut resolver = Resolver::new();
		let resolutions = resolver.offer_type(vec![
			field("URL", "java.lang.String")?,
			accessor("uRL", "getURL", "java.lang.String")?,
		]);
		assert_eq!(resolutions, vec![Resolution::Renamed("URLField".to_owned()), Resolution::Claimed]);

		let properties = resolve(vec![field("uRL", "java.lang.String")?, field("URL", "java.lang.Integer")?]);
		assert_eq!(names(&properties), vec!["URL", "uRLField"]);
		Ok(())
	}

	#[test]
	fn shadowing() -> Result<()> {
		let mut resolver = Resolver::new();
		resolver.offer_type(vec![
			accessor("name", "getName", "java.lang.String")?,
			field("count", "java.lang.Integer")?,
		]);

		assert_eq!(resolver.offer_type(vec![
			accessor("name", "getName", "java.lang.String")?,
			field("count", "java.lang.Integer")?,
			accessor("parent", "getParent", "java.lang.Object")?,
		]), vec![Resolution::Shadowed, Resolution::Shadowed, Resolution::Claimed]);

		assert_eq!(resolver.offer_type(vec![
			field("parent", "java.lang.String")?,
			field("root", "java.lang.String")?,
		]), vec![Resolution::Shadowed, Resolution::Claimed]);

		assert_eq!(names(&resolver.finish()), vec!["count", "name", "parent", "root"]);
		Ok(())
	}

	#[test]
	fn order_independent() -> Result<()> {
		let a = resolve(vec![accessor("b", "getB", "java.lang.String")?, accessor("a", "getA", "java.lang.String")?]);
		let b = resolve(vec![accessor("a", "getA", "java.lang.String")?, accessor("b", "getB", "java.lang.String")?]);
		assert_eq!(a, b);
		Ok(())
	}

	#[test]
	fn field_order_independent() -> Result<()> {
		let summary = |properties: Vec<PropertyDescriptor>| -> Vec<(String, String)> {
			properties.into_iter()
				.map(|p| (p.name, p.source.member_name().to_owned()))
				.collect()
		};

		let a = summary(resolve(vec![
			accessor("good", "getGood", "java.lang.Boolean")?,
			field("good", "java.lang.String")?,
			field("goodField", "java.lang.Integer")?,
		]));
		let b = summary(resolve(vec![
			field("goodField", "java.lang.Integer")?,
			field("good", "java.lang.String")?,
			accessor("good", "getGood", "java.lang.Boolean")?,
		]));
		assert_eq!(a, b);
		assert_eq!(a, vec![
			("good".to_owned(), "getGood".to_owned()),
			("goodField".to_owned(), "goodField".to_owned()),
			("goodFieldField".to_owned(), "good".to_owned()),
		]);
		Ok(())
	}
}
