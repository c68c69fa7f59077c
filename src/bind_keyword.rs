//! The `bindgen.BindKeyword` class, with a static `bind` method for every type in the registry.
//!
//! With a static import of it, `bind(order).customer().name()` starts a path at any object without naming its
//! binding class.

use log::{debug, error};
use sourcegen::GClass;
use jtype::provider::MetadataProvider;
use jtype::tree::class::TypeParameter;
use jtype::tree::types::TypeRef;
use crate::names::BindingName;
use crate::registry::RootRegistry;

pub const BIND_KEYWORD: &str = "bindgen.BindKeyword";

pub fn generate<P: MetadataProvider>(registry: &RootRegistry, provider: &P) -> GClass {
	let mut class = GClass::new(BIND_KEYWORD);

	for name in registry.iter() {
		let Some(element) = provider.type_element(name) else {
			error!("not adding a bind method for {name}: no type metadata found");
			continue;
		};

		let bound = TypeRef::generic(
			element.name.clone(),
			element.type_parameters.iter().map(|p| TypeRef::TypeVariable(p.name.clone())).collect(),
		).to_source();
		let binding = BindingName::of(&element.name).root_class();
		let type_arguments: Vec<_> = element.type_parameters.iter().map(|p| p.name.as_str()).collect();

		let method = class.add_method("bind")
			.set_static()
			.argument(&bound, "o");
		if type_arguments.is_empty() {
			method.returns(&binding)
				.line(format!("return new {binding}(o);"));
		} else {
			let binding = format!("{binding}<{}>", type_arguments.join(", "));
			let declarations: Vec<_> = element.type_parameters.iter().map(TypeParameter::to_source).collect();
			method.type_parameters(declarations.join(", "))
				.returns(&binding)
				.line(format!("return new {binding}(o);"));
		}
	}

	debug!("{} has {} bind methods", BIND_KEYWORD, class.methods().len());
	class
}
