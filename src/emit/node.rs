use sourcegen::{Access, GClass};
use crate::builder::{BindingForest, BindingNode};
use crate::emit::{ABSTRACT_BINDING, BINDING, CONTAINER_BINDING, OVERRIDE};
use crate::names::{self, BindingName};
use crate::property::{PropertyDescriptor, PropertySource, Visibility};

const UNCHECKED: &str = "@SuppressWarnings(\"unchecked\")";
const READ_ONLY: &str = "throw new RuntimeException(this.getName() + \" is read only\");";

/// Adds the binding of one property to the path class of its owner: a field caching the binding, an accessor creating
/// it on first use, and the inner class implementing it.
pub fn emit_node(path: &mut GClass, path_name: &BindingName, forest: &BindingForest, node: &BindingNode) {
	let property = &node.property;
	let name = property.name.as_str();
	let inner_name = names::node_class_name(name);
	let outer = path_name.path_simple_name();
	let set_type = property.declared_type.to_source();

	path.field(name)
		.type_(&inner_name);

	let accessor = path.add_method(name)
		.access(access(property.visibility))
		.returns(&inner_name)
		.line(format!("if (this.{name} == null) {{"))
		.line(format!("    this.{name} = new {inner_name}();"))
		.line("}")
		.line(format!("return this.{name};"));
	if property.needs_unchecked_cast {
		accessor.annotate(UNCHECKED);
	}

	let inner = path.inner_class(&inner_name);
	inner.access(access(property.visibility))
		.base_class(base_class(forest, node, &set_type));
	if property.needs_unchecked_cast {
		inner.annotate(UNCHECKED);
	}
	inner.field("serialVersionUID")
		.set_static()
		.set_final()
		.type_("long")
		.initial_value("1L");

	inner.add_method("getName")
		.annotate(OVERRIDE)
		.returns("java.lang.String")
		.line(format!("return \"{name}\";"));

	inner.add_method("getParentBinding")
		.annotate(OVERRIDE)
		.returns(format!("{BINDING}<?>"))
		.line(format!("return {outer}.this;"));

	let read = read_expression(property);
	let cast = if property.needs_cast_on_read() {
		format!("({set_type}) ")
	} else {
		String::new()
	};

	let get = inner.add_method("get")
		.annotate(OVERRIDE)
		.returns(&set_type)
		.line(format!("return {cast}{outer}.this.get().{read};"));
	if property.needs_cast_on_read() {
		get.annotate(UNCHECKED);
	}

	let get_with_root = inner.add_method("getWithRoot")
		.annotate(OVERRIDE)
		.returns(&set_type)
		.argument("R", "root")
		.line(format!("return {cast}{outer}.this.getWithRoot(root).{read};"));
	if property.needs_cast_on_read() {
		get_with_root.annotate(UNCHECKED);
	}

	let write = write_statement(property);

	inner.add_method("set")
		.annotate(OVERRIDE)
		.argument(&set_type, "value")
		.line(match &write {
			Some(write) => format!("{outer}.this.get().{write}"),
			None => READ_ONLY.to_owned(),
		});

	inner.add_method("setWithRoot")
		.annotate(OVERRIDE)
		.argument("R", "root")
		.argument(&set_type, "value")
		.line(match &write {
			Some(write) => format!("{outer}.this.getWithRoot(root).{write}"),
			None => READ_ONLY.to_owned(),
		});

	if let Some(element) = &property.container_element_type {
		inner.implements(CONTAINER_BINDING);
		inner.add_method("getContainedType")
			.annotate(OVERRIDE)
			.returns("java.lang.Class<?>")
			.line(format!("return {}.class;", element.erasure_source()));
	}

	if property.is_type_variable() || property.is_array() {
		inner.add_method("getType")
			.annotate(OVERRIDE)
			.returns("java.lang.Class<?>")
			.line("return null;");
	} else if node.subtree.is_none() {
		// there's no path class to inherit it from
		inner.add_method("getType")
			.annotate(OVERRIDE)
			.returns("java.lang.Class<?>")
			.line(format!("return {}.class;", property.declared_type.erasure_source()));
	}
}

/// The binding of a member is as visible as the member.
fn access(visibility: Visibility) -> Access {
	match visibility {
		Visibility::Public => Access::Public,
		Visibility::Protected => Access::Protected,
		Visibility::Package => Access::Package,
	}
}

/// Extends the path class of the property type if there is one, so that the properties of the property type can be
/// reached from the binding.
fn base_class(forest: &BindingForest, node: &BindingNode, set_type: &str) -> String {
	let Some(tree) = node.subtree.and_then(|id| forest.get(id)) else {
		return format!("{ABSTRACT_BINDING}<R, {set_type}>");
	};

	let declared = node.property.declared_type.as_declared();
	let mut arguments = vec!["R".to_owned()];
	for (i, parameter) in tree.type_parameters.iter().enumerate() {
		arguments.push(match declared.and_then(|declared| declared.type_argument(i)) {
			Some(argument) => argument.to_source(),
			// raw type or wildcard
			None => parameter.upper_bound().to_source(),
		});
	}
	format!("{}<{}>", BindingName::of(&tree.class).path_class(), arguments.join(", "))
}

/// How the value is read from the owner: `.name` for a field, `.getName()` for an accessor.
fn read_expression(property: &PropertyDescriptor) -> String {
	match &property.source {
		PropertySource::Field { name } => name.to_string(),
		PropertySource::Accessor { getter, .. } => format!("{getter}()"),
	}
}

/// The assignment or setter call writing `value`, `None` for read only properties.
fn write_statement(property: &PropertyDescriptor) -> Option<String> {
	if property.read_only {
		return None;
	}
	match &property.source {
		PropertySource::Field { name } => Some(format!("{name} = value;")),
		PropertySource::Accessor { setter: Some(setter), .. } => Some(format!("{setter}(value);")),
		PropertySource::Accessor { setter: None, .. } => None,
	}
}
