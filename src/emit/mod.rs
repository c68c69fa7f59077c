//! Emitting the java classes of a [`BindingTree`].
//!
//! Each tree gives two classes:
//! - `<Type>BindingPath<R, ...>`, abstract, with an inner class and a lazily created instance of it for each property.
//!   `R` is the type of the root the path starts at.
//! - `<Type>Binding<...>`, the binding used to start a path, holding an instance of the type.

pub mod node;

use sourcegen::GClass;
use jtype::tree::class::TypeParameter;
use crate::builder::{BindingForest, BindingTree, TreeId};
use crate::names::BindingName;

pub const ABSTRACT_BINDING: &str = "org.bindgen.AbstractBinding";
pub const BINDING: &str = "org.bindgen.Binding";
pub const CONTAINER_BINDING: &str = "org.bindgen.ContainerBinding";

const OVERRIDE: &str = "@Override";

#[derive(Debug, Clone, PartialEq)]
pub struct BindingClasses {
	pub path: GClass,
	pub root: GClass,
}

impl BindingClasses {
	pub fn iter(&self) -> impl Iterator<Item=&GClass> {
		[&self.path, &self.root].into_iter()
	}
}

pub fn emit_tree(forest: &BindingForest, id: TreeId) -> BindingClasses {
	let tree = &forest[id];
	let name = BindingName::of(&tree.class);
	BindingClasses {
		path: path_class(forest, tree, &name),
		root: root_class(tree, &name),
	}
}

fn type_parameter_declarations(tree: &BindingTree) -> Vec<String> {
	tree.type_parameters.iter().map(TypeParameter::to_source).collect()
}

fn type_parameter_names(tree: &BindingTree) -> Vec<String> {
	tree.type_parameters.iter().map(|p| p.name.clone()).collect()
}

fn path_class(forest: &BindingForest, tree: &BindingTree, name: &BindingName) -> GClass {
	let bound = tree.bound_type().to_source();

	let mut type_parameters = vec!["R".to_owned()];
	type_parameters.extend(type_parameter_declarations(tree));

	let mut path = GClass::new(name.path_class());
	path.set_abstract()
		.type_parameters(type_parameters.join(", "))
		.base_class(format!("{ABSTRACT_BINDING}<R, {bound}>"));

	path.add_method("getType")
		.annotate(OVERRIDE)
		.returns("java.lang.Class<?>")
		.line(format!("return {}.class;", tree.class.to_source()));

	for child in &tree.children {
		node::emit_node(&mut path, name, forest, child);
	}

	let list = format!("java.util.List<{BINDING}<?>>");
	let get_child_bindings = path.add_method("getChildBindings")
		.annotate(OVERRIDE)
		.returns(&list)
		.line(format!("{list} bindings = new java.util.ArrayList<{BINDING}<?>>();"));
	for child in &tree.children {
		get_child_bindings.line(format!("bindings.add(this.{}());", child.property.name));
	}
	get_child_bindings.line("return bindings;");

	path
}

fn root_class(tree: &BindingTree, name: &BindingName) -> GClass {
	let bound = tree.bound_type().to_source();

	let mut path_arguments = vec![bound.clone()];
	path_arguments.extend(type_parameter_names(tree));

	let mut root = GClass::new(name.root_class());
	root.type_parameters(type_parameter_declarations(tree).join(", "))
		.base_class(format!("{}<{}>", name.path_class(), path_arguments.join(", ")));

	root.field("value")
		.type_(&bound);

	root.add_constructor();
	root.add_constructor()
		.argument(&bound, "value")
		.line("this.set(value);");

	root.add_method("getName")
		.annotate(OVERRIDE)
		.returns("java.lang.String")
		.line("return \"\";");
	root.add_method("getParentBinding")
		.annotate(OVERRIDE)
		.returns(format!("{BINDING}<?>"))
		.line("return null;");
	root.add_method("get")
		.annotate(OVERRIDE)
		.returns(&bound)
		.line("return this.value;");
	root.add_method("set")
		.annotate(OVERRIDE)
		.argument(&bound, "value")
		.line("this.value = value;");
	root.add_method("getWithRoot")
		.annotate(OVERRIDE)
		.returns(&bound)
		.argument(&bound, "root")
		.line("return root;");
	root.add_method("setWithRoot")
		.annotate(OVERRIDE)
		.argument(&bound, "root")
		.argument(&bound, "value")
		.line("throw new RuntimeException(\"the root binding can't be set with a root\");");

	root
}
