//! Building the trees of bindings.
//!
//! Every bindable type gets one [`BindingTree`] in a [`BindingForest`]. A node of a tree is a property; if the type of
//! the property is bindable itself, the node refers to the tree of that type by its [`TreeId`]. Since the trees are
//! only referred to by id, types referring to themselves (directly or through other types) just give cycles of ids.

use std::collections::{HashMap, HashSet};
use std::ops::Index;
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use log::{debug, trace};
use jtype::provider::MetadataProvider;
use jtype::tree::class::{ClassName, TypeElement, TypeParameter};
use jtype::tree::types::{TypeArgument, TypeRef};
use crate::config::Config;
use crate::extract::{container_element_type, ExtractContext, is_container, Member};
use crate::property::PropertyDescriptor;
use crate::names::BindingName;
use crate::resolve::Resolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(usize);

impl TreeId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// The bindings of one type.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingTree {
	pub class: ClassName,
	pub type_parameters: Vec<TypeParameter>,
	/// Sorted by property name.
	pub children: Vec<BindingNode>,
}

impl BindingTree {
	pub fn child(&self, name: &str) -> Option<&BindingNode> {
		self.children.iter().find(|child| child.property.name == name)
	}

	pub fn child_names(&self) -> Vec<&str> {
		self.children.iter().map(|child| child.property.name.as_str()).collect()
	}

	/// The type the tree binds, with its own type parameters as arguments.
	pub fn bound_type(&self) -> TypeRef {
		TypeRef::generic(
			self.class.clone(),
			self.type_parameters.iter().map(|p| TypeRef::TypeVariable(p.name.clone())).collect(),
		)
	}
}

/// The binding of one property.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingNode {
	pub property: PropertyDescriptor,
	/// The tree of the type of the property, if that type is bindable.
	pub subtree: Option<TreeId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingForest {
	trees: Vec<BindingTree>,
	index: IndexMap<ClassName, TreeId>,
}

impl BindingForest {
	pub fn new() -> BindingForest {
		BindingForest::default()
	}

	pub fn get(&self, id: TreeId) -> Option<&BindingTree> {
		self.trees.get(id.0)
	}

	pub fn id_of(&self, class: &str) -> Option<TreeId> {
		self.index.get(class).copied()
	}

	pub fn tree_of(&self, class: &str) -> Option<&BindingTree> {
		self.id_of(class).and_then(|id| self.get(id))
	}

	pub fn len(&self) -> usize {
		self.trees.len()
	}

	pub fn is_empty(&self) -> bool {
		self.trees.is_empty()
	}

	/// All trees, in the order they were started.
	pub fn iter(&self) -> impl Iterator<Item=(TreeId, &BindingTree)> {
		self.trees.iter().enumerate().map(|(i, tree)| (TreeId(i), tree))
	}

	/// Adds an empty tree for a type. It's filled in later, but is already found by [`BindingForest::id_of`].
	fn allocate(&mut self, element: &TypeElement) -> TreeId {
		let id = TreeId(self.trees.len());
		self.trees.push(BindingTree {
			class: element.name.clone(),
			type_parameters: element.type_parameters.clone(),
			children: Vec::new(),
		});
		self.index.insert(element.name.clone(), id);
		id
	}
}

impl Index<TreeId> for BindingForest {
	type Output = BindingTree;

	fn index(&self, id: TreeId) -> &BindingTree {
		&self.trees[id.0]
	}
}

pub struct TreeBuilder<'a, P> {
	provider: &'a P,
	config: &'a Config,
}

impl<'a, P: MetadataProvider> TreeBuilder<'a, P> {
	pub fn new(provider: &'a P, config: &'a Config) -> TreeBuilder<'a, P> {
		TreeBuilder { provider, config }
	}

	/// Builds the tree of a type, and the trees of all bindable types reachable from it.
	///
	/// Types already in the forest are not built again. Fails if there's no metadata for `class`, but the forest is
	/// left untouched in that case.
	pub fn build(&self, forest: &mut BindingForest, class: &str) -> Result<TreeId> {
		if let Some(id) = forest.id_of(class) {
			return Ok(id);
		}

		let provider: &'a P = self.provider;
		let element = provider.type_element(class)
			.with_context(|| anyhow!("no type metadata for {class}"))?;

		let root = forest.allocate(element);
		let mut pending = vec![(root, element)];

		while let Some((id, element)) = pending.pop() {
			let properties = self.properties_of(element);

			let mut children = Vec::with_capacity(properties.len());
			for property in properties {
				let subtree = match self.bindable_element(&property) {
					Some(element) => Some(match forest.id_of(element.name.as_str()) {
						Some(id) => id,
						None => {
							let id = forest.allocate(element);
							pending.push((id, element));
							id
						},
					}),
					None => None,
				};
				children.push(BindingNode { property, subtree });
			}

			trace!("binding {} has the children {:?}", element.name, children.iter().map(|c| &c.property.name).collect::<Vec<_>>());
			forest.trees[id.0].children = children;
		}

		debug!("built the bindings of {class}, the forest now has {} trees", forest.len());
		Ok(root)
	}

	/// Extracts and resolves the properties of a type and its supertypes, sorted by name.
	pub fn properties_of(&self, element: &TypeElement) -> Vec<PropertyDescriptor> {
		let mut resolver = Resolver::new();
		let mut visited = HashSet::new();
		let binding_package = BindingName::of(&element.name).package().to_owned();

		let mut current = element;
		let mut substitution = HashMap::new();
		loop {
			visited.insert(current.name.clone());

			let context = ExtractContext::new(self.provider, self.config, current);
			let mut properties = Vec::new();
			for member in Member::all_of(current) {
				match context.extract(member) {
					// the binding classes only see members of other packages if they are public
					Ok(property) if !property.visibility.is_public() && current.name.package_name() != binding_package => {
						trace!("not binding {} of {}: it's not accessible from the package {binding_package}", member.name(), current.name);
					},
					Ok(property) => properties.push(self.substitute(property, &substitution, element)),
					Err(reason) => trace!("not binding {} of {}: it {reason}", member.name(), current.name),
				}
			}
			resolver.offer_type(properties);

			let Some((supertype, mapping)) = self.supertype(current, &substitution) else {
				break;
			};
			if visited.contains(&supertype.name) {
				debug!("supertype {} of {} is part of a cycle", supertype.name, current.name);
				break;
			}

			current = supertype;
			substitution = mapping;
		}

		resolver.finish()
	}

	/// Finds the supertype of `current`, together with the types its type parameters stand for in the type the
	/// properties are collected for.
	///
	/// This stops at `java.lang.Object`, and at any type without metadata.
	fn supertype(&self, current: &TypeElement, substitution: &HashMap<String, TypeRef>)
			-> Option<(&'a TypeElement, HashMap<String, TypeRef>)> {
		let provider: &'a P = self.provider;

		let (class, arguments) = match current.super_class.as_ref()? {
			TypeRef::Declared(declared) => (declared.class.as_str(), declared.arguments.as_slice()),
			// a pre-generics class without a package
			TypeRef::TypeVariable(symbol) => (symbol.as_str(), [].as_slice()),
			_ => return None,
		};
		if class == ClassName::JAVA_LANG_OBJECT.as_str() {
			return None;
		}

		let Some(element) = provider.type_element(class) else {
			debug!("not looking for properties beyond the unknown supertype {class} of {}", current.name);
			return None;
		};

		let mapping = element.type_parameters.iter()
			.enumerate()
			.map(|(i, parameter)| {
				let ty = match arguments.get(i) {
					Some(TypeArgument::Type(ty)) => ty.substitute(substitution),
					// raw supertype, or a wildcard
					_ => parameter.upper_bound(),
				};
				(parameter.name.clone(), ty)
			})
			.collect();

		Some((element, mapping))
	}

	/// Expresses a property of a supertype in terms of the type the properties are collected for.
	fn substitute(&self, property: PropertyDescriptor, substitution: &HashMap<String, TypeRef>, bound: &TypeElement) -> PropertyDescriptor {
		if substitution.is_empty() {
			return property;
		}
		let declared_type = property.declared_type.substitute(substitution);
		if declared_type == property.declared_type {
			return property;
		}

		let needs_unchecked_cast = if property.is_type_variable() {
			matches!(declared_type, TypeRef::TypeVariable(_))
		} else {
			property.needs_unchecked_cast
		};
		PropertyDescriptor {
			container_element_type: container_element_type(&declared_type, bound, self.provider),
			declared_type,
			needs_unchecked_cast,
			..property
		}
	}

	/// The type of the property, if it gets its own bindings. That's the case for declared types with metadata,
	/// except for containers.
	pub fn bindable_element(&self, property: &PropertyDescriptor) -> Option<&'a TypeElement> {
		let provider: &'a P = self.provider;

		let declared = property.declared_type.as_declared()?;
		if is_container(&property.declared_type) {
			return None;
		}
		provider.type_element(declared.class.as_str())
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::{anyhow, Result};
	use jtype::provider::{ClassPool, MetadataProvider};
	use jtype::tree::class::{TypeElement, TypeParameter};
	use jtype::tree::field::{Field, FieldAccess};
	use jtype::tree::method::{Method, MethodAccess};
	use jtype::tree::types::TypeRef;
	use crate::builder::{BindingForest, TreeBuilder};
	use crate::config::Config;

	fn parse(s: &str) -> Result<TypeRef> {
		TypeRef::parse(s)
	}

	#[test]
	fn self_reference() -> Result<()> {
		let pool = ClassPool::new()
			.with(TypeElement::new("com.app.Node")
				.with_method(Method::getter("getParent", parse("com.app.Node")?))
				.with_method(Method::getter("getChildren", parse("java.util.List<com.app.Node>")?))
				.with_field(Field::new(FieldAccess::PUBLIC, "label", parse("java.lang.String")?)))?;
		let config = Config::new();

		let mut forest = BindingForest::new();
		let id = TreeBuilder::new(&pool, &config).build(&mut forest, "com.app.Node")?;

		assert_eq!(forest.len(), 1);
		let tree = &forest[id];
		assert_eq!(tree.child_names(), vec!["children", "label", "parent"]);
		assert_eq!(tree.child("parent").and_then(|c| c.subtree), Some(id));
		assert_eq!(tree.child("children").and_then(|c| c.subtree), None);
		assert_eq!(
			tree.child("children").and_then(|c| c.property.container_element_type.clone()),
			Some(parse("com.app.Node")?),
		);
		Ok(())
	}

	#[test]
	fn unknown_root() -> Result<()> {
		let pool = ClassPool::new();
		let config = Config::new();

		let mut forest = BindingForest::new();
		let result = TreeBuilder::new(&pool, &config).build(&mut forest, "com.app.Missing");
		assert_eq!(result.map_err(|e| e.to_string()), Err("no type metadata for com.app.Missing".to_owned()));
		assert!(forest.is_empty());
		Ok(())
	}

	#[test]
	fn supertypes() -> Result<()> {
		let pool = ClassPool::new()
			.with(TypeElement::new("com.app.Base")
				.with_type_parameter(TypeParameter::new("T"))
				.with_super_class(parse("com.lib.Unknown")?)
				.with_field(Field::new(FieldAccess::PUBLIC, "value", parse("T")?))
				.with_field(Field::new(FieldAccess::PUBLIC, "values", parse("java.util.List<T>")?))
				.with_method(Method::getter("getName", parse("java.lang.String")?)))?
			.with(TypeElement::new("com.app.Sub")
				.with_super_class(parse("com.app.Base<java.lang.Integer>")?)
				.with_method(Method::getter("getName", parse("java.lang.CharSequence")?))
				.with_field(Field::new(FieldAccess::PUBLIC, "own", parse("int")?)))?
			.with(TypeElement::new("com.app.RawSub")
				.with_super_class(parse("com.app.Base")?))?;
		let config = Config::new();
		let builder = TreeBuilder::new(&pool, &config);

		let sub = pool.type_element("com.app.Sub").ok_or_else(|| anyhow!("no Sub"))?;
		let properties = builder.properties_of(sub);
		let summary: Vec<_> = properties.iter()
			.map(|p| (p.name.as_str(), p.declared_type.to_string(), p.container_element_type.as_ref().map(TypeRef::to_string)))
			.collect();
		assert_eq!(summary, vec![
			("name", "java.lang.CharSequence".to_owned(), None),
			("own", "java.lang.Integer".to_owned(), None),
			("value", "java.lang.Integer".to_owned(), None),
			("values", "java.util.List<java.lang.Integer>".to_owned(), Some("java.lang.Integer".to_owned())),
		]);
		assert!(!properties[2].needs_unchecked_cast);

		let raw_sub = pool.type_element("com.app.RawSub").ok_or_else(|| anyhow!("no RawSub"))?;
		let properties = builder.properties_of(raw_sub);
		assert_eq!(properties.iter().map(|p| p.declared_type.to_string()).collect::<Vec<_>>(), vec![
			"java.lang.String",
			"java.lang.Object",
			"java.util.List<java.lang.Object>",
		]);
		Ok(())
	}

	#[test]
	fn supertype_cycle() -> Result<()> {
		let pool = ClassPool::new()
			.with(TypeElement::new("com.app.A")
				.with_super_class(parse("com.app.B")?)
				.with_field(Field::new(FieldAccess::PUBLIC, "a", parse("int")?)))?
			.with(TypeElement::new("com.app.B")
				.with_super_class(parse("com.app.A")?)
				.with_field(Field::new(FieldAccess::PUBLIC, "b", parse("int")?)))?;
		let config = Config::new();

		let mut forest = BindingForest::new();
		let id = TreeBuilder::new(&pool, &config).build(&mut forest, "com.app.A")?;
		assert_eq!(forest[id].child_names(), vec!["a", "b"]);
		Ok(())
	}

	#[test]
	fn inaccessible_members() -> Result<()> {
		let protected = FieldAccess { is_public: false, is_protected: true, ..FieldAccess::PUBLIC };
		let pool = ClassPool::new()
			.with(TypeElement::new("com.lib.Base")
				.with_field(Field::new(FieldAccess::PUBLIC, "shared", parse("int")?))
				.with_field(Field::new(protected, "inherited", parse("int")?)))?
			.with(TypeElement::new("com.app.Sub")
				.with_super_class(parse("com.lib.Base")?)
				.with_field(Field::new(protected, "own", parse("int")?))
				.with_method(Method { access: MethodAccess::default(), ..Method::getter("getLocal", parse("int")?) }))?
			.with(TypeElement::new("com.app.Sub$Entry")
				.with_field(Field::new(FieldAccess::PUBLIC, "amount", parse("int")?))
				.with_field(Field::new(FieldAccess::default(), "note", parse("java.lang.String")?)))?;
		let config = Config::new();
		let builder = TreeBuilder::new(&pool, &config);

		// the bindings of Sub are in com.app, where only the public members of com.lib.Base can be seen
		let sub = pool.type_element("com.app.Sub").ok_or_else(|| anyhow!("no Sub"))?;
		let names: Vec<_> = builder.properties_of(sub).into_iter().map(|p| p.name).collect();
		assert_eq!(names, vec!["local", "own", "shared"]);

		// the bindings of Sub$Entry are in com.app.sub
		let entry = pool.type_element("com.app.Sub$Entry").ok_or_else(|| anyhow!("no Sub$Entry"))?;
		let names: Vec<_> = builder.properties_of(entry).into_iter().map(|p| p.name).collect();
		assert_eq!(names, vec!["amount"]);
		Ok(())
	}
}
