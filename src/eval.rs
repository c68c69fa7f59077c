//! Evaluating bindings against objects in memory.
//!
//! This does what the generated classes do at runtime: [`Bindings`] is one instance of a root binding class, its
//! child bindings are created on first access and kept, reading goes through all parents starting at the root value
//! (or an explicitly given root), and writing a read only property fails with a [`ReadOnlyViolation`].
//!
//! Objects store their state in slots. A property from a field uses the slot named like the field, and a property
//! from an accessor uses the slot named like the getter. The setter writes that same slot.

use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use anyhow::{bail, Result};
use indexmap::IndexMap;
use log::trace;
use jtype::tree::class::ClassName;
use jtype::tree::types::TypeRef;
use crate::builder::{BindingForest, TreeId};
use crate::property::PropertyDescriptor;

pub type ObjectRef = Rc<RefCell<Object>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Str(String),
	Object(ObjectRef),
	List(Vec<Value>),
}

impl Value {
	pub fn object(object: Object) -> Value {
		Value::Object(Rc::new(RefCell::new(object)))
	}

	pub fn str(s: impl Into<String>) -> Value {
		Value::Str(s.into())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_object(&self) -> Option<&ObjectRef> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
	class: ClassName,
	slots: IndexMap<String, Value>,
}

impl Object {
	pub fn new(class: impl Into<ClassName>) -> Object {
		Object {
			class: class.into(),
			slots: IndexMap::new(),
		}
	}

	pub fn with(mut self, slot: impl Into<String>, value: Value) -> Object {
		self.slots.insert(slot.into(), value);
		self
	}

	pub fn class(&self) -> &ClassName {
		&self.class
	}

	/// The value of a slot, unset slots are `null`.
	pub fn get(&self, slot: &str) -> Value {
		self.slots.get(slot).cloned().unwrap_or(Value::Null)
	}

	pub fn set(&mut self, slot: impl Into<String>, value: Value) {
		self.slots.insert(slot.into(), value);
	}
}

/// Writing to a read only property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyViolation {
	pub property: String,
}

impl Display for ReadOnlyViolation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} is read only", self.property)
	}
}

impl std::error::Error for ReadOnlyViolation {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
	parent: Option<NodeId>,
	/// The tree the property is a child of, and its index there. `None` for the root.
	property: Option<(TreeId, usize)>,
	/// The tree the children come from.
	tree: Option<TreeId>,
	children: IndexMap<String, NodeId>,
}

/// A root binding holding a value, together with all child bindings created so far.
#[derive(Debug)]
pub struct Bindings<'f> {
	forest: &'f BindingForest,
	nodes: Vec<Node>,
	value: Value,
}

impl<'f> Bindings<'f> {
	pub fn new(forest: &'f BindingForest, tree: TreeId, value: Value) -> Bindings<'f> {
		Bindings {
			forest,
			nodes: vec![Node {
				parent: None,
				property: None,
				tree: Some(tree),
				children: IndexMap::new(),
			}],
			value,
		}
	}

	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	/// The number of bindings created so far, including the root.
	pub fn created(&self) -> usize {
		self.nodes.len()
	}

	/// The child binding for a property, created on first access.
	pub fn child(&mut self, node: NodeId, name: &str) -> Result<NodeId> {
		if let Some(&id) = self.nodes[node.0].children.get(name) {
			return Ok(id);
		}

		let forest = self.forest;
		let Some(tree) = self.nodes[node.0].tree else {
			bail!("binding {} has no child bindings", self.path_of(node));
		};
		let Some(index) = forest[tree].children.iter().position(|child| child.property.name == name) else {
			bail!("binding {} has no property {name:?}", self.path_of(node));
		};

		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			parent: Some(node),
			property: Some((tree, index)),
			tree: forest[tree].children[index].subtree,
			children: IndexMap::new(),
		});
		self.nodes[node.0].children.insert(name.to_owned(), id);
		trace!("created binding {}", self.path_of(id));
		Ok(id)
	}

	/// Follows a dotted path of property names, starting at the root.
	pub fn path(&mut self, path: &str) -> Result<NodeId> {
		let mut node = self.root();
		for name in path.split('.') {
			node = self.child(node, name)?;
		}
		Ok(node)
	}

	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.nodes[node.0].parent
	}

	pub fn property(&self, node: NodeId) -> Option<&'f PropertyDescriptor> {
		let forest = self.forest;
		self.nodes[node.0].property
			.map(|(tree, index)| &forest[tree].children[index].property)
	}

	/// The property name, or `""` for the root.
	pub fn name(&self, node: NodeId) -> &'f str {
		self.property(node)
			.map(|property| property.name.as_str())
			.unwrap_or("")
	}

	/// The names of the possible children of a binding.
	pub fn child_names(&self, node: NodeId) -> Vec<&'f str> {
		let forest = self.forest;
		match self.nodes[node.0].tree {
			Some(tree) => forest[tree].child_names(),
			None => Vec::new(),
		}
	}

	pub fn contained_type(&self, node: NodeId) -> Option<&'f TypeRef> {
		self.property(node)?.container_element_type.as_ref()
	}

	/// Reads the value, starting at the value of the root binding.
	pub fn get(&self, node: NodeId) -> Result<Value> {
		self.read(node, None)
	}

	/// Reads the value, starting at the given root value.
	pub fn get_with_root(&self, node: NodeId, root: &Value) -> Result<Value> {
		self.read(node, Some(root))
	}

	/// Writes the value, starting at the value of the root binding.
	pub fn set(&mut self, node: NodeId, value: Value) -> Result<()> {
		if self.property(node).is_none() {
			self.value = value;
			return Ok(());
		}
		self.write(node, None, value)
	}

	/// Writes the value, starting at the given root value.
	pub fn set_with_root(&self, node: NodeId, root: &Value, value: Value) -> Result<()> {
		if self.property(node).is_none() {
			bail!("the root binding can't be set with a root");
		}
		self.write(node, Some(root), value)
	}

	fn read(&self, node: NodeId, root: Option<&Value>) -> Result<Value> {
		let (Some(parent), Some(property)) = (self.parent(node), self.property(node)) else {
			return Ok(root.unwrap_or(&self.value).clone());
		};

		let owner = self.owner(parent, property, root)?;
		let value = owner.borrow().get(property.source.member_name());
		Ok(value)
	}

	fn write(&self, node: NodeId, root: Option<&Value>, value: Value) -> Result<()> {
		let (Some(parent), Some(property)) = (self.parent(node), self.property(node)) else {
			bail!("can't write the root binding here");
		};

		if property.read_only {
			return Err(ReadOnlyViolation { property: property.name.clone() }.into());
		}

		let owner = self.owner(parent, property, root)?;
		owner.borrow_mut().set(property.source.member_name(), value);
		Ok(())
	}

	/// The object holding the property, which is the value of the parent binding.
	fn owner(&self, parent: NodeId, property: &PropertyDescriptor, root: Option<&Value>) -> Result<ObjectRef> {
		match self.read(parent, root)? {
			Value::Object(object) => Ok(object),
			Value::Null => bail!("can't access {}, as {} is null", property.name, self.path_of(parent)),
			other => bail!("can't access {} on {other:?} of {}", property.name, self.path_of(parent)),
		}
	}

	/// The names from the root to the node, like `Order.customer.name`.
	fn path_of(&self, node: NodeId) -> String {
		let mut names = Vec::new();
		let mut current = Some(node);
		while let Some(node) = current {
			match self.parent(node) {
				Some(_) => names.push(self.name(node)),
				None => names.push(self.root_name()),
			}
			current = self.parent(node);
		}
		names.reverse();
		names.join(".")
	}

	fn root_name(&self) -> &'f str {
		let forest = self.forest;
		self.nodes[0].tree
			.and_then(|tree| forest.get(tree))
			.map(|tree| tree.class.simple_name())
			.unwrap_or("root")
	}
}
