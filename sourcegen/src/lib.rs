//! A small crate for building java source files as a tree of declarations.
//!
//! A [`GClass`] holds fields, constructors, methods and inner classes; each method holds its body as a list of lines.
//! [`GClass::to_code`] renders a top level class (with its `package` declaration) to java source code.

mod render;

use indexmap::IndexMap;

/// The access modifier of a declaration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Access {
	#[default]
	Public,
	Protected,
	/// No modifier at all.
	Package,
	Private,
}

impl Access {
	/// The modifier including a trailing space, or `""` for [`Access::Package`].
	pub fn prefix(self) -> &'static str {
		match self {
			Access::Public => "public ",
			Access::Protected => "protected ",
			Access::Package => "",
			Access::Private => "private ",
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct GClass {
	name: String,
	type_parameters: Option<String>,
	access: Access,
	is_static: bool,
	is_abstract: bool,
	base_class: Option<String>,
	interfaces: Vec<String>,
	annotations: Vec<String>,
	fields: IndexMap<String, GField>,
	constructors: Vec<GMethod>,
	methods: Vec<GMethod>,
	inner_classes: IndexMap<String, GClass>,
}

impl GClass {
	/// Creates a class. For a top level class, `name` is the fully qualified name, like `com.app.FooBinding`; for an
	/// inner class it's the simple name.
	pub fn new(name: impl Into<String>) -> GClass {
		GClass {
			name: name.into(),
			type_parameters: None,
			access: Access::Public,
			is_static: false,
			is_abstract: false,
			base_class: None,
			interfaces: Vec::new(),
			annotations: Vec::new(),
			fields: IndexMap::new(),
			constructors: Vec::new(),
			methods: Vec::new(),
			inner_classes: IndexMap::new(),
		}
	}

	pub fn full_name(&self) -> &str {
		&self.name
	}

	pub fn simple_name(&self) -> &str {
		match self.name.rfind('.') {
			Some(last_dot) => &self.name[last_dot + 1..],
			None => &self.name,
		}
	}

	pub fn package_name(&self) -> &str {
		match self.name.rfind('.') {
			Some(last_dot) => &self.name[..last_dot],
			None => "",
		}
	}

	/// The type parameters, without the `<` and `>`, like `R, T extends java.lang.Number`.
	pub fn type_parameters(&mut self, type_parameters: impl Into<String>) -> &mut GClass {
		let type_parameters = type_parameters.into();
		self.type_parameters = (!type_parameters.is_empty()).then_some(type_parameters);
		self
	}

	pub fn access(&mut self, access: Access) -> &mut GClass {
		self.access = access;
		self
	}

	pub fn set_static(&mut self) -> &mut GClass {
		self.is_static = true;
		self
	}

	pub fn set_abstract(&mut self) -> &mut GClass {
		self.is_abstract = true;
		self
	}

	pub fn base_class(&mut self, base_class: impl Into<String>) -> &mut GClass {
		self.base_class = Some(base_class.into());
		self
	}

	pub fn implements(&mut self, interface: impl Into<String>) -> &mut GClass {
		self.interfaces.push(interface.into());
		self
	}

	/// Adds an annotation, written including the `@`.
	pub fn annotate(&mut self, annotation: impl Into<String>) -> &mut GClass {
		self.annotations.push(annotation.into());
		self
	}

	/// Returns the field of that name, creating it if it doesn't exist yet.
	pub fn field(&mut self, name: &str) -> &mut GField {
		self.fields.entry(name.to_owned())
			.or_insert_with(|| GField::new(name))
	}

	pub fn add_constructor(&mut self) -> &mut GMethod {
		let constructor = GMethod::new(self.simple_name());
		self.constructors.push(constructor);
		let last = self.constructors.len() - 1;
		&mut self.constructors[last]
	}

	/// Adds a new method. Methods may be overloaded, so this never reuses an existing method.
	pub fn add_method(&mut self, name: &str) -> &mut GMethod {
		self.methods.push(GMethod::new(name));
		let last = self.methods.len() - 1;
		&mut self.methods[last]
	}

	/// Returns the inner class of that name, creating it if it doesn't exist yet.
	pub fn inner_class(&mut self, name: &str) -> &mut GClass {
		self.inner_classes.entry(name.to_owned())
			.or_insert_with(|| GClass::new(name))
	}

	pub fn get_field(&self, name: &str) -> Option<&GField> {
		self.fields.get(name)
	}

	/// Finds the first method with that name.
	pub fn get_method(&self, name: &str) -> Option<&GMethod> {
		self.methods.iter().find(|m| m.name == name)
	}

	pub fn get_inner_class(&self, name: &str) -> Option<&GClass> {
		self.inner_classes.get(name)
	}

	pub fn methods(&self) -> &[GMethod] {
		&self.methods
	}

	pub fn constructors(&self) -> &[GMethod] {
		&self.constructors
	}

	pub fn fields(&self) -> impl Iterator<Item=&GField> {
		self.fields.values()
	}

	pub fn inner_classes(&self) -> impl Iterator<Item=&GClass> {
		self.inner_classes.values()
	}

	pub fn get_base_class(&self) -> Option<&str> {
		self.base_class.as_deref()
	}

	pub fn get_interfaces(&self) -> &[String] {
		&self.interfaces
	}

	pub fn get_annotations(&self) -> &[String] {
		&self.annotations
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	pub fn is_abstract(&self) -> bool {
		self.is_abstract
	}

	pub fn get_access(&self) -> Access {
		self.access
	}

	/// Renders this class as the content of a java source file, same as its [`Display`][std::fmt::Display] output.
	pub fn to_code(&self) -> String {
		self.to_string()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct GMethod {
	name: String,
	access: Access,
	is_static: bool,
	is_abstract: bool,
	type_parameters: Option<String>,
	/// `None` is `void` (or no return type at all for a constructor).
	return_type: Option<String>,
	arguments: Vec<(String, String)>,
	annotations: Vec<String>,
	body: Vec<String>,
}

impl GMethod {
	fn new(name: &str) -> GMethod {
		GMethod {
			name: name.to_owned(),
			access: Access::Public,
			is_static: false,
			is_abstract: false,
			type_parameters: None,
			return_type: None,
			arguments: Vec::new(),
			annotations: Vec::new(),
			body: Vec::new(),
		}
	}

	pub fn returns(&mut self, return_type: impl Into<String>) -> &mut GMethod {
		self.return_type = Some(return_type.into());
		self
	}

	pub fn argument(&mut self, type_: impl Into<String>, name: impl Into<String>) -> &mut GMethod {
		self.arguments.push((type_.into(), name.into()));
		self
	}

	pub fn access(&mut self, access: Access) -> &mut GMethod {
		self.access = access;
		self
	}

	pub fn set_static(&mut self) -> &mut GMethod {
		self.is_static = true;
		self
	}

	/// Makes the method abstract. An abstract method has no body.
	pub fn set_abstract(&mut self) -> &mut GMethod {
		self.is_abstract = true;
		self
	}

	pub fn type_parameters(&mut self, type_parameters: impl Into<String>) -> &mut GMethod {
		let type_parameters = type_parameters.into();
		self.type_parameters = (!type_parameters.is_empty()).then_some(type_parameters);
		self
	}

	pub fn annotate(&mut self, annotation: impl Into<String>) -> &mut GMethod {
		self.annotations.push(annotation.into());
		self
	}

	/// Appends a line to the body. The line is indented relative to the method.
	pub fn line(&mut self, line: impl Into<String>) -> &mut GMethod {
		self.body.push(line.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn get_return_type(&self) -> Option<&str> {
		self.return_type.as_deref()
	}

	pub fn get_arguments(&self) -> &[(String, String)] {
		&self.arguments
	}

	pub fn get_annotations(&self) -> &[String] {
		&self.annotations
	}

	pub fn body(&self) -> &[String] {
		&self.body
	}

	pub fn get_access(&self) -> Access {
		self.access
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	/// The body joined by newlines, useful for checking for some content.
	pub fn body_text(&self) -> String {
		self.body.join("\n")
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct GField {
	name: String,
	type_: String,
	access: Access,
	is_static: bool,
	is_final: bool,
	initial_value: Option<String>,
	annotations: Vec<String>,
}

impl GField {
	fn new(name: &str) -> GField {
		GField {
			name: name.to_owned(),
			type_: "java.lang.Object".to_owned(),
			access: Access::Private,
			is_static: false,
			is_final: false,
			initial_value: None,
			annotations: Vec::new(),
		}
	}

	pub fn type_(&mut self, type_: impl Into<String>) -> &mut GField {
		self.type_ = type_.into();
		self
	}

	pub fn access(&mut self, access: Access) -> &mut GField {
		self.access = access;
		self
	}

	pub fn set_static(&mut self) -> &mut GField {
		self.is_static = true;
		self
	}

	pub fn set_final(&mut self) -> &mut GField {
		self.is_final = true;
		self
	}

	pub fn initial_value(&mut self, initial_value: impl Into<String>) -> &mut GField {
		self.initial_value = Some(initial_value.into());
		self
	}

	pub fn annotate(&mut self, annotation: impl Into<String>) -> &mut GField {
		self.annotations.push(annotation.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn get_type(&self) -> &str {
		&self.type_
	}

	pub fn get_access(&self) -> Access {
		self.access
	}

	pub fn get_annotations(&self) -> &[String] {
		&self.annotations
	}
}
