use std::fmt::{Display, Formatter, Result, Write};
use crate::{GClass, GField, GMethod};

const INDENT: &str = "    ";

impl Display for GClass {
	/// Writes the class as the content of a java source file, with the `package` declaration if there is one.
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		let package = self.package_name();
		if !package.is_empty() {
			writeln!(f, "package {package};")?;
			writeln!(f)?;
		}
		write_class(self, f, 0)
	}
}

fn indent(s: &mut impl Write, level: usize) -> Result {
	for _ in 0..level {
		s.write_str(INDENT)?;
	}
	Ok(())
}

fn write_class(class: &GClass, s: &mut impl Write, level: usize) -> Result {
	for annotation in &class.annotations {
		indent(s, level)?;
		writeln!(s, "{annotation}")?;
	}

	indent(s, level)?;
	s.write_str(class.access.prefix())?;
	if class.is_static {
		s.write_str("static ")?;
	}
	if class.is_abstract {
		s.write_str("abstract ")?;
	}
	write!(s, "class {}", class.simple_name())?;
	if let Some(type_parameters) = &class.type_parameters {
		write!(s, "<{type_parameters}>")?;
	}
	if let Some(base_class) = &class.base_class {
		write!(s, " extends {base_class}")?;
	}
	if !class.interfaces.is_empty() {
		write!(s, " implements {}", class.interfaces.join(", "))?;
	}
	writeln!(s, " {{")?;

	for field in class.fields.values() {
		writeln!(s)?;
		write_field(field, s, level + 1)?;
	}
	for constructor in &class.constructors {
		writeln!(s)?;
		write_method(constructor, s, level + 1, true)?;
	}
	for method in &class.methods {
		writeln!(s)?;
		write_method(method, s, level + 1, false)?;
	}
	for inner in class.inner_classes.values() {
		writeln!(s)?;
		write_class(inner, s, level + 1)?;
	}

	writeln!(s)?;
	indent(s, level)?;
	writeln!(s, "}}")
}

fn write_field(field: &GField, s: &mut impl Write, level: usize) -> Result {
	for annotation in &field.annotations {
		indent(s, level)?;
		writeln!(s, "{annotation}")?;
	}

	indent(s, level)?;
	s.write_str(field.access.prefix())?;
	if field.is_static {
		s.write_str("static ")?;
	}
	if field.is_final {
		s.write_str("final ")?;
	}
	write!(s, "{} {}", field.type_, field.name)?;
	if let Some(initial_value) = &field.initial_value {
		write!(s, " = {initial_value}")?;
	}
	writeln!(s, ";")
}

fn write_method(method: &GMethod, s: &mut impl Write, level: usize, constructor: bool) -> Result {
	for annotation in &method.annotations {
		indent(s, level)?;
		writeln!(s, "{annotation}")?;
	}

	indent(s, level)?;
	s.write_str(method.access.prefix())?;
	if method.is_static {
		s.write_str("static ")?;
	}
	if method.is_abstract {
		s.write_str("abstract ")?;
	}
	if let Some(type_parameters) = &method.type_parameters {
		write!(s, "<{type_parameters}> ")?;
	}
	if !constructor {
		write!(s, "{} ", method.return_type.as_deref().unwrap_or("void"))?;
	}
	write!(s, "{}(", method.name)?;
	for (i, (type_, name)) in method.arguments.iter().enumerate() {
		if i != 0 {
			s.write_str(", ")?;
		}
		write!(s, "{type_} {name}")?;
	}
	s.write_char(')')?;

	if method.is_abstract {
		return writeln!(s, ";");
	}

	writeln!(s, " {{")?;
	for line in &method.body {
		if !line.is_empty() {
			indent(s, level + 1)?;
			s.write_str(line)?;
		}
		writeln!(s)?;
	}
	indent(s, level)?;
	writeln!(s, "}}")
}

#[cfg(test)]
mod testing {
	use std::fmt::Write;
	use pretty_assertions::assert_eq;
	use crate::{Access, GClass};

	#[test]
	fn render_class() {
		let mut class = GClass::new("com.app.FooBinding");
		class.base_class("com.app.FooBindingPath<com.app.Foo>")
			.annotate("@SuppressWarnings(\"all\")");
		class.field("value")
			.type_("com.app.Foo");
		class.add_constructor()
			.argument("com.app.Foo", "value")
			.line("this.value = value;");
		class.add_method("get")
			.returns("com.app.Foo")
			.line("return this.value;");
		class.inner_class("MyIdBinding")
			.access(Access::Private)
			.add_method("getName")
			.returns("java.lang.String")
			.line("return \"id\";");

		assert_eq!(class.to_code(), r#"package com.app;

@SuppressWarnings("all")
public class FooBinding extends com.app.FooBindingPath<com.app.Foo> {

    private com.app.Foo value;

    public FooBinding(com.app.Foo value) {
        this.value = value;
    }

    public com.app.Foo get() {
        return this.value;
    }

    private class MyIdBinding {

        public java.lang.String getName() {
            return "id";
        }

    }

}
"#);
	}

	#[test]
	fn render_modifiers() {
		let mut class = GClass::new("Dispatch");
		class.type_parameters("R, T extends java.lang.Number")
			.set_abstract()
			.implements("java.io.Serializable")
			.implements("java.lang.Cloneable");
		class.field("NAME")
			.access(Access::Public)
			.set_static()
			.set_final()
			.type_("java.lang.String")
			.initial_value("\"x\"");
		class.add_method("run")
			.access(Access::Protected)
			.set_abstract();
		class.add_method("bind")
			.set_static()
			.type_parameters("T")
			.returns("java.util.List<T>")
			.argument("T", "a")
			.argument("int", "b")
			.line("if (b == 0) {")
			.line("    return null;")
			.line("}")
			.line("")
			.line("return java.util.List.of(a);");

		assert_eq!(class.to_code(), r#"public abstract class Dispatch<R, T extends java.lang.Number> implements java.io.Serializable, java.lang.Cloneable {

    public static final java.lang.String NAME = "x";

    protected abstract void run();

    public static <T> java.util.List<T> bind(T a, int b) {
        if (b == 0) {
            return null;
        }

        return java.util.List.of(a);
    }

}
"#);
	}

	#[test]
	fn display() -> std::fmt::Result {
		let mut class = GClass::new("a.b.C");
		class.add_method("run");

		let mut s = String::from("// generated\n");
		write!(s, "{class}")?;
		assert_eq!(s, "// generated\npackage a.b;\n\npublic class C {\n\n    public void run() {\n    }\n\n}\n");
		assert_eq!(format!("{class}"), class.to_code());
		Ok(())
	}

	#[test]
	fn lookup() {
		let mut class = GClass::new("a.b.C");
		class.add_method("bind").argument("a.b.X", "o");
		class.add_method("bind").argument("a.b.Y", "o");
		class.inner_class("Inner").set_static();
		class.inner_class("Inner").base_class("a.b.Base");

		assert_eq!(class.simple_name(), "C");
		assert_eq!(class.package_name(), "a.b");
		assert_eq!(class.methods().len(), 2);
		assert_eq!(class.get_method("bind").map(|m| m.get_arguments()[0].0.as_str()), Some("a.b.X"));
		assert_eq!(class.inner_classes().count(), 1);
		let inner = class.get_inner_class("Inner");
		assert!(inner.is_some_and(|i| i.is_static() && i.get_base_class() == Some("a.b.Base")));
	}
}
