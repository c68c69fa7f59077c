use jtype::provider::MetadataProvider;
use jtype::tree::class::TypeElement;
use jtype::tree::method::{Method, MethodName};
use crate::extract::{container_element_type, ExtractContext, NotBindable, resolve_type};
use crate::names;
use crate::property::{PropertyDescriptor, PropertySource, Visibility};

/// Extracts the property of an accessor method, one taking no arguments and throwing nothing.
///
/// The property name is inferred with [`names::property_name`]. The property is read only unless the owner declares
/// a matching setter, see [`find_setter`].
pub fn extract_accessor<P: MetadataProvider>(method: &Method, context: &ExtractContext<P>) -> Result<PropertyDescriptor, NotBindable> {
	if method.access.is_static {
		return Err(NotBindable::Static);
	}
	if method.access.is_private {
		return Err(NotBindable::Private);
	}
	if !method.parameters.is_empty() {
		return Err(NotBindable::HasParameters);
	}
	if method.throws() {
		return Err(NotBindable::Throws);
	}
	let Some(return_type) = &method.return_type else {
		return Err(NotBindable::Void);
	};

	let name = names::property_name(method.name.as_str());
	if context.config.skip_attribute(&context.owner.name, &name) {
		return Err(NotBindable::Skipped);
	}

	let resolved = resolve_type(return_type, &name, context)?;
	let setter = find_setter(method, context.owner);

	Ok(PropertyDescriptor {
		name,
		container_element_type: container_element_type(&resolved.ty, context.owner, context.provider),
		declared_type: resolved.ty,
		read_only: setter.is_none(),
		visibility: Visibility::of_method(method.access),
		needs_unchecked_cast: resolved.needs_unchecked_cast,
		source: PropertySource::Accessor {
			getter: method.name.clone(),
			setter,
		},
	})
}

/// Finds the setter of a getter, by replacing the prefix of the getter name with `set`.
///
/// Only the first public method with the setter name is looked at, and it's only a setter if it takes exactly one
/// argument and declares no checked exceptions.
pub fn find_setter(getter: &Method, owner: &TypeElement) -> Option<MethodName> {
	let setter_name = names::setter_name(getter.name.as_str())?;

	let setter = owner.methods_named(&setter_name)
		.find(|method| method.access.is_public)?;

	(setter.parameters.len() == 1 && !setter.throws())
		.then(|| setter.name.clone())
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use anyhow::Result;
	use jtype::provider::ClassPool;
	use jtype::tree::class::TypeElement;
	use jtype::tree::method::{Method, MethodAccess};
	use jtype::tree::types::TypeRef;
	use crate::config::Config;
	use crate::extract::{ExtractContext, NotBindable};
	use crate::extract::accessor::{extract_accessor, find_setter};
	use crate::property::{PropertyDescriptor, PropertySource, Visibility};

	fn string() -> Result<TypeRef> {
		TypeRef::parse("java.lang.String")
	}

	#[test]
	fn setter_pairing() -> Result<()> {
		let owner = TypeElement::new("com.app.Foo")
			.with_method(Method::getter("getName", string()?))
			.with_method(Method::setter("setName", string()?))
			.with_method(Method::getter("getId", string()?))
			.with_method(Method::getter("getCount", TypeRef::parse("int")?))
			.with_method(Method::setter("setCount", TypeRef::parse("int")?).with_exception("java.io.IOException"))
			.with_method(Method::getter("getSize", TypeRef::parse("int")?))
			.with_method(Method::setter("setSize", TypeRef::parse("int")?).with_parameter(TypeRef::parse("int")?))
			.with_method(Method::getter("isOpen", TypeRef::parse("boolean")?))
			.with_method(Method { access: MethodAccess::default(), ..Method::setter("setOpen", TypeRef::parse("boolean")?) })
			.with_method(Method::getter("name", string()?));

		let setter = |getter: &str| owner.methods_named(getter).next()
			.and_then(|method| find_setter(method, &owner))
			.map(|name| name.as_str().to_owned());

		assert_eq!(setter("getName"), Some("setName".to_owned()));
		assert_eq!(setter("getId"), None);
		assert_eq!(setter("getCount"), None);
		assert_eq!(setter("getSize"), None);
		assert_eq!(setter("isOpen"), None);
		assert_eq!(setter("name"), None);
		Ok(())
	}

	#[test]
	fn accessors() -> Result<()> {
		let owner = TypeElement::new("com.app.Foo")
			.with_method(Method::getter("isGood", TypeRef::parse("boolean")?))
			.with_method(Method::setter("setGood", TypeRef::parse("boolean")?));
		let pool = ClassPool::new();
		let config = Config::new();
		let context = ExtractContext::new(&pool, &config, &owner);

		assert_eq!(extract_accessor(&owner.methods[0], &context), Ok(PropertyDescriptor {
			name: "good".to_owned(),
			declared_type: TypeRef::parse("java.lang.Boolean")?,
			read_only: false,
			visibility: Visibility::Public,
			container_element_type: None,
			needs_unchecked_cast: false,
			source: PropertySource::Accessor {
				getter: "isGood".into(),
				setter: Some("setGood".into()),
			},
		}));

		// the setter itself is not an accessor
		assert_eq!(extract_accessor(&owner.methods[1], &context), Err(NotBindable::HasParameters));

		let local = Method { access: MethodAccess::default(), ..Method::getter("getLocal", TypeRef::parse("int")?) };
		assert_eq!(extract_accessor(&local, &context).map(|p| p.visibility), Ok(Visibility::Package));
		Ok(())
	}

	#[test]
	fn rejected() -> Result<()> {
		let owner = TypeElement::new("com.app.Foo");
		let pool = ClassPool::new();
		let config = Config::new().with("skipAttribute.com.app.Foo.secret", "true");
		let context = ExtractContext::new(&pool, &config, &owner);

		let void = Method::new(MethodAccess::PUBLIC, "run", None);
		assert_eq!(extract_accessor(&void, &context), Err(NotBindable::Void));

		let throwing = Method::getter("getData", string()?).with_exception("java.io.IOException");
		assert_eq!(extract_accessor(&throwing, &context), Err(NotBindable::Throws));

		let factory = Method { access: MethodAccess { is_static: true, ..MethodAccess::PUBLIC }, ..Method::getter("getInstance", string()?) };
		assert_eq!(extract_accessor(&factory, &context), Err(NotBindable::Static));

		let hidden = Method { access: MethodAccess { is_public: false, is_private: true, ..MethodAccess::PUBLIC }, ..Method::getter("getHidden", string()?) };
		assert_eq!(extract_accessor(&hidden, &context), Err(NotBindable::Private));

		let secret = Method::getter("getSecret", string()?);
		assert_eq!(extract_accessor(&secret, &context), Err(NotBindable::Skipped));

		// a type variable of the method itself can't be told apart from an unknown legacy type
		let generic = Method::getter("getAny", TypeRef::parse("U")?);
		assert_eq!(extract_accessor(&generic, &context), Err(NotBindable::UnresolvableType("U".to_owned())));
		Ok(())
	}
}
