//! Generates binding classes for java types.
//!
//! A binding gives uniform read and write access to a property of some object, together with navigation to the
//! parent binding. For every bindable type, the bindable properties are discovered from its fields and accessor
//! methods ([`extract`]), their names are made unique ([`resolve`]), and the types of the properties are expanded
//! recursively into a [`builder::BindingForest`]. The forest is then turned into java source code by [`emit`].
//!
//! The [`eval`] module runs a forest against an in-memory object graph the same way the generated classes do.
//!
//! A [`pass::Pass`] ties it together: it builds and writes the bindings of the requested types, and keeps the
//! [`registry`] of all types ever bound, from which the [`bind_keyword`] class is generated.

pub mod names;
pub mod config;
pub mod property;
pub mod extract;
pub mod resolve;
pub mod builder;
pub mod emit;
pub mod eval;
pub mod registry;
pub mod bind_keyword;
pub mod pass;
