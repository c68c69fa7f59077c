//! A crate describing java types the way a compiler reports them to an annotation processor: classes with their
//! type parameters, super class, fields and methods, and the generic types used in their declarations.
//!
//! The [`provider`] module contains the [`MetadataProvider`][provider::MetadataProvider] trait, through which
//! consumers look up types, and [`ClassPool`][provider::ClassPool], an in-memory implementation that can be read
//! from json.

pub mod tree;
pub mod provider;

mod macros;
