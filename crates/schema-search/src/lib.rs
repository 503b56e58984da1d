//! Search a GraphQL introspection document by name and render a short, deterministic,
//! plain-text excerpt of the matching types, queries and mutations.
//!
//! The entry point is [`search`], which runs each requested section through the
//! normalize → match → rank → truncate pipeline and renders the survivors.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod model;
mod normalize;
pub mod render;
mod report;
pub mod select;

pub use model::{
    FieldDescriptor, InputValueDescriptor, InterfaceRef, SchemaDocument, TypeDescriptor, TypeKind,
    TypeRef,
};
pub use normalize::{SearchTerm, normalize};
pub use report::{
    DEFAULT_MAX_FIELDS_PER_TYPE, DEFAULT_MAX_RESULTS, DEFAULT_MUTATION_TYPE, DEFAULT_QUERY_TYPE,
    Report, SearchOptions, Section, SectionSummary, search,
};
