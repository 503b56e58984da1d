use bon::Builder;
use enumset::{EnumSet, EnumSetType};
use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{FieldDescriptor, SchemaDocument, TypeDescriptor};
use crate::normalize::SearchTerm;
use crate::render::{render_operation, render_type};
use crate::select::{Truncated, filter_and_rank};

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_MAX_FIELDS_PER_TYPE: usize = 50;
pub const DEFAULT_QUERY_TYPE: &str = "QueryRoot";
pub const DEFAULT_MUTATION_TYPE: &str = "Mutation";

/// A part of the search report
#[derive(EnumSetType, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Every section
    All,
    /// Named schema types
    Types,
    /// Fields of the query root type
    Queries,
    /// Fields of the mutation root type
    Mutations,
}

/// Limits and root type names used by [`search`].
#[derive(Debug, Clone, Builder)]
pub struct SearchOptions {
    /// Maximum number of types, queries or mutations shown per section
    #[builder(default = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Maximum number of fields listed for a single type
    #[builder(default = DEFAULT_MAX_FIELDS_PER_TYPE)]
    pub max_fields_per_type: usize,

    #[builder(default = EnumSet::only(Section::All))]
    pub sections: EnumSet<Section>,

    #[builder(into, default = DEFAULT_QUERY_TYPE.to_string())]
    pub query_type: String,

    #[builder(into, default = DEFAULT_MUTATION_TYPE.to_string())]
    pub mutation_type: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SearchOptions {
    /// Whether the report should contain `section`.
    pub fn includes(&self, section: Section) -> bool {
        self.sections.contains(Section::All) || self.sections.contains(section)
    }
}

/// Counts for one section of a [`Report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSummary {
    /// Items that matched, before truncation
    pub matched: usize,
    /// Items rendered into the report
    pub shown: usize,
    pub truncated: bool,
}

impl<T> From<&Truncated<T>> for SectionSummary {
    fn from(truncated: &Truncated<T>) -> Self {
        Self {
            matched: truncated.total,
            shown: truncated.items.len(),
            truncated: truncated.was_truncated,
        }
    }
}

/// The rendered search result. Summaries are `None` for sections that were not requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub types: Option<SectionSummary>,
    pub queries: Option<SectionSummary>,
    pub mutations: Option<SectionSummary>,
}

/// Search a schema document for types and root operations whose names contain `query`.
pub fn search(document: &SchemaDocument, query: &str, options: &SearchOptions) -> Report {
    let term = SearchTerm::parse(query);
    debug!(
        "Filtering schema with query: {query} (normalized: {})",
        term.as_str()
    );

    let all_types = document.types().unwrap_or_default();

    let types = if term.matches_all() {
        Truncated::complete(all_types.iter().collect())
    } else {
        filter_and_rank(all_types, term.as_str(), options.max_results)
    };

    let operations = |root_type: &str| {
        document
            .find_type(root_type)
            .map(|root| {
                filter_and_rank(root.fields.as_slice(), term.as_str(), options.max_results)
            })
            .unwrap_or_else(Truncated::empty)
    };

    let mut report = Report {
        text: String::new(),
        types: None,
        queries: None,
        mutations: None,
    };

    if options.includes(Section::Types) {
        push_section(
            &mut report.text,
            "Types",
            "types",
            options.max_results,
            &types,
            |ty: &&TypeDescriptor| render_type(ty, options.max_fields_per_type),
        );
        report.text.push_str("\n\n");
        report.types = Some(SectionSummary::from(&types));
    }

    if options.includes(Section::Queries) {
        let queries = operations(&options.query_type);
        push_section(
            &mut report.text,
            "Queries",
            "queries",
            options.max_results,
            &queries,
            |operation: &&FieldDescriptor| render_operation(operation),
        );
        report.text.push_str("\n\n");
        report.queries = Some(SectionSummary::from(&queries));
    }

    if options.includes(Section::Mutations) {
        let mutations = operations(&options.mutation_type);
        push_section(
            &mut report.text,
            "Mutations",
            "mutations",
            options.max_results,
            &mutations,
            |operation: &&FieldDescriptor| render_operation(operation),
        );
        report.mutations = Some(SectionSummary::from(&mutations));
    }

    report
}

fn push_section<T>(
    text: &mut String,
    title: &str,
    noun: &str,
    max_results: usize,
    section: &Truncated<T>,
    render: impl Fn(&T) -> String,
) {
    text.push_str(&format!("## Matching GraphQL {title}:\n"));
    if section.was_truncated {
        text.push_str(&format!(
            "(Results limited to {max_results} items. Refine your search for more specific results.)\n\n"
        ));
    }
    if section.items.is_empty() {
        text.push_str(&format!("No matching {noun} found."));
    } else {
        text.push_str(&section.items.iter().map(render).join("\n\n"));
    }
}
