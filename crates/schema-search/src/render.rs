//! Plain-text rendering of schema types, fields and root operations.

use itertools::Itertools;
use serde_json::Value;

use crate::model::{FieldDescriptor, InputValueDescriptor, TypeDescriptor, TypeKind, TypeRef};
use crate::select::truncate;

/// Type descriptions longer than this many characters are cut and marked with `...`
const TYPE_DESCRIPTION_LIMIT: usize = 150;

/// Operation descriptions longer than this many characters are cut and marked with `...`
const OPERATION_DESCRIPTION_LIMIT: usize = 100;

/// Render a type reference as a GraphQL type signature, e.g. `[Product!]!`.
///
/// A missing reference, or the missing target of a wrapper, renders as `null`.
pub fn render_type_ref(type_ref: Option<&TypeRef>) -> String {
    match type_ref {
        None => "null".to_string(),
        Some(TypeRef::NonNull(of_type)) => format!("{}!", render_type_ref(of_type.as_deref())),
        Some(TypeRef::List(of_type)) => format!("[{}]", render_type_ref(of_type.as_deref())),
        Some(TypeRef::Named(name)) => name.as_deref().unwrap_or("null").to_string(),
    }
}

/// `name: Type`, followed by ` = default` when the argument has a default value.
pub fn render_arg(arg: &InputValueDescriptor) -> String {
    let mut rendered = format!(
        "{}: {}",
        display_name(arg.name.as_deref()),
        render_type_ref(arg.ty.as_ref())
    );
    if let Some(default_value) = &arg.default_value {
        rendered.push_str(" = ");
        match default_value {
            Value::String(value) => rendered.push_str(value),
            other => rendered.push_str(&other.to_string()),
        }
    }
    rendered
}

/// A single indented field line: `  name(args): Type @deprecated (reason)`
pub fn render_field(field: &FieldDescriptor) -> String {
    field_line(
        field.name.as_deref(),
        &field.args,
        field.ty.as_ref(),
        field.is_deprecated,
        field.deprecation_reason.as_deref(),
    )
}

fn render_input_field(field: &InputValueDescriptor) -> String {
    field_line(
        field.name.as_deref(),
        &[],
        field.ty.as_ref(),
        field.is_deprecated,
        field.deprecation_reason.as_deref(),
    )
}

fn field_line(
    name: Option<&str>,
    args: &[InputValueDescriptor],
    ty: Option<&TypeRef>,
    is_deprecated: bool,
    deprecation_reason: Option<&str>,
) -> String {
    let mut line = format!("  {}", display_name(name));
    if !args.is_empty() {
        line.push('(');
        line.push_str(&args.iter().map(render_arg).join(", "));
        line.push(')');
    }
    line.push_str(": ");
    line.push_str(&render_type_ref(ty));

    if is_deprecated {
        line.push_str(" @deprecated");
        if let Some(reason) = deprecation_reason.filter(|reason| !reason.is_empty()) {
            line.push_str(&format!(" ({reason})"));
        }
    }
    line
}

/// Render a schema type with its description, interfaces and at most `max_fields` fields.
pub fn render_type(ty: &TypeDescriptor, max_fields: usize) -> String {
    let mut lines = vec![format!("{} {}", ty.kind, display_name(ty.name.as_deref()))];

    if let Some(description) = flatten_description(ty.description.as_deref(), TYPE_DESCRIPTION_LIMIT)
    {
        lines.push(format!("  Description: {description}"));
    }

    if !ty.interfaces.is_empty() {
        lines.push(format!(
            "  Implements: {}",
            ty.interfaces
                .iter()
                .map(|interface| interface.name.as_deref().unwrap_or_default())
                .join(", ")
        ));
    }

    if ty.kind == TypeKind::InputObject && !ty.input_fields.is_empty() {
        lines.push("  Input Fields:".to_string());
        let shown = truncate(ty.input_fields.iter().collect(), max_fields);
        lines.extend(shown.items.iter().map(|field| render_input_field(field)));
        if shown.was_truncated {
            lines.push(format!("  ... and {} more input fields", shown.omitted()));
        }
    } else if !ty.fields.is_empty() {
        lines.push("  Fields:".to_string());
        let shown = truncate(ty.fields.iter().collect(), max_fields);
        lines.extend(shown.items.iter().map(|field| render_field(field)));
        if shown.was_truncated {
            lines.push(format!("  ... and {} more fields", shown.omitted()));
        }
    }

    lines.join("\n")
}

/// Render a query or mutation with its description, arguments and return type.
pub fn render_operation(operation: &FieldDescriptor) -> String {
    let mut lines = vec![display_name(operation.name.as_deref()).to_string()];

    if let Some(description) = flatten_description(
        operation.description.as_deref(),
        OPERATION_DESCRIPTION_LIMIT,
    ) {
        lines.push(format!("  Description: {description}"));
    }

    if !operation.args.is_empty() {
        lines.push("  Arguments:".to_string());
        lines.extend(
            operation
                .args
                .iter()
                .map(|arg| format!("    {}", render_arg(arg))),
        );
    }

    lines.push(format!(
        "  Returns: {}",
        render_type_ref(operation.ty.as_ref())
    ));

    lines.join("\n")
}

fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("null")
}

/// Put a description on one line and cap its length.
fn flatten_description(description: Option<&str>, limit: usize) -> Option<String> {
    let flattened = description
        .filter(|description| !description.is_empty())?
        .replace('\n', " ");
    if flattened.chars().count() > limit {
        let mut cut: String = flattened.chars().take(limit).collect();
        cut.push_str("...");
        Some(cut)
    } else {
        Some(flattened)
    }
}
