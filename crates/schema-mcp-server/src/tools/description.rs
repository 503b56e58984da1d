use std::borrow::Cow;

/// Append a configured hint to a tool description, ignoring blank hints.
pub(crate) fn append_description_hint<'a>(default: &'a str, hint: Option<&str>) -> Cow<'a, str> {
    match hint.map(str::trim).filter(|hint| !hint.is_empty()) {
        Some(hint) => Cow::Owned(format!("{default}\nHint: {hint}")),
        None => Cow::Borrowed(default),
    }
}
