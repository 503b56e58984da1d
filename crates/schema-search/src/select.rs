//! Matching, ranking and truncation of named schema items.

use crate::model::{FieldDescriptor, TypeDescriptor};

/// Something with an optional name that can be searched for.
pub trait Named {
    fn name(&self) -> Option<&str>;
}

impl Named for TypeDescriptor {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Named for FieldDescriptor {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// The items whose lower-cased name contains `term`, in their original order.
///
/// Unnamed items never match. The empty term matches every named item.
pub fn matching<'a, T: Named>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| {
            item.name()
                .is_some_and(|name| name.to_lowercase().contains(term))
        })
        .collect()
}

/// Stable sort by name length, shortest first, unnamed items last.
pub fn rank<T: Named>(items: &mut [T]) {
    items.sort_by_key(|item| match item.name() {
        Some(name) => (false, name.chars().count()),
        None => (true, 0),
    });
}

/// A list cut down to a maximum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<T> {
    pub items: Vec<T>,
    /// How many items there were before truncation
    pub total: usize,
    pub was_truncated: bool,
}

impl<T> Truncated<T> {
    pub fn empty() -> Self {
        Self::complete(Vec::new())
    }

    /// Wrap a list that is kept whole.
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
            was_truncated: false,
        }
    }

    /// How many items were cut off.
    pub fn omitted(&self) -> usize {
        self.total.saturating_sub(self.items.len())
    }
}

/// Keep the first `max_count` items.
pub fn truncate<T>(mut items: Vec<T>, max_count: usize) -> Truncated<T> {
    let total = items.len();
    items.truncate(max_count);
    Truncated {
        items,
        total,
        was_truncated: total > max_count,
    }
}

/// Match, rank and truncate in one go.
pub fn filter_and_rank<'a, T: Named>(
    items: &'a [T],
    term: &str,
    max_count: usize,
) -> Truncated<&'a T> {
    let mut matched = matching(items, term);
    rank(&mut matched);
    truncate(matched, max_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Item(Option<&'static str>);

    impl Named for Item {
        fn name(&self) -> Option<&str> {
            self.0
        }
    }

    fn names<'a>(items: &[&'a Item]) -> Vec<Option<&'a str>> {
        items.iter().map(|item| item.0).collect()
    }

    #[test]
    fn filters_items_by_name() {
        let items = [
            Item(Some("Product")),
            Item(Some("ProductInput")),
            Item(Some("Order")),
            Item(Some("OrderInput")),
            Item(Some("ProductVariant")),
        ];

        let result = filter_and_rank(&items, "product", 10);

        assert_eq!(
            names(&result.items),
            vec![
                Some("Product"),
                Some("ProductInput"),
                Some("ProductVariant")
            ]
        );
        assert!(!result.was_truncated);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn matching_is_case_insensitive_on_names_only() {
        let items = [
            Item(Some("CUSTOMER")),
            Item(Some("customerAddress")),
            Item(Some("Order")),
        ];

        let matched = matching(&items, "customer");

        assert_eq!(
            names(&matched),
            vec![Some("CUSTOMER"), Some("customerAddress")]
        );
        for item in items.iter().filter(|item| !matched.contains(item)) {
            assert!(
                !item
                    .0
                    .is_some_and(|name| name.to_lowercase().contains("customer"))
            );
        }
    }

    #[test]
    fn unnamed_items_never_match() {
        let items = [
            Item(Some("Product")),
            Item(None),
            Item(Some("AnotherProduct")),
        ];

        assert_eq!(matching(&items, "product").len(), 2);
        assert_eq!(matching(&items, "").len(), 2);
    }

    #[test]
    fn ranks_shorter_names_first() {
        let items = [
            Item(Some("ProductVariant")),
            Item(Some("ProductInput")),
            Item(Some("Product")),
        ];

        let result = filter_and_rank(&items, "product", 10);

        assert_eq!(
            names(&result.items),
            vec![
                Some("Product"),
                Some("ProductInput"),
                Some("ProductVariant")
            ]
        );
    }

    #[test]
    fn ranks_by_character_count() {
        let first = Item(Some("carté"));
        let second = Item(Some("carts"));
        let mut items = vec![&first, &second];

        rank(&mut items);

        assert_eq!(names(&items), vec![Some("carté"), Some("carts")]);
    }

    #[test]
    fn ranking_keeps_declaration_order_for_equal_lengths() {
        let mut items = vec![
            Item(Some("zeta")),
            Item(None),
            Item(Some("beta")),
            Item(Some("ab")),
            Item(Some("alfa")),
        ];

        rank(&mut items);

        assert_eq!(
            items,
            vec![
                Item(Some("ab")),
                Item(Some("zeta")),
                Item(Some("beta")),
                Item(Some("alfa")),
                Item(None),
            ]
        );
    }

    #[rstest]
    #[case(20, 5, 5, true)]
    #[case(5, 5, 5, false)]
    #[case(3, 10, 3, false)]
    #[case(0, 10, 0, false)]
    fn truncation_is_bounded(
        #[case] len: usize,
        #[case] max_count: usize,
        #[case] kept: usize,
        #[case] was_truncated: bool,
    ) {
        let result = truncate((0..len).collect::<Vec<_>>(), max_count);

        assert_eq!(result.items.len(), kept);
        assert_eq!(result.was_truncated, was_truncated);
        assert_eq!(result.omitted(), len - kept);
    }

    #[test]
    fn truncation_keeps_the_best_ranked_items() {
        let items: Vec<Item> = [
            "ProductVariantsBulkInput",
            "Product",
            "ProductConnection",
            "ProductInput",
        ]
        .into_iter()
        .map(|name| Item(Some(name)))
        .collect();

        let result = filter_and_rank(&items, "product", 2);

        assert_eq!(
            names(&result.items),
            vec![Some("Product"), Some("ProductInput")]
        );
        assert!(result.was_truncated);
        assert_eq!(result.total, 4);
    }
}
