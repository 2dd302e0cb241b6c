//! Pure helpers over ordered collections used by the multi-select filters.

/// Toggle `value` in `items`.
///
/// If `value` is present, every occurrence is removed and the remaining
/// elements keep their relative order. Otherwise `value` is appended.
/// The input is never mutated.
pub fn toggle_value<T: PartialEq + Clone>(items: &[T], value: &T) -> Vec<T> {
    if items.contains(value) {
        items.iter().filter(|item| *item != value).cloned().collect()
    } else {
        let mut toggled = Vec::with_capacity(items.len() + 1);
        toggled.extend_from_slice(items);
        toggled.push(value.clone());
        toggled
    }
}

/// True when `a` and `b` hold the same elements regardless of order.
///
/// Multiplicity is compared too, so the relation stays symmetric for inputs
/// that carry duplicates. For duplicate-free inputs this is plain set
/// equality.
pub fn same_elements<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|item| {
        let in_a = a.iter().filter(|other| *other == item).count();
        let in_b = b.iter().filter(|other| *other == item).count();
        in_a == in_b
    })
}

/// True when `items` holds no element twice.
pub fn has_duplicates<T: PartialEq>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, item)| items[i + 1..].contains(item))
}
