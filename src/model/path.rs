//! Path construction.
//!
//! Object members extend a path with `.key` (a bare `key` at the root); array
//! elements with `[#n]`, where `n` is 1-based. Paths are compared as exact
//! strings everywhere; nothing here trims or escapes.

/// Path of member `key` under `base`.
#[must_use]
pub fn object_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        return key.to_string();
    }
    let mut path = String::with_capacity(base.len() + key.len() + 1);
    path.push_str(base);
    path.push('.');
    path.push_str(key);
    path
}

/// Path of the element at zero-based `index` under `base`.
#[must_use]
pub fn array_path(base: &str, index: usize) -> String {
    format!("{base}[#{}]", index + 1)
}
