//! Completion query for an interactive console
//!
//! The console passes the whole line and the byte range of the word under
//! the cursor. Candidates are whole replacement words for that range.

use std::collections::BTreeSet;

use raya_sdk::NativeFunctionRegistry;

use crate::classes;
use crate::object::Category;

/// Sorted, deduplicated candidates for `line[start..end]`.
///
/// A word containing `:` completes a method name after the last `:` from
/// every category's method table; anything else completes registered
/// function names. Out-of-range or non-boundary positions yield nothing.
pub fn complete(registry: &NativeFunctionRegistry, line: &str, start: usize, end: usize) -> Vec<String> {
    let Some(word) = line.get(start..end) else {
        return Vec::new();
    };

    let mut out = BTreeSet::new();
    match word.rfind(':') {
        Some(colon) => {
            let (receiver, prefix) = (&word[..colon], &word[colon + 1..]);
            for category in Category::ALL {
                for name in classes::method_names(category) {
                    if name.starts_with(prefix) && !name.starts_with("__") {
                        out.insert(format!("{}:{}", receiver, name));
                    }
                }
            }
        }
        None => {
            out.extend(registry.names().filter(|n| n.starts_with(word)).map(str::to_string));
        }
    }
    out.into_iter().collect()
}
