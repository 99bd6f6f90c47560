//! Case-insensitive helpers over plain `HashMap<String, String>` header sets.
//!
//! Header names are stored with whatever casing the caller used. Lookups and
//! overwrites match names ASCII case-insensitively, so `Content-Type` and
//! `content-type` never coexist in one map.

use std::collections::HashMap;

/// Look up a header value by name.
pub fn get<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Returns true if a header with this name is present.
pub fn contains(headers: &HashMap<String, String>, name: &str) -> bool {
    headers.keys().any(|key| key.eq_ignore_ascii_case(name))
}

/// Insert a header, replacing any existing entry with the same name.
pub fn insert(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

/// Merge `overrides` on top of `base`. Entries from `overrides` win.
pub fn merge(
    mut base: HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    for (name, value) in overrides {
        insert(&mut base, name.clone(), value.clone());
    }
    base
}
