//! Query-string parameters.
//!
//! [`Values`] is a multi-map from key to an ordered list of values. Keys are
//! kept sorted, so [`encode()`](Values::encode) always emits them in
//! lexicographic order while each key's values keep their insertion order.

use std::collections::BTreeMap;

/// Query parameters as a sorted multi-map.
///
/// # Example
///
/// ```rust
/// use reqforge::Values;
///
/// let mut values = Values::new();
/// values.add("pet", "simona");
/// values.add("pet", "lola");
/// values.set("name", "diego");
/// assert_eq!(values.encode(), "name=diego&pet=simona&pet=lola");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    entries: BTreeMap<String, Vec<String>>,
}

impl Values {
    /// Create an empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string.
    ///
    /// A leading `?` is ignored. `+` decodes to a space; malformed percent
    /// escapes are kept literally.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        form_urlencoded::parse(input.as_bytes())
            .into_owned()
            .collect()
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Returns every value for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), vec![value.into()]);
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Remove `key` and all of its values. Absent keys are ignored.
    pub fn del(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Returns `true` if `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// Keys are sorted; a key with several values is repeated
    /// (`k=v1&k=v2`). Spaces become `+`. An empty set encodes to `""`.
    pub fn encode(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.iter() {
            ser.append_pair(k, v);
        }
        ser.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        values.extend(iter);
        values
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Values {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl std::fmt::Display for Values {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}
