use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use url::form_urlencoded;
use url::Url;

/// The slice of a URL query string the codec needs: an ordered,
/// repeat-key-capable collection of already-decoded string pairs.
pub trait Multimap {
    /// First value stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Every value stored under `key`, in insertion order.
    fn get_all(&self, key: &str) -> Vec<&str>;

    /// Replace every value stored under `key` with a single `value`.
    fn set(&mut self, key: &str, value: String);

    /// Add one more occurrence of `key`.
    fn append(&mut self, key: &str, value: String);
}

/// Ordered query parameters, the concrete [`Multimap`] used by the crate.
///
/// Percent-encoding lives here, at the boundary: values are stored decoded,
/// and [`QueryParams::to_query_string`] re-encodes them as
/// `application/x-www-form-urlencoded`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string. A single leading `?` is ignored; malformed
    /// escapes decode lossily rather than failing.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn from_url(url: &Url) -> Self {
        url.query_pairs().into_owned().collect()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Replace the query component of `url` with these parameters; an empty
    /// collection clears the query entirely.
    pub fn apply_to_url(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(existing, _)| existing != key);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(existing, _)| existing == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Multimap for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    // Same placement as URLSearchParams.set: the first occurrence keeps its
    // slot, later ones are dropped.
    fn set(&mut self, key: &str, value: String) {
        match self.pairs.iter().position(|(existing, _)| existing == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut idx = 0usize;
                self.pairs.retain(|(existing, _)| {
                    let keep = idx <= first || existing != key;
                    idx += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    fn append(&mut self, key: &str, value: String) {
        self.pairs.push((key.to_string(), value));
    }
}

impl FromStr for QueryParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
