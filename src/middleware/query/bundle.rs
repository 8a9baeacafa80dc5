//! Parsed JSON-API query parameters.

use std::collections::HashMap;

use http::header::{ACCEPT, CONTENT_TYPE};
use url::form_urlencoded;

use super::error::{KeyFamily, QueryError};
use super::validate_headers;
use crate::request::Request;

/// `include`, sparse `fields` and `filter` parameters of one request.
///
/// Built fresh per request by [`QueryParams`](super::QueryParams) and read by
/// handlers through [`Request::parameters`]:
///
/// ```text
/// GET /articles?include=author,comments&fields[articles]=title,body&filter[name]=foo
///
/// includes  ["author", "comments"]
/// fields    {"articles": ["title", "body"]}
/// filters   {"name": "foo"}
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParameterBundle {
    includes: Vec<String>,
    fields: HashMap<String, Vec<String>>,
    filters: HashMap<String, String>,
}

impl ParameterBundle {
    /// Parses the query string of `req`, checking its `Accept` and
    /// `Content-Type` headers if any filter parameter is present.
    pub fn from_request(req: &Request) -> Result<Self, QueryError> {
        let accept = req.header_lossy(ACCEPT);
        let content_type = req.header_lossy(CONTENT_TYPE);
        Self::parse(
            req.query().unwrap_or_default(),
            accept.as_deref(),
            content_type.as_deref(),
        )
    }

    /// Parses a raw query string.
    ///
    /// Only the first value of a repeated key is consulted. Keys are visited
    /// in order of first appearance; when several are invalid the first one
    /// visited is reported, and callers should not depend on which.
    pub fn parse(
        query: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Self, QueryError> {
        let mut bundle = Self::default();

        for (key, values) in parse_query(query) {
            let Some(value) = values.into_iter().next() else {
                continue;
            };

            if key.starts_with("filter") {
                validate_headers(accept, content_type)?;
                let sub = bracket_key(&key).ok_or_else(|| QueryError::MalformedParameterKey {
                    family: KeyFamily::Filter,
                    value: value.clone(),
                })?;
                bundle.filters.insert(sub.to_owned(), value);
            } else if key.starts_with("fields") {
                let sub = bracket_key(&key).ok_or_else(|| QueryError::MalformedParameterKey {
                    family: KeyFamily::Fields,
                    value: value.clone(),
                })?;
                bundle.fields.insert(sub.to_owned(), split_list(&value));
            } else if key == "include" {
                bundle.includes = split_list(&value);
            }
        }

        Ok(bundle)
    }

    pub fn includes(&self) -> &[String] { &self.includes }
    pub fn fields(&self) -> &HashMap<String, Vec<String>> { &self.fields }
    pub fn filters(&self) -> &HashMap<String, String> { &self.filters }

    /// Sparse fieldset requested for one resource type.
    pub fn fields_for(&self, resource: &str) -> Option<&[String]> {
        self.fields.get(resource).map(Vec::as_slice)
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn has_includes(&self) -> bool { !self.includes.is_empty() }
    pub fn has_fields(&self) -> bool { !self.fields.is_empty() }
    pub fn has_filters(&self) -> bool { !self.filters.is_empty() }

    /// True when no recognized parameter was found.
    pub fn is_empty(&self) -> bool {
        !(self.has_includes() || self.has_fields() || self.has_filters())
    }
}

/// Decodes `query` into keys with all of their values, keys in order of
/// first appearance.
pub fn parse_query(query: &str) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match slots.get(&*key) {
            Some(&slot) => grouped[slot].1.push(value.into_owned()),
            None => {
                let key = key.into_owned();
                slots.insert(key.clone(), grouped.len());
                grouped.push((key, vec![value.into_owned()]));
            }
        }
    }
    grouped
}

/// Extracts `sub` from a `name[sub]` key.
///
/// `name` and `sub` must each be one or more ASCII alphanumerics or `_`,
/// and the key must end at the closing bracket.
pub fn bracket_key(key: &str) -> Option<&str> {
    let (name, rest) = key.split_once('[')?;
    let sub = rest.strip_suffix(']')?;
    (is_word(name) && is_word(sub)).then_some(sub)
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

// Empty segments survive: "a,,b" is three entries.
fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_owned).collect()
}
