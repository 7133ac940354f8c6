//! A `custom_id` is either a bare route (`"recommend_genre"`) or a route followed by a payload
//! (`"recommend_details:Horror"`). The route picks the handler; the payload is whatever the
//! previous step needs to hand to the next one. Discord caps custom ids at
//! [`MAX_CUSTOM_ID_LEN`] characters, so payloads should be short tokens or ids rather than
//! free text.

use std::fmt::Display;

/// Separates the route from the payload
pub const SEPARATOR: char = ':';

/// The longest `custom_id` Discord accepts
pub const MAX_CUSTOM_ID_LEN: usize = 100;

/// A `custom_id` split into its route and optional payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomId<'a> {
    /// Which handler the interaction belongs to
    pub route: &'a str,
    /// Data carried over from the step that created the component
    pub payload: Option<&'a str>,
}

impl<'a> CustomId<'a> {
    /// Split a raw `custom_id`. Only the first separator counts, so payloads may contain it.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(SEPARATOR) {
            Some((route, payload)) => Self {
                route,
                payload: Some(payload),
            },
            None => Self {
                route: raw,
                payload: None,
            },
        }
    }
}

/// Build a `custom_id` carrying `payload` to the handler registered for `route`
pub fn encode(route: &str, payload: impl Display) -> String {
    format!("{}{}{}", route, SEPARATOR, payload)
}
