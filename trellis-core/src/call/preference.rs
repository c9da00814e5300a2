//! Quality-weighted preference lists (`Accept`, `Accept-Charset`, `Accept-Language`).

use super::metadata::Metadata;
use std::cmp::Ordering;

/// One entry of a preference header.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference<T> {
    pub metadata: T,
    /// Between 0.0 and 1.0
    pub quality: f32,
}

impl<T> Preference<T> {
    pub fn new(metadata: T, quality: f32) -> Self {
        Self {
            metadata,
            quality: quality.clamp(0.0, 1.0),
        }
    }
}

impl<T: Metadata> Preference<T> {
    /// The wildcard with full quality.
    pub fn all() -> Self {
        Self::new(T::all(), 1.0)
    }
}

/// Parses preference headers.
pub struct PreferenceReader;

impl PreferenceReader {
    /// Parse a comma-separated preference header.
    ///
    /// Entries that do not parse are skipped. The result is ordered by
    /// quality, highest first; equal qualities keep header order.
    ///
    /// ```
    /// use trellis_core::call::{MediaType, PreferenceReader};
    ///
    /// let prefs = PreferenceReader::parse::<MediaType>("text/html;q=0.9, application/json");
    /// assert_eq!(prefs[0].metadata, MediaType::json());
    /// assert_eq!(prefs[1].quality, 0.9);
    /// ```
    pub fn parse<T: Metadata>(header: &str) -> Vec<Preference<T>> {
        let mut preferences: Vec<Preference<T>> = header
            .split(',')
            .filter_map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    return None;
                }
                let (value, quality) = Self::extract_quality(part);
                T::parse_metadata(value).map(|metadata| Preference::new(metadata, quality))
            })
            .collect();

        // sort_by is stable
        preferences.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
        preferences
    }

    /// Split the `q` parameter off an entry. A missing or malformed quality
    /// counts as 1.0.
    fn extract_quality(entry: &str) -> (&str, f32) {
        let mut quality = 1.0;
        let mut value_end = entry.len();
        let mut offset = 0;

        for (index, param) in entry.split(';').enumerate() {
            if index > 0 {
                if let Some((key, value)) = param.split_once('=') {
                    if key.trim().eq_ignore_ascii_case("q") {
                        quality = value
                            .trim()
                            .parse::<f32>()
                            .ok()
                            .filter(|q| !q.is_nan())
                            .unwrap_or(1.0);
                        // Everything after the quality is an accept-extension
                        value_end = value_end.min(offset - 1);
                    }
                }
            }
            offset += param.len() + 1;
        }

        (&entry[..value_end], quality.clamp(0.0, 1.0))
    }
}
