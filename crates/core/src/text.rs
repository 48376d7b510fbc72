//! Codecs for the external text representation.
//!
//! The backing store holds every field as plain text: tag lists are
//! comma-separated, dates are ISO `YYYY-MM-DD`, and an unassigned reference
//! can appear as `""`, `"None"`, or `"nan"`. Everything here normalizes on
//! read and re-joins on write so the rest of the engine only sees typed
//! values.

use chrono::NaiveDate;

/// Placeholder texts the external store uses for "no assignment".
const PLACEHOLDERS: [&str; 3] = ["", "None", "nan"];

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn split_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags back into the stored comma-separated form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Whether the text is one of the store's "unassigned" placeholders.
pub fn is_placeholder(s: &str) -> bool {
    PLACEHOLDERS.contains(&s.trim())
}

/// Parse an ISO `YYYY-MM-DD` date, returning `None` for anything else.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Format a date in the stored ISO form.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Serde codec: `Vec<String>` as one comma-separated string.
pub mod comma_tags {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize tags as their joined stored form.
    pub fn serialize<S: Serializer>(tags: &[String], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&super::join_tags(tags))
    }

    /// Deserialize a comma-separated string into trimmed tags.
    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
        let s = String::deserialize(de)?;
        Ok(super::split_tags(&s))
    }
}

/// Serde codec: `Option<NaiveDate>` as ISO text, lenient on read.
///
/// Unparseable date text decodes to `None` rather than failing the record;
/// the conflict sweep silently skips missions without a usable range.
pub mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `YYYY-MM-DD`, or the empty string for `None`.
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, ser: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => ser.serialize_str(&super::format_date(*d)),
            None => ser.serialize_str(""),
        }
    }

    /// Deserialize date text, mapping anything unparseable to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
        let s = String::deserialize(de)?;
        Ok(super::parse_date(&s))
    }
}

/// Serde codec: optional record reference with placeholder normalization.
///
/// `""`, `"None"`, and `"nan"` (after trimming) all decode to `None`; `None`
/// serializes back as the empty string.
pub mod assign_ref {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize the referenced id, or the empty string for `None`.
    pub fn serialize<S, T>(id: &Option<T>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: std::fmt::Display,
    {
        match id {
            Some(id) => ser.serialize_str(&id.to_string()),
            None => ser.serialize_str(""),
        }
    }

    /// Deserialize a reference, treating placeholder text as `None`.
    pub fn deserialize<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        let s = String::deserialize(de)?;
        if super::is_placeholder(&s) {
            Ok(None)
        } else {
            Ok(Some(T::from(s.trim().to_string())))
        }
    }
}

/// Serde codec: optional free text, empty string meaning absent.
pub mod opt_text {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize the text, or the empty string for `None`.
    pub fn serialize<S: Serializer>(text: &Option<String>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(text.as_deref().unwrap_or(""))
    }

    /// Deserialize text, mapping the empty string to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        let s = String::deserialize(de)?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}
