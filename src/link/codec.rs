//! Reversible vehicle deep links
//!
//! A link is `"{slug}-{id}"` where the id is standard base64 without padding.
//! The standard alphabet never contains `-`, so the id is always the segment
//! after the last hyphen no matter what the slug looks like.

use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use super::slug::slugify;
use crate::models::Vehicle;

/// Standard alphabet, no padding on encode, padding optional on decode
const LINK_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A shareable vehicle link fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLink {
    slug: String,
    encoded_id: String,
}

impl EncodedLink {
    pub fn new(id: &str, make: &str, model: &str, year: i32) -> Self {
        Self {
            slug: slugify(&format!("{}-{}-{}", make, model, year)),
            encoded_id: LINK_ENGINE.encode(id.as_bytes()),
        }
    }

    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        Self::new(
            vehicle.id.as_str(),
            &vehicle.make,
            &vehicle.model,
            vehicle.year,
        )
    }

    /// Human-readable part; carries no decoding information
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn encoded_id(&self) -> &str {
        &self.encoded_id
    }
}

impl fmt::Display for EncodedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.slug, self.encoded_id)
    }
}

/// Build the link fragment for a vehicle detail page
///
/// Never fails. An empty slug still produces a well-formed `-{id}` suffix.
///
/// ```
/// use dealer_desk::link::{decode_link, encode_link};
/// let link = encode_link("42", "Fiat", "Uno", 2015);
/// assert_eq!(link, "fiat-uno-2015-NDI");
/// assert_eq!(decode_link(&link).as_deref(), Some("42"));
/// ```
pub fn encode_link(id: &str, make: &str, model: &str, year: i32) -> String {
    EncodedLink::new(id, make, model, year).to_string()
}

/// Recover the identifier from a link fragment
///
/// Returns `None` when there is no hyphen, or the trailing segment is not
/// valid base64 of a non-empty UTF-8 string. Malformed input is logged, never
/// raised. Existence of the identifier is not checked here.
pub fn decode_link(param: &str) -> Option<String> {
    let (_, encoded) = param.rsplit_once('-')?;

    let bytes = match LINK_ENGINE.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(param, error = %e, "malformed vehicle link");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(id) if !id.is_empty() => Some(id),
        Ok(_) => {
            tracing::warn!(param, "vehicle link carries an empty id");
            None
        }
        Err(e) => {
            tracing::warn!(param, error = %e, "vehicle link id is not UTF-8");
            None
        }
    }
}
