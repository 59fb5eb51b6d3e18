//! Deep links for vehicle detail pages
//!
//! Vehicle pages are addressed as `/carro?id={slug}-{encoded id}`. The slug
//! makes the link readable; only the trailing segment is needed to get the
//! identifier back.

mod codec;
mod slug;

pub use codec::{decode_link, encode_link, EncodedLink};
pub use slug::slugify;

/// Path of the public vehicle detail page
pub const DETAIL_PATH: &str = "/carro";

/// Query parameter carrying the link fragment
pub const LINK_PARAM: &str = "id";

/// Full shareable URL for a link fragment
///
/// The fragment is percent-encoded because the base64 alphabet includes `+`
/// and `/`.
pub fn share_url(site_url: &str, link: &EncodedLink) -> String {
    format!(
        "{}{}?{}={}",
        site_url.trim_end_matches('/'),
        DETAIL_PATH,
        LINK_PARAM,
        urlencoding::encode(&link.to_string())
    )
}

/// Pull the link fragment out of a shared URL
///
/// Accepts a full URL or just a query string. Returns `None` when the
/// parameter is missing or not valid percent-encoding.
pub fn link_param_from_url(url: &str) -> Option<String> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or(url);
    let query = query.split('#').next().unwrap_or(query);

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != LINK_PARAM {
            return None;
        }
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    })
}

/// The link fragment carried by user input: a shared URL, a bare query
/// string starting with `id=`, or the fragment itself
///
/// Base64 padding means a bare fragment may itself contain `=`, so only a
/// `?` or a leading `id=` marks the input as a URL.
pub fn extract_link_param(input: &str) -> Option<String> {
    let input = input.trim();
    let is_query = input
        .strip_prefix(LINK_PARAM)
        .is_some_and(|rest| rest.starts_with('='));
    if input.contains('?') || is_query {
        link_param_from_url(input)
    } else {
        Some(input.to_string())
    }
}
