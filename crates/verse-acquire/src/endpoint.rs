use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use verse_model::VerseQuery;

pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";

/// Characters left bare when a reference becomes a single path component.
/// Everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, so spaces,
/// colons and slashes in a reference never change the URL's shape.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `GET {base}/{reference}` with the reference percent-encoded.
pub fn lookup_url(base: &str, reference: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), encode_component(reference))
}

/// `GET {base}/?random=verse`.
pub fn random_url(base: &str) -> String {
    format!("{}/?random=verse", base.trim_end_matches('/'))
}

pub fn request_url(base: &str, query: &VerseQuery) -> String {
    match query {
        VerseQuery::Reference(r) => lookup_url(base, r),
        VerseQuery::Random => random_url(base),
    }
}
