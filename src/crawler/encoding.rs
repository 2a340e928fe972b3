//! Character-set detection for portal responses.
//!
//! The CSV export is usually Shift_JIS and rarely declares it, so the body is
//! sniffed before decoding.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

/// Decodes a response body, preferring the detected encoding.
///
/// `tld` is the top-level domain of the responding host (e.g. `b"jp"`) and is
/// handed to the detector as a hint. When the detector is not confident the
/// body is decoded with the charset from `content_type`, or UTF-8 if that is
/// absent or unknown. Malformed sequences are replaced, never reported.
pub fn decode_body(bytes: &[u8], tld: Option<&[u8]>, content_type: Option<&str>) -> String {
    decode_with(bytes, detect(bytes, tld), content_type)
}

fn decode_with(
    bytes: &[u8],
    detected: Option<&'static Encoding>,
    content_type: Option<&str>,
) -> String {
    match detected {
        Some(encoding) => {
            debug!("Decoding {} bytes as {}", bytes.len(), encoding.name());
            let (text, _, _) = encoding.decode(bytes);
            text.into_owned()
        }
        None => {
            let encoding = declared_charset(content_type).unwrap_or(UTF_8);
            warn!(
                "No confident encoding guess for {} bytes, falling back to {}",
                bytes.len(),
                encoding.name()
            );
            let (text, _, _) = encoding.decode(bytes);
            text.into_owned()
        }
    }
}

/// Returns the detected encoding, or `None` when the guess is not confident.
pub fn detect(bytes: &[u8], tld: Option<&[u8]>) -> Option<&'static Encoding> {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (encoding, confident) = detector.guess_assess(tld, true);
    confident.then_some(encoding)
}

/// Extracts the `charset=` parameter of a `Content-Type` header value.
fn declared_charset(content_type: Option<&str>) -> Option<&'static Encoding> {
    content_type?
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}
