//! Path and unit conversion utilities (C1), minus the XML-tree half that
//! lives in `xmltree.rs`: EMU/angle/percentage conversion, base64/hex
//! encoding, MIME lookup, and the handful of string predicates the rest
//! of the pipeline leans on.

/// OOXML lengths are EMUs; 914400 per inch, 12700 per point.
pub const EMU_TO_POINT: f64 = 1.0 / 12700.0;

/// OOXML angles are expressed in 60000ths of a degree.
pub const ANGLE_DENOM: f64 = 60000.0;

/// Percentage-valued attributes (alpha, lumMod, satMod, ...) are in
/// 100000ths.
pub const PCT_DENOM: f64 = 100000.0;

/// Gradient stop positions are in 1000ths of a percent.
pub const GRADIENT_POS_DENOM: f64 = 1000.0;

/// Convert a raw EMU integer to points.
pub fn emu_to_pt(emu: i64) -> f64 {
    emu as f64 * EMU_TO_POINT
}

/// Convert a raw 60000ths-of-a-degree angle to signed integer degrees.
/// Absent/unparsable input rounds to `0`, matching the source's
/// "falsy -> 0" convention rather than propagating an error.
pub fn angle_to_degrees(raw: Option<i64>) -> i32 {
    match raw {
        Some(v) => (v as f64 / ANGLE_DENOM).round() as i32,
        None => 0,
    }
}

/// Parse a percentage-denominated attribute value (e.g. `"75000"` for 75%)
/// into a `0.0..=1.0`-ish float. Values outside that range are preserved
/// verbatim (some producers emit >100% or negative shade/tint deltas).
pub fn pct(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().map(|v| v / PCT_DENOM)
}

/// Two-digit, zero-padded lowercase hex for a single byte.
pub fn hex_byte(n: u8) -> String {
    format!("{:02x}", n)
}

const B64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Streaming, 3-byte-group base64 encode (RFC 4648, standard alphabet,
/// `=` padding). Hand-rolled per the original spec rather than pulled
/// from a crate, since it's core algorithmic surface of this component,
/// not ambient infrastructure.
pub fn base64_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() + 2) / 3 * 4);
    let mut chunks = bytes.chunks_exact(3);
    for chunk in &mut chunks {
        let n = ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8) | chunk[2] as u32;
        out.push(B64_ALPHABET[((n >> 18) & 0x3f) as usize] as char);
        out.push(B64_ALPHABET[((n >> 12) & 0x3f) as usize] as char);
        out.push(B64_ALPHABET[((n >> 6) & 0x3f) as usize] as char);
        out.push(B64_ALPHABET[(n & 0x3f) as usize] as char);
    }
    match chunks.remainder() {
        [a] => {
            let n = (*a as u32) << 16;
            out.push(B64_ALPHABET[((n >> 18) & 0x3f) as usize] as char);
            out.push(B64_ALPHABET[((n >> 12) & 0x3f) as usize] as char);
            out.push('=');
            out.push('=');
        }
        [a, b] => {
            let n = ((*a as u32) << 16) | ((*b as u32) << 8);
            out.push(B64_ALPHABET[((n >> 18) & 0x3f) as usize] as char);
            out.push(B64_ALPHABET[((n >> 12) & 0x3f) as usize] as char);
            out.push(B64_ALPHABET[((n >> 6) & 0x3f) as usize] as char);
            out.push('=');
        }
        _ => {}
    }
    out
}

/// Closed extension -> MIME mapping from §6. Unknown extensions yield an
/// empty string (consumer decides).
pub fn mime_of(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "avi" => "video/avi",
        "mpg" => "video/mpg",
        "wmv" => "video/wmv",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        _ => "",
    }
}

/// Lowercase extension of a file name (no leading dot), or `""` if absent.
pub fn file_ext(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Whether `mime_of`'s extension family for this name is a video type.
pub fn is_video_ext(ext: &str) -> bool {
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "mp4" | "webm" | "ogg" | "avi" | "mpg" | "wmv"
    )
}

/// Whether `s` looks like an external HTTP(S)/FTP URL pointing at video
/// content, judged by a closed TLD-ish suffix set mirroring the source's
/// pattern (not a full URL grammar).
pub fn is_video_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    let is_url = lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("ftp://");
    is_url
        && (lower.ends_with(".mp4")
            || lower.ends_with(".webm")
            || lower.ends_with(".ogg")
            || lower.ends_with(".avi")
            || lower.ends_with(".mpg")
            || lower.ends_with(".wmv"))
}

/// Escape the five XML/HTML-significant characters.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emu_conversion() {
        assert_eq!(emu_to_pt(914400), 72.0);
        assert_eq!(emu_to_pt(457200), 36.0);
    }

    #[test]
    fn angle_conversion_and_default() {
        assert_eq!(angle_to_degrees(Some(5400000)), 90);
        assert_eq!(angle_to_degrees(None), 0);
    }

    #[test]
    fn base64_matches_known_vectors() {
        assert_eq!(base64_encode(b"man"), "bWFu");
        assert_eq!(base64_encode(b"ma"), "bWE=");
        assert_eq!(base64_encode(b"m"), "bQ==");
        assert_eq!(base64_encode(b""), "");
    }

    #[test]
    fn mime_closed_set() {
        assert_eq!(mime_of("PNG"), "image/png");
        assert_eq!(mime_of("unknown"), "");
    }

    #[test]
    fn video_url_detection() {
        assert!(is_video_url("https://example.com/clip.mp4"));
        assert!(!is_video_url("https://example.com/image.png"));
        assert!(!is_video_url("not-a-url.mp4"));
    }
}
