//! Content-Disposition filename extraction (`filename` and `filename*`).

/// Pulls a filename out of a raw `Content-Disposition` value.
///
/// `filename="quoted"` and bare `filename=token` forms are supported, and
/// an RFC 5987 `filename*=UTF-8''...` parameter takes precedence when it
/// decodes to something non-empty.
pub fn filename_from_header(value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for param in value.split(';').map(str::trim) {
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        let raw = raw.trim();

        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = raw
                    .strip_prefix("UTF-8''")
                    .or_else(|| raw.strip_prefix("utf-8''"));
                if let Some(encoded) = encoded {
                    let decoded = percent_decode(encoded);
                    if !decoded.is_empty() {
                        return Some(decoded);
                    }
                }
            }
            "filename" => {
                let unquoted = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
                    unescape_quoted(&raw[1..raw.len() - 1])
                } else {
                    raw.to_string()
                };
                if !unquoted.is_empty() {
                    plain = Some(unquoted);
                }
            }
            _ => {}
        }
    }

    plain
}

/// Undoes backslash escapes inside a quoted-string value.
fn unescape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Lossy percent-decoding for `filename*` values; malformed escapes are
/// kept literally.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let pair = bytes.get(i + 1).zip(bytes.get(i + 2));
            if let Some((h, l)) = pair.and_then(|(h, l)| hex(*h).zip(hex(*l))) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_and_token_forms() {
        assert_eq!(
            filename_from_header("attachment; filename=\"clip.mp4\"").as_deref(),
            Some("clip.mp4")
        );
        assert_eq!(
            filename_from_header("attachment; filename=clip.mp4").as_deref(),
            Some("clip.mp4")
        );
    }

    #[test]
    fn escaped_quotes_inside_quoted_value() {
        assert_eq!(
            filename_from_header(r#"attachment; filename="a \"b\".mp4""#).as_deref(),
            Some(r#"a "b".mp4"#)
        );
    }

    #[test]
    fn filename_star_takes_precedence() {
        assert_eq!(
            filename_from_header(
                "attachment; filename=\"fallback.mp4\"; filename*=UTF-8''sommar%20%C3%A5.mp4"
            )
            .as_deref(),
            Some("sommar å.mp4")
        );
    }

    #[test]
    fn malformed_percent_escapes_kept_literally() {
        assert_eq!(
            filename_from_header("attachment; filename*=UTF-8''bad%zzname").as_deref(),
            Some("bad%zzname")
        );
    }

    #[test]
    fn no_filename_parameter() {
        assert_eq!(filename_from_header("inline"), None);
        assert_eq!(filename_from_header("attachment; size=3"), None);
    }
}
