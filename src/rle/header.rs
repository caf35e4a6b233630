//! RLE comment filtering and header parsing.

use std::str::FromStr;

use super::DecodeError;

/// Line prefixes treated as comments.
pub const COMMENT_MARKERS: [&str; 7] = ["#N", "#C", "#c", "#O", "#P", "#R", "#r"];

/// Rules this crate can simulate. Anything else in a header is rejected.
const LIFE_RULES: [&str; 2] = ["B3/S23", "23/3"];

/// Check whether a raw line is a comment.
pub fn is_comment(line: &str) -> bool {
    COMMENT_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// Parsed `x = <columns>, y = <rows>[, rule = <rule>]` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleHeader {
    pub columns: usize,
    pub rows: usize,
    pub rule: Option<String>,
}

impl RleHeader {
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        let mut parts = line.trim().split(',').map(str::trim);

        let columns = parse_dimension(parts.next(), "x")?;
        let rows = parse_dimension(parts.next(), "y")?;

        let rule = match parts.next() {
            Some(part) => {
                let rule = extract_value(part, "rule")?;
                if !LIFE_RULES.iter().any(|r| r.eq_ignore_ascii_case(rule)) {
                    return Err(DecodeError::MalformedHeader(format!(
                        "unsupported rule '{}', only B3/S23 is supported",
                        rule
                    )));
                }
                Some(rule.to_string())
            }
            None => None,
        };

        if let Some(extra) = parts.next() {
            return Err(DecodeError::MalformedHeader(format!(
                "unexpected trailing field '{}'",
                extra
            )));
        }

        Ok(Self {
            columns,
            rows,
            rule,
        })
    }
}

impl FromStr for RleHeader {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split `key = value` and check the key.
fn extract_value<'a>(part: &'a str, expected_key: &str) -> Result<&'a str, DecodeError> {
    let (key, value) = part.split_once('=').ok_or_else(|| {
        DecodeError::MalformedHeader(format!(
            "expected '{} = <value>', got '{}'",
            expected_key, part
        ))
    })?;

    let key = key.trim();
    if key != expected_key {
        return Err(DecodeError::MalformedHeader(format!(
            "expected '{}', got '{}'",
            expected_key, key
        )));
    }
    Ok(value.trim())
}

fn parse_dimension(part: Option<&str>, key: &str) -> Result<usize, DecodeError> {
    let part = part
        .filter(|p| !p.is_empty())
        .ok_or_else(|| DecodeError::MalformedHeader(format!("missing '{}'", key)))?;

    let value = extract_value(part, key)?;
    let dimension: usize = value.parse().map_err(|_| {
        DecodeError::MalformedHeader(format!("'{}' is not a valid {} dimension", value, key))
    })?;

    if dimension == 0 {
        return Err(DecodeError::MalformedHeader(format!(
            "{} must be positive",
            key
        )));
    }
    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_markers() {
        let lines = [
            "#N Glider",
            "#C comment",
            "#c lower",
            "#O author",
            "#P 0 0",
            "#R 0 0",
            "#r 23/3",
        ];
        for line in lines {
            assert!(is_comment(line), "{}", line);
        }
        assert!(!is_comment("x = 3, y = 3"));
        assert!(!is_comment("#X unknown"));
        assert!(!is_comment(" #C indented"));
    }

    #[test]
    fn test_parse_basic_header() {
        let header: RleHeader = "x = 36, y = 9".parse().unwrap();
        assert_eq!(
            header,
            RleHeader {
                columns: 36,
                rows: 9,
                rule: None
            }
        );
    }

    #[test]
    fn test_parse_compact_header_with_rule() {
        let header = RleHeader::parse("x=3,y=2,rule=b3/s23").unwrap();
        assert_eq!(header.columns, 3);
        assert_eq!(header.rows, 2);
        assert_eq!(header.rule.as_deref(), Some("b3/s23"));
    }

    #[test]
    fn test_order_is_fixed() {
        assert!(matches!(
            RleHeader::parse("y = 2, x = 3"),
            Err(DecodeError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_rejects_bad_headers() {
        for line in [
            "",
            "x = 3",
            "x = three, y = 2",
            "x = -3, y = 2",
            "x = 0, y = 2",
            "x = 3, y = 0",
            "x 3, y 2",
            "x = 3, y = 2, rule = B36/S23",
            "x = 3, y = 2, rule = B3/S23, extra = 1",
        ] {
            assert!(
                matches!(RleHeader::parse(line), Err(DecodeError::MalformedHeader(_))),
                "accepted '{}'",
                line
            );
        }
    }
}
