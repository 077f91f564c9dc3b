//! Decoding of logical lines into named properties.

use anyhow::{bail, Context, Result};

/// One content line split into its name, parameters and raw value.
///
/// Properties are transient: they live only while the line they came from is
/// being routed into an event record.
#[derive(Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub params: Vec<(String, String)>,
    pub value: String,
}

impl Property {
    /// The value of the first parameter with the given key, if any.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the owning property carries a bare date instead of a
    /// timestamp (`VALUE=DATE`).
    pub fn is_date_only(&self) -> bool {
        self.param("VALUE") == Some("DATE")
    }
}

/// Decode one logical line into a [`Property`].
///
/// The line is split at the first `:` into name-part and value; the
/// name-part is split on `;` into the property name and its parameters,
/// each of which must contain `=`. A line violating this shape makes the
/// whole feed unusable, so decoding fails hard.
pub fn decode(line: &str) -> Result<Property> {
    let (name_part, value) = line
        .split_once(':')
        .with_context(|| format!("content line without ':': {line:?}"))?;
    let mut segments = name_part.split(';');
    let name = segments.next().unwrap_or_default();
    let mut params = Vec::new();
    for segment in segments {
        let Some((key, param_value)) = segment.split_once('=') else {
            bail!("parameter without '=' in content line {line:?}");
        };
        params.push((key.to_string(), param_value.to_string()));
    }
    Ok(Property {
        name: name.to_string(),
        params,
        value: value.to_string(),
    })
}

/// Unescape a textual property value.
///
/// Replacements run in this order, each over the whole string: `\N` and
/// `\n` to newline, `\,` to comma, `\;` to semicolon, `\\` to backslash.
/// Because each pass sees the output of the previous one, `\\n` turns into
/// a backslash followed by a newline. The feed has always been consumed
/// this way and the downstream extract depends on it.
pub fn unescape(value: &str) -> String {
    value
        .replace(r"\N", "\n")
        .replace(r"\n", "\n")
        .replace(r"\,", ",")
        .replace(r"\;", ";")
        .replace(r"\\", "\\")
}

#[cfg(test)]
mod tests {
    use crate::property::{decode, unescape, Property};

    #[test]
    fn test_decode_plain() {
        let property = decode("SUMMARY:Próba chóru").unwrap();
        assert_eq!(
            property,
            Property {
                name: String::from("SUMMARY"),
                params: vec![],
                value: String::from("Próba chóru"),
            }
        );
    }

    #[test]
    fn test_decode_with_params() {
        let property = decode("DTSTART;VALUE=DATE;TZID=Europe/Warsaw:20240115").unwrap();
        assert_eq!(property.name, "DTSTART");
        assert_eq!(
            property.params,
            vec![
                (String::from("VALUE"), String::from("DATE")),
                (String::from("TZID"), String::from("Europe/Warsaw")),
            ]
        );
        assert_eq!(property.value, "20240115");
        assert!(property.is_date_only());
        assert_eq!(property.param("TZID"), Some("Europe/Warsaw"));
        assert_eq!(property.param("MISSING"), None);
    }

    #[test]
    fn test_decode_value_keeps_later_colons() {
        let property = decode("URL:https://example.org/feed.ics").unwrap();
        assert_eq!(property.value, "https://example.org/feed.ics");
    }

    #[test]
    fn test_decode_without_colon_fails() {
        assert!(decode("SUMMARY").is_err());
    }

    #[test]
    fn test_decode_with_malformed_param_fails() {
        assert!(decode("DTSTART;VALUE:20240115").is_err());
    }

    #[test]
    fn test_unescape_simple_pairs() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"a\Nb"), "a\nb");
        assert_eq!(unescape(r"a\,b"), "a,b");
        assert_eq!(unescape(r"a\;b"), "a;b");
        assert_eq!(unescape(r"a\\b"), r"a\b");
    }

    /// The replacement order is observable: an escaped backslash followed
    /// by `n` still produces a newline after the remaining backslash.
    #[test]
    fn test_unescape_is_sequential() {
        assert_eq!(unescape(r"a\\nb"), "a\\\nb");
    }

    #[test]
    fn test_unescape_leaves_plain_text_alone() {
        assert_eq!(unescape("sala 12, parter"), "sala 12, parter");
    }
}
