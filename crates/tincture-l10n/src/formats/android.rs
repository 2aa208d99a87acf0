//! Android `strings.xml` resources.
//!
//! Only `<string>` elements are read; `<plurals>` and `<string-array>` are
//! skipped. Values go through Android's resource text rules: backslash
//! escapes are decoded, unquoted whitespace runs collapse to one space and
//! double quotes only mark verbatim regions.
//!
//! A value holding inline markup (`Hello <b>%1$s</b>!`) is kept as markup,
//! tags and entity references included, so it can be handed to a markup
//! parser after formatting. Plain values have their entities decoded.

use quick_xml::escape::unescape as unescape_entities;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::LoadError;

pub(crate) fn parse(source: &str) -> Result<Vec<(String, String)>, LoadError> {
    let mut reader = Reader::from_str(source);
    let mut entries = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) if start.local_name().as_ref() == b"string" => {
                let name = resource_name(&start)?;
                let raw = reader.read_text(start.name())?;
                if let Some(name) = name {
                    entries.push((name, resource_value(&raw)?));
                }
            }
            Event::Empty(start) if start.local_name().as_ref() == b"string" => {
                if let Some(name) = resource_name(&start)? {
                    entries.push((name, String::new()));
                }
            }
            Event::Eof => return Ok(entries),
            _ => {}
        }
    }
}

fn resource_name(start: &quick_xml::events::BytesStart<'_>) -> Result<Option<String>, LoadError> {
    match start
        .try_get_attribute("name")
        .map_err(quick_xml::Error::from)?
    {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => {
            tracing::debug!("skipping <string> without a name attribute");
            Ok(None)
        }
    }
}

/// Turns the raw inner content of a `<string>` element into a template.
fn resource_value(raw: &str) -> Result<String, LoadError> {
    let trimmed = raw.trim();
    if let Some(cdata) = trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
    {
        return Ok(unescape(cdata));
    }
    if trimmed.contains('<') {
        return Ok(unescape(trimmed));
    }
    let decoded = unescape_entities(trimmed).map_err(quick_xml::Error::from)?;
    Ok(unescape(&decoded))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quoted = false;
    let mut chars = raw.trim().chars();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                // Tags pass through untouched, attribute quotes included.
                out.push(c);
                for inner in chars.by_ref() {
                    out.push(inner);
                    if inner == '>' {
                        break;
                    }
                }
            }
            '"' => quoted = !quoted,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            out.push_str("\\u");
                            out.push_str(&hex);
                        }
                    }
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            c if c.is_whitespace() && !quoted => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_elements() {
        let source = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Tincture</string>
    <string-array name="planets">
        <item>Mercury</item>
    </string-array>
    <string name="welcome">Welcome, %1$s!</string>
</resources>"#;
        assert_eq!(
            parse(source).unwrap(),
            vec![
                ("app_name".to_string(), "Tincture".to_string()),
                ("welcome".to_string(), "Welcome, %1$s!".to_string())
            ]
        );
    }

    #[test]
    fn test_entities_and_escapes() {
        let source = r#"<resources>
    <string name="terms">Don\'t &amp; won\'t\nagain</string>
</resources>"#;
        assert_eq!(parse(source).unwrap()[0].1, "Don't & won't\nagain");
    }

    #[test]
    fn test_inline_markup_is_kept() {
        let source = r#"<resources>
    <string name="w">Hello <b>%1$s</b>!</string>
    <string name="link">See <a href="https://example.com/?a=1&amp;b=2">docs</a></string>
    <string name="after">plain</string>
</resources>"#;
        assert_eq!(
            parse(source).unwrap(),
            vec![
                ("w".to_string(), "Hello <b>%1$s</b>!".to_string()),
                (
                    "link".to_string(),
                    r#"See <a href="https://example.com/?a=1&amp;b=2">docs</a>"#.to_string()
                ),
                ("after".to_string(), "plain".to_string())
            ]
        );
    }

    #[test]
    fn test_cdata_value() {
        let source = r#"<resources><string name="w"><![CDATA[Hello <b>%1$s</b>!]]></string></resources>"#;
        assert_eq!(parse(source).unwrap()[0].1, "Hello <b>%1$s</b>!");
    }

    #[test]
    fn test_empty_and_unnamed_strings() {
        let source = r#"<resources>
    <string name="blank"/>
    <string name="also_blank"></string>
    <string>orphan</string>
</resources>"#;
        assert_eq!(
            parse(source).unwrap(),
            vec![
                ("blank".to_string(), String::new()),
                ("also_blank".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn test_empty_resources() {
        assert!(parse("<resources/>").unwrap().is_empty());
    }

    #[test]
    fn test_unescape_whitespace_and_quotes() {
        assert_eq!(unescape("a   b\n  c"), "a b c");
        assert_eq!(unescape("\"  keep  \""), "  keep  ");
        assert_eq!(unescape(r"caf\u00e9"), "café");
        assert_eq!(unescape(r"\@home \?"), "@home ?");
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse("<resources><string name=\"x\">open").unwrap_err();
        assert!(matches!(err, LoadError::AndroidXml(_)));
    }
}
