//! CSV tables with a `key,value` header row.

use serde::Deserialize;

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct Row {
    key: String,
    value: String,
}

pub(crate) fn parse(source: &str) -> Result<Vec<(String, String)>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .comment(Some(b'#'))
        .from_reader(source.as_bytes());

    let mut entries = Vec::new();
    for row in reader.deserialize::<Row>() {
        let row = row?;
        entries.push((row.key, row.value));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_in_order() {
        let source = "key,value\ngreeting,\"Hello, %@\"\nfarewell,Bye\n";
        assert_eq!(
            parse(source).unwrap(),
            vec![
                ("greeting".to_string(), "Hello, %@".to_string()),
                ("farewell".to_string(), "Bye".to_string())
            ]
        );
    }

    #[test]
    fn test_extra_columns_and_comments() {
        let source = "# exported\n key , value ,note\nok,OK,button label\n";
        assert_eq!(
            parse(source).unwrap(),
            vec![("ok".to_string(), "OK".to_string())]
        );
    }

    #[test]
    fn test_values_keep_surrounding_spaces() {
        let source = "key,value\npad,\" spaced \"\n";
        assert_eq!(parse(source).unwrap()[0].1, " spaced ");
    }

    #[test]
    fn test_missing_value_column() {
        let err = parse("key\nonly\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
