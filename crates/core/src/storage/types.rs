use serde_json::{Map, Value};

/// A schemaless JSON document as held by the document store.
pub type Document = Map<String, Value>;

/// Name of the identifier field every stored document carries.
pub const ID_FIELD: &str = "id";

/// Returns the string id of a document, if present.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id() {
        let Value::Object(doc) = json!({ "id": "a1", "title": "x" }) else {
            unreachable!()
        };
        assert_eq!(document_id(&doc), Some("a1"));
    }

    #[test]
    fn test_document_id_missing_or_not_string() {
        let Value::Object(doc) = json!({ "id": 7 }) else {
            unreachable!()
        };
        assert_eq!(document_id(&doc), None);
        assert_eq!(document_id(&Document::new()), None);
    }
}
