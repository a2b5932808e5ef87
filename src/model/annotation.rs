use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Sidecar file name, one per annotated directory.
pub const SIDECAR_FILE: &str = ".lanno.json";

/// Tags and description attached to one directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Base name of the entry, without any directory prefix
    pub name: String,
    /// Tags in insertion order, each starting with `#`. Duplicates allowed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl AnnotationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        AnnotationRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Tags joined for display
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.description.is_empty()
    }
}

/// On-disk shape of the sidecar file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidecarFile {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_info: Vec<AnnotationRecord>,
}

/// Records keyed by entry name, in file order.
pub type Annotations = IndexMap<String, AnnotationRecord>;

/// Older writers emitted `null` for empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_has_no_records() {
        let file: SidecarFile = serde_json::from_str("{}").unwrap();
        assert!(file.file_info.is_empty());
    }

    #[test]
    fn null_fields_load_as_empty() {
        let file: SidecarFile = serde_json::from_str(
            r#"{"file_info":[{"name":"a.txt","tags":null,"description":null}]}"#,
        )
        .unwrap();
        assert_eq!(file.file_info[0], AnnotationRecord::new("a.txt"));
        let file: SidecarFile = serde_json::from_str(r#"{"file_info":null}"#).unwrap();
        assert!(file.file_info.is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let rec: AnnotationRecord = serde_json::from_str(r#"{"name":"b"}"#).unwrap();
        assert!(rec.is_empty());
    }

    #[test]
    fn tags_joined_with_comma() {
        let rec = AnnotationRecord {
            name: "x".into(),
            tags: vec!["#work".into(), "#urgent".into()],
            description: String::new(),
        };
        assert_eq!(rec.tags_joined(), "#work, #urgent");
    }
}
