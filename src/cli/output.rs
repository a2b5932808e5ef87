use crate::model::AnnotationRecord;

/// Human-readable lines for one record
pub fn format_record(record: &AnnotationRecord) -> Vec<String> {
    let mut lines = vec![record.name.clone()];
    if !record.tags.is_empty() {
        lines.push(format!("  tags: {}", record.tags_joined()));
    }
    if !record.description.is_empty() {
        lines.push(format!("  description: {}", record.description));
    }
    lines
}

pub fn record_json(record: &AnnotationRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}
