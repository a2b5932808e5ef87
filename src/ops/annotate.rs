use std::path::Path;

use crate::model::AnnotationRecord;

/// A parsed annotation command.
///
/// The first token decides the kind: `+`/`-` prefix means tag edits,
/// anything else (or nothing) is a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationCommand {
    Tags(Vec<TagEdit>),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEdit {
    /// Append `#name`
    Add(String),
    /// Remove the first `#name`
    Remove(String),
}

impl TagEdit {
    fn tag(&self) -> String {
        match self {
            TagEdit::Add(name) | TagEdit::Remove(name) => format!("#{}", name),
        }
    }
}

fn is_tag_token(token: &str) -> bool {
    token.starts_with('+') || token.starts_with('-')
}

/// Parse command tokens into an [`AnnotationCommand`].
pub fn parse_command<S: AsRef<str>>(tokens: &[S]) -> AnnotationCommand {
    let first_is_tag = tokens.first().is_some_and(|t| is_tag_token(t.as_ref()));
    if !first_is_tag {
        let description = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        return AnnotationCommand::Description(description.trim().to_string());
    }

    let edits = tokens
        .iter()
        .filter_map(|t| {
            let t = t.as_ref();
            if let Some(name) = t.strip_prefix('+') {
                (!name.is_empty()).then(|| TagEdit::Add(name.to_string()))
            } else if let Some(name) = t.strip_prefix('-') {
                (!name.is_empty()).then(|| TagEdit::Remove(name.to_string()))
            } else {
                None
            }
        })
        .collect();
    AnnotationCommand::Tags(edits)
}

/// Apply a command to a record in place.
pub fn apply(record: &mut AnnotationRecord, command: &AnnotationCommand) {
    match command {
        AnnotationCommand::Description(text) => record.description = text.clone(),
        AnnotationCommand::Tags(edits) => {
            for edit in edits {
                let tag = edit.tag();
                match edit {
                    TagEdit::Add(_) => record.tags.push(tag),
                    TagEdit::Remove(_) => {
                        if let Some(pos) = record.tags.iter().position(|t| *t == tag) {
                            record.tags.remove(pos);
                        }
                    }
                }
            }
        }
    }
}

/// Reduce a target path to the base name records are keyed by.
///
/// `sub/dir/notes.txt` → `notes.txt`, `./notes.txt` → `notes.txt`,
/// `folder/` → `folder`.
pub fn normalize_name(target: &str) -> String {
    let trimmed = target.trim_end_matches('/');
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    match Path::new(trimmed).file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => trimmed.rsplit('/').next().unwrap_or(trimmed).to_string(),
    }
}

/// Whether a normalized name can refer to a directory entry.
pub fn is_entry_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..")
}
