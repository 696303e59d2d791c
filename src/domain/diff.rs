//! Field-level change detection between two states of an event.
//!
//! Fields are checked in a fixed order (title, start, end, assignees, then the
//! remaining tracked text fields) so the entry list and the summary built from
//! it are reproducible for the same pair of states.

use {
    super::event::EventState,
    super::id::ProfileId,
    super::time::{Instant, compare_instants},
    chrono::SecondsFormat,
    serde::{Deserialize, Serialize},
    std::{cmp::Ordering, collections::BTreeSet, fmt},
};

/// Separator between summary clauses.
pub const SUMMARY_SEPARATOR: &str = ", ";

/// Text fields outside the fixed set that are still tracked, in check order.
const OTHER_TEXT_FIELDS: &[(&str, fn(&EventState) -> &str)] =
    &[("description", EventState::description)];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangedField {
    Title,
    Start,
    End,
    AssignedTo,
    Other(String),
}

impl ChangedField {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Start => "start",
            Self::End => "end",
            Self::AssignedTo => "assignedTo",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ChangedField {
    fn from(s: String) -> Self {
        match s.as_str() {
            "title" => Self::Title,
            "start" => Self::Start,
            "end" => Self::End,
            "assignedTo" => Self::AssignedTo,
            _ => Self::Other(s),
        }
    }
}

impl From<ChangedField> for String {
    fn from(field: ChangedField) -> Self {
        field.as_str().to_string()
    }
}

/// Old or new value of a changed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Instant(Instant),
    IdSet(Vec<ProfileId>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "\"{text}\""),
            Self::Instant(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::IdSet(ids) => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", ids.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    pub field: ChangedField,
    pub old_value: FieldValue,
    pub new_value: FieldValue,
}

impl ChangeEntry {
    /// This entry's contribution to the human-readable summary.
    pub fn clause(&self) -> String {
        match &self.field {
            ChangedField::Title => {
                format!("Title changed from {} to {}", self.old_value, self.new_value)
            }
            ChangedField::Start => {
                format!("Start time changed from {} to {}", self.old_value, self.new_value)
            }
            ChangedField::End => {
                format!("End time changed from {} to {}", self.old_value, self.new_value)
            }
            ChangedField::AssignedTo => "Attendee list updated".to_string(),
            ChangedField::Other(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => format!("{}{} updated", first.to_uppercase(), chars.as_str()),
                    None => "Field updated".to_string(),
                }
            }
        }
    }
}

/// Ordered change entries between two event states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDiff {
    entries: Vec<ChangeEntry>,
}

impl EventDiff {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ChangeEntry> {
        self.entries
    }

    pub fn contains(&self, field: &ChangedField) -> bool {
        self.entries.iter().any(|e| &e.field == field)
    }

    pub fn summary(&self) -> String {
        summarize(&self.entries)
    }
}

pub fn summarize(entries: &[ChangeEntry]) -> String {
    entries
        .iter()
        .map(ChangeEntry::clause)
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// Compare `old` against `proposed` by meaning rather than representation:
/// instants by absolute time, assignees as sets.
pub fn diff(old: &EventState, proposed: &EventState) -> EventDiff {
    let mut entries = Vec::new();

    if old.title() != proposed.title() {
        entries.push(ChangeEntry {
            field: ChangedField::Title,
            old_value: FieldValue::Text(old.title().to_string()),
            new_value: FieldValue::Text(proposed.title().to_string()),
        });
    }

    for (field, before, after) in [
        (ChangedField::Start, old.start(), proposed.start()),
        (ChangedField::End, old.end(), proposed.end()),
    ] {
        if compare_instants(&before, &after) != Ordering::Equal {
            entries.push(ChangeEntry {
                field,
                old_value: FieldValue::Instant(before),
                new_value: FieldValue::Instant(after),
            });
        }
    }

    let before = sorted_ids(old.assigned_to());
    let after = sorted_ids(proposed.assigned_to());
    if before != after {
        entries.push(ChangeEntry {
            field: ChangedField::AssignedTo,
            old_value: FieldValue::IdSet(before),
            new_value: FieldValue::IdSet(after),
        });
    }

    for (name, read) in OTHER_TEXT_FIELDS {
        let (before, after) = (read(old), read(proposed));
        if before != after {
            entries.push(ChangeEntry {
                field: ChangedField::Other((*name).to_string()),
                old_value: FieldValue::Text(before.to_string()),
                new_value: FieldValue::Text(after.to_string()),
            });
        }
    }

    EventDiff { entries }
}

/// Set view of an assignment list as a sorted, deduplicated copy.
pub fn sorted_ids(ids: &[ProfileId]) -> Vec<ProfileId> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
