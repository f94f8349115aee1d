use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Message layout declared by a FMT line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatDefinition {
    pub type_id: u8,
    pub name: String,
    /// DataFlash type characters, one per column
    pub format: String,
    pub columns: Vec<String>,
}

impl FormatDefinition {
    pub fn new(type_id: u8, name: &str, format: &str, columns: Vec<String>) -> Self {
        Self {
            type_id,
            name: name.to_string(),
            format: format.to_string(),
            columns,
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// All message layouts seen so far in a log, keyed by message name
#[derive(Debug, Default, Clone)]
pub struct FormatTable {
    definitions: HashMap<String, FormatDefinition>,
}

impl FormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layout. A later FMT line for the same name replaces the earlier one.
    pub fn insert(&mut self, definition: FormatDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&FormatDefinition> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gps_format() -> FormatDefinition {
        FormatDefinition::new(
            130,
            "GPS",
            "QBLLe",
            ["TimeUS", "Status", "Lat", "Lng", "Alt"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_column_lookup() {
        let def = gps_format();
        assert_eq!(def.column_count(), 5);
        assert_eq!(def.column_index("Lat"), Some(2));
        assert_eq!(def.column_index("lat"), None);
    }

    #[test]
    fn test_format_table_replaces_redefinition() {
        let mut table = FormatTable::new();
        assert!(table.is_empty());
        table.insert(gps_format());
        table.insert(FormatDefinition::new(
            131,
            "GPS",
            "QLL",
            vec!["TimeUS".into(), "Lat".into(), "Lng".into()],
        ));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("GPS").map(|d| d.type_id), Some(131));
    }
}
