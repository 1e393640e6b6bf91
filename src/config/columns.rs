use serde::{Deserialize, Serialize};

const SCRIPTURE_COLUMNS: &[(&str, &str)] = &[
    ("Scripture", "SCRIPTURE"),
    ("Prayer Verse", "PRAYER_VERSE"),
    ("Assurance Verse", "ASSURANCE_VERSE"),
    ("Catechism Scripture References", "CATECHISM_SCRIPTURE"),
    ("Benediction", "BENEDICTION_SCRIPTURE"),
    ("OT Reading", "OT_READING"),
    ("NT Reading", "NT_READING"),
    ("Opening", "OPENING"),
    ("Thanksgiving", "THANKSGIVING"),
    ("Petitions", "PETITIONS"),
    ("Sermon Passage", "SERMON_PASSAGE"),
];

const TEXT_COLUMNS: &[(&str, &str)] = &[
    ("Question", "CATECHISM_QUESTION"),
    ("Answer", "CATECHISM_ANSWER"),
    ("Baptisms", "BAPTISMS"),
    ("Collect", "COLLECT"),
    ("Church of the Month", "CHURCH_OF_THE_MONTH"),
];

/// Maps one schedule column to a template variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub column: String,
    pub key: String,
    /// Whether the value is a scripture reference to expand into `<KEY>_TEXT`.
    #[serde(default)]
    pub scripture: bool,
}

impl ColumnMapping {
    pub fn new(column: &str, key: &str, scripture: bool) -> Self {
        Self {
            column: column.to_string(),
            key: key.to_string(),
            scripture,
        }
    }
}

/// Ordered column → template key table. Several columns may feed the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    mappings: Vec<ColumnMapping>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        let hymns = (0..10).map(|i| ColumnMapping::new(&format!("Hymn {}", i), "HYMNS", false));
        let scripture = SCRIPTURE_COLUMNS
            .iter()
            .map(|(column, key)| ColumnMapping::new(column, key, true));
        let text = TEXT_COLUMNS
            .iter()
            .map(|(column, key)| ColumnMapping::new(column, key, false));

        Self {
            mappings: hymns.chain(scripture).chain(text).collect(),
        }
    }
}

impl ColumnMap {
    pub fn new(mappings: Vec<ColumnMapping>) -> Self {
        Self { mappings }
    }

    /// Replaces the mapping for an already known column, or appends a new one.
    pub fn with_overrides(mut self, overrides: &[ColumnMapping]) -> Self {
        for mapping in overrides {
            match self.mappings.iter_mut().find(|m| m.column == mapping.column) {
                Some(existing) => *existing = mapping.clone(),
                None => self.mappings.push(mapping.clone()),
            }
        }
        self
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Template keys holding scripture references, in table order, without duplicates.
    pub fn scripture_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for mapping in self.mappings.iter().filter(|m| m.scripture) {
            if !keys.contains(&mapping.key.as_str()) {
                keys.push(&mapping.key);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_covers_known_columns() {
        let map = ColumnMap::default();
        let hymns = map.mappings().iter().filter(|m| m.key == "HYMNS").count();

        assert_eq!(hymns, 10);
        assert_eq!(map.mappings()[0].column, "Hymn 0");
        assert_eq!(map.scripture_keys().len(), 11);
        assert!(map.scripture_keys().contains(&"SERMON_PASSAGE"));
        assert!(!map.scripture_keys().contains(&"COLLECT"));
    }

    #[test]
    fn test_overrides_replace_and_append() {
        let map = ColumnMap::default().with_overrides(&[
            ColumnMapping::new("Collect", "COLLECT_OF_THE_DAY", false),
            ColumnMapping::new("Psalm", "PSALM", true),
        ]);

        let collect = map.mappings().iter().find(|m| m.column == "Collect").unwrap();
        assert_eq!(collect.key, "COLLECT_OF_THE_DAY");
        assert_eq!(map.mappings().last().unwrap().key, "PSALM");
        assert!(map.scripture_keys().contains(&"PSALM"));
    }
}
