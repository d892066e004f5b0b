use crate::LookupError;
use item_core::{Ability, Item, Job, RecordId};
use std::collections::HashMap;

/// A record that can be indexed into a lookup table
pub trait Keyed {
    /// Table name used in lookup errors
    const TABLE: &'static str;

    fn key(&self) -> &RecordId;
}

impl Keyed for Item {
    const TABLE: &'static str = "items";

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Keyed for Job {
    const TABLE: &'static str = "jobs";

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Keyed for Ability {
    const TABLE: &'static str = "abilities";

    fn key(&self) -> &RecordId {
        &self.id
    }
}

/// Read-only id index over a flat catalog list
#[derive(Debug, Clone)]
pub struct LookupTable<T> {
    records: HashMap<RecordId, T>,
}

impl<T> Default for LookupTable<T> {
    fn default() -> Self {
        LookupTable {
            records: HashMap::new(),
        }
    }
}

impl<T: Keyed> LookupTable<T> {
    /// Index a fetched list. A repeated id keeps the later record.
    pub fn from_records(records: Vec<T>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.key().clone(), record))
            .collect();
        LookupTable { records }
    }

    /// Resolve an id, failing with the table name and id when absent
    pub fn resolve(&self, id: &RecordId) -> Result<&T, LookupError> {
        self.records.get(id).ok_or_else(|| LookupError::Missing {
            table: T::TABLE,
            id: id.clone(),
        })
    }
}

impl<T> LookupTable<T> {
    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Keyed> FromIterator<T> for LookupTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        LookupTable::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(id: &str, name: &str) -> Ability {
        Ability {
            id: RecordId::from(id),
            name: name.to_string(),
            description: String::new(),
            element: "FIRE".to_string(),
        }
    }

    #[test]
    fn test_index_by_id() {
        let table = LookupTable::from_records(vec![ability("a", "A"), ability("b", "B")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"b".into()).map(|a| a.name.as_str()), Some("B"));
        assert!(table.get(&"c".into()).is_none());
    }

    #[test]
    fn test_repeated_id_keeps_later_record() {
        let table = LookupTable::from_records(vec![ability("a", "first"), ability("a", "second")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"a".into()).unwrap().name, "second");
    }

    #[test]
    fn test_resolve_missing_names_table() {
        let table: LookupTable<Ability> = LookupTable::default();
        let err = table.resolve(&"ghost".into()).unwrap_err();
        assert!(matches!(
            err,
            LookupError::Missing { table: "abilities", ref id } if id.as_str() == "ghost"
        ));
        assert_eq!(err.to_string(), "Unknown id 'ghost' in abilities table");
    }

    #[test]
    fn test_collect_from_iterator() {
        let table: LookupTable<Ability> = (0..3).map(|i| ability(&i.to_string(), "x")).collect();
        assert!(table.contains(&RecordId::from(2u64)));
    }
}
