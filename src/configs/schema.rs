use crate::models::Table;
use crate::models::plant::PlantTable;
use crate::models::reading::ReadingTable;

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        Self {
            tables: Self::sort_tables(tables),
        }
    }

    /// Orders tables so that every table comes after the tables it
    /// references.
    fn sort_tables(mut pending: Vec<Box<dyn Table>>) -> Vec<Box<dyn Table>> {
        let mut sorted: Vec<Box<dyn Table>> = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready: Vec<usize> = pending
                .iter()
                .enumerate()
                .filter(|(_, table)| {
                    table
                        .dependencies()
                        .iter()
                        .all(|dep| sorted.iter().any(|resolved| resolved.name() == *dep))
                })
                .map(|(index, _)| index)
                .collect();

            assert!(
                !ready.is_empty(),
                "Circular dependency detected or unresolved dependencies exist."
            );

            for index in ready.into_iter().rev() {
                sorted.push(pending.swap_remove(index));
            }
        }

        sorted
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![Box::new(PlantTable), Box::new(ReadingTable)])
    }
}
