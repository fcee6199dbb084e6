//! Shared metadata for `rexcheck_core::lang` registries.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for case files, the CLI and diagnostics; engines never look at spellings.

/// Shared metadata shape for registry items.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl<Id> VocabInfo<Id> {
    /// Whether `name` is the canonical spelling or one of the aliases. Case-sensitive.
    pub fn is_spelled(&self, name: &str) -> bool {
        self.canonical == name || self.aliases.contains(&name)
    }
}

/// Find the entry spelled `name`, preferring canonical spellings over aliases.
pub fn lookup<Id: Copy>(table: &'static [VocabInfo<Id>], name: &str) -> Option<Id> {
    if let Some(item) = table.iter().find(|i| i.canonical == name) {
        return Some(item.id);
    }
    table.iter().find(|i| i.is_spelled(name)).map(|i| i.id)
}
