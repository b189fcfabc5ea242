//! Fixed poem catalog.

use core::fmt::Write;

use heapless::String as HeaplessString;

/// Suffix appended to a poem identifier to find its pre-rendered markup.
pub const CONTENT_ID_SUFFIX: &str = "-content";
pub const CONTENT_ID_BYTES: usize = 64;

/// One catalog entry: stable identifier plus the title announced on display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoemEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

impl<'a> PoemEntry<'a> {
    pub const fn new(id: &'a str, title: &'a str) -> Self {
        Self { id, title }
    }

    /// Element id of the markup block holding this poem (`<id>-content`).
    pub fn content_id(&self) -> HeaplessString<CONTENT_ID_BYTES> {
        let mut out = HeaplessString::new();
        let _ = write!(out, "{}{}", self.id, CONTENT_ID_SUFFIX);
        out
    }
}

pub const ARCHIVE_POEMS: [PoemEntry<'static>; 9] = [
    PoemEntry::new("altars-of-salt", "Altars of Salt"),
    PoemEntry::new("guillotine-of-sugar", "Guillotine of Sugar"),
    PoemEntry::new("library-of-ash", "Library of Ash"),
    PoemEntry::new("cartography-of-time", "Cartography of Time"),
    PoemEntry::new("winters-not-a-season", "Winter's Not a Season"),
    PoemEntry::new("cathedral-of-ruin", "Cathedral of Ruin"),
    PoemEntry::new("hunger-psalm", "Hunger Psalm"),
    PoemEntry::new("elegy-with-your-name", "Elegy With Your Name"),
    PoemEntry::new("secret-door", "Secret Door"),
];

/// Read-only, index-ordered list of poems.
pub trait PoemCatalog {
    fn poem_count(&self) -> u16;
    fn poem_at(&self, index: u16) -> Option<PoemEntry<'_>>;

    fn position_of(&self, id: &str) -> Option<u16> {
        (0..self.poem_count()).find(|&index| self.poem_at(index).is_some_and(|p| p.id == id))
    }
}

/// Catalog over a static slice of entries.
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog<'a> {
    entries: &'a [PoemEntry<'a>],
}

impl<'a> StaticCatalog<'a> {
    pub const fn new(entries: &'a [PoemEntry<'a>]) -> Self {
        Self { entries }
    }
}

pub fn archive_catalog() -> StaticCatalog<'static> {
    StaticCatalog::new(&ARCHIVE_POEMS)
}

impl PoemCatalog for StaticCatalog<'_> {
    fn poem_count(&self) -> u16 {
        self.entries.len().min(u16::MAX as usize) as u16
    }

    fn poem_at(&self, index: u16) -> Option<PoemEntry<'_>> {
        self.entries.get(index as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_ids_are_unique() {
        for (i, a) in ARCHIVE_POEMS.iter().enumerate() {
            for b in ARCHIVE_POEMS.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn content_id_follows_naming_convention() {
        let entry = ARCHIVE_POEMS[6];
        assert_eq!(entry.content_id().as_str(), "hunger-psalm-content");
    }

    #[test]
    fn lookup_by_index_and_id() {
        let catalog = archive_catalog();
        assert_eq!(catalog.poem_count(), 9);
        assert_eq!(catalog.poem_at(8).map(|p| p.id), Some("secret-door"));
        assert_eq!(catalog.poem_at(9), None);
        assert_eq!(catalog.position_of("library-of-ash"), Some(2));
        assert_eq!(catalog.position_of("missing"), None);
    }
}
