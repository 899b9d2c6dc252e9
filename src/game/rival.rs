use super::grid::Cell;
use super::snake::Snake;

/// Identity token for a rival, an index into the roster table.
///
/// Rival records carry only the token; cosmetics (name, color, glyph) are
/// resolved once at startup and live in the [`RivalRoster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RivalId(pub usize);

/// An RGB display color, kept renderer-agnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Color used when a rival has no usable logo to extract one from
pub const FALLBACK_COLOR: Rgb = Rgb(128, 128, 128);

/// A rival's resolved visual identity
#[derive(Debug, Clone, PartialEq)]
pub struct RivalIdentity {
    pub id: RivalId,
    pub name: String,
    pub color: Rgb,
    pub head_glyph: char,
}

/// The fixed set of rival identities available for the process lifetime
#[derive(Debug, Clone, Default)]
pub struct RivalRoster {
    identities: Vec<RivalIdentity>,
}

impl RivalRoster {
    pub fn new(identities: Vec<RivalIdentity>) -> Self {
        Self { identities }
    }

    /// Roster with a handful of built-in identities, used when asset
    /// discovery finds no logo files.
    pub fn builtin() -> Self {
        let entries = [
            ("crimson", Rgb(196, 30, 58)),
            ("cobalt", Rgb(0, 71, 171)),
            ("viridian", Rgb(64, 130, 109)),
            ("amber", Rgb(255, 191, 0)),
            ("violet", Rgb(143, 0, 255)),
        ];
        let identities = entries
            .iter()
            .enumerate()
            .map(|(i, (name, color))| RivalIdentity {
                id: RivalId(i),
                name: (*name).to_string(),
                color: *color,
                head_glyph: name.chars().next().unwrap_or('?').to_ascii_uppercase(),
            })
            .collect();
        Self::new(identities)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn get(&self, id: RivalId) -> Option<&RivalIdentity> {
        self.identities.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = RivalId> + '_ {
        (0..self.identities.len()).map(RivalId)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RivalIdentity> {
        self.identities.iter()
    }
}

/// An AI-controlled rival snake on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct RivalSnake {
    pub id: RivalId,
    pub snake: Snake,
}

impl RivalSnake {
    pub fn new(id: RivalId, spawn: Cell) -> Self {
        Self {
            id,
            snake: Snake::new(spawn),
        }
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roster() {
        let roster = RivalRoster::builtin();
        assert!(!roster.is_empty());
        assert_eq!(roster.len(), 5);

        let first = roster.get(RivalId(0)).unwrap();
        assert_eq!(first.id, RivalId(0));
        assert_eq!(first.head_glyph, 'C');
    }

    #[test]
    fn test_roster_lookup_out_of_range() {
        let roster = RivalRoster::builtin();
        assert!(roster.get(RivalId(99)).is_none());
    }

    #[test]
    fn test_rival_spawns_with_single_cell() {
        let rival = RivalSnake::new(RivalId(2), Cell::new(3, 4));
        assert_eq!(rival.head(), Cell::new(3, 4));
        assert_eq!(rival.snake.len(), 1);
    }
}
