use core::fmt;
use core::num::NonZeroU32;

/// Stable identifier of a battery cell within a pack.
///
/// Cells are numbered from 1 the way operators refer to them ("Cell 1"),
/// so the stored value is the 1-based cell number.
/// - `NonZero` enables `Option<CellId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellId(NonZeroU32);

impl CellId {
    /// Create a CellId from a 0-based position by storing index+1.
    pub fn from_index(index: usize) -> Self {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Create a CellId from a 1-based cell number. Returns `None` for 0.
    pub fn from_number(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Recover the 0-based position.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// The 1-based cell number.
    pub fn number(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({})", self.number())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for i in [0_usize, 1, 2, 19, 10_000] {
            let id = CellId::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.number() as usize, i + 1);
        }
    }

    #[test]
    fn zero_is_not_a_cell_number() {
        assert!(CellId::from_number(0).is_none());
        assert_eq!(CellId::from_number(3).map(CellId::index), Some(2));
    }

    #[test]
    fn display_uses_operator_numbering() {
        assert_eq!(CellId::from_index(0).to_string(), "Cell 1");
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<CellId>(),
            core::mem::size_of::<Option<CellId>>()
        );
    }
}
