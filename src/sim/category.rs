//! Category bitmasks and the collision/contact matrix
//!
//! Every body belongs to exactly one [`Category`]. Its collision mask lists
//! the categories it physically blocks against; its contact mask lists the
//! categories that raise an overlap notification. The [`CollisionMatrix`] is
//! the single place these masks are defined.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};

/// Kind of simulated body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ball,
    Monster,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Ball, Category::Monster];

    /// The single bit identifying this category
    #[inline]
    pub const fn mask(self) -> CategoryMask {
        match self {
            Category::Ball => CategoryMask(1 << 0),
            Category::Monster => CategoryMask(1 << 1),
        }
    }
}

/// Set of categories as raw bits
///
/// Raw bits are kept as-is so contact reports carrying bits no [`Category`]
/// owns can still be classified (as "not a monster").
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);
    pub const ALL: CategoryMask = CategoryMask(u32::MAX);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any bit is shared
    #[inline]
    pub const fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn contains(self, category: Category) -> bool {
        self.intersects(category.mask())
    }

    /// The category owning exactly these bits, if any
    pub fn category(self) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.mask() == self)
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        category.mask()
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

impl BitOr<Category> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        self | rhs.mask()
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: CategoryMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CategoryMask {
    type Output = CategoryMask;

    fn bitand(self, rhs: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 & rhs.0)
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CategoryMask::ALL {
            return write!(f, "CategoryMask(ALL)");
        }
        let names: Vec<_> = Category::ALL
            .iter()
            .filter(|c| self.contains(**c))
            .map(|c| format!("{c:?}"))
            .collect();
        let known = Category::ALL
            .iter()
            .fold(CategoryMask::NONE, |acc, c| acc | *c);
        let unknown = self.0 & !known.0;
        if unknown != 0 {
            write!(f, "CategoryMask({} | {:#x})", names.join(" | "), unknown)
        } else {
            write!(f, "CategoryMask({})", names.join(" | "))
        }
    }
}

/// Collision and contact masks for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskPair {
    pub collision: CategoryMask,
    pub contact: CategoryMask,
}

/// Immutable category -> masks registry
#[derive(Debug, Clone)]
pub struct CollisionMatrix {
    entries: Vec<(Category, MaskPair)>,
}

impl CollisionMatrix {
    /// Ball and monster block and notify each other
    pub const DEFAULT_TABLE: [(Category, MaskPair); 2] = [
        (
            Category::Ball,
            MaskPair {
                collision: Category::Monster.mask(),
                contact: Category::Monster.mask(),
            },
        ),
        (
            Category::Monster,
            MaskPair {
                collision: Category::Ball.mask(),
                contact: Category::Ball.mask(),
            },
        ),
    ];

    /// Build from a table; every category must be present
    ///
    /// Later entries for the same category replace earlier ones.
    pub fn new(table: &[(Category, MaskPair)]) -> Result<Self> {
        let mut entries: Vec<(Category, MaskPair)> = Vec::with_capacity(table.len());
        for &(category, masks) in table {
            match entries.iter_mut().find(|(c, _)| *c == category) {
                Some(entry) => entry.1 = masks,
                None => entries.push((category, masks)),
            }
        }

        if let Some(missing) = Category::ALL
            .into_iter()
            .find(|c| !entries.iter().any(|(e, _)| e == c))
        {
            return Err(ArenaError::UnregisteredCategory(missing));
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, category: Category) -> Option<MaskPair> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, m)| *m)
    }

    /// Masks for a category, falling back to empty masks if unregistered
    pub fn masks(&self, category: Category) -> MaskPair {
        self.lookup(category).unwrap_or_else(|| {
            log::error!("No masks registered for {:?}, using empty masks", category);
            MaskPair::default()
        })
    }
}

impl Default for CollisionMatrix {
    fn default() -> Self {
        Self {
            entries: Self::DEFAULT_TABLE.to_vec(),
        }
    }
}
