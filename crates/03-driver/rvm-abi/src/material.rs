use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Recyclable material, one per pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    Aluminium,
    Glass,
    Plastic,
}

impl Material {
    /// Every material in the stable order used for reporting.
    pub const ALL: [Material; 3] = [Material::Aluminium, Material::Glass, Material::Plastic];

    /// Upper-case pile name.
    pub fn name(self) -> &'static str {
        match self {
            Material::Aluminium => "ALUMINIUM",
            Material::Glass => "GLASS",
            Material::Plastic => "PLASTIC",
        }
    }

    /// Human label for the container kind.
    pub fn container_label(self) -> &'static str {
        match self {
            Material::Aluminium => "Aluminium Cans",
            Material::Glass => "Glass Bottles",
            Material::Plastic => "Plastic Bottles",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size map keyed by [`Material`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialMap<T> {
    pub aluminium: T,
    pub glass: T,
    pub plastic: T,
}

impl<T> MaterialMap<T> {
    /// Builds a map by evaluating `f` once per material.
    pub fn from_fn(mut f: impl FnMut(Material) -> T) -> Self {
        Self {
            aluminium: f(Material::Aluminium),
            glass: f(Material::Glass),
            plastic: f(Material::Plastic),
        }
    }

    /// Iterates entries in [`Material::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Material, &T)> {
        Material::ALL.into_iter().map(move |m| (m, &self[m]))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [&mut self.aluminium, &mut self.glass, &mut self.plastic].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> MaterialMap<U> {
        MaterialMap::from_fn(|m| f(&self[m]))
    }
}

impl<T: Clone> MaterialMap<T> {
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl MaterialMap<u32> {
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, n)| u64::from(*n)).sum()
    }
}

impl<T> Index<Material> for MaterialMap<T> {
    type Output = T;

    fn index(&self, material: Material) -> &T {
        match material {
            Material::Aluminium => &self.aluminium,
            Material::Glass => &self.glass,
            Material::Plastic => &self.plastic,
        }
    }
}

impl<T> IndexMut<Material> for MaterialMap<T> {
    fn index_mut(&mut self, material: Material) -> &mut T {
        match material {
            Material::Aluminium => &mut self.aluminium,
            Material::Glass => &mut self.glass,
            Material::Plastic => &mut self.plastic,
        }
    }
}
