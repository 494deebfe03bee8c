//! Random item generator standing in for the intake sensor.
//!
//! Every item gets a material, a standard container size for that material,
//! the redemption value that size earns, and a wrinkled/normal status.

#![allow(missing_docs)]

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rvm_abi::{Item, ItemError, ItemSource, ItemStatus, Material, Money};

/// Default share of generated items that come out wrinkled.
pub const DEFAULT_WRINKLE_RATIO: f64 = 0.5;

pub const ALUMINIUM_SIZES_ML: &[u32] = &[250, 330, 500];
pub const GLASS_SIZES_ML: &[u32] = &[250, 330, 500, 750, 1000, 1500, 2000];
pub const PLASTIC_SIZES_ML: &[u32] = &[330, 500, 950, 1500, 2000];

/// Standard container sizes accepted for `material`.
pub fn standard_sizes(material: Material) -> &'static [u32] {
    match material {
        Material::Aluminium => ALUMINIUM_SIZES_ML,
        Material::Glass => GLASS_SIZES_ML,
        Material::Plastic => PLASTIC_SIZES_ML,
    }
}

/// Redemption value of a container, or `InvalidSize` for a non-standard size.
pub fn redemption_value(material: Material, size_ml: u32) -> Result<Money, ItemError> {
    if !standard_sizes(material).contains(&size_ml) {
        return Err(ItemError::InvalidSize { material, size_ml });
    }
    let cents = match material {
        Material::Aluminium => 15,
        Material::Glass if size_ml < 1000 => 10,
        Material::Glass => 40,
        Material::Plastic if size_ml <= 350 => 10,
        Material::Plastic if size_ml <= 1000 => 20,
        Material::Plastic => 40,
    };
    Ok(Money::from_cents(cents))
}

/// Builds a normal item of a given material and size.
pub fn make_item(material: Material, size_ml: u32) -> Result<Item, ItemError> {
    Ok(Item::new(material, size_ml, redemption_value(material, size_ml)?))
}

/// [`ItemSource`] backed by a seedable RNG.
#[derive(Debug)]
pub struct ItemGenerator {
    rng: StdRng,
    wrinkle_ratio: f64,
}

impl ItemGenerator {
    /// Generator seeded from OS entropy.
    pub fn new(wrinkle_ratio: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), wrinkle_ratio)
    }

    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64, wrinkle_ratio: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), wrinkle_ratio)
    }

    fn with_rng(rng: StdRng, wrinkle_ratio: f64) -> Self {
        let wrinkle_ratio = if wrinkle_ratio.is_nan() {
            0.0
        } else {
            wrinkle_ratio.clamp(0.0, 1.0)
        };
        Self { rng, wrinkle_ratio }
    }

    pub fn wrinkle_ratio(&self) -> f64 {
        self.wrinkle_ratio
    }

    /// Fills a tray with `count` items.
    pub fn tray(&mut self, count: usize) -> Result<Vec<Item>, ItemError> {
        (0..count).map(|_| self.create_item()).collect()
    }
}

impl ItemSource for ItemGenerator {
    fn create_item(&mut self) -> Result<Item, ItemError> {
        let material = Material::ALL[self.rng.gen_range(0..Material::ALL.len())];
        let sizes = standard_sizes(material);
        let size_ml = sizes[self.rng.gen_range(0..sizes.len())];
        let status = if self.rng.gen_bool(self.wrinkle_ratio) {
            ItemStatus::Wrinkled
        } else {
            ItemStatus::Normal
        };
        let item = make_item(material, size_ml)?.with_status(status);
        debug!("generated {material} {size_ml} ml ({status:?}) worth {}", item.value);
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_table() {
        let cents = |m, s| redemption_value(m, s).map(Money::cents);
        assert_eq!(cents(Material::Aluminium, 250), Ok(15));
        assert_eq!(cents(Material::Aluminium, 500), Ok(15));
        assert_eq!(cents(Material::Glass, 750), Ok(10));
        assert_eq!(cents(Material::Glass, 1000), Ok(40));
        assert_eq!(cents(Material::Plastic, 330), Ok(10));
        assert_eq!(cents(Material::Plastic, 950), Ok(20));
        assert_eq!(cents(Material::Plastic, 1500), Ok(40));
    }

    #[test]
    fn non_standard_size_is_invalid() {
        assert_eq!(
            make_item(Material::Aluminium, 750),
            Err(ItemError::InvalidSize {
                material: Material::Aluminium,
                size_ml: 750
            })
        );
    }

    #[test]
    fn seeded_generators_agree() {
        let a = ItemGenerator::seeded(7, 0.5).tray(16).expect("valid sizes");
        let b = ItemGenerator::seeded(7, 0.5).tray(16).expect("valid sizes");
        assert_eq!(a, b);
    }

    #[test]
    fn ratio_bounds_control_wrinkles() {
        let never = ItemGenerator::seeded(1, 0.0).tray(32).expect("valid sizes");
        assert!(never.iter().all(|item| !item.is_wrinkled()));
        let always = ItemGenerator::seeded(1, 1.0).tray(32).expect("valid sizes");
        assert!(always.iter().all(Item::is_wrinkled));
    }

    #[test]
    fn generated_items_use_standard_sizes() {
        let mut generator = ItemGenerator::seeded(42, 0.3);
        for _ in 0..64 {
            let item = generator.create_item().expect("valid size");
            let material = item.material.expect("material set");
            assert!(standard_sizes(material).contains(&item.size_ml));
            assert_eq!(redemption_value(material, item.size_ml), Ok(item.value));
        }
    }

    #[test]
    fn out_of_range_ratio_is_clamped() {
        assert_eq!(ItemGenerator::seeded(0, 3.0).wrinkle_ratio(), 1.0);
        assert_eq!(ItemGenerator::seeded(0, f64::NAN).wrinkle_ratio(), 0.0);
    }
}
