//! Energy saved by a recycler's lifetime totals.

use rvm_abi::Material;

use crate::RecyclerTotals;

/// Kilowatt-hours in one megajoule.
pub const KWH_PER_MJ: f64 = 0.27778;

/// Which figure the recycler asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcoStat {
    Aluminium,
    Glass,
    Plastic,
    Total,
}

impl EcoStat {
    pub const ALL: [EcoStat; 4] = [
        EcoStat::Aluminium,
        EcoStat::Glass,
        EcoStat::Plastic,
        EcoStat::Total,
    ];

    /// Maps a 1-based menu choice.
    pub fn from_choice(choice: u32) -> Option<Self> {
        let idx = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            EcoStat::Aluminium => "aluminium cans",
            EcoStat::Glass => "glass bottles",
            EcoStat::Plastic => "plastic bottles",
            EcoStat::Total => "all items",
        }
    }

    /// Energy saved in kWh, rounded up to four decimals.
    pub fn energy_saved_kwh(self, totals: &RecyclerTotals) -> f64 {
        let mj = match self {
            EcoStat::Aluminium => per_material_mj(Material::Aluminium, totals),
            EcoStat::Glass => per_material_mj(Material::Glass, totals),
            EcoStat::Plastic => per_material_mj(Material::Plastic, totals),
            EcoStat::Total => Material::ALL
                .into_iter()
                .map(|m| per_material_mj(m, totals))
                .sum(),
        };
        ceil_4(mj * KWH_PER_MJ)
    }
}

/// Production energy minus recycling energy, per item.
fn saved_mj_per_item(material: Material) -> f64 {
    match material {
        Material::Aluminium => 1.5 - 0.075,
        Material::Glass => 0.9,
        Material::Plastic => 1.2,
    }
}

fn per_material_mj(material: Material, totals: &RecyclerTotals) -> f64 {
    saved_mj_per_item(material) * totals.count(material) as f64
}

fn ceil_4(value: f64) -> f64 {
    (value * 10_000.0).ceil() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> RecyclerTotals {
        RecyclerTotals {
            aluminium_cans: 10,
            glass_bottles: 2,
            plastic_bottles: 5,
            total_items: 17,
            ..RecyclerTotals::default()
        }
    }

    #[test]
    fn per_material_figures() {
        let totals = totals();
        assert!((EcoStat::Aluminium.energy_saved_kwh(&totals) - 3.9584).abs() < 1e-9);
        assert!((EcoStat::Glass.energy_saved_kwh(&totals) - 0.5001).abs() < 1e-9);
        assert!((EcoStat::Plastic.energy_saved_kwh(&totals) - 1.6667).abs() < 1e-9);
    }

    #[test]
    fn total_is_sum_of_parts_before_rounding() {
        let kwh = EcoStat::Total.energy_saved_kwh(&totals());
        // (14.25 + 1.8 + 6.0) MJ = 22.05 MJ
        assert!((kwh - 6.1251).abs() < 1e-9);
    }

    #[test]
    fn menu_choices() {
        assert_eq!(EcoStat::from_choice(1), Some(EcoStat::Aluminium));
        assert_eq!(EcoStat::from_choice(4), Some(EcoStat::Total));
        assert_eq!(EcoStat::from_choice(0), None);
        assert_eq!(EcoStat::from_choice(5), None);
    }

    #[test]
    fn no_items_saves_nothing() {
        assert_eq!(EcoStat::Total.energy_saved_kwh(&RecyclerTotals::default()), 0.0);
    }
}
