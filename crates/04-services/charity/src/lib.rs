//! Built-in list of charities offered at session close.

#![allow(missing_docs)]

use rvm_abi::{Charity, CharityCatalog};

/// Fixed catalog; menu numbers are 1-based positions in this list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticCatalog {
    charities: Vec<Charity>,
}

impl StaticCatalog {
    pub fn new(charities: Vec<Charity>) -> Self {
        Self { charities }
    }

    pub fn len(&self) -> usize {
        self.charities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charities.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(vec![
            Charity::new(
                "Greenpeace Fund",
                "Fights for environmental justice and for our planet.",
            ),
            Charity::new(
                "Amnesty International",
                "Helps to fight against human right abuses worldwide.",
            ),
            Charity::new(
                "Alzheimer's Association",
                "Fights against Alzheimer and all other dementia through global research.",
            ),
        ])
    }
}

impl CharityCatalog for StaticCatalog {
    fn charities(&self) -> &[Charity] {
        &self.charities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvm_abi::CatalogError;

    #[test]
    fn default_catalog_has_three_entries() {
        let catalog = StaticCatalog::default();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.resolve(1).map(|c| c.name.as_str()),
            Ok("Greenpeace Fund")
        );
        assert_eq!(
            catalog.resolve(3).map(|c| c.name.as_str()),
            Ok("Alzheimer's Association")
        );
        assert_eq!(
            catalog.resolve(4),
            Err(CatalogError::UnknownIndex { index: 4, len: 3 })
        );
    }
}
