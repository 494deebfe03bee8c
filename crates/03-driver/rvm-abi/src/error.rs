use thiserror::Error;

use crate::Material;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("invalid item size: {size_ml} ml is not a standard {material} size")]
    InvalidSize { material: Material, size_ml: u32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown charity index {index} (catalog has {len})")]
    UnknownIndex { index: usize, len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed amount {0:?}: expected a non-negative decimal with at most two places")]
pub struct ParseMoneyError(pub String);
