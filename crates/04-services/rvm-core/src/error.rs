use rvm_abi::Material;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The item generator produced an item without a material.
    #[error("item has no material; the item generator is broken")]
    MissingMaterial,

    /// A ledger write was attempted on a pile that is already full.
    #[error("{0} pile is full")]
    PileFull(Material),

    #[error("pile limit for {material} must be greater than zero")]
    InvalidLimit { material: Material },
}
