use thiserror::Error;

/// Rejected cache geometry. Construction fails and no model is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("block_size must be positive")]
    ZeroBlockSize,
    #[error("associativity must be positive")]
    ZeroAssociativity,
    #[error("associativity {associativity} exceeds the supported maximum of {max} ways")]
    OversizedAssociativity { associativity: usize, max: usize },
    #[error("cache_size {cache_size} is not a multiple of block_size {block_size}")]
    UnalignedCacheSize { cache_size: usize, block_size: usize },
    #[error("{num_blocks} blocks cannot be split into sets of {associativity}")]
    UnalignedSets { num_blocks: usize, associativity: usize },
    #[error("geometry yields zero sets")]
    NoSets,
}

/// An address the model refuses to decode. The failing access leaves
/// every set untouched; the caller may continue with later addresses.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("negative address: {0}")]
pub struct AddressError(pub i64);
