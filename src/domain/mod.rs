// Market data domain
pub mod market;

// Chan structural elements
pub mod structure;

// Domain-specific error types
pub mod errors;
