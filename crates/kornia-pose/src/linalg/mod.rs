//! Fixed-size 3×3 factorizations that glam does not provide.

mod cholesky;
mod svd;

pub use cholesky::{cholesky3, lower_triangular_inverse};
pub use svd::{svd3, Svd3};
