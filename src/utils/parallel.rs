//! Conditional parallel iteration.
//!
//! With the `parallel` feature the bulk operations fan out over Rayon; without it
//! the same call sites run serially through shim traits that mirror the Rayon
//! surface actually used by this crate.

#[cfg(feature = "parallel")]
pub use rayon::prelude::{IntoParallelIterator, ParallelIterator};

#[cfg(not(feature = "parallel"))]
pub use self::fallback::*;

#[cfg(not(feature = "parallel"))]
mod fallback {
    pub use std::iter::Iterator as ParallelIterator;

    /// Shim trait to allow `into_par_iter()` on types that implement `IntoIterator`.
    pub trait IntoParallelIterator {
        type Item;
        type Iter: Iterator<Item = Self::Item>;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Item = I::Item;
        type Iter = I::IntoIter;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}
