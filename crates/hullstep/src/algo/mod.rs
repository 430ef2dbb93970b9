//! The six scan-and-partition hull strategies.
//!
//! Each one is an explicit state machine implementing
//! [`Steppable`](crate::step::Steppable) over a shared
//! [`Scene`](crate::scene::Scene); the Kirkpatrick–Seidel engine lives in
//! [`crate::ks`].

mod chain;
mod graham;
mod naive;
mod quickhull;
mod wrap;

pub use chain::MonotoneChain;
pub use graham::Graham;
pub use naive::Naive;
pub use quickhull::QuickHull;
pub use wrap::GiftWrap;

#[cfg(test)]
mod tests;
