//! Stepwise planar convex hull algorithms.
//!
//! Six interchangeable strategies (naive, smart-naive, gift wrapping,
//! QuickHull, monotone chain, Graham scan) plus the randomized
//! Kirkpatrick–Seidel engine, all exposed through one cooperative stepping
//! contract: a computation advances one atomic decision at a time, mutating
//! a shared [`scene::Scene`] and narrating each step, so a driver can pause,
//! resume, or abandon it at any suspension point.
//!
//! Layout
//! - `kernel`: orientation/distance predicates shared by every strategy.
//! - `scene`, `step`: the shared mutable context and the stepping contract.
//! - `algo`, `ks`: the strategies themselves.
//! - `registry`: stable names, construction, and the pumping driver.
//! - `gen`: seeded general-position point sampler for callers and tests.

pub mod algo;
pub mod gen;
pub mod kernel;
pub mod ks;
pub mod registry;
pub mod scene;
pub mod step;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use registry::{compute_hull, Algorithm, Driver, HullResult};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::gen::{sample_points, SamplerCfg};
    pub use crate::kernel::{cross, distance, same_sign, vector};
    pub use crate::registry::{compute_hull, Algorithm, Driver, HullResult};
    pub use crate::scene::{Edge, EdgeKey, EdgeStatus, Point, Role, Scene};
    pub use crate::step::{Step, StepOutcome, Steppable};
    pub use nalgebra::Vector2 as Vec2;
}
