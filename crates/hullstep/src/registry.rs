//! Hull registry and driver.
//!
//! The registry exposes each algorithm under a stable name and constructs
//! its steppable computation; the driver mediates one computation at a time
//! over one scene, counting moves, snapshotting the terminal edge
//! collection, and resetting the scene on completion or cancellation.
//! Pacing between steps is entirely the caller's concern.

use std::fmt;

use crate::algo::{GiftWrap, Graham, MonotoneChain, Naive, QuickHull};
use crate::ks::KirkpatrickSeidel;
use crate::scene::{trace_cycle, Scene};
use crate::step::{Step, StepOutcome, Steppable};

/// The seven registered strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Naive,
    SmartNaive,
    GiftWrapping,
    QuickHull,
    MonotoneChain,
    GrahamScan,
    KirkpatrickSeidel,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Naive,
        Algorithm::SmartNaive,
        Algorithm::GiftWrapping,
        Algorithm::QuickHull,
        Algorithm::MonotoneChain,
        Algorithm::GrahamScan,
        Algorithm::KirkpatrickSeidel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::SmartNaive => "smart-naive",
            Algorithm::GiftWrapping => "gift-wrapping",
            Algorithm::QuickHull => "quickhull",
            Algorithm::MonotoneChain => "monotone-chain",
            Algorithm::GrahamScan => "graham-scan",
            Algorithm::KirkpatrickSeidel => "kirkpatrick-seidel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Construct the steppable computation. Only Kirkpatrick–Seidel consumes
    /// the seed; every other strategy is deterministic.
    pub fn build(self, seed: u64) -> Box<dyn Steppable> {
        match self {
            Algorithm::Naive => Box::new(Naive::new()),
            Algorithm::SmartNaive => Box::new(Naive::smart()),
            Algorithm::GiftWrapping => Box::new(GiftWrap::new()),
            Algorithm::QuickHull => Box::new(QuickHull::new()),
            Algorithm::MonotoneChain => Box::new(MonotoneChain::new()),
            Algorithm::GrahamScan => Box::new(Graham::new()),
            Algorithm::KirkpatrickSeidel => Box::new(KirkpatrickSeidel::new(seed)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal edge collection of a completed run.
#[derive(Clone, Debug, Default)]
pub struct HullResult {
    pub edges: Vec<(usize, usize)>,
}

impl HullResult {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sorted indices of all hull vertices.
    pub fn vertices(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    /// The edges traced as one simple cycle; `None` if they do not close.
    pub fn cycle(&self) -> Option<Vec<usize>> {
        trace_cycle(&self.edges)
    }
}

/// Runs one steppable computation at a time over its scene.
pub struct Driver {
    scene: Scene,
    current: Option<Box<dyn Steppable>>,
    moves: usize,
    result: Option<HullResult>,
}

impl Driver {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            current: None,
            moves: 0,
            result: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Moves performed by the current (or last finished) run.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Result of the last completed run, if any. Cancellation clears it.
    pub fn last_result(&self) -> Option<&HullResult> {
        self.result.as_ref()
    }

    /// Begin a fresh run, discarding any partial state of a cancelled one.
    pub fn start(&mut self, algo: Algorithm, seed: u64) {
        self.scene.reset();
        self.current = Some(algo.build(seed));
        self.moves = 0;
        self.result = None;
    }

    /// Advance one step. `None` means the computation completed: the
    /// terminal edges are snapshotted into `last_result` and the scene is
    /// reset.
    pub fn step(&mut self) -> Option<Step> {
        let machine = self.current.as_mut()?;
        match machine.advance(&mut self.scene) {
            StepOutcome::Yield(step) => {
                self.moves += 1;
                Some(step)
            }
            StepOutcome::Done => {
                self.result = Some(HullResult {
                    edges: self.scene.hull_edges(),
                });
                self.scene.reset();
                self.current = None;
                None
            }
        }
    }

    /// Cooperative cancellation: stop calling the machine and clean up the
    /// scene. Whatever partial state the run left behind is wiped.
    pub fn cancel(&mut self) {
        self.current = None;
        self.result = None;
        self.scene.reset();
    }

    /// Pump to completion, feeding every step to `sink`; returns the move
    /// count.
    pub fn run_to_end(&mut self, mut sink: impl FnMut(&Step)) -> usize {
        while let Some(step) = self.step() {
            sink(&step);
        }
        self.moves
    }
}

/// One-shot convenience: run `algo` over `positions` and return the result.
pub fn compute_hull(
    positions: &[nalgebra::Vector2<f64>],
    algo: Algorithm,
    seed: u64,
) -> HullResult {
    let mut driver = Driver::new(Scene::new(positions));
    driver.start(algo, seed);
    driver.run_to_end(|_| {});
    driver.result.unwrap_or_default()
}
