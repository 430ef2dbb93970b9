//! Naive O(n²·n) hull search, plus the pruned "smart" variant.
//!
//! Every unordered pair `(i, j)` is tested by classifying all other points
//! against the line through it; the pair is a hull edge iff one side stays
//! empty. The smart variant abandons a pair the moment both sides are
//! populated.

use crate::kernel::{cross, vector};
use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::{Step, StepOutcome, Steppable};

enum Phase {
    Label,
    OpenPair,
    Classify,
    ClosePair { accepted: bool },
    Finish,
    Done,
}

pub struct Naive {
    smart: bool,
    phase: Phase,
    i: usize,
    j: usize,
    k: usize,
    left: usize,
    right: usize,
    saved: Vec<Role>,
}

impl Naive {
    pub fn new() -> Self {
        Self::with_pruning(false)
    }

    /// Identical algorithm, but a pair is abandoned as soon as it is
    /// disproven, with one extra step announcing the early exit.
    pub fn smart() -> Self {
        Self::with_pruning(true)
    }

    fn with_pruning(smart: bool) -> Self {
        Self {
            smart,
            phase: Phase::Label,
            i: 0,
            j: 0,
            k: 0,
            left: 0,
            right: 0,
            saved: Vec::new(),
        }
    }
}

impl Default for Naive {
    fn default() -> Self {
        Self::new()
    }
}

impl Steppable for Naive {
    fn advance(&mut self, scene: &mut Scene) -> StepOutcome {
        let n = scene.len();
        loop {
            match self.phase {
                Phase::Label => {
                    if n < 3 {
                        self.phase = Phase::Done;
                        return StepOutcome::Done;
                    }
                    scene.assign_numbers();
                    self.i = 0;
                    self.j = 1;
                    self.phase = Phase::OpenPair;
                    return StepOutcome::Yield(Step::new(format!("labeled {n} points")));
                }
                Phase::OpenPair => {
                    if self.j >= n {
                        self.i += 1;
                        self.j = self.i + 1;
                    }
                    if self.i >= n - 1 {
                        self.phase = Phase::Finish;
                        continue;
                    }
                    self.saved = (0..n).map(|p| scene.role(p)).collect();
                    scene.insert_edge(self.i, self.j, EdgeStatus::Trial);
                    scene.set_role(self.i, Role::Pivot);
                    scene.set_role(self.j, Role::Pivot);
                    self.left = 0;
                    self.right = 0;
                    self.k = 0;
                    self.phase = Phase::Classify;
                    return StepOutcome::Yield(Step::new(format!(
                        "testing edge ({}, {})",
                        self.i, self.j
                    )));
                }
                Phase::Classify => {
                    while self.k < n && (self.k == self.i || self.k == self.j) {
                        self.k += 1;
                    }
                    if self.k >= n {
                        let accepted = self.left == 0 || self.right == 0;
                        self.phase = Phase::ClosePair { accepted };
                        continue;
                    }
                    if self.smart && self.left > 0 && self.right > 0 {
                        self.phase = Phase::ClosePair { accepted: false };
                        return StepOutcome::Yield(Step::new(format!(
                            "edge ({}, {}) disproven, skipping remaining points",
                            self.i, self.j
                        )));
                    }
                    let base = vector(scene.pos(self.i), scene.pos(self.j));
                    let c = cross(base, vector(scene.pos(self.i), scene.pos(self.k)));
                    if c > 0.0 {
                        scene.set_role(self.k, Role::Left);
                        self.left += 1;
                    } else {
                        scene.set_role(self.k, Role::Right);
                        self.right += 1;
                    }
                    let classified = self.k;
                    self.k += 1;
                    return StepOutcome::Yield(Step::new(format!(
                        "classified point {classified}"
                    )));
                }
                Phase::ClosePair { accepted } => {
                    scene.remove_edge(self.i, self.j);
                    for (p, &role) in self.saved.iter().enumerate() {
                        scene.set_role(p, role);
                    }
                    let (pi, pj) = (self.i, self.j);
                    self.j += 1;
                    self.phase = Phase::OpenPair;
                    if accepted {
                        scene.set_role(pi, Role::Accepted);
                        scene.set_role(pj, Role::Accepted);
                        scene.insert_edge(pi, pj, EdgeStatus::Hull);
                        return StepOutcome::Yield(Step::new(format!("found edge ({pi}, {pj})")));
                    }
                }
                Phase::Finish => {
                    self.phase = Phase::Done;
                    return StepOutcome::Yield(Step::new("search complete"));
                }
                Phase::Done => return StepOutcome::Done,
            }
        }
    }
}
