//! Andrew's monotone chain scan.
//!
//! Lexicographic sort, then a lower and an upper chain built with a
//! backtracking stack. The pop test is strictly `cross > 0.0`, so exactly
//! collinear triples are kept on the chain — the deliberate asymmetry from
//! the naive algorithm's tie rule.
//!
//! Each chain's edges are promoted to hull status when the chain completes.
//! The edge collection is keyed symmetrically, so the second chain can walk
//! through vertices the first chain already connected: its pops therefore
//! remove trial edges only, never a finished chain's hull edge.

use std::cmp::Ordering;

use crate::kernel::{cross, vector};
use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::{Step, StepOutcome, Steppable};

enum Phase {
    Label,
    Sort,
    Scan,
    ChainDone,
    Finish,
    Done,
}

pub struct MonotoneChain {
    phase: Phase,
    order: Vec<usize>,
    k: usize,
    stack: Vec<usize>,
    // false = upper chain (scanned left to right), true = lower chain
    rev: bool,
}

impl MonotoneChain {
    pub fn new() -> Self {
        Self {
            phase: Phase::Label,
            order: Vec::new(),
            k: 0,
            stack: Vec::new(),
            rev: false,
        }
    }

    fn candidate(&self) -> usize {
        if self.rev {
            self.order[self.order.len() - 1 - self.k]
        } else {
            self.order[self.k]
        }
    }
}

impl Default for MonotoneChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Steppable for MonotoneChain {
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
                    self.phase = Phase::Sort;
                    return StepOutcome::Yield(Step::new(format!("labeled {n} points")));
                }
                Phase::Sort => {
                    self.order = (0..n).collect();
                    self.order.sort_by(|&a, &b| {
                        let pa = scene.pos(a);
                        let pb = scene.pos(b);
                        match pa.x.partial_cmp(&pb.x).unwrap_or(Ordering::Equal) {
                            Ordering::Equal => pa.y.partial_cmp(&pb.y).unwrap_or(Ordering::Equal),
                            o => o,
                        }
                    });
                    self.k = 0;
                    self.rev = false;
                    self.stack.clear();
                    self.phase = Phase::Scan;
                    return StepOutcome::Yield(Step::new("sorted points lexicographically"));
                }
                Phase::Scan => {
                    if self.k >= n {
                        self.phase = Phase::ChainDone;
                        continue;
                    }
                    let cand = self.candidate();
                    if self.stack.len() >= 2 {
                        let a = self.stack[self.stack.len() - 2];
                        let b = self.stack[self.stack.len() - 1];
                        let pa = scene.pos(a);
                        let t = cross(vector(pa, scene.pos(b)), vector(pa, scene.pos(cand)));
                        if t > 0.0 {
                            self.stack.pop();
                            if scene.edge_status(a, b) == Some(EdgeStatus::Trial) {
                                scene.remove_edge(a, b);
                            }
                            scene.set_role(b, Role::Rejected);
                            return StepOutcome::Yield(Step::new(format!(
                                "popped point {b}, ({a}, {b}, {cand}) turns left"
                            )));
                        }
                    }
                    if let Some(&top) = self.stack.last() {
                        if scene.edge_status(top, cand) != Some(EdgeStatus::Hull) {
                            scene.insert_edge(top, cand, EdgeStatus::Trial);
                        }
                    }
                    self.stack.push(cand);
                    scene.set_role(cand, Role::Candidate);
                    self.k += 1;
                    return StepOutcome::Yield(Step::new(format!("pushed point {cand}")));
                }
                Phase::ChainDone => {
                    for &p in &self.stack {
                        scene.set_role(p, Role::Accepted);
                    }
                    scene.finalize_edges();
                    let len = self.stack.len();
                    if self.rev {
                        self.phase = Phase::Finish;
                        return StepOutcome::Yield(Step::new(format!(
                            "lower chain complete with {len} points"
                        )));
                    }
                    self.rev = true;
                    self.k = 0;
                    self.stack.clear();
                    self.phase = Phase::Scan;
                    return StepOutcome::Yield(Step::new(format!(
                        "upper chain complete with {len} points"
                    )));
                }
                Phase::Finish => {
                    self.phase = Phase::Done;
                    return StepOutcome::Yield(Step::new(format!(
                        "hull closed with {} edges",
                        scene.edge_count()
                    )));
                }
                Phase::Done => return StepOutcome::Done,
            }
        }
    }
}
