//! Graham scan.
//!
//! The minimum-x point becomes the pivot and is swapped into array slot 0
//! (identities are index-based, so the swap is presentation-only). The rest
//! are sorted by polar angle around the pivot — cross product as the primary
//! comparator, nearer-first on collinear ties — and scanned with the same
//! backtracking stack spirit as the monotone chain, closing back to the
//! pivot at the end.

use std::cmp::Ordering;

use crate::kernel::{cross, vector};
use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::{Step, StepOutcome, Steppable};

enum Phase {
    Label,
    Pivot,
    Sort,
    Scan,
    Close,
    Finish,
    Done,
}

pub struct Graham {
    phase: Phase,
    pivot: usize,
    order: Vec<usize>,
    k: usize,
    stack: Vec<usize>,
}

impl Graham {
    pub fn new() -> Self {
        Self {
            phase: Phase::Label,
            pivot: 0,
            order: Vec::new(),
            k: 0,
            stack: Vec::new(),
        }
    }
}

impl Default for Graham {
    fn default() -> Self {
        Self::new()
    }
}

impl Steppable for Graham {
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
                    self.phase = Phase::Pivot;
                    return StepOutcome::Yield(Step::new(format!("labeled {n} points")));
                }
                Phase::Pivot => {
                    let mut slot = 0;
                    for s in 1..n {
                        let p = scene.pos(scene.index_at(s));
                        let q = scene.pos(scene.index_at(slot));
                        if p.x < q.x || (p.x == q.x && p.y < q.y) {
                            slot = s;
                        }
                    }
                    scene.swap(0, slot);
                    self.pivot = scene.index_at(0);
                    scene.set_role(self.pivot, Role::Pivot);
                    self.phase = Phase::Sort;
                    return StepOutcome::Yield(Step::new(format!(
                        "pivot {} moved to front",
                        self.pivot
                    )));
                }
                Phase::Sort => {
                    let pivot = self.pivot;
                    let pp = scene.pos(pivot);
                    self.order = (1..n).map(|s| scene.index_at(s)).collect();
                    self.order.sort_by(|&a, &b| {
                        let va = vector(pp, scene.pos(a));
                        let vb = vector(pp, scene.pos(b));
                        let c = cross(va, vb);
                        if c > 0.0 {
                            Ordering::Less
                        } else if c < 0.0 {
                            Ordering::Greater
                        } else {
                            // collinear with the pivot: nearer first
                            va.norm_squared()
                                .partial_cmp(&vb.norm_squared())
                                .unwrap_or(Ordering::Equal)
                        }
                    });
                    self.stack.clear();
                    self.stack.push(pivot);
                    self.k = 0;
                    self.phase = Phase::Scan;
                    return StepOutcome::Yield(Step::new(format!(
                        "sorted by polar angle around {pivot}"
                    )));
                }
                Phase::Scan => {
                    if self.k >= self.order.len() {
                        self.phase = Phase::Close;
                        continue;
                    }
                    let cand = self.order[self.k];
                    if self.stack.len() >= 2 {
                        let a = self.stack[self.stack.len() - 2];
                        let b = self.stack[self.stack.len() - 1];
                        let pa = scene.pos(a);
                        let t = cross(vector(pa, scene.pos(b)), vector(pa, scene.pos(cand)));
                        if t <= 0.0 {
                            self.stack.pop();
                            scene.remove_edge(a, b);
                            scene.set_role(b, Role::Rejected);
                            return StepOutcome::Yield(Step::new(format!(
                                "popped point {b}, ({a}, {b}, {cand}) does not turn left"
                            )));
                        }
                    }
                    if let Some(&top) = self.stack.last() {
                        scene.insert_edge(top, cand, EdgeStatus::Trial);
                    }
                    self.stack.push(cand);
                    scene.set_role(cand, Role::Candidate);
                    self.k += 1;
                    return StepOutcome::Yield(Step::new(format!("pushed point {cand}")));
                }
                Phase::Close => {
                    let last = match self.stack.last() {
                        Some(&p) => p,
                        None => {
                            self.phase = Phase::Done;
                            return StepOutcome::Done;
                        }
                    };
                    scene.insert_edge(last, self.pivot, EdgeStatus::Trial);
                    self.phase = Phase::Finish;
                    return StepOutcome::Yield(Step::new(format!(
                        "connected {last} back to pivot {}",
                        self.pivot
                    )));
                }
                Phase::Finish => {
                    for &p in &self.stack {
                        scene.set_role(p, Role::Accepted);
                    }
                    scene.finalize_edges();
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
