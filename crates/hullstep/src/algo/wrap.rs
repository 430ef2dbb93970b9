//! Gift wrapping (Jarvis march): O(n·h).
//!
//! From an extreme starting point, each round sweeps the remaining points
//! (never re-probing the standing candidate), flipping the best candidate
//! whenever the probe is not strictly right of the current segment; the
//! survivor has every other point on one side and is the next hull vertex.

use crate::kernel::{cross, vector};
use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::{Step, StepOutcome, Steppable};

enum Phase {
    Label,
    Start,
    Sweep,
    Accept,
    Finish,
    Done,
}

pub struct GiftWrap {
    phase: Phase,
    start: usize,
    current: usize,
    best: usize,
    k: usize,
}

impl GiftWrap {
    pub fn new() -> Self {
        Self {
            phase: Phase::Label,
            start: 0,
            current: 0,
            best: 0,
            k: 0,
        }
    }

    /// Smallest index among the four axis extremes (x-min, x-max, y-min,
    /// y-max), each resolved first-wins on exact ties.
    fn starting_point(scene: &Scene) -> usize {
        let n = scene.len();
        let mut ext = [0usize; 4];
        for p in 1..n {
            let q = scene.pos(p);
            if q.x < scene.pos(ext[0]).x {
                ext[0] = p;
            }
            if q.x > scene.pos(ext[1]).x {
                ext[1] = p;
            }
            if q.y < scene.pos(ext[2]).y {
                ext[2] = p;
            }
            if q.y > scene.pos(ext[3]).y {
                ext[3] = p;
            }
        }
        ext.sort_unstable();
        ext[0]
    }

    fn begin_sweep(&mut self) {
        self.best = if self.current == 0 { 1 } else { 0 };
        self.k = 0;
    }
}

impl Default for GiftWrap {
    fn default() -> Self {
        Self::new()
    }
}

impl Steppable for GiftWrap {
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
                    self.phase = Phase::Start;
                    return StepOutcome::Yield(Step::new(format!("labeled {n} points")));
                }
                Phase::Start => {
                    self.start = Self::starting_point(scene);
                    self.current = self.start;
                    scene.set_role(self.start, Role::Pivot);
                    self.begin_sweep();
                    self.phase = Phase::Sweep;
                    return StepOutcome::Yield(Step::new(format!(
                        "starting at extreme point {}",
                        self.start
                    )));
                }
                Phase::Sweep => {
                    while self.k < n && (self.k == self.current || self.k == self.best) {
                        self.k += 1;
                    }
                    if self.k >= n {
                        self.phase = Phase::Accept;
                        continue;
                    }
                    let cur = scene.pos(self.current);
                    let c = cross(
                        vector(cur, scene.pos(self.best)),
                        vector(cur, scene.pos(self.k)),
                    );
                    let probed = self.k;
                    self.k += 1;
                    if c >= 0.0 {
                        let old = self.best;
                        if scene.role(old) == Role::Candidate {
                            scene.set_role(old, Role::Neutral);
                        }
                        self.best = probed;
                        scene.set_role(probed, Role::Candidate);
                        return StepOutcome::Yield(Step::new(format!(
                            "point {probed} replaces {old} as sweep candidate"
                        )));
                    }
                    return StepOutcome::Yield(Step::new(format!(
                        "point {probed} keeps {} as sweep candidate",
                        self.best
                    )));
                }
                Phase::Accept => {
                    let (from, to) = (self.current, self.best);
                    scene.insert_edge(from, to, EdgeStatus::Hull);
                    scene.set_role(to, Role::Accepted);
                    self.current = to;
                    if to == self.start {
                        self.phase = Phase::Finish;
                    } else {
                        self.begin_sweep();
                        self.phase = Phase::Sweep;
                    }
                    return StepOutcome::Yield(Step::new(format!(
                        "accepted hull edge ({from}, {to})"
                    )));
                }
                Phase::Finish => {
                    self.phase = Phase::Done;
                    return StepOutcome::Yield(Step::new(format!(
                        "hull closed at point {}",
                        self.start
                    )));
                }
                Phase::Done => return StepOutcome::Done,
            }
        }
    }
}
