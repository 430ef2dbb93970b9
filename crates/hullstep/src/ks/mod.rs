//! Kirkpatrick–Seidel: randomized divide-and-conquer bridge finding,
//! expected O(n log n).
//!
//! Purpose
//! - Compute one hull chain (the upper one, supporting lines maximizing
//!   `y − K·x`) by recursively finding the hull edge a random vertical split
//!   crosses, then rerun with all y negated for the other chain. Scene
//!   coordinates are never mutated; the `flip` flag negates y on read.
//! - The recursion is an explicit frame stack: `connect` frames spawn
//!   `bridge` frames (and further `connect` frames), and the machine pumps
//!   whichever frame is on top, so the observer sees one flattened step
//!   sequence. A finished bridge leaves its result in the machine's return
//!   slot for the waiting parent frame.
//!
//! Las Vegas: the random pair pivot gives the expected bound; pathological
//! slope coincidences are not guarded against (caller precondition is
//! general position).

mod bridge;
mod connect;

#[cfg(test)]
mod tests;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::{Step, StepOutcome, Steppable};

use bridge::BridgeFrame;
use connect::ConnectFrame;

/// y as the engine sees it: the lower-chain pass mirrors the plane.
#[inline]
pub(crate) fn eff_y(scene: &Scene, p: usize, flip: bool) -> f64 {
    let y = scene.pos(p).y;
    if flip {
        -y
    } else {
        y
    }
}

pub(crate) enum Frame {
    Connect(ConnectFrame),
    Bridge(BridgeFrame),
}

/// One pump of the top frame.
pub(crate) enum FrameStep {
    /// Suspend with narration.
    Yield(Step),
    /// Spawn a child frame silently.
    Push(Frame),
    /// Spawn a child frame and suspend.
    PushYield(Frame, Step),
    /// Frame finished; value goes to the machine's return slot.
    Pop(Option<(usize, usize)>),
    /// Internal transition, keep pumping.
    Continue,
}

enum Phase {
    Label,
    ChainInit { flip: bool },
    Pump { flip: bool },
    Finish,
    Done,
}

pub struct KirkpatrickSeidel {
    phase: Phase,
    rng: StdRng,
    frames: Vec<Frame>,
    ret: Option<(usize, usize)>,
    span_upper: (usize, usize),
    span_lower: (usize, usize),
}

impl KirkpatrickSeidel {
    /// Fixed seed ⇒ identical step sequence on the same scene.
    pub fn new(seed: u64) -> Self {
        Self {
            phase: Phase::Label,
            rng: StdRng::seed_from_u64(seed),
            frames: Vec::new(),
            ret: None,
            span_upper: (0, 0),
            span_lower: (0, 0),
        }
    }

    /// Chain endpoints: x extremes, ties resolved toward the chain side.
    fn chain_span(scene: &Scene, flip: bool) -> (usize, usize) {
        let n = scene.len();
        let mut lo = 0;
        let mut hi = 0;
        for p in 1..n {
            let q = scene.pos(p);
            let l = scene.pos(lo);
            let h = scene.pos(hi);
            if q.x < l.x || (q.x == l.x && eff_y(scene, p, flip) > eff_y(scene, lo, flip)) {
                lo = p;
            }
            if q.x > h.x || (q.x == h.x && eff_y(scene, p, flip) > eff_y(scene, hi, flip)) {
                hi = p;
            }
        }
        (lo, hi)
    }
}

impl Steppable for KirkpatrickSeidel {
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
                    self.phase = Phase::ChainInit { flip: false };
                    return StepOutcome::Yield(Step::new(format!("labeled {n} points")));
                }
                Phase::ChainInit { flip } => {
                    let (lo, hi) = Self::chain_span(scene, flip);
                    if flip {
                        self.span_lower = (lo, hi);
                    } else {
                        self.span_upper = (lo, hi);
                    }
                    if lo == hi {
                        // all points share one x; nothing to connect
                        self.phase = if flip {
                            Phase::Finish
                        } else {
                            Phase::ChainInit { flip: true }
                        };
                        continue;
                    }
                    scene.set_role(lo, Role::Accepted);
                    scene.set_role(hi, Role::Accepted);
                    self.frames.push(Frame::Connect(ConnectFrame::new(
                        lo,
                        hi,
                        (0..n).collect(),
                        flip,
                    )));
                    let side = if flip { "lower" } else { "upper" };
                    self.phase = Phase::Pump { flip };
                    return StepOutcome::Yield(Step::new(format!(
                        "{side} chain spans ({lo}, {hi})"
                    )));
                }
                Phase::Pump { flip } => {
                    let top = match self.frames.last_mut() {
                        Some(f) => f,
                        None => {
                            self.phase = if flip {
                                Phase::Finish
                            } else {
                                Phase::ChainInit { flip: true }
                            };
                            continue;
                        }
                    };
                    let fs = match top {
                        Frame::Connect(f) => f.step(scene, &mut self.rng, &mut self.ret),
                        Frame::Bridge(f) => f.step(scene, &mut self.rng, &mut self.ret),
                    };
                    match fs {
                        FrameStep::Yield(s) => return StepOutcome::Yield(s),
                        FrameStep::Push(f) => self.frames.push(f),
                        FrameStep::PushYield(f, s) => {
                            self.frames.push(f);
                            return StepOutcome::Yield(s);
                        }
                        FrameStep::Pop(v) => {
                            self.frames.pop();
                            self.ret = v;
                        }
                        FrameStep::Continue => {}
                    }
                }
                Phase::Finish => {
                    // A tie on an extreme x leaves a vertical hull edge that
                    // belongs to neither chain; close it here.
                    let (ul, uh) = self.span_upper;
                    let (ll, lh) = self.span_lower;
                    if ul != ll {
                        scene.insert_edge(ul, ll, EdgeStatus::Hull);
                    }
                    if uh != lh {
                        scene.insert_edge(uh, lh, EdgeStatus::Hull);
                    }
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
