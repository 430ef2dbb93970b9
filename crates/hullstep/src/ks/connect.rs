//! `connect`: find the bridge across a random split, partition, recurse.

use rand::rngs::StdRng;
use rand::Rng;

use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::Step;

use super::bridge::BridgeFrame;
use super::{Frame, FrameStep};

enum Phase {
    Split,
    AwaitBridge,
    Partition,
    SpawnLeft,
    SpawnRight,
    Finished,
}

pub(crate) struct ConnectFrame {
    lo: usize,
    hi: usize,
    set: Vec<usize>,
    flip: bool,
    split: f64,
    bridge: (usize, usize),
    left: Vec<usize>,
    right: Vec<usize>,
    phase: Phase,
}

impl ConnectFrame {
    pub(crate) fn new(lo: usize, hi: usize, set: Vec<usize>, flip: bool) -> Self {
        Self {
            lo,
            hi,
            set,
            flip,
            split: 0.0,
            bridge: (lo, hi),
            left: Vec::new(),
            right: Vec::new(),
            phase: Phase::Split,
        }
    }

    pub(crate) fn step(
        &mut self,
        scene: &mut Scene,
        rng: &mut StdRng,
        ret: &mut Option<(usize, usize)>,
    ) -> FrameStep {
        match self.phase {
            Phase::Split => {
                let mut xmin = f64::INFINITY;
                let mut xmax = f64::NEG_INFINITY;
                for &p in &self.set {
                    let x = scene.pos(p).x;
                    xmin = xmin.min(x);
                    xmax = xmax.max(x);
                }
                if !(xmax > xmin) {
                    return FrameStep::Pop(None);
                }
                let mut a = rng.gen_range(xmin..xmax);
                // keep the split strictly between the extremes
                let nudge = (xmax - xmin) * 1e-9;
                if a <= xmin {
                    a = xmin + nudge;
                }
                if a >= xmax {
                    a = xmax - nudge;
                }
                self.split = a;
                self.phase = Phase::AwaitBridge;
                FrameStep::PushYield(
                    Frame::Bridge(BridgeFrame::new(self.set.clone(), a, self.flip)),
                    Step::new(format!(
                        "searching bridge across x = {a:.3} over {} points",
                        self.set.len()
                    )),
                )
            }
            Phase::AwaitBridge => {
                let (i, j) = match ret.take() {
                    Some(b) => b,
                    None => return FrameStep::Pop(None),
                };
                self.bridge = (i, j);
                scene.insert_edge(i, j, EdgeStatus::Hull);
                scene.set_role(i, Role::Accepted);
                scene.set_role(j, Role::Accepted);
                self.phase = Phase::Partition;
                FrameStep::Yield(Step::new(format!(
                    "bridge ({i}, {j}) crosses x = {:.3}",
                    self.split
                )))
            }
            Phase::Partition => {
                let (i, j) = self.bridge;
                let xi = scene.pos(i).x;
                let xj = scene.pos(j).x;
                let mut dropped = 0usize;
                for &p in &self.set {
                    let x = scene.pos(p).x;
                    if x <= xi {
                        self.left.push(p);
                    } else if x >= xj {
                        self.right.push(p);
                    } else {
                        // strictly under the bridge; cannot be on this chain
                        scene.set_role(p, Role::Rejected);
                        dropped += 1;
                    }
                }
                self.phase = Phase::SpawnLeft;
                FrameStep::Yield(Step::new(format!(
                    "discarded {dropped} points under the bridge"
                )))
            }
            Phase::SpawnLeft => {
                self.phase = Phase::SpawnRight;
                let (i, _) = self.bridge;
                if i != self.lo {
                    FrameStep::Push(Frame::Connect(ConnectFrame::new(
                        self.lo,
                        i,
                        std::mem::take(&mut self.left),
                        self.flip,
                    )))
                } else {
                    FrameStep::Continue
                }
            }
            Phase::SpawnRight => {
                self.phase = Phase::Finished;
                let (_, j) = self.bridge;
                if j != self.hi {
                    FrameStep::Push(Frame::Connect(ConnectFrame::new(
                        j,
                        self.hi,
                        std::mem::take(&mut self.right),
                        self.flip,
                    )))
                } else {
                    FrameStep::Continue
                }
            }
            Phase::Finished => FrameStep::Pop(None),
        }
    }
}
