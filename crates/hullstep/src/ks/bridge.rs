//! `bridge`: Las Vegas search for the one chain edge crossing `x = a`.
//!
//! Points are paired arbitrarily; one random pair fixes a trial slope `K`;
//! the points supporting the line of slope `K` tell whether the bridge is
//! found, left, or right of the split, and in the latter cases every pair
//! gives up at most one provably-useless member before recursing on the
//! survivors. The chosen pair always loses a member, so the candidate set
//! shrinks every round.

use rand::rngs::StdRng;
use rand::Rng;

use crate::scene::{Role, Scene};
use crate::step::Step;

use super::{eff_y, Frame, FrameStep};

/// Relative slack for the support-membership and verticality tests. Slope
/// and support arithmetic rounds by a few ulps, and an exact mathematical
/// tie must land on both sides of the comparison.
#[inline]
fn slack(a: f64, b: f64) -> f64 {
    1e-12 * a.abs().max(b.abs()).max(1.0)
}

enum Phase {
    Init,
    ChooseSlope,
    Support,
    Decide,
    Classify,
    Recurse,
    AwaitChild,
}

pub(crate) struct BridgeFrame {
    set: Vec<usize>,
    a: f64,
    flip: bool,
    phase: Phase,
    // (left, right) ordered by x, never vertical
    pairs: Vec<(usize, usize)>,
    cands: Vec<usize>,
    slope: f64,
    cursor: usize,
    // which member a qualifying pair loses
    drop_left: bool,
    support_lo: usize,
    support_hi: usize,
}

impl BridgeFrame {
    pub(crate) fn new(set: Vec<usize>, a: f64, flip: bool) -> Self {
        Self {
            set,
            a,
            flip,
            phase: Phase::Init,
            pairs: Vec::new(),
            cands: Vec::new(),
            slope: 0.0,
            cursor: 0,
            drop_left: false,
            support_lo: 0,
            support_hi: 0,
        }
    }

    fn pair_slope(&self, scene: &Scene, p: usize, q: usize) -> f64 {
        let (pp, pq) = (scene.pos(p), scene.pos(q));
        (eff_y(scene, q, self.flip) - eff_y(scene, p, self.flip)) / (pq.x - pp.x)
    }

    fn sorted_by_x(&self, scene: &Scene, p: usize, q: usize) -> (usize, usize) {
        if scene.pos(p).x <= scene.pos(q).x {
            (p, q)
        } else {
            (q, p)
        }
    }

    pub(crate) fn step(
        &mut self,
        scene: &mut Scene,
        rng: &mut StdRng,
        ret: &mut Option<(usize, usize)>,
    ) -> FrameStep {
        match self.phase {
            Phase::Init => {
                if self.set.len() < 2 {
                    return FrameStep::Pop(None);
                }
                if self.set.len() == 2 {
                    let (p, q) = self.sorted_by_x(scene, self.set[0], self.set[1]);
                    return FrameStep::Pop(Some((p, q)));
                }
                let mut verticals = 0usize;
                let mut idx = 0;
                while idx + 1 < self.set.len() {
                    let (p, q) = (self.set[idx], self.set[idx + 1]);
                    idx += 2;
                    let (xp, xq) = (scene.pos(p).x, scene.pos(q).x);
                    if (xq - xp).abs() <= slack(xp, xq) {
                        // undefined slope: route the support-side point
                        // straight into the candidates
                        let keep = if eff_y(scene, p, self.flip) >= eff_y(scene, q, self.flip) {
                            p
                        } else {
                            q
                        };
                        let drop = if keep == p { q } else { p };
                        self.cands.push(keep);
                        scene.set_role(keep, Role::Candidate);
                        scene.set_role(drop, Role::Rejected);
                        verticals += 1;
                        continue;
                    }
                    self.pairs.push(self.sorted_by_x(scene, p, q));
                }
                if idx < self.set.len() {
                    // unpaired leftover is an automatic candidate
                    let p = self.set[idx];
                    self.cands.push(p);
                    scene.set_role(p, Role::Candidate);
                }
                if self.pairs.is_empty() {
                    if self.cands.len() >= 2 {
                        self.phase = Phase::Recurse;
                        return FrameStep::Yield(Step::new(format!(
                            "no usable pair slopes, recursing on {} candidates",
                            self.cands.len()
                        )));
                    }
                    // degenerate fallback: everything collapsed
                    let mut rest = self.set.clone();
                    rest.sort_by(|&p, &q| {
                        scene
                            .pos(p)
                            .x
                            .partial_cmp(&scene.pos(q).x)
                            .unwrap_or(std::cmp::Ordering::Equal)
                    });
                    return FrameStep::Pop(Some((rest[0], rest[rest.len() - 1])));
                }
                self.phase = Phase::ChooseSlope;
                FrameStep::Yield(Step::new(format!(
                    "paired {} candidates into {} pairs ({} vertical)",
                    self.set.len(),
                    self.pairs.len(),
                    verticals
                )))
            }
            Phase::ChooseSlope => {
                let (p, q) = self.pairs[rng.gen_range(0..self.pairs.len())];
                self.slope = self.pair_slope(scene, p, q);
                scene.set_role(p, Role::Pivot);
                scene.set_role(q, Role::Pivot);
                self.phase = Phase::Support;
                FrameStep::Yield(Step::new(format!(
                    "trial slope {:.4} from pair ({p}, {q})",
                    self.slope
                )))
            }
            Phase::Support => {
                let k = self.slope;
                let mut best = f64::NEG_INFINITY;
                for &p in &self.set {
                    let v = eff_y(scene, p, self.flip) - k * scene.pos(p).x;
                    if v > best {
                        best = v;
                    }
                }
                let mut lo = None;
                let mut hi = None;
                let mut touched = 0usize;
                for &p in &self.set {
                    let v = eff_y(scene, p, self.flip) - k * scene.pos(p).x;
                    if best - v <= slack(v, best) {
                        touched += 1;
                        scene.set_role(p, Role::Candidate);
                        let x = scene.pos(p).x;
                        if lo.map_or(true, |l: usize| x < scene.pos(l).x) {
                            lo = Some(p);
                        }
                        if hi.map_or(true, |h: usize| x > scene.pos(h).x) {
                            hi = Some(p);
                        }
                    }
                }
                // the maximum is attained by at least one point
                self.support_lo = lo.unwrap();
                self.support_hi = hi.unwrap();
                self.phase = Phase::Decide;
                FrameStep::Yield(Step::new(format!(
                    "support line touches {touched} point(s), span ({}, {})",
                    self.support_lo, self.support_hi
                )))
            }
            Phase::Decide => {
                let xk = scene.pos(self.support_lo).x;
                let xm = scene.pos(self.support_hi).x;
                if xk <= self.a && xm > self.a {
                    return FrameStep::Pop(Some((self.support_lo, self.support_hi)));
                }
                // bridge is right of the support when xm <= a (slope below
                // K), left of it when xk > a (slope above K)
                self.drop_left = xm <= self.a;
                self.cursor = 0;
                self.phase = Phase::Classify;
                FrameStep::Continue
            }
            Phase::Classify => {
                if self.cursor >= self.pairs.len() {
                    self.phase = Phase::Recurse;
                    return FrameStep::Continue;
                }
                let (p, q) = self.pairs[self.cursor];
                self.cursor += 1;
                let s = self.pair_slope(scene, p, q);
                let dropped = if self.drop_left {
                    (s >= self.slope).then_some((p, q))
                } else {
                    (s <= self.slope).then_some((q, p))
                };
                match dropped {
                    Some((out, keep)) => {
                        self.cands.push(keep);
                        scene.set_role(out, Role::Rejected);
                        scene.set_role(keep, Role::Candidate);
                        FrameStep::Yield(Step::new(format!(
                            "pair ({p}, {q}): dropped {out}"
                        )))
                    }
                    None => {
                        self.cands.push(p);
                        self.cands.push(q);
                        scene.set_role(p, Role::Candidate);
                        scene.set_role(q, Role::Candidate);
                        FrameStep::Yield(Step::new(format!("pair ({p}, {q}): kept both")))
                    }
                }
            }
            Phase::Recurse => {
                self.phase = Phase::AwaitChild;
                FrameStep::Push(Frame::Bridge(BridgeFrame::new(
                    std::mem::take(&mut self.cands),
                    self.a,
                    self.flip,
                )))
            }
            Phase::AwaitChild => FrameStep::Pop(ret.take()),
        }
    }
}
