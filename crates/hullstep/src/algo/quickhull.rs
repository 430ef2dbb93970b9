//! QuickHull with a FIFO task queue instead of recursion.
//!
//! Each task is a directed baseline `(a, b)` plus the open subset of points
//! on its outer (left) side. An empty subset finalizes the baseline as a
//! hull edge; otherwise the farthest point becomes a hull vertex and the
//! subset is re-partitioned against the two new baselines.
//!
//! The outer-side tests use `same_sign` anchored on the opposite endpoint,
//! so an exactly-collinear point can match both new baselines at once. That
//! coincidence is surfaced as a `tracing` diagnostic and the point is
//! assigned to the first side; it is never corrected (general position is a
//! caller precondition).

use std::collections::VecDeque;

use crate::kernel::{cross, distance, same_sign, vector};
use crate::scene::{EdgeStatus, Role, Scene};
use crate::step::{Step, StepOutcome, Steppable};

struct Task {
    a: usize,
    b: usize,
    pts: Vec<usize>,
}

enum Phase {
    Label,
    Extremes,
    Split,
    NextTask,
    FindFarthest,
    Partition,
    CloseTask,
    Finish,
    Done,
}

pub struct QuickHull {
    phase: Phase,
    queue: VecDeque<Task>,
    left_ext: usize,
    right_ext: usize,
    k: usize,
    upper: Vec<usize>,
    lower: Vec<usize>,
    // current task state
    task: Option<Task>,
    far: usize,
    cursor: usize,
    side_a: Vec<usize>,
    side_b: Vec<usize>,
}

impl QuickHull {
    pub fn new() -> Self {
        Self {
            phase: Phase::Label,
            queue: VecDeque::new(),
            left_ext: 0,
            right_ext: 0,
            k: 0,
            upper: Vec::new(),
            lower: Vec::new(),
            task: None,
            far: 0,
            cursor: 0,
            side_a: Vec::new(),
            side_b: Vec::new(),
        }
    }

    /// Lexicographically smallest and largest points by `(x, y)`.
    fn extremes(scene: &Scene) -> (usize, usize) {
        let mut lo = 0;
        let mut hi = 0;
        for p in 1..scene.len() {
            let q = scene.pos(p);
            let l = scene.pos(lo);
            let h = scene.pos(hi);
            if q.x < l.x || (q.x == l.x && q.y < l.y) {
                lo = p;
            }
            if q.x > h.x || (q.x == h.x && q.y > h.y) {
                hi = p;
            }
        }
        (lo, hi)
    }
}

impl Default for QuickHull {
    fn default() -> Self {
        Self::new()
    }
}

impl Steppable for QuickHull {
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
                    self.phase = Phase::Extremes;
                    return StepOutcome::Yield(Step::new(format!("labeled {n} points")));
                }
                Phase::Extremes => {
                    let (lo, hi) = Self::extremes(scene);
                    self.left_ext = lo;
                    self.right_ext = hi;
                    scene.set_role(lo, Role::Accepted);
                    scene.set_role(hi, Role::Accepted);
                    self.k = 0;
                    self.upper.clear();
                    self.lower.clear();
                    self.phase = Phase::Split;
                    return StepOutcome::Yield(Step::new(format!(
                        "extreme points {lo} and {hi}"
                    )));
                }
                Phase::Split => {
                    while self.k < n && (self.k == self.left_ext || self.k == self.right_ext) {
                        self.k += 1;
                    }
                    if self.k >= n {
                        self.queue.push_back(Task {
                            a: self.left_ext,
                            b: self.right_ext,
                            pts: std::mem::take(&mut self.upper),
                        });
                        self.queue.push_back(Task {
                            a: self.right_ext,
                            b: self.left_ext,
                            pts: std::mem::take(&mut self.lower),
                        });
                        self.phase = Phase::NextTask;
                        continue;
                    }
                    let l = scene.pos(self.left_ext);
                    let base = vector(l, scene.pos(self.right_ext));
                    let c = cross(base, vector(l, scene.pos(self.k)));
                    let p = self.k;
                    self.k += 1;
                    // left of lo→hi goes with the forward baseline, the rest
                    // with the reversed one
                    if c > 0.0 {
                        self.upper.push(p);
                        scene.set_role(p, Role::Left);
                    } else {
                        self.lower.push(p);
                        scene.set_role(p, Role::Right);
                    }
                    return StepOutcome::Yield(Step::new(format!("classified point {p}")));
                }
                Phase::NextTask => {
                    let task = match self.queue.pop_front() {
                        Some(t) => t,
                        None => {
                            self.phase = Phase::Finish;
                            continue;
                        }
                    };
                    if task.pts.is_empty() {
                        scene.insert_edge(task.a, task.b, EdgeStatus::Hull);
                        scene.set_role(task.a, Role::Accepted);
                        scene.set_role(task.b, Role::Accepted);
                        let msg = format!("accepted hull edge ({}, {})", task.a, task.b);
                        return StepOutcome::Yield(Step::new(msg));
                    }
                    scene.insert_edge(task.a, task.b, EdgeStatus::Trial);
                    self.task = Some(task);
                    self.phase = Phase::FindFarthest;
                    continue;
                }
                Phase::FindFarthest => {
                    let task = self.task.as_ref().unwrap();
                    let a = scene.pos(task.a);
                    let base = vector(a, scene.pos(task.b));
                    let mut far = task.pts[0];
                    let mut best = distance(vector(a, scene.pos(far)), base);
                    for &p in &task.pts[1..] {
                        let d = distance(vector(a, scene.pos(p)), base);
                        if d > best {
                            best = d;
                            far = p;
                        }
                    }
                    self.far = far;
                    self.cursor = 0;
                    self.side_a.clear();
                    self.side_b.clear();
                    scene.set_role(far, Role::Pivot);
                    let (ta, tb) = (task.a, task.b);
                    self.phase = Phase::Partition;
                    return StepOutcome::Yield(Step::new(format!(
                        "farthest from ({ta}, {tb}) is point {far}"
                    )));
                }
                Phase::Partition => {
                    let task = self.task.as_ref().unwrap();
                    while self.cursor < task.pts.len() && task.pts[self.cursor] == self.far {
                        self.cursor += 1;
                    }
                    if self.cursor >= task.pts.len() {
                        self.phase = Phase::CloseTask;
                        continue;
                    }
                    let p = task.pts[self.cursor];
                    self.cursor += 1;
                    let (a, b, f) = (task.a, task.b, self.far);
                    let (pa, pb, pf) = (scene.pos(a), scene.pos(b), scene.pos(f));
                    let pp = scene.pos(p);
                    // outer side of (a, f) is the side away from b; zero
                    // matches both sides via same_sign
                    let e1 = cross(vector(pa, pf), vector(pa, pp));
                    let r1 = cross(vector(pa, pf), vector(pa, pb));
                    let outer_a = same_sign(e1, -r1);
                    let e2 = cross(vector(pf, pb), vector(pf, pp));
                    let r2 = cross(vector(pf, pb), vector(pf, pa));
                    let outer_b = same_sign(e2, -r2);
                    if outer_a && outer_b {
                        tracing::warn!(
                            point = p,
                            baseline = ?(a, b),
                            farthest = f,
                            "collinear tie matches both partitions; keeping first"
                        );
                    }
                    if outer_a {
                        self.side_a.push(p);
                        scene.set_role(p, Role::Left);
                    } else if outer_b {
                        self.side_b.push(p);
                        scene.set_role(p, Role::Right);
                    } else {
                        scene.set_role(p, Role::Rejected);
                    }
                    return StepOutcome::Yield(Step::new(format!("classified point {p}")));
                }
                Phase::CloseTask => {
                    let task = self.task.take().unwrap();
                    scene.remove_edge(task.a, task.b);
                    scene.set_role(self.far, Role::Accepted);
                    self.queue.push_back(Task {
                        a: task.a,
                        b: self.far,
                        pts: std::mem::take(&mut self.side_a),
                    });
                    self.queue.push_back(Task {
                        a: self.far,
                        b: task.b,
                        pts: std::mem::take(&mut self.side_b),
                    });
                    self.phase = Phase::NextTask;
                    return StepOutcome::Yield(Step::new(format!(
                        "split ({}, {}) at point {}",
                        task.a, task.b, self.far
                    )));
                }
                Phase::Finish => {
                    self.phase = Phase::Done;
                    return StepOutcome::Yield(Step::new("all baselines resolved"));
                }
                Phase::Done => return StepOutcome::Done,
            }
        }
    }
}
