//! Cross-strategy behavior tests: every registered algorithm must produce
//! the same hull, close it into one simple cycle, and honor the stepping
//! contract (replayable runs, clean scene after completion or cancellation).

use nalgebra::Vector2;
use proptest::prelude::*;

use crate::gen::{sample_points, SamplerCfg};
use crate::kernel::{cross, vector};
use crate::registry::{compute_hull, Algorithm, Driver};
use crate::scene::{Role, Scene};

fn square_plus_center() -> Vec<Vector2<f64>> {
    vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(4.0, 0.0),
        Vector2::new(4.0, 4.0),
        Vector2::new(0.0, 4.0),
        Vector2::new(2.0, 2.0),
    ]
}

fn hexagon() -> Vec<Vector2<f64>> {
    let r = 10.0;
    (0..6)
        .map(|k| {
            let t = std::f64::consts::FRAC_PI_3 * k as f64;
            Vector2::new(r * t.cos(), r * t.sin())
        })
        .collect()
}

/// Every non-endpoint input point must lie strictly on the interior side of
/// every hull edge, whichever way round the cycle runs.
fn assert_strictly_convex(pts: &[Vector2<f64>], cycle: &[usize]) {
    let h = cycle.len();
    let area: f64 = (0..h)
        .map(|i| {
            let p = pts[cycle[i]];
            let q = pts[cycle[(i + 1) % h]];
            p.x * q.y - q.x * p.y
        })
        .sum();
    let sgn = area.signum();
    for i in 0..h {
        let (ia, ib) = (cycle[i], cycle[(i + 1) % h]);
        let (a, b) = (pts[ia], pts[ib]);
        for (j, &p) in pts.iter().enumerate() {
            if j == ia || j == ib {
                continue;
            }
            let c = cross(vector(a, b), vector(a, p));
            assert!(
                c * sgn > 0.0,
                "point {j} not inside edge ({ia}, {ib})"
            );
        }
    }
}

#[test]
fn square_center_is_excluded_by_every_strategy() {
    let pts = square_plus_center();
    for algo in Algorithm::ALL {
        let result = compute_hull(&pts, algo, 42);
        assert_eq!(result.vertices(), vec![0, 1, 2, 3], "{algo}");
        let cycle = result.cycle().unwrap_or_else(|| panic!("{algo}: no cycle"));
        assert_eq!(cycle.len(), 4, "{algo}");
    }
}

#[test]
fn hexagon_is_its_own_hull() {
    let pts = hexagon();
    for algo in Algorithm::ALL {
        let result = compute_hull(&pts, algo, 42);
        assert_eq!(result.vertices(), vec![0, 1, 2, 3, 4, 5], "{algo}");
        // points are laid out counter-clockwise, so the canonical trace is
        // the identity order
        assert_eq!(result.cycle(), Some(vec![0, 1, 2, 3, 4, 5]), "{algo}");
    }
}

#[test]
fn triangle_hull_is_the_triangle() {
    let pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(7.0, 1.0),
        Vector2::new(3.0, 5.0),
    ];
    for algo in Algorithm::ALL {
        let result = compute_hull(&pts, algo, 0);
        assert_eq!(result.edges.len(), 3, "{algo}");
        assert_eq!(result.vertices(), vec![0, 1, 2], "{algo}");
    }
}

#[test]
fn chain_pops_leave_finished_hull_edges_intact() {
    // the reversed scan walks through both endpoints of a finished chain's
    // edge and backtracks; the symmetric edge key must not let that pop
    // delete the finished edge
    let pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(7.0, 1.0),
        Vector2::new(3.0, 5.0),
    ];
    let result = compute_hull(&pts, Algorithm::MonotoneChain, 0);
    assert_eq!(result.edges.len(), 3);
    assert_eq!(result.cycle(), Some(vec![0, 1, 2]));
}

#[test]
fn sweep_candidates_are_always_distinct() {
    let mut driver = Driver::new(Scene::new(&hexagon()));
    driver.start(Algorithm::GiftWrapping, 0);
    let mut msgs = Vec::new();
    driver.run_to_end(|s| msgs.push(s.message.clone()));
    let flips: Vec<&String> = msgs.iter().filter(|m| m.contains("replaces")).collect();
    assert!(!flips.is_empty());
    for m in flips {
        let nums: Vec<usize> = m
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap())
            .collect();
        assert_ne!(nums[0], nums[1], "{m}");
    }
}

#[test]
fn fewer_than_three_points_finish_on_the_first_step() {
    let pts = square_plus_center();
    for n in 0..3 {
        for algo in Algorithm::ALL {
            let mut driver = Driver::new(Scene::new(&pts[..n]));
            driver.start(algo, 1);
            assert!(driver.step().is_none(), "{algo} with {n} points");
            assert_eq!(driver.moves(), 0);
            let result = driver.last_result().unwrap();
            assert!(result.is_empty(), "{algo} with {n} points");
        }
    }
}

#[test]
fn strategies_agree_on_sampled_sets() {
    let cfg = SamplerCfg::default();
    for seed in [1u64, 2, 3, 8, 21] {
        let pts = sample_points(24, &cfg, seed);
        assert_eq!(pts.len(), 24);
        let reference = compute_hull(&pts, Algorithm::MonotoneChain, 0).vertices();
        assert!(reference.len() >= 3);
        for algo in Algorithm::ALL {
            let result = compute_hull(&pts, algo, seed);
            assert_eq!(result.vertices(), reference, "{algo} on seed {seed}");
            let cycle = result
                .cycle()
                .unwrap_or_else(|| panic!("{algo} on seed {seed}: no cycle"));
            assert_strictly_convex(&pts, &cycle);
        }
    }
}

#[test]
fn reruns_replay_identical_step_sequences() {
    let pts = sample_points(16, &SamplerCfg::default(), 5);
    for algo in Algorithm::ALL {
        let transcript = |seed| {
            let mut driver = Driver::new(Scene::new(&pts));
            driver.start(algo, seed);
            let mut msgs = Vec::new();
            driver.run_to_end(|s| msgs.push(s.message.clone()));
            (msgs, driver.moves())
        };
        let (a, moves_a) = transcript(7);
        let (b, moves_b) = transcript(7);
        assert_eq!(a, b, "{algo}");
        assert_eq!(moves_a, moves_b);
        assert!(moves_a > 0, "{algo}");
    }
}

#[test]
fn completion_resets_the_scene() {
    let pts = square_plus_center();
    let mut driver = Driver::new(Scene::new(&pts));
    driver.start(Algorithm::GrahamScan, 0);
    driver.run_to_end(|_| {});
    assert!(!driver.is_running());
    assert!(driver.last_result().is_some());
    assert_eq!(driver.scene().edge_count(), 0);
    assert!(driver.scene().points().all(|p| p.role == Role::Neutral));
    assert!(driver.scene().points().all(|p| p.number.is_none()));
}

#[test]
fn cancellation_wipes_partial_state() {
    let pts = square_plus_center();
    let mut driver = Driver::new(Scene::new(&pts));
    driver.start(Algorithm::QuickHull, 0);
    for _ in 0..3 {
        assert!(driver.step().is_some());
    }
    driver.cancel();
    assert!(!driver.is_running());
    assert!(driver.last_result().is_none());
    assert_eq!(driver.scene().edge_count(), 0);
    assert!(driver.scene().points().all(|p| p.role == Role::Neutral));
}

#[test]
fn early_exit_never_takes_more_moves() {
    let pts = sample_points(20, &SamplerCfg::default(), 11);
    let run = |algo| {
        let mut driver = Driver::new(Scene::new(&pts));
        driver.start(algo, 0);
        driver.run_to_end(|_| {})
    };
    let plain = run(Algorithm::Naive);
    let smart = run(Algorithm::SmartNaive);
    assert!(smart <= plain, "smart {smart} vs plain {plain}");
    assert_eq!(
        compute_hull(&pts, Algorithm::SmartNaive, 0).vertices(),
        compute_hull(&pts, Algorithm::Naive, 0).vertices()
    );
}

proptest! {
    #[test]
    fn prop_strategies_agree(seed in 0u64..500, n in 3usize..28) {
        let pts = sample_points(n, &SamplerCfg::default(), seed);
        prop_assume!(pts.len() >= 3);
        let reference = compute_hull(&pts, Algorithm::MonotoneChain, 0).vertices();
        for algo in Algorithm::ALL {
            let result = compute_hull(&pts, algo, seed);
            prop_assert_eq!(result.vertices(), reference.clone(), "{}", algo);
            let cycle = result.cycle();
            prop_assert!(cycle.is_some(), "{}: hull does not close", algo);
            assert_strictly_convex(&pts, &cycle.unwrap());
        }
    }
}
