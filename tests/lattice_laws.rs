use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use values_compass::lattice::LatticeEvaluator;
use values_compass::poset::Poset;
use values_compass::relations::RelationGraph;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("v{i}")).collect()
}

/// Random graph over `n` nodes. Forward-only edges give an acyclic
/// (antisymmetric) order; `back_edges` adds cycles on top.
fn random_graph(rng: &mut StdRng, n: usize, density: f64, back_edges: bool) -> RelationGraph {
    let names = names(n);
    let mut graph = RelationGraph::new();
    for name in &names {
        graph.add_node(name);
    }
    for i in 0..n {
        for j in 0..n {
            let allowed = i < j || (back_edges && i > j);
            if allowed && rng.gen_bool(density) {
                graph.add_edge(&names[i], &names[j]);
            }
        }
    }
    graph
}

#[test]
fn closure_is_reflexive_and_transitive() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..20 {
        let graph = random_graph(&mut rng, 9, 0.2, round % 2 == 1);
        let poset = Poset::new(&graph);
        let names = names(9);

        for a in &names {
            assert!(poset.is_less_or_equal(a, a));
            for b in &names {
                for c in &names {
                    if poset.is_less_or_equal(a, b) && poset.is_less_or_equal(b, c) {
                        assert!(poset.is_less_or_equal(a, c), "round {round}: {a} {b} {c}");
                    }
                }
            }
        }
        for (u, v) in graph.edges() {
            assert!(poset.is_less_or_equal(graph.name(u), graph.name(v)));
        }
    }
}

#[test]
fn join_and_meet_are_commutative_even_with_cycles() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let graph = random_graph(&mut rng, 8, 0.25, true);
        let evaluator = LatticeEvaluator::new(Poset::new(&graph), Vec::new());
        let names = names(8);
        for a in &names {
            for b in &names {
                assert_eq!(evaluator.join(a, b), evaluator.join(b, a));
                assert_eq!(evaluator.meet(a, b), evaluator.meet(b, a));
            }
        }
    }
}

#[test]
fn acyclic_bounds_are_least_and_greatest() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..25 {
        let graph = random_graph(&mut rng, 8, 0.3, false);
        let evaluator = LatticeEvaluator::new(Poset::new(&graph), Vec::new());
        let names = names(8);
        let le = |x: &str, y: &str| evaluator.is_less_or_equal(x, y);

        for a in &names {
            for b in &names {
                if let Some(j) = evaluator.join(a, b) {
                    assert!(le(a, j) && le(b, j));
                    for u in &names {
                        if le(a, u) && le(b, u) {
                            assert!(le(j, u), "join({a}, {b}) = {j} not below {u}");
                        }
                    }
                }
                if let Some(m) = evaluator.meet(a, b) {
                    assert!(le(m, a) && le(m, b));
                    for l in &names {
                        if le(l, a) && le(l, b) {
                            assert!(le(l, m), "meet({a}, {b}) = {m} not above {l}");
                        }
                    }
                    // absorption
                    assert_eq!(evaluator.join(a, m), Some(a.as_str()));
                }
            }
        }

        if evaluator.is_lattice() {
            for a in &names {
                for b in &names {
                    assert!(evaluator.join(a, b).is_some());
                    assert!(evaluator.meet(a, b).is_some());
                }
            }
        }
    }
}

#[test]
fn chain_is_a_lattice() {
    let names = names(6);
    let mut graph = RelationGraph::new();
    for pair in names.windows(2) {
        graph.add_edge(&pair[0], &pair[1]);
    }
    let evaluator = LatticeEvaluator::new(Poset::new(&graph), Vec::new());

    assert!(evaluator.is_lattice());
    assert!(evaluator.is_complete_lattice());
    assert_eq!(evaluator.join("v1", "v4"), Some("v4"));
    assert_eq!(evaluator.meet("v1", "v4"), Some("v1"));
}
