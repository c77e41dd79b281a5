/// Every graph representation should behave like a set of `(src, dst, weight)` triples over a set of
/// nodes. The tests compare the graph against exactly such a naive model.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ty, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use std::collections::BTreeSet;

            use crate::{ops::*, repr::*, testing::test_graph_ops, *};
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            type G = $graph;

            /// Creates `m` random edges for nodes `0..n` with weights `0..w`; may contain duplicates
            fn random_edges<R: Rng>(rng: &mut R, n: u32, m: u32, w: u32) -> Vec<(u32, u32, u32)> {
                (0..m)
                    .map(|_| {
                        (
                            rng.random_range(0..n),
                            rng.random_range(0..n),
                            rng.random_range(0..w),
                        )
                    })
                    .collect_vec()
            }

            /// Nodes `0..n` with random edges, together with the naive model of its edges
            fn random_graph<R: Rng>(rng: &mut R, n: u32) -> (G, BTreeSet<(u32, u32, u32)>) {
                let edges = random_edges(rng, n, 3 * n, 3);
                let mut graph = G::from_nodes(0..n);
                for &(u, v, w) in &edges {
                    graph.insert_edge(&u, &v, w).unwrap();
                }
                (graph, edges.into_iter().collect())
            }

            fn triples(graph: &G) -> Vec<(u32, u32, u32)> {
                graph.iter().map(|(u, v, w)| (*u, *v, *w)).collect_vec()
            }

            $(
                test_graph_ops!(@ $trait);
            )*
        }
    };
    (@ GraphNew) => {
        #[test]
        fn graph_new() {
            let graph = G::new();

            assert_eq!(graph.number_of_nodes(), 0);
            assert_eq!(graph.number_of_edges(), 0);
            assert!(graph.is_empty());
            assert!(graph.nodes().is_empty());
            assert_eq!(graph.iter().count(), 0);
            assert_eq!(graph.cursor_front(), graph.cursor_end());
            assert_eq!(graph, G::default());
        }
    };
    (@ GraphNodeEditing) => {
        #[test]
        fn graph_node_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 10, 20] {
                for _ in 0..10 {
                    let edges = random_edges(rng, n, 3 * n, 4);
                    let mut graph = G::from_edges(edges.iter().copied());
                    let mut nodes: BTreeSet<u32> =
                        edges.iter().flat_map(|&(u, v, _)| [u, v]).collect();
                    let mut model: BTreeSet<(u32, u32, u32)> = edges.iter().copied().collect();

                    for &u in &nodes {
                        assert!(!graph.insert_node(u));
                    }
                    assert_eq!(graph.nodes(), nodes.iter().copied().collect_vec());

                    for _ in 0..(n / 2) {
                        let u = rng.random_range(0..n);
                        assert_eq!(graph.delete_node(&u), nodes.remove(&u));
                        model.retain(|&(a, b, _)| a != u && b != u);

                        assert_eq!(triples(&graph), model.iter().copied().collect_vec());
                        assert_eq!(graph.number_of_edges(), model.len());
                        assert_eq!(graph.nodes(), nodes.iter().copied().collect_vec());
                    }

                    // shifting every node by `n` keeps the relative order
                    for u in nodes.clone() {
                        assert_eq!(graph.replace(&u, u + n), Ok(true));
                    }
                    assert_eq!(
                        triples(&graph),
                        model.iter().map(|&(a, b, w)| (a + n, b + n, w)).collect_vec()
                    );
                    // surviving nodes now lie in `n..2n`
                    assert_eq!(graph.replace(&(2 * n), 0), Err(GraphError::Replace));
                    assert_eq!(
                        graph.replace(&(2 * n), 2 * n + 1),
                        Err(GraphError::Replace)
                    );

                    graph.clear();
                    assert!(graph.is_empty());
                    assert!(graph.is_singleton_graph());
                    assert_eq!(graph.iter().count(), 0);
                }
            }
        }

        #[test]
        fn graph_merge_replace() {
            let rng = &mut Pcg64Mcg::seed_from_u64(4);

            for n in [5u32, 10, 20] {
                for _ in 0..10 {
                    let (mut graph, mut model) = random_graph(rng, n);
                    let mut nodes: BTreeSet<u32> = (0..n).collect();

                    for _ in 0..(n / 2) {
                        let a = rng.random_range(0..n);
                        let b = rng.random_range(0..n);
                        let result = graph.merge_replace(&a, &b);

                        if !nodes.contains(&a) || !nodes.contains(&b) {
                            assert_eq!(result, Err(GraphError::MergeReplace));
                            continue;
                        }
                        assert_eq!(result, Ok(()));

                        if a != b {
                            nodes.remove(&a);
                            let rename = |x: u32| if x == a { b } else { x };
                            model = model
                                .into_iter()
                                .map(|(u, v, w)| (rename(u), rename(v), w))
                                .collect();
                        }

                        assert_eq!(triples(&graph), model.iter().copied().collect_vec());
                        assert_eq!(graph.number_of_edges(), model.len());
                        assert_eq!(graph.nodes(), nodes.iter().copied().collect_vec());
                    }
                }
            }
        }
    };
    (@ GraphEdgeEditing) => {
        #[test]
        fn graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 10, 20] {
                for _ in 0..10 {
                    let mut graph = G::from_nodes(0..n);
                    let mut model = BTreeSet::new();

                    for (u, v, w) in random_edges(rng, n, 4 * n, 3) {
                        assert_eq!(graph.insert_edge(&u, &v, w), Ok(model.insert((u, v, w))));
                    }
                    assert_eq!(graph.number_of_edges(), model.len());

                    assert_eq!(graph.insert_edge(&0, &n, 0), Err(GraphError::InsertEdge));
                    assert_eq!(graph.insert_edge(&n, &0, 0), Err(GraphError::InsertEdge));
                    assert_eq!(graph.number_of_edges(), model.len());

                    // node `n` does not exist, so some of these are misses on purpose
                    for (u, v, w) in random_edges(rng, n + 1, 4 * n, 3) {
                        assert_eq!(graph.erase_edge(&u, &v, &w), model.remove(&(u, v, w)));
                        assert_eq!(graph.number_of_edges(), model.len());
                    }
                    assert_eq!(triples(&graph), model.iter().copied().collect_vec());

                    for (u, v, w) in model.clone() {
                        assert!(graph.has_edge(&u, &v, &w));
                        assert!(graph.erase_edge(&u, &v, &w));
                        assert!(!graph.has_edge(&u, &v, &w));
                    }
                    assert!(graph.is_singleton_graph());
                    assert_eq!(graph.number_of_nodes(), n as usize);
                }
            }
        }
    };
    (@ AdjacencyList) => {
        #[test]
        fn adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [5u32, 10, 20] {
                for _ in 0..10 {
                    let (graph, model) = random_graph(rng, n);

                    for u in 0..n {
                        let out = model.iter().filter(|e| e.0 == u).copied().collect_vec();

                        assert_eq!(
                            graph.connected(&u),
                            Ok(out.iter().map(|e| e.1).dedup().collect_vec())
                        );
                        assert_eq!(graph.out_degree_of(&u), out.len());
                        assert_eq!(
                            graph.edges_of(&u).map(<(u32, u32, u32)>::from).collect_vec(),
                            out
                        );
                        assert_eq!(
                            graph.in_neighbors_of(&u),
                            model
                                .iter()
                                .filter(|e| e.1 == u)
                                .map(|e| e.0)
                                .unique()
                                .sorted()
                                .collect_vec()
                        );

                        for v in 0..n {
                            let weights =
                                out.iter().filter(|e| e.1 == v).map(|e| e.2).collect_vec();
                            assert_eq!(graph.is_connected(&u, &v), Ok(!weights.is_empty()));
                            assert_eq!(graph.weights(&u, &v), Ok(weights));
                        }
                    }

                    assert_eq!(graph.connected(&n), Err(GraphError::GetConnected));
                    assert_eq!(graph.weights(&0, &n), Err(GraphError::GetWeights));
                    assert_eq!(graph.is_connected(&n, &0), Err(GraphError::IsConnected));
                    assert_eq!(graph.out_degree_of(&n), 0);
                    assert_eq!(graph.edges_of(&n).count(), 0);
                }
            }
        }
    };
    (@ Cursor) => {
        #[test]
        fn cursor() {
            let rng = &mut Pcg64Mcg::seed_from_u64(6);

            for n in [1u32, 5, 10, 20] {
                for _ in 0..10 {
                    let (graph, model) = random_graph(rng, n);
                    let forward = triples(&graph);
                    assert_eq!(forward, model.iter().copied().collect_vec());

                    let mut backward = graph
                        .iter()
                        .rev()
                        .map(|(u, v, w)| (*u, *v, *w))
                        .collect_vec();
                    backward.reverse();
                    assert_eq!(forward, backward);

                    let mut cursor = graph.cursor_front();
                    for &(u, v, w) in &forward {
                        assert_eq!(cursor.get(), Some((&u, &v, &w)));
                        assert_eq!(cursor, graph.find(&u, &v, &w));
                        cursor.move_next();
                    }
                    assert_eq!(cursor, graph.cursor_end());

                    for &(u, v, w) in forward.iter().rev() {
                        cursor.move_prev();
                        assert_eq!(cursor.get(), Some((&u, &v, &w)));
                    }
                    assert_eq!(cursor, graph.cursor_front());
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
