//! Cross-backtracker and cross-view properties on small random inputs.

use proptest::prelude::*;

use pairalign::backtrack::{full_grid, SlicedBacktracker};
use pairalign::graph::{
    AlignmentGraph, ExtendedGapGraph, FittingGraph, GlobalGraph, LocalGraph, OverlapGraph,
    Reversed,
};
use pairalign::score::SimpleScorer;

fn seq() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[abc]{0,6}").unwrap()
}

fn scorers() -> (SimpleScorer<i32>, SimpleScorer<i32>, SimpleScorer<i32>) {
    (
        SimpleScorer::substitution(2, -1),
        SimpleScorer::gap(-2),
        SimpleScorer::freeride(),
    )
}

fn assert_contiguous<G: AlignmentGraph>(graph: G, path: &[pairalign::graph::Edge<G::Ix>]) {
    let mut cursor = graph.root();
    for edge in path {
        assert_eq!(graph.edge_source(edge), cursor);
        cursor = graph.edge_target(edge);
    }
    assert_eq!(cursor, graph.leaf());
}

fn assert_backtrackers_agree<G>(graph: G)
where
    G: AlignmentGraph<Weight = i32>,
{
    let (full_path, full) = full_grid::find_max_path(graph).unwrap();
    let (sliced_path, sliced) = SlicedBacktracker::new().find_max_path(graph, 0).unwrap();
    assert_eq!(full, sliced);

    // Both paths are contiguous and their edge weights sum to the total.
    assert_contiguous(graph, &full_path);
    assert_contiguous(graph, &sliced_path);
    let full_sum: i32 = full_path.iter().map(|e| graph.edge_weight(e)).sum();
    let sliced_sum: i32 = sliced_path.iter().map(|e| graph.edge_weight(e)).sum();
    assert_eq!(full_sum, full);
    assert_eq!(sliced_sum, sliced);
}

proptest! {
    #[test]
    fn backtrackers_agree_on_global(down in seq(), right in seq()) {
        let (sub, gap, _) = scorers();
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new(&down, &right, &sub, &gap);
        assert_backtrackers_agree(g);

        // Single-depth paths fit the lattice bound.
        let (path, _) = full_grid::find_max_path(g).unwrap();
        prop_assert!(path.len() <= g.down_count() + g.right_count() - 2);
    }

    #[test]
    fn backtrackers_agree_on_local(down in seq(), right in seq()) {
        let (sub, gap, freeride) = scorers();
        let g: LocalGraph<'_, str, str, _, _, _, usize> =
            LocalGraph::new(&down, &right, &sub, &gap, &freeride);
        assert_backtrackers_agree(g);
    }

    #[test]
    fn backtrackers_agree_on_fitting(down in seq(), right in seq()) {
        let (sub, gap, freeride) = scorers();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new(&down, &right, &sub, &gap, &freeride);
        assert_backtrackers_agree(g);

        // Fitting must consume all of right.
        let (path, _) = full_grid::find_max_path(g).unwrap();
        let right_used = path
            .iter()
            .filter_map(|e| g.edge_elements(e))
            .filter(|(_, r)| r.is_some())
            .count();
        prop_assert_eq!(right_used, right.len());
    }

    #[test]
    fn backtrackers_agree_on_overlap(down in seq(), right in seq()) {
        let (sub, gap, freeride) = scorers();
        let g: OverlapGraph<'_, str, str, _, _, _, usize> =
            OverlapGraph::new(&down, &right, &sub, &gap, &freeride);
        assert_backtrackers_agree(g);

        // Consumption is a suffix of down against a prefix of right.
        let (path, _) = full_grid::find_max_path(g).unwrap();
        let down_used: Vec<_> = path
            .iter()
            .filter_map(|e| g.edge_elements(e))
            .filter_map(|(d, _)| d)
            .collect();
        let right_used: Vec<_> = path
            .iter()
            .filter_map(|e| g.edge_elements(e))
            .filter_map(|(_, r)| r)
            .collect();
        if let Some(&last) = down_used.last() {
            prop_assert_eq!(last, down.len() - 1);
        }
        if let Some(&first) = right_used.first() {
            prop_assert_eq!(first, 0);
        }
        prop_assert!(down_used.windows(2).all(|w| w[1] == w[0] + 1));
        prop_assert!(right_used.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn backtrackers_agree_on_extended_gap(down in seq(), right in seq()) {
        let sub = SimpleScorer::substitution(2i32, -1);
        let open = SimpleScorer::gap(-3);
        let extend = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: ExtendedGapGraph<'_, str, str, _, _, _, _, usize> =
            ExtendedGapGraph::new(&down, &right, &sub, &open, &extend, &freeride);
        assert_backtrackers_agree(g);
    }

    #[test]
    fn reversing_twice_is_the_identity(down in seq(), right in seq()) {
        let (sub, gap, freeride) = scorers();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new(&down, &right, &sub, &gap, &freeride);
        let twice = Reversed(Reversed(g));

        for row in 0..g.down_count() {
            let a: Vec<_> = g.row_nodes(row).collect();
            let b: Vec<_> = twice.row_nodes(row).collect();
            prop_assert_eq!(&a, &b);
            for node in a {
                prop_assert_eq!(g.grid_offset(node), twice.grid_offset(node));
                let ae: Vec<_> = g.in_edges(node).collect();
                let be: Vec<_> = twice.in_edges(node).collect();
                prop_assert_eq!(&ae, &be);
                for edge in ae {
                    prop_assert_eq!(g.edge_weight(&edge), twice.edge_weight(&edge));
                }
            }
        }
    }

    #[test]
    fn bidi_walks_are_mirror_symmetric(down in seq(), right in seq()) {
        use pairalign::backtrack::BidiWalker;

        let (sub, gap, _) = scorers();
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new(&down, &right, &sub, &gap);
        for row in 0..g.down_count() {
            for node in g.row_nodes(row) {
                let forward = BidiWalker::converge_weight(g, node);
                let mirrored = BidiWalker::converge_weight(Reversed(g), node);
                prop_assert_eq!(forward, mirrored);
            }
        }
    }

    #[test]
    fn rotational_matches_the_best_explicit_rotation(
        down in proptest::string::string_regex("[ab]{1,5}").unwrap(),
        right in proptest::string::string_regex("[ab]{0,4}").unwrap(),
    ) {
        use pairalign::align::{align_fitting, align_rotational};

        let (sub, gap, freeride) = scorers();
        let (_, rotational) =
            align_rotational(down.as_str(), right.as_str(), &sub, &gap, &freeride).unwrap();

        let mut best = None;
        for shift in 0..down.len() {
            let rotated: String = down
                .bytes()
                .cycle()
                .skip(shift)
                .take(down.len())
                .map(char::from)
                .collect();
            let (_, score) =
                align_fitting(rotated.as_str(), right.as_str(), &sub, &gap, &freeride).unwrap();
            best = Some(best.map_or(score, |b: i32| b.max(score)));
        }
        prop_assert_eq!(rotational, best.unwrap());
    }
}
