//! Unit and property tests for replicator-dynamics clique extraction.

use proptest::prelude::*;
use rstest::rstest;

use crate::error::GraphError;
use crate::test_utils::{graph_from, suite_proptest_config, symmetric_graph, two_triangles};

use super::{ReplicatorBuilder, clique_labels};

#[test]
fn builder_defaults_match_documented_values() {
    let builder = ReplicatorBuilder::new();
    assert_eq!(builder.max_iterations(), 1_000);
    assert_eq!(builder.tolerance(), 1e-8);
    assert_eq!(builder.support_ratio(), 1e-2);
    assert_eq!(builder.seed(), 0);
}

#[rstest]
#[case::zero_iterations(ReplicatorBuilder::new().with_max_iterations(0), "max_iterations")]
#[case::negative_tolerance(ReplicatorBuilder::new().with_tolerance(-1.0), "tolerance")]
#[case::nan_tolerance(ReplicatorBuilder::new().with_tolerance(f64::NAN), "tolerance")]
#[case::zero_ratio(ReplicatorBuilder::new().with_support_ratio(0.0), "support_ratio")]
#[case::ratio_above_one(ReplicatorBuilder::new().with_support_ratio(1.5), "support_ratio")]
fn build_rejects_invalid_configuration(
    #[case] builder: ReplicatorBuilder,
    #[case] parameter: &'static str,
) {
    let err = builder.build().expect_err("configuration is invalid");
    assert!(
        matches!(err, GraphError::InvalidParameter { name, .. } if name == parameter),
        "unexpected error {err:?}"
    );
}

#[test]
fn disjoint_triangles_become_two_cliques() {
    let graph = two_triangles();
    let cliques = clique_labels(&graph, 11).expect("weights are valid");
    let labels = cliques.labels();
    assert_eq!(cliques.clique_count(), 2);
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[4], labels[5]);
    assert_ne!(labels[0], labels[3]);
}

#[test]
fn heavier_clique_is_extracted_first() {
    let mut edges = vec![(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)];
    edges.extend([(3, 4, 5.0), (4, 5, 5.0), (3, 5, 5.0), (5, 6, 5.0), (3, 6, 5.0), (4, 6, 5.0)]);
    let cliques = clique_labels(&symmetric_graph(7, &edges), 3).expect("weights are valid");
    assert_eq!(cliques.members(0), vec![3, 4, 5, 6]);
    assert_eq!(cliques.members(1), vec![0, 1, 2]);
}

#[test]
fn edgeless_vertices_become_singletons_in_order() {
    let cliques = clique_labels(&graph_from(3, &[]), 0).expect("no weights to reject");
    assert_eq!(cliques.labels(), &[0, 1, 2]);
    assert_eq!(cliques.clique_count(), 3);
}

#[test]
fn empty_graph_has_no_cliques() {
    let cliques = clique_labels(&graph_from(0, &[]), 0).expect("empty graph is valid");
    assert!(cliques.labels().is_empty());
    assert_eq!(cliques.clique_count(), 0);
}

#[rstest]
#[case::negative(-1.0, GraphError::NegativeWeight { edge: 1, weight: -1.0 })]
#[case::nan(f64::NAN, GraphError::NonFiniteWeight { edge: 1 })]
#[case::infinite(f64::INFINITY, GraphError::NonFiniteWeight { edge: 1 })]
fn invalid_affinities_are_rejected(#[case] weight: f64, #[case] expected: GraphError) {
    let graph = graph_from(2, &[(0, 1, 1.0), (1, 0, weight)]);
    assert_eq!(clique_labels(&graph, 0), Err(expected));
}

#[test]
fn huge_parallel_affinities_still_terminate() {
    let graph = symmetric_graph(2, &[(0, 1, 1e308); 4]);
    let cliques = ReplicatorBuilder::new()
        .with_max_iterations(5)
        .build()
        .expect("configuration is valid")
        .extract(&graph)
        .expect("weights are finite and non-negative");
    assert_eq!(cliques.labels(), &[0, 0]);
    assert_eq!(cliques.clique_count(), 1);
}

#[test]
fn same_seed_reproduces_labels() {
    let graph = two_triangles();
    let dynamics = ReplicatorBuilder::new()
        .with_seed(99)
        .build()
        .expect("configuration is valid");
    assert_eq!(
        dynamics.extract(&graph).expect("weights are valid"),
        dynamics.extract(&graph).expect("weights are valid")
    );
}

proptest! {
    #![proptest_config(suite_proptest_config(48))]

    #[test]
    fn labels_are_dense_and_cover_every_vertex(
        edges in prop::collection::vec((0_usize..10, 0_usize..10, 0.0_f64..4.0), 0..40),
        seed in any::<u64>(),
    ) {
        let graph = symmetric_graph(10, &edges);
        let cliques = clique_labels(&graph, seed).expect("weights are valid");
        prop_assert_eq!(cliques.labels().len(), 10);
        for label in 0..cliques.clique_count() {
            prop_assert!(!cliques.members(label).is_empty());
        }
        prop_assert!(cliques.labels().iter().all(|&l| l < cliques.clique_count()));
    }
}
