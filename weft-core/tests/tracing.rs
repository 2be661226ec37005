//! Span and event coverage for the instrumented entry points.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use weft_core::{
    EdgeTriplets, Graph, Matrix, Normalization, NormalizationSums, ReplicatorBuilder, dijkstra,
    floyd, knn_graph, minimum_spanning_tree, normalize,
};
use weft_test_support::tracing::RecordingLayer;

fn record<T>(run: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let output = tracing::subscriber::with_default(subscriber, run);
    (output, layer)
}

fn line() -> Matrix {
    Matrix::from_rows(&[[0.0, 0.0], [1.0, 0.0], [3.0, 0.0]]).expect("rows share a dimension")
}

#[test]
fn knn_span_records_input_shape() {
    let (graph, layer) = record(|| knn_graph(&line(), 1));
    assert!(graph.is_ok());

    let span = layer.span_named("metric.knn").expect("metric.knn span recorded");
    assert_eq!(span.field("points"), Some("3"));
    assert_eq!(span.field("dims"), Some("2"));
    assert_eq!(span.field("k"), Some("1"));

    let built = layer
        .events_at(Level::DEBUG)
        .into_iter()
        .find(|event| event.message() == Some("graph built"))
        .expect("graph built event recorded");
    assert_eq!(built.field("builder"), Some("knn"));
    assert_eq!(built.field("edges"), Some("4"));
}

#[test]
fn knn_on_a_single_point_warns() {
    let single = Matrix::from_rows(&[[2.0, 5.0]]).expect("one row");
    let (graph, layer) = record(|| knn_graph(&single, 3));
    let graph = graph.expect("tiny clouds yield an edgeless graph");
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);

    let warnings = layer.events_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message(),
        Some("too few points for neighbours; graph is edgeless")
    );
    assert_eq!(warnings[0].field("points"), Some("1"));
}

#[test]
fn failed_calls_emit_an_error_event() {
    let (result, layer) = record(|| knn_graph(&line(), 0));
    assert!(result.is_err());

    let errors = layer.events_at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    let message = errors[0].field("error").expect("error field recorded");
    assert!(message.contains("invalid parameter `k`"), "unexpected error {message}");
}

#[test]
fn dijkstra_span_records_seed() {
    let graph = Graph::build(
        3,
        EdgeTriplets::new(vec![0, 1], vec![1, 2], vec![1.0, 2.0]),
    )
    .expect("ids are valid");
    let (distances, layer) = record(|| dijkstra(&graph, 1, f64::INFINITY));
    assert_eq!(distances, Ok(vec![f64::INFINITY, 0.0, 2.0]));

    let span = layer
        .span_named("shortest_path.dijkstra")
        .expect("dijkstra span recorded");
    assert_eq!(span.field("seed"), Some("1"));
    assert_eq!(span.field("vertices"), Some("3"));
    assert_eq!(span.field("edges"), Some("2"));
}

#[test]
fn mst_rounds_are_logged() {
    let (forest, layer) = record(|| minimum_spanning_tree(&line()));
    let forest = forest.expect("coordinates are finite");
    assert!(forest.is_tree());

    assert!(layer.span_named("mst.points").is_some());
    let rounds: Vec<_> = layer
        .events_at(Level::DEBUG)
        .into_iter()
        .filter(|event| event.message() == Some("boruvka round"))
        .collect();
    assert!(!rounds.is_empty());
    assert_eq!(
        rounds.last().and_then(|event| event.field("components")),
        Some("1")
    );
}

#[test]
fn clique_span_records_seed() {
    let graph = Graph::build(
        2,
        EdgeTriplets::new(vec![0, 1], vec![1, 0], vec![1.0, 1.0]),
    )
    .expect("ids are valid");
    let dynamics = ReplicatorBuilder::new()
        .with_seed(42)
        .build()
        .expect("configuration is valid");
    let (cliques, layer) = record(|| dynamics.extract(&graph));
    assert_eq!(cliques.expect("weights are valid").clique_count(), 1);

    let span = layer
        .span_named("cliques.extract")
        .expect("cliques.extract span recorded");
    assert_eq!(span.field("seed"), Some("42"));
}

#[test]
fn floyd_opens_its_own_span_around_the_partial_pass() {
    let graph = Graph::build(
        2,
        EdgeTriplets::new(vec![0, 1], vec![1, 0], vec![1.5, 1.5]),
    )
    .expect("ids are valid");
    let (geodesics, layer) = record(|| floyd(&graph, f64::INFINITY));
    let geodesics = geodesics.expect("weights are valid");
    assert_eq!(geodesics.row(0), &[0.0, 1.5]);

    let span = layer
        .span_named("shortest_path.floyd")
        .expect("shortest_path.floyd span recorded");
    assert_eq!(span.field("vertices"), Some("2"));
    assert!(layer.span_named("shortest_path.floyd_partial").is_some());
}

#[test]
fn normalize_records_the_selected_mode() {
    let mut graph = Graph::build(
        2,
        EdgeTriplets::new(vec![0, 0], vec![0, 1], vec![1.0, 3.0]),
    )
    .expect("ids are valid");
    let (sums, layer) = record(|| normalize(&mut graph, Normalization::Rows));
    assert_eq!(sums, NormalizationSums::Rows(vec![4.0, 0.0]));
    assert_eq!(graph.weights(), &[0.25, 0.75]);

    let span = layer
        .span_named("normalize.dispatch")
        .expect("normalize.dispatch span recorded");
    assert_eq!(span.field("mode"), Some("Rows"));
    assert!(layer.span_named("normalize.rows").is_some());
}
