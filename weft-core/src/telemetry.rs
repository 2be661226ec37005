//! Counters emitted when the `metrics` feature is enabled.

#[cfg(feature = "metrics")]
pub(crate) fn record_edges_built(builder: &'static str, edges: usize) {
    metrics::counter!("weft_graph_edges_built", "builder" => builder).increment(edges as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_edges_built(_builder: &'static str, _edges: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_mst_round() {
    metrics::counter!("weft_mst_rounds").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_mst_round() {}
