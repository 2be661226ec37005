//! Priority-queue frontier shared by every shortest-path routine.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::NeighborList;

/// Heap entry keyed by `(distance, rank)`; `vertex` only breaks exact ties
/// so the ordering is total.
#[derive(Clone, Copy, Debug)]
struct Entry {
    distance: f64,
    rank: usize,
    vertex: usize,
}

impl Entry {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: `BinaryHeap` pops its maximum.
        other
            .key_cmp(self)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Final distance and owning seed rank of every vertex.
#[derive(Debug)]
pub(crate) struct Settled {
    pub(crate) distances: Vec<Option<f64>>,
    pub(crate) owners: Vec<Option<usize>>,
}

impl Settled {
    pub(crate) fn reached(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    pub(crate) fn distances_or(&self, unreached: f64) -> Vec<f64> {
        self.distances
            .iter()
            .map(|distance| distance.unwrap_or(unreached))
            .collect()
    }
}

/// Runs a lexicographic Dijkstra from every seed at distance zero.
///
/// `seeds` are vertex ids in priority order: a vertex equidistant from two
/// seeds is owned by the one listed first. Ids must be valid for `csr`.
pub(crate) fn settle(csr: &NeighborList, seeds: &[usize]) -> Settled {
    let vertex_count = csr.vertex_count();
    let mut best: Vec<Option<Entry>> = vec![None; vertex_count];
    let mut settled = Settled {
        distances: vec![None; vertex_count],
        owners: vec![None; vertex_count],
    };
    let mut heap = BinaryHeap::with_capacity(seeds.len());

    for (rank, &vertex) in seeds.iter().enumerate() {
        if best[vertex].is_none() {
            let entry = Entry {
                distance: 0.0,
                rank,
                vertex,
            };
            best[vertex] = Some(entry);
            heap.push(entry);
        }
    }

    while let Some(entry) = heap.pop() {
        if settled.distances[entry.vertex].is_some() {
            continue;
        }
        settled.distances[entry.vertex] = Some(entry.distance);
        settled.owners[entry.vertex] = Some(entry.rank);

        for (end, weight) in csr.outgoing(entry.vertex) {
            if settled.distances[end].is_some() {
                continue;
            }
            let candidate = Entry {
                distance: entry.distance + weight,
                rank: entry.rank,
                vertex: end,
            };
            let improves = best[end].is_none_or(|known| candidate.key_cmp(&known).is_lt());
            if improves {
                best[end] = Some(candidate);
                heap.push(candidate);
            }
        }
    }

    settled
}
