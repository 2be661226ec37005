//! Lattice adjacency graphs over integer 3D coordinates.

use std::collections::HashMap;
use std::fmt;

use tracing::instrument;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

use super::EdgeSink;

/// Neighbourhood class of a 3D lattice point.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GridConnectivity {
    /// Face neighbours only.
    Six,
    /// Face and edge neighbours.
    Eighteen,
    /// Face, edge and corner neighbours.
    TwentySix,
}

impl GridConnectivity {
    /// Number of neighbours an interior lattice point has.
    #[must_use]
    pub const fn neighbor_count(self) -> u32 {
        match self {
            Self::Six => 6,
            Self::Eighteen => 18,
            Self::TwentySix => 26,
        }
    }

    /// Largest number of non-zero components an offset may have.
    const fn max_nonzero(self) -> u32 {
        match self {
            Self::Six => 1,
            Self::Eighteen => 2,
            Self::TwentySix => 3,
        }
    }

    /// Offsets in lexicographic order with their component counts.
    fn offsets(self) -> impl Iterator<Item = ([i64; 3], u32)> {
        let steps = [-1_i64, 0, 1];
        steps
            .into_iter()
            .flat_map(move |dx| {
                steps
                    .into_iter()
                    .flat_map(move |dy| steps.into_iter().map(move |dz| [dx, dy, dz]))
            })
            .filter_map(move |offset| {
                let nonzero = offset.iter().map(|&step| u32::from(step != 0)).sum::<u32>();
                (nonzero > 0 && nonzero <= self.max_nonzero()).then_some((offset, nonzero))
            })
    }
}

impl TryFrom<u32> for GridConnectivity {
    type Error = GraphError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            6 => Ok(Self::Six),
            18 => Ok(Self::Eighteen),
            26 => Ok(Self::TwentySix),
            other => Err(GraphError::invalid_parameter(
                "connectivity",
                format!("must be 6, 18 or 26, got {other}"),
            )),
        }
    }
}

impl fmt::Display for GridConnectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.neighbor_count().fmt(f)
    }
}

/// Links lattice points that are adjacent under `connectivity`.
///
/// Vertex `i` is the point `coords[i]`. Edge weights are the Euclidean
/// offset lengths 1, sqrt 2 or sqrt 3. Every point's edges are emitted in
/// lexicographic offset order, and the graph is symmetric.
///
/// # Errors
/// Returns [`GraphError::GraphConstructionFailed`] when two vertices share a
/// coordinate, since the coordinate lookup would be ambiguous.
///
/// # Examples
/// ```
/// use weft_core::{GridConnectivity, grid_graph};
///
/// let coords = [[0, 0, 0], [1, 0, 0], [1, 1, 0]];
/// let faces = grid_graph(&coords, GridConnectivity::Six)?;
/// assert_eq!(faces.edge_count(), 4);
/// let edges = grid_graph(&coords, GridConnectivity::Eighteen)?;
/// assert_eq!(edges.edge_count(), 6);
/// # Ok::<(), weft_core::GraphError>(())
/// ```
#[instrument(
    name = "metric.grid",
    err,
    skip(coords),
    fields(points = coords.len(), connectivity = %connectivity),
)]
pub fn grid_graph(coords: &[[i64; 3]], connectivity: GridConnectivity) -> Result<Graph> {
    let mut lookup = HashMap::with_capacity(coords.len());
    for (index, &coord) in coords.iter().enumerate() {
        if let Some(first) = lookup.insert(coord, index) {
            return Err(GraphError::GraphConstructionFailed {
                reason: format!("points {first} and {index} share lattice coordinate {coord:?}"),
            });
        }
    }

    let offsets: Vec<_> = connectivity.offsets().collect();
    let mut sink = EdgeSink::default();
    for (origin, coord) in coords.iter().enumerate() {
        for &(offset, nonzero) in &offsets {
            let Some(neighbor) = shifted(*coord, offset) else {
                continue;
            };
            if let Some(&end) = lookup.get(&neighbor) {
                sink.push(origin, end, f64::from(nonzero).sqrt());
            }
        }
    }
    Ok(sink.finish("grid", coords.len()))
}

fn shifted(coord: [i64; 3], offset: [i64; 3]) -> Option<[i64; 3]> {
    Some([
        coord[0].checked_add(offset[0])?,
        coord[1].checked_add(offset[1])?,
        coord[2].checked_add(offset[2])?,
    ])
}
