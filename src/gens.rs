/*!
# Graph Generators

Random and deterministic generators producing [`LinkedGraph`]s. All random
generators are parameterized over an [`Rng`], so seeded generators give
reproducible graphs.
*/

use rand::{seq::SliceRandom, Rng};

use crate::{graph::LinkedGraph, ids::*};

/// Generates an undirected Erdős–Rényi G(n, p) graph: every unordered
/// vertex pair is connected independently with probability `p`.
pub fn erdos_renyi<R: Rng>(n: NumRows, p: f64, rng: &mut R) -> LinkedGraph {
    let mut g = LinkedGraph::new(false);
    let vs: Vec<_> = (0..n).map(|_| g.add_vertex()).collect();
    for (i, &v1) in vs.iter().enumerate() {
        for &v2 in &vs[i + 1..] {
            if rng.random::<f64>() < p {
                g.add_edge(v1, v2)
                    .expect("generated vertices are always valid");
            }
        }
    }
    g
}

/// Generates an undirected grid mesh of `width * height` vertices, each
/// connected to its left and upper neighbor.
pub fn grid_graph(width: NumRows, height: NumRows) -> LinkedGraph {
    let mut g = LinkedGraph::new(false);
    for y in 0..height {
        for x in 0..width {
            let v = g.add_vertex();
            if x != 0 {
                g.add_edge(v - 1, v)
                    .expect("generated vertices are always valid");
            }
            if y != 0 {
                g.add_edge(v - width, v)
                    .expect("generated vertices are always valid");
            }
        }
    }
    g
}

/// Generates an undirected 20-vertex test graph guaranteed to have exactly
/// one component: a 10-clique, a partial clique over the other ten vertices
/// (each pair kept with probability 0.6) and a Hamiltonian connector along
/// a shuffled vertex sequence, inserted idempotently via `find_edge`.
pub fn one_component_graph<R: Rng>(rng: &mut R) -> LinkedGraph {
    let mut g = LinkedGraph::new(false);
    let mut vs: Vec<_> = (0..20).map(|_| g.add_vertex()).collect();

    for (i, &v1) in vs[..10].iter().enumerate() {
        for &v2 in &vs[i + 1..10] {
            g.add_edge(v1, v2)
                .expect("generated vertices are always valid");
        }
    }
    for (i, &v1) in vs[10..].iter().enumerate() {
        for &v2 in &vs[10 + i + 1..] {
            if rng.random::<f64>() < 0.6 {
                g.add_edge(v1, v2)
                    .expect("generated vertices are always valid");
            }
        }
    }

    vs.shuffle(rng);
    for pair in vs.windows(2) {
        g.find_edge(pair[0], pair[1])
            .expect("generated vertices are always valid");
    }
    g
}
