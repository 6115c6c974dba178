//! Seeded random-graph generators.
//!
//! A topology is selected by name at configuration time and turned into a
//! [`ContactNetwork`] exactly once, before the first simulated day.  All
//! randomness comes from the caller's [`SimRng`], so the same seed always
//! produces the same edge set.
//!
//! | Name (aliases)                      | Parameters                               |
//! |-------------------------------------|------------------------------------------|
//! | `empty`                             | —                                        |
//! | `complete`                          | —                                        |
//! | `erdos_renyi` (`random`, `gnp`)     | `edge_probability` or `mean_degree`      |
//! | `watts_strogatz` (`small_world`)    | `mean_degree`, `rewire_probability`      |
//! | `barabasi_albert` (`scale_free`)    | `attachments`                            |

use serde::{Deserialize, Serialize};

use epi_core::{check_probability, AgentId, SimRng};

use crate::{ContactNetwork, ContactNetworkBuilder, NetworkError, NetworkResult};

// ── TopologyParams ────────────────────────────────────────────────────────────

/// Raw, name-independent generator parameters as they appear in configuration.
///
/// Each topology reads only the fields it needs; [`Topology::from_name`]
/// reports a missing required field as a configuration error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopologyParams {
    /// Small-world lattice degree `k`, or the target average degree for
    /// `erdos_renyi` when no edge probability is given.
    pub mean_degree: Option<usize>,
    /// Small-world rewiring probability `β`.
    pub rewire_probability: Option<f64>,
    /// Independent per-pair edge probability for `erdos_renyi`.
    pub edge_probability: Option<f64>,
    /// Edges added per new node for `barabasi_albert`.
    pub attachments: Option<usize>,
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// A validated graph family with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Topology {
    /// No edges at all.
    Empty,
    /// Every pair of nodes is connected.
    Complete,
    /// `G(n, p)`: each pair connected independently with probability `p`.
    ErdosRenyi { edge_probability: f64 },
    /// Ring lattice of degree `k` with each lattice edge rewired with
    /// probability `β` to a uniformly chosen non-adjacent node.
    WattsStrogatz { mean_degree: usize, rewire_probability: f64 },
    /// Preferential attachment: each new node links to `m` existing nodes
    /// chosen proportionally to degree.
    BarabasiAlbert { attachments: usize },
}

impl Topology {
    /// Resolve a configuration name + parameters for a graph of `node_count`
    /// nodes.  Unknown names never fall back to a default.
    pub fn from_name(
        name:       &str,
        params:     &TopologyParams,
        node_count: usize,
    ) -> NetworkResult<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "empty" | "none" => Ok(Topology::Empty),

            "complete" | "fully_connected" => Ok(Topology::Complete),

            "erdos_renyi" | "random" | "gnp" => {
                let edge_probability = match (params.edge_probability, params.mean_degree) {
                    (Some(p), _) => check_probability("edge_probability", p)?,
                    (None, Some(k)) if node_count > 1 => {
                        (k as f64 / (node_count - 1) as f64).min(1.0)
                    }
                    (None, Some(_)) => 0.0,
                    (None, None) => {
                        return Err(NetworkError::MissingParameter {
                            topology: "erdos_renyi",
                            param:    "edge_probability",
                        });
                    }
                };
                Ok(Topology::ErdosRenyi { edge_probability })
            }

            "watts_strogatz" | "small_world" => {
                let mean_degree = params.mean_degree.ok_or(NetworkError::MissingParameter {
                    topology: "watts_strogatz",
                    param:    "mean_degree",
                })?;
                let beta = params.rewire_probability.ok_or(NetworkError::MissingParameter {
                    topology: "watts_strogatz",
                    param:    "rewire_probability",
                })?;
                let rewire_probability = check_probability("rewire_probability", beta)?;
                if node_count > 0 && mean_degree >= node_count {
                    return Err(NetworkError::InvalidParameter {
                        topology: "watts_strogatz",
                        reason:   format!(
                            "mean_degree {mean_degree} must be smaller than the node count {node_count}"
                        ),
                    });
                }
                Ok(Topology::WattsStrogatz { mean_degree, rewire_probability })
            }

            "barabasi_albert" | "scale_free" => {
                let attachments = params.attachments.ok_or(NetworkError::MissingParameter {
                    topology: "barabasi_albert",
                    param:    "attachments",
                })?;
                if attachments == 0 || attachments >= node_count {
                    return Err(NetworkError::InvalidParameter {
                        topology: "barabasi_albert",
                        reason:   format!(
                            "attachments must satisfy 1 <= m < {node_count}, got {attachments}"
                        ),
                    });
                }
                Ok(Topology::BarabasiAlbert { attachments })
            }

            _ => Err(NetworkError::UnknownTopology(name.to_owned())),
        }
    }

    /// Canonical configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Topology::Empty               => "empty",
            Topology::Complete            => "complete",
            Topology::ErdosRenyi { .. }   => "erdos_renyi",
            Topology::WattsStrogatz { .. } => "watts_strogatz",
            Topology::BarabasiAlbert { .. } => "barabasi_albert",
        }
    }

    /// Generate a graph over `node_count` nodes, drawing from `rng`.
    pub fn generate(&self, node_count: usize, rng: &mut SimRng) -> NetworkResult<ContactNetwork> {
        if node_count > u32::MAX as usize {
            return Err(NetworkError::TooManyNodes { nodes: node_count, max: u32::MAX as usize });
        }
        let mut b = ContactNetworkBuilder::new(node_count);
        match *self {
            Topology::Empty => {}
            Topology::Complete => complete(&mut b, node_count),
            Topology::ErdosRenyi { edge_probability } => {
                erdos_renyi(&mut b, node_count, edge_probability, rng)
            }
            Topology::WattsStrogatz { mean_degree, rewire_probability } => {
                watts_strogatz(&mut b, node_count, mean_degree, rewire_probability, rng)
            }
            Topology::BarabasiAlbert { attachments } => {
                barabasi_albert(&mut b, node_count, attachments, rng)
            }
        }
        Ok(b.build())
    }
}

impl ContactNetwork {
    /// Build a network from a topology name, parameters and a seed.
    ///
    /// Equivalent to `Topology::from_name(..)?.generate(n, &mut SimRng::new(seed))`.
    /// The engine itself passes its own RNG to [`Topology::generate`] instead.
    pub fn generate(
        topology:   &str,
        node_count: usize,
        params:     &TopologyParams,
        seed:       u64,
    ) -> NetworkResult<ContactNetwork> {
        let mut rng = SimRng::new(seed);
        Topology::from_name(topology, params, node_count)?.generate(node_count, &mut rng)
    }
}

// ── Generators ────────────────────────────────────────────────────────────────

#[inline]
fn id(i: usize) -> AgentId {
    AgentId(i as u32)
}

fn complete(b: &mut ContactNetworkBuilder, n: usize) {
    for u in 0..n {
        for v in (u + 1)..n {
            b.add_edge(id(u), id(v));
        }
    }
}

fn erdos_renyi(b: &mut ContactNetworkBuilder, n: usize, p: f64, rng: &mut SimRng) {
    if p <= 0.0 {
        return;
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                b.add_edge(id(u), id(v));
            }
        }
    }
}

fn watts_strogatz(b: &mut ContactNetworkBuilder, n: usize, k: usize, beta: f64, rng: &mut SimRng) {
    let half = k / 2;
    if n == 0 || half == 0 {
        return;
    }

    // Ring lattice: each node joined to its `k/2` successors (and therefore
    // to its `k/2` predecessors).
    for j in 1..=half {
        for u in 0..n {
            b.add_edge(id(u), id((u + j) % n));
        }
    }

    if beta <= 0.0 {
        return;
    }

    // Rewire lattice edges one ring distance at a time.  A node already
    // adjacent to everyone keeps its edge.
    for j in 1..=half {
        for u in 0..n {
            if rng.uniform() >= beta {
                continue;
            }
            if b.degree(id(u)) >= n - 1 {
                continue;
            }
            let v = (u + j) % n;
            let mut w = rng.gen_range(0..n);
            while w == u || b.has_edge(id(u), id(w)) {
                w = rng.gen_range(0..n);
            }
            b.remove_edge(id(u), id(v));
            b.add_edge(id(u), id(w));
        }
    }
}

fn barabasi_albert(b: &mut ContactNetworkBuilder, n: usize, m: usize, rng: &mut SimRng) {
    // Start from `m` isolated seed nodes; the first newcomer links to all of
    // them.  Afterwards targets are drawn from a degree-weighted pool.
    let mut targets: Vec<usize> = (0..m).collect();
    let mut repeated: Vec<usize> = Vec::with_capacity(2 * n * m);

    for source in m..n {
        for &t in &targets {
            b.add_edge(id(source), id(t));
        }
        repeated.extend_from_slice(&targets);
        repeated.extend(std::iter::repeat(source).take(m));

        let mut next: Vec<usize> = Vec::with_capacity(m);
        while next.len() < m {
            if let Some(&x) = rng.choose(&repeated) {
                if !next.contains(&x) {
                    next.push(x);
                }
            }
        }
        targets = next;
    }
}
