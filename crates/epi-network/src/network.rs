//! Contact graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** adjacency.  Given an
//! `AgentId n`, its neighbours occupy the slice:
//!
//! ```text
//! adjacency[ node_start[n] .. node_start[n+1] ]
//! ```
//!
//! Every undirected edge is stored once in each direction, and each
//! neighbour slice is sorted ascending.  A neighbour lookup is therefore a
//! contiguous, allocation-free borrow with a deterministic order; the
//! exposure scan samples from it directly.

use rustc_hash::FxHashSet;

use epi_core::AgentId;

// ── ContactNetwork ────────────────────────────────────────────────────────────

/// Undirected, immutable contact graph over nodes `0..node_count`.
///
/// Fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`ContactNetworkBuilder`] or a
/// [`Topology`][crate::Topology] generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactNetwork {
    /// CSR row pointer.  Neighbours of node `n` are at
    /// `node_start[n] .. node_start[n+1]`.  Length = `node_count + 1`.
    pub node_start: Vec<u32>,

    /// Concatenated, per-node sorted neighbour lists.
    pub adjacency: Vec<AgentId>,
}

impl ContactNetwork {
    /// `node_count` isolated nodes.
    pub fn empty(node_count: usize) -> Self {
        ContactNetworkBuilder::new(node_count).build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_start.len().saturating_sub(1)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Average number of neighbours per node (`2E / N`).
    pub fn mean_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.adjacency.len() as f64 / self.node_count() as f64
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Sorted neighbour ids of `node` (possibly empty).
    #[inline]
    pub fn neighbors(&self, node: AgentId) -> &[AgentId] {
        let start = self.node_start[node.index()] as usize;
        let end   = self.node_start[node.index() + 1] as usize;
        &self.adjacency[start..end]
    }

    #[inline]
    pub fn degree(&self, node: AgentId) -> usize {
        let start = self.node_start[node.index()] as usize;
        let end   = self.node_start[node.index() + 1] as usize;
        end - start
    }

    /// `true` if `a` and `b` are adjacent.
    pub fn has_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Iterator over all node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.node_count() as u32).map(AgentId)
    }

    /// Each undirected edge once, as `(low, high)` in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.nodes().flat_map(move |a| {
            self.neighbors(a)
                .iter()
                .copied()
                .filter(move |&b| a < b)
                .map(move |b| (a, b))
        })
    }
}

// ── ContactNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`ContactNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder keeps an edge set so generators can test, add and remove
/// edges while rewiring.  Self-loops and duplicate edges are rejected.
///
/// # Example
///
/// ```
/// use epi_core::AgentId;
/// use epi_network::ContactNetworkBuilder;
///
/// let mut b = ContactNetworkBuilder::new(3);
/// b.add_edge(AgentId(0), AgentId(1));
/// b.add_edge(AgentId(1), AgentId(2));
/// let net = b.build();
/// assert_eq!(net.edge_count(), 2);
/// assert_eq!(net.neighbors(AgentId(1)), &[AgentId(0), AgentId(2)]);
/// ```
pub struct ContactNetworkBuilder {
    node_count: usize,
    edges:      FxHashSet<(u32, u32)>,
    degrees:    Vec<u32>,
}

impl ContactNetworkBuilder {
    pub fn new(node_count: usize) -> Self {
        debug_assert!(node_count <= u32::MAX as usize);
        Self {
            node_count,
            edges:   FxHashSet::default(),
            degrees: vec![0; node_count],
        }
    }

    #[inline]
    fn key(a: AgentId, b: AgentId) -> (u32, u32) {
        if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) }
    }

    /// Add the undirected edge `a — b`.
    ///
    /// Returns `false` (and changes nothing) for self-loops, duplicates and
    /// out-of-range endpoints.
    pub fn add_edge(&mut self, a: AgentId, b: AgentId) -> bool {
        if a == b || a.index() >= self.node_count || b.index() >= self.node_count {
            return false;
        }
        if !self.edges.insert(Self::key(a, b)) {
            return false;
        }
        self.degrees[a.index()] += 1;
        self.degrees[b.index()] += 1;
        true
    }

    /// Remove the undirected edge `a — b`.  Returns `false` if absent.
    pub fn remove_edge(&mut self, a: AgentId, b: AgentId) -> bool {
        if !self.edges.remove(&Self::key(a, b)) {
            return false;
        }
        self.degrees[a.index()] -= 1;
        self.degrees[b.index()] -= 1;
        true
    }

    pub fn has_edge(&self, a: AgentId, b: AgentId) -> bool {
        self.edges.contains(&Self::key(a, b))
    }

    pub fn degree(&self, node: AgentId) -> usize {
        self.degrees[node.index()] as usize
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`ContactNetwork`].
    ///
    /// Time complexity: O(E log E) for the directed-edge sort.
    pub fn build(self) -> ContactNetwork {
        let node_count = self.node_count;

        // Both directions of every edge, sorted by (from, to) so that each
        // CSR row is itself sorted.  The hash-set order never leaks out.
        let mut directed: Vec<(u32, u32)> = Vec::with_capacity(self.edges.len() * 2);
        for &(a, b) in &self.edges {
            directed.push((a, b));
            directed.push((b, a));
        }
        directed.sort_unstable();

        let mut node_start = vec![0u32; node_count + 1];
        for &(from, _) in &directed {
            node_start[from as usize + 1] += 1;
        }
        for i in 1..=node_count {
            node_start[i] += node_start[i - 1];
        }
        debug_assert_eq!(node_start[node_count] as usize, directed.len());

        let adjacency = directed.into_iter().map(|(_, to)| AgentId(to)).collect();

        ContactNetwork { node_start, adjacency }
    }
}
