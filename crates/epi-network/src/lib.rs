//! `epi-network` — the static contact graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`network`]  | `ContactNetwork` (CSR adjacency), `ContactNetworkBuilder`    |
//! | [`topology`] | `Topology` generators, `TopologyParams`                      |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                           |
//!
//! Node ids are `AgentId`s: node `i` is agent `i`.  The graph is undirected,
//! simple (no self-loops, no parallel edges) and immutable once built.

pub mod error;
pub mod network;
pub mod topology;


pub use error::{NetworkError, NetworkResult};
pub use network::{ContactNetwork, ContactNetworkBuilder};
pub use topology::{Topology, TopologyParams};
