//! `hx-cluster` — partitioning agent positions into movement clusters.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`assigner`]    | `ClusterAssigner` trait (points → dense labels)            |
//! | [`affinity`]    | `AffinityPropagation` — exemplar-based clustering          |
//! | [`linkage`]     | `RadiusLinkage` — complete linkage bounded by a radius     |
//! | [`resolution`]  | `ClusterResolution` — labels + centroids keyed by agent    |
//!
//! # Pluggability
//!
//! `hx-sim` resolves clusters through the [`ClusterAssigner`] trait, so the
//! partitioning method can be swapped without touching agent behavior.  Every
//! implementation must return labels covering `0..k` with no gaps, in input
//! order, and must be deterministic for a fixed configuration.

pub mod affinity;
pub mod assigner;
pub mod linkage;
pub mod resolution;


pub use affinity::AffinityPropagation;
pub use assigner::ClusterAssigner;
pub use linkage::RadiusLinkage;
pub use resolution::{ClusterAssignment, ClusterResolution};
