//! Waypath Core -- the incremental shortest-path engine behind the route
//! visualizer.
//!
//! This crate provides the weighted undirected graph, the random scenario
//! generator, the steppable Dijkstra engine, the frame-time stepper, command
//! recording/replay, and the deterministic RNG and state hashing that every
//! Waypath front end depends on.
//!
//! # Step Loop
//!
//! The engine never runs to completion on its own: a driver calls
//! [`engine::Engine::step`] (usually through [`stepper::Stepper::tick`]) and
//! receives exactly one [`event::StepEvent`] describing what changed. Each
//! step:
//!
//! 1. **Pop** -- take the cheapest frontier entry, silently discarding stale
//!    duplicates.
//! 2. **Visit** -- finalize the node; its distance is exact from now on.
//! 3. **Relax** -- improve undiscovered/cheaper neighbors and push them onto
//!    the frontier.
//! 4. **Terminate** -- `Found` when the target itself is finalized,
//!    `Exhausted` when the frontier drains first.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Steppable single-source shortest-path engine with
//!   an explicit [`engine::Phase`] lifecycle.
//! - [`graph::Graph`] -- Immutable undirected weighted graph in the plane,
//!   built through [`graph::GraphBuilder`].
//! - [`generator::generate`] -- Random connected scenario generator
//!   (grid-jittered layout, greedy spanning, bounded extra edges).
//! - [`stepper::Stepper`] -- Converts continuous frame time into discrete
//!   engine steps at a fixed threshold.
//! - [`event::StepEvent`] -- Tagged per-step observation stream for drivers
//!   and analytics.
//! - [`replay::CommandLog`] -- Recorded driver sessions with hash-verified
//!   playback.
//! - [`rng::GenRng`] -- Seedable SplitMix64 generator; identical seeds
//!   reproduce identical scenarios.

pub mod engine;
pub mod event;
pub mod generator;
pub mod graph;
pub mod heap;
pub mod id;
#[cfg(feature = "json-io")]
pub mod loader;
pub mod replay;
pub mod rng;
pub mod stepper;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
