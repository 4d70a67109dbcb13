//! Thread-local reactive execution context.
//!
//! The [`Reactor`] owns everything that is shared between tracked containers
//! on a thread:
//!
//! - **Atoms**: per-administration change sources ([`Atom`]). Reads report
//!   the atom as observed, writes report it as changed.
//! - **Batches**: a reentrant depth counter entered through [`start_batch`].
//!   Data is mutated eagerly, but reactions scheduled by changes only run once
//!   the outermost [`BatchGuard`] is dropped.
//! - **Reactions**: effects created by [`autorun`] that re-run once per batch
//!   epoch in which any atom they read has changed.
//!
//! ```text
//! write ──► Atom::report_changed ──► pending reactions
//!                                        │
//! BatchGuard drop (depth 0) ──► flush ───┘──► reaction re-runs, re-tracks reads
//! ```

/// Change sources reported by administrations.
pub mod atom;
/// Batch epoch guard.
pub mod batch;
/// Reactor configuration.
pub mod config;
/// Tracked side effects.
pub mod reaction;
mod reactor;

pub use atom::{Atom, AtomId};
pub use batch::{BatchGuard, batch, batch_depth, start_batch};
pub use config::{ConfigError, ReactionErrorHandling, ReactorConfig};
pub use reaction::{ReactionHandle, ReactionId, autorun};
pub use reactor::Reactor;
