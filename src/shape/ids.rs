//! Group identifiers and instance identity.
//!
//! A shape's instance is the pair (label, group). Shapes without a group id
//! get a freshly generated one, which makes each of them a singleton
//! instance. Generated ids are tagged separately from ids read from the
//! annotation so the two can never collide.

use rand::{rngs::StdRng, RngExt, SeedableRng};
use std::fmt;

/// The group half of an instance identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// A group id supplied by the annotation.
    Given(i64),
    /// An id generated for a shape that had none.
    Generated(u64),
}

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Given(id) => write!(f, "Given({})", id),
            GroupKey::Generated(id) => write!(f, "Generated({:#x})", id),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Given(id) => write!(f, "{}", id),
            GroupKey::Generated(id) => write!(f, "~{:x}", id),
        }
    }
}

/// The identity of an instance: shapes sharing a label and group are one instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceKey {
    pub label: String,
    pub group: GroupKey,
}

impl InstanceKey {
    pub fn new(label: impl Into<String>, group: GroupKey) -> Self {
        Self {
            label: label.into(),
            group,
        }
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.label, self.group)
    }
}

/// A source of fresh group ids for shapes that have none.
///
/// Implementations must not repeat an id within one builder call.
pub trait GroupIdSource {
    fn next_id(&mut self) -> u64;
}

/// Monotonic counter, the default source.
#[derive(Clone, Debug, Default)]
pub struct SequentialGroupIds {
    next: u64,
}

impl SequentialGroupIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl GroupIdSource for SequentialGroupIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random 64-bit ids, optionally seeded for reproducible runs.
pub struct RandomGroupIds {
    rng: StdRng,
}

impl fmt::Debug for RandomGroupIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomGroupIds").finish_non_exhaustive()
    }
}

impl RandomGroupIds {
    /// Creates a source seeded from the thread-local generator.
    pub fn new() -> Self {
        let seed = rand::rng().random::<u64>();
        Self::seeded(seed)
    }

    /// Creates a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGroupIds {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupIdSource for RandomGroupIds {
    fn next_id(&mut self) -> u64 {
        self.rng.random::<u64>()
    }
}
