//! Cross-resolution bookkeeping for singleton construction.
//!
//! A resolution that starts building a singleton claims its slot here. A
//! resolution that finds the slot claimed by another one records the slot it
//! is about to wait for, then blocks until the claim is released. Before
//! blocking it follows the chain of claims and waits; if that chain leads back
//! to itself the wait could never end, and the loop is reported instead.

use crate::key::TypeKey;
use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::trace;

/// Identifies one top-level resolution.
pub(crate) type ResolutionId = u64;

/// Identifies one singleton slot.
pub(crate) type SlotId = usize;

static NEXT_RESOLUTION: AtomicU64 = AtomicU64::new(0);
static NEXT_SLOT: AtomicUsize = AtomicUsize::new(0);

static GRAPH: Lazy<Mutex<WaitGraph>> = Lazy::new(|| Mutex::new(WaitGraph::default()));
static RELEASED: Condvar = Condvar::new();

pub(crate) fn next_resolution() -> ResolutionId {
  NEXT_RESOLUTION.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn next_slot() -> SlotId {
  NEXT_SLOT.fetch_add(1, Ordering::Relaxed)
}

struct Claim {
  owner: ResolutionId,
  key: TypeKey,
}

#[derive(Default)]
struct WaitGraph {
  claims: HashMap<SlotId, Claim>,
  waiting: HashMap<ResolutionId, SlotId>,
}

impl WaitGraph {
  /// Follows claims and waits starting at `owner`. Returns the keys of the
  /// slots passed through if the chain reaches `resolution`.
  ///
  /// Waits are only recorded when they close no loop, so the chain always ends.
  fn loop_back(&self, mut owner: ResolutionId, resolution: ResolutionId) -> Option<Vec<TypeKey>> {
    let mut keys = Vec::new();
    loop {
      if owner == resolution {
        return Some(keys);
      }
      let claim = self
        .waiting
        .get(&owner)
        .and_then(|slot| self.claims.get(slot))?;
      keys.push(claim.key);
      owner = claim.owner;
    }
  }
}

/// Held by the resolution building a slot; releases the claim and wakes the
/// waiters when dropped, including on unwind.
pub(crate) struct SlotClaim {
  slot: SlotId,
}

impl Drop for SlotClaim {
  fn drop(&mut self) {
    GRAPH.lock().claims.remove(&self.slot);
    RELEASED.notify_all();
  }
}

/// Claims `slot` for `resolution`, blocking while another resolution holds it.
///
/// Returns `Ok(None)` once `filled` reports the slot as populated, and
/// `Ok(Some(claim))` when the caller has to build it. If blocking would close
/// a loop of resolutions waiting on each other, returns the keys of the slots
/// along that loop.
pub(crate) fn claim(
  slot: SlotId,
  key: TypeKey,
  resolution: ResolutionId,
  filled: impl Fn() -> bool,
) -> Result<Option<SlotClaim>, Vec<TypeKey>> {
  let mut graph = GRAPH.lock();
  loop {
    if filled() {
      return Ok(None);
    }

    let Some(owner) = graph.claims.get(&slot).map(|claim| claim.owner) else {
      graph.claims.insert(slot, Claim { owner: resolution, key });
      return Ok(Some(SlotClaim { slot }));
    };

    if let Some(keys) = graph.loop_back(owner, resolution) {
      return Err(keys);
    }

    trace!(implementation = key.name(), "waiting for singleton under construction");
    graph.waiting.insert(resolution, slot);
    RELEASED.wait(&mut graph);
    graph.waiting.remove(&resolution);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Alpha;
  struct Beta;

  fn claim_of(owner: ResolutionId, key: TypeKey) -> Claim {
    Claim { owner, key }
  }

  #[test]
  fn chain_without_loop_is_not_reported() {
    let mut graph = WaitGraph::default();
    graph.claims.insert(1, claim_of(10, TypeKey::of::<Alpha>()));

    // 10 owns slot 1 and waits on nothing.
    assert!(graph.loop_back(10, 20).is_none());
  }

  #[test]
  fn chain_back_to_the_caller_is_reported() {
    let mut graph = WaitGraph::default();
    graph.claims.insert(1, claim_of(10, TypeKey::of::<Alpha>()));
    graph.claims.insert(2, claim_of(20, TypeKey::of::<Beta>()));
    graph.waiting.insert(10, 2);

    // 20 asks for slot 1: 10 owns it and is waiting on slot 2, which 20 owns.
    let keys = graph.loop_back(10, 20).unwrap();
    assert_eq!(keys, vec![TypeKey::of::<Beta>()]);
  }
}
