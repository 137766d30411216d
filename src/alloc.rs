//! Chunked node storage and byte accounting
//!
//! Nodes live in fixed-size chunks owned by the manager. Freed slots are
//! threaded onto a singly linked free list through each node's link field;
//! a chunk whose slots are all dead is returned to the system wholesale.
//! Every chunk and table allocation is charged against a [`MemGauge`] with a
//! configurable ceiling: once the ceiling is hit, the overflow flag sticks
//! and every later request fails, which is what turns into the in-band
//! *overflow* edge further up.

use log::debug;

use crate::edge::{NodeId, NIL};
use crate::node::Node;

/// Nodes per chunk.
pub(crate) const CHUNK_SIZE: usize = 1024;

/// Byte-usage meter with a hard cap and a sticky failure flag.
pub(crate) struct MemGauge {
    used: u64,
    limit: u64,
    overflow: bool,
}

impl MemGauge {
    pub(crate) fn new(limit: u64) -> MemGauge {
        MemGauge {
            used: 0,
            limit,
            overflow: false,
        }
    }

    /// Reserves `size` bytes. Fails (and latches the overflow flag) when the
    /// cap would be exceeded or a previous request already failed.
    pub(crate) fn claim(&mut self, size: u64) -> bool {
        if self.overflow || (self.limit > 0 && self.used + size > self.limit) {
            self.overflow = true;
            debug!(target: "robdd", "allocate({}) failed, {} bytes in use", size, self.used);
            return false;
        }
        self.used += size;
        true
    }

    pub(crate) fn release(&mut self, size: u64) {
        debug_assert!(self.used >= size);
        self.used -= size;
    }

    pub(crate) fn used(&self) -> u64 {
        self.used
    }

    pub(crate) fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
    }

    pub(crate) fn overflowed(&self) -> bool {
        self.overflow
    }
}

const CHUNK_BYTES: u64 = (CHUNK_SIZE * std::mem::size_of::<Node>()) as u64;

/// The slab: all node slots of one manager.
pub(crate) struct NodeArena {
    /// Chunk table; a released chunk leaves a `None` hole.
    chunks: Vec<Option<Box<[Node]>>>,
    /// Chunk currently being bump-filled, if any.
    cur_chunk: Option<usize>,
    /// Next virgin slot in the current chunk.
    cur_slot: usize,
    /// Head of the free list (threaded through node links).
    free_top: NodeId,
    free_num: u64,
    /// Allocated nodes: live plus garbage, excluding free and virgin slots.
    node_num: u64,
    /// Allocated nodes that nothing references.
    garbage_num: u64,
    gauge: MemGauge,
}

impl NodeArena {
    pub(crate) fn new(mem_limit: u64) -> NodeArena {
        NodeArena {
            chunks: Vec::new(),
            cur_chunk: None,
            cur_slot: 0,
            free_top: NIL,
            free_num: 0,
            node_num: 0,
            garbage_num: 0,
            gauge: MemGauge::new(mem_limit),
        }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        let (chunk, slot) = (id as usize / CHUNK_SIZE, id as usize % CHUNK_SIZE);
        &self.chunks[chunk]
            .as_ref()
            .expect("released chunk reached through a live edge - this is a bug in the manager")
            [slot]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        let (chunk, slot) = (id as usize / CHUNK_SIZE, id as usize % CHUNK_SIZE);
        &mut self.chunks[chunk]
            .as_mut()
            .expect("released chunk reached through a live edge - this is a bug in the manager")
            [slot]
    }

    /// Takes a slot from the free list or the bump frontier. `None` means
    /// the memory cap was hit. The fresh node is counted as garbage until
    /// something references it.
    pub(crate) fn alloc_node(&mut self) -> Option<NodeId> {
        let id = if self.free_top != NIL {
            let id = self.free_top;
            self.free_top = self.node(id).link;
            self.free_num -= 1;
            id
        } else {
            if self.cur_chunk.is_none() {
                if !self.gauge.claim(CHUNK_BYTES) {
                    return None;
                }
                let chunk = vec![Node::vacant(); CHUNK_SIZE].into_boxed_slice();
                self.chunks.push(Some(chunk));
                self.cur_chunk = Some(self.chunks.len() - 1);
                self.cur_slot = 0;
            }
            let chunk = self.cur_chunk.expect("current chunk was just ensured");
            let slot = self.cur_slot;
            self.cur_slot += 1;
            if self.cur_slot == CHUNK_SIZE {
                self.cur_chunk = None;
            }
            (chunk * CHUNK_SIZE + slot) as NodeId
        };
        self.node_num += 1;
        self.garbage_num += 1;
        Some(id)
    }

    /// Mark-sweep epilogue over the chunks: rebuilds the free list from all
    /// unreferenced slots, releases chunks that turned out fully dead, and
    /// folds the garbage count back into the statistics. Returns the number
    /// of collected nodes.
    pub(crate) fn sweep_chunks(&mut self) -> u64 {
        let collected = self.garbage_num;

        let mut dead = Vec::new();
        for idx in 0..self.chunks.len() {
            let used = if Some(idx) == self.cur_chunk {
                self.cur_slot
            } else {
                CHUNK_SIZE
            };
            let all_dead = match self.chunks[idx].as_ref() {
                Some(chunk) => chunk[..used].iter().all(Node::noref),
                None => continue,
            };
            if all_dead {
                self.chunks[idx] = None;
                self.gauge.release(CHUNK_BYTES);
                if Some(idx) == self.cur_chunk {
                    self.cur_chunk = None;
                    self.cur_slot = 0;
                }
                continue;
            }
            let chunk = self.chunks[idx].as_ref().expect("chunk checked above");
            for slot in 0..used {
                if chunk[slot].noref() {
                    dead.push((idx * CHUNK_SIZE + slot) as NodeId);
                }
            }
        }

        // Rebuild the free list in chunk order.
        self.free_top = NIL;
        self.free_num = dead.len() as u64;
        let mut prev: Option<NodeId> = None;
        for &id in &dead {
            self.node_mut(id).link = NIL;
            match prev {
                None => self.free_top = id,
                Some(p) => self.node_mut(p).link = id,
            }
            prev = Some(id);
        }

        self.node_num -= collected;
        self.garbage_num = 0;
        collected
    }

    #[inline]
    pub(crate) fn node_num(&self) -> u64 {
        self.node_num
    }

    #[inline]
    pub(crate) fn garbage_num(&self) -> u64 {
        self.garbage_num
    }

    #[inline]
    pub(crate) fn free_num(&self) -> u64 {
        self.free_num
    }

    #[inline]
    pub(crate) fn note_locked(&mut self) {
        self.garbage_num -= 1;
    }

    #[inline]
    pub(crate) fn note_unlocked(&mut self) {
        self.garbage_num += 1;
    }

    #[inline]
    pub(crate) fn gauge(&self) -> &MemGauge {
        &self.gauge
    }

    #[inline]
    pub(crate) fn gauge_mut(&mut self) -> &mut MemGauge {
        &mut self.gauge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    #[test]
    fn gauge_enforces_sticky_cap() {
        let mut g = MemGauge::new(100);
        assert!(g.claim(60));
        assert!(!g.claim(60));
        assert!(g.overflowed());
        // Sticky: even a fitting request fails now.
        assert!(!g.claim(10));
        assert_eq!(g.used(), 60);
    }

    #[test]
    fn gauge_zero_limit_is_unlimited() {
        let mut g = MemGauge::new(0);
        assert!(g.claim(u64::MAX / 2));
        assert!(!g.overflowed());
    }

    #[test]
    fn alloc_counts_garbage_until_referenced() {
        let mut a = NodeArena::new(0);
        let id = a.alloc_node().unwrap();
        assert_eq!(a.node_num(), 1);
        assert_eq!(a.garbage_num(), 1);
        a.node_mut(id).ref_mark.inc();
        a.note_locked();
        assert_eq!(a.garbage_num(), 0);
    }

    #[test]
    fn sweep_reclaims_dead_slots_and_whole_chunks() {
        let mut a = NodeArena::new(0);
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(a.alloc_node().unwrap());
        }
        // Keep one node alive; the chunk must survive with two slots freed
        // onto the list (plus nothing else: virgin slots stay virgin).
        a.node_mut(ids[1]).ref_mark.inc();
        a.note_locked();
        let collected = a.sweep_chunks();
        assert_eq!(collected, 2);
        assert_eq!(a.node_num(), 1);
        assert_eq!(a.free_num(), 2);

        // Free-list reuse hands back a swept slot.
        let reused = a.alloc_node().unwrap();
        assert!(reused == ids[0] || reused == ids[2]);
    }

    #[test]
    fn sweep_releases_fully_dead_chunk() {
        let mut a = NodeArena::new(0);
        for _ in 0..CHUNK_SIZE {
            a.alloc_node().unwrap();
        }
        let used_before = a.gauge().used();
        let collected = a.sweep_chunks();
        assert_eq!(collected, CHUNK_SIZE as u64);
        assert_eq!(a.node_num(), 0);
        assert_eq!(a.free_num(), 0);
        assert!(a.gauge().used() < used_before);
    }

    #[test]
    fn node_fields_survive_round_trip() {
        let mut a = NodeArena::new(0);
        let id = a.alloc_node().unwrap();
        {
            let n = a.node_mut(id);
            n.edge0 = Edge::zero();
            n.edge1 = Edge::one();
            n.level = 5;
        }
        assert_eq!(a.node(id).level(), 5);
        assert_eq!(a.node(id).edge1(), Edge::one());
    }
}
