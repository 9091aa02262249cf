//! Lariat: a doubly linked chain of fixed-capacity array blocks.
//!
//! Structure:
//! - Each node holds up to `N` elements in a block that never reallocates
//! - Nodes live in an arena Vec and are linked by u32 indices (no raw pointers)
//! - Freed nodes go on a free list and are recycled by later allocations
//!
//! Operations:
//! - at/get: O(nodes) - walk the chain from the head accumulating counts
//! - insert/remove: O(nodes + N) - locate, shift within the block, split or
//!   drop a node when it overflows or empties
//! - push_back/push_front/pop_back/pop_front: O(N) - touch boundary blocks only
//! - compact: O(n) - pull elements forward until every block but the last is full
//!
//! The chain trades O(1) index math for O(sqrt n)-ish traversal when blocks are
//! kept balanced by splitting and compaction.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// Index into the node arena.
type NodeIdx = u32;
/// Sentinel value for no neighbor / empty chain.
const NONE: u32 = u32::MAX;

/// One block of the chain.
struct Node<T> {
    /// Live elements. The Vec is created with exactly `N` slots reserved and
    /// its length never exceeds `N`, so the block never reallocates.
    elems: Vec<T>,
    /// Next node in the chain (NONE for the tail).
    next: NodeIdx,
    /// Previous node in the chain (NONE for the head).
    prev: NodeIdx,
}

/// A random-access sequence stored as a doubly linked chain of array blocks,
/// each holding up to `N` elements.
///
/// Mid-sequence insertion shifts within one block and splits it on overflow;
/// removal shifts within one block and drops it when it empties. An explicit
/// [`compact`](Lariat::compact) pass repacks blocks to the minimum count.
pub struct Lariat<T, const N: usize> {
    /// Node arena. Links are indices into this Vec.
    nodes: Vec<Node<T>>,
    /// First node in the chain (NONE when empty).
    head: NodeIdx,
    /// Last node in the chain (NONE when empty).
    tail: NodeIdx,
    /// Total live elements across all nodes.
    len: usize,
    /// Number of nodes in the chain.
    node_count: usize,
    /// Arena slots of freed nodes, available for reuse.
    free_nodes: Vec<NodeIdx>,
}

impl<T, const N: usize> Lariat<T, N> {
    /// Create an empty lariat.
    pub fn new() -> Lariat<T, N> {
        const { assert!(N > 0, "per-node capacity must be nonzero") }
        return Lariat {
            nodes: Vec::new(),
            head: NONE,
            tail: NONE,
            len: 0,
            node_count: 0,
            free_nodes: Vec::new(),
        };
    }

    /// Number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        return self.len;
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Number of nodes currently in the chain.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        return self.node_count;
    }

    // =========================================================================
    // Node store
    // =========================================================================

    /// Allocate a fresh unlinked node, reusing from the free list if possible.
    ///
    /// This is the only fallible resource acquisition in the container. It runs
    /// before any structural mutation, so a failed operation changes nothing.
    fn alloc_node(&mut self) -> Result<NodeIdx> {
        if let Some(idx) = self.free_nodes.pop() {
            let node = &mut self.nodes[idx as usize];
            debug_assert!(node.elems.is_empty());
            node.next = NONE;
            node.prev = NONE;
            return Ok(idx);
        }

        self.nodes.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        let mut elems = Vec::new();
        elems.try_reserve_exact(N).map_err(|_| Error::OutOfMemory)?;

        let idx = self.nodes.len() as NodeIdx;
        self.nodes.push(Node { elems, next: NONE, prev: NONE });
        return Ok(idx);
    }

    /// Return an unlinked node's arena slot to the free list.
    fn free_node(&mut self, idx: NodeIdx) {
        self.nodes[idx as usize].elems.clear();
        self.free_nodes.push(idx);
    }

    /// Remove a node from the chain, repairing both neighbors' links and the
    /// head/tail in the same step.
    fn unlink(&mut self, idx: NodeIdx) {
        let (prev, next) = {
            let node = &self.nodes[idx as usize];
            (node.prev, node.next)
        };

        if prev != NONE {
            self.nodes[prev as usize].next = next;
        } else {
            self.head = next;
        }

        if next != NONE {
            self.nodes[next as usize].prev = prev;
        } else {
            self.tail = prev;
        }

        self.node_count -= 1;
    }

    /// Borrow two distinct arena slots mutably at once.
    fn two_nodes_mut(&mut self, a: NodeIdx, b: NodeIdx) -> (&mut Node<T>, &mut Node<T>) {
        debug_assert_ne!(a, b);
        let (a, b) = (a as usize, b as usize);
        if a < b {
            let (left, right) = self.nodes.split_at_mut(b);
            return (&mut left[a], &mut right[0]);
        }
        let (left, right) = self.nodes.split_at_mut(a);
        return (&mut right[0], &mut left[b]);
    }

    // =========================================================================
    // Index resolver
    // =========================================================================

    /// Find the node and in-node offset holding the given logical index.
    ///
    /// Walks the chain from the head accumulating counts. Returns None when the
    /// index is out of bounds; for a valid index the offset is always strictly
    /// below the node's count.
    #[inline]
    fn locate(&self, index: usize) -> Option<(NodeIdx, usize)> {
        if index >= self.len {
            return None;
        }

        let mut before = 0;
        let mut cur = self.head;
        while cur != NONE {
            let node = &self.nodes[cur as usize];
            if before + node.elems.len() > index {
                return Some((cur, index - before));
            }
            before += node.elems.len();
            cur = node.next;
        }

        return None;
    }

    // =========================================================================
    // Mutator engine
    // =========================================================================

    /// First insertion into an empty chain: allocate the first node.
    fn push_first(&mut self, value: T) -> Result<()> {
        let idx = self.alloc_node()?;
        self.nodes[idx as usize].elems.push(value);
        self.head = idx;
        self.tail = idx;
        self.node_count += 1;
        self.len += 1;
        return Ok(());
    }

    /// Divide an overflowing node between itself and a freshly allocated right
    /// half linked immediately after it.
    ///
    /// The node holds `count` elements and is about to hold `count + 1`; the
    /// split point keeps `ceil((count + 1) / 2)` in the left half so the two
    /// halves stay as balanced as possible. The caller places the pending
    /// element in the appropriate half afterwards.
    fn split(&mut self, left_idx: NodeIdx) -> Result<NodeIdx> {
        let right_idx = self.alloc_node()?;
        self.split_into(left_idx, right_idx);
        return Ok(right_idx);
    }

    /// Infallible half of [`split`](Lariat::split): move the upper elements of
    /// `left_idx` into the already-allocated `right_idx` and link it in.
    fn split_into(&mut self, left_idx: NodeIdx, right_idx: NodeIdx) {
        let split_point = {
            let expected = self.nodes[left_idx as usize].elems.len() + 1;
            (expected / 2) + (expected % 2)
        };

        let (left, right) = self.two_nodes_mut(left_idx, right_idx);
        right.elems.extend(left.elems.drain(split_point..));
        right.next = left.next;
        right.prev = left_idx;
        left.next = right_idx;

        let old_next = self.nodes[right_idx as usize].next;
        if old_next != NONE {
            self.nodes[old_next as usize].prev = right_idx;
        } else {
            self.tail = right_idx;
        }

        self.node_count += 1;
    }

    /// Append a value after the last element.
    ///
    /// If the tail block is full it is split first and the value lands in the
    /// new tail.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.tail == NONE {
            return self.push_first(value);
        }

        let mut tail = self.tail;
        if self.nodes[tail as usize].elems.len() == N {
            tail = self.split(tail)?;
        }

        self.nodes[tail as usize].elems.push(value);
        self.len += 1;
        self.check_invariants();
        return Ok(());
    }

    /// Prepend a value before the first element.
    ///
    /// A full head block dislodges its last element when shifted; the head is
    /// split and the dislodged element becomes the last of the new right half.
    pub fn push_front(&mut self, value: T) -> Result<()> {
        if self.head == NONE {
            return self.push_first(value);
        }

        let head = self.head;
        if self.nodes[head as usize].elems.len() < N {
            self.nodes[head as usize].elems.insert(0, value);
        } else {
            self.insert_full(head, 0, value)?;
        }

        self.len += 1;
        self.check_invariants();
        return Ok(());
    }

    /// Insert a value at a logical position. `index == 0` prepends,
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(Error::BadIndex { index, len: self.len });
        }
        if index == 0 {
            return self.push_front(value);
        }
        if index == self.len {
            return self.push_back(value);
        }

        // Interior position: locate cannot miss after the bounds check.
        let (node_idx, offset) = self.locate(index).unwrap();

        if self.nodes[node_idx as usize].elems.len() < N {
            self.nodes[node_idx as usize].elems.insert(offset, value);
        } else {
            self.insert_full(node_idx, offset, value)?;
        }

        self.len += 1;
        self.check_invariants();
        return Ok(());
    }

    /// Insert into a full node: the shift dislodges the node's last element,
    /// the value takes the opened slot, and the split absorbs the dislodged
    /// element just past the boundary (it stays the last of the moved run, so
    /// logical order is preserved).
    ///
    /// Allocation happens before any mutation, so a failure leaves both the
    /// node and the chain untouched.
    fn insert_full(&mut self, node_idx: NodeIdx, offset: usize, value: T) -> Result<()> {
        let right_idx = self.alloc_node()?;

        let node = &mut self.nodes[node_idx as usize];
        let overflow = node.elems.pop().unwrap();
        node.elems.insert(offset, value);

        self.split_into(node_idx, right_idx);
        self.nodes[right_idx as usize].elems.push(overflow);
        return Ok(());
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::Empty);
        }

        let head = self.head;
        let value = self.nodes[head as usize].elems.remove(0);
        self.len -= 1;

        if self.nodes[head as usize].elems.is_empty() {
            self.unlink(head);
            self.free_node(head);
        }

        self.check_invariants();
        return Ok(value);
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::Empty);
        }

        let tail = self.tail;
        let value = self.nodes[tail as usize].elems.pop().unwrap();
        self.len -= 1;

        if self.nodes[tail as usize].elems.is_empty() {
            self.unlink(tail);
            self.free_node(tail);
        }

        self.check_invariants();
        return Ok(value);
    }

    /// Remove and return the element at a logical position.
    ///
    /// An interior node whose last element is removed is unlinked from both
    /// neighbors and freed in the same step.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if self.len == 0 {
            return Err(Error::Empty);
        }
        if index >= self.len {
            return Err(Error::BadIndex { index, len: self.len });
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == self.len - 1 {
            return self.pop_back();
        }

        let (node_idx, offset) = self.locate(index).unwrap();
        let value = self.nodes[node_idx as usize].elems.remove(offset);
        self.len -= 1;

        if self.nodes[node_idx as usize].elems.is_empty() {
            self.unlink(node_idx);
            self.free_node(node_idx);
        }

        self.check_invariants();
        return Ok(value);
    }

    /// Drop every element and release every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_nodes.clear();
        self.head = NONE;
        self.tail = NONE;
        self.len = 0;
        self.node_count = 0;
    }

    // =========================================================================
    // Compactor
    // =========================================================================

    /// Repack the chain so every node except possibly the last is full.
    ///
    /// Walking left to right, each node pulls elements from the front of its
    /// successor until it is full or no donor remains; a donor left empty is
    /// unlinked and freed immediately. Logical order and `len` are unchanged.
    /// Running it twice produces the same layout as running it once.
    pub fn compact(&mut self) {
        let mut cur = self.head;
        while cur != NONE {
            loop {
                let donor = self.nodes[cur as usize].next;
                if donor == NONE || self.nodes[cur as usize].elems.len() == N {
                    break;
                }

                let (node, donor_node) = self.two_nodes_mut(cur, donor);
                let need = N - node.elems.len();
                let take = need.min(donor_node.elems.len());
                node.elems.extend(donor_node.elems.drain(..take));

                if self.nodes[donor as usize].elems.is_empty() {
                    self.unlink(donor);
                    self.free_node(donor);
                } else {
                    break;
                }
            }
            cur = self.nodes[cur as usize].next;
        }

        self.check_invariants();
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Reference to the element at a logical position.
    pub fn at(&self, index: usize) -> Result<&T> {
        return match self.locate(index) {
            Some((node, offset)) => Ok(&self.nodes[node as usize].elems[offset]),
            None => Err(Error::BadIndex { index, len: self.len }),
        };
    }

    /// Mutable reference to the element at a logical position.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        return match self.locate(index) {
            Some((node, offset)) => Ok(&mut self.nodes[node as usize].elems[offset]),
            None => Err(Error::BadIndex { index, len: self.len }),
        };
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let (node, offset) = self.locate(index)?;
        return self.nodes[node as usize].elems.get(offset);
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (node, offset) = self.locate(index)?;
        return self.nodes[node as usize].elems.get_mut(offset);
    }

    /// Reference to the first element.
    pub fn first(&self) -> Result<&T> {
        if self.head == NONE {
            return Err(Error::Empty);
        }
        return Ok(&self.nodes[self.head as usize].elems[0]);
    }

    /// Mutable reference to the first element.
    pub fn first_mut(&mut self) -> Result<&mut T> {
        if self.head == NONE {
            return Err(Error::Empty);
        }
        return Ok(&mut self.nodes[self.head as usize].elems[0]);
    }

    /// Reference to the last element.
    pub fn last(&self) -> Result<&T> {
        if self.tail == NONE {
            return Err(Error::Empty);
        }
        let elems = &self.nodes[self.tail as usize].elems;
        return Ok(&elems[elems.len() - 1]);
    }

    /// Mutable reference to the last element.
    pub fn last_mut(&mut self) -> Result<&mut T> {
        if self.tail == NONE {
            return Err(Error::Empty);
        }
        let elems = &mut self.nodes[self.tail as usize].elems;
        let last = elems.len() - 1;
        return Ok(&mut elems[last]);
    }

    /// Logical index of the first element equal to `value`, or `len()` when
    /// no element matches.
    pub fn find(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let mut stepped = 0;
        let mut cur = self.head;
        while cur != NONE {
            let node = &self.nodes[cur as usize];
            for (i, elem) in node.elems.iter().enumerate() {
                if elem == value {
                    return stepped + i;
                }
            }
            stepped += node.elems.len();
            cur = node.next;
        }

        return self.len;
    }

    /// Iterate over elements in logical order.
    pub fn iter(&self) -> Iter<'_, T, N> {
        return Iter {
            lariat: self,
            node: self.head,
            offset: 0,
            remaining: self.len,
        };
    }

    /// Iterate over each node's live elements as a slice, in chain order.
    pub fn blocks(&self) -> Blocks<'_, T, N> {
        return Blocks { lariat: self, node: self.head };
    }

    // =========================================================================
    // Copying
    // =========================================================================

    /// Build a lariat holding the same logical sequence as `other`.
    ///
    /// The copy is element-wise in logical order, never a structural clone of
    /// node boundaries, so the source may use any per-node capacity.
    pub fn from_other<const M: usize>(other: &Lariat<T, M>) -> Result<Lariat<T, N>>
    where
        T: Clone,
    {
        let mut out = Lariat::new();
        out.copy_from(other)?;
        return Ok(out);
    }

    /// Replace this lariat's contents with `other`'s logical sequence.
    ///
    /// Releases every node currently owned, then rebuilds by appending. On
    /// allocation failure the destination is left valid but holding only the
    /// prefix copied so far.
    pub fn copy_from<const M: usize>(&mut self, other: &Lariat<T, M>) -> Result<()>
    where
        T: Clone,
    {
        self.clear();
        for value in other.iter() {
            self.push_back(value.clone())?;
        }
        return Ok(());
    }

    // =========================================================================
    // Invariant checking (debug builds only)
    // =========================================================================

    /// Walk the whole structure and assert every chain invariant.
    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        if self.head == NONE {
            assert_eq!(self.tail, NONE, "tail set on empty chain");
            assert_eq!(self.len, 0, "len nonzero on empty chain");
            assert_eq!(self.node_count, 0, "node_count nonzero on empty chain");
            return;
        }

        assert_ne!(self.tail, NONE, "head set but tail missing");
        assert_eq!(self.nodes[self.head as usize].prev, NONE, "head has a prev link");
        assert_eq!(self.nodes[self.tail as usize].next, NONE, "tail has a next link");

        let mut total = 0;
        let mut steps = 0;
        let mut prev = NONE;
        let mut cur = self.head;
        while cur != NONE {
            let node = &self.nodes[cur as usize];
            assert!(!node.elems.is_empty(), "empty node persisted in chain");
            assert!(node.elems.len() <= N, "node count exceeds capacity");
            assert_eq!(node.prev, prev, "backward link does not mirror forward link");
            total += node.elems.len();
            steps += 1;
            prev = cur;
            cur = node.next;
        }

        assert_eq!(prev, self.tail, "chain walk did not end at tail");
        assert_eq!(total, self.len, "len out of sync with node counts");
        assert_eq!(steps, self.node_count, "node_count out of sync with chain");
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<T, const N: usize> Default for Lariat<T, N> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T: Clone, const N: usize> Clone for Lariat<T, N> {
    fn clone(&self) -> Self {
        return Lariat::from_other(self).expect("node allocation failed");
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source).expect("node allocation failed");
    }
}

impl<T, const N: usize> Index<usize> for Lariat<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        return match self.at(index) {
            Ok(value) => value,
            Err(_) => panic!("index {} out of range (len {})", index, self.len),
        };
    }
}

impl<T, const N: usize> IndexMut<usize> for Lariat<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        return match self.at_mut(index) {
            Ok(value) => value,
            Err(_) => panic!("index {} out of range (len {})", index, len),
        };
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<Lariat<T, M>> for Lariat<T, N> {
    fn eq(&self, other: &Lariat<T, M>) -> bool {
        return self.len == other.len() && self.iter().eq(other.iter());
    }
}

impl<T: Eq, const N: usize> Eq for Lariat<T, N> {}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for Lariat<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        return self.len == other.len() && self.iter().eq(other.iter());
    }
}

impl<T: PartialEq, const N: usize, const K: usize> PartialEq<[T; K]> for Lariat<T, N> {
    fn eq(&self, other: &[T; K]) -> bool {
        return self.len == K && self.iter().eq(other.iter());
    }
}

/// Diagnostic dump: each node's occupancy and every element with its logical
/// index. Not a stable format.
impl<T: fmt::Display, const N: usize> fmt::Display for Lariat<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut index = 0;
        for block in self.blocks() {
            writeln!(f, "Node starting (count {})", block.len())?;
            for elem in block {
                writeln!(f, "{} -> {}", index, elem)?;
                index += 1;
            }
            writeln!(f, "-----------")?;
        }
        return Ok(());
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Lariat<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lariat ")?;
        return f.debug_list().entries(self.blocks()).finish();
    }
}

/// Borrowing iterator over elements in logical order.
pub struct Iter<'a, T, const N: usize> {
    lariat: &'a Lariat<T, N>,
    node: NodeIdx,
    offset: usize,
    remaining: usize,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.node == NONE {
            return None;
        }

        let node = &self.lariat.nodes[self.node as usize];
        let item = &node.elems[self.offset];
        self.offset += 1;
        if self.offset == node.elems.len() {
            self.node = node.next;
            self.offset = 0;
        }
        self.remaining -= 1;
        return Some(item);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<'a, T, const N: usize> ExactSizeIterator for Iter<'a, T, N> {}

/// Iterator over each node's live elements, in chain order.
pub struct Blocks<'a, T, const N: usize> {
    lariat: &'a Lariat<T, N>,
    node: NodeIdx,
}

impl<'a, T, const N: usize> Iterator for Blocks<'a, T, N> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        if self.node == NONE {
            return None;
        }

        let node = &self.lariat.nodes[self.node as usize];
        self.node = node.next;
        return Some(&node.elems);
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Lariat<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Iter<'a, T, N> {
        return self.iter();
    }
}

/// Owned iterator: drains the lariat front to back.
pub struct IntoIter<T, const N: usize> {
    lariat: Lariat<T, N>,
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        return self.lariat.pop_front().ok();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.lariat.len();
        return (len, Some(len));
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> IntoIterator for Lariat<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> IntoIter<T, N> {
        return IntoIter { lariat: self };
    }
}
