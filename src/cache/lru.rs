//! LRU List Module
//!
//! Recency-ordered storage for cache entries.
//!
//! Entries live in an arena of slots and are chained by slot index into a
//! doubly linked list:
//! - Head = Most recently used
//! - Tail = Least recently used
//!
//! Push-front, unlink and move-to-front are O(1). Freed slots are reused.

use crate::cache::CacheEntry;

/// Index of a slot in the arena.
pub type SlotId = usize;

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == LRU List ==
/// Arena-backed doubly linked list of entries in MRU -> LRU order.
#[derive(Debug, Default)]
pub struct LruList {
    slots: Vec<Option<Node>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts an entry at the MRU position and returns its slot.
    pub fn push_front(&mut self, entry: CacheEntry) -> SlotId {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    // == Remove ==
    /// Unlinks the entry in `id` and returns it.
    ///
    /// Returns None if the slot is empty.
    pub fn remove(&mut self, id: SlotId) -> Option<CacheEntry> {
        if !self.is_occupied(id) {
            return None;
        }
        self.unlink(id);
        let node = self.slots[id].take()?;
        self.free.push(id);
        self.len -= 1;
        Some(node.entry)
    }

    // == Move To Front ==
    /// Marks the entry in `id` as most recently used.
    pub fn move_to_front(&mut self, id: SlotId) {
        if !self.is_occupied(id) || self.head == Some(id) {
            return;
        }
        self.unlink(id);

        let old_head = self.head;
        {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<CacheEntry> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Head / Tail ==
    /// Slot of the most recently used entry.
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Slot of the least recently used entry.
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    // == Next ==
    /// Slot following `id` towards the LRU end.
    pub fn next(&self, id: SlotId) -> Option<SlotId> {
        self.node(id).and_then(|node| node.next)
    }

    // == Get ==
    /// Returns the entry in `id`, or None if the slot is empty.
    pub fn get(&self, id: SlotId) -> Option<&CacheEntry> {
        self.node(id).map(|node| &node.entry)
    }

    /// Mutable access to the entry in `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut CacheEntry> {
        self.slots
            .get_mut(id)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.entry)
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    /// Returns true if no entries are linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.len;
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        removed
    }

    // == Iter ==
    /// Iterates entries from MRU to LRU.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, id: SlotId) -> Option<&Node> {
        self.slots.get(id).and_then(|slot| slot.as_ref())
    }

    fn is_occupied(&self, id: SlotId) -> bool {
        self.node(id).is_some()
    }

    // Callers check occupancy first; links only ever point at occupied slots.
    fn node_mut(&mut self, id: SlotId) -> &mut Node {
        match self.slots[id].as_mut() {
            Some(node) => node,
            None => unreachable!("linked slot {id} is empty"),
        }
    }

    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = self.node_mut(id);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// MRU -> LRU iterator over list entries.
pub struct Iter<'a> {
    list: &'a LruList,
    cursor: Option<SlotId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id)?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str) -> CacheEntry {
        CacheEntry::new(key.as_bytes(), b"v", 0).unwrap()
    }

    fn keys(list: &LruList) -> Vec<String> {
        list.iter()
            .map(|e| String::from_utf8(e.key.clone()).unwrap())
            .collect()
    }

    #[test]
    fn test_list_new() {
        let list = LruList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn test_push_front_order() {
        let mut list = LruList::new();

        list.push_front(entry("key1"));
        list.push_front(entry("key2"));
        list.push_front(entry("key3"));

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        let tail = list.tail().unwrap();
        assert_eq!(list.get(tail).unwrap().key, b"key1");
    }

    #[test]
    fn test_move_to_front() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.push_front(entry("c"));

        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);

        // Moving the head is a no-op
        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_move_middle_to_front() {
        let mut list = LruList::new();

        list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        list.push_front(entry("c"));

        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "c", "a"]);
        assert_eq!(list.get(list.tail().unwrap()).unwrap().key, b"a");
    }

    #[test]
    fn test_pop_back_evicts_oldest() {
        let mut list = LruList::new();

        list.push_front(entry("key1"));
        list.push_front(entry("key2"));
        list.push_front(entry("key3"));

        assert_eq!(list.pop_back().unwrap().key, b"key1");
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back().unwrap().key, b"key2");
        assert_eq!(list.pop_back().unwrap().key, b"key3");
        assert!(list.pop_back().is_none());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn test_remove_middle_head_and_tail() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        let c = list.push_front(entry("c"));
        list.push_front(entry("d"));

        assert_eq!(list.remove(b).unwrap().key, b"b");
        assert_eq!(keys(&list), vec!["d", "c", "a"]);

        assert_eq!(list.remove(a).unwrap().key, b"a");
        assert_eq!(keys(&list), vec!["d", "c"]);
        assert_eq!(list.tail(), Some(c));

        let d = list.head().unwrap();
        assert_eq!(list.remove(d).unwrap().key, b"d");
        assert_eq!(keys(&list), vec!["c"]);
        assert_eq!(list.head(), Some(c));
        assert_eq!(list.tail(), Some(c));
    }

    #[test]
    fn test_remove_empty_slot() {
        let mut list = LruList::new();
        let a = list.push_front(entry("a"));

        assert!(list.remove(a).is_some());
        assert!(list.remove(a).is_none());
        assert!(list.remove(42).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.remove(a);

        let c = list.push_front(entry("c"));
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_next_walks_towards_tail() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));

        assert_eq!(list.head(), Some(b));
        assert_eq!(list.next(b), Some(a));
        assert_eq!(list.next(a), None);
    }

    #[test]
    fn test_clear() {
        let mut list = LruList::new();

        list.push_front(entry("a"));
        list.push_front(entry("b"));

        assert_eq!(list.clear(), 2);
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        assert_eq!(list.clear(), 0);
    }
}
