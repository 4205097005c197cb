use std::collections::{HashMap, VecDeque};

/// Per-view-type FIFO queues of unbound content views.
#[derive(Debug)]
pub struct Recycler<V> {
    queues: HashMap<u32, VecDeque<V>>,
}

impl<V> Recycler<V> {
    pub fn new() -> Self {
        Self { queues: HashMap::new() }
    }

    pub fn put(&mut self, view_type: u32, view: V) {
        let queue = self.queues.entry(view_type).or_default();
        queue.push_back(view);
        log::trace!("recycled view of type {view_type} ({} queued)", queue.len());
    }

    /// Oldest queued view of `view_type`.
    pub fn take(&mut self, view_type: u32) -> Option<V> {
        let queue = self.queues.get_mut(&view_type)?;
        let view = queue.pop_front()?;
        log::trace!("reusing view of type {view_type} ({} left)", queue.len());
        Some(view)
    }

    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties every queue, yielding the views.
    pub fn drain(&mut self) -> impl Iterator<Item = V> + '_ {
        self.queues.drain().flat_map(|(_, q)| q)
    }
}

impl<V> Default for Recycler<V> {
    fn default() -> Self {
        Self::new()
    }
}
