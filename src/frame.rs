//! Cooperative per-frame scheduler.
//!
//! The host's render loop calls [`FrameLoop::tick`] once per displayed frame.
//! Callbacks registered with [`FrameLoop::request_frame`] run in registration
//! order and return [`ControlFlow::Continue`] to run again next frame or
//! [`ControlFlow::Break`] to drop out. Everything runs on the ticking thread,
//! so each callback body is atomic relative to the others.
//!
//! Ordering within a tick:
//! - a callback registered during a tick first runs on the following tick;
//! - a callback cancelled during a tick does not run later in that tick.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Identifies one registered frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

type FrameCallback = Box<dyn FnMut(&FrameLoop, f64) -> ControlFlow<()>>;

struct Entry {
    id: FrameId,
    /// `None` while the callback is running
    callback: Option<FrameCallback>,
}

#[derive(Default)]
struct FrameQueue {
    entries: Vec<Entry>,
    /// Ids snapshotted at the start of the current tick (reused between ticks)
    running: Vec<FrameId>,
    next_id: u64,
    frame_count: u64,
}

/// Clonable handle to a shared frame queue.
#[derive(Clone, Default)]
pub struct FrameLoop {
    queue: Rc<RefCell<FrameQueue>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on every tick until it breaks or is cancelled.
    ///
    /// The callback receives the loop and the frame timestamp in milliseconds.
    pub fn request_frame<F>(&self, callback: F) -> FrameId
    where
        F: FnMut(&FrameLoop, f64) -> ControlFlow<()> + 'static,
    {
        let mut queue = self.queue.borrow_mut();
        let id = FrameId(queue.next_id);
        queue.next_id += 1;
        queue.entries.push(Entry {
            id,
            callback: Some(Box::new(callback)),
        });
        id
    }

    /// Remove a callback. Returns `false` if it is not registered.
    pub fn cancel_frame(&self, id: FrameId) -> bool {
        let removed = {
            let mut queue = self.queue.borrow_mut();
            match queue.entries.iter().position(|entry| entry.id == id) {
                Some(position) => Some(queue.entries.remove(position)),
                None => None,
            }
        };
        // Drop the callback (and whatever it captured) outside the borrow
        removed.is_some()
    }

    /// Run one frame. Returns the number of callbacks invoked.
    pub fn tick(&self, timestamp_ms: f64) -> usize {
        let count = {
            let mut queue = self.queue.borrow_mut();
            let queue = &mut *queue;
            queue.frame_count += 1;
            queue.running.clear();
            queue
                .running
                .extend(queue.entries.iter().map(|entry| entry.id));
            queue.running.len()
        };

        let mut invoked = 0;
        for index in 0..count {
            let taken = {
                let mut queue = self.queue.borrow_mut();
                let id = queue.running[index];
                queue
                    .entries
                    .iter_mut()
                    .find(|entry| entry.id == id)
                    .and_then(|entry| entry.callback.take())
                    .map(|callback| (id, callback))
            };
            let Some((id, mut callback)) = taken else {
                continue;
            };

            let flow = callback(self, timestamp_ms);
            invoked += 1;

            let finished = {
                let mut queue = self.queue.borrow_mut();
                let position = queue.entries.iter().position(|entry| entry.id == id);
                match (flow, position) {
                    (ControlFlow::Continue(()), Some(position)) => {
                        queue.entries[position].callback = Some(callback);
                        None
                    }
                    (ControlFlow::Break(()), Some(position)) => {
                        queue.entries.remove(position);
                        Some(callback)
                    }
                    // Cancelled from inside its own body
                    (_, None) => Some(callback),
                }
            };
            drop(finished);
        }
        invoked
    }

    /// Number of registered callbacks.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    pub fn is_scheduled(&self, id: FrameId) -> bool {
        self.queue
            .borrow()
            .entries
            .iter()
            .any(|entry| entry.id == id)
    }

    /// Number of ticks run so far.
    pub fn frame_count(&self) -> u64 {
        self.queue.borrow().frame_count
    }
}
