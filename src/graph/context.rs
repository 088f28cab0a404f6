//! Audio context and destination.
//!
//! The context is the control-side handle an audio engine gives out; the
//! destination is its render-side counterpart, owned by the audio callback.
//! Inserts travel from one to the other through a wait-free route queue, so
//! connecting or detaching a node never blocks the audio thread. Detached
//! nodes travel back the same way and are freed on the control side.
//!
//! ```text
//!   control thread                     audio thread
//!   ┌──────────────┐   RouteMessage   ┌──────────────────────────────┐
//!   │ AudioContext │ ───── rtrb ────→ │ Destination                  │
//!   │              │ ←──── rtrb ───── │  source → insert → insert →  │──→ device
//!   └──────────────┘  retired nodes   └──────────────────────────────┘
//! ```
//!
//! Every connected insert keeps one route slot in reserve for its own
//! removal, so detaching succeeds even while the destination is not
//! rendering (a stream that is paused or not started yet).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::{BridgeError, Result};
use crate::graph::node::{GraphNode, RenderCtx};

/// Maximum number of inserts a destination renders.
pub const MAX_INSERTS: usize = 8;

const ROUTE_QUEUE_LEN: usize = 32;

/// Identifies one connected insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsertId(u32);

/// Routing change sent from the control side to the destination.
pub enum RouteMessage {
    Insert {
        id: InsertId,
        node: Box<dyn GraphNode>,
    },
    Remove {
        id: InsertId,
    },
}

/// Control-side handle to a live audio graph.
///
/// Cheap to clone; every clone talks to the same destination.
#[derive(Clone)]
pub struct AudioContext {
    inner: Rc<ContextInner>,
}

struct ContextInner {
    sample_rate: f32,
    routes: RefCell<Producer<RouteMessage>>,
    retired: RefCell<Consumer<Box<dyn GraphNode>>>,
    inserts: RefCell<Vec<InsertId>>,
    next_id: Cell<u32>,
}

impl AudioContext {
    /// Create a context rendering `source`, returning the control handle and
    /// the destination node to hand to the audio callback.
    pub fn new<S: GraphNode>(sample_rate: f32, source: S) -> (Self, Destination<S>) {
        let (tx, rx) = RingBuffer::<RouteMessage>::new(ROUTE_QUEUE_LEN);
        // At most ROUTE_QUEUE_LEN removals can be in flight between collections
        let (retired_tx, retired_rx) = RingBuffer::<Box<dyn GraphNode>>::new(ROUTE_QUEUE_LEN);
        let context = Self {
            inner: Rc::new(ContextInner {
                sample_rate,
                routes: RefCell::new(tx),
                retired: RefCell::new(retired_rx),
                inserts: RefCell::new(Vec::with_capacity(MAX_INSERTS)),
                next_id: Cell::new(0),
            }),
        };
        let destination = Destination {
            source,
            inserts: (0..MAX_INSERTS).map(|_| None).collect(),
            routes: rx,
            retired: retired_tx,
        };
        (context, destination)
    }

    pub fn sample_rate(&self) -> f32 {
        self.inner.sample_rate
    }

    /// Insert `node` serially after the source and any earlier inserts.
    ///
    /// Takes effect at the start of the next rendered block. Fails with
    /// [`BridgeError::RoutingFull`] when every insert slot is taken or the
    /// route queue cannot hold both this insert and its later removal.
    pub fn connect_insert<N: GraphNode + 'static>(&self, node: N) -> Result<InsertId> {
        self.collect_retired();

        let mut inserts = self.inner.inserts.borrow_mut();
        if inserts.len() >= MAX_INSERTS {
            return Err(BridgeError::RoutingFull);
        }

        let mut routes = self.inner.routes.borrow_mut();
        // One slot for the insert, one reserved for its removal, on top of
        // the reservations held by inserts already connected
        if routes.slots() < inserts.len() + 2 {
            return Err(BridgeError::RoutingFull);
        }

        let id = InsertId(self.inner.next_id.get());
        let message = RouteMessage::Insert {
            id,
            node: Box::new(node),
        };
        if routes.push(message).is_err() {
            return Err(BridgeError::RoutingFull);
        }

        self.inner.next_id.set(id.0.wrapping_add(1));
        inserts.push(id);
        Ok(id)
    }

    /// Detach a previously connected insert. Returns `false` if `id` is not
    /// connected.
    ///
    /// The node is dropped on this thread by a later [`collect_retired`]
    /// (also run by every connect and disconnect).
    ///
    /// [`collect_retired`]: Self::collect_retired
    pub fn disconnect_insert(&self, id: InsertId) -> bool {
        self.collect_retired();

        let mut inserts = self.inner.inserts.borrow_mut();
        let Some(position) = inserts.iter().position(|&existing| existing == id) else {
            return false;
        };
        if self
            .inner
            .routes
            .borrow_mut()
            .push(RouteMessage::Remove { id })
            .is_err()
        {
            return false;
        }
        inserts.remove(position);
        true
    }

    /// Free the nodes the destination has detached since the last call.
    /// Returns how many were freed.
    pub fn collect_retired(&self) -> usize {
        let mut retired = self.inner.retired.borrow_mut();
        let mut freed = 0;
        while let Ok(node) = retired.pop() {
            drop(node);
            freed += 1;
        }
        freed
    }

    /// Number of inserts currently connected, as seen by the control side.
    pub fn insert_count(&self) -> usize {
        self.inner.inserts.borrow().len()
    }

    pub fn is_connected(&self, id: InsertId) -> bool {
        self.inner.inserts.borrow().contains(&id)
    }
}

/// Render-side end of an [`AudioContext`].
///
/// Renders the source, then each insert in connection order.
pub struct Destination<S> {
    source: S,
    inserts: Vec<Option<(InsertId, Box<dyn GraphNode>)>>,
    routes: Consumer<RouteMessage>,
    retired: Producer<Box<dyn GraphNode>>,
}

impl<S: GraphNode> Destination<S> {
    fn apply_routes(&mut self) {
        while let Ok(message) = self.routes.pop() {
            match message {
                RouteMessage::Insert { id, node } => {
                    // The control side caps inserts at MAX_INSERTS, so a slot is free.
                    if let Some(slot) = self.inserts.iter_mut().find(|slot| slot.is_none()) {
                        *slot = Some((id, node));
                    }
                }
                RouteMessage::Remove { id } => {
                    let slot = self
                        .inserts
                        .iter_mut()
                        .find(|slot| matches!(slot, Some((existing, _)) if *existing == id));
                    if let Some((_, node)) = slot.and_then(Option::take) {
                        // Hand the node back so its buffers are freed off the audio thread.
                        // Full only if the control side never collects; then it drops here.
                        let _ = self.retired.push(node);
                    }
                }
            }
        }
    }

    /// Number of inserts the render side currently runs.
    pub fn insert_count(&self) -> usize {
        self.inserts.iter().flatten().count()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: GraphNode> GraphNode for Destination<S> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.apply_routes();
        self.source.render_block(out, ctx);
        for (_, node) in self.inserts.iter_mut().flatten() {
            node.render_block(out, ctx);
        }
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
