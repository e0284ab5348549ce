//! Boundary with the host's event system.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use tracing::trace;

use crate::aggregation::{BucketHandler, DispatchReport};
use crate::event::{Event, EventKind};

/// Host-side event facility that aggregate handlers are installed into.
pub trait EventHost {
	/// Registers `handler` as a delivery point for events of `kind`.
	fn install(&mut self, kind: EventKind, handler: Arc<dyn BucketHandler>);
}

/// In-process [`EventHost`]: delivers events synchronously to installed handlers.
///
/// Handlers for one kind run in installation order. Publishing takes `&self`,
/// so a bus behind an `Arc` can deliver independent events from several
/// threads at once.
#[derive(Default)]
pub struct EventBus {
	handlers: HashMap<EventKind, Vec<Arc<dyn BucketHandler>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Delivers `event` to every handler installed for its type.
	pub fn publish<E: Event>(&self, event: &mut E) -> DispatchReport {
		let kind = EventKind::of::<E>();
		let mut report = DispatchReport::new(kind);

		let Some(handlers) = self.handlers.get(&kind) else {
			trace!(event = kind.name(), "no handlers installed");
			return report;
		};

		for handler in handlers {
			if let Some(part) = handler.deliver(&mut *event) {
				report.merge(part);
			}
		}
		trace!(
			event = kind.name(),
			evaluated = report.evaluated(),
			fired = report.fired(),
			"event published"
		);
		report
	}

	/// Number of handlers installed for `kind`.
	pub fn handler_count(&self, kind: EventKind) -> usize {
		self.handlers.get(&kind).map_or(0, Vec::len)
	}

	pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
		self.handlers.keys().copied()
	}
}

impl EventHost for EventBus {
	fn install(&mut self, kind: EventKind, handler: Arc<dyn BucketHandler>) {
		trace!(event = kind.name(), "handler installed");
		self.handlers.entry(kind).or_default().push(handler);
	}
}
