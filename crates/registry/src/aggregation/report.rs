use crate::event::EventKind;

/// What happened to one behavior during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	/// Trigger returned false.
	Skipped,
	/// Effect ran and let the event proceed.
	Fired,
	/// Effect ran and asked the host to cancel the event.
	CancelRequested,
	/// Effect returned an error.
	Failed(String),
	/// Trigger or effect panicked.
	Faulted(String),
}

/// Per-behavior results of delivering one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
	event: EventKind,
	verdicts: Vec<(Box<str>, Verdict)>,
}

impl DispatchReport {
	pub fn new(event: EventKind) -> Self {
		Self {
			event,
			verdicts: Vec::new(),
		}
	}

	pub(crate) fn record(&mut self, behavior: &str, verdict: Verdict) {
		self.verdicts.push((Box::from(behavior), verdict));
	}

	/// Appends another report for the same event (several handlers on one kind).
	pub fn merge(&mut self, other: DispatchReport) {
		debug_assert_eq!(self.event, other.event);
		self.verdicts.extend(other.verdicts);
	}

	pub fn event(&self) -> EventKind {
		self.event
	}

	/// Verdicts in dispatch order, keyed by behavior name.
	pub fn verdicts(&self) -> impl Iterator<Item = (&str, &Verdict)> {
		self.verdicts.iter().map(|(name, v)| (&**name, v))
	}

	/// Number of behaviors evaluated.
	pub fn evaluated(&self) -> usize {
		self.verdicts.len()
	}

	pub fn fired(&self) -> usize {
		self.count(|v| matches!(v, Verdict::Fired | Verdict::CancelRequested))
	}

	pub fn skipped(&self) -> usize {
		self.count(|v| matches!(v, Verdict::Skipped))
	}

	pub fn failed(&self) -> usize {
		self.count(|v| matches!(v, Verdict::Failed(_)))
	}

	pub fn faulted(&self) -> usize {
		self.count(|v| matches!(v, Verdict::Faulted(_)))
	}

	/// True if any effect asked for the event to be cancelled.
	pub fn cancel_requested(&self) -> bool {
		self.verdicts
			.iter()
			.any(|(_, v)| matches!(v, Verdict::CancelRequested))
	}

	fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
		self.verdicts.iter().filter(|(_, v)| pred(v)).count()
	}
}
