use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};
use tracing::{error, trace};

use crate::atom::AtomId;
use crate::config::{ReactionErrorHandling, ReactorConfig};
use crate::reaction::{ReactionCell, ReactionId};

type OrderedSet<T> = IndexSet<T, FxBuildHasher>;

thread_local! {
	static REACTOR: Reactor = Reactor::new(ReactorConfig::default());
}

/// Per-thread reactive execution context.
///
/// All state is interior-mutable and no borrow is held across a call into
/// user code, so reactions may freely read and write tracked containers while
/// the reactor is running them.
pub struct Reactor {
	config: RefCell<ReactorConfig>,
	depth: Cell<u32>,
	flushing: Cell<bool>,
	next_reaction: Cell<u64>,
	/// Reactions scheduled during the current epoch, in scheduling order.
	pending: RefCell<OrderedSet<ReactionId>>,
	reactions: RefCell<HashMap<ReactionId, Rc<ReactionCell>>>,
	/// Reverse dependency index: atom → reactions that read it on their last run.
	observers: RefCell<HashMap<AtomId, OrderedSet<ReactionId>>>,
	/// One frame per reaction currently executing.
	tracking: RefCell<Vec<OrderedSet<AtomId>>>,
}

impl Reactor {
	fn new(config: ReactorConfig) -> Self {
		Self {
			config: RefCell::new(config),
			depth: Cell::new(0),
			flushing: Cell::new(false),
			next_reaction: Cell::new(1),
			pending: RefCell::default(),
			reactions: RefCell::default(),
			observers: RefCell::default(),
			tracking: RefCell::default(),
		}
	}

	/// Runs `f` against this thread's reactor.
	pub fn with<R>(f: impl FnOnce(&Reactor) -> R) -> R {
		REACTOR.with(f)
	}

	/// Like [`with`](Self::with), but does nothing once the thread-local has
	/// been torn down.
	pub(crate) fn try_with(f: impl FnOnce(&Reactor)) {
		let _ = REACTOR.try_with(f);
	}

	/// Replaces this thread's configuration.
	pub fn configure(config: ReactorConfig) {
		Self::with(|r| *r.config.borrow_mut() = config);
	}

	/// Returns a copy of this thread's configuration.
	pub fn config() -> ReactorConfig {
		Self::with(|r| r.config.borrow().clone())
	}

	/// Number of live reactions on this thread.
	pub fn reaction_count() -> usize {
		Self::with(|r| r.reactions.borrow().len())
	}

	pub(crate) fn depth(&self) -> u32 {
		self.depth.get()
	}

	pub(crate) fn open_batch(&self) {
		let depth = self.depth.get() + 1;
		self.depth.set(depth);
		trace!(depth, "batch opened");
	}

	pub(crate) fn close_batch(&self) {
		let depth = self.depth.get().saturating_sub(1);
		self.depth.set(depth);
		trace!(depth, "batch closed");
		// Never run reactions while unwinding; the queue survives until the
		// next outermost close.
		if depth == 0 && !self.flushing.get() && !std::thread::panicking() {
			self.flush();
		}
	}

	pub(crate) fn next_reaction_id(&self) -> ReactionId {
		let id = self.next_reaction.get();
		self.next_reaction.set(id + 1);
		ReactionId(id)
	}

	pub(crate) fn register(&self, reaction: Rc<ReactionCell>) {
		self.reactions.borrow_mut().insert(reaction.id(), reaction);
	}

	pub(crate) fn report_observed(&self, atom: AtomId) {
		if let Some(frame) = self.tracking.borrow_mut().last_mut() {
			frame.insert(atom);
		}
	}

	/// Enqueues every reaction observing `atom`; returns how many were observing.
	pub(crate) fn schedule_observers(&self, atom: AtomId) -> usize {
		let observers = self.observers.borrow();
		let Some(ids) = observers.get(&atom) else {
			return 0;
		};
		self.pending.borrow_mut().extend(ids.iter().copied());
		ids.len()
	}

	pub(crate) fn forget_atom(&self, atom: AtomId) {
		self.observers.borrow_mut().remove(&atom);
	}

	pub(crate) fn schedule(&self, id: ReactionId) {
		self.pending.borrow_mut().insert(id);
	}

	pub(crate) fn dispose(&self, reaction: &ReactionCell) {
		let id = reaction.id();
		let removed = self.reactions.borrow_mut().remove(&id);
		drop(removed);
		self.pending.borrow_mut().shift_remove(&id);
		self.unbind(id, &reaction.take_dependencies());
	}

	fn unbind(&self, id: ReactionId, deps: &[AtomId]) {
		let mut observers = self.observers.borrow_mut();
		for atom in deps {
			if let Some(ids) = observers.get_mut(atom) {
				ids.shift_remove(&id);
				if ids.is_empty() {
					observers.remove(atom);
				}
			}
		}
	}

	fn bind(&self, id: ReactionId, deps: &[AtomId]) {
		let mut observers = self.observers.borrow_mut();
		for atom in deps {
			observers.entry(*atom).or_default().insert(id);
		}
	}

	/// Runs pending reactions until the queue drains or the iteration limit is hit.
	fn flush(&self) {
		let _flushing = FlushingScope::enter(&self.flushing);
		let limit = self.config.borrow().max_reaction_iterations;
		let mut pass = 0;
		loop {
			let batch: Vec<ReactionId> = self.pending.borrow_mut().drain(..).collect();
			if batch.is_empty() {
				break;
			}
			pass += 1;
			if pass > limit {
				error!(
					limit,
					dropped = batch.len(),
					"reactions did not converge; dropping pending reactions"
				);
				break;
			}
			trace!(pass, reactions = batch.len(), "flushing reactions");
			for id in batch {
				let reaction = self.reactions.borrow().get(&id).cloned();
				if let Some(reaction) = reaction {
					self.run(&reaction);
				}
			}
		}
	}

	/// Executes one reaction under tracking and rebinds its dependencies.
	pub(crate) fn run(&self, reaction: &ReactionCell) {
		if reaction.is_disposed() || reaction.is_running() {
			return;
		}

		self.tracking.borrow_mut().push(OrderedSet::default());
		let outcome = panic::catch_unwind(AssertUnwindSafe(|| reaction.invoke()));
		let observed: Vec<AtomId> = self
			.tracking
			.borrow_mut()
			.pop()
			.map(|frame| frame.into_iter().collect())
			.unwrap_or_default();

		let id = reaction.id();
		let previous = reaction.replace_dependencies(observed.clone());
		self.unbind(id, &previous);
		if !reaction.is_disposed() {
			self.bind(id, &observed);
		}
		trace!(reaction = reaction.name(), deps = observed.len(), "reaction ran");

		if let Err(payload) = outcome {
			error!(reaction = reaction.name(), "reaction panicked");
			if self.config.borrow().reaction_error_handling == ReactionErrorHandling::Panic {
				panic::resume_unwind(payload);
			}
		}
	}
}

/// Holds the `flushing` flag for the duration of a flush, even if a reaction
/// panic is re-raised.
struct FlushingScope<'a>(&'a Cell<bool>);

impl<'a> FlushingScope<'a> {
	fn enter(flag: &'a Cell<bool>) -> Self {
		flag.set(true);
		Self(flag)
	}
}

impl Drop for FlushingScope<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}
