use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::atom::AtomId;
use crate::batch::start_batch;
use crate::reactor::Reactor;

/// Reactor-local reaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReactionId(pub(crate) u64);

/// Shared state of one reaction.
pub(crate) struct ReactionCell {
	id: ReactionId,
	name: Box<str>,
	effect: RefCell<Box<dyn FnMut()>>,
	deps: RefCell<Vec<AtomId>>,
	runs: Cell<u64>,
	disposed: Cell<bool>,
}

impl ReactionCell {
	pub(crate) fn id(&self) -> ReactionId {
		self.id
	}

	pub(crate) fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	pub(crate) fn is_running(&self) -> bool {
		self.effect.try_borrow_mut().is_err()
	}

	pub(crate) fn invoke(&self) {
		// A reaction never re-enters itself: writes it performs only schedule.
		if let Ok(mut effect) = self.effect.try_borrow_mut() {
			self.runs.set(self.runs.get() + 1);
			effect();
		}
	}

	pub(crate) fn replace_dependencies(&self, deps: Vec<AtomId>) -> Vec<AtomId> {
		if self.disposed.get() {
			return std::mem::take(&mut *self.deps.borrow_mut());
		}
		std::mem::replace(&mut *self.deps.borrow_mut(), deps)
	}

	pub(crate) fn take_dependencies(&self) -> Vec<AtomId> {
		std::mem::take(&mut *self.deps.borrow_mut())
	}
}

/// Handle to a reaction created by [`autorun`].
///
/// The reaction stays alive until [`dispose`](Self::dispose) is called; dropping
/// the handle does not stop it.
#[derive(Clone)]
pub struct ReactionHandle {
	cell: Rc<ReactionCell>,
}

impl ReactionHandle {
	pub fn id(&self) -> ReactionId {
		self.cell.id
	}

	pub fn name(&self) -> &str {
		&self.cell.name
	}

	/// Number of times the effect has executed, including the initial run.
	pub fn run_count(&self) -> u64 {
		self.cell.runs.get()
	}

	/// Atoms read during the most recent run.
	pub fn dependencies(&self) -> Vec<AtomId> {
		self.cell.deps.borrow().clone()
	}

	pub fn is_disposed(&self) -> bool {
		self.cell.disposed.get()
	}

	/// Stops the reaction. Calling this more than once is a no-op.
	pub fn dispose(&self) {
		if self.cell.disposed.replace(true) {
			return;
		}
		Reactor::with(|r| r.dispose(&self.cell));
		debug!(reaction = %self.cell.name, "reaction disposed");
	}

	/// Schedules the reaction as if one of its dependencies changed.
	pub fn schedule(&self) {
		if self.is_disposed() {
			return;
		}
		let _batch = start_batch();
		Reactor::with(|r| r.schedule(self.cell.id));
	}
}

impl fmt::Debug for ReactionHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReactionHandle")
			.field("id", &self.cell.id)
			.field("name", &self.cell.name)
			.field("runs", &self.cell.runs.get())
			.field("disposed", &self.cell.disposed.get())
			.finish()
	}
}

/// Creates a reaction that runs `effect` now and again whenever an atom it
/// read on its previous run changes.
///
/// The initial run happens inside a batch, so writes the effect performs are
/// coalesced with it.
pub fn autorun(name: impl Into<Box<str>>, effect: impl FnMut() + 'static) -> ReactionHandle {
	let cell = Reactor::with(|r| {
		let cell = Rc::new(ReactionCell {
			id: r.next_reaction_id(),
			name: name.into(),
			effect: RefCell::new(Box::new(effect)),
			deps: RefCell::default(),
			runs: Cell::new(0),
			disposed: Cell::new(false),
		});
		r.register(Rc::clone(&cell));
		cell
	});
	debug!(reaction = %cell.name, id = cell.id.0, "reaction created");

	let _batch = start_batch();
	Reactor::with(|r| r.run(&cell));
	ReactionHandle { cell }
}
