use std::cell::RefCell;
use std::rc::Rc;

/// Single-threaded shared value that is only ever replaced whole.
///
/// Clones share the same slot. Readers get a snapshot; writers swap in a
/// complete new value, so no reader ever sees a half-updated one.
#[derive(Debug)]
pub struct SharedStore<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    revision: u64,
}

impl<T> SharedStore<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot { value, revision: 0 })),
        }
    }

    /// Replace the value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        let mut slot = self.slot.borrow_mut();
        slot.revision += 1;
        std::mem::replace(&mut slot.value, value)
    }

    /// Read without cloning
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.slot.borrow().value)
    }

    /// Bumped on every replace
    pub fn revision(&self) -> u64 {
        self.slot.borrow().revision
    }
}

impl<T: Clone> SharedStore<T> {
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Derive a new value from the current one and store it
    pub fn update(&self, change: impl FnOnce(&mut T)) {
        let mut next = self.get();
        change(&mut next);
        self.replace(next);
    }
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Default> Default for SharedStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
