use std::cell::Cell;
use std::rc::Rc;

/// Create a latest-value cell holding `initial`.
pub fn latest<T: Copy>(initial: T) -> (Publisher<T>, Latest<T>) {
    let slot = Rc::new(Cell::new(initial));
    (
        Publisher { slot: slot.clone() },
        Latest { slot },
    )
}

/// Write half of a latest-value cell. Not `Clone`: one writer per cell.
#[derive(Debug)]
pub struct Publisher<T: Copy> {
    slot: Rc<Cell<T>>,
}

impl<T: Copy> Publisher<T> {
    /// Replace the held value. Readers see it on their next `get`.
    pub fn publish(&self, value: T) {
        self.slot.set(value);
    }

    pub fn current(&self) -> T {
        self.slot.get()
    }

    pub fn reader(&self) -> Latest<T> {
        Latest {
            slot: self.slot.clone(),
        }
    }
}

/// Read half of a latest-value cell.
#[derive(Debug, Clone)]
pub struct Latest<T: Copy> {
    slot: Rc<Cell<T>>,
}

impl<T: Copy> Latest<T> {
    pub fn get(&self) -> T {
        self.slot.get()
    }
}

/// Owned by the mounted view. Ending it (explicitly or by drop) tells the frame
/// loop to stop rescheduling and the lighting task to discard its result.
#[derive(Debug)]
pub struct ViewLifetime {
    alive: Rc<Cell<bool>>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn token(&self) -> LifetimeToken {
        LifetimeToken {
            alive: self.alive.clone(),
        }
    }

    pub fn end(&self) {
        self.alive.set(false);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.end();
    }
}

/// Cheap observer handed to callbacks and async tasks.
#[derive(Debug, Clone)]
pub struct LifetimeToken {
    alive: Rc<Cell<bool>>,
}

impl LifetimeToken {
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }
}
