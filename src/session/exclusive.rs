//! Single-holder slot for a session shared with an event loop.
//!
//! An operation takes the value out for its whole duration and puts it back
//! when done. While it is out, further `acquire` calls get `None`.

use std::cell::RefCell;
use tracing::warn;

pub struct Exclusive<T> {
    slot: RefCell<Option<T>>,
}

impl<T> Exclusive<T> {
    pub fn new(value: T) -> Self {
        Self { slot: RefCell::new(Some(value)) }
    }

    /// Take the value, or `None` while another operation holds it.
    pub fn acquire(&self, op: &str) -> Option<T> {
        let value = self.slot.borrow_mut().take();
        if value.is_none() {
            warn!(operation = op, "ignored: another operation is pending");
        }
        value
    }

    pub fn release(&self, value: T) {
        *self.slot.borrow_mut() = Some(value);
    }

    pub fn is_held(&self) -> bool {
        self.slot.borrow().is_none()
    }
}
