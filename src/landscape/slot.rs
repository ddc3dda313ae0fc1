//! Scoped ownership of the displayed texture.
//!
//! A [`TextureSlot`] owns whatever texture is currently shown and disposes
//! it when replaced, cleared or dropped. Loads started through a
//! [`LoadTicket`] that settle after the slot is gone dispose their result
//! instead of leaking it.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{SendError, Sender};

use super::texture::Disposable;
use crate::error::StageResult;

/// Cancellation handle for one asynchronous texture load
#[derive(Debug)]
pub struct LoadTicket {
    cancelled: Rc<Cell<bool>>,
}

impl LoadTicket {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Hand back a settled texture if its owner is still alive
    ///
    /// A cancelled ticket disposes the texture and yields `None`.
    pub fn admit<T: Disposable>(self, texture: T) -> Option<T> {
        if self.cancelled.get() {
            log::debug!("Texture settled after its owner was torn down, disposing");
            texture.dispose();
            None
        } else {
            Some(texture)
        }
    }
}

/// Holder of the currently displayed texture
pub struct TextureSlot<T: Disposable> {
    current: Option<T>,
    cancelled: Rc<Cell<bool>>,
}

impl<T: Disposable> TextureSlot<T> {
    pub fn new() -> Self {
        Self {
            current: None,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    /// Ticket for a load whose result this slot will receive
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket {
            cancelled: Rc::clone(&self.cancelled),
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Show `texture`, disposing the one it replaces
    pub fn install(&mut self, texture: T) {
        if let Some(previous) = self.current.replace(texture) {
            previous.dispose();
        }
    }

    /// Stop showing any texture
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.dispose();
        }
    }
}

impl<T: Disposable> Default for TextureSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Disposable> Drop for TextureSlot<T> {
    fn drop(&mut self) {
        self.cancelled.set(true);
        self.clear();
    }
}

/// Send a finished load to its consumer
///
/// If the receiving side is gone the texture is disposed here and `false`
/// is returned.
pub fn deliver<T: Disposable>(sender: &Sender<StageResult<T>>, result: StageResult<T>) -> bool {
    match sender.send(result) {
        Ok(()) => true,
        Err(SendError(Ok(texture))) => {
            log::debug!("Texture consumer went away before delivery, disposing");
            texture.dispose();
            false
        }
        Err(SendError(Err(_))) => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::error::StageError;

    /// Texture double that counts disposals
    struct Tracked {
        id: u32,
        disposed: Rc<Cell<u32>>,
    }

    impl Disposable for Tracked {
        fn dispose(self) {
            self.disposed.set(self.disposed.get() + 1);
        }
    }

    fn tracked(id: u32, disposed: &Rc<Cell<u32>>) -> Tracked {
        Tracked {
            id,
            disposed: Rc::clone(disposed),
        }
    }

    #[test]
    fn test_install_disposes_previous() {
        let disposed = Rc::new(Cell::new(0));
        let mut slot = TextureSlot::new();

        slot.install(tracked(1, &disposed));
        assert_eq!(disposed.get(), 0);

        slot.install(tracked(2, &disposed));
        assert_eq!(disposed.get(), 1);
        assert_eq!(slot.current().map(|t| t.id), Some(2));
    }

    #[test]
    fn test_drop_disposes_current() {
        let disposed = Rc::new(Cell::new(0));
        {
            let mut slot = TextureSlot::new();
            slot.install(tracked(1, &disposed));
        }
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn test_live_ticket_admits() {
        let disposed = Rc::new(Cell::new(0));
        let mut slot = TextureSlot::new();
        let ticket = slot.ticket();

        let texture = ticket.admit(tracked(7, &disposed)).unwrap();
        slot.install(texture);
        assert_eq!(disposed.get(), 0);
        assert_eq!(slot.current().map(|t| t.id), Some(7));
    }

    #[test]
    fn test_cancelled_ticket_disposes_late_result() {
        let disposed = Rc::new(Cell::new(0));
        let slot: TextureSlot<Tracked> = TextureSlot::new();
        let ticket = slot.ticket();
        drop(slot);

        assert!(ticket.is_cancelled());
        assert!(ticket.admit(tracked(3, &disposed)).is_none());
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let disposed = Rc::new(Cell::new(0));
        let mut slot = TextureSlot::new();
        slot.install(tracked(1, &disposed));
        slot.clear();
        slot.clear();
        drop(slot);
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn test_deliver_hands_texture_to_live_receiver() {
        let disposed = Rc::new(Cell::new(0));
        let (sender, receiver) = mpsc::channel();

        assert!(deliver(&sender, Ok(tracked(3, &disposed))));
        let texture = receiver.try_recv().unwrap().unwrap();
        assert_eq!(texture.id, 3);
        assert_eq!(disposed.get(), 0);
    }

    #[test]
    fn test_deliver_disposes_when_receiver_gone() {
        let disposed = Rc::new(Cell::new(0));
        let (sender, receiver) = mpsc::channel();
        drop(receiver);

        assert!(!deliver(&sender, Ok(tracked(4, &disposed))));
        assert_eq!(disposed.get(), 1);

        let failed: StageResult<Tracked> = Err(StageError::Raster("gone".into()));
        assert!(!deliver(&sender, failed));
        assert_eq!(disposed.get(), 1);
    }
}
