//! Bounded key event channel for `no_std` environments.
//!
//! Lets a keyboard task or interrupt hand key events to the frame loop. Built
//! on `critical-section` and `heapless::Deque`; the receiving end is an
//! [`InputSource`].

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::input::{InputSource, KeyEvent};

/// Error returned when the channel is full; carries the rejected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFull(pub KeyEvent);

/// A bounded queue of key events shared between producer and frame loop.
pub struct KeyChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<KeyEvent, SIZE>>>,
}

impl<const SIZE: usize> KeyChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle; any number may coexist.
    pub const fn sender(&self) -> KeySender<'_, SIZE> {
        KeySender { channel: self }
    }

    /// Get the receiver handle drained by the frame loop.
    pub const fn receiver(&self) -> KeyReceiver<'_, SIZE> {
        KeyReceiver { channel: self }
    }

    /// Queue an event, rejecting it if the channel is full.
    pub fn try_send(&self, event: KeyEvent) -> Result<(), ChannelFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(event).map_err(ChannelFull)
        })
    }

    /// Take the oldest queued event.
    pub fn try_receive(&self) -> Option<KeyEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for KeyChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`KeyChannel`].
#[derive(Clone, Copy)]
pub struct KeySender<'a, const SIZE: usize> {
    channel: &'a KeyChannel<SIZE>,
}

impl<const SIZE: usize> KeySender<'_, SIZE> {
    pub fn try_send(&self, event: KeyEvent) -> Result<(), ChannelFull> {
        self.channel.try_send(event)
    }
}

/// Consumer side of a [`KeyChannel`].
#[derive(Clone, Copy)]
pub struct KeyReceiver<'a, const SIZE: usize> {
    channel: &'a KeyChannel<SIZE>,
}

impl<const SIZE: usize> InputSource for KeyReceiver<'_, SIZE> {
    fn poll(&mut self) -> Option<KeyEvent> {
        self.channel.try_receive()
    }
}
