//! A blocking, thread-safe in-memory duplex stream.
//!
//! Unlike a single-buffer fake `Read + Write` fed from a pre-recorded
//! script, both halves here genuinely block until their peer writes,
//! so a real two-round-trip exchange (the authentication sequence) can be
//! driven across two real threads instead of one synchronous call.

use std::{
    collections::VecDeque,
    io::{self, Read, Write},
    sync::{Arc, Condvar, Mutex},
};

#[derive(Clone)]
struct Channel {
    inner: Arc<(Mutex<VecDeque<u8>>, Condvar)>,
}

impl Channel {
    fn new() -> Self {
        Self { inner: Arc::new((Mutex::new(VecDeque::new()), Condvar::new())) }
    }

    fn send(&self, buf: &[u8]) {
        let (queue, ready) = &*self.inner;
        let mut queue = queue.lock().expect("duplex mutex poisoned");
        queue.extend(buf);
        ready.notify_all();
    }

    fn recv(&self, buf: &mut [u8]) -> usize {
        let (queue, ready) = &*self.inner;
        let mut queue = queue.lock().expect("duplex mutex poisoned");
        while queue.is_empty() {
            queue = ready.wait(queue).expect("duplex mutex poisoned");
        }
        let n = buf.len().min(queue.len());
        for slot in buf.iter_mut().take(n) {
            *slot = queue.pop_front().expect("checked len above");
        }
        n
    }
}

/// One half of a connected in-memory stream pair.
///
/// Reads block until the peer writes; there is no spontaneous EOF, which
/// matches a live socket closely enough for handshake tests (a dropped
/// peer simply never unblocks the other side's next read, same as a
/// connection that hangs rather than resets).
pub struct DuplexStream {
    rx: Channel,
    tx: Channel,
}

impl Read for DuplexStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.rx.recv(buf))
    }
}

impl Write for DuplexStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx.send(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build a connected pair of [`DuplexStream`]s: bytes written on one side
/// become readable on the other.
#[must_use]
pub fn duplex_pair() -> (DuplexStream, DuplexStream) {
    let a_to_b = Channel::new();
    let b_to_a = Channel::new();
    (DuplexStream { rx: b_to_a.clone(), tx: a_to_b.clone() }, DuplexStream { rx: a_to_b, tx: b_to_a })
}
