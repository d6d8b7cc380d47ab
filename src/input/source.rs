//! Background terminal input reader.
//!
//! A worker thread performs at most one read per request. The main loop
//! waits for the reply with a timeout so it can look at the shutdown flag
//! between keys. An outstanding read can be withdrawn before the terminal
//! is handed to a child process.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};

/// Slice the worker waits for input before re-checking for withdrawal
const POLL_SLICE: Duration = Duration::from_millis(50);

enum Reply {
    Event(io::Result<Event>),
    Withdrawn,
}

/// Reads events on a dedicated thread, one outstanding read at a time.
///
/// The worker exits when the source is dropped.
pub struct InputSource {
    tx: Sender<()>,
    rx: Receiver<Reply>,
    withdraw: Arc<AtomicBool>,
    pending: bool,
    stashed: Option<io::Result<Event>>,
    poll_interval: Duration,
}

impl InputSource {
    /// Source reading from the terminal through crossterm
    pub fn terminal(poll_interval: Duration) -> Self {
        Self::spawn(poll_interval, |slice| {
            if event::poll(slice)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    }

    /// Source over any reader that waits up to the given slice for one event
    pub fn spawn<F>(poll_interval: Duration, mut reader: F) -> Self
    where
        F: FnMut(Duration) -> io::Result<Option<Event>> + Send + 'static,
    {
        let (req_tx, req_rx) = channel::<()>();
        let (res_tx, res_rx) = channel::<Reply>();
        let withdraw = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&withdraw);

        thread::spawn(move || {
            while req_rx.recv().is_ok() {
                let reply = loop {
                    if flag.swap(false, Ordering::SeqCst) {
                        break Reply::Withdrawn;
                    }
                    match reader(POLL_SLICE) {
                        Ok(Some(event)) => break Reply::Event(Ok(event)),
                        Ok(None) => continue,
                        Err(e) => break Reply::Event(Err(e)),
                    }
                };
                if res_tx.send(reply).is_err() {
                    break;
                }
            }
        });

        Self {
            tx: req_tx,
            rx: res_rx,
            withdraw,
            pending: false,
            stashed: None,
            poll_interval,
        }
    }

    /// Wait up to the poll interval for the next event.
    ///
    /// `Ok(None)` means the wait timed out; an error means the input source
    /// itself failed.
    pub fn next_event(&mut self) -> io::Result<Option<Event>> {
        if let Some(result) = self.stashed.take() {
            return result.map(Some);
        }
        if !self.pending {
            self.tx
                .send(())
                .map_err(|_| io::Error::other("input reader stopped"))?;
            self.pending = true;
        }
        match self.rx.recv_timeout(self.poll_interval) {
            Ok(Reply::Event(result)) => {
                self.pending = false;
                result.map(Some)
            }
            Ok(Reply::Withdrawn) => {
                self.pending = false;
                Ok(None)
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::other("input reader stopped")),
        }
    }

    /// Withdraw the outstanding read so nothing is consumed while another
    /// program owns the terminal. An event that raced in is kept for later.
    pub fn pause(&mut self) {
        if !self.pending {
            return;
        }
        self.withdraw.store(true, Ordering::SeqCst);
        match self.rx.recv() {
            Ok(Reply::Event(result)) => self.stashed = Some(result),
            Ok(Reply::Withdrawn) | Err(_) => {}
        }
        self.withdraw.store(false, Ordering::SeqCst);
        self.pending = false;
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        self.withdraw.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc::sync_channel;

    fn key_event(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    /// Source fed from a channel, plus the sender feeding it
    fn fed_source() -> (InputSource, Sender<Event>) {
        let (tx, rx) = channel::<Event>();
        let source = InputSource::spawn(Duration::from_millis(20), move |slice| {
            match rx.recv_timeout(slice) {
                Ok(event) => Ok(Some(event)),
                Err(RecvTimeoutError::Timeout) => Ok(None),
                Err(RecvTimeoutError::Disconnected) => Err(io::Error::other("closed")),
            }
        });
        (source, tx)
    }

    #[test]
    fn test_timeout_is_not_an_error() {
        let (mut source, _tx) = fed_source();
        assert!(source.next_event().unwrap().is_none());
    }

    #[test]
    fn test_delivers_events_in_order() {
        let (mut source, tx) = fed_source();
        tx.send(key_event('a')).unwrap();
        tx.send(key_event('b')).unwrap();
        let mut seen = Vec::new();
        while seen.len() < 2 {
            if let Some(event) = source.next_event().unwrap() {
                seen.push(event);
            }
        }
        assert_eq!(seen, vec![key_event('a'), key_event('b')]);
    }

    #[test]
    fn test_pause_does_not_consume_later_input() {
        let (mut source, tx) = fed_source();
        assert!(source.next_event().unwrap().is_none());
        source.pause();
        tx.send(key_event('x')).unwrap();
        let mut got = None;
        for _ in 0..100 {
            if let Some(event) = source.next_event().unwrap() {
                got = Some(event);
                break;
            }
        }
        assert_eq!(got, Some(key_event('x')));
    }

    #[test]
    fn test_reader_failure_is_reported() {
        let (ready_tx, ready_rx) = sync_channel::<()>(1);
        let mut source = InputSource::spawn(Duration::from_millis(500), move |_| {
            let _ = ready_tx.try_send(());
            Err(io::Error::other("tty gone"))
        });
        let err = source.next_event().unwrap_err();
        assert_eq!(err.to_string(), "tty gone");
        assert!(ready_rx.try_recv().is_ok());
    }
}
