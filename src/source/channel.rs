//! Channel-based data source.
//!
//! Receives dashboard frames via a tokio watch channel.
//! This is how the background refresh task hands frames to the UI
//! thread: frames are pushed rather than generated on poll.

use tokio::sync::watch;

use super::{DashboardFrame, DataSource};

/// A data source that receives dashboard frames via a channel.
///
/// The producer (normally a [`RefreshTask`](super::RefreshTask)) sends
/// frames through the channel, and this source provides them to the TUI.
/// Only the most recent frame is kept.
///
/// # Example
///
/// ```
/// use vitalwatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("http://localhost:5000");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<DashboardFrame>>,
    description: String,
    closed: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where frames come from
    ///   (e.g., "http://localhost:5000")
    pub fn new(receiver: watch::Receiver<Option<DashboardFrame>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("api: {}", source_description),
            closed: false,
        }
    }

    /// Create a channel pair for sending frames to a ChannelSource.
    ///
    /// The channel starts empty; the first poll returns `None` until a
    /// frame has been sent.
    pub fn create(source_description: &str) -> (watch::Sender<Option<DashboardFrame>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<DashboardFrame> {
        match self.receiver.has_changed() {
            Ok(true) => self.receiver.borrow_and_update().clone(),
            Ok(false) => None,
            Err(_) => {
                // Sender dropped: the refresh task has stopped.
                self.closed = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        if self.closed {
            Some("Refresh task stopped")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::FixedClock;
    use crate::source::LocalFeed;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "api: test");

        // Nothing sent yet
        assert!(source.poll().is_none());

        let mut feed = LocalFeed::seeded(Arc::new(FixedClock::at(12, 0).unwrap()), 4, 3);
        let frame = feed.frame();
        tx.send(Some(frame.clone())).unwrap();

        // Now poll returns the new frame, once
        assert_eq!(source.poll(), Some(frame));
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_channel_source_closed() {
        let (tx, mut source) = ChannelSource::create("test");
        drop(tx);

        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("Refresh task stopped"));
    }
}
