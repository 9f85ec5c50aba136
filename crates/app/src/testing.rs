//! Test doubles for the ports.

use std::sync::{Arc, Mutex};

use dmxmon_domain::cell::{CellLabel, CellUpdate, Color};
use dmxmon_domain::channel::ChannelValues;
use dmxmon_domain::error::MonitorError;
use dmxmon_domain::universe::UniverseId;
use tokio::sync::{mpsc, oneshot};

use crate::ports::{CellRenderer, ChannelSource};

/// What a recorded cell currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCell {
    pub title: String,
    pub text: String,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
}

#[derive(Debug, Default)]
struct Recording {
    cells: Vec<RecordedCell>,
    created: usize,
    renders: usize,
}

/// Renderer that records every cell it creates and every update applied.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingRenderer {
    pub fn cells(&self) -> Vec<RecordedCell> {
        self.inner.lock().unwrap().cells.clone()
    }

    pub fn cell(&self, index: usize) -> RecordedCell {
        self.inner.lock().unwrap().cells[index].clone()
    }

    pub fn created(&self) -> usize {
        self.inner.lock().unwrap().created
    }

    pub fn renders(&self) -> usize {
        self.inner.lock().unwrap().renders
    }
}

impl CellRenderer for RecordingRenderer {
    type Cell = usize;

    fn create_cell(&self, label: CellLabel) -> usize {
        let mut inner = self.inner.lock().unwrap();
        inner.created += 1;
        inner.cells.push(RecordedCell {
            title: label.title(),
            text: String::new(),
            background: None,
            foreground: None,
        });
        inner.cells.len() - 1
    }

    fn render(&self, cell: &usize, update: &CellUpdate) {
        let mut inner = self.inner.lock().unwrap();
        inner.renders += 1;
        let recorded = &mut inner.cells[*cell];
        recorded.text = update.text();
        recorded.background = Some(update.background());
        if let Some(foreground) = update.foreground() {
            recorded.foreground = Some(foreground);
        }
    }
}

/// A request the monitor made to a [`ScriptedSource`], waiting for a reply.
pub struct PendingFetch {
    pub universe: UniverseId,
    reply: oneshot::Sender<Result<ChannelValues, MonitorError>>,
}

impl PendingFetch {
    pub fn respond(self, values: Vec<i32>) {
        let _ = self.reply.send(Ok(ChannelValues::new(values)));
    }

    pub fn fail(self) {
        let _ = self.reply.send(Err(MonitorError::Stopped));
    }
}

/// Source whose replies are handed out by the test, one request at a time.
pub struct ScriptedSource {
    requests: mpsc::UnboundedSender<PendingFetch>,
}

impl ScriptedSource {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PendingFetch>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Self { requests }, rx)
    }
}

impl ChannelSource for ScriptedSource {
    async fn channel_values(&self, universe: UniverseId) -> Result<ChannelValues, MonitorError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(PendingFetch { universe, reply })
            .map_err(|_| MonitorError::Stopped)?;
        response.await.map_err(|_| MonitorError::Stopped)?
    }
}
