//! The poll loop: drives a [`ChannelMonitor`] on its own task.
//!
//! The loop alternates between two suspension points, awaiting a fetch
//! response and awaiting the pause before the next fetch. State commands sent
//! through a [`MonitorHandle`] are applied at either point, so the monitor is
//! only ever touched by this one task. A new request is issued only after the
//! previous response has been rendered.
//!
//! Disabling never cancels anything: a response already in flight is still
//! rendered, and a pending pause still elapses, after which the fetch finds
//! the monitor disabled and the loop goes idle.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use dmxmon_domain::channel::ChannelValues;
use dmxmon_domain::error::MonitorError;
use dmxmon_domain::universe::UniverseId;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Sleep;

use crate::monitor::{ChannelMonitor, MonitorStatus};
use crate::ports::{CellRenderer, ChannelSource};

/// Pause between the end of a render and the next fetch.
pub const PAUSE_TIME: Duration = Duration::from_millis(1000);

type FetchFuture = Pin<Box<dyn Future<Output = Result<ChannelValues, MonitorError>> + Send>>;

enum Command {
    SetState { enabled: bool, universe: UniverseId },
    Status(oneshot::Sender<MonitorStatus>),
}

/// Cloneable handle controlling a running monitor task.
///
/// The task stops once every handle has been dropped.
#[derive(Clone)]
pub struct MonitorHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl MonitorHandle {
    /// Enable or disable the monitor for `universe`.
    ///
    /// Enabling triggers a fetch immediately. Disabling lets any in-flight
    /// fetch render and then stops polling.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Stopped`] if the monitor task has exited.
    pub fn set_state(&self, enabled: bool, universe: UniverseId) -> Result<(), MonitorError> {
        self.commands
            .send(Command::SetState { enabled, universe })
            .map_err(|_| MonitorError::Stopped)
    }

    /// Current monitor state.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Stopped`] if the monitor task has exited.
    pub async fn status(&self) -> Result<MonitorStatus, MonitorError> {
        let (reply, status) = oneshot::channel();
        self.commands
            .send(Command::Status(reply))
            .map_err(|_| MonitorError::Stopped)?;
        status.await.map_err(|_| MonitorError::Stopped)
    }
}

/// Spawn a disabled monitor drawing on `renderer` and fetching from `source`.
///
/// The monitor stays idle until [`MonitorHandle::set_state`] enables it.
pub fn spawn<S, R>(source: S, renderer: R, pause: Duration) -> (MonitorHandle, JoinHandle<()>)
where
    S: ChannelSource + Send + Sync + 'static,
    R: CellRenderer + Send + 'static,
    R::Cell: Send,
{
    let (commands, receiver) = mpsc::unbounded_channel();
    let task = PollTask {
        monitor: ChannelMonitor::new(renderer),
        source: Arc::new(source),
        commands: receiver,
        pause,
        refetch_pending: false,
    };
    let join = tokio::spawn(task.run());
    (MonitorHandle { commands }, join)
}

enum Phase {
    Idle,
    Fetching(FetchFuture),
    Pausing(Pin<Box<Sleep>>),
}

struct PollTask<S, R: CellRenderer> {
    monitor: ChannelMonitor<R>,
    source: Arc<S>,
    commands: mpsc::UnboundedReceiver<Command>,
    pause: Duration,
    // Set when the monitor is enabled again while a fetch is in flight.
    refetch_pending: bool,
}

impl<S, R> PollTask<S, R>
where
    S: ChannelSource + Send + Sync + 'static,
    R: CellRenderer,
{
    async fn run(mut self) {
        let mut phase = Phase::Idle;
        loop {
            phase = match phase {
                Phase::Idle => match self.commands.recv().await {
                    Some(command) => {
                        if self.apply(command) {
                            self.fetch_values()
                        } else {
                            Phase::Idle
                        }
                    }
                    None => break,
                },
                Phase::Fetching(mut fetch) => tokio::select! {
                    result = &mut fetch => self.handle_response(result),
                    command = self.commands.recv() => match command {
                        Some(command) => {
                            if self.apply(command) {
                                self.refetch_pending = true;
                            }
                            Phase::Fetching(fetch)
                        }
                        None => break,
                    },
                },
                Phase::Pausing(mut pause) => tokio::select! {
                    () = &mut pause => self.fetch_values(),
                    command = self.commands.recv() => match command {
                        Some(command) => {
                            if self.apply(command) {
                                self.fetch_values()
                            } else {
                                Phase::Pausing(pause)
                            }
                        }
                        None => break,
                    },
                },
            };
        }
        tracing::debug!("monitor task stopped");
    }

    /// Apply a command; returns `true` when a fetch must start right away.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SetState { enabled, universe } => self.monitor.set_state(enabled, universe),
            Command::Status(reply) => {
                let _ = reply.send(self.monitor.status());
                false
            }
        }
    }

    fn fetch_values(&mut self) -> Phase {
        self.refetch_pending = false;
        let Some(universe) = self.monitor.fetch_target() else {
            return Phase::Idle;
        };
        tracing::debug!(%universe, "fetching channel values");
        let source = Arc::clone(&self.source);
        Phase::Fetching(Box::pin(
            async move { source.channel_values(universe).await },
        ))
    }

    fn handle_response(&mut self, result: Result<ChannelValues, MonitorError>) -> Phase {
        match result {
            Ok(values) => {
                tracing::debug!(count = values.len(), "channel values received");
                self.monitor.update_data(&values);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch channel values, polling stopped");
                return if self.refetch_pending {
                    self.fetch_values()
                } else {
                    Phase::Idle
                };
            }
        }

        if !self.monitor.is_enabled() {
            self.refetch_pending = false;
            Phase::Idle
        } else if self.refetch_pending {
            self.fetch_values()
        } else {
            Phase::Pausing(Box::pin(tokio::time::sleep(self.pause)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PendingFetch, RecordingRenderer, ScriptedSource};
    use dmxmon_domain::cell::Color;
    use dmxmon_domain::channel::NUMBER_OF_CHANNELS;

    const UNIVERSE: UniverseId = UniverseId::new(1);

    struct Harness {
        handle: MonitorHandle,
        renderer: RecordingRenderer,
        requests: mpsc::UnboundedReceiver<PendingFetch>,
    }

    fn start() -> Harness {
        let (source, requests) = ScriptedSource::channel();
        let renderer = RecordingRenderer::default();
        let (handle, _join) = spawn(source, renderer.clone(), PAUSE_TIME);
        Harness {
            handle,
            renderer,
            requests,
        }
    }

    /// Let the monitor task run until it blocks again.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    impl Harness {
        async fn next_fetch(&mut self) -> PendingFetch {
            self.requests.recv().await.unwrap()
        }

        fn no_fetch_issued(&mut self) -> bool {
            self.requests.try_recv().is_err()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_stay_idle_until_enabled() {
        let mut harness = start();
        tokio::time::sleep(PAUSE_TIME * 5).await;

        assert!(harness.no_fetch_issued());
        assert_eq!(harness.renderer.created(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn should_fetch_immediately_when_enabled() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();

        let fetch = harness.next_fetch().await;
        assert_eq!(fetch.universe, UNIVERSE);
        assert_eq!(harness.renderer.created(), NUMBER_OF_CHANNELS);
    }

    #[tokio::test(start_paused = true)]
    async fn should_render_response_then_wait_before_next_fetch() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();

        harness.next_fetch().await.respond(vec![0, 90, 91, 255]);
        settle().await;

        assert_eq!(harness.renderer.cell(2).text, "91");
        assert_eq!(harness.renderer.cell(2).foreground, Some(Color::White));
        assert_eq!(harness.renderer.cell(4).background, Some(Color::White));
        assert!(harness.no_fetch_issued());

        tokio::time::sleep(PAUSE_TIME).await;
        let fetch = harness.next_fetch().await;
        assert_eq!(fetch.universe, UNIVERSE);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_while_enabled() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();

        for round in 0..3 {
            harness.next_fetch().await.respond(vec![round]);
        }
        settle().await;

        assert_eq!(harness.renderer.cell(0).text, "2");
    }

    #[tokio::test(start_paused = true)]
    async fn should_render_in_flight_response_after_disable_then_stop() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        let fetch = harness.next_fetch().await;

        harness.handle.set_state(false, UNIVERSE).unwrap();
        settle().await;
        fetch.respond(vec![128]);
        settle().await;

        assert_eq!(harness.renderer.cell(0).text, "128");
        tokio::time::sleep(PAUSE_TIME * 5).await;
        assert!(harness.no_fetch_issued());
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_fetch_after_pause_when_disabled_meanwhile() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        harness.next_fetch().await.respond(vec![1]);
        settle().await;

        harness.handle.set_state(false, UNIVERSE).unwrap();
        tokio::time::sleep(PAUSE_TIME * 5).await;

        assert!(harness.no_fetch_issued());
    }

    #[tokio::test(start_paused = true)]
    async fn should_fetch_once_without_duplicating_cells_when_re_enabled() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        harness.next_fetch().await.respond(vec![1]);
        settle().await;
        harness.handle.set_state(false, UNIVERSE).unwrap();
        tokio::time::sleep(PAUSE_TIME * 2).await;

        harness.handle.set_state(true, UniverseId::new(2)).unwrap();
        let fetch = harness.next_fetch().await;
        settle().await;

        assert_eq!(fetch.universe, UniverseId::new(2));
        assert!(harness.no_fetch_issued());
        assert_eq!(harness.renderer.created(), NUMBER_OF_CHANNELS);
    }

    #[tokio::test(start_paused = true)]
    async fn should_cut_pause_short_when_re_enabled() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        harness.next_fetch().await.respond(vec![1]);
        settle().await;

        harness.handle.set_state(true, UniverseId::new(3)).unwrap();
        settle().await;

        let fetch = harness.requests.try_recv().unwrap();
        assert_eq!(fetch.universe, UniverseId::new(3));
    }

    #[tokio::test(start_paused = true)]
    async fn should_refetch_right_after_render_when_re_enabled_in_flight() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        let fetch = harness.next_fetch().await;

        harness.handle.set_state(true, UniverseId::new(5)).unwrap();
        settle().await;
        assert!(harness.no_fetch_issued());

        fetch.respond(vec![1]);
        settle().await;
        let next = harness.requests.try_recv().unwrap();
        assert_eq!(next.universe, UniverseId::new(5));
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_polling_after_failed_fetch_until_re_enabled() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        harness.next_fetch().await.respond(vec![42]);
        settle().await;

        tokio::time::sleep(PAUSE_TIME).await;
        harness.next_fetch().await.fail();
        tokio::time::sleep(PAUSE_TIME * 5).await;

        assert!(harness.no_fetch_issued());
        assert_eq!(harness.renderer.cell(0).text, "42");
        assert!(harness.handle.status().await.unwrap().enabled);

        harness.handle.set_state(true, UNIVERSE).unwrap();
        let fetch = harness.next_fetch().await;
        assert_eq!(fetch.universe, UNIVERSE);
    }

    #[tokio::test(start_paused = true)]
    async fn should_refetch_after_failed_in_flight_fetch_when_re_enabled() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();
        let fetch = harness.next_fetch().await;

        harness.handle.set_state(true, UniverseId::new(6)).unwrap();
        settle().await;
        assert!(harness.no_fetch_issued());

        fetch.fail();
        settle().await;
        let next = harness.requests.try_recv().unwrap();
        assert_eq!(next.universe, UniverseId::new(6));
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_running_after_extreme_channel_values() {
        let mut harness = start();
        harness.handle.set_state(true, UNIVERSE).unwrap();

        harness.next_fetch().await.respond(vec![i32::MIN, i32::MAX]);
        settle().await;

        assert_eq!(harness.renderer.cell(0).text, "-2147483648");
        assert_eq!(
            harness.renderer.cell(1).background,
            Some(Color::Gray(-2_147_483_392))
        );
        assert!(harness.handle.status().await.unwrap().enabled);

        tokio::time::sleep(PAUSE_TIME).await;
        let fetch = harness.next_fetch().await;
        assert_eq!(fetch.universe, UNIVERSE);
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_status_through_handle() {
        let harness = start();
        harness.handle.set_state(true, UniverseId::new(8)).unwrap();

        let status = harness.handle.status().await.unwrap();
        assert_eq!(
            status,
            MonitorStatus {
                enabled: true,
                universe: Some(UniverseId::new(8)),
                setup: true,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_stopped_when_task_has_exited() {
        let (source, _requests) = ScriptedSource::channel();
        let (handle, join) = spawn(source, RecordingRenderer::default(), PAUSE_TIME);
        join.abort();
        let _ = join.await;

        assert!(matches!(
            handle.set_state(true, UNIVERSE),
            Err(MonitorError::Stopped)
        ));
        assert!(matches!(handle.status().await, Err(MonitorError::Stopped)));
    }
}
