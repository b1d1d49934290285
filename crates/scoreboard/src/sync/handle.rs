use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio_stream::StreamExt;

use scoreboard_core::display::DisplaySink;
use scoreboard_core::player::{
    format_item, parse_high_score, validate_user_id, FetchedFields, PlayerForm, PlayerRecord,
    SyncOutcome, BROWSE_PROJECTION, HIGH_SCORE_ATTR,
};
use scoreboard_core::store::{AttrValue, DataStore, ItemStream, ScanFilter};
use scoreboard_core::{Result, SyncError};

use super::actor::{Command, Readiness, RecordTask, Reply};

/// Mailbox size of the record task.
const COMMAND_BUFFER: usize = 32;

/// Which rows a browse operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseQuery {
    /// Every row in the table.
    All,
    /// Rows whose `HighScore` is greater than zero.
    HighScores,
}

impl BrowseQuery {
    pub fn filter(&self) -> Option<ScanFilter> {
        match self {
            BrowseQuery::All => None,
            BrowseQuery::HighScores => Some(ScanFilter::greater_than(
                HIGH_SCORE_ATTR,
                AttrValue::number(0),
            )),
        }
    }
}

/// Entry point for keeping one player's record in sync with a data store.
pub struct RecordSynchronizer;

impl RecordSynchronizer {
    /// Starts synchronizing the record of `user_id`.
    ///
    /// Returns as soon as the record task is spawned. The returned handle
    /// shows a record with default fields until the initial lookup lands;
    /// await [`SyncHandle::ready`] to wait for it. Every later command runs
    /// after that lookup, whether or not it succeeded.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn initialize(
        user_id: impl Into<String>,
        store: Arc<dyn DataStore>,
        display: Arc<dyn DisplaySink>,
    ) -> Result<SyncHandle> {
        let user_id = user_id.into();
        validate_user_id(&user_id)?;

        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (record_tx, record_rx) = watch::channel(PlayerRecord::new(user_id));
        let (ready_tx, ready_rx) = watch::channel(None);

        let task = RecordTask::new(
            Arc::clone(&store),
            Arc::clone(&display),
            record_tx,
            ready_tx,
            command_rx,
        );
        tokio::spawn(task.run());

        Ok(SyncHandle {
            commands: command_tx,
            record: record_rx,
            ready: ready_rx,
            store,
            display,
        })
    }
}

/// Cloneable handle to a running record synchronizer.
///
/// The record task stops once every handle is dropped.
#[derive(Clone)]
pub struct SyncHandle {
    commands: mpsc::Sender<Command>,
    record: watch::Receiver<PlayerRecord>,
    ready: watch::Receiver<Readiness>,
    store: Arc<dyn DataStore>,
    display: Arc<dyn DisplaySink>,
}

impl SyncHandle {
    /// Snapshot of the current record.
    pub fn current(&self) -> PlayerRecord {
        self.record.borrow().clone()
    }

    /// Receiver notified each time the record changes.
    pub fn subscribe(&self) -> watch::Receiver<PlayerRecord> {
        self.record.clone()
    }

    /// Waits until the initial lookup has resolved and returns its outcome.
    ///
    /// On error the record still holds default fields that were never
    /// stored. The synchronizer keeps serving commands either way.
    pub async fn ready(&self) -> Result<()> {
        let mut ready = self.ready.clone();
        let outcome = ready
            .wait_for(Option::is_some)
            .await
            .map_err(|_| SyncError::ActorStopped)?
            .clone();
        outcome.unwrap_or(Ok(()))
    }

    /// Reads the stored fields again and applies the present ones.
    pub async fn fetch(&self) -> Result<FetchedFields> {
        self.request(|reply| Command::Fetch { reply }).await
    }

    /// Persists new initials for the current player.
    pub async fn update_initials(&self, initials: &str) -> Result<()> {
        let initials = initials.to_string();
        self.request(|reply| Command::UpdateInitials { initials, reply })
            .await
    }

    /// Persists a new high score typed as text.
    ///
    /// Input that is not an integer fails with `SyncError::Validation`
    /// before the store or the display is touched.
    pub async fn update_high_score(&self, input: &str) -> Result<()> {
        let high_score = parse_high_score(input)?;
        self.request(|reply| Command::UpdateHighScore { high_score, reply })
            .await
    }

    /// Writes only what differs between `candidate` and the current record,
    /// or the whole candidate when it belongs to another user id.
    pub async fn create_or_update(&self, candidate: PlayerRecord) -> Result<SyncOutcome> {
        self.request(|reply| Command::CreateOrUpdate { candidate, reply })
            .await
    }

    /// Validates the form inputs, then runs `create_or_update`.
    pub async fn submit(&self, form: PlayerForm) -> Result<SyncOutcome> {
        let candidate = form.into_candidate()?;
        self.create_or_update(candidate).await
    }

    /// Lazy stream of the rows selected by `query`.
    ///
    /// Only the first page of the scan is read.
    pub fn browse(&self, query: BrowseQuery) -> ItemStream {
        match query.filter() {
            None => self.store.scan_all(&BROWSE_PROJECTION),
            Some(filter) => self.store.scan_filtered(&filter, &BROWSE_PROJECTION),
        }
    }

    /// Shows every player on the display. Returns the number of rows shown.
    pub async fn scan_all(&self) -> Result<usize> {
        self.show(BrowseQuery::All).await
    }

    /// Shows players with a positive high score. Returns the number of rows shown.
    pub async fn scan_high_scores(&self) -> Result<usize> {
        self.show(BrowseQuery::HighScores).await
    }

    async fn show(&self, query: BrowseQuery) -> Result<usize> {
        self.display.clear();

        let mut stream = self.browse(query);
        let mut shown = 0;
        while let Some(item) = stream.next().await {
            match item {
                Ok(item) => {
                    self.display.append(&format_item(&item));
                    shown += 1;
                }
                Err(e) => {
                    let err = SyncError::from(e);
                    tracing::warn!(?query, error = %err, "Browse failed");
                    self.display.error(&err.to_string());
                    return Err(err);
                }
            }
        }

        tracing::debug!(?query, rows = shown, "Browse finished");
        Ok(shown)
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SyncError::ActorStopped)?;
        response.await.map_err(|_| SyncError::ActorStopped)?
    }
}
