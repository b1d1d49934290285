//! The task that owns the current player record.
//!
//! Every mutation goes through the command mailbox, so store writes for the
//! record are issued one at a time in arrival order. Readers see the record
//! through a `watch` channel and never wait on the task.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use scoreboard_core::display::DisplaySink;
use scoreboard_core::player::{
    created_message, creating_message, plan_changes, updated_message, FetchedFields, PlayerField,
    PlayerRecord, SyncOutcome, SyncPlan, FETCH_PROJECTION,
};
use scoreboard_core::store::DataStore;
use scoreboard_core::{Result, SyncError};

/// Reply channel carried by each command.
pub(crate) type Reply<T> = oneshot::Sender<Result<T>>;

/// Requests handled by the record task.
pub(crate) enum Command {
    Fetch {
        reply: Reply<FetchedFields>,
    },
    UpdateInitials {
        initials: String,
        reply: Reply<()>,
    },
    UpdateHighScore {
        high_score: i64,
        reply: Reply<()>,
    },
    CreateOrUpdate {
        candidate: PlayerRecord,
        reply: Reply<SyncOutcome>,
    },
}

/// Looks up the stored fields for `user_id`.
///
/// The first matching row wins. No row at all is not an error and yields
/// empty fields.
pub async fn fetch_fields(store: &dyn DataStore, user_id: &str) -> Result<FetchedFields> {
    let rows = store.get_by_key(user_id, &FETCH_PROJECTION).await?;

    match rows.first() {
        Some(item) => Ok(FetchedFields::from_item(item)?),
        None => Ok(FetchedFields::default()),
    }
}

/// Outcome of the initial lookup, published once it resolves.
pub(crate) type Readiness = Option<Result<()>>;

pub(crate) struct RecordTask {
    store: Arc<dyn DataStore>,
    display: Arc<dyn DisplaySink>,
    record: watch::Sender<PlayerRecord>,
    ready: watch::Sender<Readiness>,
    commands: mpsc::Receiver<Command>,
}

impl RecordTask {
    pub(crate) fn new(
        store: Arc<dyn DataStore>,
        display: Arc<dyn DisplaySink>,
        record: watch::Sender<PlayerRecord>,
        ready: watch::Sender<Readiness>,
        commands: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            store,
            display,
            record,
            ready,
            commands,
        }
    }

    /// Fetches the stored record, then serves commands until every handle is dropped.
    pub(crate) async fn run(mut self) {
        let user_id = self.user_id();
        tracing::debug!(user_id = %user_id, "Record synchronizer started");

        let initial = self.fetch().await.map(|_| ());
        self.ready.send_replace(Some(initial));

        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Fetch { reply } => {
                    let _ = reply.send(self.fetch().await);
                }
                Command::UpdateInitials { initials, reply } => {
                    let candidate = self.current().with_initials(initials);
                    let _ = reply.send(self.update_field(PlayerField::Initials, &candidate).await);
                }
                Command::UpdateHighScore { high_score, reply } => {
                    let candidate = self.current().with_high_score(high_score);
                    let _ = reply.send(self.update_field(PlayerField::HighScore, &candidate).await);
                }
                Command::CreateOrUpdate { candidate, reply } => {
                    let _ = reply.send(self.create_or_update(candidate).await);
                }
            }
        }

        tracing::debug!(user_id = %user_id, "Record synchronizer stopped");
    }

    fn current(&self) -> PlayerRecord {
        self.record.borrow().clone()
    }

    fn user_id(&self) -> String {
        self.record.borrow().user_id.clone()
    }

    async fn fetch(&self) -> Result<FetchedFields> {
        let user_id = self.user_id();
        let result = fetch_fields(self.store.as_ref(), &user_id).await;

        match &result {
            Ok(fields) if fields.is_empty() => {
                tracing::debug!(user_id = %user_id, "No stored record, keeping defaults");
            }
            Ok(fields) => {
                self.record.send_modify(|record| fields.apply_to(record));
                tracing::debug!(user_id = %user_id, "Loaded stored record");
            }
            Err(e) => self.report(e),
        }

        result
    }

    /// Clears the display and saves a single field.
    async fn update_field(&self, field: PlayerField, candidate: &PlayerRecord) -> Result<()> {
        self.display.clear();
        self.save_field(field, candidate).await
    }

    /// Writes `field` of `candidate`, then applies it to the record and
    /// announces it. On failure the record is left as it was.
    async fn save_field(&self, field: PlayerField, candidate: &PlayerRecord) -> Result<()> {
        let user_id = self.user_id();
        tracing::debug!(user_id = %user_id, %field, "Writing field");

        if let Err(e) = self
            .store
            .update_field(&user_id, field.attribute_name(), candidate.value_of(field))
            .await
        {
            let err = SyncError::from(e);
            self.report(&err);
            return Err(err);
        }

        self.record.send_modify(|r| r.copy_field(field, candidate));
        self.display.append(&updated_message(field, &candidate.text_of(field)));
        Ok(())
    }

    async fn create_or_update(&self, candidate: PlayerRecord) -> Result<SyncOutcome> {
        let plan = plan_changes(&self.record.borrow(), &candidate);
        let fields = plan.fields();

        match plan {
            SyncPlan::Unchanged => Ok(SyncOutcome::Unchanged),
            SyncPlan::Create(record) => self.create(record).await,
            SyncPlan::Update { .. } => {
                self.display.clear();
                let mut saved = Vec::with_capacity(fields.len());
                let mut first_error = None;

                // A failed field does not stop the next one.
                for field in fields {
                    match self.save_field(field, &candidate).await {
                        Ok(()) => saved.push(field),
                        Err(e) => {
                            first_error.get_or_insert(e);
                        }
                    }
                }

                match first_error {
                    Some(e) => Err(e),
                    None => Ok(SyncOutcome::Updated { fields: saved }),
                }
            }
        }
    }

    /// Writes a full record for another user id. The current record is left alone.
    async fn create(&self, record: PlayerRecord) -> Result<SyncOutcome> {
        self.display.clear();
        self.display.append(&creating_message(&record.user_id));
        tracing::debug!(user_id = %record.user_id, "Writing new record");

        match self.store.upsert(record.to_item()).await {
            Ok(()) => {
                self.display.append(&created_message());
                Ok(SyncOutcome::Created {
                    user_id: record.user_id,
                })
            }
            Err(e) => {
                let err = SyncError::from(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    fn report(&self, err: &SyncError) {
        tracing::warn!(
            user_id = %self.record.borrow().user_id,
            error = %err,
            "Store operation failed"
        );
        self.display.error(&err.to_string());
    }
}
