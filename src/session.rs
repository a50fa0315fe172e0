// Session: ties selection to queries
//
// A selection change spawns one tokio task that runs the pipeline and sends
// a tagged completion back over an mpsc channel. Completions are applied on
// the owner's side through `SelectionController::complete`, which drops any
// whose tag is no longer current. Nothing here blocks the caller.

use crate::anatomy::{MuscleRegistry, RegionId};
use crate::prompt::PromptBuilder;
use crate::query::{ExerciseQueryPipeline, QueryOutcome};
use crate::selection::{PanelState, RequestTag, SelectionChanged, SelectionController};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Buffer for finished queries waiting to be applied
const COMPLETION_BUFFER: usize = 64;

/// A finished query, tagged with the selection it was issued for
#[derive(Debug, Clone)]
pub struct Completion {
    pub tag: RequestTag,
    pub outcome: QueryOutcome,
    pub finished_at: DateTime<Utc>,
}

/// Published for a presentation layer when one is attached
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new region was selected and its query issued
    SelectionChanged {
        timestamp: DateTime<Utc>,
        tag: RequestTag,
        previous: Option<RegionId>,
    },

    /// A query result reached the panel
    OutcomeApplied {
        timestamp: DateTime<Utc>,
        tag: RequestTag,
        outcome: &'static str,
        records: usize,
    },

    /// A query result arrived after its selection was superseded
    StaleDiscarded {
        timestamp: DateTime<Utc>,
        tag: RequestTag,
    },
}

pub struct Session {
    controller: SelectionController,
    pipeline: Arc<ExerciseQueryPipeline>,
    prompts: PromptBuilder,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
    events: Option<mpsc::Sender<SessionEvent>>,
}

impl Session {
    pub fn new(
        registry: Arc<MuscleRegistry>,
        pipeline: Arc<ExerciseQueryPipeline>,
        prompts: PromptBuilder,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(COMPLETION_BUFFER);
        Self {
            controller: SelectionController::new(registry),
            pipeline,
            prompts,
            completion_tx,
            completion_rx,
            events: None,
        }
    }

    /// Attach an event sender. Events are dropped if its buffer is full.
    pub fn with_events(mut self, events: mpsc::Sender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn panel(&self) -> &PanelState {
        self.controller.panel()
    }

    /// Select a region and, if the selection changed, issue its query.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select(&mut self, id: RegionId) -> Option<SelectionChanged> {
        let changed = self.controller.select_region(id)?;

        let anatomical_name = self.controller.registry().anatomical_name(id);
        let request = self.prompts.build_request(anatomical_name);
        let pipeline = self.pipeline.clone();
        let tx = self.completion_tx.clone();
        let tag = changed.tag;

        tokio::spawn(async move {
            let outcome = pipeline.execute(&request).await;
            let completion = Completion {
                tag,
                outcome,
                finished_at: Utc::now(),
            };
            if tx.send(completion).await.is_err() {
                tracing::debug!(region = %tag.region, "Session dropped before query finished");
            }
        });

        self.emit(SessionEvent::SelectionChanged {
            timestamp: Utc::now(),
            tag,
            previous: changed.previous,
        });
        Some(changed)
    }

    /// Hover feedback only; never queries
    pub fn hover(&mut self, id: Option<RegionId>) {
        self.controller.set_hover(id);
    }

    pub fn leave(&mut self, id: RegionId) {
        self.controller.leave(id);
    }

    /// Apply every completion that has already arrived. Returns how many
    /// were applied (stale ones are not counted).
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns whether it was applied; `false` means it was stale.
    pub async fn next_completion(&mut self) -> bool {
        // The session holds a sender, so the channel never closes under us
        match self.completion_rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    /// Wait until the current selection's query has been applied.
    ///
    /// Returns immediately when nothing is loading.
    pub async fn settle(&mut self) {
        while self.controller.panel().is_loading() {
            self.next_completion().await;
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        let Completion {
            tag,
            outcome,
            finished_at,
        } = completion;
        let kind = outcome.kind();
        let records = outcome.records().len();

        if self.controller.complete(tag, outcome) {
            self.emit(SessionEvent::OutcomeApplied {
                timestamp: finished_at,
                tag,
                outcome: kind,
                records,
            });
            true
        } else {
            self.emit(SessionEvent::StaleDiscarded {
                timestamp: finished_at,
                tag,
            });
            false
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            // Don't block the caller on a slow consumer
            let _ = events.try_send(event);
        }
    }
}
