//! Scheduled ingestion over all sources.
//!
//! [`IngestionScheduler`] registers one cron job that ingests every source
//! with a feed URL, and exposes manual triggers for the Web API. Batches
//! never overlap: a tick that finds another batch in flight is skipped.

use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::rss::service::IngestService;
use crate::rss::store::SourceStore;
use crate::rss::types::BatchSummary;
use crate::source::Source;
use crate::{Result, VukaError};

/// Drives ingestion runs on a cron schedule and on demand.
#[derive(Clone)]
pub struct IngestionScheduler {
    runner: Runner,
    cron: String,
    jobs: Arc<Mutex<Option<JobScheduler>>>,
}

/// The part of the scheduler cloned into jobs and detached tasks.
#[derive(Clone)]
struct Runner {
    service: IngestService,
    sources: Arc<dyn SourceStore>,
    run_guard: Arc<Mutex<()>>,
}

impl IngestionScheduler {
    /// Create a scheduler. Nothing runs until [`start`](Self::start).
    pub fn new(service: IngestService, sources: Arc<dyn SourceStore>, cron: impl Into<String>) -> Self {
        Self {
            runner: Runner {
                service,
                sources,
                run_guard: Arc::new(Mutex::new(())),
            },
            cron: cron.into(),
            jobs: Arc::new(Mutex::new(None)),
        }
    }

    /// The cron expression registered by [`start`](Self::start).
    pub fn cron(&self) -> &str {
        &self.cron
    }

    /// Whether the cron job is registered and running.
    pub async fn is_running(&self) -> bool {
        self.jobs.lock().await.is_some()
    }

    /// Register the cron job and start ticking.
    ///
    /// The expression is evaluated in the host's local time zone. An invalid cron expression is returned as [`VukaError::Scheduler`].
    /// Starting an already started scheduler is a no-op.
    pub async fn start(&self) -> Result<()> {
        let mut jobs = self.jobs.lock().await;
        if jobs.is_some() {
            return Ok(());
        }

        let runner = self.runner.clone();
        let job = Job::new_async_tz(self.cron.as_str(), Local, move |_uuid, _lock| {
            let runner = runner.clone();
            Box::pin(async move {
                runner.run_all().await;
            })
        })
        .map_err(|e| VukaError::Scheduler(format!("invalid schedule {:?}: {}", self.cron, e)))?;

        let scheduler = JobScheduler::new().await?;
        scheduler.add(job).await?;
        scheduler.start().await?;
        *jobs = Some(scheduler);

        info!(schedule = %self.cron, "ingestion scheduler started");
        Ok(())
    }

    /// Stop ticking. A batch already in flight runs to completion.
    pub async fn stop(&self) -> Result<()> {
        if let Some(mut scheduler) = self.jobs.lock().await.take() {
            scheduler.shutdown().await?;
            info!("ingestion scheduler stopped");
        }
        Ok(())
    }

    /// Ingest every source with a feed URL, one after another.
    ///
    /// Never fails: source errors are logged and counted. If another batch is
    /// in flight, returns at once with `skipped_overlap` set.
    pub async fn run_all(&self) -> BatchSummary {
        self.runner.run_all().await
    }

    /// Start a batch now, outside the schedule.
    pub fn trigger_now(&self) -> JoinHandle<BatchSummary> {
        let runner = self.runner.clone();
        tokio::spawn(async move { runner.run_all().await })
    }

    /// Ingest one source in the background.
    ///
    /// Fails with [`VukaError::Validation`] if the source has no feed URL.
    /// The outcome of the ingestion itself only reaches the log.
    pub fn trigger_source(&self, source: &Source) -> Result<JoinHandle<()>> {
        if !source.has_feed() {
            return Err(VukaError::Validation(
                "Source does not have an RSS feed URL".to_string(),
            ));
        }

        let service = self.runner.service.clone();
        let source_id = source.id;
        let feed_url = source.rss_feed_url.trim().to_string();

        Ok(tokio::spawn(async move {
            if let Err(e) = service.ingest(&feed_url, Some(source_id)).await {
                error!(source_id, feed_url = %feed_url, "ingestion failed: {}", e);
            }
        }))
    }
}

impl Runner {
    async fn run_all(&self) -> BatchSummary {
        let Ok(_guard) = self.run_guard.try_lock() else {
            warn!("ingestion batch already running, skipping");
            return BatchSummary::overlapped();
        };

        let started = Instant::now();
        let mut summary = BatchSummary::default();

        let sources = match self.sources.list().await {
            Ok(sources) => sources,
            Err(e) => {
                error!("failed to list sources: {}", e);
                return summary;
            }
        };

        info!(sources = sources.len(), "ingestion batch started");

        for source in sources {
            if !source.has_feed() {
                debug!(source_id = source.id, name = %source.name, "source has no feed URL, skipping");
                summary.skipped += 1;
                continue;
            }

            summary.processed += 1;
            let feed_url = source.rss_feed_url.trim();

            match self.service.ingest(feed_url, Some(source.id)).await {
                Ok(report) => {
                    summary.succeeded += 1;
                    summary.report += report;
                }
                Err(e) => {
                    summary.failed += 1;
                    error!(
                        source_id = source.id,
                        name = %source.name,
                        feed_url = %feed_url,
                        "ingestion failed: {}",
                        e
                    );
                }
            }
        }

        info!(
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            saved = summary.report.saved_count,
            duplicates = summary.report.duplicate_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ingestion batch finished"
        );

        summary
    }
}
