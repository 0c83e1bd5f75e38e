//! Orchestrator for one batch pass: fetch everything, normalize, join,
//! enrich, then publish. All computation happens before the first publish, so
//! a failed upstream never leaves a partially published run behind.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::config::Topics;
use crate::enrich::enrich;
use crate::extract::{
    course_competency, course_completion, course_rating, declared, expected, frac, live_course,
};
use crate::gap;
use crate::publish::{publish_table, PublishError, RecordPublisher};
use crate::run_stamp::RunStamp;
use crate::sources::{
    AnalyticsClient, ContentStore, SearchIndexClient, SourceError, TaxonomyClient,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Row counts of one completed run, per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub course_rating_summaries: usize,
    pub user_course_completions: usize,
    pub frac_competencies: usize,
    pub live_courses: usize,
    pub course_competencies: usize,
    pub expected_competencies: usize,
    pub declared_competencies: usize,
    pub competency_gaps: usize,
}

pub struct Pipeline {
    taxonomy: Arc<dyn TaxonomyClient>,
    search: Arc<dyn SearchIndexClient>,
    analytics: Arc<dyn AnalyticsClient>,
    store: Arc<dyn ContentStore>,
    publisher: Arc<dyn RecordPublisher>,
    topics: Topics,
}

impl Pipeline {
    pub fn new(
        taxonomy: Arc<dyn TaxonomyClient>,
        search: Arc<dyn SearchIndexClient>,
        analytics: Arc<dyn AnalyticsClient>,
        store: Arc<dyn ContentStore>,
        publisher: Arc<dyn RecordPublisher>,
        topics: Topics,
    ) -> Self {
        Self {
            taxonomy,
            search,
            analytics,
            store,
            publisher,
            topics,
        }
    }

    /// Run one full pass with the given stamp. Every published record of the
    /// run carries the stamp's timestamp and run id.
    #[instrument(skip(self), fields(run_id = %stamp.run_id))]
    pub async fn run(&self, stamp: &RunStamp) -> Result<RunSummary, PipelineError> {
        // The seven source reads are independent of each other; fetch them
        // concurrently and fail the run on the first error.
        let filters = frac::unrestricted_filters();
        let (
            taxonomy_items,
            search_hits,
            expected_rows,
            rating_rows,
            consumption_rows,
            hierarchy_rows,
            profile_rows,
        ) = tokio::try_join!(
            self.taxonomy.search(&filters),
            self.search.live_courses(),
            self.analytics.query(expected::LATEST_WORK_ORDER_QUERY),
            self.store.scan_rating_summaries(),
            self.store.scan_content_consumption(),
            self.store.scan_content_hierarchy(),
            self.store.scan_user_profiles(),
        )?;

        let ratings = course_rating::normalize(&rating_rows);
        let completions = course_completion::normalize(&consumption_rows);
        let frac_competencies = frac::normalize(&taxonomy_items);
        let live = live_course::normalize(&search_hits);
        let mappings = course_competency::normalize(&hierarchy_rows, &live);
        let expected_competencies = expected::normalize(&expected_rows);
        let declared_competencies = declared::normalize(&profile_rows);

        let gaps = gap::compute(&expected_competencies, &declared_competencies);
        let enriched = enrich(&gaps, &mappings, &completions);

        let summary = RunSummary {
            course_rating_summaries: ratings.len(),
            user_course_completions: completions.len(),
            frac_competencies: frac_competencies.len(),
            live_courses: live.len(),
            course_competencies: mappings.len(),
            expected_competencies: expected_competencies.len(),
            declared_competencies: declared_competencies.len(),
            competency_gaps: enriched.len(),
        };
        info!(?summary, "computation finished; publishing");

        let publisher = self.publisher.as_ref();
        let topics = &self.topics;
        publish_table(publisher, &topics.course_rating_summary, &ratings, stamp).await?;
        publish_table(publisher, &topics.user_course_progress, &completions, stamp).await?;
        publish_table(publisher, &topics.frac_competency, &frac_competencies, stamp).await?;
        publish_table(publisher, &topics.course_competency, &mappings, stamp).await?;
        publish_table(
            publisher,
            &topics.expected_competency,
            &expected_competencies,
            stamp,
        )
        .await?;
        publish_table(
            publisher,
            &topics.declared_competency,
            &declared_competencies,
            stamp,
        )
        .await?;
        publish_table(publisher, &topics.competency_gap, &enriched, stamp).await?;
        publisher.flush().await?;

        Ok(summary)
    }
}
