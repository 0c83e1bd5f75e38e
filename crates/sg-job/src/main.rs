use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use sg_clients::{
    create_pool_from_url, CompositeSearchClient, FracClient, NatsPublisher, PgContentStore,
    PoolConfigError, PublisherInitError, SqlAnalyticsClient,
};
use sg_common::config::{Settings, SettingsError};
use sg_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use sg_common::pipeline::{Pipeline, PipelineError, RunSummary};
use sg_common::publish::{NoopPublisher, RecordPublisher};
use sg_common::run_stamp::RunStamp;

#[derive(Debug, Parser)]
#[command(
    name = "sg-job",
    about = "One batch pass of the competency gap pipeline"
)]
struct Cli {
    /// Compute everything and log table sizes without publishing
    #[arg(long, env = "SG_DRY_RUN", default_value_t = false)]
    dry_run: bool,

    /// Skip starting the Prometheus exporter
    #[arg(long, default_value_t = false)]
    skip_metrics: bool,

    /// HTTP timeout for upstream requests, in seconds
    #[arg(long, env = "SG_HTTP_TIMEOUT_SECONDS", default_value_t = 60)]
    http_timeout: u64,
}

#[derive(Debug, thiserror::Error)]
enum JobError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pool(#[from] PoolConfigError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Publisher(#[from] PublisherInitError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

fn record_summary_metrics(summary: &RunSummary) {
    sg_metrics::record_published_rows("course_rating_summary", summary.course_rating_summaries);
    sg_metrics::record_published_rows("user_course_progress", summary.user_course_completions);
    sg_metrics::record_published_rows("frac_competency", summary.frac_competencies);
    sg_metrics::record_published_rows("course_competency", summary.course_competencies);
    sg_metrics::record_published_rows("expected_competency", summary.expected_competencies);
    sg_metrics::record_published_rows("declared_competency", summary.declared_competencies);
    sg_metrics::record_published_rows("competency_gap", summary.competency_gaps);
}

async fn run(cli: Cli) -> Result<(), JobError> {
    let settings = Settings::from_env()?;

    if !cli.skip_metrics {
        sg_metrics::init_metrics("SG_METRICS_PORT", 9189);
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.http_timeout))
        .build()?;
    let taxonomy = Arc::new(FracClient::new(
        http.clone(),
        settings.taxonomy_url.clone(),
        settings.taxonomy_api_key.clone(),
    ));
    let search = Arc::new(CompositeSearchClient::new(
        http.clone(),
        settings.search_url.clone(),
    ));
    let analytics = Arc::new(SqlAnalyticsClient::new(http, settings.analytics_url.clone()));
    let pool = create_pool_from_url(&settings.database_url)?;
    let store = Arc::new(PgContentStore::new(pool, settings.tables.clone()));

    let publisher: Arc<dyn RecordPublisher> = if cli.dry_run {
        info!("dry run: records will not be published");
        Arc::new(NoopPublisher)
    } else {
        Arc::new(NatsPublisher::connect(&settings.broker_url).await?)
    };

    let pipeline = Pipeline::new(taxonomy, search, analytics, store, publisher, settings.topics);

    let stamp = RunStamp::capture();
    info!(run_id = %stamp.run_id, timestamp = %stamp.timestamp, "starting competency gap run");

    let summary = pipeline.run(&stamp).await?;

    record_summary_metrics(&summary);
    info!(
        gaps = summary.competency_gaps,
        expected = summary.expected_competencies,
        declared = summary.declared_competencies,
        live_courses = summary.live_courses,
        "run complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing_subscriber("sg-job");
    install_tracing_panic_hook("sg-job");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => sg_metrics::record_run_outcome(true),
        Err(err) => {
            sg_metrics::record_run_outcome(false);
            tracing::error!(error = %err, "competency gap run failed");
            eprintln!("sg-job failed: {err}");
            std::process::exit(1);
        }
    }
}
