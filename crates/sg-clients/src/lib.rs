//! Production implementations of the pipeline's upstream traits: HTTP
//! clients for the taxonomy, search-index, and analytical services, the
//! postgres read path over the source tables, and the NATS topic publisher.

pub mod analytics;
pub mod frac;
pub mod pool;
pub mod publisher;
pub mod search;
pub mod store;

pub use analytics::SqlAnalyticsClient;
pub use frac::FracClient;
pub use pool::{create_pool_from_url, PgPool, PoolConfigError};
pub use publisher::{NatsPublisher, PublisherInitError};
pub use search::CompositeSearchClient;
pub use store::PgContentStore;
