use crate::schema::FracCompetency;
use crate::sources::{TaxonomyCompetency, TaxonomyFilters};

/// The catalog pull requests everything: no code, type, or area restriction.
pub fn unrestricted_filters() -> TaxonomyFilters {
    TaxonomyFilters::default()
}

/// Flatten taxonomy competency objects into the frac-competency table.
/// Entries without a name are kept with an empty name rather than dropped;
/// the id is the join key downstream.
pub fn normalize(items: &[TaxonomyCompetency]) -> Vec<FracCompetency> {
    items
        .iter()
        .map(|item| FracCompetency {
            competency_id: item.id.clone(),
            competency_name: item.name.clone().unwrap_or_default(),
            competency_status: item.status.clone(),
        })
        .collect()
}
