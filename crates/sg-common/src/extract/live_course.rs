use std::collections::HashSet;

use crate::schema::LiveCourse;
use crate::sources::SearchHit;

/// Distinct course identifiers from the live-course search hits.
///
/// This small table exists only to restrict the course-competency extraction
/// to live content, instead of parsing the whole raw hierarchy table.
pub fn normalize(hits: &[SearchHit]) -> Vec<LiveCourse> {
    let mut seen = HashSet::new();
    hits.iter()
        .filter(|hit| seen.insert(hit.source.identifier.as_str()))
        .map(|hit| LiveCourse {
            id: hit.source.identifier.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::records::SearchHitSource;

    fn hit(id: &str) -> SearchHit {
        SearchHit {
            source: SearchHitSource {
                identifier: id.into(),
            },
        }
    }

    #[test]
    fn deduplicates_identifiers_preserving_first_occurrence() {
        let courses = normalize(&[hit("c1"), hit("c2"), hit("c1")]);

        assert_eq!(
            courses,
            vec![LiveCourse { id: "c1".into() }, LiveCourse { id: "c2".into() }]
        );
    }
}
