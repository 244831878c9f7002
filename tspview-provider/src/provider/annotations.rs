//! Annotation grouping
//!
//! Only chart annotations are drawn. Each one is routed by its entry id:
//! the whole-model sentinel goes to the range events, everything else to
//! the row with that id. Annotations aimed at rows that are not part of
//! the model are dropped.

use std::collections::HashMap;
use tracing::debug;
use tspview_common::model::{AnnotationSegment, RowModel};
use tspview_common::time::Timestamp;
use tspview_common::tsp::{AnnotationKind, AnnotationModel, AnnotationTarget, EntryId};

/// Chart annotations sorted by destination
#[derive(Debug, Default)]
pub struct AnnotationGroups {
    pub range_events: Vec<AnnotationSegment>,
    pub by_row: HashMap<EntryId, Vec<AnnotationSegment>>,
}

impl AnnotationGroups {
    /// Move row annotations onto `rows`, returning the range events
    ///
    /// When several rows share an id, each receives a copy.
    pub fn attach(mut self, rows: &mut [RowModel]) -> Vec<AnnotationSegment> {
        for row in rows.iter_mut() {
            if let Some(annotations) = self.by_row.get(&row.id) {
                row.annotations.extend(annotations.iter().cloned());
            }
        }

        self.by_row.retain(|id, _| !rows.iter().any(|row| row.id == *id));
        if !self.by_row.is_empty() {
            debug!(
                orphaned_rows = self.by_row.len(),
                "Dropping annotations for rows outside the model"
            );
        }

        self.range_events
    }
}

/// Convert the annotation model into re-based segments
///
/// Segment ids are `"{target}-{index}"` where index is the position of
/// the segment in its target's group (the range events, or one row's
/// annotations). Groups span categories, which are visited in server
/// order, so ids are unique within a group and stable across repeated
/// fetches of the same data.
pub fn group_annotations(model: &AnnotationModel, chart_start: Timestamp) -> AnnotationGroups {
    let mut groups = AnnotationGroups::default();
    let mut next_index: HashMap<AnnotationTarget, usize> = HashMap::new();

    for (category, annotations) in &model.annotations {
        for annotation in annotations.iter().filter(|a| a.kind == AnnotationKind::Chart) {
            let target = annotation.target();
            let index = next_index.entry(target).or_insert(0);
            let segment = AnnotationSegment {
                id: format!("{}-{}", target.entry_id(), index),
                category: category.clone(),
                range: annotation.range().rebased(chart_start),
                label: annotation.label.clone(),
                style: annotation.style.clone(),
            };
            *index += 1;

            match target {
                AnnotationTarget::RangeEvent => groups.range_events.push(segment),
                AnnotationTarget::Row(id) => groups.by_row.entry(id).or_default().push(segment),
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tspview_common::tsp::RawAnnotation;
    use tspview_common::TimeRange;

    fn model(categories: Vec<(&str, Vec<RawAnnotation>)>) -> AnnotationModel {
        AnnotationModel {
            annotations: categories
                .into_iter()
                .map(|(name, list)| (name.to_string(), list))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn row(id: EntryId) -> RowModel {
        RowModel {
            id,
            name: String::new(),
            range: TimeRange::default(),
            states: Vec::new(),
            annotations: Vec::new(),
            prev_possible_state: 0,
            next_possible_state: 0,
        }
    }

    #[test]
    fn test_routes_by_target() {
        let model = model(vec![(
            "Lost events",
            vec![
                RawAnnotation::chart(-1, 150, 10, "lost"),
                RawAnnotation::chart(5, 120, 0, "mark"),
            ],
        )]);

        let groups = group_annotations(&model, 100);

        assert_eq!(groups.range_events.len(), 1);
        let event = &groups.range_events[0];
        assert_eq!(event.id, "-1-0");
        assert_eq!(event.category, "Lost events");
        assert_eq!(event.range, TimeRange::new(50, 60));
        assert_eq!(event.label, "lost");

        let row_marks = &groups.by_row[&5];
        assert_eq!(row_marks.len(), 1);
        assert_eq!(row_marks[0].id, "5-0");
        assert_eq!(row_marks[0].range, TimeRange::new(20, 20));
    }

    #[test]
    fn test_non_chart_annotations_ignored() {
        let mut tree = RawAnnotation::chart(5, 0, 0, "tree");
        tree.kind = AnnotationKind::Tree;
        let model = model(vec![("c", vec![tree, RawAnnotation::chart(5, 1, 0, "chart")])]);

        let groups = group_annotations(&model, 0);
        assert_eq!(groups.by_row[&5].len(), 1);
        assert_eq!(groups.by_row[&5][0].label, "chart");
        assert_eq!(groups.by_row[&5][0].id, "5-0");
    }

    #[test]
    fn test_index_counts_per_target_across_categories() {
        let model = model(vec![
            (
                "a",
                vec![
                    RawAnnotation::chart(1, 0, 0, "x"),
                    RawAnnotation::chart(2, 0, 0, "y"),
                    RawAnnotation::chart(1, 5, 0, "z"),
                ],
            ),
            ("b", vec![RawAnnotation::chart(1, 9, 0, "w")]),
        ]);

        let groups = group_annotations(&model, 0);
        let ids: Vec<&str> = groups.by_row[&1].iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1-0", "1-1", "1-2"]);
        assert_eq!(groups.by_row[&1][2].category, "b");
        assert_eq!(groups.by_row[&2][0].id, "2-0");
    }

    #[test]
    fn test_range_events_span_categories() {
        let model = model(vec![
            (
                "Bookmarks",
                vec![RawAnnotation::chart(-1, 10, 0, "b"), RawAnnotation::chart(1, 10, 0, "b1")],
            ),
            (
                "Lost events",
                vec![RawAnnotation::chart(-1, 20, 0, "l"), RawAnnotation::chart(1, 20, 0, "l1")],
            ),
        ]);

        let groups = group_annotations(&model, 0);

        let events: Vec<(&str, &str)> = groups
            .range_events
            .iter()
            .map(|a| (a.id.as_str(), a.category.as_str()))
            .collect();
        assert_eq!(events, vec![("-1-0", "Bookmarks"), ("-1-1", "Lost events")]);
        let row_ids: Vec<&str> = groups.by_row[&1].iter().map(|a| a.id.as_str()).collect();
        assert_eq!(row_ids, vec!["1-0", "1-1"]);
    }

    #[test]
    fn test_categories_visited_in_server_order() {
        let model = model(vec![
            ("Zeta", vec![RawAnnotation::chart(-1, 0, 0, "z")]),
            ("Alpha", vec![RawAnnotation::chart(-1, 0, 0, "a")]),
        ]);

        let groups = group_annotations(&model, 0);

        assert_eq!(groups.range_events[0].category, "Zeta");
        assert_eq!(groups.range_events[0].id, "-1-0");
        assert_eq!(groups.range_events[1].category, "Alpha");
        assert_eq!(groups.range_events[1].id, "-1-1");
    }

    #[test]
    fn test_attach_drops_orphans() {
        let model = model(vec![(
            "c",
            vec![
                RawAnnotation::chart(1, 0, 0, "kept"),
                RawAnnotation::chart(42, 0, 0, "orphan"),
                RawAnnotation::chart(-1, 0, 0, "event"),
            ],
        )]);
        let mut rows = vec![row(1), row(2)];

        let range_events = group_annotations(&model, 0).attach(&mut rows);

        assert_eq!(range_events.len(), 1);
        assert_eq!(rows[0].annotations.len(), 1);
        assert_eq!(rows[0].annotations[0].label, "kept");
        assert!(rows[1].annotations.is_empty());
    }

    #[test]
    fn test_attach_duplicate_rows_each_get_copy() {
        let model = model(vec![("c", vec![RawAnnotation::chart(3, 0, 0, "m")])]);
        let mut rows = vec![row(3), row(3)];
        group_annotations(&model, 0).attach(&mut rows);
        assert_eq!(rows[0].annotations.len(), 1);
        assert_eq!(rows[1].annotations.len(), 1);
    }
}
