//! Batch writer — expands champions into per-customer assignments and
//! persists them in bounded chunks.
//!
//! Chunks commit independently. A failing chunk is not retried; earlier
//! chunks stay committed and the error carries the failing chunk index.

use crate::{
    champion::Champions,
    error::{EngineError, EngineResult},
    grouping::PhoneGroups,
    model::Assignment,
    source::AssignmentSink,
};

/// What a successful write pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub assignments: usize,
    pub chunks: usize,
}

/// One assignment per customer in every phone group that has a champion,
/// including customers who placed no qualifying order themselves.
pub fn build_assignments(champions: &Champions, groups: &PhoneGroups) -> Vec<Assignment> {
    champions
        .iter()
        .flat_map(|(phone, winner)| {
            groups
                .get(phone)
                .into_iter()
                .flatten()
                .map(move |customer_id| Assignment {
                    customer_id: customer_id.clone(),
                    store_id: winner.store_id.clone(),
                })
        })
        .collect()
}

/// Persist `assignments` through `sink`, at most `chunk_size` per call.
pub fn write_in_chunks<S: AssignmentSink + ?Sized>(
    sink: &S,
    assignments: &[Assignment],
    chunk_size: usize,
) -> EngineResult<WriteSummary> {
    if chunk_size == 0 {
        return Err(EngineError::InvalidConfig {
            reason: "chunk_size must be at least 1".into(),
        });
    }

    let mut summary = WriteSummary::default();
    for (chunk_index, chunk) in assignments.chunks(chunk_size).enumerate() {
        sink.assign_store(chunk)
            .map_err(|source| EngineError::ChunkWrite {
                chunk_index,
                source: Box::new(source),
            })?;
        summary.chunks += 1;
        summary.assignments += chunk.len();
        log::debug!("assignment chunk {chunk_index}: {} records written", chunk.len());
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate::StoreAggregate, model::StoreType};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<Vec<Assignment>>>,
        fail_on_call: Option<usize>,
    }

    impl AssignmentSink for RecordingSink {
        fn assign_store(&self, assignments: &[Assignment]) -> EngineResult<()> {
            let mut calls = self.calls.borrow_mut();
            if self.fail_on_call == Some(calls.len()) {
                return Err(anyhow::anyhow!("write refused").into());
            }
            calls.push(assignments.to_vec());
            Ok(())
        }
    }

    fn assignments(n: usize) -> Vec<Assignment> {
        (0..n)
            .map(|i| Assignment {
                customer_id: format!("c-{i:03}"),
                store_id: "s-1".into(),
            })
            .collect()
    }

    #[test]
    fn every_customer_in_a_champion_group_is_assigned() {
        let mut groups = PhoneGroups::new();
        groups.insert("phone-a".into(), vec!["c-1".into(), "c-2".into()]);
        groups.insert("phone-b".into(), vec!["c-3".into()]);
        let mut champions = Champions::new();
        champions.insert(
            "phone-a".into(),
            StoreAggregate {
                store_id: "s-9".into(),
                store_type: StoreType::Physical,
                total_orders: 1,
                total_value: 10.0,
            },
        );

        let out = build_assignments(&champions, &groups);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|a| a.store_id == "s-9"));
        assert_eq!(out[0].customer_id, "c-1");
        assert_eq!(out[1].customer_id, "c-2");
    }

    #[test]
    fn records_are_split_into_bounded_chunks() {
        let sink = RecordingSink::default();
        let summary = write_in_chunks(&sink, &assignments(10), 4).unwrap();

        assert_eq!(summary, WriteSummary { assignments: 10, chunks: 3 });
        let sizes: Vec<usize> = sink.calls.borrow().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn nothing_to_write_makes_no_calls() {
        let sink = RecordingSink::default();
        let summary = write_in_chunks(&sink, &[], 4).unwrap();
        assert_eq!(summary, WriteSummary::default());
        assert!(sink.calls.borrow().is_empty());
    }

    #[test]
    fn failed_chunk_stops_the_pass_and_keeps_earlier_chunks() {
        let sink = RecordingSink {
            fail_on_call: Some(1),
            ..Default::default()
        };
        let err = write_in_chunks(&sink, &assignments(10), 4).unwrap_err();

        assert!(matches!(err, EngineError::ChunkWrite { chunk_index: 1, .. }));
        assert_eq!(sink.calls.borrow().len(), 1);
    }
}
