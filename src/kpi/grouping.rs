use std::collections::HashMap;

use super::types::MetricRecord;

/// Metrics grouped by an identifier, groups kept in first-seen order and
/// records kept in input order within each group.
#[derive(Debug, Default, Clone)]
pub struct Groups<'records> {
    groups: Vec<(&'records str, Vec<&'records MetricRecord>)>,
    index: HashMap<&'records str, usize>,
}

impl<'records> Groups<'records> {
    fn push(&mut self, key: &'records str, record: &'records MetricRecord) {
        if let Some(group) = self
            .index
            .get(key)
            .and_then(|position| self.groups.get_mut(*position))
        {
            group.1.push(record);
            return;
        }
        self.index.insert(key, self.groups.len());
        self.groups.push((key, vec![record]));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[&'records MetricRecord]> {
        self.index
            .get(key)
            .and_then(|position| self.groups.get(*position))
            .map(|(_, records)| records.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'records str> + '_ {
        self.groups.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'records str, &[&'records MetricRecord])> + '_ {
        self.groups
            .iter()
            .map(|(key, records)| (*key, records.as_slice()))
    }
}

/// Groups metrics by flow node id. Records without one are skipped.
#[must_use]
pub fn group_by_flow_node<'records, I>(metrics: I) -> Groups<'records>
where
    I: IntoIterator<Item = &'records MetricRecord>,
{
    group_by(metrics, MetricRecord::flow_node_id)
}

/// Groups metrics by flow node instance id. Records without one are skipped.
#[must_use]
pub fn group_by_instance<'records, I>(metrics: I) -> Groups<'records>
where
    I: IntoIterator<Item = &'records MetricRecord>,
{
    group_by(metrics, MetricRecord::flow_node_instance_id)
}

fn group_by<'records, I, F>(metrics: I, key_of: F) -> Groups<'records>
where
    I: IntoIterator<Item = &'records MetricRecord>,
    F: Fn(&'records MetricRecord) -> Option<&'records str>,
{
    let mut groups = Groups::default();
    for record in metrics {
        match key_of(record) {
            Some(key) => groups.push(key, record),
            None => tracing::debug!("Skipping metric without grouping key: {:?}", record),
        }
    }
    groups
}
