//! Internal leg grouping
//!
//! Groups the internal-leg pool by `call_id`, producing one chain per
//! logical internal call. Groups keep their legs in pool order and are
//! themselves ordered by first appearance of the `call_id`, so report
//! output stays stable across runs.

use crate::types::CallRecord;
use std::collections::HashMap;

/// Chains keyed by `call_id`, in first-seen order.
///
/// Grouping never creates an empty chain: every key starts with at least
/// one internal leg. The temporal correlator later appends matched
/// external records to a chain via [`ChainGroups::get_mut`].
#[derive(Debug, Default)]
pub struct ChainGroups {
    order: Vec<String>,
    groups: HashMap<String, Vec<CallRecord>>,
}

impl ChainGroups {
    /// Group a pool of internal legs by their `call_id`.
    pub fn from_legs(legs: &[CallRecord]) -> Self {
        let mut chains = ChainGroups::default();

        for leg in legs {
            match chains.groups.get_mut(&leg.call_id) {
                Some(group) => group.push(leg.clone()),
                None => {
                    chains.order.push(leg.call_id.clone());
                    chains.groups.insert(leg.call_id.clone(), vec![leg.clone()]);
                }
            }
        }

        chains
    }

    /// Number of chains
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members of one chain, internal legs first in pool order, then any
    /// appended external records in match order.
    pub fn get(&self, call_id: &str) -> Option<&[CallRecord]> {
        self.groups.get(call_id).map(Vec::as_slice)
    }

    /// Mutable access to one chain, for appending matched externals.
    pub fn get_mut(&mut self, call_id: &str) -> Option<&mut Vec<CallRecord>> {
        self.groups.get_mut(call_id)
    }

    /// Iterate chains in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CallRecord])> {
        self.order
            .iter()
            .filter_map(|id| self.groups.get(id).map(|legs| (id.as_str(), legs.as_slice())))
    }
}
