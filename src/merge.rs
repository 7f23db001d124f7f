//! Folds per-source facts into one accumulator per email address.
//!
//! The fold is commutative over everything except subject order: hint sets
//! union, counters sum, first/last contact are min/max over comparable
//! timestamps. Accumulators are created lazily on first sighting.

use std::collections::{BTreeMap, BTreeSet};

use crate::dates;
use crate::normalize::{Counters, PartialFact};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityAccumulator {
    pub organizations: BTreeSet<String>,
    pub names: BTreeSet<String>,
    pub counters: Counters,
    pub subjects: Vec<String>,
    pub first_contact: Option<String>,
    pub last_contact: Option<String>,
}

/// All identities seen so far, keyed by lowercase email.
#[derive(Debug, Default)]
pub struct ContactLedger {
    identities: BTreeMap<String, IdentityAccumulator>,
}

impl ContactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, fact: PartialFact) {
        if fact.email.is_empty() {
            return;
        }
        let acc = self.identities.entry(fact.email).or_default();

        if let Some(org) = fact.org_hint {
            if !org.is_empty() {
                acc.organizations.insert(org);
            }
        }
        if let Some(name) = fact.name_hint {
            if !name.is_empty() {
                acc.names.insert(name);
            }
        }

        acc.counters.add(&fact.counters);

        if let Some(subject) = fact.subject {
            if !subject.is_empty() && acc.subjects.last() != Some(&subject) {
                acc.subjects.push(subject);
            }
        }

        if let Some(first) = fact.first_seen {
            if dates::is_comparable(&first) {
                match &acc.first_contact {
                    Some(current) if *current <= first => {}
                    _ => acc.first_contact = Some(first),
                }
            }
        }
        if let Some(last) = fact.last_seen {
            if dates::is_comparable(&last) {
                match &acc.last_contact {
                    Some(current) if *current >= last => {}
                    _ => acc.last_contact = Some(last),
                }
            }
        }
    }

    pub fn extend<I>(&mut self, facts: I)
    where
        I: IntoIterator<Item = PartialFact>,
    {
        for fact in facts {
            self.fold(fact);
        }
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    #[allow(dead_code)]
    pub fn get(&self, email: &str) -> Option<&IdentityAccumulator> {
        self.identities.get(email)
    }

    /// Consume the ledger, yielding identities in email order.
    pub fn into_identities(self) -> BTreeMap<String, IdentityAccumulator> {
        self.identities
    }
}
