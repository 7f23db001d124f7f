//! Freezes merged identities into the final directory rows and the
//! per-organization rollup.

use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::extract;
use crate::merge::{ContactLedger, IdentityAccumulator};
use crate::normalize::Counters;
use crate::org;
use crate::role::{self, RoleContext};
use crate::sector::{self, SectorContext};

/// Only the first few subjects make it into the digest column.
pub const SUBJECT_DIGEST_LIMIT: usize = 5;

/// One resolved contact, in output column order.
#[derive(Debug, Clone, Serialize)]
pub struct ContactRow {
    #[serde(rename = "EMAIL")]
    pub email: String,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "INSTITUTE")]
    pub organization: String,
    #[serde(rename = "ROLE")]
    pub role: String,
    #[serde(rename = "SECTOR")]
    pub sector: String,
    #[serde(rename = "DOMAIN")]
    pub domain: String,
    #[serde(rename = "FIRST_CONTACT")]
    pub first_contact: String,
    #[serde(rename = "LAST_CONTACT")]
    pub last_contact: String,
    #[serde(rename = "TOTAL_EMAILS")]
    pub total_emails: u64,
    #[serde(rename = "EMAILS_SENT")]
    pub emails_sent: u64,
    #[serde(rename = "EMAILS_RECEIVED")]
    pub emails_received: u64,
    #[serde(rename = "FILES")]
    pub files: u64,
    #[serde(rename = "OPENS")]
    pub opens: u64,
    #[serde(rename = "CLICKS")]
    pub clicks: u64,
    #[serde(rename = "ENGAGEMENT_RATE")]
    pub engagement_rate: f64,
    #[serde(rename = "SUBJECTS")]
    pub subjects: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrgSummaryRow {
    #[serde(rename = "INSTITUTE")]
    pub organization: String,
    #[serde(rename = "TOTAL_CONTACTS")]
    pub contacts: u64,
    #[serde(rename = "TOTAL_EMAILS")]
    pub total_emails: u64,
    #[serde(rename = "SECTORS")]
    pub sectors: String,
}

/// Resolve every identity in the ledger. Rows come out sorted by email;
/// the ledger is keyed on the lowercased address, so plain key order is
/// the required case-insensitive order.
pub fn build(ledger: ContactLedger) -> Vec<ContactRow> {
    ledger
        .into_identities()
        .into_iter()
        .map(|(email, acc)| freeze(email, acc))
        .collect()
}

fn freeze(email: String, acc: IdentityAccumulator) -> ContactRow {
    let domain = extract::domain_of(&email).to_string();
    let organization = org::resolve(&acc.organizations, &domain);
    let role = role::classify(&RoleContext::new(&email, &domain, &organization));
    let sector = sector::classify(&SectorContext::new(&email, &organization, &role));
    let name = resolve_name(&acc.names, &email);
    let subjects = acc
        .subjects
        .iter()
        .take(SUBJECT_DIGEST_LIMIT)
        .join("; ");

    ContactRow {
        engagement_rate: engagement_rate(&acc.counters),
        email,
        name,
        organization,
        role,
        sector,
        domain,
        first_contact: acc.first_contact.unwrap_or_default(),
        last_contact: acc.last_contact.unwrap_or_default(),
        total_emails: acc.counters.total_emails,
        emails_sent: acc.counters.emails_sent,
        emails_received: acc.counters.emails_received,
        files: acc.counters.files,
        opens: acc.counters.opens,
        clicks: acc.counters.clicks,
        subjects,
    }
}

/// Share of tracked emails that produced an open or a click, as a
/// one-decimal percentage. No tracked emails means no rate.
pub fn engagement_rate(counters: &Counters) -> f64 {
    if counters.total_emails == 0 {
        return 0.0;
    }
    let interactions = (counters.opens + counters.clicks) as f64;
    let rate = interactions * 100.0 / counters.total_emails as f64;
    (rate * 10.0).round() / 10.0
}

fn resolve_name(names: &BTreeSet<String>, email: &str) -> String {
    if names.is_empty() {
        extract::name_from_email(email)
    } else {
        names.iter().join("; ")
    }
}

/// Roll the directory up by resolved organization.
pub fn summarize(rows: &[ContactRow]) -> Vec<OrgSummaryRow> {
    let mut by_org: BTreeMap<&str, (u64, u64, BTreeSet<&str>)> = BTreeMap::new();
    for row in rows {
        let entry = by_org.entry(&row.organization).or_default();
        entry.0 += 1;
        entry.1 += row.total_emails;
        entry.2.insert(&row.sector);
    }
    by_org
        .into_iter()
        .map(|(organization, (contacts, total_emails, sectors))| OrgSummaryRow {
            organization: organization.to_string(),
            contacts,
            total_emails,
            sectors: sectors.iter().join("; "),
        })
        .collect()
}
