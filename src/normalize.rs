//! Per-source row normalization.
//!
//! Each export shape gets its own normalizer that maps a raw row into zero
//! or more per-email facts. A row listing several recipients yields one
//! fact per address, all sharing the row's subject and dates.

use crate::dates;
use crate::extract;
use crate::sources::{RawRow, SourceSchema};
use anyhow::Result;

/// Engagement counters contributed by the sources. Absent values are 0, so
/// merging is a plain componentwise sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_emails: u64,
    pub emails_sent: u64,
    pub emails_received: u64,
    pub files: u64,
    pub opens: u64,
    pub clicks: u64,
}

impl Counters {
    pub fn add(&mut self, other: &Counters) {
        self.total_emails += other.total_emails;
        self.emails_sent += other.emails_sent;
        self.emails_received += other.emails_received;
        self.files += other.files;
        self.opens += other.opens;
        self.clicks += other.clicks;
    }
}

/// One source row's contribution to one email identity. Ephemeral: folded
/// into the ledger and dropped.
#[derive(Debug, Clone, Default)]
pub struct PartialFact {
    pub email: String,
    pub org_hint: Option<String>,
    pub name_hint: Option<String>,
    pub subject: Option<String>,
    pub counters: Counters,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
}

/// Coerce a counter cell. Blank, non-numeric, and colon-containing values
/// (timestamps that drifted into count columns) count as zero; everything
/// else truncates to an integer.
pub fn safe_count(value: &str) -> u64 {
    let value = value.trim();
    if value.is_empty() || value.contains(':') {
        return 0;
    }
    match value.parse::<f64>() {
        Ok(n) if n > 0.0 => n.trunc() as u64,
        _ => 0,
    }
}

/// The relationship-tracking export: per-correspondent totals, org and
/// person names, first/last interaction dates, and a cell listing every
/// address in the thread.
pub struct RelationshipNormalizer {
    schema: SourceSchema,
}

impl RelationshipNormalizer {
    pub fn new() -> Result<Self> {
        Ok(RelationshipNormalizer {
            schema: SourceSchema::for_source("relationship")?,
        })
    }

    pub fn facts(&self, row: &RawRow) -> Vec<PartialFact> {
        let org_hint = {
            let org = self.schema.get(row, "organisation").trim();
            (!org.is_empty() && org != "Unknown").then(|| org.to_string())
        };
        let name_hint = extract::clean_person_name(self.schema.get(row, "name"));
        let counters = Counters {
            total_emails: safe_count(self.schema.get(row, "total_emails")),
            emails_sent: safe_count(self.schema.get(row, "emails_sent")),
            emails_received: safe_count(self.schema.get(row, "emails_received")),
            files: safe_count(self.schema.get(row, "files")),
            ..Counters::default()
        };
        let first = dates::normalize(self.schema.get(row, "first_email"));
        let last = dates::normalize(self.schema.get(row, "last_interaction"));

        extract::emails_in(self.schema.get(row, "emails"))
            .into_iter()
            .map(|email| PartialFact {
                email,
                org_hint: org_hint.clone(),
                name_hint: name_hint.clone(),
                subject: None,
                counters,
                first_seen: (!first.is_empty()).then(|| first.clone()),
                last_seen: (!last.is_empty()).then(|| last.clone()),
            })
            .collect()
    }
}

/// A mail-tracking export: one row per tracked send, opens/clicks/file
/// views per recipient, subject line, sent and last-opened timestamps.
pub struct MailTrackNormalizer {
    schema: SourceSchema,
}

impl MailTrackNormalizer {
    pub fn new() -> Result<Self> {
        Ok(MailTrackNormalizer {
            schema: SourceSchema::for_source("mailsuite")?,
        })
    }

    pub fn facts(&self, row: &RawRow) -> Vec<PartialFact> {
        let sent = dates::normalize(self.schema.get(row, "sent"));
        tracking_facts(&self.schema, row, sent)
    }
}

/// The consultation mail-tracking export. Same tracking columns, but the
/// send timestamp is split across Year and Time columns.
pub struct ConsultNormalizer {
    schema: SourceSchema,
}

impl ConsultNormalizer {
    pub fn new() -> Result<Self> {
        Ok(ConsultNormalizer {
            schema: SourceSchema::for_source("consult")?,
        })
    }

    pub fn facts(&self, row: &RawRow) -> Vec<PartialFact> {
        let year = self.schema.get(row, "year").trim();
        let time = self.schema.get(row, "time").trim();
        let sent = if !year.is_empty() && !time.is_empty() {
            dates::normalize(&format!("{} {}", year, time))
        } else {
            String::new()
        };
        tracking_facts(&self.schema, row, sent)
    }
}

/// Shared shape of the two mail-tracking exports. Last contact prefers the
/// last-opened timestamp and falls back to the send time ("Not read yet"
/// normalizes to empty and falls through).
fn tracking_facts(schema: &SourceSchema, row: &RawRow, sent: String) -> Vec<PartialFact> {
    let subject = {
        let s = schema.get(row, "subject").trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    let counters = Counters {
        opens: safe_count(schema.get(row, "opens")),
        clicks: safe_count(schema.get(row, "clicks")),
        files: safe_count(schema.get(row, "pdf_views")),
        ..Counters::default()
    };
    let last_opened = dates::normalize(schema.get(row, "last_opened"));
    let last = if last_opened.is_empty() {
        sent.clone()
    } else {
        last_opened
    };

    extract::emails_in(schema.get(row, "recipient"))
        .into_iter()
        .map(|email| PartialFact {
            email,
            org_hint: None,
            name_hint: None,
            subject: subject.clone(),
            counters,
            first_seen: (!sent.is_empty()).then(|| sent.clone()),
            last_seen: (!last.is_empty()).then(|| last.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn safe_count_coercions() {
        assert_eq!(safe_count("12"), 12);
        assert_eq!(safe_count("3.9"), 3);
        assert_eq!(safe_count(""), 0);
        assert_eq!(safe_count("  "), 0);
        assert_eq!(safe_count("n/a"), 0);
        assert_eq!(safe_count("2024/10/17 14:03"), 0);
        assert_eq!(safe_count("-4"), 0);
    }

    #[test]
    fn relationship_row_fans_out_per_email() {
        let normalizer = RelationshipNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[
            ("Organisaton", "Home Office"),
            ("Name", "Dr. Jane Doe"),
            ("Total Email Count", "10"),
            ("Sent Email Count", "6"),
            ("Received Email Count", "4"),
            ("File Count", "2"),
            ("Date of First Email", "2025/01/05 10:00"),
            ("Date of Last Interaction", "2025/02/01 09:30"),
            (
                "Email Addresses included",
                "one@homeoffice.gov.uk, two@homeoffice.gov.uk",
            ),
        ]));
        assert_eq!(facts.len(), 2);
        for fact in &facts {
            assert_eq!(fact.org_hint.as_deref(), Some("Home Office"));
            assert_eq!(fact.name_hint.as_deref(), Some("Jane Doe"));
            assert_eq!(fact.counters.total_emails, 10);
            assert_eq!(fact.counters.emails_sent, 6);
            assert_eq!(fact.counters.emails_received, 4);
            assert_eq!(fact.counters.files, 2);
            assert_eq!(fact.first_seen.as_deref(), Some("2025-01-05 10:00"));
            assert_eq!(fact.last_seen.as_deref(), Some("2025-02-01 09:30"));
        }
        assert_eq!(facts[0].email, "one@homeoffice.gov.uk");
        assert_eq!(facts[1].email, "two@homeoffice.gov.uk");
    }

    #[test]
    fn relationship_row_with_junk_counters() {
        let normalizer = RelationshipNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[
            ("Email Addresses included", "x@example.com"),
            ("Organisaton", "Unknown"),
            ("Total Email Count", "2024/01/01 10:00"),
            ("Sent Email Count", "unknown"),
        ]));
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].counters.total_emails, 0);
        assert_eq!(facts[0].counters.emails_sent, 0);
        assert!(facts[0].org_hint.is_none());
        assert!(facts[0].name_hint.is_none());
    }

    #[test]
    fn mailsuite_row_contributes_tracking_counters() {
        let normalizer = MailTrackNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[
            ("Recipient", "clerk@justice.gov.uk"),
            ("Subject", "Case bundle"),
            ("Opens", "4"),
            ("Clicks", "1"),
            ("PDF views", "2"),
            ("Sent", "2025/01/05 10:00"),
            ("Last Opened", "Not read yet"),
        ]));
        assert_eq!(facts.len(), 1);
        let fact = &facts[0];
        assert_eq!(fact.counters.opens, 4);
        assert_eq!(fact.counters.clicks, 1);
        assert_eq!(fact.counters.files, 2);
        assert_eq!(fact.counters.total_emails, 0);
        assert_eq!(fact.subject.as_deref(), Some("Case bundle"));
        assert_eq!(fact.first_seen.as_deref(), Some("2025-01-05 10:00"));
        // "Not read yet" falls back to the send time.
        assert_eq!(fact.last_seen.as_deref(), Some("2025-01-05 10:00"));
    }

    #[test]
    fn mailsuite_last_opened_wins_when_present() {
        let normalizer = MailTrackNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[
            ("Recipient", "clerk@justice.gov.uk"),
            ("Sent", "2025/01/05 10:00"),
            ("Last Opened", "2025/01/07 08:15"),
        ]));
        assert_eq!(facts[0].last_seen.as_deref(), Some("2025-01-07 08:15"));
    }

    #[test]
    fn consult_row_combines_year_and_time() {
        let normalizer = ConsultNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[
            ("Recipient", "a@example.com"),
            ("Year", "2025/03/02"),
            ("Time", "16:45"),
        ]));
        assert_eq!(facts[0].first_seen.as_deref(), Some("2025-03-02 16:45"));
    }

    #[test]
    fn consult_row_without_date_columns() {
        let normalizer = ConsultNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[("Recipient", "a@example.com"), ("Opens", "1")]));
        assert_eq!(facts[0].first_seen, None);
        assert_eq!(facts[0].last_seen, None);
        assert_eq!(facts[0].counters.opens, 1);
    }

    #[test]
    fn recipient_cell_with_display_names() {
        let normalizer = MailTrackNormalizer::new().unwrap();
        let facts = normalizer.facts(&row(&[(
            "Recipient",
            "Jane <jane@nhs.net>, John <john@nhs.net>",
        )]));
        let emails: Vec<&str> = facts.iter().map(|f| f.email.as_str()).collect();
        assert_eq!(emails, vec!["jane@nhs.net", "john@nhs.net"]);
    }
}
