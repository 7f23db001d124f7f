//! Organization resolution.
//!
//! Explicit hints always win. Without hints the domain runs through a
//! layered cascade: the public-body table, structural patterns (police
//! forces, universities, schools), the named-organization table, and
//! finally a cosmetic cleanup of the bare domain. Every input resolves to
//! something; classification never fails.

use itertools::Itertools;
use std::collections::BTreeSet;

use crate::extract::title_case;

/// Government and public-body domains, matched exactly first and then as a
/// suffix (so mailbox subdomains inherit the parent body's name).
const GOV_DOMAINS: &[(&str, &str)] = &[
    ("parliament.uk", "UK Parliament"),
    ("homeoffice.gov.uk", "Home Office"),
    ("justice.gov.uk", "Ministry of Justice"),
    ("hmcts.gov.uk", "HM Courts & Tribunals Service"),
    ("cps.gov.uk", "Crown Prosecution Service"),
    ("sfo.gov.uk", "Serious Fraud Office"),
    ("ico.org.uk", "Information Commissioner's Office"),
    ("judiciary.uk", "The Judiciary"),
    ("dwp.gov.uk", "Department for Work and Pensions"),
    ("hmrc.gov.uk", "HM Revenue & Customs"),
    ("fco.gov.uk", "Foreign Office"),
    ("mod.gov.uk", "Ministry of Defence"),
    ("nhsbt.nhs.uk", "NHS Blood and Transplant"),
    ("nhs.uk", "National Health Service"),
    ("nhs.net", "NHS"),
    ("liverpool.gov.uk", "Liverpool City Council"),
    ("westminster.gov.uk", "Westminster City Council"),
];

/// Named organizations recognized by domain substring.
const KNOWN_ORGS: &[(&str, &str)] = &[
    ("alderhey.nhs.uk", "Alder Hey Children's Hospital"),
    ("maryseacolehouse.com", "Mary Seacole House"),
    ("healthwatchliverpool.co.uk", "Healthwatch Liverpool"),
    ("healthwatchcentralwestlondon.org", "Healthwatch Central West London"),
    ("torus.co.uk", "Torus Housing"),
    ("liverpoolmh.co.uk", "Liverpool Mutual Homes"),
    ("advocacyproject.org.uk", "The Advocacy Project"),
    ("listeningplace.org.uk", "The Listening Place"),
    ("pohwer.net", "Pohwer"),
    ("hestia.org", "Hestia"),
    ("westminstercab.org.uk", "Westminster Citizens Advice Bureau"),
    ("survivorsuk.org", "Survivors UK"),
    ("merseycare.nhs.uk", "Merseycare NHS Foundation Trust"),
    ("westlondon.nhs.uk", "West London NHS Trust"),
    ("benmaklondon.com", "Justice Minds"),
    ("attorneysyndicate.com", "Attorney Syndicate"),
    ("mailtrack.io", "Mailtrack"),
    ("bbc.co.uk", "BBC"),
];

/// TLD-ish suffixes stripped before the cosmetic fallback. Order matters:
/// the longer compound suffixes go first.
const STRIP_SUFFIXES: &[&str] = &[
    ".co.uk", ".com", ".org.uk", ".org", ".gov.uk", ".nhs.uk", ".nhs.net",
];

/// Resolve an identity's organization: hint strings win outright (sorted,
/// deduplicated, joined), otherwise the domain cascade decides.
pub fn resolve(hints: &BTreeSet<String>, domain: &str) -> String {
    let joined = hints
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .join("; ");
    if !joined.is_empty() {
        return joined;
    }
    from_domain(domain)
}

pub fn from_domain(domain: &str) -> String {
    if domain.is_empty() {
        return "Unknown".to_string();
    }
    let domain = domain.to_lowercase();

    if let Some((_, name)) = GOV_DOMAINS.iter().find(|(known, _)| *known == domain) {
        return name.to_string();
    }
    if let Some((_, name)) = GOV_DOMAINS
        .iter()
        .find(|(known, _)| domain.ends_with(known))
    {
        return name.to_string();
    }
    if let Some(name) = structural_name(&domain) {
        return name;
    }
    if let Some((_, name)) = KNOWN_ORGS
        .iter()
        .find(|(known, _)| domain.contains(known))
    {
        return name.to_string();
    }
    cleaned_domain(&domain)
}

/// Pattern-shaped domains: "<force>.police.uk", "<inst>.ac.uk",
/// "<school>.sch.uk".
fn structural_name(domain: &str) -> Option<String> {
    let parts: Vec<&str> = domain.split('.').collect();

    if domain.contains("police") {
        if parts.len() > 2 {
            return Some(format!("{} Police", title_case(&parts[0].replace('-', " "))));
        }
        return Some("UK Police Force".to_string());
    }

    if domain.ends_with(".ac.uk") {
        if domain.contains("law.ac.uk") {
            return Some("University of Law".to_string());
        }
        if parts.len() >= 3 {
            return Some(format!("{} University", parts[0].to_uppercase()));
        }
    }

    if domain.contains(".sch.uk") && parts.len() >= 3 {
        return Some(format!("{} School", title_case(&parts[0].replace('-', " "))));
    }

    None
}

/// Last resort: make the bare domain presentable.
fn cleaned_domain(domain: &str) -> String {
    let mut clean = domain.to_string();
    for suffix in STRIP_SUFFIXES {
        clean = clean.replace(suffix, "");
    }
    clean = clean.replace("www.", "").replace(['-', '_'], " ");
    let clean = title_case(&clean);
    if clean.is_empty() {
        domain.to_string()
    } else {
        clean
    }
}
