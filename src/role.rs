//! Role classification.
//!
//! An ordered cascade of rules over the email's domain and the resolved
//! organization text; the first rule that matches decides. Rules are plain
//! data so each one is testable on its own and the ordering is visible in
//! one place.

pub const OTHER: &str = "Other";

/// Lowercased views of the identity, shared by every rule.
pub struct RoleContext {
    email: String,
    domain: String,
    organization: String,
}

impl RoleContext {
    pub fn new(email: &str, domain: &str, organization: &str) -> Self {
        RoleContext {
            email: email.to_lowercase(),
            domain: domain.to_lowercase(),
            organization: organization.to_lowercase(),
        }
    }
}

struct RoleRule {
    #[allow(dead_code)]
    name: &'static str,
    classify: fn(&RoleContext) -> Option<String>,
}

const ROLE_RULES: &[RoleRule] = &[
    RoleRule { name: "parliament", classify: parliament },
    RoleRule { name: "government", classify: government },
    RoleRule { name: "judiciary", classify: judiciary },
    RoleRule { name: "court", classify: court },
    RoleRule { name: "police", classify: police },
    RoleRule { name: "healthcare", classify: healthcare },
    RoleRule { name: "legal", classify: legal },
    RoleRule { name: "media", classify: media },
    RoleRule { name: "academic", classify: academic },
    RoleRule { name: "advocacy", classify: advocacy },
    RoleRule { name: "housing", classify: housing },
    RoleRule { name: "regulatory", classify: regulatory },
    RoleRule { name: "private_sector", classify: private_sector },
];

pub fn classify(ctx: &RoleContext) -> String {
    ROLE_RULES
        .iter()
        .find_map(|rule| (rule.classify)(ctx))
        .unwrap_or_else(|| OTHER.to_string())
}

fn parliament(ctx: &RoleContext) -> Option<String> {
    ctx.domain
        .contains("parliament.uk")
        .then(|| "MP (Member of Parliament)".to_string())
}

fn government(ctx: &RoleContext) -> Option<String> {
    if !ctx.domain.contains(".gov.uk") {
        return None;
    }
    let label = if ctx.domain.contains("homeoffice") {
        "Home Office Official"
    } else if ctx.domain.contains("hmcts") {
        "HMCTS Official"
    } else if ctx.domain.contains("justice") || ctx.domain.contains("moj") {
        "Ministry of Justice Official"
    } else if ctx.domain.contains("cps") {
        "Crown Prosecution Service"
    } else if ctx.domain.contains("dwp") {
        "DWP Official"
    } else if ctx.domain.contains("hmrc") {
        "HMRC Official"
    } else if ctx.domain.contains("liverpool.gov.uk") {
        "Liverpool Council Official"
    } else if ctx.domain.contains("westminster.gov.uk") {
        "Westminster Council Official"
    } else {
        "Government Official"
    };
    Some(label.to_string())
}

fn judiciary(ctx: &RoleContext) -> Option<String> {
    if !ctx.domain.contains("judiciary") && !ctx.organization.contains("judge") {
        return None;
    }
    let label = if ctx.organization.contains("lord") || ctx.organization.contains("lady") {
        "Senior Judge"
    } else {
        "Judge/Judicial Officer"
    };
    Some(label.to_string())
}

fn court(ctx: &RoleContext) -> Option<String> {
    ["tribunal", "court"]
        .iter()
        .any(|term| ctx.domain.contains(term) || ctx.organization.contains(term))
        .then(|| "Legal/Court Official".to_string())
}

fn police(ctx: &RoleContext) -> Option<String> {
    if !ctx.domain.contains("police") && !ctx.organization.contains("police") {
        return None;
    }
    let label = if ctx.organization.contains("chief") || ctx.organization.contains("commissioner") {
        "Senior Police Officer"
    } else {
        "Police Officer"
    };
    Some(label.to_string())
}

fn healthcare(ctx: &RoleContext) -> Option<String> {
    if !ctx.domain.contains("nhs")
        && !ctx.domain.contains("health")
        && !ctx.organization.contains("health")
    {
        return None;
    }
    let label = if ctx.organization.contains("doctor") || ctx.organization.contains("dr") {
        "Medical Professional"
    } else {
        "Healthcare Professional"
    };
    Some(label.to_string())
}

fn legal(ctx: &RoleContext) -> Option<String> {
    ["solicitor", "barrister", "legal", "law"]
        .iter()
        .any(|term| ctx.domain.contains(term) || ctx.organization.contains(term))
        .then(|| "Legal Professional".to_string())
}

fn media(ctx: &RoleContext) -> Option<String> {
    [
        "bbc.co.uk",
        "bbc.com",
        "guardian",
        "telegraph",
        "times",
        "itv",
        "channel4",
        "sky",
    ]
    .iter()
    .any(|outlet| ctx.domain.contains(outlet))
    .then(|| "Media/Journalist".to_string())
}

fn academic(ctx: &RoleContext) -> Option<String> {
    if !ctx.domain.contains(".ac.uk") {
        return None;
    }
    let label = if ctx.organization.contains("professor") || ctx.organization.contains("prof") {
        "Academic (Professor/Researcher)"
    } else {
        "Academic/Student"
    };
    Some(label.to_string())
}

fn advocacy(ctx: &RoleContext) -> Option<String> {
    ["advocacy", "support", "advice", "healthwatch"]
        .iter()
        .any(|term| ctx.email.contains(term) || ctx.organization.contains(term))
        .then(|| "Advocacy/Support Services".to_string())
}

fn housing(ctx: &RoleContext) -> Option<String> {
    (ctx.email.contains("torus") || ctx.organization.contains("housing"))
        .then(|| "Housing Services".to_string())
}

fn regulatory(ctx: &RoleContext) -> Option<String> {
    ["ombudsman", "ico", "cqc", "regulator"]
        .iter()
        .any(|term| ctx.domain.contains(term) || ctx.organization.contains(term))
        .then(|| "Regulatory/Oversight".to_string())
}

fn private_sector(ctx: &RoleContext) -> Option<String> {
    let commercial = [".com", ".co.uk", ".net"]
        .iter()
        .any(|tld| ctx.domain.contains(tld));
    let public = [".gov.uk", ".nhs", "parliament"]
        .iter()
        .any(|marker| ctx.domain.contains(marker));
    (commercial && !public).then(|| "Private Sector".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(email: &str, organization: &str) -> String {
        let domain = email.split_once('@').map(|(_, d)| d).unwrap_or("");
        classify(&RoleContext::new(email, domain, organization))
    }

    #[test]
    fn parliament_wins_first() {
        assert_eq!(role("mp@parliament.uk", "UK Parliament"), "MP (Member of Parliament)");
    }

    #[test]
    fn government_departments_are_refined() {
        assert_eq!(role("a@homeoffice.gov.uk", ""), "Home Office Official");
        assert_eq!(role("a@hmcts.gov.uk", ""), "HMCTS Official");
        assert_eq!(role("a@justice.gov.uk", ""), "Ministry of Justice Official");
        assert_eq!(role("a@cps.gov.uk", ""), "Crown Prosecution Service");
        assert_eq!(role("a@dwp.gov.uk", ""), "DWP Official");
        assert_eq!(role("a@hmrc.gov.uk", ""), "HMRC Official");
        assert_eq!(role("a@liverpool.gov.uk", ""), "Liverpool Council Official");
        assert_eq!(role("a@someborough.gov.uk", ""), "Government Official");
    }

    #[test]
    fn hmcts_outranks_the_broader_justice_keyword() {
        // hmcts.gov.uk would also match "justice"-adjacent rules further
        // down; the more specific department label must win.
        assert_eq!(role("clerk@hmcts.gov.uk", "HM Courts & Tribunals Service"), "HMCTS Official");
    }

    #[test]
    fn judges_and_senior_judges() {
        assert_eq!(role("x@judiciary.uk", "The Judiciary"), "Judge/Judicial Officer");
        assert_eq!(role("x@chambers.com", "Office of Lord Justice Judge"), "Senior Judge");
    }

    #[test]
    fn tribunal_staff() {
        assert_eq!(role("x@example.com", "First-tier Tribunal"), "Legal/Court Official");
    }

    #[test]
    fn police_officers_and_seniors() {
        assert_eq!(role("a@police.uk", "UK Police Force"), "Police Officer");
        assert_eq!(role("a@merseyside.police.uk", "Office of the Chief Constable"), "Senior Police Officer");
    }

    #[test]
    fn healthcare_and_medical() {
        assert_eq!(role("j.smith@nhs.net", "NHS"), "Healthcare Professional");
        assert_eq!(role("j.smith@nhs.net", "Doctor's Surgery"), "Medical Professional");
    }

    #[test]
    fn legal_professionals() {
        assert_eq!(role("x@smith-solicitors.co.uk", ""), "Legal Professional");
        assert_eq!(role("x@example.io", "Barrister Chambers"), "Legal Professional");
    }

    #[test]
    fn media_outlets() {
        assert_eq!(role("desk@bbc.co.uk", "BBC"), "Media/Journalist");
        assert_eq!(role("news@guardian.co.uk", ""), "Media/Journalist");
    }

    #[test]
    fn academics() {
        assert_eq!(role("s.jones@liv.ac.uk", "LIV University"), "Academic/Student");
        assert_eq!(
            role("s.jones@liv.ac.uk", "Professor of Law, LIV University"),
            "Legal Professional",
        );
        assert_eq!(
            role("s.jones@liv.ac.uk", "Professor of History"),
            "Academic (Professor/Researcher)",
        );
    }

    #[test]
    fn advocacy_and_housing_and_regulatory() {
        assert_eq!(role("help@pohwer.net", "Advocacy for all"), "Advocacy/Support Services");
        assert_eq!(role("x@torus.co.uk", "Torus Housing"), "Housing Services");
        assert_eq!(role("x@ombudsman.org.uk", ""), "Regulatory/Oversight");
    }

    #[test]
    fn commercial_fallback_and_other() {
        assert_eq!(role("someone@gmail.com", "Gmail"), "Private Sector");
        assert_eq!(role("someone@example.xyz", "Example.xyz"), OTHER);
    }

    #[test]
    fn classification_is_total() {
        for email in ["a@b.io", "weird@domain.zz", "x@y.dev"] {
            assert!(!role(email, "").is_empty());
        }
    }
}
