//! Sector classification: coarse grouping over the role label plus the
//! email/organization text. Same first-match-wins shape as the role
//! cascade, but every rule resolves to a fixed label.

pub const OTHER: &str = "Other";

pub struct SectorContext {
    email: String,
    organization: String,
    role: String,
}

impl SectorContext {
    pub fn new(email: &str, organization: &str, role: &str) -> Self {
        SectorContext {
            email: email.to_lowercase(),
            organization: organization.to_lowercase(),
            role: role.to_lowercase(),
        }
    }
}

struct SectorRule {
    label: &'static str,
    matches: fn(&SectorContext) -> bool,
}

const SECTOR_RULES: &[SectorRule] = &[
    SectorRule {
        label: "Parliament",
        matches: |ctx| {
            ctx.role.contains("mp")
                || ctx.email.contains("parliament")
                || ctx.organization.contains("parliament")
        },
    },
    SectorRule {
        label: "Government",
        matches: |ctx| {
            ctx.role.contains("government")
                || ctx.role.contains("council")
                || ctx.email.contains(".gov.uk")
        },
    },
    SectorRule {
        label: "Judiciary",
        matches: |ctx| {
            ctx.role.contains("judge")
                || ctx.role.contains("judicial")
                || ["court", "tribunal", "judiciary"]
                    .iter()
                    .any(|term| ctx.organization.contains(term))
        },
    },
    SectorRule {
        label: "Law Enforcement",
        matches: |ctx| {
            ctx.role.contains("police")
                || ctx.email.contains("police")
                || ctx.organization.contains("police")
        },
    },
    SectorRule {
        label: "Legal Sector",
        matches: |ctx| {
            ctx.role.contains("legal")
                || ["solicitor", "barrister", "law firm"]
                    .iter()
                    .any(|term| ctx.organization.contains(term))
        },
    },
    SectorRule {
        label: "Healthcare",
        matches: |ctx| {
            ctx.role.contains("healthcare")
                || ctx.role.contains("medical")
                || ctx.email.contains("nhs")
                || ctx.organization.contains("nhs")
        },
    },
    SectorRule {
        label: "Oversight/Regulatory",
        matches: |ctx| {
            ["regulatory", "oversight", "ombudsman"]
                .iter()
                .any(|term| ctx.role.contains(term))
        },
    },
    SectorRule {
        label: "Media",
        matches: |ctx| ctx.role.contains("media") || ctx.role.contains("journalist"),
    },
    SectorRule {
        label: "Academic",
        matches: |ctx| {
            ctx.role.contains("academic")
                || ctx.role.contains("student")
                || ctx.email.contains(".ac.uk")
        },
    },
    SectorRule {
        label: "Advocacy/Support Services",
        matches: |ctx| ctx.role.contains("advocacy") || ctx.role.contains("support"),
    },
    SectorRule {
        label: "Housing",
        matches: |ctx| ctx.role.contains("housing"),
    },
];

pub fn classify(ctx: &SectorContext) -> String {
    SECTOR_RULES
        .iter()
        .find(|rule| (rule.matches)(ctx))
        .map(|rule| rule.label)
        .unwrap_or(OTHER)
        .to_string()
}
