//! Post-run artifact bundle. Cosmetic only.

use crate::domain::{ArtifactBundle, Brief, RunResult};

/// Presentation tier, a pure function of the quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactTier {
    Flagship,
    Stable,
    Recovery,
}

impl ArtifactTier {
    pub fn from_score(score: i64) -> Self {
        if score >= 85 {
            ArtifactTier::Flagship
        } else if score >= 65 {
            ArtifactTier::Stable
        } else {
            ArtifactTier::Recovery
        }
    }

    pub fn site_title(self, client_name: &str) -> String {
        match self {
            ArtifactTier::Flagship => format!("{} Autonomous Flagship", client_name),
            ArtifactTier::Stable => format!("{} DAO Relaunch", client_name),
            ArtifactTier::Recovery => format!("{} Recovery Console", client_name),
        }
    }
}

const ACCEPTED_NOTES: [&str; 3] = [
    "Autonomous execution complete.",
    "Client accepted delivery for the current sprint.",
    "Ready for expansion into the next campaign.",
];

const REJECTED_NOTES: [&str; 3] = [
    "Client found weak execution in at least one critical role.",
    "Refit the hat tree and retry before treasury depletion.",
    "Investigate reliability-sensitive steps in Engine mode.",
];

/// Lowercase; runs of anything outside `[a-z0-9]` collapse to one `-`;
/// no leading or trailing `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Build the cosmetic bundle for a finished run.
///
/// Title follows the score tier; notes follow `passed`. The two can
/// disagree (a 90-point run that blew the treasury is a failed flagship).
pub fn generate_artifacts(result: &RunResult, brief: &Brief) -> ArtifactBundle {
    let slug = slugify(&brief.client_name);
    let tier = ArtifactTier::from_score(result.quality_score);
    let notes = if result.passed {
        ACCEPTED_NOTES
    } else {
        REJECTED_NOTES
    };

    ArtifactBundle {
        site_title: tier.site_title(&brief.client_name),
        public_url: format!("https://{}-autonomous.sim", slug),
        ens_name: format!("{}.dao.eth", slug),
        cid: result.cid.clone(),
        notes: notes.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Regen Frontier Global Conference"), "regen-frontier-global-conference");
        assert_eq!(slugify("  --Meta   Summit!! 2024--"), "meta-summit-2024");
        assert_eq!(slugify("Café Ünïon"), "caf-n-on");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ArtifactTier::from_score(100), ArtifactTier::Flagship);
        assert_eq!(ArtifactTier::from_score(85), ArtifactTier::Flagship);
        assert_eq!(ArtifactTier::from_score(84), ArtifactTier::Stable);
        assert_eq!(ArtifactTier::from_score(65), ArtifactTier::Stable);
        assert_eq!(ArtifactTier::from_score(64), ArtifactTier::Recovery);
        assert_eq!(ArtifactTier::from_score(0), ArtifactTier::Recovery);
    }
}
