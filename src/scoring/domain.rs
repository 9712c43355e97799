use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::builder::{ScoringEngine, ScoringModule};

/// Identifier wrapper for directory organizations.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrgId(pub String);

/// Read-only view of an organization as handed over by the directory data layer.
///
/// Every collection defaults to empty and every optional field to `None`, so a
/// partially populated payload still deserializes and simply scores lower.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgSnapshot {
    pub id: OrgId,
    pub name: String,
    pub categories: Vec<String>,
    pub profile: OrgProfile,
    pub verification: Option<Verification>,
    pub claim_status: ClaimStatus,
    pub locations: Vec<Location>,
    pub programs: Vec<Program>,
    pub social_links: Option<Vec<SocialLink>>,
}

impl OrgSnapshot {
    /// First location flagged as primary, falling back to the first location.
    pub fn primary_location(&self) -> Option<&Location> {
        self.locations
            .iter()
            .find(|location| location.is_primary)
            .or_else(|| self.locations.first())
    }

    pub fn social_links(&self) -> &[SocialLink] {
        self.social_links.as_deref().unwrap_or_default()
    }

    pub fn is_verified(&self) -> bool {
        self.verification
            .as_ref()
            .map(|verification| verification.status == VerificationStatus::Verified)
            .unwrap_or(false)
    }
}

/// Free-form descriptive fields editors fill in on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgProfile {
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub founded_year: Option<u16>,
    pub accreditation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub status: VerificationStatus,
    #[serde(default)]
    pub verified_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    #[default]
    Unclaimed,
    Pending,
    Claimed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub name: Option<String>,
    pub is_primary: bool,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub contacts: Vec<ContactMethod>,
}

impl Location {
    /// Whether the location carries a usable contact of the given type.
    pub fn has_contact(&self, contact_type: ContactType, public_only: bool) -> bool {
        self.contacts.iter().any(|contact| {
            contact.contact_type == contact_type
                && (contact.is_public || !public_only)
                && !contact.value.trim().is_empty()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMethod {
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub value: String,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Phone,
    Email,
    Whatsapp,
    Fax,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Program {
    pub name: String,
    pub description: Option<String>,
    pub age_range: Option<AgeRange>,
    pub tuition: Option<u32>,
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeRange {
    pub min_age: u8,
    pub max_age: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Linkedin,
    Youtube,
    Tiktok,
    X,
    #[serde(other)]
    Other,
}

/// Organization together with its derived, never-persisted scoring module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgInstance {
    pub org: OrgSnapshot,
    pub scoring: Option<ScoringModule>,
}

impl OrgInstance {
    pub fn attach(org: OrgSnapshot, engine: &ScoringEngine) -> Self {
        let scoring = engine.compute_org_scoring(&org);
        Self { org, scoring }
    }
}

pub(crate) fn is_present(value: Option<&str>) -> bool {
    value.map(|text| !text.trim().is_empty()).unwrap_or(false)
}
