use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::scoring::catalog::PRIVATE_SCHOOL;
use crate::scoring::domain::{
    AgeRange, ClaimStatus, ContactMethod, ContactType, Location, OrgId, OrgProfile, OrgSnapshot,
    Program, SocialLink, SocialPlatform, Verification, VerificationStatus,
};
use crate::scoring::repository::{OrgRepository, RepositoryError};
use crate::scoring::rules::{CategoryRuleSet, LocationScope, Rule, RulePredicate, ScoringGroup};
use crate::scoring::{OrgScoringService, RuleSetRegistry, ScoringEngine};

pub(super) fn contact(contact_type: ContactType, value: &str, is_public: bool) -> ContactMethod {
    ContactMethod {
        contact_type,
        value: value.to_string(),
        is_public,
    }
}

pub(super) fn primary_location(contacts: Vec<ContactMethod>) -> Location {
    Location {
        name: Some("Main campus".to_string()),
        is_primary: true,
        address_line: Some("12 Main Street".to_string()),
        city: Some("Georgetown".to_string()),
        contacts,
    }
}

fn program(name: &str) -> Program {
    Program {
        name: name.to_string(),
        description: Some(format!("{name} programme")),
        age_range: Some(AgeRange {
            min_age: 5,
            max_age: 11,
        }),
        tuition: Some(120_000),
        schedule: Some("Mon-Fri 08:00-14:30".to_string()),
    }
}

fn social(platform: SocialPlatform, url: &str) -> SocialLink {
    SocialLink {
        platform,
        url: url.to_string(),
    }
}

/// Organization with no optional data at all.
pub(super) fn bare_org(id: &str, category: &str) -> OrgSnapshot {
    OrgSnapshot {
        id: OrgId(id.to_string()),
        name: format!("Org {id}"),
        categories: vec![category.to_string()],
        ..OrgSnapshot::default()
    }
}

/// Organization satisfying every built-in private school rule.
pub(super) fn complete_org(id: &str) -> OrgSnapshot {
    OrgSnapshot {
        id: OrgId(id.to_string()),
        name: "St. Rose's Academy".to_string(),
        categories: vec![PRIVATE_SCHOOL.to_string(), "secondary".to_string()],
        profile: OrgProfile {
            description: Some("Independent primary and secondary school".to_string()),
            logo_url: Some("https://cdn.example.org/logo.png".to_string()),
            website: Some("https://strose.example.org".to_string()),
            email: Some("office@strose.example.org".to_string()),
            founded_year: Some(1847),
            accreditation: Some("Ministry of Education".to_string()),
        },
        verification: Some(Verification {
            status: VerificationStatus::Verified,
            verified_on: NaiveDate::from_ymd_opt(2025, 3, 14),
        }),
        claim_status: ClaimStatus::Claimed,
        locations: vec![primary_location(vec![
            contact(ContactType::Phone, "+592-1234567", true),
            contact(ContactType::Email, "office@strose.example.org", true),
            contact(ContactType::Whatsapp, "+592-7654321", true),
        ])],
        programs: vec![program("Nursery"), program("Primary"), program("Secondary")],
        social_links: Some(vec![
            social(SocialPlatform::Facebook, "https://facebook.com/strose"),
            social(SocialPlatform::Instagram, "https://instagram.com/strose"),
            social(SocialPlatform::Youtube, "https://youtube.com/@strose"),
        ]),
    }
}

pub(super) fn phone_rule() -> Rule {
    Rule::new(
        "has_primary_location_phone",
        "Primary location lists a public phone number",
        10.0,
        RulePredicate::HasContact {
            contact_type: ContactType::Phone,
            scope: LocationScope::Primary,
            public_only: true,
        },
    )
}

/// Single-rule private school registry from the phone contact scenario.
pub(super) fn phone_only_registry() -> RuleSetRegistry {
    RuleSetRegistry::new(vec![CategoryRuleSet::new(
        PRIVATE_SCHOOL,
        "Private school",
        vec![ScoringGroup::new("trust", "Trust", vec![phone_rule()])],
    )])
    .expect("scenario registry is valid")
}

pub(super) fn builtin_engine() -> ScoringEngine {
    ScoringEngine::new(Arc::new(
        RuleSetRegistry::builtin().expect("builtin catalog is valid"),
    ))
}

pub(super) fn service_with<R: OrgRepository + 'static>(repository: R) -> OrgScoringService<R> {
    OrgScoringService::new(Arc::new(repository), Arc::new(builtin_engine()))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    orgs: Arc<Mutex<BTreeMap<OrgId, OrgSnapshot>>>,
}

impl MemoryRepository {
    pub(super) fn with(orgs: Vec<OrgSnapshot>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.orgs.lock().expect("repository mutex poisoned");
            for org in orgs {
                guard.insert(org.id.clone(), org);
            }
        }
        repository
    }
}

impl OrgRepository for MemoryRepository {
    fn fetch(&self, id: &OrgId) -> Result<Option<OrgSnapshot>, RepositoryError> {
        let guard = self.orgs.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<OrgSnapshot>, RepositoryError> {
        let guard = self.orgs.lock().expect("repository mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl OrgRepository for UnavailableRepository {
    fn fetch(&self, _id: &OrgId) -> Result<Option<OrgSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _limit: usize) -> Result<Vec<OrgSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_not_found(response: &Response) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
