use metrics_exporter_prometheus::PrometheusHandle;
use org_scoring::config::AppConfig;
use org_scoring::error::AppError;
use org_scoring::scoring::catalog::{EARLY_CHILDHOOD, PRIVATE_SCHOOL, TUTORING_CENTER};
use org_scoring::scoring::{
    AgeRange, ClaimStatus, ContactMethod, ContactType, Location, OrgId, OrgProfile,
    OrgRepository, OrgSnapshot, Program, RepositoryError, RuleSetRegistry, SocialLink,
    SocialPlatform, Verification, VerificationStatus,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrgRepository {
    records: Arc<Mutex<BTreeMap<OrgId, OrgSnapshot>>>,
}

impl InMemoryOrgRepository {
    pub(crate) fn seeded(orgs: Vec<OrgSnapshot>) -> Self {
        let records = orgs.into_iter().map(|org| (org.id.clone(), org)).collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<OrgId, OrgSnapshot>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl OrgRepository for InMemoryOrgRepository {
    fn fetch(&self, id: &OrgId) -> Result<Option<OrgSnapshot>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<OrgSnapshot>, RepositoryError> {
        Ok(self.guard()?.values().take(limit).cloned().collect())
    }
}

/// Registry from an explicit rule set file, or from the environment configuration.
pub(crate) fn load_registry(path: Option<&Path>) -> Result<RuleSetRegistry, AppError> {
    let registry = match path {
        Some(path) => RuleSetRegistry::from_path(path)?,
        None => RuleSetRegistry::from_config(&AppConfig::load()?.scoring)?,
    };
    Ok(registry)
}

pub(crate) fn load_org_from_path(path: &Path) -> Result<OrgSnapshot, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn public_contact(contact_type: ContactType, value: &str) -> ContactMethod {
    ContactMethod {
        contact_type,
        value: value.to_string(),
        is_public: true,
    }
}

fn program(name: &str, description: &str, ages: (u8, u8), tuition: Option<u32>) -> Program {
    Program {
        name: name.to_string(),
        description: Some(description.to_string()),
        age_range: Some(AgeRange {
            min_age: ages.0,
            max_age: ages.1,
        }),
        tuition,
        schedule: Some("Mon-Fri 08:00-15:00".to_string()),
    }
}

/// Organizations seeded into the in-memory repository and scored by `demo`.
pub(crate) fn demo_organizations() -> Vec<OrgSnapshot> {
    vec![
        OrgSnapshot {
            id: OrgId("org-riverside-academy".to_string()),
            name: "Riverside Academy".to_string(),
            categories: vec![PRIVATE_SCHOOL.to_string()],
            profile: OrgProfile {
                description: Some("Bilingual K-12 school by the river.".to_string()),
                logo_url: Some("https://cdn.example.org/riverside/logo.png".to_string()),
                website: Some("https://riverside.example.org".to_string()),
                email: Some("admissions@riverside.example.org".to_string()),
                founded_year: Some(1998),
                accreditation: Some("Regional Schools Association".to_string()),
            },
            verification: Some(Verification {
                status: VerificationStatus::Verified,
                verified_on: chrono::NaiveDate::from_ymd_opt(2025, 3, 14),
            }),
            claim_status: ClaimStatus::Claimed,
            locations: vec![
                Location {
                    name: Some("Main campus".to_string()),
                    is_primary: true,
                    address_line: Some("12 River Road".to_string()),
                    city: Some("Springfield".to_string()),
                    contacts: vec![
                        public_contact(ContactType::Phone, "+1 555 0100"),
                        public_contact(ContactType::Whatsapp, "+1 555 0101"),
                    ],
                },
                Location {
                    name: Some("Sports annex".to_string()),
                    is_primary: false,
                    address_line: Some("40 Field Lane".to_string()),
                    city: Some("Springfield".to_string()),
                    contacts: Vec::new(),
                },
            ],
            programs: vec![
                program("Primary", "Grades 1 to 5", (6, 11), Some(9_500)),
                program("Middle school", "Grades 6 to 8", (11, 14), Some(10_200)),
                program("High school", "Grades 9 to 12", (14, 18), None),
            ],
            social_links: Some(vec![
                SocialLink {
                    platform: SocialPlatform::Facebook,
                    url: "https://facebook.com/riverside".to_string(),
                },
                SocialLink {
                    platform: SocialPlatform::Instagram,
                    url: "https://instagram.com/riverside".to_string(),
                },
            ]),
        },
        OrgSnapshot {
            id: OrgId("org-little-steps".to_string()),
            name: "Little Steps Nursery".to_string(),
            categories: vec![EARLY_CHILDHOOD.to_string()],
            profile: OrgProfile {
                description: Some("Play-based nursery for toddlers.".to_string()),
                ..OrgProfile::default()
            },
            claim_status: ClaimStatus::Pending,
            locations: vec![Location {
                is_primary: true,
                address_line: Some("3 Elm Street".to_string()),
                contacts: vec![public_contact(ContactType::Phone, "+1 555 0200")],
                ..Location::default()
            }],
            programs: vec![program("Toddlers", "Ages 2 to 3", (2, 3), Some(650))],
            ..OrgSnapshot::default()
        },
        OrgSnapshot {
            id: OrgId("org-bright-tutors".to_string()),
            name: "Bright Tutors".to_string(),
            categories: vec![TUTORING_CENTER.to_string()],
            ..OrgSnapshot::default()
        },
        OrgSnapshot {
            id: OrgId("org-city-library".to_string()),
            name: "City Library".to_string(),
            categories: vec!["library".to_string()],
            ..OrgSnapshot::default()
        },
    ]
}
