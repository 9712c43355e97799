//! Rule sets shipped with the service. Adding a category here is a data change only.

use super::domain::ContactType;
use super::rules::{
    CategoryRuleSet, LocationScope, ProfileField, ProgramField, Rule, RulePredicate, ScoringGroup,
};

pub const PRIVATE_SCHOOL: &str = "private-school";
pub const PUBLIC_SCHOOL: &str = "public-school";
pub const EARLY_CHILDHOOD: &str = "early-childhood";
pub const TUTORING_CENTER: &str = "tutoring-center";

pub fn builtin_rule_sets() -> Vec<CategoryRuleSet> {
    vec![
        private_school(),
        public_school(),
        early_childhood(),
        tutoring_center(),
    ]
}

fn private_school() -> CategoryRuleSet {
    CategoryRuleSet::new(
        PRIVATE_SCHOOL,
        "Private school",
        vec![
            trust(true),
            curriculum(vec![
                detail(
                    "program_descriptions",
                    "Programs describe what they teach",
                    ProgramField::Description,
                    5.0,
                ),
                detail(
                    "program_age_ranges",
                    "Programs list the ages they serve",
                    ProgramField::AgeRange,
                    5.0,
                ),
                detail(
                    "program_tuition",
                    "Programs publish tuition",
                    ProgramField::Tuition,
                    5.0,
                ),
                detail(
                    "program_schedules",
                    "Programs publish a schedule",
                    ProgramField::Schedule,
                    5.0,
                ),
            ]),
            communication(),
            digital(),
            admin(),
        ],
    )
}

fn public_school() -> CategoryRuleSet {
    CategoryRuleSet::new(
        PUBLIC_SCHOOL,
        "Public school",
        vec![
            trust(false),
            curriculum(vec![
                detail(
                    "program_descriptions",
                    "Programs describe what they teach",
                    ProgramField::Description,
                    5.0,
                ),
                detail(
                    "program_age_ranges",
                    "Programs list the grades they serve",
                    ProgramField::AgeRange,
                    5.0,
                ),
                detail(
                    "program_schedules",
                    "Programs publish a schedule",
                    ProgramField::Schedule,
                    5.0,
                ),
            ]),
            communication(),
            digital(),
            admin(),
        ],
    )
}

fn early_childhood() -> CategoryRuleSet {
    CategoryRuleSet::new(
        EARLY_CHILDHOOD,
        "Early childhood centre",
        vec![
            trust(true),
            curriculum(vec![
                detail(
                    "program_age_ranges",
                    "Programs list the ages they serve",
                    ProgramField::AgeRange,
                    10.0,
                ),
                detail(
                    "program_schedules",
                    "Programs publish daily hours",
                    ProgramField::Schedule,
                    10.0,
                ),
                detail(
                    "program_tuition",
                    "Programs publish fees",
                    ProgramField::Tuition,
                    5.0,
                ),
            ]),
            communication(),
            digital(),
            admin(),
        ],
    )
}

fn tutoring_center() -> CategoryRuleSet {
    CategoryRuleSet::new(
        TUTORING_CENTER,
        "Tutoring centre",
        vec![
            trust(false),
            curriculum(vec![
                detail(
                    "program_descriptions",
                    "Subjects are described",
                    ProgramField::Description,
                    5.0,
                ),
                detail(
                    "program_tuition",
                    "Sessions publish pricing",
                    ProgramField::Tuition,
                    10.0,
                ),
            ]),
            communication(),
            digital(),
        ],
    )
}

fn trust(accredited: bool) -> ScoringGroup {
    let mut rules = vec![
        Rule::new(
            "verified",
            "Organization is verified",
            15.0,
            RulePredicate::Verified,
        ),
        Rule::new(
            "claimed",
            "Profile is claimed by the organization",
            10.0,
            RulePredicate::Claimed,
        ),
        Rule::new(
            "has_primary_location_phone",
            "Primary location lists a public phone number",
            10.0,
            RulePredicate::HasContact {
                contact_type: ContactType::Phone,
                scope: LocationScope::Primary,
                public_only: true,
            },
        ),
        Rule::new(
            "has_primary_location_address",
            "Primary location has a street address",
            5.0,
            RulePredicate::PrimaryLocationAddress,
        ),
    ];
    if accredited {
        rules.push(Rule::new(
            "accreditation",
            "Accreditation is listed",
            10.0,
            RulePredicate::ProfileField {
                field: ProfileField::Accreditation,
            },
        ));
    }
    ScoringGroup::new("trust", "Trust", rules)
}

fn curriculum(details: Vec<Rule>) -> ScoringGroup {
    let mut rules = vec![Rule::new(
        "program_count",
        "At least three programs are listed",
        10.0,
        RulePredicate::ProgramCount { minimum: 3 },
    )];
    rules.extend(details);
    ScoringGroup::new("curriculum", "Curriculum", rules)
}

fn detail(key: &str, label: &str, field: ProgramField, weight: f64) -> Rule {
    Rule::new(key, label, weight, RulePredicate::ProgramDetail { field })
}

fn communication() -> ScoringGroup {
    ScoringGroup::new(
        "communication",
        "Communication",
        vec![
            Rule::new(
                "public_email",
                "A public email address is listed",
                10.0,
                RulePredicate::AnyOf {
                    predicates: vec![
                        RulePredicate::HasContact {
                            contact_type: ContactType::Email,
                            scope: LocationScope::Any,
                            public_only: true,
                        },
                        RulePredicate::ProfileField {
                            field: ProfileField::Email,
                        },
                    ],
                },
            ),
            Rule::new(
                "whatsapp",
                "A location can be reached on WhatsApp",
                5.0,
                RulePredicate::HasContact {
                    contact_type: ContactType::Whatsapp,
                    scope: LocationScope::Any,
                    public_only: true,
                },
            ),
            Rule::new(
                "every_location_phone",
                "Every location lists a public phone number",
                5.0,
                RulePredicate::HasContact {
                    contact_type: ContactType::Phone,
                    scope: LocationScope::All,
                    public_only: true,
                },
            ),
        ],
    )
}

fn digital() -> ScoringGroup {
    ScoringGroup::new(
        "digital",
        "Digital presence",
        vec![
            Rule::new(
                "website",
                "Website is listed",
                10.0,
                RulePredicate::ProfileField {
                    field: ProfileField::Website,
                },
            ),
            Rule::new(
                "logo",
                "Logo is uploaded",
                5.0,
                RulePredicate::ProfileField {
                    field: ProfileField::Logo,
                },
            ),
            Rule::new(
                "social_presence",
                "At least one social profile is linked",
                5.0,
                RulePredicate::HasSocialLink { platform: None },
            ),
            Rule::new(
                "social_reach",
                "Three or more social profiles are linked",
                5.0,
                RulePredicate::SocialLinkCount { target: 3 },
            ),
        ],
    )
}

fn admin() -> ScoringGroup {
    ScoringGroup::new(
        "admin",
        "Administration",
        vec![
            Rule::new(
                "has_location",
                "At least one location is listed",
                5.0,
                RulePredicate::HasLocation,
            ),
            Rule::new(
                "description",
                "Profile has a description",
                5.0,
                RulePredicate::ProfileField {
                    field: ProfileField::Description,
                },
            ),
            Rule::new(
                "founded_year",
                "Founding year is listed",
                5.0,
                RulePredicate::ProfileField {
                    field: ProfileField::FoundedYear,
                },
            ),
            Rule::new(
                "claimed_and_verified",
                "Profile is both claimed and verified",
                5.0,
                RulePredicate::AllOf {
                    predicates: vec![RulePredicate::Claimed, RulePredicate::Verified],
                },
            ),
        ],
    )
}
