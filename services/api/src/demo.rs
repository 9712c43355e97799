use crate::infra::{demo_organizations, load_org_from_path, load_registry, InMemoryOrgRepository};
use clap::Args;
use org_scoring::error::AppError;
use org_scoring::scoring::{
    OrgScoreView, OrgScoringService, OrgSnapshot, RuleSetRegistry, ScoringEngine,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Organization snapshot (JSON) to score
    #[arg(long)]
    pub(crate) org: PathBuf,
    /// Rule set file to use instead of the configured registry
    #[arg(long)]
    pub(crate) rule_sets: Option<PathBuf>,
    /// Print the scoring module as JSON instead of a breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RuleSetsArgs {
    /// Dump the rule set registered for this category
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Rule set file to use instead of the configured registry
    #[arg(long)]
    pub(crate) rule_sets: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Rule set file to use instead of the configured registry
    #[arg(long)]
    pub(crate) rule_sets: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        org,
        rule_sets,
        json,
    } = args;

    let registry = load_registry(rule_sets.as_deref())?;
    let org = load_org_from_path(&org)?;
    let service = scoring_service(registry, Vec::new());

    if json {
        let scoring = service.evaluate(&org);
        println!("{}", serde_json::to_string_pretty(&scoring)?);
        return Ok(());
    }

    render_org(&service, &org);
    Ok(())
}

pub(crate) fn run_rule_sets(args: RuleSetsArgs) -> Result<(), AppError> {
    let RuleSetsArgs {
        category,
        rule_sets,
    } = args;
    let registry = load_registry(rule_sets.as_deref())?;

    match category {
        Some(category) => match registry.resolve(&category) {
            Some(rule_set) => println!("{}", serde_json::to_string_pretty(rule_set)?),
            None => println!("No rule set registered for '{category}'"),
        },
        None => {
            println!("Registered rule sets");
            for rule_set in registry.rule_sets() {
                let max_score: f64 = rule_set.groups.iter().map(|group| group.max_score()).sum();
                println!(
                    "- {} ({}): {} groups, {} rules, {:.0} points",
                    rule_set.category,
                    rule_set.label,
                    rule_set.groups.len(),
                    rule_set.rule_count(),
                    max_score
                );
            }
            match registry.default_category() {
                Some(default) => println!("Default category: {default}"),
                None => println!("Default category: none"),
            }
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let registry = load_registry(args.rule_sets.as_deref())?;
    let orgs = demo_organizations();
    let service = scoring_service(registry, orgs.clone());

    println!("Organization scoring demo");
    for org in &orgs {
        println!();
        render_org(&service, org);
    }

    let leaderboard = service.leaderboard(orgs.len())?;
    println!("\nLeaderboard");
    for (rank, view) in leaderboard.iter().enumerate() {
        println!(
            "{}. {} ({}) {}%",
            rank + 1,
            view.org_name,
            view.category_label,
            view.display_percent()
        );
    }

    Ok(())
}

fn scoring_service(
    registry: RuleSetRegistry,
    orgs: Vec<OrgSnapshot>,
) -> OrgScoringService<InMemoryOrgRepository> {
    let engine = Arc::new(ScoringEngine::new(Arc::new(registry)));
    let repository = Arc::new(InMemoryOrgRepository::seeded(orgs));
    OrgScoringService::new(repository, engine)
}

fn render_org(service: &OrgScoringService<InMemoryOrgRepository>, org: &OrgSnapshot) {
    match service.view(org) {
        Some(view) => render_breakdown(&view),
        None => println!("{}: no scoring available", display_name(org)),
    }
}

fn display_name(org: &OrgSnapshot) -> &str {
    if org.name.trim().is_empty() {
        &org.id.0
    } else {
        &org.name
    }
}

fn render_breakdown(view: &OrgScoreView) {
    println!("{} [{}]", view.org_name, view.category_label);
    println!(
        "Score: {:.1}/{:.1} ({}%)",
        view.total_score,
        view.total_max_score,
        view.display_percent()
    );

    for group in &view.groups {
        println!("- {}: {:.1}/{:.1}", group.label, group.score, group.max_score);
        for rule in &group.rules {
            let marker = if rule.satisfied { "x" } else { " " };
            println!(
                "  [{}] {} ({:.1}/{:.1})",
                marker, rule.label, rule.points_earned, rule.max_points
            );
        }
    }

    let missed: Vec<_> = view.missed_rules().collect();
    if missed.is_empty() {
        println!("Missing: none");
    } else {
        println!("Missing");
        for rule in missed {
            println!("- {}", rule.label);
        }
    }
}
