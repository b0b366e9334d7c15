//! Subcommand execution and output formatting.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::info;

use arogya_discovery::core::{AnonymousSession, DynSession, StaticSession, UserIdentity};
use arogya_discovery::error::DiscoveryError;
use arogya_discovery::search::SuggestionState;
use arogya_discovery::{
    AccumulatedResults, CarePlan, DiscoveryConfig, LookupOutcome, PlanOutcome, SearchController,
    SearchOutcome, TripPlanner,
};
use arogya_http::{ApiClient, HttpAccommodationFinder, HttpCatalog, HttpTravelEstimator};

use crate::config::{CliConfig, Command, PlanArgs, SearchArgs, SuggestArgs};

/// Runs the configured subcommand and prints its output.
pub async fn run(config: CliConfig) -> anyhow::Result<()> {
    let discovery = config.discovery_config()?;
    let session: DynSession = match &config.token {
        Some(token) => Arc::new(StaticSession::new(
            UserIdentity::new("cli", "cli").with_token(token.clone()),
        )),
        None => Arc::new(AnonymousSession),
    };
    let client = Arc::new(ApiClient::new(&config.http_config(), session.clone())?);

    info!(api = %client.base_url(), "Using ArogyaShayak API");

    let output = match &config.command {
        Command::Search(args) => search(client, &discovery, args, config.json).await?,
        Command::Suggest(args) => suggest(client, &discovery, args, config.json).await?,
        Command::Plan(args) => plan(client, discovery, session, args, config.json).await?,
    };
    println!("{}", output);
    Ok(())
}

/// Returns a hint for failures the user can retry as-is, such as a catalog or
/// travel estimator that was temporarily unreachable.
pub fn retry_hint(err: &anyhow::Error) -> Option<&'static str> {
    let err = err.downcast_ref::<DiscoveryError>()?;
    err.kind()
        .is_retryable()
        .then_some("The service may be temporarily unavailable; run the command again.")
}

async fn search(
    client: Arc<ApiClient>,
    discovery: &DiscoveryConfig,
    args: &SearchArgs,
    json: bool,
) -> anyhow::Result<String> {
    let controller = SearchController::new(Arc::new(HttpCatalog::new(client)), discovery);
    controller
        .submit_search(&args.term, args.specialty.as_deref())
        .await?;

    let mut loaded = 1;
    while args.all || loaded < args.pages {
        match controller.load_next_page().await? {
            SearchOutcome::Loaded { .. } => loaded += 1,
            _ => break,
        }
    }

    let results = controller.results();
    if json {
        Ok(serde_json::to_string_pretty(&results)?)
    } else {
        Ok(render_results(&results))
    }
}

async fn suggest(
    client: Arc<ApiClient>,
    discovery: &DiscoveryConfig,
    args: &SuggestArgs,
    json: bool,
) -> anyhow::Result<String> {
    let controller = SearchController::new(Arc::new(HttpCatalog::new(client)), discovery);
    let outcome = controller.on_input(&args.text).await;
    if outcome == LookupOutcome::Failed {
        anyhow::bail!("Suggestion lookup for '{}' failed", args.text.trim());
    }

    let state = controller.suggestions();
    if json {
        Ok(serde_json::to_string_pretty(&state.suggestions)?)
    } else {
        Ok(render_suggestions(&state))
    }
}

async fn plan(
    client: Arc<ApiClient>,
    discovery: DiscoveryConfig,
    session: DynSession,
    args: &PlanArgs,
    json: bool,
) -> anyhow::Result<String> {
    let planner = TripPlanner::new(
        Arc::new(HttpTravelEstimator::new(client.clone())),
        Arc::new(HttpAccommodationFinder::new(client)),
        discovery,
    )
    .with_session(session);

    let plan = match planner.submit(&args.origin, args.destination()).await? {
        PlanOutcome::Ready(plan) => plan,
        PlanOutcome::Superseded => anyhow::bail!("Plan generation was interrupted"),
    };

    if json {
        Ok(serde_json::to_string_pretty(&plan)?)
    } else {
        Ok(render_plan(&plan))
    }
}

/// Formats accumulated search results as text.
pub fn render_results(results: &AccumulatedResults) -> String {
    if results.is_empty() {
        return format!("No hospitals found for {}.", results.query);
    }

    let mut out = String::new();
    for (index, hospital) in results.items.iter().enumerate() {
        let _ = write!(out, "{:>3}. {}", index + 1, hospital.name);
        if hospital.ayushman_empanelled {
            out.push_str(" [Ayushman]");
        }
        out.push('\n');

        let address = hospital.address.to_string();
        if !address.is_empty() {
            let _ = writeln!(out, "     {}", address);
        }
        if !hospital.specialties.is_empty() {
            let _ = writeln!(out, "     {}", hospital.specialties.join(", "));
        }
        if hospital.review_count > 0 {
            let _ = writeln!(
                out,
                "     {:.1} stars ({} reviews)",
                hospital.rating, hospital.review_count
            );
        }
    }
    let _ = write!(
        out,
        "Page {} of {} ({} hospitals)",
        results.current_page,
        results.total_pages,
        results.len()
    );
    out
}

/// Formats suggestions as a list of names.
pub fn render_suggestions(state: &SuggestionState) -> String {
    if !state.visible || state.suggestions.is_empty() {
        return "No suggestions.".to_string();
    }
    state
        .suggestions
        .iter()
        .map(|h| h.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a care plan as text.
pub fn render_plan(plan: &CarePlan) -> String {
    let estimate = &plan.travel_estimate;
    let mut out = String::new();

    let _ = writeln!(out, "Care plan: {} -> {}", plan.origin, plan.destination.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "Travel");
    let _ = writeln!(out, "  Cost:     Rs {}", estimate.estimated_cost);
    let _ = writeln!(out, "  Duration: {}", estimate.duration);
    if !estimate.transport_modes.is_empty() {
        let _ = writeln!(out, "  Modes:    {}", estimate.transport_modes.join(", "));
    }
    if !estimate.advisory.is_empty() {
        let _ = writeln!(out, "  Tip:      {}", estimate.advisory);
    }
    let _ = writeln!(out);

    if plan.nearby_stays.is_empty() {
        let _ = writeln!(out, "Nearby stays: none found");
    } else {
        let _ = writeln!(out, "Nearby stays ({} nights)", plan.stay_nights);
        for stay in &plan.nearby_stays {
            let _ = writeln!(
                out,
                "  {} ({}) Rs {:.0}/night, Rs {:.0} total",
                stay.name,
                stay.kind,
                stay.price_per_night,
                stay.stay_cost(plan.stay_nights)
            );
        }
    }
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Estimated trip cost from Rs {:.0} (excluding treatment)",
        plan.total_estimate
    );
    out
}
