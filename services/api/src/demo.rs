use crate::infra::build_service;
use clap::Args;
use shelter_match::config::AppConfig;
use shelter_match::error::AppError;
use shelter_match::workflows::adoption::{InquiryOutcome, SimulationReport};
use shelter_match::workflows::ranking::{DetailedMatch, RankedMatch};
use shelter_match::workflows::records::{AdopterId, AnimalId};
use shelter_match::workflows::sessions::{HistoryEntry, MatchStatistics};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Adopter to rank animals for
    #[arg(long)]
    pub(crate) adopter_id: String,
    /// Number of matches to show (defaults to APP_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Analyse this animal against the adopter instead of ranking
    #[arg(long)]
    pub(crate) animal_id: Option<String>,
    /// Print the per-facet reasoning for each ranked match
    #[arg(long)]
    pub(crate) reasoning: bool,
}

#[derive(Args, Debug)]
pub(crate) struct InquiryArgs {
    /// Adopter making the inquiry
    #[arg(long)]
    pub(crate) adopter_id: String,
    /// Number of matches to recommend (defaults to APP_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Print the full session record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Adopters to run inquiries for, in order
    #[arg(long = "adopter-id", default_values = ["1", "2"])]
    pub(crate) adopter_ids: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Limit the listing to one adopter
    #[arg(long)]
    pub(crate) adopter_id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct GuidanceArgs {
    /// Adopted animal
    #[arg(long)]
    pub(crate) animal_id: String,
    /// Adopting family; required unless --behavior is given
    #[arg(long)]
    pub(crate) adopter_id: Option<String>,
    /// Free-text concern raised by the adopter
    #[arg(long)]
    pub(crate) concern: Option<String>,
    /// Print training tips for this behavior instead of adoption guidance
    #[arg(long)]
    pub(crate) behavior: Option<String>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;
    let adopter_id = AdopterId(args.adopter_id);

    if let Some(animal_id) = args.animal_id {
        match service.detailed_match(&AnimalId(animal_id), &adopter_id) {
            Some(detail) => render_detailed_match(&detail),
            None => println!("Animal or adopter not found"),
        }
        return Ok(());
    }

    let matches = service.find_matches(&adopter_id, args.top_n);
    if matches.is_empty() {
        println!("No matches for adopter {adopter_id}");
        return Ok(());
    }

    println!("Top matches for adopter {adopter_id}");
    render_ranked_matches(&matches, args.reasoning);
    Ok(())
}

pub(crate) fn run_inquiry(args: InquiryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut service = build_service(&config)?;

    let outcome = service.process_inquiry(&AdopterId(args.adopter_id), args.top_n)?;
    render_inquiry(&outcome);

    if args.json {
        match serde_json::to_string_pretty(&outcome.session) {
            Ok(json) => println!("\nSession record:\n{json}"),
            Err(err) => println!("\nSession record unavailable: {err}"),
        }
    }
    println!(
        "\nSession saved to {}",
        config.data.session_store.display()
    );
    Ok(())
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut service = build_service(&config)?;
    let adopter_ids: Vec<AdopterId> = args.adopter_ids.into_iter().map(AdopterId).collect();

    println!("Adoption matching simulation");
    let report = service.simulate(&adopter_ids)?;
    render_simulation(&report);
    println!(
        "\nSimulation complete. Sessions saved to {}",
        config.data.session_store.display()
    );
    Ok(())
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;

    if let Some(adopter_id) = args.adopter_id {
        let adopter_id = AdopterId(adopter_id);
        let history = service.adopter_history(&adopter_id);
        println!("Match history for adopter {adopter_id}");
        render_history(&history);
    }

    render_statistics(&service.match_statistics());
    Ok(())
}

pub(crate) fn run_guidance(args: GuidanceArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;
    let animal_id = AnimalId(args.animal_id);

    if let Some(behavior) = args.behavior {
        match service.training_tips(&animal_id, &behavior) {
            Some(tips) => println!("{tips}"),
            None => println!("Animal {animal_id} not found"),
        }
        return Ok(());
    }

    let Some(adopter_id) = args.adopter_id else {
        println!("--adopter-id is required for post-adoption guidance");
        return Ok(());
    };
    match service.guidance_for(&animal_id, &AdopterId(adopter_id), args.concern.as_deref()) {
        Some(guidance) => println!("{}", guidance.text),
        None => println!("Animal or adopter not found"),
    }
    Ok(())
}

fn render_ranked_matches(matches: &[RankedMatch], with_reasoning: bool) {
    for (rank, ranked) in matches.iter().enumerate() {
        println!(
            "  {}. {} - Score: {}/100",
            rank + 1,
            ranked.animal_name,
            ranked.score
        );
        if with_reasoning {
            for line in ranked.reasoning.lines() {
                println!("     {line}");
            }
        }
    }
}

fn render_detailed_match(detail: &DetailedMatch) {
    println!(
        "Detailed analysis: {} ({}) \u{2194} {} ({})",
        detail.animal_name, detail.animal_id, detail.adopter_name, detail.adopter_id
    );
    println!("- Score: {}/100", detail.score);
    println!("- Recommendation: {}", detail.recommendation);
    println!("- Estimated size: {}", detail.estimated_size.label());
    for line in detail.reasoning.lines() {
        println!("  {line}");
    }
}

fn render_inquiry(outcome: &InquiryOutcome) {
    println!("Adoption inquiry for adopter {}", outcome.adopter_id);
    println!("- Session {}", outcome.session_id);
    match &outcome.adopter_profile {
        Some(profile) => println!("- Profile: {}", profile.summary),
        None => println!("- Profile: adopter not on file"),
    }

    println!("- {} potential matches", outcome.matches_found);
    for (rank, ranked) in outcome.matches.iter().enumerate() {
        println!(
            "  {}. {} \u{2192} {} (Score: {}/100)",
            rank + 1,
            ranked.adopter_name,
            ranked.animal_name,
            ranked.score
        );
    }

    if let Some(guidance) = &outcome.guidance {
        println!("\n{}", guidance.text);
    }
    println!("{}", outcome.session.summary());
}

fn render_simulation(report: &SimulationReport) {
    for outcome in &report.inquiries {
        println!();
        render_inquiry(outcome);
    }
    println!("Process summary");
    print!("{}", report.summary());
}

fn render_history(history: &[HistoryEntry]) {
    if history.is_empty() {
        println!("  (no recorded matches)");
        return;
    }
    for entry in history {
        println!(
            "  - {} {} ({}) score {}/100",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.animal_name,
            entry.animal_id,
            entry.score
        );
    }
}

fn render_statistics(stats: &MatchStatistics) {
    println!("Match statistics");
    println!("- Total matches: {}", stats.total_matches);
    if let Some(average) = stats.average_score {
        println!("- Average score: {average:.1}");
    }
    println!("- High matches (>= 80): {}", stats.high_matches);
    println!("- Adopters served: {}", stats.total_adopters);
}
