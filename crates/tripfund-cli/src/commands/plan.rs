//! Plan and estimate command implementations

use std::path::Path;

use anyhow::Result;
use tripfund_core::{
    format_booking_date, BookingStatus, MonthlySavingsSource, TripInputs, TripPlan, TripPlanner,
};

use super::{format_money, load_planner, load_trip, parse_reference_date};

/// Load config and trip file, then compute the plan
pub fn build_plan(
    config_path: Option<&Path>,
    trip_path: &Path,
    date: Option<&str>,
) -> Result<(TripInputs, TripPlan)> {
    let planner = load_planner(config_path)?;
    let trip = load_trip(trip_path)?;
    let reference_date = parse_reference_date(date)?;

    let plan = planner.plan(&trip, reference_date);
    Ok((trip, plan))
}

pub fn cmd_plan(
    config_path: Option<&Path>,
    trip_path: &Path,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let (trip, plan) = build_plan(config_path, trip_path, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    print_plan(&trip, &plan);
    Ok(())
}

fn print_plan(trip: &TripInputs, plan: &TripPlan) {
    let summary = &plan.summary;
    let projection = &plan.projection;

    println!();
    println!("✈️  {}", plan.name);
    if !trip.destinations.is_empty() {
        println!("   {}", trip.destinations.join(" → "));
    }
    println!(
        "   {} traveler(s), {} days, {}",
        trip.travelers,
        trip.duration_days,
        trip.season.as_str()
    );
    println!("   As of {}", projection.reference_date.format("%Y-%m-%d"));
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Saved {} of {} ({:.0}%)",
        format_money(summary.total_funded),
        format_money(summary.total_cost),
        summary.progress_percent
    );
    if plan.points_applied > 0.0 {
        println!(
            "   🎟️  Points cover {} of flights",
            format_money(plan.points_applied)
        );
    }

    let source = match plan.monthly_savings_source {
        MonthlySavingsSource::User => "your plan",
        MonthlySavingsSource::Recommended => "recommended",
    };
    println!(
        "   Saving {}/month ({}, {} month target)",
        format_money(plan.monthly_savings),
        source,
        plan.recommendation.target_months
    );
    println!();

    println!(
        "   {:<16} {:>9} {:>9} {:>9}  {:<10} {}",
        "Category", "Cost", "Funded", "Gap", "Status", "Book on"
    );
    for (allocation, entry) in plan.allocation.categories.iter().zip(&projection.categories) {
        let status = plan.booking_status(allocation.category);
        let icon = match status {
            BookingStatus::Booked => "✅",
            BookingStatus::Ready => "🟢",
            BookingStatus::Saving => "⏳",
            BookingStatus::Blocked => "⛔",
        };
        println!(
            "   {:<16} {:>9} {:>9} {:>9}  {} {:<7} {}",
            allocation.category.label(),
            format_money(allocation.cost),
            format_money(allocation.funded),
            format_money(allocation.gap),
            icon,
            status.as_str(),
            format_booking_date(entry.sequential.earliest_booking_date)
        );
    }
    println!();

    if summary.is_debt_free {
        println!("   🎉 Fully funded. Book everything now.");
    } else {
        println!(
            "   Fully funded in {} ({})",
            projection.months_to_full_funding(),
            format_booking_date(projection.full_funding.earliest_booking_date)
        );
        if let Some(next) = summary.next_to_book {
            println!("   👉 Next to book: {}", next.label());
        }
    }
    println!();
}

pub fn cmd_estimate(config_path: Option<&Path>, trip_path: &Path, json: bool) -> Result<()> {
    let planner = load_planner(config_path)?;
    let trip = load_trip(trip_path)?;

    if json {
        let costs = planner.estimator().estimate_all(&trip);
        let output = serde_json::json!({
            "costs": costs,
            "total": costs.total(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_estimate(&planner, &trip);
    Ok(())
}

fn print_estimate(planner: &TripPlanner, trip: &TripInputs) {
    let estimator = planner.estimator();
    let costs = estimator.estimate_all(trip);

    println!();
    println!("💵 Cost estimate: {}", trip.name);
    println!("   ─────────────────────────────────────────────────────────────");
    for (category, amount) in costs.iter() {
        let source = if trip.override_for(category).is_some() {
            "yours"
        } else {
            "estimated"
        };
        println!(
            "   {:<16} {:>9}  ({})",
            category.label(),
            format_money(amount),
            source
        );
    }
    println!("   {:<16} {:>9}", "Total", format_money(costs.total()));
    println!();
}

