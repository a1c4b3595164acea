//! Synopsis rendering
//!
//! Fixed-template prose for each domain. Rendering only assembles strings
//! from report fields: averages print with two decimals, indices print
//! 1-based, and counted items print as `name (N times)`.

use crate::errors::{Result, SummaryError};
use crate::types::{Counted, DomainReport, PlanReport, TravelReport};

const SEQUENCE_ARROW: &str = " -> ";

fn counted_list(items: &[Counted<String>]) -> String {
    items
        .iter()
        .map(|(item, count)| format!("{item} ({count} times)"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keep the first occurrence of each name, up to `limit` entries
fn unique_counted(items: &[Counted<String>], limit: usize) -> Vec<Counted<String>> {
    let mut unique: Vec<Counted<String>> = Vec::with_capacity(limit);
    for (item, count) in items {
        match unique.iter_mut().find(|(seen, _)| seen == item) {
            Some(existing) if existing.1 < *count => existing.1 = *count,
            Some(_) => {}
            None => unique.push((item.clone(), *count)),
        }
    }
    unique.truncate(limit);
    unique
}

fn render_plan(report: &PlanReport) -> Result<String> {
    let (sequence, _) = report
        .most_common_action_sequence
        .as_ref()
        .ok_or(SummaryError::MissingStatistic("most_common_action_sequence"))?;

    Ok(format!(
        "Analysis of {} plans reveals an average of {:.2} steps per plan, \
         with most common actions - {} and most involved objects - {}. \
         The plan with the least number of steps is Plan: {}. \
         The most common action sequence is: {}.",
        report.total_items,
        report.avg_steps,
        counted_list(&unique_counted(&report.most_common_items, 2)),
        counted_list(&report.most_common_secondary),
        report.shortest_index + 1,
        sequence.join(SEQUENCE_ARROW),
    ))
}

fn render_recipe(report: &PlanReport) -> String {
    let ingredients: Vec<Counted<String>> = report
        .most_common_items
        .iter()
        .map(|(item, count)| (item.trim().to_string(), *count))
        .collect();

    format!(
        "Analysis of {} recipes reveals an average of {:.2} steps per recipe, \
         with must-have ingredients - {}, and key actions - {}. \
         The recipe with the least number of steps is Recipe: {}.",
        report.total_items,
        report.avg_steps,
        counted_list(&ingredients),
        counted_list(&report.most_common_secondary),
        report.shortest_index + 1,
    )
}

fn render_route(report: &TravelReport) -> String {
    format!(
        "Analysis of {} travel routes reveals an average of {:.2} steps per route. \
         Among these routes, the must-take roads are {}. \
         The route with the least number of steps is Route: {}.",
        report.total_items,
        report.avg_steps,
        counted_list(&report.most_common_roads),
        report.shortest_index + 1,
    )
}

/// Render the synopsis paragraph for a domain report
///
/// The report variant selects the template. The text view is a diagnostic
/// sample and never appears in the synopsis.
pub fn render(report: &DomainReport) -> Result<String> {
    match report {
        DomainReport::Plan(plan) => render_plan(plan),
        DomainReport::Recipe(recipe) => Ok(render_recipe(recipe)),
        DomainReport::Route(route) => Ok(render_route(route)),
    }
}
