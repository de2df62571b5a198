//! Plain-text rendering of the wizard views for the terminal.

use std::fmt::Write;

use crate::forms::booking::AVAILABLE_SLOTS;
use crate::forms::documents::CATALOGUE;
use crate::forms::msa::{MARKET_COLUMNS, pricing_schedule};
use crate::forms::DocumentLibrary;
use crate::onboarding::manager::View;
use crate::onboarding::selector::TrackCard;
use crate::onboarding::step::{OnboardingStep, StatusTone, StepId};
use crate::onboarding::tracker::TrackView;

pub fn render_view(view: &View) -> String {
    match view {
        View::Gate => render_gate(),
        View::Selector { cards } => render_selector(cards),
        View::Track(track) => match track.current {
            Some(step) => render_step(track, step),
            None => render_track(track),
        },
    }
}

pub fn render_gate() -> String {
    "RiskCherry Client Onboarding\n\
     Enter your access token to continue:  token <code>"
        .to_string()
}

pub fn render_selector(cards: &[TrackCard]) -> String {
    let mut out = String::from("Choose an onboarding section\n");
    for card in cards {
        let _ = writeln!(
            out,
            "  [{}] {} - {}",
            card.badge,
            card.track.title(),
            card.track.summary()
        );
        if !card.unlocked {
            let _ = writeln!(out, "      Complete Legal & Commercial Onboarding first");
        }
    }
    out.push_str("enter <legal|lab>");
    out
}

pub fn render_track(view: &TrackView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.track.title());
    let _ = writeln!(
        out,
        "Progress: {}/{} ({}%)",
        view.progress.completed,
        view.progress.total,
        view.progress.rounded_percent()
    );
    for (i, step) in view.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step_line(step));
    }
    let _ = writeln!(out, "{}", view.progress.message(view.track));
    let _ = write!(out, "Need help? Contact {}", view.track.contact());
    out
}

pub fn render_step(view: &TrackView, id: StepId) -> String {
    let mut out = String::new();
    let position = view.steps.iter().position(|s| s.id == id);
    if let Some(idx) = position {
        let step = &view.steps[idx];
        let _ = writeln!(
            out,
            "Step {} of {}: {} [{}]",
            idx + 1,
            view.steps.len(),
            step.title,
            step.status.label()
        );
        let _ = writeln!(out, "{}", step.description);
    }
    out.push_str(&step_details(id));
    let _ = write!(out, "\n{}\nback | submit <json>", form_hint(id));
    out
}

/// Catalogue with download markers for the documents step.
pub fn render_documents(library: &DocumentLibrary) -> String {
    let mut out = String::new();
    for doc in CATALOGUE {
        let mark = if library.is_downloaded(doc.id) { "x" } else { " " };
        let required = if doc.required { " (required)" } else { "" };
        let _ = writeln!(out, "  [{mark}] {} - {}{required}", doc.id, doc.title);
    }
    let (done, total) = library.required_progress();
    let _ = write!(out, "Required documents: {done}/{total}");
    out
}

fn step_line(step: &OnboardingStep) -> String {
    let marker = match step.status.tone() {
        StatusTone::Accent => "*",
        StatusTone::Primary => ">",
        StatusTone::Muted => " ",
    };
    format!(
        "{marker} {} ({}) [{}]",
        step.title,
        step.id,
        step.status.label()
    )
}

fn step_details(id: StepId) -> String {
    match id {
        StepId::MasterServiceAgreement => {
            let mut out = format!("  {:<16}", "Service");
            for column in MARKET_COLUMNS {
                let _ = write!(out, "{column:<12}");
            }
            out.push('\n');
            for row in pricing_schedule() {
                let _ = write!(out, "  {:<16}", row.service);
                for price in &row.prices {
                    let _ = write!(out, "{price:<12}");
                }
                out.push('\n');
            }
            out
        }
        StepId::BookDemo => format!("  Slots (GMT, weekdays): {}\n", AVAILABLE_SLOTS.join(" ")),
        StepId::Documents => "  download <doc-id> to mark a document as reviewed\n".to_string(),
        _ => String::new(),
    }
}

/// Fields accepted by `submit` for each step.
pub fn form_hint(id: StepId) -> &'static str {
    match id {
        StepId::MutualNda => {
            "fields: entity_name, registration_number, registration_country, registered_address, \
             signatory_name, signatory_title, signatory_email, nda_reviewed, nda_accepted"
        }
        StepId::PricingQuestions => {
            "fields: expected_volume, business_model (b2b|b2c|b2b2c|other), \
             integration_timeline (immediate|short|medium|long), budget_range, \
             compliance_needs, specific_requirements"
        }
        StepId::MasterServiceAgreement => "fields: msa_reviewed, msa_accepted, pricing_accepted",
        StepId::Documents => "fields: downloaded (list of document ids); submit with no body uses your downloads",
        StepId::PortalAdmin => "fields: full_name, email, ip_addresses (up to 5), additional_notes",
        StepId::BookDemo => "fields: date (YYYY-MM-DD), time (HH:MM)",
    }
}
