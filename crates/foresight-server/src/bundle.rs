//! Canned artifact bundle builder.
//!
//! Synthesizes the fixed output bundle from a generation request, with the
//! question, horizon, location, perspective, and seed bias interpolated
//! into templated text. No inference happens here.

use foresight_core::bundle::{
    ArtifactBundle, Cone, ConeName, Confidence, Driver, GenerateInput, Inflection, Milestone,
    MoveTag, Moves, QuickTake, Rating, SeedBias, SignalRef, SignalsDrivers, Timeline,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn quick_bullets(input: &GenerateInput) -> Vec<String> {
    let framers = match input.seed_bias {
        Some(SeedBias::Exploratory) => "fast adopters",
        _ => "incumbents",
    };
    vec![
        format!("Watch how {} frame this topic.", framers),
        "Track 6+ signals; retire stale ones monthly.".to_string(),
        format!(
            "Map upside/downside cones across {} months.",
            input.horizon_months()
        ),
        "Surface 2-3 no-regret moves now.".to_string(),
        "Note critical uncertainties and pre-mortems.".to_string(),
        "Calibrate confidence with explicit assumptions.".to_string(),
    ]
}

/// Build the canned bundle for a validated generation request.
pub fn build_bundle(input: &GenerateInput) -> ArtifactBundle {
    let question = input.question.as_str();
    let horizon = input.horizon_months();
    let location = input.location_or_default();
    let perspective = input.perspective_label();

    ArtifactBundle {
        quick_take: QuickTake {
            one_line: format!(
                "{} \u{2014} implications over the next {} months",
                question, horizon
            ),
            bullets: quick_bullets(input),
            confidence: Confidence::Med,
            assumptions: vec![
                "Data availability remains stable".to_string(),
                format!("{} macro conditions hold for 12 months", location),
            ],
        },
        cones: vec![
            Cone {
                name: ConeName::Upside,
                vignette: format!(
                    "If enablers align, {} accelerates and {} benefits compound.",
                    question, perspective
                ),
                drivers: strings(&[
                    "Capital flows into enablers",
                    "Policy tailwinds emerge",
                    "User adoption compounds quickly",
                ]),
                uncertainties: strings(&["Regulatory shifts", "Talent pipeline quality"]),
                early_signals: strings(&["Pilot programs scaling beyond phase 1"]),
            },
            Cone {
                name: ConeName::Downside,
                vignette: format!(
                    "Adoption stalls; stakeholders resist change; {} drifts without ownership.",
                    question
                ),
                drivers: strings(&[
                    "Budget freezes",
                    "Visible failures create caution",
                    "Complex integrations",
                ]),
                uncertainties: strings(&["Supply chain volatility", "Trust erosion"]),
                early_signals: strings(&["Project cancellations in peers"]),
            },
        ],
        signals_drivers: SignalsDrivers {
            signals: vec![
                signal("New entrant gains traction", "Scrappy competitor tests the space"),
                signal("Policy draft surfaces", "Regulators hint at guardrails"),
                signal("Vendor consolidations", "M&A spikes as market heats"),
                signal("Community-led standards", "Grassroots patterns emerge"),
                signal("Hiring patterns shift", "Job postings reveal priorities"),
                signal("Infra pricing trends", "Unit costs drop meaningfully"),
            ],
            drivers: vec![
                driver("Capital intensity", "Determines viable pace"),
                driver("Ecosystem readiness", "Dependency risk governs speed"),
                driver("Talent depth", "Execution hinges on skills"),
                driver("Customer urgency", "Pull signals accelerate adoption"),
            ],
        },
        timeline: Timeline {
            milestones: vec![
                milestone("6 mo", "Pilot validated", "Scope next tranche"),
                milestone("12 mo", "Scaled to early adopters", "Harden reliability"),
                milestone("24 mo", "Category norms emerge", "Defend position"),
            ],
            inflections: Some(vec![Inflection {
                when: "18 mo".to_string(),
                what: "Key uncertainty resolves".to_string(),
            }]),
        },
        moves: Moves {
            no_regrets: strings(&[
                "Stand up light-weight governance",
                "Track leading indicators monthly",
                "Fund quick experiments with clear exit criteria",
            ]),
            options: strings(&[
                "Place small bets with partners",
                "Create observability dashboard for signals",
            ]),
            watch_outs: strings(&["Narrative over-promising"]),
            tags: Some(vec![
                MoveTag {
                    effort: Some(Rating::M),
                    impact: Some(Rating::H),
                },
                MoveTag {
                    effort: Some(Rating::L),
                    impact: Some(Rating::M),
                },
            ]),
        },
    }
}

fn signal(title: &str, summary: &str) -> SignalRef {
    SignalRef {
        title: title.to_string(),
        summary: summary.to_string(),
        source_url: None,
    }
}

fn driver(name: &str, why: &str) -> Driver {
    Driver {
        name: name.to_string(),
        why: why.to_string(),
    }
}

fn milestone(when: &str, what: &str, so_what: &str) -> Milestone {
    Milestone {
        when: when.to_string(),
        what: what.to_string(),
        so_what: so_what.to_string(),
    }
}
