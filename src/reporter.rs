use crate::engine::format_card;
use crate::types::{CardView, Event, Panel, TrackerPass};

/// Emit one tracker render pass as a single JSON line to stdout.
pub fn report_pass(cards: Vec<CardView>) {
    let pass = TrackerPass {
        timestamp: chrono::Utc::now().to_rfc3339(),
        cards,
    };
    if let Ok(json) = serde_json::to_string(&pass) {
        println!("{json}");
    }
}

/// Print a panel's current text to stdout, framed by its name.
pub fn report_panel(panel: Panel, text: &str) {
    println!("--- {panel} ---");
    println!("{text}");
}

/// Print the game listing, one game per line.
pub fn report_events(events: &[Event]) {
    for event in events {
        println!("{}\t{}\t({})", event.id, event.name, event.teams.join(", "));
    }
}

/// Print one name per line.
pub fn report_names(names: &[String]) {
    for name in names {
        println!("{name}");
    }
}

/// Print one render pass as plain text, cards separated by blank lines.
pub fn report_pass_text(cards: &[CardView]) {
    let rendered: Vec<String> = cards.iter().map(format_card).collect();
    println!("{}\n", rendered.join("\n\n"));
}
