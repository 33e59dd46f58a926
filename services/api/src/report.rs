use loan_advisor::evaluation::{MemoryTargets, MessageLine, Tone};

/// Plain-text rendering of the display regions for terminal output.
pub(crate) fn format_regions(targets: &MemoryTargets) -> String {
    let mut lines = Vec::new();

    lines.push("Risikoflagg".to_string());
    if let Some(heading) = &targets.risk_flags.heading {
        lines.push(heading.clone());
    }
    lines.extend(targets.risk_flags.lines.iter().map(format_line));

    lines.push(String::new());
    lines.push("Løsningsforslag".to_string());
    lines.extend(targets.suggestions.iter().map(format_line));

    if !targets.bank_cards.is_empty() {
        lines.push(String::new());
        lines.push("Banksjanser".to_string());
        for card in &targets.bank_cards {
            let highlight = if card.high_chance { " (høy sjanse)" } else { "" };
            lines.push(format!("- {}: {}%{}", card.bank_name, card.chance, highlight));
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn format_line(line: &MessageLine) -> String {
    match line.tone {
        Tone::Error => format!("! {}", line.text),
        Tone::Info => line.text.clone(),
        Tone::Neutral | Tone::Item => format!("- {}", line.text),
    }
}
