//! Dashboard stat cards

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    /// Movement over the period, e.g. `+3 users`
    pub change: String,
    /// Period the change covers, e.g. `this month`
    pub description: String,
}

impl StatCard {
    pub fn new(
        title: impl Into<String>,
        value: impl ToString,
        change: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
            change: change.into(),
            description: description.into(),
        }
    }

    fn lines(&self) -> [String; 3] {
        [
            self.title.clone(),
            self.value.clone(),
            format!("{} {}", self.change, self.description),
        ]
    }
}

/// `count` followed by the singular or plural noun
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Cards side by side, each boxed
pub fn render_cards(cards: &[StatCard]) -> String {
    if cards.is_empty() {
        return String::new();
    }

    let contents: Vec<[String; 3]> = cards.iter().map(StatCard::lines).collect();
    let widths: Vec<usize> = contents
        .iter()
        .map(|lines| lines.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();

    let border = widths
        .iter()
        .map(|w| format!("+{}+", "-".repeat(w + 2)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = vec![border.clone()];
    for i in 0..3 {
        out.push(
            contents
                .iter()
                .zip(&widths)
                .map(|(lines, w)| format!("| {:<width$} |", lines[i], width = *w))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    out.push(border);
    out.join("\n")
}
