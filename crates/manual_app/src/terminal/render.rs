use manual_core::{AppViewModel, VideoRowView};

/// Renders the whole view as terminal text.
pub fn render(view: &AppViewModel) -> String {
    let mut lines = vec![status_line(view)];
    if let Some(error) = &view.last_error {
        lines.push(format!("error: {error}"));
    }
    lines.extend(
        view.rows
            .iter()
            .enumerate()
            .map(|(index, row)| format_row(index + 1, row)),
    );
    lines.join("\n")
}

fn status_line(view: &AppViewModel) -> String {
    if view.search_in_flight {
        return format!("Searching {:?}...", view.keyword_input.trim());
    }
    if view.searched_keyword.is_empty() {
        return "No search yet. Type `search <keyword>`.".to_string();
    }

    let mut status = format!(
        "Keyword: {} | {} videos | selected {}/{}",
        view.searched_keyword,
        view.rows.len(),
        view.selected_count,
        view.rows.len()
    );
    if view.all_selected {
        status.push_str(" (all)");
    }
    if let Some(stats) = &view.last_search {
        if stats.filtered_out > 0 {
            status.push_str(&format!(" | {} filtered out", stats.filtered_out));
        }
    }
    status
}

fn format_row(position: usize, row: &VideoRowView) -> String {
    let mark = if row.selected { "[x]" } else { "[ ]" };
    format!(
        "{mark} {position:>2}. {title} | {views} views | {duration} | {id}",
        title = row.title,
        views = format_with_commas(row.view_metric),
        duration = row.duration_text,
        id = row.id
    )
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
