fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    let right = rect.x.saturating_add(rect.width);
    let bottom = rect.y.saturating_add(rect.height);
    x >= rect.x && x < right && y >= rect.y && y < bottom
}

/// Maps a mouse row to a data-row index inside a bordered table (one
/// border row plus one header row above the data).
fn table_row_index_at(area: Rect, mouse_row: u16) -> Option<usize> {
    if area.height <= 3 {
        return None;
    }
    let first_data_row = area.y.saturating_add(2);
    let last_data_row = area.y + area.height - 1;
    if mouse_row >= first_data_row && mouse_row < last_data_row {
        Some((mouse_row - first_data_row) as usize)
    } else {
        None
    }
}

fn status_style(status: UrlStatus) -> Style {
    match status {
        UrlStatus::Queued => Style::default().fg(Color::Yellow),
        UrlStatus::Running => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        UrlStatus::Done => Style::default().fg(Color::Green),
        UrlStatus::Stopped => Style::default().fg(Color::Gray),
        UrlStatus::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn http_status_style(code: u16) -> Style {
    match code {
        0 => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        200..=299 => Style::default().fg(Color::Green),
        300..=399 => Style::default().fg(Color::Yellow),
        400..=499 => Style::default().fg(Color::Red),
        500..=599 => Style::default().fg(Color::Magenta),
        _ => Style::default().fg(Color::Gray),
    }
}

fn truncate_for_log(input: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (taken, ch) in input.chars().enumerate() {
        if taken >= max_chars {
            out.push('…');
            return out;
        }
        out.push(ch);
    }
    out
}

/// The service sends RFC 3339 timestamps; render them compactly and fall
/// back to the raw value if the format ever changes.
fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| truncate_for_log(raw, 16))
}

#[cfg(test)]
mod ui_utils_tests {
    use super::*;

    #[test]
    fn timestamp_formats_rfc3339_and_tolerates_garbage() {
        assert_eq!(
            format_timestamp("2026-08-01T10:04:30Z"),
            "2026-08-01 10:04"
        );
        assert_eq!(
            format_timestamp("2026-08-01T12:04:30+02:00"),
            "2026-08-01 10:04"
        );
        assert_eq!(format_timestamp("not a date"), "not a date");
    }

    #[test]
    fn log_truncation_marks_cut_output() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("0123456789abc", 10), "0123456789…");
    }

    #[test]
    fn table_row_index_skips_border_and_header() {
        let area = Rect::new(0, 4, 80, 10);
        assert_eq!(table_row_index_at(area, 5), None);
        assert_eq!(table_row_index_at(area, 6), Some(0));
        assert_eq!(table_row_index_at(area, 12), Some(6));
        assert_eq!(table_row_index_at(area, 13), None);
    }
}
