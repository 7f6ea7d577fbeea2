const ROW_JUMP_STEP: usize = 10;
const BROKEN_LINK_ROWS: usize = 40;

#[derive(Debug, Clone)]
struct UrlForm {
    /// `None` adds a new URL, `Some(id)` edits an existing one.
    target: Option<u64>,
    buffer: String,
}

fn draw_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    base_url: &str,
    export_target: (&str, DataFormat),
    cmd_tx: UnboundedSender<ApiCommand>,
    rx: &mut UnboundedReceiver<RegistryEvent>,
) -> io::Result<()> {
    let (export_path, export_format) = export_target;
    let mut state = RegistryState::default();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(120);
    let mut sort_mode = UrlSortMode::Newest;
    let mut sort_direction = SortDirection::Desc;
    let mut selected_idx = 0usize;
    let mut table_state = TableState::default();
    let mut row_view_ids: Vec<u64> = Vec::new();
    let mut table_area: Option<Rect> = None;
    let mut details_view: Option<u64> = None;
    let mut form: Option<UrlForm> = None;
    let mut confirm_delete: Option<u64> = None;
    let mut help_mode = false;
    let mut last_row_click: Option<(usize, Instant)> = None;

    loop {
        while let Ok(event) = rx.try_recv() {
            state.apply_event(event);
        }

        terminal.draw(|f| {
            table_area = None;
            row_view_ids.clear();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(10),
                    Constraint::Length(5),
                ])
                .split(f.area());

            render_header(f, chunks[0], &state, base_url);

            if let Some(viewed_id) = details_view {
                render_details(f, chunks[1], &state, viewed_id);
            } else {
                let rows = state.sorted_urls(sort_mode, sort_direction);
                row_view_ids = rows.iter().map(|url| url.id).collect();
                if rows.is_empty() {
                    selected_idx = 0;
                    table_state.select(None);
                } else {
                    selected_idx = selected_idx.min(rows.len() - 1);
                    table_state.select(Some(selected_idx));
                }
                table_area = Some(chunks[1]);
                render_dashboard(f, chunks[1], &state, &rows, &mut table_state);
            }

            render_footer(
                f,
                chunks[2],
                &state,
                details_view.is_some(),
                sort_mode,
                sort_direction,
            );

            if help_mode {
                render_help(f);
            } else if let Some(form) = form.as_ref() {
                render_url_form(f, form);
            } else if let Some(id) = confirm_delete {
                render_delete_confirm(f, &state, id);
            }
        })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if help_mode {
                        match key.code {
                            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => {
                                help_mode = false;
                            }
                            _ => {}
                        }
                    } else if let Some(active_form) = form.as_mut() {
                        match key.code {
                            KeyCode::Esc => form = None,
                            KeyCode::Enter => {
                                match validate_address(&active_form.buffer) {
                                    Ok(address) => {
                                        let cmd = match active_form.target {
                                            None => ApiCommand::Create(address),
                                            Some(id) => ApiCommand::Update { id, address },
                                        };
                                        if cmd_tx.send(cmd).is_err() {
                                            state.push_error(
                                                "worker channel is closed".to_string(),
                                            );
                                        }
                                        form = None;
                                    }
                                    Err(err) => state.push_error(err),
                                }
                            }
                            KeyCode::Backspace => {
                                active_form.buffer.pop();
                            }
                            KeyCode::Char('u')
                                if key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                active_form.buffer.clear();
                            }
                            KeyCode::Char(ch) => {
                                if !key
                                    .modifiers
                                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                                {
                                    active_form.buffer.push(ch);
                                }
                            }
                            _ => {}
                        }
                    } else if let Some(id) = confirm_delete {
                        match key.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                                if cmd_tx.send(ApiCommand::Delete(id)).is_err() {
                                    state.push_error("worker channel is closed".to_string());
                                }
                                if details_view == Some(id) {
                                    details_view = None;
                                }
                                confirm_delete = None;
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                confirm_delete = None;
                            }
                            _ => {}
                        }
                    } else {
                        let selected_url = selected_url(&state, &row_view_ids, &table_state)
                            .or_else(|| {
                                details_view
                                    .and_then(|id| state.urls.iter().find(|url| url.id == id))
                            })
                            .cloned();
                        match key.code {
                            KeyCode::Char('q') => {
                                let _ = cmd_tx.send(ApiCommand::Shutdown);
                                break;
                            }
                            KeyCode::Esc => details_view = None,
                            KeyCode::Char('?') => help_mode = true,
                            KeyCode::Char('a') => {
                                form = Some(UrlForm {
                                    target: None,
                                    buffer: String::new(),
                                });
                            }
                            KeyCode::Char('e') => {
                                if let Some(url) = selected_url.as_ref() {
                                    form = Some(UrlForm {
                                        target: Some(url.id),
                                        buffer: url.address.clone(),
                                    });
                                }
                            }
                            KeyCode::Char('d') => {
                                if let Some(url) = selected_url.as_ref() {
                                    confirm_delete = Some(url.id);
                                }
                            }
                            KeyCode::Char('s') => {
                                if let Some(url) = selected_url.as_ref() {
                                    if url.status.can_start() {
                                        if cmd_tx.send(ApiCommand::Start(url.id)).is_err() {
                                            state.push_error(
                                                "worker channel is closed".to_string(),
                                            );
                                        }
                                    } else {
                                        state.push_status(format!(
                                            "url {} is already running",
                                            url.id
                                        ));
                                    }
                                }
                            }
                            KeyCode::Char('x') => {
                                if let Some(url) = selected_url.as_ref() {
                                    if url.status.can_stop() {
                                        if cmd_tx.send(ApiCommand::Stop(url.id)).is_err() {
                                            state.push_error(
                                                "worker channel is closed".to_string(),
                                            );
                                        }
                                    } else {
                                        state.push_status(format!(
                                            "url {} is not running",
                                            url.id
                                        ));
                                    }
                                }
                            }
                            KeyCode::Enter => {
                                if details_view.is_none()
                                    && let Some(url) = selected_url.as_ref()
                                {
                                    state.details = None;
                                    details_view = Some(url.id);
                                    if cmd_tx.send(ApiCommand::FetchDetails(url.id)).is_err() {
                                        state.push_error("worker channel is closed".to_string());
                                    }
                                }
                            }
                            KeyCode::Char('l') => {
                                let cmd = match details_view {
                                    Some(id) => ApiCommand::FetchDetails(id),
                                    None => ApiCommand::Reload,
                                };
                                if cmd_tx.send(cmd).is_err() {
                                    state.push_error("worker channel is closed".to_string());
                                }
                            }
                            KeyCode::Char('o') => {
                                match export_snapshot(export_path, export_format, &state.urls) {
                                    Ok(()) => state.push_status(format!(
                                        "exported {} rows to {export_path}",
                                        state.urls.len()
                                    )),
                                    Err(err) => {
                                        state.push_error(format!("export failed: {err}"))
                                    }
                                }
                            }
                            KeyCode::Char('r') => sort_mode = sort_mode.cycle(),
                            KeyCode::Char('R') => sort_direction = sort_direction.toggle(),
                            KeyCode::Up | KeyCode::Char('k') => {
                                selected_idx = selected_idx.saturating_sub(1);
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                selected_idx = selected_idx.saturating_add(1);
                            }
                            KeyCode::PageUp => {
                                selected_idx = selected_idx.saturating_sub(ROW_JUMP_STEP);
                            }
                            KeyCode::PageDown => {
                                selected_idx = selected_idx.saturating_add(ROW_JUMP_STEP);
                            }
                            KeyCode::Home | KeyCode::Char('g') => selected_idx = 0,
                            KeyCode::End | KeyCode::Char('G') => {
                                selected_idx = row_view_ids.len().saturating_sub(1);
                            }
                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if help_mode || form.is_some() || confirm_delete.is_some() {
                        continue;
                    }
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                        && let Some(area) = table_area
                        && let Some(row_idx) = table_row_index_at(area, mouse.row)
                        && row_idx < row_view_ids.len()
                        && point_in_rect(mouse.column, mouse.row, area)
                    {
                        selected_idx = row_idx;
                        table_state.select(Some(selected_idx));
                        let now = Instant::now();
                        let double_click = last_row_click
                            .map(|(prev_idx, prev_time)| {
                                prev_idx == row_idx
                                    && now.duration_since(prev_time)
                                        <= Duration::from_millis(450)
                            })
                            .unwrap_or(false);
                        if double_click {
                            let id = row_view_ids[row_idx];
                            state.details = None;
                            details_view = Some(id);
                            if cmd_tx.send(ApiCommand::FetchDetails(id)).is_err() {
                                state.push_error("worker channel is closed".to_string());
                            }
                        }
                        last_row_click = Some((row_idx, now));
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn selected_url<'a>(
    state: &'a RegistryState,
    row_view_ids: &[u64],
    table_state: &TableState,
) -> Option<&'a TrackedUrl> {
    let idx = table_state.selected()?;
    let id = row_view_ids.get(idx)?;
    state.urls.iter().find(|url| url.id == *id)
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &RegistryState, base_url: &str) {
    let metric_label = Style::default().fg(Color::Gray);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut count_spans = vec![
        Span::styled("Tracked ", metric_label),
        Span::styled(
            state.urls.len().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    for (status, count) in state.status_counts() {
        count_spans.push(Span::styled("  |  ", sep_style));
        count_spans.push(Span::styled(format!("{} ", status.label()), metric_label));
        count_spans.push(Span::styled(count.to_string(), status_style(status)));
    }

    let polling_span = if state.polling_active() {
        Span::styled(
            "LIVE",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("idle", Style::default().fg(Color::DarkGray))
    };
    let header_lines = vec![
        Line::from(count_spans),
        Line::from(vec![
            Span::styled("Polling ", metric_label),
            polling_span,
            Span::styled("  |  ", sep_style),
            Span::styled("Service ", metric_label),
            Span::styled(base_url.to_string(), Style::default().fg(Color::White)),
        ]),
    ];

    let header = Paragraph::new(header_lines)
        .block(
            Block::default()
                .title("crawldeck - Web Crawler Dashboard (press q to quit)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if state.polling_active() {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(header, area);
}

fn render_dashboard(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &RegistryState,
    rows: &[&TrackedUrl],
    table_state: &mut TableState,
) {
    if rows.is_empty() {
        let message = if state.loaded {
            "No URLs tracked yet. Press 'a' to add one."
        } else {
            "Loading URLs..."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("URLs (0)").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let table_rows = rows.iter().map(|url| {
        let (internal, external, broken) = url.link_counts();
        let broken_style = if broken > 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(url.id.to_string()),
            Cell::from(url.status.label()).style(status_style(url.status)),
            Cell::from(internal.to_string()),
            Cell::from(external.to_string()),
            Cell::from(broken.to_string()).style(broken_style),
            Cell::from(format_timestamp(&url.updated_at)),
            Cell::from(url.address.clone()),
        ])
    });
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(17),
            Constraint::Min(24),
        ],
    )
    .header(
        Row::new(vec![
            "ID", "Status", "Internal", "External", "Broken", "Updated", "URL",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .title(format!("URLs ({})", rows.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .column_spacing(1);
    f.render_stateful_widget(table, area, table_state);
}

fn render_details(f: &mut ratatui::Frame, area: Rect, state: &RegistryState, viewed_id: u64) {
    let block = Block::default()
        .title(format!("URL Details (id {viewed_id}) - esc to go back"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(url) = state.details.as_ref().filter(|url| url.id == viewed_id) else {
        let loading = Paragraph::new("Loading details...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(loading, area);
        return;
    };

    let mut info_lines = vec![
        Line::from(vec![
            Span::styled("Address: ", Style::default().fg(Color::Gray)),
            Span::styled(
                url.address.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(url.status.label(), status_style(url.status)),
            Span::styled("   Created: ", Style::default().fg(Color::Gray)),
            Span::raw(format_timestamp(&url.created_at)),
            Span::styled("   Updated: ", Style::default().fg(Color::Gray)),
            Span::raw(format_timestamp(&url.updated_at)),
        ]),
        Line::from(format!("Analysis runs: {}", url.results.len())),
    ];

    let Some(result) = url.latest_result() else {
        info_lines.push(Line::from(""));
        info_lines.push(Line::from(Span::styled(
            "No analysis result available.",
            Style::default().fg(Color::Yellow),
        )));
        let info = Paragraph::new(info_lines)
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(info, area);
        return;
    };

    info_lines.push(Line::from(format!(
        "HTML version: {}   Title: {}",
        if result.html_version.is_empty() {
            "n/a"
        } else {
            result.html_version.as_str()
        },
        if result.title.is_empty() {
            "n/a"
        } else {
            result.title.as_str()
        },
    )));
    info_lines.push(Line::from(vec![
        Span::styled("Login form: ", Style::default().fg(Color::Gray)),
        if result.login_form {
            Span::styled(
                "detected",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("not found", Style::default().fg(Color::DarkGray))
        },
    ]));
    info_lines.push(Line::from(if result.has_headings() {
        format!(
            "Headings: {}",
            HEADING_TAGS
                .iter()
                .map(|tag| format!("{tag}:{}", result.heading_count(tag)))
                .collect::<Vec<_>>()
                .join("  ")
        )
    } else {
        "Headings: none found on this page".to_string()
    }));
    info_lines.push(Line::from(format!(
        "Links: internal {}  external {}  broken {}",
        result.internal_links, result.external_links, result.broken_links
    )));
    info_lines.push(Line::from(format!(
        "Analyzed at: {}",
        format_timestamp(&result.created_at)
    )));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let info = Paragraph::new(info_lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(info, chunks[0]);

    if result.has_links() {
        let [(_, internal), (_, external)] = link_chart_data(result);
        let reachable = internal + external;
        let ratio = if reachable == 0 {
            0.0
        } else {
            internal as f64 / reachable as f64
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Link Distribution (internal share)")
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("internal {internal} / external {external}"));
        f.render_widget(gauge, chunks[1]);
    } else {
        let none = Paragraph::new("No links found on this page")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title("Link Distribution")
                    .borders(Borders::ALL),
            );
        f.render_widget(none, chunks[1]);
    }

    let broken_links = result.broken().collect::<Vec<_>>();
    if broken_links.is_empty() {
        let none = Paragraph::new("No broken links found")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(format!("Broken Links ({})", result.broken_links))
                    .borders(Borders::ALL),
            );
        f.render_widget(none, chunks[2]);
        return;
    }

    let shown = broken_links.len().min(BROKEN_LINK_ROWS);
    let broken_rows = broken_links.iter().take(BROKEN_LINK_ROWS).map(|link| {
        Row::new(vec![
            Cell::from(link.status.to_string()).style(http_status_style(link.status)),
            Cell::from(if link.internal { "internal" } else { "external" }),
            Cell::from(link.url.clone()),
        ])
    });
    let title = if broken_links.len() > shown {
        format!("Broken Links ({} of {})", shown, broken_links.len())
    } else {
        format!("Broken Links ({})", broken_links.len())
    };
    let broken_table = Table::new(
        broken_rows,
        [
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Min(24),
        ],
    )
    .header(
        Row::new(vec!["Status", "Scope", "URL"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .column_spacing(1);
    f.render_widget(broken_table, chunks[2]);
}

fn render_footer(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &RegistryState,
    details_open: bool,
    sort_mode: UrlSortMode,
    sort_direction: SortDirection,
) {
    let error_count = state.errors.len();
    let (last_event_label, last_event, last_event_style) = if let Some(err) = state.errors.front()
    {
        (
            "LAST ERROR",
            truncate_for_log(err, 170),
            Style::default().fg(Color::LightRed),
        )
    } else if let Some(message) = state.status_messages.front() {
        (
            "LAST STATUS",
            truncate_for_log(message, 170),
            Style::default().fg(Color::Cyan),
        )
    } else {
        (
            "LAST STATUS",
            "none".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let state_label = if !state.loaded {
        "LOADING"
    } else if state.polling_active() {
        "LIVE"
    } else {
        "IDLE"
    };
    let state_style = if error_count > 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if state.polling_active() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };

    let hotkey = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::Gray);
    let footer_lines = vec![
        Line::from(vec![
            Span::styled("STATE ", Style::default().fg(Color::DarkGray)),
            Span::styled(state_label, state_style),
            Span::styled("   VIEW ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                if details_open { "details" } else { "dashboard" },
                Style::default().fg(Color::LightCyan),
            ),
            Span::styled("   SORT ", Style::default().fg(Color::DarkGray)),
            Span::styled(sort_mode.title(), Style::default().fg(Color::LightCyan)),
            Span::styled("   DIR ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                sort_direction.label(),
                Style::default().fg(Color::LightCyan),
            ),
            Span::styled("   ERRORS ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                error_count.to_string(),
                Style::default().fg(if error_count > 0 {
                    Color::Red
                } else {
                    Color::Green
                }),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{last_event_label} "),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(last_event, last_event_style),
        ]),
        Line::from(vec![
            Span::styled("q", hotkey),
            Span::styled(" quit  ", hint),
            Span::styled("a", hotkey),
            Span::styled(" add  ", hint),
            Span::styled("e", hotkey),
            Span::styled(" edit  ", hint),
            Span::styled("d", hotkey),
            Span::styled(" delete  ", hint),
            Span::styled("s", hotkey),
            Span::styled(" start  ", hint),
            Span::styled("x", hotkey),
            Span::styled(" stop  ", hint),
            Span::styled("enter", hotkey),
            Span::styled(" details  ", hint),
            Span::styled("esc", hotkey),
            Span::styled(" back  ", hint),
            Span::styled("l", hotkey),
            Span::styled(" reload  ", hint),
            Span::styled("o", hotkey),
            Span::styled(" export  ", hint),
            Span::styled("r/R", hotkey),
            Span::styled(" sort  ", hint),
            Span::styled("?", hotkey),
            Span::styled(" help", hint),
        ]),
    ];

    let footer = Paragraph::new(footer_lines)
        .block(
            Block::default()
                .title("Command & Health Bar")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if error_count > 0 {
                    Color::Red
                } else {
                    Color::DarkGray
                })),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}

fn render_help(f: &mut ratatui::Frame) {
    let area = centered_rect(64, 60, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
        area,
    );
    let help_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Min(3),
        ])
        .split(area);
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Navigation"),
            Line::from("  up/down or j/k: move selection"),
            Line::from("  pgup/pgdn: jump by 10 rows"),
            Line::from("  g/G or home/end: first/last row"),
            Line::from("  enter or double-click: open details"),
            Line::from("  esc: back to dashboard"),
        ])
        .block(Block::default().borders(Borders::ALL).title("Keys"))
        .wrap(Wrap { trim: true }),
        help_chunks[0],
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Operations"),
            Line::from("  a: add URL, e: edit selected URL"),
            Line::from("  d: delete selected URL (asks to confirm)"),
            Line::from("  s: start analysis, x: stop analysis"),
            Line::from("  l: reload now, o: export snapshot"),
            Line::from("  r: cycle sort mode, R: toggle direction"),
            Line::from(""),
            Line::from("The table refreshes every few seconds while any URL is running."),
        ])
        .block(Block::default().borders(Borders::ALL).title("Actions"))
        .wrap(Wrap { trim: true }),
        help_chunks[1],
    );
    f.render_widget(
        Paragraph::new("Press ? or Esc to close.")
            .block(Block::default().borders(Borders::ALL).title("Close"))
            .wrap(Wrap { trim: true }),
        help_chunks[2],
    );
}

fn render_url_form(f: &mut ratatui::Frame, form: &UrlForm) {
    let area = centered_rect(70, 30, f.area());
    f.render_widget(Clear, area);
    let title = match form.target {
        None => "Add URL".to_string(),
        Some(id) => format!("Edit URL (id {id})"),
    };
    f.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
        area,
    );
    let prompt_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    f.render_widget(
        Paragraph::new(format!(
            "Address: {}",
            if form.buffer.is_empty() {
                "<empty>"
            } else {
                &form.buffer
            }
        ))
        .block(Block::default().borders(Borders::ALL).title("Input"))
        .wrap(Wrap { trim: true }),
        prompt_chunks[0],
    );
    f.render_widget(
        Paragraph::new(
            "Must be an absolute http(s) URL. Enter to submit, Esc to cancel, Ctrl+u to clear.",
        )
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true }),
        prompt_chunks[1],
    );
}

fn render_delete_confirm(f: &mut ratatui::Frame, state: &RegistryState, id: u64) {
    let area = centered_rect(56, 24, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .title("Delete URL")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
        area,
    );
    let address = state
        .urls
        .iter()
        .find(|url| url.id == id)
        .map(|url| url.address.clone())
        .unwrap_or_else(|| format!("id {id}"));
    let prompt_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);
    f.render_widget(
        Paragraph::new(format!(
            "Delete {address} and all of its analysis results?"
        ))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true }),
        prompt_chunks[0],
    );
    f.render_widget(
        Paragraph::new("y/Enter to delete, n/Esc to cancel.")
            .block(Block::default().borders(Borders::NONE))
            .wrap(Wrap { trim: true }),
        prompt_chunks[1],
    );
}
