pub async fn run() -> io::Result<()> {
    let cli = Cli::parse();
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("missing bearer token: pass --token or set {TOKEN_ENV_VAR}"),
            )
        })?;
    let client = ApiClient::new(
        &cli.base_url,
        &token,
        Duration::from_millis(cli.request_timeout_ms.max(1000)),
    )
    .map_err(io::Error::other)?;
    let poll_interval = Duration::from_millis(cli.poll_interval_ms.max(250));

    let configured_format: DataFormat = cli.format.into();
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_export_path(configured_format));
    let export_requested = cli.output.is_some();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RegistryEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ApiCommand>();
    let worker = tokio::spawn(run_worker(client, poll_interval, event_tx, cmd_rx));

    let result = if cli.no_tui {
        run_headless(
            cli.follow,
            export_requested.then_some((output_path.as_str(), configured_format)),
            cmd_tx,
            &mut event_rx,
        )
    } else {
        run_tui(
            &cli.base_url,
            (output_path.as_str(), configured_format),
            cmd_tx,
            &mut event_rx,
        )
    };

    if let Err(e) = worker.await {
        eprintln!("worker task join error: {e}");
    }

    result
}

fn print_registry_row(url: &TrackedUrl) {
    let (internal, external, broken) = url.link_counts();
    println!(
        "{:>5}  {:<8} {:>8} {:>8} {:>7}  {}",
        url.id,
        url.status.label(),
        internal,
        external,
        broken,
        url.address
    );
}

///// Headless mode: print the registry snapshot and exit, or with `follow`
/// keep polling and print status transitions until nothing is running.
fn run_headless(
    follow: bool,
    export_target: Option<(&str, DataFormat)>,
    cmd_tx: UnboundedSender<ApiCommand>,
    rx: &mut UnboundedReceiver<RegistryEvent>,
) -> io::Result<()> {
    let mut state = RegistryState::default();
    let mut previous = HashMap::<u64, UrlStatus>::new();
    let mut printed_initial = false;

    loop {
        while let Ok(event) = rx.try_recv() {
            match &event {
                RegistryEvent::Status(message) => eprintln!("{message}"),
                RegistryEvent::Error(err) => eprintln!("{err}"),
                _ => {}
            }
            state.apply_event(event);
        }

        // The worker only polls while something is running, so a failed
        // first load would otherwise leave headless mode waiting forever.
        if !state.loaded
            && state
                .errors
                .iter()
                .any(|err| err.starts_with("list urls"))
        {
            let _ = cmd_tx.send(ApiCommand::Shutdown);
            return Err(io::Error::other("initial registry load failed"));
        }

        if state.loaded && !printed_initial {
            println!(
                "{:>5}  {:<8} {:>8} {:>8} {:>7}  address",
                "id", "status", "internal", "external", "broken"
            );
            for url in state.sorted_urls(UrlSortMode::Newest, SortDirection::Desc) {
                print_registry_row(url);
                previous.insert(url.id, url.status);
            }
            printed_initial = true;
        } else if printed_initial && follow {
            for url in &state.urls {
                match previous.get(&url.id) {
                    Some(old) if *old != url.status => {
                        eprintln!(
                            "url {} ({}) {} -> {}",
                            url.id,
                            url.address,
                            old.label(),
                            url.status.label()
                        );
                    }
                    _ => {}
                }
            }
            previous = state
                .urls
                .iter()
                .map(|url| (url.id, url.status))
                .collect();
        }

        if printed_initial && (!follow || !state.polling_active()) {
            break;
        }
        std::thread::sleep(Duration::from_millis(120));
    }

    if let Some((path, format)) = export_target {
        export_snapshot(path, format, &state.urls)?;
        eprintln!("exported {} rows to {path}", state.urls.len());
    }

    let _ = cmd_tx.send(ApiCommand::Shutdown);
    Ok(())
}

fn run_tui(
    base_url: &str,
    export_target: (&str, DataFormat),
    cmd_tx: UnboundedSender<ApiCommand>,
    rx: &mut UnboundedReceiver<RegistryEvent>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let tui_result = draw_loop(&mut terminal, base_url, export_target, cmd_tx, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tui_result
}
