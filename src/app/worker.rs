fn send_status(tx: &UnboundedSender<RegistryEvent>, message: impl Into<String>) {
    let _ = tx.send(RegistryEvent::Status(message.into()));
}

fn send_error(tx: &UnboundedSender<RegistryEvent>, message: impl Into<String>) {
    let _ = tx.send(RegistryEvent::Error(message.into()));
}

/// Reload the registry and report whether any entry is running. `None`
/// when the reload itself failed; the previous snapshot (and with it the
/// previous poll arming) stays in effect.
async fn reload_registry(
    client: &ApiClient,
    tx: &UnboundedSender<RegistryEvent>,
) -> Option<bool> {
    match client.list_urls().await {
        Ok(urls) => {
            let running = any_running(&urls);
            let _ = tx.send(RegistryEvent::Registry(urls));
            Some(running)
        }
        Err(err) => {
            send_error(tx, err);
            None
        }
    }
}

/// The worker owns the transport client and is the only writer of
/// registry snapshots. Commands arrive over `rx`; while any entry is
/// running it also reloads on a fixed period. Reloads are awaited inline
/// in the loop, so at most one is ever in flight.
async fn run_worker(
    client: ApiClient,
    poll_interval: Duration,
    tx: UnboundedSender<RegistryEvent>,
    mut rx: UnboundedReceiver<ApiCommand>,
) {
    match client.health().await {
        Ok(()) => send_status(
            &tx,
            format!("analysis service reachable at {}", client.base_url),
        ),
        Err(err) => send_error(&tx, err),
    }

    let mut poll = tokio::time::interval(poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polling = reload_registry(&client, &tx).await.unwrap_or(false);
    poll.reset();

    loop {
        tokio::select! {
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                if matches!(cmd, ApiCommand::Shutdown) {
                    break;
                }
                let was_polling = polling;
                polling = handle_command(&client, &tx, cmd).await.unwrap_or(polling);
                if polling && !was_polling {
                    // Rising edge: restart the period so the next poll
                    // lands one full interval after this reload.
                    poll.reset();
                }
            }
            _ = poll.tick(), if polling => {
                if let Some(running) = reload_registry(&client, &tx).await {
                    polling = running;
                }
            }
        }
    }
}

/// Returns the new poll-arming state when the command produced a fresh
/// snapshot, `None` otherwise. Mutating commands reload only after their
/// own response has been observed, keeping per-operation causal order.
async fn handle_command(
    client: &ApiClient,
    tx: &UnboundedSender<RegistryEvent>,
    cmd: ApiCommand,
) -> Option<bool> {
    match cmd {
        ApiCommand::Reload => reload_registry(client, tx).await,
        ApiCommand::Create(address) => match client.create_url(&address).await {
            Ok(url) => {
                send_status(tx, format!("tracking {} (id {})", url.address, url.id));
                reload_registry(client, tx).await
            }
            Err(err) => {
                send_error(tx, err);
                None
            }
        },
        ApiCommand::Update { id, address } => match client.update_url(id, &address).await {
            Ok(url) => {
                send_status(tx, format!("url {id} now points at {}", url.address));
                reload_registry(client, tx).await
            }
            Err(err) => {
                send_error(tx, err);
                None
            }
        },
        ApiCommand::Delete(id) => match client.delete_url(id).await {
            Ok(()) => {
                send_status(tx, format!("deleted url {id}"));
                reload_registry(client, tx).await
            }
            Err(err) => {
                send_error(tx, err);
                None
            }
        },
        ApiCommand::Start(id) => match client.start_analysis(id).await {
            Ok(()) => {
                send_status(tx, format!("analysis started for url {id}"));
                reload_registry(client, tx).await
            }
            Err(err) => {
                send_error(tx, err);
                None
            }
        },
        ApiCommand::Stop(id) => match client.stop_analysis(id).await {
            Ok(()) => {
                send_status(tx, format!("analysis stopped for url {id}"));
                reload_registry(client, tx).await
            }
            Err(err) => {
                send_error(tx, err);
                None
            }
        },
        ApiCommand::FetchDetails(id) => {
            match client.url_details(id).await {
                Ok(url) => {
                    let _ = tx.send(RegistryEvent::Details(url));
                }
                Err(err) => send_error(tx, err),
            }
            None
        }
        // Handled by the caller before dispatch.
        ApiCommand::Shutdown => None,
    }
}
