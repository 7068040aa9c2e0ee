use crate::tui::{TuiActor, TuiMsg};
use aso_actors::actor::Addr;
use aso_actors::system::ShutdownHandle;
use std::time::Duration;
use tokio::time;

/// Pump terminal input and a render tick into the TUI mailbox until shutdown.
pub fn spawn_tui_feeders(tui: Addr<TuiActor>, shutdown: ShutdownHandle) {
    let tui_in = tui.clone();
    let mut shutdown_input = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_input.recv() => break,
                ev = tokio::task::spawn_blocking(crossterm::event::read) => {
                    match ev {
                        Ok(Ok(e)) => {
                            if tui_in.send(TuiMsg::InputEvent(e)).await.is_err() {
                                break;
                            }
                        }
                        Ok(Err(e)) => {
                            let _ = tui_in.send(TuiMsg::OpError(format!("input: {e}"))).await;
                        }
                        Err(_) => break,
                    }
                }
            }
        }
    });

    let tui_tick = tui;
    let mut shutdown_tick = shutdown.subscribe();
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_millis(80));
        loop {
            tokio::select! {
                _ = shutdown_tick.recv() => break,
                _ = interval.tick() => {
                    if tui_tick.is_closed() {
                        break;
                    }
                    let _ = tui_tick.try_send(TuiMsg::Tick);
                }
            }
        }
    });
}
