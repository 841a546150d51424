use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domino_api::Team;
use log::error;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        quit();
    }

    if guard.state.show_intro {
        match key_event.code {
            KeyCode::Enter => guard.dismiss_intro(),
            Char('q') => quit(),
            _ => {}
        }
        return;
    }

    // Text entry swallows every key until confirmed or cancelled.
    if guard.state.prompt.is_some() {
        match key_event.code {
            KeyCode::Enter => guard.submit_prompt(),
            KeyCode::Esc => guard.cancel_prompt(),
            KeyCode::Backspace => guard.prompt_backspace(),
            Char(c) => guard.prompt_push(c),
            _ => {}
        }
        return;
    }

    if guard.state.confirm_reset {
        match key_event.code {
            Char('y') | Char('Y') => guard.confirm_reset(),
            Char('n') | KeyCode::Esc => guard.cancel_reset(),
            _ => {}
        }
        return;
    }

    // The win overlay only offers a new game.
    if guard.winner().is_some() {
        match key_event.code {
            KeyCode::Enter | Char('r') => guard.start_new_game(),
            Char('q') => quit(),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code) {
        (_, Char('q')) => quit(),

        // Tab switching
        (_, Char('1')) => guard.update_tab(MenuItem::Board),
        (_, Char('2')) => guard.update_tab(MenuItem::Analysis),
        (_, Char('?')) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc) => guard.exit_help(),

        // Scoring
        (_, Char('a')) => guard.open_points_prompt(Team::A),
        (_, Char('b')) => guard.open_points_prompt(Team::B),
        (_, Char('e')) => guard.open_rename_prompt(Team::A),
        (_, Char('E')) => guard.open_rename_prompt(Team::B),
        (_, Char('t')) => guard.open_target_prompt(),
        (_, Char('p')) => guard.cycle_preset_target(),
        (_, Char('R')) => guard.request_reset(),

        // History
        (MenuItem::Board, Char('j') | KeyCode::Down) => guard.history_down(),
        (MenuItem::Board, Char('k') | KeyCode::Up) => guard.history_up(),
        (MenuItem::Board, Char('x') | KeyCode::Delete) => guard.delete_selected_round(),

        // Analysis
        (_, Char('g')) => {
            if let Some((ticket, snapshot)) = guard.request_analysis() {
                drop(guard);
                if let Err(e) = network_requests
                    .send(NetworkRequest::Analyze { ticket, snapshot })
                    .await
                {
                    error!("Failed to queue analysis request: {e}");
                    app.lock()
                        .await
                        .on_analysis_finished(ticket, Err("analysis worker stopped".into()));
                }
                return;
            }
        }

        // Global
        (_, Char('f')) => guard.toggle_full_screen(),
        (_, Char('"')) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use crate::state::session::Action;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn board_app() -> Arc<Mutex<App>> {
        let mut app = App::with_settings(AppSettings::default());
        app.dismiss_intro();
        Arc::new(Mutex::new(app))
    }

    async fn press_all(app: &Arc<Mutex<App>>, tx: &mpsc::Sender<NetworkRequest>, keys: &str) {
        for c in keys.chars() {
            handle_key_bindings(key(Char(c)), app, tx).await;
        }
    }

    #[tokio::test]
    async fn points_are_entered_through_the_prompt() {
        let app = board_app();
        let (tx, _rx) = mpsc::channel(4);
        press_all(&app, &tx, "a42").await;
        handle_key_bindings(key(KeyCode::Enter), &app, &tx).await;

        let guard = app.lock().await;
        assert!(guard.state.prompt.is_none());
        assert_eq!(guard.state.game.totals().a, 42);
    }

    #[tokio::test]
    async fn win_overlay_only_answers_new_game_keys() {
        let app = board_app();
        let (tx, mut rx) = mpsc::channel(4);
        app.lock()
            .await
            .dispatch(Action::AddRound { team: Team::A, points: 250 });

        press_all(&app, &tx, "abxgRtpeE12?f\"jky").await;
        for code in [KeyCode::Delete, KeyCode::Down, KeyCode::Esc, KeyCode::Backspace] {
            handle_key_bindings(key(code), &app, &tx).await;
        }
        {
            let guard = app.lock().await;
            assert_eq!(guard.state.game.rounds.len(), 1);
            assert_eq!(guard.state.game.winning_score, 200);
            assert!(guard.state.prompt.is_none());
            assert!(!guard.state.confirm_reset);
            assert!(!guard.settings.full_screen);
            assert!(!guard.state.show_logs);
            assert_eq!(guard.state.active_tab, MenuItem::Board);
        }
        assert!(rx.try_recv().is_err());

        handle_key_bindings(key(Char('r')), &app, &tx).await;
        assert!(app.lock().await.state.game.rounds.is_empty());
    }

    #[tokio::test]
    async fn enter_also_starts_a_new_game_after_a_win() {
        let app = board_app();
        let (tx, _rx) = mpsc::channel(4);
        app.lock()
            .await
            .dispatch(Action::AddRound { team: Team::B, points: 200 });
        handle_key_bindings(key(KeyCode::Enter), &app, &tx).await;
        assert_eq!(app.lock().await.winner(), None);
    }

    #[tokio::test]
    async fn analysis_key_queues_a_snapshot() {
        let app = board_app();
        let (tx, mut rx) = mpsc::channel(4);
        press_all(&app, &tx, "b7").await;
        handle_key_bindings(key(KeyCode::Enter), &app, &tx).await;
        press_all(&app, &tx, "g").await;

        match rx.try_recv() {
            Ok(NetworkRequest::Analyze { snapshot, .. }) => {
                assert_eq!(snapshot.totals().b, 7);
            }
            Err(e) => panic!("expected an analysis request, got {e:?}"),
        }
        assert!(app.lock().await.state.analysis.is_pending());
    }

    #[tokio::test]
    async fn analysis_fails_cleanly_when_the_worker_is_gone() {
        let app = board_app();
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        press_all(&app, &tx, "a5").await;
        handle_key_bindings(key(KeyCode::Enter), &app, &tx).await;
        press_all(&app, &tx, "g").await;

        let guard = app.lock().await;
        assert!(!guard.state.analysis.is_pending());
        assert_eq!(
            guard.state.analysis.last_failure.as_deref(),
            Some("analysis worker stopped")
        );
    }

    #[tokio::test]
    async fn reset_waits_for_confirmation() {
        let app = board_app();
        let (tx, _rx) = mpsc::channel(4);
        press_all(&app, &tx, "a5").await;
        handle_key_bindings(key(KeyCode::Enter), &app, &tx).await;

        press_all(&app, &tx, "Rn").await;
        assert_eq!(app.lock().await.state.game.rounds.len(), 1);
        press_all(&app, &tx, "Ry").await;
        assert!(app.lock().await.state.game.rounds.is_empty());
    }
}
