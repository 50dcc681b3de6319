//! Controller behaviour against scripted and in-process oracles.

use std::sync::{Arc, Mutex};

use match_state::{
    MatchConfig, MatchController, MatchErrorKind, MatchState, MoveError, ObserverRegistry,
    OracleError, SelectionPhase, Side, Square,
};
use oracle::{LocalOracle, MockOracle, OracleRequest};

const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
const PROMOTION_FEN: &str = "8/4P3/8/8/8/8/k7/4K3 w - - 0 1";

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn start_payload() -> oracle::OraclePayload {
    MockOracle::payload(
        chess::STARTING_FEN,
        Side::White,
        &["e2e4", "e2e3", "g1f3", "g1h3", "b1c3"],
    )
}

/// Records every snapshot delivered to observers.
fn recording(registry: &ObserverRegistry) -> (Arc<Mutex<Vec<Arc<MatchState>>>>, match_state::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let sub = registry.subscribe(move |s: &Arc<MatchState>| sink.lock().unwrap().push(s.clone()));
    (seen, sub)
}

async fn started(mock: MockOracle) -> MatchController<MockOracle> {
    let mut controller = MatchController::new(mock, MatchConfig::default(), ObserverRegistry::new());
    controller.start().await.unwrap();
    controller
}

#[tokio::test]
async fn test_initial_state_before_start() {
    let controller = MatchController::new(
        MockOracle::new(),
        MatchConfig::default(),
        ObserverRegistry::new(),
    );
    let state = controller.state();
    assert_eq!(state.fen(), chess::STARTING_FEN);
    assert_eq!(state.turn(), Side::White);
    assert_eq!(state.phase(), SelectionPhase::Idle);
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn test_select_square_with_targets() {
    let registry = ObserverRegistry::new();
    let (seen, _sub) = recording(&registry);
    let mock = MockOracle::new().with_response(start_payload());
    let mut controller = MatchController::new(mock, MatchConfig::default(), registry);
    controller.start().await.unwrap();

    assert!(controller.select_square("e2"));

    let state = controller.state();
    assert_eq!(state.selected_square(), Some(sq("e2")));
    assert_eq!(state.legal_targets(), &[sq("e3"), sq("e4")]);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_select_square_without_targets_clears_and_notifies() {
    let registry = ObserverRegistry::new();
    let (seen, _sub) = recording(&registry);
    let mock = MockOracle::new().with_response(start_payload());
    let mut controller = MatchController::new(mock, MatchConfig::default(), registry);
    controller.start().await.unwrap();
    assert!(controller.select_square("e2"));

    assert!(!controller.select_square("a1"));

    let state = controller.state();
    assert_eq!(state.selected_square(), None);
    assert!(state.legal_targets().is_empty());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2].phase(), SelectionPhase::Idle);
}

#[tokio::test]
async fn test_reselect_does_not_remember_previous_square() {
    let mut controller = started(MockOracle::new().with_response(start_payload())).await;
    assert!(controller.select_square("e2"));
    assert!(controller.select_square("g1"));
    assert_eq!(controller.state().legal_targets(), &[sq("f3"), sq("h3")]);
}

#[tokio::test]
async fn test_promotion_defaults_to_queen() {
    let mock = MockOracle::new()
        .with_response(MockOracle::payload(
            PROMOTION_FEN,
            Side::White,
            &["e7e8n", "e7e8b", "e7e8r", "e7e8q", "e1d1"],
        ))
        .with_response(MockOracle::payload("after", Side::Black, &[]));
    let handle = mock.clone();
    let mut controller = MatchController::new(
        mock,
        MatchConfig::with_starting_fen(PROMOTION_FEN),
        ObserverRegistry::new(),
    );
    controller.start().await.unwrap();
    assert!(controller.select_square("e7"));
    assert_eq!(controller.state().legal_targets(), &[sq("e8")]);

    controller.try_move_selected_to("e8").await.unwrap();

    assert_eq!(controller.history().to_string(), "e7e8q");
    let calls = handle.calls();
    assert_eq!(calls.last().unwrap().moves_csv(), "e7e8q");
    assert_eq!(calls.last().unwrap().starting_fen, PROMOTION_FEN);
}

#[tokio::test]
async fn test_move_without_selection_skips_oracle() {
    let mock = MockOracle::new().with_response(start_payload());
    let handle = mock.clone();
    let mut controller = started(mock).await;

    let err = controller.try_move_selected_to("e4").await.unwrap_err();

    assert!(matches!(err, MoveError::NoSelection));
    assert_eq!(err.kind(), MatchErrorKind::NoSelection);
    assert_eq!(handle.call_count(), 1);
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn test_invalid_and_illegal_targets_leave_selection() {
    let mock = MockOracle::new().with_response(start_payload());
    let handle = mock.clone();
    let mut controller = started(mock).await;
    assert!(controller.select_square("e2"));
    let before = controller.state().clone();

    let err = controller.try_move_selected_to("e9").await.unwrap_err();
    assert_eq!(err.kind(), MatchErrorKind::InvalidSquare);

    let err = controller.try_move_selected_to("e5").await.unwrap_err();
    assert_eq!(err.kind(), MatchErrorKind::IllegalMove);
    assert_eq!(err.to_string(), "Illegal move: e2e5");

    assert!(Arc::ptr_eq(&before, controller.state()));
    assert_eq!(controller.state().phase(), SelectionPhase::Selected(sq("e2")));
    assert_eq!(handle.call_count(), 1);
}

#[tokio::test]
async fn test_successful_move_replaces_state_and_clears_selection() {
    let registry = ObserverRegistry::new();
    let (seen, _sub) = recording(&registry);
    let mut after = MockOracle::payload(AFTER_E4, Side::Black, &["e7e5", "g8f6"]);
    after.selected_square = Some(sq("e7"));
    let mock = MockOracle::new()
        .with_response(start_payload())
        .with_response(after);
    let mut controller = MatchController::new(mock, MatchConfig::default(), registry);
    controller.start().await.unwrap();
    assert!(controller.select_square("E2"));

    controller.try_move_selected_to(" E4").await.unwrap();

    let state = controller.state();
    assert_eq!(state.fen(), AFTER_E4);
    assert_eq!(state.turn(), Side::Black);
    assert_eq!(state.legal_moves_uci().len(), 2);
    assert_eq!(state.phase(), SelectionPhase::Idle);
    assert_eq!(controller.history().to_string(), "e2e4");

    // Every delivered snapshot is internally consistent
    for snapshot in seen.lock().unwrap().iter() {
        let moves: Vec<String> = snapshot
            .legal_moves_uci()
            .iter()
            .map(ToString::to_string)
            .collect();
        if snapshot.fen() == AFTER_E4 {
            assert_eq!(snapshot.turn(), Side::Black);
            assert_eq!(moves, vec!["e7e5", "g8f6"]);
        } else {
            assert_eq!(snapshot.turn(), Side::White);
            assert_eq!(moves.len(), 5);
        }
    }
}

#[tokio::test]
async fn test_failed_refresh_rolls_back_history() {
    let registry = ObserverRegistry::new();
    let (seen, _sub) = recording(&registry);
    let mock = MockOracle::new()
        .with_response(start_payload())
        .with_response(MockOracle::payload(AFTER_E4, Side::Black, &["e7e5"]))
        .with_error(OracleError::Exit {
            code: Some(1),
            stderr: "Illegal move at index 2: e7e5".into(),
            stdout: String::new(),
        });
    let mut controller = MatchController::new(mock, MatchConfig::default(), registry);
    controller.start().await.unwrap();
    assert!(controller.select_square("e2"));
    controller.try_move_selected_to("e4").await.unwrap();
    let history_before = controller.history().clone();
    assert!(controller.select_square("e7"));
    let state_before = controller.state().clone();
    let notified_before = seen.lock().unwrap().len();

    let err = controller.try_move_selected_to("e5").await.unwrap_err();

    assert_eq!(err.kind(), MatchErrorKind::OracleExecution);
    assert_eq!(controller.history(), &history_before);
    assert_eq!(controller.history().len(), 1);
    assert!(Arc::ptr_eq(&state_before, controller.state()));
    assert_eq!(seen.lock().unwrap().len(), notified_before);
}

#[tokio::test]
async fn test_payload_error_is_classified() {
    let mock = MockOracle::new()
        .with_response(start_payload())
        .with_error(OracleError::Payload("missing field `fen`".into()));
    let mut controller = started(mock).await;
    assert!(controller.select_square("g1"));

    let err = controller.try_move_selected_to("f3").await.unwrap_err();

    assert_eq!(err.kind(), MatchErrorKind::OraclePayload);
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn test_refresh_failure_leaves_state_untouched() {
    let mock = MockOracle::new()
        .with_response(start_payload())
        .with_error(OracleError::Rejected("down".into()));
    let mut controller = started(mock).await;
    let before = controller.state().clone();

    assert!(controller.refresh().await.is_err());
    assert!(Arc::ptr_eq(&before, controller.state()));
}

#[tokio::test]
async fn test_reset_clears_history_even_when_refresh_fails() {
    let mock = MockOracle::new()
        .with_response(start_payload())
        .with_response(MockOracle::payload(AFTER_E4, Side::Black, &["e7e5"]))
        .with_error(OracleError::Rejected("down".into()));
    let handle = mock.clone();
    let mut controller = started(mock).await;
    assert!(controller.select_square("e2"));
    controller.try_move_selected_to("e4").await.unwrap();
    assert_eq!(controller.history().len(), 1);

    assert!(controller.reset_match().await.is_err());

    assert!(controller.history().is_empty());
    assert_eq!(handle.calls().last().unwrap().moves, vec![]);
    assert_eq!(controller.state().fen(), AFTER_E4);
}

#[tokio::test]
async fn test_game_over_does_not_block_interaction() {
    let mut over = MockOracle::payload("mated", Side::Black, &[]);
    over.is_game_over = true;
    let mut controller = started(MockOracle::new().with_response(over)).await;

    assert!(controller.state().is_game_over());
    assert!(!controller.select_square("e7"));
    let err = controller.try_move_selected_to("e5").await.unwrap_err();
    assert!(matches!(err, MoveError::NoSelection));
}

#[tokio::test]
async fn test_start_failure_keeps_default_state() {
    let mut controller = MatchController::new(
        MockOracle::new(),
        MatchConfig::default(),
        ObserverRegistry::new(),
    );
    assert!(controller.start().await.is_err());
    assert_eq!(controller.state().fen(), chess::STARTING_FEN);
    assert!(controller.state().legal_moves_uci().is_empty());
}

#[tokio::test]
async fn test_local_oracle_game_and_replay_consistency() {
    let mut controller =
        MatchController::new(LocalOracle::new(), MatchConfig::default(), ObserverRegistry::new());
    controller.start().await.unwrap();
    assert_eq!(controller.state().legal_moves_uci().len(), 20);

    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4"), ("g8", "f6")] {
        assert!(controller.select_square(from), "select {from}");
        controller.try_move_selected_to(to).await.unwrap();
    }
    // Castling is offered as a king two-square move
    assert!(controller.select_square("e1"));
    assert!(controller.state().legal_targets().contains(&sq("g1")));
    controller.try_move_selected_to("g1").await.unwrap();

    assert_eq!(controller.history().to_string(), "e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,e1g1");
    assert_eq!(controller.state().turn(), Side::Black);

    let replayed = LocalOracle::new()
        .evaluate_now(&OracleRequest::new(
            chess::STARTING_FEN,
            controller.history().as_slice().to_vec(),
        ))
        .unwrap();
    assert_eq!(replayed.fen, controller.state().fen());
    assert_eq!(replayed.legal_moves_uci, controller.state().legal_moves_uci());
}

#[tokio::test]
async fn test_local_oracle_fools_mate_ends_game() {
    let mut controller =
        MatchController::new(LocalOracle::new(), MatchConfig::default(), ObserverRegistry::new());
    controller.start().await.unwrap();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        assert!(controller.select_square(from));
        controller.try_move_selected_to(to).await.unwrap();
    }

    let state = controller.state();
    assert!(state.is_game_over());
    assert_eq!(state.status_text(), "Checkmate | Black wins");
    assert!(state.legal_moves_uci().is_empty());
    assert!(!controller.select_square("e1"));
}
