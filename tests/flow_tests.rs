use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_code::flow::save_manual_code;
use secret_code::request::{format_manual_code, level_selection, parse_card_ids, parse_manual_code};
use secret_code::{
    load_demo_store, start_round, Card, CardId, CardStore, Game, GameError, GameId, MemoryStore,
    LevelPolicy, PlayMode, PlayRequest, SessionState,
};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn store_with(correct: u32, incorrect: u32) -> MemoryStore {
    let mut cards: Vec<Card> = (1..=correct).map(|i| Card::correct(i, format!("c{i}"))).collect();
    cards.extend((100..100 + incorrect).map(|i| Card::incorrect(i, format!("x{i}"))));
    let mut store = MemoryStore::new();
    store.insert(Game::new(1, "Teste"), cards);
    store
}

#[test]
fn test_parse_request() {
    let request = PlayRequest::parse("7", "manual", "3").unwrap();
    assert_eq!(request.game_id, GameId(7));
    assert_eq!(request.mode, PlayMode::Manual);
    assert_eq!(request.level.max_attempts, 6);

    assert!(matches!(PlayRequest::parse("abc", "random", "1"), Err(GameError::InvalidRequest(_))));
    assert!(matches!(PlayRequest::parse("1", "chaos", "1"), Err(GameError::InvalidRequest(_))));
    assert!(matches!(PlayRequest::parse("1", "random", "x"), Err(GameError::InvalidRequest(_))));
    assert_eq!(PlayRequest::parse("1", "random", "9"), Err(GameError::InvalidLevel(9)));
}

#[test]
fn test_parse_manual_code() {
    let ids = parse_manual_code("3, 5,7 ,9").unwrap();
    assert_eq!(ids, vec![CardId(3), CardId(5), CardId(7), CardId(9)]);
    assert_eq!(format_manual_code(&ids), "3,5,7,9");

    assert!(matches!(parse_manual_code(""), Err(GameError::InvalidManualCode(_))));
    assert!(matches!(parse_manual_code("1,,2"), Err(GameError::InvalidManualCode(_))));
    assert!(matches!(parse_manual_code("1,b"), Err(GameError::InvalidManualCode(_))));
}

#[test]
fn test_random_round_from_store() {
    let store = store_with(9, 3);
    let request = PlayRequest::new(GameId(1), PlayMode::Random, 3).unwrap();
    let session = start_round(&store, &request, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(session.state(), SessionState::InProgress);
    assert_eq!(session.length(), 4);
    assert_eq!(session.attempts_remaining(), 6);
    assert_eq!(session.available().len(), 11);
    assert_eq!(session.available().iter().filter(|c| !c.is_correct()).count(), 2);
}

#[test]
fn test_round_refused_below_minimums() {
    let store = store_with(8, 3);
    let request = PlayRequest::new(GameId(1), PlayMode::Random, 1).unwrap();
    let result = start_round(&store, &request, &mut StdRng::seed_from_u64(5));
    assert!(matches!(result, Err(GameError::NotEnoughCards { correct: 8, incorrect: 3 })));
}

#[test]
fn test_failed_load_starts_nothing() {
    let store = store_with(9, 3);
    let request = PlayRequest::new(GameId(42), PlayMode::Random, 1).unwrap();
    let result = start_round(&store, &request, &mut StdRng::seed_from_u64(5));
    assert!(matches!(result, Err(GameError::Store(_))));
}

#[test]
fn test_code_length_from_game() {
    let mut store = store_with(9, 3);
    let mut game = store.get_game(GameId(1)).unwrap();
    game.secret_code_length = Some(6);
    let cards = store.list_cards(GameId(1)).unwrap();
    store.insert(game.clone(), cards.clone());

    let request = PlayRequest::new(GameId(1), PlayMode::Random, 1).unwrap();
    let session = start_round(&store, &request, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(session.length(), 6);

    game.secret_code_length = Some(10);
    store.insert(game, cards);
    let result = start_round(&store, &request, &mut StdRng::seed_from_u64(2));
    assert_eq!(result.err(), Some(GameError::InsufficientCards { needed: 10, available: 9 }));
}

#[test]
fn test_manual_round_uses_saved_code() {
    let mut store = store_with(9, 3);
    let code = vec![CardId(4), CardId(8), CardId(1), CardId(6)];
    save_manual_code(&mut store, GameId(1), &code).unwrap();
    assert_eq!(store.get_game(GameId(1)).unwrap().manual_code_ids, Some(code.clone()));

    let request = PlayRequest::new(GameId(1), PlayMode::Manual, 2).unwrap();
    let mut session = start_round(&store, &request, &mut StdRng::seed_from_u64(8)).unwrap();
    for (slot, id) in code.iter().enumerate() {
        session.place_card(slot, *id).unwrap();
    }
    let outcome = session.submit_guess().unwrap();
    assert_eq!(outcome.state, SessionState::Won);
}

#[test]
fn test_manual_round_without_code() {
    let store = store_with(9, 3);
    let request = PlayRequest::new(GameId(1), PlayMode::Manual, 1).unwrap();
    let result = start_round(&store, &request, &mut StdRng::seed_from_u64(8));
    assert!(matches!(result, Err(GameError::InvalidManualCode(_))));
}

#[test]
fn test_manual_code_invalidated_by_deleted_card() {
    let mut store = store_with(9, 3);
    save_manual_code(&mut store, GameId(1), &[CardId(1), CardId(2), CardId(3), CardId(4)]).unwrap();

    let game = store.get_game(GameId(1)).unwrap();
    let cards: Vec<Card> = store
        .list_cards(GameId(1))
        .unwrap()
        .into_iter()
        .filter(|c| c.id != CardId(3))
        .chain(std::iter::once(Card::correct(50, "nova")))
        .collect();
    store.insert(game, cards);

    let request = PlayRequest::new(GameId(1), PlayMode::Manual, 1).unwrap();
    let result = start_round(&store, &request, &mut StdRng::seed_from_u64(8));
    assert!(matches!(result, Err(GameError::InvalidManualCode(_))));
}

#[test]
fn test_save_manual_code_validates() {
    let mut store = store_with(9, 3);
    let result = save_manual_code(&mut store, GameId(1), &[CardId(1), CardId(100), CardId(2), CardId(3)]);
    assert!(matches!(result, Err(GameError::InvalidManualCode(_))));
    assert_eq!(store.get_game(GameId(1)).unwrap().manual_code_ids, None);
}

#[test]
fn test_demo_store_is_playable() {
    let store = load_demo_store().unwrap();
    assert_eq!(store.games().count(), 2);

    for level in 1..=4 {
        let request = PlayRequest::new(GameId(1), PlayMode::Random, level).unwrap();
        assert!(start_round(&store, &request, &mut StdRng::seed_from_u64(level as u64)).is_ok());
    }
    let manual = PlayRequest::new(GameId(2), PlayMode::Manual, 4).unwrap();
    assert!(start_round(&store, &manual, &mut StdRng::seed_from_u64(0)).is_ok());
}

#[test]
fn test_store_json_round_trip() {
    let mut store = store_with(9, 3);
    save_manual_code(&mut store, GameId(1), &[CardId(1), CardId(2), CardId(3), CardId(4)]).unwrap();
    let json = store.to_json().unwrap();
    let reloaded = MemoryStore::from_json(&json).unwrap();
    assert_eq!(reloaded.get_game(GameId(1)).unwrap(), store.get_game(GameId(1)).unwrap());
    assert_eq!(reloaded.list_cards(GameId(1)).unwrap().len(), 12);

    assert!(matches!(MemoryStore::from_json("{not json"), Err(GameError::Store(_))));
}

const DECK_WITH_REPEATED_IDS: &str = r#"{
  "games": [
    {
      "id": 1,
      "title": "Repetidas",
      "cards": [
        { "id": 1, "text": "a", "type": "correct" },
        { "id": 2, "text": "b", "type": "correct" },
        { "id": 3, "text": "c", "type": "correct" },
        { "id": 4, "text": "d", "type": "correct" },
        { "id": 5, "text": "e", "type": "correct" },
        { "id": 6, "text": "f", "type": "correct" },
        { "id": 7, "text": "g", "type": "correct" },
        { "id": 1, "text": "h", "type": "correct" },
        { "id": 2, "text": "i", "type": "correct" },
        { "id": 10, "text": "x", "type": "incorrect" },
        { "id": 11, "text": "y", "type": "incorrect" },
        { "id": 12, "text": "z", "type": "incorrect" }
      ]
    }
  ]
}"#;

#[test]
fn test_deck_with_repeated_card_ids_is_rejected() {
    match MemoryStore::from_json(DECK_WITH_REPEATED_IDS) {
        Err(GameError::Store(detail)) => assert!(detail.contains("card id 1"), "{detail}"),
        other => panic!("expected a store error, got {other:?}"),
    }
}

#[test]
fn test_round_refused_for_repeated_card_ids() {
    let mut store = store_with(9, 3);
    let game = store.get_game(GameId(1)).unwrap();
    let mut cards = store.list_cards(GameId(1)).unwrap();
    cards.push(Card::correct(2, "de novo"));
    store.insert(game, cards);

    let request = PlayRequest::new(GameId(1), PlayMode::Random, 1).unwrap();
    let result = start_round(&store, &request, &mut StdRng::seed_from_u64(5));
    assert_eq!(result.err(), Some(GameError::DuplicateCard(CardId(2))));

    let saved = save_manual_code(&mut store, GameId(1), &[CardId(1), CardId(2), CardId(3), CardId(4)]);
    assert_eq!(saved, Err(GameError::DuplicateCard(CardId(2))));
}

#[test]
fn test_out_of_range_level_is_logged_and_sends_back_to_selection() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        PlayRequest::parse("1", "random", "7")
    });
    let err = result.unwrap_err();
    assert_eq!(err, GameError::InvalidLevel(7));

    let output = logs.text();
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("level=7"), "{output}");
    assert!(output.contains("level selection"), "{output}");

    assert_eq!(level_selection(&err), Some(LevelPolicy::all()));
}

#[test]
fn test_recoverable_errors_stay_on_screen() {
    let err = PlayRequest::parse("1", "random", "x").unwrap_err();
    assert_eq!(level_selection(&err), None);
    assert_eq!(level_selection(&GameError::SessionFinished), None);
}

#[test]
fn test_parse_card_ids_is_not_a_manual_code_error() {
    assert_eq!(parse_card_ids(" 4,2 ,9").unwrap(), vec![CardId(4), CardId(2), CardId(9)]);

    match parse_card_ids("4,b") {
        Err(GameError::InvalidRequest(detail)) => assert!(detail.contains("`b`"), "{detail}"),
        other => panic!("expected an invalid request, got {other:?}"),
    }
    assert!(matches!(parse_card_ids(""), Err(GameError::InvalidRequest(_))));
    assert!(matches!(parse_manual_code("4,b"), Err(GameError::InvalidManualCode(_))));
}

#[test]
fn test_player_messages_are_portuguese() {
    assert_eq!(
        GameError::InvalidLevel(7).player_message(),
        "Nível 7 não existe. Escolha um nível de 1 a 4."
    );
    assert_eq!(
        GameError::SessionAlreadyStarted.player_message(),
        "A rodada já está em andamento."
    );
    assert_eq!(
        GameError::DuplicateCard(CardId(3)).player_message(),
        "A carta 3 aparece mais de uma vez no jogo."
    );
    let not_enough = GameError::NotEnoughCards { correct: 8, incorrect: 3 }.player_message();
    assert!(not_enough.contains("pelo menos 9 cartas corretas e 3 incorretas"), "{not_enough}");
}
