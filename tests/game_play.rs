use hexchesstrophy::{
    Error,
    model::{Coord, GameState, PieceKind, Side, topology},
    session::Games,
};

fn c(s: &str) -> Coord {
    s.parse().unwrap()
}

#[test]
fn white_captures_en_passant() {
    let mut game = GameState::new().unwrap();
    game.play_turn(c("E4"), c("E5")).unwrap();
    game.play_turn(c("D7"), c("D5")).unwrap();

    assert!(game.destinations(c("E5")).contains(&c("D6")));

    let mv = game.play_turn(c("E5"), c("D6")).unwrap();
    // The black pawn on D5 points forward at D6 as seen by white.
    assert_eq!(mv.notation(), "ed6");
    let victim = mv.captured().unwrap();
    assert_eq!((victim.side(), victim.kind()), (Side::BLACK, PieceKind::PAWN));
    assert_eq!(victim.coord(), c("D5"));

    let board = game.board();
    assert!(board.piece_at(c("D5")).is_none());
    assert_eq!(board.piece_at(c("D6")).unwrap().side(), Side::WHITE);
    assert_eq!(board.pieces(Side::BLACK).count(), 17);
}

#[test]
fn black_captures_en_passant() {
    let mut game = GameState::new().unwrap();
    game.play_turn(c("G4"), c("G6")).unwrap();

    assert!(game.destinations(c("H7")).contains(&c("G5")));

    let mv = game.play_turn(c("H7"), c("G5")).unwrap();
    assert_eq!(mv.captured().unwrap().coord(), c("G6"));
    assert!(game.board().piece_at(c("G6")).is_none());
    assert_eq!(game.board().pieces(Side::WHITE).count(), 17);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = GameState::new().unwrap();
    game.play_turn(c("E4"), c("E5")).unwrap();
    game.play_turn(c("D7"), c("D5")).unwrap();
    game.play_turn(c("B1"), c("B2")).unwrap();
    game.play_turn(c("K7"), c("K6")).unwrap();

    assert!(!game.destinations(c("E5")).contains(&c("D6")));
    assert!(matches!(
        game.play_turn(c("E5"), c("D6")),
        Err(Error::IllegalMove { .. })
    ));
}

#[test]
fn turns_alternate() {
    let mut game = GameState::new().unwrap();
    game.play_turn(c("F5"), c("F6")).unwrap();
    assert!(matches!(
        game.play_turn(c("E4"), c("E5")),
        Err(Error::OutOfTurn(Side::WHITE))
    ));
    // Pawns do not capture straight ahead.
    game.play_turn(c("F7"), c("F6")).unwrap_err();
    game.play_turn(c("E7"), c("E6")).unwrap();
    assert_eq!(game.turn(), Side::WHITE);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn rejected_moves_leave_the_board_alone() {
    let mut game = GameState::new().unwrap();
    let before = game.board().clone();

    game.play_turn(c("C1"), c("E6")).unwrap_err();
    game.play_turn(c("G1"), c("G3")).unwrap_err();
    game.play_turn(c("D1"), c("D3")).unwrap_err();
    game.play_turn(c("F6"), c("F7")).unwrap_err();

    assert_eq!(game.board(), &before);
    assert!(game.history().is_empty());
}

#[test]
fn errors_name_the_cells() {
    let err = "M1".parse::<Coord>().unwrap_err();
    let message = Error::from(err).to_string();
    assert!(message.contains("A(1-6)"));
    assert!(message.contains("F(1-11)"));
    assert!(message.ends_with("M1 was provided instead"));

    let mut game = GameState::new().unwrap();
    let err = game.play_turn(c("F6"), c("F7")).unwrap_err();
    assert_eq!(err.to_string(), "cell F6 does not contain a piece");
}

#[test]
fn coordinates_serialize_as_labels() {
    assert_eq!(serde_json::to_string(&c("F6")).unwrap(), "\"F6\"");
    let back: Coord = serde_json::from_str("\"f11\"").unwrap();
    assert_eq!(back, c("F11"));
    assert!(serde_json::from_str::<Coord>("\"J6\"").is_err());

    assert_eq!(topology::layout().len(), 91);
}

#[test]
fn snapshots_serialize() {
    let games = Games::new().unwrap();
    let id = games.create_new();
    let snapshot = games.play_turn(id, "d1", "e3").unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["turn"], "black");
    assert_eq!(json["history"][0]["notation"], "Ne3");
    assert_eq!(json["history"][0]["origin"], "D1");
    assert_eq!(json["finished"], false);
}

#[test]
fn a_finished_game_is_gone() {
    let games = Games::new().unwrap();
    let id = games.create_new();
    games.play_turn(id, "G4", "G5").unwrap();
    games.finish(id).unwrap();

    assert!(games.is_empty());
    assert!(matches!(
        games.play_turn(id, "G7", "G6"),
        Err(Error::GameNotFound(_))
    ));
}
