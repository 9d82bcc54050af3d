//! Text protocol tests.
//!
//! Sessions are driven through `run_io` with in-memory input and output,
//! using fixed roles and a scripted random source so replies are exact.

use std::io::Cursor;

use order_chaos::board::{Board, Symbol};
use order_chaos::game::{Game, Participant, Role, Status};
use order_chaos::random::ScriptedSource;
use order_chaos::session::Session;

fn session(game: Game) -> Session {
    Session::new(game, Box::new(ScriptedSource::default()))
}

fn run(session: &mut Session, script: &str) -> String {
    let mut output = Vec::new();
    session
        .run_io(Cursor::new(script), &mut output)
        .expect("in-memory I/O does not fail");
    String::from_utf8(output).expect("responses are UTF-8")
}

#[test]
fn test_ids_are_echoed_and_quit_stops() {
    let mut s = session(Game::with_roles(6, Role::Order, Participant::Human).unwrap());
    let out = run(&mut s, "1 name\n# comment\n\n2 quit\n3 name\n");
    assert_eq!(out, "=1 order-chaos\n\n=2 \n\n");
}

#[test]
fn test_unknown_command_fails() {
    let mut s = session(Game::with_roles(6, Role::Order, Participant::Human).unwrap());
    let out = run(&mut s, "komi 7.5\n");
    assert_eq!(out, "? unknown command: komi\n\n");
}

#[test]
fn test_play_and_show() {
    let mut s = session(Game::with_roles(6, Role::Order, Participant::Human).unwrap());
    let out = run(&mut s, "play 0 0 X\nshow\n");
    let expected = "= computer plays O at (3, 3) (positional)\nYour turn\n\n\
                    = \n\
                    X . . . . .\n\
                    . . . . . .\n\
                    . . . . . .\n\
                    . . . O . .\n\
                    . . . . . .\n\
                    . . . . . .\n\n";
    assert_eq!(out, expected);
}

#[test]
fn test_computer_moves_first_when_it_starts() {
    let s = session(Game::with_roles(6, Role::Chaos, Participant::Computer).unwrap());
    assert_eq!(s.game().moves().len(), 1);
    assert_eq!(s.game().turn(), Participant::Human);
}

#[test]
fn test_winning_move_reports_line_and_ends_match() {
    let board: Board = "XXXX..
                        ......
                        ..O...
                        ......
                        ...O..
                        ......"
        .parse()
        .unwrap();
    let mut s = session(Game::from_board(board, Role::Order, Participant::Human));

    let out = run(&mut s, "play 0 4 X\nplay 5 5 O\nstatus\n");
    assert_eq!(
        out,
        "= line: (0, 0) (0, 1) (0, 2) (0, 3) (0, 4)\nOrder wins (you win)\n\n\
         ? the match is over\n\n\
         = Order wins (you win)\n\n"
    );
    assert_eq!(s.game().status(), Status::OrderWins);
}

#[test]
fn test_occupied_and_out_of_turn_are_rejected() {
    let mut s = session(Game::with_roles(6, Role::Chaos, Participant::Human).unwrap());
    let out = run(&mut s, "play 2 2 O\nplay 2 2 X\ngenmove\n");
    let lines: Vec<&str> = out.split("\n\n").collect();
    assert!(lines[0].starts_with("= computer plays"));
    assert_eq!(lines[1], "? point (2, 2) is already occupied");
    assert_eq!(lines[2], "? it is the human's turn");
    assert_eq!(s.game().board().get((2, 2)), Ok(Some(Symbol::O)));
}

#[test]
fn test_new_match_with_size() {
    let mut s = session(Game::with_roles(6, Role::Order, Participant::Human).unwrap());
    run(&mut s, "play 1 1 X\n");
    assert_eq!(s.game().moves().len(), 2);

    let out = run(&mut s, "new 9\nroles\n");
    // The scripted source answers `false` to both coins: human Chaos, computer first.
    assert!(out.starts_with("= 9x9 board, you play Chaos\ncomputer plays"));
    assert!(out.contains("= human: Chaos, computer: Order\n\n"));
    assert_eq!(s.game().size(), 9);
    assert_eq!(s.game().moves().len(), 1);

    let out = run(&mut s, "new 12\n");
    assert!(out.starts_with("? unacceptable size 12"));
    assert_eq!(s.game().size(), 9);
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let script = "new\nplay 0 0 X\nplay 0 1 O\nplay 5 5 X\nmoves\n";
    let mut a = Session::with_seed(7, 99).unwrap();
    let mut b = Session::with_seed(7, 99).unwrap();
    assert_eq!(run(&mut a, script), run(&mut b, script));
    assert_eq!(a.game().board(), b.game().board());
}
