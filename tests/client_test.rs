use std::time::Duration;

use figure_grid::client::{
    CONNECTION_LOST_MESSAGE, ClientState, EventError, SessionState, StartOutcome,
};
use figure_grid::end_delay::END_GAME_DELAY;
use figure_grid::event::{GameClientEvent, GameServerEvent};
use figure_grid::grid::{CellId, CellImage, NUM_CELLS};
use figure_grid::status::StatusTone;
use instant::Instant;
use pretty_assertions::assert_eq;


// Drives a session with deterministic time, the way the I/O loop would.
struct TestClient {
    creation_instant: Instant,
    time_elapsed: Duration,
    state: ClientState,
}

impl TestClient {
    fn new() -> Self {
        TestClient {
            creation_instant: Instant::now(),
            time_elapsed: Duration::ZERO,
            state: ClientState::new(),
        }
    }

    fn set_time(&mut self, time: Duration) { self.time_elapsed = time; }
    fn now(&self) -> Instant { self.creation_instant + self.time_elapsed }

    fn start(&mut self) -> StartOutcome { self.state.start() }

    fn server_sends(&mut self, event: GameServerEvent) -> Result<(), EventError> {
        self.state.process_server_event(event, self.now())
    }

    fn transport_fails(&mut self) { self.state.process_transport_error(self.now()); }

    fn refresh(&mut self) { self.state.refresh(self.now()); }

    fn drain_outgoing(&mut self) -> Vec<GameClientEvent> {
        let mut events = vec![];
        while let Some(event) = self.state.next_outgoing_event() {
            events.push(event);
        }
        events
    }

    fn cell(&self, idx: usize) -> CellId { CellId::from_index(idx).unwrap() }
    fn cell_path(&self, idx: usize) -> String {
        self.state.grid().unwrap()[self.cell(idx)].path()
    }
}

fn figure(name: &str) -> GameServerEvent { GameServerEvent::Figure(name.to_owned()) }
fn show(cell: &str) -> GameServerEvent { GameServerEvent::Show(cell.to_owned()) }
fn info(text: &str) -> GameServerEvent { GameServerEvent::Info(text.to_owned()) }
fn end(text: &str) -> GameServerEvent { GameServerEvent::End(text.to_owned()) }


#[test]
fn start_from_no_game_builds_placeholder_cells() {
    let mut client = TestClient::new();
    assert!(client.state.grid().is_none());
    assert_eq!(client.start(), StartOutcome::Started);
    assert_eq!(client.state.session_state(), SessionState::InGame);
    let grid = client.state.grid().unwrap();
    assert_eq!(grid.cells().count(), NUM_CELLS);
    assert!(grid.cells().all(|(_, image)| *image == CellImage::Empty));
}

#[test]
fn start_during_game_is_a_no_op() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(figure("cat")).unwrap();
    client.server_sends(show("4")).unwrap();
    assert_eq!(client.start(), StartOutcome::AlreadyInGame);
    assert_eq!(client.cell_path(4), "images/cat.jpg");
}

#[test]
fn start_after_end_resets_cells_and_keeps_text() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(figure("cat")).unwrap();
    client.server_sends(show("4")).unwrap();
    client.server_sends(end("You won!<br><br>Tap here to play again!")).unwrap();
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);

    assert_eq!(client.start(), StartOutcome::Started);
    assert_eq!(client.state.session_state(), SessionState::InGame);
    assert!(!client.state.end_flag());
    for idx in 0..NUM_CELLS {
        assert_eq!(client.cell_path(idx), "images/empty-cell.jpg");
    }
    // Like the original client: a restart restores the standard background
    // but does not touch the text.
    assert_eq!(client.state.status().text(), "You won!<br><br>Tap here to play again!");
    assert_eq!(client.state.status().tone(), StatusTone::Standard);
}

#[test]
fn figure_then_show_sets_the_cell_image() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(figure("cat")).unwrap();
    client.server_sends(show("5")).unwrap();
    assert_eq!(client.cell_path(5), "images/cat.jpg");
}

#[test]
fn figure_survives_intervening_messages() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(figure("cat")).unwrap();
    client.server_sends(info("Your turn!")).unwrap();
    client.server_sends(GameServerEvent::Unknown).unwrap();
    client.server_sends(show("5")).unwrap();
    assert_eq!(client.cell_path(5), "images/cat.jpg");
}

#[test]
fn figure_is_overwritten_by_the_next_figure() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(figure("x-cell")).unwrap();
    client.server_sends(show("0")).unwrap();
    client.server_sends(figure("o-cell")).unwrap();
    client.server_sends(show("1")).unwrap();
    assert_eq!(client.cell_path(0), "images/x-cell.jpg");
    assert_eq!(client.cell_path(1), "images/o-cell.jpg");
}

#[test]
fn end_message_sets_flag_and_transitions_after_delay() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(end("Tie!")).unwrap();
    assert!(client.state.end_flag());
    assert_eq!(client.state.status().text(), "Tie!");
    assert_eq!(client.state.status().tone(), StatusTone::Success);
    assert_eq!(client.state.session_state(), SessionState::InGame);

    client.set_time(END_GAME_DELAY - Duration::from_millis(1));
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::InGame);
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);
}

#[test]
fn transport_error_shows_disconnect_message_and_ends() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.transport_fails();
    assert_eq!(client.state.status().text(), CONNECTION_LOST_MESSAGE);
    assert_eq!(client.state.status().tone(), StatusTone::Error);
    assert_eq!(client.state.session_state(), SessionState::InGame);
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);
}

#[test]
fn transport_error_after_graceful_end_is_suppressed() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(end("You won!")).unwrap();
    client.set_time(Duration::from_millis(100));
    client.transport_fails();
    assert_eq!(client.state.status().text(), "You won!");
    assert_eq!(client.state.status().tone(), StatusTone::Success);
    // The transition still happens on the END schedule.
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);
}

#[test]
fn error_racing_an_end_does_not_reschedule() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.transport_fails();
    client.set_time(Duration::from_millis(700));
    client.server_sends(end("You lost!")).unwrap();
    // The first trigger's deadline stands.
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);
}

#[test]
fn click_emits_exactly_one_message() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    let cell = client.cell(3);
    client.state.click_cell(cell);
    assert_eq!(client.drain_outgoing(), vec![GameClientEvent::ClientClick("3".to_owned())]);
    assert_eq!(client.drain_outgoing(), vec![]);
}

#[test]
fn clicks_are_forwarded_in_every_state() {
    let mut client = TestClient::new();
    let cell = client.cell(0);
    client.state.click_cell(cell);
    assert_eq!(client.drain_outgoing().len(), 1);

    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(end("Tie!")).unwrap();
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);
    let cell = client.cell(8);
    client.state.click_cell(cell);
    assert_eq!(client.drain_outgoing(), vec![GameClientEvent::ClientClick("8".to_owned())]);
}

#[test]
fn show_before_figure_is_rejected() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    assert!(client.server_sends(show("4")).is_err());
    assert_eq!(client.cell_path(4), "images/empty-cell.jpg");
}

#[test]
fn show_with_bad_cell_id_is_rejected() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(figure("cat")).unwrap();
    assert!(client.server_sends(show("banana")).is_err());
    assert!(client.server_sends(show("9")).is_err());
    let grid = client.state.grid().unwrap();
    assert!(grid.cells().all(|(_, image)| *image == CellImage::Empty));
}

#[test]
fn unknown_event_is_a_no_op() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(info("Waiting for opponent")).unwrap();
    client.server_sends(GameServerEvent::Unknown).unwrap();
    assert_eq!(client.state.status().text(), "Waiting for opponent");
    assert_eq!(client.state.session_state(), SessionState::InGame);
    assert_eq!(client.drain_outgoing(), vec![]);
}

#[test]
fn info_text_is_stored_verbatim() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(info("You just joined <b>an existing</b> game!<br>Wait.")).unwrap();
    assert_eq!(client.state.status().text(), "You just joined <b>an existing</b> game!<br>Wait.");
    assert_eq!(client.state.status().tone(), StatusTone::Standard);
}

#[test]
fn stale_end_timer_cannot_flip_a_new_game() {
    let mut client = TestClient::new();
    assert_eq!(client.start(), StartOutcome::Started);
    client.server_sends(end("You lost!")).unwrap();
    client.set_time(END_GAME_DELAY);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::EndGame);

    assert_eq!(client.start(), StartOutcome::Started);
    client.set_time(END_GAME_DELAY * 10);
    client.refresh();
    assert_eq!(client.state.session_state(), SessionState::InGame);
}
