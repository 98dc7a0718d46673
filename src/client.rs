use std::collections::VecDeque;

use instant::Instant;

use crate::end_delay::EndDelay;
use crate::event::{GameClientEvent, GameServerEvent};
use crate::grid::{CellGrid, CellId, CellImage};
use crate::status::{StatusBanner, StatusTone};


pub const CONNECTION_LOST_MESSAGE: &str = "Ops, connection lost<br>:(<br>Tap here to play again!";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    NoGame,
    InGame,
    EndGame,
}

// Tells the caller whether a new transport connection must be opened.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StartOutcome {
    // Fresh session: open exactly one new connection.
    Started,
    // Double-start guard: nothing changed, keep the current connection.
    AlreadyInGame,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    CannotApplyEvent(String),
}

// The whole client session: lifecycle state, the figure slot, the display
// cells and the status banner, the pending end-of-game transition, and the
// queue of events to send. The transport itself lives with the caller; it
// opens a connection per `StartOutcome::Started`, feeds inbound traffic to
// `process_server_event` / `process_transport_error`, and drains
// `next_outgoing_event` onto the socket.
pub struct ClientState {
    session_state: SessionState,
    figure: Option<String>,
    end_flag: bool,
    grid: Option<CellGrid>,
    status: StatusBanner,
    end_delay: EndDelay,
    outgoing: VecDeque<GameClientEvent>,
}

impl ClientState {
    pub fn new() -> Self {
        ClientState {
            session_state: SessionState::NoGame,
            figure: None,
            end_flag: false,
            grid: None,
            status: StatusBanner::new(),
            end_delay: EndDelay::new(),
            outgoing: VecDeque::new(),
        }
    }

    pub fn session_state(&self) -> SessionState { self.session_state }
    pub fn end_flag(&self) -> bool { self.end_flag }
    pub fn grid(&self) -> Option<&CellGrid> { self.grid.as_ref() }
    pub fn status(&self) -> &StatusBanner { &self.status }

    pub fn start(&mut self) -> StartOutcome {
        match self.session_state {
            SessionState::InGame => return StartOutcome::AlreadyInGame,
            SessionState::NoGame => self.grid = Some(CellGrid::new()),
            SessionState::EndGame => {
                if let Some(grid) = &mut self.grid {
                    grid.reset();
                }
            }
        }
        self.session_state = SessionState::InGame;
        self.end_flag = false;
        self.end_delay.cancel();
        self.status.reset_tone();
        StartOutcome::Started
    }

    // Every click is forwarded as-is; the server decides what it means.
    pub fn click_cell(&mut self, cell: CellId) {
        self.outgoing.push_back(GameClientEvent::ClientClick(cell.to_string()));
    }

    pub fn next_outgoing_event(&mut self) -> Option<GameClientEvent> {
        self.outgoing.pop_front()
    }

    pub fn process_server_event(
        &mut self, event: GameServerEvent, now: Instant,
    ) -> Result<(), EventError> {
        match event {
            GameServerEvent::Figure(name) => {
                self.figure = Some(name);
                Ok(())
            }
            GameServerEvent::Show(cell_text) => self.show_figure(&cell_text),
            GameServerEvent::Info(text) => {
                self.status.set_text(text);
                Ok(())
            }
            GameServerEvent::End(text) => {
                self.end_flag = true;
                self.status.set(text, StatusTone::Success);
                self.end_delay.schedule(now);
                Ok(())
            }
            GameServerEvent::Unknown => Ok(()),
        }
    }

    pub fn process_transport_error(&mut self, now: Instant) {
        if self.end_flag {
            // The game already ended gracefully; the transport going down
            // is a side effect and must not overwrite the closing message.
            return;
        }
        self.status.set(CONNECTION_LOST_MESSAGE.to_owned(), StatusTone::Error);
        self.end_delay.schedule(now);
    }

    // Applies the delayed end-of-game transition once its deadline passes.
    // Call on every event-loop iteration.
    pub fn refresh(&mut self, now: Instant) {
        if self.end_delay.fire(now) {
            self.session_state = SessionState::EndGame;
        }
    }

    fn show_figure(&mut self, cell_text: &str) -> Result<(), EventError> {
        let Some(cell) = CellId::from_wire(cell_text) else {
            return Err(EventError::CannotApplyEvent(format!(
                "Bad cell id in SHOW: {cell_text:?}"
            )));
        };
        let Some(figure) = &self.figure else {
            return Err(EventError::CannotApplyEvent(format!(
                "Cannot show cell {cell}: no figure received"
            )));
        };
        let Some(grid) = &mut self.grid else {
            return Err(EventError::CannotApplyEvent(format!(
                "Cannot show cell {cell}: no game in progress"
            )));
        };
        grid.set_image(cell, CellImage::Figure(figure.clone()));
        Ok(())
    }
}
