use std::io;
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::{cursor, event as term_event, execute, style, terminal};
use figure_grid::client::{ClientState, StartOutcome};
use figure_grid::event::GameServerEvent;
use figure_grid::grid::CellId;
use instant::Instant;
use log::{info, warn};
use scopeguard::defer;
use tungstenite::WebSocket;
use tungstenite::protocol::Role;

use crate::network;
use crate::tui;


pub struct ClientConfig {
    pub server_address: String,
}

// All input is merged onto one channel: the network reader thread, the
// terminal reader thread, and a periodic tick that drives the delayed
// end-of-game transition.
enum IncomingEvent {
    Network(GameServerEvent),
    TransportError(network::CommunicationError),
    TransportClosed,
    Terminal(term_event::Event),
    Tick,
}

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(config: ClientConfig) -> io::Result<()> {
    let (tx, rx) = mpsc::channel();

    let tx_terminal = tx.clone();
    thread::spawn(move || {
        while let Ok(event) = term_event::read() {
            if tx_terminal.send(IncomingEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });
    let tx_tick = tx.clone();
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_INTERVAL);
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen).unwrap();
        terminal::disable_raw_mode().unwrap();
    };

    let mut client_state = ClientState::new();
    let mut connection = match client_state.start() {
        StartOutcome::Started => connect_transport(&config, tx.clone(), &mut client_state),
        StartOutcome::AlreadyInGame => None,
    };
    render(&mut stdout, &client_state)?;

    for event in rx {
        let now = Instant::now();
        match event {
            IncomingEvent::Network(event) => {
                info!("Server event: {event:?}");
                if let Err(err) = client_state.process_server_event(event, now) {
                    warn!("Ignoring server event: {err:?}");
                }
            }
            IncomingEvent::TransportError(err) => {
                warn!("Connection failed: {err:?}");
                client_state.process_transport_error(now);
            }
            IncomingEvent::TransportClosed => {
                info!("Connection closed");
            }
            IncomingEvent::Terminal(event) => {
                // Improvement potential: mouse support for clicking cells.
                if let term_event::Event::Key(key) = event {
                    match key.code {
                        term_event::KeyCode::Char(ch @ '0'..='8') => {
                            if let Some(cell) = CellId::from_index((ch as u8 - b'0').into()) {
                                info!("Clicked cell {cell}");
                                client_state.click_cell(cell);
                            }
                        }
                        term_event::KeyCode::Enter => match client_state.start() {
                            StartOutcome::AlreadyInGame => {}
                            StartOutcome::Started => {
                                // Wind down the previous transport before its
                                // replacement appears.
                                if let Some(mut old) = connection.take() {
                                    let _ = old.close(None);
                                }
                                connection =
                                    connect_transport(&config, tx.clone(), &mut client_state);
                            }
                        },
                        term_event::KeyCode::Char('q') | term_event::KeyCode::Esc => {
                            if let Some(mut socket) = connection.take() {
                                let _ = socket.close(None);
                            }
                            return Ok(());
                        }
                        _ => {}
                    }
                }
            }
            IncomingEvent::Tick => {
                // Only drives the `refresh` below.
            }
        }
        client_state.refresh(now);
        while let Some(event) = client_state.next_outgoing_event() {
            match connection.as_mut() {
                Some(socket) => {
                    if let Err(err) = network::write_obj(socket, &event) {
                        warn!("Failed to send {event:?}: {err:?}");
                    }
                }
                None => warn!("Dropping {event:?}: no connection"),
            }
        }
        render(&mut stdout, &client_state)?;
    }
    panic!("Unexpected end of events stream");
}

// Opens the connection for a freshly started session and hands its reading
// half to a dedicated thread. A connect failure is reported the same way as
// a mid-game transport error.
fn connect_transport(
    config: &ClientConfig, tx: mpsc::Sender<IncomingEvent>, client_state: &mut ClientState,
) -> Option<WebSocket<TcpStream>> {
    let open = || -> io::Result<(WebSocket<TcpStream>, WebSocket<TcpStream>)> {
        let socket_in = network::connect(&config.server_address)?;
        let socket_out = network::clone_websocket(&socket_in, Role::Client)?;
        Ok((socket_in, socket_out))
    };
    let (mut socket_in, socket_out) = match open() {
        Ok(sockets) => sockets,
        Err(err) => {
            warn!("Cannot connect to {}: {}", config.server_address, err);
            client_state.process_transport_error(Instant::now());
            return None;
        }
    };
    info!("Connected to {}", config.server_address);
    thread::spawn(move || {
        loop {
            match network::read_obj(&mut socket_in) {
                Ok(event) => {
                    if tx.send(IncomingEvent::Network(event)).is_err() {
                        break;
                    }
                }
                Err(network::CommunicationError::Socket(tungstenite::Error::ConnectionClosed)) => {
                    let _ = tx.send(IncomingEvent::TransportClosed);
                    break;
                }
                Err(err) => {
                    let _ = tx.send(IncomingEvent::TransportError(err));
                    break;
                }
            }
        }
    });
    Some(socket_out)
}

fn render(stdout: &mut io::Stdout, client_state: &ClientState) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    // Note. Not using `lines()` because it removes trailing new lines.
    for line in tui::render_client(client_state).split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }
    Ok(())
}
