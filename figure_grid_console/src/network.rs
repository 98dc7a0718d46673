use std::io;
use std::net::{TcpStream, ToSocketAddrs};

use serde::{Serialize, de};
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};
use url::Url;


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    Protocol(String),
}

// Opens the single WebSocket connection of a game session. No retries, no
// backoff; a failed connect surfaces through the ordinary error path.
pub fn connect(server_address: &str) -> io::Result<WebSocket<TcpStream>> {
    let addrs: Vec<_> = server_address.to_socket_addrs()?.collect();
    let stream = TcpStream::connect(&addrs[..])?;
    let ws_url = Url::parse(&format!("ws://{server_address}/socket"))
        .map_err(|err| io::Error::other(err.to_string()))?;
    let (socket, _response) = tungstenite::client(ws_url, stream)
        .map_err(|err| io::Error::other(err.to_string()))?;
    Ok(socket)
}

// One copy of the socket blocks on reads in the network thread, the other
// takes writes from the main loop.
pub fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = *socket.get_config();
    Ok(WebSocket::from_raw_socket(stream, role, Some(config)))
}

pub fn write_obj<T: Serialize>(
    socket: &mut WebSocket<TcpStream>, obj: &T,
) -> Result<(), CommunicationError> {
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    socket.send(Message::text(serialized)).map_err(CommunicationError::Socket)
}

pub fn read_obj<T: de::DeserializeOwned>(
    socket: &mut WebSocket<TcpStream>,
) -> Result<T, CommunicationError> {
    loop {
        match socket.read().map_err(CommunicationError::Socket)? {
            Message::Text(msg) => {
                return serde_json::from_str(msg.as_str()).map_err(CommunicationError::Serde);
            }
            Message::Close(_) => {
                return Err(CommunicationError::Socket(tungstenite::Error::ConnectionClosed));
            }
            // Replies are generated by tungstenite itself.
            Message::Ping(_) | Message::Pong(_) => {}
            other => {
                return Err(CommunicationError::Protocol(format!("Expected text, got {other:?}")));
            }
        }
    }
}
