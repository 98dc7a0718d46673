use serde::{Deserialize, Serialize};


// Both directions of the protocol are flat JSON objects with exactly two
// fields: a `type` tag and a `text` payload. Adjacent tagging reproduces
// that shape. Payload text is carried verbatim, markup included.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameServerEvent {
    // Names the figure shown by subsequent `Show`s. No display change yet.
    Figure(String),
    // Cell id (decimal, zero-based) whose image becomes the stored figure.
    Show(String),
    // Replaces the status line.
    Info(String),
    // Closing status message. The session ends shortly after.
    End(String),
    // Any unrecognized `type` tag parses to this instead of failing the
    // read loop. Handling it is a no-op.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameClientEvent {
    ClientClick(String),
}
