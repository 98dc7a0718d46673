use console::Style;
use figure_grid::client::{ClientState, SessionState};
use figure_grid::grid::CellGrid;
use figure_grid::status::{StatusBanner, StatusTone};
use itertools::Itertools;


const CELL_WIDTH: usize = 9;
const BOARD_WIDTH: usize = CELL_WIDTH * 3 + 4;

pub fn render_client(client_state: &ClientState) -> String {
    let mut out = String::new();
    out.push_str(&render_status(client_state.status()));
    out.push('\n');
    match client_state.grid() {
        Some(grid) => out.push_str(&render_grid(grid)),
        None => out.push_str("Connecting...\n"),
    }
    out.push('\n');
    out.push_str(&render_hints(client_state.session_state()));
    out
}

pub fn render_status(banner: &StatusBanner) -> String {
    let style = match banner.tone() {
        StatusTone::Standard => Style::new().black().on_magenta(),
        StatusTone::Success => Style::new().black().on_green(),
        StatusTone::Error => Style::new().white().on_red(),
    };
    // `<br>` is the only markup the server actually embeds; the rest of the
    // text is shown verbatim.
    banner
        .text()
        .replace("<br>", "\n")
        .split('\n')
        .map(|line| style.apply_to(format!("{:^width$}", line, width = BOARD_WIDTH)).to_string())
        .join("\n")
        + "\n"
}

pub fn render_grid(grid: &CellGrid) -> String {
    let dashes = "-".repeat(CELL_WIDTH);
    let border = format!("+{dashes}+{dashes}+{dashes}+");
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in &grid.cells().chunks(3) {
        let row = row.collect_vec();
        let ids = row
            .iter()
            .map(|(cell, _)| format!("{:<width$}", cell, width = CELL_WIDTH))
            .join("|");
        let figures = row
            .iter()
            .map(|(_, image)| {
                let label: String =
                    image.figure().unwrap_or("").chars().take(CELL_WIDTH).collect();
                format!("{:^width$}", label, width = CELL_WIDTH)
            })
            .join("|");
        out.push_str(&format!("|{ids}|\n|{figures}|\n{border}\n"));
    }
    out
}

fn render_hints(session_state: SessionState) -> String {
    let hints = match session_state {
        SessionState::InGame => "0-8: play a cell   q: quit",
        SessionState::NoGame | SessionState::EndGame => "Enter: play again   q: quit",
    };
    Style::new().dim().apply_to(hints).to_string() + "\n"
}
