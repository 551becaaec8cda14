//! Checkers UI rendering.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
    render_thinking_status_bar,
};
use crate::checkers::{CheckersGame, CheckersResult, Color as Side, Square, BOARD_SIZE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Characters per board cell
const CELL_WIDTH: u16 = 3;
/// Move history lines shown in the info panel
const HISTORY_LINES: usize = 6;

/// Render the checkers screen. `tick` drives the thinking spinner.
pub fn render_checkers_scene(frame: &mut Frame, area: Rect, game: &CheckersGame, tick: u64) {
    let layout = create_game_layout(frame, area, " Checkers ", Color::Cyan, 10, 26);

    render_board(frame, layout.content, game);
    render_status(frame, layout.status_bar, game, tick);
    render_info_panel(frame, layout.info_panel, game);

    if let Some(result) = game.game_result {
        let (color, title, message) = match result {
            CheckersResult::RedWins => (Color::Green, ":: VICTORY! ::", "Black has no moves left."),
            CheckersResult::BlackWins => (Color::Red, "DEFEAT", "You have no moves left."),
        };
        render_game_over_banner(frame, layout.content, color, title, message);
    }
}

fn render_board(frame: &mut Frame, area: Rect, game: &CheckersGame) {
    // Column labels + 8 rows
    let board_height = BOARD_SIZE as u16 + 1;
    let board_width = BOARD_SIZE as u16 * CELL_WIDTH + 2;
    let y_offset = area.y + area.height.saturating_sub(board_height) / 2;
    let x_offset = area.x + area.width.saturating_sub(board_width) / 2;

    let mut header = String::from("  ");
    for col in 0..BOARD_SIZE {
        header.push_str(&format!(" {} ", col));
    }
    frame.render_widget(
        Paragraph::new(header).style(Style::default().fg(Color::DarkGray)),
        Rect::new(x_offset, y_offset, board_width.min(area.width), 1),
    );

    let highlighted = game.highlighted_squares();
    let last_move_squares: Vec<Square> = game
        .last_move
        .as_ref()
        .map(|mv| vec![mv.from, mv.to])
        .unwrap_or_default();

    for row in 0..BOARD_SIZE {
        let mut spans = vec![Span::styled(
            format!("{} ", row),
            Style::default().fg(Color::DarkGray),
        )];

        for col in 0..BOARD_SIZE {
            let square = Square::new(row as u8, col as u8);
            spans.push(render_cell(
                game,
                square,
                highlighted.contains(&square),
                last_move_squares.contains(&square),
            ));
        }

        let y = y_offset + 1 + row as u16;
        if y >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_offset, y, board_width.min(area.width), 1),
        );
    }
}

fn render_cell(game: &CheckersGame, square: Square, highlighted: bool, last_move: bool) -> Span<'static> {
    let background = if game.cursor == square {
        Color::Yellow
    } else if game.selected == Some(square) {
        Color::Blue
    } else if square.is_dark() {
        Color::DarkGray
    } else {
        Color::Reset
    };

    let (symbol, fg) = match game.board.get(square) {
        Some(piece) => {
            let symbol = if piece.king { " ◆ " } else { " ● " };
            let fg = match piece.color {
                Side::Red => Color::LightRed,
                Side::Black => Color::White,
            };
            (symbol, fg)
        }
        None if highlighted => (" · ", Color::Green),
        None => ("   ", Color::Reset),
    };

    let mut style = Style::default().fg(fg).bg(background);
    if game.board.get(square).is_some() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if last_move && game.board.get(square).is_none() {
        style = style.fg(Color::Green);
        return Span::styled(" ∘ ", style);
    }
    Span::styled(symbol, style)
}

fn render_status(frame: &mut Frame, area: Rect, game: &CheckersGame, tick: u64) {
    if game.is_over() {
        render_status_bar(
            frame,
            area,
            "Game over",
            Color::Gray,
            &[("[N]", "New game"), ("[Q]", "Quit")],
        );
        return;
    }

    if game.ai_thinking {
        render_thinking_status_bar(frame, area, "Black is thinking...", tick);
        return;
    }

    let (text, color) = if game.chain_square.is_some() {
        ("Keep jumping!", Color::LightYellow)
    } else if game.must_jump {
        ("Your turn - you must capture", Color::LightYellow)
    } else if game.selected.is_some() {
        ("Choose a destination", Color::White)
    } else {
        ("Your turn", Color::White)
    };

    render_status_bar(
        frame,
        area,
        text,
        color,
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Select"),
            ("[N]", "New"),
            ("[1-3]", "Level"),
            ("[Q]", "Quit"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &CheckersGame) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Difficulty: ", label),
            Span::styled(game.difficulty.name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        piece_count_line(game, Side::Red, "You ", Color::LightRed),
        piece_count_line(game, Side::Black, "AI  ", Color::White),
        Line::from(""),
        Line::from(vec![
            Span::styled("Moves: ", label),
            Span::raw(game.total_moves().to_string()),
            Span::styled("  Captures: ", label),
            Span::raw(game.total_captures.to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "HISTORY",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let skip = game.move_history.len().saturating_sub(HISTORY_LINES);
    for record in game.move_history.iter().skip(skip) {
        let color = match record.player {
            Side::Red => Color::LightRed,
            Side::Black => Color::Gray,
        };
        lines.push(Line::from(Span::styled(
            record.to_string(),
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// "You ● x11 ◆ 1" style line for one side.
fn piece_count_line(game: &CheckersGame, side: Side, label: &'static str, color: Color) -> Line<'static> {
    let style = Style::default().fg(color);
    Line::from(vec![
        Span::styled(label, style),
        Span::styled(
            format!(
                "● x{}  ◆ {}",
                game.pieces_remaining(side),
                game.board.count_kings(side)
            ),
            style,
        ),
    ])
}
