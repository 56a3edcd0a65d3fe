//! UI rendering

use super::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tabgrid_core::Position;

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 10;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

/// What lies under a mouse position inside the grid block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Hit {
    Cell(Position),
    /// `trailing` is true on the right half of the header.
    ColumnHeader { col: usize, trailing: bool },
    RowHeader(usize),
}

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub(crate) fn hit_test(app: &App, grid_area: Rect, mouse_col: u16, mouse_row: u16) -> Option<Hit> {
    if grid_area.width < 3 || grid_area.height < 4 {
        return None;
    }

    let inner_x = grid_area.x.saturating_add(1);
    let inner_y = grid_area.y.saturating_add(1);
    let inner_width = grid_area.width.saturating_sub(2);
    let inner_height = grid_area.height.saturating_sub(2);
    let inner_right = inner_x.saturating_add(inner_width);
    let inner_bottom = inner_y.saturating_add(inner_height);

    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row < inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    let grid = app.editor.grid();
    let header_row = mouse_row == inner_y;
    let row = if header_row {
        None
    } else {
        let rel_row = mouse_row.saturating_sub(inner_y.saturating_add(1)) as usize;
        if rel_row >= app.visible_rows {
            return None;
        }
        let row = app.viewport_row.saturating_add(rel_row);
        if row >= grid.row_count() {
            return None;
        }
        Some(row)
    };

    let row_header_end = inner_x.saturating_add(ROW_HEADER_WIDTH);
    if mouse_col < row_header_end {
        return row.map(Hit::RowHeader);
    }

    let mut x = row_header_end.saturating_add(GRID_COLUMN_SPACING);
    if mouse_col < x {
        return None;
    }

    for offset in 0..app.visible_cols {
        let col = app.viewport_col + offset;
        if col >= grid.column_count() {
            break;
        }

        let width = app.column_width_chars(col);
        let cell_end = x.saturating_add(width);
        if mouse_col >= x && mouse_col < cell_end && mouse_col < inner_right {
            return Some(match row {
                Some(r) => Hit::Cell(Position::new(r, col)),
                None => Hit::ColumnHeader {
                    col,
                    trailing: (mouse_col - x) * 2 >= width,
                },
            });
        }

        x = cell_end;
        let spacing_end = x.saturating_add(GRID_COLUMN_SPACING);
        if mouse_col >= x && mouse_col < spacing_end {
            return None;
        }
        x = spacing_end;

        if x >= inner_right {
            break;
        }
    }

    None
}

/// Number of columns from the viewport origin that fit in `width` terminal cells.
fn columns_that_fit(app: &App, width: u16) -> usize {
    let mut used: u16 = 0;
    let mut count = 0;
    for col in app.viewport_col..app.editor.grid().column_count() {
        let span = app
            .column_width_chars(col)
            .saturating_add(GRID_COLUMN_SPACING);
        used = used.saturating_add(span);
        if used > width && count > 0 {
            break;
        }
        count += 1;
    }
    count.max(1)
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let grid_area = chunks[1];
    let available_width = grid_area
        .width
        .saturating_sub(ROW_HEADER_WIDTH + GRID_COLUMN_SPACING + 2);
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders

    app.visible_cols = columns_that_fit(app, available_width);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_formula_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = app.mode();
    let content = match mode {
        Mode::Rename => match &app.rename {
            Some(prompt) => {
                let (before, after) = prompt.buffer.text().split_at(prompt.buffer.cursor());
                format!("Column name: {}│{}", before, after)
            }
            None => String::new(),
        },
        Mode::Edit => match app.editor.edit_session() {
            Some(session) => {
                let (before, after) = session.text().split_at(session.cursor());
                format!("{}: {}│{}", session.position(), before, after)
            }
            None => String::new(),
        },
        Mode::Grid => match app.editor.selection().range() {
            Some(range) if range.height() > 1 || range.width() > 1 => {
                let top_left = Position::new(range.top, range.left);
                let bottom_right = Position::new(range.bottom, range.right);
                format!(
                    "{}:{} ({}x{})",
                    top_left,
                    bottom_right,
                    range.height(),
                    range.width()
                )
            }
            _ => match app.current() {
                Some(pos) => match app.editor.grid().cell(pos.r, pos.c) {
                    Some(value) if !value.is_empty() => format!("{}: {}", pos, value),
                    _ => format!("{}: (empty)", pos),
                },
                None => String::new(),
            },
        },
    };

    let title = match mode {
        Mode::Edit => " Edit ",
        Mode::Rename => " Rename column ",
        Mode::Grid => " Cell ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(match mode {
            Mode::Edit => Color::Yellow,
            Mode::Rename => Color::Cyan,
            Mode::Grid => Color::White,
        }));

    let paragraph = Paragraph::new(content).block(block);
    f.render_widget(paragraph, area);
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let grid = app.editor.grid();
    let selection = app.editor.selection();
    let current = selection.current();
    let editing = selection.editing_cell();
    let col_end = (app.viewport_col + app.visible_cols).min(grid.column_count());
    let row_end = (app.viewport_row + app.visible_rows).min(grid.row_count());
    let highlight = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);

    // Build header row
    let mut header_cells = vec![Cell::from(" ")]; // Corner
    for col in app.viewport_col..col_end {
        let name = grid.column(col).map(|c| c.name.as_str()).unwrap_or_default();
        let dragged = app
            .header_drag
            .is_some_and(|d| d.axis == tabgrid_core::Axis::Column && d.source == col);
        let style = if dragged {
            highlight.bg(Color::Magenta)
        } else if current.is_some_and(|p| p.c == col) {
            highlight
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header_cells.push(Cell::from(name.to_string()).style(style));
    }
    let header = Row::new(header_cells).height(1);

    // Build data rows
    let mut rows = Vec::new();
    for row in app.viewport_row..row_end {
        let mut cells = Vec::new();

        let dragged = app
            .header_drag
            .is_some_and(|d| d.axis == tabgrid_core::Axis::Row && d.source == row);
        let row_style = if dragged {
            highlight.bg(Color::Magenta)
        } else if current.is_some_and(|p| p.r == row) {
            highlight
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cells.push(Cell::from(format!("{}", row + 1)).style(row_style));

        for col in app.viewport_col..col_end {
            let pos = Position::new(row, col);
            let display = match (editing, app.editor.edit_session()) {
                (Some(e), Some(session)) if e == pos => session.text().to_string(),
                _ => grid.cell(row, col).unwrap_or_default().to_string(),
            };

            let style = if editing == Some(pos) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if current == Some(pos) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if selection.is_selected(row, col) {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else {
                Style::default()
            };

            cells.push(Cell::from(display).style(style));
        }

        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)]; // Row header
    for col in app.viewport_col..col_end {
        widths.push(Constraint::Length(app.column_width_chars(col)));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" tabgrid "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let modified = app.editor.is_modified();
    let file_info = if let Some(ref path) = app.file_path {
        let modified_indicator = if modified { " [+]" } else { "" };
        format!("{}{}", path.display(), modified_indicator)
    } else if modified {
        "[New File] [+]".to_string()
    } else {
        "[New File]".to_string()
    };

    let help = app.keymap.status_hint();

    let status = if !app.status_message.is_empty() {
        app.status_message.clone()
    } else {
        format!("{}  |  [{}]  |  {}", file_info, app.keymap.name(), help)
    };

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if !app.status_message.is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let spans = vec![Span::styled(status, style)];
    let paragraph = Paragraph::new(Line::from(spans));
    f.render_widget(paragraph, area);
}
