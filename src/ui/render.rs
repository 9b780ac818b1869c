//! Drawing the phone. Every draw also refreshes the hit regions the mouse
//! handler and the slide gesture read.

use super::hit::{HitAction, HitRegistry, UNITS_PER_COLUMN};
use super::theme::{fade, rgb, Palette};
use crate::app::PhoneApp;
use crate::flow::CallState;
use crate::links::{DOCK, HOME_APPS};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PHONE_WIDTH: u16 = 36;
pub const MIN_PHONE_HEIGHT: u16 = 21;
const MAX_PHONE_HEIGHT: u16 = 30;
const FOOTER_HEIGHT: u16 = 3;
pub const KNOB_COLS: u16 = 5;
const VISUALIZER_BARS: usize = 8;
const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn draw(frame: &mut Frame<'_>, app: &PhoneApp, hits: &mut HitRegistry, now: Instant) {
    hits.clear();
    let palette = app.theme().palette();
    let area = frame.size();

    if area.width < PHONE_WIDTH || area.height < MIN_PHONE_HEIGHT + FOOTER_HEIGHT {
        let message = Paragraph::new(vec![
            Line::from("Terminal too small for the phone."),
            Line::from(format!(
                "Needs {}x{}. q quits.",
                PHONE_WIDTH,
                MIN_PHONE_HEIGHT + FOOTER_HEIGHT
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.dim));
        frame.render_widget(message, area);
        return;
    }

    let phone_height = (area.height - FOOTER_HEIGHT).min(MAX_PHONE_HEIGHT);
    let top = area.y + (area.height - phone_height - FOOTER_HEIGHT) / 2;
    let phone = Rect::new(
        area.x + (area.width - PHONE_WIDTH) / 2,
        top,
        PHONE_WIDTH,
        phone_height,
    );
    let footer = Rect::new(area.x, top + phone_height, area.width, FOOTER_HEIGHT);

    let screen = draw_chassis(frame, area, phone, palette);
    draw_status_bar(frame, row(screen, 0), app.clock_text(), palette);
    let content = Rect::new(
        screen.x,
        screen.y + 1,
        screen.width,
        screen.height.saturating_sub(2),
    );
    match app.state() {
        CallState::Incoming => draw_incoming(frame, content, app, palette, hits),
        CallState::Connected => draw_connected(frame, content, app, palette, hits, now),
        CallState::Home => draw_home(frame, content, palette, hits),
    }
    draw_home_indicator(frame, row(screen, screen.height.saturating_sub(1)), palette);
    draw_contract(frame, footer, app, palette, hits);
}

fn row(area: Rect, offset: u16) -> Rect {
    Rect::new(area.x, area.y + offset.min(area.height.saturating_sub(1)), area.width, 1)
}

/// Rect of `width` x `height` centered horizontally in `area`, starting at its top.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        height.min(area.height),
    )
}

fn draw_chassis(frame: &mut Frame<'_>, area: Rect, phone: Rect, palette: Palette) -> Rect {
    let chassis = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.chassis))
        .style(Style::default().bg(palette.screen).fg(palette.text));
    let screen = chassis.inner(phone);
    frame.render_widget(chassis, phone);

    // Side buttons, when there is a spare column for them.
    let buf = frame.buffer_mut();
    let style = Style::default().fg(palette.chassis);
    if phone.x > area.x {
        for offset in [3u16, 5, 6] {
            if offset < phone.height {
                buf.set_string(phone.x - 1, phone.y + offset, "▐", style);
            }
        }
    }
    let right = phone.x + phone.width;
    if right < area.x + area.width && phone.height > 6 {
        for offset in 4u16..7 {
            buf.set_string(right, phone.y + offset, "▌", style);
        }
    }
    screen
}

fn draw_status_bar(frame: &mut Frame<'_>, area: Rect, clock: &str, palette: Palette) {
    let text = Style::default().fg(palette.text).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("  {clock}"), text))),
        area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "◖████████◗",
            Style::default().fg(palette.island),
        )))
        .alignment(Alignment::Center),
        area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("▂▄▆ ◠ ▮▮▯ ", text)))
            .alignment(Alignment::Right),
        area,
    );
}

fn draw_home_indicator(frame: &mut Frame<'_>, area: Rect, palette: Palette) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "━━━━━━━━━━━━",
            Style::default().fg(palette.text),
        )))
        .alignment(Alignment::Center),
        area,
    );
}

fn draw_avatar(frame: &mut Frame<'_>, area: Rect, initials: &str, palette: Palette) {
    let avatar = centered(area, 9, 3);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.dim))
        .style(Style::default().bg(palette.button));
    let inner = block.inner(avatar);
    frame.render_widget(block, avatar);
    frame.render_widget(
        Paragraph::new(Span::styled(
            initials.to_string(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        inner,
    );
}

fn centered_line(frame: &mut Frame<'_>, area: Rect, text: &str, style: Style) {
    let text = fit(text, area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, style))).alignment(Alignment::Center),
        area,
    );
}

fn draw_incoming(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &PhoneApp,
    palette: Palette,
    hits: &mut HitRegistry,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let caller = app.caller();
    draw_avatar(frame, rows[1], &caller.initials, palette);
    centered_line(frame, rows[2], &caller.label, Style::default().fg(palette.dim));
    centered_line(
        frame,
        rows[3],
        &caller.name,
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    );

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[5]);
    for (half, (glyph, label)) in halves.iter().zip([("◷", "Remind Me"), ("✉", "Message")]) {
        draw_control(frame, *half, glyph, label, button_style(palette, false), palette);
    }

    draw_slider(frame, rows[7], app, palette, hits);
}

fn draw_slider(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &PhoneApp,
    palette: Palette,
    hits: &mut HitRegistry,
) {
    let container = Rect::new(
        area.x + 2,
        area.y,
        area.width.saturating_sub(4),
        area.height,
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.dim))
        .style(Style::default().bg(palette.track));
    let lane = block.inner(container);
    frame.render_widget(block, container);
    if lane.width < KNOB_COLS || lane.height == 0 {
        return;
    }

    let (position, opacity) = app
        .gesture()
        .map(|gesture| (gesture.position(), gesture.label_opacity()))
        .unwrap_or((0.0, 1.0));

    let mut label_style = Style::default().fg(fade(palette.text, palette.track, opacity));
    if opacity <= 0.0 || (!palette.brand_colors && opacity < 0.5) {
        label_style = label_style.add_modifier(Modifier::HIDDEN);
    } else if !palette.brand_colors && opacity < 1.0 {
        label_style = label_style.add_modifier(Modifier::DIM);
    }
    centered_line(frame, lane, "slide to answer", label_style);

    let travel = lane.width - KNOB_COLS;
    let offset = ((position / UNITS_PER_COLUMN).round().max(0.0) as u16).min(travel);
    let knob_x = lane.x + offset;
    let knob_style = if palette.brand_colors {
        Style::default()
            .bg(palette.accent)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    };
    frame
        .buffer_mut()
        .set_string(knob_x, lane.y, "  ☎  ", knob_style);

    hits.set_track(lane, container, KNOB_COLS);
    hits.register(
        Rect::new(knob_x, container.y, KNOB_COLS, container.height),
        HitAction::Knob,
    );
}

fn button_style(palette: Palette, active: bool) -> Style {
    match (palette.brand_colors, active) {
        (true, false) => Style::default().bg(palette.button).fg(palette.text),
        (true, true) => Style::default().bg(palette.button_active).fg(palette.screen),
        (false, false) => Style::default(),
        (false, true) => Style::default().add_modifier(Modifier::REVERSED),
    }
}

/// Round-ish button glyph on the first row, caption on the second.
fn draw_control(
    frame: &mut Frame<'_>,
    area: Rect,
    glyph: &str,
    label: &str,
    style: Style,
    palette: Palette,
) {
    let lines = vec![
        Line::from(Span::styled(format!("  {glyph}  "), style)),
        Line::from(Span::styled(
            fit(label, area.width as usize),
            Style::default().fg(palette.dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

struct GridCell {
    glyph: &'static str,
    label: &'static str,
    action: Option<HitAction>,
}

const fn cell(glyph: &'static str, label: &'static str, action: Option<HitAction>) -> Option<GridCell> {
    Some(GridCell {
        glyph,
        label,
        action,
    })
}

static CALL_GRID: [Option<GridCell>; 9] = [
    cell("●", "mute", Some(HitAction::Mute)),
    cell("⌗", "keypad", None),
    cell("◀", "audio", Some(HitAction::Speaker)),
    cell("✉", "message", None),
    cell("▶", "FaceTime", None),
    None,
    None,
    cell("✆", "end", Some(HitAction::EndCall)),
    None,
];

fn draw_connected(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &PhoneApp,
    palette: Palette,
    hits: &mut HitRegistry,
    now: Instant,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    let caller = app.caller();
    draw_avatar(frame, rows[1], &caller.initials, palette);
    centered_line(
        frame,
        rows[2],
        &caller.name,
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    );

    let Some(screen) = app.connected() else {
        return;
    };
    centered_line(frame, rows[3], &screen.elapsed_text(), Style::default().fg(palette.dim));

    let bars: String = screen
        .visualizer_levels(now, VISUALIZER_BARS)
        .iter()
        .map(|level| {
            let index = ((level * BAR_GLYPHS.len() as f32).ceil() as usize)
                .clamp(1, BAR_GLYPHS.len())
                - 1;
            BAR_GLYPHS[index]
        })
        .flat_map(|bar| [bar, ' '])
        .collect();
    centered_line(frame, rows[4], bars.trim_end(), Style::default().fg(palette.accent));

    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 3])
        .split(rows[6]);
    for (r, grid_row) in grid_rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(*grid_row);
        for (c, area) in cells.iter().enumerate() {
            let Some(cell) = &CALL_GRID[r * 3 + c] else {
                continue;
            };
            let style = match cell.action {
                Some(HitAction::Mute) => button_style(palette, screen.is_muted()),
                Some(HitAction::Speaker) => button_style(palette, screen.is_speaker()),
                Some(HitAction::EndCall) if palette.brand_colors => Style::default()
                    .bg(palette.danger)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                Some(HitAction::EndCall) => Style::default().add_modifier(Modifier::REVERSED),
                _ => button_style(palette, false),
            };
            draw_control(frame, *area, cell.glyph, cell.label, style, palette);
            if let Some(action) = cell.action {
                hits.register(*area, action);
            }
        }
    }
}

fn draw_home(frame: &mut Frame<'_>, area: Rect, palette: Palette, hits: &mut HitRegistry) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    for (index, (app, column)) in HOME_APPS.iter().zip(columns.iter()).enumerate() {
        let icon = centered(*column, 6, 3);
        draw_tile(frame.buffer_mut(), icon, app.glyph, app.color, palette);
        centered_line(
            frame,
            row(*column, 3),
            app.name,
            Style::default().fg(palette.text),
        );
        hits.register(*column, HitAction::OpenApp(index));
    }

    let dock = Rect::new(
        rows[3].x + 1,
        rows[3].y,
        rows[3].width.saturating_sub(2),
        rows[3].height,
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.dim))
        .style(Style::default().bg(palette.track));
    let inner = block.inner(dock);
    frame.render_widget(block, dock);
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(inner);
    for (app, slot) in DOCK.iter().zip(slots.iter()) {
        draw_tile(frame.buffer_mut(), centered(*slot, 4, 1), app.glyph, app.color, palette);
    }
}

/// Solid app tile with its glyph in the middle row.
fn draw_tile(buf: &mut Buffer, area: Rect, glyph: &str, color: (u8, u8, u8), palette: Palette) {
    let style = if palette.brand_colors {
        Style::default().bg(rgb(color)).fg(Color::White)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    for y in area.y..area.y + area.height {
        buf.set_string(area.x, y, " ".repeat(area.width as usize), style);
    }
    let glyph_width = glyph.width() as u16;
    let x = area.x + area.width.saturating_sub(glyph_width) / 2;
    buf.set_string(x, area.y + area.height / 2, glyph, style.add_modifier(Modifier::BOLD));
}

fn draw_contract(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &PhoneApp,
    palette: Palette,
    hits: &mut HitRegistry,
) {
    centered_line(
        frame,
        row(area, 0),
        "Contract Address",
        Style::default().fg(palette.dim).add_modifier(Modifier::BOLD),
    );

    let (icon, icon_style) = if app.is_copied() {
        ("✓", Style::default().fg(palette.copied).add_modifier(Modifier::BOLD))
    } else {
        ("⧉", Style::default().fg(palette.dim))
    };
    let address = fit(app.contract_address(), area.width.saturating_sub(4) as usize);
    let width = (address.width() + 2) as u16;
    let value_row = row(area, 1);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(address, Style::default().fg(palette.text)),
            Span::raw(" "),
            Span::styled(icon, icon_style),
        ]))
        .alignment(Alignment::Center),
        value_row,
    );
    hits.register(centered(value_row, width, 1), HitAction::CopyContract);

    let hint = match app.state() {
        CallState::Incoming => "drag the knob or →/Enter to answer · c copy · q quit",
        CallState::Connected => "m mute · s speaker · e end · r restart · c copy · q quit",
        CallState::Home => "1-3 open app · r restart · c copy · q quit",
    };
    centered_line(frame, row(area, 2), hint, Style::default().fg(palette.dim));
}

/// Clip `text` to `width` terminal columns, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
