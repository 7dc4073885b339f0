use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, LineGauge, Padding, Paragraph, Widget},
};

use crate::{
    keymap::KeyBindings,
    session::{Phase, SessionState},
    util::{centered_rect, format_remaining},
};

pub const BOX_WIDTH: u16 = 48;
pub const PLACEHOLDER: &str = "Enter your task name";

const TEXT_COLOR: Color = Color::Indexed(12);
const BORDER_COLOR: Color = Color::Indexed(228);
const PAUSED_FG: Color = Color::Indexed(13);
const PAUSED_BG: Color = Color::Indexed(235);

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub state: &'a SessionState,
    pub bindings: &'a KeyBindings,
    pub cursor_visible: bool,
}

impl<'a> View<'a> {
    pub fn new(state: &'a SessionState, bindings: &'a KeyBindings) -> Self {
        Self {
            state,
            bindings,
            cursor_visible: true,
        }
    }

    pub fn cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }
}

impl Widget for &View<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state.phase {
            Phase::NamingInput => render_naming(self, area, buf),
            Phase::Running | Phase::Paused | Phase::Finished => render_countdown(self, area, buf),
        }
    }
}

fn frame_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .padding(Padding::new(2, 2, 1, 1))
}

fn render_naming(view: &View, area: Rect, buf: &mut Buffer) {
    let text_style = Style::default().fg(TEXT_COLOR);
    let cursor_style = if view.cursor_visible {
        text_style.add_modifier(Modifier::REVERSED)
    } else {
        text_style
    };

    // borders + padding + label + blank + input
    let outer = centered_rect(BOX_WIDTH, 7, area);
    let block = frame_block();
    let inner = block.inner(outer);
    block.render(outer, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    Paragraph::new(Span::styled("Enter task name:", text_style)).render(rows[0], buf);

    let input = &view.state.input;
    let prompt = Span::styled("> ", text_style);
    let line = if input.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(" ", cursor_style),
            Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ),
        ])
    } else {
        let chars: Vec<char> = input.value().chars().collect();
        let before: String = chars[..input.cursor()].iter().collect();
        let at = chars
            .get(input.cursor())
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = chars
            .get(input.cursor() + 1..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();
        Line::from(vec![
            prompt,
            Span::styled(before, text_style),
            Span::styled(at, cursor_style),
            Span::styled(after, text_style),
        ])
    };

    // keep the cursor in view for names wider than the box
    let cursor_col = (input.cursor_column() + 2) as u16;
    let offset = cursor_col.saturating_sub(rows[2].width.saturating_sub(1));
    Paragraph::new(line)
        .scroll((0, offset))
        .render(rows[2], buf);
}

fn render_countdown(view: &View, area: Rect, buf: &mut Buffer) {
    let state = view.state;
    let text_style = Style::default().fg(TEXT_COLOR);
    let paused = state.phase == Phase::Paused;
    let finished = state.phase == Phase::Finished;

    let mut lines = vec![
        Line::from(Span::styled(format!("🍅 Task: {}", state.task_name), text_style)),
        Line::default(),
    ];

    if finished {
        lines.push(Line::from(Span::styled(
            "✅ Time's up!",
            text_style.add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("⏳ Time Left: {}", format_remaining(state.remaining)),
            text_style,
        )));
    }

    if paused {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(" ⏸ Paused, press [{}] to continue ", view.bindings.pause),
            Style::default()
                .fg(PAUSED_FG)
                .bg(PAUSED_BG)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::default());
    let controls = if finished {
        "Press any key to exit".to_string()
    } else {
        format!(
            "[{}] Start/Pause   [{}] Quit",
            view.bindings.pause,
            view.bindings.quit_label()
        )
    };
    lines.push(Line::from(Span::styled(
        controls,
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    )));

    // text lines + gauge + borders + padding
    let height = lines.len() as u16 + 2 + 2 + 2;
    let outer = centered_rect(BOX_WIDTH, height, area);
    let block = frame_block();
    let inner = block.inner(outer);
    block.render(outer, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(lines.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rows[0], buf);

    LineGauge::default()
        .filled_style(Style::default().fg(if paused { PAUSED_FG } else { TEXT_COLOR }))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .line_set(symbols::line::THICK)
        .label(format!("{:>3.0}%", state.progress() * 100.0))
        .ratio(state.progress())
        .render(rows[2], buf);
}
