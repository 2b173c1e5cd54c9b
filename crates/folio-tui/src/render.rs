//! Pure view functions. Nothing here mutates state or returns effects.

use folio_core::contact::{Field, SubmitStatus};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::{MARGIN, NAV_HEIGHT, RevealKey, Section};
use crate::state::{AppState, SKILL_FILL_DURATION};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const CURSOR: &str = "▌";
const SKILL_BAR_MAX_WIDTH: u16 = 40;
const BACK_TO_TOP: &str = " ↑ top (t) ";

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    if area.height == 0 {
        return;
    }

    let nav_area = Rect::new(area.x, area.y, area.width, NAV_HEIGHT.min(area.height));
    let page_area = Rect::new(
        area.x,
        area.y + nav_area.height,
        area.width,
        area.height - nav_area.height,
    );

    let page = Paragraph::new(document(app)).scroll((app.scroll, 0));
    frame.render_widget(page, page_area);
    frame.render_widget(nav_bar(app, area.width), nav_area);

    if app.nav.show_back_to_top && page_area.height > 0 {
        let width = (BACK_TO_TOP.width() as u16).min(page_area.width);
        let hint = Rect::new(
            page_area.right().saturating_sub(width),
            page_area.bottom() - 1,
            width,
            1,
        );
        frame.render_widget(
            Paragraph::new(BACK_TO_TOP).style(Style::default().fg(Color::Black).bg(ACCENT)),
            hint,
        );
    }

    if app.menu_open {
        render_menu(app, frame, page_area);
    }
}

/// Width needed to show every nav link inline.
pub fn full_nav_width(app: &AppState) -> u16 {
    let links: usize = Section::ALL.iter().map(|s| s.title().width() + 3).sum();
    (app.config.name.width() + links) as u16 + MARGIN * 2
}

fn nav_bar(app: &AppState, width: u16) -> Paragraph<'static> {
    let base = if app.nav.scrolled {
        Style::default().bg(Color::Rgb(24, 24, 36))
    } else {
        Style::default()
    };
    let active = app.active_section();

    let mut spans = vec![
        Span::raw(" ".repeat(usize::from(MARGIN))),
        Span::styled(
            app.config.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ];

    if width >= full_nav_width(app) {
        for (i, section) in Section::ALL.into_iter().enumerate() {
            let style = if Some(section) == active {
                Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("  {}", i + 1), Style::default().fg(MUTED)));
            spans.push(Span::styled(section.title(), style));
        }
    } else {
        let icon = if app.menu_open { "  ✕ menu" } else { "  ☰ menu" };
        spans.push(Span::styled(icon, Style::default().fg(MUTED)));
    }

    Paragraph::new(Line::from(spans)).style(base)
}

fn render_menu(app: &AppState, frame: &mut Frame, page_area: Rect) {
    let active = app.active_section();
    let lines: Vec<Line> = Section::ALL
        .into_iter()
        .enumerate()
        .map(|(i, section)| {
            let style = if Some(section) == active {
                Style::default().fg(ACCENT)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(MUTED)),
                Span::styled(section.title(), style),
            ])
        })
        .collect();

    let width = 16.min(page_area.width);
    let height = (lines.len() as u16 + 2).min(page_area.height);
    let area = Rect::new(page_area.right() - width, page_area.y, width, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" menu ")),
        area,
    );
}

/// The whole page, one line per row of the layout.
pub fn document(app: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(usize::from(app.layout.total_height));
    for (section, extent) in &app.layout.sections {
        let mut section_lines = match section {
            Section::Home => hero(app),
            Section::About => about(app),
            Section::Skills => skills(app),
            Section::Contact => contact(app),
        };
        section_lines.resize(usize::from(extent.height), Line::default());
        lines.extend(section_lines);
    }
    lines
}

fn indent() -> Span<'static> {
    Span::raw(" ".repeat(usize::from(MARGIN)))
}

/// Content style for a section, dimmed until it has been revealed.
fn section_style(app: &AppState, section: Section) -> Style {
    if app.is_visible(RevealKey::Section(section)) {
        Style::default()
    } else {
        Style::default().fg(MUTED)
    }
}

fn title(app: &AppState, section: Section) -> Vec<Line<'static>> {
    let style = section_style(app, section)
        .add_modifier(Modifier::BOLD)
        .fg(if app.is_visible(RevealKey::Section(section)) {
            ACCENT
        } else {
            MUTED
        });
    vec![
        Line::from(vec![indent(), Span::styled(section.title().to_uppercase(), style)]),
        Line::default(),
    ]
}

fn hero(app: &AppState) -> Vec<Line<'static>> {
    let style = section_style(app, Section::Home);
    vec![
        Line::default(),
        Line::from(vec![indent(), Span::styled("Hi there, I'm", style.fg(MUTED))]),
        Line::from(vec![
            indent(),
            Span::styled(
                app.config.name.clone(),
                style.fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(vec![
            indent(),
            Span::styled(app.typed.clone(), style.add_modifier(Modifier::BOLD)),
            Span::styled(CURSOR, Style::default().fg(ACCENT)),
        ]),
        Line::default(),
        Line::from(vec![
            indent(),
            Span::styled(
                "↑/↓ scroll · 1-4 jump · m menu · c contact · q quit",
                Style::default().fg(MUTED),
            ),
        ]),
    ]
}

fn about(app: &AppState) -> Vec<Line<'static>> {
    let style = section_style(app, Section::About);
    let mut lines = title(app, Section::About);
    lines.extend(
        app.layout
            .bio
            .iter()
            .map(|l| Line::from(vec![indent(), Span::styled(l.clone(), style)])),
    );
    lines.push(Line::default());

    let inner = app.layout.width.saturating_sub(MARGIN * 2);
    let column = if app.stats.is_empty() {
        0
    } else {
        usize::from(inner) / app.stats.len()
    };
    let mut values = vec![indent()];
    let mut labels = vec![indent()];
    for (i, stat) in app.stats.iter().enumerate() {
        let card = if app.is_visible(RevealKey::StatCard(i)) {
            Style::default()
        } else {
            Style::default().fg(MUTED)
        };
        values.push(Span::styled(
            pad(&format!("{}+", app.stat_value(i)), column),
            card.fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        labels.push(Span::styled(pad(&stat.label, column), card));
    }
    lines.push(Line::from(values));
    lines.push(Line::from(labels));
    lines
}

fn skills(app: &AppState) -> Vec<Line<'static>> {
    let style = section_style(app, Section::Skills);
    let revealed_for = app.visible_for(RevealKey::Skills);
    let bar_width = app
        .layout
        .width
        .saturating_sub(MARGIN * 2)
        .min(SKILL_BAR_MAX_WIDTH);

    let mut lines = title(app, Section::Skills);
    for skill in &app.skills {
        let fill = skill.fill_at(revealed_for, SKILL_FILL_DURATION);
        lines.push(Line::from(vec![
            indent(),
            Span::styled(skill.name.clone(), style),
            Span::styled(format!("  {fill:.0}%"), Style::default().fg(MUTED)),
        ]));
        let filled = skill.filled_cells(bar_width, revealed_for, SKILL_FILL_DURATION);
        lines.push(Line::from(vec![
            indent(),
            Span::styled("█".repeat(usize::from(filled)), Style::default().fg(ACCENT)),
            Span::styled(
                "░".repeat(usize::from(bar_width.saturating_sub(filled))),
                Style::default().fg(MUTED),
            ),
        ]));
    }
    lines
}

fn contact(app: &AppState) -> Vec<Line<'static>> {
    let style = section_style(app, Section::Contact);
    let field_width = usize::from(app.layout.width.saturating_sub(MARGIN * 2 + 4).max(1));

    let mut lines = title(app, Section::Contact);
    for field in Field::ALL {
        let focused = app.focus == Some(field);
        let marker = if focused { "› " } else { "  " };
        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            style
        };
        lines.push(Line::from(vec![
            indent(),
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::styled(field.label(), label_style),
        ]));

        let value = tail(app.form.get(field), field_width.saturating_sub(1));
        let mut input = vec![indent(), Span::raw("  "), Span::raw(value)];
        if focused {
            input.push(Span::styled(CURSOR, Style::default().fg(ACCENT)));
        }
        lines.push(Line::from(input));

        lines.push(match app.errors.get(field) {
            Some(msg) => Line::from(vec![
                indent(),
                Span::raw("  "),
                Span::styled(msg, Style::default().fg(Color::Red)),
            ]),
            None => Line::default(),
        });
    }

    let status = app.submit.status();
    let button = match status {
        SubmitStatus::Idle => Style::default().fg(Color::Black).bg(ACCENT),
        SubmitStatus::Sending => Style::default().fg(Color::Black).bg(Color::Gray),
        SubmitStatus::Sent => Style::default().fg(Color::Black).bg(Color::Green),
        SubmitStatus::Failed(_) => Style::default().fg(Color::White).bg(Color::Red),
    };
    lines.push(Line::from(vec![
        indent(),
        Span::styled(format!(" {} ", status.label()), button),
    ]));

    let detail = match status {
        SubmitStatus::Sent => Span::styled(
            "Thanks! Your message has been sent.",
            Style::default().fg(Color::Green),
        ),
        SubmitStatus::Failed(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Red)),
        SubmitStatus::Sending => {
            Span::styled("Sending your message...", Style::default().fg(MUTED))
        }
        SubmitStatus::Idle if app.focus.is_some() => Span::styled(
            "Tab next field · Enter on message sends · Esc leave form",
            Style::default().fg(MUTED),
        ),
        SubmitStatus::Idle => Span::styled(
            "Press c or Tab to write a message",
            Style::default().fg(MUTED),
        ),
    };
    lines.push(Line::from(vec![indent(), detail]));
    lines
}

fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// The end of `text` that fits in `width` columns, so the cursor stays visible.
fn tail(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    text[start..].to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use folio_core::config::Config;
    use folio_core::contact::ContactForm;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::events::UiEvent;
    use crate::update::update;

    fn app(width: u16, height: u16) -> AppState {
        let mut app = AppState::new(Config::default(), Instant::now());
        update(&mut app, UiEvent::Frame { width, height });
        app
    }

    fn screen(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_document_matches_layout() {
        for width in [30, 80, 140] {
            let app = app(width, 24);
            assert_eq!(document(&app).len(), usize::from(app.layout.total_height));
        }
    }

    #[test]
    fn test_hero_shows_name_and_typed_text() {
        let mut app = app(80, 24);
        update(&mut app, UiEvent::RoleText("Full Stack".to_string()));
        let screen = screen(&app, 80, 24);
        assert!(screen.contains("Alex Dev"));
        assert!(screen.contains("Full Stack▌"));
        assert!(screen.contains("Home"));
    }

    #[test]
    fn test_narrow_nav_uses_menu() {
        let mut app = app(24, 12);
        assert!(screen(&app, 24, 12).contains("☰ menu"));

        app.menu_open = true;
        let screen = screen(&app, 24, 12);
        assert!(screen.contains("✕ menu"));
        assert!(screen.contains("4 Contact"));
    }

    #[test]
    fn test_errors_render_under_fields() {
        let mut app = app(80, 12);
        let errors = ContactForm::default().validate().unwrap_err();
        app.errors.set(errors);
        let text: Vec<String> = document(&app).iter().map(ToString::to_string).collect();
        assert!(text.iter().any(|l| l.contains("Please enter a valid email address.")));
        assert!(text.iter().any(|l| l.contains("Send Message")));
    }

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail("hello world", 5), "world");
        assert_eq!(tail("hi", 5), "hi");
        assert_eq!(tail("", 5), "");
    }
}
