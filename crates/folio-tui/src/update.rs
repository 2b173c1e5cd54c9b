//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use folio_core::contact::Field;
use folio_core::page::Extent;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::layout::{PageLayout, Section};
use crate::state::AppState;

/// Rows moved per mouse wheel notch.
pub const MOUSE_SCROLL_STEP: u16 = 3;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick { now } => {
            app.now = now;
            refresh_page(app);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::RoleText(text) => {
            app.typed = text;
            vec![]
        }
        UiEvent::ContactFinished { attempt, result } => {
            handle_contact_finished(app, attempt, result)
        }
        UiEvent::ContactReset { attempt } => {
            if app.submit.reset(attempt) {
                tracing::debug!(attempt, "Submit button reset");
            }
            vec![]
        }
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    if width != app.layout.width {
        app.layout = PageLayout::compute(&app.config, width);
    }
    app.width = width;
    app.height = height;
    app.scroll = app.scroll.min(app.max_scroll());
    refresh_page(app);
}

/// Recomputes the nav bar and reveals whatever is now in view.
pub fn refresh_page(app: &mut AppState) {
    let nav = app.spy().update(app.scroll, &app.layout.anchors());
    app.nav = nav;

    let viewport = Extent::new(app.scroll, app.page_height());
    let elements = app.layout.elements();
    let revealed = app
        .reveal
        .check(viewport, elements.iter().map(|(key, extent)| (key, *extent)));
    for (key, delay) in revealed {
        tracing::trace!(?key, ?delay, "Revealed");
        app.revealed.insert(key, app.now + delay);
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => {
            handle_mouse(app, mouse);
            vec![]
        }
        Event::Paste(text) => {
            if let Some(field) = app.focus {
                let text = text.replace(['\r', '\n'], " ");
                app.form.get_mut(field).push_str(&text);
                app.errors.clear(field);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => scroll_by(app, -i32::from(MOUSE_SCROLL_STEP)),
        MouseEventKind::ScrollDown => scroll_by(app, i32::from(MOUSE_SCROLL_STEP)),
        _ => {}
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    if handle_scroll_key(app, key.code) {
        return vec![];
    }
    if app.menu_open {
        return handle_menu_key(app, key.code);
    }
    if let Some(field) = app.focus {
        return handle_form_key(app, field, key);
    }

    match key.code {
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Char('t') if app.nav.show_back_to_top => scroll_to(app, 0),
        KeyCode::Char('m') => app.menu_open = true,
        KeyCode::Char('k') => scroll_by(app, -1),
        KeyCode::Char('j') => scroll_by(app, 1),
        KeyCode::Tab | KeyCode::Char('c') => focus_field(app, Field::Name),
        KeyCode::Char(c) => {
            if let Some(section) = Section::from_digit(c) {
                jump_to(app, section);
            }
        }
        _ => {}
    }
    vec![]
}

/// Handles keys that scroll in every mode. Returns true if `code` was one.
fn handle_scroll_key(app: &mut AppState, code: KeyCode) -> bool {
    let page = i32::from(app.page_height().saturating_sub(1).max(1));
    match code {
        KeyCode::Up => scroll_by(app, -1),
        KeyCode::Down => scroll_by(app, 1),
        KeyCode::PageUp => scroll_by(app, -page),
        KeyCode::PageDown => scroll_by(app, page),
        KeyCode::Home if app.focus.is_none() => scroll_to(app, 0),
        KeyCode::End if app.focus.is_none() => scroll_to(app, app.max_scroll()),
        _ => return false,
    }
    true
}

fn handle_menu_key(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
    match code {
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Esc | KeyCode::Char('m') => app.menu_open = false,
        KeyCode::Char(c) => {
            if let Some(section) = Section::from_digit(c) {
                jump_to(app, section);
            }
        }
        _ => {}
    }
    vec![]
}

fn handle_form_key(app: &mut AppState, field: Field, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => app.focus = None,
        KeyCode::Tab => app.focus = Some(field.next()),
        KeyCode::BackTab => app.focus = Some(field.prev()),
        KeyCode::Enter if field == Field::Message => return submit(app),
        KeyCode::Enter => app.focus = Some(field.next()),
        KeyCode::Backspace => {
            if app.form.get_mut(field).pop().is_some() {
                app.errors.clear(field);
            }
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.form.get_mut(field).push(c);
            app.errors.clear(field);
        }
        _ => {}
    }
    vec![]
}

fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if app.submit.status().is_sending() {
        return vec![];
    }
    match app.form.validate() {
        Err(errors) => {
            tracing::debug!(count = errors.len(), "Contact form has errors");
            app.focus = errors.first().map(|e| e.field).or(app.focus);
            app.errors.set(errors);
            vec![]
        }
        Ok(contact) => {
            app.errors.clear_all();
            app.submit
                .begin()
                .map(|attempt| vec![UiEffect::SubmitContact { attempt, contact }])
                .unwrap_or_default()
        }
    }
}

fn handle_contact_finished(
    app: &mut AppState,
    attempt: u64,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    let sent = result.is_ok();
    if !app.submit.finish(attempt, result) {
        return vec![];
    }
    if sent {
        app.form.clear();
        app.errors.clear_all();
    }
    vec![UiEffect::ScheduleContactReset {
        attempt,
        after: app.config.contact.reset_after(),
    }]
}

fn focus_field(app: &mut AppState, field: Field) {
    app.focus = Some(field);
    jump_to(app, Section::Contact);
}

fn jump_to(app: &mut AppState, section: Section) {
    app.menu_open = false;
    let top = app.layout.section(section).top;
    scroll_to(app, top);
}

fn scroll_to(app: &mut AppState, offset: u16) {
    app.scroll = offset.min(app.max_scroll());
    refresh_page(app);
}

fn scroll_by(app: &mut AppState, delta: i32) {
    let target = (i32::from(app.scroll) + delta).clamp(0, i32::from(u16::MAX));
    scroll_to(app, target as u16);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use folio_core::config::Config;
    use folio_core::contact::SubmitStatus;

    use super::*;
    use crate::layout::RevealKey;

    fn app(width: u16, height: u16) -> AppState {
        let mut app = AppState::new(Config::default(), Instant::now());
        update(&mut app, UiEvent::Frame { width, height });
        app
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fill_valid_form(app: &mut AppState) {
        press(app, KeyCode::Char('c'));
        type_text(app, "Ada");
        press(app, KeyCode::Tab);
        type_text(app, "ada@example.com");
        press(app, KeyCode::Tab);
        type_text(app, "Hello");
        press(app, KeyCode::Tab);
        type_text(app, "Lovely portfolio!");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(80, 24);
        assert!(matches!(press(&mut app, KeyCode::Char('q'))[..], [UiEffect::Quit]));

        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects[..], [UiEffect::Quit]));
    }

    #[test]
    fn test_scroll_is_clamped_and_drives_nav() {
        let mut app = app(80, 12);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.scroll, 0);
        assert!(!app.nav.scrolled);

        press(&mut app, KeyCode::End);
        assert_eq!(app.scroll, app.max_scroll());
        assert!(app.nav.scrolled);
        assert!(app.nav.show_back_to_top);
        assert_eq!(app.active_section(), Some(Section::Contact));

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll, app.max_scroll());

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.scroll, 0);
        assert_eq!(app.active_section(), Some(Section::Home));
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = app(80, 12);
        let wheel = |kind| {
            UiEvent::Terminal(Event::Mouse(MouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            }))
        };
        update(&mut app, wheel(MouseEventKind::ScrollDown));
        assert_eq!(app.scroll, MOUSE_SCROLL_STEP);
        update(&mut app, wheel(MouseEventKind::ScrollUp));
        update(&mut app, wheel(MouseEventKind::ScrollUp));
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_digit_jumps_to_section() {
        let mut app = app(80, 12);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.scroll, app.layout.section(Section::Skills).top);
        assert_eq!(app.active_section(), Some(Section::Skills));
    }

    #[test]
    fn test_menu_toggles_and_closes_on_pick() {
        let mut app = app(40, 12);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.menu_open);
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.menu_open);

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('2'));
        assert!(!app.menu_open);
        assert_eq!(app.active_section(), Some(Section::About));
    }

    #[test]
    fn test_typing_edits_focused_field_and_clears_its_error() {
        let mut app = app(80, 12);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Some(Field::Name));
        assert_eq!(app.active_section(), Some(Section::Contact));

        // Jump to message and submit an empty form.
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Some(Field::Message));
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(app.focus, Some(Field::Name));
        assert!(app.errors.get(Field::Name).is_some());
        assert!(app.errors.get(Field::Email).is_some());

        type_text(&mut app, "qA");
        assert_eq!(app.form.name, "qA");
        assert_eq!(app.errors.get(Field::Name), None);
        assert!(app.errors.get(Field::Email).is_some());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.name, "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, None);
    }

    #[test]
    fn test_valid_submit_emits_effect_once() {
        let mut app = app(80, 24);
        fill_valid_form(&mut app);

        let effects = press(&mut app, KeyCode::Enter);
        let [UiEffect::SubmitContact { attempt, contact }] = &effects[..] else {
            panic!("expected SubmitContact, got {effects:?}");
        };
        assert_eq!(*attempt, 1);
        assert_eq!(contact.email(), "ada@example.com");
        assert_eq!(app.submit.status(), &SubmitStatus::Sending);

        // Ignored while sending.
        assert!(press(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn test_success_clears_form_and_schedules_reset() {
        let mut app = app(80, 24);
        fill_valid_form(&mut app);
        press(&mut app, KeyCode::Enter);

        let effects = update(
            &mut app,
            UiEvent::ContactFinished {
                attempt: 1,
                result: Ok(()),
            },
        );
        assert!(matches!(
            effects[..],
            [UiEffect::ScheduleContactReset { attempt: 1, after }] if after == Duration::from_secs(5)
        ));
        assert_eq!(app.submit.status(), &SubmitStatus::Sent);
        assert!(app.form.name.is_empty());
        assert!(app.form.message.is_empty());

        update(&mut app, UiEvent::ContactReset { attempt: 1 });
        assert_eq!(app.submit.status(), &SubmitStatus::Idle);
    }

    #[test]
    fn test_failure_keeps_form() {
        let mut app = app(80, 24);
        fill_valid_form(&mut app);
        press(&mut app, KeyCode::Enter);

        let effects = update(
            &mut app,
            UiEvent::ContactFinished {
                attempt: 1,
                result: Err("HTTP 500".to_string()),
            },
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(app.submit.status(), &SubmitStatus::Failed("HTTP 500".to_string()));
        assert_eq!(app.form.name, "Ada");

        // A stale completion is ignored.
        let effects = update(
            &mut app,
            UiEvent::ContactFinished {
                attempt: 7,
                result: Ok(()),
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = app(80, 12);
        update(&mut app, UiEvent::Terminal(Event::Paste("ignored".to_string())));
        assert!(app.form.message.is_empty());

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::BackTab);
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("line one\nline two".to_string())),
        );
        assert_eq!(app.form.message, "line one line two");
    }

    #[test]
    fn test_role_text_updates_hero() {
        let mut app = app(80, 24);
        update(&mut app, UiEvent::RoleText("Full St".to_string()));
        assert_eq!(app.typed, "Full St");
    }

    #[test]
    fn test_stats_count_up_once_about_is_in_view() {
        let start = Instant::now();
        let mut app = AppState::new(Config::default(), start);
        update(&mut app, UiEvent::Frame { width: 80, height: 10 });
        assert!(app.is_visible(RevealKey::Section(Section::Home)));
        assert!(!app.revealed.contains_key(&RevealKey::Stats));

        press(&mut app, KeyCode::Char('2'));
        assert!(app.revealed.contains_key(&RevealKey::Stats));
        assert_eq!(app.stat_value(0), 0);

        update(
            &mut app,
            UiEvent::Tick {
                now: start + Duration::from_millis(750),
            },
        );
        // 15 * ease_out_cubic(0.5) = 13.125
        assert_eq!(app.stat_value(0), 13);

        update(
            &mut app,
            UiEvent::Tick {
                now: start + Duration::from_secs(2),
            },
        );
        assert_eq!(app.stat_value(0), 15);
    }

    #[test]
    fn test_resize_recomputes_layout_and_clamps_scroll() {
        let mut app = app(80, 12);
        press(&mut app, KeyCode::End);
        update(&mut app, UiEvent::Frame { width: 80, height: 200 });
        assert_eq!(app.scroll, 0);

        update(&mut app, UiEvent::Frame { width: 30, height: 200 });
        assert_eq!(app.layout.width, 30);
    }
}
