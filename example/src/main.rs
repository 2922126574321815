// Terminal host for the on-screen keyboard. Click keys with the mouse or type
// on the physical keyboard; F2 switches layout, F3 switches theme and Esc
// quits. Pass `desktop`, `mobile` or `assistive` to pick a variant.
//
// Terminals only report the Caps Lock key itself when they speak the kitty
// keyboard protocol. Elsewhere only the on-screen Caps key toggles shift.
//
// The feature flag `stdio` sends tracing output to stderr. Useful mostly for
// debugging, with stderr redirected to a file.

use ::crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode as TermKey, KeyEvent,
        KeyEventKind, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ::softkeys::{
    assist::{SpeechRecognizer, SpeechSynthesizer, VoiceConfig},
    errors::Result as KbdResult,
    input::keyboard::{InputEvent, KeyCode},
    layout::{KeyMetrics, Rect},
    screen::{Builder, EventSender, Scene, Screen},
    theme::Rgb,
    Variant,
};
use ::std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};
use ::tracing::info;

/// One key is three cells wide and a single row tall.
const CELL_METRICS: KeyMetrics = KeyMetrics {
    key_width: 3.0,
    key_height: 1.0,
    spacing: 1.0,
    top_margin: 4.0,
    space_width: 17.0,
    control_width: 7.0,
    assist_width: 7.0,
};

/// Pretends to listen for a moment, then replies from another thread.
struct CannedRecognizer;

impl SpeechRecognizer for CannedRecognizer {
    fn start_listening(&mut self, locale: &str, reply: EventSender) -> KbdResult<()> {
        info!(locale, "Listening");
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(800));
            reply.transcript(" hello from the terminal");
        });
        Ok(())
    }
}

/// Reads aloud into the log.
struct LoggingSynthesizer;

impl SpeechSynthesizer for LoggingSynthesizer {
    fn speak(&mut self, text: &str, voice: &VoiceConfig) -> KbdResult<()> {
        info!(text, language = %voice.language, "Speaking");
        Ok(())
    }
}

#[cfg(feature = "stdio")]
fn init_logging() {
    use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

    ::tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

#[cfg(not(feature = "stdio"))]
fn init_logging() {}

pub fn main() -> io::Result<()> {
    init_logging();

    let variant = match ::std::env::args().nth(1).as_deref() {
        Some("mobile") => Variant::Mobile,
        Some("assistive") => Variant::MobileAssistive,
        _ => Variant::Desktop,
    };
    let (width, _) = terminal::size()?;

    let mut screen = Builder::new()
        .with_variant(variant)
        .with_metrics(CELL_METRICS)
        .with_viewport_width(f32::from(width))
        .with_appearance_hint(::std::env::var("SOFTKEYS_THEME").unwrap_or_default())
        .with_recognizer(CannedRecognizer)
        .with_synthesizer(LoggingSynthesizer)
        .build()
        .expect("Failed to create keyboard");

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    // Lock keys are only reported as escape codes of their own.
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            out,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    info!(enhanced, "Keyboard protocol negotiated");

    let result = run(&mut screen, &mut out);

    if enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    println!("{}", screen.keyboard().current_text());
    result
}

/// Pumps events and redraws until Esc is pressed. Poll timeouts double as the
/// cursor blink clock.
fn run(screen: &mut Screen, out: &mut impl Write) -> io::Result<()> {
    let mut last = Instant::now();

    loop {
        screen.pump();
        draw(out, &screen.scene())?;

        if event::poll(screen.cursor().until_next_toggle())? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code: TermKey::Esc,
                    kind: KeyEventKind::Press,
                    ..
                }) => return Ok(()),
                Event::Key(KeyEvent {
                    code: TermKey::F(2),
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    let layouts = screen.keyboard().layouts();
                    let next = (layouts.active_index() + 1) % layouts.len();
                    screen.keyboard_mut().select_layout(next);
                }
                Event::Key(KeyEvent {
                    code: TermKey::F(3),
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    screen.themes_mut().cycle();
                }
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    screen.dismiss_notice();
                    screen.handle(InputEvent::PhysicalKey {
                        code: key_code(code),
                    });
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    screen.dismiss_notice();
                    // Aim for the middle of the cell.
                    screen.handle(InputEvent::Pointer {
                        x: f32::from(column) + 0.5,
                        y: f32::from(row) + 0.5,
                    });
                }
                Event::Resize(width, _) => screen.set_viewport_width(f32::from(width)),
                _ => {}
            }
        }

        let now = Instant::now();
        screen.tick(now - last);
        last = now;
    }
}

fn key_code(code: TermKey) -> KeyCode {
    match code {
        TermKey::Backspace => KeyCode::Backspace,
        TermKey::Char(' ') => KeyCode::Space,
        TermKey::Char(c) => KeyCode::Char(c),
        TermKey::CapsLock => KeyCode::CapsLock,
        TermKey::Enter => KeyCode::Enter,
        TermKey::Tab => KeyCode::Tab,
        TermKey::Left => KeyCode::Left,
        TermKey::Right => KeyCode::Right,
        TermKey::Up => KeyCode::Up,
        TermKey::Down => KeyCode::Down,
        _ => KeyCode::Other,
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Terminal cells whose centres lie inside `rect`, i.e. exactly the cells a
/// click resolves to this key.
fn cells(rect: Rect) -> impl Iterator<Item = (u16, u16)> {
    let (x0, x1) = (rect.x.floor().max(0.0) as u16, rect.right().ceil() as u16);
    let (y0, y1) = (rect.y.floor().max(0.0) as u16, rect.bottom().ceil() as u16);

    (y0..y1)
        .flat_map(move |y| (x0..x1).map(move |x| (x, y)))
        .filter(move |&(x, y)| rect.contains(f32::from(x) + 0.5, f32::from(y) + 0.5))
}

fn draw(out: &mut impl Write, scene: &Scene) -> io::Result<()> {
    let palette = scene.palette;
    queue!(
        out,
        SetBackgroundColor(color(palette.background)),
        SetForegroundColor(color(palette.text)),
        Clear(ClearType::All),
        MoveTo(1, 0),
        Print(format!("Theme: {}   ", scene.theme)),
    )?;

    if scene.layouts.len() > 1 {
        for (i, name) in scene.layouts.iter().enumerate() {
            let shown = if i == scene.active_layout {
                format!("[{name}] ")
            } else {
                format!(" {name}  ")
            };
            queue!(out, Print(shown))?;
        }
        queue!(out, Print("(F2)"))?;
    }

    // Raw mode needs explicit carriage returns.
    let text = scene.display_text().replace('\n', "\r\n ");
    queue!(out, MoveTo(1, 1), Print(text))?;

    if let Some(notice) = &scene.notice {
        queue!(out, MoveTo(1, 2), Print(format!("! {notice}")))?;
    }

    for face in &scene.keys {
        let cells: Vec<_> = cells(face.rect).collect();
        let Some(&(first, row)) = cells.first() else {
            continue;
        };
        let width = cells.iter().filter(|&&(_, y)| y == row).count();

        let caption: String = face.caption.chars().take(width).collect();
        queue!(
            out,
            SetBackgroundColor(color(face.fill)),
            SetForegroundColor(color(face.ink)),
            MoveTo(first, row),
            Print(format!("{caption:^width$}")),
        )?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    /// Keys reported under the kitty protocol reach the keyboard like any
    /// other.
    #[test]
    fn test_key_code() {
        assert_eq!(key_code(TermKey::CapsLock), KeyCode::CapsLock);
        assert_eq!(key_code(TermKey::Char(' ')), KeyCode::Space);
        assert_eq!(key_code(TermKey::Char('q')), KeyCode::Char('q'));
        assert_eq!(key_code(TermKey::Backspace), KeyCode::Backspace);
        assert_eq!(key_code(TermKey::F(5)), KeyCode::Other);
    }
}
