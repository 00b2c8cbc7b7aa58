// Pointer-event scripts: a line-oriented stand-in for a real gesture source.
//
//   frame X Y W H      canvas placement in window coordinates
//   move COLOR X Y     drag a swatch (palette index or #RRGGBB) to X Y
//   release X Y        let go of the swatch
//   mute on|off
//   reset
//   print              write the current tiles to the output

use std::io::Write;

use crate::canvas::gesture::GestureRouter;
use crate::canvas::CanvasController;
use crate::config::palette::{Color, Palette};
use crate::geometry::{Point, Rect};

/// One scripted event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Frame(Rect),
    Move { color: Color, at: Point },
    Release(Point),
    Mute(bool),
    Reset,
    Print,
}

/// A script line that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str, palette: &Palette) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let text = strip_trailing_comment(text);
        let command = parse_line(text, palette).map_err(|message| ScriptError {
            line: i + 1,
            message,
        })?;
        commands.push(command);
    }
    Ok(commands)
}

/// Drop a trailing comment. Hex colors also start with '#', so only a '#'
/// followed by whitespace or the end of the line opens a comment.
fn strip_trailing_comment(line: &str) -> &str {
    let mut end = line.len();
    for (idx, _) in line.match_indices('#') {
        let next = line[idx + 1..].chars().next();
        if next.map_or(true, char::is_whitespace) {
            end = idx;
            break;
        }
    }
    line[..end].trim()
}

fn parse_line(text: &str, palette: &Palette) -> Result<Command, String> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    match verb {
        "frame" => {
            let [x, y, w, h] = numbers::<4>(&args)?;
            Ok(Command::Frame(Rect::new(x, y, w, h)))
        }
        "move" => {
            let (color, rest) = args
                .split_first()
                .ok_or_else(|| "move needs COLOR X Y".to_string())?;
            let color = parse_color(color, palette)?;
            let [x, y] = numbers::<2>(rest)?;
            Ok(Command::Move {
                color,
                at: Point::new(x, y),
            })
        }
        "release" => {
            let [x, y] = numbers::<2>(&args)?;
            Ok(Command::Release(Point::new(x, y)))
        }
        "mute" => match args.as_slice() {
            ["on"] => Ok(Command::Mute(true)),
            ["off"] => Ok(Command::Mute(false)),
            _ => Err("mute takes 'on' or 'off'".to_string()),
        },
        "reset" if args.is_empty() => Ok(Command::Reset),
        "print" if args.is_empty() => Ok(Command::Print),
        "reset" | "print" => Err(format!("{verb} takes no arguments")),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn numbers<const N: usize>(args: &[&str]) -> Result<[f32; N], String> {
    if args.len() != N {
        return Err(format!("expected {N} numbers, got {}", args.len()));
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        let value: f32 = arg.parse().map_err(|_| format!("'{arg}' is not a number"))?;
        if !value.is_finite() {
            return Err(format!("'{arg}' is not finite"));
        }
        *slot = value;
    }
    Ok(out)
}

fn parse_color(word: &str, palette: &Palette) -> Result<Color, String> {
    if word.starts_with('#') {
        return Color::from_hex(word).ok_or_else(|| format!("invalid color '{word}'"));
    }
    let index: usize = word
        .parse()
        .map_err(|_| format!("'{word}' is neither a palette index nor #RRGGBB"))?;
    palette
        .get(index)
        .ok_or_else(|| format!("palette has no swatch {index}"))
}

/// Feed `commands` through `router` into `controller`, writing `print`
/// output to `out`.
pub fn replay(
    commands: &[Command],
    router: &mut GestureRouter,
    controller: &mut CanvasController,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let mut held: Option<Color> = None;
    for command in commands {
        match command {
            Command::Frame(frame) => router.set_frame(controller, *frame),
            Command::Move { color, at } => {
                held = Some(*color);
                router.drag_moved(controller, *color, *at);
            }
            Command::Release(at) => {
                if held.take().is_some() {
                    router.drag_released(controller, *at);
                } else {
                    log::debug!("Release without a held swatch ignored");
                }
            }
            Command::Mute(muted) => controller.set_mute(*muted),
            Command::Reset => controller.reset(),
            Command::Print => write!(out, "{}", format_tiles(controller))?,
        }
    }
    Ok(())
}

/// Human-readable listing of the committed tiles and the live preview.
pub fn format_tiles(controller: &CanvasController) -> String {
    if controller.is_empty() && controller.current_preview_tile().is_none() {
        return "(empty canvas)\n".to_string();
    }
    let mut text = String::new();
    for (i, tile) in controller.current_tiles().iter().enumerate() {
        let r = tile.rect;
        text.push_str(&format!(
            "{i:>3} {} {:.1} {:.1} {:.1}x{:.1}\n",
            tile.color.to_hex(),
            r.x,
            r.y,
            r.width,
            r.height
        ));
    }
    if let Some(preview) = controller.current_preview_tile() {
        let r = preview.rect;
        text.push_str(&format!(
            "  * {} {:.1} {:.1} {:.1}x{:.1} (preview)\n",
            preview.color.to_hex(),
            r.x,
            r.y,
            r.width,
            r.height
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Parsing ──────────────────────────────────────────────────────

    #[test]
    fn parse_every_command() {
        let source = "\
# a comment
frame 0 0 800 800

move 0 400 400
move #FF0000 410 400   # trailing comment
release 410 400
mute on
mute off
reset
print
";
        let commands = parse_script(source, &Palette::default()).unwrap();
        assert_eq!(commands.len(), 8);
        assert_eq!(commands[0], Command::Frame(Rect::new(0.0, 0.0, 800.0, 800.0)));
        assert_eq!(
            commands[1],
            Command::Move {
                color: Palette::default().get(0).unwrap(),
                at: Point::new(400.0, 400.0),
            }
        );
        assert_eq!(
            commands[2],
            Command::Move {
                color: Color::new(1.0, 0.0, 0.0, 1.0),
                at: Point::new(410.0, 400.0),
            }
        );
        assert_eq!(commands[3], Command::Release(Point::new(410.0, 400.0)));
        assert_eq!(commands[4], Command::Mute(true));
        assert_eq!(commands[5], Command::Mute(false));
        assert_eq!(commands[6], Command::Reset);
        assert_eq!(commands[7], Command::Print);
    }

    #[test]
    fn unknown_command_reports_line_number() {
        let err = parse_script("reset\njump 1 2\n", &Palette::default()).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("jump"));
        assert!(format!("{err}").starts_with("line 2:"));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(parse_script("frame 0 0 800", &Palette::default()).is_err());
        assert!(parse_script("release 1", &Palette::default()).is_err());
        assert!(parse_script("reset now", &Palette::default()).is_err());
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        let err = parse_script("release x 1", &Palette::default()).unwrap_err();
        assert!(err.message.contains("'x'"));
        assert!(parse_script("release NaN 1", &Palette::default()).is_err());
    }

    #[test]
    fn palette_index_out_of_range_is_rejected() {
        let err = parse_script("move 9 1 1", &Palette::default()).unwrap_err();
        assert!(err.message.contains("swatch 9"));
    }

    // ── Replay ───────────────────────────────────────────────────────

    fn run(source: &str) -> (CanvasController, String) {
        let commands = parse_script(source, &Palette::default()).unwrap();
        let mut controller = CanvasController::default();
        let mut router = GestureRouter::new();
        let mut out = Vec::new();
        replay(&commands, &mut router, &mut controller, &mut out).unwrap();
        (controller, String::from_utf8(out).unwrap())
    }

    #[test]
    fn replay_two_drops_side_by_side() {
        let (controller, out) = run("\
frame 0 0 800 800
move 0 400 400
release 400 400
move 1 700 400
move 1 700 400
release 700 400
print
");
        assert_eq!(controller.current_tiles().len(), 2);
        assert_eq!(out, "  0 #3F7FE0 0.0 0.0 400.0x800.0\n  1 #F06C9B 400.0 0.0 400.0x800.0\n");
    }

    #[test]
    fn replay_move_outside_discards_preview() {
        let (controller, _) = run("\
frame 0 0 800 800
move 0 400 400
release 400 400
move 1 700 400
move 1 700 400
move 1 900 400
release 900 400
");
        assert_eq!(controller.current_tiles().len(), 1);
        assert!(controller.current_preview_tile().is_none());
    }

    #[test]
    fn replay_reset_prints_empty_canvas() {
        let (controller, out) = run("\
frame 0 0 800 800
move 0 400 400
release 400 400
reset
print
");
        assert!(controller.is_empty());
        assert_eq!(out, "(empty canvas)\n");
    }

    #[test]
    fn release_without_move_is_ignored() {
        let (controller, _) = run("frame 0 0 800 800\nrelease 10 10\n");
        assert!(controller.is_empty());
    }
}
