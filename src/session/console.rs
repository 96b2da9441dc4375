//! Line-oriented command language used by `fplot run`.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{PlotError, PlotResult};
use crate::session::events::InputEvent;
use crate::transform::viewport::ZoomDirection;

pub const HELP: &str = "\
commands:
  f <expr>            define f(x) (any other line is also taken as a definition)
  pan <dx> <dy>       drag the view by (dx, dy) screen pixels
  zoom in|out [x y]   zoom one step at the pointer, or at (x, y)
  move <x> <y>        move the pointer
  reset               reset pan and zoom
  render              present the current frame
  status              print function and view state
  help                print this text
  quit                end the session";

#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleCommand {
    Define(String),
    Pan { dx: f64, dy: f64 },
    Zoom { direction: ZoomDirection, at: Option<Point> },
    Move { x: f64, y: f64 },
    Reset,
    Render,
    Status,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Input events equivalent to this command, given the current pointer position.
    ///
    /// `Render`, `Status` and `Help` produce no events; drivers act on them directly.
    pub fn into_events(self, pointer: Point) -> Vec<InputEvent> {
        match self {
            Self::Define(src) => vec![InputEvent::Submit(src)],
            Self::Pan { dx, dy } => {
                let to = pointer + Vec2::new(dx, dy);
                vec![
                    InputEvent::PointerPressed,
                    InputEvent::pointer_moved(to.x, to.y),
                    InputEvent::PointerReleased,
                    InputEvent::pointer_moved(pointer.x, pointer.y),
                ]
            }
            Self::Zoom { direction, at } => {
                let mut events = Vec::with_capacity(2);
                if let Some(p) = at {
                    events.push(InputEvent::pointer_moved(p.x, p.y));
                }
                events.push(InputEvent::Wheel(direction));
                events
            }
            Self::Move { x, y } => vec![InputEvent::pointer_moved(x, y)],
            Self::Reset => vec![InputEvent::ResetView],
            Self::Quit => vec![InputEvent::Quit],
            Self::Render | Self::Status | Self::Help => Vec::new(),
        }
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> PlotResult<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let cmd = match head {
        "f" | "def" if !rest.is_empty() => ConsoleCommand::Define(rest.to_owned()),
        "pan" => {
            let [dx, dy] = numbers::<2>(head, &args)?;
            ConsoleCommand::Pan { dx, dy }
        }
        "zoom" => parse_zoom(&args)?,
        "move" => {
            let [x, y] = numbers::<2>(head, &args)?;
            ConsoleCommand::Move { x, y }
        }
        "reset" if args.is_empty() => ConsoleCommand::Reset,
        "render" if args.is_empty() => ConsoleCommand::Render,
        "status" if args.is_empty() => ConsoleCommand::Status,
        "help" if args.is_empty() => ConsoleCommand::Help,
        "quit" | "exit" if args.is_empty() => ConsoleCommand::Quit,
        _ => ConsoleCommand::Define(line.to_owned()),
    };
    Ok(Some(cmd))
}

fn parse_zoom(args: &[&str]) -> PlotResult<ConsoleCommand> {
    let Some((dir, at)) = args.split_first() else {
        return Err(PlotError::validation("zoom expects 'in' or 'out'"));
    };
    let direction = match *dir {
        "in" | "+" => ZoomDirection::In,
        "out" | "-" => ZoomDirection::Out,
        other => {
            return Err(PlotError::validation(format!(
                "zoom expects 'in' or 'out', got '{other}'"
            )));
        }
    };
    let at = match at.len() {
        0 => None,
        _ => {
            let [x, y] = numbers::<2>("zoom", at)?;
            Some(Point::new(x, y))
        }
    };
    Ok(ConsoleCommand::Zoom { direction, at })
}

fn numbers<const N: usize>(cmd: &str, args: &[&str]) -> PlotResult<[f64; N]> {
    if args.len() != N {
        return Err(PlotError::validation(format!(
            "{cmd} expects {N} numbers, got {} argument(s)",
            args.len()
        )));
    }
    let mut out = [0.0; N];
    for (slot, a) in out.iter_mut().zip(args) {
        *slot = a
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PlotError::validation(format!("{cmd}: '{a}' is not a finite number")))?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/session/console.rs"]
mod tests;
