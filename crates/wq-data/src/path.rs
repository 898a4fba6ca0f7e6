//! SVG path data parser
//!
//! Turns the `d` attribute of a region into closed outlines. Only the
//! vertices matter for a terminal map, so curves and arcs are reduced to
//! their end points.

use thiserror::Error;

use crate::geometry::{Outline, Point};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("command '{command}' is missing coordinates")]
    MissingNumber { command: char },

    #[error("path data must start with a moveto command")]
    NoMoveTo,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(d: &str) -> Result<Vec<Token>, PathError> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    // Arc flags may be packed without separators ("a1 1 0 01 8 2"), so the
    // scanner tracks the argument position inside the current command
    let mut command = ' ';
    let mut arg = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
        } else if "MmLlHhVvCcSsQqTtAaZz".contains(c) {
            tokens.push(Token::Command(c));
            command = c;
            arg = 0;
            i += 1;
        } else if command.eq_ignore_ascii_case(&'A') && matches!(arg % 7, 3 | 4) {
            let flag = match c {
                '0' => 0.0,
                '1' => 1.0,
                _ => {
                    let ch = d[i..].chars().next().unwrap_or(c);
                    return Err(PathError::UnexpectedChar { ch, offset: i });
                }
            };
            tokens.push(Token::Number(flag));
            arg += 1;
            i += 1;
        } else if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            let start = i;
            i += 1;
            let mut seen_dot = c == '.';
            let mut seen_exp = false;
            while i < bytes.len() {
                let n = bytes[i] as char;
                if n.is_ascii_digit() {
                    i += 1;
                } else if n == '.' && !seen_dot && !seen_exp {
                    // "1.5.5" is 1.5 followed by .5
                    seen_dot = true;
                    i += 1;
                } else if (n == 'e' || n == 'E') && !seen_exp {
                    let exp_at = i;
                    seen_exp = true;
                    i += 1;
                    if i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
                        i += 1;
                    }
                    // An exponent needs at least one digit
                    if !bytes.get(i).is_some_and(u8::is_ascii_digit) {
                        return Err(PathError::UnexpectedChar { ch: n, offset: exp_at });
                    }
                } else {
                    break;
                }
            }
            // Only a lone sign or dot fails here, and that is the first char
            let value = d[start..i].parse::<f64>().map_err(|_| PathError::UnexpectedChar {
                ch: c,
                offset: start,
            })?;
            tokens.push(Token::Number(value));
            arg += 1;
        } else {
            let ch = d[i..].chars().next().unwrap_or(c);
            return Err(PathError::UnexpectedChar { ch, offset: i });
        }
    }
    Ok(tokens)
}

/// Number of coordinates consumed per repetition of a command
fn arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

struct Builder {
    outlines: Vec<Outline>,
    current: Vec<Point>,
    pen: Point,
    start: Point,
}

impl Builder {
    fn finish_subpath(&mut self) {
        let points = std::mem::take(&mut self.current);
        if points.len() >= 2 {
            self.outlines.push(Outline::new(points));
        }
    }

    fn move_to(&mut self, p: Point) {
        self.finish_subpath();
        self.pen = p;
        self.start = p;
        self.current.push(p);
    }

    fn line_to(&mut self, p: Point) {
        self.pen = p;
        self.current.push(p);
    }

    fn close(&mut self) {
        self.finish_subpath();
        self.pen = self.start;
    }
}

/// Parse SVG path data into outlines.
///
/// Every subpath with at least two vertices becomes one outline, whether or
/// not it is explicitly closed.
pub fn parse_path(d: &str) -> Result<Vec<Outline>, PathError> {
    let tokens = tokenize(d)?;
    let mut b = Builder {
        outlines: Vec::new(),
        current: Vec::new(),
        pen: Point::new(0.0, 0.0),
        start: Point::new(0.0, 0.0),
    };

    let mut i = 0;
    let mut command: Option<char> = None;
    while i < tokens.len() {
        let cmd = match tokens[i] {
            Token::Command(c) => {
                i += 1;
                c
            }
            // Repeated coordinates reuse the previous command; a moveto
            // repeats as a lineto.
            Token::Number(_) => match command {
                Some('M') => 'L',
                Some('m') => 'l',
                Some(c) if arity(c) > 0 => c,
                Some(c) => return Err(PathError::MissingNumber { command: c }),
                None => return Err(PathError::NoMoveTo),
            },
        };
        if command.is_none() && !matches!(cmd, 'M' | 'm') {
            return Err(PathError::NoMoveTo);
        }
        command = Some(cmd);

        if matches!(cmd, 'Z' | 'z') {
            b.close();
            continue;
        }

        let n = arity(cmd);
        let mut args = [0.0; 7];
        for slot in args.iter_mut().take(n) {
            match tokens.get(i) {
                Some(Token::Number(v)) => {
                    *slot = *v;
                    i += 1;
                }
                _ => return Err(PathError::MissingNumber { command: cmd }),
            }
        }

        let relative = cmd.is_ascii_lowercase();
        let origin = if relative { b.pen } else { Point::new(0.0, 0.0) };
        let end = match cmd.to_ascii_uppercase() {
            'H' => Point::new(origin.x + args[0], b.pen.y),
            'V' => Point::new(b.pen.x, origin.y + args[0]),
            _ => Point::new(origin.x + args[n - 2], origin.y + args[n - 1]),
        };

        if cmd.eq_ignore_ascii_case(&'M') {
            b.move_to(end);
        } else {
            b.line_to(end);
        }
    }
    b.finish_subpath();
    Ok(b.outlines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(outline: &Outline) -> Vec<(f64, f64)> {
        outline.points.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_absolute_polygon() {
        let outlines = parse_path("M0,0 L10,0 L10,10 Z").unwrap();
        assert_eq!(outlines.len(), 1);
        assert_eq!(pts(&outlines[0]), vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn test_relative_with_implicit_lineto() {
        let outlines = parse_path("m10,10 5,0 0,5 -5,0 z").unwrap();
        assert_eq!(
            pts(&outlines[0]),
            vec![(10.0, 10.0), (15.0, 10.0), (15.0, 15.0), (10.0, 15.0)]
        );
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let outlines = parse_path("M1 1 H5 V4 h-2 v-1 Z").unwrap();
        assert_eq!(
            pts(&outlines[0]),
            vec![(1.0, 1.0), (5.0, 1.0), (5.0, 4.0), (3.0, 4.0), (3.0, 3.0)]
        );
    }

    #[test]
    fn test_multiple_subpaths() {
        let outlines = parse_path("M0 0 L1 0 L1 1 Z M5 5 L6 5 L6 6 Z").unwrap();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[1].points[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn test_relative_move_after_close_starts_from_subpath_start() {
        let outlines = parse_path("m1,1 l2,0 0,2 z m10,0 l1,0 0,1 z").unwrap();
        assert_eq!(outlines[1].points[0], Point::new(11.0, 1.0));
    }

    #[test]
    fn test_curves_keep_end_points() {
        let outlines = parse_path("M0 0 C1 1 2 2 3 0 Q4 4 6 0 A1 1 0 0 1 8 2 Z").unwrap();
        assert_eq!(
            pts(&outlines[0]),
            vec![(0.0, 0.0), (3.0, 0.0), (6.0, 0.0), (8.0, 2.0)]
        );
    }

    #[test]
    fn test_packed_arc_flags() {
        let outlines = parse_path("M0 0 a1 1 0 01 8 2 A1,1,0,1,0,3,3 Z").unwrap();
        assert_eq!(pts(&outlines[0]), vec![(0.0, 0.0), (8.0, 2.0), (3.0, 3.0)]);

        // Flags repeat with the arc arguments
        let outlines = parse_path("M0 0 a1 1 0 11 2 0 1 1 0 00 0 2").unwrap();
        assert_eq!(pts(&outlines[0]), vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_bad_arc_flag() {
        assert_eq!(
            parse_path("M0 0 A1 1 0 2 1 8 2"),
            Err(PathError::UnexpectedChar { ch: '2', offset: 12 })
        );
    }

    #[test]
    fn test_bad_exponent_points_at_exponent() {
        assert_eq!(
            parse_path("M0 0 L1e 2"),
            Err(PathError::UnexpectedChar { ch: 'e', offset: 7 })
        );
        assert_eq!(
            parse_path("M0 0 L3E-"),
            Err(PathError::UnexpectedChar { ch: 'E', offset: 7 })
        );
    }

    #[test]
    fn test_compact_numbers() {
        let outlines = parse_path("M0-1L1.5.5l-1e1,2E0").unwrap();
        assert_eq!(
            pts(&outlines[0]),
            vec![(0.0, -1.0), (1.5, 0.5), (-8.5, 2.5)]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_path("L0 0"), Err(PathError::NoMoveTo));
        assert_eq!(parse_path("0 0"), Err(PathError::NoMoveTo));
        assert_eq!(
            parse_path("M0 0 L1"),
            Err(PathError::MissingNumber { command: 'L' })
        );
        assert!(matches!(
            parse_path("M0 0 X1 1"),
            Err(PathError::UnexpectedChar { ch: 'X', .. })
        ));
    }

    #[test]
    fn test_empty_path_has_no_outlines() {
        assert!(parse_path("").unwrap().is_empty());
    }
}
