//! Golden transcript comparison.

use std::fmt;

/// Drop ANSI escape sequences and carriage returns from captured console output.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                // CSI: ESC '[' params... final byte in 0x40..=0x7e
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for f in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&f) {
                            break;
                        }
                    }
                }
            }
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// 1-based line of the golden transcript that could not be matched.
    pub line: usize,
    pub expected: String,
    pub found: Option<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(found) => write!(f, "line {}: expected {:?}, found {:?}", self.line, self.expected, found),
            None => write!(f, "line {}: expected {:?}, output ended", self.line, self.expected),
        }
    }
}

/// The golden lines must appear in `output` as one contiguous block, in order.
pub fn find_block(output: &str, golden: &str) -> Result<(), Mismatch> {
    let out: Vec<&str> = output.lines().collect();
    let want: Vec<&str> = golden.lines().collect();
    if want.is_empty() {
        return Ok(());
    }

    // (start, matched) of the longest partial match, for the report
    let mut best: Option<(usize, usize)> = None;
    for start in 0..out.len() {
        let matched = want.iter().zip(&out[start..]).take_while(|(w, o)| w == o).count();
        if matched == want.len() {
            return Ok(());
        }
        if matched > 0 && best.map_or(true, |(_, m)| matched > m) {
            best = Some((start, matched));
        }
    }

    let (start, matched) = best.unwrap_or((0, 0));
    Err(Mismatch {
        line: matched + 1,
        expected: want[matched].to_string(),
        found: if best.is_some() { out.get(start + matched).map(|s| s.to_string()) } else { None },
    })
}
