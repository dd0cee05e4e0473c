use crate::error::MeshError;

// ── Directive ─────────────────────────────────────────────────────────────

/// One face corner with 0-based references.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Corner {
    pub vertex: u32,
    /// Only read when face normals are requested.
    pub normal: Option<u32>,
}

/// A single interpreted source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive<'s> {
    Position([f32; 3]),
    Normal([f32; 3]),
    Face([Corner; 3]),
    /// A keyword outside the supported subset (`vt`, `o`, `g`, `usemtl`, ...).
    Ignored(&'s str),
    /// Empty line or comment only.
    Blank,
}

impl<'s> Directive<'s> {
    /// Interprets one line. `line_no` is 1-based and only used for errors.
    pub fn parse(src: &'s str, line_no: usize, face_normals: bool) -> Result<Self, MeshError> {
        // `#` starts a comment anywhere on the line
        let src = src.split_once('#').map_or(src, |(head, _)| head);

        let mut tokens = src.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(Directive::Blank);
        };

        match keyword {
            "v" => {
                let values = parse_floats(keyword, tokens, line_no)?;
                match values.as_slice() {
                    // optional `w` is dropped
                    [x, y, z] | [x, y, z, _] => Ok(Directive::Position([*x, *y, *z])),
                    other => Err(MeshError::malformed(
                        line_no,
                        format!("`v` expects 3 or 4 numbers, got {}", other.len()),
                    )),
                }
            }
            "vn" => {
                let values = parse_floats(keyword, tokens, line_no)?;
                match values.as_slice() {
                    [x, y, z] => Ok(Directive::Normal([*x, *y, *z])),
                    other => Err(MeshError::malformed(
                        line_no,
                        format!("`vn` expects 3 numbers, got {}", other.len()),
                    )),
                }
            }
            "f" => {
                let corners = tokens
                    .map(|tok| parse_corner(tok, line_no, face_normals))
                    .collect::<Result<Vec<_>, _>>()?;
                match <[Corner; 3]>::try_from(corners.as_slice()) {
                    Ok(tri) => Ok(Directive::Face(tri)),
                    Err(_) => Err(MeshError::UnsupportedTopology {
                        line: line_no,
                        corners: corners.len(),
                    }),
                }
            }
            other => Ok(Directive::Ignored(other)),
        }
    }
}

// ── token helpers ─────────────────────────────────────────────────────────

fn parse_floats<'a>(
    keyword: &str,
    tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Vec<f32>, MeshError> {
    tokens
        .map(|tok| match tok.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(MeshError::malformed(
                line_no,
                format!("`{keyword}` has non-numeric component {tok:?}"),
            )),
        })
        .collect()
}

/// Parses `v`, `v/t`, `v//n` or `v/t/n`.
fn parse_corner(token: &str, line_no: usize, face_normals: bool) -> Result<Corner, MeshError> {
    let mut parts = token.split('/');
    let vertex = parse_index(parts.next().unwrap_or_default(), token, line_no)?;

    let normal = if face_normals {
        match parts.nth(1) {
            Some(n) if !n.is_empty() => Some(parse_index(n, token, line_no)?),
            _ => None,
        }
    } else {
        None
    };

    Ok(Corner { vertex, normal })
}

/// Converts a 1-based reference to 0-based. Zero, negative and non-numeric
/// references are rejected.
fn parse_index(part: &str, token: &str, line_no: usize) -> Result<u32, MeshError> {
    match part.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(MeshError::InvalidIndex { line: line_no, token: token.to_string() }),
    }
}
