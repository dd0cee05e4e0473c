use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::directive::{Corner, Directive};
use crate::error::{IndexStream, MeshError};
use crate::raw::RawMeshData;

/// Parser configuration.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Also read the normal reference (`v//n`, `v/t/n`) of every face corner.
    ///
    /// The references are kept only when every corner in the source has one;
    /// a source that mixes corners with and without normals is rejected.
    pub face_normals: bool,
}

// ── Parser ────────────────────────────────────────────────────────────────

/// Accumulates directives line by line into attribute streams.
pub struct Parser {
    options: ParseOptions,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    face_indices: Vec<u32>,
    normal_indices: Vec<u32>,
    /// Line of the first face corner lacking a normal reference.
    corner_without_normal: Option<usize>,
    /// Source line of each face, for error reporting.
    face_lines: Vec<usize>,
    ignored: usize,
    line_no: usize,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            positions: Vec::new(),
            normals: Vec::new(),
            face_indices: Vec::new(),
            normal_indices: Vec::new(),
            corner_without_normal: None,
            face_lines: Vec::new(),
            ignored: 0,
            line_no: 0,
        }
    }

    /// Feeds the next source line.
    pub fn push_line(&mut self, line: &str) -> Result<(), MeshError> {
        self.line_no += 1;

        match Directive::parse(line, self.line_no, self.options.face_normals)? {
            Directive::Position(p) => self.positions.push(p),
            Directive::Normal(n) => self.normals.push(n),
            Directive::Face(corners) => self.push_face(corners)?,
            Directive::Ignored(keyword) => {
                log::trace!("line {}: ignoring `{}`", self.line_no, keyword);
                self.ignored += 1;
            }
            Directive::Blank => {}
        }
        Ok(())
    }

    fn push_face(&mut self, corners: [Corner; 3]) -> Result<(), MeshError> {
        self.face_lines.push(self.line_no);
        for corner in corners {
            self.face_indices.push(corner.vertex);
            if !self.options.face_normals {
                continue;
            }
            match corner.normal {
                Some(n) => self.normal_indices.push(n),
                None => {
                    self.corner_without_normal.get_or_insert(self.line_no);
                }
            }
        }

        if self.corner_without_normal.is_some() && !self.normal_indices.is_empty() {
            return Err(MeshError::malformed(
                self.line_no,
                "faces mix corners with and without normal references",
            ));
        }
        Ok(())
    }

    /// Range-checks every reference and returns the finished streams.
    pub fn finish(self) -> Result<RawMeshData, MeshError> {
        check_range(&self.face_indices, &self.face_lines, self.positions.len(), IndexStream::Position)?;

        let normal_indices = if self.options.face_normals
            && self.corner_without_normal.is_none()
            && !self.face_indices.is_empty()
        {
            check_range(&self.normal_indices, &self.face_lines, self.normals.len(), IndexStream::Normal)?;
            Some(self.normal_indices)
        } else {
            None
        };

        log::debug!(
            "parsed mesh: {} positions, {} normals, {} triangles ({} ignored directives)",
            self.positions.len(),
            self.normals.len(),
            self.face_indices.len() / 3,
            self.ignored,
        );

        let raw = RawMeshData::from_parts(self.positions, self.normals, self.face_indices);
        Ok(match normal_indices {
            Some(ni) => raw.with_normal_indices(ni),
            None => raw,
        })
    }
}

fn check_range(
    indices: &[u32],
    face_lines: &[usize],
    len: usize,
    stream: IndexStream,
) -> Result<(), MeshError> {
    match indices.iter().position(|&i| i as usize >= len) {
        None => Ok(()),
        Some(at) => Err(MeshError::IndexOutOfRange {
            line: face_lines.get(at / 3).copied(),
            index: indices[at],
            len,
            stream,
        }),
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parses OBJ source held in memory.
pub fn parse_str(src: &str) -> Result<RawMeshData, MeshError> {
    parse_str_with(src, ParseOptions::default())
}

pub fn parse_str_with(src: &str, options: ParseOptions) -> Result<RawMeshData, MeshError> {
    let mut parser = Parser::new(options);
    for line in src.lines() {
        parser.push_line(line)?;
    }
    parser.finish()
}

/// Parses OBJ source from any buffered reader, one line at a time.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<RawMeshData, MeshError> {
    parse_reader_with(reader, ParseOptions::default())
}

pub fn parse_reader_with<R: BufRead>(reader: R, options: ParseOptions) -> Result<RawMeshData, MeshError> {
    let mut parser = Parser::new(options);
    for line in reader.lines() {
        let line = line.map_err(|e| MeshError::io(None, e))?;
        parser.push_line(&line)?;
    }
    parser.finish()
}

/// Opens and parses an OBJ file. The file handle is released before return
/// on every path.
pub fn load_path(path: impl AsRef<Path>) -> Result<RawMeshData, MeshError> {
    load_path_with(path, ParseOptions::default())
}

pub fn load_path_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<RawMeshData, MeshError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::io(Some(path.to_path_buf()), e))?;

    log::debug!("loading mesh from {}", path.display());
    parse_reader_with(BufReader::new(file), options).map_err(|err| match err {
        MeshError::Io { path: None, source } => MeshError::io(Some(path.to_path_buf()), source),
        other => other,
    })
}
