use std::path::PathBuf;

use thiserror::Error;

/// Which attribute stream an out-of-range index points into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndexStream {
    Position,
    Normal,
}

impl std::fmt::Display for IndexStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => f.write_str("position"),
            Self::Normal => f.write_str("normal"),
        }
    }
}

/// Failure while loading, parsing, or assembling a mesh.
///
/// Every variant is recoverable: the caller decides whether to skip the
/// asset, fall back to another mesh, or abort. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to read mesh source{}: {source}", path_suffix(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mesh source at line {line}: {message}")]
    MalformedSource { line: usize, message: String },

    #[error("invalid face index {token:?} at line {line}")]
    InvalidIndex { line: usize, token: String },

    #[error("face at line {line} has {corners} corners; only triangles are supported")]
    UnsupportedTopology { line: usize, corners: usize },

    #[error("layout requests `{semantic}` but the mesh cannot supply it: {reason}")]
    LayoutMismatch { semantic: &'static str, reason: String },

    #[error("{stream} index {index} out of range (len {len}){}", line_suffix(.line))]
    IndexOutOfRange {
        line: Option<usize>,
        index: u32,
        len: usize,
        stream: IndexStream,
    },
}

impl MeshError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedSource { line, message: message.into() }
    }

    pub(crate) fn io(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

/// A vertex layout that cannot describe a consistent vertex.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("vertex layout has no attributes")]
    Empty,

    #[error("vertex layout stride must be non-zero")]
    ZeroStride,

    #[error("attribute `{semantic}` has {components} components; expected 1 to 4")]
    InvalidComponents { semantic: &'static str, components: u32 },

    #[error("attribute `{semantic}` ends at float {end} but the stride is {stride}")]
    ExceedsStride { semantic: &'static str, end: u32, stride: u32 },

    #[error("attributes `{first}` and `{second}` overlap")]
    Overlap { first: &'static str, second: &'static str },

    #[error("attribute `{semantic}` is declared more than once")]
    DuplicateSemantic { semantic: &'static str },
}
