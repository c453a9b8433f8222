use std::path::Path;

use crate::buffer::PaddedBuffer;
use crate::error::ScanError;
use crate::hash_sink::HashSink;
use crate::scanner::{self, Findings, FOUND_DATE, FOUND_TIME, FOUND_TIMESTAMP};
use crate::source_hash::clock;

/// Configuration consumed by [`hash_buffer`] / [`hash_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanConfig {
    /// When set, the macro scanner is bypassed entirely: findings are
    /// always empty and no date/timestamp entropy is ever absorbed. This is
    /// the caller-facing escape hatch for sources known not to meaningfully
    /// depend on the temporal macros.
    pub sloppy_time_macros: bool,
}

/// Default precompiled-header extension heuristic. The real policy belongs
/// to whatever collaborator owns compiler-specific knowledge; this is only
/// a reasonable default for callers that don't supply their own predicate.
pub fn is_precompiled_header_default(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("pch" | "gch" | "pchi" | "pchast")
    )
}

/// Feed a buffer into `sink`, augmenting with date/mtime entropy per
/// `config` and the scanner's findings. `originating_path` is used only for
/// `__TIMESTAMP__`'s mtime lookup and diagnostic logging; it need not exist
/// on disk if the caller already knows `config.sloppy_time_macros` is set.
pub fn hash_buffer(
    sink: &mut dyn HashSink,
    config: ScanConfig,
    buf: &PaddedBuffer,
    originating_path: &Path,
) -> Result<Findings, ScanError> {
    let findings = if config.sloppy_time_macros {
        Findings::NONE
    } else {
        scanner::scan(buf)
    };

    sink.absorb_bytes(buf.as_slice());

    if findings.contains(FOUND_DATE) {
        log::debug!("found __DATE__ in {}", originating_path.display());
        let (year, month, day) = clock::now_ymd().ok_or(ScanError::LocalTimeNow)?;
        sink.absorb_delimiter("date");
        sink.absorb_int(year as i64);
        sink.absorb_int(month as i64);
        sink.absorb_int(day as i64);
    }

    if findings.contains(FOUND_TIME) {
        // __TIME__ contributes no hash entropy: absorbing the wall-clock
        // second would make every build produce a different key. The
        // finding is still reported so the caller can disable whatever
        // "assume preprocessor output unchanged" optimization it runs.
        log::debug!("found __TIME__ in {}", originating_path.display());
    }

    if findings.contains(FOUND_TIMESTAMP) {
        log::debug!("found __TIMESTAMP__ in {}", originating_path.display());
        let mtime = std::fs::metadata(originating_path)
            .and_then(|m| m.modified())
            .map_err(|source| ScanError::StatTimestamp {
                path: originating_path.to_path_buf(),
                source,
            })?;
        let tm = clock::local_tm_for_mtime(mtime).ok_or_else(|| ScanError::LocalTimeMtime {
            path: originating_path.to_path_buf(),
        })?;
        let formatted = clock::format_tm_asctime(&tm).ok_or_else(|| ScanError::FormatTimestamp {
            path: originating_path.to_path_buf(),
        })?;
        sink.absorb_delimiter("timestamp");
        sink.absorb_bytes(formatted.as_bytes());
    }

    Ok(findings)
}

/// File-path convenience operation: short-circuits through the
/// precompiled-header fast path (raw content absorbed, no scan), otherwise
/// reads the file into a [`PaddedBuffer`] and delegates to [`hash_buffer`].
pub fn hash_file(
    sink: &mut dyn HashSink,
    config: ScanConfig,
    path: &Path,
    is_precompiled_header: impl Fn(&Path) -> bool,
) -> Result<Findings, ScanError> {
    if is_precompiled_header(path) {
        let raw = std::fs::read(path).map_err(|source| ScanError::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        sink.absorb_bytes(&raw);
        return Ok(Findings::NONE);
    }

    let buf = PaddedBuffer::from_file(path).map_err(|source| ScanError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    hash_buffer(sink, config, &buf, path)
}

/// Convenience wrapper around [`hash_file`] using
/// [`is_precompiled_header_default`].
pub fn hash_file_default(
    sink: &mut dyn HashSink,
    config: ScanConfig,
    path: &Path,
) -> Result<Findings, ScanError> {
    hash_file(sink, config, path, is_precompiled_header_default)
}
