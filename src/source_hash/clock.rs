use std::time::SystemTime;

/// Year/month/day-of-month in local time, as required for `__DATE__`
/// entropy. Returns `None` on a clock or conversion failure.
pub fn now_ymd() -> Option<(i32, i32, i32)> {
    // SAFETY: `libc::time` with a null pointer just returns the current
    // time; it cannot fail in a way that corrupts memory.
    let now: libc::time_t = unsafe { libc::time(std::ptr::null_mut()) };
    tm_from_time_t(now).map(|tm| (tm.tm_year + 1900, tm.tm_mon + 1, tm.tm_mday))
}

/// Convert `mtime` to local time, as the first half of rendering the
/// canonical `__TIMESTAMP__` string. Returns `None` if the conversion
/// fails, which the caller should treat as "can't place this mtime in
/// local time" rather than a formatting problem.
pub fn local_tm_for_mtime(mtime: SystemTime) -> Option<libc::tm> {
    let secs = mtime
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as libc::time_t)
        .unwrap_or_else(|e| -(e.duration().as_secs() as libc::time_t));
    tm_from_time_t(secs)
}

/// Render an already-localized `tm` as the canonical 24-character
/// fixed-width timestamp (`"Day Mon DD HH:MM:SS YYYY\n"`) used for
/// `__TIMESTAMP__` entropy. Returns `None` if `asctime_r` itself fails.
pub fn format_tm_asctime(tm: &libc::tm) -> Option<String> {
    let mut buf = [0u8; 32];
    // SAFETY: `asctime_r` writes at most 26 bytes (including the NUL
    // terminator) into `buf`, which is 32 bytes long; `tm` is caller-owned
    // and valid for the duration of the call.
    let ptr = unsafe { libc::asctime_r(tm, buf.as_mut_ptr() as *mut libc::c_char) };
    if ptr.is_null() {
        return None;
    }
    let nul = buf.iter().position(|&b| b == 0)?;
    // asctime_r's output is fixed-width ASCII, so this is always valid UTF-8.
    Some(String::from_utf8_lossy(&buf[..nul]).into_owned())
}

fn tm_from_time_t(secs: libc::time_t) -> Option<libc::tm> {
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    // SAFETY: `secs` and `tm` are both valid for the duration of the call;
    // `localtime_r` only ever writes into `tm`.
    let ptr = unsafe { libc::localtime_r(&secs, &mut tm) };
    if ptr.is_null() {
        None
    } else {
        Some(tm)
    }
}
