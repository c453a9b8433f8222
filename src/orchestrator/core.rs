use crate::command_hash::run_and_hash;
use crate::hash_sink::HashSink;

/// Split `commands` on `;` and run each non-empty segment through
/// [`run_and_hash`] with the same `compiler_path`. Every segment is
/// attempted even after an earlier one fails, so the hash is populated
/// with whatever material the full command list produces. Returns `true`
/// iff every segment returned `true`.
pub fn run_all_and_hash(sink: &mut dyn HashSink, commands: &str, compiler_path: &str) -> bool {
    let mut all_ok = true;
    for segment in commands.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if !run_and_hash(sink, segment, compiler_path) {
            all_ok = false;
        }
    }
    all_ok
}
