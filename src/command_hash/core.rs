use crate::command_hash::tokenize::{substitute_compiler, tokenize};
use crate::hash_sink::HashSink;

/// Spawn `command` (after `%compiler%` substitution), absorb its merged
/// stdout+stderr into `sink`, and report whether it exited successfully.
///
/// Success is `(no I/O error draining the child's output) && (child exited
/// normally) && (exit code == 0)`. Non-fatal failures (spawn/exec failure,
/// nonzero exit, read error) return `false` and leave `sink` holding
/// whatever was absorbed before the failure -- the caller is expected to
/// discard the key it was building. Pipe or process-creation failure is
/// fatal: this function logs and aborts, since the spec treats that class
/// of failure as one cache correctness cannot be reasoned past.
pub fn run_and_hash(sink: &mut dyn HashSink, command: &str, compiler_path: &str) -> bool {
    let mut args = tokenize(command);
    substitute_compiler(&mut args, compiler_path);
    if args.is_empty() {
        log::warn!("command runner: empty command");
        return false;
    }

    let ok = platform::spawn_and_hash(sink, &args);
    if !ok {
        log::warn!("command runner: '{command}' failed");
    }
    ok
}

#[cfg(unix)]
mod platform {
    use std::ffi::CString;
    use std::io;

    use crate::hash_sink::HashSink;

    /// Buffer size for draining the child's combined stdout+stderr pipe.
    const READ_BUF: usize = 64 * 1024;

    pub fn spawn_and_hash(sink: &mut dyn HashSink, args: &[String]) -> bool {
        let c_args: Vec<CString> = match args
            .iter()
            .map(|a| CString::new(a.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(v) => v,
            Err(_) => {
                log::warn!("command runner: argument contains a NUL byte");
                return false;
            }
        };
        let mut argv: Vec<*const libc::c_char> =
            c_args.iter().map(|c| c.as_ptr()).collect();
        argv.push(std::ptr::null());

        let mut fds: [libc::c_int; 2] = [0; 2];
        // SAFETY: `fds` is a valid pointer to two `c_int`s.
        let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
        if rc != 0 {
            log::error!(
                "command runner: pipe() failed: {}",
                io::Error::last_os_error()
            );
            panic!("command runner: fatal pipe() failure");
        }
        let (read_fd, write_fd) = (fds[0], fds[1]);

        // SAFETY: `fork()` duplicates the process; both resulting processes
        // hold valid copies of `read_fd`/`write_fd` until they close them.
        let pid = unsafe { libc::fork() };
        if pid < 0 {
            log::error!(
                "command runner: fork() failed: {}",
                io::Error::last_os_error()
            );
            // SAFETY: both ends were just successfully created by pipe().
            unsafe {
                libc::close(read_fd);
                libc::close(write_fd);
            }
            panic!("command runner: fatal fork() failure");
        }

        if pid == 0 {
            // Child. SAFETY: standard fork/exec dance -- close the read
            // end, wire descriptors 1 and 2 to the write end, close 0, and
            // exec. If exec fails we must not unwind back into the parent's
            // Rust state, so bail out via `_exit` directly, using the
            // exec result (errno) as the exit code per spec.
            unsafe {
                libc::close(read_fd);
                libc::dup2(write_fd, libc::STDOUT_FILENO);
                libc::dup2(write_fd, libc::STDERR_FILENO);
                libc::close(write_fd);
                libc::close(libc::STDIN_FILENO);
                libc::execvp(argv[0], argv.as_ptr());
                // execvp only returns on failure; its result is communicated
                // through errno, not a return value.
                let code = io::Error::last_os_error().raw_os_error().unwrap_or(127);
                libc::_exit(code);
            }
        }

        // Parent. SAFETY: `write_fd` is only used by the child; close our
        // copy so the child is the sole writer and we see EOF once it
        // exits.
        unsafe {
            libc::close(write_fd);
        }

        let mut buf = [0u8; READ_BUF];
        let mut read_error = false;
        loop {
            // SAFETY: `buf` is a valid, appropriately-sized buffer; `read_fd`
            // is our end of the pipe, open for reading.
            let n = unsafe {
                libc::read(read_fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len())
            };
            if n < 0 {
                read_error = true;
                break;
            }
            if n == 0 {
                break;
            }
            sink.absorb_bytes(&buf[..n as usize]);
        }
        // SAFETY: `read_fd` was opened by the `pipe()` call above and not
        // yet closed.
        unsafe {
            libc::close(read_fd);
        }

        let mut status: libc::c_int = 0;
        // SAFETY: `pid` is a valid child of this process that has not yet
        // been waited on.
        unsafe {
            libc::waitpid(pid, &mut status, 0);
        }

        !read_error && libc::WIFEXITED(status) && libc::WEXITSTATUS(status) == 0
    }
}

#[cfg(not(unix))]
mod platform {
    use std::process::{Command, Stdio};

    use crate::hash_sink::HashSink;

    /// Non-Unix fallback using the host's native process-creation API.
    /// `std::process::Command` cannot merge stdout/stderr into a single
    /// ordered stream the way `dup2` does on the fork path, so this reads
    /// each stream fully and absorbs stdout before stderr -- an accepted,
    /// documented divergence from the fork path's true interleaving, per
    /// the platform-divergence design note.
    pub fn spawn_and_hash(sink: &mut dyn HashSink, args: &[String]) -> bool {
        if args.is_empty() {
            return false;
        }

        // The host's native command interpreter parses `echo` as a shell
        // builtin with different quoting rules than the fork path's
        // `/bin/sh`; route it through `cmd /C` so it behaves the same way
        // callers expect on the fork platform.
        let (program, call_args): (&str, Vec<String>) = if args[0] == "echo" {
            let mut full = vec!["/C".to_string()];
            full.extend(args.iter().cloned());
            ("cmd", full)
        } else {
            (args[0].as_str(), args[1..].to_vec())
        };

        let child = Command::new(program)
            .args(&call_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match child {
            Ok(c) => c,
            Err(e) => {
                log::warn!("command runner: spawn failed: {e}");
                return false;
            }
        };

        let mut stdout = child.stdout.take().expect("stdout was piped");
        let mut stderr = child.stderr.take().expect("stderr was piped");

        let stderr_thread = std::thread::spawn(move || {
            use std::io::Read;
            let mut buf = Vec::new();
            let ok = stderr.read_to_end(&mut buf).is_ok();
            (buf, ok)
        });

        use std::io::Read;
        let mut stdout_buf = Vec::new();
        let stdout_ok = stdout.read_to_end(&mut stdout_buf).is_ok();
        let (stderr_buf, stderr_ok) = stderr_thread.join().unwrap_or((Vec::new(), false));

        sink.absorb_bytes(&stdout_buf);
        sink.absorb_bytes(&stderr_buf);

        let status = match child.wait() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("command runner: wait failed: {e}");
                return false;
            }
        };

        stdout_ok && stderr_ok && status.success()
    }
}
