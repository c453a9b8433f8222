/// Shell-like whitespace tokenizer with single/double quoting and
/// backslash escapes. Good enough to split the command strings this crate
/// is handed (`cc %compiler% -E foo.c`, `/bin/sh -c 'printf hello'`); full
/// shell grammar (globbing, `$VAR`, subshells) is out of scope -- the
/// upstream tokenizer this stands in for is a named external collaborator.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_token = true;
                for c2 in chars.by_ref() {
                    if c2 == '\'' {
                        break;
                    }
                    current.push(c2);
                }
            }
            '"' => {
                in_token = true;
                while let Some(c2) = chars.next() {
                    if c2 == '"' {
                        break;
                    }
                    if c2 == '\\' {
                        if let Some(&next) = chars.peek() {
                            if matches!(next, '"' | '\\' | '$' | '`') {
                                current.push(next);
                                chars.next();
                                continue;
                            }
                        }
                    }
                    current.push(c2);
                }
            }
            '\\' => {
                in_token = true;
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

/// Substitute every argument literally equal to `%compiler%` with
/// `compiler_path`.
pub fn substitute_compiler(args: &mut [String], compiler_path: &str) {
    for arg in args.iter_mut() {
        if arg == "%compiler%" {
            *arg = compiler_path.to_string();
        }
    }
}
