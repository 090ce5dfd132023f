//! Command line tokenizer.

/// Split a command line into arguments.
///
/// Arguments are separated by whitespace. An argument that starts with a
/// double quote runs until the next double quote and may contain spaces;
/// the quotes themselves are dropped. Empty arguments are never produced.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut at_boundary = true;

    for ch in line.chars() {
        if quoted {
            if ch == '"' {
                quoted = false;
            } else {
                current.push(ch);
            }
            continue;
        }

        if ch.is_whitespace() {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            at_boundary = true;
        } else {
            if at_boundary && ch == '"' {
                quoted = true;
            } else {
                current.push(ch);
            }
            at_boundary = false;
        }
    }

    if !current.is_empty() {
        args.push(current);
    }
    args
}
