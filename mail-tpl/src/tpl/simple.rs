//! Module dedicated to the simple template parser.
//!
//! In simple mode a rendered template carries no directive at all:
//! the first non-blank line is the subject, everything after it is
//! the body.

/// Parse the given rendered template in simple mode.
///
/// Leading empty lines are skipped, then the first line becomes the
/// subject verbatim (a directive-shaped line is not given any
/// special meaning in this mode). All remaining lines are
/// concatenated as they are into the body: line terminators are not
/// preserved and nothing is inserted between lines. An empty
/// template yields an empty subject and an empty body.
pub fn parse(tpl: &str) -> (String, String) {
    let mut subject = String::new();
    let mut body = String::new();
    let mut subject_taken = false;

    for line in tpl.lines() {
        if !subject_taken {
            if line.is_empty() {
                continue;
            }
            subject = line.to_owned();
            subject_taken = true;
            continue;
        }
        body.push_str(line);
    }

    (subject, body)
}
