//! Line-based prompts on stdin. Generic over reader and writer so they can be
//! driven from tests.

use agenda::model::{Contact, ContactFields, Field};
use std::io::{self, BufRead, Write};

/// Asks a yes/no question. Anything but `y`/`yes` (including EOF) is a no.
pub fn confirm(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Prompts for every field in turn, showing the current value when there is
/// one. A blank answer keeps the current value; EOF stops prompting.
pub fn prompt_fields(
    current: Option<&Contact>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<ContactFields> {
    let mut fields = ContactFields::new();

    for field in Field::ALL {
        match current.map(|c| c.field(field)).filter(|v| !v.is_empty()) {
            Some(value) => write!(output, "{} [{}]: ", field.label(), value)?,
            None => write!(output, "{}: ", field.label())?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let answer = line.trim();
        if !answer.is_empty() {
            fields.set(field, answer);
        }
    }

    Ok(fields)
}
