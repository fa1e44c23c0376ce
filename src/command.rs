//! Line commands understood by the terminal reader.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Goto(usize),
    /// Repaginate with a new budget.
    Budget(usize),
    Show,
    Quit,
}

/// Parse one line of input. An empty line means "next page".
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(Command::Next);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments: {line:?}"));
    }

    let number = |what: &str| -> Result<usize, String> {
        let raw = arg.ok_or_else(|| format!("`{verb}` needs {what}"))?;
        raw.parse::<usize>()
            .map_err(|_| format!("`{raw}` is not a valid {what}"))
    };

    match verb.to_ascii_lowercase().as_str() {
        "n" | "next" if arg.is_none() => Ok(Command::Next),
        "p" | "prev" if arg.is_none() => Ok(Command::Prev),
        "s" | "show" if arg.is_none() => Ok(Command::Show),
        "q" | "quit" if arg.is_none() => Ok(Command::Quit),
        "g" | "goto" => number("page index").map(Command::Goto),
        "b" | "budget" => match number("page budget")? {
            0 => Err("page budget must be positive".to_string()),
            budget => Ok(Command::Budget(budget)),
        },
        "n" | "next" | "p" | "prev" | "s" | "show" | "q" | "quit" => {
            Err(format!("`{verb}` takes no argument"))
        }
        _ => Err(format!("unknown command `{verb}`")),
    }
}
