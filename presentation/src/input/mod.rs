//! Operator input
//!
//! The console stands in for the keypads and the competition desk. Each
//! line is split into single-character commands so a whole decision can be
//! entered at once ("135" is three white votes).

/// One operator action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    /// Referee keypad key, passed through to the keypad board
    Key(char),
    /// Next attempt
    Reset,
    ClockStart,
    ClockStop,
    Break,
    /// Hide the boards
    Hide,
    Help,
    Quit,
    Unknown(char),
}

impl OperatorCommand {
    fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            '1'..='9' | '0' => OperatorCommand::Key(c),
            'r' => OperatorCommand::Reset,
            's' => OperatorCommand::ClockStart,
            't' => OperatorCommand::ClockStop,
            'b' => OperatorCommand::Break,
            'h' => OperatorCommand::Hide,
            '?' => OperatorCommand::Help,
            'q' => OperatorCommand::Quit,
            other => OperatorCommand::Unknown(other),
        }
    }
}

/// Parse one input line. Whitespace is ignored.
pub fn parse_line(line: &str) -> Vec<OperatorCommand> {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(OperatorCommand::from_char)
        .collect()
}

/// Short help shown for `?`.
pub const HELP: &str = "\
1-6 keypads (odd=white, even=red)  r reset  s/t start/stop clock
b break  h hide  ? help  q quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_passed_through() {
        assert_eq!(
            parse_line("136"),
            vec![
                OperatorCommand::Key('1'),
                OperatorCommand::Key('3'),
                OperatorCommand::Key('6'),
            ]
        );
    }

    #[test]
    fn test_out_of_range_digits_reach_the_keypad() {
        // The keypad decides what 7 means, not the console.
        assert_eq!(parse_line("7"), vec![OperatorCommand::Key('7')]);
    }

    #[test]
    fn test_desk_commands() {
        assert_eq!(
            parse_line(" s R t b h ? Q "),
            vec![
                OperatorCommand::ClockStart,
                OperatorCommand::Reset,
                OperatorCommand::ClockStop,
                OperatorCommand::Break,
                OperatorCommand::Hide,
                OperatorCommand::Help,
                OperatorCommand::Quit,
            ]
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(parse_line("x"), vec![OperatorCommand::Unknown('x')]);
        assert!(parse_line("   ").is_empty());
    }
}
