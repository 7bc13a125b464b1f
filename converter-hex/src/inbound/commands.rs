//! Shell command parsing.

use converter_types::{CurrencyCode, InvalidCurrencyCode};

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select the source currency.
    From(CurrencyCode),
    /// Select the target currency.
    To(CurrencyCode),
    /// Replace the amount text. Bare numbers are shorthand for this.
    Amount(String),
    Swap,
    Retry,
    /// List quoted currencies with their rates.
    List,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`{0}` needs a currency code, e.g. `{0} EUR`")]
    MissingCurrency(&'static str),

    #[error(transparent)]
    InvalidCurrency(#[from] InvalidCurrencyCode),
}

impl Command {
    /// Parses one input line. Empty lines mean `show`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" | "show" => Ok(Command::Show),
            "from" => Ok(Command::From(currency_arg("from", rest)?)),
            "to" => Ok(Command::To(currency_arg("to", rest)?)),
            "amount" => Ok(Command::Amount(rest.to_string())),
            "swap" => Ok(Command::Swap),
            "retry" => Ok(Command::Retry),
            "list" | "currencies" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ if looks_like_amount(line) => Ok(Command::Amount(line.to_string())),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn currency_arg(command: &'static str, rest: &str) -> Result<CurrencyCode, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingCurrency(command));
    }
    Ok(CurrencyCode::parse(rest)?)
}

fn looks_like_amount(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

pub const HELP: &str = "\
Commands:
  from <CODE>     convert from this currency (fetches its rates)
  to <CODE>       convert into this currency
  amount <TEXT>   set the amount (or just type the number)
  swap            exchange from and to
  retry           fetch again after an error
  list            show every quoted currency
  show            redraw the result
  quit            leave
";

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn test_parse_currency_commands() {
        assert_eq!(Command::parse("from eur").unwrap(), Command::From(code("EUR")));
        assert_eq!(Command::parse("  TO   gbp ").unwrap(), Command::To(code("GBP")));
    }

    #[test]
    fn test_parse_amount_forms() {
        assert_eq!(
            Command::parse("amount 12.5").unwrap(),
            Command::Amount("12.5".into())
        );
        assert_eq!(Command::parse("amount").unwrap(), Command::Amount(String::new()));
        assert_eq!(Command::parse("42").unwrap(), Command::Amount("42".into()));
        assert_eq!(Command::parse(".5").unwrap(), Command::Amount(".5".into()));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("swap").unwrap(), Command::Swap);
        assert_eq!(Command::parse("Retry").unwrap(), Command::Retry);
        assert_eq!(Command::parse("currencies").unwrap(), Command::List);
        assert_eq!(Command::parse("").unwrap(), Command::Show);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("from"),
            Err(CommandError::MissingCurrency("from"))
        ));
        assert!(matches!(
            Command::parse("to euro"),
            Err(CommandError::InvalidCurrency(_))
        ));
        assert!(matches!(
            Command::parse("convert"),
            Err(CommandError::Unknown(w)) if w == "convert"
        ));
    }
}
