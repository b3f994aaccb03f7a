use governor_rpc_client::{Confirmation, Transaction};
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use crate::printer::print_json;

/// Prompt shown before a transaction is signed.
pub const CONTINUE_PROMPT: &str = "> Continue? [Y/n]";

/// Prompt shown when the keystore password was not given.
pub const PASSWORD_PROMPT: &str = "> Password: ";

/// Shows a transaction on the console and asks whether it should be sent.
///
/// The answer is read from `input`; only `n` or `N` declines, anything else
/// (including an empty line) accepts. With `assume_yes` the transaction is
/// still shown but nothing is asked.
pub struct ConsoleConfirmation<R> {
    input: Mutex<R>,
    assume_yes: bool,
}

impl ConsoleConfirmation<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> ConsoleConfirmation<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
            assume_yes: false,
        }
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Reads one answer and interprets it.
    pub fn ask(&self) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{CONTINUE_PROMPT} ")?;
        stdout.flush()?;

        let mut answer = String::new();
        let mut input = self
            .input
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "console input poisoned"))?;
        input.read_line(&mut answer)?;
        trim_newline(&mut answer);
        Ok(is_accepted(&answer))
    }
}

impl<R: BufRead + Send> Confirmation for ConsoleConfirmation<R> {
    fn confirm(&self, transaction: &Transaction) -> io::Result<bool> {
        // the request hook skips submissions, so this is the only echo
        print_json("Request", &serde_json::Value::Object(transaction.to_json()));
        if self.assume_yes {
            return Ok(true);
        }
        self.ask()
    }
}

fn is_accepted(answer: &str) -> bool {
    !answer.trim().eq_ignore_ascii_case("n")
}

/// Reads the keystore password without echoing it.
pub fn read_password() -> io::Result<String> {
    let mut password = rpassword::prompt_password(PASSWORD_PROMPT)?;
    trim_newline(&mut password);
    Ok(password)
}

/// Strips a trailing `\n` or `\r\n`.
pub fn trim_newline(s: &mut String) {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
}
