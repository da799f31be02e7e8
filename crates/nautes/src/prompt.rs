use nautes_core::{Answer, Confirm, NautesError};
use std::io::{BufRead, Write};

/// 削除前に標準入力で確認を取る
///
/// y/n/A 以外の入力には同じ質問を繰り返す。
pub struct StdinConfirm<R> {
    input: R,
}

impl StdinConfirm<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: std::io::stdin().lock(),
        }
    }
}

impl<R: BufRead> StdinConfirm<R> {
    #[cfg(test)]
    fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Confirm for StdinConfirm<R> {
    fn ask(&mut self, name: &str) -> nautes_core::Result<Answer> {
        loop {
            print!(
                "'{}' を削除しますか？ [y/n/A] (A: 残りのリソースも確認せずに削除) ",
                name
            );
            std::io::stdout().flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(NautesError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "確認の入力が途中で終了しました",
                )));
            }
            if let Some(answer) = Answer::parse(&line) {
                return Ok(answer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reprompts_until_valid_answer() {
        let mut confirm = StdinConfirm::new(Cursor::new("maybe\n\nA\n"));
        assert_eq!(confirm.ask("web").unwrap(), Answer::All);
    }

    #[test]
    fn test_accepts_words_and_letters() {
        let mut confirm = StdinConfirm::new(Cursor::new("yes\nN\n"));
        assert_eq!(confirm.ask("api").unwrap(), Answer::Yes);
        assert_eq!(confirm.ask("web").unwrap(), Answer::No);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut confirm = StdinConfirm::new(Cursor::new("what\n"));
        assert!(confirm.ask("web").is_err());
    }
}
