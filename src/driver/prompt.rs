//! Interactive Prompts
//!
//! コマンドラインで省略された値を標準入力から尋ねる

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// 空でない1行を読み取るまで問い合わせる
///
/// 入力が終端（EOF）に達した場合は `None` を返す
pub fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    loop {
        write!(output, "{}: ", label).context("Failed to write prompt")?;
        output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(Some(answer.to_string()));
        }
    }
}

/// 値を読み取り、パースに成功するまで問い合わせる
///
/// 入力が終端（EOF）に達した場合は `None` を返す
pub fn read_parsed<T, R, W>(input: &mut R, output: &mut W, label: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    R: BufRead,
    W: Write,
{
    while let Some(answer) = read_answer(input, output, label)? {
        match answer.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(output, "✗ {}", e).context("Failed to write prompt")?,
        }
    }
    Ok(None)
}

/// 空でない1行を読み取るまで問い合わせる
///
/// 入力が終端（EOF）に達した場合はエラーを返す
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String> {
    read_answer(input, output, label)?.ok_or_else(|| no_input(label))
}

/// 値を読み取り、パースに成功するまで問い合わせる
pub fn prompt_parsed<T, R, W>(input: &mut R, output: &mut W, label: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    R: BufRead,
    W: Write,
{
    read_parsed(input, output, label)?.ok_or_else(|| no_input(label))
}

fn no_input(label: &str) -> anyhow::Error {
    anyhow::anyhow!("No input provided for '{}'", label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::batch::BatchId;
    use std::io::Cursor;

    #[test]
    fn test_prompt_line_trims_answer() {
        let mut input = Cursor::new("  /photos/event  \n");
        let mut output = Vec::new();

        let answer = prompt_line(&mut input, &mut output, "Folder").unwrap();

        assert_eq!(answer, "/photos/event");
        assert_eq!(String::from_utf8(output).unwrap(), "Folder: ");
    }

    #[test]
    fn test_prompt_line_reprompts_on_blank() {
        let mut input = Cursor::new("\n   \n91234567\n");
        let mut output = Vec::new();

        let answer = prompt_line(&mut input, &mut output, "Phone").unwrap();

        assert_eq!(answer, "91234567");
        assert_eq!(String::from_utf8(output).unwrap().matches("Phone: ").count(), 3);
    }

    #[test]
    fn test_prompt_line_eof_is_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = prompt_line(&mut input, &mut output, "Phone").unwrap_err();
        assert!(err.to_string().contains("Phone"));
    }

    #[test]
    fn test_read_answer_eof_is_none() {
        let mut input = Cursor::new("  \n");
        let mut output = Vec::new();

        assert_eq!(read_answer(&mut input, &mut output, "Folder").unwrap(), None);
    }

    #[test]
    fn test_read_parsed_eof_after_invalid_value() {
        let mut input = Cursor::new("abc\n");
        let mut output = Vec::new();

        let batch: Option<BatchId> = read_parsed(&mut input, &mut output, "Batch").unwrap();

        assert!(batch.is_none());
        assert!(String::from_utf8(output).unwrap().contains("✗ "));
    }

    #[test]
    fn test_prompt_parsed_retries_invalid_value() {
        let mut input = Cursor::new("abc\n0\n4\n");
        let mut output = Vec::new();

        let batch: BatchId = prompt_parsed(&mut input, &mut output, "Batch").unwrap();

        assert_eq!(batch.value(), 4);
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("✗ Invalid batch number").count(), 2);
    }
}
