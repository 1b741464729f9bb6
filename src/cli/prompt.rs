//! Interactive line prompts

use crate::error::MergeError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Question asked for the video URL
pub const URL_QUESTION: &str = "Enter the YouTube video URL: ";
/// Question asked for the quality index
pub const QUALITY_QUESTION: &str = "Enter the index of the desired quality: ";

/// Reads answers from `reader` and writes questions and listings to `writer`
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl Prompt<BufReader<Stdin>, Stdout> {
    /// Prompt on the process's standard input and output
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a prompt over any reader/writer pair
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write `question`, then read one line.
    ///
    /// The trailing line break is stripped. End of input yields an empty answer.
    pub async fn ask(&mut self, question: &str) -> Result<String, MergeError> {
        self.writer.write_all(question.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        self.reader.read_line(&mut line).await?;

        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(answer)
    }

    /// Write one line of text
    pub async fn say(&mut self, line: &str) -> Result<(), MergeError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_reads_one_line() {
        let input: &[u8] = b"https://youtube.com/watch?v=X\r\n2\n";
        let mut prompt = Prompt::new(input, Vec::new());

        assert_eq!(
            prompt.ask(URL_QUESTION).await.unwrap(),
            "https://youtube.com/watch?v=X"
        );
        assert_eq!(prompt.ask(QUALITY_QUESTION).await.unwrap(), "2");

        let (_, written) = prompt.into_inner();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            format!("{}{}", URL_QUESTION, QUALITY_QUESTION)
        );
    }

    #[tokio::test]
    async fn test_end_of_input_is_empty_answer() {
        let input: &[u8] = b"";
        let mut prompt = Prompt::new(input, Vec::new());
        assert_eq!(prompt.ask(URL_QUESTION).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_ask_with_mock_io() {
        let reader = tokio_test::io::Builder::new().read(b"  1  \n").build();
        let writer = tokio_test::io::Builder::new()
            .write(QUALITY_QUESTION.as_bytes())
            .build();
        let mut prompt = Prompt::new(BufReader::new(reader), writer);

        assert_eq!(prompt.ask(QUALITY_QUESTION).await.unwrap(), "  1  ");
    }

    #[tokio::test]
    async fn test_say_appends_newline() {
        let input: &[u8] = b"";
        let mut prompt = Prompt::new(input, Vec::new());
        prompt.say("1 - 720p - mp4 - 50.00 MB").await.unwrap();

        let (_, written) = prompt.into_inner();
        assert_eq!(written, b"1 - 720p - mp4 - 50.00 MB\n");
    }
}
