use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::constants::RECORD_START;

const CHUNK: usize = 64 * 1024;

/// Режет поток байтов на записи по маркеру "8=FIX.".
///
/// Маркер остаётся в начале каждой записи. Хвостовые `\r`/`\n` обрезаются.
/// Мусор до первого маркера отдаётся отдельной записью (её отбракует
/// декодер), если это не одни пробельные символы.
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    eof: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(CHUNK),
            eof: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        let start = self.buf.len();
        self.buf.resize(start + CHUNK, 0);
        let n = loop {
            match self.reader.read(&mut self.buf[start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.truncate(start);
                    return Err(e);
                }
            }
        };
        self.buf.truncate(start + n);
        if n == 0 {
            self.eof = true;
        }
        Ok(())
    }

    /// Ищем начало следующей записи, пропуская маркер текущей
    fn next_boundary(&self) -> Option<usize> {
        let from = usize::from(self.buf.starts_with(RECORD_START)) * RECORD_START.len();
        find(&self.buf[from..], RECORD_START).map(|i| i + from)
    }

    fn take(&mut self, end: usize) -> Option<String> {
        let raw: Vec<u8> = self.buf.drain(..end).collect();
        let text = String::from_utf8_lossy(&raw);
        let text = text.trim_end_matches(['\r', '\n']);
        if text.trim().is_empty() {
            return None;
        }
        Some(text.to_string())
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(end) = self.next_boundary() {
                match self.take(end) {
                    Some(rec) => return Some(Ok(rec)),
                    None => continue,
                }
            }

            if self.eof {
                if self.buf.is_empty() {
                    return None;
                }
                let end = self.buf.len();
                match self.take(end) {
                    Some(rec) => return Some(Ok(rec)),
                    None => return None,
                }
            }

            if let Err(e) = self.fill() {
                self.eof = true;
                self.buf.clear();
                return Some(Err(e));
            }
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Чтение записей из файла
pub fn read_records_from_path(path: impl AsRef<Path>) -> io::Result<RecordReader<BufReader<File>>> {
    let f = File::open(path)?;
    Ok(RecordReader::new(BufReader::new(f)))
}
