use crate::domain::ports::{LineSink, LineSource, OverwritePolicy};
use crate::utils::error::{AnagramError, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// UTF-8 text file, one word per line.
#[derive(Debug, Clone)]
pub struct FileLineSource {
    path: PathBuf,
    name: String,
}

impl FileLineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Lines ending in `\n`, `\r\n` or a lone `\r`; terminators are dropped.
pub struct FileLines<R = BufReader<File>> {
    name: String,
    reader: R,
    skip_lf: bool,
}

impl<R: BufRead> FileLines<R> {
    fn new(name: String, reader: R) -> Self {
        Self {
            name,
            reader,
            skip_lf: false,
        }
    }

    fn read_word(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                if bytes.is_empty() {
                    return Ok(None);
                }
                break;
            }

            // 上一行以 \r 結尾時，緊接的 \n 屬於同一個換行
            if self.skip_lf {
                self.skip_lf = false;
                if buf[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    bytes.extend_from_slice(&buf[..end]);
                    self.skip_lf = buf[end] == b'\r';
                    self.reader.consume(end + 1);
                    break;
                }
                None => {
                    let len = buf.len();
                    bytes.extend_from_slice(buf);
                    self.reader.consume(len);
                }
            }
        }

        // 非 UTF-8 內容會以 InvalidData 回報
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl<R: BufRead> Iterator for FileLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_word()
            .map_err(|e| AnagramError::source_unreadable(&self.name, e))
            .transpose()
    }
}

impl LineSource for FileLineSource {
    type Lines = FileLines;

    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<FileLines> {
        let file =
            File::open(&self.path).map_err(|e| AnagramError::source_unreadable(&self.name, e))?;
        Ok(FileLines::new(self.name.clone(), BufReader::new(file)))
    }
}

/// Result file, replaced atomically: lines go to a temp file next to it, which is then renamed over it.
#[derive(Debug, Clone)]
pub struct FileLineSink {
    path: PathBuf,
    name: String,
    policy: OverwritePolicy,
}

impl FileLineSink {
    pub fn new(path: impl Into<PathBuf>, policy: OverwritePolicy) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name, policy }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileLineSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write_lines(&self, lines: Vec<String>) -> Result<()> {
        let path = self.path.clone();
        let policy = self.policy;

        tokio::task::spawn_blocking(move || replace_file(&path, &lines, policy))
            .await
            .map_err(|e| AnagramError::WorkerFailed {
                message: format!("writer for '{}': {}", self.name, e),
            })?
            .map_err(|e| AnagramError::sink_unwritable(&self.name, e))
    }
}

fn replace_file(path: &Path, lines: &[String], policy: OverwritePolicy) -> io::Result<()> {
    if policy == OverwritePolicy::Refuse && path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        ));
    }

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    // 暫存檔必須和目標在同一個檔案系統，rename 才是原子操作
    let mut tmp = temp_file_in(&parent)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    // 取代既有檔案時保留其權限
    if let Ok(existing) = fs::metadata(path) {
        if existing.is_file() {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
    }

    match policy {
        OverwritePolicy::Replace => tmp.persist(path).map_err(|e| e.error)?,
        OverwritePolicy::Refuse => tmp.persist_noclobber(path).map_err(|e| e.error)?,
    };
    Ok(())
}

/// Temp file created with the same mode `fs::write` would give a new file.
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".result-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // open(2) 會套用 umask
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_strips_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "act\r\ncat\n\nTree").unwrap();

        let source = FileLineSource::new(&path);
        let lines: Vec<String> = source.open().unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["act", "cat", "", "Tree"]);
    }

    #[test]
    fn test_lone_carriage_return_ends_a_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mac.txt");
        fs::write(&path, "act\rcat\r\ntree\n\rbee\r").unwrap();

        let source = FileLineSource::new(&path);
        let lines: Vec<String> = source.open().unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["act", "cat", "tree", "", "bee"]);
    }

    #[test]
    fn test_crlf_split_across_buffer_refills() {
        let reader = BufReader::with_capacity(1, io::Cursor::new("ab\r\ncd\r\r\nef"));
        let lines: Vec<String> = FileLines::new("cursor".to_string(), reader)
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["ab", "cd", "", "ef"]);
    }

    #[test]
    fn test_missing_source_is_unreadable() {
        let source = FileLineSource::new("/no/such/words.txt");
        let err = source.open().err().unwrap();
        assert!(matches!(err, AnagramError::SourceUnreadable { .. }));
        assert!(err.to_string().contains("/no/such/words.txt"));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [b'a', b'\n', 0xff, 0xfe, b'\n']).unwrap();

        let source = FileLineSource::new(&path);
        let results: Vec<Result<String>> = source.open().unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(AnagramError::SourceUnreadable { .. })
        ));
    }

    #[tokio::test]
    async fn test_sink_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result.txt");
        fs::write(&path, "stale line\nanother\nthird\n").unwrap();

        let sink = FileLineSink::new(&path, OverwritePolicy::Replace);
        sink.write_lines(vec!["act cat".to_string()]).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "act cat\n");
    }

    #[tokio::test]
    async fn test_sink_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/result.txt");

        let sink = FileLineSink::new(&path, OverwritePolicy::Replace);
        sink.write_lines(Vec::new()).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_sink_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result.txt");
        fs::write(&path, "keep me\n").unwrap();

        let sink = FileLineSink::new(&path, OverwritePolicy::Refuse);
        let err = sink
            .write_lines(vec!["act cat".to_string()])
            .await
            .unwrap_err();

        match err {
            AnagramError::SinkUnwritable { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\n");
        // 不應留下暫存檔
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sink_file_modes_match_plain_writes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;

        let plain = dir.path().join("plain.txt");
        fs::write(&plain, "x\n").unwrap();

        let fresh = dir.path().join("fresh.txt");
        FileLineSink::new(&fresh, OverwritePolicy::Replace)
            .write_lines(vec!["act cat".to_string()])
            .await
            .unwrap();
        assert_eq!(mode(&fresh), mode(&plain));

        let existing = dir.path().join("existing.txt");
        fs::write(&existing, "old\n").unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o640)).unwrap();
        FileLineSink::new(&existing, OverwritePolicy::Replace)
            .write_lines(vec!["act cat".to_string()])
            .await
            .unwrap();
        assert_eq!(mode(&existing), 0o640);
        assert_eq!(fs::read_to_string(&existing).unwrap(), "act cat\n");
    }

    #[tokio::test]
    async fn test_sink_into_directory_is_unwritable() {
        let dir = TempDir::new().unwrap();
        let sink = FileLineSink::new(dir.path(), OverwritePolicy::Replace);

        let err = sink.write_lines(vec!["x y".to_string()]).await.unwrap_err();
        assert!(matches!(err, AnagramError::SinkUnwritable { .. }));
    }
}
