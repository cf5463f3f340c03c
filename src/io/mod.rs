//! Instance parsing and solution output.
//!
//! Text format, line-oriented:
//!
//! ```text
//! nOrders nItems nAisles
//! <nOrders order lines:  k item qty item qty ...>
//! <nAisles aisle lines:  k item qty item qty ...>
//! lower upper
//! ```
//!
//! Output format, consumed by downstream tooling: the number of selected
//! orders followed by one order index per line, then the number of opened
//! aisles followed by one aisle index per line.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::model::{Aisle, Order, WaveBounds, WaveInstance, WaveSolution};
use crate::search::CheckpointSink;

/// Error raised while reading a problem instance.
#[derive(Debug)]
pub enum InstanceError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// Malformed content, with the 1-based line number.
    Parse { line: usize, message: String },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceError::Io(error) => write!(f, "instance read failed: {error}"),
            InstanceError::Parse { line, message } => {
                write!(f, "instance line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for InstanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstanceError::Io(error) => Some(error),
            InstanceError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for InstanceError {
    fn from(error: io::Error) -> Self {
        InstanceError::Io(error)
    }
}

/// Reads and validates an instance from `path`.
pub fn read_instance(path: impl AsRef<Path>) -> Result<WaveInstance, InstanceError> {
    parse_instance(BufReader::new(File::open(path)?))
}

/// Parses an instance from any buffered reader.
pub fn parse_instance<R: BufRead>(reader: R) -> Result<WaveInstance, InstanceError> {
    let mut lines = NumberedLines::new(reader);

    let header = lines.next_numbers::<usize>(3)?;
    let (n_orders, n_items, n_aisles) = (header[0], header[1], header[2]);

    let mut orders = Vec::with_capacity(n_orders);
    for _ in 0..n_orders {
        orders.push(Order::from_pairs(lines.next_pairs()?));
    }

    let mut aisles = Vec::with_capacity(n_aisles);
    for _ in 0..n_aisles {
        aisles.push(Aisle::from_pairs(lines.next_pairs()?));
    }

    let bounds = lines.next_numbers::<u64>(2)?;
    let instance = WaveInstance::new(orders, aisles, n_items, WaveBounds::new(bounds[0], bounds[1]));
    instance.validate().map_err(|message| InstanceError::Parse {
        line: lines.current,
        message,
    })?;
    Ok(instance)
}

/// Line reader that tracks position for error reporting.
struct NumberedLines<R> {
    reader: R,
    current: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self { reader, current: 0 }
    }

    fn next_line(&mut self) -> Result<String, InstanceError> {
        let mut line = String::new();
        self.current += 1;
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InstanceError::Parse {
                line: self.current,
                message: "unexpected end of file".into(),
            });
        }
        Ok(line)
    }

    /// Reads exactly `count` whitespace-separated numbers from one line.
    fn next_numbers<T: FromStr>(&mut self, count: usize) -> Result<Vec<T>, InstanceError> {
        let line = self.next_line()?;
        let numbers: Vec<T> = line
            .split_whitespace()
            .map(|token| {
                token.parse::<T>().map_err(|_| InstanceError::Parse {
                    line: self.current,
                    message: format!("invalid number {token:?}"),
                })
            })
            .collect::<Result<_, _>>()?;
        if numbers.len() != count {
            return Err(InstanceError::Parse {
                line: self.current,
                message: format!("expected {count} numbers, found {}", numbers.len()),
            });
        }
        Ok(numbers)
    }

    /// Reads one `k item qty item qty ...` catalog line.
    fn next_pairs(&mut self) -> Result<Vec<(usize, u32)>, InstanceError> {
        let line = self.next_line()?;
        let mut tokens = line.split_whitespace();
        let count: usize = match tokens.next() {
            Some(token) => token.parse().map_err(|_| InstanceError::Parse {
                line: self.current,
                message: format!("invalid pair count {token:?}"),
            })?,
            None => {
                return Err(InstanceError::Parse {
                    line: self.current,
                    message: "empty catalog line".into(),
                })
            }
        };

        let mut pairs = Vec::with_capacity(count);
        for _ in 0..count {
            let item = self.parse_token::<usize>(tokens.next())?;
            let qty = self.parse_token::<u32>(tokens.next())?;
            pairs.push((item, qty));
        }
        Ok(pairs)
    }

    fn parse_token<T: FromStr>(&self, token: Option<&str>) -> Result<T, InstanceError> {
        let token = token.ok_or_else(|| InstanceError::Parse {
            line: self.current,
            message: "truncated catalog line".into(),
        })?;
        token.parse::<T>().map_err(|_| InstanceError::Parse {
            line: self.current,
            message: format!("invalid number {token:?}"),
        })
    }
}

/// Writes a solution to `path`, replacing any previous content.
pub fn write_solution(path: impl AsRef<Path>, solution: &WaveSolution) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", solution.orders.len())?;
    for order in &solution.orders {
        writeln!(writer, "{order}")?;
    }
    writeln!(writer, "{}", solution.aisles.len())?;
    for aisle in &solution.aisles {
        writeln!(writer, "{aisle}")?;
    }
    writer.flush()
}

/// Checkpoint sink that rewrites one output file on every improvement.
///
/// The file always holds the latest best solution, so interrupting the
/// process at any point leaves a valid answer behind.
#[derive(Debug)]
pub struct FileCheckpoint {
    path: PathBuf,
}

impl FileCheckpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointSink for FileCheckpoint {
    fn record(&mut self, solution: &WaveSolution) -> io::Result<()> {
        write_solution(&self.path, solution)?;
        tracing::debug!(path = %self.path.display(), productivity = solution.productivity, "checkpoint written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
2 2 2
1 0 2
1 1 3
1 0 2
1 1 3
1 5
";

    #[test]
    fn test_parse_sample_instance() {
        let instance = parse_instance(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(instance.n_orders(), 2);
        assert_eq!(instance.n_items(), 2);
        assert_eq!(instance.n_aisles(), 2);
        assert_eq!(instance.order(0).quantity(0), 2);
        assert_eq!(instance.order(1).quantity(1), 3);
        assert_eq!(instance.aisle(1).stock(1), 3);
        assert_eq!(instance.bounds(), WaveBounds::new(1, 5));
    }

    #[test]
    fn test_parse_rejects_truncated_file() {
        let result = parse_instance(Cursor::new("2 2 2\n1 0 2\n"));
        assert!(matches!(result, Err(InstanceError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let result = parse_instance(Cursor::new("1 1 one\n"));
        assert!(matches!(result, Err(InstanceError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_parse_rejects_truncated_pairs() {
        let result = parse_instance(Cursor::new("1 2 0\n2 0 1\n0 1\n"));
        assert!(matches!(result, Err(InstanceError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_out_of_range_item() {
        let result = parse_instance(Cursor::new("1 1 1\n1 4 2\n1 0 1\n0 2\n"));
        assert!(matches!(result, Err(InstanceError::Parse { .. })));
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wave-pick-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_write_solution_format() {
        let path = temp_path("write.out");
        let solution = WaveSolution {
            orders: vec![0, 1],
            aisles: vec![1],
            productivity: 5.0,
        };
        write_solution(&path, &solution).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "2\n0\n1\n1\n1\n");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_checkpoint_overwrites() {
        let path = temp_path("checkpoint.out");
        let mut sink = FileCheckpoint::new(&path);

        sink.record(&WaveSolution {
            orders: vec![0],
            aisles: vec![0],
            productivity: 2.0,
        })
        .unwrap();
        sink.record(&WaveSolution {
            orders: vec![0, 1],
            aisles: vec![0, 1],
            productivity: 2.5,
        })
        .unwrap();

        // Only the last checkpoint survives.
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "2\n0\n1\n2\n0\n1\n");
        std::fs::remove_file(&path).ok();
    }
}
