use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    thread::{self, JoinHandle},
};

use crossbeam::channel::{Receiver, Sender};
use xz2::read::XzDecoder;

/// A streaming address trace.
///
/// Traces are text, one address per line, decimal or `0x`-hex; blank
/// lines and `#` comments are skipped, anything else is warned about and
/// dropped. A `.xz` suffix selects on-the-fly decompression. A
/// background thread parses and ships batches over a bounded channel so
/// decode overlaps with simulation; dropping the receiver stops it.
///
/// Addresses are read as `i64`, negatives included: rejecting them is
/// the model's job, not the reader's.
pub struct Trace {
    pub rec: Receiver<Vec<i64>>,
    _thread: JoinHandle<()>,
}

impl Trace {
    pub fn read(
        path: PathBuf,
        addrs_per_batch: usize,
        batches_per_queue: usize,
    ) -> io::Result<Trace> {
        let file = fs::File::open(&path)?;
        let compressed = path.extension().is_some_and(|ext| ext == "xz");
        let (sender, receiver) = crossbeam::channel::bounded(batches_per_queue);

        let t = thread::spawn(move || {
            if compressed {
                Trace::run_thread(BufReader::new(XzDecoder::new(file)), addrs_per_batch, sender)
            } else {
                Trace::run_thread(BufReader::new(file), addrs_per_batch, sender)
            }
        });

        Ok(Trace {
            rec: receiver,
            _thread: t,
        })
    }

    fn run_thread<R: BufRead>(reader: R, addrs_per_batch: usize, queue: Sender<Vec<i64>>) {
        let mut batch = Vec::with_capacity(addrs_per_batch);
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("trace read error: {err}");
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_addr(line) {
                Some(addr) => batch.push(addr),
                None => {
                    log::warn!("skipping unparsable trace line: {line:?}");
                    continue;
                }
            }
            if batch.len() == addrs_per_batch {
                let full = std::mem::replace(&mut batch, Vec::with_capacity(addrs_per_batch));
                if queue.send(full).is_err() {
                    return;
                }
            }
        }
        if !batch.is_empty() {
            let _ = queue.send(batch);
        }
    }
}

fn parse_addr(line: &str) -> Option<i64> {
    if let Some(hex) = line.strip_prefix("0x").or_else(|| line.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else {
        line.parse().ok()
    }
}
