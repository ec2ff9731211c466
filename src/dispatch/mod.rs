
use std::{mem, num::NonZeroUsize, ops::Range, thread};

use log::trace;

/// Splits `[0, height)` into at most `threads` contiguous row bands.
///
/// Band boundaries are `i * height / n`, so band heights differ by at most
/// one row and the longer bands come last.
#[must_use]
pub fn bands(height: usize, threads: NonZeroUsize) -> Vec<Range<usize>> {
    let n = threads.get().min(height);
    (0..n).map(|i| (i * height / n)..((i + 1) * height / n)).collect()
}

/// Runs `work` once per row band of `buf`, each band on its own thread.
///
/// `buf` holds `row_len` samples per row. Every call to `work` receives the
/// band's row range and exclusive access to exactly those rows, so workers
/// never alias. Returns once all bands are finished.
pub fn run_bands<T, F>(buf: &mut [T], row_len: usize, threads: NonZeroUsize, work: F)
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Sync,
{
    let height = if row_len == 0 { 0 } else { buf.len() / row_len };
    let ranges = bands(height, threads);

    if ranges.len() <= 1 {
        if let Some(rows) = ranges.into_iter().next() {
            work(rows, buf);
        }
        return;
    }

    thread::scope(|s| {
        let work = &work;
        let mut rest = buf;
        for (index, rows) in ranges.into_iter().enumerate() {
            let (band, tail) = mem::take(&mut rest).split_at_mut(rows.len() * row_len);
            rest = tail;
            s.spawn(move || {
                trace!("band {index}: rows {}..{}", rows.start, rows.end);
                work(rows, band);
                trace!("band {index}: done");
            });
        }
    });
}
