//! Column letters and `A1`-style cell references

use std::cell::RefCell;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Columns a worksheet can hold (`A` to `XFD`); only these are cached
const CACHED_COLUMNS: u32 = 16_384;

thread_local! {
    // Column letters by zero-based index, filled on demand
    static COLUMN_CACHE: RefCell<Vec<Option<String>>> = const { RefCell::new(Vec::new()) };
}

/// Convert a zero-based column index to letters (0 -> A, 25 -> Z, 26 -> AA)
///
/// There is no zero digit: after `Z` comes `AA`, not `A0`. Results for the
/// columns a worksheet can hold are cached per thread since this runs once
/// per rendered cell.
pub fn col_to_letters(col: u32) -> String {
    if col >= CACHED_COLUMNS {
        return compute_letters(col);
    }

    COLUMN_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        let idx = col as usize;
        if cache.len() <= idx {
            cache.resize(idx + 1, None);
        }
        cache[idx]
            .get_or_insert_with(|| compute_letters(col))
            .clone()
    })
}

fn compute_letters(col: u32) -> String {
    // bijective base 26, least significant letter first
    let mut n = col as u64 + 1;
    let mut letters = Vec::with_capacity(7);
    while n > 0 {
        n -= 1;
        letters.push(LETTERS[(n % 26) as usize]);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

#[cfg(test)]
fn cached_len() -> usize {
    COLUMN_CACHE.with(|cache| cache.borrow().len())
}

/// Build a cell reference from zero-based row and column (0, 0 -> "A1")
pub fn cell_ref(row: u32, col: u32) -> String {
    let mut reference = col_to_letters(col);
    let mut buf = itoa::Buffer::new();
    reference.push_str(buf.format(row as u64 + 1));
    reference
}
