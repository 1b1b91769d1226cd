#![no_main]
use libfuzzer_sys::fuzz_target;

use booking_csv::domain::csv_export::escape_field;

fuzz_target!(|data: &[u8]| {
    if let Ok(cell) = std::str::from_utf8(data) {
        let escaped = escape_field(cell);
        if escaped.len() != cell.len() {
            let inner = &escaped[1..escaped.len() - 1];
            assert_eq!(inner.replace("\"\"", "\""), cell);
        }
    }
});
