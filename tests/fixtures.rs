#![allow(dead_code)]
use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .is_test(true)
            .init();
    });
}

/// Reference forward search.
pub fn naive_find(s: &[u8], c: u8) -> Option<usize> {
    s.iter().position(|&b| b == c)
}

/// Reference backward search.
pub fn naive_rfind(s: &[u8], c: u8) -> Option<usize> {
    s.iter().rposition(|&b| b == c)
}

/// The bytes before the first NUL in `buf`, as a string.
pub fn cstr(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).expect("missing NUL terminator");
    std::str::from_utf8(&buf[..end]).expect("formatted output is ASCII")
}

/// Every length from 0 to 40 over a haystack that holds `c` exactly at `positions`.
pub fn haystacks_with(c: u8, filler: u8, positions: &[usize]) -> Vec<Vec<u8>> {
    (0..=40)
        .map(|len| {
            let mut hay = vec![filler; len];
            for &p in positions.iter().filter(|&&p| p < len) {
                hay[p] = c;
            }
            hay
        })
        .collect()
}
