#![no_main]

use libfuzzer_sys::fuzz_target;
use slowpoke::reconstruct::Reconstructor;

fuzz_target!(|data: &[u8]| {
    // Every line must be accounted for and nothing may panic.
    let text = String::from_utf8_lossy(data);
    let mut reconstructor = Reconstructor::new();
    let mut lines = 0;
    for line in text.lines() {
        reconstructor.push_line(line);
        lines += 1;
    }
    assert_eq!(reconstructor.counts().total(), lines);

    let durations = reconstructor.finish();
    if !durations.is_empty() {
        let values: Vec<i64> = durations.values().copied().collect();
        let _ = slowpoke::stats::compute_statistics(&values);
    }
});
