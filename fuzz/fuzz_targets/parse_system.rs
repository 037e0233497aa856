#![no_main]

use libfuzzer_sys::fuzz_target;
use slae_io::{Layout, MAX_DIMENSION, MIN_DIMENSION, parse_system, render_system};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for layout in [Layout::Auto, Layout::Augmented, Layout::Split] {
        let Ok(system) = parse_system(text, layout) else {
            continue;
        };
        let n = system.dimension();
        assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&n));
        assert!(system.a.len() == n && system.a.iter().all(|row| row.len() == n));

        assert!(system.a.iter().flatten().chain(&system.b).all(|v| v.is_finite()));

        let reparsed = parse_system(&render_system(&system), Layout::Augmented);
        assert_eq!(reparsed.as_ref(), Ok(&system));
    }
});
