#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    query: &'a str,
    candidate: &'a str,
}

fuzz_target!(|input: Input| {
    let score = jsift::query::wratio(input.query, input.candidate);
    assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
    if input.query == input.candidate && !input.query.is_empty() {
        assert_eq!(score, 100.0);
    }
});
