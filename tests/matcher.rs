use bytematch::{Nfa, StepLimitExceeded, check, check_with_limit, compile, parse};

fn nfa(pattern: &[u8]) -> Nfa {
    compile(&parse(pattern).expect("parse failed")).expect("compile failed")
}

#[test]
fn test_automaton_is_reusable() {
    let nfa = nfa(b"[a-z]+|[0-9]{2,3}");
    assert!(check(&nfa, b"hello"));
    assert!(check(&nfa, b"42"));
    assert!(check(&nfa, b"123"));
    assert!(!check(&nfa, b"1"));
    assert!(!check(&nfa, b"1234"));
    assert!(!check(&nfa, b"hello42"));
    assert!(check(&nfa, b"world"));
}

#[test]
fn test_whole_input_is_anchored() {
    let nfa = nfa(b"ab");
    assert!(!nfa.is_empty());
    assert_eq!(nfa.len(), 6);
    assert!(check(&nfa, b"ab"));
    assert!(!check(&nfa, b"xab"));
    assert!(!check(&nfa, b"abx"));
    assert!(!check(&nfa, b"a"));
}

#[test]
fn test_binary_input() {
    let nfa = nfa(b"\x00[\x01-\x03]*\xff");
    assert!(check(&nfa, b"\x00\x01\x02\x03\xff"));
    assert!(check(&nfa, b"\x00\xff"));
    assert!(!check(&nfa, b"\x00\x04\xff"));
}

#[test]
fn test_long_input_does_not_overflow_stack() {
    let nfa = nfa(b"a*b");
    let mut input = vec![b'a'; 100_000];
    assert!(!check(&nfa, &input));
    input.push(b'b');
    assert!(check(&nfa, &input));
}

#[test]
fn test_step_limit() {
    let nfa = nfa(b"(a|a)*c");
    assert_eq!(
        check_with_limit(&nfa, &[b'a'; 32], Some(10_000)),
        Err(StepLimitExceeded { limit: 10_000 })
    );
    assert_eq!(check_with_limit(&nfa, b"aac", Some(10_000)), Ok(true));
    assert_eq!(check_with_limit(&nfa, b"", None), Ok(false));
}

#[test]
fn test_concurrent_matches() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Nfa>();

    let nfa = nfa(b"(x|y)+z?");
    std::thread::scope(|scope| {
        for i in 0..4 {
            let nfa = &nfa;
            scope.spawn(move || {
                let input = vec![b'x'; i * 10 + 1];
                assert!(check(nfa, &input));
                assert!(!check(nfa, b"zz"));
            });
        }
    });
}
