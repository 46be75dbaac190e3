use std::collections::HashSet;

use rand::RngCore;

use randjson_core::{GenerateConfig, KEY_FIRST_CHARS, KEY_REST_CHARS, Node};
use randjson_generate::{CancelToken, Generator, GenerationError, NoProgress, ProgressEvent};

/// Random source that always yields zero bits, pinning every draw to its
/// lowest outcome.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

fn config(data_count: u64, seed: u64) -> GenerateConfig {
    GenerateConfig {
        data_count,
        seed,
        ..GenerateConfig::default()
    }
}

fn generate(config: GenerateConfig) -> Node {
    Generator::new(config)
        .expect("valid config")
        .generate(&mut NoProgress, &CancelToken::new())
        .expect("generate tree")
}

fn walk<'a>(root: &'a Node, visit: &mut impl FnMut(&'a Node)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.children());
    }
}

#[test]
fn generates_exact_value_count() {
    for (count, seed) in [(0, 1), (1, 2), (7, 3), (100, 4), (2500, 5)] {
        let root = generate(config(count, seed));
        assert!(matches!(root, Node::Object(_)), "root must be an object");
        assert_eq!(root.descendant_count(), count, "count {count} seed {seed}");
    }
}

#[test]
fn emits_one_generation_event_per_value() {
    let mut events = Vec::new();
    Generator::new(config(40, 9))
        .expect("valid config")
        .generate(
            &mut |event: ProgressEvent| events.push(event),
            &CancelToken::new(),
        )
        .expect("generate tree");

    assert_eq!(events.len(), 40);
    assert_eq!(events[0], ProgressEvent::Generated { done: 1, total: 40 });
    assert_eq!(events[39], ProgressEvent::Generated { done: 40, total: 40 });
}

#[test]
fn object_keys_are_unique_and_well_formed() {
    // Short keys force collisions and regeneration.
    let config = GenerateConfig {
        data_count: 3000,
        max_key_length: 2,
        seed: 11,
        ..GenerateConfig::default()
    };
    let max_key_length = config.max_key_length;
    let root = generate(config);

    let mut objects = 0;
    walk(&root, &mut |node| {
        if let Node::Object(members) = node {
            objects += 1;
            let mut keys = HashSet::new();
            for (key, _) in members {
                assert!(keys.insert(key.as_str()), "duplicate key {key}");
                assert!(!key.is_empty() && key.len() <= max_key_length, "key {key}");
                let mut chars = key.chars();
                let first = chars.next().expect("non-empty key");
                assert!(KEY_FIRST_CHARS.contains(first), "key {key}");
                assert!(chars.all(|c| KEY_REST_CHARS.contains(c)), "key {key}");
            }
        }
    });
    assert!(objects > 1);
}

#[test]
fn scalars_respect_configured_bounds() {
    let config = GenerateConfig {
        data_count: 2000,
        max_string_length: 6,
        string_alphabet: "xyz".to_string(),
        max_number: 10.0,
        seed: 21,
        ..GenerateConfig::default()
    };
    let root = generate(config);

    let mut strings = 0;
    let mut numbers = 0;
    walk(&root, &mut |node| match node {
        Node::String(value) => {
            strings += 1;
            assert!(value.chars().count() <= 6, "string {value:?}");
            assert!(value.chars().all(|c| "xyz".contains(c)), "string {value:?}");
        }
        Node::Number(value) => {
            numbers += 1;
            assert!((0.0..10.0).contains(value), "number {value}");
        }
        _ => {}
    });
    assert!(strings > 0 && numbers > 0);
}

#[test]
fn zero_max_string_length_yields_empty_strings() {
    let config = GenerateConfig {
        data_count: 600,
        max_string_length: 0,
        seed: 5,
        ..GenerateConfig::default()
    };
    let root = generate(config);

    let mut strings = 0;
    walk(&root, &mut |node| {
        if let Node::String(value) = node {
            strings += 1;
            assert!(value.is_empty());
        }
    });
    assert!(strings > 0);
}

#[test]
fn same_seed_same_tree() {
    let a = generate(config(800, 42));
    let b = generate(config(800, 42));
    let c = generate(config(800, 43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn single_value_lands_in_root() {
    let config = GenerateConfig {
        data_count: 1,
        ..GenerateConfig::default()
    };
    let root = Generator::with_rng(config, ZeroRng)
        .expect("valid config")
        .generate(&mut NoProgress, &CancelToken::new())
        .expect("generate tree");

    assert_eq!(
        root,
        Node::Object(vec![("a".to_string(), Node::String(String::new()))])
    );
}

#[test]
fn invalid_config_is_rejected_before_generation() {
    let config = GenerateConfig {
        string_alphabet: String::new(),
        ..GenerateConfig::default()
    };
    assert!(matches!(
        Generator::new(config),
        Err(GenerationError::Config(_))
    ));
}

#[test]
fn cancelled_generation_stops() {
    let token = CancelToken::new();
    token.cancel();
    let result = Generator::new(config(10, 1))
        .expect("valid config")
        .generate(&mut NoProgress, &token);
    assert!(matches!(result, Err(GenerationError::Cancelled)));
}
