//! End-to-end passes over whole payload sets.

use hydrate_core::{CompressConfig, DecodeMode, Object, ScriptFragment, ScriptSink, ScriptStack, Value};
use hydrate_props::{PropsCompressor, Payload};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::json;
use std::sync::Arc;

const WORDS: &[&str] = &[
    "id", "name", "title", "href", "red", "¢", "£_", "do", "</script>", "", "tags", "slug", "__proto__",
];

fn random_value(rng: &mut StdRng, depth: usize, shared: &mut Vec<Value>) -> Value {
    let pick = if depth == 0 { rng.gen_range(0..4) } else { rng.gen_range(0..7) };
    match pick {
        0 => Value::Null,
        1 => Value::Bool(rng.gen_bool(0.5)),
        2 => Value::from(rng.gen_range(0..5i64)),
        3 => Value::string(WORDS[rng.gen_range(0..WORDS.len())]),
        4 => {
            let len = rng.gen_range(0..4);
            Value::array((0..len).map(|_| random_value(rng, depth - 1, shared)).collect::<Vec<_>>())
        }
        5 => {
            let mut obj = Object::new();
            for _ in 0..rng.gen_range(0..4) {
                let key = WORDS[rng.gen_range(0..WORDS.len())];
                obj.insert(key, random_value(rng, depth - 1, shared));
            }
            Value::from(obj)
        }
        _ => {
            if !shared.is_empty() && rng.gen_bool(0.6) {
                shared[rng.gen_range(0..shared.len())].clone()
            } else {
                let v = Value::array([random_value(rng, depth - 1, shared), Value::string("shared")]);
                shared.push(v.clone());
                v
            }
        }
    }
}

fn random_page(seed: u64) -> Vec<Payload> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut shared = Vec::new();
    (0..rng.gen_range(1..5))
        .map(|i| (format!("props{i}"), random_value(&mut rng, 4, &mut shared)))
        .collect()
}

fn listing_page(items: usize) -> Vec<Payload> {
    let author = Value::from(json!({"name": "Ada", "href": "/authors/ada/"}));
    let posts: Vec<Value> = (0..items)
        .map(|i| {
            Value::from(
                Object::new()
                    .with("title", format!("Post {i}"))
                    .with("category", "engineering")
                    .with("published", true)
                    .with("author", author.clone()),
            )
        })
        .collect();
    vec![
        ("posts".to_string(), Value::array(posts)),
        ("author".to_string(), author),
    ]
}

#[test]
fn test_roundtrip_random_pages() {
    let compressor = PropsCompressor::default();
    for seed in 0..200 {
        let page = random_page(seed);
        let prepared = compressor.prepare(&page).unwrap();
        for ((_, rewritten), (name, original)) in prepared.rewritten.iter().zip(&page) {
            assert_eq!(
                prepared.table.reconstruct(rewritten).unwrap(),
                original.to_json().unwrap(),
                "seed {seed}, payload {name}"
            );
        }
    }
}

#[test]
fn test_symbols_unique_and_not_reserved() {
    for seed in 0..50 {
        let prepared = PropsCompressor::default().prepare(&random_page(seed)).unwrap();
        let mut seen = std::collections::HashSet::new();
        for symbol in prepared.table.symbols() {
            assert!(seen.insert(symbol.to_string()), "duplicate symbol {symbol}");
            assert!(!hydrate_props::symbols::is_reserved(symbol));
        }
    }
}

#[test]
fn test_red_scenario_end_to_end() {
    let page = vec![
        ("a".to_string(), Value::from(json!({"x": "red", "y": "red"}))),
        ("b".to_string(), Value::from(json!(["red", "red", "red"]))),
    ];
    let mut pre = ScriptStack::new();
    let mut hydrate = ScriptStack::new();
    let report = PropsCompressor::default().compress(&page, &mut pre, &mut hydrate).unwrap();

    assert!(pre.fragments()[0].string.contains(r#"new Map([["¢","red"]])"#));
    assert_eq!(hydrate.fragments()[0].string, "<script>\nvar a = _$({\"x\":\"¢\",\"y\":\"¢\"});\n</script>");
    assert_eq!(hydrate.fragments()[1].string, "<script>\nvar b = _$([\"¢\",\"¢\",\"¢\"]);\n</script>");
    assert!(report.payload_len < report.original_len);
}

#[test]
fn test_deferred_mode_leaves_decoding_to_caller() {
    let config = CompressConfig::default().with_decode_mode(DecodeMode::Deferred);
    let page = vec![("a".to_string(), Value::from(json!(["red", "red"])))];
    let prepared = PropsCompressor::new(config).prepare(&page).unwrap();
    assert_eq!(prepared.payloads[0].string, "<script>\nvar a = [\"¢\",\"¢\"];\n</script>");
    assert!(prepared.decoder.string.contains("var _$ = function (t)"));
}

#[test]
fn test_decoder_and_payloads_land_in_separate_stacks() {
    let mut pre = ScriptStack::new();
    let mut hydrate: Vec<ScriptFragment> = Vec::new();
    PropsCompressor::default().compress(&listing_page(3), &mut pre, &mut hydrate).unwrap();

    let mut stack = ScriptStack::new();
    for fragment in hydrate {
        stack.push(fragment);
    }
    assert_eq!(pre.len(), 1);
    let page = format!("{}\n{}", pre.render(), stack.render());
    let decoder_at = page.find("var _$ =").unwrap();
    let posts_at = page.find("var posts =").unwrap();
    let author_at = page.find("var author =").unwrap();
    assert!(decoder_at < posts_at && posts_at < author_at);
}

#[test]
fn test_repeated_listing_compresses() {
    let report = PropsCompressor::default().prepare(&listing_page(200)).unwrap().report;
    assert!(report.emitted_len < report.original_len);
    assert!(report.reduction_ratio > 0.0);
}

#[test]
fn test_deterministic_output() {
    let page = listing_page(20);
    let first = PropsCompressor::default().prepare(&page).unwrap();
    let second = PropsCompressor::default().prepare(&page).unwrap();
    assert_eq!(first.table, second.table);
    assert_eq!(first.payloads, second.payloads);
    assert_eq!(first.decoder, second.decoder);
}

#[test]
fn test_custom_identifiers() {
    let config = CompressConfig::from_json(r#"{"table_var":"__d","decoder_fn":"__u","priority":7}"#).unwrap();
    let prepared = PropsCompressor::new(config).prepare(&listing_page(2)).unwrap();
    assert!(prepared.decoder.string.contains("var __d = new Map("));
    assert!(prepared.payloads[0].string.starts_with("<script>\nvar posts = __u("));
    assert_eq!(prepared.decoder.priority, 7);
}

#[tokio::test]
async fn test_independent_pages_compress_concurrently() {
    let compressor = Arc::new(PropsCompressor::default());
    let mut handles = Vec::new();
    for items in 1..9 {
        let c = compressor.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let page = listing_page(items);
            c.prepare(&page).map(|p| (items, p.table.len()))
        }));
    }
    for h in handles {
        let (items, symbols) = h.await.unwrap().unwrap();
        let alone = PropsCompressor::default().prepare(&listing_page(items)).unwrap();
        assert_eq!(symbols, alone.table.len());
    }
}
