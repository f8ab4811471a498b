//! Walks an ARC cache through admission, promotion, eviction, and ghost
//! re-admission, printing the four lists after each step.
//!
//! Run with `RUST_LOG=arckit=trace cargo run --example basic_arc` to see the
//! policy's own trace events.

use arckit::policy::arc::{ArcCache, ListKind};
use tracing_subscriber::EnvFilter;

fn show(label: &str, cache: &ArcCache<&'static str, u32>) {
    let list = |kind| cache.keys(kind).copied().collect::<Vec<_>>().join(" ");
    println!(
        "{:<28} p={} | ghost-recency [{}] live-recency [{}] live-frequency [{}] ghost-frequency [{}]",
        label,
        cache.pivot(),
        list(ListKind::GhostRecency),
        list(ListKind::LiveRecency),
        list(ListKind::LiveFrequency),
        list(ListKind::GhostFrequency),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = ArcCache::new(3);

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    show("three misses", &cache);

    cache.get(&"a");
    show("get a (promoted)", &cache);

    cache.set("d", 4);
    show("set d (b becomes a ghost)", &cache);

    println!("get b -> {:?} (ghosts hold no value)", cache.get(&"b"));

    cache.set("b", 20);
    show("set b (ghost hit, p grows)", &cache);

    cache.delete(&"a");
    show("delete a", &cache);

    println!("resident={} ghosts={}", cache.len(), cache.ghost_len());
}
